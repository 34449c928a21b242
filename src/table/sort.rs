use super::row::RoadRow;

/// Order rows by their road-class key, ascending, nulls first. The sort is
/// stable, so rows with equal keys keep their incoming order.
pub fn sort_rows(mut rows: Vec<RoadRow>) -> Vec<RoadRow> {
    rows.sort_by(|a, b| a.cmp_key(b));
    rows
}
