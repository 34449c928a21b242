use std::collections::HashSet;

use super::row::RoadRow;

/// Drop repeated rows, keeping the first occurrence of each in input order.
pub fn dedupe(rows: Vec<RoadRow>) -> Vec<RoadRow> {
    let mut seen = HashSet::with_capacity(rows.len());
    rows.into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect()
}
