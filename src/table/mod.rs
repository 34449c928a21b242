//! Row normalization, deduplication and ordering

mod dedupe;
mod normalize;
mod row;
mod sort;

pub use dedupe::dedupe;
pub use normalize::{normalize, normalize_feature};
pub use row::{ExpresswayRow, FieldValue, NationalRoadRow, RoadRow, RoadTable};
pub use sort::sort_rows;
