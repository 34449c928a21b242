//! ArcGIS FeatureServer access
//!
//! One `query` request per layer; the response's `features` array is
//! handed on as raw attribute bags.

mod client;
mod types;

pub use client::ArcGisClient;
pub use types::{FeatureSet, RawFeature, ServiceErrorBody};
