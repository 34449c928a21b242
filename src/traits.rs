use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::arcgis::RawFeature;
use crate::error::{Cancellation, RoadNetError};
use crate::table::RoadTable;
use crate::types::QueryParameters;

/// Remote feature query
#[async_trait]
pub trait FeatureSource: Send + Sync {
    /// Run one query against `layer` and return its features in response order.
    async fn query(
        &self,
        layer: u32,
        params: &QueryParameters,
    ) -> Result<Vec<RawFeature>, RoadNetError>;
}

#[async_trait]
impl<T: FeatureSource + ?Sized> FeatureSource for Arc<T> {
    async fn query(
        &self,
        layer: u32,
        params: &QueryParameters,
    ) -> Result<Vec<RawFeature>, RoadNetError> {
        (**self).query(layer, params).await
    }
}

/// Interactive prompts. Invalid input is handled inside the implementation
/// by asking again; only a valid value or a cancellation comes back.
#[async_trait]
pub trait Console: Send {
    /// Single choice from `options`; returns the chosen index, which should
    /// be below `options.len()`. Callers re-prompt on anything else.
    async fn request_choice(
        &mut self,
        prompt: &str,
        options: &[&str],
    ) -> Result<usize, Cancellation>;

    /// Integer within `[min, max]` (either side open when `None`). With
    /// `allow_unlimited`, `-1` is accepted regardless of the bounds.
    async fn request_bounded_int(
        &mut self,
        prompt: &str,
        min: Option<i64>,
        max: Option<i64>,
        allow_unlimited: bool,
    ) -> Result<i64, Cancellation>;

    /// Free text line, trimmed.
    async fn request_text(&mut self, prompt: &str) -> Result<String, Cancellation>;

    /// Progress or result message for the user.
    fn say(&mut self, message: &str);
}

/// Writes a finished table under a base filename.
pub trait TableExporter: Send + Sync {
    /// Returns the path of the written file.
    fn export(&self, table: &RoadTable, filename: &str) -> Result<PathBuf, RoadNetError>;
}
