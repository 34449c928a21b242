use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::ExportConfig;
use crate::error::RoadNetError;
use crate::traits::FeatureSource;
use crate::types::QueryParameters;

use super::types::{FeatureSet, RawFeature};

/// FeatureServer query client. One GET per call, no retries.
#[derive(Debug, Clone)]
pub struct ArcGisClient {
    config: ExportConfig,
    http: Client,
}

impl ArcGisClient {
    pub fn new(config: ExportConfig) -> Result<Self, RoadNetError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RoadNetError::ClientInit)?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Send the query and decode the body. Connection failures, timeouts
    /// and non-2xx statuses are transport errors; a body that is not JSON is
    /// a decode error.
    pub async fn fetch(
        &self,
        layer: u32,
        params: &QueryParameters,
    ) -> Result<FeatureSet, RoadNetError> {
        let url = self.config.layer_query_url(layer);
        debug!("GET {} where={}", url, params.where_clause);

        let response = self
            .http
            .get(&url)
            .query(&params.to_query_pairs())
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|source| RoadNetError::Transport { layer, source })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|source| RoadNetError::Transport { layer, source })?;

        serde_json::from_slice(&body).map_err(|source| RoadNetError::Decode { status, source })
    }
}

#[async_trait]
impl FeatureSource for ArcGisClient {
    async fn query(
        &self,
        layer: u32,
        params: &QueryParameters,
    ) -> Result<Vec<RawFeature>, RoadNetError> {
        let start = Instant::now();
        let set = self.fetch(layer, params).await?;

        if let Some(error) = set.service_error() {
            warn!(
                "Layer {} returned a service error: code={:?}, message={}",
                layer,
                error.code,
                error.message.as_deref().unwrap_or("")
            );
        }
        if set.exceeded_transfer_limit == Some(true) {
            warn!(
                "Layer {} result was truncated by the server's transfer limit",
                layer
            );
        }

        let features = set.into_features();
        info!(
            "Queried layer {} in {:.2}s; features: {}",
            layer,
            start.elapsed().as_secs_f64(),
            features.len()
        );
        Ok(features)
    }
}
