use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_FEATURE_LAYER_URL: &str = "https://apps2.dpwh.gov.ph/server/rest/services/DPWH_Public/RoadNetwork_RoadClassification/FeatureServer";
pub const DEFAULT_OUTPUT_DIR: &str = "./gis_data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Run configuration, built once in `main` and handed to each component.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// FeatureServer root; layer queries go to `{url}/{layer}/query`.
    pub feature_layer_url: String,
    pub output_dir: PathBuf,
    pub timeout: Duration,
    /// Drop repeated rows before sorting.
    pub unique_roads_only: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            feature_layer_url: DEFAULT_FEATURE_LAYER_URL.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            unique_roads_only: true,
        }
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feature_layer_url(mut self, url: impl Into<String>) -> Self {
        let url: String = url.into();
        self.feature_layer_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_unique_roads_only(mut self, unique: bool) -> Self {
        self.unique_roads_only = unique;
        self
    }

    /// Query endpoint for one layer of the feature service.
    pub fn layer_query_url(&self, layer: u32) -> String {
        format!("{}/{}/query", self.feature_layer_url, layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.feature_layer_url, DEFAULT_FEATURE_LAYER_URL);
        assert_eq!(config.output_dir, PathBuf::from("./gis_data"));
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.unique_roads_only);
    }

    #[test]
    fn test_config_builder() {
        let config = ExportConfig::new()
            .with_feature_layer_url("http://localhost:8080/FeatureServer/")
            .with_output_dir("/tmp/out")
            .with_timeout(Duration::from_secs(3))
            .with_unique_roads_only(false);

        assert_eq!(config.feature_layer_url, "http://localhost:8080/FeatureServer");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(!config.unique_roads_only);
    }

    #[test]
    fn test_layer_query_url() {
        let config = ExportConfig::new().with_feature_layer_url("http://host/FS");
        assert_eq!(config.layer_query_url(0), "http://host/FS/0/query");
        assert_eq!(config.layer_query_url(1), "http://host/FS/1/query");
    }
}
