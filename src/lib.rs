//! DPWH road network exporter
//!
//! - Queries the DPWH RoadNetwork_RoadClassification FeatureServer for
//!   expressways (layer 0) or national roads (layer 1)
//! - Flattens feature attributes into fixed-shape rows, drops duplicates,
//!   sorts them and writes the table as CSV
//!
//! # Usage
//!
//! ```rust,ignore
//! use roadnet_export::{
//!     ArcGisClient, CsvExporter, ExportConfig, Pipeline, RoadNetworkService, TerminalConsole,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = ExportConfig::default();
//!     let client = ArcGisClient::new(config.clone()).unwrap();
//!     let service = RoadNetworkService::new(client)
//!         .with_unique_roads_only(config.unique_roads_only);
//!
//!     let mut pipeline = Pipeline::new(
//!         service,
//!         TerminalConsole::new(),
//!         CsvExporter::new(&config.output_dir),
//!     );
//!     let outcome = pipeline.run().await.unwrap();
//!     std::process::exit(outcome.exit_code());
//! }
//! ```
//!
//! # Service only
//!
//! ```rust,ignore
//! use roadnet_export::{ArcGisClient, ExportConfig, RoadNetworkService, RoadQuery};
//! use roadnet_export::types::{QueryParameters, RecordLimit, Region, RegionSelector, RoadClass};
//! use tower::ServiceExt;
//!
//! let client = ArcGisClient::new(ExportConfig::default())?;
//! let params = QueryParameters::build(
//!     RoadClass::Expressway,
//!     RegionSelector::Region(Region::RegionVII),
//!     RecordLimit::Unlimited,
//! );
//! let report = RoadNetworkService::new(client)
//!     .oneshot(RoadQuery::new(RoadClass::Expressway, params))
//!     .await?;
//! println!("{} rows", report.table.len());
//! ```

pub mod arcgis;
pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod service;
pub mod table;
pub mod traits;
pub mod types;

// main types
pub use arcgis::{ArcGisClient, RawFeature};
pub use config::ExportConfig;
pub use console::TerminalConsole;
pub use error::{Cancellation, RoadNetError};
pub use export::CsvExporter;
pub use pipeline::{Outcome, Pipeline, Selection};
pub use service::{QueryReport, RoadNetworkService, RoadQuery};
pub use table::{FieldValue, RoadRow, RoadTable};
pub use traits::{Console, FeatureSource, TableExporter};
pub use types::{QueryParameters, RecordLimit, Region, RegionSelector, RoadClass};
