//! Run orchestration
//!
//! Stages run strictly in order:
//! SelectRoadClass → SelectRegion → SelectLimit → BuildParams → Query →
//! (Normalize → CheckEmpty → Dedupe → Sort inside the service) → Export.
//! A cancellation at any prompt ends the run as `Outcome::Aborted`; a
//! failure is returned as `Err` and nothing is written.

use std::path::PathBuf;

use tower::{Service, ServiceExt};
use tracing::{debug, info};

use crate::error::{Cancellation, RoadNetError};
use crate::service::{RoadNetworkService, RoadQuery};
use crate::traits::{Console, FeatureSource, TableExporter};
use crate::types::{QueryParameters, RecordLimit, RegionSelector, RoadClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    SelectRoadClass,
    SelectRegion,
    SelectLimit,
    BuildParams,
    Query,
    Export,
}

/// User choices for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub road_class: RoadClass,
    pub region: RegionSelector,
    pub limit: RecordLimit,
}

impl Selection {
    /// Resolve to request parameters, applying the expressway region remap.
    pub fn to_query(&self) -> RoadQuery {
        RoadQuery::new(
            self.road_class,
            QueryParameters::build(self.road_class, self.region, self.limit),
        )
    }

    /// `Will query ...` line shown before the request.
    pub fn summary(&self) -> String {
        match self.region {
            RegionSelector::AllRegions => format!(
                "Will query {} {} roads from all regions",
                self.limit, self.road_class
            ),
            RegionSelector::Region(region) => format!(
                "Will query {} {} roads from {}",
                self.limit,
                self.road_class,
                region.filter_name(self.road_class)
            ),
        }
    }
}

/// How a run ended without a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Exported { path: PathBuf, rows: usize },
    /// The service returned zero features; nothing was written.
    NoFeatures,
    Aborted(Cancellation),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Exported { .. } | Outcome::NoFeatures => 0,
            Outcome::Aborted(cancel) => cancel.exit_code(),
        }
    }
}

pub struct Pipeline<S, C, E> {
    service: RoadNetworkService<S>,
    console: C,
    exporter: E,
}

impl<S, C, E> Pipeline<S, C, E>
where
    S: FeatureSource + 'static,
    C: Console,
    E: TableExporter,
{
    pub fn new(service: RoadNetworkService<S>, console: C, exporter: E) -> Self {
        Self {
            service,
            console,
            exporter,
        }
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    fn enter(&self, stage: Stage) {
        debug!("pipeline stage: {:?}", stage);
    }

    /// Menu prompt; an index outside `options` is reported and asked again.
    async fn choose<T: Copy>(
        &mut self,
        prompt: &str,
        options: &[T],
        label: fn(T) -> &'static str,
    ) -> Result<T, Cancellation> {
        let labels: Vec<&str> = options.iter().map(|o| label(*o)).collect();
        loop {
            let idx = self.console.request_choice(prompt, &labels).await?;
            match options.get(idx) {
                Some(option) => return Ok(*option),
                None => self.console.say(&format!("Invalid choice: {}", idx)),
            }
        }
    }

    /// Road class, region and limit prompts.
    pub async fn select(&mut self) -> Result<Selection, Cancellation> {
        self.enter(Stage::SelectRoadClass);
        let road_class = self
            .choose("Enter type of road to query: ", &RoadClass::ALL, RoadClass::label)
            .await?;

        self.enter(Stage::SelectRegion);
        let region = self
            .choose("Enter region: ", &RegionSelector::options(), RegionSelector::label)
            .await?;

        self.enter(Stage::SelectLimit);
        let limit = loop {
            let value = self
                .console
                .request_bounded_int(
                    "Enter the maximum number of roads (or -1 for no limit): ",
                    Some(1),
                    None,
                    true,
                )
                .await?;
            match RecordLimit::try_from(value) {
                Ok(limit) => break limit,
                Err(e) => self.console.say(&e.to_string()),
            }
        };

        Ok(Selection {
            road_class,
            region,
            limit,
        })
    }

    async fn request_filename(&mut self) -> Result<String, Cancellation> {
        loop {
            let name = self
                .console
                .request_text("\nEnter output filename (without extension): ")
                .await?;
            if !name.is_empty() {
                return Ok(name);
            }
            self.console.say("Filename cannot be empty.");
        }
    }

    /// Run every stage once.
    pub async fn run(&mut self) -> Result<Outcome, RoadNetError> {
        let selection = match self.select().await {
            Ok(selection) => selection,
            Err(cancel) => return Ok(Outcome::Aborted(cancel)),
        };

        self.enter(Stage::BuildParams);
        let query = selection.to_query();
        self.console.say(&selection.summary());
        info!(
            "Query parameters: layer={}, where={}, limit={}",
            selection.road_class.layer_index(),
            query.params.where_clause,
            query.params.limit
        );

        self.enter(Stage::Query);
        self.console.say("\nQuerying ArcGIS...\n");
        let report = self.service.ready().await?.call(query).await?;

        if report.is_empty() {
            self.console.say("\nArcGIS returned no features");
            return Ok(Outcome::NoFeatures);
        }
        let kept = if self.service.unique_roads_only() {
            "unique roads"
        } else {
            "rows kept, duplicates included"
        };
        self.console.say(&format!(
            "\nFound {} segments ({} {})",
            report.feature_count,
            report.table.len(),
            kept
        ));

        self.enter(Stage::Export);
        let filename = match self.request_filename().await {
            Ok(name) => name,
            Err(cancel) => return Ok(Outcome::Aborted(cancel)),
        };
        let path = self.exporter.export(&report.table, &filename)?;
        self.console.say(&format!(
            "\nSaved {} entries to {}",
            report.table.len(),
            path.display()
        ));

        Ok(Outcome::Exported {
            path,
            rows: report.table.len(),
        })
    }
}
