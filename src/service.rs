use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::BoxFuture;
use tower::Service;
use tracing::{debug, info};

use crate::error::RoadNetError;
use crate::table::{dedupe, normalize, sort_rows, RoadTable};
use crate::traits::FeatureSource;
use crate::types::{QueryParameters, RoadClass};

/// One road-class query, already resolved to request parameters.
#[derive(Debug, Clone)]
pub struct RoadQuery {
    pub road_class: RoadClass,
    pub params: QueryParameters,
}

impl RoadQuery {
    pub fn new(road_class: RoadClass, params: QueryParameters) -> Self {
        Self { road_class, params }
    }

    /// Layers queried for this road class, in merge order.
    pub fn layers(&self) -> Vec<u32> {
        vec![self.road_class.layer_index()]
    }
}

/// Result of a query: how many features came back and the finished table.
#[derive(Debug, Clone)]
pub struct QueryReport {
    pub feature_count: usize,
    pub table: RoadTable,
}

impl QueryReport {
    pub fn is_empty(&self) -> bool {
        self.feature_count == 0
    }
}

/// tower::Service running query, normalize, dedupe and sort for one
/// `RoadQuery`.
#[derive(Debug)]
pub struct RoadNetworkService<S> {
    source: Arc<S>,
    unique_roads_only: bool,
}

impl<S> Clone for RoadNetworkService<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            unique_roads_only: self.unique_roads_only,
        }
    }
}

impl<S: FeatureSource + 'static> RoadNetworkService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            unique_roads_only: true,
        }
    }

    pub fn with_unique_roads_only(mut self, unique: bool) -> Self {
        self.unique_roads_only = unique;
        self
    }

    pub fn unique_roads_only(&self) -> bool {
        self.unique_roads_only
    }
}

impl<S: FeatureSource + 'static> Service<RoadQuery> for RoadNetworkService<S> {
    type Response = QueryReport;
    type Error = RoadNetError;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: RoadQuery) -> Self::Future {
        info!(
            "Road query received: class={}, where={}, limit={}",
            req.road_class, req.params.where_clause, req.params.limit
        );
        let source = Arc::clone(&self.source);
        let unique_roads_only = self.unique_roads_only;

        Box::pin(async move {
            let mut features = Vec::new();
            for layer in req.layers() {
                features.extend(source.query(layer, &req.params).await?);
            }

            let feature_count = features.len();
            if feature_count == 0 {
                debug!("No features returned; skipping table build");
                return Ok(QueryReport {
                    feature_count,
                    table: RoadTable::new(req.road_class, Vec::new()),
                });
            }

            let rows = normalize(&features, req.road_class);
            debug!("Normalized {} rows", rows.len());

            let rows = if unique_roads_only { dedupe(rows) } else { rows };
            let rows = sort_rows(rows);
            info!(
                "Built table: {} segments, {} rows",
                feature_count,
                rows.len()
            );

            Ok(QueryReport {
                feature_count,
                table: RoadTable::new(req.road_class, rows),
            })
        })
    }
}
