use crate::arcgis::RawFeature;
use crate::types::RoadClass;

use super::row::{ExpresswayRow, FieldValue, NationalRoadRow, RoadRow};

/// Map raw features to rows of the shape for `road_class`, in input order.
/// Missing attributes become `FieldValue::Null`.
pub fn normalize(features: &[RawFeature], road_class: RoadClass) -> Vec<RoadRow> {
    features
        .iter()
        .map(|feature| normalize_feature(feature, road_class))
        .collect()
}

pub fn normalize_feature(feature: &RawFeature, road_class: RoadClass) -> RoadRow {
    let field = |key: &str| FieldValue::from(feature.attribute(key));

    match road_class {
        RoadClass::Expressway => RoadRow::Expressway(ExpresswayRow {
            region: field("REGION"),
            road_class: field("ROAD_CLASS"),
            expressway_code: field("XPRES_WAY"),
            expressway_name: field("XPRES_NAME"),
            length: field("Shape__Length"),
        }),
        RoadClass::NationalRoad => RoadRow::NationalRoad(NationalRoadRow {
            region: field("REGION"),
            province: field("PROVINCE"),
            district_engineering_office: field("DEO"),
            congressional_district: field("CONG_DIST"),
            road_class: field("ROAD_SEC_CLASS"),
            road_name: field("ROAD_NAME"),
            length: field("SEC_LENGTH"),
        }),
    }
}
