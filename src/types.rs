//! Query selection types: road class, region, record limit and the
//! resulting FeatureServer query parameters.

use std::fmt;
use std::num::NonZeroU64;

use crate::error::RoadNetError;

/// Road class selected for one run. Fixes the layer, the attribute schema
/// and the row shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadClass {
    Expressway,
    NationalRoad,
}

impl RoadClass {
    pub const ALL: [RoadClass; 2] = [RoadClass::Expressway, RoadClass::NationalRoad];

    pub fn label(self) -> &'static str {
        match self {
            RoadClass::Expressway => "Expressway",
            RoadClass::NationalRoad => "National Roads",
        }
    }

    /// FeatureServer layer holding this road class.
    pub fn layer_index(self) -> u32 {
        match self {
            RoadClass::Expressway => 0,
            RoadClass::NationalRoad => 1,
        }
    }

    pub fn is_expressway(self) -> bool {
        matches!(self, RoadClass::Expressway)
    }

    /// Output column names, one per row field.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            RoadClass::Expressway => &[
                "region",
                "road_class",
                "xpres_way",
                "xpres_name",
                "road_length",
            ],
            RoadClass::NationalRoad => &[
                "region",
                "province",
                "deo",
                "cong_district",
                "road_class",
                "road_name",
                "road_length",
            ],
        }
    }
}

impl fmt::Display for RoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Administrative regions known to the road network service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    NationalCapitalRegion,
    CordilleraAdministrativeRegion,
    RegionI,
    RegionII,
    RegionIII,
    RegionIVA,
    RegionIVB,
    RegionV,
    RegionVI,
    NegrosIslandRegion,
    RegionVII,
    RegionVIII,
    RegionIX,
    RegionX,
    RegionXI,
    RegionXII,
    RegionXIII,
}

impl Region {
    pub const ALL: [Region; 17] = [
        Region::NationalCapitalRegion,
        Region::CordilleraAdministrativeRegion,
        Region::RegionI,
        Region::RegionII,
        Region::RegionIII,
        Region::RegionIVA,
        Region::RegionIVB,
        Region::RegionV,
        Region::RegionVI,
        Region::NegrosIslandRegion,
        Region::RegionVII,
        Region::RegionVIII,
        Region::RegionIX,
        Region::RegionX,
        Region::RegionXI,
        Region::RegionXII,
        Region::RegionXIII,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Region::NationalCapitalRegion => "National Capital Region",
            Region::CordilleraAdministrativeRegion => "Cordillera Administrative Region",
            Region::RegionI => "Region I",
            Region::RegionII => "Region II",
            Region::RegionIII => "Region III",
            Region::RegionIVA => "Region IV-A",
            Region::RegionIVB => "Region IV-B",
            Region::RegionV => "Region V",
            Region::RegionVI => "Region VI",
            Region::NegrosIslandRegion => "Negros Island Region",
            Region::RegionVII => "Region VII",
            Region::RegionVIII => "Region VIII",
            Region::RegionIX => "Region IX",
            Region::RegionX => "Region X",
            Region::RegionXI => "Region XI",
            Region::RegionXII => "Region XII",
            Region::RegionXIII => "Region XIII",
        }
    }

    /// Name as stored in the expressway layer's REGION field. A few regions
    /// use abbreviations there.
    pub fn expressway_name(self) -> &'static str {
        match self {
            Region::NationalCapitalRegion => "NCR",
            Region::CordilleraAdministrativeRegion => "CAR",
            Region::NegrosIslandRegion => "NIR",
            Region::RegionVII => "RVII",
            other => other.name(),
        }
    }

    /// Name used in the REGION filter for the given road class.
    pub fn filter_name(self, road_class: RoadClass) -> &'static str {
        match road_class {
            RoadClass::Expressway => self.expressway_name(),
            RoadClass::NationalRoad => self.name(),
        }
    }
}

/// Region filter: every region or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionSelector {
    AllRegions,
    Region(Region),
}

impl RegionSelector {
    pub const ALL_REGIONS_LABEL: &'static str = "All Regions";

    /// Menu order: the sentinel first, then every region.
    pub fn options() -> Vec<RegionSelector> {
        std::iter::once(RegionSelector::AllRegions)
            .chain(Region::ALL.iter().copied().map(RegionSelector::Region))
            .collect()
    }

    pub fn label(self) -> &'static str {
        match self {
            RegionSelector::AllRegions => Self::ALL_REGIONS_LABEL,
            RegionSelector::Region(region) => region.name(),
        }
    }
}

/// Cap on the number of records requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLimit {
    Unlimited,
    AtMost(NonZeroU64),
}

impl RecordLimit {
    /// Value entered at the prompt to request every record.
    pub const UNLIMITED_SENTINEL: i64 = -1;

    pub fn as_count(self) -> Option<u64> {
        match self {
            RecordLimit::Unlimited => None,
            RecordLimit::AtMost(n) => Some(n.get()),
        }
    }
}

impl TryFrom<i64> for RecordLimit {
    type Error = RoadNetError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value == Self::UNLIMITED_SENTINEL {
            return Ok(RecordLimit::Unlimited);
        }
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .map(RecordLimit::AtMost)
            .ok_or_else(|| {
                RoadNetError::InvalidInput(format!(
                    "record limit must be -1 or a positive integer, got {}",
                    value
                ))
            })
    }
}

impl fmt::Display for RecordLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordLimit::Unlimited => f.write_str("all"),
            RecordLimit::AtMost(n) => write!(f, "{}", n),
        }
    }
}

/// Parameters of one FeatureServer `query` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    pub where_clause: String,
    pub limit: RecordLimit,
}

impl QueryParameters {
    pub const MATCH_ALL: &'static str = "1=1";

    pub fn build(road_class: RoadClass, region: RegionSelector, limit: RecordLimit) -> Self {
        let where_clause = match region {
            RegionSelector::AllRegions => Self::MATCH_ALL.to_string(),
            RegionSelector::Region(region) => {
                let name = region.filter_name(road_class).replace('\'', "''");
                format!("REGION='{}'", name)
            }
        };
        Self {
            where_clause,
            limit,
        }
    }

    /// Query string pairs. `resultRecordCount` is only present for a
    /// bounded limit.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("where", self.where_clause.clone()),
            ("outFields", "*".to_string()),
            ("returnGeometry", "false".to_string()),
            ("f", "json".to_string()),
        ];
        if let Some(count) = self.limit.as_count() {
            pairs.push(("resultRecordCount", count.to_string()));
        }
        pairs
    }
}
