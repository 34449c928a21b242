//! Row value types

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde_json::Value;

use crate::types::RoadClass;

/// Scalar cell value. `Null` stands for a missing or null attribute.
///
/// Equality is by value, so a row can be used as a set key: `Integer(812)`
/// and `Number(812.0)` are the same cell. Ordering puts `Null` before
/// everything else, then booleans, numbers and text.
#[derive(Debug, Clone)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Integer(_) | FieldValue::Number(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }
}

// -0.0 and 0.0 are the same value; every NaN is the same value.
fn canonical(n: f64) -> f64 {
    if n == 0.0 {
        0.0
    } else if n.is_nan() {
        f64::NAN
    } else {
        n
    }
}

const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

// Exact comparison of an integer against a float. Canonical NaN sorts above
// every integer, matching `total_cmp` between floats.
fn cmp_integer_number(a: i64, b: f64) -> Ordering {
    let b = canonical(b);
    if b.is_nan() || b >= TWO_POW_63 {
        return Ordering::Less;
    }
    if b < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = b.trunc();
    a.cmp(&(whole as i64)).then_with(|| 0.0_f64.total_cmp(&(b - whole)))
}

// Integral floats that fit in i64 hash as that integer.
fn integral(n: f64) -> Option<i64> {
    let n = canonical(n);
    if n.fract() == 0.0 && (-TWO_POW_63..TWO_POW_63).contains(&n) {
        Some(n as i64)
    } else {
        None
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl Hash for FieldValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            FieldValue::Null => {}
            FieldValue::Bool(b) => b.hash(state),
            FieldValue::Integer(i) => i.hash(state),
            FieldValue::Number(n) => match integral(*n) {
                Some(i) => i.hash(state),
                None => canonical(*n).to_bits().hash(state),
            },
            FieldValue::Text(s) => s.hash(state),
        }
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Number(a), Number(b)) => canonical(*a).total_cmp(&canonical(*b)),
            (Integer(a), Number(b)) => cmp_integer_number(*a, *b),
            (Number(a), Integer(b)) => cmp_integer_number(*b, *a).reverse(),
            (Text(a), Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl From<&Value> for FieldValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n.as_f64().map(FieldValue::Number).unwrap_or(FieldValue::Null),
            },
            Value::String(s) => FieldValue::Text(s.clone()),
            // Not expected in these layers; kept as its JSON text.
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl From<Option<&Value>> for FieldValue {
    fn from(value: Option<&Value>) -> Self {
        value.map(FieldValue::from).unwrap_or(FieldValue::Null)
    }
}

/// Cell text for CSV output; `Null` is an empty cell.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Number(n) => write!(f, "{:?}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Expressway layer row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpresswayRow {
    pub region: FieldValue,
    pub road_class: FieldValue,
    pub expressway_code: FieldValue,
    pub expressway_name: FieldValue,
    pub length: FieldValue,
}

impl ExpresswayRow {
    pub const ARITY: usize = 5;

    pub fn fields(&self) -> [&FieldValue; Self::ARITY] {
        [
            &self.region,
            &self.road_class,
            &self.expressway_code,
            &self.expressway_name,
            &self.length,
        ]
    }

    /// Everything but `length`.
    pub fn sort_key(&self) -> (&FieldValue, &FieldValue, &FieldValue, &FieldValue) {
        (
            &self.region,
            &self.road_class,
            &self.expressway_code,
            &self.expressway_name,
        )
    }
}

/// National road layer row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NationalRoadRow {
    pub region: FieldValue,
    pub province: FieldValue,
    pub district_engineering_office: FieldValue,
    pub congressional_district: FieldValue,
    pub road_class: FieldValue,
    pub road_name: FieldValue,
    pub length: FieldValue,
}

impl NationalRoadRow {
    pub const ARITY: usize = 7;

    pub fn fields(&self) -> [&FieldValue; Self::ARITY] {
        [
            &self.region,
            &self.province,
            &self.district_engineering_office,
            &self.congressional_district,
            &self.road_class,
            &self.road_name,
            &self.length,
        ]
    }

    /// Everything but `length`.
    #[allow(clippy::type_complexity)]
    pub fn sort_key(
        &self,
    ) -> (
        &FieldValue,
        &FieldValue,
        &FieldValue,
        &FieldValue,
        &FieldValue,
        &FieldValue,
    ) {
        (
            &self.region,
            &self.province,
            &self.district_engineering_office,
            &self.congressional_district,
            &self.road_class,
            &self.road_name,
        )
    }
}

/// A normalized row. One run only ever produces one of the two shapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoadRow {
    Expressway(ExpresswayRow),
    NationalRoad(NationalRoadRow),
}

impl RoadRow {
    pub fn road_class(&self) -> RoadClass {
        match self {
            RoadRow::Expressway(_) => RoadClass::Expressway,
            RoadRow::NationalRoad(_) => RoadClass::NationalRoad,
        }
    }

    pub fn fields(&self) -> Vec<&FieldValue> {
        match self {
            RoadRow::Expressway(row) => row.fields().to_vec(),
            RoadRow::NationalRoad(row) => row.fields().to_vec(),
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            RoadRow::Expressway(_) => ExpresswayRow::ARITY,
            RoadRow::NationalRoad(_) => NationalRoadRow::ARITY,
        }
    }

    /// Compares the road-class sort keys. Rows of different shapes order
    /// expressways first.
    pub fn cmp_key(&self, other: &Self) -> Ordering {
        match (self, other) {
            (RoadRow::Expressway(a), RoadRow::Expressway(b)) => a.sort_key().cmp(&b.sort_key()),
            (RoadRow::NationalRoad(a), RoadRow::NationalRoad(b)) => {
                a.sort_key().cmp(&b.sort_key())
            }
            (RoadRow::Expressway(_), RoadRow::NationalRoad(_)) => Ordering::Less,
            (RoadRow::NationalRoad(_), RoadRow::Expressway(_)) => Ordering::Greater,
        }
    }

    /// Cells as output text, in column order.
    pub fn to_record(&self) -> Vec<String> {
        self.fields().iter().map(|v| v.to_string()).collect()
    }
}

/// Final, ordered set of rows plus its columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoadTable {
    road_class: RoadClass,
    rows: Vec<RoadRow>,
}

impl RoadTable {
    pub fn new(road_class: RoadClass, rows: Vec<RoadRow>) -> Self {
        debug_assert!(rows.iter().all(|row| row.road_class() == road_class));
        Self { road_class, rows }
    }

    pub fn road_class(&self) -> RoadClass {
        self.road_class
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.road_class.columns()
    }

    pub fn rows(&self) -> &[RoadRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
