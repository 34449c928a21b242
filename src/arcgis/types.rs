//! FeatureServer query response types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded `query` response. Only the parts the exporter reads are typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    #[serde(default)]
    pub features: Option<Vec<RawFeature>>,
    /// Set when the server truncated the result at its page size.
    #[serde(rename = "exceededTransferLimit", default)]
    pub exceeded_transfer_limit: Option<bool>,
    /// ArcGIS reports some failures as a 200 response carrying this object.
    /// Only used for logging, so any shape is accepted.
    #[serde(default)]
    pub error: Option<Value>,
}

impl FeatureSet {
    /// Features in response order; empty when the key is absent or null.
    pub fn into_features(self) -> Vec<RawFeature> {
        self.features.unwrap_or_default()
    }

    /// The `error` member, read leniently. `None` when absent or null.
    pub fn service_error(&self) -> Option<ServiceErrorBody> {
        self.error
            .as_ref()
            .filter(|error| !error.is_null())
            .map(ServiceErrorBody::from_value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
    pub details: Vec<String>,
}

impl ServiceErrorBody {
    /// Fields of unexpected type are dropped; a bare string is the message.
    pub fn from_value(value: &Value) -> Self {
        let text = |v: &Value| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
        match value {
            Value::Object(obj) => Self {
                code: obj.get("code").and_then(Value::as_i64),
                message: obj.get("message").and_then(Value::as_str).map(str::to_string),
                details: obj
                    .get("details")
                    .and_then(Value::as_array)
                    .map(|details| details.iter().map(text).collect())
                    .unwrap_or_default(),
            },
            other => Self {
                message: Some(text(other)),
                ..Self::default()
            },
        }
    }
}

/// One feature record. The attribute keys depend on the layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub attributes: Option<Value>,
}

impl RawFeature {
    pub fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self {
            attributes: Some(Value::Object(attributes)),
        }
    }

    /// Attribute value by field name. A missing, null or non-object
    /// attribute bag reads as empty.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes
            .as_ref()
            .and_then(Value::as_object)
            .and_then(|attrs| attrs.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_set_without_features_key() {
        let set: FeatureSet = serde_json::from_value(json!({"objectIdFieldName": "OBJECTID"})).unwrap();
        assert!(set.into_features().is_empty());
    }

    #[test]
    fn test_feature_set_with_null_features() {
        let set: FeatureSet = serde_json::from_value(json!({"features": null})).unwrap();
        assert!(set.into_features().is_empty());
    }

    #[test]
    fn test_feature_set_error_body() {
        let set: FeatureSet = serde_json::from_value(json!({
            "error": {"code": 400, "message": "Invalid query", "details": ["bad where"]}
        }))
        .unwrap();
        let error = set.service_error().unwrap();
        assert_eq!(error.code, Some(400));
        assert_eq!(error.message.as_deref(), Some("Invalid query"));
        assert_eq!(error.details, vec!["bad where".to_string()]);
        assert!(set.into_features().is_empty());
    }

    #[test]
    fn test_feature_set_error_body_of_any_shape_decodes() {
        let set: FeatureSet = serde_json::from_str(
            r#"{"error":{"code":400,"message":"x","details":null}}"#,
        )
        .unwrap();
        let error = set.service_error().unwrap();
        assert_eq!(error.code, Some(400));
        assert!(error.details.is_empty());

        let set: FeatureSet = serde_json::from_value(json!({
            "error": {"code": "400", "details": [{"field": "REGION"}, 7]}
        }))
        .unwrap();
        let error = set.service_error().unwrap();
        assert_eq!(error.code, None);
        assert_eq!(error.details, vec![r#"{"field":"REGION"}"#.to_string(), "7".to_string()]);

        let set: FeatureSet = serde_json::from_value(json!({"error": "Token required"})).unwrap();
        assert_eq!(set.service_error().unwrap().message.as_deref(), Some("Token required"));

        let set: FeatureSet = serde_json::from_value(json!({"error": null})).unwrap();
        assert!(set.service_error().is_none());
    }

    #[test]
    fn test_attribute_lookup() {
        let feature: RawFeature = serde_json::from_value(json!({
            "attributes": {"REGION": "NCR", "SEC_LENGTH": null}
        }))
        .unwrap();
        assert_eq!(feature.attribute("REGION"), Some(&json!("NCR")));
        assert_eq!(feature.attribute("SEC_LENGTH"), Some(&Value::Null));
        assert_eq!(feature.attribute("PROVINCE"), None);
    }

    #[test]
    fn test_attribute_lookup_on_missing_or_odd_bag() {
        let missing: RawFeature = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.attribute("REGION"), None);

        let null_bag: RawFeature = serde_json::from_value(json!({"attributes": null})).unwrap();
        assert_eq!(null_bag.attribute("REGION"), None);

        let scalar_bag: RawFeature = serde_json::from_value(json!({"attributes": 3})).unwrap();
        assert_eq!(scalar_bag.attribute("REGION"), None);
    }
}
