//! Metric records - the flat output of a conversion pass.

use std::collections::BTreeMap;
use std::fmt;

/// Field key holding the normalized severity code.
pub const ACTUAL_VALUE_FIELD: &str = "ActualValue";
/// Field key holding a textual value.
pub const STRING_FIELD: &str = "string";
/// Field key holding a numeric value.
pub const FLOAT_FIELD: &str = "float";

/// A typed field value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    String(String),
}

impl FieldValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::String(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::String(v.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::String(v) => f.write_str(v),
        }
    }
}

/// One time-series point.
///
/// Records are built once with [`MetricRecord::builder`] and not changed
/// afterwards. Tags and fields are sorted maps so the same input always
/// serializes the same way.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricRecord {
    pub measurement: String,
    pub tags: BTreeMap<String, String>,
    pub fields: BTreeMap<String, FieldValue>,

    /// Nanoseconds since the Unix epoch. `None` lets the consumer assign
    /// ingestion time.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub timestamp: Option<i64>,
}

impl MetricRecord {
    pub fn builder(measurement: impl Into<String>) -> MetricRecordBuilder {
        MetricRecordBuilder::new(measurement)
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }
}

/// Builder for [`MetricRecord`].
#[derive(Debug)]
pub struct MetricRecordBuilder {
    measurement: String,
    tags: BTreeMap<String, String>,
    fields: BTreeMap<String, FieldValue>,
    timestamp: Option<i64>,
}

impl MetricRecordBuilder {
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            timestamp: None,
        }
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Whether a field with this key has been set so far.
    pub fn has_field(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn timestamp(mut self, nanos: i64) -> Self {
        self.timestamp = Some(nanos);
        self
    }

    pub fn build(self) -> MetricRecord {
        MetricRecord {
            measurement: self.measurement,
            tags: self.tags,
            fields: self.fields,
            timestamp: self.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let record = MetricRecord::builder("sapmon")
            .tag("ccms", "msg_server")
            .field(ACTUAL_VALUE_FIELD, 0i64)
            .field(STRING_FIELD, "Running")
            .field(FLOAT_FIELD, 3661.0)
            .build();

        assert_eq!(record.measurement, "sapmon");
        assert_eq!(record.tag("ccms"), Some("msg_server"));
        assert_eq!(record.field(ACTUAL_VALUE_FIELD), Some(&FieldValue::Int(0)));
        assert_eq!(
            record.field(STRING_FIELD).and_then(FieldValue::as_str),
            Some("Running")
        );
        assert_eq!(
            record.field(FLOAT_FIELD).and_then(FieldValue::as_float),
            Some(3661.0)
        );
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn test_fields_sorted() {
        let record = MetricRecord::builder("m")
            .field(STRING_FIELD, "x")
            .field(FLOAT_FIELD, 1.0)
            .field(ACTUAL_VALUE_FIELD, 2i64)
            .build();

        let keys: Vec<_> = record.fields.keys().map(String::as_str).collect();
        assert_eq!(keys, [ACTUAL_VALUE_FIELD, FLOAT_FIELD, STRING_FIELD]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_untagged_fields() {
        let record = MetricRecord::builder("sapmon")
            .tag("ccms", "Host CPU in %")
            .field(ACTUAL_VALUE_FIELD, 1i64)
            .field(FLOAT_FIELD, 95.5)
            .timestamp(1_700_000_000_000_000_000)
            .build();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fields"]["ActualValue"], 1);
        assert_eq!(json["fields"]["float"], 95.5);
        assert_eq!(json["timestamp"], 1_700_000_000_000_000_000i64);
    }
}
