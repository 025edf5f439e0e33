use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Shown in place of a `device_id` the sender left out.
pub const DEVICE_ID_PLACEHOLDER: &str = "N/A";

// 超过这个值的数字时间戳按毫秒处理
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// One alert notification as posted by the alert service.
///
/// The decoded object is kept as-is and never checked against a schema.
/// Accessors return `None` for missing keys instead of failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertNotification {
    fields: Map<String, Value>,
}

impl AlertNotification {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn alert_id(&self) -> Option<&Value> {
        self.get("alert_id")
    }

    pub fn title(&self) -> Option<&Value> {
        self.get("title")
    }

    pub fn message(&self) -> Option<&Value> {
        self.get("message")
    }

    pub fn severity(&self) -> Option<&Value> {
        self.get("severity")
    }

    pub fn alert_type(&self) -> Option<&Value> {
        self.get("alert_type")
    }

    pub fn device_id(&self) -> Option<&Value> {
        self.get("device_id")
    }

    pub fn created_at(&self) -> Option<&Value> {
        self.get("created_at")
    }

    pub fn timestamp(&self) -> Option<&Value> {
        self.get("timestamp")
    }

    /// Metadata entries, only when `metadata` is a non-empty object.
    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        match self.get("metadata") {
            Some(Value::Object(metadata)) if !metadata.is_empty() => Some(metadata),
            _ => None,
        }
    }

    /// UTC time of a numeric `timestamp`. String timestamps are left alone.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        let Some(Value::Number(number)) = self.timestamp() else {
            return None;
        };
        let raw = number
            .as_i64()
            .or_else(|| number.as_f64().map(|secs| secs as i64))?;

        if raw.abs() >= MILLIS_THRESHOLD {
            DateTime::from_timestamp_millis(raw)
        } else {
            DateTime::from_timestamp(raw, 0)
        }
    }
}
