use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::alert::AlertNotification;

/// Why a request body could not be shown as alert fields.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Several alerts delivered in one POST.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertBatch {
    pub alerts: Vec<AlertNotification>,
    /// The sender's own `count`, if it sent one.
    pub declared_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Single(AlertNotification),
    Batch(AlertBatch),
}

#[derive(Deserialize)]
struct BatchEnvelope {
    alerts: Vec<Map<String, Value>>,
    #[serde(default)]
    count: Option<u64>,
}

/// Decodes a webhook body. Any JSON object is accepted.
pub fn decode(body: &[u8]) -> Result<Payload, PayloadError> {
    let text = std::str::from_utf8(body)?;
    let fields = match serde_json::from_str::<Value>(text)? {
        Value::Object(fields) => fields,
        other => return Err(PayloadError::NotAnObject(kind_of(&other))),
    };

    if fields.contains_key("alerts") && !fields.contains_key("alert_id") {
        match serde_json::from_value::<BatchEnvelope>(Value::Object(fields.clone())) {
            Ok(envelope) => {
                return Ok(Payload::Batch(AlertBatch {
                    alerts: envelope.alerts.into_iter().map(AlertNotification::new).collect(),
                    declared_count: envelope.count,
                }));
            }
            Err(e) => debug!("Not a batch payload, showing as a single alert: {}", e),
        }
    }

    Ok(Payload::Single(AlertNotification::new(fields)))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
