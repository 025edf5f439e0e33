//! Console text printed by the receiver.

use std::fmt;

use chrono::{DateTime, Local};
use serde_json::Value;

use crate::alert::{AlertNotification, DEVICE_ID_PLACEHOLDER};
use crate::config::ReceiverConfig;
use crate::payload::{Payload, PayloadError};

const SEPARATOR_WIDTH: usize = 80;

pub fn banner(config: &ReceiverConfig) -> String {
    format!(
        "🚀 Webhook receiver started on port {}\n📡 Webhook URL: {}\n⏳ Waiting for alert notifications...\n\n",
        config.port,
        config.webhook_url()
    )
}

pub const FAREWELL: &str = "\n\n👋 Webhook receiver stopped";

/// The block printed for one received webhook.
pub struct Report<'a> {
    outcome: &'a Result<Payload, PayloadError>,
    raw: &'a [u8],
    received_at: DateTime<Local>,
}

impl<'a> Report<'a> {
    pub fn new(
        outcome: &'a Result<Payload, PayloadError>,
        raw: &'a [u8],
        received_at: DateTime<Local>,
    ) -> Self {
        Self {
            outcome,
            raw,
            received_at,
        }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "=".repeat(SEPARATOR_WIDTH);

        writeln!(f)?;
        writeln!(f, "{separator}")?;
        writeln!(
            f,
            "✅ Webhook notification received at {}",
            self.received_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f, "{separator}")?;

        match self.outcome {
            Ok(Payload::Single(alert)) => write_alert(f, alert)?,
            Ok(Payload::Batch(batch)) => {
                let total = batch.alerts.len();
                write!(f, "\n📦 Batch notification: {total} alerts")?;
                match batch.declared_count {
                    Some(count) if count != total as u64 => {
                        writeln!(f, " (declared count: {count})")?
                    }
                    _ => writeln!(f)?,
                }
                for (index, alert) in batch.alerts.iter().enumerate() {
                    write!(f, "\n--- Alert {}/{} ---", index + 1, total)?;
                    write_alert(f, alert)?;
                }
            }
            Err(e) => {
                writeln!(f, "Parse error: {e}")?;
                writeln!(f, "Raw data: {}", String::from_utf8_lossy(self.raw))?;
            }
        }

        writeln!(f, "\n{separator}")?;
        writeln!(f)
    }
}

fn write_alert(f: &mut fmt::Formatter<'_>, alert: &AlertNotification) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "Alert ID: {}", display_value(alert.alert_id()))?;
    writeln!(f, "Title: {}", display_value(alert.title()))?;
    writeln!(f, "Message: {}", display_value(alert.message()))?;
    writeln!(f, "Severity: {}", display_value(alert.severity()))?;
    writeln!(f, "Alert Type: {}", display_value(alert.alert_type()))?;
    let device_id = alert
        .device_id()
        .map_or_else(|| DEVICE_ID_PLACEHOLDER.to_string(), |v| display_value(Some(v)));
    writeln!(f, "Device ID: {device_id}")?;
    writeln!(f, "Created At: {}", display_value(alert.created_at()))?;
    match alert.timestamp_utc() {
        Some(utc) => writeln!(
            f,
            "Timestamp: {} ({})",
            display_value(alert.timestamp()),
            utc.format("%Y-%m-%d %H:%M:%S UTC")
        )?,
        None => writeln!(f, "Timestamp: {}", display_value(alert.timestamp()))?,
    }

    if let Some(metadata) = alert.metadata() {
        writeln!(f, "\nMetadata:")?;
        for (key, value) in metadata {
            writeln!(f, "  {}: {}", key, display_value(Some(value)))?;
        }
    }

    Ok(())
}

/// Strings print bare, absent or null values print `None`, anything else as
/// compact JSON.
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "None".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::decode;
    use chrono::TimeZone;
    use serde_json::json;

    fn received_at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
    }

    fn render(body: &[u8]) -> String {
        let outcome = decode(body);
        Report::new(&outcome, body, received_at()).to_string()
    }

    #[test]
    fn test_banner_default_port() {
        let banner = banner(&ReceiverConfig::default());

        assert!(banner.contains("port 8888"));
        assert!(banner.contains("http://localhost:8888/webhook"));
    }

    #[test]
    fn test_banner_custom_port() {
        let banner = banner(&ReceiverConfig::with_port(9001));

        assert!(banner.contains("port 9001"));
        assert!(banner.contains("http://localhost:9001/webhook"));
    }

    #[test]
    fn test_report_full_alert() {
        let output = render(
            br#"{
                "alert_id": "a-1",
                "title": "CPU high",
                "message": "cpu at 97%",
                "severity": "critical",
                "alert_type": "threshold",
                "device_id": "edge-07",
                "created_at": "2024-05-01T09:59:58Z",
                "timestamp": "2024-05-01T10:00:00Z"
            }"#,
        );

        let separator = "=".repeat(80);
        assert!(output.starts_with(&format!("\n{separator}\n✅ Webhook notification received at 2024-05-01 10:00:00\n{separator}\n")));
        assert!(output.contains(
            "\nAlert ID: a-1\nTitle: CPU high\nMessage: cpu at 97%\nSeverity: critical\n\
             Alert Type: threshold\nDevice ID: edge-07\nCreated At: 2024-05-01T09:59:58Z\n\
             Timestamp: 2024-05-01T10:00:00Z\n"
        ));
        assert!(output.ends_with(&format!("\n{separator}\n\n")));
        assert!(!output.contains("Metadata:"));
    }

    #[test]
    fn test_report_missing_fields_use_placeholders() {
        let output = render(br#"{"title": "only a title"}"#);

        assert!(output.contains("Alert ID: None\n"));
        assert!(output.contains("Title: only a title\n"));
        assert!(output.contains("Device ID: N/A\n"));
        assert!(output.contains("Timestamp: None\n"));
    }

    #[test]
    fn test_report_null_device_id_is_not_placeholder() {
        let output = render(br#"{"device_id": null}"#);
        assert!(output.contains("Device ID: None\n"));
    }

    #[test]
    fn test_report_metadata_section() {
        let output = render(br#"{"alert_id": "a-1", "metadata": {"zone": "us-east", "cpu": 97.5, "tags": ["edge"]}}"#);

        assert!(output.contains("\nMetadata:\n  zone: us-east\n  cpu: 97.5\n  tags: [\"edge\"]\n"));
    }

    #[test]
    fn test_report_metadata_suppressed_when_empty_or_absent() {
        assert!(!render(br#"{"alert_id": "a-1", "metadata": {}}"#).contains("Metadata"));
        assert!(!render(br#"{"alert_id": "a-1"}"#).contains("Metadata"));
    }

    #[test]
    fn test_report_numeric_timestamp() {
        let output = render(br#"{"timestamp": 1700000000}"#);
        assert!(output.contains("Timestamp: 1700000000 (2023-11-14 22:13:20 UTC)\n"));
    }

    #[test]
    fn test_report_parse_error_includes_raw_body() {
        let output = render(b"not json");

        assert!(output.contains("Parse error: invalid JSON"));
        assert!(output.contains("Raw data: not json\n"));
        assert!(!output.contains("Alert ID:"));
    }

    #[test]
    fn test_report_batch() {
        let output = render(br#"{"alerts": [{"alert_id": "a-1"}, {"alert_id": "a-2"}], "count": 3}"#);

        assert!(output.contains("📦 Batch notification: 2 alerts (declared count: 3)\n"));
        let first = output.find("--- Alert 1/2 ---\nAlert ID: a-1").unwrap();
        let second = output.find("--- Alert 2/2 ---\nAlert ID: a-2").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(None), "None");
        assert_eq!(display_value(Some(&Value::Null)), "None");
        assert_eq!(display_value(Some(&json!("text"))), "text");
        assert_eq!(display_value(Some(&json!(42))), "42");
        assert_eq!(display_value(Some(&json!(true))), "true");
        assert_eq!(display_value(Some(&json!({"a": 1}))), r#"{"a":1}"#);
    }
}
