//! Types that mirror the discovery agent's JSON output.
//!
//! Every field is optional. A field of the wrong JSON type reads as absent, and a record
//! that cannot be read at all is skipped, so one bad service never blanks the dashboard.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub const UNKNOWN_MODEL: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Summary {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub total_requests: u64,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub total_prompt_tokens: u64,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub total_completion_tokens: u64,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub avg_tokens_per_sec: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    // seconds
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub latency: f64,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub completion_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_tokens: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub tokens_per_sec: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMetrics {
    // presence alone means the health endpoint answered
    #[serde(default)]
    pub health_model: Option<Value>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub busy: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub summary: Option<Summary>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub requests: Vec<RequestRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawServiceRecord {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub port: u16,
    #[serde(rename = "type", default, deserialize_with = "lenient_or_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub metrics: Option<RawMetrics>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub services: Vec<RawServiceRecord>,
}

/// Parse the raw discovery output. Malformed or absent input yields no services.
pub fn parse_snapshot(raw: &str) -> Snapshot {
    let root: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            if !raw.trim().is_empty() {
                tracing::debug!(error = %e, "discovery output is not JSON");
            }
            return Snapshot::default();
        }
    };
    let Some(Value::Array(items)) = root.get("services") else {
        return Snapshot::default();
    };
    let services = items
        .iter()
        .enumerate()
        .filter_map(|(i, v)| match RawServiceRecord::deserialize(v) {
            Ok(rec) => Some(rec),
            Err(e) => {
                tracing::warn!(index = i, error = %e, "skipping unreadable service record");
                None
            }
        })
        .collect();
    Snapshot { services }
}

fn lenient<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Option::<Value>::deserialize(d)?;
    Ok(v.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_or_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(d)?.unwrap_or_default())
}

// Unreadable entries are dropped individually; order of the rest is kept.
fn lenient_records<'de, D>(d: D) -> Result<Vec<RequestRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(d)?;
    let Some(Value::Array(items)) = v else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
