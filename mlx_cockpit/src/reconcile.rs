//! Turn raw per-service telemetry into the display model the renderer consumes.

use crate::snapshot::{RawMetrics, RawServiceRecord, Summary, UNKNOWN_MODEL};
use crate::theme::{Rgba, ThemePreset};

/// Port used for the dashboard link before any service has been seen.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Online,
    Busy,
    Offline,
}

impl ServiceStatus {
    pub fn is_alive(self) -> bool {
        matches!(self, Self::Online | Self::Busy)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDisplayModel {
    pub port: u16,
    pub kind: String,
    pub color: Rgba,
    pub status: ServiceStatus,
    pub model_name: String,
    // tokens per second
    pub throughput: f64,
    pub latency_seconds: f64,
    pub summary: Option<Summary>,
}

fn last_segment(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or(s)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

pub fn reconcile_one(rec: &RawServiceRecord, color: Rgba) -> ServiceDisplayModel {
    let absent = RawMetrics::default();
    let metrics = rec.metrics.as_ref().unwrap_or(&absent);
    let summary = metrics.summary.clone();
    let online = summary.is_some() || metrics.health_model.is_some();
    let status = if online {
        ServiceStatus::Online
    } else if metrics.busy {
        ServiceStatus::Busy
    } else {
        ServiceStatus::Offline
    };

    let latest = metrics.requests.last();
    let model_name = latest
        .and_then(|r| non_empty(r.model.as_deref()))
        .or_else(|| non_empty(rec.model.as_deref()).filter(|m| *m != UNKNOWN_MODEL))
        .map(|m| last_segment(m).to_string())
        .unwrap_or_else(|| format!("Port {}", rec.port));

    ServiceDisplayModel {
        port: rec.port,
        kind: rec.kind.clone(),
        color,
        status,
        model_name,
        throughput: summary.as_ref().map_or(0.0, |s| s.avg_tokens_per_sec),
        latency_seconds: latest.map_or(0.0, |r| r.latency),
        summary,
    }
}

/// Reconcile every record, keeping input order. Colours follow position in the palette.
pub fn reconcile(records: &[RawServiceRecord], theme: &ThemePreset) -> Vec<ServiceDisplayModel> {
    records
        .iter()
        .enumerate()
        .map(|(i, rec)| reconcile_one(rec, theme.service_color(i)))
        .collect()
}

/// State that outlives a single refresh: the port the click action targets.
#[derive(Debug, Default, Clone)]
pub struct DisplayState {
    first_port: Option<u16>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile and remember the first service's port. An empty result keeps the old port.
    pub fn reconcile(
        &mut self,
        records: &[RawServiceRecord],
        theme: &ThemePreset,
    ) -> Vec<ServiceDisplayModel> {
        let models = reconcile(records, theme);
        if let Some(first) = models.first() {
            self.first_port = Some(first.port);
        }
        models
    }

    pub fn first_port(&self) -> Option<u16> {
        self.first_port
    }

    pub fn dashboard_port(&self) -> u16 {
        self.first_port.unwrap_or(DEFAULT_PORT)
    }
}
