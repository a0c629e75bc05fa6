//! Pure rendering: display models + theme in, visual tree out.
//!
//! The tree is painted by `ui` in the terminal and serialised by [`to_svg`] for one-shot
//! snapshots.

use std::fmt::{self, Write};

use crate::geometry::{latency_ceiling, layout_gauge, throughput_ceiling, ArcPath, GaugeLayout};
use crate::reconcile::{ServiceDisplayModel, ServiceStatus};
use crate::snapshot::Summary;
use crate::theme::{Rgba, ThemePreset};
use crate::ui::util::thousands;

pub const GAUGE_SIZE: f64 = 115.0;
pub const OFFLINE_TEXT: &str = "MLX Servers Offline";
pub const READY_TEXT: &str = "Ready — waiting for requests";
pub const GENERATING_TEXT: &str = "Generating...";
pub const SERVICE_OFFLINE_TEXT: &str = "Offline";

pub const DOT_ALIVE: Rgba = Rgba::rgb(0x3f, 0xb9, 0x50);
pub const DOT_DEAD: Rgba = Rgba::rgb(0xf8, 0x51, 0x49);

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeView {
    pub label: &'static str,
    pub unit: &'static str,
    pub value: f64,
    pub max: f64,
    pub color: Rgba,
    pub layout: GaugeLayout,
    pub track: ArcPath,
    pub fill: Option<ArcPath>,
}

impl GaugeView {
    fn new(label: &'static str, unit: &'static str, value: f64, max: f64, color: Rgba) -> Self {
        let layout = layout_gauge(value, max, GAUGE_SIZE);
        let track = layout.track();
        let fill = if value > 0.0 { layout.value_arc() } else { None };
        Self {
            label,
            unit,
            value,
            max,
            color,
            layout,
            track,
            fill,
        }
    }

    pub fn readout(&self) -> String {
        format!("{:.1}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PillView {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Gauges {
        speed: GaugeView,
        latency: GaugeView,
        pills: [PillView; 3],
    },
    Ready,
    Generating,
    Offline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub port: u16,
    pub tag: String,
    pub model_name: String,
    pub color: Rgba,
    pub latency_color: Rgba,
    pub dot: Rgba,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Offline,
    Panel(Vec<SectionView>),
}

impl View {
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Offline)
    }
}

fn pills(s: &Summary) -> [PillView; 3] {
    [
        PillView {
            icon: "+",
            label: "Requests",
            value: s.total_requests.to_string(),
        },
        PillView {
            icon: ">",
            label: "Prompt",
            value: thousands(s.total_prompt_tokens),
        },
        PillView {
            icon: "<",
            label: "Output",
            value: thousands(s.total_completion_tokens),
        },
    ]
}

fn section(m: &ServiceDisplayModel, theme: &ThemePreset) -> SectionView {
    let body = match (m.status, m.summary.as_ref()) {
        (ServiceStatus::Online, Some(summary)) => SectionBody::Gauges {
            speed: GaugeView::new(
                "Speed",
                "tok/s",
                m.throughput,
                throughput_ceiling(m.throughput),
                m.color,
            ),
            latency: GaugeView::new(
                "Latency",
                "seconds",
                m.latency_seconds,
                latency_ceiling(m.latency_seconds),
                theme.latency_color,
            ),
            pills: pills(summary),
        },
        (ServiceStatus::Online, None) => SectionBody::Ready,
        (ServiceStatus::Busy, _) => SectionBody::Generating,
        (ServiceStatus::Offline, _) => SectionBody::Offline,
    };
    SectionView {
        port: m.port,
        tag: m.kind.clone(),
        model_name: m.model_name.clone(),
        color: m.color,
        latency_color: theme.latency_color,
        dot: if m.status.is_alive() { DOT_ALIVE } else { DOT_DEAD },
        body,
    }
}

pub fn render(models: &[ServiceDisplayModel], theme: &ThemePreset) -> View {
    if !models.iter().any(|m| m.status.is_alive()) {
        return View::Offline;
    }
    View::Panel(models.iter().map(|m| section(m, theme)).collect())
}

// ---------- SVG ----------

const SECTION_WIDTH: f64 = 250.0;
const SECTION_HEIGHT: f64 = 200.0;
const PAD: f64 = 16.0;

fn esc(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_gauge<W: Write>(out: &mut W, g: &GaugeView, x: f64, y: f64, id: &str) -> fmt::Result {
    let l = &g.layout;
    let c = l.center;
    writeln!(out, r#"<g transform="translate({x} {y})">"#)?;
    writeln!(
        out,
        r#"<defs><linearGradient id="grad-{id}" x1="0%" y1="0%" x2="100%" y2="0%"><stop offset="0%" stop-color="{col}" stop-opacity="0.2"/><stop offset="100%" stop-color="{col}" stop-opacity="1"/></linearGradient><filter id="glow-{id}"><feGaussianBlur stdDeviation="3" result="blur"/><feMerge><feMergeNode in="blur"/><feMergeNode in="SourceGraphic"/></feMerge></filter></defs>"#,
        col = g.color
    )?;
    writeln!(
        out,
        r#"<path d="{}" fill="none" stroke="rgba(255,255,255,0.07)" stroke-width="6" stroke-linecap="round"/>"#,
        g.track
    )?;
    if let Some(fill) = &g.fill {
        writeln!(
            out,
            r#"<path d="{fill}" fill="none" stroke="url(#grad-{id})" stroke-width="6" stroke-linecap="round" filter="url(#glow-{id})"/>"#
        )?;
    }
    for t in &l.ticks {
        let (stroke, width) = if t.major {
            ("rgba(255,255,255,0.35)", 1.5)
        } else {
            ("rgba(255,255,255,0.15)", 1.0)
        };
        writeln!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{stroke}" stroke-width="{width}" stroke-linecap="round"/>"#,
            t.outer.x, t.outer.y, t.inner.x, t.inner.y
        )?;
        if let Some(label) = &t.label {
            writeln!(
                out,
                r#"<text x="{}" y="{}" fill="rgba(255,255,255,0.3)" font-size="7" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
                label.at.x, label.at.y, label.value
            )?;
        }
    }
    let pts = l
        .needle
        .points()
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(
        out,
        r#"<polygon points="{pts}" fill="{}" opacity="0.9"/>"#,
        g.color
    )?;
    writeln!(
        out,
        r##"<circle cx="{}" cy="{}" r="4" fill="#1a1a2e" stroke="{}" stroke-width="1.5"/>"##,
        c.x, c.y, g.color
    )?;
    writeln!(
        out,
        r#"<text x="{}" y="{}" fill="white" font-size="18" font-weight="600" text-anchor="middle">{}</text>"#,
        c.x,
        c.y + 18.0,
        g.readout()
    )?;
    writeln!(
        out,
        r#"<text x="{}" y="{}" fill="rgba(255,255,255,0.4)" font-size="8" text-anchor="middle">{}</text>"#,
        c.x,
        c.y + 30.0,
        g.unit
    )?;
    writeln!(
        out,
        r#"<text x="{}" y="{}" fill="rgba(255,255,255,0.45)" font-size="9" text-anchor="middle">{}</text>"#,
        c.x,
        l.size + 4.0,
        g.label.to_uppercase()
    )?;
    writeln!(out, "</g>")
}

fn write_section<W: Write>(out: &mut W, s: &SectionView, x: f64) -> fmt::Result {
    writeln!(
        out,
        r#"<g class="service" data-port="{}" transform="translate({x} {PAD})">"#,
        s.port
    )?;
    writeln!(out, r#"<circle cx="4" cy="6" r="3.5" fill="{}"/>"#, s.dot)?;
    writeln!(
        out,
        r#"<text class="model" x="14" y="9" fill="rgba(255,255,255,0.5)" font-size="10" font-weight="600" style="text-transform:uppercase">{}</text>"#,
        esc(&s.model_name)
    )?;
    writeln!(
        out,
        r#"<text class="tag" x="{}" y="9" fill="{}" font-size="8" text-anchor="end" style="text-transform:uppercase">{}</text>"#,
        SECTION_WIDTH - 8.0,
        s.color,
        esc(&s.tag)
    )?;
    match &s.body {
        SectionBody::Gauges {
            speed,
            latency,
            pills,
        } => {
            write_gauge(out, speed, 0.0, 18.0, &format!("{}-speed", s.port))?;
            write_gauge(out, latency, GAUGE_SIZE + 4.0, 18.0, &format!("{}-latency", s.port))?;
            for (i, p) in pills.iter().enumerate() {
                let px = i as f64 * 80.0;
                writeln!(
                    out,
                    r#"<g class="pill" transform="translate({px} 150)"><rect width="76" height="30" rx="8" fill="rgba(255,255,255,0.04)" stroke="rgba(255,255,255,0.06)"/><text x="8" y="19" font-size="12" fill="white">{}</text><text x="22" y="12" font-size="8" fill="rgba(255,255,255,0.35)">{}</text><text class="pill-value" x="22" y="24" font-size="12" fill="rgba(255,255,255,0.9)">{}</text></g>"#,
                    esc(p.icon),
                    p.label.to_uppercase(),
                    p.value
                )?;
            }
        }
        SectionBody::Ready => write_note(out, READY_TEXT, "rgba(255,255,255,0.3)")?,
        SectionBody::Generating => write_note(out, GENERATING_TEXT, s.latency_color)?,
        SectionBody::Offline => write_note(out, SERVICE_OFFLINE_TEXT, "rgba(255,255,255,0.2)")?,
    }
    writeln!(out, "</g>")
}

fn write_note<W: Write>(out: &mut W, text: &str, color: impl fmt::Display) -> fmt::Result {
    writeln!(
        out,
        r#"<text x="{}" y="48" fill="{color}" font-size="11" text-anchor="middle">{}</text>"#,
        SECTION_WIDTH / 2.0,
        esc(text)
    )
}

/// Serialise the view as a standalone SVG document.
pub fn to_svg(view: &View, theme: &ThemePreset) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails
    let _ = write_svg(&mut out, view, theme);
    out
}

/// Write the SVG document for `view` into any text sink.
pub fn write_svg<W: Write>(out: &mut W, view: &View, theme: &ThemePreset) -> fmt::Result {
    let (w, h) = match view {
        View::Offline => (240.0, 80.0),
        View::Panel(sections) => (
            sections.len() as f64 * (SECTION_WIDTH + PAD) + PAD,
            SECTION_HEIGHT + 2.0 * PAD,
        ),
    };
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" data-theme="{}">"#,
        esc(&theme.key)
    )?;
    writeln!(
        out,
        r#"<rect width="{w}" height="{h}" rx="20" fill="{}" stroke="rgba(255,255,255,0.06)"/>"#,
        theme.background
    )?;
    match view {
        View::Offline => {
            writeln!(
                out,
                r#"<text class="offline" x="{}" y="{}" fill="rgba(255,255,255,0.3)" font-size="11" text-anchor="middle">{}</text>"#,
                w / 2.0,
                h / 2.0 + 4.0,
                OFFLINE_TEXT.to_uppercase()
            )?;
        }
        View::Panel(sections) => {
            for (i, s) in sections.iter().enumerate() {
                let x = PAD + i as f64 * (SECTION_WIDTH + PAD);
                if i > 0 {
                    writeln!(
                        out,
                        r#"<line x1="{sx}" y1="{PAD}" x2="{sx}" y2="{}" stroke="rgba(255,255,255,0.08)"/>"#,
                        h - PAD,
                        sx = x - PAD / 2.0
                    )?;
                }
                write_section(out, s, x)?;
            }
        }
    }
    writeln!(out, "</svg>")
}
