//! Theme presets and the resolver that picks one from the persisted key.

use std::fmt;

use crate::settings::ThemeStore;

pub const DEFAULT_THEME: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

// CSS notation, so the same value works in SVG attributes.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemePreset {
    pub key: String,
    pub display_name: &'static str,
    pub service_colors: &'static [Rgba],
    pub latency_color: Rgba,
    pub background: Rgba,
}

impl ThemePreset {
    /// Colour for the service at `index`; palettes shorter than the service list cycle.
    pub fn service_color(&self, index: usize) -> Rgba {
        self.service_colors[index % self.service_colors.len()]
    }
}

struct Preset {
    key: &'static str,
    display_name: &'static str,
    service_colors: &'static [Rgba],
    latency_color: Rgba,
    background: Rgba,
}

const PRESETS: [Preset; 5] = [
    Preset {
        key: DEFAULT_THEME,
        display_name: "Default",
        service_colors: &[
            Rgba::rgb(0x58, 0xa6, 0xff),
            Rgba::rgb(0xd2, 0xa8, 0xff),
            Rgba::rgb(0x3f, 0xb9, 0x50),
            Rgba::rgb(0xf9, 0x73, 0x16),
            Rgba::rgb(0xec, 0x48, 0x99),
        ],
        latency_color: Rgba::rgb(0xf0, 0x88, 0x3e),
        background: Rgba::rgba(18, 18, 28, 0.88),
    },
    Preset {
        key: "cyberpunk",
        display_name: "Cyberpunk",
        service_colors: &[
            Rgba::rgb(0xff, 0x2a, 0x6d),
            Rgba::rgb(0x05, 0xd9, 0xe8),
            Rgba::rgb(0xf9, 0xf8, 0x71),
            Rgba::rgb(0xff, 0x6b, 0x6b),
            Rgba::rgb(0xa8, 0x55, 0xf7),
        ],
        latency_color: Rgba::rgb(0xf9, 0xf8, 0x71),
        background: Rgba::rgba(10, 10, 20, 0.92),
    },
    Preset {
        key: "matrix",
        display_name: "Matrix",
        service_colors: &[
            Rgba::rgb(0x00, 0xff, 0x41),
            Rgba::rgb(0x39, 0xff, 0x14),
            Rgba::rgb(0x20, 0xc2, 0x0e),
            Rgba::rgb(0x7f, 0xff, 0x00),
            Rgba::rgb(0x00, 0xfa, 0x9a),
        ],
        latency_color: Rgba::rgb(0x20, 0xc2, 0x0e),
        background: Rgba::rgba(5, 10, 5, 0.92),
    },
    Preset {
        key: "ocean",
        display_name: "Ocean",
        service_colors: &[
            Rgba::rgb(0x0e, 0xa5, 0xe9),
            Rgba::rgb(0x7d, 0xd3, 0xfc),
            Rgba::rgb(0x06, 0xb6, 0xd4),
            Rgba::rgb(0x38, 0xbd, 0xf8),
            Rgba::rgb(0xa7, 0x8b, 0xfa),
        ],
        latency_color: Rgba::rgb(0xfb, 0x92, 0x3c),
        background: Rgba::rgba(8, 15, 30, 0.92),
    },
    Preset {
        key: "sunset",
        display_name: "Sunset",
        service_colors: &[
            Rgba::rgb(0xf9, 0x73, 0x16),
            Rgba::rgb(0xfb, 0x71, 0x85),
            Rgba::rgb(0xfb, 0xbf, 0x24),
            Rgba::rgb(0xf4, 0x3f, 0x5e),
            Rgba::rgb(0xa7, 0x8b, 0xfa),
        ],
        latency_color: Rgba::rgb(0xfb, 0xbf, 0x24),
        background: Rgba::rgba(25, 15, 12, 0.92),
    },
];

/// Keys of every known preset, default first.
pub fn theme_keys() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.key)
}

pub fn is_known(key: &str) -> bool {
    PRESETS.iter().any(|p| p.key == key)
}

impl Preset {
    fn to_theme(&self) -> ThemePreset {
        ThemePreset {
            key: self.key.to_string(),
            display_name: self.display_name,
            service_colors: self.service_colors,
            latency_color: self.latency_color,
            background: self.background,
        }
    }
}

fn preset(key: &str) -> Option<ThemePreset> {
    PRESETS.iter().find(|p| p.key == key).map(Preset::to_theme)
}

pub fn default_theme() -> ThemePreset {
    PRESETS[0].to_theme()
}

/// Resolve an optional key; empty or unknown keys give the default preset.
pub fn resolve_key(key: Option<&str>) -> ThemePreset {
    key.filter(|k| !k.is_empty())
        .and_then(preset)
        .unwrap_or_else(default_theme)
}

/// Look the key up in `store` and resolve it. Store failures fall back to the default.
pub fn resolve<S: ThemeStore + ?Sized>(store: &S) -> ThemePreset {
    match store.theme_key() {
        Ok(key) => resolve_key(key.as_deref()),
        Err(e) => {
            tracing::debug!(error = %e, "theme lookup failed, using default");
            default_theme()
        }
    }
}
