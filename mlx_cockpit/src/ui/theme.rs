//! Shared UI colour constants and the palette bridge into ratatui.

use ratatui::style::Color;

use crate::theme::Rgba;

// Gauge chrome, same look regardless of preset
pub const TRACK: Color = Color::Rgb(58, 58, 70);
pub const TICK_MAJOR: Color = Color::Rgb(120, 120, 130);
pub const TICK_MINOR: Color = Color::Rgb(75, 75, 85);
pub const TEXT: Color = Color::Rgb(235, 235, 240);
pub const TEXT_DIM: Color = Color::Rgb(130, 130, 140);
pub const TEXT_FAINT: Color = Color::Rgb(85, 85, 95);
pub const BORDER: Color = Color::Rgb(60, 60, 72);
pub const BORDER_GRABBED: Color = Color::Rgb(150, 150, 165);

// Terminals have no alpha; the colour is used as-is.
impl From<Rgba> for Color {
    fn from(c: Rgba) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}
