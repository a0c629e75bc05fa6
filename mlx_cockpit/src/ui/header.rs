//! Bottom status line with theme, last refresh time and key hints.

use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders},
};

use crate::theme::ThemePreset;
use crate::ui::theme::TEXT_FAINT;

pub fn draw_header(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    theme: &ThemePreset,
    last_refresh: Option<DateTime<Local>>,
) {
    let when = last_refresh
        .map(|t| format!("updated {}", t.format("%H:%M:%S")))
        .unwrap_or_else(|| "waiting for first refresh...".into());
    let title = format!(
        "mlx-cockpit | theme: {} | {}  (drag to move, click to open dashboard, 'q' to quit)",
        theme.display_name, when
    );
    f.render_widget(
        Block::default()
            .title(title)
            .borders(Borders::TOP)
            .border_style(Style::default().fg(TEXT_FAINT)),
        area,
    );
}
