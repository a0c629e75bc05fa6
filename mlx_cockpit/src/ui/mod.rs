//! UI module root: paints the visual tree into the floating widget.

pub mod gauge;
pub mod header;
pub mod section;
pub mod theme;
pub mod util;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::gesture::Bounds;
use crate::render::{View, OFFLINE_TEXT};
use crate::theme::ThemePreset;
use theme::{BORDER, BORDER_GRABBED, TEXT_FAINT};

pub const SECTION_COLS: u16 = 36;
pub const SECTION_ROWS: u16 = 14;
const OFFLINE_SIZE: (u16, u16) = (30, 5);

/// Widget size in cells for a view, borders included.
pub fn panel_size(view: &View) -> (u16, u16) {
    match view {
        View::Offline => OFFLINE_SIZE,
        View::Panel(sections) => {
            let n = u32::try_from(sections.len()).unwrap_or(u32::MAX);
            // one separator column between sections
            let width = n
                .saturating_mul(u32::from(SECTION_COLS))
                .saturating_add(n.saturating_sub(1))
                .saturating_add(2);
            (
                u16::try_from(width).unwrap_or(u16::MAX),
                SECTION_ROWS + 2,
            )
        }
    }
}

fn visible(bounds: Bounds, viewport: Rect) -> Option<Rect> {
    let x0 = bounds.x.max(i32::from(viewport.x));
    let y0 = bounds.y.max(i32::from(viewport.y));
    let x1 = (bounds.x + i32::from(bounds.width)).min(i32::from(viewport.right()));
    let y1 = (bounds.y + i32::from(bounds.height)).min(i32::from(viewport.bottom()));
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

pub fn draw_widget(
    f: &mut ratatui::Frame<'_>,
    viewport: Rect,
    bounds: Bounds,
    view: &View,
    theme: &ThemePreset,
    grabbing: bool,
) {
    let Some(area) = visible(bounds, viewport) else {
        return;
    };
    let border = if grabbing { BORDER_GRABBED } else { BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.background.into()));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    match view {
        View::Offline => {
            let lines = vec![
                Line::from(Span::styled("·", Style::default().fg(TEXT_FAINT))),
                Line::from(Span::styled(
                    OFFLINE_TEXT.to_uppercase(),
                    Style::default().fg(TEXT_FAINT).add_modifier(Modifier::BOLD),
                )),
            ];
            f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
        }
        View::Panel(sections) => {
            // only lay out the columns that can appear in the visible area
            let fits = usize::from(inner.width.saturating_add(1) / (SECTION_COLS + 1)).max(1);
            let sections = &sections[..sections.len().min(fits)];
            let mut constraints = Vec::with_capacity(sections.len() * 2);
            for i in 0..sections.len() {
                if i > 0 {
                    constraints.push(Constraint::Length(1));
                }
                constraints.push(Constraint::Length(SECTION_COLS));
            }
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints(constraints)
                .split(inner);
            for (i, s) in sections.iter().enumerate() {
                if i > 0 {
                    let sep = cols[i * 2 - 1];
                    let bar: Vec<Line> = (0..sep.height)
                        .map(|_| Line::from(Span::styled("│", Style::default().fg(BORDER))))
                        .collect();
                    f.render_widget(Paragraph::new(bar), sep);
                }
                section::draw_section(f, cols[i * 2], s);
            }
        }
    }
}
