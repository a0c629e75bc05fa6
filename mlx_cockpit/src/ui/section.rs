//! One service column: header line, gauge pair and counter pills.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::render::{
    PillView, SectionBody, SectionView, GENERATING_TEXT, READY_TEXT, SERVICE_OFFLINE_TEXT,
};
use crate::ui::gauge::draw_gauge;
use crate::ui::theme::{BORDER, TEXT, TEXT_DIM, TEXT_FAINT};
use crate::ui::util::truncate_middle;

fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, s: &SectionView) {
    let tag = s.tag.to_uppercase();
    let name_room = (area.width as usize).saturating_sub(tag.chars().count() + 4);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(4), Constraint::Length(tag.chars().count() as u16)])
        .split(area);
    let left = Line::from(vec![
        Span::styled("● ", Style::default().fg(s.dot.into())),
        Span::styled(
            truncate_middle(&s.model_name.to_uppercase(), name_room),
            Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(left), cols[0]);
    f.render_widget(
        Paragraph::new(Span::styled(
            tag,
            Style::default().fg(s.color.into()).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_pill(f: &mut ratatui::Frame<'_>, area: Rect, p: &PillView) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER))
        .title(Span::styled(p.label.to_uppercase(), Style::default().fg(TEXT_FAINT)));
    let line = Line::from(vec![
        Span::styled(format!("{} ", p.icon), Style::default().fg(TEXT_DIM)),
        Span::styled(p.value.clone(), Style::default().fg(TEXT)),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_note(f: &mut ratatui::Frame<'_>, area: Rect, text: &str, color: Color) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    f.render_widget(
        Paragraph::new(Span::styled(text.to_string(), Style::default().fg(color)))
            .alignment(Alignment::Center),
        rows[1],
    );
}

pub fn draw_section(f: &mut ratatui::Frame<'_>, area: Rect, s: &SectionView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(9), // gauges
            Constraint::Length(1), // gauge labels
            Constraint::Length(3), // pills
        ])
        .split(area);
    draw_header(f, rows[0], s);

    match &s.body {
        SectionBody::Gauges {
            speed,
            latency,
            pills,
        } => {
            let halves = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(rows[1]);
            draw_gauge(f, halves[0], speed);
            draw_gauge(f, halves[1], latency);

            let labels = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
                .split(rows[2]);
            for (g, a) in [(speed, labels[0]), (latency, labels[1])] {
                f.render_widget(
                    Paragraph::new(Span::styled(
                        g.label.to_uppercase(),
                        Style::default().fg(TEXT_FAINT),
                    ))
                    .alignment(Alignment::Center),
                    a,
                );
            }

            let pill_cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Ratio(1, 3); 3])
                .split(rows[3]);
            for (p, a) in pills.iter().zip(pill_cols.iter()) {
                draw_pill(f, *a, p);
            }
        }
        SectionBody::Ready => draw_note(f, rows[1], READY_TEXT, TEXT_FAINT),
        SectionBody::Generating => draw_note(f, rows[1], GENERATING_TEXT, s.latency_color.into()),
        SectionBody::Offline => draw_note(f, rows[1], SERVICE_OFFLINE_TEXT, TEXT_FAINT),
    }
}
