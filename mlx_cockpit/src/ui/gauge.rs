//! Speedometer gauge painted on a Braille canvas from the shared gauge geometry.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Context, Line},
};

use crate::geometry::{polar_to_cartesian, Point, SWEEP_END, SWEEP_START};
use crate::render::GaugeView;
use crate::ui::theme::{TEXT, TEXT_DIM, TICK_MAJOR, TICK_MINOR, TRACK};

// Arc sampling step in degrees
const ARC_STEP: f64 = 4.0;

fn draw_arc(ctx: &mut Context<'_>, g: &GaugeView, from: f64, to: f64, color: Color) {
    let l = &g.layout;
    let flip = |p: Point| (p.x, l.size - p.y);
    let mut a = from;
    let mut prev = flip(polar_to_cartesian(l.center.x, l.center.y, l.radius, a));
    while a < to {
        a = (a + ARC_STEP).min(to);
        let next = flip(polar_to_cartesian(l.center.x, l.center.y, l.radius, a));
        ctx.draw(&Line {
            x1: prev.0,
            y1: prev.1,
            x2: next.0,
            y2: next.1,
            color,
        });
        prev = next;
    }
}

pub fn draw_gauge(f: &mut ratatui::Frame<'_>, area: Rect, g: &GaugeView) {
    let size = g.layout.size;
    let color: Color = g.color.into();
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, size])
        .y_bounds([0.0, size])
        .paint(|ctx| {
            let l = &g.layout;
            let flip = |p: Point| (p.x, size - p.y);

            draw_arc(ctx, g, SWEEP_START, SWEEP_END, TRACK);
            if g.fill.is_some() {
                draw_arc(ctx, g, SWEEP_START, l.value_angle, color);
            }
            for t in &l.ticks {
                let (x1, y1) = flip(t.outer);
                let (x2, y2) = flip(t.inner);
                let tick = if t.major { TICK_MAJOR } else { TICK_MINOR };
                ctx.draw(&Line { x1, y1, x2, y2, color: tick });
            }

            let [tip, a, b] = l.needle.points().map(flip);
            for ((x1, y1), (x2, y2)) in [(tip, a), (a, b), (b, tip)] {
                ctx.draw(&Line { x1, y1, x2, y2, color });
            }

            // text goes on its own layer so Braille dots don't overwrite it
            ctx.layer();
            for t in &l.ticks {
                if let Some(label) = &t.label {
                    let (x, y) = flip(label.at);
                    ctx.print(x - 3.0, y, Span::styled(label.value.to_string(), Style::default().fg(TICK_MINOR)));
                }
            }
            let (cx, cy) = flip(l.center);
            let readout = g.readout();
            ctx.print(
                cx - readout.len() as f64 * 3.0,
                cy - 22.0,
                Span::styled(readout, Style::default().fg(TEXT).add_modifier(Modifier::BOLD)),
            );
            ctx.print(
                cx - g.unit.len() as f64 * 3.0,
                cy - 36.0,
                Span::styled(g.unit, Style::default().fg(TEXT_DIM)),
            );
        });
    f.render_widget(canvas, area);
}
