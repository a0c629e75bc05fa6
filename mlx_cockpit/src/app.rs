//! App state and main loop: input handling, refreshing the snapshot, and drawing.

use std::{
    io,
    time::{Duration, Instant},
};

use chrono::{DateTime, Local};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Rect},
    Terminal,
};
use tokio::time::sleep;

use crate::gesture::Pointer;
use crate::opener::UrlOpener;
use crate::render::{render, View};
use crate::settings::ThemeStore;
use crate::snapshot::parse_snapshot;
use crate::source::Source;
use crate::theme::{self, ThemePreset};
use crate::ui::{draw_widget, header::draw_header, panel_size};
use crate::widget::{PointerEvent, Widget};

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);

/// Outcome of one refresh tick, kept for drawing until the next tick replaces it.
struct Rendered {
    theme: ThemePreset,
    view: View,
}

pub struct App<S, O> {
    widget: Widget,
    store: S,
    opener: O,

    rendered: Rendered,
    last_refresh: Option<DateTime<Local>>,
    last_poll: Instant,
    interval: Duration,

    // Quit flag
    should_quit: bool,
}

impl<S: ThemeStore, O: UrlOpener> App<S, O> {
    pub fn new(store: S, opener: O, interval: Duration) -> Self {
        let theme = theme::resolve(&store);
        let mut widget = Widget::default();
        let (w, h) = panel_size(&View::Offline);
        widget.element.set_size(w, h);
        Self {
            widget,
            store,
            opener,
            rendered: Rendered {
                theme,
                view: View::Offline,
            },
            last_refresh: None,
            last_poll: Instant::now()
                .checked_sub(interval)
                .unwrap_or_else(Instant::now), // trigger immediately on first loop
            interval,
            should_quit: false,
        }
    }

    pub async fn run(&mut self, source: &Source) -> anyhow::Result<()> {
        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        self.attach();

        // Main loop
        let res = self.event_loop(&mut terminal, source).await;

        // Teardown
        disable_raw_mode()?;
        let backend = terminal.backend_mut();
        execute!(backend, DisableMouseCapture, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        source: &Source,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                match event::read()? {
                    Event::Key(k) => {
                        if matches!(
                            k.code,
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
                        ) {
                            self.should_quit = true;
                        }
                    }
                    Event::Mouse(m) => {
                        let width = terminal.size()?.width;
                        self.handle_mouse(m, width);
                    }
                    _ => {}
                }
            }
            if self.should_quit {
                break;
            }

            if self.last_poll.elapsed() >= self.interval {
                self.last_poll = Instant::now();
                if let Some(raw) = source.fetch().await {
                    self.refresh(&raw);
                }
            }

            terminal.draw(|f| self.draw(f))?;

            sleep(Duration::from_millis(30)).await;
        }

        Ok(())
    }

    /// Start routing mouse input to the widget. Safe to call more than once.
    pub fn attach(&mut self) -> bool {
        let first = self.widget.init();
        if first {
            tracing::debug!("pointer listeners attached");
        }
        first
    }

    /// Rebuild the view from one raw discovery blob.
    pub fn refresh(&mut self, raw: &str) -> &View {
        let theme = theme::resolve(&self.store);
        let snap = parse_snapshot(raw);
        let models = self.widget.reconcile(&snap, &theme);
        tracing::debug!(
            services = models.len(),
            alive = models.iter().filter(|m| m.status.is_alive()).count(),
            "refreshed"
        );
        let view = render(&models, &theme);
        let (w, h) = panel_size(&view);
        self.widget.element.set_size(w, h);
        self.rendered = Rendered { theme, view };
        self.last_refresh = Some(Local::now());
        &self.rendered.view
    }

    /// Translate a terminal mouse event into widget pointer events.
    pub fn handle_mouse(&mut self, m: MouseEvent, viewport_width: u16) {
        let p = Pointer::new(i32::from(m.column), i32::from(m.row));
        let events = match m.kind {
            MouseEventKind::Down(MouseButton::Left) => vec![PointerEvent::Down(p)],
            MouseEventKind::Drag(MouseButton::Left) => vec![PointerEvent::Move(p)],
            // Terminals report no click; synthesize one after the release, as browsers do.
            MouseEventKind::Up(MouseButton::Left) if self.widget.gesture().is_dragging() => {
                vec![PointerEvent::Up(p), PointerEvent::Click(p)]
            }
            MouseEventKind::Up(MouseButton::Left) => vec![PointerEvent::Up(p)],
            _ => Vec::new(),
        };
        for ev in events {
            if let Some(url) = self.widget.handle_pointer(ev, viewport_width) {
                self.opener.open(&url);
            }
        }
    }

    pub fn widget(&self) -> &Widget {
        &self.widget
    }

    pub fn view(&self) -> &View {
        &self.rendered.view
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();
        let rows = ratatui::layout::Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(area);

        let viewport = Rect { height: rows[0].height, ..area };
        // keep the hit box on screen
        self.widget.element.keep_within(viewport.width, viewport.height);
        let bounds = self.widget.element.bounds(area.width);
        draw_widget(
            f,
            viewport,
            bounds,
            &self.rendered.view,
            &self.rendered.theme,
            self.widget.element.grabbing,
        );
        draw_header(f, rows[1], &self.rendered.theme, self.last_refresh);
    }
}
