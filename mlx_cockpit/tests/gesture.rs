//! Drag versus click disambiguation, widget setup guard, and click routing.

use std::{cell::RefCell, rc::Rc, time::Duration};

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, Terminal};
use mlx_cockpit::app::App;
use mlx_cockpit::gesture::{ClickOutcome, GestureController, Pointer, WidgetElement};
use mlx_cockpit::opener::UrlOpener;
use mlx_cockpit::settings::{SettingsError, ThemeStore};
use mlx_cockpit::render::View;
use mlx_cockpit::ui::panel_size;
use mlx_cockpit::widget::{PointerEvent, Widget};

const VIEWPORT: u16 = 200;

fn element() -> WidgetElement {
    let mut el = WidgetElement::anchored_right(2, 1);
    el.set_size(40, 16);
    el
}

// left edge of element() inside VIEWPORT
const LEFT: i32 = 200 - 2 - 40;

fn gesture(dx: i32, dy: i32) -> (GestureController, WidgetElement, ClickOutcome) {
    let mut g = GestureController::new();
    let mut el = element();
    let start = Pointer::new(LEFT + 5, 5);
    g.pointer_down(&mut el, start, VIEWPORT);
    g.pointer_move(&mut el, Pointer::new(start.x + dx, start.y + dy));
    g.pointer_up(&mut el);
    let outcome = g.click(&el, Pointer::new(start.x + dx, start.y + dy), VIEWPORT);
    (g, el, outcome)
}

#[test]
fn three_cells_is_still_a_click() {
    let (g, _, outcome) = gesture(3, 3);
    assert_eq!(outcome, ClickOutcome::Activate);
    assert!(!g.was_drag());
}

#[test]
fn exactly_threshold_is_still_a_click() {
    let (_, _, outcome) = gesture(4, -4);
    assert_eq!(outcome, ClickOutcome::Activate);
}

#[test]
fn five_cells_on_one_axis_is_a_drag() {
    let (mut g, el, outcome) = gesture(5, 0);
    assert_eq!(outcome, ClickOutcome::Suppressed);
    // the signal is consumed by the suppressed click
    assert!(!g.was_drag());
    let again = g.click(&el, Pointer::new(LEFT + 12, 5), VIEWPORT);
    assert_eq!(again, ClickOutcome::Activate);
}

#[test]
fn drag_reanchors_from_the_left() {
    let (_, el, _) = gesture(-10, 3);
    assert_eq!(el.left, Some(LEFT - 10));
    assert_eq!(el.top, 4);
    assert_eq!(el.right, None);
    assert!(!el.grabbing);
}

#[test]
fn element_tracks_pointer_during_small_moves() {
    let mut g = GestureController::new();
    let mut el = element();
    g.pointer_down(&mut el, Pointer::new(LEFT + 1, 2), VIEWPORT);
    assert!(el.grabbing);
    g.pointer_move(&mut el, Pointer::new(LEFT + 3, 2));
    assert_eq!(el.bounds(VIEWPORT).x, LEFT + 2);
    assert!(g.is_dragging());
}

#[test]
fn release_anywhere_publishes_the_drag() {
    let mut g = GestureController::new();
    let mut el = element();
    g.pointer_down(&mut el, Pointer::new(LEFT + 1, 2), VIEWPORT);
    g.pointer_move(&mut el, Pointer::new(LEFT + 30, 40));
    // pointer_up has no position: it ends the gesture wherever it happens
    g.pointer_up(&mut el);
    assert!(g.was_drag());
    assert!(!g.is_dragging());
}

#[test]
fn press_outside_starts_nothing() {
    let mut g = GestureController::new();
    let mut el = element();
    g.pointer_down(&mut el, Pointer::new(0, 0), VIEWPORT);
    assert!(!g.is_dragging());
    g.pointer_move(&mut el, Pointer::new(50, 50));
    assert_eq!(el, element());
    assert_eq!(g.click(&el, Pointer::new(0, 0), VIEWPORT), ClickOutcome::Ignored);
}

#[test]
fn setup_is_idempotent_and_gates_input() {
    let mut w = Widget::new(element());
    assert!(!w.is_listening());
    assert_eq!(w.handle_pointer(PointerEvent::Click(Pointer::new(LEFT + 1, 2)), VIEWPORT), None);

    assert!(w.init());
    assert!(!w.init());
    assert!(w.is_listening());
    assert_eq!(
        w.handle_pointer(PointerEvent::Click(Pointer::new(LEFT + 1, 2)), VIEWPORT).as_deref(),
        Some("http://localhost:8080/dashboard")
    );
}

#[test]
fn widgets_do_not_share_gesture_state() {
    let mut a = Widget::new(element());
    let mut b = Widget::new(element());
    a.init();
    b.init();
    let p = Pointer::new(LEFT + 1, 2);
    a.handle_pointer(PointerEvent::Down(p), VIEWPORT);
    a.handle_pointer(PointerEvent::Move(Pointer::new(p.x + 9, p.y)), VIEWPORT);
    a.handle_pointer(PointerEvent::Up(p), VIEWPORT);
    assert!(a.gesture().was_drag());
    assert!(!b.gesture().was_drag());
    assert!(b.handle_pointer(PointerEvent::Click(p), VIEWPORT).is_some());
}

// ---------- through the app's mouse translation ----------

struct NoStore;

impl ThemeStore for NoStore {
    fn theme_key(&self) -> Result<Option<String>, SettingsError> {
        Ok(None)
    }
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl UrlOpener for Recorder {
    fn open(&self, url: &str) {
        self.0.borrow_mut().push(url.to_string());
    }
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

const ONE_SERVICE: &str = r#"{"services":[{"port":9001,"type":"LLM","metrics":{"health_model":"m"}},
    {"port":9002,"type":"LLM"}]}"#;

#[test]
fn click_opens_first_service_dashboard() {
    let rec = Recorder::default();
    let mut app = App::new(NoStore, rec.clone(), Duration::from_secs(3));
    app.attach();
    app.refresh(ONE_SERVICE);

    let b = app.widget().element.bounds(VIEWPORT);
    let (x, y) = ((b.x + 3) as u16, (b.y + 2) as u16);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), VIEWPORT);
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x, y), VIEWPORT);

    assert_eq!(*rec.0.borrow(), vec!["http://localhost:9001/dashboard".to_string()]);
}

#[test]
fn drag_through_app_moves_widget_without_opening() {
    let rec = Recorder::default();
    let mut app = App::new(NoStore, rec.clone(), Duration::from_secs(3));
    app.attach();
    app.refresh(ONE_SERVICE);

    let b = app.widget().element.bounds(VIEWPORT);
    let (x, y) = ((b.x + 3) as u16, (b.y + 2) as u16);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), VIEWPORT);
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), x - 20, y + 6), VIEWPORT);
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x - 20, y + 6), VIEWPORT);

    assert!(rec.0.borrow().is_empty());
    let moved = app.widget().element.bounds(VIEWPORT);
    assert_eq!((moved.x, moved.y), (b.x - 20, b.y + 6));
}

#[test]
fn app_ignores_mouse_before_attach() {
    let rec = Recorder::default();
    let mut app = App::new(NoStore, rec.clone(), Duration::from_secs(3));
    app.refresh(ONE_SERVICE);
    let b = app.widget().element.bounds(VIEWPORT);
    let (x, y) = ((b.x + 3) as u16, (b.y + 2) as u16);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), VIEWPORT);
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x, y), VIEWPORT);
    assert!(rec.0.borrow().is_empty());
    assert!(app.attach());
    assert!(!app.attach());
}

#[test]
fn keep_within_pulls_element_back_on_screen() {
    let mut el = element();
    el.keep_within(VIEWPORT, 50);
    assert_eq!(el, element(), "an element already on screen keeps its anchor");

    let mut g = GestureController::new();
    let start = Pointer::new(LEFT + 5, 5);
    g.pointer_down(&mut el, start, VIEWPORT);
    g.pointer_move(&mut el, Pointer::new(LEFT + 100, 80));
    g.pointer_up(&mut el);
    assert!(el.bounds(VIEWPORT).x + 40 > i32::from(VIEWPORT));

    el.keep_within(VIEWPORT, 50);
    let b = el.bounds(VIEWPORT);
    assert_eq!((b.x, b.y), (160, 34));

    el.set_size(300, 80);
    el.keep_within(VIEWPORT, 50);
    let b = el.bounds(VIEWPORT);
    assert_eq!((b.x, b.y), (0, 0));
}

fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).expect("test terminal")
}

#[test]
fn widget_dragged_off_screen_stays_clickable_after_draw() {
    let rec = Recorder::default();
    let mut app = App::new(NoStore, rec.clone(), Duration::from_secs(3));
    app.attach();
    app.refresh(ONE_SERVICE);
    let mut term = test_terminal(80, 24);
    term.draw(|f| app.draw(f)).expect("draw");

    let b = app.widget().element.bounds(80);
    assert_eq!((b.x, b.y), (3, 1));
    let (x, y) = ((b.x + 3) as u16, (b.y + 2) as u16);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), 80);
    app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 70, 20), 80);
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 70, 20), 80);
    assert!(rec.0.borrow().is_empty());

    // status line takes the bottom two rows
    term.draw(|f| app.draw(f)).expect("draw");
    let b = app.widget().element.bounds(80);
    assert_eq!((b.x, b.y), (80 - 75, 22 - 16));

    let (x, y) = ((b.x + 2) as u16, (b.y + 2) as u16);
    app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), x, y), 80);
    app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), x, y), 80);
    assert_eq!(*rec.0.borrow(), vec!["http://localhost:9001/dashboard".to_string()]);
}

fn many_services(n: u16) -> String {
    let services: Vec<String> = (0..n)
        .map(|i| format!(r#"{{"port":{},"type":"LLM","metrics":{{"health_model":"m"}}}}"#, 10000 + i))
        .collect();
    format!(r#"{{"services":[{}]}}"#, services.join(","))
}

#[test]
fn very_large_snapshot_sizes_and_draws_without_overflow() {
    let mut app = App::new(NoStore, Recorder::default(), Duration::from_secs(3));
    app.attach();
    let View::Panel(sections) = app.refresh(&many_services(2000)) else {
        panic!("expected panel");
    };
    assert_eq!(sections.len(), 2000);
    assert_eq!(app.widget().element.width, u16::MAX);
    assert_eq!(panel_size(app.view()), (u16::MAX, 16));

    let mut term = test_terminal(120, 30);
    term.draw(|f| app.draw(f)).expect("draw");
    let b = app.widget().element.bounds(120);
    assert_eq!((b.x, b.y), (0, 1));
}
