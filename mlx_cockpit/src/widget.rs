//! The widget instance: owns its element handle, gesture session and display state.

use crate::gesture::{ClickOutcome, GestureController, Pointer, WidgetElement};
use crate::reconcile::{DisplayState, ServiceDisplayModel};
use crate::snapshot::Snapshot;
use crate::theme::ThemePreset;

pub const INITIAL_RIGHT: i32 = 2;
pub const INITIAL_TOP: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down(Pointer),
    Move(Pointer),
    Up(Pointer),
    Click(Pointer),
}

pub fn dashboard_url(port: u16) -> String {
    format!("http://localhost:{port}/dashboard")
}

#[derive(Debug)]
pub struct Widget {
    pub element: WidgetElement,
    gesture: GestureController,
    display: DisplayState,
    listening: bool,
}

impl Default for Widget {
    fn default() -> Self {
        Self::new(WidgetElement::anchored_right(INITIAL_RIGHT, INITIAL_TOP))
    }
}

impl Widget {
    pub fn new(element: WidgetElement) -> Self {
        Self {
            element,
            gesture: GestureController::new(),
            display: DisplayState::new(),
            listening: false,
        }
    }

    /// Start listening for pointer input. Returns false when already listening.
    pub fn init(&mut self) -> bool {
        if self.listening {
            return false;
        }
        self.listening = true;
        true
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn gesture(&self) -> &GestureController {
        &self.gesture
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn reconcile(&mut self, snap: &Snapshot, theme: &ThemePreset) -> Vec<ServiceDisplayModel> {
        self.display.reconcile(&snap.services, theme)
    }

    /// Feed one pointer event. Returns the dashboard URL when a click should open it.
    pub fn handle_pointer(&mut self, ev: PointerEvent, viewport_width: u16) -> Option<String> {
        if !self.listening {
            return None;
        }
        match ev {
            PointerEvent::Down(p) => {
                self.gesture.pointer_down(&mut self.element, p, viewport_width);
            }
            PointerEvent::Move(p) => self.gesture.pointer_move(&mut self.element, p),
            PointerEvent::Up(_) => self.gesture.pointer_up(&mut self.element),
            PointerEvent::Click(p) => {
                match self.gesture.click(&self.element, p, viewport_width) {
                    ClickOutcome::Activate => {
                        let url = dashboard_url(self.display.dashboard_port());
                        tracing::info!(%url, "opening dashboard");
                        return Some(url);
                    }
                    ClickOutcome::Suppressed => tracing::debug!("click after drag suppressed"),
                    ClickOutcome::Ignored => {}
                }
            }
        }
        None
    }
}
