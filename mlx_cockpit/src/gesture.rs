//! Drag-to-move versus click-to-open disambiguation for the floating widget.

/// Movement beyond this many cells on either axis turns a press into a drag.
pub const DRAG_THRESHOLD: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub x: i32,
    pub y: i32,
}

impl Pointer {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl Bounds {
    pub fn contains(&self, p: Pointer) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && p.x < self.x + i32::from(self.width)
            && p.y < self.y + i32::from(self.height)
    }
}

/// On-screen placement of the widget, in terminal cells.
///
/// Either `left` or `right` anchors the horizontal position; `left` wins when both are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetElement {
    pub left: Option<i32>,
    pub right: Option<i32>,
    pub top: i32,
    pub width: u16,
    pub height: u16,
    pub grabbing: bool,
}

impl WidgetElement {
    pub fn anchored_right(right: i32, top: i32) -> Self {
        Self {
            left: None,
            right: Some(right),
            top,
            width: 0,
            height: 0,
            grabbing: false,
        }
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn bounds(&self, viewport_width: u16) -> Bounds {
        let x = match (self.left, self.right) {
            (Some(left), _) => left,
            (None, Some(right)) => i32::from(viewport_width) - right - i32::from(self.width),
            (None, None) => 0,
        };
        Bounds {
            x,
            y: self.top,
            width: self.width,
            height: self.height,
        }
    }

    /// Pull the element back inside a `viewport_width` x `viewport_height` area so it stays
    /// reachable. An element larger than the viewport is pinned to the top-left corner.
    pub fn keep_within(&mut self, viewport_width: u16, viewport_height: u16) {
        let b = self.bounds(viewport_width);
        let max_x = (i32::from(viewport_width) - i32::from(self.width)).max(0);
        let max_y = (i32::from(viewport_height) - i32::from(self.height)).max(0);
        let x = b.x.clamp(0, max_x);
        let y = b.y.clamp(0, max_y);
        if (x, y) != (b.x, b.y) {
            self.move_to(x, y);
        }
    }

    fn move_to(&mut self, left: i32, top: i32) {
        self.left = Some(left);
        self.top = top;
        self.right = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragSession {
    start: Pointer,
    origin_x: i32,
    origin_y: i32,
    did_move: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum GestureState {
    #[default]
    Idle,
    Dragging(DragSession),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Click landed outside the widget.
    Ignored,
    /// Click closed a drag gesture and is swallowed.
    Suppressed,
    /// Genuine click: open the dashboard.
    Activate,
}

#[derive(Debug, Default)]
pub struct GestureController {
    state: GestureState,
    was_drag: bool,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GestureState::Dragging(_))
    }

    pub fn was_drag(&self) -> bool {
        self.was_drag
    }

    pub fn pointer_down(&mut self, el: &mut WidgetElement, p: Pointer, viewport_width: u16) {
        let rect = el.bounds(viewport_width);
        if !rect.contains(p) {
            return;
        }
        self.state = GestureState::Dragging(DragSession {
            start: p,
            origin_x: rect.x,
            origin_y: rect.y,
            did_move: false,
        });
        el.grabbing = true;
    }

    pub fn pointer_move(&mut self, el: &mut WidgetElement, p: Pointer) {
        let GestureState::Dragging(session) = &mut self.state else {
            return;
        };
        let dx = p.x - session.start.x;
        let dy = p.y - session.start.y;
        if dx.abs() > DRAG_THRESHOLD || dy.abs() > DRAG_THRESHOLD {
            session.did_move = true;
        }
        el.move_to(session.origin_x + dx, session.origin_y + dy);
    }

    /// End the gesture wherever the pointer is, publishing whether it was a drag.
    pub fn pointer_up(&mut self, el: &mut WidgetElement) {
        let GestureState::Dragging(session) = self.state else {
            return;
        };
        self.state = GestureState::Idle;
        self.was_drag = session.did_move;
        el.grabbing = false;
    }

    pub fn click(&mut self, el: &WidgetElement, p: Pointer, viewport_width: u16) -> ClickOutcome {
        if !el.bounds(viewport_width).contains(p) {
            return ClickOutcome::Ignored;
        }
        if self.was_drag {
            self.was_drag = false;
            return ClickOutcome::Suppressed;
        }
        ClickOutcome::Activate
    }
}
