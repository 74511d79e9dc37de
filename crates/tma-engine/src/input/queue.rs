/// Input event types the engine understands.
/// Pointer and key events come from the page; the rest come from the Mini-App host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at world coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at world coordinates (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to world coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    KeyDown { key_code: u32 },
    KeyUp { key_code: u32 },
    /// A custom event from the UI layer.
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
    /// The host viewport changed size. `stable` is false while the
    /// Mini-App is still being dragged.
    ViewportResized { width: f32, height: f32, stable: bool },
    /// The host switched theme; `dark` reflects the new colour scheme.
    ThemeChanged { dark: bool },
    /// Answer to a `HostRequest::Confirm` with the same `id`.
    ConfirmResult { id: u32, confirmed: bool },
}

/// A queue of input events.
/// JS and host callbacks push; the runner drains it into the first fixed step of a frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Queue an event for the next fixed step.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take all pending events, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Whether no events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl From<Vec<InputEvent>> for InputQueue {
    fn from(events: Vec<InputEvent>) -> Self {
        Self { events }
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
