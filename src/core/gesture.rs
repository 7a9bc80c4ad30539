//! Drag gesture translation.
//!
//! Pointer hosts report absolute positions (terminal columns, window
//! pixels).  The engine wants the cumulative horizontal displacement since
//! the gesture began, unclamped: the strip is infinite, so there are no
//! bounds to rubber-band against.

/// One step of a drag session, in the shape the engine consumes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Start,
    /// Cumulative displacement since `Start`.
    Update(f64),
    End,
}

/// Tracks one drag session at a time.
#[derive(Debug, Clone, Default)]
pub struct GestureTranslator {
    /// Pointer position at `Start`, while a session is active.
    origin: Option<f64>,
    /// Last reported cumulative displacement.
    delta: f64,
}

impl GestureTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer went down at `x`.  A press while a session is active (a lost
    /// release) restarts the session from the new position.
    pub fn press(&mut self, x: f64) -> GestureEvent {
        self.origin = Some(x);
        self.delta = 0.0;
        GestureEvent::Start
    }

    /// Pointer moved to `x`.  Returns `None` outside a session or when the
    /// displacement did not change.
    pub fn drag(&mut self, x: f64) -> Option<GestureEvent> {
        let origin = self.origin?;
        let delta = x - origin;
        if !delta.is_finite() || delta == self.delta {
            return None;
        }
        self.delta = delta;
        Some(GestureEvent::Update(delta))
    }

    /// Pointer released.  Completion only; the snap target is decided by the
    /// engine.
    pub fn release(&mut self) -> Option<GestureEvent> {
        self.origin.take()?;
        Some(GestureEvent::End)
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// Cumulative displacement of the current (or last) session.
    pub fn delta(&self) -> f64 {
        self.delta
    }
}
