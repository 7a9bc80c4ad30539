//! The carousel engine: drag tracking, snap resolution, spring settling and
//! re-basing of the logical index space.
//!
//! State machine:
//!
//! ```text
//!            gesture start            gesture end
//!   Idle ─────────────────▶ Dragging ─────────────▶ Settling
//!    ▲                         ▲                       │
//!    │                         └──── gesture start ────┤
//!    └──────────────────── spring at rest ─────────────┘
//! ```
//!
//! * **Idle** — the strip rests at `-center * pitch`.
//! * **Dragging** — the strip tracks the pointer 1:1 from a baseline (the
//!   resting offset, or the live spring offset when a settle was
//!   interrupted).
//! * **Settling** — a spring runs toward the nearest slot.  At rest the
//!   centre index is re-based to its wrapped equivalent in `[0, N)`, which
//!   keeps the index space bounded however many swipes go one way.
//!
//! All entry points are total; malformed input is refused at construction.

use super::error::ConfigError;
use super::projector::{self, Placement};
use super::spring::{SpringDriver, SpringFrame, SpringRun};
use super::window::{nearest_index, plan_window, WindowPlan};
use super::wrap::{wrap_index, LogicalIndex};

// ───────────────────────────────────────── geometry ──────────

/// Item dimensions, in the host's pixel unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub item_width: f64,
    pub item_height: f64,
    pub items_gap: f64,
}

impl Geometry {
    /// Geometry with no gap between items.
    pub fn new(item_width: f64, item_height: f64) -> Self {
        Self {
            item_width,
            item_height,
            items_gap: 0.0,
        }
    }

    pub fn with_gap(mut self, items_gap: f64) -> Self {
        self.items_gap = items_gap;
        self
    }

    /// Centre-to-centre distance between neighbouring items.
    pub fn pitch(&self) -> f64 {
        self.item_width + self.items_gap
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.item_width.is_finite() && self.item_width > 0.0) {
            return Err(ConfigError::NonPositiveItemWidth(self.item_width));
        }
        if !(self.item_height.is_finite() && self.item_height >= 0.0) {
            return Err(ConfigError::NegativeItemHeight(self.item_height));
        }
        if !(self.items_gap.is_finite() && self.items_gap >= 0.0) {
            return Err(ConfigError::NegativeItemsGap(self.items_gap));
        }
        Ok(())
    }
}

// ───────────────────────────────────────── state ─────────────

/// Observable engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Dragging,
    Settling,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Dragging {
        /// Strip offset when the drag began.
        baseline: f64,
        /// Cumulative pointer displacement.
        delta: f64,
    },
    Settling {
        run: SpringRun,
        /// Slot being settled onto (not yet re-based).
        target: LogicalIndex,
        /// Last value reported by the spring.
        live: f64,
    },
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<R> {
    pub window: Vec<Placement<R>>,
    pub is_dragging: bool,
}

// ───────────────────────────────────────── engine ────────────

/// Infinitely wrapping carousel over `items`, settled by the spring driver
/// `D`.
#[derive(Debug)]
pub struct Revolver<T, D> {
    items: Vec<T>,
    geometry: Geometry,
    center: LogicalIndex,
    viewport_width: Option<f64>,
    phase: Phase,
    spring: D,
    next_run: u64,
}

impl<T, D: SpringDriver> Revolver<T, D> {
    /// Build an engine centred on item 0.  Rejects an empty collection and
    /// degenerate geometry.
    pub fn new(items: Vec<T>, geometry: Geometry, spring: D) -> Result<Self, ConfigError> {
        if items.is_empty() {
            return Err(ConfigError::EmptyItems);
        }
        geometry.validate()?;
        Ok(Self {
            items,
            geometry,
            center: 0,
            viewport_width: None,
            phase: Phase::Idle,
            spring,
            next_run: 0,
        })
    }

    /// Replace the collection.  Any drag or settle is abandoned and the
    /// carousel returns to item 0; the measured viewport is kept.
    pub fn reset(&mut self, items: Vec<T>) -> Result<(), ConfigError> {
        if items.is_empty() {
            return Err(ConfigError::EmptyItems);
        }
        self.cancel_settle();
        self.items = items;
        self.center = 0;
        self.phase = Phase::Idle;
        tracing::debug!(len = self.items.len(), "items reset");
        Ok(())
    }

    // ── accessors ───────────────────────────────────────────────

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn pitch(&self) -> f64 {
        self.geometry.pitch()
    }

    /// The slot treated as resting.  Always in `[0, N)` once a settle has
    /// completed.
    pub fn center_index(&self) -> LogicalIndex {
        self.center
    }

    /// Item currently centred (or being settled from).
    pub fn center_item(&self) -> &T {
        self.item_at(self.center)
    }

    pub fn item_at(&self, index: LogicalIndex) -> &T {
        &self.items[wrap_index(index, self.items.len())]
    }

    pub fn viewport_width(&self) -> Option<f64> {
        self.viewport_width
    }

    pub fn state(&self) -> EngineState {
        match self.phase {
            Phase::Idle => EngineState::Idle,
            Phase::Dragging { .. } => EngineState::Dragging,
            Phase::Settling { .. } => EngineState::Settling,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Live pointer displacement, while dragging.
    pub fn drag_delta(&self) -> Option<f64> {
        match self.phase {
            Phase::Dragging { delta, .. } => Some(delta),
            _ => None,
        }
    }

    /// Slot the running settle will land on (before re-basing).
    pub fn settle_target(&self) -> Option<LogicalIndex> {
        match self.phase {
            Phase::Settling { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Offset applied to the whole strip.
    pub fn visual_offset(&self) -> f64 {
        match self.phase {
            Phase::Idle => self.resting_offset(),
            Phase::Dragging { baseline, delta } => baseline + delta,
            Phase::Settling { live, .. } => live,
        }
    }

    pub fn spring(&self) -> &D {
        &self.spring
    }

    /// The host pumps frames out of the driver through this.
    pub fn spring_mut(&mut self) -> &mut D {
        &mut self.spring
    }

    // ── gesture entry points ────────────────────────────────────

    /// Pointer went down.  Interrupts a running settle, continuing from the
    /// exact offset the spring had reached.
    pub fn on_gesture_start(&mut self) {
        let baseline = match self.phase {
            Phase::Idle => self.resting_offset(),
            // A lost release: continue from where the strip is now so the
            // new gesture's deltas apply without a jump.
            Phase::Dragging { baseline, delta } => {
                tracing::debug!(offset = baseline + delta, "gesture restarted mid-drag");
                baseline + delta
            }
            Phase::Settling { live, .. } => {
                self.cancel_settle();
                tracing::debug!(offset = live, "settle interrupted by new gesture");
                live
            }
        };
        self.phase = Phase::Dragging {
            baseline,
            delta: 0.0,
        };
        tracing::debug!(center = self.center, baseline, "drag started");
    }

    /// Cumulative displacement since the gesture began.
    pub fn on_gesture_update(&mut self, delta_x: f64) {
        if !delta_x.is_finite() {
            tracing::warn!(delta_x, "non-finite drag delta ignored");
            return;
        }
        match &mut self.phase {
            Phase::Dragging { delta, .. } => *delta = delta_x,
            _ => tracing::trace!(delta_x, "drag update outside a gesture ignored"),
        }
    }

    /// Pointer released: snap to the nearest slot and start settling.
    pub fn on_gesture_end(&mut self) {
        let Phase::Dragging { baseline, delta } = self.phase else {
            tracing::trace!("gesture end outside a gesture ignored");
            return;
        };
        let from = baseline + delta;
        let pitch = self.pitch();
        let target = nearest_index(from, pitch);
        let to = -(target as f64) * pitch;

        self.next_run += 1;
        let run = SpringRun(self.next_run);
        self.phase = Phase::Settling {
            run,
            target,
            live: from,
        };
        self.spring.start(run, from, to);
        tracing::debug!(from, to, target, run = run.0, "settling");
    }

    /// Apply one spring frame.  Frames from cancelled or finished runs are
    /// dropped.
    pub fn on_spring_frame(&mut self, frame: SpringFrame) {
        let Phase::Settling { run, target, .. } = self.phase else {
            tracing::trace!(run = frame.run.0, "spring frame while not settling dropped");
            return;
        };
        if frame.run != run {
            tracing::trace!(run = frame.run.0, active = run.0, "stale spring frame dropped");
            return;
        }
        if !frame.at_rest {
            if frame.value.is_finite() {
                self.phase = Phase::Settling {
                    run,
                    target,
                    live: frame.value,
                };
            }
            return;
        }

        // Re-base on every settle so the index space never drifts.
        let rebased = wrap_index(target, self.items.len()) as LogicalIndex;
        tracing::debug!(target, center = rebased, "settled");
        self.center = rebased;
        self.phase = Phase::Idle;
    }

    // ── viewport entry point ────────────────────────────────────

    /// The host measured a new viewport width.  Only the window length
    /// changes; centre, offset and state are untouched.
    pub fn on_viewport_width_changed(&mut self, width: f64) {
        if !width.is_finite() {
            tracing::warn!(width, "non-finite viewport width ignored");
            return;
        }
        let width = width.max(0.0);
        if self.viewport_width != Some(width) {
            tracing::debug!(width, "viewport resized");
            self.viewport_width = Some(width);
        }
    }

    // ── planning / projection ───────────────────────────────────

    /// Logical slots to realise.  The window follows the live offset, so it
    /// slides continuously while dragging and settling.
    pub fn window(&self) -> WindowPlan {
        let pitch = self.pitch();
        let center = nearest_index(self.visual_offset(), pitch);
        plan_window(self.viewport_width, pitch, center)
    }

    /// Read-only view for the presentation layer.
    pub fn snapshot<R>(&self, project: impl FnMut(&T, LogicalIndex) -> R) -> Snapshot<R> {
        let plan = self.window();
        Snapshot {
            window: projector::project(
                &self.items,
                &plan,
                self.visual_offset(),
                &self.geometry,
                project,
            ),
            is_dragging: self.is_dragging(),
        }
    }

    // ── internals ───────────────────────────────────────────────

    fn resting_offset(&self) -> f64 {
        -(self.center as f64) * self.pitch()
    }

    fn cancel_settle(&mut self) {
        if let Phase::Settling { run, .. } = self.phase {
            self.spring.cancel(run);
        }
    }
}
