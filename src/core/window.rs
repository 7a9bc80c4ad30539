//! Window planning — which logical slots must be realised for a viewport.
//!
//! The strip is conceptually infinite, so rendering cost has to stay
//! O(visible items).  [`plan_window`] picks a contiguous run of logical
//! indices that covers the viewport plus overscan, and [`RenderSlots`] keeps
//! a fixed-length arena of rendered slots so that scrolling by one item only
//! rebuilds the slot that entered the band.
//!
//! Coordinates: the origin is the horizontal centre of the viewport.  Slot
//! `k` is centred at `pitch * k + offset`.

use super::wrap::{wrap_index, LogicalIndex};

// ───────────────────────────────────────── plan ──────────────

/// Contiguous run of logical indices to realise, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowPlan {
    /// Leftmost logical index in the run.
    pub first: LogicalIndex,
    /// Number of consecutive slots.  Zero while the viewport is unmeasured.
    pub len: usize,
}

impl WindowPlan {
    /// A plan that renders nothing.
    pub const EMPTY: WindowPlan = WindowPlan { first: 0, len: 0 };

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the rightmost logical index.
    pub fn end(&self) -> LogicalIndex {
        self.first.saturating_add(self.len as LogicalIndex)
    }

    /// Iterate the logical indices left to right.
    pub fn indices(&self) -> impl Iterator<Item = LogicalIndex> {
        self.first..self.end()
    }
}

/// Hard ceiling on the window length.  Only reached with degenerate
/// geometry (a pitch far below one pixel); the window then stops covering
/// the viewport instead of allocating without bound.
pub const MAX_WINDOW_LEN: usize = 4096;

/// Number of slots needed for `viewport_width`: every slot that can be on
/// screen, plus one of overscan on each edge.  Depends only on geometry.
pub fn visible_count(viewport_width: f64, pitch: f64) -> usize {
    debug_assert!(pitch > 0.0);
    let width = viewport_width.max(0.0);
    let on_screen = (width / pitch).ceil();
    if !on_screen.is_finite() || on_screen >= (MAX_WINDOW_LEN - 2) as f64 {
        return MAX_WINDOW_LEN;
    }
    on_screen as usize + 2
}

/// Plan the window around `center`.
///
/// Returns [`WindowPlan::EMPTY`] when the viewport has not been measured
/// yet; the planner never guesses a width.
pub fn plan_window(viewport_width: Option<f64>, pitch: f64, center: LogicalIndex) -> WindowPlan {
    let Some(width) = viewport_width else {
        return WindowPlan::EMPTY;
    };
    let len = visible_count(width, pitch);
    let half_span = (len / 2) as LogicalIndex;
    WindowPlan {
        first: center.saturating_sub(half_span),
        len,
    }
}

/// The logical slot whose resting position is closest to `offset`.
/// Ties round half away from zero.
pub fn nearest_index(offset: f64, pitch: f64) -> LogicalIndex {
    (-(offset / pitch)).round() as LogicalIndex
}

// ───────────────────────────────────────── slot arena ────────

/// Fixed-length arena of rendered slots keyed by `logical index mod len`.
///
/// Slots are rebuilt only when the logical index they hold leaves the
/// window; the arena is reallocated only when the window length changes
/// (i.e. on a viewport resize).
#[derive(Debug, Clone)]
pub struct RenderSlots<R> {
    slots: Vec<Option<(LogicalIndex, R)>>,
    rebuilt: usize,
}

impl<R> Default for RenderSlots<R> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            rebuilt: 0,
        }
    }
}

impl<R> RenderSlots<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the arena in line with `plan`, calling `build` only for logical
    /// indices that are not already held by their slot.
    pub fn sync(&mut self, plan: &WindowPlan, mut build: impl FnMut(LogicalIndex) -> R) {
        if self.slots.len() != plan.len {
            self.slots.clear();
            self.slots.resize_with(plan.len, || None);
        }
        self.rebuilt = 0;
        for index in plan.indices() {
            let slot = &mut self.slots[wrap_index(index, plan.len)];
            let fresh = matches!(slot, Some((held, _)) if *held == index);
            if !fresh {
                *slot = Some((index, build(index)));
                self.rebuilt += 1;
            }
        }
    }

    /// Number of slots rebuilt by the last [`sync`](Self::sync).
    pub fn rebuilt(&self) -> usize {
        self.rebuilt
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot contents for `index`, if the arena currently holds it.
    pub fn get(&self, index: LogicalIndex) -> Option<&R> {
        if self.slots.is_empty() {
            return None;
        }
        match &self.slots[wrap_index(index, self.slots.len())] {
            Some((held, value)) if *held == index => Some(value),
            _ => None,
        }
    }

    /// Slots in logical order for `plan` (the plan last passed to `sync`).
    pub fn ordered<'a>(
        &'a self,
        plan: &'a WindowPlan,
    ) -> impl Iterator<Item = (LogicalIndex, &'a R)> + 'a {
        plan.indices()
            .filter_map(move |index| self.get(index).map(|value| (index, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmeasured_viewport_renders_nothing() {
        let plan = plan_window(None, 100.0, 0);
        assert!(plan.is_empty());
        assert_eq!(plan.indices().count(), 0);
    }

    #[test]
    fn reference_example_window() {
        let plan = plan_window(Some(250.0), 100.0, 0);
        assert_eq!(plan.len, 5);
        assert_eq!(plan.indices().collect::<Vec<_>>(), vec![-2, -1, 0, 1, 2]);
    }

    #[test]
    fn zero_width_still_has_overscan() {
        let plan = plan_window(Some(0.0), 100.0, 7);
        assert_eq!(plan.len, 2);
        assert_eq!(plan.first, 6);
    }

    #[test]
    fn length_does_not_depend_on_center() {
        for center in [-1_000, -3, 0, 5, 99_999] {
            assert_eq!(plan_window(Some(333.0), 40.0, center).len, 11);
        }
    }

    #[test]
    fn window_covers_viewport_for_any_offset() {
        let pitch = 37.0;
        for width in [0.0, 1.0, 36.0, 37.0, 38.0, 100.0, 250.0, 999.5] {
            let mut offset = -500.0;
            while offset <= 500.0 {
                let center = nearest_index(offset, pitch);
                let plan = plan_window(Some(width), pitch, center);
                let left = pitch * plan.first as f64 + offset - pitch / 2.0;
                let right = pitch * (plan.end() - 1) as f64 + offset + pitch / 2.0;
                assert!(left <= -width / 2.0, "w={width} o={offset} left={left}");
                assert!(right >= width / 2.0, "w={width} o={offset} right={right}");
                offset += 3.25;
            }
        }
    }

    #[test]
    fn degenerate_geometry_is_capped() {
        assert_eq!(visible_count(f64::INFINITY, 100.0), MAX_WINDOW_LEN);
        assert_eq!(visible_count(1.0, 1e-300), MAX_WINDOW_LEN);
        assert_eq!(visible_count(f64::MAX, f64::MIN_POSITIVE), MAX_WINDOW_LEN);
        assert_eq!(visible_count(4093.0, 1.0), 4095);

        let plan = plan_window(Some(1.0), 1e-300, i64::MIN);
        assert_eq!(plan.len, MAX_WINDOW_LEN);
        assert_eq!(plan.first, i64::MIN);
        assert!(plan.end() > plan.first);
    }

    #[test]
    fn nearest_index_rounds_half_away_from_zero() {
        assert_eq!(nearest_index(0.0, 100.0), 0);
        assert_eq!(nearest_index(-140.0, 100.0), 1);
        assert_eq!(nearest_index(-150.0, 100.0), 2);
        assert_eq!(nearest_index(150.0, 100.0), -2);
        assert_eq!(nearest_index(-149.9, 100.0), 1);
        assert_eq!(nearest_index(49.0, 100.0), 0);
    }

    #[test]
    fn slots_are_reused_when_window_slides() {
        let mut slots = RenderSlots::new();
        let plan = plan_window(Some(250.0), 100.0, 0);
        slots.sync(&plan, |i| i * 10);
        assert_eq!(slots.rebuilt(), 5);

        slots.sync(&plan, |i| i * 10);
        assert_eq!(slots.rebuilt(), 0);

        let shifted = plan_window(Some(250.0), 100.0, 1);
        slots.sync(&shifted, |i| i * 10);
        assert_eq!(slots.rebuilt(), 1);
        assert_eq!(slots.get(3), Some(&30));
        assert_eq!(slots.get(-2), None);

        let ordered: Vec<_> = slots.ordered(&shifted).map(|(i, v)| (i, *v)).collect();
        assert_eq!(ordered, vec![(-1, -10), (0, 0), (1, 10), (2, 20), (3, 30)]);
    }

    #[test]
    fn slots_reallocate_on_length_change() {
        let mut slots = RenderSlots::new();
        slots.sync(&plan_window(Some(250.0), 100.0, 0), |i| i);
        assert_eq!(slots.len(), 5);
        slots.sync(&plan_window(Some(450.0), 100.0, 0), |i| i);
        assert_eq!(slots.len(), 7);
        assert_eq!(slots.rebuilt(), 7);
        slots.sync(&WindowPlan::EMPTY, |i| i);
        assert!(slots.is_empty());
    }
}
