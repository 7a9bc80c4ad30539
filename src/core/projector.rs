//! Window → positioned items.

use super::engine::Geometry;
use super::window::WindowPlan;
use super::wrap::{wrap_index, LogicalIndex};

/// One item placed on the strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<R> {
    pub logical_index: LogicalIndex,
    /// Centre of the item relative to the viewport centre.
    pub pixel_x: f64,
    /// Left edge (`pixel_x - item_width / 2`).
    pub left: f64,
    /// Caller's projection of the item.
    pub node: R,
}

/// Position every slot of `plan` for the given strip offset.
///
/// `node_for` receives the wrapped item and its logical index and must be
/// pure; it is called once per slot, left to right.
pub fn project<T, R>(
    items: &[T],
    plan: &WindowPlan,
    offset: f64,
    geometry: &Geometry,
    mut node_for: impl FnMut(&T, LogicalIndex) -> R,
) -> Vec<Placement<R>> {
    if items.is_empty() {
        return Vec::new();
    }
    let pitch = geometry.pitch();
    plan.indices()
        .map(|logical_index| {
            let pixel_x = pitch * logical_index as f64 + offset;
            Placement {
                logical_index,
                pixel_x,
                left: pixel_x - geometry.item_width / 2.0,
                node: node_for(&items[wrap_index(logical_index, items.len())], logical_index),
            }
        })
        .collect()
}
