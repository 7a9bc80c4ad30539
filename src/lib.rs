//! An infinitely wrapping, drag-to-spin carousel ("revolver").
//!
//! The [`core`] module is the engine and has no terminal dependencies.  The
//! [`app`], [`ui`] and [`config`] modules host it in a terminal.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;

pub use crate::core::engine::{EngineState, Geometry, Revolver, Snapshot};
pub use crate::core::error::ConfigError;
pub use crate::core::gesture::{GestureEvent, GestureTranslator};
pub use crate::core::projector::Placement;
pub use crate::core::spring::{PhysicsSpring, SpringConfig, SpringDriver, SpringFrame, SpringRun};
pub use crate::core::window::{plan_window, RenderSlots, WindowPlan};
pub use crate::core::wrap::{wrap_index, LogicalIndex};
