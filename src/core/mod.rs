//! Carousel engine – index wrapping, window planning, drag tracking and
//! spring settling.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The host
//! feeds it gestures, spring frames and viewport widths, one at a time, and
//! reads back a [`Snapshot`](engine::Snapshot) to draw.

pub mod engine;
pub mod error;
pub mod gesture;
pub mod projector;
pub mod spring;
pub mod window;
pub mod wrap;
