//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes an engine snapshot and turns it into cells on the
//! terminal.  No engine state is mutated here.

pub mod carousel;
pub mod layout;
pub mod theme;
