//! Construction-time contract violations.
//!
//! The engine never fails at runtime: once a [`Revolver`](super::engine::Revolver)
//! exists every transition is total. Everything that could make the geometry
//! or the index space meaningless is rejected here instead.

use thiserror::Error;

/// Reasons a carousel cannot be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("carousel needs at least one item")]
    EmptyItems,
    #[error("item width must be a finite number greater than zero (got {0})")]
    NonPositiveItemWidth(f64),
    #[error("item height must be a finite, non-negative number (got {0})")]
    NegativeItemHeight(f64),
    #[error("items gap must be a finite, non-negative number (got {0})")]
    NegativeItemsGap(f64),
}
