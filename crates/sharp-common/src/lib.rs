//! Common types and utilities for the sharp completion engine.
//!
//! This crate provides foundational types used across all sharp crates:
//! - Cooperative cancellation (`CancellationToken`, `Cancelled`)
//! - Centralized limits for tree walks and parser recursion
//! - Byte spans for source locations

// Cooperative cancellation threaded through every request
pub mod cancellation;
pub use cancellation::{CancellationToken, Cancelled};

// Centralized limits and thresholds
pub mod limits;

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;
