//! Centralized limits and thresholds.
//!
//! Ancestor walks run over trees produced by error recovery, so every loop
//! that follows parent links is bounded by one of these constants.

/// Maximum number of parent links followed by a single ancestor walk.
///
/// A well-formed arena never comes close; the bound only matters when a
/// collaborator hands over a tree with a parent cycle.
pub const MAX_ANCESTOR_WALK: u32 = 4_096;

/// Maximum nesting depth for the recursive-descent parser.
///
/// Deeper constructs are skipped token by token instead of recursing.
pub const MAX_PARSE_DEPTH: u32 = 256;

/// Maximum pre-allocation for node pools in huge files.
pub const MAX_NODE_PREALLOC: usize = 1_000_000;
