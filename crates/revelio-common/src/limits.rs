//! Centralized limits and thresholds for type-parameter resolution.
//!
//! # Categories
//!
//! - **Operation Counts**: Limits to prevent infinite loops in iterative algorithms
//! - **Capacity Limits**: Pre-allocation sizes for short-lived collections

// =============================================================================
// Operation Counts
// =============================================================================

/// Minimum number of substitution steps allowed when composing bindings.
///
/// The effective cap for a single resolution is the length of the subject's
/// ancestry chain, but never less than this value. Every hop moves to a
/// binding recorded closer to the subject, so only a caller that reports a
/// chain shorter than the bindings it recorded can reach the cap.
pub const MAX_SUBSTITUTION_DEPTH: usize = 64;

/// Maximum number of classes merged into a single C3 linearization.
///
/// Registration rejects hierarchies above this size with an
/// inconsistent-hierarchy error rather than looping on pathological input.
pub const MAX_LINEARIZATION_LEN: usize = 4096;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Inline capacity for type-argument and type-parameter lists.
///
/// Almost every generic definition declares at most a handful of parameters,
/// so lists up to this size never touch the heap.
pub const INLINE_TYPE_ARGS: usize = 4;
