//! Resolution metrics.
//!
//! Opt-in trace of a resolver run, collected by
//! [`resolve_fields_with_metrics`](super::resolve_fields_with_metrics). The
//! plain [`resolve_fields`](super::resolve_fields) path skips it.
//!
//! A *pass* visits every column that was queued when the pass started. On
//! well-formed input each pass assigns at least one field; the resolver stops
//! with `ResolveError::Stalled` as soon as one does not.

use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct ResolutionMetrics {
    /// Total elapsed time, including candidate computation.
    pub total: Duration,
    /// Time spent computing the per-column candidate sets.
    pub candidates: Duration,
    /// One entry per pass over the queue.
    pub passes: Vec<PassMetrics>,
}

/// What one pass over the queue did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PassMetrics {
    /// 1-based pass number.
    pub pass: usize,
    pub duration: Duration,
    /// `(name, column)` assignments made in this pass, in order.
    pub assigned: Vec<(String, usize)>,
    /// Columns re-queued because more than one candidate remained.
    pub deferred: Vec<usize>,
}
