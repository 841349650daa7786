//! Validation and field-resolution engine.
//!
//! Everything in here is a pure function over in-memory rules and tickets; no
//! file system, no process state. The pipeline is:
//!
//! ```text
//! nearby tickets ──┬─ error_rate              (validate.rs)
//!                  │
//!                  └─ valid_tickets ──────────  (validate.rs)
//!                           │
//!                           v
//!                  resolve_fields             (resolve.rs)
//!                    - candidate set per column
//!                    - queue of columns, one pass at a time
//!                    - assign singletons, defer the rest
//!                           │
//!                           v
//!                    FieldAssignment (+ ResolutionMetrics, metrics.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `validate.rs`: error rate and valid-ticket filtering.
//! - `resolve.rs`: elimination over the column queue, with an explicit
//!   progress guard.
//! - `metrics.rs`: optional per-pass trace of a resolution run.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=ticketfield=debug` to log each assignment, or
//! `RUST_LOG=ticketfield=trace` to also see candidate sets, deferrals and
//! dropped tickets.

#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/validate.rs"]
mod validate;

pub use metrics::{PassMetrics, ResolutionMetrics};
pub use resolve::{resolve_fields, resolve_fields_with_metrics};
pub use validate::{error_rate, invalid_values, valid_tickets};
