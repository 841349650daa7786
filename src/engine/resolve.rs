//! Field resolution by elimination.
//!
//! Every column of the valid tickets starts with a *candidate set*: the rules
//! that accept every value in that column. Columns then sit in a work queue:
//!
//! ```text
//! queue: [0, 1, 2, ...]
//!   pop column ──▶ remaining = candidates(column) - assigned
//!                    ├─ 0 names  -> Contradiction
//!                    ├─ 1 name   -> assign, name leaves every other set
//!                    └─ n names  -> push back, revisit next pass
//! ```
//!
//! Each assignment can shrink the remaining sets of the deferred columns, so
//! on well-formed input every pass makes progress and the queue drains. A
//! pass that assigns nothing would repeat forever, so it is reported as
//! [`ResolveError::Stalled`] instead.
//!
//! The order in which singleton columns are found within a pass does not
//! change the final assignment; only the recorded order differs.

use super::metrics::{PassMetrics, ResolutionMetrics};
use crate::{FieldAssignment, ResolveError, RuleSet};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// Index into `RuleSet` iteration order.
type RuleId = usize;

/// Assign every rule in `rules` to exactly one column of `tickets`.
///
/// `tickets` should already be filtered with
/// [`valid_tickets`](super::valid_tickets); a single invalid value would
/// remove the right rule from its column's candidate set.
pub fn resolve_fields<T: AsRef<[u64]>>(tickets: &[T], rules: &RuleSet) -> Result<FieldAssignment, ResolveError> {
    resolve_fields_with_metrics(tickets, rules).map(|(fields, _)| fields)
}

/// Same as [`resolve_fields`], also returning a per-pass trace.
pub fn resolve_fields_with_metrics<T: AsRef<[u64]>>(
    tickets: &[T],
    rules: &RuleSet,
) -> Result<(FieldAssignment, ResolutionMetrics), ResolveError> {
    let start = Instant::now();
    let mut metrics = ResolutionMetrics::default();

    let columns = column_count(tickets)?;
    if columns != rules.len() {
        warn!(columns, rules = rules.len(), "column count does not match rule count");
        return Err(ResolveError::ColumnCountMismatch { columns, rules: rules.len() });
    }

    let candidates_start = Instant::now();
    let candidates: Vec<Vec<RuleId>> = (0..columns).map(|column| column_candidates(tickets, rules, column)).collect();
    metrics.candidates = candidates_start.elapsed();

    let result = eliminate(rules, &candidates, &mut metrics.passes);
    metrics.total = start.elapsed();

    if let Err(err) = &result {
        warn!(%err, passes = metrics.passes.len(), "field resolution failed");
    }
    result.map(|fields| (fields, metrics))
}

/// Number of columns shared by all tickets.
fn column_count<T: AsRef<[u64]>>(tickets: &[T]) -> Result<usize, ResolveError> {
    let Some(first) = tickets.first() else {
        return Err(ResolveError::NoTickets);
    };
    let expected = first.as_ref().len();

    for (ticket, values) in tickets.iter().enumerate().skip(1) {
        let len = values.as_ref().len();
        if len != expected {
            return Err(ResolveError::RaggedTicket { ticket, len, expected });
        }
    }
    Ok(expected)
}

/// Rules that accept every value found in `column`.
fn column_candidates<T: AsRef<[u64]>>(tickets: &[T], rules: &RuleSet, column: usize) -> Vec<RuleId> {
    let ids: Vec<RuleId> = rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| tickets.iter().all(|ticket| rule.is_valid(ticket.as_ref()[column])))
        .map(|(id, _)| id)
        .collect();

    trace!(column, candidates = ?ids.iter().map(|&id| rule_name(rules, id)).collect::<Vec<_>>(), "column candidates");
    ids
}

fn rule_name(rules: &RuleSet, id: RuleId) -> &str {
    rules.iter().nth(id).map(|rule| rule.name()).unwrap_or("<unknown>")
}

/// Drain the column queue, one pass at a time, until every column is assigned.
fn eliminate(
    rules: &RuleSet,
    candidates: &[Vec<RuleId>],
    passes: &mut Vec<PassMetrics>,
) -> Result<FieldAssignment, ResolveError> {
    let names: Vec<&str> = rules.names().collect();
    let mut assigned = vec![false; names.len()];
    let mut fields = FieldAssignment::default();
    let mut queue: VecDeque<usize> = (0..candidates.len()).collect();

    while !queue.is_empty() {
        let pass_start = Instant::now();
        let mut pass = PassMetrics { pass: passes.len() + 1, ..PassMetrics::default() };

        for _ in 0..queue.len() {
            let Some(column) = queue.pop_front() else {
                break;
            };
            let remaining: Vec<RuleId> = candidates[column].iter().copied().filter(|&id| !assigned[id]).collect();

            match remaining.as_slice() {
                [] => return Err(ResolveError::Contradiction { column }),
                [id] => {
                    assigned[*id] = true;
                    fields.assign(names[*id], column);
                    pass.assigned.push((names[*id].to_string(), column));
                    debug!(pass = pass.pass, column, field = names[*id], "assigned field");
                }
                _ => {
                    trace!(pass = pass.pass, column, remaining = remaining.len(), "deferring ambiguous column");
                    pass.deferred.push(column);
                    queue.push_back(column);
                }
            }
        }

        pass.duration = pass_start.elapsed();
        let progressed = !pass.assigned.is_empty();
        passes.push(pass);

        if !progressed {
            let mut unresolved: Vec<usize> = queue.into_iter().collect();
            unresolved.sort_unstable();
            return Err(ResolveError::Stalled { unresolved });
        }
    }

    Ok(fields)
}
