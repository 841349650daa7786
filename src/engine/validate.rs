//! Ticket validation.
//!
//! A value is *invalid* when no rule in the set accepts it. Validation does
//! not care which rule accepts a value, only whether one does; which rule
//! belongs to which column is the resolver's job (see `resolve.rs`).
//!
//! Both operations borrow their inputs and never modify them:
//!
//! ```text
//! tickets ──┬─ error_rate    -> sum of invalid values
//!           └─ valid_tickets -> tickets with no invalid value
//! ```

use crate::{RuleSet, Ticket};
use tracing::trace;

/// Values in `ticket` that no rule accepts, in column order.
pub fn invalid_values<'a>(ticket: &'a [u64], rules: &'a RuleSet) -> impl Iterator<Item = u64> + 'a {
    ticket.iter().copied().filter(move |&value| !rules.is_valid(value))
}

/// Sum of every value, across all `tickets`, that no rule accepts.
///
/// An empty ticket list (or a list of empty tickets) has an error rate of 0.
/// The sum saturates at `u64::MAX`.
pub fn error_rate(tickets: &[Ticket], rules: &RuleSet) -> u64 {
    tickets.iter().flat_map(|ticket| invalid_values(ticket, rules)).fold(0, u64::saturating_add)
}

/// Tickets whose every value is accepted by at least one rule.
///
/// A ticket with a single invalid value is dropped whole.
pub fn valid_tickets<'a>(tickets: &'a [Ticket], rules: &RuleSet) -> Vec<&'a Ticket> {
    tickets
        .iter()
        .enumerate()
        .filter(|(idx, ticket)| {
            let valid = ticket.iter().all(|&value| rules.is_valid(value));
            if !valid {
                trace!(ticket = idx, values = ?ticket, "dropping invalid ticket");
            }
            valid
        })
        .map(|(_, ticket)| ticket)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_rules() -> RuleSet {
        vec![rule!("class": 1..=3, 5..=7), rule!("row": 6..=11, 33..=44), rule!("seat": 13..=40, 45..=50)]
            .into_iter()
            .collect()
    }

    fn sample_tickets() -> Vec<Ticket> {
        vec![vec![7, 3, 47], vec![40, 4, 50], vec![55, 2, 20], vec![38, 6, 12]]
    }

    #[test]
    fn error_rate_sums_invalid_values() {
        assert_eq!(error_rate(&sample_tickets(), &sample_rules()), 4 + 55 + 12);
    }

    #[test]
    fn error_rate_of_nothing_is_zero() {
        assert_eq!(error_rate(&[], &sample_rules()), 0);
        assert_eq!(error_rate(&[vec![], vec![]], &sample_rules()), 0);
    }

    #[test]
    fn error_rate_saturates_instead_of_overflowing() {
        let rules: RuleSet = vec![rule!("a": 1..=2)].into_iter().collect();
        assert_eq!(error_rate(&[vec![u64::MAX, 5]], &rules), u64::MAX);
        assert_eq!(error_rate(&[vec![u64::MAX - 10], vec![4, 1]], &rules), u64::MAX - 6);
    }

    #[test]
    fn invalid_values_lists_offenders_in_order() {
        let rules = sample_rules();
        assert_eq!(invalid_values(&[4, 12, 7, 99], &rules).collect::<Vec<_>>(), vec![4, 12, 99]);
    }

    #[test]
    fn ticket_with_one_bad_value_is_dropped_entirely() {
        let tickets = sample_tickets();
        let valid = valid_tickets(&tickets, &sample_rules());
        assert_eq!(valid, vec![&tickets[0]]);
    }

    #[test]
    fn empty_ticket_is_trivially_valid() {
        let tickets: Vec<Ticket> = vec![vec![]];
        assert_eq!(valid_tickets(&tickets, &sample_rules()).len(), 1);
    }

    fn arb_tickets() -> impl Strategy<Value = Vec<Ticket>> {
        prop::collection::vec(prop::collection::vec(0u64..60, 0..5), 0..8)
    }

    proptest! {
        #[test]
        fn error_rate_is_additive(a in arb_tickets(), b in arb_tickets()) {
            let rules = sample_rules();
            let joined: Vec<Ticket> = a.iter().chain(b.iter()).cloned().collect();
            prop_assert_eq!(error_rate(&joined, &rules), error_rate(&a, &rules) + error_rate(&b, &rules));
        }

        #[test]
        fn valid_tickets_is_idempotent(tickets in arb_tickets()) {
            let rules = sample_rules();
            let once: Vec<Ticket> = valid_tickets(&tickets, &rules).into_iter().cloned().collect();
            let twice: Vec<Ticket> = valid_tickets(&once, &rules).into_iter().cloned().collect();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn rule_set_validity_matches_ranges(value in 0u64..60) {
            let rules = sample_rules();
            let expected = rules.iter().any(|rule| rule.ranges().iter().any(|r| r.low <= value && value <= r.high));
            prop_assert_eq!(rules.is_valid(value), expected);
        }
    }
}
