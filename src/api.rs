use crate::engine;
use crate::{Error, FieldAssignment, Notes, ResolutionMetrics, RuleSet, Ticket};
use tracing::{debug, info};

/// Fields whose names start with this prefix feed [`Analysis::departure_product`].
pub const DEPARTURE_PREFIX: &str = "departure";

/// Result of [`analyze`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    /// Sum of the nearby-ticket values that no rule accepts.
    pub error_rate: u64,
    /// Number of nearby tickets used for field resolution.
    pub valid_tickets: usize,
    /// Resolved rule name to column mapping.
    pub fields: FieldAssignment,
}

/// Result of [`analyze_verbose`].
#[derive(Debug, Clone)]
pub struct AnalysisVerbose {
    pub analysis: Analysis,
    pub metrics: ResolutionMetrics,
}

impl Analysis {
    /// Product of the `ticket` values in every column whose field name starts
    /// with [`DEPARTURE_PREFIX`]. No such field gives 1.
    pub fn departure_product(&self, ticket: &[u64]) -> Result<u64, Error> {
        self.prefix_product(ticket, DEPARTURE_PREFIX)
    }

    fn prefix_product(&self, ticket: &[u64], prefix: &'static str) -> Result<u64, Error> {
        let mut product: u64 = 1;
        for (name, column) in self.fields.iter().filter(|(name, _)| name.starts_with(prefix)) {
            let value = *ticket.get(column).ok_or(Error::MissingColumn { column })?;
            debug!(field = name, column, value, "departure field");
            product = product.checked_mul(value).ok_or(Error::Overflow { prefix })?;
        }
        Ok(product)
    }

    /// `ticket` decoded as `(field name, value)` pairs in column order.
    /// Columns without a resolved field are skipped.
    pub fn decode<'a>(&'a self, ticket: &[u64]) -> Vec<(&'a str, u64)> {
        self.fields
            .by_column()
            .into_iter()
            .filter_map(|(column, name)| ticket.get(column).map(|&value| (name, value)))
            .collect()
    }
}

/// Compute the error rate of the nearby tickets and resolve the fields from
/// the valid ones.
///
/// # Example
/// ```
/// use ticketfield::{Notes, analyze};
///
/// let notes: Notes = "\
/// class: 0-1 or 4-19
/// row: 0-5 or 8-19
/// seat: 0-13 or 16-19
///
/// your ticket:
/// 11,12,13
///
/// nearby tickets:
/// 3,9,18
/// 15,1,5
/// 5,14,9
/// "
/// .parse()
/// .unwrap();
///
/// let out = analyze(&notes).unwrap();
/// assert_eq!(out.error_rate, 0);
/// assert_eq!(out.fields.column("row"), Some(0));
/// assert_eq!(out.decode(&notes.your_ticket), vec![("row", 11), ("class", 12), ("seat", 13)]);
/// ```
pub fn analyze(notes: &Notes) -> Result<Analysis, Error> {
    analyze_verbose(notes).map(|verbose| verbose.analysis)
}

/// Same as [`analyze`], also returning the resolver's per-pass trace.
pub fn analyze_verbose(notes: &Notes) -> Result<AnalysisVerbose, Error> {
    validate(notes).resolve(&notes.rules)
}

/// Nearby tickets checked against the rules, before field resolution.
///
/// The error rate does not depend on resolution succeeding, so callers that
/// report it should take it from here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation<'a> {
    /// Sum of the nearby-ticket values that no rule accepts.
    pub error_rate: u64,
    /// Nearby tickets whose every value is accepted by some rule.
    pub valid_tickets: Vec<&'a Ticket>,
}

/// Compute the error rate and the valid nearby tickets of `notes`.
pub fn validate(notes: &Notes) -> Validation<'_> {
    let error_rate = engine::error_rate(&notes.nearby_tickets, &notes.rules);
    let valid_tickets = engine::valid_tickets(&notes.nearby_tickets, &notes.rules);
    info!(
        error_rate,
        valid = valid_tickets.len(),
        dropped = notes.nearby_tickets.len() - valid_tickets.len(),
        "validated nearby tickets"
    );

    Validation { error_rate, valid_tickets }
}

impl Validation<'_> {
    /// Resolve the fields of `rules` from the valid tickets.
    pub fn resolve(&self, rules: &RuleSet) -> Result<AnalysisVerbose, Error> {
        let (fields, metrics) = engine::resolve_fields_with_metrics(&self.valid_tickets, rules)?;
        info!(fields = fields.len(), passes = metrics.passes.len(), elapsed = ?metrics.total, "resolved fields");

        let analysis = Analysis { error_rate: self.error_rate, valid_tickets: self.valid_tickets.len(), fields };
        Ok(AnalysisVerbose { analysis, metrics })
    }
}
