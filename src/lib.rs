extern crate self as ticketfield;

#[macro_use]
mod macros;
mod api;
mod engine;
mod error;
mod input;


pub use api::{Analysis, AnalysisVerbose, DEPARTURE_PREFIX, Validation, analyze, analyze_verbose, validate};
pub use engine::{
    PassMetrics, ResolutionMetrics, error_rate, invalid_values, resolve_fields, resolve_fields_with_metrics,
    valid_tickets,
};
pub use error::{Error, ParseError, ResolveError};
pub use input::Notes;

// --- Core types ---------------------------------------------------------------

/// Inclusive range of accepted values.
///
/// `low <= high` is expected but not enforced; an inverted range accepts
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub low: u64,
    pub high: u64,
}

impl Range {
    pub fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: u64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// A named field rule: a value is valid if any of its ranges contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    name: String,
    ranges: Vec<Range>,
}

impl Rule {
    pub fn new(name: impl Into<String>, ranges: Vec<Range>) -> Self {
        Self { name: name.into(), ranges }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn is_valid(&self, value: u64) -> bool {
        self.ranges.iter().any(|range| range.contains(value))
    }
}

/// Name-keyed rules, iterated in insertion order.
///
/// Resolution scans rules in this order, so keeping it stable keeps the
/// resolver's trace reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `rule`, replacing (in place) any rule with the same name.
    pub fn insert(&mut self, rule: Rule) {
        match self.rules.iter_mut().find(|existing| existing.name == rule.name) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Rule::name)
    }

    /// True if at least one rule accepts `value`.
    pub fn is_valid(&self, value: u64) -> bool {
        self.rules.iter().any(|rule| rule.is_valid(value))
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for rule in iter {
            set.insert(rule);
        }
        set
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Field values of one ticket. Column `i` is the same field on every ticket.
pub type Ticket = Vec<u64>;

/// Rule name to column index, kept in the order the assignments were made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAssignment {
    entries: Vec<(String, usize)>,
}

impl FieldAssignment {
    pub(crate) fn assign(&mut self, name: &str, column: usize) {
        self.entries.push((name.to_string(), column));
    }

    /// Column holding the field called `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, column)| *column)
    }

    /// Field name resolved for `column`.
    pub fn name(&self, column: usize) -> Option<&str> {
        self.entries.iter().find(|(_, c)| *c == column).map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(name, column)` pairs in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, column)| (name.as_str(), *column))
    }

    /// Field names ordered by column.
    pub fn by_column(&self) -> Vec<(usize, &str)> {
        let mut v: Vec<(usize, &str)> = self.entries.iter().map(|(name, column)| (*column, name.as_str())).collect();
        v.sort_by_key(|(column, _)| *column);
        v
    }
}
