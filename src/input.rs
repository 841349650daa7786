//! Notes parsing.
//!
//! The notes are three blocks of lines:
//!
//! ```text
//! class: 1-3 or 5-7          <- rules, one per line, up to a blank line
//! row: 6-11 or 33-44
//!
//! your ticket:               <- header + one comma-separated ticket
//! 7,1,14
//!
//! nearby tickets:            <- header + one ticket per line, up to a
//! 7,3,47                        blank line or end of input
//! 40,4,50
//! ```
//!
//! Sections are located by their header lines. Nothing beyond that is
//! checked: a rule line only has to look like `name: low-high or ...`, and
//! ticket widths are left to the resolver.

use crate::{ParseError, Range, Rule, RuleSet, Ticket};
use std::str::FromStr;
use tracing::debug;

const YOUR_TICKET_HEADER: &str = "your ticket:";
const NEARBY_TICKETS_HEADER: &str = "nearby tickets:";

bitflags::bitflags! {
    /// Sections found while scanning the notes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SectionSet: u8 {
        const RULES          = 1 << 0;
        const YOUR_TICKET    = 1 << 1;
        const NEARBY_TICKETS = 1 << 2;
    }
}

/// Parsed notes: the rules, your ticket and the nearby tickets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notes {
    pub rules: RuleSet,
    pub your_ticket: Ticket,
    pub nearby_tickets: Vec<Ticket>,
}

/// Header positions (0-based line indices) found by [`scan`].
struct Layout {
    sections: SectionSet,
    rules_end: usize,
    your_ticket: Option<usize>,
    nearby_tickets: Option<usize>,
}

impl Notes {
    /// Parse notes text.
    ///
    /// ```
    /// use ticketfield::Notes;
    ///
    /// let notes = Notes::parse("class: 1-3 or 5-7\n\nyour ticket:\n7\n\nnearby tickets:\n3\n9\n").unwrap();
    /// assert_eq!(notes.rules.len(), 1);
    /// assert_eq!(notes.your_ticket, vec![7]);
    /// assert_eq!(notes.nearby_tickets, vec![vec![3], vec![9]]);
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = text.split('\n').map(str::trim_end).collect();
        let layout = scan(&lines);
        debug!(sections = ?layout.sections, rule_lines = layout.rules_end, "scanned notes");

        let Some(your_header) = layout.your_ticket else {
            return Err(ParseError::MissingSection { header: YOUR_TICKET_HEADER });
        };
        let Some(nearby_header) = layout.nearby_tickets else {
            return Err(ParseError::MissingSection { header: NEARBY_TICKETS_HEADER });
        };

        let mut rules = RuleSet::new();
        for (idx, line) in lines[..layout.rules_end].iter().enumerate() {
            rules.insert(parse_rule(line, idx + 1)?);
        }

        let your_ticket = match lines.get(your_header + 1) {
            Some(line) if !line.is_empty() => parse_ticket(line, your_header + 2)?,
            _ => return Err(ParseError::MissingTicket { line: your_header + 2, header: YOUR_TICKET_HEADER }),
        };

        let mut nearby_tickets = Vec::new();
        for (idx, line) in lines.iter().enumerate().skip(nearby_header + 1) {
            if line.is_empty() {
                break;
            }
            nearby_tickets.push(parse_ticket(line, idx + 1)?);
        }

        debug!(rules = rules.len(), nearby = nearby_tickets.len(), "parsed notes");
        Ok(Notes { rules, your_ticket, nearby_tickets })
    }
}

impl FromStr for Notes {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Notes::parse(s)
    }
}

/// Find the end of the rules block and the two ticket headers.
fn scan(lines: &[&str]) -> Layout {
    let rules_end = lines
        .iter()
        .position(|line| line.is_empty() || *line == YOUR_TICKET_HEADER || *line == NEARBY_TICKETS_HEADER)
        .unwrap_or(lines.len());
    let your_ticket = lines.iter().position(|line| *line == YOUR_TICKET_HEADER);
    let nearby_tickets = lines.iter().position(|line| *line == NEARBY_TICKETS_HEADER);

    let mut sections = SectionSet::empty();
    sections.set(SectionSet::RULES, rules_end > 0);
    sections.set(SectionSet::YOUR_TICKET, your_ticket.is_some());
    sections.set(SectionSet::NEARBY_TICKETS, nearby_tickets.is_some());

    Layout { sections, rules_end, your_ticket, nearby_tickets }
}

/// Parse `name: a-b or c-d ...`.
fn parse_rule(line: &str, line_no: usize) -> Result<Rule, ParseError> {
    let malformed = || ParseError::MalformedRule { line: line_no, text: line.to_string() };

    let caps = regex!(r"^([^:]+):\s*(\S.*)$").captures(line).ok_or_else(malformed)?;
    let name = caps.get(1).map(|m| m.as_str().trim()).ok_or_else(malformed)?;
    let body = caps.get(2).map(|m| m.as_str()).ok_or_else(malformed)?;
    if name.is_empty() {
        return Err(malformed());
    }

    let ranges = regex!(r"\s+or\s+")
        .split(body)
        .map(|part| parse_range(part.trim(), line_no))
        .collect::<Result<Vec<Range>, ParseError>>()?;

    Ok(Rule::new(name, ranges))
}

/// Parse `low-high`.
fn parse_range(text: &str, line_no: usize) -> Result<Range, ParseError> {
    let caps = regex!(r"^(\d+)\s*-\s*(\d+)$")
        .captures(text)
        .ok_or_else(|| ParseError::MalformedRange { line: line_no, text: text.to_string() })?;

    let low = parse_number(&caps[1], line_no)?;
    let high = parse_number(&caps[2], line_no)?;
    Ok(Range::new(low, high))
}

/// Parse a comma-separated ticket line.
fn parse_ticket(line: &str, line_no: usize) -> Result<Ticket, ParseError> {
    line.split(',').map(|value| parse_number(value.trim(), line_no)).collect()
}

fn parse_number(text: &str, line_no: usize) -> Result<u64, ParseError> {
    text.parse::<u64>().map_err(|source| ParseError::InvalidNumber { line: line_no, text: text.to_string(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
class: 1-3 or 5-7
row: 6-11 or 33-44
seat: 13-40 or 45-50

your ticket:
7,1,14

nearby tickets:
7,3,47
40,4,50
55,2,20
38,6,12
";

    #[test]
    fn parses_all_three_sections() {
        let notes = Notes::parse(SAMPLE).unwrap();

        assert_eq!(notes.rules.names().collect::<Vec<_>>(), vec!["class", "row", "seat"]);
        assert_eq!(notes.rules.get("row").unwrap().ranges(), &[Range::new(6, 11), Range::new(33, 44)]);
        assert_eq!(notes.your_ticket, vec![7, 1, 14]);
        assert_eq!(notes.nearby_tickets.len(), 4);
        assert_eq!(notes.nearby_tickets[2], vec![55, 2, 20]);
    }

    #[test]
    fn accepts_names_with_spaces_and_crlf() {
        let text = "departure location: 25-80 or 90-961\r\n\r\nyour ticket:\r\n5\r\n\r\nnearby tickets:\r\n30\r\n";
        let notes: Notes = text.parse().unwrap();

        let rule = notes.rules.get("departure location").unwrap();
        assert!(rule.is_valid(961));
        assert!(!rule.is_valid(85));
        assert_eq!(notes.nearby_tickets, vec![vec![30]]);
    }

    #[test]
    fn nearby_section_ends_at_blank_line_or_eof() {
        let text = "a: 1-2\n\nyour ticket:\n1\n\nnearby tickets:\n1\n2\n\n3\n";
        assert_eq!(Notes::parse(text).unwrap().nearby_tickets, vec![vec![1], vec![2]]);

        let text = "a: 1-2\n\nyour ticket:\n1\n\nnearby tickets:\n1";
        assert_eq!(Notes::parse(text).unwrap().nearby_tickets, vec![vec![1]]);

        let text = "a: 1-2\n\nyour ticket:\n1\n\nnearby tickets:";
        assert!(Notes::parse(text).unwrap().nearby_tickets.is_empty());
    }

    #[test]
    fn scan_reports_found_sections() {
        let lines: Vec<&str> = SAMPLE.split('\n').collect();
        let layout = scan(&lines);
        assert_eq!(layout.sections, SectionSet::all());
        assert_eq!(layout.rules_end, 3);
        assert_eq!(layout.your_ticket, Some(4));
        assert_eq!(layout.nearby_tickets, Some(7));

        let lines = vec!["your ticket:", "1"];
        assert_eq!(scan(&lines).sections, SectionSet::YOUR_TICKET);
    }

    #[test]
    fn missing_headers_are_reported() {
        assert_eq!(
            Notes::parse("a: 1-2\n\nnearby tickets:\n1\n"),
            Err(ParseError::MissingSection { header: YOUR_TICKET_HEADER })
        );
        assert_eq!(
            Notes::parse("a: 1-2\n\nyour ticket:\n1\n"),
            Err(ParseError::MissingSection { header: NEARBY_TICKETS_HEADER })
        );
    }

    #[test]
    fn missing_reference_ticket_is_reported() {
        assert_eq!(
            Notes::parse("a: 1-2\n\nyour ticket:\n\nnearby tickets:\n1\n"),
            Err(ParseError::MissingTicket { line: 4, header: YOUR_TICKET_HEADER })
        );
    }

    #[test]
    fn malformed_rules_carry_line_numbers() {
        let err = Notes::parse("a: 1-2\nno colon here\n\nyour ticket:\n1\n\nnearby tickets:\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedRule { line: 2, .. }));

        let err = Notes::parse("a: 1-2 or x-4\n\nyour ticket:\n1\n\nnearby tickets:\n").unwrap_err();
        assert_eq!(err, ParseError::MalformedRange { line: 1, text: "x-4".to_string() });
    }

    #[test]
    fn unparsable_ticket_values_are_hard_errors() {
        let err = Notes::parse("a: 1-2\n\nyour ticket:\n1\n\nnearby tickets:\n1\n2,abc\n").unwrap_err();
        match err {
            ParseError::InvalidNumber { line, text, .. } => {
                assert_eq!(line, 8);
                assert_eq!(text, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = Notes::parse("a: 1-99999999999999999999\n\nyour ticket:\n1\n\nnearby tickets:\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 1, .. }));
    }
}
