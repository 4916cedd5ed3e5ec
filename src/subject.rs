//! Subject-line grammar shared by the composer and the validator.
//!
//! ```text
//! exempt_subject   := ("Merge" | "Revert") REST
//! bare_subject     := TYPE ":" WS+ DESC         ; TYPE = [a-z]+
//! composed_subject := "[" TICKET "]" WS+ TYPE ":" WS+ DESC
//! TICKET           := [A-Z]+ "-" [0-9]+
//! ```
//!
//! The composer accepts bare subjects loosely (whitespace around the colon
//! is optional); the validator only ever accepts the composed form.

use regex::Regex;
use std::sync::LazyLock;

use crate::ticket::Ticket;

static BARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([a-z]+)\s*:\s*(.+)$").unwrap());

static COMPOSED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[[A-Z]+-[0-9]+\]\s+[a-z]+:\s+.+$").unwrap());

const EXEMPT_MARKERS: &[&str] = &["Merge", "Revert"];

/// Parsed view of a subject line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectShape<'a> {
    /// Merge or revert commit; never rewritten, never rejected.
    Exempt,
    /// `type: description` without a ticket prefix.
    Bare { kind: &'a str, description: &'a str },
    /// `[TICKET] type: description`.
    Composed { ticket: Ticket },
    Malformed,
}

/// Whether a (trimmed) line starts with a merge/revert marker.
pub fn is_exempt(line: &str) -> bool {
    EXEMPT_MARKERS.iter().any(|m| line.starts_with(m))
}

/// Classify a subject line. Surrounding whitespace is ignored.
pub fn parse(line: &str) -> SubjectShape<'_> {
    let line = line.trim();
    if is_exempt(line) {
        return SubjectShape::Exempt;
    }
    if COMPOSED.is_match(line)
        && let Some(ticket) = Ticket::from_subject(line)
    {
        return SubjectShape::Composed { ticket };
    }
    if let Some(c) = BARE.captures(line) {
        let kind = c.get(1).map_or("", |m| m.as_str());
        let description = c.get(2).map_or("", |m| m.as_str().trim());
        if !description.is_empty() {
            return SubjectShape::Bare { kind, description };
        }
    }
    SubjectShape::Malformed
}

/// Render the canonical `[TICKET] type: description` line.
pub fn compose(ticket: &Ticket, kind: &str, description: &str) -> String {
    format!("{}{}: {}", ticket.prefix(), kind, description)
}
