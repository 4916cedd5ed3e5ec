use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::git::BranchSource;

/// A ticket segment in a branch name: start of string or after a `/`,
/// followed by end of string or a `-`/`/` separator.
static BRANCH_TICKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|/)([A-Z]+-[0-9]+)(?:$|[-/].*)").unwrap());

/// The ticket inside the leading brackets of a subject line.
static MESSAGE_TICKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([A-Z]+-[0-9]+)\]").unwrap());

/// An issue-tracker identifier such as `HSC-23`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket(String);

impl Ticket {
    /// Extract the ticket embedded in a branch name.
    ///
    /// Recognized layouts:
    /// - `HSC-23`
    /// - `feature/HSC-23`
    /// - `feature/HSC-23-login`
    /// - `HSC-23/login`
    ///
    /// Only the leftmost matching segment is used.
    pub fn from_branch(branch: &str) -> Option<Ticket> {
        BRANCH_TICKET
            .captures(branch)
            .map(|c| Ticket(c[1].to_string()))
    }

    /// Extract the ticket from a `[TICKET] ...` subject line.
    pub fn from_subject(line: &str) -> Option<Ticket> {
        MESSAGE_TICKET
            .captures(line)
            .map(|c| Ticket(c[1].to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `[TICKET] ` prefix that composed subject lines start with.
    pub fn prefix(&self) -> String {
        format!("[{}] ", self.0)
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// CLI command: print the ticket of the current branch.
///
/// Returns `false` (nothing printed on stdout) when the branch is unknown or
/// carries no ticket.
pub fn cmd_ticket(branch: &dyn BranchSource) -> bool {
    match branch.current_branch().and_then(|b| Ticket::from_branch(b.trim())) {
        Some(t) => {
            println!("{t}");
            true
        }
        None => {
            eprintln!("no ticket in current branch");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(b: &str) -> Option<String> {
        Ticket::from_branch(b).map(|t| t.to_string())
    }

    #[test]
    fn extracts_ticket_from_prefixed_branch() {
        assert_eq!(branch("feature/HSC-23-login").as_deref(), Some("HSC-23"));
        assert_eq!(branch("feature/HSC-23").as_deref(), Some("HSC-23"));
        assert_eq!(branch("fix/ABC-7/retry").as_deref(), Some("ABC-7"));
    }

    #[test]
    fn extracts_ticket_from_bare_branch() {
        assert_eq!(branch("HSC-23").as_deref(), Some("HSC-23"));
        assert_eq!(branch("HSC-23-login").as_deref(), Some("HSC-23"));
    }

    #[test]
    fn uses_leftmost_ticket_segment() {
        assert_eq!(branch("FOO-1/BAR-2").as_deref(), Some("FOO-1"));
    }

    #[test]
    fn ignores_branches_without_ticket_segment() {
        for b in [
            "main",
            "develop",
            "feature/login",
            "feature/hsc-23",
            "featureHSC-23",
            "feature/HSC-23x",
            "feature/HSC-",
            "feature/-23",
            "",
        ] {
            assert_eq!(branch(b), None, "branch {b:?}");
        }
    }

    #[test]
    fn subject_ticket_must_lead_the_line() {
        let t = Ticket::from_subject("[HSC-23] feat: initialize").unwrap();
        assert_eq!(t.as_str(), "HSC-23");
        assert!(Ticket::from_subject("feat: [HSC-23] initialize").is_none());
        assert!(Ticket::from_subject("[hsc-23] feat: initialize").is_none());
    }

    #[test]
    fn cmd_ticket_reports_whether_a_ticket_was_found() {
        assert!(cmd_ticket(&Some("feature/HSC-23-login")));
        assert!(!cmd_ticket(&Some("main")));
        assert!(!cmd_ticket(&None::<&str>));
    }

    #[test]
    fn prefix_is_bracketed_with_trailing_space() {
        let t = Ticket::from_branch("HSC-23").unwrap();
        assert_eq!(t.prefix(), "[HSC-23] ");
    }
}
