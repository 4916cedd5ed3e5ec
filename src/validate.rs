use anyhow::Result;
use colored::Colorize;
use std::fmt;
use std::path::Path;

use crate::git::BranchSource;
use crate::message::MessageDraft;
use crate::subject::{self, SubjectShape};
use crate::ticket::Ticket;

/// Example line shown in format diagnostics.
pub const EXAMPLE: &str = "[HSC-23] feat: add login form";

/// Why a message was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accept {
    /// Only blank and comment lines.
    Empty,
    Exempt,
    /// Well-formed; the branch carries no ticket to compare against.
    FormatOnly,
    /// Well-formed and the ticket matches the branch.
    TicketMatches(Ticket),
}

/// Why a message was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reject {
    Format { line: String },
    TicketMismatch { branch: Ticket, message: Ticket },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(Accept),
    Rejected(Reject),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }
}

/// Gate a finalized commit message.
///
/// The first non-blank, non-comment line must be exempt (`Merge…`,
/// `Revert…`) or match `[TICKET] type: description`. When the branch
/// carries a ticket, the message ticket must equal it; an unknown branch
/// only skips that comparison.
pub fn validate(draft: &MessageDraft, branch: &dyn BranchSource) -> Verdict {
    let Some(line) = draft.first_meaningful_line() else {
        return Verdict::Accepted(Accept::Empty);
    };

    let message = match subject::parse(line) {
        SubjectShape::Exempt => return Verdict::Accepted(Accept::Exempt),
        SubjectShape::Composed { ticket } => ticket,
        SubjectShape::Bare { .. } | SubjectShape::Malformed => {
            return Verdict::Rejected(Reject::Format {
                line: line.to_string(),
            });
        }
    };

    let Some(branch) = branch
        .current_branch()
        .and_then(|b| Ticket::from_branch(b.trim()))
    else {
        return Verdict::Accepted(Accept::FormatOnly);
    };

    if branch != message {
        return Verdict::Rejected(Reject::TicketMismatch { branch, message });
    }
    Verdict::Accepted(Accept::TicketMatches(message))
}

impl fmt::Display for Reject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reject::Format { line } => write!(
                f,
                "commit message format violation: {line:?}\n\
                 Expected: [TICKET] <type>: <message>  (e.g. {EXAMPLE})"
            ),
            Reject::TicketMismatch { branch, message } => write!(
                f,
                "ticket mismatch: branch=\"{branch}\", message=\"{message}\""
            ),
        }
    }
}

/// Print the diagnostic for a rejection to stderr.
pub fn report(reject: &Reject) {
    eprintln!("{}", reject.to_string().red());
}

fn describe(accept: &Accept) -> String {
    match accept {
        Accept::Empty => "nothing to validate".to_string(),
        Accept::Exempt => "merge/revert commit".to_string(),
        Accept::FormatOnly => "format ok; no branch ticket to compare".to_string(),
        Accept::TicketMatches(t) => format!("format ok; ticket {t} matches branch"),
    }
}

/// Validate `draft` and print the outcome: diagnostics on rejection, the
/// acceptance reason only with `verbose`.
pub fn check(draft: &MessageDraft, branch: &dyn BranchSource, verbose: bool) -> Verdict {
    let verdict = validate(draft, branch);
    match &verdict {
        Verdict::Rejected(r) => report(r),
        Verdict::Accepted(a) => {
            if verbose {
                eprintln!("{}", format!("accepted: {}", describe(a)).dimmed());
            }
        }
    }
    verdict
}

/// `commit-msg` hook.
///
/// # Errors
/// Returns an error only if the message file cannot be read; a rejected
/// message is reported through the returned [`Verdict`].
pub fn cmd_commit_msg(path: &Path, branch: &dyn BranchSource, verbose: bool) -> Result<Verdict> {
    let draft = MessageDraft::read(path)?;
    Ok(check(&draft, branch, verbose))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn run(raw: &str, branch: Option<&str>) -> Verdict {
        validate(&MessageDraft::new(raw), &branch)
    }

    fn ticket(s: &str) -> Ticket {
        Ticket::from_branch(s).unwrap()
    }

    #[test]
    fn accepts_composed_subject() {
        assert_eq!(
            run("[HSC-23] feat: initialize", Some("feature/HSC-23")),
            Verdict::Accepted(Accept::TicketMatches(ticket("HSC-23")))
        );
    }

    #[test]
    fn rejects_subject_without_ticket() {
        assert_eq!(
            run("feat: no ticket\n", Some("feature/HSC-23")),
            Verdict::Rejected(Reject::Format {
                line: "feat: no ticket".to_string()
            })
        );
    }

    #[test]
    fn rejects_malformed_subjects() {
        for raw in [
            "Add login form",
            "[HSC-23]feat: x",
            "[HSC-23] Feat: x",
            "[HSC-23] feat:x",
            "[HSC-23] feat:",
            "HSC-23 feat: x",
        ] {
            assert!(!run(raw, None).is_accepted(), "subject {raw:?}");
        }
    }

    #[test]
    fn accepts_merge_and_revert_regardless_of_content() {
        for raw in ["Merge branch 'x' into y", "Revert \"whatever\"", "Mergefoo"] {
            assert_eq!(
                run(raw, Some("feature/HSC-23")),
                Verdict::Accepted(Accept::Exempt)
            );
        }
    }

    #[test]
    fn accepts_comment_only_message() {
        assert_eq!(
            run("\n# Please enter the commit message\n#\n\n", Some("HSC-1")),
            Verdict::Accepted(Accept::Empty)
        );
        assert_eq!(run("", None), Verdict::Accepted(Accept::Empty));
    }

    #[test]
    fn skips_comments_and_blanks_before_subject() {
        assert!(run("# comment\n\n  [HSC-23] fix: typo  \n", Some("HSC-23")).is_accepted());
        assert!(!run("# comment\n\nfix: typo\n", Some("HSC-23")).is_accepted());
    }

    #[test]
    fn rejects_ticket_mismatch() {
        assert_eq!(
            run("[HSC-23] feat: initialize", Some("feature/HSC-24")),
            Verdict::Rejected(Reject::TicketMismatch {
                branch: ticket("HSC-24"),
                message: ticket("HSC-23"),
            })
        );
    }

    #[test]
    fn accepts_when_branch_ticket_is_unresolvable() {
        for branch in [None, Some("main"), Some("HEAD"), Some("")] {
            assert_eq!(
                run("[HSC-23] feat: initialize", branch),
                Verdict::Accepted(Accept::FormatOnly),
                "branch {branch:?}"
            );
        }
    }

    #[test]
    fn hook_reads_message_file() {
        let td = tempdir().unwrap();
        let path = td.path().join("COMMIT_EDITMSG");
        fs::write(&path, "[HSC-23] feat: initialize\n\nbody\n").unwrap();
        let v = cmd_commit_msg(&path, &Some("feature/HSC-23-login"), false).unwrap();
        assert!(v.is_accepted());
    }

    #[test]
    fn format_diagnostic_names_line_and_example() {
        let msg = Reject::Format {
            line: "feat: no ticket".to_string(),
        }
        .to_string();
        assert!(msg.contains("\"feat: no ticket\""));
        assert!(msg.contains(EXAMPLE));
    }

    #[test]
    fn mismatch_diagnostic_names_both_tickets() {
        let msg = Reject::TicketMismatch {
            branch: ticket("HSC-24"),
            message: ticket("HSC-23"),
        }
        .to_string();
        assert!(msg.contains("branch=\"HSC-24\""));
        assert!(msg.contains("message=\"HSC-23\""));
    }

    #[test]
    fn hook_validates_latin1_message() {
        let td = tempdir().unwrap();
        let path = td.path().join("COMMIT_EDITMSG");
        fs::write(&path, b"[HSC-23] feat: add login\n\ncaf\xe9\n").unwrap();
        let v = cmd_commit_msg(&path, &Some("feature/HSC-23"), false).unwrap();
        assert!(v.is_accepted(), "{v:?}");

        fs::write(&path, b"feat: caf\xe9\n").unwrap();
        let v = cmd_commit_msg(&path, &Some("feature/HSC-23"), false).unwrap();
        assert!(!v.is_accepted());
    }

    #[test]
    fn hook_fails_when_message_file_is_missing() {
        let td = tempdir().unwrap();
        assert!(cmd_commit_msg(&td.path().join("nope"), &None::<&str>, false).is_err());
    }
}
