use anyhow::Result;
use colored::Colorize;
use std::fmt;
use std::path::Path;

use crate::git::BranchSource;
use crate::message::MessageDraft;
use crate::subject::{self, SubjectShape};
use crate::ticket::Ticket;

/// Why the composer left a message alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    EmptySubject,
    ExemptSource(String),
    ExemptSubject,
    NoBranch,
    DetachedHead,
    NoTicketInBranch(String),
    AlreadyPrefixed(Ticket),
    NotTypeDescription,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::EmptySubject => write!(f, "empty subject line"),
            Skip::ExemptSource(s) => write!(f, "{s} commit"),
            Skip::ExemptSubject => write!(f, "merge/revert subject"),
            Skip::NoBranch => write!(f, "current branch unavailable"),
            Skip::DetachedHead => write!(f, "detached HEAD"),
            Skip::NoTicketInBranch(b) => write!(f, "no ticket in branch {b:?}"),
            Skip::AlreadyPrefixed(t) => write!(f, "subject already prefixed with [{t}]"),
            Skip::NotTypeDescription => write!(f, "subject is not `type: description`"),
        }
    }
}

/// Result of running the composer over a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composed {
    Rewritten(MessageDraft),
    Skipped(Skip),
}

const EXEMPT_SOURCES: &[&str] = &["merge", "squash"];

/// Prefix the subject line of `draft` with the branch ticket.
///
/// Pipeline (any failed step skips the rewrite):
/// 1. subject line must be non-blank
/// 2. `merge`/`squash` sources and `Merge…`/`Revert…` subjects are left alone
/// 3. the branch must be known and not detached
/// 4. the branch must carry a ticket
/// 5. the subject must not already start with `[TICKET] `
/// 6. the subject must look like `type: description`
///
/// The branch is only queried once steps 1 and 2 pass.
pub fn compose(draft: &MessageDraft, source: &str, branch: &dyn BranchSource) -> Composed {
    match rewrite(draft, source, branch) {
        Ok(d) => Composed::Rewritten(d),
        Err(skip) => Composed::Skipped(skip),
    }
}

fn rewrite(
    draft: &MessageDraft,
    source: &str,
    branch: &dyn BranchSource,
) -> Result<MessageDraft, Skip> {
    let subject = draft.subject().trim();
    if subject.is_empty() {
        return Err(Skip::EmptySubject);
    }
    if EXEMPT_SOURCES.contains(&source) {
        return Err(Skip::ExemptSource(source.to_string()));
    }
    if subject::is_exempt(subject) {
        return Err(Skip::ExemptSubject);
    }

    let ticket = branch_ticket(branch)?;
    if subject.starts_with(&ticket.prefix()) {
        return Err(Skip::AlreadyPrefixed(ticket));
    }

    let SubjectShape::Bare { kind, description } = subject::parse(subject) else {
        return Err(Skip::NotTypeDescription);
    };

    let mut out = draft.clone();
    out.replace_subject(&subject::compose(&ticket, kind, description));
    Ok(out)
}

fn branch_ticket(branch: &dyn BranchSource) -> Result<Ticket, Skip> {
    let name = branch
        .current_branch()
        .map(|b| b.trim().to_string())
        .filter(|b| !b.is_empty())
        .ok_or(Skip::NoBranch)?;
    if name == "HEAD" {
        return Err(Skip::DetachedHead);
    }
    Ticket::from_branch(&name).ok_or(Skip::NoTicketInBranch(name))
}

/// `prepare-commit-msg` hook.
///
/// Rewrites the message file in place when the composer applies and is
/// silent otherwise (the skip reason is printed with `verbose`).
///
/// # Errors
/// Returns an error only if the message file cannot be read or written.
pub fn cmd_prepare_commit_msg(
    path: &Path,
    source: &str,
    branch: &dyn BranchSource,
    verbose: bool,
) -> Result<()> {
    let draft = MessageDraft::read(path)?;
    match compose(&draft, source, branch) {
        Composed::Rewritten(out) => {
            out.write(path)?;
            if verbose {
                eprintln!("{} {}", "composed:".green(), out.subject());
            }
        }
        Composed::Skipped(skip) => {
            if verbose {
                eprintln!("{}", format!("skipped: {skip}").dimmed());
            }
        }
    }
    Ok(())
}
