//! Crate entry point for **ticket-hooks**.
//!
//! Git commit hooks tying commit messages to the ticket in the branch name:
//! - `prepare-commit-msg` turns `feat: add login` into
//!   `[HSC-23] feat: add login` on branch `feature/HSC-23-login`
//! - `commit-msg` rejects anything that is not `[TICKET] type: description`
//!   (merge and revert commits excepted) or whose ticket differs from the
//!   branch's
//!
//! The parsing and rewriting functions are pure; git and file I/O stay in
//! the `cmd_*` functions.

mod compose;
mod git;
mod install;
mod message;
mod subject;
mod ticket;
mod validate;

pub use compose::{Composed, Skip, cmd_prepare_commit_msg, compose};
pub use git::{BranchSource, EnvRepo, RepoAt, hooks_dir_at};
pub use install::{InstallOutcome, cmd_install, install};
pub use message::MessageDraft;
pub use ticket::{Ticket, cmd_ticket};
pub use validate::{Accept, Reject, Verdict, check, cmd_commit_msg, validate};
