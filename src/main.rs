//! # ticket-hooks
//!
//! Git hooks keeping commit subjects in the `[TICKET] type: description`
//! form, with the ticket taken from the branch name.
//!
//! - `ticket-hooks prepare-commit-msg <file> [source] [sha]` prefixes
//!   `type: description` subjects with the branch ticket
//! - `ticket-hooks commit-msg <file>` rejects malformed or mismatched subjects
//! - `ticket-hooks check <message>` validates a message given inline
//! - `ticket-hooks ticket` prints the current branch's ticket
//! - `ticket-hooks install` writes both hook shims into the repository
//!
//! This CLI is built with [clap](https://docs.rs/clap).

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use ticket_hooks::{
    EnvRepo, MessageDraft, check, cmd_commit_msg, cmd_install, cmd_prepare_commit_msg, cmd_ticket,
};

/// Command-line interface definition.
#[derive(Parser, Debug)]
#[command(
    name = "ticket-hooks",
    version,
    about = "git hooks tying commit messages to the ticket in the branch name",
    arg_required_else_help = true
)]
struct Cli {
    /// Explain skipped rewrites and accepted messages on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// prepare-commit-msg hook: prefix the subject with the branch ticket
    PrepareCommitMsg {
        /// Path to the commit message file
        file: PathBuf,
        /// What triggered the commit (message, template, merge, squash, commit)
        #[arg(default_value = "")]
        source: String,
        /// Commit being reused with -c/-C/--amend (ignored)
        #[arg(value_name = "SHA")]
        _sha: Option<String>,
    },
    /// commit-msg hook: reject messages not in `[TICKET] type: description` form
    CommitMsg {
        /// Path to the commit message file
        file: PathBuf,
    },
    /// Validate a commit message given on the command line
    Check {
        /// The full commit message
        message: String,
    },
    /// Print the ticket of the current branch
    Ticket,
    /// Install the prepare-commit-msg and commit-msg hooks
    Install {
        /// Replace existing hooks not installed by ticket-hooks
        #[arg(long)]
        force: bool,
        /// Install into this directory instead of the repository's hooks directory
        #[arg(long)]
        hooks_dir: Option<PathBuf>,
    },
}

fn exit_code(ok: bool) -> ExitCode {
    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// CLI entry point.
fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let branch = EnvRepo;

    match cli.cmd {
        Cmd::PrepareCommitMsg { file, source, .. } => {
            cmd_prepare_commit_msg(&file, &source, &branch, cli.verbose)?;
            Ok(ExitCode::SUCCESS)
        }
        Cmd::CommitMsg { file } => {
            let verdict = cmd_commit_msg(&file, &branch, cli.verbose)?;
            Ok(exit_code(verdict.is_accepted()))
        }
        Cmd::Check { message } => {
            let verdict = check(&MessageDraft::new(message), &branch, cli.verbose);
            Ok(exit_code(verdict.is_accepted()))
        }
        Cmd::Ticket => Ok(exit_code(cmd_ticket(&branch))),
        Cmd::Install { force, hooks_dir } => {
            cmd_install(hooks_dir.as_deref(), force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
