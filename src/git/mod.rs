//! Branch oracle and hooks-directory lookup.
//!
//! Both hooks ask one question of git: which branch is checked out. The
//! answer comes from `git2_backend`; `install` also asks it where hooks live.
//!
//! The hooks themselves only ever see the [`BranchSource`] trait, so tests
//! can hand them a fixed branch name instead of a repository.

mod git2_backend;

use std::path::PathBuf;

pub use git2_backend::{current_branch_at, current_branch_from_env, hooks_dir_at, hooks_dir_from_env};

/// Read-only query for the currently checked-out branch.
///
/// `None` means the information is unavailable: no repository, a detached
/// `HEAD`, or any git error.
pub trait BranchSource {
    fn current_branch(&self) -> Option<String>;
}

/// The repository git runs the hook in (`GIT_DIR`, or discovery from the
/// working directory).
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvRepo;

impl BranchSource for EnvRepo {
    fn current_branch(&self) -> Option<String> {
        current_branch_from_env().ok().flatten()
    }
}

/// The repository containing `path`.
#[derive(Debug, Clone)]
pub struct RepoAt(pub PathBuf);

impl BranchSource for RepoAt {
    fn current_branch(&self) -> Option<String> {
        current_branch_at(&self.0).ok().flatten()
    }
}

/// A fixed answer; `None` behaves like an unavailable repository.
impl BranchSource for Option<&str> {
    fn current_branch(&self) -> Option<String> {
        self.map(str::to_string)
    }
}
