use anyhow::{Context, Result};
use git2::Repository;
use std::path::{Path, PathBuf};

/// Name of the branch `HEAD` points at, as `git branch --show-current`
/// reports it.
///
/// `HEAD` is read as a symbolic reference rather than peeled, so an unborn
/// branch (fresh repository, first commit) still yields its name.
/// A detached `HEAD` yields `None`.
fn branch_of(repo: &Repository) -> Result<Option<String>> {
    let head = repo.find_reference("HEAD").context("read HEAD")?;
    let branch = head
        .symbolic_target()
        .and_then(|t| t.strip_prefix("refs/heads/"))
        .map(str::to_string);
    Ok(branch)
}

/// Current branch of the repository git invoked the hook for.
///
/// Honours `GIT_DIR` and friends, falling back to discovery from the
/// working directory.
///
/// # Errors
/// Returns an error if no repository can be opened or `HEAD` is unreadable.
pub fn current_branch_from_env() -> Result<Option<String>> {
    let repo = Repository::open_from_env().context("open repository from environment")?;
    branch_of(&repo)
}

/// Current branch of the repository containing `path`.
///
/// # Errors
/// Returns an error if no repository is found or `HEAD` is unreadable.
pub fn current_branch_at(path: &Path) -> Result<Option<String>> {
    let repo = Repository::discover(path)
        .with_context(|| format!("no git repository at {}", path.display()))?;
    branch_of(&repo)
}

/// Directory git runs hooks from.
///
/// `core.hooksPath` wins when set (relative values resolve against the
/// working tree, as git does); otherwise `<git-dir>/hooks`.
fn hooks_dir(repo: &Repository) -> Result<PathBuf> {
    let cfg = repo.config()?;
    if let Ok(custom) = cfg.get_path("core.hooksPath") {
        if custom.is_absolute() {
            return Ok(custom);
        }
        let base = repo.workdir().unwrap_or_else(|| repo.path());
        return Ok(base.join(custom));
    }
    Ok(repo.path().join("hooks"))
}

/// Hooks directory of the repository git would pick for the current
/// environment.
///
/// # Errors
/// Returns an error if no repository can be opened or its config is
/// unreadable.
pub fn hooks_dir_from_env() -> Result<PathBuf> {
    let repo = Repository::open_from_env().context("open repository from environment")?;
    hooks_dir(&repo)
}

/// Hooks directory of the repository containing `path`.
///
/// # Errors
/// Returns an error if no repository is found or its config is unreadable.
pub fn hooks_dir_at(path: &Path) -> Result<PathBuf> {
    let repo = Repository::discover(path)
        .with_context(|| format!("no git repository at {}", path.display()))?;
    hooks_dir(&repo)
}
