use anyhow::{Context, Result, bail};
use colored::Colorize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::git::hooks_dir_from_env;

/// Marker line identifying shims written by this command.
const MARKER: &str = "# installed by ticket-hooks";

/// Hook name and the subcommand its shim forwards to.
const HOOKS: &[(&str, &str)] = &[
    ("prepare-commit-msg", "prepare-commit-msg"),
    ("commit-msg", "commit-msg"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Created,
    Updated,
    Unchanged,
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

fn shim(exe: &Path, subcommand: &str) -> String {
    format!(
        "#!/bin/sh\n{MARKER}\nexec {} {} \"$@\"\n",
        shell_quote(&exe.to_string_lossy()),
        subcommand
    )
}

#[cfg(unix)]
fn make_executable(p: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perm = fs::metadata(p)?.permissions();
    perm.set_mode(0o755);
    fs::set_permissions(p, perm)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_p: &Path) -> Result<()> {
    Ok(())
}

/// Decide what writing `body` to `path` would do.
///
/// A hook not written by us is only replaced with `force`.
fn plan(path: &Path, body: &str, force: bool) -> Result<InstallOutcome> {
    match fs::read_to_string(path) {
        Ok(existing) if existing == body => Ok(InstallOutcome::Unchanged),
        Ok(existing) if existing.contains(MARKER) || force => Ok(InstallOutcome::Updated),
        Ok(_) => bail!(
            "{} exists and was not installed by ticket-hooks (use --force to replace it)",
            path.display()
        ),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(InstallOutcome::Created),
        Err(_) if force => Ok(InstallOutcome::Updated),
        Err(e) => Err(e).with_context(|| format!("failed to inspect {}", path.display())),
    }
}

/// Install `prepare-commit-msg` and `commit-msg` shims into `hooks_dir`,
/// each exec-ing `exe` with the matching subcommand.
///
/// # Errors
/// Returns an error if the directory cannot be created, a foreign hook is
/// in the way and `force` is not set, or writing a shim fails.
pub fn install(hooks_dir: &Path, exe: &Path, force: bool) -> Result<Vec<(PathBuf, InstallOutcome)>> {
    fs::create_dir_all(hooks_dir)
        .with_context(|| format!("failed to create {}", hooks_dir.display()))?;
    let mut planned = Vec::with_capacity(HOOKS.len());
    for (hook, subcommand) in HOOKS {
        let path = hooks_dir.join(hook);
        let body = shim(exe, subcommand);
        let outcome = plan(&path, &body, force)?;
        planned.push((path, body, outcome));
    }

    let mut done = Vec::with_capacity(planned.len());
    for (path, body, outcome) in planned {
        if outcome != InstallOutcome::Unchanged {
            fs::write(&path, &body)
                .with_context(|| format!("failed to write {}", path.display()))?;
            make_executable(&path)?;
        }
        done.push((path, outcome));
    }
    Ok(done)
}

/// CLI command: install the hook shims for the current repository.
///
/// `hooks_dir` overrides the directory git would use (`core.hooksPath` or
/// `<git-dir>/hooks`).
pub fn cmd_install(hooks_dir: Option<&Path>, force: bool) -> Result<()> {
    let dir = match hooks_dir {
        Some(d) => d.to_path_buf(),
        None => hooks_dir_from_env()?,
    };
    let exe = env::current_exe().context("failed to locate the ticket-hooks executable")?;
    for (path, outcome) in install(&dir, &exe, force)? {
        let label = match outcome {
            InstallOutcome::Created => "created",
            InstallOutcome::Updated => "updated",
            InstallOutcome::Unchanged => "unchanged",
        };
        println!("{} {}", format!("{label:>9}").green(), path.display());
    }
    Ok(())
}
