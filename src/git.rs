//! # Git Module
//!
//! Repository inspection through the `git` CLI, one bounded subprocess per
//! question:
//!
//! - Current branch (`rev-parse --abbrev-ref HEAD`)
//! - Clean/dirty status (`status --porcelain`)
//! - Ahead/behind counts against the configured upstream
//!
//! The probes are independent. Each one that fails (not a repository, no
//! upstream, git missing, timeout) leaves only its own field unset.

use crate::models::git::GitInfo;
use crate::process::output_with_timeout;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

pub const BRANCH_TIMEOUT: Duration = Duration::from_millis(500);
pub const STATUS_TIMEOUT: Duration = Duration::from_millis(1000);
pub const AHEAD_BEHIND_TIMEOUT: Duration = Duration::from_millis(500);

fn git(dir: &Path, args: &[&str], timeout: Duration) -> Option<String> {
    let mut cmd = Command::new("git");
    cmd.arg("--no-optional-locks").args(args).current_dir(dir);
    output_with_timeout(&mut cmd, timeout)
}

/// Short name of the checked-out branch (`HEAD` when detached).
pub fn current_branch(dir: &Path) -> Option<String> {
    let out = git(dir, &["rev-parse", "--abbrev-ref", "HEAD"], BRANCH_TIMEOUT)?;
    let branch = out.trim();
    if branch.is_empty() {
        None
    } else {
        Some(branch.to_string())
    }
}

/// `Some(true)` when there are no staged, unstaged or untracked changes.
pub fn is_clean(dir: &Path) -> Option<bool> {
    let out = git(dir, &["status", "--porcelain"], STATUS_TIMEOUT)?;
    Some(out.trim().is_empty())
}

/// `(ahead, behind)` relative to `@{u}`.
pub fn ahead_behind(dir: &Path) -> Option<(usize, usize)> {
    let out = git(
        dir,
        &["rev-list", "--left-right", "--count", "@{u}...HEAD"],
        AHEAD_BEHIND_TIMEOUT,
    )?;
    parse_left_right(&out)
}

/// Parses `rev-list --left-right --count @{u}...HEAD`, which prints
/// `<behind>\t<ahead>`.
fn parse_left_right(out: &str) -> Option<(usize, usize)> {
    let mut parts = out.split_whitespace();
    let behind = parts.next()?.parse::<usize>().unwrap_or(0);
    let ahead = parts.next()?.parse::<usize>().unwrap_or(0);
    if parts.next().is_some() {
        return None;
    }
    Some((ahead, behind))
}

/// Runs the status probes for `dir`. The dirty and upstream probes are only
/// meaningful inside a repository, so they are skipped when no branch resolves.
pub fn read_git_info(dir: &Path) -> GitInfo {
    let mut info = GitInfo {
        branch: current_branch(dir),
        ..GitInfo::default()
    };
    if info.branch.is_none() {
        return info;
    }

    info.is_clean = is_clean(dir);
    if let Some((ahead, behind)) = ahead_behind(dir) {
        info.ahead = Some(ahead);
        info.behind = Some(behind);
    }
    info
}
