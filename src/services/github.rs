use std::env;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::data::{GhPullRequest, GhRepoView, PullRequestRecord, RecordSet, Timestamp};
use crate::error::{Error, Result};

pub const GH_PROGRAM: &str = "gh";

/// Cap on open PRs requested per repository. Larger repos are truncated.
pub const DEFAULT_LIMIT: usize = 100;

const PR_FIELDS: &str = "number,reviewDecision,latestReviews,statusCheckRollup";

/// Source of PR records for a repository.
pub trait Fetcher {
    fn fetch(&self, key: &str) -> Result<RecordSet>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn fetch(&self, key: &str) -> Result<RecordSet> {
        (**self).fetch(key)
    }
}

/// Fetches PR status through the GitHub CLI.
#[derive(Debug, Clone)]
pub struct GhCli {
    program: String,
    limit: usize,
}

impl Default for GhCli {
    fn default() -> Self {
        Self {
            program: GH_PROGRAM.to_string(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl GhCli {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Runs `gh` with `args` and returns stdout, mapping every failure to
    /// [`Error::Fetch`] for `key`.
    fn run(&self, key: &str, args: &[&str]) -> Result<String> {
        let program = resolve_program(&self.program)?;
        tracing::debug!(program = %program.display(), ?args, "running gh");

        let output = Command::new(&program)
            .args(args)
            .output()
            .map_err(|e| fetch_error(key, format!("Failed to run {}: {}", self.program, e)))?;

        check_output(key, output)
    }

    /// Last-updated time of the repository as reported by GitHub.
    pub fn repository_updated_at(&self, key: &str) -> Result<Timestamp> {
        let stdout = self.run(key, &["repo", "view", key, "--json", "updatedAt"])?;
        let view: GhRepoView =
            serde_json::from_str(&stdout).map_err(|e| fetch_error(key, e.to_string()))?;
        Timestamp::parse(&view.updated_at).map_err(|e| {
            fetch_error(
                key,
                format!("Invalid updatedAt {:?}: {}", view.updated_at, e),
            )
        })
    }
}

impl Fetcher for GhCli {
    fn fetch(&self, key: &str) -> Result<RecordSet> {
        let limit = self.limit.to_string();
        let stdout = self.run(
            key,
            &[
                "pr", "list", "--repo", key, "--state", "open", "--limit", &limit, "--json",
                PR_FIELDS,
            ],
        )?;

        let records = parse_pr_list(&stdout).map_err(|e| fetch_error(key, e.to_string()))?;
        tracing::info!(repo = key, count = records.len(), "fetched pull requests");
        if records.len() >= self.limit {
            tracing::debug!(repo = key, limit = self.limit, "result cap reached");
        }
        Ok(records)
    }
}

fn fetch_error(key: &str, message: impl Into<String>) -> Error {
    Error::Fetch {
        key: key.to_string(),
        message: message.into(),
    }
}

fn check_output(key: &str, output: Output) -> Result<String> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("gh exited with {}", output.status)
        } else {
            stderr
        };
        return Err(fetch_error(key, message));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Decode a `gh pr list --json` array. Later duplicates of a number win.
pub fn parse_pr_list(json: &str) -> serde_json::Result<RecordSet> {
    let prs: Vec<GhPullRequest> = serde_json::from_str(json)?;
    Ok(prs
        .into_iter()
        .map(PullRequestRecord::from)
        .map(|record| (record.number, record))
        .collect())
}

/// Locate `program` either as an explicit path or on `PATH`.
pub fn resolve_program(program: &str) -> Result<PathBuf> {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return if is_executable_file(path) {
            Ok(path.to_path_buf())
        } else {
            Err(Error::ToolNotFound(program.to_string()))
        };
    }

    env::var_os("PATH")
        .and_then(|paths| {
            env::split_paths(&paths)
                .flat_map(|dir| candidates(&dir, program))
                .find(|candidate| is_executable_file(candidate))
        })
        .ok_or_else(|| Error::ToolNotFound(program.to_string()))
}

fn candidates(dir: &Path, program: &str) -> Vec<PathBuf> {
    let mut found = vec![dir.join(program)];
    if cfg!(windows) {
        found.push(dir.join(format!("{}.exe", program)));
    }
    found
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}
