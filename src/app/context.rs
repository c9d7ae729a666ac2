use crate::data::{ActiveRepository, Timestamp};
use crate::error::{Error, Result};
use crate::services::GhCli;
use crate::utils::get_current_repo;

/// Supplies the repository the host is currently showing.
pub trait RepoContext {
    fn active(&self) -> Result<ActiveRepository>;
}

/// Repository from explicit overrides, falling back to the `origin` remote
/// and to `gh repo view` for the last-updated time. A failed lookup is an
/// error, never a guessed timestamp.
#[derive(Debug, Clone, Default)]
pub struct GitRemoteContext {
    gh: GhCli,
    repo: Option<String>,
    updated_at: Option<Timestamp>,
}

impl GitRemoteContext {
    pub fn new(gh: GhCli) -> Self {
        Self {
            gh,
            ..Default::default()
        }
    }

    pub fn with_repo(mut self, repo: Option<String>) -> Self {
        self.repo = repo;
        self
    }

    pub fn with_updated_at(mut self, updated_at: Option<Timestamp>) -> Self {
        self.updated_at = updated_at;
        self
    }
}

impl RepoContext for GitRemoteContext {
    fn active(&self) -> Result<ActiveRepository> {
        let key = self
            .repo
            .clone()
            .or_else(get_current_repo)
            .ok_or(Error::NoActiveRepository)?;

        let updated_at = match &self.updated_at {
            Some(ts) => ts.clone(),
            None => self.gh.repository_updated_at(&key)?,
        };

        Ok(ActiveRepository { key, updated_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_overrides_skip_git_and_gh() {
        let updated_at = Timestamp::parse("2024-02-02T02:02:02Z").unwrap();
        let context = GitRemoteContext::new(GhCli::new().with_program("/nonexistent/gh"))
            .with_repo(Some("octo/widgets".to_string()))
            .with_updated_at(Some(updated_at.clone()));

        let active = context.active().unwrap();
        assert_eq!(active.key, "octo/widgets");
        assert_eq!(active.updated_at, updated_at);
    }

    #[cfg(unix)]
    #[test]
    fn failed_update_time_lookup_is_an_error() {
        use crate::services::github::tests::fake_gh;

        let dir = tempfile::tempdir().unwrap();
        let gh = fake_gh(dir.path(), "echo 'HTTP 401: Bad credentials' >&2\nexit 1");
        let context = GitRemoteContext::new(GhCli::new().with_program(gh.to_string_lossy()))
            .with_repo(Some("octo/widgets".to_string()));

        match context.active() {
            Err(Error::Fetch { key, message }) => {
                assert_eq!(key, "octo/widgets");
                assert_eq!(message, "HTTP 401: Bad credentials");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn reads_update_time_from_gh() {
        use crate::services::github::tests::fake_gh;

        let dir = tempfile::tempdir().unwrap();
        let gh = fake_gh(dir.path(), r#"echo '{"updatedAt":"2024-07-01T08:00:00Z"}'"#);
        let context = GitRemoteContext::new(GhCli::new().with_program(gh.to_string_lossy()))
            .with_repo(Some("octo/widgets".to_string()));

        let active = context.active().unwrap();
        assert_eq!(active.updated_at.as_str(), "2024-07-01T08:00:00Z");
    }

    #[test]
    fn missing_gh_is_reported_when_update_time_is_needed() {
        let context = GitRemoteContext::new(GhCli::new().with_program("/nonexistent/gh"))
            .with_repo(Some("octo/widgets".to_string()));

        assert!(matches!(context.active(), Err(Error::ToolNotFound(_))));
    }
}
