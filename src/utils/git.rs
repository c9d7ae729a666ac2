use std::process::Command;

/// `owner/name` of the `origin` remote of the repository in the working directory.
pub fn get_current_repo() -> Option<String> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let url = String::from_utf8_lossy(&output.stdout).trim().to_string();
    parse_github_url(&url)
}

pub fn parse_github_url(url: &str) -> Option<String> {
    // SSH: git@github.com:owner/repo.git
    let path = if let Some(path) = url.strip_prefix("git@github.com:") {
        path
    } else {
        // HTTPS or ssh://: https://github.com/owner/repo.git
        let path = url.split("github.com").nth(1)?;
        path.trim_start_matches(':').trim_start_matches('/')
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    let mut parts = path.split('/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => {
            Some(format!("{}/{}", owner, repo))
        }
        _ => None,
    }
}
