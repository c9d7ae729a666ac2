use thiserror::Error;

/// Errors surfaced by the overlay core.
#[derive(Debug, Error)]
pub enum Error {
    /// The external CLI could not be resolved.
    #[error("`{0}` not found. Install the GitHub CLI or point --gh at it.")]
    ToolNotFound(String),

    /// The CLI exited non-zero, could not be spawned, or printed invalid JSON.
    #[error("Failed to fetch pull requests for {key}: {message}")]
    Fetch { key: String, message: String },

    /// No repository is active in the current context.
    #[error("Not in a GitHub repository")]
    NoActiveRepository,
}

pub type Result<T> = std::result::Result<T, Error>;
