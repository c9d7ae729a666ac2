pub mod cache;
pub mod format;
pub mod github;

pub use cache::StatusCache;
pub use format::{
    format_checks, format_decision, format_line, format_overlay, format_review_state,
    format_reviewers, format_status, CiSummary,
};
pub use github::{parse_pr_list, resolve_program, Fetcher, GhCli, DEFAULT_LIMIT, GH_PROGRAM};
