use std::collections::BTreeMap;

use super::types::{
    CheckConclusion, CiSeverity, GhCheck, GhPullRequest, GhReview, ReviewDecision, ReviewState,
    Timestamp,
};

/// Login shown for reviews whose author account no longer exists.
pub const GHOST_LOGIN: &str = "ghost";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub login: String,
    pub state: ReviewState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub conclusion: CheckConclusion,
}

/// One pull request's normalized review and CI state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestRecord {
    pub number: u64,
    pub review_decision: ReviewDecision,
    /// Remote-reported order; the same login may appear more than once.
    pub reviews: Vec<Review>,
    pub checks: Vec<Check>,
}

/// Records for one repository, keyed by PR number.
pub type RecordSet = BTreeMap<u64, PullRequestRecord>;

/// A repository's dataset as of `fetched_at`. Replaced wholesale, never edited.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub fetched_at: Timestamp,
    pub records: RecordSet,
}

/// The repository a host is currently showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRepository {
    pub key: String,
    pub updated_at: Timestamp,
}

/// Display annotation for one PR row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub text: String,
    pub severity: Option<CiSeverity>,
}

/// Overlays keyed by PR number. PRs with nothing to show have no entry.
pub type Overlays = BTreeMap<u64, Overlay>;

impl From<GhReview> for Review {
    fn from(review: GhReview) -> Self {
        Review {
            login: review
                .author
                .map(|a| a.login)
                .unwrap_or_else(|| GHOST_LOGIN.to_string()),
            state: review
                .state
                .as_deref()
                .map(|s| s.parse().unwrap_or_default())
                .unwrap_or_default(),
        }
    }
}

impl From<GhCheck> for Check {
    fn from(check: GhCheck) -> Self {
        let conclusion = match (check.conclusion.as_deref(), check.state.as_deref()) {
            (Some(conclusion), _) if !conclusion.is_empty() => {
                conclusion.parse().unwrap_or_default()
            }
            (_, Some(state)) => CheckConclusion::from_status_state(state),
            _ => CheckConclusion::Pending,
        };
        Check { conclusion }
    }
}

impl From<GhPullRequest> for PullRequestRecord {
    fn from(pr: GhPullRequest) -> Self {
        PullRequestRecord {
            number: pr.number,
            review_decision: pr
                .review_decision
                .as_deref()
                .map(|s| s.parse().unwrap_or_default())
                .unwrap_or_default(),
            reviews: pr
                .latest_reviews
                .unwrap_or_default()
                .into_iter()
                .map(Review::from)
                .collect(),
            checks: pr
                .status_check_rollup
                .unwrap_or_default()
                .into_iter()
                .map(Check::from)
                .collect(),
        }
    }
}
