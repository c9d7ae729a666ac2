use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Fixed-width UTC timestamp (`YYYY-MM-DDTHH:MM:SSZ`).
///
/// Ordering is plain string ordering, which matches chronological order
/// because every value is rendered in the same format.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn epoch() -> Self {
        Self("1970-01-01T00:00:00Z".to_string())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt.to_rfc3339_opts(SecondsFormat::Secs, true))
    }

    /// Parse any RFC 3339 timestamp and normalize it to UTC, second precision.
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        let dt = DateTime::parse_from_rfc3339(s.trim())?;
        Ok(Self::from_datetime(dt.with_timezone(&Utc)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Timestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Review decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewDecision {
    Approved,
    ChangesRequested,
    ReviewRequired,
    #[default]
    None,
}

impl FromStr for ReviewDecision {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "APPROVED" => ReviewDecision::Approved,
            "CHANGES_REQUESTED" => ReviewDecision::ChangesRequested,
            "REVIEW_REQUIRED" => ReviewDecision::ReviewRequired,
            _ => ReviewDecision::None,
        })
    }
}

// Review state of a single reviewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
    #[default]
    Unknown,
}

impl FromStr for ReviewState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "APPROVED" => ReviewState::Approved,
            "CHANGES_REQUESTED" => ReviewState::ChangesRequested,
            "COMMENTED" => ReviewState::Commented,
            "DISMISSED" => ReviewState::Dismissed,
            "PENDING" => ReviewState::Pending,
            _ => ReviewState::Unknown,
        })
    }
}

/// Conclusion of one entry of the status check rollup.
///
/// Anything that is not a recognized finished state (including an empty
/// conclusion for a check that is still running) is `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckConclusion {
    Success,
    Neutral,
    Skipped,
    Failure,
    Cancelled,
    TimedOut,
    #[default]
    Pending,
}

impl FromStr for CheckConclusion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_uppercase().as_str() {
            "SUCCESS" => CheckConclusion::Success,
            "NEUTRAL" => CheckConclusion::Neutral,
            "SKIPPED" => CheckConclusion::Skipped,
            "FAILURE" => CheckConclusion::Failure,
            "CANCELLED" => CheckConclusion::Cancelled,
            "TIMED_OUT" => CheckConclusion::TimedOut,
            _ => CheckConclusion::Pending,
        })
    }
}

impl CheckConclusion {
    /// Map the `state` of a legacy commit status (`StatusContext`).
    pub fn from_status_state(state: &str) -> Self {
        match state.to_uppercase().as_str() {
            "SUCCESS" => CheckConclusion::Success,
            "FAILURE" | "ERROR" => CheckConclusion::Failure,
            _ => CheckConclusion::Pending,
        }
    }
}

/// Visual weight of a CI summary, picked by the host to style it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CiSeverity {
    Success,
    Warning,
    Error,
}

// `gh pr list --json ...` response types
#[derive(Debug, Deserialize)]
pub struct GhPullRequest {
    pub number: u64,
    #[serde(rename = "reviewDecision", default)]
    pub review_decision: Option<String>,
    #[serde(rename = "latestReviews", default)]
    pub latest_reviews: Option<Vec<GhReview>>,
    #[serde(rename = "statusCheckRollup", default)]
    pub status_check_rollup: Option<Vec<GhCheck>>,
}

#[derive(Debug, Deserialize)]
pub struct GhReview {
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Author {
    pub login: String,
}

/// A rollup entry: check runs carry `conclusion`, commit statuses carry `state`.
#[derive(Debug, Deserialize)]
pub struct GhCheck {
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

// `gh repo view --json updatedAt` response
#[derive(Debug, Deserialize)]
pub struct GhRepoView {
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}
