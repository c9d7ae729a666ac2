//! Pure formatting of a pull request's review and CI state into a short
//! annotation string. Nothing here touches the cache or the network.

use std::fmt;

use crate::data::{
    Check, CheckConclusion, CiSeverity, Overlay, PullRequestRecord, Review, ReviewDecision,
    ReviewState,
};
use crate::icons;

/// Pass/fail/pending tally of a PR's status checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CiSummary {
    pub pass: usize,
    pub fail: usize,
    pub pending: usize,
}

impl CiSummary {
    pub fn severity(&self) -> CiSeverity {
        if self.fail > 0 {
            CiSeverity::Error
        } else if self.pending > 0 {
            CiSeverity::Warning
        } else {
            CiSeverity::Success
        }
    }
}

impl fmt::Display for CiSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}/{}/{}",
            icons::CI_PREFIX,
            self.pass,
            self.fail,
            self.pending
        )
    }
}

pub fn format_decision(decision: ReviewDecision) -> Option<&'static str> {
    match decision {
        ReviewDecision::Approved => Some(icons::DECISION_APPROVED),
        ReviewDecision::ChangesRequested => Some(icons::DECISION_CHANGES_REQUESTED),
        ReviewDecision::ReviewRequired => Some(icons::DECISION_REVIEW_REQUIRED),
        ReviewDecision::None => None,
    }
}

/// Unknown states render as `?` rather than being dropped.
pub fn format_review_state(state: ReviewState) -> &'static str {
    match state {
        ReviewState::Approved => icons::REVIEW_APPROVED,
        ReviewState::ChangesRequested => icons::REVIEW_CHANGES_REQUESTED,
        ReviewState::Commented => icons::REVIEW_COMMENTED,
        ReviewState::Dismissed => icons::REVIEW_DISMISSED,
        ReviewState::Pending => icons::REVIEW_PENDING,
        ReviewState::Unknown => icons::REVIEW_UNKNOWN,
    }
}

/// `login:icon` pairs in remote order, skipping ignored logins.
/// Returns `None` when nothing is left to show.
pub fn format_reviewers(reviews: &[Review], ignored_logins: &[String]) -> Option<String> {
    let parts: Vec<String> = reviews
        .iter()
        .filter(|review| !ignored_logins.contains(&review.login))
        .map(|review| format!("{}:{}", review.login, format_review_state(review.state)))
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

pub fn format_checks(checks: &[Check]) -> Option<CiSummary> {
    if checks.is_empty() {
        return None;
    }

    let mut summary = CiSummary::default();
    for check in checks {
        match check.conclusion {
            CheckConclusion::Success | CheckConclusion::Neutral | CheckConclusion::Skipped => {
                summary.pass += 1
            }
            CheckConclusion::Failure | CheckConclusion::Cancelled | CheckConclusion::TimedOut => {
                summary.fail += 1
            }
            CheckConclusion::Pending => summary.pending += 1,
        }
    }
    Some(summary)
}

/// Decision icon with the reviewer list in parentheses, or whichever half exists.
pub fn format_status(record: &PullRequestRecord, ignored_logins: &[String]) -> Option<String> {
    let decision = format_decision(record.review_decision);
    let reviewers = format_reviewers(&record.reviews, ignored_logins);

    match (decision, reviewers) {
        (Some(decision), Some(reviewers)) => Some(format!("{}({})", decision, reviewers)),
        (Some(decision), None) => Some(decision.to_string()),
        (None, Some(reviewers)) => Some(reviewers),
        (None, None) => None,
    }
}

/// Full annotation text, with a leading space so it can sit right after the row.
pub fn format_line(record: &PullRequestRecord, ignored_logins: &[String]) -> Option<String> {
    format_overlay(record, ignored_logins).map(|overlay| overlay.text)
}

/// [`format_line`] plus the CI severity, for hosts that style the annotation.
pub fn format_overlay(record: &PullRequestRecord, ignored_logins: &[String]) -> Option<Overlay> {
    let status = format_status(record, ignored_logins);
    let ci = format_checks(&record.checks);

    let parts: Vec<String> = status
        .into_iter()
        .chain(ci.map(|summary| summary.to_string()))
        .collect();

    if parts.is_empty() {
        return None;
    }

    Some(Overlay {
        text: format!(" {}", parts.join(" ")),
        severity: ci.map(|summary| summary.severity()),
    })
}
