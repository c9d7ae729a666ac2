//! Icons and emoji constants used in overlay annotations.

// Review decision icons
pub const DECISION_APPROVED: &str = "✅";
pub const DECISION_CHANGES_REQUESTED: &str = "❌";
pub const DECISION_REVIEW_REQUIRED: &str = "👀";

// Per-reviewer state icons
pub const REVIEW_APPROVED: &str = "✅";
pub const REVIEW_CHANGES_REQUESTED: &str = "❌";
pub const REVIEW_COMMENTED: &str = "💬";
pub const REVIEW_DISMISSED: &str = "🚫";
pub const REVIEW_PENDING: &str = "⏳";
pub const REVIEW_UNKNOWN: &str = "?";

// CI summary prefix
pub const CI_PREFIX: &str = "CI:";
