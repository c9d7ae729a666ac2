pub mod models;
pub mod types;

pub use models::{
    ActiveRepository, CacheEntry, Check, Overlay, Overlays, PullRequestRecord, RecordSet, Review,
    GHOST_LOGIN,
};
pub use types::{
    Author, CheckConclusion, CiSeverity, GhCheck, GhPullRequest, GhRepoView, GhReview,
    ReviewDecision, ReviewState, Timestamp,
};
