// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{UserProfile, LearningStyle, Weekday, FilterCriteria, SortKey, MatchResult, ScoringWeights};
pub use requests::{RecommendRequest, PreviewRequest};
pub use responses::{RecommendResponse, HealthResponse, ErrorResponse};
