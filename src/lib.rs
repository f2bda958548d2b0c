//! Study Up - study buddy recommendation service
//!
//! This library provides the recommendation engine behind the Study Up buddy feed.
//! Given a requester's profile and a candidate pool it filters, scores and ranks
//! candidates and explains each match.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{recommend, Recommender, Recommendations, RecommendError};
pub use crate::models::{UserProfile, FilterCriteria, SortKey, MatchResult, ScoringWeights, LearningStyle, Weekday};
