// Core algorithm exports
pub mod filters;
pub mod ranking;
pub mod reasons;
pub mod recommender;
pub mod scoring;

pub use filters::{passes_filters, matches_search_query};
pub use ranking::sort_matches;
pub use reasons::match_reasons;
pub use recommender::{recommend, validate_criteria, Recommender, Recommendations, RecommendError};
pub use scoring::{calculate_compatibility, Compatibility, SubScores};
