use thiserror::Error;
use validator::Validate;
use crate::models::{FilterCriteria, MatchResult, ScoringWeights, SortKey, UserProfile};
use crate::core::{
    filters::passes_filters,
    ranking::sort_matches,
    reasons::match_reasons,
    scoring::calculate_compatibility,
};

/// Errors that can occur when building recommendations
#[derive(Debug, Error, PartialEq)]
pub enum RecommendError {
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),
}

/// A page of recommendations
#[derive(Debug)]
pub struct Recommendations<'a> {
    pub matches: Vec<MatchResult<'a>>,
    pub total_candidates: usize,
    /// Matches before the page limit was applied
    pub total_matches: usize,
}

/// Recommendation orchestrator - filter, score, rank
///
/// # Pipeline Stages
/// 1. Filter predicates (subjects, learning style, rating, availability, query)
/// 2. Compatibility scoring, then the match score floor
/// 3. Match reason generation
/// 4. Stable sort by the requested key
///
/// Holds no mutable state, so a single instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Recommender {
    weights: ScoringWeights,
}

impl Recommender {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank `pool` for `requester`
    ///
    /// # Arguments
    /// * `requester` - The profile recommendations are made for
    /// * `pool` - Candidate snapshot; results borrow from it
    /// * `criteria` - Filters, rejected up front if out of range
    /// * `sort_key` - Ordering of the returned list
    ///
    /// # Returns
    /// Every passing candidate, scored and sorted
    pub fn recommend<'a>(
        &self,
        requester: &UserProfile,
        pool: &'a [UserProfile],
        criteria: &FilterCriteria,
        sort_key: SortKey,
    ) -> Result<Vec<MatchResult<'a>>, RecommendError> {
        validate_criteria(criteria)?;

        let min_score = criteria.min_match_score;

        let mut matches: Vec<MatchResult<'a>> = pool
            .iter()
            .filter(|candidate| candidate.id != requester.id)
            // Stage 1: Filter predicates
            .filter(|candidate| passes_filters(candidate, criteria))
            // Stage 2 & 3: Score, apply the floor, explain
            .filter_map(|candidate| {
                let compatibility = calculate_compatibility(requester, candidate, &self.weights);

                if i32::from(compatibility.score) < min_score {
                    return None;
                }

                Some(MatchResult {
                    candidate,
                    compatibility_score: compatibility.score,
                    match_reasons: match_reasons(&compatibility, candidate),
                })
            })
            .collect();

        // Stage 4: Sort
        sort_matches(&mut matches, sort_key);

        tracing::debug!(
            "Recommended {} of {} candidates for {} (sort: {:?})",
            matches.len(),
            pool.len(),
            requester.id,
            sort_key
        );

        Ok(matches)
    }

    /// Same as [`Recommender::recommend`], truncated to `limit`
    pub fn recommend_page<'a>(
        &self,
        requester: &UserProfile,
        pool: &'a [UserProfile],
        criteria: &FilterCriteria,
        sort_key: SortKey,
        limit: usize,
    ) -> Result<Recommendations<'a>, RecommendError> {
        let mut matches = self.recommend(requester, pool, criteria, sort_key)?;
        let total_matches = matches.len();
        matches.truncate(limit);

        Ok(Recommendations {
            matches,
            total_candidates: pool.len(),
            total_matches,
        })
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Rank with the default weights
pub fn recommend<'a>(
    requester: &UserProfile,
    pool: &'a [UserProfile],
    criteria: &FilterCriteria,
    sort_key: SortKey,
) -> Result<Vec<MatchResult<'a>>, RecommendError> {
    Recommender::with_default_weights().recommend(requester, pool, criteria, sort_key)
}

/// Reject criteria outside their declared ranges instead of clamping them
pub fn validate_criteria(criteria: &FilterCriteria) -> Result<(), RecommendError> {
    if !criteria.min_rating.is_finite() {
        return Err(RecommendError::InvalidCriteria(
            "minRating must be a finite number".to_string(),
        ));
    }

    criteria
        .validate()
        .map_err(|e| RecommendError::InvalidCriteria(e.to_string()))
}
