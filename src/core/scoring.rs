use crate::models::{LearningStyle, ScoringWeights, UserProfile, domain::MAX_RATING};
use std::collections::{BTreeSet, HashSet};

/// Normalised sub-scores, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub subjects: f64,
    pub learning_style: f64,
    pub availability: f64,
    pub rating: f64,
}

/// Compatibility of one candidate with the requester
#[derive(Debug, Clone, PartialEq)]
pub struct Compatibility {
    pub score: u8,
    pub sub_scores: SubScores,
    /// Shared subjects in the requester's order
    pub shared_subjects: Vec<String>,
}

/// Calculate a compatibility score (0-100) between requester and candidate
///
/// Scoring formula:
/// score = round((
///     subject_overlap * 0.40 +     # shared / requester subjects
///     style_match * 0.20 +         # 1.0 equal, 0.5 either unset, 0.0 different
///     availability_overlap * 0.25 + # Jaccard on weekday keys
///     rating / 5.0 * 0.15          # candidate average rating
/// ) * 100)
///
/// The result is a pure function of the two profiles and the weights.
pub fn calculate_compatibility(
    requester: &UserProfile,
    candidate: &UserProfile,
    weights: &ScoringWeights,
) -> Compatibility {
    let (subjects, shared_subjects) = subject_overlap(requester, candidate);

    let sub_scores = SubScores {
        subjects,
        learning_style: learning_style_match(requester.learning_style, candidate.learning_style),
        availability: availability_overlap(requester, candidate),
        rating: rating_score(candidate),
    };

    let total = (sub_scores.subjects * weights.subjects
        + sub_scores.learning_style * weights.learning_style
        + sub_scores.availability * weights.availability
        + sub_scores.rating * weights.rating)
        * 100.0;

    Compatibility {
        score: total.round().clamp(0.0, 100.0) as u8,
        sub_scores,
        shared_subjects,
    }
}

/// Ratio of the requester's distinct subjects the candidate also studies
///
/// Returns 0 when the requester has no subjects.
pub fn subject_overlap(requester: &UserProfile, candidate: &UserProfile) -> (f64, Vec<String>) {
    let candidate_subjects: HashSet<&str> = candidate.subjects.iter().map(String::as_str).collect();

    let mut seen = HashSet::new();
    let mut distinct = 0usize;
    let mut shared = Vec::new();

    for subject in &requester.subjects {
        if !seen.insert(subject.as_str()) {
            continue;
        }
        distinct += 1;
        if candidate_subjects.contains(subject.as_str()) {
            shared.push(subject.clone());
        }
    }

    if distinct == 0 {
        return (0.0, shared);
    }

    (shared.len() as f64 / distinct as f64, shared)
}

#[inline]
pub fn learning_style_match(a: Option<LearningStyle>, b: Option<LearningStyle>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) if a == b => 1.0,
        (Some(_), Some(_)) => 0.0,
        _ => 0.5,
    }
}

/// Jaccard index of the two profiles' available weekdays
pub fn availability_overlap(requester: &UserProfile, candidate: &UserProfile) -> f64 {
    let a: BTreeSet<_> = requester.availability.keys().collect();
    let b: BTreeSet<_> = candidate.availability.keys().collect();

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }

    a.intersection(&b).count() as f64 / union as f64
}

#[inline]
pub fn rating_score(candidate: &UserProfile) -> f64 {
    candidate.rating() / MAX_RATING
}
