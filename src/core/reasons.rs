use crate::core::scoring::Compatibility;
use crate::models::UserProfile;

/// Upper bound on reasons attached to one result
pub const MAX_MATCH_REASONS: usize = 3;
/// Subjects named in the shared-subjects reason
pub const MAX_SUBJECTS_NAMED: usize = 3;
/// Availability Jaccard overlap needed for the availability reason
pub const GOOD_AVAILABILITY_OVERLAP: f64 = 0.5;
/// Average rating needed for the rating reason
pub const HIGHLY_RATED: f64 = 4.5;

pub const REASON_AVAILABILITY: &str = "Good availability overlap";
pub const REASON_LEARNING_STYLE: &str = "Similar learning style";
pub const REASON_HIGHLY_RATED: &str = "Highly rated";

/// Build the human-readable reasons for a scored candidate, most salient first
///
/// Each reason is derived from the same sub-scores that produced the score,
/// so a result never claims something its score does not reflect.
pub fn match_reasons(compatibility: &Compatibility, candidate: &UserProfile) -> Vec<String> {
    let mut reasons = Vec::with_capacity(MAX_MATCH_REASONS);

    if !compatibility.shared_subjects.is_empty() {
        let named: Vec<&str> = compatibility
            .shared_subjects
            .iter()
            .take(MAX_SUBJECTS_NAMED)
            .map(String::as_str)
            .collect();
        reasons.push(format!("Studies {}", named.join(", ")));
    }

    if compatibility.sub_scores.availability >= GOOD_AVAILABILITY_OVERLAP {
        reasons.push(REASON_AVAILABILITY.to_string());
    }

    // 1.0 only when both styles are set and equal
    if compatibility.sub_scores.learning_style >= 1.0 {
        reasons.push(REASON_LEARNING_STYLE.to_string());
    }

    if candidate.rating() >= HIGHLY_RATED {
        reasons.push(REASON_HIGHLY_RATED.to_string());
    }

    reasons.truncate(MAX_MATCH_REASONS);
    reasons
}
