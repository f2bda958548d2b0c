use crate::models::{FilterCriteria, UserProfile};

/// Check if a candidate passes every active filter predicate
///
/// Predicates run in a fixed order and short-circuit on the first failure:
/// subjects, learning style, rating floor, availability days, then the
/// free-text query. The match score floor is not checked here since it
/// depends on the computed score.
#[inline]
pub fn passes_filters(profile: &UserProfile, criteria: &FilterCriteria) -> bool {
    // At least one shared subject
    if !criteria.subjects.is_empty()
        && !criteria.subjects.iter().any(|s| profile.studies(s)) {
        return false;
    }

    // Learning style must be one of the requested ones; unset never passes
    if !criteria.learning_styles.is_empty() {
        match profile.learning_style {
            Some(style) if criteria.learning_styles.contains(&style) => {}
            _ => return false,
        }
    }

    // Rating floor
    if profile.rating() < criteria.min_rating {
        return false;
    }

    // Free on at least one of the requested days
    if !criteria.availability_days.is_empty()
        && !criteria.availability_days.iter().any(|d| profile.is_available_on(*d)) {
        return false;
    }

    if let Some(query) = criteria.query.as_deref() {
        if !matches_search_query(profile, query) {
            return false;
        }
    }

    true
}

/// Case-insensitive substring search over name, username and subjects
///
/// A blank query matches everything.
pub fn matches_search_query(profile: &UserProfile, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }

    profile.name.to_lowercase().contains(&query)
        || profile.username.to_lowercase().contains(&query)
        || profile
            .subjects
            .iter()
            .any(|s| s.to_lowercase().contains(&query))
}
