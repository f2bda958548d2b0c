use crate::models::{MatchResult, SortKey};
use std::cmp::Ordering;

/// Sort results in place by the requested key
///
/// The sort is stable, so ties keep their original pool order.
pub fn sort_matches(matches: &mut [MatchResult<'_>], key: SortKey) {
    matches.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &MatchResult<'_>, b: &MatchResult<'_>, key: SortKey) -> Ordering {
    match key {
        SortKey::Match => b.compatibility_score.cmp(&a.compatibility_score),
        SortKey::Rating => b.candidate.rating().total_cmp(&a.candidate.rating()),
        SortKey::Sessions => b.candidate.total_sessions.cmp(&a.candidate.total_sessions),
        SortKey::Name => folded(&a.candidate.name).cmp(folded(&b.candidate.name)),
    }
}

/// Case-folded view of a name, compared without allocating
fn folded(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars().flat_map(char::to_lowercase)
}
