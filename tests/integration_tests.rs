// Integration tests for Study Up

use study_up::core::{Recommender, RecommendError, reasons::HIGHLY_RATED};
use study_up::models::{FilterCriteria, LearningStyle, SortKey, UserProfile, Weekday};
use std::collections::BTreeMap;

fn create_test_profile(
    id: &str,
    name: &str,
    subjects: &[&str],
    style: Option<LearningStyle>,
    days: &[Weekday],
    rating: f64,
    sessions: u32,
) -> UserProfile {
    let availability: BTreeMap<Weekday, Vec<String>> = days
        .iter()
        .map(|d| (*d, vec!["14:00-16:00".to_string()]))
        .collect();

    UserProfile {
        id: id.to_string(),
        name: name.to_string(),
        username: name.to_lowercase(),
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
        learning_style: style,
        availability,
        avg_rating: rating,
        total_sessions: sessions,
        completion_percentage: 75,
    }
}

fn create_requester() -> UserProfile {
    create_test_profile(
        "me",
        "Requester",
        &["Mathematics", "Physics"],
        Some(LearningStyle::Visual),
        &[Weekday::Monday],
        4.0,
        10,
    )
}

fn create_pool() -> Vec<UserProfile> {
    use LearningStyle::*;
    use Weekday::*;

    vec![
        create_test_profile("0", "Noah", &["Physics", "Chemistry"], Some(Visual), &[Monday], 4.8, 12),
        create_test_profile("1", "Emma", &["History"], Some(Auditory), &[Friday], 3.2, 3),
        create_test_profile("2", "Liam", &["Mathematics"], None, &[Monday, Tuesday], 4.5, 20),
        create_test_profile("3", "Ava", &["Mathematics", "Physics"], Some(Visual), &[Monday], 4.0, 7),
        create_test_profile("4", "Mia", &[], Some(Reading), &[], 2.0, 0),
        create_test_profile("5", "Zoe", &["Physics"], Some(Kinesthetic), &[Sunday], 4.9, 30),
        create_test_profile("6", "Eli", &["Chemistry"], Some(Visual), &[Monday, Wednesday], 3.9, 5),
        create_test_profile("7", "Ava", &["Mathematics", "Physics"], Some(Visual), &[Monday], 4.0, 7),
    ]
}

#[test]
fn test_worked_example_score() {
    let recommender = Recommender::with_default_weights();
    let requester = create_requester();
    let pool = vec![create_test_profile(
        "c",
        "Candidate",
        &["Physics", "Chemistry"],
        Some(LearningStyle::Visual),
        &[Weekday::Monday],
        4.8,
        0,
    )];

    let result = recommender
        .recommend(&requester, &pool, &FilterCriteria::default(), SortKey::Match)
        .unwrap();

    // 0.4*0.5 + 0.2*1.0 + 0.25*1.0 + 0.15*0.96 = 0.794
    assert_eq!(result[0].compatibility_score, 79);
    assert_eq!(
        result[0].match_reasons,
        vec!["Studies Physics", "Good availability overlap", "Similar learning style"]
    );
}

#[test]
fn test_rating_floor_can_empty_the_result() {
    let recommender = Recommender::with_default_weights();
    let pool = vec![create_test_profile("c", "C", &["Physics"], None, &[], 4.8, 0)];
    let criteria = FilterCriteria {
        min_rating: 4.9,
        ..FilterCriteria::default()
    };

    let result = recommender
        .recommend(&create_requester(), &pool, &criteria, SortKey::Match)
        .unwrap();

    assert!(result.is_empty());
}

#[test]
fn test_empty_requester_subjects_yield_no_subject_reason() {
    let recommender = Recommender::with_default_weights();
    let requester = create_test_profile("me", "Me", &[], None, &[], 0.0, 0);
    let pool = vec![create_test_profile("c", "C", &["Physics"], None, &[], 3.0, 0)];

    let result = recommender
        .recommend(&requester, &pool, &FilterCriteria::default(), SortKey::Match)
        .unwrap();

    assert_eq!(result.len(), 1);
    assert!(result[0].match_reasons.iter().all(|r| !r.starts_with("Studies")));
}

#[test]
fn test_equal_scores_keep_pool_order() {
    let recommender = Recommender::with_default_weights();
    let pool = create_pool();

    let result = recommender
        .recommend(&create_requester(), &pool, &FilterCriteria::default(), SortKey::Match)
        .unwrap();

    let first = result.iter().position(|m| m.candidate.id == "3").unwrap();
    let second = result.iter().position(|m| m.candidate.id == "7").unwrap();

    assert_eq!(result[first].compatibility_score, result[second].compatibility_score);
    assert!(first < second, "pool position 3 must precede position 7");
}

#[test]
fn test_out_of_range_rating_is_rejected() {
    let recommender = Recommender::with_default_weights();
    let criteria = FilterCriteria {
        min_rating: 6.0,
        ..FilterCriteria::default()
    };

    let requester = create_requester();
    let pool = create_pool();

    let result = recommender.recommend(&requester, &pool, &criteria, SortKey::Match);

    assert!(matches!(result, Err(RecommendError::InvalidCriteria(_))));
}

#[test]
fn test_recommend_is_deterministic() {
    let recommender = Recommender::with_default_weights();
    let requester = create_requester();
    let pool = create_pool();

    for key in [SortKey::Match, SortKey::Rating, SortKey::Sessions, SortKey::Name] {
        let first = recommender
            .recommend(&requester, &pool, &FilterCriteria::default(), key)
            .unwrap();
        let second = recommender
            .recommend(&requester, &pool, &FilterCriteria::default(), key)
            .unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn test_every_result_satisfies_active_filters() {
    let recommender = Recommender::with_default_weights();
    let criteria = FilterCriteria {
        subjects: vec!["Physics".to_string(), "Chemistry".to_string()],
        learning_styles: vec![LearningStyle::Visual, LearningStyle::Kinesthetic],
        min_rating: 3.5,
        min_match_score: 30,
        availability_days: vec![Weekday::Monday, Weekday::Sunday],
        query: None,
    };

    let pool = create_pool();
    let result = recommender
        .recommend(&create_requester(), &pool, &criteria, SortKey::Match)
        .unwrap();

    assert!(!result.is_empty());
    for m in &result {
        let c = m.candidate;
        assert!(criteria.subjects.iter().any(|s| c.studies(s)));
        assert!(c.learning_style.is_some_and(|s| criteria.learning_styles.contains(&s)));
        assert!(c.avg_rating >= criteria.min_rating);
        assert!(criteria.availability_days.iter().any(|d| c.is_available_on(*d)));
        assert!(i32::from(m.compatibility_score) >= criteria.min_match_score);
    }
}

#[test]
fn test_sort_orders_and_score_bounds() {
    let recommender = Recommender::with_default_weights();
    let requester = create_requester();
    let pool = create_pool();
    let criteria = FilterCriteria::default();

    let by_match = recommender.recommend(&requester, &pool, &criteria, SortKey::Match).unwrap();
    assert_eq!(by_match.len(), pool.len());
    for pair in by_match.windows(2) {
        assert!(pair[0].compatibility_score >= pair[1].compatibility_score);
    }
    for m in &by_match {
        assert!(m.compatibility_score <= 100);
    }

    let by_rating = recommender.recommend(&requester, &pool, &criteria, SortKey::Rating).unwrap();
    for pair in by_rating.windows(2) {
        assert!(pair[0].candidate.avg_rating >= pair[1].candidate.avg_rating);
    }

    let by_sessions = recommender.recommend(&requester, &pool, &criteria, SortKey::Sessions).unwrap();
    for pair in by_sessions.windows(2) {
        assert!(pair[0].candidate.total_sessions >= pair[1].candidate.total_sessions);
    }

    let by_name = recommender.recommend(&requester, &pool, &criteria, SortKey::Name).unwrap();
    for pair in by_name.windows(2) {
        assert!(pair[0].candidate.name.to_lowercase() <= pair[1].candidate.name.to_lowercase());
    }
}

#[test]
fn test_reasons_are_backed_by_profiles() {
    let recommender = Recommender::with_default_weights();
    let requester = create_requester();
    let pool = create_pool();

    let result = recommender
        .recommend(&requester, &pool, &FilterCriteria::default(), SortKey::Match)
        .unwrap();

    for m in &result {
        assert!(m.match_reasons.len() <= 3);
        for reason in &m.match_reasons {
            match reason.as_str() {
                "Highly rated" => assert!(m.candidate.avg_rating >= HIGHLY_RATED),
                "Similar learning style" => {
                    assert!(m.candidate.learning_style.is_some());
                    assert_eq!(m.candidate.learning_style, requester.learning_style);
                }
                "Good availability overlap" => {
                    assert!(requester.availability.keys().any(|d| m.candidate.is_available_on(*d)));
                }
                other => {
                    let subjects = other.strip_prefix("Studies ").unwrap();
                    for subject in subjects.split(", ") {
                        assert!(requester.studies(subject) && m.candidate.studies(subject));
                    }
                }
            }
        }
    }
}

#[test]
fn test_search_query_filters_before_scoring() {
    let recommender = Recommender::with_default_weights();
    let criteria = FilterCriteria {
        query: Some("chem".to_string()),
        ..FilterCriteria::default()
    };

    let pool = create_pool();
    let result = recommender
        .recommend(&create_requester(), &pool, &criteria, SortKey::Name)
        .unwrap();

    let ids: Vec<&str> = result.iter().map(|m| m.candidate.id.as_str()).collect();
    assert_eq!(ids, vec!["6", "0"]);
}

#[test]
fn test_inputs_are_not_mutated() {
    let recommender = Recommender::with_default_weights();
    let requester = create_requester();
    let pool = create_pool();
    let snapshot = pool.clone();

    let _ = recommender
        .recommend(&requester, &pool, &FilterCriteria::default(), SortKey::Name)
        .unwrap();

    assert_eq!(pool, snapshot);
    assert_eq!(requester, create_requester());
}
