use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use validator::Validate;

/// Weight of the subject overlap ratio in the compatibility score
pub const DEFAULT_SUBJECT_WEIGHT: f64 = 0.40;
/// Weight of the learning style match in the compatibility score
pub const DEFAULT_LEARNING_STYLE_WEIGHT: f64 = 0.20;
/// Weight of the availability (weekday Jaccard) overlap in the compatibility score
pub const DEFAULT_AVAILABILITY_WEIGHT: f64 = 0.25;
/// Weight of the candidate's average rating in the compatibility score
pub const DEFAULT_RATING_WEIGHT: f64 = 0.15;

/// Highest average rating a profile can carry
pub const MAX_RATING: f64 = 5.0;

/// Self-declared preferred mode of studying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Reading,
    Kinesthetic,
}

impl FromStr for LearningStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "visual" => Ok(Self::Visual),
            "auditory" => Ok(Self::Auditory),
            "reading" => Ok(Self::Reading),
            "kinesthetic" => Ok(Self::Kinesthetic),
            other => Err(format!("unknown learning style: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for LearningStyle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Day of the week used as an availability key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];
}

impl FromStr for Weekday {
    type Err = String;

    /// Accepts full names and three-letter abbreviations, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Self::Monday),
            "tuesday" | "tue" => Ok(Self::Tuesday),
            "wednesday" | "wed" => Ok(Self::Wednesday),
            "thursday" | "thu" => Ok(Self::Thursday),
            "friday" | "fri" => Ok(Self::Friday),
            "saturday" | "sat" => Ok(Self::Saturday),
            "sunday" | "sun" => Ok(Self::Sunday),
            other => Err(format!("unknown weekday: {}", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Study Up user profile as supplied by the profile store
///
/// Every field except `id` is decoded leniently: missing, null or mistyped
/// values fall back to empty/zero, an unknown learning style becomes unset,
/// non-string subjects and unknown weekday keys are dropped. A sparse or
/// damaged record therefore still ranks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub username: String,
    #[serde(default, deserialize_with = "lenient_subjects")]
    pub subjects: Vec<String>,
    #[serde(rename = "learningStyle", default, deserialize_with = "lenient_learning_style")]
    pub learning_style: Option<LearningStyle>,
    #[serde(default, deserialize_with = "lenient_availability")]
    pub availability: BTreeMap<Weekday, Vec<String>>,
    #[serde(rename = "avgRating", default, deserialize_with = "lenient_rating")]
    pub avg_rating: f64,
    #[serde(rename = "totalSessions", default, deserialize_with = "lenient_sessions")]
    pub total_sessions: u32,
    #[serde(rename = "completionPercentage", default, deserialize_with = "lenient_percentage")]
    pub completion_percentage: u8,
}

impl UserProfile {
    /// Average rating clamped to [0, 5]; non-finite ratings count as 0
    pub fn rating(&self) -> f64 {
        if self.avg_rating.is_finite() {
            self.avg_rating.clamp(0.0, MAX_RATING)
        } else {
            0.0
        }
    }

    pub fn studies(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }

    pub fn is_available_on(&self, day: Weekday) -> bool {
        self.availability.contains_key(&day)
    }
}

/// Decode any JSON value; absent and null both become `Value::Null`
fn raw_value<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null))
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = raw_value(deserializer)?;
    Ok(raw.as_str().map(str::to_string).unwrap_or_default())
}

fn lenient_subjects<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(strings(&raw_value(deserializer)?))
}

fn lenient_learning_style<'de, D>(deserializer: D) -> Result<Option<LearningStyle>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = raw_value(deserializer)?;
    Ok(raw.as_str().and_then(|s| s.parse().ok()))
}

fn lenient_availability<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<Weekday, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = raw_value(deserializer)?;
    let Some(days) = raw.as_object() else {
        return Ok(BTreeMap::new());
    };

    Ok(days
        .iter()
        .filter_map(|(day, slots)| match day.parse::<Weekday>() {
            Ok(day) => Some((day, strings(slots))),
            Err(e) => {
                tracing::debug!("Dropping availability entry: {}", e);
                None
            }
        })
        .collect())
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw_value(deserializer)?.as_f64().unwrap_or_default())
}

/// Negative or non-integer counts become 0; huge counts saturate
fn lenient_sessions<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw_value(deserializer)?
        .as_u64()
        .map(|n| n.min(u64::from(u32::MAX)) as u32)
        .unwrap_or_default())
}

fn lenient_percentage<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(raw_value(deserializer)?
        .as_u64()
        .map(|n| n.min(100) as u8)
        .unwrap_or_default())
}

/// Filters applied to the candidate pool before (and, for the match score
/// floor, after) scoring. Empty fields mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct FilterCriteria {
    #[serde(default)]
    pub subjects: Vec<String>,
    #[serde(rename = "learningStyles", default)]
    pub learning_styles: Vec<LearningStyle>,
    #[validate(range(min = 0.0, max = 5.0))]
    #[serde(rename = "minRating", default)]
    pub min_rating: f64,
    #[validate(range(min = 0, max = 100))]
    #[serde(rename = "minMatchScore", default)]
    pub min_match_score: i32,
    #[serde(rename = "availabilityDays", default)]
    pub availability_days: Vec<Weekday>,
    /// Free-text search over name, username and subjects
    #[serde(default)]
    pub query: Option<String>,
}

/// Ordering applied to the final result list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Match,
    Rating,
    Sessions,
    Name,
}

/// A scored recommendation borrowing its candidate from the pool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<'a> {
    pub candidate: &'a UserProfile,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: u8,
    #[serde(rename = "matchReasons")]
    pub match_reasons: Vec<String>,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub subjects: f64,
    pub learning_style: f64,
    pub availability: f64,
    pub rating: f64,
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.subjects + self.learning_style + self.availability + self.rating
    }

    /// All weights finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.subjects, self.learning_style, self.availability, self.rating]
            .iter()
            .all(|w| w.is_finite() && *w >= 0.0)
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            subjects: DEFAULT_SUBJECT_WEIGHT,
            learning_style: DEFAULT_LEARNING_STYLE_WEIGHT,
            availability: DEFAULT_AVAILABILITY_WEIGHT,
            rating: DEFAULT_RATING_WEIGHT,
        }
    }
}
