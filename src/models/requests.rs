use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{FilterCriteria, SortKey, UserProfile};

/// Request recommendations for a stored user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(alias = "sort_by", rename = "sortBy", default)]
    pub sort_by: SortKey,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Rank an inline candidate pool without consulting the profile store
///
/// Pool entries stay as raw JSON so that one undecodable record is skipped
/// instead of rejecting the whole request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PreviewRequest {
    pub requester: UserProfile,
    pub pool: Vec<serde_json::Value>,
    #[serde(default)]
    pub criteria: FilterCriteria,
    #[serde(alias = "sort_by", rename = "sortBy", default)]
    pub sort_by: SortKey,
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
}
