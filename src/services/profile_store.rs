use crate::models::UserProfile;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the profile store
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Profile store API client
///
/// Supplies the requester's profile and the candidate pool snapshot:
/// - `GET {endpoint}/profiles/{id}`
/// - `GET {endpoint}/profiles?exclude={id}` returning `{ "documents": [...] }`
pub struct ProfileStoreClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl ProfileStoreClient {
    /// Create a new profile store client
    pub fn new(
        base_url: String,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ProfileStoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|k| !k.is_empty()),
            client,
        })
    }

    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.api_key {
            Some(key) => request.header("X-Api-Key", key),
            None => request,
        }
    }

    /// Fetch a single profile by user ID
    pub async fn get_profile(&self, user_id: &str) -> Result<UserProfile, ProfileStoreError> {
        let url = format!(
            "{}/profiles/{}",
            self.base_url,
            urlencoding::encode(user_id)
        );

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ProfileStoreError::NotFound(format!(
                "Profile not found for user {}",
                user_id
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch profile for {}: {} - {}", user_id, status, body);
            return Err(ProfileStoreError::ApiError(format!(
                "Failed to fetch profile: {}",
                status
            )));
        }

        let json: Value = response.json().await?;
        let data = json.get("data").unwrap_or(&json);

        serde_json::from_value(data.clone())
            .map_err(|e| ProfileStoreError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Fetch the candidate pool for a user, excluding the user themselves
    pub async fn list_candidates(&self, user_id: &str) -> Result<Vec<UserProfile>, ProfileStoreError> {
        let url = format!(
            "{}/profiles?exclude={}",
            self.base_url,
            urlencoding::encode(user_id)
        );

        let response = self.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProfileStoreError::ApiError(format!(
                "Failed to list candidates: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| ProfileStoreError::InvalidResponse("Missing documents array".into()))?;

        let profiles: Vec<UserProfile> = decode_profiles(documents)
            .into_iter()
            .filter(|p| p.id != user_id)
            .collect();

        tracing::debug!("Listed {} candidates for {} ({} documents)", profiles.len(), user_id, documents.len());

        Ok(profiles)
    }

    /// Health check for the profile store
    pub async fn health_check(&self) -> Result<bool, ProfileStoreError> {
        let url = format!("{}/health", self.base_url);
        let response = self.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

/// Decode store documents into profiles, skipping any that cannot be decoded
///
/// Documents may wrap the profile in a `data` field. Missing optional fields
/// are tolerated by [`UserProfile`] itself; only records without a usable
/// shape (e.g. no `id`) are dropped here.
pub fn decode_profiles(documents: &[Value]) -> Vec<UserProfile> {
    documents
        .iter()
        .enumerate()
        .filter_map(|(index, doc)| {
            let data = doc.get("data").unwrap_or(doc);
            match serde_json::from_value::<UserProfile>(data.clone()) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Skipping malformed profile at position {}: {}", index, e);
                    None
                }
            }
        })
        .collect()
}
