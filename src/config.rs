use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::{ScoringWeights, domain::{
    DEFAULT_AVAILABILITY_WEIGHT, DEFAULT_LEARNING_STYLE_WEIGHT, DEFAULT_RATING_WEIGHT,
    DEFAULT_SUBJECT_WEIGHT,
}};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub profile_store: ProfileStoreSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileStoreSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_subject_weight")]
    pub subjects: f64,
    #[serde(default = "default_learning_style_weight")]
    pub learning_style: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
    #[serde(default = "default_rating_weight")]
    pub rating: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            subjects: default_subject_weight(),
            learning_style: default_learning_style_weight(),
            availability: default_availability_weight(),
            rating: default_rating_weight(),
        }
    }
}

impl From<WeightsConfig> for ScoringWeights {
    fn from(value: WeightsConfig) -> Self {
        Self {
            subjects: value.subjects,
            learning_style: value.learning_style,
            availability: value.availability,
            rating: value.rating,
        }
    }
}

fn default_subject_weight() -> f64 { DEFAULT_SUBJECT_WEIGHT }
fn default_learning_style_weight() -> f64 { DEFAULT_LEARNING_STYLE_WEIGHT }
fn default_availability_weight() -> f64 { DEFAULT_AVAILABILITY_WEIGHT }
fn default_rating_weight() -> f64 { DEFAULT_RATING_WEIGHT }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with STUDYUP__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., STUDYUP__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("STUDYUP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        let settings: Settings = settings.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("STUDYUP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = apply_env_overrides(settings)?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        self.scoring.weights.into()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.scoring_weights().is_valid() {
            return Err(ConfigError::Message(
                "scoring weights must be finite and non-negative".to_string(),
            ));
        }

        let limits = &self.recommendation;
        if limits.default_limit == 0 || limits.default_limit > limits.max_limit {
            return Err(ConfigError::Message(format!(
                "recommendation.default_limit ({}) must be between 1 and max_limit ({})",
                limits.default_limit, limits.max_limit
            )));
        }

        Ok(())
    }
}

/// Apply the unprefixed deployment variables PROFILE_STORE_URL and
/// PROFILE_STORE_API_KEY on top of the layered sources
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    apply_overrides(settings, |key| std::env::var(key).ok())
}

fn apply_overrides<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = lookup("PROFILE_STORE_URL") {
        builder = builder.set_override("profile_store.endpoint", endpoint)?;
    }
    if let Some(api_key) = lookup("PROFILE_STORE_API_KEY") {
        builder = builder.set_override("profile_store.api_key", api_key)?;
    }

    builder.build()
}
