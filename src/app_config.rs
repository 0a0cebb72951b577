use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Business directory and geocoding services
    #[serde(default)]
    pub directories: DirectoriesConfig,

    /// Cross-directory matching parameters
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Language model used for dish recommendations
    #[serde(default)]
    pub recommendation: RecommendationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Language model provider type
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    // @provider: OpenAI
    OpenAI,
    // @provider: Anthropic
    Anthropic,
    // @provider: Ollama
    #[default]
    Ollama,
}

impl LlmProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Ollama => "Ollama",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Ollama => "ollama".to_string(),
        }
    }

    /// Hosted providers need an API key
    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Ollama)
    }
}

// Implement Display trait for LlmProvider
impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for LlmProvider
impl std::str::FromStr for LlmProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "ollama" => Ok(Self::Ollama),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_llm_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Completion token budget
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl ProviderConfig {
    // @param provider_type: Provider enum
    // @returns: Provider config with defaults
    pub fn new(provider_type: LlmProvider) -> Self {
        Self {
            provider_type: provider_type.to_lowercase_string(),
            model: default_model(&provider_type),
            api_key: String::new(),
            endpoint: default_llm_endpoint(&provider_type),
            timeout_secs: default_llm_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Business directories used for the restaurant search
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DirectoriesConfig {
    /// Primary, geo-radius place search
    #[serde(default)]
    pub places: PlacesConfig,

    /// Secondary, keyword business search
    #[serde(default)]
    pub yelp: YelpConfig,

    /// Reverse geocoding for city names
    #[serde(default)]
    pub geocoding: GeocodingConfig,
}

/// Places nearby-search configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlacesConfig {
    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service base URL
    #[serde(default = "default_google_endpoint")]
    pub endpoint: String,

    /// Search radius in meters
    #[serde(default = "default_radius_meters")]
    pub radius_meters: u32,

    /// Maximum number of places kept per search, in upstream order
    #[serde(default = "default_places_result_limit")]
    pub result_limit: usize,

    /// Place type filter
    #[serde(default = "default_place_type")]
    pub place_type: String,

    /// Request timeout in seconds
    #[serde(default = "default_directory_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_google_endpoint(),
            radius_meters: default_radius_meters(),
            result_limit: default_places_result_limit(),
            place_type: default_place_type(),
            timeout_secs: default_directory_timeout_secs(),
        }
    }
}

/// Yelp business search configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct YelpConfig {
    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service base URL
    #[serde(default = "default_yelp_endpoint")]
    pub endpoint: String,

    /// Maximum number of businesses requested
    #[serde(default = "default_yelp_result_limit")]
    pub result_limit: usize,

    /// Category filter
    #[serde(default = "default_yelp_category")]
    pub category: String,

    /// Request timeout in seconds
    #[serde(default = "default_directory_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for YelpConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_yelp_endpoint(),
            result_limit: default_yelp_result_limit(),
            category: default_yelp_category(),
            timeout_secs: default_directory_timeout_secs(),
        }
    }
}

/// Reverse geocoding configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeocodingConfig {
    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service base URL
    #[serde(default = "default_google_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_directory_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_google_endpoint(),
            timeout_secs: default_directory_timeout_secs(),
        }
    }
}

/// Scoring parameters for reconciling the two directories
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MatchingConfig {
    /// Weight of the name similarity in the total score
    #[serde(default = "default_name_weight")]
    pub name_weight: f64,

    /// Weight of the address similarity in the total score
    #[serde(default = "default_address_weight")]
    pub address_weight: f64,

    /// A candidate must score strictly above this value to be accepted
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,

    /// Search page used when no candidate is accepted
    #[serde(default = "default_fallback_search_url")]
    pub fallback_search_url: String,

    /// Map link template; `{place_id}` is substituted
    #[serde(default = "default_maps_link_template")]
    pub maps_link_template: String,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            name_weight: default_name_weight(),
            address_weight: default_address_weight(),
            match_threshold: default_match_threshold(),
            fallback_search_url: default_fallback_search_url(),
            maps_link_template: default_maps_link_template(),
        }
    }
}

/// Recommendation service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RecommendationConfig {
    /// Language model provider to use
    #[serde(default)]
    pub provider: LlmProvider,

    /// Available language model providers
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Dish types used when the model cannot be reached
    #[serde(default = "default_fallback_dishes")]
    pub fallback_dishes: Vec<String>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_llm_timeout_secs() -> u64 {
    60
}

fn default_directory_timeout_secs() -> u64 {
    15
}

fn default_max_tokens() -> u32 {
    100
}

fn default_radius_meters() -> u32 {
    5000
}

fn default_places_result_limit() -> usize {
    5
}

fn default_yelp_result_limit() -> usize {
    10 // more candidates give the matcher a better chance
}

fn default_place_type() -> String {
    "restaurant".to_string()
}

fn default_yelp_category() -> String {
    "restaurants".to_string()
}

fn default_google_endpoint() -> String {
    "https://maps.googleapis.com".to_string()
}

fn default_yelp_endpoint() -> String {
    "https://api.yelp.com".to_string()
}

fn default_name_weight() -> f64 {
    0.7
}

fn default_address_weight() -> f64 {
    0.3
}

fn default_match_threshold() -> f64 {
    75.0
}

fn default_fallback_search_url() -> String {
    "https://www.yelp.com/search".to_string()
}

fn default_maps_link_template() -> String {
    "https://www.google.com/maps/place/?q=place_id:{place_id}".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_retry_count() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_fallback_dishes() -> Vec<String> {
    vec![
        "Healthy Salad".to_string(),
        "Grilled Chicken".to_string(),
        "Steamed Fish".to_string(),
    ]
}

fn default_llm_endpoint(provider: &LlmProvider) -> String {
    match provider {
        LlmProvider::OpenAI => "https://api.openai.com/v1".to_string(),
        LlmProvider::Anthropic => "https://api.anthropic.com".to_string(),
        LlmProvider::Ollama => "http://localhost:11434".to_string(),
    }
}

fn default_model(provider: &LlmProvider) -> String {
    match provider {
        LlmProvider::OpenAI => "gpt-4".to_string(),
        LlmProvider::Anthropic => "claude-3-haiku-20240307".to_string(),
        LlmProvider::Ollama => "llama3.2:3b".to_string(),
    }
}

/// Upper bound on Ollama retries; the backoff doubles on each one
pub const MAX_RETRY_COUNT: u32 = 10;

impl Config {
    /// Validate the whole configuration, language model settings included
    pub fn validate(&self) -> Result<()> {
        self.validate_search()?;

        // Validate API key for hosted providers
        if self.recommendation.provider.requires_api_key() && self.recommendation.get_api_key().is_empty() {
            return Err(anyhow!(
                "Recommendation API key is required for {} provider",
                self.recommendation.provider.display_name()
            ));
        }
        if self.recommendation.retry_count > MAX_RETRY_COUNT {
            return Err(anyhow!(
                "Retry count must be at most {}, got {}",
                MAX_RETRY_COUNT, self.recommendation.retry_count
            ));
        }

        Ok(())
    }

    /// Validate only the directory and matching sections
    ///
    /// Enough for a restaurant search, which never talks to a language model.
    pub fn validate_search(&self) -> Result<()> {
        let matching = &self.matching;
        if matching.name_weight < 0.0 || matching.address_weight < 0.0 {
            return Err(anyhow!("Matching weights must not be negative"));
        }
        if ((matching.name_weight + matching.address_weight) - 1.0).abs() > 1e-6 {
            return Err(anyhow!(
                "Matching weights must sum to 1.0 (got {} + {})",
                matching.name_weight, matching.address_weight
            ));
        }
        if !(0.0..=100.0).contains(&matching.match_threshold) {
            return Err(anyhow!("Match threshold must be within 0-100, got {}", matching.match_threshold));
        }
        Url::parse(&matching.fallback_search_url)
            .context(format!("Invalid fallback search URL: {}", matching.fallback_search_url))?;
        if !matching.maps_link_template.contains("{place_id}") {
            return Err(anyhow!("Maps link template must contain a {{place_id}} placeholder"));
        }

        let places = &self.directories.places;
        if places.result_limit == 0 {
            return Err(anyhow!("Places result limit must be at least 1"));
        }
        if places.radius_meters == 0 {
            return Err(anyhow!("Search radius must be positive"));
        }

        Ok(())
    }

    /// Load a configuration file, or create one with defaults when it does not exist
    ///
    /// Returns the configuration and whether it was freshly created.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<(Self, bool)> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;
            let config: Config = serde_json::from_reader(BufReader::new(file))
                .context(format!("Failed to parse config file: {}", path.display()))?;
            Ok((config, false))
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok((config, true))
        }
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            directories: DirectoriesConfig::default(),
            matching: MatchingConfig::default(),
            recommendation: RecommendationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl RecommendationConfig {
    /// Get the active provider configuration from the available_providers array
    pub fn get_active_provider_config(&self) -> Option<&ProviderConfig> {
        self.get_provider_config(&self.provider)
    }

    /// Get a specific provider configuration by type
    pub fn get_provider_config(&self, provider_type: &LlmProvider) -> Option<&ProviderConfig> {
        let provider_str = provider_type.to_lowercase_string();
        self.available_providers.iter()
            .find(|p| p.provider_type == provider_str)
    }

    /// Mutable access to the active provider configuration, inserting defaults if missing
    pub fn active_provider_config_mut(&mut self) -> &mut ProviderConfig {
        let provider_str = self.provider.to_lowercase_string();
        let index = match self.available_providers.iter().position(|p| p.provider_type == provider_str) {
            Some(index) => index,
            None => {
                self.available_providers.push(ProviderConfig::new(self.provider.clone()));
                self.available_providers.len() - 1
            }
        };
        &mut self.available_providers[index]
    }

    /// Get the model for the active provider
    pub fn get_model(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.model.clone())
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| default_model(&self.provider))
    }

    /// Get the API key for the active provider
    pub fn get_api_key(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.api_key.clone())
            .unwrap_or_default()
    }

    /// Get the endpoint for the active provider
    pub fn get_endpoint(&self) -> String {
        self.get_active_provider_config()
            .map(|p| p.endpoint.clone())
            .filter(|endpoint| !endpoint.is_empty())
            .unwrap_or_else(|| default_llm_endpoint(&self.provider))
    }

    /// Get the request timeout for the active provider
    pub fn get_timeout_secs(&self) -> u64 {
        self.get_active_provider_config()
            .map(|p| p.timeout_secs)
            .filter(|secs| *secs > 0)
            .unwrap_or_else(default_llm_timeout_secs)
    }

    /// Get the completion token budget for the active provider
    pub fn get_max_tokens(&self) -> u32 {
        self.get_active_provider_config()
            .map(|p| p.max_tokens)
            .filter(|tokens| *tokens > 0)
            .unwrap_or_else(default_max_tokens)
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            available_providers: vec![
                ProviderConfig::new(LlmProvider::OpenAI),
                ProviderConfig::new(LlmProvider::Anthropic),
                ProviderConfig::new(LlmProvider::Ollama),
            ],
            temperature: default_temperature(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            fallback_dishes: default_fallback_dishes(),
        }
    }
}
