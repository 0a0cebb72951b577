/*!
 * Dish and meal recommendations from a language model.
 *
 * This module provides:
 * - Prompt templates for dish types, meal plans and nutrition
 * - Parsing of free-form answers into typed results
 * - A service that degrades to fallback dishes when the model is unavailable
 */

use serde::{Deserialize, Serialize};

use crate::app_config::{LlmProvider, RecommendationConfig};
use crate::errors::ProviderError;
use crate::providers::Provider;
use crate::providers::anthropic::{Anthropic, AnthropicRequest};
use crate::providers::mock::{MockProvider, MockRequest};
use crate::providers::ollama::{ChatMessage, ChatRequest, Ollama};
use crate::providers::openai::{OpenAI, OpenAIRequest};

pub mod parse;
pub mod prompts;
pub mod service;

pub use service::RecommendationService;

/// What the user wants to eat and what to avoid
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DietProfile {
    #[serde(default)]
    pub preferences: Vec<String>,
    pub goal: String,
    #[serde(default)]
    pub allergies: Vec<String>,
    /// Ingredients at hand, only used for home meal plans
    #[serde(default)]
    pub ingredients: Vec<String>,
}

/// Approximate nutrients per 500 g
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nutrients {
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub dish: String,
    pub nutrients: Option<Nutrients>,
}

impl Meal {
    pub fn new(dish: impl Into<String>) -> Self {
        Self {
            dish: dish.into(),
            nutrients: None,
        }
    }
}

/// Three meals for a day at home plus a short piece of advice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealPlan {
    pub breakfast: Option<Meal>,
    pub lunch: Option<Meal>,
    pub dinner: Option<Meal>,
    pub advice: Option<String>,
}

impl MealPlan {
    /// Meals present in the plan, in breakfast, lunch, dinner order
    pub fn meals_mut(&mut self) -> impl Iterator<Item = &mut Meal> {
        [&mut self.breakfast, &mut self.lunch, &mut self.dinner]
            .into_iter()
            .filter_map(Option::as_mut)
    }
}

/// Language model backing the recommendation service
#[derive(Debug)]
pub enum LanguageModel {
    /// OpenAI chat completions
    OpenAI {
        client: OpenAI,
        model: String,
    },

    /// Anthropic messages API
    Anthropic {
        client: Anthropic,
        model: String,
    },

    /// Local Ollama server
    Ollama {
        client: Ollama,
        model: String,
    },

    /// Canned answers, no network
    Mock {
        client: MockProvider,
    },
}

impl LanguageModel {
    /// Build the client for the active provider of `config`
    pub fn from_config(config: &RecommendationConfig) -> Self {
        let model = config.get_model();
        let endpoint = config.get_endpoint();
        let timeout_secs = config.get_timeout_secs();

        match config.provider {
            LlmProvider::OpenAI => LanguageModel::OpenAI {
                client: OpenAI::new(config.get_api_key(), endpoint, timeout_secs),
                model,
            },
            LlmProvider::Anthropic => LanguageModel::Anthropic {
                client: Anthropic::new(config.get_api_key(), endpoint, timeout_secs),
                model,
            },
            LlmProvider::Ollama => LanguageModel::Ollama {
                client: Ollama::new(endpoint, timeout_secs, config.retry_count, config.retry_backoff_ms),
                model,
            },
        }
    }

    pub fn mock(client: MockProvider) -> Self {
        LanguageModel::Mock { client }
    }

    /// Human readable backend name
    pub fn name(&self) -> &str {
        match self {
            LanguageModel::OpenAI { .. } => "OpenAI",
            LanguageModel::Anthropic { .. } => "Anthropic",
            LanguageModel::Ollama { .. } => "Ollama",
            LanguageModel::Mock { .. } => "Mock",
        }
    }

    /// Send a single user prompt and return the answer text
    pub async fn generate(&self, prompt: &str, temperature: f32, max_tokens: u32) -> Result<String, ProviderError> {
        match self {
            LanguageModel::OpenAI { client, model } => {
                let request = OpenAIRequest::new(model.as_str())
                    .add_message("user", prompt)
                    .temperature(temperature)
                    .max_tokens(max_tokens);
                let response = client.complete(request).await?;
                Ok(OpenAI::extract_text(&response))
            }
            LanguageModel::Anthropic { client, model } => {
                let request = AnthropicRequest::new(model.as_str(), max_tokens)
                    .add_message("user", prompt)
                    .temperature(temperature);
                let response = client.complete(request).await?;
                Ok(Anthropic::extract_text(&response))
            }
            LanguageModel::Ollama { client, model } => {
                let messages = vec![ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                }];
                let request = ChatRequest::new(model.as_str(), messages)
                    .temperature(temperature)
                    .num_predict(max_tokens);
                let response = client.complete(request).await?;
                Ok(Ollama::extract_text(&response))
            }
            LanguageModel::Mock { client } => {
                let response = client.complete(MockRequest { prompt: prompt.to_string() }).await?;
                Ok(MockProvider::extract_text(&response))
            }
        }
    }

    /// Check that the backend is reachable with the configured model
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        match self {
            LanguageModel::OpenAI { client, .. } => client.test_connection().await,
            LanguageModel::Anthropic { client, model } => client.test_model(model).await,
            LanguageModel::Ollama { client, .. } => client.test_connection().await,
            LanguageModel::Mock { client } => client.test_connection().await,
        }
    }
}
