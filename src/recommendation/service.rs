/*!
 * Recommendation service built on a language model.
 */

use log::{debug, warn};

use crate::app_config::RecommendationConfig;
use crate::errors::RecommendationError;
use super::parse::{parse_dish_types, parse_meal_plan, parse_nutrients};
use super::prompts::{dish_types_prompt, meal_plan_prompt, nutrition_prompt};
use super::{DietProfile, LanguageModel, MealPlan, Nutrients};

/// Dish recommendations, meal plans and nutrition estimates
#[derive(Debug)]
pub struct RecommendationService {
    model: LanguageModel,
    config: RecommendationConfig,
}

impl RecommendationService {
    /// Create a service talking to the provider selected in `config`
    pub fn new(config: RecommendationConfig) -> Self {
        Self {
            model: LanguageModel::from_config(&config),
            config,
        }
    }

    /// Create a service over an already built model
    pub fn with_model(model: LanguageModel, config: RecommendationConfig) -> Self {
        Self { model, config }
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, RecommendationError> {
        let text = self.model
            .generate(prompt, self.config.temperature, self.config.get_max_tokens())
            .await?;
        debug!("{} answered with {} chars", self.model.name(), text.len());
        Ok(text)
    }

    /// Three dish types suited to eating out.
    ///
    /// Never fails: provider errors and unusable answers fall back to the
    /// configured default dishes.
    pub async fn recommend_dishes(&self, profile: &DietProfile) -> Vec<String> {
        let prompt = dish_types_prompt(profile);
        let result = match self.generate(&prompt).await {
            Ok(text) => parse_dish_types(&text).map_err(RecommendationError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(dishes) => dishes,
            Err(e) => {
                warn!("Dish recommendation failed, using fallback dishes: {}", e);
                self.config.fallback_dishes.clone()
            }
        }
    }

    /// Breakfast, lunch and dinner with nutrients and advice.
    ///
    /// A meal whose nutrition lookup fails keeps `nutrients: None`.
    pub async fn meal_plan(&self, profile: &DietProfile) -> Result<MealPlan, RecommendationError> {
        let text = self.generate(&meal_plan_prompt(profile)).await?;
        let mut plan = parse_meal_plan(&text)?;

        for meal in plan.meals_mut() {
            match self.nutrition(&meal.dish).await {
                Ok(nutrients) => meal.nutrients = Some(nutrients),
                Err(e) => warn!("No nutrition data for '{}': {}", meal.dish, e),
            }
        }

        Ok(plan)
    }

    /// Approximate nutrients of one dish per 500 g
    pub async fn nutrition(&self, dish: &str) -> Result<Nutrients, RecommendationError> {
        let text = self.generate(&nutrition_prompt(dish)).await?;
        Ok(parse_nutrients(&text)?)
    }
}
