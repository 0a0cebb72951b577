use anyhow::{Context, Result};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::app_config::Config;
use crate::directory::Coordinates;
use crate::errors::{AppError, ProviderError};
use crate::finder::RestaurantFinder;
use crate::matching::RestaurantResult;
use crate::recommendation::{DietProfile, MealPlan, RecommendationService};

// @module: Application controller for diet requests

/// Where the user intends to eat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EatLocation {
    /// At a restaurant near the user
    Outside,
    /// At home, from the available ingredients
    Home,
}

impl std::str::FromStr for EatLocation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outside" => Ok(Self::Outside),
            "home" => Ok(Self::Home),
            other => Err(format!("Unknown eat location '{}', expected 'outside' or 'home'", other)),
        }
    }
}

/// A request coming from the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietRequest {
    pub eat_location: EatLocation,
    #[serde(flatten)]
    pub profile: DietProfile,
    /// Required when eating outside
    #[serde(default)]
    pub location: Option<Coordinates>,
    /// Overrides the configured search radius
    #[serde(default)]
    pub radius_meters: Option<u32>,
}

/// Answer to a [`DietRequest`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "eat_location", rename_all = "lowercase")]
pub enum DietResponse {
    /// Recommended dish types and the restaurants found for each, in dish order
    Outside {
        dishes: Vec<String>,
        restaurants: Vec<RestaurantResult>,
    },
    /// Meal plan to cook at home
    Home {
        meal_plan: MealPlan,
    },
}

/// Main application controller
pub struct Controller {
    // @field: Restaurant search across directories
    finder: RestaurantFinder,
    // @field: Language model backed recommendations
    recommender: RecommendationService,
}

impl Controller {
    // @method: Create a controller talking to the services described by `config`
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let finder = RestaurantFinder::from_config(&config);
        let recommender = RecommendationService::new(config.recommendation);
        info!("Using {} for recommendations", recommender.model().name());

        Ok(Self::with_services(finder, recommender))
    }

    /// Create a controller over already built services
    pub fn with_services(finder: RestaurantFinder, recommender: RecommendationService) -> Self {
        Self { finder, recommender }
    }

    // @method: Check that the language model backend answers before starting work
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        let model = self.recommender.model();
        match model.test_connection().await {
            Ok(()) => {
                info!("Successfully connected to {}", model.name());
                Ok(())
            }
            Err(e) => {
                error!("Failed to connect to {}: {}", model.name(), e);
                Err(e)
            }
        }
    }

    /// Handle one diet request
    pub async fn handle(&self, request: DietRequest) -> Result<DietResponse, AppError> {
        match request.eat_location {
            EatLocation::Outside => {
                let location = request.location.ok_or(AppError::MissingCoordinates)?;
                self.eat_outside(&request.profile, location, request.radius_meters).await
            }
            EatLocation::Home => {
                let meal_plan = self.recommender.meal_plan(&request.profile).await?;
                Ok(DietResponse::Home { meal_plan })
            }
        }
    }

    async fn eat_outside(
        &self,
        profile: &DietProfile,
        location: Coordinates,
        radius_meters: Option<u32>,
    ) -> Result<DietResponse, AppError> {
        let dishes = self.recommender.recommend_dishes(profile).await;
        debug!("Recommended dishes: {:?}", dishes);

        let mut restaurants = Vec::new();
        for dish in &dishes {
            let found = self.finder.find_matches(dish, location, radius_meters).await;
            info!("Found {} restaurant(s) for '{}'", found.len(), dish);
            restaurants.extend(found);
        }

        Ok(DietResponse::Outside { dishes, restaurants })
    }
}
