/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use dishfinder::app_config::{Config, LlmProvider};
use dishfinder::app_controller::{Controller, DietRequest, DietResponse, EatLocation};
use dishfinder::directory::Coordinates;
use dishfinder::directory::mock::FixedCityLookup;
use dishfinder::errors::{AppError, ProviderError};
use dishfinder::finder::RestaurantFinder;
use dishfinder::matching::{Assembler, Matcher};
use dishfinder::providers::mock::MockProvider;
use crate::common::{self, business, place};
use crate::common::mock_directories::{ScriptedBusinessDirectory, ScriptedPlaceDirectory};

fn request(eat_location: EatLocation, location: Option<Coordinates>) -> DietRequest {
    DietRequest {
        eat_location,
        profile: common::sample_profile(),
        location,
        radius_meters: None,
    }
}

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let _controller = Controller::with_config(Config::default())?;
    Ok(())
}

#[test]
fn test_handle_home_withBlockingRuntime_shouldProduceThreeMeals() {
    let finder = common::static_finder(Vec::new(), Vec::new(), "Springfield");
    let controller = common::mock_controller(finder, MockProvider::working());

    let result = tokio_test::block_on(async {
        controller.handle(request(EatLocation::Home, None)).await
    });

    let Ok(DietResponse::Home { meal_plan }) = result else {
        panic!("expected a home meal plan");
    };
    assert!(meal_plan.breakfast.is_some() && meal_plan.lunch.is_some() && meal_plan.dinner.is_some());
}

#[test]
fn test_controller_initialization_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.recommendation.provider = LlmProvider::Anthropic;
    assert!(Controller::with_config(config).is_err());
}

#[tokio::test]
async fn test_handle_outside_shouldSearchEachDishInOrder() -> Result<()> {
    let places = ScriptedPlaceDirectory::new()
        .with_answer("Grilled Salmon", vec![place("Salmon House", "2 Dock St", "s1")])
        .with_answer("Quinoa Salad", vec![
            place("Green Bowl", "9 Park Ave", "q1"),
            place("Salad Bar", "10 Park Ave", "q2"),
        ]);
    let businesses = ScriptedBusinessDirectory::new()
        .with_answer("Grilled Salmon", vec![business("Salmon House", "https://www.yelp.com/biz/salmon-house", "2 Dock St")]);
    let finder = RestaurantFinder::new(
        Box::new(places.clone()),
        Box::new(businesses),
        Box::new(FixedCityLookup::new("Springfield")),
        Matcher::default(),
        Assembler::default(),
        5000,
    );
    let controller = common::mock_controller(finder, MockProvider::working());

    let response = controller
        .handle(request(EatLocation::Outside, Some(Coordinates::new(39.78, -89.65))))
        .await?;

    assert_eq!(places.searched_terms(), vec!["Grilled Salmon", "Vegan Stir Fry", "Quinoa Salad"]);
    match response {
        DietResponse::Outside { dishes, restaurants } => {
            assert_eq!(dishes, vec!["Grilled Salmon", "Vegan Stir Fry", "Quinoa Salad"]);
            let names: Vec<&str> = restaurants.iter().map(|r| r.name.as_str()).collect();
            assert_eq!(names, vec!["Salmon House", "Green Bowl", "Salad Bar"]);
            assert_eq!(restaurants[0].business_link, "https://www.yelp.com/biz/salmon-house");
            assert!(restaurants[1].business_link.contains("find_desc=Green+Bowl"));
        }
        other => panic!("expected an outside response, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_handle_outside_withFailingModel_shouldSearchFallbackDishes() -> Result<()> {
    let places = ScriptedPlaceDirectory::new();
    let finder = RestaurantFinder::new(
        Box::new(places.clone()),
        Box::new(ScriptedBusinessDirectory::new()),
        Box::new(FixedCityLookup::new("Springfield")),
        Matcher::default(),
        Assembler::default(),
        5000,
    );
    let controller = common::mock_controller(finder, MockProvider::failing());

    let response = controller
        .handle(request(EatLocation::Outside, Some(Coordinates::new(39.78, -89.65))))
        .await?;

    assert_eq!(places.searched_terms(), vec!["Healthy Salad", "Grilled Chicken", "Steamed Fish"]);
    assert!(matches!(response, DietResponse::Outside { ref restaurants, .. } if restaurants.is_empty()));
    Ok(())
}

#[tokio::test]
async fn test_controller_test_connection_shouldReflectBackendHealth() {
    let healthy = common::mock_controller(
        common::static_finder(Vec::new(), Vec::new(), "Springfield"),
        MockProvider::working(),
    );
    assert!(healthy.test_connection().await.is_ok());

    let down = common::mock_controller(
        common::static_finder(Vec::new(), Vec::new(), "Springfield"),
        MockProvider::failing(),
    );
    assert!(matches!(down.test_connection().await, Err(ProviderError::ConnectionError(_))));
}

#[tokio::test]
async fn test_handle_outside_withoutCoordinates_shouldFail() {
    let finder = common::static_finder(Vec::new(), Vec::new(), "Springfield");
    let controller = common::mock_controller(finder, MockProvider::working());

    let result = controller.handle(request(EatLocation::Outside, None)).await;
    assert!(matches!(result, Err(AppError::MissingCoordinates)));
}

#[tokio::test]
async fn test_handle_home_shouldReturnMealPlanWithNutrition() -> Result<()> {
    let places = ScriptedPlaceDirectory::new();
    let finder = RestaurantFinder::new(
        Box::new(places.clone()),
        Box::new(ScriptedBusinessDirectory::new()),
        Box::new(FixedCityLookup::new("Springfield")),
        Matcher::default(),
        Assembler::default(),
        5000,
    );
    let controller = common::mock_controller(finder, MockProvider::working());

    let response = controller.handle(request(EatLocation::Home, None)).await?;

    assert!(places.searched_terms().is_empty());
    let DietResponse::Home { meal_plan } = response else {
        panic!("expected a home response");
    };
    assert_eq!(meal_plan.breakfast.as_ref().map(|m| m.dish.as_str()), Some("Avocado Toast"));
    assert_eq!(meal_plan.lunch.as_ref().and_then(|m| m.nutrients).map(|n| n.protein), Some(49.0));
    assert!(meal_plan.advice.is_some());
    Ok(())
}

#[tokio::test]
async fn test_handle_home_withFailingModel_shouldReturnRecommendationError() {
    let finder = common::static_finder(Vec::new(), Vec::new(), "Springfield");
    let controller = common::mock_controller(finder, MockProvider::failing());

    let result = controller.handle(request(EatLocation::Home, None)).await;
    assert!(matches!(result, Err(AppError::Recommendation(_))));
}

#[tokio::test]
async fn test_diet_response_shouldSerializeAsTaggedJson() -> Result<()> {
    let finder = common::static_finder(vec![place("Green Bowl", "9 Park Ave", "q1")], Vec::new(), "Springfield");
    let controller = common::mock_controller(finder, MockProvider::working());

    let response = controller
        .handle(request(EatLocation::Outside, Some(Coordinates::new(39.78, -89.65))))
        .await?;
    let json = serde_json::to_value(&response)?;

    assert_eq!(json["eat_location"], "outside");
    assert_eq!(json["dishes"].as_array().map(|d| d.len()), Some(3));
    // the static directory answers every dish with the same place
    assert_eq!(json["restaurants"].as_array().map(|r| r.len()), Some(3));
    Ok(())
}
