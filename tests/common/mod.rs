/*!
 * Common test utilities for the dishfinder test suite
 */

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use dishfinder::app_controller::Controller;
use dishfinder::directory::{BusinessRecord, PlaceRecord};
use dishfinder::directory::mock::{FixedCityLookup, StaticBusinessDirectory, StaticPlaceDirectory};
use dishfinder::finder::RestaurantFinder;
use dishfinder::matching::{Assembler, Matcher};
use dishfinder::providers::mock::MockProvider;
use dishfinder::recommendation::{DietProfile, LanguageModel, RecommendationService};
use dishfinder::app_config::RecommendationConfig;


/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Path of a config file inside `dir` that does not exist yet
pub fn config_path_in(dir: &TempDir) -> PathBuf {
    dir.path().join("conf.json")
}

/// Primary directory record with the given name and address
pub fn place(name: &str, address: &str, place_id: &str) -> PlaceRecord {
    PlaceRecord {
        name: name.to_string(),
        address: address.to_string(),
        rating: Some(4.2),
        latitude: 39.7817,
        longitude: -89.6501,
        place_id: place_id.to_string(),
    }
}

/// Secondary directory record with the given name, link and address
pub fn business(name: &str, url: &str, address: &str) -> BusinessRecord {
    BusinessRecord {
        name: name.to_string(),
        canonical_url: url.to_string(),
        address: address.to_string(),
    }
}

/// Finder over in-memory directories with default matching settings
pub fn static_finder(places: Vec<PlaceRecord>, businesses: Vec<BusinessRecord>, city: &str) -> RestaurantFinder {
    RestaurantFinder::new(
        Box::new(StaticPlaceDirectory::new(places)),
        Box::new(StaticBusinessDirectory::new(businesses)),
        Box::new(FixedCityLookup::new(city)),
        Matcher::default(),
        Assembler::default(),
        5000,
    )
}

/// Recommendation service answering from the mock provider
pub fn mock_recommender(provider: MockProvider) -> RecommendationService {
    RecommendationService::with_model(LanguageModel::mock(provider), RecommendationConfig::default())
}

/// Controller over the given finder and a mock language model
pub fn mock_controller(finder: RestaurantFinder, provider: MockProvider) -> Controller {
    Controller::with_services(finder, mock_recommender(provider))
}

/// A typical profile for someone trying to eat healthier
pub fn sample_profile() -> DietProfile {
    DietProfile {
        preferences: vec!["vegetarian".to_string()],
        goal: "lose weight".to_string(),
        allergies: vec!["shellfish".to_string()],
        ingredients: vec!["eggs".to_string(), "spinach".to_string()],
    }
}
