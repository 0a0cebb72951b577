/*!
 * # dishfinder - Diet-aware dish and restaurant recommendations
 *
 * A Rust library that turns dietary preferences into dish suggestions and
 * finds nearby restaurants serving them, linked across two business
 * directories.
 *
 * ## Features
 *
 * - Dish, meal plan and nutrition suggestions from various AI providers:
 *   - Ollama (local LLM)
 *   - OpenAI API
 *   - Anthropic API
 * - Nearby restaurant search in a primary places directory
 * - Fuzzy name and address matching against a secondary business directory
 * - Search link fallback when no confident match exists
 * - Degrade-to-empty directory adapters: a failing upstream never fails a request
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `normalizer`: Search-safe business names
 * - `similarity`: Edit-distance string similarity on a 0-100 scale
 * - `directory`: Directory records and adapters:
 *   - `directory::places`: Primary radius search
 *   - `directory::yelp`: Secondary keyword search
 *   - `directory::geocoding`: Reverse geocoding to a city name
 *   - `directory::mock`: In-memory directories
 * - `matching`: Weighted name/address matcher and result assembly
 * - `finder`: Restaurant search across both directories
 * - `recommendation`: Prompts, parsing and the recommendation service
 * - `providers`: Client implementations for various LLM providers
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod directory;
pub mod errors;
pub mod finder;
pub mod matching;
pub mod normalizer;
pub mod providers;
pub mod recommendation;
pub mod similarity;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, DietRequest, DietResponse, EatLocation};
pub use directory::{BusinessRecord, CandidateSet, Coordinates, PlaceRecord};
pub use finder::RestaurantFinder;
pub use matching::{MatchResult, Matcher, RestaurantResult};
pub use recommendation::{DietProfile, MealPlan, RecommendationService};
pub use errors::{AppError, DirectoryError, ParseError, ProviderError, RecommendationError};
