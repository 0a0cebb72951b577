/*!
 * Integration tests for restaurant search across both directories
 */

use dishfinder::app_config::Config;
use dishfinder::directory::mock::{FixedCityLookup, StaticBusinessDirectory, StaticPlaceDirectory};
use dishfinder::directory::{Coordinates, UNKNOWN_LOCATION};
use dishfinder::finder::RestaurantFinder;
use dishfinder::matching::{Assembler, Matcher};
use crate::common::{self, business, place};

fn springfield() -> Coordinates {
    Coordinates::new(39.7817, -89.6501)
}

#[tokio::test]
async fn test_find_matches_withMixedCandidates_shouldLinkAndFallBack() {
    let places = vec![
        place("Tony's Pizza", "12 Main St, Springfield", "p1"),
        place("XYZ Diner", "1 Oak Ave, Springfield", "p2"),
    ];
    let businesses = vec![
        business("Tonys Pizza", "https://www.yelp.com/biz/tonys-pizza-springfield", "12 Main Street Springfield, IL 62701"),
        business("Completely Different Place", "https://www.yelp.com/biz/other", "77 Far Rd"),
    ];
    let finder = common::static_finder(places, businesses, "Springfield");

    let results = finder.find_matches("pizza", springfield(), None).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "Tony's Pizza");
    assert_eq!(results[0].business_link, "https://www.yelp.com/biz/tonys-pizza-springfield");
    assert_eq!(results[1].name, "XYZ Diner");
    assert_eq!(
        results[1].business_link,
        "https://www.yelp.com/search?find_desc=XYZ+Diner&find_loc=Springfield"
    );
    assert_eq!(results[1].maps_link, "https://www.google.com/maps/place/?q=place_id:p2");
}

#[tokio::test]
async fn test_find_matches_withManyCandidates_shouldNeverExceedFive() {
    let places = (0..5).map(|i| place(&format!("Noodle Bar {}", i), "5 Elm St", &format!("p{}", i))).collect();
    let businesses = (0..40).map(|i| business(&format!("Noodle Bar {}", i), &format!("u{}", i), "5 Elm St")).collect();
    let finder = common::static_finder(places, businesses, "Springfield");

    let results = finder.find_matches("noodles", springfield(), None).await;

    assert_eq!(results.len(), 5);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.business_link, format!("u{}", i));
    }
}

#[tokio::test]
async fn test_find_matches_withSecondaryDirectoryDown_shouldUseFallbackLinks() {
    let places = StaticPlaceDirectory::new(vec![place("Blue Door Cafe", "5 Elm St", "p1")]);
    let businesses = StaticBusinessDirectory::empty();
    let city = FixedCityLookup::new(UNKNOWN_LOCATION);
    let finder = RestaurantFinder::new(
        Box::new(places.clone()),
        Box::new(businesses.clone()),
        Box::new(city.clone()),
        Matcher::default(),
        Assembler::default(),
        5000,
    );

    let results = finder.find_matches("coffee", springfield(), Some(800)).await;

    assert_eq!(results.len(), 1);
    assert!(results[0].business_link.ends_with("find_desc=Blue+Door+Cafe&find_loc=Unknown Location"));
    assert_eq!(places.calls(), 1);
    assert_eq!(businesses.calls(), 1);
    assert_eq!(city.calls(), 1);
    assert_eq!(places.last_radius(), 800);
}

#[tokio::test]
async fn test_find_matches_withDuplicateCandidateNames_shouldUseLastRecord() {
    let places = vec![place("Golden Wok", "8 River Rd", "p1")];
    let businesses = vec![
        business("Golden Wok", "https://www.yelp.com/biz/golden-wok-old", "8 River Rd"),
        business("GOLDEN WOK", "https://www.yelp.com/biz/golden-wok", "8 River Rd"),
    ];
    let finder = common::static_finder(places, businesses, "Springfield");

    let results = finder.find_matches("chinese", springfield(), None).await;
    assert_eq!(results[0].business_link, "https://www.yelp.com/biz/golden-wok");
}

#[tokio::test]
async fn test_find_matches_withUnreachableDirectories_shouldReturnEmpty() {
    let mut config = Config::default();
    for endpoint in [
        &mut config.directories.places.endpoint,
        &mut config.directories.yelp.endpoint,
        &mut config.directories.geocoding.endpoint,
    ] {
        *endpoint = "http://127.0.0.1:9".to_string();
    }
    config.directories.places.timeout_secs = 2;
    config.directories.yelp.timeout_secs = 2;
    config.directories.geocoding.timeout_secs = 2;

    let finder = RestaurantFinder::from_config(&config);
    let results = finder.find_matches("pizza", springfield(), None).await;

    assert!(results.is_empty());
}

#[tokio::test]
async fn test_restaurant_result_shouldSerializeNullRating() {
    let mut unrated = place("New Spot", "3 Pine St", "p9");
    unrated.rating = None;
    let finder = common::static_finder(vec![unrated], Vec::new(), "Springfield");

    let results = finder.find_matches("tacos", springfield(), None).await;
    let json = serde_json::to_value(&results).unwrap();

    assert!(json[0]["rating"].is_null());
    assert_eq!(json[0]["name"], "New Spot");
}
