/*!
 * Restaurant search across both business directories.
 *
 * A search runs both directory fetches concurrently, waits for both, then
 * matches every primary place against the secondary candidates and emits
 * one [`RestaurantResult`] per place, in the primary directory's order.
 */

use log::{debug, info};

use crate::app_config::Config;
use crate::directory::geocoding::GeocodingClient;
use crate::directory::places::PlacesClient;
use crate::directory::yelp::YelpClient;
use crate::directory::{BusinessDirectory, CandidateSet, CityLookup, Coordinates, PlaceDirectory};
use crate::matching::{Assembler, Matcher, RestaurantResult};

/// Most results returned for one search term
pub const MAX_RESULTS: usize = 5;

/// Finds restaurants for a dish and links them across directories
pub struct RestaurantFinder {
    places: Box<dyn PlaceDirectory>,
    businesses: Box<dyn BusinessDirectory>,
    city_lookup: Box<dyn CityLookup>,
    matcher: Matcher,
    assembler: Assembler,
    default_radius: u32,
    result_limit: usize,
}

impl RestaurantFinder {
    /// Create a finder over the given collaborators
    pub fn new(
        places: Box<dyn PlaceDirectory>,
        businesses: Box<dyn BusinessDirectory>,
        city_lookup: Box<dyn CityLookup>,
        matcher: Matcher,
        assembler: Assembler,
        default_radius: u32,
    ) -> Self {
        Self {
            places,
            businesses,
            city_lookup,
            matcher,
            assembler,
            default_radius,
            result_limit: MAX_RESULTS,
        }
    }

    /// Create a finder talking to the HTTP directories described by `config`
    pub fn from_config(config: &Config) -> Self {
        let directories = &config.directories;
        let mut finder = Self::new(
            Box::new(PlacesClient::new(&directories.places)),
            Box::new(YelpClient::new(&directories.yelp)),
            Box::new(GeocodingClient::new(&directories.geocoding)),
            Matcher::new(&config.matching),
            Assembler::new(&config.matching),
            directories.places.radius_meters,
        );
        finder.result_limit = directories.places.result_limit.min(MAX_RESULTS);
        finder
    }

    /// Find restaurants serving `term` around `location`.
    ///
    /// `radius_override` replaces the configured search radius. Never fails:
    /// directory problems show up as fewer results or fallback links.
    pub async fn find_matches(
        &self,
        term: &str,
        location: Coordinates,
        radius_override: Option<u32>,
    ) -> Vec<RestaurantResult> {
        let radius = radius_override.unwrap_or(self.default_radius);
        debug!("Searching '{}' within {}m of {}", term, radius, location);

        let (places, businesses) = tokio::join!(
            self.places.search(term, location, radius),
            self.businesses.search(term, location)
        );

        if places.is_empty() {
            info!("No places found for '{}'", term);
            return Vec::new();
        }

        let candidates: CandidateSet = businesses.into_iter().collect();
        let city = self.city_lookup.resolve(location).await;
        debug!(
            "Matching {} place(s) against {} candidate(s) in {}",
            places.len(),
            candidates.len(),
            city
        );

        places
            .iter()
            .take(self.result_limit)
            .map(|place| {
                let match_result = self.matcher.match_target(place, &candidates, &city);
                self.assembler.assemble(place, match_result, &city)
            })
            .collect()
    }
}
