/*!
 * Builds the restaurant records handed back to callers.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::app_config::MatchingConfig;
use crate::directory::PlaceRecord;
use super::MatchResult;

/// One restaurant as returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantResult {
    pub name: String,
    pub address: String,
    /// Null when the primary directory has no rating for the place
    pub rating: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    pub maps_link: String,
    pub business_link: String,
}

/// Merges a place and its match outcome into a [`RestaurantResult`]
#[derive(Debug, Clone)]
pub struct Assembler {
    maps_link_template: String,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}

impl Assembler {
    pub fn new(config: &MatchingConfig) -> Self {
        Self {
            maps_link_template: config.maps_link_template.clone(),
        }
    }

    pub fn maps_link(&self, place_id: &str) -> String {
        self.maps_link_template.replace("{place_id}", place_id)
    }

    pub fn assemble(&self, target: &PlaceRecord, match_result: MatchResult, location_label: &str) -> RestaurantResult {
        debug!(
            "Assembling '{}' near {} ({})",
            target.name,
            location_label,
            if match_result.matched { "matched" } else { "fallback" }
        );

        RestaurantResult {
            name: target.name.clone(),
            address: target.address.clone(),
            rating: target.rating,
            latitude: target.latitude,
            longitude: target.longitude,
            maps_link: self.maps_link(&target.place_id),
            business_link: match_result.link,
        }
    }
}
