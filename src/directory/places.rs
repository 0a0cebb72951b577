/*!
 * Places nearby-search adapter (primary directory).
 */

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::app_config::PlacesConfig;
use crate::errors::DirectoryError;
use super::{Coordinates, PlaceDirectory, PlaceRecord};

/// Client for the nearby-search endpoint
pub struct PlacesClient {
    client: Client,
    api_key: String,
    endpoint: String,
    place_type: String,
    result_limit: usize,
}

/// Nearby search response body
#[derive(Debug, Deserialize)]
pub struct NearbySearchResponse {
    /// Missing when the request was rejected
    #[serde(default)]
    pub results: Option<Vec<NearbyPlace>>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NearbyPlace {
    #[serde(default)]
    pub name: Option<String>,
    /// Short street address
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl NearbyPlace {
    fn into_record(self) -> Option<PlaceRecord> {
        let geometry = self.geometry?;
        Some(PlaceRecord {
            name: self.name?,
            address: self.vicinity.unwrap_or_default(),
            rating: self.rating,
            latitude: geometry.location.lat,
            longitude: geometry.location.lng,
            place_id: self.place_id?,
        })
    }
}

impl NearbySearchResponse {
    /// Convert to records, keeping upstream order and truncating to `limit`.
    /// Places without a name, id, or geometry are dropped.
    pub fn into_records(self, limit: usize) -> Vec<PlaceRecord> {
        self.results
            .unwrap_or_default()
            .into_iter()
            .filter_map(NearbyPlace::into_record)
            .take(limit)
            .collect()
    }
}

impl PlacesClient {
    pub fn new(config: &PlacesConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            place_type: config.place_type.clone(),
            result_limit: config.result_limit,
        }
    }

    async fn try_search(&self, term: &str, location: Coordinates, radius_meters: u32) -> Result<Vec<PlaceRecord>, DirectoryError> {
        let url = format!("{}/maps/api/place/nearbysearch/json", self.endpoint);
        let response = self.client.get(&url)
            .query(&[
                ("location", location.to_string()),
                ("radius", radius_meters.to_string()),
                ("keyword", term.to_string()),
                ("type", self.place_type.clone()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: NearbySearchResponse = response.json().await?;
        if body.results.is_none() {
            return Err(DirectoryError::UnexpectedPayload(format!(
                "no results field (status {})",
                body.status.as_deref().unwrap_or("missing")
            )));
        }
        Ok(body.into_records(self.result_limit))
    }
}

#[async_trait]
impl PlaceDirectory for PlacesClient {
    async fn search(&self, term: &str, location: Coordinates, radius_meters: u32) -> Vec<PlaceRecord> {
        match self.try_search(term, location, radius_meters).await {
            Ok(records) => {
                debug!("Places search '{}' near {} returned {} record(s)", term, location, records.len());
                records
            }
            Err(e) => {
                warn!("Places search '{}' failed, continuing without results: {}", term, e);
                Vec::new()
            }
        }
    }
}
