/*!
 * Reverse geocoding adapter resolving a position to its city name.
 */

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::app_config::GeocodingConfig;
use crate::errors::DirectoryError;
use super::{CityLookup, Coordinates, UNKNOWN_LOCATION};

/// Client for the reverse geocoding endpoint
pub struct GeocodingClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
pub struct AddressComponent {
    pub long_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl GeocodeResponse {
    /// Locality name of the first result, if any
    pub fn city_name(&self) -> Option<&str> {
        self.results
            .first()?
            .address_components
            .iter()
            .find(|component| component.types.iter().any(|t| t == "locality"))
            .map(|component| component.long_name.as_str())
    }
}

impl GeocodingClient {
    pub fn new(config: &GeocodingConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }

    async fn try_resolve(&self, location: Coordinates) -> Result<Option<String>, DirectoryError> {
        let url = format!("{}/maps/api/geocode/json", self.endpoint);
        let response = self.client.get(&url)
            .query(&[("latlng", location.to_string()), ("key", self.api_key.clone())])
            .send()
            .await?
            .error_for_status()?;

        let body: GeocodeResponse = response.json().await?;
        Ok(body.city_name().map(str::to_string))
    }
}

#[async_trait]
impl CityLookup for GeocodingClient {
    async fn resolve(&self, location: Coordinates) -> String {
        match self.try_resolve(location).await {
            Ok(Some(city)) => {
                debug!("Resolved {} to {}", location, city);
                city
            }
            Ok(None) => {
                debug!("No locality found for {}", location);
                UNKNOWN_LOCATION.to_string()
            }
            Err(e) => {
                warn!("Reverse geocoding failed for {}: {}", location, e);
                UNKNOWN_LOCATION.to_string()
            }
        }
    }
}
