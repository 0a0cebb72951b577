/*!
 * Yelp business search adapter (secondary directory).
 */

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::app_config::YelpConfig;
use crate::errors::DirectoryError;
use super::{BusinessDirectory, BusinessRecord, Coordinates};

/// Client for the business search endpoint
pub struct YelpClient {
    client: Client,
    api_key: String,
    endpoint: String,
    category: String,
    result_limit: usize,
}

#[derive(Debug, Deserialize)]
pub struct BusinessSearchResponse {
    #[serde(default)]
    pub businesses: Option<Vec<Business>>,
}

#[derive(Debug, Deserialize)]
pub struct Business {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub location: Option<BusinessLocation>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BusinessLocation {
    #[serde(default)]
    pub display_address: Vec<String>,
}

impl From<Business> for BusinessRecord {
    fn from(business: Business) -> Self {
        let address = business.location
            .map(|location| location.display_address.join(" "))
            .unwrap_or_default();
        BusinessRecord {
            name: business.name,
            canonical_url: business.url,
            address,
        }
    }
}

impl BusinessSearchResponse {
    pub fn into_records(self) -> Vec<BusinessRecord> {
        self.businesses
            .unwrap_or_default()
            .into_iter()
            .map(BusinessRecord::from)
            .collect()
    }
}

impl YelpClient {
    pub fn new(config: &YelpConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: config.api_key.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            category: config.category.clone(),
            result_limit: config.result_limit,
        }
    }

    async fn try_search(&self, term: &str, location: Coordinates) -> Result<Vec<BusinessRecord>, DirectoryError> {
        let url = format!("{}/v3/businesses/search", self.endpoint);
        let response = self.client.get(&url)
            .bearer_auth(&self.api_key)
            .query(&[
                ("term", term.to_string()),
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("categories", self.category.clone()),
                ("limit", self.result_limit.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: BusinessSearchResponse = response.json().await?;
        if body.businesses.is_none() {
            return Err(DirectoryError::UnexpectedPayload("no businesses field".to_string()));
        }
        Ok(body.into_records())
    }
}

#[async_trait]
impl BusinessDirectory for YelpClient {
    async fn search(&self, term: &str, location: Coordinates) -> Vec<BusinessRecord> {
        match self.try_search(term, location).await {
            Ok(records) => {
                debug!("Yelp search '{}' near {} returned {} record(s)", term, location, records.len());
                records
            }
            Err(e) => {
                warn!("Yelp search '{}' failed, continuing without candidates: {}", term, e);
                Vec::new()
            }
        }
    }
}
