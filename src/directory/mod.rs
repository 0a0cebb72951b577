/*!
 * Business directory records and the adapters that fetch them.
 *
 * Two independent directories are reconciled by the matcher:
 * - `places`: the primary directory, searched by radius around a position.
 *   Its records carry geometry and are the ones returned to the caller.
 * - `yelp`: the secondary directory, searched by keyword. Its records only
 *   contribute a canonical business link.
 *
 * Every adapter degrades to an empty result set on transport errors or
 * unexpected payloads. Callers never see a directory error.
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod places;
pub mod yelp;
pub mod geocoding;
pub mod mock;

/// Sentinel returned by a city lookup that could not resolve a place name
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

/// A position on the globe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// A place found by the primary radius search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    pub address: String,
    pub rating: Option<f64>,
    pub latitude: f64,
    pub longitude: f64,
    pub place_id: String,
}

/// A business found by the secondary keyword search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub name: String,
    pub canonical_url: String,
    pub address: String,
}

impl BusinessRecord {
    /// Lookup key of this record: its lowercased name
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Secondary directory results keyed by lowercased name
///
/// Iteration follows first-insertion order. Inserting a record whose key is
/// already present replaces the stored record but keeps the original
/// position, so the last record with a given name wins.
#[derive(Debug, Clone, Default)]
pub struct CandidateSet {
    entries: Vec<(String, BusinessRecord)>,
    index: HashMap<String, usize>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record under its lowercased name, returning the record it replaced
    pub fn insert(&mut self, record: BusinessRecord) -> Option<BusinessRecord> {
        let key = record.key();
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, record)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
                None
            }
        }
    }

    /// Look up a record by its lowercased name
    pub fn get(&self, key: &str) -> Option<&BusinessRecord> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(key, record)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BusinessRecord)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }
}

impl FromIterator<BusinessRecord> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = BusinessRecord>>(iter: I) -> Self {
        let mut set = CandidateSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}

/// Primary directory: places within a radius of a position
#[async_trait]
pub trait PlaceDirectory: Send + Sync {
    /// Search places matching `term` within `radius_meters` of `location`.
    ///
    /// Results keep the upstream relevance order and are capped by the
    /// adapter's own result limit. Failures yield an empty list.
    async fn search(&self, term: &str, location: Coordinates, radius_meters: u32) -> Vec<PlaceRecord>;
}

/// Secondary directory: businesses matching a keyword near a position
#[async_trait]
pub trait BusinessDirectory: Send + Sync {
    /// Search businesses matching `term` near `location`, in no particular order.
    /// Failures yield an empty list.
    async fn search(&self, term: &str, location: Coordinates) -> Vec<BusinessRecord>;
}

/// Reverse geocoding of a position to a human readable city name
#[async_trait]
pub trait CityLookup: Send + Sync {
    /// Resolve the city name, or [`UNKNOWN_LOCATION`] when it cannot be found
    async fn resolve(&self, location: Coordinates) -> String;
}
