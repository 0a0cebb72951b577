/*!
 * In-memory directories for tests and offline runs.
 *
 * Each mock counts its calls so tests can check how the finder drives them.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

use super::{
    BusinessDirectory, BusinessRecord, CityLookup, Coordinates, PlaceDirectory, PlaceRecord,
};

/// Primary directory returning a fixed list of places
#[derive(Debug, Clone)]
pub struct StaticPlaceDirectory {
    records: Vec<PlaceRecord>,
    result_limit: usize,
    calls: Arc<AtomicUsize>,
    last_radius: Arc<AtomicU32>,
}

impl StaticPlaceDirectory {
    /// Directory answering every search with `records`, capped at 5 like the real adapter
    pub fn new(records: Vec<PlaceRecord>) -> Self {
        Self {
            records,
            result_limit: 5,
            calls: Arc::new(AtomicUsize::new(0)),
            last_radius: Arc::new(AtomicU32::new(0)),
        }
    }

    /// Change the cap applied to every answer
    pub fn with_result_limit(mut self, result_limit: usize) -> Self {
        self.result_limit = result_limit;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Radius passed to the most recent search, 0 before any search
    pub fn last_radius(&self) -> u32 {
        self.last_radius.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlaceDirectory for StaticPlaceDirectory {
    async fn search(&self, _term: &str, _location: Coordinates, radius_meters: u32) -> Vec<PlaceRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.last_radius.store(radius_meters, Ordering::SeqCst);
        self.records.iter().take(self.result_limit).cloned().collect()
    }
}

/// Secondary directory returning a fixed list of businesses
#[derive(Debug, Clone)]
pub struct StaticBusinessDirectory {
    records: Vec<BusinessRecord>,
    calls: Arc<AtomicUsize>,
}

impl StaticBusinessDirectory {
    pub fn new(records: Vec<BusinessRecord>) -> Self {
        Self {
            records,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Directory that never finds anything
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BusinessDirectory for StaticBusinessDirectory {
    async fn search(&self, _term: &str, _location: Coordinates) -> Vec<BusinessRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.records.clone()
    }
}

/// City lookup answering with a fixed name
#[derive(Debug, Clone)]
pub struct FixedCityLookup {
    city: String,
    calls: Arc<AtomicUsize>,
}

impl FixedCityLookup {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CityLookup for FixedCityLookup {
    async fn resolve(&self, _location: Coordinates) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.city.clone()
    }
}
