/*!
 * Cross-directory record matching.
 *
 * For one primary place, every secondary candidate is scored on name and
 * address similarity. The best candidate is accepted only when its weighted
 * score clears the threshold; otherwise a search link is synthesized so the
 * caller always gets a usable business link.
 */

use log::debug;
use serde::Serialize;

use crate::app_config::MatchingConfig;
use crate::directory::{BusinessRecord, CandidateSet, PlaceRecord};
use crate::normalizer;
use crate::similarity;

pub mod assembler;

pub use assembler::{Assembler, RestaurantResult};

/// Outcome of matching one place against the candidate set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// True when a candidate cleared the threshold
    pub matched: bool,
    /// Canonical link of the accepted candidate, or the fallback search link
    pub link: String,
}

/// Similarity breakdown of one place/candidate pair, each on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub name_score: f64,
    pub address_score: f64,
    pub total_score: f64,
}

/// Weighted name/address matcher
#[derive(Debug, Clone)]
pub struct Matcher {
    name_weight: f64,
    address_weight: f64,
    threshold: f64,
    fallback_search_url: String,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}

impl Matcher {
    pub fn new(config: &MatchingConfig) -> Self {
        Self {
            name_weight: config.name_weight,
            address_weight: config.address_weight,
            threshold: config.match_threshold,
            fallback_search_url: config.fallback_search_url.clone(),
        }
    }

    /// Score a candidate against a place.
    ///
    /// `candidate_name` is the candidate's lookup key. Both sides are
    /// lowercased; no other normalization is applied.
    pub fn score(&self, target: &PlaceRecord, candidate_name: &str, candidate: &BusinessRecord) -> MatchScore {
        let name_score = similarity::ratio(&target.name.to_lowercase(), &candidate_name.to_lowercase());
        let address_score = similarity::partial_ratio(
            &target.address.to_lowercase(),
            &candidate.address.to_lowercase(),
        );
        MatchScore {
            name_score,
            address_score,
            total_score: self.name_weight * name_score + self.address_weight * address_score,
        }
    }

    /// Best candidate strictly above the threshold, with its total score
    pub fn best_match<'a>(&self, target: &PlaceRecord, candidates: &'a CandidateSet) -> Option<(&'a BusinessRecord, f64)> {
        let scored = candidates.iter().map(|(key, candidate)| {
            let score = self.score(target, key, candidate);
            (candidate, score.total_score)
        });
        select_best(scored, self.threshold)
    }

    /// Match a place against the candidate set.
    ///
    /// `city` is the resolved city name used in the fallback link; it is
    /// inserted as given, sentinel included.
    pub fn match_target(&self, target: &PlaceRecord, candidates: &CandidateSet, city: &str) -> MatchResult {
        if candidates.is_empty() {
            return MatchResult {
                matched: false,
                link: self.fallback_link(target, city),
            };
        }

        match self.best_match(target, candidates) {
            Some((candidate, total_score)) => {
                debug!("Matched '{}' to '{}' (score {:.1})", target.name, candidate.name, total_score);
                MatchResult {
                    matched: true,
                    link: candidate.canonical_url.clone(),
                }
            }
            None => {
                debug!("No confident match for '{}', using search link", target.name);
                MatchResult {
                    matched: false,
                    link: self.fallback_link(target, city),
                }
            }
        }
    }

    /// Search link for a place that could not be matched
    pub fn fallback_link(&self, target: &PlaceRecord, city: &str) -> String {
        format!(
            "{}?find_desc={}&find_loc={}",
            self.fallback_search_url,
            normalizer::search_query(&target.name),
            city
        )
    }
}

/// Pick the first item holding the highest score, if that score is strictly
/// above `threshold`.
///
/// A later item replaces the current best only with a strictly greater
/// score, so ties go to the item seen first.
pub fn select_best<T>(scored: impl IntoIterator<Item = (T, f64)>, threshold: f64) -> Option<(T, f64)> {
    let mut best: Option<(T, f64)> = None;
    let mut best_score = 0.0;

    for (item, score) in scored {
        if score > best_score && score > threshold {
            best_score = score;
            best = Some((item, score));
        }
    }

    best
}
