/*!
 * Tests for the matcher, the similarity scores and result assembly
 */

use dishfinder::app_config::MatchingConfig;
use dishfinder::directory::{CandidateSet, UNKNOWN_LOCATION};
use dishfinder::matching::{select_best, Assembler, MatchResult, Matcher};
use dishfinder::normalizer::{search_query, search_safe_name};
use dishfinder::similarity::{partial_ratio, ratio};
use crate::common::{business, place};

#[test]
fn test_normalizer_withPunctuationAndAccents_shouldStripThem() {
    assert_eq!(search_safe_name("Joe's Café #2"), "Joes Caf 2");
    assert_eq!(search_query("XYZ Diner"), "XYZ+Diner");
    assert_eq!(search_safe_name("¡¿!?"), "");
}

#[test]
fn test_scores_withIdenticalInput_shouldBe100() {
    for text in ["", "tony's pizza", "12 main st, springfield", "東京"] {
        assert_eq!(ratio(text, text), 100.0);
        assert_eq!(partial_ratio(text, text), 100.0);
    }
}

#[test]
fn test_select_best_withOrderedScores_shouldFollowTieAndThresholdRules() {
    assert_eq!(select_best(vec![("x", 80.0), ("y", 76.0)], 75.0).map(|(item, _)| item), Some("x"));
    assert_eq!(select_best(vec![("x", 76.0), ("y", 76.0)], 75.0).map(|(item, _)| item), Some("x"));
    assert_eq!(select_best(vec![("x", 75.0)], 75.0), None);
    assert_eq!(select_best(vec![("x", 75.0001)], 75.0).map(|(item, _)| item), Some("x"));
}

#[test]
fn test_match_target_withSpringfieldPizzeria_shouldLinkCandidate() {
    let matcher = Matcher::default();
    let target = place("Tony's Pizza", "12 Main St, Springfield", "p1");
    let candidates: CandidateSet = vec![business("tonys pizza", "u1", "12 Main Street Springfield")]
        .into_iter()
        .collect();

    let (_, total) = matcher.best_match(&target, &candidates).unwrap();
    assert!(total > 75.0 && total <= 100.0, "total was {}", total);
    assert_eq!(
        matcher.match_target(&target, &candidates, "Springfield"),
        MatchResult { matched: true, link: "u1".to_string() }
    );
}

#[test]
fn test_match_target_withSentinelCity_shouldKeepItVerbatim() {
    let matcher = Matcher::default();
    let target = place("XYZ Diner", "1 Oak Ave", "p2");
    let candidates: CandidateSet = vec![business("Completely Different Place", "u2", "400 Lake Blvd")]
        .into_iter()
        .collect();

    let result = matcher.match_target(&target, &candidates, UNKNOWN_LOCATION);
    assert!(!result.matched);
    assert_eq!(
        result.link,
        "https://www.yelp.com/search?find_desc=XYZ+Diner&find_loc=Unknown Location"
    );
}

#[test]
fn test_matcher_withStricterThreshold_shouldRejectNearMatch() {
    let config = MatchingConfig {
        match_threshold: 99.0,
        ..MatchingConfig::default()
    };
    let matcher = Matcher::new(&config);
    let target = place("Tony's Pizza", "12 Main St, Springfield", "p1");
    let candidates: CandidateSet = vec![business("tonys pizza", "u1", "12 Main Street Springfield")]
        .into_iter()
        .collect();

    assert!(!matcher.match_target(&target, &candidates, "Springfield").matched);
}

#[test]
fn test_matcher_withCustomSearchHost_shouldUseItForFallback() {
    let config = MatchingConfig {
        fallback_search_url: "https://search.example/find".to_string(),
        ..MatchingConfig::default()
    };
    let matcher = Matcher::new(&config);
    let link = matcher.fallback_link(&place("Blue Door", "", "p3"), "Springfield");
    assert_eq!(link, "https://search.example/find?find_desc=Blue+Door&find_loc=Springfield");
}

#[test]
fn test_same_candidate_shouldMatchSeveralTargets() {
    let matcher = Matcher::default();
    let candidates: CandidateSet = vec![business("Golden Wok", "wok", "8 River Rd")].into_iter().collect();

    let first = matcher.match_target(&place("Golden Wok", "8 River Rd", "a"), &candidates, "X");
    let second = matcher.match_target(&place("Golden Wok", "8 River Road", "b"), &candidates, "X");
    assert_eq!(first.link, "wok");
    assert_eq!(second.link, "wok");
}

#[test]
fn test_assembler_shouldMergePlaceAndMatch() {
    let assembler = Assembler::default();
    let target = place("Tony's Pizza", "12 Main St, Springfield", "ChIJabc");
    let result = assembler.assemble(&target, MatchResult { matched: true, link: "u1".to_string() }, "Springfield");

    assert_eq!(result.name, target.name);
    assert_eq!(result.rating, Some(4.2));
    assert_eq!(result.latitude, target.latitude);
    assert_eq!(result.maps_link, "https://www.google.com/maps/place/?q=place_id:ChIJabc");
    assert_eq!(result.business_link, "u1");
}
