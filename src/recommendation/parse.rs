/*!
 * Parsing of free-form model answers into typed recommendations.
 *
 * Models number their lines, add bullets or wrap names in quotes even when
 * told not to, so every line is cleaned before use.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ParseError;
use super::{Meal, MealPlan, Nutrients};

/// Leading list markers such as "1.", "2)", "-", "*" or "•"
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:\d+\s*[.):-]|[-*•])\s*").unwrap());

/// First brace-delimited block, across lines
static JSON_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\{.*?\}").unwrap());

const ADVICE_PREFIX: &str = "advice:";

/// Strip list markers, emphasis and quotes from one answer line
pub fn clean_line(line: &str) -> String {
    let without_marker = LIST_MARKER.replace(line, "");
    without_marker
        .trim()
        .trim_matches(|c| c == '*' || c == '"')
        .trim()
        .to_string()
}

fn advice_text(line: &str) -> Option<&str> {
    let prefix = line.get(..ADVICE_PREFIX.len())?;
    if prefix.eq_ignore_ascii_case(ADVICE_PREFIX) {
        Some(line[ADVICE_PREFIX.len()..].trim())
    } else {
        None
    }
}

/// Extract up to three dish names, one per line.
pub fn parse_dish_types(text: &str) -> Result<Vec<String>, ParseError> {
    let dishes: Vec<String> = text
        .lines()
        .map(clean_line)
        .filter(|line| !line.is_empty() && advice_text(line).is_none())
        .take(3)
        .collect();

    if dishes.is_empty() {
        return Err(ParseError::NoDishes);
    }
    Ok(dishes)
}

/// Extract breakfast, lunch, dinner and the advice line.
///
/// Missing trailing meals stay `None`. Nutrients are left empty for the
/// caller to fill in.
pub fn parse_meal_plan(text: &str) -> Result<MealPlan, ParseError> {
    let mut dishes = Vec::new();
    let mut advice = None;

    for line in text.lines().map(clean_line).filter(|line| !line.is_empty()) {
        if let Some(advice_line) = advice_text(&line) {
            if advice.is_none() && !advice_line.is_empty() {
                advice = Some(advice_line.to_string());
            }
        } else if dishes.len() < 3 && advice.is_none() {
            dishes.push(line);
        }
    }

    if dishes.is_empty() {
        return Err(ParseError::NoDishes);
    }

    let mut meals = dishes.into_iter().map(Meal::new);
    Ok(MealPlan {
        breakfast: meals.next(),
        lunch: meals.next(),
        dinner: meals.next(),
        advice,
    })
}

/// Parse the first JSON object found in the answer as nutrients.
pub fn parse_nutrients(text: &str) -> Result<Nutrients, ParseError> {
    let block = JSON_BLOCK
        .find(text)
        .ok_or_else(|| ParseError::InvalidNutrition("no JSON object in response".to_string()))?;

    serde_json::from_str(block.as_str()).map_err(|e| ParseError::InvalidNutrition(e.to_string()))
}
