//! Detail record model
//!
//! Display-ready projection of a single exact-match candidate. Fields are read one
//! at a time from the raw JSON so that a candidate with absent or oddly typed
//! attributes still produces a card, with placeholders in the gaps.
//!
//! Currency and language mappings are read in code order, so the "first" currency
//! and the language list are stable across runs.

use crate::repl::models::country::NOT_APPLICABLE;
use serde_json::Value;

/// Attributes of the detail card that can be missing from a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailField {
    Flag,
    Name,
    Capital,
    Continent,
    Population,
    Currency,
    Languages,
}

/// Normalized single-country record for the detail view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    pub flag_url: String,
    pub common_name: String,
    pub capital: String,
    pub continent: String,
    /// Raw head count; formatting is left to the view
    pub population: Option<u64>,
    /// "Euro - EUR"
    pub currency: String,
    /// "French, German"
    pub languages: String,
    missing: Vec<DetailField>,
}

impl DetailRecord {
    /// Project a raw candidate into a display record.
    ///
    /// An empty capital list is a legitimate state and yields the placeholder
    /// without being reported as missing.
    pub fn from_candidate(candidate: &Value) -> Self {
        let mut missing = Vec::new();
        let mut take = |field: DetailField, value: Option<String>| {
            value.unwrap_or_else(|| {
                missing.push(field);
                NOT_APPLICABLE.to_string()
            })
        };

        let flag_url = take(
            DetailField::Flag,
            text_at(candidate, "/flags/svg").or_else(|| text_at(candidate, "/flags/png")),
        );
        let common_name = take(DetailField::Name, text_at(candidate, "/name/common"));
        let continent = take(DetailField::Continent, text_at(candidate, "/continents/0"));
        let currency = take(DetailField::Currency, first_currency(candidate));
        let languages = take(DetailField::Languages, joined_languages(candidate));

        let capital = match candidate.get("capital").and_then(Value::as_array) {
            Some(capitals) if capitals.is_empty() => NOT_APPLICABLE.to_string(),
            Some(capitals) => take(
                DetailField::Capital,
                capitals[0].as_str().map(str::to_string),
            ),
            None => take(DetailField::Capital, None),
        };

        let population = candidate.get("population").and_then(Value::as_u64);
        if population.is_none() {
            missing.push(DetailField::Population);
        }

        Self {
            flag_url,
            common_name,
            capital,
            continent,
            population,
            currency,
            languages,
            missing,
        }
    }

    /// Fields that were absent or unreadable in the candidate
    pub fn missing_fields(&self) -> &[DetailField] {
        &self.missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// Population as text, or the placeholder
    pub fn population_text(&self) -> String {
        self.population
            .map(|p| p.to_string())
            .unwrap_or_else(|| NOT_APPLICABLE.to_string())
    }
}

fn text_at(value: &Value, pointer: &str) -> Option<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// First currency by code, as "<name> - <code>"
fn first_currency(candidate: &Value) -> Option<String> {
    let currencies = candidate.get("currencies")?.as_object()?;
    let (code, info) = currencies.iter().min_by(|a, b| a.0.cmp(b.0))?;
    let name = info.get("name")?.as_str()?;
    Some(format!("{name} - {code}"))
}

/// All language display names ordered by language code, comma separated
fn joined_languages(candidate: &Value) -> Option<String> {
    let languages = candidate.get("languages")?.as_object()?;
    let mut entries: Vec<(&String, &Value)> = languages.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    let names: Vec<&str> = entries.iter().filter_map(|(_, v)| v.as_str()).collect();
    if names.is_empty() {
        return None;
    }
    Some(names.join(", "))
}
