//! Country record model
//!
//! Mirrors the subset of the REST Countries v3.1 record shape the tool displays.
//! Only the common name is required; every other attribute falls back to an
//! empty value when the provider omits it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder for attributes that have no value to display
pub const NOT_APPLICABLE: &str = "N/A";

/// Name block of a country record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: Option<String>,
}

/// Flag image URLs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub svg: Option<String>,
    #[serde(default)]
    pub png: Option<String>,
}

/// Display information for a single currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

/// One country's public attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: CountryName,
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub region: String,
    /// Ordered capitals; empty is a valid state ("no capital")
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub continents: Vec<String>,
    /// Currency code -> currency info, iterated in key order
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    /// Language code -> display name, iterated in key order
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    #[serde(default)]
    pub flags: Flags,
}

impl CountryRecord {
    /// Create a record with only a name and population set
    pub fn new(common_name: &str, population: u64) -> Self {
        Self {
            name: CountryName {
                common: common_name.to_string(),
                official: None,
            },
            population,
            region: String::new(),
            capital: Vec::new(),
            continents: Vec::new(),
            currencies: BTreeMap::new(),
            languages: BTreeMap::new(),
            flags: Flags::default(),
        }
    }

    /// Builder-style region setter
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    /// Builder-style capital setter
    pub fn with_capital(mut self, capital: &[&str]) -> Self {
        self.capital = capital.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Primary lookup key
    pub fn common_name(&self) -> &str {
        &self.name.common
    }

    /// First capital, or the placeholder when the country has none
    pub fn primary_capital(&self) -> &str {
        self.capital
            .first()
            .map(String::as_str)
            .unwrap_or(NOT_APPLICABLE)
    }

    /// Preferred flag image URL (SVG first, PNG as fallback)
    pub fn flag_url(&self) -> Option<&str> {
        self.flags.svg.as_deref().or(self.flags.png.as_deref())
    }

    /// Case-insensitive containment test against the common name.
    ///
    /// `needle_lower` must already be lowercased.
    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.common.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_record_should_deserialize_provider_shape() {
        let json = r#"{
            "name": {"common": "France", "official": "French Republic"},
            "population": 67391582,
            "region": "Europe",
            "capital": ["Paris"],
            "continents": ["Europe"],
            "currencies": {"EUR": {"name": "Euro", "symbol": "€"}},
            "languages": {"fra": "French"},
            "flags": {"png": "https://flagcdn.com/w320/fr.png", "svg": "https://flagcdn.com/fr.svg"}
        }"#;

        let record: CountryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.common_name(), "France");
        assert_eq!(record.population, 67391582);
        assert_eq!(record.primary_capital(), "Paris");
        assert_eq!(record.flag_url(), Some("https://flagcdn.com/fr.svg"));
        assert_eq!(record.currencies["EUR"].name, "Euro");
    }

    #[test]
    fn country_record_should_default_missing_fields() {
        let json = r#"{"name": {"common": "Antarctica"}, "population": 1000}"#;

        let record: CountryRecord = serde_json::from_str(json).unwrap();
        assert!(record.capital.is_empty());
        assert!(record.currencies.is_empty());
        assert_eq!(record.region, "");
        assert_eq!(record.primary_capital(), NOT_APPLICABLE);
        assert_eq!(record.flag_url(), None);
    }

    #[test]
    fn country_record_should_require_common_name() {
        let json = r#"{"population": 1000}"#;
        assert!(serde_json::from_str::<CountryRecord>(json).is_err());
    }

    #[test]
    fn name_contains_should_ignore_case_of_record_name() {
        let record = CountryRecord::new("Germany", 83_000_000);
        assert!(record.name_contains("germ"));
        assert!(record.name_contains("many"));
        assert!(!record.name_contains("fra"));
    }

    #[test]
    fn flag_url_should_fall_back_to_png() {
        let mut record = CountryRecord::new("Japan", 125_000_000);
        record.flags.png = Some("https://flagcdn.com/w320/jp.png".to_string());
        assert_eq!(record.flag_url(), Some("https://flagcdn.com/w320/jp.png"));
    }
}
