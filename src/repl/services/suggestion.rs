//! # Suggestion Service
//!
//! Derives autocomplete candidates from the cached dataset. No network access;
//! every suggestion comes from records already held in memory.

use crate::repl::events::CommandEvent;
use crate::repl::models::DatasetCache;

/// Upper bound on suggestions shown for one input
pub const MAX_SUGGESTIONS: usize = 5;

/// One autocomplete candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    index: usize,
    text: String,
}

impl Suggestion {
    pub fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }

    /// Display text (the country's common name)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position within the current suggestion list
    pub fn index(&self) -> usize {
        self.index
    }

    /// Event that selects this suggestion: the query becomes this exact name and
    /// the suggestion list is cleared
    pub fn action(&self) -> CommandEvent {
        CommandEvent::SuggestionAccepted { index: self.index }
    }
}

/// Produces bounded suggestion lists in dataset order
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    limit: usize,
}

impl SuggestionEngine {
    pub fn new() -> Self {
        Self {
            limit: MAX_SUGGESTIONS,
        }
    }

    /// First matches for `text` in cache order.
    ///
    /// Empty text suppresses autocomplete rather than matching everything.
    pub fn suggest(&self, text: &str, cache: &DatasetCache) -> Vec<Suggestion> {
        if text.is_empty() {
            return Vec::new();
        }

        cache
            .query(text)
            .into_iter()
            .take(self.limit)
            .enumerate()
            .map(|(index, record)| Suggestion::new(index, record.name.common))
            .collect()
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::models::CountryRecord;

    fn cache_of(names: &[&str]) -> DatasetCache {
        let mut cache = DatasetCache::new();
        cache.populate(names.iter().map(|n| CountryRecord::new(n, 1)).collect());
        cache
    }

    fn texts(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(Suggestion::text).collect()
    }

    #[test]
    fn suggest_should_match_any_case() {
        let cache = cache_of(&["France", "Germany"]);
        let engine = SuggestionEngine::new();

        assert_eq!(texts(&engine.suggest("fra", &cache)), vec!["France"]);
        assert_eq!(texts(&engine.suggest("FrA", &cache)), vec!["France"]);
    }

    #[test]
    fn empty_text_should_suppress_suggestions() {
        let cache = cache_of(&["France", "Germany"]);
        let engine = SuggestionEngine::new();

        assert!(engine.suggest("", &cache).is_empty());
    }

    #[test]
    fn suggest_should_cap_at_five_in_dataset_order() {
        let cache = cache_of(&[
            "Albania", "Algeria", "Andorra", "Angola", "Anguilla", "Antarctica", "Argentina",
        ]);
        let engine = SuggestionEngine::new();

        let suggestions = engine.suggest("a", &cache);
        assert_eq!(
            texts(&suggestions),
            vec!["Albania", "Algeria", "Andorra", "Angola", "Anguilla"]
        );
    }

    #[test]
    fn suggest_should_return_min_of_five_and_matches() {
        let cache = cache_of(&["Chad", "Chile", "China", "Czechia", "Canada", "Cuba", "Cyprus"]);
        let engine = SuggestionEngine::new();

        for needle in ["ch", "c", "chi", "xyz", "a"] {
            let expected = cache.query(needle).len().min(MAX_SUGGESTIONS);
            assert_eq!(engine.suggest(needle, &cache).len(), expected, "needle {needle:?}");
        }
    }

    #[test]
    fn suggestion_action_should_select_its_index() {
        let cache = cache_of(&["Niger", "Nigeria"]);
        let suggestions = SuggestionEngine::new().suggest("nig", &cache);

        assert_eq!(suggestions[1].index(), 1);
        assert_eq!(
            suggestions[1].action(),
            CommandEvent::SuggestionAccepted { index: 1 }
        );
    }
}
