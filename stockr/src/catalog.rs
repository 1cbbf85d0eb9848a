//! Static category and suggestion catalog.
//!
//! The provider has no suggestion endpoint, so both lists are fixed. They are
//! still exposed through async client calls so a backend-driven source can
//! replace them without touching callers.

/// Category labels offered in the category bar, in display order
pub const CATEGORIES: [&str; 8] = [
    "Nature",
    "Travel",
    "Architecture",
    "Food",
    "Animals",
    "People",
    "Technology",
    "Business",
];

/// Search suggestions, filtered by substring against the typed text
pub const SUGGESTIONS: [&str; 10] = [
    "nature landscape",
    "city skyline",
    "food photography",
    "portrait photography",
    "travel destinations",
    "architecture buildings",
    "animals wildlife",
    "technology gadgets",
    "business workspace",
    "abstract art",
];

pub fn categories() -> Vec<String> {
    CATEGORIES.iter().map(|c| (*c).to_string()).collect()
}

/// Case-insensitive substring match over [`SUGGESTIONS`]; blank input yields nothing.
pub fn suggest(query: &str) -> Vec<String> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    SUGGESTIONS
        .iter()
        .filter(|suggestion| suggestion.to_lowercase().contains(&needle))
        .map(|suggestion| (*suggestion).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_is_case_insensitive() {
        assert_eq!(suggest("NATURE"), vec!["nature landscape".to_string()]);
        assert_eq!(suggest("Photo"), suggest("photo"));
    }

    #[test]
    fn suggest_matches_every_entry_containing_query() {
        let hits = suggest("photography");
        assert_eq!(hits, vec!["food photography", "portrait photography"]);

        let hits = suggest("a");
        let expected: Vec<&str> = SUGGESTIONS.iter().copied().filter(|s| s.contains('a')).collect();
        assert_eq!(hits, expected);
    }

    #[test]
    fn blank_query_has_no_suggestions() {
        assert!(suggest("").is_empty());
        assert!(suggest("   ").is_empty());
    }

    #[test]
    fn unknown_query_has_no_suggestions() {
        assert!(suggest("zeppelin").is_empty());
    }

    #[test]
    fn categories_keep_display_order() {
        let cats = categories();
        assert_eq!(cats.len(), 8);
        assert_eq!(cats.first().map(String::as_str), Some("Nature"));
        assert_eq!(cats.last().map(String::as_str), Some("Business"));
        assert!(cats.iter().any(|c| c == "Food"));
    }
}
