//! The list predicate shared by the store and client-side caches.
//!
//! Both `search` and `language` are case-insensitive substring matches; the
//! store and every client cache call [`SnippetFilter::matches`] so the two
//! sides can never disagree about which snippets a filter selects.

use crate::models::snippet::Snippet;
use crate::models::wire::ListQuery;

/// Combined search/language condition applied when listing snippets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetFilter {
    search: Option<String>,
    language: Option<String>,
}

fn normalize_needle(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl SnippetFilter {
    /// Build a filter from optional raw parameters.
    ///
    /// Blank values are treated as absent; present values are trimmed and
    /// lowercased once here rather than per comparison.
    pub fn new(search: Option<&str>, language: Option<&str>) -> Self {
        Self {
            search: normalize_needle(search),
            language: normalize_needle(language),
        }
    }

    /// Filter matching every snippet.
    pub fn all() -> Self {
        Self::default()
    }

    /// Normalized search text, if any.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Normalized language text, if any.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Return `true` when the filter selects every snippet.
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.language.is_none()
    }

    /// Evaluate the predicate against one snippet.
    ///
    /// `search` matches title OR code; `language` matches the language field;
    /// both conditions must hold when both are present.
    pub fn matches(&self, snippet: &Snippet) -> bool {
        let search_ok = self.search.as_deref().map_or(true, |needle| {
            contains_ignore_case(&snippet.title, needle) || contains_ignore_case(&snippet.code, needle)
        });
        let language_ok = self
            .language
            .as_deref()
            .map_or(true, |needle| contains_ignore_case(&snippet.language, needle));
        search_ok && language_ok
    }

    /// Keep only the snippets this filter selects, preserving order.
    pub fn apply<'a, I>(&self, snippets: I) -> Vec<&'a Snippet>
    where
        I: IntoIterator<Item = &'a Snippet>,
    {
        snippets.into_iter().filter(|s| self.matches(s)).collect()
    }

    /// Convert back into wire query parameters.
    pub fn to_query(&self) -> ListQuery {
        ListQuery {
            search: self.search.clone(),
            language: self.language.clone(),
        }
    }
}

impl From<&ListQuery> for SnippetFilter {
    fn from(query: &ListQuery) -> Self {
        Self::new(query.search.as_deref(), query.language.as_deref())
    }
}
