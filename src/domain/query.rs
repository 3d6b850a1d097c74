//! Structured text filters handed to a [`ResortStore`](crate::domain::ports::ResortStore).
//!
//! A [`TextMatch`] carries literal patterns only. Each store adapter renders
//! them into its own query language, so user text never gets concatenated
//! into a filter expression.

/// Case-insensitive "name contains any of these patterns" filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    patterns: Vec<String>,
}

impl TextMatch {
    pub fn contains(pattern: impl Into<String>) -> Self {
        Self::any_of([pattern])
    }

    /// Blank patterns are dropped and surrounding whitespace trimmed.
    pub fn any_of<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(Into::into)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True when `text` contains at least one pattern, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.patterns
            .iter()
            .any(|p| haystack.contains(&p.to_lowercase()))
    }
}

/// Case-insensitive substring test shared by resolvers and in-memory stores.
pub fn contains_ignore_case(text: &str, pattern: &str) -> bool {
    text.to_lowercase().contains(&pattern.trim().to_lowercase())
}
