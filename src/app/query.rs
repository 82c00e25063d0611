//! Query store: the text the user is typing.
//!
//! The store only holds text. Whether a query is worth sending is decided by
//! the fetch controller when a search fires, which reads the store at that
//! moment rather than at submit time.

/// Holds the current query text for the whole session.
///
/// Searching never resets it. No length or character validation is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStore {
    text: String,
}

impl QueryStore {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Replaces the stored query.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.text
    }

    /// True for the empty string and for whitespace-only text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Removes the last character, if any.
    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}
