use serde::ser::{Serialize, SerializeMap, Serializer};

/// Placeholder recorded when a page has no `<title>`.
pub const NO_TITLE: &str = "No title";

/// Error message recorded for any page that could not be fetched.
pub const FETCH_FAILED: &str = "Failed to fetch page";

/// A string-keyed map that remembers insertion order.
///
/// Inserting an existing key replaces its value but keeps the key's original
/// position. Serialises as a JSON object in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V> OrderedMap<V> {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value for `key`
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Context snippets per search term. Terms without occurrences are absent.
pub type TermMatches = OrderedMap<Vec<String>>;

/// Search outcome for a page that was fetched successfully
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PageMatches {
    /// Snippets per term that occurred at least once
    pub matches: TermMatches,

    /// Total number of snippets across all terms
    pub total_matches: usize,

    /// Trimmed page title, or [`NO_TITLE`]
    pub page_title: String,
}

impl PageMatches {
    /// Build a record, deriving the total from the snippet lists
    pub fn new(page_title: Option<String>, matches: TermMatches) -> Self {
        let total_matches = matches.values().map(Vec::len).sum();
        Self {
            matches,
            total_matches,
            page_title: page_title.unwrap_or_else(|| NO_TITLE.to_string()),
        }
    }
}

/// Outcome of processing a single URL
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum PageResult {
    /// The page could not be fetched
    Failed { error: String },

    /// The page was fetched and searched
    Scraped(PageMatches),
}

impl PageResult {
    /// The record stored for a page whose fetch failed
    pub fn fetch_failed() -> Self {
        PageResult::Failed {
            error: FETCH_FAILED.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PageResult::Failed { .. })
    }

    /// The search outcome, if the page was fetched
    pub fn matches(&self) -> Option<&PageMatches> {
        match self {
            PageResult::Scraped(page) => Some(page),
            PageResult::Failed { .. } => None,
        }
    }
}

/// Results of a whole run, keyed by URL in input order
pub type RunResult = OrderedMap<PageResult>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut map = OrderedMap::new();
        map.insert("b", 1);
        map.insert("a", 2);
        map.insert("b", 3);

        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(map.get("b"), Some(&3));
    }

    #[test]
    fn test_total_matches_is_sum_of_snippets() {
        let mut matches = TermMatches::new();
        matches.insert("rust", vec!["one".to_string(), "two".to_string()]);
        matches.insert("web", vec!["three".to_string()]);

        let page = PageMatches::new(Some("Title".to_string()), matches);
        assert_eq!(page.total_matches, 3);
        assert_eq!(page.page_title, "Title");

        let untitled = PageMatches::new(None, TermMatches::new());
        assert_eq!(untitled.total_matches, 0);
        assert_eq!(untitled.page_title, NO_TITLE);
    }

    #[test]
    fn test_serialised_shape() {
        let mut matches = TermMatches::new();
        matches.insert("zeta", vec!["z".to_string()]);
        matches.insert("alpha", vec!["a".to_string()]);

        let mut run = RunResult::new();
        run.insert(
            "https://example.com",
            PageResult::Scraped(PageMatches::new(Some("Ex".to_string()), matches)),
        );
        run.insert("https://bad.example", PageResult::fetch_failed());

        let json = serde_json::to_string(&run).unwrap();
        assert_eq!(
            json,
            r#"{"https://example.com":{"matches":{"zeta":["z"],"alpha":["a"]},"total_matches":2,"page_title":"Ex"},"https://bad.example":{"error":"Failed to fetch page"}}"#
        );
    }
}
