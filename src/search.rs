//! Literal term search with fixed-width context snippets.
//!
//! Every term is searched independently against the whole buffer. Matches are
//! found with leftmost-first, non-overlapping scanning, and each match yields
//! a snippet of up to [`CONTEXT_CHARS`] characters either side, taken from the
//! original text rather than the case-folded copy used for matching.

use crate::parsers::text::collapse_whitespace;
use crate::results::TermMatches;
use regex::Regex;

/// Characters of context kept on each side of a match
pub const CONTEXT_CHARS: usize = 50;

/// Text prepared for matching, with a way back to the original characters.
struct SearchText<'a> {
    original: &'a str,
    /// Text that patterns run against (lower-cased unless case sensitive)
    folded: String,
    /// Original char index for every byte of `folded`, plus one trailing entry
    origin: Vec<usize>,
    /// Byte offset of every char of `original`, plus `original.len()`
    char_starts: Vec<usize>,
}

impl<'a> SearchText<'a> {
    fn new(original: &'a str, case_sensitive: bool) -> Self {
        let folded = fold_case(original, case_sensitive);
        let mut origin = Vec::with_capacity(folded.len() + 1);
        let mut char_starts = Vec::with_capacity(original.len() + 1);

        for (index, (offset, ch)) in original.char_indices().enumerate() {
            char_starts.push(offset);
            let width = if case_sensitive {
                ch.len_utf8()
            } else {
                // Final sigma folds to a different char of the same width
                ch.to_lowercase().map(char::len_utf8).sum()
            };
            origin.extend(std::iter::repeat_n(index, width));
        }

        char_starts.push(original.len());
        origin.push(char_starts.len() - 1);

        if origin.len() != folded.len() + 1 {
            ::log::warn!("Case folding changed text width, folding char by char");
            return Self::fold_per_char(original, char_starts);
        }

        Self {
            original,
            folded,
            origin,
            char_starts,
        }
    }

    fn fold_per_char(original: &'a str, char_starts: Vec<usize>) -> Self {
        let mut folded = String::with_capacity(original.len());
        let mut origin = Vec::with_capacity(original.len() + 1);

        for (index, ch) in original.chars().enumerate() {
            let before = folded.len();
            folded.extend(ch.to_lowercase());
            origin.extend(std::iter::repeat_n(index, folded.len() - before));
        }
        origin.push(char_starts.len() - 1);

        Self {
            original,
            folded,
            origin,
            char_starts,
        }
    }

    /// Number of characters in the original text
    fn char_len(&self) -> usize {
        self.char_starts.len() - 1
    }

    /// Snippet of the original text around a match given in `folded` byte offsets
    fn snippet(&self, start: usize, end: usize) -> String {
        let first = self.origin[start];
        // Covers a match that ends inside the lower-case expansion of one char
        let last = if end > start {
            self.origin[end - 1] + 1
        } else {
            first
        };

        let from = first.saturating_sub(CONTEXT_CHARS);
        let to = (last + CONTEXT_CHARS).min(self.char_len());

        collapse_whitespace(&self.original[self.char_starts[from]..self.char_starts[to]])
    }
}

/// Lower-cases whole strings so context-dependent mappings like final sigma apply
fn fold_case(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}

/// Finds every occurrence of each term and returns context snippets per term.
///
/// Terms are matched literally. Unless `case_sensitive` is set, text and terms
/// are compared lower-cased. Terms that never occur, including the empty
/// term, are left out of the result.
pub fn search_terms(text: &str, terms: &[String], case_sensitive: bool) -> TermMatches {
    let prepared = SearchText::new(text, case_sensitive);
    let mut results = TermMatches::new();

    for term in terms {
        if term.is_empty() {
            ::log::debug!("Skipping empty search term");
            continue;
        }

        let pattern = regex::escape(&fold_case(term, case_sensitive));
        let regex = match Regex::new(&pattern) {
            Ok(regex) => regex,
            Err(e) => {
                ::log::warn!("Skipping search term '{}': {}", term, e);
                continue;
            }
        };

        let snippets = regex
            .find_iter(&prepared.folded)
            .map(|m| prepared.snippet(m.start(), m.end()))
            .collect::<Vec<_>>();

        ::log::debug!("Term '{}' matched {} times", term, snippets.len());

        if !snippets.is_empty() {
            results.insert(term.clone(), snippets);
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn terms(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_search_terms_in_text() {
        let text = "This is a test text about Python programming and web development.";
        let results = search_terms(text, &terms(&["python", "web", "nonexistent"]), false);

        assert_eq!(results.get("python").map(Vec::len), Some(1));
        assert_eq!(results.get("web").map(Vec::len), Some(1));
        assert!(!results.contains_key("nonexistent"));
        assert_eq!(results.keys().collect::<Vec<_>>(), vec!["python", "web"]);
    }

    #[test]
    fn test_case_sensitivity() {
        let text = "Python is different from python";
        let list = terms(&["Python"]);

        let sensitive = search_terms(text, &list, true);
        assert_eq!(sensitive.get("Python").map(Vec::len), Some(1));

        let insensitive = search_terms(text, &list, false);
        assert_eq!(insensitive.get("Python").map(Vec::len), Some(2));
    }

    #[test]
    fn test_snippet_keeps_original_case() {
        let results = search_terms("Say HELLO there", &terms(&["hello"]), false);
        assert_eq!(results.get("hello").unwrap(), &vec!["Say HELLO there".to_string()]);
    }

    #[test]
    fn test_non_overlapping_scan() {
        let results = search_terms("aaaa", &terms(&["aa"]), false);
        assert_eq!(results.get("aa").map(Vec::len), Some(2));
    }

    #[test]
    fn test_term_is_literal() {
        let text = "cost is $5.00 (approx) or 5x00";
        let results = search_terms(text, &terms(&["$5.00", "(approx)", "5.00"]), true);

        assert_eq!(results.get("$5.00").map(Vec::len), Some(1));
        assert_eq!(results.get("(approx)").map(Vec::len), Some(1));
        // "." must not match the "x" in "5x00"
        assert_eq!(results.get("5.00").map(Vec::len), Some(1));
    }

    #[test]
    fn test_empty_term_never_matches() {
        let results = search_terms("anything at all", &terms(&["", "all"]), false);
        assert!(!results.contains_key(""));
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_context_window_is_clipped() {
        let prefix = "x".repeat(60);
        let suffix = "y".repeat(60);
        let text = format!("{prefix} needle {suffix}");

        let results = search_terms(&text, &terms(&["needle"]), false);
        let snippet = &results.get("needle").unwrap()[0];

        // 50 chars either side: 49 filler chars plus the separating space
        let expected = format!("{} needle {}", "x".repeat(49), "y".repeat(49));
        assert_eq!(snippet, &expected);
    }

    #[test]
    fn test_context_whitespace_is_collapsed() {
        let results = search_terms("  one\n\n\ttwo   three  ", &terms(&["two"]), false);
        assert_eq!(results.get("two").unwrap(), &vec!["one two three".to_string()]);
    }

    #[test]
    fn test_terms_are_independent() {
        let results = search_terms("rustacean", &terms(&["rust", "acean"]), false);
        assert_eq!(results.get("rust").unwrap(), &vec!["rustacean".to_string()]);
        assert_eq!(results.get("acean").unwrap(), &vec!["rustacean".to_string()]);
    }

    #[test]
    fn test_multibyte_text() {
        let text = format!("{}café{}", "é".repeat(70), "ü".repeat(70));
        let results = search_terms(&text, &terms(&["CAFÉ"]), false);

        let snippet = &results.get("CAFÉ").unwrap()[0];
        assert_eq!(snippet.chars().count(), 50 + 4 + 50);
        assert!(snippet.contains("café"));
    }

    #[test]
    fn test_lowercase_expansion_does_not_split_chars() {
        // 'İ' lower-cases to two chars, which shifts folded offsets
        let text = format!("{}İstanbul", "İ".repeat(10));
        let results = search_terms(&text, &terms(&["stanbul"]), false);

        let snippet = &results.get("stanbul").unwrap()[0];
        assert_eq!(snippet, &text);
    }

    #[test]
    fn test_final_sigma_folds_like_whole_words() {
        let text = "Η ΟΔΟΣ ΕΙΝΑΙ ΚΛΕΙΣΤΗ";
        let list = terms(&["οδος", "ΟΔΟΣ"]);
        let results = search_terms(text, &list, false);

        assert_eq!(results.get("οδος").unwrap(), &vec![text.to_string()]);
        assert_eq!(results.get("ΟΔΟΣ").map(Vec::len), Some(1));
        assert!(search_terms(text, &list, true).get("οδος").is_none());
    }

    #[test]
    fn test_sigma_inside_word_stays_medial() {
        let results = search_terms("ΣΟΦΙΑ σοφια", &terms(&["σοφια"]), false);
        assert_eq!(results.get("σοφια").map(Vec::len), Some(2));
    }

    #[test]
    fn test_no_hidden_state() {
        let text = "alpha beta alpha gamma";
        let list = terms(&["alpha", "gamma"]);
        assert_eq!(search_terms(text, &list, false), search_terms(text, &list, false));
    }

    proptest! {
        #[test]
        fn prop_absent_terms_yield_nothing(text in "[a-m ]{0,200}", term in "[n-z]{1,8}") {
            let results = search_terms(&text, &[term], false);
            prop_assert!(results.is_empty());
        }

        #[test]
        fn prop_single_occurrence_window(
            before in "[a-m ]{0,120}",
            after in "[a-m ]{0,120}",
            term in "[n-z]{1,8}",
        ) {
            let text = format!("{before}{term}{after}");
            let results = search_terms(&text, std::slice::from_ref(&term), true);

            let chars: Vec<char> = text.chars().collect();
            let k = before.chars().count();
            let m = term.chars().count();
            let from = k.saturating_sub(CONTEXT_CHARS);
            let to = (k + m + CONTEXT_CHARS).min(chars.len());
            let window: String = chars[from..to].iter().collect();

            prop_assert_eq!(results.get(&term).cloned(), Some(vec![collapse_whitespace(&window)]));
        }

        #[test]
        fn prop_search_is_idempotent(
            text in "\\PC{0,200}",
            list in proptest::collection::vec("\\PC{0,5}", 0..5),
            case_sensitive in any::<bool>(),
        ) {
            let first = search_terms(&text, &list, case_sensitive);
            let second = search_terms(&text, &list, case_sensitive);
            prop_assert_eq!(first, second);
        }
    }
}
