use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\n,;]+").expect("static regex"));

/// Parse user-supplied dictionary text (newline/comma/semicolon separated)
/// into the list of canonical spellings. Entries are trimmed, empties are
/// dropped, and duplicates are removed case-insensitively with the first
/// occurrence winning.
pub fn parse_dictionary(input: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for item in SEPARATORS.split(input) {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }
        if seen.insert(item.to_lowercase()) {
            out.push(item.to_string());
        }
    }
    out
}

/// Case-insensitive word lookup returning the user's canonical spelling.
/// Owned by the caller's session; engines only borrow it.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    map: HashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from canonical spellings, keyed by lowercase form.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for word in words {
            let word = word.as_ref();
            map.entry(word.to_lowercase())
                .or_insert_with(|| word.to_string());
        }
        Self { map }
    }

    /// Parse dictionary text and build the lookup in one step.
    pub fn parse(input: &str) -> Self {
        Self::from_words(parse_dictionary(input))
    }

    pub fn lookup(&self, word: &str) -> Option<&str> {
        self.map.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_splits_on_all_separators() {
        assert_eq!(
            parse_dictionary("iPhone\nOpenAI,API;HTTP"),
            vec!["iPhone", "OpenAI", "API", "HTTP"]
        );
    }

    #[test]
    fn test_parse_trims_and_drops_empties() {
        assert_eq!(parse_dictionary("  a  ,, ,\n\n b "), vec!["a", "b"]);
        assert!(parse_dictionary("").is_empty());
        assert!(parse_dictionary(" ;,\n ").is_empty());
    }

    #[test]
    fn test_parse_dedupes_case_insensitively_first_wins() {
        assert_eq!(
            parse_dictionary("iPhone\nIPHONE, api;API"),
            vec!["iPhone", "api"]
        );
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dict = Dictionary::parse("OpenAI\niPhone");
        assert_eq!(dict.lookup("openai"), Some("OpenAI"));
        assert_eq!(dict.lookup("OPENAI"), Some("OpenAI"));
        assert_eq!(dict.lookup("iphone"), Some("iPhone"));
        assert_eq!(dict.lookup("android"), None);
    }

    #[test]
    fn test_len_and_empty() {
        assert!(Dictionary::new().is_empty());
        let dict = Dictionary::parse("a,b");
        assert_eq!(dict.len(), 2);
        assert!(!dict.is_empty());
    }
}
