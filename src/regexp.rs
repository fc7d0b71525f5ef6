use std::collections::HashMap;

use regex::RegexBuilder;

use crate::error::{NexusError, Result};

/// Flag letters the explorer understands. Unknown letters are dropped.
pub const SUPPORTED_FLAGS: &[char] = &['g', 'i', 'm', 's', 'u', 'y', 'd'];

/// Capture-group metadata extracted by scanning the raw pattern source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegexMeta {
    pub capturing_groups: usize,
    /// Unique names in first-seen order.
    pub named_groups: Vec<String>,
}

/// One numbered capture within a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatch {
    /// 1-based group number.
    pub index: usize,
    /// Captured text; empty when the group did not participate.
    pub text: String,
}

/// A single match of a compiled pattern against input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Character offset of the match start.
    pub index: usize,
    pub matched_text: String,
    pub groups: Vec<GroupMatch>,
    pub named_groups: HashMap<String, String>,
}

/// A successfully compiled pattern plus its normalized flag string.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: regex::Regex,
    pub normalized_flags: String,
}

/// Keep only recognized flag letters, deduplicated, in first-seen order.
pub fn normalize_flags(flags: &str) -> String {
    let mut out = String::new();
    for ch in flags.chars() {
        if SUPPORTED_FLAGS.contains(&ch) && !out.contains(ch) {
            out.push(ch);
        }
    }
    out
}

/// Compile a pattern with normalized flags. `i`, `m` and `s` map onto the
/// engine's case-insensitive, multi-line and dot-matches-newline modes;
/// `g`, `y` and `d` only affect enumeration and are recorded in the
/// normalized flag string. Compilation failure is reported as a typed
/// error carrying the engine's message.
pub fn compile_regex(pattern: &str, flags: &str) -> Result<CompiledPattern> {
    let normalized_flags = normalize_flags(flags);
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(normalized_flags.contains('i'))
        .multi_line(normalized_flags.contains('m'))
        .dot_matches_new_line(normalized_flags.contains('s'))
        .build()
        .map_err(|e| NexusError::RegexCompile(e.to_string()))?;
    Ok(CompiledPattern {
        regex,
        normalized_flags,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InClass,
}

/// Count capturing groups and collect named-group names by scanning the raw
/// pattern source, without compiling it. Parentheses inside character
/// classes and escaped characters are not group delimiters; `(?:`, `(?=`,
/// `(?!`, `(?<=`, `(?<!` do not capture; `(?<name>` captures and records
/// its name. Duplicate names are deduplicated in the name list, but every
/// occurrence still counts as a capturing group.
pub fn analyze_meta(pattern: &str) -> RegexMeta {
    let chars: Vec<char> = pattern.chars().collect();
    let mut meta = RegexMeta::default();
    let mut state = ScanState::Normal;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        if ch == '\\' {
            i += 2;
            continue;
        }

        match state {
            ScanState::InClass => {
                if ch == ']' {
                    state = ScanState::Normal;
                }
                i += 1;
            }
            ScanState::Normal => {
                if ch == '[' {
                    state = ScanState::InClass;
                    i += 1;
                    continue;
                }
                if ch != '(' {
                    i += 1;
                    continue;
                }

                if chars.get(i + 1) != Some(&'?') {
                    meta.capturing_groups += 1;
                    i += 1;
                    continue;
                }

                match chars.get(i + 2) {
                    // Non-capturing group or lookahead.
                    Some(':') | Some('=') | Some('!') => {}
                    Some('<') => {
                        match chars.get(i + 3) {
                            // Lookbehind.
                            Some('=') | Some('!') => {}
                            _ => {
                                let name: String = chars[i + 3..]
                                    .iter()
                                    .take_while(|&&c| c != '>')
                                    .collect();
                                if !name.is_empty() && !meta.named_groups.contains(&name) {
                                    meta.named_groups.push(name);
                                }
                                meta.capturing_groups += 1;
                            }
                        }
                    }
                    _ => {}
                }
                i += 1;
            }
        }
    }

    meta
}

/// Enumerate matches left to right, non-overlapping, returning at most
/// `max_matches` records. Enumeration stops as soon as the cap is reached;
/// a cap of zero attempts no match at all.
pub fn find_matches(compiled: &CompiledPattern, text: &str, max_matches: usize) -> Vec<MatchRecord> {
    let mut records = Vec::new();
    if max_matches == 0 {
        return records;
    }

    let names: Vec<Option<&str>> = compiled.regex.capture_names().collect();

    for caps in compiled.regex.captures_iter(text).take(max_matches) {
        let Some(full) = caps.get(0) else {
            continue;
        };

        let groups = (1..caps.len())
            .map(|n| GroupMatch {
                index: n,
                text: caps
                    .get(n)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            })
            .collect();

        let mut named_groups = HashMap::new();
        for name in names.iter().flatten() {
            let text = caps
                .name(name)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            named_groups.insert((*name).to_string(), text);
        }

        records.push(MatchRecord {
            index: text[..full.start()].chars().count(),
            matched_text: full.as_str().to_string(),
            groups,
            named_groups,
        });
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_flags_filters_and_dedupes() {
        assert_eq!(normalize_flags("gimgsuydx"), "gimsuyd");
        assert_eq!(normalize_flags("iig"), "ig");
        assert_eq!(normalize_flags("qz"), "");
        assert_eq!(normalize_flags(""), "");
    }

    #[test]
    fn test_compile_reports_error_as_data() {
        let err = compile_regex("(unclosed", "").unwrap_err();
        match err {
            NexusError::RegexCompile(msg) => assert!(!msg.is_empty()),
            other => panic!("expected RegexCompile, got {other:?}"),
        }
    }

    #[test]
    fn test_compile_applies_case_insensitive_flag() {
        let compiled = compile_regex("abc", "i").unwrap();
        assert!(compiled.regex.is_match("ABC"));
        assert_eq!(compiled.normalized_flags, "i");
    }

    #[test]
    fn test_meta_counts_plain_groups() {
        assert_eq!(analyze_meta("(a)(b)").capturing_groups, 2);
        assert_eq!(analyze_meta("((a))").capturing_groups, 2);
        assert_eq!(analyze_meta("no groups").capturing_groups, 0);
    }

    #[test]
    fn test_meta_skips_non_capturing_and_lookaround() {
        assert_eq!(analyze_meta("(?:x)").capturing_groups, 0);
        assert_eq!(analyze_meta("(?=x)").capturing_groups, 0);
        assert_eq!(analyze_meta("(?!x)").capturing_groups, 0);
        assert_eq!(analyze_meta("(?<=x)").capturing_groups, 0);
        assert_eq!(analyze_meta("(?<!x)").capturing_groups, 0);
    }

    #[test]
    fn test_meta_ignores_class_and_escaped_parens() {
        assert_eq!(analyze_meta("[(]").capturing_groups, 0);
        assert_eq!(analyze_meta("\\(a\\)").capturing_groups, 0);
        assert_eq!(analyze_meta("[\\]()]x").capturing_groups, 0);
        assert_eq!(analyze_meta("[)]（").capturing_groups, 0);
    }

    #[test]
    fn test_meta_named_groups() {
        let meta = analyze_meta("(?<year>\\d{4})-(?<month>\\d{2})");
        assert_eq!(meta.capturing_groups, 2);
        assert_eq!(meta.named_groups, vec!["year", "month"]);
    }

    #[test]
    fn test_meta_duplicate_names_count_twice_but_dedupe() {
        let meta = analyze_meta("(?<n>a)|(?<n>b)");
        assert_eq!(meta.capturing_groups, 2);
        assert_eq!(meta.named_groups, vec!["n"]);
    }

    #[test]
    fn test_meta_mixed() {
        let meta = analyze_meta("(a)(?:b)(?<c>d)[(e)]\\(f");
        assert_eq!(meta.capturing_groups, 2);
        assert_eq!(meta.named_groups, vec!["c"]);
    }

    #[test]
    fn test_meta_agrees_with_engine_group_count() {
        for pattern in ["(a)(b(c))", "(?:x)(y)", "(?<n>a)-(b)", "[()]"] {
            let compiled = compile_regex(pattern, "").unwrap();
            // captures_len counts group 0 as well.
            assert_eq!(
                analyze_meta(pattern).capturing_groups,
                compiled.regex.captures_len() - 1,
                "pattern {pattern:?}"
            );
        }
    }

    #[test]
    fn test_find_matches_enumerates_in_order() {
        let compiled = compile_regex("\\d+", "").unwrap();
        let records = find_matches(&compiled, "a 12 b 345", 10);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].matched_text, "12");
        assert_eq!(records[0].index, 2);
        assert_eq!(records[1].matched_text, "345");
        assert_eq!(records[1].index, 7);
    }

    #[test]
    fn test_find_matches_cap() {
        let compiled = compile_regex("\\d", "").unwrap();
        assert_eq!(find_matches(&compiled, "123456", 3).len(), 3);
        assert!(find_matches(&compiled, "123456", 0).is_empty());
    }

    #[test]
    fn test_find_matches_char_offsets() {
        let compiled = compile_regex("b", "").unwrap();
        let records = find_matches(&compiled, "ééb", 10);
        assert_eq!(records[0].index, 2);
    }

    #[test]
    fn test_unmatched_group_is_empty_text() {
        let compiled = compile_regex("(a)|(b)", "").unwrap();
        let records = find_matches(&compiled, "a", 10);
        assert_eq!(records[0].groups.len(), 2);
        assert_eq!(records[0].groups[0].index, 1);
        assert_eq!(records[0].groups[0].text, "a");
        assert_eq!(records[0].groups[1].text, "");
    }

    #[test]
    fn test_named_group_captures() {
        let compiled = compile_regex("(?<year>\\d{4})-(?<month>\\d{2})", "").unwrap();
        let records = find_matches(&compiled, "2024-05", 10);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].named_groups["year"], "2024");
        assert_eq!(records[0].named_groups["month"], "05");
        assert_eq!(records[0].groups.len(), 2);
    }
}
