use clap::ValueEnum;
use once_cell::sync::Lazy;
use phf::phf_set;
use regex::{Captures, Regex};
use serde::Deserialize;

use crate::dictionary::Dictionary;

/// A word: a run of `[A-Za-z0-9]` optionally joined by internal apostrophes
/// ("don't" is one word).
static WORD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9]+(?:'[A-Za-z0-9]+)*").expect("static regex"));

static WS_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n+").expect("static regex"));
static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").expect("static regex"));
static KEBAB_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("static regex"));
static DOT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.+").expect("static regex"));
static CAMEL_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s_.\-]+").expect("static regex"));
static CAMEL_DELIMS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_.\-]+").expect("static regex"));
static ACRONYM_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("static regex"));
static CASE_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("static regex"));
static PUNCT_OR_SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{P}\p{S}]").expect("static regex"));

/// Minor words kept lowercase under title-case rules, except at the text
/// boundaries.
static TITLE_MINOR_WORDS: phf::Set<&'static str> = phf_set! {
    "a", "an", "the", "and", "but", "or", "nor", "for", "so", "yet",
    "as", "at", "by", "in", "of", "on", "per", "to", "up", "via",
    "vs", "with", "from", "into", "over", "than", "onto",
};

/// The closed set of text transformations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum CaseOperation {
    UpperCase,
    LowerCase,
    WordCase,
    WordLowerCase,
    SentenceCase,
    TitleCase,
    SpaceToUnderscore,
    UnderscoreToSpace,
    SpaceToCamel,
    CamelToSpace,
    SpaceToKebab,
    KebabToSpace,
    SpaceToNewline,
    NewlineToSpace,
    SpaceToDot,
    DotToSpace,
    DelPunctuation,
    DelBlank,
    DelLinebreak,
}

/// Character/word/line counts for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    pub chars: usize,
    pub chars_no_whitespace: usize,
    pub words: usize,
    pub lines: usize,
}

/// Count characters, non-whitespace characters, words and lines.
pub fn text_stats(text: &str) -> TextStats {
    TextStats {
        chars: text.chars().count(),
        chars_no_whitespace: text.chars().filter(|c| !c.is_whitespace()).count(),
        words: WORD_TOKEN.find_iter(text).count(),
        lines: if text.is_empty() {
            0
        } else {
            text.split('\n').count()
        },
    }
}

fn capitalize_word(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => lower,
    }
}

fn decapitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace every word whose lowercase form is a dictionary key with the
/// stored canonical spelling, overriding the case rule's own output.
fn apply_dictionary(text: &str, dict: &Dictionary) -> String {
    if dict.is_empty() {
        return text.to_string();
    }
    WORD_TOKEN
        .replace_all(text, |caps: &Captures| {
            let word = &caps[0];
            dict.lookup(word).unwrap_or(word).to_string()
        })
        .into_owned()
}

/// Single left-to-right pass with a "capitalize next letter" flag, initially
/// set. `. ! ?` and newline re-arm the flag after being emitted.
fn sentence_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut capitalize_next = true;

    for ch in text.chars() {
        if ch.is_ascii_alphabetic() {
            if capitalize_next {
                out.extend(ch.to_uppercase());
                capitalize_next = false;
            } else {
                out.extend(ch.to_lowercase());
            }
            continue;
        }

        out.push(ch);
        if matches!(ch, '\n' | '!' | '?' | '.') {
            capitalize_next = true;
        }
    }

    out
}

fn title_case(text: &str) -> String {
    let total = WORD_TOKEN.find_iter(text).count();
    let mut word_index = 0usize;

    WORD_TOKEN
        .replace_all(text, |caps: &Captures| {
            let lower = caps[0].to_lowercase();
            let is_first = word_index == 0;
            let is_last = word_index + 1 == total;
            word_index += 1;

            if !is_first && !is_last && TITLE_MINOR_WORDS.contains(lower.as_str()) {
                lower
            } else {
                capitalize_word(&lower)
            }
        })
        .into_owned()
}

fn space_to_delimiter(text: &str, delimiter: &str) -> String {
    let collapsed = WS_RUN.replace_all(text.trim(), " ");
    collapsed
        .split(' ')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(delimiter)
}

fn delimiter_to_space(text: &str, delimiter: &Regex) -> String {
    let spaced = delimiter.replace_all(text, " ");
    WS_RUN.replace_all(&spaced, " ").trim().to_string()
}

fn to_camel_case(text: &str) -> String {
    let mut words = CAMEL_SPLIT.split(text.trim()).filter(|w| !w.is_empty());
    let Some(first) = words.next() else {
        return String::new();
    };

    let mut out = first.to_lowercase();
    for word in words {
        out.push_str(&capitalize_word(word));
    }
    out
}

fn from_camel_case(text: &str) -> String {
    let split_acronyms = ACRONYM_BOUNDARY.replace_all(text, "$1 $2");
    let split_words = CASE_BOUNDARY.replace_all(&split_acronyms, "$1 $2");
    let spaced = CAMEL_DELIMS.replace_all(&split_words, " ");
    WS_RUN.replace_all(&spaced, " ").trim().to_string()
}

/// Apply one text transformation. Total: never fails for any input,
/// including empty strings or text with no matching tokens. The dictionary
/// participates only in word_case, sentence_case and title_case.
pub fn convert_text(text: &str, operation: CaseOperation, dict: &Dictionary) -> String {
    match operation {
        CaseOperation::UpperCase => text.to_uppercase(),
        CaseOperation::LowerCase => text.to_lowercase(),
        CaseOperation::WordCase => {
            let out = WORD_TOKEN
                .replace_all(text, |caps: &Captures| capitalize_word(&caps[0]))
                .into_owned();
            apply_dictionary(&out, dict)
        }
        CaseOperation::WordLowerCase => WORD_TOKEN
            .replace_all(text, |caps: &Captures| decapitalize_word(&caps[0]))
            .into_owned(),
        CaseOperation::SentenceCase => apply_dictionary(&sentence_case(text), dict),
        CaseOperation::TitleCase => apply_dictionary(&title_case(text), dict),

        CaseOperation::SpaceToUnderscore => space_to_delimiter(text, "_"),
        CaseOperation::UnderscoreToSpace => delimiter_to_space(text, &UNDERSCORE_RUN),
        CaseOperation::SpaceToKebab => space_to_delimiter(text, "-"),
        CaseOperation::KebabToSpace => delimiter_to_space(text, &KEBAB_RUN),
        CaseOperation::SpaceToDot => space_to_delimiter(text, "."),
        CaseOperation::DotToSpace => delimiter_to_space(text, &DOT_RUN),
        CaseOperation::SpaceToNewline => space_to_delimiter(text, "\n"),
        CaseOperation::NewlineToSpace => delimiter_to_space(text, &NEWLINE_RUN),
        CaseOperation::SpaceToCamel => to_camel_case(text),
        CaseOperation::CamelToSpace => from_camel_case(text),

        CaseOperation::DelPunctuation => PUNCT_OR_SYMBOL.replace_all(text, "").into_owned(),
        CaseOperation::DelBlank => WS_RUN.replace_all(text, "").into_owned(),
        CaseOperation::DelLinebreak => NEWLINE_RUN.replace_all(text, "").into_owned(),
    }
}
