use phf::phf_set;
use smallvec::SmallVec;

use crate::token::{Token, TokenType};

/// Multi-word keyword phrases, longest first so that longer phrases win
/// over their prefixes (e.g. "LEFT OUTER JOIN" over "LEFT JOIN").
pub static KEYWORD_PHRASES: &[&str] = &[
    "RIGHT OUTER JOIN",
    "LEFT OUTER JOIN",
    "FULL OUTER JOIN",
    "INSERT INTO",
    "DELETE FROM",
    "CROSS JOIN",
    "RIGHT JOIN",
    "INNER JOIN",
    "OUTER JOIN",
    "LEFT JOIN",
    "FULL JOIN",
    "UNION ALL",
    "GROUP BY",
    "ORDER BY",
    "IS FALSE",
    "IS NULL",
    "IS TRUE",
    "IS NOT",
];

/// Keywords that start a new top-level clause and indent their body.
pub static BLOCK_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "SELECT",
    "FROM",
    "WHERE",
    "GROUP BY",
    "HAVING",
    "ORDER BY",
    "LIMIT",
    "OFFSET",
    "VALUES",
    "SET",
    "INSERT INTO",
    "UPDATE",
    "DELETE FROM",
};

/// Keywords that start their own line without changing the indent level.
pub static LINE_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "JOIN",
    "LEFT JOIN",
    "RIGHT JOIN",
    "FULL JOIN",
    "INNER JOIN",
    "OUTER JOIN",
    "LEFT OUTER JOIN",
    "RIGHT OUTER JOIN",
    "FULL OUTER JOIN",
    "CROSS JOIN",
    "ON",
    "UNION",
    "UNION ALL",
};

/// Boolean connectives that optionally start their own line.
pub static LOGIC_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "AND",
    "OR",
};

/// Single-word keywords. A word outside this set (and outside every phrase)
/// is a plain identifier. Multi-word clause starters are covered by
/// KEYWORD_PHRASES; their component words ("GROUP", "BY", ...) are
/// deliberately absent here.
pub static SINGLE_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "SELECT",
    "FROM",
    "WHERE",
    "HAVING",
    "LIMIT",
    "OFFSET",
    "VALUES",
    "SET",
    "UPDATE",
    "JOIN",
    "ON",
    "UNION",
    "AND",
    "OR",
    "AS",
    "IN",
    "NOT",
    "DISTINCT",
    "CASE",
    "WHEN",
    "THEN",
    "ELSE",
    "END",
    "NULL",
    "TRUE",
    "FALSE",
    "EXISTS",
    "LIKE",
    "ILIKE",
    "BETWEEN",
    "DESC",
    "ASC",
};

/// Longest phrase length, in words.
const MAX_PHRASE_WORDS: usize = 4;

/// A keyword (or keyword phrase) recognized at some token position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch {
    /// Canonical uppercase spelling, e.g. "LEFT OUTER JOIN".
    pub phrase: &'static str,
    /// Number of word tokens the phrase spans in the source.
    pub word_count: usize,
    /// Number of tokens the phrase spans from `start`, whitespace between
    /// its words included. The caller advances by this much.
    pub token_count: usize,
}

/// Try to recognize a keyword phrase starting at `tokens[start]`, greedily
/// comparing up to four upcoming word tokens case-insensitively. Whitespace
/// tokens between the words are skipped; any other token type ends the
/// lookahead. Phrases are tried longest-first; a single-word keyword is the
/// fallback. Returns None for plain identifiers.
pub fn match_keyword_phrase(tokens: &[Token], start: usize) -> Option<KeywordMatch> {
    let mut words: SmallVec<[String; MAX_PHRASE_WORDS]> = SmallVec::new();
    // Tokens consumed from `start` through the nth collected word.
    let mut consumed: SmallVec<[usize; MAX_PHRASE_WORDS]> = SmallVec::new();

    for (offset, tok) in tokens[start..].iter().enumerate() {
        match tok.token_type {
            TokenType::Word => {
                words.push(tok.value.as_str().to_uppercase());
                consumed.push(offset + 1);
                if words.len() == MAX_PHRASE_WORDS {
                    break;
                }
            }
            TokenType::Whitespace if !words.is_empty() => {}
            _ => break,
        }
    }

    let first = words.first()?;

    for phrase in KEYWORD_PHRASES {
        let parts: SmallVec<[&str; MAX_PHRASE_WORDS]> = phrase.split(' ').collect();
        if parts.len() > words.len() {
            continue;
        }
        if parts.iter().zip(words.iter()).all(|(p, w)| *p == w.as_str()) {
            return Some(KeywordMatch {
                phrase,
                word_count: parts.len(),
                token_count: consumed[parts.len() - 1],
            });
        }
    }

    SINGLE_KEYWORDS.get_key(first.as_str()).map(|k| KeywordMatch {
        phrase: *k,
        word_count: 1,
        token_count: consumed[0],
    })
}
