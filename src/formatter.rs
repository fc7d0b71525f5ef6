use serde::Deserialize;

use crate::keywords::{match_keyword_phrase, BLOCK_KEYWORDS, LINE_KEYWORDS, LOGIC_KEYWORDS};
use crate::lexer::tokenize;
use crate::token::{Token, TokenType};

/// Output mode for the SQL formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlMode {
    Format,
    Minify,
}

/// SQL formatting configuration. Immutable per call.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqlFormatOptions {
    #[serde(default = "default_mode")]
    pub mode: SqlMode,

    /// Spaces per indent level (2 or 4).
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,

    #[serde(default = "default_true")]
    pub uppercase_keywords: bool,

    #[serde(default = "default_true")]
    pub break_after_comma: bool,

    #[serde(default = "default_true")]
    pub newline_before_and_or: bool,

    #[serde(default)]
    pub strip_comments: bool,
}

fn default_mode() -> SqlMode {
    SqlMode::Format
}
fn default_indent_size() -> usize {
    2
}
fn default_true() -> bool {
    true
}

impl Default for SqlFormatOptions {
    fn default() -> Self {
        Self {
            mode: SqlMode::Format,
            indent_size: 2,
            uppercase_keywords: true,
            break_after_comma: true,
            newline_before_and_or: true,
            strip_comments: false,
        }
    }
}

/// Whether two adjacent tokens need a separating space so they do not
/// collide (two words merging, operators touching operands).
pub fn needs_space_between(prev: Option<&Token>, next: &Token) -> bool {
    let Some(prev) = prev else {
        return false;
    };
    if prev.is_punct('(') || prev.is_punct('.') {
        return false;
    }
    if next.token_type == TokenType::Punct
        && matches!(next.value.as_str(), ")" | "," | ";" | ".")
    {
        return false;
    }
    if prev.token_type == TokenType::Operator || next.token_type == TokenType::Operator {
        return true;
    }
    prev.token_type.is_word_like() && next.token_type.is_word_like()
}

/// Mutable state threaded through a single formatting pass: indent level,
/// the indent added by the current clause, and a line-start flag.
struct FormatState {
    out: String,
    indent_unit: String,
    indent: usize,
    clause_indent_added: usize,
    line_start: bool,
    prev: Option<Token>,
}

impl FormatState {
    fn new(indent_size: usize) -> Self {
        Self {
            out: String::new(),
            indent_unit: " ".repeat(indent_size),
            indent: 0,
            clause_indent_added: 0,
            line_start: true,
            prev: None,
        }
    }

    fn write(&mut self, text: &str) {
        if self.line_start {
            for _ in 0..self.indent {
                self.out.push_str(&self.indent_unit);
            }
            self.line_start = false;
        }
        self.out.push_str(text);
    }

    fn space(&mut self) {
        if self.line_start {
            return;
        }
        match self.out.chars().last() {
            None | Some(' ') | Some('\n') => {}
            _ => self.out.push(' '),
        }
    }

    fn newline(&mut self) {
        if !self.line_start {
            self.out.push('\n');
        }
        self.line_start = true;
        self.prev = None;
    }

    /// Drop trailing spaces/tabs before each newline and trim the result.
    fn finish(self) -> String {
        let lines: Vec<&str> = self
            .out
            .split('\n')
            .map(|line| line.trim_end_matches([' ', '\t']))
            .collect();
        lines.join("\n").trim().to_string()
    }
}

fn format_tokens(tokens: &[Token], options: &SqlFormatOptions) -> String {
    let mut st = FormatState::new(options.indent_size);
    let mut i = 0;

    while i < tokens.len() {
        let t = &tokens[i];

        if t.token_type == TokenType::Whitespace {
            i += 1;
            continue;
        }

        if t.token_type == TokenType::Comment {
            if !options.strip_comments {
                if !st.line_start {
                    st.newline();
                }
                st.write(t.value.trim_end());
                st.newline();
            }
            i += 1;
            continue;
        }

        if t.token_type == TokenType::Word {
            if let Some(m) = match_keyword_phrase(tokens, i) {
                let phrase = tokens[i..i + m.token_count]
                    .iter()
                    .filter(|tok| tok.token_type == TokenType::Word)
                    .map(|tok| {
                        if options.uppercase_keywords {
                            tok.value.as_str().to_uppercase()
                        } else {
                            tok.value.to_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ");

                // A new top-level clause pops the indent its predecessor added.
                if st.clause_indent_added > 0 && BLOCK_KEYWORDS.contains(m.phrase) {
                    st.indent = st.indent.saturating_sub(st.clause_indent_added);
                    st.clause_indent_added = 0;
                }

                if BLOCK_KEYWORDS.contains(m.phrase) {
                    if !st.line_start {
                        st.newline();
                    }
                    st.write(&phrase);
                    st.newline();
                    st.indent += 1;
                    st.clause_indent_added = 1;
                    i += m.token_count;
                    continue;
                }

                if LINE_KEYWORDS.contains(m.phrase)
                    || (options.newline_before_and_or && LOGIC_KEYWORDS.contains(m.phrase))
                {
                    if !st.line_start {
                        st.newline();
                    }
                    st.write(&phrase);
                    st.space();
                    st.prev = Some(Token::new(TokenType::Word, &phrase));
                    i += m.token_count;
                    continue;
                }

                let rendered = Token::new(TokenType::Word, &phrase);
                if needs_space_between(st.prev.as_ref(), &rendered) {
                    st.space();
                }
                st.write(&phrase);
                st.prev = Some(rendered);
                i += m.token_count;
                continue;
            }
        }

        if t.token_type == TokenType::Punct {
            match t.value.as_str() {
                "," => {
                    st.write(",");
                    st.prev = Some(t.clone());
                    if options.break_after_comma {
                        st.newline();
                    } else {
                        st.space();
                    }
                    i += 1;
                    continue;
                }
                ";" => {
                    st.write(";");
                    st.prev = Some(t.clone());
                    st.newline();
                    i += 1;
                    continue;
                }
                "(" => {
                    if needs_space_between(st.prev.as_ref(), t) {
                        st.space();
                    }
                    st.write("(");
                    st.indent += 1;
                    st.prev = Some(t.clone());
                    i += 1;
                    continue;
                }
                ")" => {
                    // When the closing paren opens its line, dedent before
                    // writing so the paren itself sits one level out.
                    let was_line_start = st.line_start;
                    if was_line_start {
                        st.indent = st.indent.saturating_sub(1);
                    }
                    st.write(")");
                    if !was_line_start {
                        st.indent = st.indent.saturating_sub(1);
                    }
                    st.prev = Some(t.clone());
                    i += 1;
                    continue;
                }
                "." => {
                    st.write(".");
                    st.prev = Some(t.clone());
                    i += 1;
                    continue;
                }
                _ => {}
            }
        }

        if t.token_type == TokenType::Operator {
            if !st.line_start {
                st.space();
            }
            st.write(&t.value);
            st.space();
            st.prev = Some(t.clone());
            i += 1;
            continue;
        }

        if needs_space_between(st.prev.as_ref(), t) {
            st.space();
        }
        st.write(&t.value);
        st.prev = Some(t.clone());
        i += 1;
    }

    st.finish()
}

fn minify_tokens(tokens: &[Token], strip_comments: bool) -> String {
    let mut out = String::new();
    let mut prev: Option<&Token> = None;

    for t in tokens {
        if t.token_type == TokenType::Whitespace {
            continue;
        }
        if t.token_type == TokenType::Comment {
            if strip_comments {
                continue;
            }
            if !out.is_empty() && !out.ends_with('\n') {
                out.push(' ');
            }
            out.push_str(&t.value);
            // A line comment owns the rest of its line; the newline keeps
            // the following tokens out of it.
            if t.value.starts_with("--") {
                out.push('\n');
            } else {
                out.push(' ');
            }
            prev = None;
            continue;
        }
        if needs_space_between(prev, t) {
            out.push(' ');
        }
        out.push_str(&t.value);
        prev = Some(t);
    }

    out.trim().to_string()
}

/// Re-lay-out raw SQL according to `options`. Never validates syntax and
/// never fails: malformed SQL is re-emitted token by token. Returns None
/// for empty or whitespace-only input.
pub fn format_sql(input: &str, options: &SqlFormatOptions) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens = tokenize(trimmed);
    Some(match options.mode {
        SqlMode::Minify => minify_tokens(&tokens, options.strip_comments),
        SqlMode::Format => format_tokens(&tokens, options),
    })
}
