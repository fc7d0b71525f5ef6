use compact_str::CompactString;

/// All token types recognized by the SQL lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    /// Identifier, keyword, number: a maximal run of `[A-Za-z0-9_$]`.
    Word,
    /// Quoted literal or quoted identifier, delimiters included.
    String,
    /// Line (`--`) or block (`/* */`) comment, delimiters included.
    Comment,
    /// One of `, ; ( ) .`
    Punct,
    /// One- or two-character operator.
    Operator,
    /// A maximal run of whitespace.
    Whitespace,
    /// Any single character not covered above.
    Other,
}

impl TokenType {
    /// Word-like tokens must not merge with an adjacent word-like token
    /// when whitespace is dropped.
    pub fn is_word_like(self) -> bool {
        matches!(self, Self::Word | Self::String | Self::Other)
    }
}

/// An immutable token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub token_type: TokenType,
    pub value: CompactString,
}

impl Token {
    pub fn new(token_type: TokenType, value: &str) -> Self {
        Self {
            token_type,
            value: CompactString::from(value),
        }
    }

    pub fn is_punct(&self, ch: char) -> bool {
        self.token_type == TokenType::Punct && self.value.chars().eq(std::iter::once(ch))
    }
}
