use memchr::{memchr, memmem};

use crate::token::{Token, TokenType};

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

/// Two-character operators, checked before single-character ones.
static TWO_CHAR_OPERATORS: &[&str] = &["<>", "<=", ">=", "==", "!=", "||", "&&"];

/// Scan raw SQL left to right into classified tokens. Never fails: any
/// character the scanner does not recognize becomes a one-character Other
/// token, and unterminated comments/strings run to end of input.
pub fn tokenize(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while let Some(ch) = input[i..].chars().next() {
        if ch.is_whitespace() {
            let j = input[i..]
                .char_indices()
                .find(|&(_, c)| !c.is_whitespace())
                .map_or(input.len(), |(off, _)| i + off);
            tokens.push(Token::new(TokenType::Whitespace, &input[i..j]));
            i = j;
            continue;
        }

        let rest = &input[i..];

        // Line comment: -- to end of line (newline not included).
        if rest.starts_with("--") {
            let end = memchr(b'\n', &bytes[i..]).map_or(input.len(), |off| i + off);
            tokens.push(Token::new(TokenType::Comment, &input[i..end]));
            i = end;
            continue;
        }

        // Block comment: /* ... */, non-nesting, tolerant of unterminated.
        if rest.starts_with("/*") {
            let end = memmem::find(&bytes[i + 2..], b"*/")
                .map_or(input.len(), |off| i + 2 + off + 2);
            tokens.push(Token::new(TokenType::Comment, &input[i..end]));
            i = end;
            continue;
        }

        // Single-quoted string with '' as an escaped quote.
        if ch == '\'' {
            let mut j = i + 1;
            let end = loop {
                match memchr(b'\'', &bytes[j..]) {
                    Some(off) => {
                        let q = j + off;
                        if bytes.get(q + 1) == Some(&b'\'') {
                            j = q + 2;
                        } else {
                            break q + 1;
                        }
                    }
                    None => break input.len(),
                }
            };
            tokens.push(Token::new(TokenType::String, &input[i..end]));
            i = end;
            continue;
        }

        // Quoted identifier: no escape handling beyond the closing quote.
        if ch == '"' || ch == '`' {
            let end = memchr(ch as u8, &bytes[i + 1..]).map_or(input.len(), |off| i + 1 + off + 1);
            tokens.push(Token::new(TokenType::String, &input[i..end]));
            i = end;
            continue;
        }

        // Identifier / keyword / number.
        if ch.is_ascii() && is_ident_byte(ch as u8) {
            let mut j = i + 1;
            while j < bytes.len() && is_ident_byte(bytes[j]) {
                j += 1;
            }
            tokens.push(Token::new(TokenType::Word, &input[i..j]));
            i = j;
            continue;
        }

        if let Some(op) = TWO_CHAR_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
            tokens.push(Token::new(TokenType::Operator, op));
            i += 2;
            continue;
        }

        if ",;().".contains(ch) {
            tokens.push(Token::new(TokenType::Punct, &input[i..i + 1]));
            i += 1;
            continue;
        }

        if "=<>+-*/%".contains(ch) {
            tokens.push(Token::new(TokenType::Operator, &input[i..i + 1]));
            i += 1;
            continue;
        }

        let end = i + ch.len_utf8();
        tokens.push(Token::new(TokenType::Other, &input[i..end]));
        i = end;
    }

    tokens
}
