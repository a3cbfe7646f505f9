//! Tokenizer for the brace-delimited text format.

use std::fmt;

use super::error::TextFeedError;

/// What a token is.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A bare word: field name, number, enum value.
    Word(String),
    /// A quoted string, escapes resolved.
    Quoted(String),
    Colon,
    Open,
    Close,
}

/// A token and the line it starts on (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Word(w) => write!(f, "'{w}'"),
            TokenKind::Quoted(s) => write!(f, "\"{s}\""),
            TokenKind::Colon => f.write_str("':'"),
            TokenKind::Open => f.write_str("'{'"),
            TokenKind::Close => f.write_str("'}'"),
        }
    }
}

/// Characters that end a bare word.
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '{' | '}' | ':' | '"' | '\'' | '#' | ',' | ';')
}

/// Split text into tokens.
///
/// `#` starts a comment running to end of line. Commas and semicolons
/// between fields are accepted as separators and dropped.
pub fn tokenize(text: &str) -> Result<Vec<Token>, TextFeedError> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;

    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() || c == ',' || c == ';' => {
                chars.next();
            }
            '#' => {
                while chars.peek().is_some_and(|&c| c != '\n') {
                    chars.next();
                }
            }
            '{' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::Open,
                    line,
                });
            }
            '}' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::Close,
                    line,
                });
            }
            ':' => {
                chars.next();
                tokens.push(Token {
                    kind: TokenKind::Colon,
                    line,
                });
            }
            '"' | '\'' => {
                let quote = c;
                let start_line = line;
                chars.next();

                let mut value = String::new();
                loop {
                    match chars.next() {
                        None | Some('\n') => {
                            return Err(TextFeedError::UnterminatedString { line: start_line });
                        }
                        Some(ch) if ch == quote => break,
                        Some('\\') => match chars.next() {
                            None => {
                                return Err(TextFeedError::UnterminatedString { line: start_line });
                            }
                            Some('n') => value.push('\n'),
                            Some('t') => value.push('\t'),
                            Some('r') => value.push('\r'),
                            Some(other) => value.push(other),
                        },
                        Some(ch) => value.push(ch),
                    }
                }

                tokens.push(Token {
                    kind: TokenKind::Quoted(value),
                    line: start_line,
                });
            }
            _ => {
                let mut word = String::new();
                while let Some(&ch) = chars.peek() {
                    if is_delimiter(ch) {
                        break;
                    }
                    word.push(ch);
                    chars.next();
                }
                tokens.push(Token {
                    kind: TokenKind::Word(word),
                    line,
                });
            }
        }
    }

    Ok(tokens)
}
