//! Recursive-descent parser producing a tree of blocks.
//!
//! Grammar:
//!
//! ```text
//! document := field*
//! field    := NAME ':' scalar
//!           | NAME ':'? '{' field* '}'
//! scalar   := QUOTED+ | WORD+          (words on the value's own line)
//! ```
//!
//! Lookups on a [`Block`] only see its direct children, so a field always
//! binds to its nearest enclosing block even when the same name appears at
//! several depths.

use super::error::TextFeedError;
use super::lexer::{Token, TokenKind};

/// Maximum block nesting accepted.
const MAX_DEPTH: usize = 32;

/// A brace-delimited block (or the whole document).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub fields: Vec<Field>,
}

/// A named field inside a block.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: Value,
    pub line: usize,
}

/// A field's value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(String),
    Block(Block),
}

impl Block {
    /// First direct scalar child called `name`.
    pub fn scalar(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|f| match &f.value {
            Value::Scalar(s) if f.name == name => Some(s.as_str()),
            _ => None,
        })
    }

    /// First direct block child called `name`.
    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks(name).next()
    }

    /// All direct block children called `name`, in document order.
    pub fn blocks<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a Block> + use<'a, 'n> {
        self.fields.iter().filter_map(move |f| match &f.value {
            Value::Block(b) if f.name == name => Some(b),
            _ => None,
        })
    }
}

/// Parse a token stream into the document block.
pub fn parse_tokens(tokens: &[Token]) -> Result<Block, TextFeedError> {
    let mut parser = Parser { tokens, pos: 0 };
    parser.body(None, 0)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        self.pos += 1;
        token
    }

    /// Parse fields until `}` (inside a block) or end of input (document).
    ///
    /// `open` is the name and line of the enclosing block, if any.
    fn body(&mut self, open: Option<(&str, usize)>, depth: usize) -> Result<Block, TextFeedError> {
        let mut block = Block::default();

        loop {
            let Some(token) = self.peek() else {
                return match open {
                    Some((name, line)) => Err(TextFeedError::UnterminatedBlock {
                        name: name.to_string(),
                        line,
                    }),
                    None => Ok(block),
                };
            };

            match &token.kind {
                TokenKind::Close if open.is_some() => {
                    self.advance();
                    return Ok(block);
                }
                TokenKind::Word(name) => {
                    let name = name.clone();
                    let line = token.line;
                    self.advance();
                    let field = self.field(name, line, depth)?;
                    block.fields.push(field);
                }
                other => {
                    return Err(TextFeedError::Unexpected {
                        line: token.line,
                        expected: "field name",
                        found: other.to_string(),
                    });
                }
            }
        }
    }

    /// Parse the rest of a field whose name has been consumed.
    fn field(&mut self, name: String, line: usize, depth: usize) -> Result<Field, TextFeedError> {
        if self.peek().is_some_and(|t| t.kind == TokenKind::Colon) {
            self.advance();
        }

        match self.peek() {
            Some(Token {
                kind: TokenKind::Open,
                line: open_line,
            }) => {
                let open_line = *open_line;
                if depth + 1 > MAX_DEPTH {
                    return Err(TextFeedError::TooDeep { line: open_line });
                }
                self.advance();
                let block = self.body(Some((&name, line)), depth + 1)?;
                Ok(Field {
                    name,
                    value: Value::Block(block),
                    line,
                })
            }
            _ => {
                let value = self.scalar(line)?;
                Ok(Field {
                    name,
                    value: Value::Scalar(value),
                    line,
                })
            }
        }
    }

    /// Read a scalar value for a field declared on `line`.
    fn scalar(&mut self, line: usize) -> Result<String, TextFeedError> {
        let Some(token) = self.peek() else {
            return Err(TextFeedError::Unexpected {
                line,
                expected: "value",
                found: "end of input".to_string(),
            });
        };

        match &token.kind {
            TokenKind::Quoted(first) => {
                let mut value = first.clone();
                self.advance();
                // Adjacent quoted strings concatenate
                while let Some(TokenKind::Quoted(next)) = self.peek().map(|t| &t.kind) {
                    value.push_str(next);
                    self.advance();
                }
                Ok(value)
            }
            TokenKind::Word(first) => {
                let value_line = token.line;
                let mut value = first.clone();
                self.advance();
                // An unquoted value runs to end of line or the next field name
                while let Some(Token {
                    kind: TokenKind::Word(next),
                    line,
                }) = self.peek()
                {
                    let starts_field = matches!(
                        self.peek_at(1).map(|t| &t.kind),
                        Some(TokenKind::Colon | TokenKind::Open)
                    );
                    if *line != value_line || starts_field {
                        break;
                    }
                    value.push(' ');
                    value.push_str(next);
                    self.advance();
                }
                Ok(value)
            }
            other => Err(TextFeedError::Unexpected {
                line: token.line,
                expected: "value",
                found: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::textfeed::lexer::tokenize;

    fn parse(text: &str) -> Result<Block, TextFeedError> {
        parse_tokens(&tokenize(text)?)
    }

    #[test]
    fn scalars_and_blocks() {
        let doc = parse("id: \"7\"\nvehicle {\n  position {\n    latitude: 39.9\n  }\n}\n").unwrap();
        assert_eq!(doc.scalar("id"), Some("7"));
        let position = doc.block("vehicle").and_then(|v| v.block("position")).unwrap();
        assert_eq!(position.scalar("latitude"), Some("39.9"));
    }

    #[test]
    fn found_block_outlives_the_name() {
        let doc = parse("trip { route_id: \"MFL\" }").unwrap();
        let found = {
            let name = String::from("trip");
            doc.block(&name)
        };
        assert_eq!(found.and_then(|t| t.scalar("route_id")), Some("MFL"));
    }

    #[test]
    fn colon_before_brace_is_optional() {
        let doc = parse("trip: { route_id: \"MFL\" }").unwrap();
        assert_eq!(doc.block("trip").unwrap().scalar("route_id"), Some("MFL"));
    }

    #[test]
    fn lookups_see_direct_children_only() {
        let doc = parse(
            "vehicle {\n  trip { route_id: \"BSL\" }\n  vehicle { id: \"inner\" }\n  id: \"outer\"\n}",
        )
        .unwrap();
        let outer = doc.block("vehicle").unwrap();
        assert_eq!(outer.scalar("id"), Some("outer"));
        assert_eq!(outer.block("vehicle").unwrap().scalar("id"), Some("inner"));
        assert_eq!(doc.scalar("route_id"), None);
    }

    #[test]
    fn repeated_blocks_in_order() {
        let doc = parse("entity { id: \"1\" }\nentity { id: \"2\" }\nheader { }").unwrap();
        let ids: Vec<_> = doc.blocks("entity").filter_map(|b| b.scalar("id")).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn unquoted_value_runs_to_end_of_line() {
        let doc = parse("label: Car 12 East\nid: 5").unwrap();
        assert_eq!(doc.scalar("label"), Some("Car 12 East"));
        assert_eq!(doc.scalar("id"), Some("5"));
    }

    #[test]
    fn unquoted_value_stops_at_next_field_on_same_line() {
        let doc = parse("latitude: 39.9 longitude: -75.1").unwrap();
        assert_eq!(doc.scalar("latitude"), Some("39.9"));
        assert_eq!(doc.scalar("longitude"), Some("-75.1"));
    }

    #[test]
    fn adjacent_quoted_strings_concatenate() {
        let doc = parse("id: \"ab\" \"cd\"").unwrap();
        assert_eq!(doc.scalar("id"), Some("abcd"));
    }

    #[test]
    fn unclosed_block_is_error() {
        let err = parse("entity {\n  id: \"1\"\n").unwrap_err();
        assert_eq!(
            err,
            TextFeedError::UnterminatedBlock {
                name: "entity".to_string(),
                line: 1
            }
        );
    }

    #[test]
    fn stray_close_is_error() {
        assert!(matches!(
            parse("id: 1\n}"),
            Err(TextFeedError::Unexpected { line: 2, .. })
        ));
    }

    #[test]
    fn missing_value_is_error() {
        assert!(parse("id:").is_err());
        assert!(parse("entity { id: }").is_err());
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let text = "a {".repeat(MAX_DEPTH + 1) + &"}".repeat(MAX_DEPTH + 1);
        assert!(matches!(parse(&text), Err(TextFeedError::TooDeep { .. })));

        let text = "a {".repeat(MAX_DEPTH) + &"}".repeat(MAX_DEPTH);
        assert!(parse(&text).is_ok());
    }
}
