//! Text feed parse errors.

/// Why a text dump could not be parsed.
///
/// These never leave the parser's public entry point: an unreadable dump
/// is treated as one with no entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextFeedError {
    /// The opening payload delimiter has no closing partner
    #[error("payload opened with {open} but never closed")]
    MissingEnd { open: &'static str },

    /// A quoted string runs to the end of the input
    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },

    /// A block is still open at the end of the input
    #[error("line {line}: block {name} is never closed")]
    UnterminatedBlock { name: String, line: usize },

    /// A token that the grammar does not allow here
    #[error("line {line}: expected {expected}, found {found}")]
    Unexpected {
        line: usize,
        expected: &'static str,
        found: String,
    },

    /// Blocks nested deeper than any real dump
    #[error("line {line}: blocks nested too deeply")]
    TooDeep { line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = TextFeedError::UnterminatedBlock {
            name: "entity".into(),
            line: 3,
        };
        assert_eq!(err.to_string(), "line 3: block entity is never closed");

        let err = TextFeedError::Unexpected {
            line: 7,
            expected: "field name",
            found: "':'".into(),
        };
        assert_eq!(err.to_string(), "line 7: expected field name, found ':'");

        let err = TextFeedError::MissingEnd { open: "<pre>" };
        assert_eq!(err.to_string(), "payload opened with <pre> but never closed");
    }
}
