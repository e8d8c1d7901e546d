use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// Parsing never yields a partial result: either the whole text becomes an
/// expression tree or one of these values describes the furthest point the
/// parser reached and what it expected there. Columns count characters and
/// start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The lexer found text that is neither a number, an identifier nor an
    /// operator.
    #[error("Error at column {column}: Invalid input '{text}'.")]
    InvalidToken {
        /// The offending text.
        text:   String,
        /// Column of its first character.
        column: usize,
    },
    /// Found a token the grammar does not allow at this point.
    #[error("Error at column {column}: Unexpected '{found}', expected {expected}.")]
    UnexpectedToken {
        /// The token encountered.
        found:    String,
        /// What the parser would have accepted.
        expected: String,
        /// Column of the token.
        column:   usize,
    },
    /// Reached the end of the text while more was required.
    #[error("Error at column {column}: Unexpected end of input, expected {expected}.")]
    UnexpectedEndOfInput {
        /// What the parser would have accepted.
        expected: String,
        /// Column just past the last character.
        column:   usize,
    },
    /// Parentheses, calls or negations were nested deeper than allowed.
    #[error("Error at column {column}: Expression nesting exceeds the limit of {limit}.")]
    NestingTooDeep {
        /// The configured limit.
        limit:  usize,
        /// Column of the operand that crossed the limit.
        column: usize,
    },
}

impl ParseError {
    /// The 1-based character column the error points at.
    #[must_use]
    pub const fn column(&self) -> usize {
        match self {
            Self::InvalidToken { column, .. }
            | Self::UnexpectedToken { column, .. }
            | Self::UnexpectedEndOfInput { column, .. }
            | Self::NestingTooDeep { column, .. } => *column,
        }
    }

    /// Renders the error under the source text with a caret at the failing
    /// column.
    ///
    /// # Example
    /// ```
    /// use mathparse::parse_with_diagnostics;
    ///
    /// let source = "(1 + 2";
    /// let err = parse_with_diagnostics(source).unwrap_err();
    /// let rendered = err.annotate(source);
    ///
    /// assert!(rendered.starts_with("(1 + 2\n      ^"));
    /// ```
    #[must_use]
    pub fn annotate(&self, source: &str) -> String {
        let line = source.lines().next().unwrap_or_default();
        let padding = " ".repeat(self.column().saturating_sub(1));
        format!("{line}\n{padding}^\n{self}")
    }
}
