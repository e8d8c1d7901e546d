use std::ops::Range;

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
///
/// Whitespace is skipped, but every token is produced together with its byte
/// span (see [`tokenize`]) so the parser can tell `-3` from `- 3` and `f(x)`
/// from `f (x)`.
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum Token {
    /// Numeric literal tokens, such as `3`, `3.14`, `.5` or `2.1e-10`.
    ///
    /// A sign is never part of the literal.
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?", parse_number)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),
    /// Identifier tokens; variable, constant or function names such as `t`,
    /// `log10`, `π` or `√`.
    ///
    /// Any run of characters that are neither whitespace nor reserved glyphs
    /// qualifies, as long as it does not start with a digit or a dot.
    #[regex(r"[^\s0-9.+\-*×/÷^(),][^\s+\-*×/÷^(),]*", |lex| lex.slice().to_owned())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*` or `×`
    #[token("*")]
    #[token("×")]
    Star,
    /// `/` or `÷`
    #[token("/")]
    #[token("÷")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// Spaces, tabs and line breaks.
    #[regex(r"\s+", logos::skip)]
    Ignored,
}

/// A token together with the byte range it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    /// The token.
    pub token: Token,
    /// Byte range in the source text.
    pub span:  Range<usize>,
}

/// Splits a source text into spanned tokens.
///
/// # Errors
/// Returns [`ParseError::InvalidToken`] for the first piece of text that is
/// not a valid token, such as a lone `.`.
///
/// # Example
/// ```
/// use mathparse::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("2π × r").unwrap();
/// let kinds: Vec<_> = tokens.into_iter().map(|t| t.token).collect();
///
/// assert_eq!(kinds,
///            vec![Token::Number(2.0),
///                 Token::Identifier("π".to_string()),
///                 Token::Star,
///                 Token::Identifier("r".to_string())]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();

    for (token, span) in Token::lexer(source).spanned() {
        match token {
            Ok(token) => tokens.push(Spanned { token, span }),
            Err(()) => {
                return Err(ParseError::InvalidToken { text:   source[span.clone()].to_owned(),
                                                      column: column_of(source, span.start), });
            },
        }
    }

    Ok(tokens)
}

/// Converts a byte offset into a 1-based character column.
#[must_use]
pub fn column_of(source: &str, offset: usize) -> usize {
    source.get(..offset)
          .map_or_else(|| source.chars().count(), |prefix| prefix.chars().count())
    + 1
}

/// Parses a floating-point literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
