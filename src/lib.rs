//! # mathparse
//!
//! mathparse parses arithmetic expressions such as `4 * sin(t * pi)` or
//! `2πr` into expression trees and evaluates them against tables of
//! variables and functions.
//!
//! A parsed [`Evaluator`] is immutable: parse once, then evaluate as often as
//! needed, from as many threads as needed, with different variable bindings.
//!
//! ```
//! use mathparse::{MathParser, parse};
//!
//! assert_eq!(parse("1 + 2 * 3").unwrap().value(), 7.0);
//!
//! let wave = parse("4 * sin(t * pi)").unwrap();
//! assert!((wave.evaluate_with("t", 0.5) - 4.0).abs() < 1e-5);
//!
//! let implied = MathParser::new().implied_multiplication(true);
//! assert_eq!(implied.parse("2(1 + 2)").unwrap().value(), 6.0);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the [`Node`] tree produced by the parser and consumed
/// by the evaluator, the infix operators that build it, and the report of
/// names a tree leaves unresolved.
///
/// # Responsibilities
/// - Defines constants, variables and one- or two-argument calls.
/// - Folds operations on constants as the tree is built.
/// - Renders trees as text for diagnostics.
pub mod ast;
/// Provides the error types for parsing and evaluation.
///
/// Parse errors carry the column the parser stopped at and what it expected
/// there. Evaluation errors name the variable or function no table could
/// resolve.
pub mod error;
/// Orchestrates lexing, parsing and evaluation.
///
/// This module ties together the tokenizer, the expression grammar and the
/// evaluator, and holds the name-resolution tables they share.
pub mod interpreter;

pub use ast::{Node, Unresolved};
pub use error::{EvalError, MathError, ParseError};
pub use interpreter::{
    evaluator::{
        core::Evaluator,
        function::source::{
            BinaryFunctionSource, FromFn, UnaryFunctionSource, VariableSource, from_fn,
        },
        state::{EvalState, Tables},
    },
    parser::core::MathParser,
};

/// Parses a text with the default configuration.
///
/// Returns `None` when the text is not a valid expression.
///
/// # Example
/// ```
/// use mathparse::parse;
///
/// assert!(parse("2^3^2").is_some());
/// assert!(parse("2 +").is_none());
/// ```
#[must_use]
pub fn parse(text: &str) -> Option<Evaluator> {
    MathParser::new().parse(text)
}

/// Parses a text with the default configuration, describing any failure.
///
/// # Errors
/// A [`ParseError`] locating the failure.
pub fn parse_with_diagnostics(text: &str) -> Result<Evaluator, ParseError> {
    MathParser::new().parse_with_diagnostics(text)
}

/// Parses and strictly evaluates a text in one step, using only the default
/// tables.
///
/// # Errors
/// [`MathError::Parse`] for invalid text, [`MathError::Eval`] for names no
/// table knows.
///
/// # Example
/// ```
/// use mathparse::evaluate;
///
/// assert_eq!(evaluate("((1+2)*(3+4))/5^(1+3)"), Ok(21.0 / 625.0));
/// ```
pub fn evaluate(text: &str) -> Result<f64, MathError> {
    let evaluator = parse_with_diagnostics(text)?;
    Ok(evaluator.evaluate_strict(None, None, None)?)
}
