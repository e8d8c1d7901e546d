/// Parsing errors.
///
/// Defines the failure reported when a text cannot be turned into an
/// expression tree: unrecognised characters, unexpected tokens, a premature
/// end of input, or nesting beyond the configured limit.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains the failures a strict evaluation can report: a variable, a
/// one-argument function or a two-argument function that none of the
/// resolution tables know.
pub mod eval_error;

pub use eval_error::EvalError;
pub use parse_error::ParseError;
use thiserror::Error;

/// Either kind of failure, for callers that parse and evaluate in one step.
///
/// Both underlying errors convert with `?`:
/// ```
/// use mathparse::{MathError, evaluate};
///
/// assert!(matches!(evaluate("1 +"), Err(MathError::Parse(_))));
/// assert!(matches!(evaluate("2 * q"), Err(MathError::Eval(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// The text could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The parsed expression could not be evaluated.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
