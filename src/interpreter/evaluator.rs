/// Core evaluation logic.
///
/// Contains the [`Evaluator`](core::Evaluator) returned by a successful parse
/// and the recursive walk that turns a tree into a number.
pub mod core;

/// Name resolution state.
///
/// Bundles the caller's override tables, the parser's tables and the
/// implied-multiplication flag for one evaluation pass.
pub mod state;

/// Implied multiplication.
///
/// Splits unknown identifiers and call names into products of known
/// variables and functions.
pub mod implied;

/// Function and constant tables.
///
/// Defines the lookup capabilities callers implement and the default tables
/// every parse and evaluation falls back to.
pub mod function;
