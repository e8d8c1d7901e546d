/// Parser configuration and entry points.
///
/// Defines [`MathParser`](core::MathParser), which tokenizes a text, runs the
/// expression grammar over it and wraps the result in an evaluator.
pub mod core;

/// Backtracking token cursor.
///
/// Tracks the position in the token stream, the nesting depth and the
/// furthest mismatch, which becomes the reported parse error.
pub mod cursor;

/// Infix operator tiers.
///
/// Implements addition, multiplication (explicit or implied) and
/// right-associative exponentiation on top of one generic infix parser.
pub mod binary;

/// Operands.
///
/// Parses calls, parenthesized expressions, names, numbers and negations,
/// resolving known names as they are read.
pub mod unary;
