/// The evaluator module computes the value of parsed expressions.
///
/// The evaluator walks an expression tree, resolves the names left in it
/// against the caller's tables, the parser's tables and the defaults, and
/// produces a number.
///
/// # Responsibilities
/// - Evaluates trees, either tolerantly (`NaN` on failure) or strictly.
/// - Splits unknown names into products when implied multiplication is on.
/// - Provides the default constants and functions.
pub mod evaluator;
/// The lexer module tokenizes expression text for further parsing.
///
/// The lexer reads the raw text and produces numbers, identifiers, operators
/// and punctuation, each with the byte span it was read from. This is the
/// first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into spanned tokens.
/// - Accepts non-Latin letters and symbols such as `π` or `√` in names.
/// - Reports text that forms no token, with its column.
pub mod lexer;
/// The parser module builds expression trees from tokens.
///
/// The parser runs a backtracking recursive descent over the token stream,
/// respecting precedence and associativity, and folds everything that is
/// already known into constants.
///
/// # Responsibilities
/// - Converts tokens into [`Node`](crate::ast::Node) trees.
/// - Supports implied multiplication and adjacency-sensitive negation.
/// - Reports the furthest failure with what was expected there.
pub mod parser;
