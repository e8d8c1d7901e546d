use log::trace;

use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        lexer::Token,
        parser::{
            cursor::{Cursor, Failure, ParseResult},
            unary::parse_operand,
        },
    },
};

/// The direction in which a chain of same-precedence operators folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` is `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` is `a ^ (b ^ c)`.
    Right,
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level and descends through the tiers.
///
/// Grammar: `expression := additive`
pub fn parse_expression(cursor: &mut Cursor<'_>) -> ParseResult<Node> {
    parse_additive(cursor)
}

/// Parses addition and subtraction.
///
/// Grammar: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(cursor: &mut Cursor<'_>) -> ParseResult<Node> {
    parse_infix(cursor,
                "additive",
                additive_operator,
                parse_multiplicative,
                Associativity::Left,
                None)
}

/// Parses multiplication and division.
///
/// With implied multiplication enabled, two operands with no operator between
/// them are multiplied, unless the second one would begin with `-`.
///
/// Grammar: `multiplicative := exponent (("*" | "/")? exponent)*`
pub fn parse_multiplicative(cursor: &mut Cursor<'_>) -> ParseResult<Node> {
    let implied = cursor.implied_multiplication().then_some(BinaryOperator::Mul);

    parse_infix(cursor,
                "multiplicative",
                multiplicative_operator,
                parse_exponent,
                Associativity::Left,
                implied)
}

/// Parses exponentiation, which is right-associative: `2^3^2` is `2^(3^2)`.
///
/// Grammar: `exponent := operand ("^" operand)*`
pub fn parse_exponent(cursor: &mut Cursor<'_>) -> ParseResult<Node> {
    parse_infix(cursor,
                "exponent",
                exponent_operator,
                parse_operand,
                Associativity::Right,
                None)
}

/// Parses one precedence tier of infix operators.
///
/// The tier needs at least one operand. After that, each operator and the
/// operand following it are parsed as a pair; when the pair does not match,
/// the cursor is put back in front of the operator and the tier ends there,
/// leaving the rest of the input to the tiers below.
///
/// # Parameters
/// - `tier`: Name of the tier, used in trace output.
/// - `operator`: Recognises the operator tokens of this tier.
/// - `operand`: Parses the next-higher tier.
/// - `associativity`: How a chain of operators folds.
/// - `implied`: Operator assumed when no operator token is present but an
///   operand follows.
///
/// # Returns
/// The folded node for the whole chain.
pub fn parse_infix(cursor: &mut Cursor<'_>,
                   tier: &'static str,
                   operator: fn(&Token) -> Option<BinaryOperator>,
                   operand: fn(&mut Cursor<'_>) -> ParseResult<Node>,
                   associativity: Associativity,
                   implied: Option<BinaryOperator>)
                   -> ParseResult<Node> {
    let mut node = operand(cursor)?;
    trace!("{tier}: first operand {node}");

    let mut pending: Vec<(Node, BinaryOperator)> = Vec::new();

    while let Some((op, rhs)) =
        cursor.attempt(|cursor| parse_operation(cursor, operator, operand, implied))?
    {
        trace!("{tier}: {} {rhs}", op.symbol());

        match associativity {
            Associativity::Left => node = op.reduce(node, rhs),
            Associativity::Right => pending.push((std::mem::replace(&mut node, rhs), op)),
        }
    }

    while let Some((lhs, op)) = pending.pop() {
        node = op.reduce(lhs, node);
    }

    trace!("{tier}: reduced to {node}");
    Ok(node)
}

/// Parses one operator together with the operand after it.
fn parse_operation(cursor: &mut Cursor<'_>,
                   operator: fn(&Token) -> Option<BinaryOperator>,
                   operand: fn(&mut Cursor<'_>) -> ParseResult<Node>,
                   implied: Option<BinaryOperator>)
                   -> ParseResult<(BinaryOperator, Node)> {
    let op = match cursor.peek().and_then(operator) {
        Some(op) => {
            cursor.advance();
            op
        },
        None => {
            cursor.record("operator");
            match implied {
                Some(op) if !cursor.at_end() && cursor.peek() != Some(&Token::Minus) => op,
                _ => return Err(Failure::Mismatch),
            }
        },
    };

    let rhs = operand(cursor)?;
    Ok((op, rhs))
}

/// Maps `+` and `-` to their operators.
///
/// # Example
/// ```
/// use mathparse::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::additive_operator},
/// };
///
/// assert_eq!(additive_operator(&Token::Minus), Some(BinaryOperator::Sub));
/// assert_eq!(additive_operator(&Token::Star), None);
/// ```
#[must_use]
pub const fn additive_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        _ => None,
    }
}

/// Maps `*`, `×`, `/` and `÷` to their operators.
#[must_use]
pub const fn multiplicative_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        _ => None,
    }
}

/// Maps `^` to exponentiation.
#[must_use]
pub const fn exponent_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Caret => Some(BinaryOperator::Pow),
        _ => None,
    }
}
