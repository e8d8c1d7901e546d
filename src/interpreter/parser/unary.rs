use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        evaluator::implied::{split_call, split_variable},
        lexer::Token,
        parser::{
            binary::parse_expression,
            cursor::{Cursor, ParseResult},
        },
    },
};

/// Parses an operand, the highest-precedence element of an expression.
///
/// Alternatives are tried in order, rewinding the cursor after each one that
/// does not match:
///
/// ```text
///     operand := identifier "(" expression "," expression ")"
///              | identifier "(" expression ")"
///              | "(" expression ")"
///              | identifier
///              | number
///              | "-" operand
/// ```
///
/// The `(` of a call and the operand of a negation must touch the token in
/// front of them. Every operand counts as one nesting level, and each
/// position is parsed as an operand only once.
///
/// # Errors
/// A mismatch when no alternative matches, or a fatal failure once the
/// nesting limit is exceeded.
pub fn parse_operand(cursor: &mut Cursor<'_>) -> ParseResult<Node> {
    cursor.memoized(|cursor| cursor.nested(parse_alternatives))
}

fn parse_alternatives(cursor: &mut Cursor<'_>) -> ParseResult<Node> {
    if let Some(node) = cursor.attempt(parse_call)? {
        return Ok(node);
    }
    if let Some(node) = cursor.attempt(parse_parenthetical)? {
        return Ok(node);
    }
    if let Some(node) = cursor.attempt(parse_identifier)? {
        return Ok(node);
    }
    if let Some(node) = cursor.attempt(parse_number)? {
        return Ok(node);
    }
    parse_negation(cursor)
}

/// Parses a one- or two-argument call such as `sin(x)` or `atan2(y, x)`.
///
/// The argument list is read once and the arity decided by whether a `,`
/// follows the first argument.
fn parse_call(cursor: &mut Cursor<'_>) -> ParseResult<Node> {
    let name = expect_identifier(cursor)?;
    if !cursor.touches_previous() {
        return cursor.mismatch("'('");
    }
    cursor.expect(&Token::LParen, "'('")?;

    let arg1 = parse_expression(cursor)?;

    match cursor.peek() {
        Some(Token::Comma) => {
            cursor.advance();
            let arg2 = parse_expression(cursor)?;
            cursor.expect(&Token::RParen, "')'")?;
            Ok(binary_call(cursor, name, arg1, arg2))
        },
        Some(Token::RParen) => {
            cursor.advance();
            Ok(unary_call(cursor, name, arg1))
        },
        _ => {
            cursor.record("','");
            cursor.mismatch("')'")
        },
    }
}

/// Binds a one-argument call to a known function, or to the split of its
/// name when implied multiplication resolves it completely.
fn unary_call(cursor: &Cursor<'_>, name: String, arg: Node) -> Node {
    let state = cursor.state();

    if let Some(function) = state.find_unary(&name) {
        return Node::unary_call(name, Some(function), arg);
    }
    if state.implied_multiplication
       && let Some(split) = split_call(&name, state)
    {
        return split.into_node(arg);
    }

    Node::unary_call(name, None, arg)
}

fn binary_call(cursor: &Cursor<'_>, name: String, arg1: Node, arg2: Node) -> Node {
    let function = cursor.state().find_binary(&name);
    Node::binary_call(name, function, arg1, arg2)
}

/// Parses `"(" expression ")"`.
fn parse_parenthetical(cursor: &mut Cursor<'_>) -> ParseResult<Node> {
    cursor.expect(&Token::LParen, "'('")?;
    let node = parse_expression(cursor)?;
    cursor.expect(&Token::RParen, "')'")?;
    Ok(node)
}

/// Parses a variable or constant name.
///
/// Known names fold to constants right away. With implied multiplication an
/// unknown name is replaced by its split only if every piece is known, so a
/// table supplied at evaluation time can still bind the name as a whole.
fn parse_identifier(cursor: &mut Cursor<'_>) -> ParseResult<Node> {
    let name = expect_identifier(cursor)?;
    let state = cursor.state();

    if let Some(value) = state.find_variable(&name) {
        return Ok(Node::Constant(value));
    }
    if state.implied_multiplication
       && let Some(node) = split_variable(&name, state)
       && node.is_constant()
    {
        return Ok(node);
    }

    Ok(Node::Variable(name))
}

fn parse_number(cursor: &mut Cursor<'_>) -> ParseResult<Node> {
    match cursor.peek() {
        Some(Token::Number(value)) => {
            let value = *value;
            cursor.advance();
            Ok(Node::Constant(value))
        },
        _ => cursor.mismatch("number"),
    }
}

/// Parses `"-" operand` with no space after the sign, as a multiplication by
/// `-1`.
fn parse_negation(cursor: &mut Cursor<'_>) -> ParseResult<Node> {
    cursor.expect(&Token::Minus, "'-'")?;
    if !cursor.touches_previous() {
        return cursor.mismatch("operand directly after '-'");
    }

    let operand = parse_operand(cursor)?;
    Ok(BinaryOperator::Mul.reduce(Node::Constant(-1.0), operand))
}

fn expect_identifier(cursor: &mut Cursor<'_>) -> ParseResult<String> {
    match cursor.peek() {
        Some(Token::Identifier(name)) => {
            let name = name.clone();
            cursor.advance();
            Ok(name)
        },
        _ => cursor.mismatch("identifier"),
    }
}
