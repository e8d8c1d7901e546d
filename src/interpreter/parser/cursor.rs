use std::collections::HashMap;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        evaluator::state::EvalState,
        lexer::{Spanned, Token, column_of},
    },
};

/// Why a parse function gave up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The input does not match here. The cursor has recorded what it
    /// expected, and the caller may backtrack and try something else.
    Mismatch,
    /// The parse cannot succeed at all, whatever the caller tries next.
    Fatal(ParseError),
}

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, Failure>;

#[derive(Debug)]
struct Mismatch {
    position: usize,
    expected: Vec<&'static str>,
}

/// Outcome of an operand parse: the node and the position after it, or
/// `None` for a mismatch.
type Memo = Option<(Node, usize)>;

/// A position in a token stream that can be saved and restored.
///
/// Besides the position, the cursor carries what the parse functions need
/// from their surroundings: the name-resolution state used for folding, the
/// nesting budget, the furthest mismatch seen so far (which becomes the
/// reported error if the parse fails) and the operands already parsed.
pub struct Cursor<'a> {
    source:    &'a str,
    tokens:    &'a [Spanned],
    position:  usize,
    depth:     usize,
    max_depth: usize,
    state:     EvalState<'a>,
    furthest:  Option<Mismatch>,
    operands:  HashMap<(usize, usize), Memo>,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the first token.
    #[must_use]
    pub fn new(source: &'a str,
               tokens: &'a [Spanned],
               state: EvalState<'a>,
               max_depth: usize)
               -> Self {
        Self { source,
               tokens,
               position: 0,
               depth: 0,
               max_depth,
               state,
               furthest: None,
               operands: HashMap::new() }
    }

    /// The state names are resolved against while parsing.
    #[must_use]
    pub const fn state(&self) -> &EvalState<'a> {
        &self.state
    }

    /// Whether adjacent operands multiply.
    #[must_use]
    pub const fn implied_multiplication(&self) -> bool {
        self.state.implied_multiplication
    }

    /// Returns the next token without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.position).map(|spanned| &spanned.token)
    }

    /// Consumes and returns the next token.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Returns `true` once every token has been consumed.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Returns `true` when the next token starts exactly where the previous
    /// one ended, with no whitespace in between.
    #[must_use]
    pub fn touches_previous(&self) -> bool {
        match (self.position.checked_sub(1).and_then(|i| self.tokens.get(i)),
               self.tokens.get(self.position))
        {
            (Some(previous), Some(next)) => previous.span.end == next.span.start,
            _ => false,
        }
    }

    /// Consumes the next token if it equals `expected`, otherwise records a
    /// mismatch with the given label.
    ///
    /// # Errors
    /// [`Failure::Mismatch`] when the next token differs.
    pub fn expect(&mut self, expected: &Token, label: &'static str) -> ParseResult<()> {
        if self.peek() == Some(expected) {
            self.position += 1;
            Ok(())
        } else {
            self.mismatch(label)
        }
    }

    /// Runs `parse` tentatively.
    ///
    /// On a mismatch the cursor is rewound to where it was and `Ok(None)` is
    /// returned, so the caller can try an alternative. Fatal failures pass
    /// through.
    ///
    /// # Errors
    /// Only [`Failure::Fatal`].
    pub fn attempt<T>(&mut self,
                      parse: impl FnOnce(&mut Self) -> ParseResult<T>)
                      -> ParseResult<Option<T>> {
        let checkpoint = self.position;

        match parse(self) {
            Ok(value) => Ok(Some(value)),
            Err(Failure::Mismatch) => {
                self.position = checkpoint;
                Ok(None)
            },
            Err(fatal) => Err(fatal),
        }
    }

    /// Runs `parse` one nesting level deeper.
    ///
    /// # Errors
    /// [`ParseError::NestingTooDeep`] as a fatal failure when the level would
    /// exceed the configured limit, otherwise whatever `parse` returns.
    pub fn nested<T>(&mut self,
                     parse: impl FnOnce(&mut Self) -> ParseResult<T>)
                     -> ParseResult<T> {
        if self.depth >= self.max_depth {
            return Err(Failure::Fatal(ParseError::NestingTooDeep { limit:  self.max_depth,
                                                                   column: self.column(), }));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Runs an operand parse at most once per position and nesting depth.
    ///
    /// Backtracking may ask for the same operand again, for instance when a
    /// call fails and its name is re-read as a variable followed by an implied
    /// product. The stored outcome is replayed instead, which keeps parsing
    /// linear in the input length.
    ///
    /// # Errors
    /// The mismatch or fatal failure of `parse`.
    pub fn memoized(&mut self,
                    parse: impl FnOnce(&mut Self) -> ParseResult<Node>)
                    -> ParseResult<Node> {
        let key = (self.position, self.depth);

        if let Some(memo) = self.operands.get(&key) {
            return match memo {
                Some((node, end)) => {
                    self.position = *end;
                    Ok(node.clone())
                },
                None => Err(Failure::Mismatch),
            };
        }

        let result = parse(self);
        match &result {
            Ok(node) => {
                self.operands.insert(key, Some((node.clone(), self.position)));
            },
            Err(Failure::Mismatch) => {
                self.operands.insert(key, None);
            },
            Err(Failure::Fatal(_)) => {},
        }
        result
    }

    /// Notes that `expected` would have been accepted at the current
    /// position.
    pub fn record(&mut self, expected: &'static str) {
        let position = self.position;

        match &mut self.furthest {
            Some(furthest) if furthest.position > position => {},
            Some(furthest) if furthest.position == position => {
                if !furthest.expected.contains(&expected) {
                    furthest.expected.push(expected);
                }
            },
            slot => {
                *slot = Some(Mismatch { position,
                                        expected: vec![expected] });
            },
        }
    }

    /// Records `expected` and fails with a mismatch.
    ///
    /// # Errors
    /// Always [`Failure::Mismatch`].
    pub fn mismatch<T>(&mut self, expected: &'static str) -> ParseResult<T> {
        self.record(expected);
        Err(Failure::Mismatch)
    }

    /// Turns the furthest recorded mismatch into the error reported to the
    /// caller.
    #[must_use]
    pub fn into_error(self) -> ParseError {
        let Some(Mismatch { position, expected }) = self.furthest else {
            return ParseError::UnexpectedEndOfInput { expected: "expression".to_owned(),
                                                      column:   self.source.chars().count() + 1, };
        };
        let expected = join_expected(&expected);

        match self.tokens.get(position) {
            Some(spanned) => {
                ParseError::UnexpectedToken { found: self.source[spanned.span.clone()].to_owned(),
                                              expected,
                                              column: column_of(self.source, spanned.span.start) }
            },
            None => ParseError::UnexpectedEndOfInput { expected,
                                                       column: self.source.chars().count() + 1 },
        }
    }

    fn column(&self) -> usize {
        self.tokens
            .get(self.position)
            .map_or_else(|| self.source.chars().count() + 1,
                         |spanned| column_of(self.source, spanned.span.start))
    }
}

/// Joins labels as `a`, `a or b`, `a, b or c`.
fn join_expected(labels: &[&str]) -> String {
    match labels {
        [] => String::new(),
        [only] => (*only).to_owned(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}
