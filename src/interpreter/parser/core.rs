use std::sync::Arc;

use log::debug;

use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        evaluator::{
            core::Evaluator,
            function::source::{BinaryFunctionSource, UnaryFunctionSource, VariableSource},
            state::{EvalState, Tables},
        },
        lexer::tokenize,
        parser::{
            binary::parse_expression,
            cursor::{Cursor, Failure},
        },
    },
};

/// Default limit on how deeply parentheses, calls and negations may nest.
///
/// Each level costs a full descent through the precedence tiers, so the limit
/// is chosen to fit a 2 MiB thread stack in an unoptimized build.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parses text into [`Evaluator`]s.
///
/// The parser holds the configuration shared by every text it parses: the
/// tables names are resolved against (in addition to the defaults), whether
/// adjacent operands multiply, and the nesting limit.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use mathparse::MathParser;
///
/// let parser = MathParser::new().with_variables(HashMap::from([("r".to_string(), 2.0)]))
///                               .implied_multiplication(true);
///
/// let area = parser.parse("π r^2").unwrap();
/// assert!((area.value() - 4.0 * std::f64::consts::PI).abs() < 1e-12);
/// assert!(parser.parse("π r^").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct MathParser {
    tables:                 Tables,
    implied_multiplication: bool,
    max_depth:              usize,
}

impl Default for MathParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MathParser {
    /// Creates a parser that knows only the default tables, without implied
    /// multiplication.
    #[must_use]
    pub fn new() -> Self {
        Self { tables:                 Tables::default(),
               implied_multiplication: false,
               max_depth:              DEFAULT_MAX_DEPTH, }
    }

    /// Adds a variable table, consulted before the defaults.
    #[must_use]
    pub fn with_variables(mut self, variables: impl VariableSource + Send + Sync + 'static) -> Self {
        self.tables.variables = Some(Arc::new(variables));
        self
    }

    /// Adds a one-argument function table, consulted before the defaults.
    #[must_use]
    pub fn with_unary_functions(mut self,
                                functions: impl UnaryFunctionSource + Send + Sync + 'static)
                                -> Self {
        self.tables.unary_functions = Some(Arc::new(functions));
        self
    }

    /// Adds a two-argument function table, consulted before the defaults.
    #[must_use]
    pub fn with_binary_functions(mut self,
                                 functions: impl BinaryFunctionSource + Send + Sync + 'static)
                                 -> Self {
        self.tables.binary_functions = Some(Arc::new(functions));
        self
    }

    /// Enables or disables implied multiplication, so that `2pi`, `2(1 + 2)`
    /// and `x y` are products.
    #[must_use]
    pub const fn implied_multiplication(mut self, enabled: bool) -> Self {
        self.implied_multiplication = enabled;
        self
    }

    /// Sets the nesting limit.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses a text, returning `None` if it is not a valid expression.
    #[must_use]
    pub fn parse(&self, text: &str) -> Option<Evaluator> {
        self.parse_with_diagnostics(text)
            .inspect_err(|err| debug!("failed to parse '{text}': {err}"))
            .ok()
    }

    /// Parses a text, describing where and why it is not a valid expression.
    ///
    /// The whole text must form one expression; input left over after it is
    /// an error.
    ///
    /// # Errors
    /// The [`ParseError`] for the furthest position the parser reached.
    ///
    /// # Example
    /// ```
    /// use mathparse::{MathParser, ParseError};
    ///
    /// let err = MathParser::new().parse_with_diagnostics("2 * (3 + 4").unwrap_err();
    /// assert!(matches!(err, ParseError::UnexpectedEndOfInput { column: 11, .. }));
    /// ```
    pub fn parse_with_diagnostics(&self, text: &str) -> Result<Evaluator, ParseError> {
        let tokens = tokenize(text)?;
        let state = EvalState::new(&self.tables, self.implied_multiplication);
        let mut cursor = Cursor::new(text, &tokens, state, self.max_depth);

        let root = match parse_complete(&mut cursor) {
            Ok(root) => root,
            Err(Failure::Fatal(err)) => return Err(err),
            Err(Failure::Mismatch) => return Err(cursor.into_error()),
        };

        Ok(Evaluator::new(root, self.implied_multiplication, self.tables.clone()))
    }
}

fn parse_complete(cursor: &mut Cursor<'_>) -> Result<Node, Failure> {
    let root = parse_expression(cursor)?;
    if cursor.at_end() {
        Ok(root)
    } else {
        cursor.mismatch("end of input")
    }
}
