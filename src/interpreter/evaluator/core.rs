use log::debug;

use crate::{
    ast::{Node, Unresolved},
    error::EvalError,
    interpreter::evaluator::{
        function::source::{
            BinaryFunctionSource, SingleVariable, UnaryFunctionSource, VariableSource,
        },
        implied::{split_call, split_variable},
        state::{EvalState, Tables},
    },
};

/// Result type used by the evaluator.
///
/// Strict evaluation returns either a number or the [`EvalError`] naming the
/// first symbol no table could resolve.
pub type EvalResult<T> = Result<T, EvalError>;

/// A parsed expression, ready to be evaluated any number of times.
///
/// The evaluator owns the expression tree together with the tables and the
/// implied-multiplication setting of the [`MathParser`](crate::MathParser)
/// that produced it. It is immutable, so one instance can be shared between
/// threads and evaluated concurrently with different override tables.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use mathparse::parse;
///
/// let evaluator = parse("4 * sin(t * pi)").unwrap();
/// assert!(evaluator.value().is_nan());
///
/// let vars = HashMap::from([("t".to_string(), 0.5)]);
/// assert!((evaluator.evaluate(Some(&vars), None, None) - 4.0).abs() < 1e-5);
/// assert!((evaluator.evaluate_with("t", 0.25) - 2.0_f64.sqrt() * 2.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    root:                   Node,
    implied_multiplication: bool,
    tables:                 Tables,
}

impl Evaluator {
    /// Wraps a parsed tree.
    #[must_use]
    pub const fn new(root: Node, implied_multiplication: bool, tables: Tables) -> Self {
        Self { root,
               implied_multiplication,
               tables }
    }

    /// The root of the expression tree.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// Whether unresolved names may be split into products at evaluation
    /// time.
    #[must_use]
    pub const fn implied_multiplication(&self) -> bool {
        self.implied_multiplication
    }

    /// The names an evaluation still has to resolve.
    ///
    /// # Example
    /// ```
    /// use mathparse::parse;
    ///
    /// let unresolved = parse("f(x) + g(1, 2) * sin(y)").unwrap().unresolved();
    ///
    /// assert!(unresolved.variables.iter().eq(["x", "y"]));
    /// assert!(unresolved.unary_functions.iter().eq(["f"]));
    /// assert!(unresolved.binary_functions.iter().eq(["g"]));
    /// ```
    #[must_use]
    pub fn unresolved(&self) -> Unresolved {
        self.root.unresolved()
    }

    /// Evaluates without override tables. `NaN` when a name is unknown.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.evaluate(None, None, None)
    }

    /// Evaluates the expression, yielding `NaN` when a name cannot be
    /// resolved.
    ///
    /// Each table given here is consulted before the parser's tables and the
    /// defaults.
    #[must_use]
    pub fn evaluate(&self,
                    variables: Option<&dyn VariableSource>,
                    unary_functions: Option<&dyn UnaryFunctionSource>,
                    binary_functions: Option<&dyn BinaryFunctionSource>)
                    -> f64 {
        match self.evaluate_strict(variables, unary_functions, binary_functions) {
            Ok(value) => value,
            Err(err) => {
                debug!("evaluation of {} yields NaN: {err}", self.root);
                f64::NAN
            },
        }
    }

    /// Evaluates the expression, reporting the first unresolved name.
    ///
    /// # Errors
    /// [`EvalError::VariableNotFound`], [`EvalError::UnaryFunctionNotFound`]
    /// or [`EvalError::BinaryFunctionNotFound`] carrying the name no table
    /// knows.
    ///
    /// # Example
    /// ```
    /// use mathparse::{EvalError, parse};
    ///
    /// let evaluator = parse("undefined(1.2)").unwrap();
    /// assert_eq!(evaluator.evaluate_strict(None, None, None),
    ///            Err(EvalError::UnaryFunctionNotFound { name: "undefined".to_string() }));
    /// ```
    pub fn evaluate_strict(&self,
                           variables: Option<&dyn VariableSource>,
                           unary_functions: Option<&dyn UnaryFunctionSource>,
                           binary_functions: Option<&dyn BinaryFunctionSource>)
                           -> EvalResult<f64> {
        let state = EvalState::new(&self.tables, self.implied_multiplication)
            .with_variables(variables)
            .with_unary_functions(unary_functions)
            .with_binary_functions(binary_functions);

        eval_node(&self.root, &state)
    }

    /// Evaluates with a single variable bound. `NaN` when another name is
    /// unknown.
    #[must_use]
    pub fn evaluate_with(&self, name: &str, value: f64) -> f64 {
        self.evaluate(Some(&SingleVariable { name, value }), None, None)
    }

    /// Strict evaluation with a single variable bound.
    ///
    /// # Errors
    /// See [`Evaluator::evaluate_strict`].
    pub fn evaluate_strict_with(&self, name: &str, value: f64) -> EvalResult<f64> {
        self.evaluate_strict(Some(&SingleVariable { name, value }), None, None)
    }
}

/// Evaluates one node of a tree against the given state.
///
/// A call resolves its function before its arguments, so the outermost
/// missing name is the one reported.
///
/// # Errors
/// Fails with the first name none of the state's tables resolve.
pub fn eval_node(node: &Node, state: &EvalState<'_>) -> EvalResult<f64> {
    match node {
        Node::Constant(value) => Ok(*value),
        Node::Variable(name) => eval_variable(name, state),
        Node::UnaryCall { function, name, arg } => {
            let value = || eval_node(arg, state);

            if let Some(function) = function {
                return Ok(function(value()?));
            }
            if let Some(function) = state.find_unary(name) {
                return Ok(function(value()?));
            }
            if state.implied_multiplication
               && let Some(split) = split_call(name, state)
            {
                return Ok(split.apply(value()?));
            }

            Err(EvalError::UnaryFunctionNotFound { name: name.clone() })
        },
        Node::BinaryCall { function,
                           name,
                           arg1,
                           arg2, } => {
            let function =
                function.clone()
                        .or_else(|| state.find_binary(name))
                        .ok_or_else(|| EvalError::BinaryFunctionNotFound { name: name.clone() })?;

            Ok(function(eval_node(arg1, state)?, eval_node(arg2, state)?))
        },
    }
}

fn eval_variable(name: &str, state: &EvalState<'_>) -> EvalResult<f64> {
    if let Some(value) = state.find_variable(name) {
        return Ok(value);
    }
    if state.implied_multiplication
       && let Some(value) = split_variable(name, state).and_then(|node| node.as_constant())
    {
        return Ok(value);
    }

    Err(EvalError::VariableNotFound { name: name.to_owned() })
}
