use log::trace;

use crate::{
    ast::{BinaryOperator, Node, UnaryFn},
    interpreter::evaluator::state::EvalState,
};

/// Splits an unknown identifier into a product of known variables.
///
/// Split points are tried from the shortest dropped suffix to the longest. At
/// each point the left part is tested as a variable first, then the right
/// part; the other side is split again recursively and left as a bare
/// [`Node::Variable`] when nothing inside it is known. The first match wins,
/// so the result depends on the scan order rather than on the longest known
/// name.
///
/// The returned node is a [`Node::Constant`] exactly when every piece of the
/// name resolved.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use mathparse::interpreter::evaluator::{
///     implied::split_variable,
///     state::{EvalState, Tables},
/// };
///
/// let tables = Tables::default();
/// let vars = HashMap::from([("a".to_string(), 3.0), ("b".to_string(), 5.0)]);
/// let state = EvalState::new(&tables, true).with_variables(Some(&vars));
///
/// assert_eq!(split_variable("ab", &state).and_then(|n| n.as_constant()), Some(15.0));
/// assert_eq!(split_variable("ac", &state).unwrap().to_string(), "(3 * c)");
/// assert!(split_variable("xyz", &state).is_none());
/// ```
#[must_use]
pub fn split_variable(name: &str, state: &EvalState<'_>) -> Option<Node> {
    let boundaries: Vec<usize> = name.char_indices().skip(1).map(|(at, _)| at).collect();

    for &at in boundaries.iter().rev() {
        let (left, right) = name.split_at(at);

        if let Some(value) = state.find_variable(left) {
            let node = BinaryOperator::Mul.reduce(Node::Constant(value), remainder(right, state));
            trace!("split '{name}' at '{left}' into {node}");
            return Some(node);
        }
        if let Some(value) = state.find_variable(right) {
            let node = BinaryOperator::Mul.reduce(remainder(left, state), Node::Constant(value));
            trace!("split '{name}' at '{right}' into {node}");
            return Some(node);
        }
    }

    None
}

fn remainder(part: &str, state: &EvalState<'_>) -> Node {
    split_variable(part, state).or_else(|| state.find_variable(part).map(Node::Constant))
                               .unwrap_or_else(|| Node::variable(part))
}

/// Resolves a name to a single number: directly, or as a product of known
/// variables that leaves nothing unresolved.
#[must_use]
pub fn resolve_factor(name: &str, state: &EvalState<'_>) -> Option<f64> {
    state.find_variable(name)
         .or_else(|| split_variable(name, state).and_then(|node| node.as_constant()))
}

/// The outcome of splitting the name of an unknown call.
///
/// `pisin(x)` becomes the factor `π` and the function `sin`; `ab(x)` with no
/// function inside the name becomes the factor `a * b` multiplying `x`.
#[derive(Clone)]
pub struct CallSplit {
    /// Product of the variables in front of the function name.
    pub factor:   f64,
    /// The function found at the end of the name, with its name.
    pub function: Option<(String, UnaryFn)>,
}

impl std::fmt::Debug for CallSplit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallSplit")
         .field("factor", &self.factor)
         .field("function", &self.function.as_ref().map(|(name, _)| name))
         .finish()
    }
}

impl CallSplit {
    /// Rebuilds the call as `factor * function(arg)`, or `factor * arg` when
    /// no function was found.
    #[must_use]
    pub fn into_node(self, arg: Node) -> Node {
        let rhs = match self.function {
            Some((name, function)) => Node::unary_call(name, Some(function), arg),
            None => arg,
        };
        BinaryOperator::Mul.reduce(Node::Constant(self.factor), rhs)
    }

    /// Applies the split to an already evaluated argument.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        match &self.function {
            Some((_, function)) => self.factor * function(value),
            None => self.factor * value,
        }
    }
}

/// Splits the name of an unknown one-argument call.
///
/// The longest suffix that names a known function is taken, and the prefix
/// in front of it must resolve completely through [`resolve_factor`]. When no
/// suffix names a function, the whole name must resolve as a factor.
///
/// # Example
/// ```
/// use mathparse::interpreter::evaluator::{implied::split_call, state::{EvalState, Tables}};
///
/// let tables = Tables::default();
/// let state = EvalState::new(&tables, true);
///
/// let split = split_call("pisin", &state).unwrap();
/// assert_eq!(split.function.as_ref().map(|(name, _)| name.as_str()), Some("sin"));
/// assert!((split.apply(std::f64::consts::FRAC_PI_2) - std::f64::consts::PI).abs() < 1e-12);
///
/// assert!(split_call("pie", &state).is_some());
/// assert!(split_call("q", &state).is_none());
/// ```
#[must_use]
pub fn split_call(name: &str, state: &EvalState<'_>) -> Option<CallSplit> {
    for (at, _) in name.char_indices().skip(1) {
        let (prefix, suffix) = name.split_at(at);

        if let Some(function) = state.find_unary(suffix) {
            let factor = resolve_factor(prefix, state)?;
            trace!("split call '{name}' into {factor} * {suffix}");
            return Some(CallSplit { factor,
                                    function: Some((suffix.to_owned(), function)) });
        }
    }

    let factor = resolve_factor(name, state)?;
    trace!("split call '{name}' into factor {factor}");
    Some(CallSplit { factor,
                     function: None })
}
