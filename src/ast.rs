use std::{collections::BTreeSet, fmt, sync::Arc};

/// A function of one argument that a call node can be bound to.
pub type UnaryFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A function of two arguments that a call node can be bound to.
pub type BinaryFn = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// The infix operators recognised by the parser.
///
/// Every operator is also a reducer: [`BinaryOperator::reduce`] combines two
/// operand nodes into one, folding them into a constant when both sides are
/// already known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*` or `×`
    Mul,
    /// `/` or `÷`
    Div,
    /// `^`
    Pow,
}

impl BinaryOperator {
    /// Applies the operator to two numbers.
    ///
    /// # Example
    /// ```
    /// use mathparse::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::Pow.apply(2.0, 10.0), 1024.0);
    /// assert!(BinaryOperator::Div.apply(0.0, 0.0).is_nan());
    /// ```
    #[must_use]
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Pow => lhs.powf(rhs),
        }
    }

    /// The canonical glyph of the operator. Used as the call name when an
    /// operation cannot be folded at parse time.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }

    /// Maps a canonical glyph back to its operator.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "^" => Some(Self::Pow),
            _ => None,
        }
    }

    /// Returns the operator as a bound two-argument function.
    #[must_use]
    pub fn function(self) -> BinaryFn {
        Arc::new(move |lhs, rhs| self.apply(lhs, rhs))
    }

    /// Combines two nodes with this operator.
    ///
    /// When both operands are constants the result is a single
    /// [`Node::Constant`]; otherwise a [`Node::BinaryCall`] bound to the
    /// operator is produced.
    ///
    /// # Example
    /// ```
    /// use mathparse::ast::{BinaryOperator, Node};
    ///
    /// let folded = BinaryOperator::Add.reduce(Node::Constant(1.0), Node::Constant(2.0));
    /// assert_eq!(folded.as_constant(), Some(3.0));
    ///
    /// let deferred = BinaryOperator::Mul.reduce(Node::Constant(2.0), Node::variable("t"));
    /// assert_eq!(deferred.to_string(), "(2 * t)");
    /// ```
    #[must_use]
    pub fn reduce(self, lhs: Node, rhs: Node) -> Node {
        match (&lhs, &rhs) {
            (Node::Constant(l), Node::Constant(r)) => Node::Constant(self.apply(*l, *r)),
            _ => Node::BinaryCall { function: Some(self.function()),
                                    name:     self.symbol().to_owned(),
                                    arg1:     Box::new(lhs),
                                    arg2:     Box::new(rhs), },
        }
    }
}

/// A node of a parsed expression.
///
/// The tree is strictly owned parent to child. Construction folds eagerly:
/// an operator or bound call whose operands are all constants is stored as a
/// single [`Node::Constant`].
#[derive(Clone)]
pub enum Node {
    /// A fully resolved number.
    Constant(f64),
    /// A name that is resolved when the expression is evaluated.
    Variable(String),
    /// A call of a one-argument function.
    UnaryCall {
        /// The function, when it was known at parse time.
        function: Option<UnaryFn>,
        /// Name of the function as written.
        name:     String,
        /// The argument expression.
        arg:      Box<Self>,
    },
    /// A call of a two-argument function, or an operator application that
    /// could not be folded.
    BinaryCall {
        /// The function, when it was known at parse time.
        function: Option<BinaryFn>,
        /// Name of the function, or the operator glyph.
        name:     String,
        /// First argument (left operand).
        arg1:     Box<Self>,
        /// Second argument (right operand).
        arg2:     Box<Self>,
    },
}

impl Node {
    /// Builds a [`Node::Variable`].
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Builds a one-argument call, folding it when the function is known and
    /// the argument is constant.
    #[must_use]
    pub fn unary_call(name: impl Into<String>, function: Option<UnaryFn>, arg: Self) -> Self {
        match (&function, &arg) {
            (Some(f), Self::Constant(value)) => Self::Constant(f(*value)),
            _ => Self::UnaryCall { function,
                                   name: name.into(),
                                   arg: Box::new(arg) },
        }
    }

    /// Builds a two-argument call, folding it when the function is known and
    /// both arguments are constant.
    #[must_use]
    pub fn binary_call(name: impl Into<String>,
                       function: Option<BinaryFn>,
                       arg1: Self,
                       arg2: Self)
                       -> Self {
        match (&function, &arg1, &arg2) {
            (Some(f), Self::Constant(a), Self::Constant(b)) => Self::Constant(f(*a, *b)),
            _ => Self::BinaryCall { function,
                                    name: name.into(),
                                    arg1: Box::new(arg1),
                                    arg2: Box::new(arg2) },
        }
    }

    /// Returns the value of a [`Node::Constant`].
    #[must_use]
    pub const fn as_constant(&self) -> Option<f64> {
        match self {
            Self::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns `true` for a [`Node::Constant`].
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }

    /// Collects the names this tree still needs from the resolution tables.
    ///
    /// Operator applications and calls bound at parse time are not reported;
    /// their operands are.
    #[must_use]
    pub fn unresolved(&self) -> Unresolved {
        let mut unresolved = Unresolved::default();
        self.collect_unresolved(&mut unresolved);
        unresolved
    }

    fn collect_unresolved(&self, into: &mut Unresolved) {
        match self {
            Self::Constant(_) => {},
            Self::Variable(name) => {
                into.variables.insert(name.clone());
            },
            Self::UnaryCall { function, name, arg } => {
                if function.is_none() {
                    into.unary_functions.insert(name.clone());
                }
                arg.collect_unresolved(into);
            },
            Self::BinaryCall { function,
                               name,
                               arg1,
                               arg2, } => {
                if function.is_none() {
                    into.binary_functions.insert(name.clone());
                }
                arg1.collect_unresolved(into);
                arg2.collect_unresolved(into);
            },
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Self::Variable(name) => f.debug_tuple("Variable").field(name).finish(),
            Self::UnaryCall { function, name, arg } => {
                f.debug_struct("UnaryCall")
                 .field("resolved", &function.is_some())
                 .field("name", name)
                 .field("arg", arg)
                 .finish()
            },
            Self::BinaryCall { function,
                               name,
                               arg1,
                               arg2, } => f.debug_struct("BinaryCall")
                                           .field("resolved", &function.is_some())
                                           .field("name", name)
                                           .field("arg1", arg1)
                                           .field("arg2", arg2)
                                           .finish(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant(value) => write!(f, "{value}"),
            Self::Variable(name) => write!(f, "{name}"),
            Self::UnaryCall { name, arg, .. } => write!(f, "{name}({arg})"),
            Self::BinaryCall { name, arg1, arg2, .. } => {
                if BinaryOperator::from_symbol(name).is_some() {
                    write!(f, "({arg1} {name} {arg2})")
                } else {
                    write!(f, "{name}({arg1}, {arg2})")
                }
            },
        }
    }
}

/// Names that a parsed expression could not resolve on its own.
///
/// Callers can use this to check ahead of time whether their tables cover
/// everything an evaluation will ask for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Unresolved {
    /// Names of variables.
    pub variables:        BTreeSet<String>,
    /// Names of one-argument functions.
    pub unary_functions:  BTreeSet<String>,
    /// Names of two-argument functions.
    pub binary_functions: BTreeSet<String>,
}

impl Unresolved {
    /// Returns `true` when nothing is left to resolve.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.unary_functions.is_empty()
        && self.binary_functions.is_empty()
    }
}
