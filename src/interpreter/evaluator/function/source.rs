use std::{
    collections::{BTreeMap, HashMap},
    hash::BuildHasher,
};

use crate::ast::{BinaryFn, UnaryFn};

/// Resolves variable names to numbers.
///
/// Implemented for `HashMap<String, f64>` and `BTreeMap<String, f64>`, and
/// for closures wrapped with [`from_fn`].
pub trait VariableSource {
    /// Returns the value bound to `name`, if any.
    fn variable(&self, name: &str) -> Option<f64>;
}

/// Resolves names to one-argument functions.
pub trait UnaryFunctionSource {
    /// Returns the function bound to `name`, if any.
    fn unary_function(&self, name: &str) -> Option<UnaryFn>;
}

/// Resolves names to two-argument functions.
pub trait BinaryFunctionSource {
    /// Returns the function bound to `name`, if any.
    fn binary_function(&self, name: &str) -> Option<BinaryFn>;
}

impl<S: BuildHasher> VariableSource for HashMap<String, f64, S> {
    fn variable(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl VariableSource for BTreeMap<String, f64> {
    fn variable(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<S: BuildHasher> UnaryFunctionSource for HashMap<String, UnaryFn, S> {
    fn unary_function(&self, name: &str) -> Option<UnaryFn> {
        self.get(name).cloned()
    }
}

impl UnaryFunctionSource for BTreeMap<String, UnaryFn> {
    fn unary_function(&self, name: &str) -> Option<UnaryFn> {
        self.get(name).cloned()
    }
}

impl<S: BuildHasher> BinaryFunctionSource for HashMap<String, BinaryFn, S> {
    fn binary_function(&self, name: &str) -> Option<BinaryFn> {
        self.get(name).cloned()
    }
}

impl BinaryFunctionSource for BTreeMap<String, BinaryFn> {
    fn binary_function(&self, name: &str) -> Option<BinaryFn> {
        self.get(name).cloned()
    }
}

/// A resolution table backed by a closure. Built with [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

/// Wraps a lookup closure so it can serve as any of the resolution tables.
///
/// The closure's signature decides which table it implements:
/// `Fn(&str) -> Option<f64>` for variables, `Fn(&str) -> Option<UnaryFn>`
/// and `Fn(&str) -> Option<BinaryFn>` for functions.
///
/// # Example
/// ```
/// use mathparse::{from_fn, parse};
///
/// let evaluator = parse("4 * t").unwrap();
/// let t = from_fn(|name: &str| (name == "t").then_some(0.25));
///
/// assert_eq!(evaluator.evaluate(Some(&t), None, None), 1.0);
/// ```
pub const fn from_fn<F>(lookup: F) -> FromFn<F> {
    FromFn(lookup)
}

impl<F> VariableSource for FromFn<F> where F: Fn(&str) -> Option<f64>
{
    fn variable(&self, name: &str) -> Option<f64> {
        (self.0)(name)
    }
}

impl<F> UnaryFunctionSource for FromFn<F> where F: Fn(&str) -> Option<UnaryFn>
{
    fn unary_function(&self, name: &str) -> Option<UnaryFn> {
        (self.0)(name)
    }
}

impl<F> BinaryFunctionSource for FromFn<F> where F: Fn(&str) -> Option<BinaryFn>
{
    fn binary_function(&self, name: &str) -> Option<BinaryFn> {
        (self.0)(name)
    }
}

/// A table binding exactly one variable.
#[derive(Debug, Clone, Copy)]
pub struct SingleVariable<'a> {
    /// The bound name.
    pub name:  &'a str,
    /// Its value.
    pub value: f64,
}

impl VariableSource for SingleVariable<'_> {
    fn variable(&self, name: &str) -> Option<f64> {
        (name == self.name).then_some(self.value)
    }
}
