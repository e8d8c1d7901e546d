use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;

use crate::ast::{BinaryFn, UnaryFn};

/// Builds a name table from `name => value` pairs, converting each value into
/// the table's element type.
macro_rules! default_table {
    ($ty:ty; $($name:literal => $value:expr),* $(,)?) => {{
        let mut table: HashMap<String, $ty> = HashMap::new();
        $(
            table.insert($name.to_owned(), $value);
        )*
        table
    }};
}

/// Constants available to every parse and evaluation.
pub static DEFAULT_VARIABLES: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    default_table! { f64;
        "pi"  => std::f64::consts::PI,
        "π"   => std::f64::consts::PI,
        "tau" => std::f64::consts::TAU,
        "τ"   => std::f64::consts::TAU,
        "e"   => std::f64::consts::E,
    }
});

/// One-argument functions available to every parse and evaluation.
pub static DEFAULT_UNARY_FUNCTIONS: Lazy<HashMap<String, UnaryFn>> = Lazy::new(|| {
    default_table! { UnaryFn;
        "sin"       => Arc::new(f64::sin),
        "cos"       => Arc::new(f64::cos),
        "tan"       => Arc::new(f64::tan),
        "asin"      => Arc::new(f64::asin),
        "acos"      => Arc::new(f64::acos),
        "atan"      => Arc::new(f64::atan),
        "sinh"      => Arc::new(f64::sinh),
        "cosh"      => Arc::new(f64::cosh),
        "tanh"      => Arc::new(f64::tanh),
        "asinh"     => Arc::new(f64::asinh),
        "acosh"     => Arc::new(f64::acosh),
        "atanh"     => Arc::new(f64::atanh),
        "log10"     => Arc::new(f64::log10),
        "ln"        => Arc::new(f64::ln),
        "loge"      => Arc::new(f64::ln),
        "log2"      => Arc::new(f64::log2),
        "exp"       => Arc::new(f64::exp),
        "ceil"      => Arc::new(f64::ceil),
        "floor"     => Arc::new(f64::floor),
        "round"     => Arc::new(f64::round),
        "trunc"     => Arc::new(f64::trunc),
        "sqrt"      => Arc::new(f64::sqrt),
        "√"         => Arc::new(f64::sqrt),
        "cbrt"      => Arc::new(f64::cbrt),
        "abs"       => Arc::new(f64::abs),
        "sgn"       => Arc::new(sign),
        "factorial" => Arc::new(factorial),
    }
});

/// Two-argument functions available to every parse and evaluation.
pub static DEFAULT_BINARY_FUNCTIONS: Lazy<HashMap<String, BinaryFn>> = Lazy::new(|| {
    default_table! { BinaryFn;
        "atan2" => Arc::new(f64::atan2),
        "hypot" => Arc::new(f64::hypot),
        "pow"   => Arc::new(f64::powf),
        "min"   => Arc::new(f64::min),
        "max"   => Arc::new(f64::max),
    }
});

/// Returns the numeric sign of a value: `-1`, `0` or `1`.
///
/// Unlike [`f64::signum`], zero maps to zero. `NaN` stays `NaN`.
///
/// # Example
/// ```
/// use mathparse::interpreter::evaluator::function::builtin::sign;
///
/// assert_eq!(sign(-42.0), -1.0);
/// assert_eq!(sign(0.0), 0.0);
/// assert_eq!(sign(11.0), 1.0);
/// ```
#[must_use]
pub fn sign(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x.signum() }
}

/// Computes `x!`.
///
/// Non-negative integers up to 170 are multiplied out exactly; every other
/// argument goes through the gamma function as `Γ(x + 1)`. Negative integers
/// have no factorial and yield `NaN`.
///
/// # Example
/// ```
/// use mathparse::interpreter::evaluator::function::builtin::factorial;
///
/// assert_eq!(factorial(5.0), 120.0);
/// assert_eq!(factorial(0.0), 1.0);
/// assert!((factorial(0.5) - 0.886_226_925_452_758).abs() < 1e-12);
/// assert!(factorial(-3.0).is_nan());
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss)]
pub fn factorial(x: f64) -> f64 {
    if x.is_nan() || (x < 0.0 && x.fract() == 0.0) {
        return f64::NAN;
    }
    if x.is_infinite() {
        return if x > 0.0 { f64::INFINITY } else { f64::NAN };
    }
    if x.fract() == 0.0 && x <= 170.0 {
        return (1..=x as u64).map(|k| k as f64).product();
    }
    euler_gamma(x + 1.0)
}

/// Evaluates the gamma function with the Lanczos approximation.
///
/// # Example
/// ```
/// use mathparse::interpreter::evaluator::function::builtin::euler_gamma;
///
/// assert!((euler_gamma(5.0) - 24.0).abs() < 1e-9);
/// assert!((euler_gamma(0.5) - std::f64::consts::PI.sqrt()).abs() < 1e-12);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn euler_gamma(z: f64) -> f64 {
    // Lanczos coefficients, g = 7, n = 9.
    const COEFFS: [f64; 9] = [0.999_999_999_999_809_9,
                              676.520_368_121_885_1,
                              -1_259.139_216_722_402_8,
                              771.323_428_777_653_1,
                              -176.615_029_162_140_6,
                              12.507_343_278_686_905,
                              -0.138_571_095_265_720_12,
                              9.984_369_578_019_572e-6,
                              1.505_632_735_149_311_6e-7];
    const G: f64 = 7.0;

    if z < 0.5 {
        std::f64::consts::PI / ((std::f64::consts::PI * z).sin() * euler_gamma(1.0 - z))
    } else {
        let z_minus_1 = z - 1.0;
        let mut x = COEFFS[0];

        for (i, &c) in COEFFS.iter().enumerate().skip(1) {
            x += c / (z_minus_1 + i as f64);
        }

        let t = z_minus_1 + G + 0.5;

        std::f64::consts::TAU.sqrt() * t.powf(z_minus_1 + 0.5) * (-t).exp() * x
    }
}
