use std::{collections::HashMap, f64::consts::E, sync::Arc};

use mathparse::{EvalError, MathParser, ast::UnaryFn};

fn parser() -> MathParser {
    let variables = HashMap::from([("a".to_string(), 3.0),
                                   ("b".to_string(), 5.0),
                                   ("ab".to_string(), 7.0),
                                   ("aba".to_string(), 11.0)]);
    let unaries: HashMap<String, UnaryFn> =
        HashMap::from([("OO".to_string(), Arc::new(|x: f64| x * 2.0) as UnaryFn),
                       ("FOO".to_string(), Arc::new(|x: f64| x * 3.0) as UnaryFn)]);

    MathParser::new().with_variables(variables)
                     .with_unary_functions(unaries)
                     .implied_multiplication(true)
}

fn value_of(src: &str) -> f64 {
    parser().parse(src)
            .unwrap_or_else(|| panic!("'{src}' failed to parse"))
            .value()
}

#[test]
fn known_names_are_never_split() {
    assert_eq!(value_of("ab"), 7.0);
    assert_eq!(value_of("aba"), 11.0);
}

#[test]
fn unknown_names_split_into_products() {
    assert_eq!(value_of("ba"), 15.0);
    assert_eq!(value_of("bb"), 25.0);
    assert_eq!(value_of("abaab"), 11.0 * 3.0 * 5.0);
    assert_eq!(value_of("ae"), 3.0 * E);
    assert_eq!(value_of("2ab"), 14.0);
}

#[test]
fn partial_splits_stay_variables() {
    let evaluator = parser().parse("abc").expect("parses");

    assert!(evaluator.unresolved().variables.iter().eq(["abc"]));
    assert_eq!(evaluator.evaluate_strict(None, None, None),
               Err(EvalError::VariableNotFound { name: "abc".to_string() }));

    // The split is retried with the caller's table.
    assert_eq!(evaluator.evaluate_with("c", 2.0), 14.0);
    // A table that binds the whole name wins over splitting.
    assert_eq!(evaluator.evaluate_with("abc", 2.0), 2.0);
}

#[test]
fn call_names_split_into_factor_and_function() {
    assert_eq!(value_of("aOO(2)"), 12.0);
    assert_eq!(value_of("aFOO(2)"), 18.0);
    assert_eq!(value_of("abFOO(1)"), 21.0);
    assert_eq!(value_of("ab(4)"), 28.0);
    assert_eq!(value_of("FOO(2)"), 6.0);
}

#[test]
fn call_split_needs_a_resolved_prefix() {
    let evaluator = parser().parse("cFOO(1)").expect("parses");

    assert!(evaluator.unresolved().unary_functions.iter().eq(["cFOO"]));
    assert_eq!(evaluator.evaluate_strict(None, None, None),
               Err(EvalError::UnaryFunctionNotFound { name: "cFOO".to_string() }));
    assert_eq!(evaluator.evaluate_with("c", 2.0), 6.0);
}

#[test]
fn unknown_calls_without_known_parts_fail() {
    let evaluator = parser().parse("D(13)").expect("parses");

    assert!(evaluator.value().is_nan());
    assert_eq!(evaluator.evaluate_strict(None, None, None),
               Err(EvalError::UnaryFunctionNotFound { name: "D".to_string() }));
}

#[test]
fn splitting_is_off_without_implied_multiplication() {
    let parser = parser().implied_multiplication(false);
    let evaluator = parser.parse("ba").expect("parses");

    assert!(!evaluator.implied_multiplication());
    assert_eq!(evaluator.evaluate_strict(None, None, None),
               Err(EvalError::VariableNotFound { name: "ba".to_string() }));
    assert!(parser.parse("aOO(2)").expect("parses").value().is_nan());
}

#[test]
fn default_constants_split() {
    let parser = MathParser::new().implied_multiplication(true);

    let two_pi_e = parser.parse("2pie").expect("parses").value();
    assert!((two_pi_e - 2.0 * std::f64::consts::PI * E).abs() < 1e-12);

    let pi_sin = parser.parse("pisin(pi / 2)").expect("parses").value();
    assert!((pi_sin - std::f64::consts::PI).abs() < 1e-12);
}
