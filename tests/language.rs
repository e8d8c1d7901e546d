use std::{
    collections::HashMap,
    f64::consts::{E, FRAC_PI_4, PI},
    fs::{self},
    sync::Arc,
};

use mathparse::{
    EvalError, MathParser, ParseError, ast::UnaryFn, from_fn,
    interpreter::parser::core::DEFAULT_MAX_DEPTH, parse, parse_with_diagnostics,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (implied, line) in extract_example_lines(&content) {
            count += 1;
            let (source, expected) =
                line.split_once("=>")
                    .unwrap_or_else(|| panic!("Example '{line}' in {path:?} has no '=>'"));
            let (source, expected) = (source.trim(), expected.trim());
            let parser = MathParser::new().implied_multiplication(implied);

            if expected == "error" {
                assert!(parser.parse(source).is_none(),
                        "Example '{source}' in {path:?} parsed but was expected to fail");
                continue;
            }

            let expected: f64 = expected.parse()
                                        .unwrap_or_else(|e| panic!("Bad expectation in '{line}': {e}"));
            let actual = parser.parse(source)
                               .unwrap_or_else(|| panic!("Example '{source}' in {path:?} failed to parse"))
                               .value();
            assert!(close(actual, expected),
                    "Example '{source}' in {path:?} gave {actual}, expected {expected}");
        }
    }

    assert!(count > 0, "No examples found in book/src");
}

/// Returns `(implied, line)` for every non-empty line of the `mathparse`
/// blocks.
fn extract_example_lines(content: &str) -> Vec<(bool, String)> {
    let mut lines = Vec::new();
    let mut inside = None;

    for line in content.lines() {
        let trimmed = line.trim();
        if let Some(info) = trimmed.strip_prefix("```mathparse") {
            inside = Some(info.trim() == "implied");
            continue;
        }
        if inside.is_some() && trimmed.starts_with("```") {
            inside = None;
            continue;
        }
        if let Some(implied) = inside
           && !trimmed.is_empty()
        {
            lines.push((implied, trimmed.to_owned()));
        }
    }

    lines
}

fn close(actual: f64, expected: f64) -> bool {
    if expected.is_nan() {
        return actual.is_nan();
    }
    actual == expected || (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

fn assert_value(src: &str, expected: f64) {
    let actual = parse(src).unwrap_or_else(|| panic!("'{src}' failed to parse"))
                           .value();
    assert!(close(actual, expected), "'{src}' gave {actual}, expected {expected}");
}

fn assert_implied(src: &str, expected: f64) {
    let actual = MathParser::new().implied_multiplication(true)
                                  .parse(src)
                                  .unwrap_or_else(|| panic!("'{src}' failed to parse"))
                                  .value();
    assert!(close(actual, expected), "'{src}' gave {actual}, expected {expected}");
}

fn assert_failure(src: &str) {
    assert!(parse(src).is_none(), "'{src}' parsed but was expected to fail");
}

#[test]
fn precedence_and_associativity() {
    assert_value("1 + 2 * 3 / 4 - 5 ^ 2 ^ 3", 1.0 + 2.0 * 3.0 / 4.0 - 5f64.powf(2f64.powf(3.0)));
    assert_value("5^2^3^4", 5f64.powf(2f64.powf(3f64.powf(4.0))));
    assert_value("2^3^2", 512.0);
    assert_value("10 - 4 - 3", 3.0);
    assert_value("64 / 4 / 2", 8.0);
    assert_value("2 * 3 + 4 * 5", 26.0);
}

#[test]
fn parenthesization() {
    assert_value("((1+2)*(3+4))/5^(1+3)", ((1.0 + 2.0) * (3.0 + 4.0)) / 5f64.powf(4.0));
    assert_value("(2^3)^2", 64.0);
    assert_value("((((7))))", 7.0);
}

#[test]
fn negation_requires_adjacent_operand() {
    assert_value("-(-3-2)", 5.0);
    assert_value("-3", -3.0);
    assert_value("2 - -3", 5.0);
    assert_value("2*-3", -6.0);
    assert_value("2^-1", 0.5);
    assert_value("--4", 4.0);
    assert_failure("- 3");
    assert_failure("2 * - 3");
}

#[test]
fn negation_binds_tighter_than_exponent() {
    assert_value("-2^2", 4.0);
    assert_value("-(2^2)", -4.0);
}

#[test]
fn minus_without_implied_multiplication_subtracts() {
    assert_value("2 -3", -1.0);
    assert_value("2-3", -1.0);
    assert_value("(3)-2", 1.0);
}

#[test]
fn numbers_and_glyphs() {
    assert_value(".5 + 1.5e1", 15.5);
    assert_value("2e3", 2000.0);
    assert_value("2.5E-1", 0.25);
    assert_value("2 × 3 ÷ 4", 1.5);
    assert_value("π", PI);
    assert_value("τ / 2", PI);
    assert_value("e", E);
    assert_value("  1 +\t2 ", 3.0);
}

#[test]
fn default_functions() {
    assert_value("sin(0)", 0.0);
    assert_value("cos(pi)", -1.0);
    assert_value("atan2(1, 1)", FRAC_PI_4);
    assert_value("hypot(3, 4)", 5.0);
    assert_value("pow(2, 10)", 1024.0);
    assert_value("min(3, -2)", -2.0);
    assert_value("max(3, -2)", 3.0);
    assert_value("factorial(5)", 120.0);
    assert_value("sgn(-3)", -1.0);
    assert_value("abs(-3.5)", 3.5);
    assert_value("√(16)", 4.0);
    assert_value("sqrt(2)^2", 2.0);
    assert_value("cbrt(27)", 3.0);
    assert_value("log2(8)", 3.0);
    assert_value("ln(e)", 1.0);
    assert_value("loge(e^2)", 2.0);
    assert_value("log10(1000)", 3.0);
    assert_value("exp(0)", 1.0);
    assert_value("floor(-2.5) + ceil(2.1) + round(2.5) + trunc(-2.7)", -3.0 + 3.0 + 3.0 - 2.0);
    assert_value("sin(pi / 2) * cos(0)", 1.0);
}

#[test]
fn nested_calls() {
    assert_value("sqrt(sqrt(sqrt(256)))", 2.0);
    assert_value("max(min(1, 2), hypot(3, 4))", 5.0);
    assert_value("sin(cos(sin(cos(0))))", 0.0f64.cos().sin().cos().sin());
}

#[test]
fn invalid_expressions_fail() {
    assert_failure("");
    assert_failure("   ");
    assert_failure("1 +");
    assert_failure("(1");
    assert_failure("1)");
    assert_failure("2 ^");
    assert_failure("1 2");
    assert_failure("a b");
    assert_failure("2pi");
    assert_failure("2(1+2)");
    assert_failure("sin()");
    assert_failure("atan2(1,)");
    assert_failure("atan2(1, 2, 3)");
    assert_failure(".");
    assert_failure("1 + * 2");
}

#[test]
fn unresolved_variables_yield_nan() {
    let evaluator = parse("4 * sin(t * pi)").expect("parses");
    assert!(evaluator.value().is_nan());
    assert!((evaluator.evaluate_with("t", 0.5) - 4.0).abs() < 1e-5);
    assert!(evaluator.evaluate_with("u", 0.5).is_nan());
}

#[test]
fn evaluation_is_repeatable_with_different_tables() {
    let evaluator = parse("t * 2 + 1").expect("parses");

    let first = HashMap::from([("t".to_string(), 1.0)]);
    let second = HashMap::from([("t".to_string(), 10.0)]);

    assert_eq!(evaluator.evaluate(Some(&first), None, None), 3.0);
    assert_eq!(evaluator.evaluate(Some(&first), None, None), 3.0);
    assert_eq!(evaluator.evaluate(Some(&second), None, None), 21.0);
    assert_eq!(evaluator.evaluate_with("t", 0.5), 2.0);
}

#[test]
fn closures_serve_as_tables() {
    let evaluator = parse("x + y").expect("parses");
    let lookup = from_fn(|name: &str| match name {
                             "x" => Some(1.0),
                             "y" => Some(2.0),
                             _ => None,
                         });

    assert_eq!(evaluator.evaluate(Some(&lookup), None, None), 3.0);
}

#[test]
fn strict_evaluation_names_the_missing_symbol() {
    let unary = parse("undefined(1.2)").expect("parses");
    assert_eq!(unary.evaluate_strict(None, None, None),
               Err(EvalError::UnaryFunctionNotFound { name: "undefined".to_string() }));

    let binary = parse("foo(1, 2)").expect("parses");
    assert_eq!(binary.evaluate_strict(None, None, None),
               Err(EvalError::BinaryFunctionNotFound { name: "foo".to_string() }));

    let variable = parse("a + 1").expect("parses");
    assert_eq!(variable.evaluate_strict(None, None, None),
               Err(EvalError::VariableNotFound { name: "a".to_string() }));
    assert_eq!(variable.evaluate_strict_with("a", 2.0), Ok(3.0));
}

#[test]
fn strict_evaluation_reports_the_outer_call_first() {
    let unary = parse("undefined(t)").expect("parses");
    assert_eq!(unary.evaluate_strict(None, None, None),
               Err(EvalError::UnaryFunctionNotFound { name: "undefined".to_string() }));

    let binary = parse("foo(t, u)").expect("parses");
    assert_eq!(binary.evaluate_strict(None, None, None),
               Err(EvalError::BinaryFunctionNotFound { name: "foo".to_string() }));

    // Once the function resolves, the missing argument is reported.
    let known = parse("sin(t)").expect("parses");
    assert_eq!(known.evaluate_strict(None, None, None),
               Err(EvalError::VariableNotFound { name: "t".to_string() }));
}

#[test]
fn strict_errors_are_recoverable_with_broader_tables() {
    let evaluator = parse("double(t)").expect("parses");
    assert!(evaluator.evaluate_strict_with("t", 2.0).is_err());

    let functions: HashMap<String, UnaryFn> =
        HashMap::from([("double".to_string(), Arc::new(|x: f64| x * 2.0) as UnaryFn)]);
    let variables = HashMap::from([("t".to_string(), 2.0)]);

    assert_eq!(evaluator.evaluate_strict(Some(&variables), Some(&functions), None), Ok(4.0));
}

#[test]
fn parser_tables_resolve_at_parse_time() {
    let functions: HashMap<String, UnaryFn> =
        HashMap::from([("double".to_string(), Arc::new(|x: f64| x * 2.0) as UnaryFn)]);
    let parser = MathParser::new().with_variables(HashMap::from([("k".to_string(), 3.0)]))
                                  .with_unary_functions(functions);

    let evaluator = parser.parse("double(k) + 1").expect("parses");
    assert!(evaluator.root().is_constant());
    assert_eq!(evaluator.value(), 7.0);

    // Known names are folded, so a later table cannot rebind them.
    assert_eq!(evaluator.evaluate_with("k", 100.0), 7.0);

    let deferred = parser.parse("double(x)").expect("parses");
    assert_eq!(deferred.evaluate_with("x", 5.0), 10.0);
}

#[test]
fn evaluation_tables_supply_missing_functions() {
    let parser = MathParser::new().with_variables(from_fn(|name: &str| {
                                                              (name == "late").then_some(1.0)
                                                          }));
    let evaluator = parser.parse("f(2)").expect("parses");

    let functions: HashMap<String, UnaryFn> =
        HashMap::from([("f".to_string(), Arc::new(|x: f64| x + 0.5) as UnaryFn)]);
    assert_eq!(evaluator.evaluate(None, Some(&functions), None), 2.5);
    assert!(evaluator.value().is_nan());
}

#[test]
fn unresolved_names_are_reported() {
    let unresolved = parse("f(x) + g(1, y) * sin(z) - pi").expect("parses")
                                                          .unresolved();

    assert!(unresolved.variables.iter().eq(["x", "y", "z"]));
    assert!(unresolved.unary_functions.iter().eq(["f"]));
    assert!(unresolved.binary_functions.iter().eq(["g"]));

    assert!(parse("sin(pi) * 2").expect("parses").unresolved().is_empty());
}

#[test]
fn constants_fold_while_parsing() {
    let folded = parse("2 * (3 + 4) - sin(0)").expect("parses");
    assert_eq!(folded.root().as_constant(), Some(14.0));

    let partial = parse("2 * 3 + t").expect("parses");
    assert_eq!(partial.root().to_string(), "(6 + t)");
}

#[test]
fn implied_multiplication_joins_adjacent_operands() {
    assert_implied("2pi", 2.0 * PI);
    assert_implied("2 pi", 2.0 * PI);
    assert_implied("pi 2", 2.0 * PI);
    assert_implied("2(1+2)", 6.0);
    assert_implied("(1+2)(3+4)", 21.0);
    assert_implied("2 sin(pi / 2)", 2.0);
    assert_implied("3 ^ 2 2", 18.0);
    assert_implied("1 + 2 3", 7.0);
}

#[test]
fn implied_multiplication_never_swallows_a_minus() {
    assert_implied("2 -3", -1.0);
    assert_implied("(3)-2", 1.0);
    assert_implied("2(-3)", -6.0);
}

fn nested(open: &str, levels: usize) -> String {
    format!("{}1{}", open.repeat(levels), ")".repeat(levels))
}

#[test]
fn nesting_limit_is_enforced() {
    // The innermost number is one more level.
    let deepest = DEFAULT_MAX_DEPTH - 1;

    assert_value(&nested("(", deepest), 1.0);
    assert!(parse(&nested("(", deepest + 1)).is_none());
    assert!(parse(&nested("(", 300)).is_none());

    assert!(parse(&nested("sin(", deepest)).is_some());
    assert!(parse(&nested("sin(", deepest + 1)).is_none());

    assert_eq!(parse_with_diagnostics(&nested("(", deepest + 1)).expect_err("too deep"),
               ParseError::NestingTooDeep { limit:  DEFAULT_MAX_DEPTH,
                                            column: DEFAULT_MAX_DEPTH + 1, });
    assert_eq!(parse_with_diagnostics(&nested("sin(", deepest + 1)).expect_err("too deep"),
               ParseError::NestingTooDeep { limit:  DEFAULT_MAX_DEPTH,
                                            column: 4 * DEFAULT_MAX_DEPTH + 1, });

    let strict = MathParser::new().max_depth(3);
    assert!(strict.parse("((1))").is_some());
    assert!(strict.parse("(((1)))").is_none());
}

#[test]
fn unclosed_calls_fail_quickly_with_implied_multiplication() {
    let parser = MathParser::new().implied_multiplication(true);
    let unclosed = format!("{}x", "f(".repeat(40));

    assert!(parser.parse(&unclosed).is_none());

    let closed = format!("{}x{}", "f(".repeat(40), ")".repeat(40));
    assert!(parser.parse(&closed).is_some());
}
