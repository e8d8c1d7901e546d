use std::{collections::HashMap, fs, process::ExitCode};

use clap::Parser;
use log::debug;
use mathparse::MathParser;

/// mathparse evaluates arithmetic expressions such as `4 * sin(t * pi)` or,
/// with implied multiplication, `2πr`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells mathparse to read the expression from the named file.
    #[arg(short, long)]
    file: bool,

    /// Treats adjacent operands such as `2pi` or `2(1 + 2)` as multiplied.
    #[arg(short, long)]
    implied: bool,

    /// Binds a variable, as `NAME=VALUE`. May be repeated.
    #[arg(short, long = "var", value_parser = parse_binding)]
    variables: Vec<(String, f64)>,

    /// Reports unknown names as errors instead of printing `NaN`.
    #[arg(short, long)]
    strict: bool,

    /// Prints the parsed tree and the names it leaves unresolved.
    #[arg(short, long)]
    tree: bool,

    expression: String,
}

fn parse_binding(binding: &str) -> Result<(String, f64), String> {
    let (name, value) = binding.split_once('=')
                               .ok_or_else(|| format!("expected NAME=VALUE, found '{binding}'"))?;
    let value = value.trim()
                     .parse::<f64>()
                     .map_err(|err| format!("invalid value for '{name}': {err}"))?;

    Ok((name.trim().to_owned(), value))
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    let text = if args.file {
        match fs::read_to_string(&args.expression) {
            Ok(text) => text.trim().to_owned(),
            Err(err) => {
                eprintln!("Failed to read the input file '{}': {err}", &args.expression);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.expression
    };

    let variables: HashMap<String, f64> = args.variables.into_iter().collect();
    debug!("evaluating '{text}' with {} bound variables", variables.len());

    let parser = MathParser::new().with_variables(variables)
                                  .implied_multiplication(args.implied);

    let evaluator = match parser.parse_with_diagnostics(&text) {
        Ok(evaluator) => evaluator,
        Err(err) => {
            eprintln!("{}", err.annotate(&text));
            return ExitCode::FAILURE;
        },
    };

    if args.tree {
        println!("tree: {}", evaluator.root());

        let unresolved = evaluator.unresolved();
        if !unresolved.is_empty() {
            println!("unresolved: {unresolved:?}");
        }
    }

    if args.strict {
        match evaluator.evaluate_strict(None, None, None) {
            Ok(value) => println!("{value}"),
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            },
        }
    } else {
        println!("{}", evaluator.value());
    }

    ExitCode::SUCCESS
}
