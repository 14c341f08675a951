use std::process;

use clap::{Arg, Command};

use petitlang::error_formatting;
use petitlang::input;
use petitlang::interpreter;
use petitlang::parser;
use petitlang::repl;
use petitlang::scanner;
use petitlang::typechecker;

fn main() {
    let matches = Command::new("petitlang")
        .version("0.1.0")
        .about("petitlang language front-end")
        .arg(
            Arg::new("INPUT")
                .help("source file to run; starts the REPL when omitted")
                .index(1),
        )
        .arg(
            Arg::new("show-tokens")
                .long("show-tokens")
                .takes_value(false)
                .help("dump the token stream and exit"),
        )
        .arg(
            Arg::new("show-ast")
                .long("show-ast")
                .takes_value(false)
                .help("dump the parsed AST as JSON and exit"),
        )
        .get_matches();

    let path = match matches.value_of("INPUT") {
        Some(path) => path,
        None => {
            repl::run();
            return;
        }
    };

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("could not read {}: {}", path, err);
            process::exit(1);
        }
    };

    if matches.is_present("show-tokens") {
        for token in scanner::scan_tokens(&content) {
            println!("{}", token);
        }
        return;
    }

    let input = input::Input {
        source: input::Source::File(path.to_string()),
        content,
    };

    let (program, diagnostics) = parser::parse(&input.content);
    for diagnostic in &diagnostics {
        error_formatting::format_parse_error(diagnostic, &input);
    }

    if matches.is_present("show-ast") {
        match serde_json::to_string_pretty(&program) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("could not serialize program: {}", err),
        }
        return;
    }

    if let Err(err) = typechecker::TypeChecker::default().check(&program) {
        error_formatting::format_type_error(&err, &input);
    }

    let mut interpreter = interpreter::Interpreter::default();
    if let Err(err) = interpreter.run(&program) {
        error_formatting::format_interpreter_error(&err, &input);
        process::exit(1);
    }
}
