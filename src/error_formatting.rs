use colored::Colorize;

use crate::input;
use crate::interpreter;
use crate::parser;
use crate::typechecker;

pub fn format_parse_error(diagnostic: &parser::Diagnostic, input: &input::Input) {
    let (line, col) = diagnostic.position();
    eprintln!("{}: {}", "parse error".red().bold(), diagnostic);
    print_context(input, line, col);
}

pub fn format_type_error(err: &typechecker::Error, input: &input::Input) {
    let typechecker::Error::InvalidReturnExpression { line, col } = err;
    eprintln!("{}: {}", "type error".red().bold(), err);
    print_context(input, *line, *col);
}

pub fn format_interpreter_error(err: &interpreter::Error, input: &input::Input) {
    eprintln!("{}: {}", "runtime error".red().bold(), err);
    if let interpreter::Error::DivisionByZero { line, col } = err {
        print_context(input, *line, *col);
    }
}

fn print_context(input: &input::Input, line: usize, col: i64) {
    if let input::Source::File(path) = &input.source {
        eprintln!("in {}:", path);
    }
    if let Some(text) = input.content.lines().nth(line.saturating_sub(1)) {
        eprintln!("{}", text);
        let offset = if col > 0 { (col - 1) as usize } else { 0 };
        eprintln!("{}{}", " ".repeat(offset), "^".blue().bold());
    }
}
