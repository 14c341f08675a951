use crate::error_formatting;
use crate::input;
use crate::interpreter;
use crate::line_reader;
use crate::optimizer;
use crate::parser;
use crate::scanner;

fn eval_line(line: &str) {
    let input = input::Input {
        source: input::Source::Literal,
        content: line.to_string(),
    };

    // A line opening with a number is an expression to evaluate; anything
    // else goes through the statement parser.
    let first = scanner::Scanner::new(line).next_token();
    if first.ty == scanner::TokenType::Number {
        match parser::parse_expression(line) {
            Ok(expr) => match interpreter::evaluate(&optimizer::optimize(&expr)) {
                Ok(value) => println!("{}", value),
                Err(err) => error_formatting::format_interpreter_error(&err, &input),
            },
            Err(diagnostic) => error_formatting::format_parse_error(&diagnostic, &input),
        }
        return;
    }

    let (program, diagnostics) = parser::parse(line);
    for diagnostic in &diagnostics {
        error_formatting::format_parse_error(diagnostic, &input);
    }
    let mut interpreter = interpreter::Interpreter::default();
    if let Err(err) = interpreter.run(&program) {
        error_formatting::format_interpreter_error(&err, &input);
    }
}

pub fn run() {
    let mut line_reader =
        match line_reader::LineReader::new(".petitlang-history.txt", ">>> ") {
            Ok(line_reader) => line_reader,
            Err(err) => {
                eprintln!("could not initialize line editing: {}", err);
                return;
            }
        };

    println!(
        "===================================================\n\
         Welcome to the petitlang REPL\n\
         ===================================================\n",
    );

    loop {
        match line_reader.readline() {
            line_reader::LineReadStatus::Line(line) => eval_line(&line),
            line_reader::LineReadStatus::Done => break,
        }
    }
}
