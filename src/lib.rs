pub mod codegen;
pub mod error_formatting;
pub mod expr;
pub mod input;
pub mod interpreter;
pub mod line_reader;
pub mod optimizer;
pub mod parser;
pub mod repl;
pub mod scanner;
pub mod typechecker;
