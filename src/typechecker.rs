use std::collections::HashMap;
use std::fmt;

use crate::expr::{Expr, Program, Stmt};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    InvalidReturnExpression { line: usize, col: i64 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidReturnExpression { line, col } => write!(
                f,
                "invalid return expression at line {}, col {}: expected a binary expression",
                line, col
            ),
        }
    }
}

/// Flat name-to-declared-type mapping. No scoping; a later `define` for the
/// same name silently overwrites the earlier one.
#[derive(Default)]
pub struct SymbolTable {
    symbols: HashMap<String, String>,
}

impl SymbolTable {
    pub fn define(&mut self, name: &str, ty: &str) {
        self.symbols.insert(name.to_string(), ty.to_string());
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.symbols.get(name).map(String::as_str)
    }
}

/// Structural sanity pass, not type inference: function and parameter names
/// are recorded against their declared types, and every return expression
/// must literally be a binary expression.
#[derive(Default)]
pub struct TypeChecker {
    symbols: SymbolTable,
}

impl TypeChecker {
    pub fn check(&mut self, program: &Program) -> Result<(), Error> {
        for stmt in &program.statements {
            self.check_statement(stmt)?;
        }
        Ok(())
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    fn check_statement(&mut self, stmt: &Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::FunDecl(decl) => {
                self.symbols.define(&decl.name.name, &decl.return_type);
                for param in &decl.params {
                    self.symbols.define(&param.name, &param.ty);
                }
                for stmt in &decl.body {
                    self.check_statement(stmt)?;
                }
                Ok(())
            }
            Stmt::Return(location, expression) => {
                if matches!(expression, Expr::Binary(..)) {
                    Ok(())
                } else {
                    Err(Error::InvalidReturnExpression {
                        line: location.line,
                        col: location.col,
                    })
                }
            }
            _ => Ok(()),
        }
    }
}
