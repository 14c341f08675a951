use std::fmt;

use crate::expr::{BinaryOpTy, Expr, Literal, Program, Stmt};
use crate::optimizer;

/// Fatal evaluation errors. Unlike parse diagnostics these stop the run
/// immediately; they are defects in the evaluated program, not in its
/// syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    DivisionByZero { line: usize, col: i64 },
    NotConstant { what: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DivisionByZero { line, col } => {
                write!(f, "division by zero at line {}, col {}", line, col)
            }
            Error::NotConstant { what } => {
                write!(f, "cannot evaluate non-constant expression: {}", what)
            }
        }
    }
}

/// Evaluates an arithmetic expression tree to a 64-bit integer. Operands
/// are evaluated left before right; division truncates toward zero.
pub fn evaluate(expr: &Expr) -> Result<i64, Error> {
    match expr {
        Expr::Literal(Literal::Number(value)) => Ok(*value),
        Expr::Literal(Literal::Str(_)) => Err(Error::NotConstant {
            what: "string literal".to_string(),
        }),
        Expr::Array(..) => Err(Error::NotConstant {
            what: "array literal".to_string(),
        }),
        Expr::Variable(symbol) => Err(Error::NotConstant {
            what: format!("variable {}", symbol.name),
        }),
        Expr::Binary(left, op, right) => {
            let left = evaluate(left)?;
            let right = evaluate(right)?;
            match op.ty {
                BinaryOpTy::Add => Ok(left.wrapping_add(right)),
                BinaryOpTy::Sub => Ok(left.wrapping_sub(right)),
                BinaryOpTy::Mul => Ok(left.wrapping_mul(right)),
                BinaryOpTy::Div => {
                    if right == 0 {
                        Err(Error::DivisionByZero {
                            line: op.line,
                            col: op.col,
                        })
                    } else {
                        Ok(left.wrapping_div(right))
                    }
                }
            }
        }
    }
}

/// Walks a parsed program and reports one line per construct. Output is
/// buffered as well as printed so tests can inspect it.
#[derive(Default)]
pub struct Interpreter {
    pub output: Vec<String>,
}

impl Interpreter {
    pub fn run(&mut self, program: &Program) -> Result<(), Error> {
        for stmt in &program.statements {
            self.execute(stmt)?;
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Error> {
        match stmt {
            Stmt::FunDecl(decl) => {
                self.report(format!("function: {}", decl.name.name));
                for stmt in &decl.body {
                    self.execute(stmt)?;
                }
                Ok(())
            }
            Stmt::VarDecl(symbol) => {
                self.report(format!("variable declared: {}", symbol.name));
                Ok(())
            }
            Stmt::Assign(symbol, value) => {
                self.report(format!("{} = {}", symbol.name, value));
                Ok(())
            }
            Stmt::Print(argument) => self.print_value(argument),
            Stmt::Return(_, expression) => {
                let value = evaluate(&optimizer::optimize(expression))?;
                self.report(format!("return: {}", value));
                Ok(())
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                // Not reachable from the parser today; a nonzero condition
                // selects the then branch.
                let branch = if evaluate(condition)? != 0 {
                    Some(then_branch)
                } else {
                    else_branch.as_ref()
                };
                if let Some(branch) = branch {
                    for stmt in branch {
                        self.execute(stmt)?;
                    }
                }
                Ok(())
            }
        }
    }

    fn print_value(&mut self, argument: &Expr) -> Result<(), Error> {
        match argument {
            Expr::Literal(Literal::Str(value)) => self.report(value.clone()),
            Expr::Literal(Literal::Number(value)) => self.report(value.to_string()),
            Expr::Array(_, elements) => {
                let rendered: Vec<String> = elements.iter().map(|n| n.to_string()).collect();
                self.report(format!("[{}]", rendered.join(", ")));
            }
            // Variables carry no runtime value in this language; the name
            // is all there is to show.
            Expr::Variable(symbol) => self.report(symbol.name.clone()),
            Expr::Binary(..) => {
                let value = evaluate(&optimizer::optimize(argument))?;
                self.report(value.to_string());
            }
        }
        Ok(())
    }

    fn report(&mut self, line: String) {
        println!("{}", line);
        self.output.push(line);
    }
}
