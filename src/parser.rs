use std::fmt;

use crate::expr::{
    BinaryOp, BinaryOpTy, Expr, FuncDecl, Literal, Program, SourceLocation, Stmt, Symbol,
};
use crate::scanner::{Scanner, Token, TokenType};

/// A recoverable parse problem. The parser never prints and never aborts on
/// these; it records the diagnostic, abandons the current construct and
/// resumes at the next statement boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    TokenMismatch {
        expected: TokenType,
        found: Token,
    },
    UnsupportedStatement {
        token: Token,
    },
    MissingClosingBrace {
        line: usize,
        col: i64,
    },
    ExpectedExpression {
        found: Token,
    },
    ExpectedLiteral {
        found: Token,
    },
    ExpectedPrintArgument {
        found: Token,
    },
    ExpectedArrayElement {
        found: Token,
    },
    UnterminatedArray {
        line: usize,
        col: i64,
    },
    NumberOutOfRange {
        token: Token,
    },
}

impl Diagnostic {
    pub fn position(&self) -> (usize, i64) {
        match self {
            Diagnostic::TokenMismatch { found, .. }
            | Diagnostic::UnsupportedStatement { token: found }
            | Diagnostic::ExpectedExpression { found }
            | Diagnostic::ExpectedLiteral { found }
            | Diagnostic::ExpectedPrintArgument { found }
            | Diagnostic::ExpectedArrayElement { found }
            | Diagnostic::NumberOutOfRange { token: found } => (found.line, found.col),
            Diagnostic::MissingClosingBrace { line, col }
            | Diagnostic::UnterminatedArray { line, col } => (*line, *col),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::TokenMismatch { expected, found } => write!(
                f,
                "expected {:?} but found {:?} at line {}, col {}: {}",
                expected, found.ty, found.line, found.col, found.literal
            ),
            Diagnostic::UnsupportedStatement { token } => write!(
                f,
                "unsupported statement at line {}, col {}: {}",
                token.line, token.col, token.literal
            ),
            Diagnostic::MissingClosingBrace { line, col } => write!(
                f,
                "missing closing brace at end of function body, line {}, col {}",
                line, col
            ),
            Diagnostic::ExpectedExpression { found } => write!(
                f,
                "expected expression but found {:?} at line {}, col {}: {}",
                found.ty, found.line, found.col, found.literal
            ),
            Diagnostic::ExpectedLiteral { found } => write!(
                f,
                "expected number or string on the right of '=' at line {}, col {}: {}",
                found.line, found.col, found.literal
            ),
            Diagnostic::ExpectedPrintArgument { found } => write!(
                f,
                "expected array, string, number or identifier in print at line {}, col {}: {}",
                found.line, found.col, found.literal
            ),
            Diagnostic::ExpectedArrayElement { found } => write!(
                f,
                "expected number in array at line {}, col {}: {}",
                found.line, found.col, found.literal
            ),
            Diagnostic::UnterminatedArray { line, col } => {
                write!(f, "expected ']' before end of input at line {}, col {}", line, col)
            }
            Diagnostic::NumberOutOfRange { token } => write!(
                f,
                "number does not fit in 64 bits at line {}, col {}: {}",
                token.line, token.col, token.literal
            ),
        }
    }
}

pub struct Parser {
    scanner: Scanner,
    current: Token,
    diagnostics: Vec<Diagnostic>,
}

/// Best-effort single pass over the whole input: returns the partial program
/// together with every diagnostic encountered. Presentation is the caller's
/// concern.
pub fn parse(source: &str) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::new(Scanner::new(source));
    let program = parser.parse_program();
    (program, parser.diagnostics)
}

/// Parses a single arithmetic expression, as used by the REPL and the
/// expression tests.
pub fn parse_expression(source: &str) -> Result<Expr, Diagnostic> {
    let mut parser = Parser::new(Scanner::new(source));
    parser.expression()
}

impl Parser {
    fn new(mut scanner: Scanner) -> Self {
        let current = scanner.next_token();
        Self {
            scanner,
            current,
            diagnostics: Vec::new(),
        }
    }

    fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();
        while self.current.ty != TokenType::Eof {
            match self.current.ty {
                TokenType::Func => {
                    if let Some(stmt) = self.parse_function() {
                        statements.push(stmt);
                    }
                }
                TokenType::Identifier => {
                    if let Some(stmt) = self.parse_declaration() {
                        statements.push(stmt);
                    }
                }
                _ => self.diagnostics.push(Diagnostic::UnsupportedStatement {
                    token: self.current.clone(),
                }),
            }
            // One token per iteration no matter what, so a malformed
            // statement can never stall the loop.
            self.advance();
        }
        Program { statements }
    }

    // func name ( ) { body }
    // Each helper leaves `current` on the last token it accepted; on a
    // mismatch the diagnostic is recorded and the construct abandoned.
    fn parse_function(&mut self) -> Option<Stmt> {
        self.advance();
        let name_token = self.expect(TokenType::Identifier)?;
        let name = Symbol {
            name: name_token.literal,
            line: name_token.line,
            col: name_token.col,
        };
        self.advance();
        self.expect(TokenType::LeftParen)?;
        self.advance();
        self.expect(TokenType::RightParen)?;
        self.advance();
        self.expect(TokenType::LeftBrace)?;
        self.advance();

        let mut body = Vec::new();
        while self.current.ty != TokenType::RightBrace && self.current.ty != TokenType::Eof {
            if self.current.ty == TokenType::Print {
                if let Some(stmt) = self.parse_print() {
                    body.push(stmt);
                }
            } else {
                self.diagnostics.push(Diagnostic::UnsupportedStatement {
                    token: self.current.clone(),
                });
            }
            self.advance();
        }
        if self.current.ty == TokenType::Eof {
            self.diagnostics.push(Diagnostic::MissingClosingBrace {
                line: self.current.line,
                col: self.current.col,
            });
        }

        Some(Stmt::FunDecl(FuncDecl {
            name,
            params: Vec::new(),
            return_type: String::new(),
            body,
        }))
    }

    // Starting at an identifier, one token of lookahead decides between an
    // assignment (`x = 1;`) and a bare declaration (`x;`).
    fn parse_declaration(&mut self) -> Option<Stmt> {
        let symbol = Symbol {
            name: self.current.literal.clone(),
            line: self.current.line,
            col: self.current.col,
        };

        if self.scanner.peek_token().ty == TokenType::Equal {
            self.advance();
            self.advance();
            let value = match self.current.ty {
                TokenType::Number => Literal::Number(self.require_number()?),
                TokenType::String => Literal::Str(self.current.literal.clone()),
                _ => {
                    self.diagnostics.push(Diagnostic::ExpectedLiteral {
                        found: self.current.clone(),
                    });
                    return None;
                }
            };
            self.advance();
            self.expect(TokenType::Semicolon)?;
            Some(Stmt::Assign(symbol, value))
        } else {
            self.advance();
            self.expect(TokenType::Semicolon)?;
            Some(Stmt::VarDecl(symbol))
        }
    }

    // print ( argument ) ;
    fn parse_print(&mut self) -> Option<Stmt> {
        self.advance();
        self.expect(TokenType::LeftParen)?;
        self.advance();
        let argument = match self.current.ty {
            TokenType::LeftBracket => self.parse_array()?,
            TokenType::String => Expr::Literal(Literal::Str(self.current.literal.clone())),
            TokenType::Number => Expr::Literal(Literal::Number(self.require_number()?)),
            TokenType::Identifier => Expr::Variable(Symbol {
                name: self.current.literal.clone(),
                line: self.current.line,
                col: self.current.col,
            }),
            _ => {
                self.diagnostics.push(Diagnostic::ExpectedPrintArgument {
                    found: self.current.clone(),
                });
                return None;
            }
        };
        self.advance();
        self.expect(TokenType::RightParen)?;
        self.advance();
        self.expect(TokenType::Semicolon)?;
        Some(Stmt::Print(argument))
    }

    // [ n, n, ... ] — an empty array is fine; a dangling comma or a missing
    // closing bracket is diagnosed without aborting the parse.
    fn parse_array(&mut self) -> Option<Expr> {
        let location = SourceLocation {
            line: self.current.line,
            col: self.current.col,
        };
        self.advance();

        let mut elements = Vec::new();
        if self.current.ty == TokenType::RightBracket {
            return Some(Expr::Array(location, elements));
        }
        loop {
            if self.current.ty == TokenType::Eof {
                self.diagnostics.push(Diagnostic::UnterminatedArray {
                    line: self.current.line,
                    col: self.current.col,
                });
                return None;
            }
            if self.current.ty != TokenType::Number {
                self.diagnostics.push(Diagnostic::ExpectedArrayElement {
                    found: self.current.clone(),
                });
                return None;
            }
            elements.push(self.require_number()?);
            self.advance();
            match self.current.ty {
                TokenType::Comma => self.advance(),
                TokenType::RightBracket => break,
                _ => {
                    self.diagnostics.push(Diagnostic::TokenMismatch {
                        expected: TokenType::RightBracket,
                        found: self.current.clone(),
                    });
                    return None;
                }
            }
        }
        Some(Expr::Array(location, elements))
    }

    // Precedence climbing over the four binary operators; `*` and `/` bind
    // tighter than `+` and `-`, all left-associative.
    fn expression(&mut self) -> Result<Expr, Diagnostic> {
        self.binary(0)
    }

    fn binary(&mut self, min_precedence: u8) -> Result<Expr, Diagnostic> {
        let mut expr = self.primary()?;
        while let Some(op) = self.binary_op() {
            if precedence(op.ty) < min_precedence {
                break;
            }
            self.advance();
            let right = self.binary(precedence(op.ty) + 1)?;
            expr = Expr::Binary(Box::new(expr), op, Box::new(right));
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, Diagnostic> {
        if self.current.ty != TokenType::Number {
            return Err(Diagnostic::ExpectedExpression {
                found: self.current.clone(),
            });
        }
        let value = self
            .current
            .literal
            .parse()
            .map_err(|_| Diagnostic::NumberOutOfRange {
                token: self.current.clone(),
            })?;
        self.advance();
        Ok(Expr::Literal(Literal::Number(value)))
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        let ty = match self.current.ty {
            TokenType::Plus => BinaryOpTy::Add,
            TokenType::Minus => BinaryOpTy::Sub,
            TokenType::Star => BinaryOpTy::Mul,
            TokenType::Slash => BinaryOpTy::Div,
            _ => return None,
        };
        Some(BinaryOp {
            ty,
            line: self.current.line,
            col: self.current.col,
        })
    }

    fn expect(&mut self, expected: TokenType) -> Option<Token> {
        if self.current.ty == expected {
            Some(self.current.clone())
        } else {
            self.diagnostics.push(Diagnostic::TokenMismatch {
                expected,
                found: self.current.clone(),
            });
            None
        }
    }

    fn require_number(&mut self) -> Option<i64> {
        match self.current.literal.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                self.diagnostics.push(Diagnostic::NumberOutOfRange {
                    token: self.current.clone(),
                });
                None
            }
        }
    }

    fn advance(&mut self) {
        self.current = self.scanner.next_token();
    }
}

fn precedence(op: BinaryOpTy) -> u8 {
    match op {
        BinaryOpTy::Mul | BinaryOpTy::Div => 2,
        BinaryOpTy::Add | BinaryOpTy::Sub => 1,
    }
}
