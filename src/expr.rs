use std::fmt;

use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SourceLocation {
    pub line: usize,
    pub col: i64,
}

#[derive(Serialize, Debug, Eq, PartialEq, Hash, Clone)]
pub struct Symbol {
    pub name: String,
    pub line: usize,
    pub col: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub name: Symbol,
    pub params: Vec<Param>,
    pub return_type: String,
    pub body: Vec<Stmt>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum Stmt {
    FunDecl(FuncDecl),
    VarDecl(Symbol),
    Assign(Symbol, Literal),
    Print(Expr),
    Return(SourceLocation, Expr),
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
}

#[derive(Serialize, Debug, Copy, Clone, Eq, PartialEq)]
pub enum BinaryOpTy {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct BinaryOp {
    pub ty: BinaryOpTy,
    pub line: usize,
    pub col: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum Literal {
    Number(i64),
    Str(String),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Array(SourceLocation, Vec<i64>),
    Variable(Symbol),
    Binary(Box<Expr>, BinaryOp, Box<Expr>),
}

impl fmt::Display for BinaryOpTy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOpTy::Add => write!(f, "+"),
            BinaryOpTy::Sub => write!(f, "-"),
            BinaryOpTy::Mul => write!(f, "*"),
            BinaryOpTy::Div => write!(f, "/"),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(value) => write!(f, "{}", value),
            Literal::Str(value) => write!(f, "\"{}\"", value),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => write!(f, "{}", literal),
            Expr::Array(_, elements) => {
                let rendered: Vec<String> = elements.iter().map(|n| n.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Expr::Variable(symbol) => write!(f, "{}", symbol.name),
            Expr::Binary(left, op, right) => write!(f, "({} {} {})", left, op.ty, right),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::FunDecl(decl) => {
                let params: Vec<String> = decl
                    .params
                    .iter()
                    .map(|param| format!("{} {}", param.ty, param.name))
                    .collect();
                write!(f, "func {}({})", decl.name.name, params.join(", "))?;
                if !decl.return_type.is_empty() {
                    write!(f, " {}", decl.return_type)?;
                }
                writeln!(f, " {{")?;
                for stmt in &decl.body {
                    writeln!(f, "  {}", stmt)?;
                }
                write!(f, "}}")
            }
            Stmt::VarDecl(symbol) => write!(f, "{};", symbol.name),
            Stmt::Assign(symbol, value) => write!(f, "{} = {};", symbol.name, value),
            Stmt::Print(argument) => write!(f, "print({});", argument),
            Stmt::Return(_, expression) => write!(f, "return {};", expression),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                writeln!(f, "if {} {{", condition)?;
                for stmt in then_branch {
                    writeln!(f, "  {}", stmt)?;
                }
                if let Some(else_branch) = else_branch {
                    writeln!(f, "}} else {{")?;
                    for stmt in else_branch {
                        writeln!(f, "  {}", stmt)?;
                    }
                }
                write!(f, "}}")
            }
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
