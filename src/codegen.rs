use crate::expr::{Program, Stmt};

/// Renders a program back to source text. Statements rely on the AST
/// `Display` impls; function declarations get their own layout so bodies
/// come out line by line.
#[derive(Default)]
pub struct CodeGenerator {
    code: String,
}

impl CodeGenerator {
    pub fn generate(mut self, program: &Program) -> String {
        for stmt in &program.statements {
            self.generate_statement(stmt);
        }
        self.code
    }

    fn generate_statement(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::FunDecl(decl) => {
                let params: Vec<&str> = decl.params.iter().map(|p| p.name.as_str()).collect();
                self.code
                    .push_str(&format!("func {}({}) {{\n", decl.name.name, params.join(", ")));
                for stmt in &decl.body {
                    self.generate_statement(stmt);
                }
                self.code.push_str("}\n");
            }
            Stmt::Return(_, expression) => {
                self.code.push_str(&format!("return {}\n", expression));
            }
            other => {
                self.code.push_str(&format!("{}\n", other));
            }
        }
    }
}
