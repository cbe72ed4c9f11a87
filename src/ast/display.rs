//! Canonical surface rendering of the typed tree.
//!
//! Printing a program and parsing the output again yields an equal tree.
//! Operators are fully parenthesized so the printed form does not depend on
//! precedence.

use std::fmt::{Display, Formatter, Result};

use super::{
    ast::{Expr, Program, StatementExpr, Stmt},
    expressions::{AssignmentExpr, FloatExpr, InfixExpr},
    statements::{
        BlockStmt, ElseIfClause, FnDeclStmt, ForInit, ForStmt, IfStmt, MultiAssignStmt,
        MultiTarget, ReturnStmt, VarDeclStmt,
    },
};

fn join<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

/// Renders an operand, parenthesizing assignments that would otherwise bind
/// looser than the surrounding operator.
struct Operand<'a>(&'a Expr);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.0 {
            Expr::Assignment(assignment) => write!(f, "({})", assignment),
            other => write!(f, "{}", other),
        }
    }
}

impl Display for FloatExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let rendered = self.value.to_string();
        if rendered.contains('.') {
            write!(f, "{}", rendered)
        } else {
            write!(f, "{}.0", rendered)
        }
    }
}

impl Display for InfixExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "({} {} {})",
            Operand(&self.left),
            self.operator,
            Operand(&self.right)
        )
    }
}

impl Display for AssignmentExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} {} {}", self.target.name, self.operator, self.value)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Expr::Identifier(expr) => write!(f, "{}", expr.name),
            Expr::Integer(expr) => write!(f, "{}", expr.value),
            Expr::Float(expr) => write!(f, "{}", expr),
            Expr::Bool(expr) => write!(f, "{}", expr.value),
            Expr::String(expr) => write!(f, "\"{}\"", expr.value),
            Expr::Char(expr) => write!(f, "'{}'", expr.value),
            Expr::Array(expr) => write!(f, "[{}]", join(&expr.elements)),
            Expr::HashMap(expr) => {
                let pairs = expr
                    .pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "{{{}}}", pairs)
            }
            Expr::Prefix(expr) => write!(f, "({}{})", expr.operator, Operand(&expr.operand)),
            Expr::Infix(expr) => write!(f, "{}", expr),
            Expr::Postfix(expr) => write!(f, "({}{})", Operand(&expr.operand), expr.operator),
            Expr::Assignment(expr) => write!(f, "{}", expr),
            Expr::Call(expr) => write!(f, "{}({})", expr.callee, join(&expr.arguments)),
            Expr::Index(expr) => write!(f, "{}[{}]", Operand(&expr.target), expr.index),
        }
    }
}

impl Display for StatementExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", Expr::from(self.clone()))
    }
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.body.is_empty() {
            return write!(f, "{{ }}");
        }

        write!(f, "{{ ")?;
        for stmt in self.iter() {
            write!(f, "{} ", stmt)?;
        }
        write!(f, "}}")
    }
}

// Without the trailing `;`, which the statement or `for` header adds
impl Display for VarDeclStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let keyword = if self.is_constant { "const" } else { "var" };
        write!(f, "{} {}: {} = {}", keyword, self.name, self.ty, self.value)
    }
}

impl Display for MultiTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            MultiTarget::Declare {
                is_constant,
                name,
                ty,
            } => {
                let keyword = if *is_constant { "const" } else { "var" };
                write!(f, "{} {}: {}", keyword, name, ty)
            }
            MultiTarget::Assign { name, .. } => write!(f, "{}", name),
        }
    }
}

impl Display for MultiAssignStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} = {};", join(&self.targets), join(&self.values))
    }
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.values.as_slice() {
            [] => write!(f, "return;"),
            [single] => write!(f, "return: {};", single),
            many => write!(f, "return: ({});", join(many)),
        }
    }
}

impl Display for FnDeclStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match &self.body {
            Some(body) => write!(f, "fun: {} {}", self.signature, body),
            None => write!(f, "fun: {};", self.signature),
        }
    }
}

impl Display for ElseIfClause {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, " else if: ({}): {}", self.condition, self.body)
    }
}

impl Display for IfStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "if: ({}): {}", self.condition, self.body)?;
        for clause in &self.else_ifs {
            write!(f, "{}", clause)?;
        }
        if let Some(alternate) = &self.alternate {
            write!(f, " else: {}", alternate)?;
        }
        Ok(())
    }
}

impl Display for ForInit {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ForInit::Declaration(declaration) => write!(f, "{}", declaration),
            ForInit::Assignment(assignment) => write!(f, "{}", assignment),
        }
    }
}

impl Display for ForStmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "for: ({}; {}; {}): {}",
            self.init, self.condition, self.post, self.body
        )
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Stmt::Expression(stmt) => write!(f, "{};", stmt.expression),
            Stmt::VarDecl(stmt) => write!(f, "{};", stmt),
            Stmt::MultiAssign(stmt) => write!(f, "{}", stmt),
            Stmt::Return(stmt) => write!(f, "{}", stmt),
            Stmt::Function(stmt) => write!(f, "{}", stmt),
            Stmt::If(stmt) => write!(f, "{}", stmt),
            Stmt::For(stmt) => write!(f, "{}", stmt),
            Stmt::While(stmt) => write!(f, "while: ({}): {}", stmt.condition, stmt.body),
            Stmt::Continue => write!(f, "continue;"),
            Stmt::Break => write!(f, "break;"),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for stmt in &self.statements {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
