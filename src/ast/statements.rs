use std::slice::Iter;

use crate::{environment::functions::FunctionSignature, types::types::TypeRef};

use super::{
    ast::{Expr, StatementExpr, Stmt},
    expressions::{AssignmentExpr, InfixExpr},
};

/// A `{ ... }` body. Always introduces its own scope.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn last(&self) -> Option<&Stmt> {
        self.body.last()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: StatementExpr,
}

/// `var x: T = e;` or `const x: T = e;`
///
/// A scalar `var` declared without a value holds its type's default
/// literal, so `value` is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclStmt {
    pub is_constant: bool,
    pub name: String,
    pub ty: TypeRef,
    pub value: Expr,
}

/// One entry on the left of a multi-assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum MultiTarget {
    /// A fresh `var`/`const` declaration.
    Declare {
        is_constant: bool,
        name: String,
        ty: TypeRef,
    },
    /// An existing variable.
    Assign { name: String, ty: TypeRef },
}

impl MultiTarget {
    pub fn name(&self) -> &str {
        match self {
            MultiTarget::Declare { name, .. } | MultiTarget::Assign { name, .. } => name,
        }
    }

    pub fn ty(&self) -> &TypeRef {
        match self {
            MultiTarget::Declare { ty, .. } | MultiTarget::Assign { ty, .. } => ty,
        }
    }
}

/// `a, var b: T = e1, e2;` or `a, b = f(x);`
#[derive(Debug, Clone, PartialEq)]
pub struct MultiAssignStmt {
    pub targets: Vec<MultiTarget>,
    pub values: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub values: Vec<Expr>,
}

/// Function Declaration
/// `body` is `None` for a forward declaration that was never completed.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub signature: FunctionSignature,
    pub body: Option<BlockStmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElseIfClause {
    pub condition: Expr,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub else_ifs: Vec<ElseIfClause>,
    pub alternate: Option<BlockStmt>,
}

/// Initializer of a `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration(VarDeclStmt),
    Assignment(AssignmentExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: ForInit,
    pub condition: InfixExpr,
    pub post: StatementExpr,
    pub body: BlockStmt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
}
