use crate::types::types::{Type, TypeRef};

use super::{
    expressions::{
        ArrayExpr, AssignmentExpr, BoolExpr, CallExpr, CharExpr, FloatExpr, HashMapExpr,
        IdentifierExpr, IndexExpr, InfixExpr, IntegerExpr, PostfixExpr, PrefixExpr, StringExpr,
    },
    statements::{
        ExpressionStmt, FnDeclStmt, ForStmt, IfStmt, MultiAssignStmt, ReturnStmt, VarDeclStmt,
        WhileStmt,
    },
};

/// Anything in the tree whose type is fixed when it is built.
///
/// Calls report the callee's whole return list (zero or more types); every
/// other expression reports exactly one.
pub trait Typed {
    fn types(&self) -> &[TypeRef];

    /// The type of a single-valued expression.
    fn single_type(&self) -> Option<&TypeRef> {
        match self.types() {
            [ty] => Some(ty),
            _ => None,
        }
    }
}

/// Expression Types
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(IdentifierExpr),
    Integer(IntegerExpr),
    Float(FloatExpr),
    Bool(BoolExpr),
    String(StringExpr),
    Char(CharExpr),
    Array(ArrayExpr),
    HashMap(HashMapExpr),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    Postfix(PostfixExpr),
    Assignment(AssignmentExpr),
    Call(CallExpr),
    Index(IndexExpr),
}

impl Typed for Expr {
    fn types(&self) -> &[TypeRef] {
        match self {
            Expr::Identifier(expr) => expr.types(),
            Expr::Integer(expr) => expr.types(),
            Expr::Float(expr) => expr.types(),
            Expr::Bool(expr) => expr.types(),
            Expr::String(expr) => expr.types(),
            Expr::Char(expr) => expr.types(),
            Expr::Array(expr) => expr.types(),
            Expr::HashMap(expr) => expr.types(),
            Expr::Prefix(expr) => expr.types(),
            Expr::Infix(expr) => expr.types(),
            Expr::Postfix(expr) => expr.types(),
            Expr::Assignment(expr) => expr.types(),
            Expr::Call(expr) => expr.types(),
            Expr::Index(expr) => expr.types(),
        }
    }
}

impl Expr {
    /// Literals of a base type, the only expressions allowed as hashmap keys.
    pub fn is_base_literal(&self) -> bool {
        matches!(
            self,
            Expr::Integer(_) | Expr::Float(_) | Expr::Bool(_) | Expr::String(_) | Expr::Char(_)
        )
    }

    /// Gives a container expression the type it was unified with, so an
    /// empty `[]` checked against `int[]` is recorded as `int[]`.
    ///
    /// Nested literals receive the matching element or value type, and both
    /// operands of a container `+` receive the result type.
    pub fn settle_type(&mut self, ty: &TypeRef) {
        match self {
            Expr::Array(array) if !array.ty.is_fully_resolved() => {
                array.ty = TypeRef::clone(ty);
                if let Type::Array(element) = ty.as_ref() {
                    if let Some(element) = element.get() {
                        for item in array.elements.iter_mut() {
                            item.settle_type(element);
                        }
                    }
                }
            }
            Expr::HashMap(hashmap) if !hashmap.ty.is_fully_resolved() => {
                hashmap.ty = TypeRef::clone(ty);
                if let Type::HashMap(_, value) = ty.as_ref() {
                    if let Some(value) = value.get() {
                        for (_, item) in hashmap.pairs.iter_mut() {
                            item.settle_type(value);
                        }
                    }
                }
            }
            Expr::Infix(infix) if !infix.ty.is_fully_resolved() => {
                infix.ty = TypeRef::clone(ty);
                infix.left.settle_type(ty);
                infix.right.settle_type(ty);
            }
            _ => {}
        }
    }
}

/// The expressions that may stand alone as a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementExpr {
    Call(CallExpr),
    Postfix(PostfixExpr),
    Assignment(AssignmentExpr),
}

impl TryFrom<Expr> for StatementExpr {
    type Error = Expr;

    fn try_from(expr: Expr) -> Result<Self, Self::Error> {
        match expr {
            Expr::Call(call) => Ok(StatementExpr::Call(call)),
            Expr::Postfix(postfix) => Ok(StatementExpr::Postfix(postfix)),
            Expr::Assignment(assignment) => Ok(StatementExpr::Assignment(assignment)),
            other => Err(other),
        }
    }
}

impl From<StatementExpr> for Expr {
    fn from(expr: StatementExpr) -> Self {
        match expr {
            StatementExpr::Call(call) => Expr::Call(call),
            StatementExpr::Postfix(postfix) => Expr::Postfix(postfix),
            StatementExpr::Assignment(assignment) => Expr::Assignment(assignment),
        }
    }
}

impl Typed for StatementExpr {
    fn types(&self) -> &[TypeRef] {
        match self {
            StatementExpr::Call(expr) => expr.types(),
            StatementExpr::Postfix(expr) => expr.types(),
            StatementExpr::Assignment(expr) => expr.types(),
        }
    }
}

/// Statement Types
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    VarDecl(VarDeclStmt),
    MultiAssign(MultiAssignStmt),
    Return(ReturnStmt),
    Function(FnDeclStmt),
    If(IfStmt),
    For(ForStmt),
    While(WhileStmt),
    Continue,
    Break,
}

/// A fully checked program, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    fn functions<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a FnDeclStmt> + 'n
    where
        'a: 'n,
    {
        self.statements.iter().filter_map(move |stmt| match stmt {
            Stmt::Function(function) if function.signature.name == name => Some(function),
            _ => None,
        })
    }

    /// Finds a top-level function by name.
    ///
    /// A forward declaration stays where it was written and its definition
    /// follows later as its own statement, so the definition wins when both
    /// are present.
    pub fn function(&self, name: &str) -> Option<&FnDeclStmt> {
        self.functions(name)
            .find(|function| function.body.is_some())
            .or_else(|| self.functions(name).next())
    }
}
