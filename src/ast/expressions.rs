use std::slice;

use crate::types::types::TypeRef;

use super::ast::{Expr, Typed};

// LITERALS

/// Integer Expression
/// Represents an `int` literal.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub value: i64,
    pub ty: TypeRef,
}

/// Float Expression
/// Represents a `float` literal.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatExpr {
    pub value: f64,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolExpr {
    pub value: bool,
    pub ty: TypeRef,
}

/// String Expression
/// The value is stored without its quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct StringExpr {
    pub value: String,
    pub ty: TypeRef,
}

/// Char Expression
/// Empty for the default char `''`.
#[derive(Debug, Clone, PartialEq)]
pub struct CharExpr {
    pub value: String,
    pub ty: TypeRef,
}

/// Array Expression
/// `ty` is `unknown[]` only for the empty literal.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpr {
    pub elements: Vec<Expr>,
    pub ty: TypeRef,
}

/// HashMap Expression
/// Pairs keep their source order.
#[derive(Debug, Clone, PartialEq)]
pub struct HashMapExpr {
    pub pairs: Vec<(Expr, Expr)>,
    pub ty: TypeRef,
}

// OTHER

/// Identifier Expression
/// A resolved reference to a variable or constant.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub operator: String,
    pub operand: Box<Expr>,
    pub ty: TypeRef,
}

/// Infix Expression
/// Binary operation such as `a + b` or `a < b`.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub left: Box<Expr>,
    pub operator: String,
    pub right: Box<Expr>,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostfixExpr {
    pub operand: Box<Expr>,
    pub operator: String,
    pub ty: TypeRef,
}

/// Assignment Expression
/// Covers `=` and the compound operators (`+=`, `-=`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: IdentifierExpr,
    pub operator: String,
    pub value: Box<Expr>,
    pub ty: TypeRef,
}

/// Call Expression
/// Carries the callee's full return list, which may be empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: String,
    pub arguments: Vec<Expr>,
    pub types: Vec<TypeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub target: Box<Expr>,
    pub index: Box<Expr>,
    pub ty: TypeRef,
}

macro_rules! impl_single_typed {
    ($($node:ty),* $(,)?) => {
        $(
            impl Typed for $node {
                fn types(&self) -> &[TypeRef] {
                    slice::from_ref(&self.ty)
                }
            }
        )*
    };
}

impl_single_typed!(
    IntegerExpr,
    FloatExpr,
    BoolExpr,
    StringExpr,
    CharExpr,
    ArrayExpr,
    HashMapExpr,
    IdentifierExpr,
    PrefixExpr,
    InfixExpr,
    PostfixExpr,
    AssignmentExpr,
    IndexExpr,
);

impl Typed for CallExpr {
    fn types(&self) -> &[TypeRef] {
        &self.types
    }
}
