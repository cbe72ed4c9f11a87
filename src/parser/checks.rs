//! Typing rules for operators, indexing and assignment.
//!
//! These functions know nothing about tokens or positions. They return the
//! bare [`ErrorImpl`] and the parser attaches the position with
//! [`ErrorAt::at`](crate::errors::errors::ErrorAt).

use std::rc::Rc;

use crate::{
    ast::ast::Typed,
    errors::errors::ErrorImpl,
    types::{
        interner::TypeInterner,
        types::{Type, TypeRef, BOOL, CHAR, FLOAT, INT, STRING},
    },
};

const ARITHMETIC: [&str; 4] = ["+", "-", "*", "/"];
const COMPARISON: [&str; 6] = ["<", ">", "<=", ">=", "==", "!="];
const EQUALITY: [&str; 2] = ["==", "!="];

/// The type of a single-valued expression.
pub fn single_type(expr: &impl Typed, context: &str) -> Result<TypeRef, ErrorImpl> {
    expr.single_type()
        .map(Rc::clone)
        .ok_or_else(|| ErrorImpl::SingleValueExpected {
            context: String::from(context),
            received: expr.types().len(),
        })
}

fn base_infix(operator: &str, left: &str, right: &str) -> Option<&'static str> {
    match (left, right) {
        (INT, INT) => match operator {
            "+" | "-" | "*" | "/" | "%" | "&" | "|" => Some(INT),
            op if COMPARISON.contains(&op) => Some(BOOL),
            _ => None,
        },
        (INT | FLOAT, INT | FLOAT) => match operator {
            op if ARITHMETIC.contains(&op) => Some(FLOAT),
            op if COMPARISON.contains(&op) => Some(BOOL),
            _ => None,
        },
        (STRING, STRING) | (CHAR, CHAR) => match operator {
            "+" => Some(STRING),
            op if EQUALITY.contains(&op) => Some(BOOL),
            _ => None,
        },
        (BOOL, BOOL) => match operator {
            "==" | "!=" | "&&" | "||" => Some(BOOL),
            _ => None,
        },
        _ => None,
    }
}

/// Result type of `left operator right`.
pub fn infix_type(
    interner: &mut TypeInterner,
    operator: &str,
    left: &TypeRef,
    right: &TypeRef,
) -> Result<TypeRef, ErrorImpl> {
    let invalid = || ErrorImpl::InvalidInfixOperation {
        operator: String::from(operator),
        left: left.to_string(),
        right: right.to_string(),
    };

    match (left.as_ref(), right.as_ref()) {
        (Type::Array(_), Type::Array(_)) => {
            let unified = interner.unify(left, right).ok_or_else(invalid)?;
            match operator {
                "+" => Ok(unified),
                op if EQUALITY.contains(&op) => Ok(interner.bool()),
                _ => Err(invalid()),
            }
        }
        (Type::Base(l), Type::Base(r)) => base_infix(operator, l, r)
            .map(|name| interner.base(name))
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

/// Result type of `!operand` or `-operand`.
pub fn prefix_type(operator: &str, operand: &TypeRef) -> Result<TypeRef, ErrorImpl> {
    let valid = match operator {
        "!" => operand.is_base(BOOL),
        "-" => operand.is_numeric(),
        _ => false,
    };

    if !valid {
        return Err(ErrorImpl::InvalidPrefixOperation {
            operator: String::from(operator),
            operand: operand.to_string(),
        });
    }

    Ok(Rc::clone(operand))
}

pub fn postfix_type(operator: &str, operand: &TypeRef) -> Result<TypeRef, ErrorImpl> {
    if !operand.is_numeric() {
        return Err(ErrorImpl::InvalidPostfixOperation {
            operator: String::from(operator),
            operand: operand.to_string(),
        });
    }

    Ok(Rc::clone(operand))
}

fn expect_int_index(context: &str, index: &TypeRef) -> Result<(), ErrorImpl> {
    if index.is_base(INT) {
        return Ok(());
    }

    Err(ErrorImpl::TypeMatchError {
        context: String::from(context),
        expected: String::from(INT),
        received: index.to_string(),
    })
}

/// Result type of `target[index]`, checked against the static type of
/// the target.
pub fn index_type(
    interner: &mut TypeInterner,
    target: &TypeRef,
    index: &TypeRef,
) -> Result<TypeRef, ErrorImpl> {
    match target.as_ref() {
        Type::Array(elem) => {
            let elem = elem.get().ok_or_else(|| ErrorImpl::EmptyContainerIndex {
                container: String::from("array"),
            })?;
            expect_int_index("array index", index)?;
            Ok(Rc::clone(elem))
        }
        Type::HashMap(key, value) => {
            let (Some(key), Some(value)) = (key.get(), value.get()) else {
                return Err(ErrorImpl::EmptyContainerIndex {
                    container: String::from("hashmap"),
                });
            };

            if !interner.equals(key, index) {
                return Err(ErrorImpl::TypeMatchError {
                    context: String::from("hashmap index"),
                    expected: key.to_string(),
                    received: index.to_string(),
                });
            }

            Ok(Rc::clone(value))
        }
        Type::Base(name) if name == STRING => {
            expect_int_index("string index", index)?;
            Ok(interner.char())
        }
        _ => Err(ErrorImpl::InvalidIndexTarget {
            target: target.to_string(),
        }),
    }
}

/// Type produced by `target = value` and its compound forms.
///
/// `+=` and friends are checked as the infix operation without `=`, whose
/// result must be the target type again.
pub fn assignment_type(
    interner: &mut TypeInterner,
    name: &str,
    operator: &str,
    target: &TypeRef,
    value: &TypeRef,
) -> Result<TypeRef, ErrorImpl> {
    let received = if operator == "=" {
        Rc::clone(value)
    } else {
        infix_type(interner, operator.trim_end_matches('='), target, value)?
    };

    interner
        .unify(target, &received)
        .ok_or_else(|| ErrorImpl::TypeMatchError {
            context: format!("assignment to `{}`", name),
            expected: target.to_string(),
            received: received.to_string(),
        })
}
