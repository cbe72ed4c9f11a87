use std::rc::Rc;

use crate::{
    ast::{
        ast::Expr,
        expressions::{
            ArrayExpr, AssignmentExpr, BoolExpr, CallExpr, CharExpr, FloatExpr, HashMapExpr,
            IdentifierExpr, IndexExpr, InfixExpr, IntegerExpr, PostfixExpr, PrefixExpr,
            StringExpr,
        },
    },
    errors::errors::{Error, ErrorAt, ErrorImpl},
    lexer::tokens::TokenKind,
    types::types::{TypeCell, TypeRef},
    Position,
};

use super::{
    checks::{assignment_type, index_type, infix_type, postfix_type, prefix_type, single_type},
    lookups::BindingPower,
    parser::Parser,
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::NoPrefixParser {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    };

    let mut left = nud_fn(parser)?;

    // While the current token binds tighter than `bp`, keep extending lhs,
    // preferring a postfix handler over an infix one
    loop {
        let token_kind = parser.current_token_kind();
        if token_kind == TokenKind::Semicolon {
            break;
        }

        let token_bp = parser
            .get_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);

        if token_bp <= bp {
            break;
        }

        if let Some(postfix_fn) = parser.get_postfix_lookup().get(&token_kind).copied() {
            left = postfix_fn(parser, left)?;
        } else if let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() {
            left = led_fn(parser, left, token_bp)?;
        } else {
            break;
        }
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();
    let number_error = || {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.position(),
        )
    };

    match token.kind {
        TokenKind::Integer => Ok(Expr::Integer(IntegerExpr {
            value: token.value.parse().map_err(|_| number_error())?,
            ty: parser.interner.int(),
        })),
        TokenKind::Float => Ok(Expr::Float(FloatExpr {
            value: token.value.parse().map_err(|_| number_error())?,
            ty: parser.interner.float(),
        })),
        TokenKind::Bool => Ok(Expr::Bool(BoolExpr {
            value: token.value == "true",
            ty: parser.interner.bool(),
        })),
        TokenKind::String => Ok(Expr::String(StringExpr {
            value: token.value.clone(),
            ty: parser.interner.string(),
        })),
        TokenKind::Char => Ok(Expr::Char(CharExpr {
            value: token.value.clone(),
            ty: parser.interner.char(),
        })),
        _ => Err(Error::new(
            ErrorImpl::NoPrefixParser {
                token: token.value.clone(),
            },
            token.position(),
        )),
    }
}

/// A variable reference, or a call when the name is followed by `(`.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    if parser.peek_token().kind == TokenKind::OpenParen {
        return parse_call_expr(parser);
    }

    let token = parser.advance().clone();
    resolve_identifier(parser, &token.value, &token.position()).map(Expr::Identifier)
}

pub fn resolve_identifier(
    parser: &Parser,
    name: &str,
    position: &Position,
) -> Result<IdentifierExpr, Error> {
    if let Some(symbol) = parser.env.resolve_variable(name) {
        return Ok(IdentifierExpr {
            name: symbol.name.clone(),
            ty: Rc::clone(&symbol.ty),
        });
    }

    let error = if parser.env.resolve_function(name).is_some() {
        ErrorImpl::IdentifierIsFunction {
            name: String::from(name),
        }
    } else {
        ErrorImpl::VariableNotDeclared {
            variable: String::from(name),
        }
    };

    Err(Error::new(error, position.clone()))
}

/// Seeds the element type from the first element and unifies every later
/// one with it.
fn unify_elements(
    parser: &mut Parser,
    literal: &str,
    seed: Option<TypeRef>,
    next: &TypeRef,
    position: &Position,
) -> Result<TypeRef, Error> {
    let Some(seed) = seed else {
        return Ok(Rc::clone(next));
    };

    parser.interner.unify(&seed, next).ok_or_else(|| {
        Error::new(
            ErrorImpl::ConflictingElementTypes {
                literal: String::from(literal),
                expected: seed.to_string(),
                received: next.to_string(),
            },
            position.clone(),
        )
    })
}

fn into_cell(ty: Option<TypeRef>) -> TypeCell {
    ty.map(TypeCell::Resolved).unwrap_or_default()
}

pub fn parse_array_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let mut elements = vec![];
    let mut elem_ty = None;

    while parser.current_token_kind() != TokenKind::CloseBracket {
        if !elements.is_empty() {
            parser.expect(TokenKind::Comma)?;
        }

        let position = parser.get_position();
        let element = parse_expr(parser, BindingPower::Default)?;
        let ty = single_type(&element, "array element").at(&position)?;
        elem_ty = Some(unify_elements(parser, "array", elem_ty, &ty, &position)?);
        elements.push(element);
    }

    parser.expect(TokenKind::CloseBracket)?;

    if let Some(ty) = &elem_ty {
        for element in elements.iter_mut() {
            element.settle_type(ty);
        }
    }

    Ok(Expr::Array(ArrayExpr {
        elements,
        ty: parser.interner.array(into_cell(elem_ty)),
    }))
}

pub fn parse_hashmap_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut pairs = vec![];
    let mut key_ty = None;
    let mut value_ty = None;

    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !pairs.is_empty() {
            parser.expect(TokenKind::Comma)?;
        }

        let key_position = parser.get_position();
        let key = parse_expr(parser, BindingPower::Default)?;
        if !key.is_base_literal() {
            return Err(Error::new(
                ErrorImpl::InvalidHashMapKey {
                    key: key.to_string(),
                },
                key_position,
            ));
        }

        parser.expect(TokenKind::Colon)?;

        let value_position = parser.get_position();
        let value = parse_expr(parser, BindingPower::Default)?;

        let ty = single_type(&key, "hashmap key").at(&key_position)?;
        key_ty = Some(unify_elements(parser, "hashmap", key_ty, &ty, &key_position)?);
        let ty = single_type(&value, "hashmap value").at(&value_position)?;
        value_ty = Some(unify_elements(parser, "hashmap", value_ty, &ty, &value_position)?);

        pairs.push((key, value));
    }

    parser.expect(TokenKind::CloseCurly)?;

    if let Some(ty) = &value_ty {
        for (_, value) in pairs.iter_mut() {
            value.settle_type(ty);
        }
    }

    Ok(Expr::HashMap(HashMapExpr {
        pairs,
        ty: parser.interner.hashmap(into_cell(key_ty), into_cell(value_ty)),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let position = operator_token.position();

    let operand = parse_expr(parser, BindingPower::Prefix)?;
    let operand_ty = single_type(&operand, "prefix operand").at(&position)?;
    let ty = prefix_type(&operator_token.value, &operand_ty).at(&position)?;

    Ok(Expr::Prefix(PrefixExpr {
        operator: operator_token.value,
        operand: Box::new(operand),
        ty,
    }))
}

pub fn parse_infix_expr(
    parser: &mut Parser,
    mut left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let position = operator_token.position();

    let mut right = parse_expr(parser, bp)?;

    let left_ty = single_type(&left, "left operand").at(&position)?;
    let right_ty = single_type(&right, "right operand").at(&position)?;
    let ty = infix_type(&mut parser.interner, &operator_token.value, &left_ty, &right_ty)
        .at(&position)?;

    if ty.is_container() {
        left.settle_type(&ty);
        right.settle_type(&ty);
    }

    Ok(Expr::Infix(InfixExpr {
        left: Box::new(left),
        operator: operator_token.value,
        right: Box::new(right),
        ty,
    }))
}

pub fn parse_postfix_expr(parser: &mut Parser, operand: Expr) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let position = operator_token.position();

    let operand_ty = single_type(&operand, "postfix operand").at(&position)?;
    let ty = postfix_type(&operator_token.value, &operand_ty).at(&position)?;

    Ok(Expr::Postfix(PostfixExpr {
        operand: Box::new(operand),
        operator: operator_token.value,
        ty,
    }))
}

pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let position = operator_token.position();

    let Expr::Identifier(target) = left else {
        return Err(Error::new(ErrorImpl::InvalidAssignmentTarget, position));
    };

    if parser
        .env
        .resolve_variable(&target.name)
        .is_some_and(|symbol| symbol.is_constant())
    {
        return Err(Error::new(
            ErrorImpl::ConstantReassigned {
                variable: target.name,
            },
            position,
        ));
    }

    // Right associative
    let value_position = parser.get_position();
    let mut value = parse_expr(parser, BindingPower::Default)?;
    let value_ty = single_type(&value, "assigned value").at(&value_position)?;

    let unified = assignment_type(
        &mut parser.interner,
        &target.name,
        &operator_token.value,
        &target.ty,
        &value_ty,
    )
    .at(&position)?;
    value.settle_type(&unified);

    Ok(Expr::Assignment(AssignmentExpr {
        ty: Rc::clone(&target.ty),
        target,
        operator: operator_token.value,
        value: Box::new(value),
    }))
}

/// `(` after anything other than a bare function name.
pub fn parse_call_led(parser: &mut Parser, _left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    Err(Error::new(ErrorImpl::InvalidCallee, parser.get_position()))
}

fn parse_arguments(parser: &mut Parser) -> Result<Vec<(Expr, Position)>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut args = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        if !args.is_empty() {
            parser.expect(TokenKind::Comma)?;
        }

        let position = parser.get_position();
        args.push((parse_expr(parser, BindingPower::Default)?, position));
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(args)
}

/// `name(arg, ...)` where `name` must already be a registered function.
pub fn parse_call_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let callee_token = parser.expect(TokenKind::Identifier)?;
    let callee = callee_token.value.clone();
    let position = callee_token.position();

    let Some(record) = parser.env.resolve_function(&callee).cloned() else {
        return Err(Error::new(
            ErrorImpl::FunctionNotDeclared { function: callee },
            position,
        ));
    };

    let args = parse_arguments(parser)?;

    let mut arg_types = vec![];
    for (index, (arg, arg_position)) in args.iter().enumerate() {
        let context = format!("argument {} of `{}`", index + 1, callee);
        arg_types.push(single_type(arg, &context).at(arg_position)?);
    }

    let mut arguments: Vec<Expr> = args.into_iter().map(|(arg, _)| arg).collect();

    if let Some(builtin) = record.as_builtin() {
        let types = builtin.check(&arg_types, &mut parser.interner).at(&position)?;
        return Ok(Expr::Call(CallExpr {
            callee,
            arguments,
            types,
        }));
    }

    let parameters = &record.signature.parameters;
    if parameters.len() != arguments.len() {
        return Err(Error::new(
            ErrorImpl::UnexpectedArguments {
                function: callee,
                expected: parameters.len(),
                received: arguments.len(),
            },
            position,
        ));
    }

    for (index, (parameter, arg_ty)) in parameters.iter().zip(arg_types.iter()).enumerate() {
        let Some(unified) = parser.interner.unify(&parameter.ty, arg_ty) else {
            return Err(Error::new(
                ErrorImpl::ArgumentTypeMatchError {
                    function: callee,
                    position: index + 1,
                    expected: parameter.ty.to_string(),
                    received: arg_ty.to_string(),
                },
                position,
            ));
        };
        arguments[index].settle_type(&unified);
    }

    Ok(Expr::Call(CallExpr {
        callee,
        arguments,
        types: record.signature.return_types.clone(),
    }))
}

pub fn parse_index_expr(
    parser: &mut Parser,
    target: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let position = parser.expect(TokenKind::OpenBracket)?.position();

    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    let target_ty = single_type(&target, "indexed value").at(&position)?;
    let index_ty = single_type(&index, "index").at(&position)?;
    let ty = index_type(&mut parser.interner, &target_ty, &index_ty).at(&position)?;

    Ok(Expr::Index(IndexExpr {
        target: Box::new(target),
        index: Box::new(index),
        ty,
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}
