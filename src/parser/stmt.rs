use std::rc::Rc;

use crate::{
    ast::{
        ast::{Expr, StatementExpr, Stmt, Typed},
        expressions::{BoolExpr, CharExpr, FloatExpr, IntegerExpr, StringExpr},
        statements::{
            BlockStmt, ElseIfClause, ExpressionStmt, FnDeclStmt, ForInit, ForStmt, IfStmt,
            MultiAssignStmt, MultiTarget, ReturnStmt, VarDeclStmt, WhileStmt,
        },
    },
    environment::{
        environment::SymbolKind,
        functions::{FunctionRecord, FunctionSignature, Parameter},
    },
    errors::errors::{Error, ErrorAt, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    types::types::{Type, TypeRef, BOOL, CHAR, FLOAT, INT, STRING},
    Position,
};

use super::{checks::single_type, expr::resolve_identifier, parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();

    if !parser.state().in_function && !parser.state().testing && kind != TokenKind::Fun {
        return Err(Error::new(
            ErrorImpl::OutsideFunction {
                statement: String::from(describe_statement(kind)),
            },
            parser.get_position(),
        ));
    }

    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&kind).copied() {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

fn describe_statement(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Var | TokenKind::Const => "a variable declaration",
        TokenKind::Return => "`return`",
        TokenKind::If => "an `if` statement",
        TokenKind::For => "a `for` loop",
        TokenKind::While => "a `while` loop",
        TokenKind::Continue => "`continue`",
        TokenKind::Break => "`break`",
        _ => "an expression statement",
    }
}

/// `{ stmt* }` without opening a scope; callers decide what the scope covers.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut body = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.unexpected("expected `}` to close the block"));
        }
        body.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStmt { body })
}

/// A block with its own scope.
fn parse_scoped_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    parser.env.enter_scope();
    let block = parse_block(parser)?;
    parser.env.exit_scope();

    Ok(block)
}

/// `: (` ... `)` `:` around a condition, as in `if: (c): { }`.
fn parse_condition(parser: &mut Parser, statement: &str) -> Result<Expr, Error> {
    parser.expect(TokenKind::Colon)?;
    parser.expect(TokenKind::OpenParen)?;

    let position = parser.get_position();
    let condition = parse_expr(parser, BindingPower::Default)?;

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Colon)?;

    let context = format!("`{}` condition", statement);
    let ty = single_type(&condition, &context).at(&position)?;
    if !ty.is_base(BOOL) {
        return Err(Error::new(
            ErrorImpl::TypeMatchError {
                context,
                expected: String::from(BOOL),
                received: ty.to_string(),
            },
            position,
        ));
    }

    Ok(condition)
}

// DECLARATIONS

/// `var name: T` or `const name: T`, up to but not including `=`.
struct Declaration {
    is_constant: bool,
    name: String,
    ty: TypeRef,
    position: Position,
}

impl Declaration {
    fn kind(&self) -> SymbolKind {
        if self.is_constant {
            SymbolKind::Constant
        } else {
            SymbolKind::Variable
        }
    }

    fn define(&self, parser: &mut Parser) -> Result<(), Error> {
        parser.env.define_variable(
            &self.name,
            Rc::clone(&self.ty),
            self.kind(),
            self.position.clone(),
        )
    }
}

fn parse_declaration(parser: &mut Parser) -> Result<Declaration, Error> {
    let is_constant = parser.advance().kind == TokenKind::Const;

    let position = parser.get_position();
    let error = parser.unexpected("expected identifier during variable declaration");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let error = parser.unexpected("expected `:` and a type after the variable name");
    parser.expect_error(TokenKind::Colon, Some(error))?;
    let ty = parse_type(parser, BindingPower::Default)?;

    Ok(Declaration {
        is_constant,
        name,
        ty,
        position,
    })
}

/// The literal an uninitialized scalar `var` starts with.
fn default_value(ty: &TypeRef) -> Option<Expr> {
    let Type::Base(name) = ty.as_ref() else {
        return None;
    };

    let ty = Rc::clone(ty);
    match name.as_str() {
        INT => Some(Expr::Integer(IntegerExpr { value: 0, ty })),
        FLOAT => Some(Expr::Float(FloatExpr { value: 0.0, ty })),
        BOOL => Some(Expr::Bool(BoolExpr { value: false, ty })),
        STRING => Some(Expr::String(StringExpr {
            value: String::new(),
            ty,
        })),
        CHAR => Some(Expr::Char(CharExpr {
            value: String::new(),
            ty,
        })),
        _ => None,
    }
}

/// The rest of a single declaration after its signature, through `;`.
fn finish_var_decl(parser: &mut Parser, declaration: Declaration) -> Result<VarDeclStmt, Error> {
    let value = if parser.current_token_kind() == TokenKind::Semicolon {
        let default = (!declaration.is_constant)
            .then(|| default_value(&declaration.ty))
            .flatten();

        let Some(default) = default else {
            let keyword = if declaration.is_constant { "const" } else { "var" };
            return Err(Error::new(
                ErrorImpl::MissingInitializer {
                    name: declaration.name.clone(),
                    suggestion: format!(
                        "{} {}: {} = <value>;",
                        keyword, declaration.name, declaration.ty
                    ),
                },
                declaration.position,
            ));
        };

        default
    } else {
        parser.expect(TokenKind::Assignment)?;

        let position = parser.get_position();
        let mut value = parse_expr(parser, BindingPower::Default)?;
        let context = format!("value of `{}`", declaration.name);
        let value_ty = single_type(&value, &context).at(&position)?;

        let Some(unified) = parser.interner.unify(&declaration.ty, &value_ty) else {
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    context: format!("declaration of `{}`", declaration.name),
                    expected: declaration.ty.to_string(),
                    received: value_ty.to_string(),
                },
                position,
            ));
        };
        value.settle_type(&unified);

        value
    };

    parser.expect(TokenKind::Semicolon)?;
    declaration.define(parser)?;

    Ok(VarDeclStmt {
        is_constant: declaration.is_constant,
        name: declaration.name,
        ty: declaration.ty,
        value,
    })
}

pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let declaration = parse_declaration(parser)?;

    if parser.current_token_kind() == TokenKind::Comma {
        return parse_multi_assign_stmt(parser, Target::Declare(declaration));
    }

    finish_var_decl(parser, declaration).map(Stmt::VarDecl)
}

// MULTI-ASSIGNMENT

enum Target {
    Declare(Declaration),
    Assign {
        name: String,
        ty: TypeRef,
        position: Position,
    },
}

impl Target {
    fn ty(&self) -> &TypeRef {
        match self {
            Target::Declare(declaration) => &declaration.ty,
            Target::Assign { ty, .. } => ty,
        }
    }

    fn name(&self) -> &str {
        match self {
            Target::Declare(declaration) => &declaration.name,
            Target::Assign { name, .. } => name,
        }
    }
}

/// An existing, mutable variable on the left of a multi-assignment.
fn parse_assign_target(parser: &mut Parser) -> Result<Target, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    let position = token.position();
    let identifier = resolve_identifier(parser, &token.value, &position)?;

    if parser
        .env
        .resolve_variable(&identifier.name)
        .is_some_and(|symbol| symbol.is_constant())
    {
        return Err(Error::new(
            ErrorImpl::ConstantReassigned {
                variable: identifier.name,
            },
            position,
        ));
    }

    Ok(Target::Assign {
        name: identifier.name,
        ty: identifier.ty,
        position,
    })
}

fn check_target(
    parser: &mut Parser,
    target: &Target,
    value_ty: &TypeRef,
    position: &Position,
) -> Result<TypeRef, Error> {
    parser.interner.unify(target.ty(), value_ty).ok_or_else(|| {
        Error::new(
            ErrorImpl::TypeMatchError {
                context: format!("multi-assignment to `{}`", target.name()),
                expected: target.ty().to_string(),
                received: value_ty.to_string(),
            },
            position.clone(),
        )
    })
}

/// `a, var b: T = e1, e2;` or `a, b = f(x);`, with the first target
/// already parsed and the current token on the first `,`.
fn parse_multi_assign_stmt(parser: &mut Parser, first: Target) -> Result<Stmt, Error> {
    let mut targets = vec![first];

    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();

        let target = match parser.current_token_kind() {
            TokenKind::Var | TokenKind::Const => Target::Declare(parse_declaration(parser)?),
            TokenKind::Identifier => parse_assign_target(parser)?,
            _ => {
                return Err(parser.unexpected(
                    "expected an identifier or a `var`/`const` declaration in multi-assignment",
                ))
            }
        };
        targets.push(target);
    }

    let assign_position = parser.expect(TokenKind::Assignment)?.position();

    let mut values = vec![];
    loop {
        let position = parser.get_position();
        values.push((parse_expr(parser, BindingPower::Default)?, position));

        if parser.current_token_kind() != TokenKind::Comma {
            break;
        }
        parser.advance();
    }

    parser.expect(TokenKind::Semicolon)?;

    if values.len() == targets.len() {
        for (target, (value, position)) in targets.iter().zip(values.iter_mut()) {
            let context = format!("value for `{}`", target.name());
            let value_ty = single_type(&*value, &context).at(position)?;
            let unified = check_target(parser, target, &value_ty, position)?;
            value.settle_type(&unified);
        }
    } else if values.len() == 1 {
        let (value, position) = &values[0];
        let Expr::Call(call) = value else {
            return Err(Error::new(ErrorImpl::MultiAssignExpectedCall, position.clone()));
        };

        if call.types.len() != targets.len() {
            return Err(Error::new(
                ErrorImpl::MultiAssignCountMismatch {
                    targets: targets.len(),
                    values: call.types.len(),
                },
                position.clone(),
            ));
        }

        for (target, value_ty) in targets.iter().zip(call.types.iter()) {
            check_target(parser, target, value_ty, position)?;
        }
    } else {
        return Err(Error::new(
            ErrorImpl::MultiAssignCountMismatch {
                targets: targets.len(),
                values: values.len(),
            },
            assign_position,
        ));
    }

    let mut multi_targets = vec![];
    for target in targets {
        match target {
            Target::Declare(declaration) => {
                declaration.define(parser)?;
                multi_targets.push(MultiTarget::Declare {
                    is_constant: declaration.is_constant,
                    name: declaration.name,
                    ty: declaration.ty,
                });
            }
            Target::Assign { name, ty, .. } => multi_targets.push(MultiTarget::Assign { name, ty }),
        }
    }

    Ok(Stmt::MultiAssign(MultiAssignStmt {
        targets: multi_targets,
        values: values.into_iter().map(|(value, _)| value).collect(),
    }))
}

// EXPRESSION STATEMENT

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.current_token_kind() == TokenKind::Identifier
        && parser.peek_token().kind == TokenKind::Comma
    {
        let first = parse_assign_target(parser)?;
        return parse_multi_assign_stmt(parser, first);
    }

    let position = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    let expression = StatementExpr::try_from(expr).map_err(|expr| {
        Error::new(
            ErrorImpl::InvalidExpressionStatement {
                expression: expr.to_string(),
            },
            position,
        )
    })?;

    parser.expect(TokenKind::Semicolon)?;

    Ok(Stmt::Expression(ExpressionStmt { expression }))
}

// RETURN

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position();

    let Some(function) = parser.state().function.clone() else {
        return Err(Error::new(
            ErrorImpl::OutsideFunction {
                statement: String::from("`return`"),
            },
            position,
        ));
    };

    let mut values = vec![];

    if parser.current_token_kind() != TokenKind::Semicolon {
        let error = parser.unexpected("expected `:` or `;` after `return`");
        parser.expect_error(TokenKind::Colon, Some(error))?;

        if parser.current_token_kind() == TokenKind::OpenParen {
            parser.advance();
            loop {
                let value_position = parser.get_position();
                values.push((parse_expr(parser, BindingPower::Default)?, value_position));

                if parser.current_token_kind() != TokenKind::Comma {
                    break;
                }
                parser.advance();
            }
            parser.expect(TokenKind::CloseParen)?;
        } else {
            let value_position = parser.get_position();
            values.push((parse_expr(parser, BindingPower::Default)?, value_position));

            if parser.current_token_kind() == TokenKind::Comma {
                return Err(parser.unexpected(
                    "to return multiple values, use `return: (val1, val2, ...);`",
                ));
            }
        }
    }

    parser.expect(TokenKind::Semicolon)?;

    let expected = &function.return_types;
    if values.len() != expected.len() {
        return Err(Error::new(
            ErrorImpl::ReturnCountMismatch {
                function: function.name.clone(),
                expected: expected.len(),
                received: values.len(),
            },
            position,
        ));
    }

    for (expected_ty, (value, value_position)) in expected.iter().zip(values.iter_mut()) {
        let value_ty = single_type(&*value, "return value").at(value_position)?;
        let Some(unified) = parser.interner.unify(expected_ty, &value_ty) else {
            return Err(Error::new(
                ErrorImpl::TypeMatchError {
                    context: format!("return from `{}`", function.name),
                    expected: expected_ty.to_string(),
                    received: value_ty.to_string(),
                },
                value_position.clone(),
            ));
        };
        value.settle_type(&unified);
    }

    Ok(Stmt::Return(ReturnStmt {
        values: values.into_iter().map(|(value, _)| value).collect(),
    }))
}

// FUNCTIONS

fn parse_parameters(parser: &mut Parser) -> Result<Vec<Parameter>, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        if !parameters.is_empty() {
            parser.expect(TokenKind::Comma)?;
        }

        let name = parser.expect(TokenKind::Identifier)?.value;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser, BindingPower::Default)?;

        parameters.push(Parameter { name, ty });
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(parameters)
}

/// `: (T1, T2)`. At least one type when present.
fn parse_return_types(parser: &mut Parser) -> Result<Vec<TypeRef>, Error> {
    if parser.current_token_kind() != TokenKind::Colon {
        return Ok(vec![]);
    }

    parser.advance();
    parser.expect(TokenKind::OpenParen)?;

    let mut return_types = vec![parse_type(parser, BindingPower::Default)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        return_types.push(parse_type(parser, BindingPower::Default)?);
    }

    parser.expect(TokenKind::CloseParen)?;

    Ok(return_types)
}

/// Whether every path through `block` ends in a `return`.
fn ends_in_return(block: &BlockStmt) -> bool {
    match block.last() {
        Some(Stmt::Return(_)) => true,
        Some(Stmt::If(stmt)) => {
            let Some(alternate) = &stmt.alternate else {
                return false;
            };

            ends_in_return(&stmt.body)
                && stmt.else_ifs.iter().all(|clause| ends_in_return(&clause.body))
                && ends_in_return(alternate)
        }
        _ => false,
    }
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance().position();

    if parser.state().in_function {
        return Err(Error::new(ErrorImpl::FunctionInsideFunction, position));
    }

    parser.expect(TokenKind::Colon)?;
    let error = parser.unexpected("expected a function name after `fun:`");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    let signature = FunctionSignature {
        name,
        parameters: parse_parameters(parser)?,
        return_types: parse_return_types(parser)?,
    };

    // Forward declaration
    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
        parser
            .env
            .define_function(FunctionRecord::declared(signature.clone()), position)?;

        return Ok(Stmt::Function(FnDeclStmt {
            signature,
            body: None,
        }));
    }

    parser
        .env
        .define_function(FunctionRecord::defined(signature.clone()), position.clone())?;

    let saved = parser.enter_function(signature.clone());
    parser.env.enter_scope();

    for parameter in &signature.parameters {
        parser
            .env
            .bind_parameter(&parameter.name, Rc::clone(&parameter.ty), position.clone())?;
    }

    let body = parse_block(parser)?;

    parser.env.exit_scope();
    parser.restore_state(saved);

    if !parser.state().testing && !signature.return_types.is_empty() && !ends_in_return(&body) {
        return Err(Error::new(
            ErrorImpl::MissingReturn {
                function: signature.name,
            },
            position,
        ));
    }

    Ok(Stmt::Function(FnDeclStmt {
        signature,
        body: Some(body),
    }))
}

// CONTROL FLOW

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::If)?;

    let condition = parse_condition(parser, "if")?;
    let body = parse_scoped_block(parser)?;

    let mut else_ifs = vec![];
    while parser.current_token_kind() == TokenKind::ElseIf {
        parser.advance();
        let condition = parse_condition(parser, "else if")?;
        let body = parse_scoped_block(parser)?;
        else_ifs.push(ElseIfClause { condition, body });
    }

    let mut alternate = None;
    if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        parser.expect(TokenKind::Colon)?;
        alternate = Some(parse_scoped_block(parser)?);
    }

    Ok(Stmt::If(IfStmt {
        condition,
        body,
        else_ifs,
        alternate,
    }))
}

fn invalid_for(message: &str, position: Position) -> Error {
    Error::new(
        ErrorImpl::InvalidForLoop {
            message: String::from(message),
        },
        position,
    )
}

fn parse_for_init(parser: &mut Parser) -> Result<ForInit, Error> {
    let position = parser.get_position();

    match parser.current_token_kind() {
        TokenKind::Var => {
            let declaration = parse_declaration(parser)?;
            if !declaration.ty.is_base(INT) {
                return Err(invalid_for("the loop variable must be an `int`", position));
            }
            finish_var_decl(parser, declaration).map(ForInit::Declaration)
        }
        TokenKind::Const => Err(invalid_for(
            "the loop variable can't be a constant",
            position,
        )),
        TokenKind::Identifier => {
            let expr = parse_expr(parser, BindingPower::Default)?;
            let Expr::Assignment(assignment) = expr else {
                return Err(invalid_for(
                    "the initializer must be a declaration or an assignment",
                    position,
                ));
            };

            if assignment.operator != "=" {
                return Err(invalid_for(
                    "the initializer must be a plain `=` assignment",
                    position,
                ));
            }
            if !assignment.ty.is_base(INT) {
                return Err(invalid_for("the loop variable must be an `int`", position));
            }

            parser.expect(TokenKind::Semicolon)?;
            Ok(ForInit::Assignment(assignment))
        }
        _ => Err(invalid_for(
            "the initializer must be a declaration or an assignment",
            position,
        )),
    }
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::For)?;
    parser.expect(TokenKind::Colon)?;
    parser.expect(TokenKind::OpenParen)?;

    // One scope covers the header and the body
    parser.env.enter_scope();

    let init = parse_for_init(parser)?;

    let position = parser.get_position();
    let condition = match parse_expr(parser, BindingPower::Default)? {
        Expr::Infix(infix) if infix.ty.is_base(BOOL) => infix,
        _ => {
            return Err(invalid_for(
                "the condition must be a comparison producing a `bool`",
                position,
            ))
        }
    };
    parser.expect(TokenKind::Semicolon)?;

    let position = parser.get_position();
    let post = match StatementExpr::try_from(parse_expr(parser, BindingPower::Default)?) {
        Ok(post @ (StatementExpr::Postfix(_) | StatementExpr::Assignment(_)))
            if post.single_type().is_some_and(|ty| ty.is_base(INT)) =>
        {
            post
        }
        _ => {
            return Err(invalid_for(
                "the update must be an `int` postfix or assignment expression",
                position,
            ))
        }
    };

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Colon)?;

    let saved = parser.enter_loop();
    let body = parse_block(parser)?;
    parser.restore_state(saved);

    parser.env.exit_scope();

    Ok(Stmt::For(ForStmt {
        init,
        condition,
        post,
        body,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    parser.expect(TokenKind::While)?;

    let condition = parse_condition(parser, "while")?;

    let saved = parser.enter_loop();
    let body = parse_scoped_block(parser)?;
    parser.restore_state(saved);

    Ok(Stmt::While(WhileStmt { condition, body }))
}

/// `continue;` and `break;`
pub fn parse_loop_control_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance().clone();
    let position = token.position();

    if !parser.state().in_loop {
        return Err(Error::new(
            ErrorImpl::OutsideLoop {
                statement: token.value,
            },
            position,
        ));
    }

    parser.expect(TokenKind::Semicolon)?;

    Ok(match token.kind {
        TokenKind::Continue => Stmt::Continue,
        _ => Stmt::Break,
    })
}
