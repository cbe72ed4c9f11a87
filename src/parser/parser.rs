//! The `Parser` cursor and the `parse` entry point.
//!
//! Handlers for statements, expressions and types are looked up by token
//! kind in tables filled by `create_token_lookups` and
//! `create_token_type_lookups`. Every node is type checked as soon as it is
//! built, so the parser also carries the scoped environment and the type
//! interner through the whole pass.

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::Program,
    environment::{environment::Environment, functions::FunctionSignature},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    types::interner::TypeInterner,
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        PostfixHandler, PostfixLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
    types::{
        create_token_type_lookups, TypeBPLookup, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler,
        TypeNUDLookup,
    },
};

/// Options that change what the parser accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Accept statements outside of functions and skip the
    /// return-at-end check. Used by tests and the REPL-style driver.
    pub testing: bool,
}

/// Where the parser currently is, structurally.
///
/// Saved before entering a function or loop body and restored after it.
#[derive(Debug, Clone, Default)]
pub struct ParserState {
    pub in_function: bool,
    pub in_loop: bool,
    pub testing: bool,
    /// Signature of the enclosing function, checked by `return`.
    pub function: Option<FunctionSignature>,
}

/// Cursor over a token stream plus everything the checks need.
pub struct Parser {
    /// Always ends in EOF
    tokens: Vec<Token>,
    pos: usize,
    stmt_lookup: StmtLookup,
    nud_lookup: NUDLookup,
    led_lookup: LEDLookup,
    postfix_lookup: PostfixLookup,
    binding_power_lookup: BPLookup,
    type_nud_lookup: TypeNUDLookup,
    type_led_lookup: TypeLEDLookup,
    type_binding_power_lookup: TypeBPLookup,
    /// Variables and functions visible at the current point
    pub env: Environment,
    pub interner: TypeInterner,
    state: ParserState,
}

impl Parser {
    /// Builds a parser with empty lookup tables. A trailing EOF token is
    /// appended when `tokens` lacks one; `file` names it.
    pub fn new(mut tokens: Vec<Token>, file: Rc<String>, config: ParserConfig) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens
                .last()
                .map(|token| token.span.end.clone())
                .unwrap_or_else(|| Position(0, Rc::clone(&file)));

            tokens.push(Token {
                kind: TokenKind::EOF,
                value: String::from("EOF"),
                span: Span {
                    start: end.clone(),
                    end,
                },
            });
        }

        Parser {
            tokens,
            pos: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            postfix_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
            env: Environment::new(),
            interner: TypeInterner::new(),
            state: ParserState {
                testing: config.testing,
                ..ParserState::default()
            },
        }
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the token after the current one, or EOF at the end.
    pub fn peek_token(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + 1).min(last)]
    }

    /// Moves the cursor forward and hands back the token it was on.
    /// Stays put on the trailing EOF.
    pub fn advance(&mut self) -> &Token {
        let previous = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[previous]
    }

    /// Consumes the current token if it is `expected_kind`. Otherwise fails
    /// with `error`, or with `UnexpectedToken` when none is given.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            return Err(error.unwrap_or_else(|| {
                Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.value.clone(),
                        expected: expected_kind.to_string(),
                    },
                    token.position(),
                )
            }));
        }

        Ok(self.advance().clone())
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Builds an "unexpected token" error for the current token with a
    /// description of what was wanted instead.
    pub fn unexpected(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_postfix_lookup(&self) -> &PostfixLookup {
        &self.postfix_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    pub fn get_type_bp_lookup(&self) -> &TypeBPLookup {
        &self.type_binding_power_lookup
    }

    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    pub fn get_type_led_lookup(&self) -> &TypeLEDLookup {
        &self.type_led_lookup
    }

    /// Registers an infix handler and the power it binds with.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Postfix operators always bind at [`BindingPower::Postfix`].
    pub fn postfix(&mut self, kind: TokenKind, postfix_fn: PostfixHandler) {
        self.binding_power_lookup.insert(kind, BindingPower::Postfix);
        self.postfix_lookup.insert(kind, postfix_fn);
    }

    /// Leaves the binding power table alone, so `-`, `[` and `(` keep the
    /// power of their infix role.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    pub fn type_led(
        &mut self,
        kind: TokenKind,
        binding_power: BindingPower,
        led_fn: TypeLEDHandler,
    ) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }

    pub fn get_position(&self) -> Position {
        self.current_token().position()
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Enters a function body. Returns the state to restore afterwards.
    pub fn enter_function(&mut self, signature: FunctionSignature) -> ParserState {
        let saved = self.state.clone();
        self.state.in_function = true;
        self.state.in_loop = false;
        self.state.function = Some(signature);
        saved
    }

    /// Enters a loop body. Returns the state to restore afterwards.
    pub fn enter_loop(&mut self) -> ParserState {
        let saved = self.state.clone();
        self.state.in_loop = true;
        saved
    }

    pub fn restore_state(&mut self, saved: ParserState) {
        self.state = saved;
    }

    /// Clears the type cache so the parser can be reused for an
    /// unrelated compilation.
    pub fn reset(&mut self) {
        self.interner.reset();
    }
}

/// Parses and checks a whole token stream.
///
/// Stops at the first error. The parser is handed back either way so
/// callers can inspect its environment or reuse its interner.
pub fn parse(
    tokens: Vec<Token>,
    file: Rc<String>,
    config: ParserConfig,
) -> (Parser, Result<Program, Error>) {
    let mut parser = Parser::new(tokens, file, config);
    create_token_lookups(&mut parser);
    create_token_type_lookups(&mut parser);

    parser.env.enter_scope();

    let mut program = Program::default();

    while parser.has_tokens() {
        match parse_stmt(&mut parser) {
            Ok(stmt) => program.statements.push(stmt),
            Err(error) => return (parser, Err(error)),
        }
    }

    parser.env.exit_scope();

    (parser, Ok(program))
}
