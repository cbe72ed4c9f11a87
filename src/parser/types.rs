//! Type annotation parsing.
//!
//! Annotations are built straight into interned types:
//!
//! - `int`, `float`, `bool`, `string`, `char`
//! - `T[]` for an array of `T`
//! - `K[V]` for a hashmap from `K` to `V`
//!
//! Suffixes chain left to right, so `int[][]` is an array of `int[]` and
//! `string[int[]]` maps strings to integer arrays. Similar to expression
//! parsing, it uses NUD/LED handlers with binding powers.

use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    types::types::{TypeCell, TypeRef},
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeRef, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, TypeRef, BindingPower) -> Result<TypeRef, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Type, parse_base_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Index, parse_container_type);
}

pub fn parse_base_type(parser: &mut Parser) -> Result<TypeRef, Error> {
    let token = parser.expect(TokenKind::Type)?;
    Ok(parser.interner.base(&token.value))
}

/// `T[]` or `K[V]`, with `left` already parsed as `T` or `K`.
pub fn parse_container_type(
    parser: &mut Parser,
    left: TypeRef,
    _bp: BindingPower,
) -> Result<TypeRef, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    if parser.current_token_kind() == TokenKind::CloseBracket {
        parser.advance();
        return Ok(parser.interner.array(TypeCell::Resolved(left)));
    }

    let value = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(parser
        .interner
        .hashmap(TypeCell::Resolved(left), TypeCell::Resolved(value)))
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeRef, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
                expected: String::from("a type"),
            },
            parser.get_position(),
        ));
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .copied()
            .unwrap_or(BindingPower::Default);

        if token_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_type_led_lookup().get(&token_kind).copied() else {
            break;
        };

        left = led_fn(parser, left, token_bp)?;
    }

    Ok(left)
}
