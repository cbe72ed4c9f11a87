//! Parser module for building the typed tree.
//!
//! This module contains the parser that transforms a stream of tokens
//! into a fully type checked `Program`. Parsing and checking happen in one
//! pass: every node is checked as soon as it is built. It uses a Pratt
//! parser for expressions with proper operator precedence and handles:
//!
//! - Statement parsing (declarations, functions, control flow)
//! - Expression parsing (operators, calls, indexing, literals)
//! - Type parsing for type annotations
//! - The typing rules for operators and assignments
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.

pub mod checks;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
