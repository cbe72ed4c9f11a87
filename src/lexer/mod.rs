//! Lexical analysis.
//!
//! Converts source text into the token stream the parser consumes:
//!
//! - Tokenization driven by a table of anchored regex patterns
//! - Recognition of keywords, type names, literals and operators
//! - Span tracking for error reporting
//! - Comments and whitespace skipping

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
