//! Error types and error handling for the front end.
//!
//! Every stage reports failures through a single [`errors::Error`] value
//! that carries:
//!
//! - the specific failure (`ErrorImpl`), formatted through `thiserror`
//! - the source position the failure was detected at
//! - a broad `ErrorKind` (lexical, syntax, scope, type, structural)
//! - an optional tip shown by the error reporter
//!
//! Parsing is fail-fast: the first error aborts the whole run.

pub mod errors;
