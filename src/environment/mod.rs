//! Scoped symbol environment.
//!
//! Each scope keeps two independent tables, one for variables and constants
//! and one for functions. Lookups walk outward from the innermost scope and
//! writes always land in the innermost one. Built-in functions live in the
//! outermost scope.

pub mod builtins;
pub mod environment;
pub mod functions;

#[cfg(test)]
mod tests;
