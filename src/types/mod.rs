//! Structural type model.
//!
//! Types come in three shapes:
//!
//! - `Base(name)` for the primitives `int`, `float`, `bool`, `string`, `char`
//! - `Array(elem)` written `elem[]`
//! - `HashMap(key, value)` written `key[value]`
//!
//! Container children are `TypeCell`s so the element type of an empty
//! literal can stay unknown until it is compared against a concrete type.
//! The `TypeInterner` canonicalizes types so structurally identical types
//! share one allocation.

pub mod interner;
pub mod types;

#[cfg(test)]
mod tests;
