//! Implementation of the `#[derive(Queryable)]` macro.
//!
//! Generates a field accessor table and field-name constants from
//! `#[query(...)]` field annotations.

mod attrs;
mod derive;

pub use derive::queryable_derive_impl;
