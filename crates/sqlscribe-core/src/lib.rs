//! Core types for sqlscribe.
//!
//! This crate holds the pieces every statement compiler and builder depends
//! on, with no SQL-generation logic of its own:
//!
//! - [`Value`] - dynamically-typed SQL scalar used for parameter binding
//! - [`Parameter`] - a bind value as registered by a builder, possibly an
//!   array that expands to an `IN (...)` placeholder list
//! - [`Error`] / [`Result`] - the compile-time error taxonomy
//! - identifier quoting primitives ([`quote_ident`], [`quote_ident_mysql`])

pub mod error;
pub mod identifiers;
pub mod parameter;
pub mod value;

pub use error::{Error, Result};
pub use identifiers::{quote_ident, quote_ident_mysql};
pub use parameter::Parameter;
pub use value::Value;
