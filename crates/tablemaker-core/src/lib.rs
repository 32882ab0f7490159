//! Core contracts and helpers for tablemaker.
//!
//! This crate defines the table/column value types produced by introspection,
//! the DDL renderer, table validation, and the shared error type.

pub mod clock;
pub mod error;
pub mod render;
pub mod schema;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{Error, Result};
pub use render::{SqlRenderer, TableRenderer, render};
pub use schema::{Column, IntrospectionResult, Table};
pub use validation::validate_tables;
