//! Relation introspection sources.

pub mod adapter;
pub mod memory;
pub mod options;
pub mod postgres;

pub use adapter::TableSource;
pub use memory::MemoryTableSource;
pub use options::{ConnectOptions, IntrospectOptions};
pub use postgres::{PostgresTableSource, connect, list_tables};

pub use tablemaker_core::{IntrospectionResult, Table};
