//! sqlscribe: dialect-aware SQL statement compilation.
//!
//! The facade crate re-exports the whole public surface:
//!
//! - `sqlscribe-core`: [`Value`], [`Parameter`], [`Error`], quoting
//!   primitives
//! - `sqlscribe-query`: the [`QueryCompiler`], the builders and the
//!   [`Database`] handle
//!
//! # Example
//!
//! ```
//! use sqlscribe::{Database, Dialect, Join};
//!
//! let db = Database::new("app", Dialect::Ansi, "app_");
//! let query = db
//!     .select()
//!     .from(["users AS u"])
//!     .columns(["u.id", "u.name"])
//!     .join(Join::left("teams AS t").on("t.id", "u.team_id"))
//!     .filter_value("u.active", true)
//!     .limit(25);
//!
//! let sql = query.sql_statement().unwrap();
//! let params = query.parameters();
//! assert!(sql.starts_with("SELECT"));
//! assert_eq!(params.len(), 1);
//! ```

pub use sqlscribe_core::{Error, Parameter, Result, Value, quote_ident, quote_ident_mysql};
pub use sqlscribe_query::{
    Comparison, ConditionGroup, Database, DatabaseConfig, DeleteQuery, Dialect, Fragment, Ident,
    InsertQuery, Join, JoinKind, Joiner, MAX_GROUP_DEPTH, Operand, OrderBy, OrderDirection,
    QueryCompiler, SelectQuery, Token, Union, UnionSource, UpdateQuery,
};
