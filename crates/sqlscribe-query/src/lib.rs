//! Statement compiler and fluent query builders for sqlscribe.
//!
//! `sqlscribe-query` is the **query construction layer**. Builders
//! accumulate structured statement state through fluent calls; a
//! [`QueryCompiler`] renders that state into dialect-correct SQL text with
//! positional `?` placeholders, and each builder exposes the matching
//! ordered parameter list.
//!
//! # Role in the architecture
//!
//! - **Builders**: [`SelectQuery`], [`InsertQuery`], [`UpdateQuery`],
//!   [`DeleteQuery`] - fluent accumulators, one ordered parameter list each.
//! - **Token grammar**: WHERE/HAVING/ON clauses are streams of
//!   [`Token`]s (group markers, fragments, comparisons) rendered by one
//!   shared state machine.
//! - **Identifier handling**: the compiler resolves `AS` aliases, table
//!   prefixes, dotted qualification and embedded function calls, caching
//!   aliases per statement so nothing is prefixed twice.
//! - **Dialects**: quoting style and clause validation vary per
//!   [`Dialect`]; everything else is shared.
//!
//! Rendering is synchronous and purely computational. One compiler
//! instance serves one in-flight statement compilation; builders acquire a
//! fresh one per `sql_statement` call.
//!
//! ```
//! use sqlscribe_query::{Database, Dialect};
//!
//! let db = Database::new("app", Dialect::Ansi, "app_");
//! let query = db
//!     .select()
//!     .from(["users AS u"])
//!     .columns(["u.id", "u.name"])
//!     .filter_value("u.active", true)
//!     .limit(10);
//!
//! assert_eq!(
//!     query.sql_statement().unwrap(),
//!     "SELECT \"u\".\"id\", \"u\".\"name\"\nFROM \"app_users\" AS \"u\"\nWHERE \"u\".\"active\" = ?\nLIMIT 10"
//! );
//! assert_eq!(query.parameters().len(), 1);
//! ```

pub mod compiler;
pub mod database;
pub mod delete;
pub mod dialect;
pub mod fragment;
pub mod ident;
pub mod insert;
pub mod join;
pub mod select;
pub mod token;
pub mod update;

pub use compiler::{MAX_GROUP_DEPTH, OrderBy, OrderDirection, QueryCompiler, Union, UnionSource};
pub use database::{Database, DatabaseConfig};
pub use delete::DeleteQuery;
pub use dialect::Dialect;
pub use fragment::{Fragment, Ident};
pub use insert::InsertQuery;
pub use join::{Join, JoinKind};
pub use select::SelectQuery;
pub use token::{Comparison, ConditionGroup, Joiner, Operand, Token};
pub use update::UpdateQuery;
