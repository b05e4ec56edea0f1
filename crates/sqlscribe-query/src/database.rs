//! Database handle and configuration.
//!
//! The handle is the in-process side of the driver contract: it knows the
//! target dialect and the active table prefix, hands out compilers and
//! seeds builders. Executing statements is a driver concern and lives
//! outside this workspace.

use crate::compiler::QueryCompiler;
use crate::delete::DeleteQuery;
use crate::dialect::Dialect;
use crate::insert::InsertQuery;
use crate::select::SelectQuery;
use crate::update::UpdateQuery;
use serde::{Deserialize, Serialize};

/// Configuration for a logical database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Logical database name.
    #[serde(default = "default_name")]
    pub name: String,
    /// Target SQL dialect.
    #[serde(default)]
    pub dialect: Dialect,
    /// Prefix applied to every bare table name, namespacing multiple
    /// logical databases inside one physical schema.
    #[serde(default)]
    pub table_prefix: String,
}

fn default_name() -> String {
    "default".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            name: default_name(),
            dialect: Dialect::default(),
            table_prefix: String::new(),
        }
    }
}

/// A logical database: dialect + table prefix + builder factory.
#[derive(Debug, Clone)]
pub struct Database {
    name: String,
    dialect: Dialect,
    table_prefix: String,
}

impl Database {
    /// Handle with explicit name, dialect and prefix.
    pub fn new(
        name: impl Into<String>,
        dialect: Dialect,
        table_prefix: impl Into<String>,
    ) -> Self {
        Database {
            name: name.into(),
            dialect,
            table_prefix: table_prefix.into(),
        }
    }

    /// Handle from a configuration value.
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Database::new(
            config.name.clone(),
            config.dialect,
            config.table_prefix.clone(),
        )
    }

    /// Logical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Target dialect.
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Active table prefix.
    pub fn table_prefix(&self) -> &str {
        &self.table_prefix
    }

    /// A fresh compiler for one statement compilation.
    pub fn compiler(&self) -> QueryCompiler {
        QueryCompiler::new(self.dialect, self.table_prefix.clone())
    }

    /// SELECT builder bound to this database's dialect and prefix.
    pub fn select(&self) -> SelectQuery {
        SelectQuery::seeded(self.dialect, self.table_prefix.clone())
    }

    /// INSERT builder for `table`.
    pub fn insert(&self, table: impl Into<String>) -> InsertQuery {
        InsertQuery::seeded(self.dialect, self.table_prefix.clone(), table.into())
    }

    /// UPDATE builder for `table`.
    pub fn update(&self, table: impl Into<String>) -> UpdateQuery {
        UpdateQuery::seeded(self.dialect, self.table_prefix.clone(), table.into())
    }

    /// DELETE builder for `table`.
    pub fn delete(&self, table: impl Into<String>) -> DeleteQuery {
        DeleteQuery::seeded(self.dialect, self.table_prefix.clone(), table.into())
    }
}
