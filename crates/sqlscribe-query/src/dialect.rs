//! Target dialect selection.

use serde::{Deserialize, Serialize};
use sqlscribe_core::{quote_ident, quote_ident_mysql};
use std::fmt;
use std::str::FromStr;

/// SQL dialect a compiler targets.
///
/// Quoting characters and the OFFSET/LIMIT coupling rule are the only
/// dialect-varying pieces of statement rendering; placeholders are
/// positional `?` everywhere (numbering them is the driver's concern).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Plain ANSI quoting, permissive clause rules.
    #[default]
    Ansi,
    /// PostgreSQL
    Postgres,
    /// MySQL (backtick quoting)
    MySql,
    /// SQLite
    Sqlite,
}

impl Dialect {
    /// Quote a single bare identifier for this dialect.
    pub fn quote_identifier(self, name: &str) -> String {
        match self {
            Dialect::MySql => quote_ident_mysql(name),
            _ => quote_ident(name),
        }
    }

    /// Whether `OFFSET n` may be rendered with no accompanying `LIMIT`.
    pub const fn supports_offset_without_limit(self) -> bool {
        matches!(self, Dialect::Ansi | Dialect::Postgres)
    }

    /// Lowercase dialect name.
    pub const fn name(self) -> &'static str {
        match self {
            Dialect::Ansi => "ansi",
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = sqlscribe_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ansi" => Ok(Dialect::Ansi),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            other => Err(sqlscribe_core::Error::Custom(format!(
                "unknown dialect '{other}'"
            ))),
        }
    }
}
