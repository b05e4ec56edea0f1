//! SQL identifier quoting primitives.
//!
//! These are the only dialect-specific building blocks of the compiler:
//! pure functions wrapping a single bare name in the dialect's quoting
//! characters. They know nothing about prefixes, aliases or expressions;
//! that logic lives in the query compiler one layer up.

/// Quote a SQL identifier using ANSI double-quoting.
///
/// Embedded double-quotes are escaped by doubling them (`"` becomes `""`),
/// which makes the result safe for any input string.
///
/// # Examples
///
/// ```
/// use sqlscribe_core::quote_ident;
///
/// assert_eq!(quote_ident("users"), "\"users\"");
/// assert_eq!(quote_ident("user\"name"), "\"user\"\"name\"");
/// ```
#[inline]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote a SQL identifier using MySQL backtick quoting.
///
/// Embedded backticks are escaped by doubling them.
///
/// # Examples
///
/// ```
/// use sqlscribe_core::quote_ident_mysql;
///
/// assert_eq!(quote_ident_mysql("users"), "`users`");
/// assert_eq!(quote_ident_mysql("user`name"), "`user``name`");
/// ```
#[inline]
pub fn quote_ident_mysql(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
