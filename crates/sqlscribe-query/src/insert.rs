//! INSERT query builder.

use crate::compiler::QueryCompiler;
use crate::dialect::Dialect;
use crate::fragment::{self, Ident};
use sqlscribe_core::{Error, Parameter, Result, Value};

/// An INSERT query builder.
///
/// Every `values` call appends one rowset; rowsets become placeholder
/// tuples and their values the ordered parameter list, which makes batch
/// inserts a single statement.
#[derive(Debug, Clone)]
pub struct InsertQuery {
    dialect: Dialect,
    table_prefix: String,
    table: String,
    columns: Vec<Ident>,
    rowsets: Vec<Parameter>,
}

impl InsertQuery {
    /// New builder targeting `table` (without prefix).
    pub fn new(table: impl Into<String>) -> Self {
        Self::seeded(Dialect::default(), String::new(), table.into())
    }

    pub(crate) fn seeded(dialect: Dialect, table_prefix: String, table: String) -> Self {
        InsertQuery {
            dialect,
            table_prefix,
            table,
            columns: Vec::new(),
            rowsets: Vec::new(),
        }
    }

    /// Set the inserted columns; entries may be comma-separated lists.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.columns = fragment::idents_from(columns);
        self
    }

    /// Append one rowset of values, in column order.
    pub fn values<I, T>(mut self, row: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.rowsets.push(Parameter::array(row));
        self
    }

    /// Append one rowset from an already-built parameter (escape hatch for
    /// nested parameter structures).
    pub fn values_param(mut self, row: Parameter) -> Self {
        self.rowsets.push(row);
        self
    }

    /// Render through an injected compiler.
    pub fn compile(&self, compiler: &mut QueryCompiler) -> Result<String> {
        let width = self.columns.len();
        let mut tuples = Vec::with_capacity(self.rowsets.len());
        for rowset in &self.rowsets {
            let found = rowset.len();
            if width != 0 && found != width {
                return Err(Error::RowsetArity {
                    expected: width,
                    found,
                });
            }
            tuples.push(format!("({})", vec!["?"; found].join(", ")));
        }
        compiler.insert(&self.table, &self.columns, &tuples)
    }

    /// Render the SQL statement with a compiler derived from the owning
    /// database's dialect and table prefix.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn sql_statement(&self) -> Result<String> {
        let mut compiler = QueryCompiler::new(self.dialect, self.table_prefix.clone());
        let sql = self.compile(&mut compiler)?;
        tracing::trace!(sql = %sql, "rendered insert statement");
        Ok(sql)
    }

    /// The flattened parameters: every rowset in order.
    pub fn parameters(&self) -> Vec<Value> {
        let mut params = Vec::new();
        for rowset in &self.rowsets {
            rowset.flatten_into(&mut params);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_rowset() {
        let query = InsertQuery::new("users")
            .columns(["name", "email"])
            .values([Value::Text("ada".into()), Value::Text("ada@example.com".into())]);
        assert_eq!(
            query.sql_statement().unwrap(),
            "INSERT INTO \"users\" (\"name\", \"email\")\nVALUES (?, ?)"
        );
        assert_eq!(query.parameters().len(), 2);
    }

    #[test]
    fn batch_rowsets_share_one_statement() {
        let query = InsertQuery::new("users")
            .columns(["name, email"])
            .values([Value::Text("ada".into()), Value::Text("a@e.com".into())])
            .values([Value::Text("grace".into()), Value::Text("g@e.com".into())]);
        assert_eq!(
            query.sql_statement().unwrap(),
            "INSERT INTO \"users\" (\"name\", \"email\")\nVALUES (?, ?), (?, ?)"
        );
        assert_eq!(
            query.parameters(),
            vec![
                Value::Text("ada".into()),
                Value::Text("a@e.com".into()),
                Value::Text("grace".into()),
                Value::Text("g@e.com".into()),
            ]
        );
    }

    #[test]
    fn empty_columns_fail() {
        let query = InsertQuery::new("users").values([Value::Int(1)]);
        assert_eq!(query.sql_statement(), Err(Error::EmptyColumns));
    }

    #[test]
    fn empty_rowsets_fail() {
        let query = InsertQuery::new("users").columns(["name"]);
        assert_eq!(query.sql_statement(), Err(Error::EmptyRowsets));
    }

    #[test]
    fn rowset_arity_is_checked() {
        let query = InsertQuery::new("users")
            .columns(["name", "email"])
            .values([Value::Text("ada".into())]);
        assert_eq!(
            query.sql_statement(),
            Err(Error::RowsetArity {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn prefix_applies_to_table_only() {
        let query = InsertQuery::new("users")
            .columns(["name"])
            .values([Value::Text("ada".into())]);
        let mut compiler = QueryCompiler::new(Dialect::Ansi, "app_");
        assert_eq!(
            query.compile(&mut compiler).unwrap(),
            "INSERT INTO \"app_users\" (\"name\")\nVALUES (?)"
        );
    }
}
