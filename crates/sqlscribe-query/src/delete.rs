//! DELETE query builder.

use crate::compiler::QueryCompiler;
use crate::dialect::Dialect;
use crate::fragment::{Fragment, Ident};
use crate::join::Join;
use crate::token::{self, ConditionGroup, Joiner, Operand, Token};
use sqlscribe_core::{Result, Value};

/// A DELETE query builder.
#[derive(Debug, Clone)]
pub struct DeleteQuery {
    dialect: Dialect,
    table_prefix: String,
    table: String,
    joins: Vec<Join>,
    wheres: Vec<Token>,
}

impl DeleteQuery {
    /// New builder targeting `table` (without prefix).
    pub fn new(table: impl Into<String>) -> Self {
        Self::seeded(Dialect::default(), String::new(), table.into())
    }

    pub(crate) fn seeded(dialect: Dialect, table_prefix: String, table: String) -> Self {
        DeleteQuery {
            dialect,
            table_prefix,
            table,
            joins: Vec::new(),
            wheres: Vec::new(),
        }
    }

    /// Add a JOIN clause.
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// AND condition with an explicit operator.
    pub fn filter(mut self, column: impl Into<Ident>, op: &str, value: impl Into<Operand>) -> Self {
        token::push_compare(&mut self.wheres, Joiner::And, column, op, value);
        self
    }

    /// AND equality condition.
    pub fn filter_value(self, column: impl Into<Ident>, value: impl Into<Operand>) -> Self {
        self.filter(column, "=", value)
    }

    /// OR condition with an explicit operator.
    pub fn or_filter(
        mut self,
        column: impl Into<Ident>,
        op: &str,
        value: impl Into<Operand>,
    ) -> Self {
        token::push_compare(&mut self.wheres, Joiner::Or, column, op, value);
        self
    }

    /// AND BETWEEN condition.
    pub fn filter_between(
        mut self,
        column: impl Into<Ident>,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Self {
        token::push_between(&mut self.wheres, Joiner::And, column, false, low, high);
        self
    }

    /// AND condition from a self-rendering fragment.
    pub fn filter_fragment(mut self, fragment: Fragment) -> Self {
        self.wheres.push(Token::Fragment(Joiner::And, fragment));
        self
    }

    /// Parenthesized AND group built in a closure.
    pub fn filter_group<F>(mut self, build: F) -> Self
    where
        F: FnOnce(ConditionGroup) -> ConditionGroup,
    {
        token::push_group(&mut self.wheres, Joiner::And, build(ConditionGroup::new()));
        self
    }

    /// Render through an injected compiler.
    pub fn compile(&self, compiler: &mut QueryCompiler) -> Result<String> {
        compiler.delete(&self.table, &self.joins, &self.wheres)
    }

    /// Render the SQL statement with a compiler derived from the owning
    /// database's dialect and table prefix.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn sql_statement(&self) -> Result<String> {
        let mut compiler = QueryCompiler::new(self.dialect, self.table_prefix.clone());
        let sql = self.compile(&mut compiler)?;
        tracing::trace!(sql = %sql, "rendered delete statement");
        Ok(sql)
    }

    /// The flattened parameters: joins first, then WHERE.
    pub fn parameters(&self) -> Vec<Value> {
        let mut params = Vec::new();
        for join in &self.joins {
            token::collect_parameters(&join.on, &mut params);
        }
        token::collect_parameters(&self.wheres, &mut params);
        params
    }
}
