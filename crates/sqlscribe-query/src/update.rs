//! UPDATE query builder.

use crate::compiler::QueryCompiler;
use crate::dialect::Dialect;
use crate::fragment::Fragment;
use crate::join::Join;
use crate::select::SelectQuery;
use crate::token::{self, ConditionGroup, Joiner, Operand, Token};
use sqlscribe_core::{Parameter, Result, Value};

/// An UPDATE query builder.
///
/// Assigned values may be bound parameters, self-rendering fragments
/// (`balance = balance + 1`) or sub-selects rendered parenthesized in
/// place.
#[derive(Debug, Clone)]
pub struct UpdateQuery {
    dialect: Dialect,
    table_prefix: String,
    table: String,
    assignments: Vec<(String, Operand)>,
    joins: Vec<Join>,
    wheres: Vec<Token>,
}

impl UpdateQuery {
    /// New builder targeting `table` (without prefix).
    pub fn new(table: impl Into<String>) -> Self {
        Self::seeded(Dialect::default(), String::new(), table.into())
    }

    pub(crate) fn seeded(dialect: Dialect, table_prefix: String, table: String) -> Self {
        UpdateQuery {
            dialect,
            table_prefix,
            table,
            assignments: Vec::new(),
            joins: Vec::new(),
            wheres: Vec::new(),
        }
    }

    /// Assign a bound value to a column.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Parameter>) -> Self {
        self.assignments
            .push((column.into(), Operand::Param(value.into())));
        self
    }

    /// Assign a self-rendering fragment to a column.
    pub fn set_fragment(mut self, column: impl Into<String>, fragment: Fragment) -> Self {
        self.assignments
            .push((column.into(), Operand::Fragment(fragment)));
        self
    }

    /// Assign a sub-select to a column.
    pub fn set_select(mut self, column: impl Into<String>, query: SelectQuery) -> Self {
        self.assignments
            .push((column.into(), Operand::Select(Box::new(query))));
        self
    }

    /// Add a JOIN clause.
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// AND condition with an explicit operator.
    pub fn filter(
        mut self,
        column: impl Into<crate::fragment::Ident>,
        op: &str,
        value: impl Into<Operand>,
    ) -> Self {
        token::push_compare(&mut self.wheres, Joiner::And, column, op, value);
        self
    }

    /// AND equality condition.
    pub fn filter_value(
        self,
        column: impl Into<crate::fragment::Ident>,
        value: impl Into<Operand>,
    ) -> Self {
        self.filter(column, "=", value)
    }

    /// OR condition with an explicit operator.
    pub fn or_filter(
        mut self,
        column: impl Into<crate::fragment::Ident>,
        op: &str,
        value: impl Into<Operand>,
    ) -> Self {
        token::push_compare(&mut self.wheres, Joiner::Or, column, op, value);
        self
    }

    /// AND BETWEEN condition.
    pub fn filter_between(
        mut self,
        column: impl Into<crate::fragment::Ident>,
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
        compiler.update(&self.table, &self.assignments, &self.joins, &self.wheres)
    }

    /// Render the SQL statement with a compiler derived from the owning
    /// database's dialect and table prefix.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn sql_statement(&self) -> Result<String> {
        let mut compiler = QueryCompiler::new(self.dialect, self.table_prefix.clone());
        let sql = self.compile(&mut compiler)?;
        tracing::trace!(sql = %sql, "rendered update statement");
        Ok(sql)
    }

    /// The flattened parameters: SET values first, then joins, then WHERE.
    pub fn parameters(&self) -> Vec<Value> {
        let mut params = Vec::new();
        for (_, value) in &self.assignments {
            value.collect_parameters(&mut params);
        }
        for join in &self.joins {
            token::collect_parameters(&join.on, &mut params);
        }
        token::collect_parameters(&self.wheres, &mut params);
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlscribe_core::Error;

    #[test]
    fn basic_update() {
        let query = UpdateQuery::new("users")
            .set("name", "ada")
            .set("active", true)
            .filter_value("id", 7);
        assert_eq!(
            query.sql_statement().unwrap(),
            "UPDATE \"users\"\nSET \"name\" = ?, \"active\" = ?\nWHERE \"id\" = ?"
        );
        assert_eq!(
            query.parameters(),
            vec![Value::Text("ada".into()), Value::Bool(true), Value::Int(7)]
        );
    }

    #[test]
    fn fragment_values_render_inline() {
        let query = UpdateQuery::new("accounts")
            .set_fragment("balance", Fragment::expression("balance + 1"))
            .filter_value("id", 1);
        assert_eq!(
            query.sql_statement().unwrap(),
            "UPDATE \"accounts\"\nSET \"balance\" = \"balance\" + 1\nWHERE \"id\" = ?"
        );
        assert_eq!(query.parameters(), vec![Value::Int(1)]);
    }

    #[test]
    fn sub_select_values_render_parenthesized() {
        let best = SelectQuery::new()
            .from(["scores"])
            .columns(["MAX(points)"])
            .filter_value("user_id", 7);
        let query = UpdateQuery::new("users")
            .set_select("best_score", best)
            .filter_value("id", 7);
        assert_eq!(
            query.sql_statement().unwrap(),
            "UPDATE \"users\"\nSET \"best_score\" = (SELECT MAX(\"points\")\nFROM \"scores\"\nWHERE \"user_id\" = ?)\nWHERE \"id\" = ?"
        );
        // SET parameters come before WHERE parameters.
        assert_eq!(query.parameters(), vec![Value::Int(7), Value::Int(7)]);
    }

    #[test]
    fn update_without_assignments_fails() {
        let query = UpdateQuery::new("users").filter_value("id", 1);
        assert_eq!(query.sql_statement(), Err(Error::EmptySetClause));
    }

    #[test]
    fn prefix_and_alias_binding() {
        let query = UpdateQuery::new("users").set("active", false);
        let mut compiler = QueryCompiler::new(Dialect::Ansi, "app_");
        assert_eq!(
            query.compile(&mut compiler).unwrap(),
            "UPDATE \"app_users\"\nSET \"active\" = ?"
        );
    }
}
