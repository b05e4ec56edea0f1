//! SELECT query builder.

use crate::compiler::{OrderBy, OrderDirection, QueryCompiler, Union, UnionSource};
use crate::dialect::Dialect;
use crate::fragment::{self, Fragment, Ident};
use crate::join::Join;
use crate::token::{self, ConditionGroup, Joiner, Operand, Token};
use sqlscribe_core::{Error, Result, Value};

/// A SELECT query builder.
///
/// Accumulates structured statement state through fluent calls and renders
/// on demand. Rendering derives quoting context fresh on every call, so a
/// builder can be rendered repeatedly and mutated in between. A builder can
/// also be embedded in another query as a sub-select, in which case it
/// contributes its own parameters in place.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    dialect: Dialect,
    table_prefix: String,
    from: Vec<Ident>,
    distinct: bool,
    columns: Vec<Ident>,
    joins: Vec<Join>,
    wheres: Vec<Token>,
    havings: Vec<Token>,
    group_by: Vec<Ident>,
    order_by: Vec<OrderBy>,
    limit: u64,
    offset: u64,
    unions: Vec<Union>,
}

impl SelectQuery {
    /// New builder selecting `*`, targeting the default dialect with no
    /// table prefix.
    pub fn new() -> Self {
        Self::seeded(Dialect::default(), String::new())
    }

    pub(crate) fn seeded(dialect: Dialect, table_prefix: String) -> Self {
        SelectQuery {
            dialect,
            table_prefix,
            from: Vec::new(),
            distinct: false,
            columns: vec![Ident::Name("*".to_string())],
            joins: Vec::new(),
            wheres: Vec::new(),
            havings: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
            limit: 0,
            offset: 0,
            unions: Vec::new(),
        }
    }

    /// Set the tables data is fetched from; entries may carry `AS` aliases
    /// or be comma-separated lists.
    pub fn from<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.from = fragment::idents_from(tables);
        self
    }

    /// Set the fetched columns; entries may be expressions, carry `AS`
    /// aliases or be comma-separated lists.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.columns = fragment::idents_from(columns);
        self
    }

    /// Append a fragment to the column list.
    pub fn column_fragment(mut self, fragment: Fragment) -> Self {
        self.columns.push(Ident::Fragment(fragment));
        self
    }

    /// Request only distinct rows.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// AND condition with an explicit operator. `=` against an array value
    /// rewrites to `IN`; `=`/`!=` against NULL rewrite to `IS`/`IS NOT`.
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

    /// OR equality condition.
    pub fn or_filter_value(self, column: impl Into<Ident>, value: impl Into<Operand>) -> Self {
        self.or_filter(column, "=", value)
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

    /// AND NOT BETWEEN condition.
    pub fn filter_not_between(
        mut self,
        column: impl Into<Ident>,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Self {
        token::push_between(&mut self.wheres, Joiner::And, column, true, low, high);
        self
    }

    /// OR BETWEEN condition.
    pub fn or_filter_between(
        mut self,
        column: impl Into<Ident>,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Self {
        token::push_between(&mut self.wheres, Joiner::Or, column, false, low, high);
        self
    }

    /// AND condition from a self-rendering fragment.
    pub fn filter_fragment(mut self, fragment: Fragment) -> Self {
        self.wheres.push(Token::Fragment(Joiner::And, fragment));
        self
    }

    /// OR condition from a self-rendering fragment.
    pub fn or_filter_fragment(mut self, fragment: Fragment) -> Self {
        self.wheres.push(Token::Fragment(Joiner::Or, fragment));
        self
    }

    /// Parenthesized AND group built in a closure; empty groups are
    /// dropped.
    pub fn filter_group<F>(mut self, build: F) -> Self
    where
        F: FnOnce(ConditionGroup) -> ConditionGroup,
    {
        token::push_group(&mut self.wheres, Joiner::And, build(ConditionGroup::new()));
        self
    }

    /// Parenthesized OR group built in a closure.
    pub fn or_filter_group<F>(mut self, build: F) -> Self
    where
        F: FnOnce(ConditionGroup) -> ConditionGroup,
    {
        token::push_group(&mut self.wheres, Joiner::Or, build(ConditionGroup::new()));
        self
    }

    /// AND HAVING condition with an explicit operator.
    pub fn having(mut self, column: impl Into<Ident>, op: &str, value: impl Into<Operand>) -> Self {
        token::push_compare(&mut self.havings, Joiner::And, column, op, value);
        self
    }

    /// AND HAVING equality condition.
    pub fn having_value(self, column: impl Into<Ident>, value: impl Into<Operand>) -> Self {
        self.having(column, "=", value)
    }

    /// OR HAVING condition.
    pub fn or_having(
        mut self,
        column: impl Into<Ident>,
        op: &str,
        value: impl Into<Operand>,
    ) -> Self {
        token::push_compare(&mut self.havings, Joiner::Or, column, op, value);
        self
    }

    /// HAVING condition from a fragment.
    pub fn having_fragment(mut self, fragment: Fragment) -> Self {
        self.havings.push(Token::Fragment(Joiner::And, fragment));
        self
    }

    /// Add a JOIN clause.
    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    /// Append grouping columns.
    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.group_by.extend(fragment::idents_from(columns));
        self
    }

    /// Append an ordering entry.
    pub fn order_by(mut self, column: impl Into<Ident>, direction: OrderDirection) -> Self {
        self.order_by.push(OrderBy {
            expr: column.into(),
            direction,
        });
        self
    }

    /// Set LIMIT (0 = unset).
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    /// Set OFFSET (0 = unset).
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Set LIMIT/OFFSET from a 1-based page number and page size.
    pub fn page(mut self, page: u64, per_page: u64) -> Self {
        self.limit = per_page;
        self.offset = page.saturating_sub(1).saturating_mul(per_page);
        self
    }

    /// Combine with another select keeping only distinct rows. The united
    /// query's parameters merge after this builder's own.
    pub fn union(mut self, query: SelectQuery) -> Self {
        self.unions.push(Union::distinct(query));
        self
    }

    /// Combine with another select keeping every row.
    pub fn union_all(mut self, query: SelectQuery) -> Self {
        self.unions.push(Union::all(query));
        self
    }

    /// UNION arm from a raw fragment.
    pub fn union_fragment(mut self, fragment: Fragment, all: bool) -> Self {
        self.unions.push(Union::fragment(fragment, all));
        self
    }

    /// Derive the `SELECT COUNT(*)` form of this query: ordering, grouping
    /// and paging are stripped. Not meaningful for united queries.
    pub fn count(&self) -> SelectQuery {
        let mut query = self.clone();
        query.columns = vec![Ident::Name("COUNT(*)".to_string())];
        query.order_by.clear();
        query.group_by.clear();
        query.limit = 0;
        query.offset = 0;
        query
    }

    /// Derive a single-column aggregate (AVG, MIN, MAX or SUM) form of this
    /// query.
    pub fn aggregate(&self, function: &str, column: &str) -> Result<SelectQuery> {
        let function = function.to_uppercase();
        if !matches!(function.as_str(), "AVG" | "MIN" | "MAX" | "SUM") {
            return Err(Error::UnknownAggregate(function));
        }
        let mut query = self.clone();
        query.columns = vec![Ident::Name(format!("{function}({column})"))];
        query.order_by.clear();
        query.group_by.clear();
        query.limit = 0;
        query.offset = 0;
        Ok(query)
    }

    /// Render through an injected compiler (used for sub-selects and
    /// tests; production rendering goes through [`SelectQuery::sql_statement`]).
    pub fn compile(&self, compiler: &mut QueryCompiler) -> Result<String> {
        compiler.select(
            &self.from,
            self.distinct,
            &self.columns,
            &self.joins,
            &self.wheres,
            &self.havings,
            &self.group_by,
            &self.order_by,
            self.limit,
            self.offset,
            &self.unions,
        )
    }

    /// Render the SQL statement with a compiler derived from the owning
    /// database's dialect and table prefix.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn sql_statement(&self) -> Result<String> {
        let mut compiler = QueryCompiler::new(self.dialect, self.table_prefix.clone());
        let sql = self.compile(&mut compiler)?;
        tracing::trace!(sql = %sql, "rendered select statement");
        Ok(sql)
    }

    /// The flattened parameters, ordered to match the placeholders of the
    /// rendered statement: column fragments, joins, WHERE, HAVING, then
    /// united queries.
    pub fn parameters(&self) -> Vec<Value> {
        let mut params = Vec::new();
        for column in &self.columns {
            column.collect_parameters(&mut params);
        }
        for join in &self.joins {
            token::collect_parameters(&join.on, &mut params);
        }
        token::collect_parameters(&self.wheres, &mut params);
        token::collect_parameters(&self.havings, &mut params);
        for union in &self.unions {
            if let UnionSource::Select(query) = &union.source {
                params.extend(query.parameters());
            }
        }
        params
    }
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self::new()
    }
}
