//! The statement compiler.
//!
//! A `QueryCompiler` turns the structured state accumulated by the builders
//! into dialect-correct SQL text. Its only mutable state is the alias map
//! grown while rendering one statement, so the rule is one compiler
//! instance per in-flight compilation; `fresh()` derives the isolated
//! sibling used for UNION sub-statements.

use crate::dialect::Dialect;
use crate::fragment::{Fragment, Ident};
use crate::ident;
use crate::join::Join;
use crate::select::SelectQuery;
use crate::token::{Comparison, Operand, Token};
use sqlscribe_core::{Error, Result};
use std::collections::HashMap;

/// Hardening limit for condition-group nesting.
pub const MAX_GROUP_DEPTH: usize = 128;

/// Sort direction for ORDER BY entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl OrderDirection {
    /// SQL keyword for this direction.
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry.
#[derive(Debug, Clone)]
pub struct OrderBy {
    /// Column or expression to sort by.
    pub expr: Ident,
    /// Sort direction.
    pub direction: OrderDirection,
}

impl OrderBy {
    /// Ascending entry.
    pub fn asc(expr: impl Into<Ident>) -> Self {
        OrderBy {
            expr: expr.into(),
            direction: OrderDirection::Asc,
        }
    }

    /// Descending entry.
    pub fn desc(expr: impl Into<Ident>) -> Self {
        OrderBy {
            expr: expr.into(),
            direction: OrderDirection::Desc,
        }
    }
}

/// Source of a UNION arm.
#[derive(Debug, Clone)]
pub enum UnionSource {
    /// A select builder; its parameters merge into the composite statement.
    Select(Box<SelectQuery>),
    /// A pre-rendered fragment.
    Fragment(Fragment),
}

/// One UNION arm with its ALL/DISTINCT flag.
#[derive(Debug, Clone)]
pub struct Union {
    /// The united statement.
    pub source: UnionSource,
    /// True for `UNION ALL`.
    pub all: bool,
}

impl Union {
    /// `UNION` (distinct) arm.
    pub fn distinct(query: SelectQuery) -> Self {
        Union {
            source: UnionSource::Select(Box::new(query)),
            all: false,
        }
    }

    /// `UNION ALL` arm.
    pub fn all(query: SelectQuery) -> Self {
        Union {
            source: UnionSource::Select(Box::new(query)),
            all: true,
        }
    }

    /// Arm backed by a raw fragment.
    pub fn fragment(fragment: Fragment, all: bool) -> Self {
        Union {
            source: UnionSource::Fragment(fragment),
            all,
        }
    }
}

/// Compiles structured statement state into SQL text.
///
/// The alias map records `alias -> base` for every `AS` clause met while
/// rendering table references, plus `prefixed -> bare` for every implicit
/// prefix application. A name found in the map is never prefixed again
/// within the same statement, which is what lets `u.id` resolve correctly
/// after `users AS u` even under a table prefix. The map is not shared
/// between threads; give each in-flight compilation its own instance.
#[derive(Debug, Clone, Default)]
pub struct QueryCompiler {
    dialect: Dialect,
    table_prefix: String,
    aliases: HashMap<String, String>,
}

impl QueryCompiler {
    /// Compiler for a dialect and active table prefix.
    pub fn new(dialect: Dialect, table_prefix: impl Into<String>) -> Self {
        QueryCompiler {
            dialect,
            table_prefix: table_prefix.into(),
            aliases: HashMap::new(),
        }
    }

    /// Sibling compiler with the same dialect and prefix but no aliases.
    pub fn fresh(&self) -> Self {
        QueryCompiler::new(self.dialect, self.table_prefix.clone())
    }

    /// Drop every alias collected so far.
    pub fn reset_aliases(&mut self) {
        self.aliases.clear();
    }

    /// Target dialect.
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Active table prefix.
    pub fn table_prefix(&self) -> &str {
        &self.table_prefix
    }

    fn quote_segment(&self, name: &str) -> String {
        if name == "*" {
            "*".to_string()
        } else {
            self.dialect.quote_identifier(name)
        }
    }

    /// Quote an identifier position, delegating to fragments.
    pub fn quote(&mut self, identifier: &Ident, table: bool, force_table: bool) -> Result<String> {
        match identifier {
            Ident::Name(name) => Ok(self.quote_str(name, table, force_table)),
            Ident::Fragment(fragment) => fragment.render(self),
        }
    }

    /// Quote an identifier string: resolves `AS` aliasing, expressions,
    /// table prefixes and dotted qualification.
    pub fn quote_str(&mut self, identifier: &str, table: bool, force_table: bool) -> String {
        if let Some((base, alias)) = ident::split_alias(identifier) {
            // Force the prefix when aliasing a table so `name AS name`
            // under a prefix renders as `prefix_name AS name`.
            let quoted = format!(
                "{} AS {}",
                self.quote_str(&base, table, table),
                self.quote_segment(&alias)
            );
            if table && !base.contains('.') {
                // Recorded after rendering the base; registering earlier
                // would let the alias resolve to itself.
                self.aliases.insert(alias, base);
            }
            return quoted;
        }

        if identifier.contains('(') || identifier.contains(' ') {
            let mut table = table;
            return ident::scan_expression(identifier, |name| {
                if table {
                    table = false;
                    // Only the first bare name is a table reference.
                    self.quote_str(name, true, false)
                } else {
                    self.quote_str(name, false, false)
                }
            });
        }

        if !identifier.contains('.') {
            if (table && !self.aliases.contains_key(identifier)) || force_table {
                let prefixed = format!("{}{}", self.table_prefix, identifier);
                self.aliases
                    .entry(prefixed.clone())
                    .or_insert_with(|| identifier.to_string());
                return self.quote_segment(&prefixed);
            }
            return self.quote_segment(identifier);
        }

        let mut segments = identifier.split('.');
        let first = segments.next().unwrap_or_default();
        let head = if self.aliases.contains_key(first) {
            first.to_string()
        } else {
            format!("{}{}", self.table_prefix, first)
        };
        let mut rendered = vec![self.quote_segment(&head)];
        for segment in segments {
            rendered.push(self.quote_segment(segment));
        }
        rendered.join(".")
    }

    /// Render a FROM table list (forced table context).
    pub fn tables(&mut self, tables: &[Ident]) -> Result<String> {
        let mut rendered = Vec::with_capacity(tables.len());
        for table in tables {
            rendered.push(self.quote(table, true, true)?);
        }
        Ok(rendered.join(", "))
    }

    /// Render a column list.
    pub fn columns(&mut self, columns: &[Ident]) -> Result<String> {
        let mut rendered = Vec::with_capacity(columns.len());
        for column in columns {
            rendered.push(self.quote(column, false, false)?);
        }
        Ok(rendered.join(", "))
    }

    /// Render ORDER BY entries (keyword not included).
    pub fn order_by(&mut self, order_by: &[OrderBy]) -> Result<String> {
        let mut rendered = Vec::with_capacity(order_by.len());
        for entry in order_by {
            rendered.push(format!(
                "{} {}",
                self.quote(&entry.expr, false, false)?,
                entry.direction.as_str()
            ));
        }
        Ok(rendered.join(", "))
    }

    /// Render join clauses, each on its own line, ON conditions included.
    pub fn joins(&mut self, joins: &[Join]) -> Result<String> {
        let mut statement = String::new();
        for join in joins {
            statement.push('\n');
            statement.push_str(join.kind.as_str());
            statement.push(' ');
            statement.push_str(&self.quote(&join.table, true, true)?);
            if !join.on.is_empty() {
                statement.push_str(" ON ");
                statement.push_str(&self.where_clause(&join.on)?);
            }
        }
        Ok(statement)
    }

    /// Render a condition token stream (shared by WHERE, HAVING and ON;
    /// keywords not included).
    ///
    /// The `active_group` flag marks "the next condition opens a group or
    /// the whole clause and must drop its leading joiner". Opening `(` sets
    /// it; closing `)` deliberately leaves it untouched; conditions clear
    /// it.
    pub fn where_clause(&mut self, tokens: &[Token]) -> Result<String> {
        if tokens.is_empty() {
            return Ok(String::new());
        }

        let mut statement = String::new();
        let mut active_group = true;
        let mut depth = 0usize;

        for token in tokens {
            match token {
                Token::Open(joiner) => {
                    if depth == MAX_GROUP_DEPTH {
                        return Err(Error::GroupDepthExceeded {
                            limit: MAX_GROUP_DEPTH,
                        });
                    }
                    if active_group {
                        statement.push('(');
                    } else {
                        statement.push(' ');
                        statement.push_str(joiner.as_str());
                        statement.push_str(" (");
                    }
                    depth += 1;
                    active_group = true;
                }
                Token::Close => {
                    if depth == 0 {
                        return Err(Error::UnbalancedGroup);
                    }
                    depth -= 1;
                    statement.push(')');
                }
                Token::Fragment(joiner, fragment) => {
                    let rendered = match fragment {
                        Fragment::Select(query) => format!("({})", query.compile(self)?),
                        other => other.render(self)?,
                    };
                    Self::push_condition(&mut statement, &mut active_group, *joiner, &rendered);
                }
                Token::Compare(joiner, comparison) => {
                    let rendered = self.comparison(comparison)?;
                    Self::push_condition(&mut statement, &mut active_group, *joiner, &rendered);
                }
            }
        }

        if depth > 0 || active_group {
            return Err(Error::UnclosedGroup);
        }

        Ok(statement)
    }

    fn push_condition(
        statement: &mut String,
        active_group: &mut bool,
        joiner: crate::token::Joiner,
        rendered: &str,
    ) {
        if *active_group {
            *active_group = false;
            if !statement.is_empty() && !statement.ends_with('(') {
                statement.push(' ');
            }
        } else {
            if !statement.is_empty() {
                statement.push(' ');
            }
            statement.push_str(joiner.as_str());
            statement.push(' ');
        }
        statement.push_str(rendered);
    }

    fn comparison(&mut self, comparison: &Comparison) -> Result<String> {
        let identifier = match &comparison.left {
            Ident::Name(name) => self.quote_str(name, false, false),
            Ident::Fragment(fragment) => format!("({})", fragment.render(self)?),
        };

        let op = comparison.op.as_str();
        if op == "BETWEEN" || op == "NOT BETWEEN" {
            let Some(upper) = &comparison.upper else {
                return Err(Error::MalformedBetween);
            };
            let low = self.operand(&comparison.value)?;
            let high = self.operand(upper)?;
            return Ok(format!("{identifier} {op} {low} AND {high}"));
        }
        if comparison.upper.is_some() {
            return Err(Error::MalformedBetween);
        }

        let is_null = matches!(&comparison.value, Operand::Param(p) if p.is_null());
        let is_array = matches!(&comparison.value, Operand::Param(p) if p.is_array());
        let op = if is_null && op == "=" {
            "IS"
        } else if is_null && (op == "!=" || op == "<>") {
            "IS NOT"
        } else if is_array && op == "=" {
            "IN"
        } else {
            op
        };

        let value = self.operand(&comparison.value)?;
        Ok(format!("{identifier} {op} {value}"))
    }

    fn operand(&mut self, operand: &Operand) -> Result<String> {
        match operand {
            Operand::Param(parameter) => {
                if parameter.is_array() {
                    let count = parameter.len();
                    if count == 0 {
                        return Err(Error::EmptyInList);
                    }
                    Ok(format!("({})", vec!["?"; count].join(", ")))
                } else {
                    Ok("?".to_string())
                }
            }
            Operand::Fragment(fragment) => match fragment {
                Fragment::Select(query) => Ok(format!("({})", query.compile(self)?)),
                other => other.render(self),
            },
            Operand::Select(query) => Ok(format!("({})", query.compile(self)?)),
        }
    }

    /// Render UNION arms. Every arm compiles against a fresh compiler so
    /// its aliases stay isolated from the enclosing statement.
    pub fn unions(&mut self, unions: &[Union]) -> Result<String> {
        let mut statement = String::new();
        for union in unions {
            statement.push_str(if union.all { "\nUNION ALL\n(" } else { "\nUNION\n(" });
            let mut sub = self.fresh();
            let sql = match &union.source {
                UnionSource::Select(query) => query.compile(&mut sub)?,
                UnionSource::Fragment(fragment) => fragment.render(&mut sub)?,
            };
            statement.push_str(&sql);
            statement.push(')');
        }
        Ok(statement)
    }

    /// Render LIMIT/OFFSET. Each renders independently when present;
    /// OFFSET without LIMIT fails fast on dialects that reject it.
    pub fn limit_clause(&self, limit: u64, offset: u64) -> Result<String> {
        let mut statement = String::new();
        if limit > 0 {
            statement.push_str(&format!("LIMIT {limit}"));
        }
        if offset > 0 {
            if limit == 0 && !self.dialect.supports_offset_without_limit() {
                return Err(Error::OffsetWithoutLimit {
                    dialect: self.dialect.name(),
                });
            }
            if !statement.is_empty() {
                statement.push(' ');
            }
            statement.push_str(&format!("OFFSET {offset}"));
        }
        Ok(statement)
    }

    /// Compile a SELECT statement.
    ///
    /// FROM and JOINs render first: aliases they register must be visible
    /// to the column list and every condition. With unions present, ORDER
    /// BY moves after the union block so it applies to the composite
    /// result; LIMIT/OFFSET always render last.
    pub fn select(
        &mut self,
        from: &[Ident],
        distinct: bool,
        columns: &[Ident],
        joins: &[Join],
        where_tokens: &[Token],
        having_tokens: &[Token],
        group_by: &[Ident],
        order_by: &[OrderBy],
        limit: u64,
        offset: u64,
        unions: &[Union],
    ) -> Result<String> {
        let from_sql = self.tables(from)?;
        let joins_sql = self.joins(joins)?;
        let columns_sql = self.columns(columns)?;
        let where_sql = self.where_clause(where_tokens)?;
        let group_sql = self.columns(group_by)?;
        let having_sql = self.where_clause(having_tokens)?;
        let order_sql = self.order_by(order_by)?;

        let mut statement = String::from("SELECT");
        if distinct {
            statement.push_str(" DISTINCT");
        }
        statement.push(' ');
        statement.push_str(&columns_sql);
        statement.push_str("\nFROM ");
        statement.push_str(&from_sql);
        statement.push_str(&joins_sql);
        if !where_sql.is_empty() {
            statement.push_str("\nWHERE ");
            statement.push_str(&where_sql);
        }
        if !group_sql.is_empty() {
            statement.push_str("\nGROUP BY ");
            statement.push_str(&group_sql);
        }
        if !having_sql.is_empty() {
            statement.push_str("\nHAVING ");
            statement.push_str(&having_sql);
        }

        if unions.is_empty() {
            if !order_sql.is_empty() {
                statement.push_str("\nORDER BY ");
                statement.push_str(&order_sql);
            }
        } else {
            statement.push_str(&self.unions(unions)?);
            if !order_sql.is_empty() {
                statement.push_str("\nORDER BY ");
                statement.push_str(&order_sql);
            }
        }

        let limit_sql = self.limit_clause(limit, offset)?;
        if !limit_sql.is_empty() {
            statement.push('\n');
            statement.push_str(&limit_sql);
        }

        tracing::trace!(kind = "select", length = statement.len(), "compiled statement");
        Ok(statement)
    }

    /// Compile an INSERT statement. Rowsets arrive pre-rendered as
    /// parenthesized placeholder tuples.
    pub fn insert(&mut self, table: &str, columns: &[Ident], rowsets: &[String]) -> Result<String> {
        if columns.is_empty() {
            return Err(Error::EmptyColumns);
        }
        if rowsets.is_empty() {
            return Err(Error::EmptyRowsets);
        }

        let statement = format!(
            "INSERT INTO {} ({})\nVALUES {}",
            self.quote_str(table, true, false),
            self.columns(columns)?,
            rowsets.join(", ")
        );

        tracing::trace!(kind = "insert", length = statement.len(), "compiled statement");
        Ok(statement)
    }

    /// Compile an UPDATE statement.
    pub fn update(
        &mut self,
        table: &str,
        assignments: &[(String, Operand)],
        joins: &[Join],
        where_tokens: &[Token],
    ) -> Result<String> {
        if assignments.is_empty() {
            return Err(Error::EmptySetClause);
        }

        let mut statement = format!("UPDATE {}", self.quote_str(table, true, true));
        statement.push_str(&self.joins(joins)?);
        statement.push_str("\nSET ");
        let mut rendered = Vec::with_capacity(assignments.len());
        for (column, value) in assignments {
            rendered.push(format!(
                "{} = {}",
                self.quote_str(column, false, false),
                self.operand(value)?
            ));
        }
        statement.push_str(&rendered.join(", "));

        let where_sql = self.where_clause(where_tokens)?;
        if !where_sql.is_empty() {
            statement.push_str("\nWHERE ");
            statement.push_str(&where_sql);
        }

        tracing::trace!(kind = "update", length = statement.len(), "compiled statement");
        Ok(statement)
    }

    /// Compile a DELETE statement.
    pub fn delete(
        &mut self,
        table: &str,
        joins: &[Join],
        where_tokens: &[Token],
    ) -> Result<String> {
        let mut statement = format!("DELETE FROM {}", self.quote_str(table, true, false));
        statement.push_str(&self.joins(joins)?);

        let where_sql = self.where_clause(where_tokens)?;
        if !where_sql.is_empty() {
            statement.push_str("\nWHERE ");
            statement.push_str(&where_sql);
        }

        tracing::trace!(kind = "delete", length = statement.len(), "compiled statement");
        Ok(statement)
    }
}
