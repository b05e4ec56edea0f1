//! Condition tokens.
//!
//! WHERE, HAVING and JOIN ON clauses are all streams of the same tokens:
//! group markers, self-rendering fragments and three-or-four part
//! comparisons, each carrying the boolean joiner that connects it to the
//! previous condition. The compiler's state machine turns a stream into
//! text; builders produce streams through the fluent filter methods.

use crate::fragment::{Fragment, Ident};
use crate::select::SelectQuery;
use sqlscribe_core::{Parameter, Value};

/// Boolean connector between two conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joiner {
    And,
    Or,
}

impl Joiner {
    /// SQL keyword for this joiner.
    pub const fn as_str(self) -> &'static str {
        match self {
            Joiner::And => "AND",
            Joiner::Or => "OR",
        }
    }
}

/// The value side of a comparison.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A bound parameter; renders a placeholder (or a placeholder tuple for
    /// arrays).
    Param(Parameter),
    /// A self-rendering fragment; contributes no placeholder.
    Fragment(Fragment),
    /// A nested select rendered parenthesized inline.
    Select(Box<SelectQuery>),
}

impl Operand {
    pub(crate) fn collect_parameters(&self, out: &mut Vec<Value>) {
        match self {
            Operand::Param(parameter) => parameter.flatten_into(out),
            Operand::Fragment(fragment) => fragment.collect_parameters(out),
            Operand::Select(query) => out.extend(query.parameters()),
        }
    }
}

impl From<Parameter> for Operand {
    fn from(parameter: Parameter) -> Self {
        Operand::Param(parameter)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Param(Parameter::Value(value))
    }
}

impl From<Fragment> for Operand {
    fn from(fragment: Fragment) -> Self {
        Operand::Fragment(fragment)
    }
}

impl From<SelectQuery> for Operand {
    fn from(query: SelectQuery) -> Self {
        Operand::Select(Box::new(query))
    }
}

impl From<bool> for Operand {
    fn from(v: bool) -> Self {
        Operand::Param(Parameter::from(v))
    }
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Operand::Param(Parameter::from(v))
    }
}

impl From<i64> for Operand {
    fn from(v: i64) -> Self {
        Operand::Param(Parameter::from(v))
    }
}

impl From<f64> for Operand {
    fn from(v: f64) -> Self {
        Operand::Param(Parameter::from(v))
    }
}

impl From<&str> for Operand {
    fn from(v: &str) -> Self {
        Operand::Param(Parameter::from(v))
    }
}

impl From<String> for Operand {
    fn from(v: String) -> Self {
        Operand::Param(Parameter::from(v))
    }
}

impl From<Vec<Value>> for Operand {
    fn from(values: Vec<Value>) -> Self {
        Operand::Param(Parameter::from(values))
    }
}

/// A three- or four-part condition: identifier, operator, value and, for
/// BETWEEN only, the second bound.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Identifier (or parenthesized fragment) on the left.
    pub left: Ident,
    /// Operator keyword, stored uppercased.
    pub op: String,
    /// Right-hand value.
    pub value: Operand,
    /// Second bound, present only for BETWEEN / NOT BETWEEN.
    pub upper: Option<Operand>,
}

impl Comparison {
    /// Build a comparison; the operator is uppercased on entry.
    pub fn new(left: impl Into<Ident>, op: &str, value: impl Into<Operand>) -> Self {
        Comparison {
            left: left.into(),
            op: op.trim().to_uppercase(),
            value: value.into(),
            upper: None,
        }
    }

    /// Build a BETWEEN (or NOT BETWEEN) comparison.
    pub fn between(
        left: impl Into<Ident>,
        negated: bool,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Self {
        Comparison {
            left: left.into(),
            op: if negated { "NOT BETWEEN" } else { "BETWEEN" }.to_string(),
            value: low.into(),
            upper: Some(high.into()),
        }
    }
}

/// One element of a condition stream.
#[derive(Debug, Clone)]
pub enum Token {
    /// Literal `(` opening a nested group.
    Open(Joiner),
    /// Literal `)` closing a group.
    Close,
    /// A self-rendering fragment used as a whole condition.
    Fragment(Joiner, Fragment),
    /// A comparison condition.
    Compare(Joiner, Comparison),
}

/// Append the bound parameters of a token stream, in rendering order.
pub(crate) fn collect_parameters(tokens: &[Token], out: &mut Vec<Value>) {
    for token in tokens {
        match token {
            Token::Open(_) | Token::Close => {}
            Token::Fragment(_, fragment) => fragment.collect_parameters(out),
            Token::Compare(_, comparison) => {
                comparison.left.collect_parameters(out);
                comparison.value.collect_parameters(out);
                if let Some(upper) = &comparison.upper {
                    upper.collect_parameters(out);
                }
            }
        }
    }
}

pub(crate) fn push_compare(
    tokens: &mut Vec<Token>,
    joiner: Joiner,
    column: impl Into<Ident>,
    op: &str,
    value: impl Into<Operand>,
) {
    tokens.push(Token::Compare(joiner, Comparison::new(column, op, value)));
}

pub(crate) fn push_between(
    tokens: &mut Vec<Token>,
    joiner: Joiner,
    column: impl Into<Ident>,
    negated: bool,
    low: impl Into<Operand>,
    high: impl Into<Operand>,
) {
    tokens.push(Token::Compare(
        joiner,
        Comparison::between(column, negated, low, high),
    ));
}

pub(crate) fn push_group(tokens: &mut Vec<Token>, joiner: Joiner, group: ConditionGroup) {
    if group.tokens.is_empty() {
        return;
    }
    tokens.push(Token::Open(joiner));
    tokens.extend(group.tokens);
    tokens.push(Token::Close);
}

/// Accumulator for a parenthesized condition group, handed to the closure
/// of the builders' `filter_group` methods. Groups nest.
#[derive(Debug, Clone, Default)]
pub struct ConditionGroup {
    tokens: Vec<Token>,
}

impl ConditionGroup {
    /// Empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// AND condition with an explicit operator.
    pub fn filter(mut self, column: impl Into<Ident>, op: &str, value: impl Into<Operand>) -> Self {
        push_compare(&mut self.tokens, Joiner::And, column, op, value);
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
        push_compare(&mut self.tokens, Joiner::Or, column, op, value);
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
        push_between(&mut self.tokens, Joiner::And, column, false, low, high);
        self
    }

    /// AND NOT BETWEEN condition.
    pub fn filter_not_between(
        mut self,
        column: impl Into<Ident>,
        low: impl Into<Operand>,
        high: impl Into<Operand>,
    ) -> Self {
        push_between(&mut self.tokens, Joiner::And, column, true, low, high);
        self
    }

    /// AND fragment condition.
    pub fn filter_fragment(mut self, fragment: Fragment) -> Self {
        self.tokens.push(Token::Fragment(Joiner::And, fragment));
        self
    }

    /// OR fragment condition.
    pub fn or_filter_fragment(mut self, fragment: Fragment) -> Self {
        self.tokens.push(Token::Fragment(Joiner::Or, fragment));
        self
    }

    /// Nested AND group.
    pub fn filter_group<F>(mut self, build: F) -> Self
    where
        F: FnOnce(ConditionGroup) -> ConditionGroup,
    {
        push_group(&mut self.tokens, Joiner::And, build(ConditionGroup::new()));
        self
    }

    /// Nested OR group.
    pub fn or_filter_group<F>(mut self, build: F) -> Self
    where
        F: FnOnce(ConditionGroup) -> ConditionGroup,
    {
        push_group(&mut self.tokens, Joiner::Or, build(ConditionGroup::new()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_are_uppercased() {
        let cmp = Comparison::new("status", "like", "a%");
        assert_eq!(cmp.op, "LIKE");
    }

    #[test]
    fn group_tokens_are_wrapped_in_markers() {
        let mut tokens = Vec::new();
        let group = ConditionGroup::new()
            .filter_value("a", 1)
            .or_filter_value("b", 2);
        push_group(&mut tokens, Joiner::And, group);
        assert_eq!(tokens.len(), 4);
        assert!(matches!(tokens[0], Token::Open(Joiner::And)));
        assert!(matches!(tokens[3], Token::Close));
    }

    #[test]
    fn empty_groups_emit_no_tokens() {
        let mut tokens = Vec::new();
        push_group(&mut tokens, Joiner::And, ConditionGroup::new());
        assert!(tokens.is_empty());
    }

    #[test]
    fn parameters_collect_in_token_order() {
        let mut tokens = Vec::new();
        push_compare(&mut tokens, Joiner::And, "a", "=", 1);
        push_between(&mut tokens, Joiner::And, "b", false, 10, 20);
        push_compare(&mut tokens, Joiner::Or, "c", "IN", vec![
            Value::Int(7),
            Value::Int(8),
        ]);

        let mut params = Vec::new();
        collect_parameters(&tokens, &mut params);
        assert_eq!(
            params,
            vec![
                Value::Int(1),
                Value::Int(10),
                Value::Int(20),
                Value::Int(7),
                Value::Int(8),
            ]
        );
    }

    #[test]
    fn fragments_contribute_no_parameters() {
        let tokens = vec![Token::Fragment(
            Joiner::And,
            Fragment::raw("balance > bonus"),
        )];
        let mut params = Vec::new();
        collect_parameters(&tokens, &mut params);
        assert!(params.is_empty());
    }
}
