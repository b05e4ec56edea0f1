//! JOIN clauses.

use crate::fragment::{Fragment, Ident};
use crate::token::{self, Joiner, Operand, Token};

/// Types of SQL joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    /// SQL keywords for this join type.
    pub const fn as_str(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// One JOIN entry: type, target table (alias allowed) and the ON condition
/// token stream.
///
/// `on`/`on_op` compare two identifiers, so the right-hand side is wrapped
/// as an expression fragment and quoted like a column. `on_where` binds the
/// right-hand side as a parameter instead.
#[derive(Debug, Clone)]
pub struct Join {
    /// Join type.
    pub kind: JoinKind,
    /// Joined table; may carry an `AS alias` clause.
    pub table: Ident,
    /// ON condition tokens; empty for CROSS joins.
    pub on: Vec<Token>,
}

impl Join {
    /// Build a join of the given kind.
    pub fn new(kind: JoinKind, table: impl Into<Ident>) -> Self {
        Join {
            kind,
            table: table.into(),
            on: Vec::new(),
        }
    }

    /// INNER JOIN.
    pub fn inner(table: impl Into<Ident>) -> Self {
        Join::new(JoinKind::Inner, table)
    }

    /// LEFT JOIN.
    pub fn left(table: impl Into<Ident>) -> Self {
        Join::new(JoinKind::Left, table)
    }

    /// RIGHT JOIN.
    pub fn right(table: impl Into<Ident>) -> Self {
        Join::new(JoinKind::Right, table)
    }

    /// FULL JOIN.
    pub fn full(table: impl Into<Ident>) -> Self {
        Join::new(JoinKind::Full, table)
    }

    /// CROSS JOIN; carries no ON condition.
    pub fn cross(table: impl Into<Ident>) -> Self {
        Join::new(JoinKind::Cross, table)
    }

    /// AND equality between two identifiers.
    pub fn on(self, left: impl Into<Ident>, right: impl Into<String>) -> Self {
        self.on_op(left, "=", right)
    }

    /// AND condition between two identifiers with an explicit operator.
    pub fn on_op(mut self, left: impl Into<Ident>, op: &str, right: impl Into<String>) -> Self {
        token::push_compare(
            &mut self.on,
            Joiner::And,
            left,
            op,
            Operand::Fragment(Fragment::expression(right.into())),
        );
        self
    }

    /// OR equality between two identifiers.
    pub fn or_on(self, left: impl Into<Ident>, right: impl Into<String>) -> Self {
        self.or_on_op(left, "=", right)
    }

    /// OR condition between two identifiers with an explicit operator.
    pub fn or_on_op(mut self, left: impl Into<Ident>, op: &str, right: impl Into<String>) -> Self {
        token::push_compare(
            &mut self.on,
            Joiner::Or,
            left,
            op,
            Operand::Fragment(Fragment::expression(right.into())),
        );
        self
    }

    /// AND condition binding the right-hand side as a parameter.
    pub fn on_where(mut self, column: impl Into<Ident>, op: &str, value: impl Into<Operand>) -> Self {
        token::push_compare(&mut self.on, Joiner::And, column, op, value);
        self
    }

    /// OR condition binding the right-hand side as a parameter.
    pub fn or_on_where(
        mut self,
        column: impl Into<Ident>,
        op: &str,
        value: impl Into<Operand>,
    ) -> Self {
        token::push_compare(&mut self.on, Joiner::Or, column, op, value);
        self
    }
}
