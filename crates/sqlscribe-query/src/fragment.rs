//! Self-rendering units of SQL text.

use crate::compiler::QueryCompiler;
use crate::ident;
use crate::select::SelectQuery;
use sqlscribe_core::{Result, Value};

/// A unit of SQL that renders itself into a larger statement.
///
/// Raw fragments are the trust boundary of the compiler: their text is
/// emitted verbatim, so unvalidated user input must never reach them.
#[derive(Debug, Clone)]
pub enum Fragment {
    /// Verbatim SQL text, never quoted or prefixed.
    Raw(String),
    /// SQL text whose embedded column names are quoted and prefixed by the
    /// compiler.
    Expression(String),
    /// A nested select, compiled in place against the enclosing compiler so
    /// that outer aliases stay visible.
    Select(Box<SelectQuery>),
}

impl Fragment {
    /// Verbatim SQL.
    pub fn raw(sql: impl Into<String>) -> Self {
        Fragment::Raw(sql.into())
    }

    /// An expression whose identifiers are re-quoted by the compiler.
    pub fn expression(sql: impl Into<String>) -> Self {
        Fragment::Expression(sql.into())
    }

    /// A nested select query.
    pub fn select(query: SelectQuery) -> Self {
        Fragment::Select(Box::new(query))
    }

    /// Render this fragment. Sub-selects render without the surrounding
    /// parentheses; the embedding context adds them.
    pub fn render(&self, compiler: &mut QueryCompiler) -> Result<String> {
        match self {
            Fragment::Raw(sql) => Ok(sql.clone()),
            Fragment::Expression(sql) => Ok(compiler.quote_str(sql, false, false)),
            Fragment::Select(query) => query.compile(compiler),
        }
    }

    pub(crate) fn collect_parameters(&self, out: &mut Vec<Value>) {
        if let Fragment::Select(query) = self {
            out.extend(query.parameters());
        }
    }
}

impl From<SelectQuery> for Fragment {
    fn from(query: SelectQuery) -> Self {
        Fragment::Select(Box::new(query))
    }
}

/// An identifier position: either a name parsed through the identifier
/// micro-grammar, or a fragment rendering its own SQL.
#[derive(Debug, Clone)]
pub enum Ident {
    /// A plain identifier, possibly dotted, aliased or an expression.
    Name(String),
    /// A self-rendering fragment.
    Fragment(Fragment),
}

impl Ident {
    pub(crate) fn collect_parameters(&self, out: &mut Vec<Value>) {
        if let Ident::Fragment(fragment) = self {
            fragment.collect_parameters(out);
        }
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::Name(name.to_string())
    }
}

impl From<String> for Ident {
    fn from(name: String) -> Self {
        Ident::Name(name)
    }
}

impl From<Fragment> for Ident {
    fn from(fragment: Fragment) -> Self {
        Ident::Fragment(fragment)
    }
}

/// Normalize loose identifier input (lists, comma-separated strings) into
/// the flat identifier list the compiler works with.
pub(crate) fn idents_from<I, S>(inputs: I) -> Vec<Ident>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = Vec::new();
    for input in inputs {
        for piece in ident::split_list(input.as_ref()) {
            out.push(Ident::Name(piece));
        }
    }
    out
}
