//! Bind parameters.

use crate::value::Value;

/// A value registered with a query builder for later binding.
///
/// A parameter is either a single scalar or an array of nested parameters.
/// Arrays drive the `IN (...)` placeholder expansion and batch-insert
/// rowsets; nesting is flattened in order on extraction. Builders own their
/// parameters until render time, when the driver consumes the flattened
/// list read-only.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    /// A single bindable scalar.
    Value(Value),
    /// An ordered collection of nested parameters.
    Array(Vec<Parameter>),
}

impl Parameter {
    /// Wrap a scalar value.
    pub fn value(value: impl Into<Value>) -> Self {
        Parameter::Value(value.into())
    }

    /// Wrap an ordered list of scalars.
    pub fn array<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Parameter::Array(values.into_iter().map(|v| Parameter::Value(v.into())).collect())
    }

    /// Check if this parameter is a single NULL scalar.
    pub fn is_null(&self) -> bool {
        matches!(self, Parameter::Value(Value::Null))
    }

    /// Check if this parameter is an array.
    pub const fn is_array(&self) -> bool {
        matches!(self, Parameter::Array(_))
    }

    /// Number of scalars this parameter flattens to.
    pub fn len(&self) -> usize {
        match self {
            Parameter::Value(_) => 1,
            Parameter::Array(items) => items.iter().map(Parameter::len).sum(),
        }
    }

    /// True when the parameter flattens to zero scalars.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the flattened scalars, in order, to `out`.
    pub fn flatten_into(&self, out: &mut Vec<Value>) {
        match self {
            Parameter::Value(value) => out.push(value.clone()),
            Parameter::Array(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }

    /// The flattened, ordered scalar list.
    pub fn flatten(&self) -> Vec<Value> {
        let mut out = Vec::with_capacity(self.len());
        self.flatten_into(&mut out);
        out
    }
}

impl From<Value> for Parameter {
    fn from(value: Value) -> Self {
        Parameter::Value(value)
    }
}

impl From<Vec<Value>> for Parameter {
    fn from(values: Vec<Value>) -> Self {
        Parameter::Array(values.into_iter().map(Parameter::Value).collect())
    }
}

impl From<Vec<Parameter>> for Parameter {
    fn from(items: Vec<Parameter>) -> Self {
        Parameter::Array(items)
    }
}

impl From<bool> for Parameter {
    fn from(v: bool) -> Self {
        Parameter::Value(Value::Bool(v))
    }
}

impl From<i32> for Parameter {
    fn from(v: i32) -> Self {
        Parameter::Value(Value::Int(v))
    }
}

impl From<i64> for Parameter {
    fn from(v: i64) -> Self {
        Parameter::Value(Value::BigInt(v))
    }
}

impl From<f64> for Parameter {
    fn from(v: f64) -> Self {
        Parameter::Value(Value::Double(v))
    }
}

impl From<&str> for Parameter {
    fn from(v: &str) -> Self {
        Parameter::Value(Value::Text(v.to_string()))
    }
}

impl From<String> for Parameter {
    fn from(v: String) -> Self {
        Parameter::Value(Value::Text(v))
    }
}
