//! The tagged value type shared by blackboard entries and VM stack entries.

use wheelly_core::{Angle, Point};

/// A dynamically-typed value that can sit in a blackboard entry or on the
/// VM's operand stack.
///
/// Booleans have no dedicated tag — comparisons and `not` encode them as
/// `Integer(1)`/`Integer(0)`, the same convention the flow configuration's
/// opcode literals use.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    Number(f64),
    Integer(i64),
    Text(String),
    Point(Point),
    Path(Vec<Point>),
    Bearing(Angle),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Integer(_) => "integer",
            Value::Text(_) => "string",
            Value::Point(_) => "point",
            Value::Path(_) => "path",
            Value::Bearing(_) => "bearing",
        }
    }

    /// Numeric view of `self`, widening `Integer` to `f64`. `None` for every
    /// other tag.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// `true` unless `self` is the boolean-encoded `Integer(0)`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Integer(0))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Point> for Value {
    fn from(p: Point) -> Self {
        Value::Point(p)
    }
}

impl From<Angle> for Value {
    fn from(a: Angle) -> Self {
        Value::Bearing(a)
    }
}
