//! The command VM: a tiny stack machine interpreting the op sequences
//! attached to transition/entry/exit hooks in a flow configuration.

use wheelly_core::{Angle, Point};

use crate::blackboard::Blackboard;
use crate::error::{AgentError, AgentResult};
use crate::value::Value;

/// One instruction in a hook's op sequence.
///
/// The opcode set is closed for this version — a state needing a capability
/// not expressible here implements it as native Rust in its own `step`
/// rather than extending the VM.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Op {
    PushNumber(f64),
    PushInteger(i64),
    PushText(String),
    PushPoint(Point),
    PushBearing(Angle),
    Get(String),
    Put(String),
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Lt,
    Gt,
    Not,
    /// Pop a `Point`, push its `x` coordinate as a `Number`.
    SelectX,
    /// Pop a `Point`, push its `y` coordinate as a `Number`.
    SelectY,
    /// Pop a `Bearing`, push its degree reading as a `Number`.
    SelectBearing,
    /// Pop two `Point`s (`b` then `a`), push the distance between them as a
    /// `Number`.
    SelectDistance,
}

/// A deterministic linear walk over an `Op` sequence with a private operand
/// stack. Every instruction either reads/writes the supplied blackboard or
/// operates purely on the stack.
#[derive(Default)]
pub struct Vm {
    stack: Vec<Value>,
}

impl Vm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `ops` against `blackboard`, leaving the stack empty on success.
    /// A non-empty residual stack is not itself an error — hooks are free to
    /// leave one value for the interpreter to treat as the hook's result, if
    /// a given hook kind expects one.
    pub fn run(&mut self, ops: &[Op], blackboard: &mut Blackboard) -> AgentResult<()> {
        self.stack.clear();
        for op in ops {
            self.step(op, blackboard)?;
        }
        Ok(())
    }

    /// Run `ops` and return the final top-of-stack value, if any.
    pub fn eval(&mut self, ops: &[Op], blackboard: &mut Blackboard) -> AgentResult<Option<Value>> {
        self.run(ops, blackboard)?;
        Ok(self.stack.pop())
    }

    fn step(&mut self, op: &Op, blackboard: &mut Blackboard) -> AgentResult<()> {
        match op {
            Op::PushNumber(n) => self.stack.push(Value::Number(*n)),
            Op::PushInteger(n) => self.stack.push(Value::Integer(*n)),
            Op::PushText(s) => self.stack.push(Value::Text(s.clone())),
            Op::PushPoint(p) => self.stack.push(Value::Point(*p)),
            Op::PushBearing(a) => self.stack.push(Value::Bearing(*a)),
            Op::Get(key) => self.stack.push(blackboard.get_cloned(key)?),
            Op::Put(key) => {
                let v = self.pop()?;
                blackboard.put(key.clone(), v);
            }
            Op::Add => self.binary_arith(|a, b| a + b)?,
            Op::Sub => self.binary_arith(|a, b| a - b)?,
            Op::Mul => self.binary_arith(|a, b| a * b)?,
            Op::Div => {
                let b = self.pop_number()?;
                let a = self.pop_number()?;
                if b == 0.0 {
                    return Err(AgentError::DivZero);
                }
                self.stack.push(Value::Number(a / b));
            }
            Op::Eq => {
                let b = self.pop()?;
                let a = self.pop()?;
                self.stack.push(Value::Integer(bool_int(values_eq(&a, &b)?)));
            }
            Op::Lt => {
                let b = self.pop_number()?;
                let a = self.pop_number()?;
                self.stack.push(Value::Integer(bool_int(a < b)));
            }
            Op::Gt => {
                let b = self.pop_number()?;
                let a = self.pop_number()?;
                self.stack.push(Value::Integer(bool_int(a > b)));
            }
            Op::Not => {
                let v = self.pop()?;
                self.stack.push(Value::Integer(bool_int(!v.is_truthy())));
            }
            Op::SelectX => {
                let p = self.pop_point()?;
                self.stack.push(Value::Number(p.x));
            }
            Op::SelectY => {
                let p = self.pop_point()?;
                self.stack.push(Value::Number(p.y));
            }
            Op::SelectBearing => {
                let v = self.pop()?;
                match v {
                    Value::Bearing(a) => self.stack.push(Value::Number(a.to_degrees())),
                    other => return Err(type_mismatch("bearing", &other)),
                }
            }
            Op::SelectDistance => {
                let b = self.pop_point()?;
                let a = self.pop_point()?;
                self.stack.push(Value::Number(a.distance(b)));
            }
        }
        Ok(())
    }

    fn pop(&mut self) -> AgentResult<Value> {
        self.stack.pop().ok_or(AgentError::StackUnderflow)
    }

    fn pop_number(&mut self) -> AgentResult<f64> {
        let v = self.pop()?;
        v.as_number().ok_or_else(|| type_mismatch("number", &v))
    }

    fn pop_point(&mut self) -> AgentResult<Point> {
        match self.pop()? {
            Value::Point(p) => Ok(p),
            other => Err(type_mismatch("point", &other)),
        }
    }

    fn binary_arith(&mut self, f: impl Fn(f64, f64) -> f64) -> AgentResult<()> {
        let b = self.pop_number()?;
        let a = self.pop_number()?;
        self.stack.push(Value::Number(f(a, b)));
        Ok(())
    }
}

fn bool_int(b: bool) -> i64 {
    if b { 1 } else { 0 }
}

fn values_eq(a: &Value, b: &Value) -> AgentResult<bool> {
    match (a, b) {
        (Value::Number(_) | Value::Integer(_), Value::Number(_) | Value::Integer(_)) => {
            Ok(a.as_number() == b.as_number())
        }
        (Value::Text(x), Value::Text(y)) => Ok(x == y),
        (Value::Point(x), Value::Point(y)) => Ok(x == y),
        (Value::Bearing(x), Value::Bearing(y)) => Ok(x == y),
        _ => Err(AgentError::TypeMismatch(format!("cannot compare {} with {}", a.type_name(), b.type_name()))),
    }
}

fn type_mismatch(expected: &str, got: &Value) -> AgentError {
    AgentError::TypeMismatch(format!("expected {expected}, got {}", got.type_name()))
}
