#![forbid(unsafe_code)]

//! Values held by reactive fields.
//!
//! # Equality
//!
//! Write-time change detection uses [`Value::same_value`]: scalars compare by
//! value (numbers numerically, so `1` equals `1.0`), arrays and objects
//! compare by identity. Writing a structurally equal but freshly built object
//! therefore counts as a change.
//!
//! # Stringification
//!
//! [`Display`](fmt::Display) renders a value the way it ends up in the host
//! tree: `null`, `true`, numbers without a trailing `.0`, strings verbatim,
//! arrays as their elements joined by `,` (nulls render empty), objects as
//! `[object Object]`.

use std::fmt;
use std::rc::Rc;

use serde_json::Number;

use super::object::ReactiveObject;
use crate::config::ReactiveConfig;

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Arrays are shared, not intercepted: mutating their elements is
    /// invisible to subscribers.
    Array(Rc<Vec<serde_json::Value>>),
    Object(ReactiveObject),
}

impl Value {
    /// Observe `json` with the default configuration.
    #[must_use]
    pub fn from_json(json: serde_json::Value) -> Self {
        ReactiveConfig::default().observe(json)
    }

    /// Whether writing `other` over `self` leaves the field unchanged.
    #[must_use]
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[serde_json::Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&ReactiveObject> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Snapshot as JSON. Object fields are read without registering
    /// dependencies.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(items.as_ref().clone()),
            Value::Object(obj) => obj.to_json(),
        }
    }

    /// Short type name for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_value(other)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Object(obj) => f.debug_tuple("Object").field(obj).finish(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write_number(f, n),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => write_array(f, items),
            Value::Object(_) => f.write_str("[object Object]"),
        }
    }
}

/// Floats print the shortest round-tripping digits, switching to exponent
/// form (`1e+21`, `1e-7`) outside `[1e-6, 1e21)`.
fn write_number(f: &mut fmt::Formatter<'_>, n: &Number) -> fmt::Result {
    if n.is_f64() {
        if let Some(x) = n.as_f64() {
            if x == 0.0 {
                return f.write_str("0");
            }
            let magnitude = x.abs();
            if magnitude >= 1e21 || magnitude < 1e-6 {
                return write_exponent(f, x);
            }
            if x.fract() == 0.0 {
                return write!(f, "{x:.0}");
            }
            return write!(f, "{x}");
        }
    }
    write!(f, "{n}")
}

fn write_exponent(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let formatted = format!("{x:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        }
        _ => f.write_str(&formatted),
    }
}

fn write_array(f: &mut fmt::Formatter<'_>, items: &[serde_json::Value]) -> fmt::Result {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            f.write_str(",")?;
        }
        match item {
            serde_json::Value::Null => {}
            serde_json::Value::Bool(b) => write!(f, "{b}")?,
            serde_json::Value::Number(n) => write_number(f, n)?,
            serde_json::Value::String(s) => f.write_str(s)?,
            serde_json::Value::Array(inner) => write_array(f, inner)?,
            serde_json::Value::Object(_) => f.write_str("[object Object]")?,
        }
    }
    Ok(())
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        Value::from_json(json)
    }
}

impl From<ReactiveObject> for Value {
    fn from(obj: ReactiveObject) -> Self {
        Value::Object(obj)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::from(n))
    }
}

/// Non-finite floats have no JSON representation and become `Null`.
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<Vec<serde_json::Value>> for Value {
    fn from(items: Vec<serde_json::Value>) -> Self {
        Value::Array(Rc::new(items))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
