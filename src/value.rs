//! Runtime-typed values and the conversions between them.
//!
//! [`DefaultOnFail`](crate::DefaultOnFail) converts whatever a callable returns
//! into a [`TargetType`]. Conversions that cannot succeed report a [`Failure`]
//! of kind `InvalidValue` (right type, unusable content), `WrongType` (no
//! conversion exists) or `Arithmetic` (the number does not fit an `i64`).

use std::fmt;
use std::num::IntErrorKind;

use crate::decorator_error::Failure;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
        }
    }

    pub fn coerce(self, target: TargetType) -> Result<Value, Failure> {
        match target {
            TargetType::Bool => Ok(Value::Bool(self.is_truthy())),
            TargetType::Int => self.to_int().map(Value::Int),
            TargetType::Float => self.to_float().map(Value::Float),
            TargetType::Str => Ok(Value::Str(self.to_string())),
        }
    }

    fn to_int(&self) -> Result<i64, Failure> {
        match self {
            Value::Int(i) => Ok(*i),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Float(f) if f.is_nan() => {
                Err(Failure::invalid_value("cannot convert float NaN to int"))
            }
            Value::Float(f) => float_to_int(*f),
            Value::Str(s) => parse_int(s),
            Value::None => Err(Failure::wrong_type("cannot convert none to int")),
        }
    }

    fn to_float(&self) -> Result<f64, Failure> {
        match self {
            Value::Float(f) => Ok(*f),
            Value::Int(i) => Ok(*i as f64),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Str(s) => s.trim().parse::<f64>().map_err(|_| {
                Failure::invalid_value(format!("invalid float literal: '{s}'"))
            }),
            Value::None => Err(Failure::wrong_type("cannot convert none to float")),
        }
    }
}

/// Truncates toward zero; anything outside the `i64` range, infinities
/// included, is an `Arithmetic` failure.
fn float_to_int(f: f64) -> Result<i64, Failure> {
    // 2^63: i64::MIN is exact, i64::MAX is not representable
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;

    let truncated = f.trunc();
    if (-LIMIT..LIMIT).contains(&truncated) {
        Ok(truncated as i64)
    } else {
        Err(Failure::arithmetic(format!(
            "float {} is out of range for int",
            Value::Float(f)
        )))
    }
}

/// Base-10 integer literal: optional sign, digits, `_` only between digits.
fn parse_int(raw: &str) -> Result<i64, Failure> {
    let invalid = || Failure::invalid_value(format!("invalid int literal: '{raw}'"));

    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let well_formed = !digits.is_empty()
        && !digits.starts_with('_')
        && !digits.ends_with('_')
        && !digits.contains("__")
        && digits.chars().all(|c| c.is_ascii_digit() || c == '_');
    if !well_formed {
        return Err(invalid());
    }

    let cleaned: String = trimmed.chars().filter(|c| *c != '_').collect();
    cleaned.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            Failure::arithmetic(format!("int literal out of range: '{raw}'"))
        }
        _ => invalid(),
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write_float(f, *x),
            Value::Str(s) => f.write_str(s),
        }
    }
}

/// Shortest round-trip digits; exponent form below 1e-4 and from 1e16 up,
/// with a signed two-digit exponent (`1e+20`, `1.5e-05`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("nan");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "inf" } else { "-inf" });
    }

    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{x:e}");
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if exponent < 0 { '-' } else { '+' };
        return write!(f, "{mantissa}e{sign}{:02}", exponent.abs());
    }

    if x.fract() == 0.0 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::None, Into::into)
    }
}

/// Type a [`Value`] can be coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    Bool,
    Int,
    Float,
    Str,
}

impl TargetType {
    pub fn name(&self) -> &'static str {
        match self {
            TargetType::Bool => "bool",
            TargetType::Int => "int",
            TargetType::Float => "float",
            TargetType::Str => "str",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
