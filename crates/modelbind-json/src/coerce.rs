//! Type coercion engine.
//!
//! Narrows decoded values into primitive targets. Numeric sources are
//! described by the [`Number`] table and destinations by [`PrimitiveType`];
//! compatibility is a plain comparison against the destination's exact
//! bounds. Booleans and strings are never converted from another JSON type.

use std::fmt;

use crate::error::{Error, Result};
use crate::value::JsonValue;

/// Primitive destinations understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Bool,
    String,
    Int8,
    Uint8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl PrimitiveType {
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::String => "string",
            PrimitiveType::Int8 => "int8",
            PrimitiveType::Uint8 => "uint8",
            PrimitiveType::Int16 => "int16",
            PrimitiveType::Int32 => "int32",
            PrimitiveType::Int64 => "int64",
            PrimitiveType::Float32 => "float32",
            PrimitiveType::Float64 => "float64",
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, PrimitiveType::Bool | PrimitiveType::String)
    }

    pub fn is_integral(self) -> bool {
        self.integral_bounds().is_some()
    }

    /// Inclusive range of an integral destination.
    pub fn integral_bounds(self) -> Option<(i128, i128)> {
        match self {
            PrimitiveType::Int8 => Some((i8::MIN.into(), i8::MAX.into())),
            PrimitiveType::Uint8 => Some((u8::MIN.into(), u8::MAX.into())),
            PrimitiveType::Int16 => Some((i16::MIN.into(), i16::MAX.into())),
            PrimitiveType::Int32 => Some((i32::MIN.into(), i32::MAX.into())),
            PrimitiveType::Int64 => Some((i64::MIN.into(), i64::MAX.into())),
            PrimitiveType::Bool
            | PrimitiveType::String
            | PrimitiveType::Float32
            | PrimitiveType::Float64 => None,
        }
    }

    /// Largest finite magnitude of a floating destination.
    pub fn float_limit(self) -> Option<f64> {
        match self {
            PrimitiveType::Float32 => Some(f32::MAX as f64),
            PrimitiveType::Float64 => Some(f64::MAX),
            PrimitiveType::Bool
            | PrimitiveType::String
            | PrimitiveType::Int8
            | PrimitiveType::Uint8
            | PrimitiveType::Int16
            | PrimitiveType::Int32
            | PrimitiveType::Int64 => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A numeric source value.
///
/// Decoded JSON only ever produces [`Number::F64`]; the other variants let
/// model code narrow values it already holds through the same rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Number {
    /// The exact value of an integer source.
    fn integral(self) -> Option<i128> {
        match self {
            Number::I8(v) => Some(v.into()),
            Number::U8(v) => Some(v.into()),
            Number::I16(v) => Some(v.into()),
            Number::U16(v) => Some(v.into()),
            Number::I32(v) => Some(v.into()),
            Number::U32(v) => Some(v.into()),
            Number::I64(v) => Some(v.into()),
            Number::U64(v) => Some(v.into()),
            Number::F32(_) | Number::F64(_) => None,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::I8(v) => v.into(),
            Number::U8(v) => v.into(),
            Number::I16(v) => v.into(),
            Number::U16(v) => v.into(),
            Number::I32(v) => v.into(),
            Number::U32(v) => v.into(),
            Number::I64(v) => v as f64,
            Number::U64(v) => v as f64,
            Number::F32(v) => v.into(),
            Number::F64(v) => v,
        }
    }

    pub fn literal_text(self) -> String {
        match self.integral() {
            Some(v) => v.to_string(),
            None => modelbind_util::literal_f64(self.as_f64()),
        }
    }
}

macro_rules! number_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Number {
                fn from(v: $ty) -> Self {
                    Number::$variant(v)
                }
            }
        )*
    };
}

number_from!(
    i8 => I8, u8 => U8, i16 => I16, u16 => U16, i32 => I32,
    u32 => U32, i64 => I64, u64 => U64, f32 => F32, f64 => F64,
);

/// Whether the decoded value is a JSON number.
pub fn is_numeric_type(value: &JsonValue) -> bool {
    match value {
        JsonValue::Number(_) => true,
        JsonValue::Null
        | JsonValue::Bool(_)
        | JsonValue::String(_)
        | JsonValue::Array(_)
        | JsonValue::Object(_) => false,
    }
}

/// Whether `value` carries a non-zero fractional remainder.
pub fn has_decimal_place(value: f64) -> bool {
    (value - value.trunc()).abs() > 0.0
}

/// Whether `value` can be narrowed into `target` without loss.
pub fn is_compatible(value: Number, target: PrimitiveType) -> bool {
    if let Some((min, max)) = target.integral_bounds() {
        return match value.integral() {
            Some(v) => min <= v && v <= max,
            None => {
                let v = value.as_f64();
                // Both bounds are exact powers of two, so the comparison in
                // f64 is exact: [min, max + 1).
                v.is_finite()
                    && !has_decimal_place(v)
                    && v >= min as f64
                    && v < (max + 1) as f64
            }
        };
    }
    match target.float_limit() {
        Some(limit) => {
            let v = value.as_f64();
            v.is_finite() && v.abs() <= limit
        }
        None => false,
    }
}

/// Numeric destinations of [`convert`].
pub trait NumericPrimitive: Copy {
    const TYPE: PrimitiveType;

    /// Builds the value from an integer already checked against the bounds.
    fn from_i128(v: i128) -> Self;

    /// Builds the value from a float already checked against the bounds.
    fn from_f64(v: f64) -> Self;
}

macro_rules! numeric_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl NumericPrimitive for $ty {
                const TYPE: PrimitiveType = PrimitiveType::$kind;

                fn from_i128(v: i128) -> Self {
                    v as $ty
                }

                fn from_f64(v: f64) -> Self {
                    v as $ty
                }
            }
        )*
    };
}

numeric_primitive!(
    i8 => Int8, u8 => Uint8, i16 => Int16, i32 => Int32,
    i64 => Int64, f32 => Float32, f64 => Float64,
);

pub(crate) fn mismatch(value: &JsonValue, target: PrimitiveType) -> Error {
    Error::TypeMismatch {
        value: value.literal_text(),
        target: target.name(),
    }
}

/// Narrows a numeric source into `T`.
pub fn convert<T: NumericPrimitive>(value: Number) -> Result<T> {
    if !is_compatible(value, T::TYPE) {
        return Err(Error::TypeMismatch {
            value: value.literal_text(),
            target: T::TYPE.name(),
        });
    }
    Ok(match value.integral() {
        Some(v) => T::from_i128(v),
        None => T::from_f64(value.as_f64()),
    })
}

/// Narrows a decoded value into a numeric `T`; `null` is absent.
pub fn coerce_number<T: NumericPrimitive>(value: &JsonValue) -> Result<Option<T>> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => convert(Number::F64(*n)).map(Some),
        JsonValue::Bool(_)
        | JsonValue::String(_)
        | JsonValue::Array(_)
        | JsonValue::Object(_) => Err(mismatch(value, T::TYPE)),
    }
}

pub fn coerce_bool(value: &JsonValue) -> Result<Option<bool>> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::Bool(b) => Ok(Some(*b)),
        JsonValue::Number(_)
        | JsonValue::String(_)
        | JsonValue::Array(_)
        | JsonValue::Object(_) => Err(mismatch(value, PrimitiveType::Bool)),
    }
}

pub fn coerce_string(value: &JsonValue) -> Result<Option<String>> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) => Ok(Some(s.clone())),
        JsonValue::Bool(_)
        | JsonValue::Number(_)
        | JsonValue::Array(_)
        | JsonValue::Object(_) => Err(mismatch(value, PrimitiveType::String)),
    }
}
