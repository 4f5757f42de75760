//! Values a model keeps for properties it does not declare.

use std::any::Any;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::parsable::Parsable;
use crate::untyped::UntypedNode;
use crate::value::JsonValue;

/// Undeclared properties in document order.
pub type AdditionalData = IndexMap<String, AdditionalValue>;

/// One additional-data entry.
///
/// Decoding only produces the JSON-shaped variants (`Null`, `String`, `Bool`,
/// `Float64`, `List`, `Map`). Model code may store any of the others;
/// [`AdditionalValue::Opaque`] is accepted here but has no JSON form, so
/// writing it fails.
pub enum AdditionalValue {
    Null,
    String(String),
    Bool(bool),
    Uint8(u8),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bytes(Vec<u8>),
    Time(DateTime<FixedOffset>),
    Uuid(Uuid),
    Map(AdditionalData),
    List(Vec<AdditionalValue>),
    Parsable(Box<dyn Parsable + Send + Sync>),
    Untyped(UntypedNode),
    Opaque(Opaque),
}

/// A value of a type the writer cannot represent.
pub struct Opaque {
    pub type_name: &'static str,
    pub value: Box<dyn Any + Send + Sync>,
}

impl AdditionalValue {
    pub fn opaque<T: Any + Send + Sync>(value: T) -> Self {
        AdditionalValue::Opaque(Opaque {
            type_name: std::any::type_name::<T>(),
            value: Box::new(value),
        })
    }

    pub fn parsable<T: Parsable + Send + Sync + 'static>(value: T) -> Self {
        AdditionalValue::Parsable(Box::new(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AdditionalValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AdditionalValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AdditionalValue::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Converts a decoded value. `null` at the top level is absent; `null`
    /// inside containers is kept as [`AdditionalValue::Null`].
    pub(crate) fn from_value(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Null => None,
            other => Some(Self::from_member(other)),
        }
    }

    fn from_member(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => AdditionalValue::Null,
            JsonValue::Bool(b) => AdditionalValue::Bool(*b),
            JsonValue::Number(n) => AdditionalValue::Float64(*n),
            JsonValue::String(s) => AdditionalValue::String(s.clone()),
            JsonValue::Array(items) => {
                AdditionalValue::List(items.iter().map(Self::from_member).collect())
            }
            JsonValue::Object(entries) => AdditionalValue::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from_member(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Debug for AdditionalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdditionalValue::Null => f.write_str("Null"),
            AdditionalValue::String(v) => f.debug_tuple("String").field(v).finish(),
            AdditionalValue::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            AdditionalValue::Uint8(v) => f.debug_tuple("Uint8").field(v).finish(),
            AdditionalValue::Int8(v) => f.debug_tuple("Int8").field(v).finish(),
            AdditionalValue::Int16(v) => f.debug_tuple("Int16").field(v).finish(),
            AdditionalValue::Int32(v) => f.debug_tuple("Int32").field(v).finish(),
            AdditionalValue::Int64(v) => f.debug_tuple("Int64").field(v).finish(),
            AdditionalValue::Float32(v) => f.debug_tuple("Float32").field(v).finish(),
            AdditionalValue::Float64(v) => f.debug_tuple("Float64").field(v).finish(),
            AdditionalValue::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            AdditionalValue::Time(v) => f.debug_tuple("Time").field(v).finish(),
            AdditionalValue::Uuid(v) => f.debug_tuple("Uuid").field(v).finish(),
            AdditionalValue::Map(v) => f.debug_tuple("Map").field(v).finish(),
            AdditionalValue::List(v) => f.debug_tuple("List").field(v).finish(),
            AdditionalValue::Parsable(_) => f.write_str("Parsable(..)"),
            AdditionalValue::Untyped(v) => f.debug_tuple("Untyped").field(v).finish(),
            AdditionalValue::Opaque(v) => write!(f, "Opaque({})", v.type_name),
        }
    }
}

/// Structural equality. Models and opaque values never compare equal.
impl PartialEq for AdditionalValue {
    fn eq(&self, other: &Self) -> bool {
        use AdditionalValue as V;
        match (self, other) {
            (V::Null, V::Null) => true,
            (V::String(a), V::String(b)) => a == b,
            (V::Bool(a), V::Bool(b)) => a == b,
            (V::Uint8(a), V::Uint8(b)) => a == b,
            (V::Int8(a), V::Int8(b)) => a == b,
            (V::Int16(a), V::Int16(b)) => a == b,
            (V::Int32(a), V::Int32(b)) => a == b,
            (V::Int64(a), V::Int64(b)) => a == b,
            (V::Float32(a), V::Float32(b)) => a == b,
            (V::Float64(a), V::Float64(b)) => a == b,
            (V::Bytes(a), V::Bytes(b)) => a == b,
            (V::Time(a), V::Time(b)) => a == b,
            (V::Uuid(a), V::Uuid(b)) => a == b,
            (V::Map(a), V::Map(b)) => a == b,
            (V::List(a), V::List(b)) => a == b,
            (V::Untyped(a), V::Untyped(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! additional_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for AdditionalValue {
                fn from(v: $ty) -> Self {
                    AdditionalValue::$variant(v)
                }
            }
        )*
    };
}

additional_from!(
    String => String, bool => Bool, u8 => Uint8, i8 => Int8, i16 => Int16,
    i32 => Int32, i64 => Int64, f32 => Float32, f64 => Float64,
    Vec<u8> => Bytes, DateTime<FixedOffset> => Time, Uuid => Uuid,
    AdditionalData => Map, Vec<AdditionalValue> => List, UntypedNode => Untyped,
);

impl From<&str> for AdditionalValue {
    fn from(v: &str) -> Self {
        AdditionalValue::String(v.to_string())
    }
}
