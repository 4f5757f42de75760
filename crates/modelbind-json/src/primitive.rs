//! Primitive values a parse node can yield and a writer can emit.
//!
//! [`Primitive`] ties each Rust type to its coercion rule: numbers, booleans
//! and strings go through [`crate::coerce`], the textual kinds (timestamps,
//! dates, UUIDs, durations, base64) are parsed out of JSON strings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use uuid::Uuid;

use crate::coerce::{coerce_bool, coerce_number, coerce_string, NumericPrimitive};
use crate::duration::IsoDuration;
use crate::error::{Error, Result};
use crate::value::JsonValue;

/// One decoded primitive, as returned by
/// [`JsonParseNode::collection_of_primitive_values`](crate::JsonParseNode::collection_of_primitive_values).
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    Bool(bool),
    String(String),
    Uint8(u8),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Time(DateTime<FixedOffset>),
    DateOnly(NaiveDate),
    TimeOnly(NaiveTime),
    Duration(IsoDuration),
    Uuid(Uuid),
    Bytes(Vec<u8>),
}

/// A type a single JSON value can be narrowed into.
pub trait Primitive: Sized + Clone {
    /// Name accepted by `collection_of_primitive_values`.
    const TYPE_NAME: &'static str;

    /// Narrows `value`; `null` yields `Ok(None)`.
    fn from_value(value: &JsonValue) -> Result<Option<Self>>;

    fn into_primitive_value(self) -> PrimitiveValue;
}

impl Primitive for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &JsonValue) -> Result<Option<Self>> {
        coerce_bool(value)
    }

    fn into_primitive_value(self) -> PrimitiveValue {
        PrimitiveValue::Bool(self)
    }
}

impl Primitive for String {
    const TYPE_NAME: &'static str = "string";

    fn from_value(value: &JsonValue) -> Result<Option<Self>> {
        coerce_string(value)
    }

    fn into_primitive_value(self) -> PrimitiveValue {
        PrimitiveValue::String(self)
    }
}

macro_rules! numeric {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const TYPE_NAME: &'static str = <$ty as NumericPrimitive>::TYPE.name();

                fn from_value(value: &JsonValue) -> Result<Option<Self>> {
                    coerce_number::<$ty>(value)
                }

                fn into_primitive_value(self) -> PrimitiveValue {
                    PrimitiveValue::$variant(self)
                }
            }
        )*
    };
}

numeric!(
    u8 => Uint8, i8 => Int8, i16 => Int16, i32 => Int32,
    i64 => Int64, f32 => Float32, f64 => Float64,
);

/// Extracts the string a textual primitive is parsed from.
fn text_of<'a>(value: &'a JsonValue, target: &'static str) -> Result<Option<&'a str>> {
    match value {
        JsonValue::Null => Ok(None),
        JsonValue::String(s) => Ok(Some(s)),
        JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::Array(_) | JsonValue::Object(_) => {
            Err(Error::TypeMismatch {
                value: value.literal_text(),
                target,
            })
        }
    }
}

fn parse_text<T>(
    value: &JsonValue,
    target: &'static str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>> {
    let Some(text) = text_of(value, target)? else {
        return Ok(None);
    };
    parse(text).map(Some).ok_or_else(|| Error::InvalidFormat {
        value: text.to_string(),
        target,
    })
}

/// Parses an RFC 3339 timestamp.
///
/// An explicit offset is kept as written. Without one the text is read as a
/// naive date-time and pinned to UTC.
pub fn parse_time(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time);
    }
    let naive = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
    Some(Utc.from_utc_datetime(&naive).into())
}

impl Primitive for DateTime<FixedOffset> {
    const TYPE_NAME: &'static str = "time";

    fn from_value(value: &JsonValue) -> Result<Option<Self>> {
        parse_text(value, Self::TYPE_NAME, parse_time)
    }

    fn into_primitive_value(self) -> PrimitiveValue {
        PrimitiveValue::Time(self)
    }
}

impl Primitive for NaiveDate {
    const TYPE_NAME: &'static str = "dateonly";

    fn from_value(value: &JsonValue) -> Result<Option<Self>> {
        parse_text(value, Self::TYPE_NAME, |text| text.parse().ok())
    }

    fn into_primitive_value(self) -> PrimitiveValue {
        PrimitiveValue::DateOnly(self)
    }
}

impl Primitive for NaiveTime {
    const TYPE_NAME: &'static str = "timeonly";

    fn from_value(value: &JsonValue) -> Result<Option<Self>> {
        parse_text(value, Self::TYPE_NAME, |text| text.parse().ok())
    }

    fn into_primitive_value(self) -> PrimitiveValue {
        PrimitiveValue::TimeOnly(self)
    }
}

impl Primitive for IsoDuration {
    const TYPE_NAME: &'static str = "isoduration";

    fn from_value(value: &JsonValue) -> Result<Option<Self>> {
        parse_text(value, Self::TYPE_NAME, |text| text.parse().ok())
    }

    fn into_primitive_value(self) -> PrimitiveValue {
        PrimitiveValue::Duration(self)
    }
}

impl Primitive for Uuid {
    const TYPE_NAME: &'static str = "uuid";

    fn from_value(value: &JsonValue) -> Result<Option<Self>> {
        parse_text(value, Self::TYPE_NAME, |text| Uuid::parse_str(text).ok())
    }

    fn into_primitive_value(self) -> PrimitiveValue {
        PrimitiveValue::Uuid(self)
    }
}

impl Primitive for Vec<u8> {
    const TYPE_NAME: &'static str = "base64";

    fn from_value(value: &JsonValue) -> Result<Option<Self>> {
        parse_text(value, Self::TYPE_NAME, |text| STANDARD.decode(text).ok())
    }

    fn into_primitive_value(self) -> PrimitiveValue {
        PrimitiveValue::Bytes(self)
    }
}

fn collect<T: Primitive>(items: &[JsonValue]) -> Result<Vec<Option<PrimitiveValue>>> {
    items
        .iter()
        .map(|item| Ok(T::from_value(item)?.map(Primitive::into_primitive_value)))
        .collect()
}

/// Decodes every element of an array as the primitive named `type_name`.
pub(crate) fn collect_by_name(
    type_name: &str,
    items: &[JsonValue],
) -> Result<Vec<Option<PrimitiveValue>>> {
    match type_name.to_ascii_lowercase().as_str() {
        "string" => collect::<String>(items),
        "bool" => collect::<bool>(items),
        "uint8" | "byte" => collect::<u8>(items),
        "int8" => collect::<i8>(items),
        "int16" => collect::<i16>(items),
        "int32" => collect::<i32>(items),
        "int64" => collect::<i64>(items),
        "float32" => collect::<f32>(items),
        "float64" => collect::<f64>(items),
        "time" => collect::<DateTime<FixedOffset>>(items),
        "dateonly" => collect::<NaiveDate>(items),
        "timeonly" => collect::<NaiveTime>(items),
        "isoduration" => collect::<IsoDuration>(items),
        "uuid" => collect::<Uuid>(items),
        "base64" => collect::<Vec<u8>>(items),
        _ => Err(Error::UnsupportedCollectionType(type_name.to_string())),
    }
}
