//! [`JsonSerializationWriter`]: compact JSON text output.
//!
//! Every write takes a key; `""` writes a bare value (array elements, the
//! document root) and an absent value writes nothing at all. Separators are
//! tracked with a single pending flag: set after each complete value,
//! cleared by an opening bracket or a key.

use std::fmt;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, SecondsFormat};
use modelbind_util::{format_f32, format_f64, quote};
use uuid::Uuid;

use crate::additional_data::{AdditionalData, AdditionalValue};
use crate::duration::IsoDuration;
use crate::error::{Error, Result};
use crate::parsable::{Parsable, ParsableEnum};
use crate::primitive::{Primitive, PrimitiveValue};
use crate::untyped::UntypedNode;

/// Callback run before or after a model is written.
pub type SerializationHook = Arc<dyn Fn(&dyn Parsable) -> Result<()> + Send + Sync>;

/// Callback run once the opening brace of a model is written. It may write
/// extra properties.
pub type StartObjectHook =
    Arc<dyn Fn(&dyn Parsable, &mut JsonSerializationWriter) -> Result<()> + Send + Sync>;

const USE_AFTER_CLOSE: &str = "JsonSerializationWriter used after close()";

pub struct JsonSerializationWriter {
    /// `None` once closed.
    buffer: Option<String>,
    separator_pending: bool,
    on_before: Option<SerializationHook>,
    on_start: Option<StartObjectHook>,
    on_after: Option<SerializationHook>,
}

impl Default for JsonSerializationWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for JsonSerializationWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSerializationWriter")
            .field("buffer", &self.buffer)
            .field("separator_pending", &self.separator_pending)
            .finish_non_exhaustive()
    }
}

impl JsonSerializationWriter {
    pub fn new() -> Self {
        Self {
            buffer: Some(String::new()),
            separator_pending: false,
            on_before: None,
            on_start: None,
            on_after: None,
        }
    }

    pub fn set_on_before_serialization(
        &mut self,
        hook: impl Fn(&dyn Parsable) -> Result<()> + Send + Sync + 'static,
    ) {
        self.on_before = Some(Arc::new(hook));
    }

    pub fn set_on_start_object_serialization(
        &mut self,
        hook: impl Fn(&dyn Parsable, &mut JsonSerializationWriter) -> Result<()> + Send + Sync + 'static,
    ) {
        self.on_start = Some(Arc::new(hook));
    }

    pub fn set_on_after_object_serialization(
        &mut self,
        hook: impl Fn(&dyn Parsable) -> Result<()> + Send + Sync + 'static,
    ) {
        self.on_after = Some(Arc::new(hook));
    }

    pub(crate) fn set_hooks(
        &mut self,
        on_before: Option<SerializationHook>,
        on_start: Option<StartObjectHook>,
        on_after: Option<SerializationHook>,
    ) {
        self.on_before = on_before;
        self.on_start = on_start;
        self.on_after = on_after;
    }

    fn ensure_open(&self) {
        if self.buffer.is_none() {
            panic!("{USE_AFTER_CLOSE}");
        }
    }

    fn buf(&mut self) -> &mut String {
        match self.buffer.as_mut() {
            Some(buffer) => buffer,
            None => panic!("{USE_AFTER_CLOSE}"),
        }
    }

    /// Writes the pending separator and the key, if any.
    fn begin_value(&mut self, key: &str) {
        let pending = std::mem::replace(&mut self.separator_pending, false);
        let buf = self.buf();
        if pending {
            buf.push(',');
        }
        if !key.is_empty() {
            buf.push_str(&quote(key));
            buf.push(':');
        }
    }

    fn write_token(&mut self, key: &str, token: &str) {
        self.begin_value(key);
        self.buf().push_str(token);
        self.separator_pending = true;
    }

    fn open(&mut self, key: &str, bracket: char) {
        self.begin_value(key);
        self.buf().push(bracket);
    }

    fn close_bracket(&mut self, bracket: char) {
        self.buf().push(bracket);
        self.separator_pending = true;
    }

    pub fn write_string_value(&mut self, key: &str, value: Option<&str>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &quote(value));
        }
    }

    pub fn write_bool_value(&mut self, key: &str, value: Option<bool>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, if value { "true" } else { "false" });
        }
    }

    pub fn write_byte_value(&mut self, key: &str, value: Option<u8>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &value.to_string());
        }
    }

    pub fn write_int8_value(&mut self, key: &str, value: Option<i8>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &value.to_string());
        }
    }

    pub fn write_int16_value(&mut self, key: &str, value: Option<i16>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &value.to_string());
        }
    }

    pub fn write_int32_value(&mut self, key: &str, value: Option<i32>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &value.to_string());
        }
    }

    pub fn write_int64_value(&mut self, key: &str, value: Option<i64>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &value.to_string());
        }
    }

    pub fn write_float32_value(&mut self, key: &str, value: Option<f32>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &format_f32(value));
        }
    }

    pub fn write_float64_value(&mut self, key: &str, value: Option<f64>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &format_f64(value));
        }
    }

    pub fn write_uuid_value(&mut self, key: &str, value: Option<Uuid>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &quote(&value.to_string()));
        }
    }

    /// RFC 3339 with whole seconds; a zero offset is written as `Z`.
    pub fn write_time_value(&mut self, key: &str, value: Option<DateTime<FixedOffset>>) {
        self.ensure_open();
        if let Some(value) = value {
            let text = value.to_rfc3339_opts(SecondsFormat::Secs, true);
            self.write_token(key, &quote(&text));
        }
    }

    pub fn write_date_only_value(&mut self, key: &str, value: Option<NaiveDate>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &quote(&value.format("%Y-%m-%d").to_string()));
        }
    }

    pub fn write_time_only_value(&mut self, key: &str, value: Option<NaiveTime>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &quote(&value.to_string()));
        }
    }

    pub fn write_iso_duration_value(&mut self, key: &str, value: Option<IsoDuration>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &quote(&value.to_string()));
        }
    }

    /// Standard base64 with padding.
    pub fn write_byte_array_value(&mut self, key: &str, value: Option<&[u8]>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &quote(&STANDARD.encode(value)));
        }
    }

    pub fn write_enum_value<E: ParsableEnum>(&mut self, key: &str, value: Option<&E>) {
        self.ensure_open();
        if let Some(value) = value {
            self.write_token(key, &quote(value.symbol()));
        }
    }

    pub fn write_null_value(&mut self, key: &str) {
        self.ensure_open();
        self.write_token(key, "null");
    }

    pub fn write_primitive_value(&mut self, key: &str, value: Option<&PrimitiveValue>) {
        self.ensure_open();
        let Some(value) = value else {
            return;
        };
        match value {
            PrimitiveValue::Bool(v) => self.write_bool_value(key, Some(*v)),
            PrimitiveValue::String(v) => self.write_string_value(key, Some(v)),
            PrimitiveValue::Uint8(v) => self.write_byte_value(key, Some(*v)),
            PrimitiveValue::Int8(v) => self.write_int8_value(key, Some(*v)),
            PrimitiveValue::Int16(v) => self.write_int16_value(key, Some(*v)),
            PrimitiveValue::Int32(v) => self.write_int32_value(key, Some(*v)),
            PrimitiveValue::Int64(v) => self.write_int64_value(key, Some(*v)),
            PrimitiveValue::Float32(v) => self.write_float32_value(key, Some(*v)),
            PrimitiveValue::Float64(v) => self.write_float64_value(key, Some(*v)),
            PrimitiveValue::Time(v) => self.write_time_value(key, Some(*v)),
            PrimitiveValue::DateOnly(v) => self.write_date_only_value(key, Some(*v)),
            PrimitiveValue::TimeOnly(v) => self.write_time_only_value(key, Some(*v)),
            PrimitiveValue::Duration(v) => self.write_iso_duration_value(key, Some(*v)),
            PrimitiveValue::Uuid(v) => self.write_uuid_value(key, Some(*v)),
            PrimitiveValue::Bytes(v) => self.write_byte_array_value(key, Some(v)),
        }
    }

    /// Writes a model as an object.
    ///
    /// `additional_values_to_merge` are written into the same object after
    /// `value`, each with its own hooks. Composed models get no braces of
    /// their own; their `serialize` writes whichever candidate is set.
    pub fn write_object_value<T: Parsable>(
        &mut self,
        key: &str,
        value: Option<&T>,
        additional_values_to_merge: &[&dyn Parsable],
    ) -> Result<()> {
        self.write_dyn_object_value(key, value.map(|v| v as &dyn Parsable), additional_values_to_merge)
    }

    pub fn write_dyn_object_value(
        &mut self,
        key: &str,
        value: Option<&dyn Parsable>,
        additional_values_to_merge: &[&dyn Parsable],
    ) -> Result<()> {
        self.ensure_open();
        if value.is_none() && additional_values_to_merge.is_empty() {
            return Ok(());
        }
        if let Some(untyped) = value.and_then(|v| v.as_untyped()) {
            return self.write_untyped_value(key, Some(untyped));
        }
        let composed = value.is_some_and(|v| v.is_composed_type());

        if let (Some(value), Some(hook)) = (value, self.on_before.clone()) {
            hook(value)?;
        }
        let rollback = (self.buf().len(), self.separator_pending);
        let body_start = if composed {
            self.begin_value(key);
            self.buf().len()
        } else {
            self.open(key, '{');
            0
        };
        if let Some(value) = value {
            self.serialize_body(value)?;
        }
        for merged in additional_values_to_merge {
            if let Some(hook) = self.on_before.clone() {
                hook(*merged)?;
            }
            self.serialize_body(*merged)?;
            if let Some(hook) = self.on_after.clone() {
                hook(*merged)?;
            }
        }
        if composed {
            if self.buf().len() == body_start {
                // Nothing was set on the composed value; drop the key too.
                let (len, pending) = rollback;
                self.buf().truncate(len);
                self.separator_pending = pending;
            } else {
                self.separator_pending = true;
            }
        } else {
            self.close_bracket('}');
        }
        if let (Some(value), Some(hook)) = (value, self.on_after.clone()) {
            hook(value)?;
        }
        Ok(())
    }

    fn serialize_body(&mut self, value: &dyn Parsable) -> Result<()> {
        if let Some(hook) = self.on_start.clone() {
            hook(value, self)?;
        }
        value.serialize(self)
    }

    /// An empty slice writes `[]`.
    pub fn write_collection_of_primitive_values<T: Primitive>(&mut self, key: &str, values: Option<&[T]>) {
        self.ensure_open();
        let Some(values) = values else {
            return;
        };
        self.open(key, '[');
        for value in values {
            self.write_primitive_value("", Some(&value.clone().into_primitive_value()));
        }
        self.close_bracket(']');
    }

    /// Absent elements are written as `null`.
    pub fn write_collection_of_object_values<T: Parsable>(
        &mut self,
        key: &str,
        values: Option<&[Option<T>]>,
    ) -> Result<()> {
        self.ensure_open();
        let Some(values) = values else {
            return Ok(());
        };
        self.open(key, '[');
        for value in values {
            match value {
                Some(value) => self.write_object_value("", Some(value), &[])?,
                None => self.write_null_value(""),
            }
        }
        self.close_bracket(']');
        Ok(())
    }

    pub fn write_collection_of_enum_values<E: ParsableEnum>(&mut self, key: &str, values: Option<&[Option<E>]>) {
        self.ensure_open();
        let Some(values) = values else {
            return;
        };
        self.open(key, '[');
        for value in values {
            match value {
                Some(value) => self.write_enum_value("", Some(value)),
                None => self.write_null_value(""),
            }
        }
        self.close_bracket(']');
    }

    /// Writes every entry as a property of the enclosing object.
    ///
    /// The whole map is checked first, so an unsupported value fails before
    /// anything is written.
    pub fn write_additional_data(&mut self, data: Option<&AdditionalData>) -> Result<()> {
        self.ensure_open();
        let Some(data) = data else {
            return Ok(());
        };
        for (key, value) in data {
            check_additional_value(key, value)?;
        }
        for (key, value) in data {
            self.write_additional_value(key, value)?;
        }
        Ok(())
    }

    fn write_additional_value(&mut self, key: &str, value: &AdditionalValue) -> Result<()> {
        match value {
            AdditionalValue::Null => self.write_null_value(key),
            AdditionalValue::String(v) => self.write_string_value(key, Some(v)),
            AdditionalValue::Bool(v) => self.write_bool_value(key, Some(*v)),
            AdditionalValue::Uint8(v) => self.write_byte_value(key, Some(*v)),
            AdditionalValue::Int8(v) => self.write_int8_value(key, Some(*v)),
            AdditionalValue::Int16(v) => self.write_int16_value(key, Some(*v)),
            AdditionalValue::Int32(v) => self.write_int32_value(key, Some(*v)),
            AdditionalValue::Int64(v) => self.write_int64_value(key, Some(*v)),
            AdditionalValue::Float32(v) => self.write_float32_value(key, Some(*v)),
            AdditionalValue::Float64(v) => self.write_float64_value(key, Some(*v)),
            AdditionalValue::Bytes(v) => self.write_byte_array_value(key, Some(v)),
            AdditionalValue::Time(v) => self.write_time_value(key, Some(*v)),
            AdditionalValue::Uuid(v) => self.write_uuid_value(key, Some(*v)),
            AdditionalValue::Map(entries) => {
                self.open(key, '{');
                for (k, v) in entries {
                    self.write_additional_value(k, v)?;
                }
                self.close_bracket('}');
            }
            AdditionalValue::List(items) => {
                self.open(key, '[');
                for item in items {
                    self.write_additional_value("", item)?;
                }
                self.close_bracket(']');
            }
            AdditionalValue::Parsable(model) => {
                let model: &dyn Parsable = &**model;
                self.write_dyn_object_value(key, Some(model), &[])?;
            }
            AdditionalValue::Untyped(node) => self.write_untyped_value(key, Some(node))?,
            AdditionalValue::Opaque(opaque) => {
                return Err(Error::UnsupportedAdditionalDataType {
                    key: key.to_string(),
                    type_name: opaque.type_name,
                })
            }
        }
        Ok(())
    }

    pub fn write_untyped_value(&mut self, key: &str, value: Option<&UntypedNode>) -> Result<()> {
        self.ensure_open();
        let Some(value) = value else {
            return Ok(());
        };
        match value {
            UntypedNode::Null => self.write_null_value(key),
            UntypedNode::Boolean(v) => self.write_bool_value(key, Some(*v)),
            UntypedNode::String(v) => self.write_string_value(key, Some(v)),
            UntypedNode::Integer(v) => self.write_int32_value(key, Some(*v)),
            UntypedNode::Long(v) => self.write_int64_value(key, Some(*v)),
            UntypedNode::Float(v) => self.write_float32_value(key, Some(*v)),
            UntypedNode::Double(v) => self.write_float64_value(key, Some(*v)),
            UntypedNode::Array(items) => {
                self.open(key, '[');
                for item in items {
                    self.write_untyped_value("", Some(item))?;
                }
                self.close_bracket(']');
            }
            UntypedNode::Object(entries) => {
                self.open(key, '{');
                for (k, v) in entries {
                    self.write_untyped_value(k, Some(v))?;
                }
                self.close_bracket('}');
            }
        }
        Ok(())
    }

    /// The bytes written since creation or the last [`reset`](Self::reset).
    pub fn serialized_content(&self) -> Result<Vec<u8>> {
        match &self.buffer {
            Some(buffer) => Ok(buffer.as_bytes().to_vec()),
            None => panic!("{USE_AFTER_CLOSE}"),
        }
    }

    pub fn reset(&mut self) {
        self.buf().clear();
        self.separator_pending = false;
    }

    /// Releases the buffer. Safe to call more than once.
    pub fn close(&mut self) {
        self.buffer = None;
        self.separator_pending = false;
    }
}

fn check_additional_value(key: &str, value: &AdditionalValue) -> Result<()> {
    match value {
        AdditionalValue::Opaque(opaque) => Err(Error::UnsupportedAdditionalDataType {
            key: key.to_string(),
            type_name: opaque.type_name,
        }),
        AdditionalValue::Map(entries) => entries
            .iter()
            .try_for_each(|(k, v)| check_additional_value(k, v)),
        AdditionalValue::List(items) => items
            .iter()
            .try_for_each(|item| check_additional_value(key, item)),
        _ => Ok(()),
    }
}
