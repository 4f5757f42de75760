//! [`JsonParseNode`]: navigation over a decoded document.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use tracing::trace;
use uuid::Uuid;

use crate::additional_data::AdditionalValue;
use crate::coerce::coerce_string;
use crate::duration::IsoDuration;
use crate::error::{Error, Result};
use crate::parsable::{Parsable, ParsableEnum, ParsableFactory};
use crate::primitive::{collect_by_name, Primitive, PrimitiveValue};
use crate::resolve;
use crate::value::JsonValue;

/// Callback run around the field binding of a materialised model.
pub type AssignHook = Arc<dyn Fn(&dyn Parsable) -> Result<()> + Send + Sync>;

/// One position in a decoded JSON document.
///
/// Every getter returns `Ok(None)` for `null`, so an absent property and an
/// explicit `null` read the same way. Child nodes inherit the assignment
/// hooks of their parent.
#[derive(Clone, Default)]
pub struct JsonParseNode {
    value: JsonValue,
    on_before_assign: Option<AssignHook>,
    on_after_assign: Option<AssignHook>,
}

impl fmt::Debug for JsonParseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonParseNode")
            .field("value", &self.value)
            .field("on_before_assign", &self.on_before_assign.is_some())
            .field("on_after_assign", &self.on_after_assign.is_some())
            .finish()
    }
}

impl JsonParseNode {
    /// Decodes `content` and wraps the root value.
    pub fn new(content: &[u8]) -> Result<Self> {
        Ok(Self::from_value(JsonValue::from_slice(content)?))
    }

    pub fn from_value(value: JsonValue) -> Self {
        Self {
            value,
            on_before_assign: None,
            on_after_assign: None,
        }
    }

    /// A node for `value` carrying this node's hooks.
    pub(crate) fn child(&self, value: JsonValue) -> Self {
        Self {
            value,
            on_before_assign: self.on_before_assign.clone(),
            on_after_assign: self.on_after_assign.clone(),
        }
    }

    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    pub fn into_value(self) -> JsonValue {
        self.value
    }

    pub fn is_null(&self) -> bool {
        self.value.is_null()
    }

    pub fn with_on_before_assign_field_values(
        mut self,
        hook: impl Fn(&dyn Parsable) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.on_before_assign = Some(Arc::new(hook));
        self
    }

    pub fn with_on_after_assign_field_values(
        mut self,
        hook: impl Fn(&dyn Parsable) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.on_after_assign = Some(Arc::new(hook));
        self
    }

    pub(crate) fn with_assign_hooks(
        mut self,
        on_before: Option<AssignHook>,
        on_after: Option<AssignHook>,
    ) -> Self {
        self.on_before_assign = on_before;
        self.on_after_assign = on_after;
        self
    }

    pub(crate) fn on_before_assign(&self) -> Option<&AssignHook> {
        self.on_before_assign.as_ref()
    }

    pub(crate) fn on_after_assign(&self) -> Option<&AssignHook> {
        self.on_after_assign.as_ref()
    }

    /// The property `name` of an object node.
    ///
    /// A missing key and a `null` node both yield `Ok(None)`; a present
    /// `null` member yields a node wrapping `null`.
    pub fn child_node(&self, name: &str) -> Result<Option<JsonParseNode>> {
        match &self.value {
            JsonValue::Null => Ok(None),
            JsonValue::Object(entries) => Ok(entries.get(name).map(|v| self.child(v.clone()))),
            JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_) | JsonValue::Array(_) => {
                Err(Error::NotAnObject)
            }
        }
    }

    /// The string value of `property`, if this node is an object holding one.
    /// Factories use it to pick a concrete model (`@odata.type`).
    pub fn discriminator_value(&self, property: &str) -> Option<String> {
        match &self.value {
            JsonValue::Object(entries) => match entries.get(property) {
                Some(JsonValue::String(s)) => Some(s.clone()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Narrows this node into any [`Primitive`].
    pub fn primitive_value<T: Primitive>(&self) -> Result<Option<T>> {
        T::from_value(&self.value)
    }

    pub fn string_value(&self) -> Result<Option<String>> {
        self.primitive_value()
    }

    pub fn bool_value(&self) -> Result<Option<bool>> {
        self.primitive_value()
    }

    pub fn byte_value(&self) -> Result<Option<u8>> {
        self.primitive_value()
    }

    pub fn int8_value(&self) -> Result<Option<i8>> {
        self.primitive_value()
    }

    pub fn int16_value(&self) -> Result<Option<i16>> {
        self.primitive_value()
    }

    pub fn int32_value(&self) -> Result<Option<i32>> {
        self.primitive_value()
    }

    pub fn int64_value(&self) -> Result<Option<i64>> {
        self.primitive_value()
    }

    pub fn float32_value(&self) -> Result<Option<f32>> {
        self.primitive_value()
    }

    pub fn float64_value(&self) -> Result<Option<f64>> {
        self.primitive_value()
    }

    /// An RFC 3339 timestamp. Text without an offset is read as UTC.
    pub fn time_value(&self) -> Result<Option<DateTime<FixedOffset>>> {
        self.primitive_value()
    }

    pub fn date_only_value(&self) -> Result<Option<NaiveDate>> {
        self.primitive_value()
    }

    pub fn time_only_value(&self) -> Result<Option<NaiveTime>> {
        self.primitive_value()
    }

    pub fn iso_duration_value(&self) -> Result<Option<IsoDuration>> {
        self.primitive_value()
    }

    pub fn uuid_value(&self) -> Result<Option<Uuid>> {
        self.primitive_value()
    }

    /// Standard base64 text decoded to bytes.
    pub fn byte_array_value(&self) -> Result<Option<Vec<u8>>> {
        self.primitive_value()
    }

    /// The node as loosely typed data. Numbers come back as `Float64`.
    pub fn raw_value(&self) -> Option<AdditionalValue> {
        AdditionalValue::from_value(&self.value)
    }

    /// The enum member named by a string node. Unknown symbols are absent.
    pub fn enum_value<E: ParsableEnum>(&self) -> Result<Option<E>> {
        let Some(symbol) = coerce_string(&self.value)? else {
            return Ok(None);
        };
        let value = E::from_symbol(&symbol);
        if value.is_none() {
            trace!(%symbol, "unknown enum symbol");
        }
        Ok(value)
    }

    pub fn collection_of_enum_values<E: ParsableEnum>(&self) -> Result<Option<Vec<Option<E>>>> {
        let Some(items) = self.items()? else {
            return Ok(None);
        };
        items
            .iter()
            .map(|item| self.child(item.clone()).enum_value())
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Decodes an array by primitive type name (`"int32"`, `"uuid"`, ...).
    /// `null` elements stay in place as `None`.
    pub fn collection_of_primitive_values(
        &self,
        type_name: &str,
    ) -> Result<Option<Vec<Option<PrimitiveValue>>>> {
        let Some(items) = self.items()? else {
            return Ok(None);
        };
        collect_by_name(type_name, items).map(Some)
    }

    pub fn collection_of<T: Primitive>(&self) -> Result<Option<Vec<Option<T>>>> {
        let Some(items) = self.items()? else {
            return Ok(None);
        };
        items
            .iter()
            .map(T::from_value)
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    pub fn collection_of_object_values<T: Parsable>(
        &self,
        factory: ParsableFactory<T>,
    ) -> Result<Option<Vec<Option<T>>>> {
        let Some(items) = self.items()? else {
            return Ok(None);
        };
        items
            .iter()
            .map(|item| self.child(item.clone()).object_value(factory))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Materialises a model: the factory creates it, then the resolver binds
    /// this node into it.
    pub fn object_value<T: Parsable>(&self, factory: ParsableFactory<T>) -> Result<Option<T>> {
        if self.is_null() {
            return Ok(None);
        }
        let mut model = factory(self)?;
        resolve::assign(self, &mut model)?;
        Ok(Some(model))
    }

    fn items(&self) -> Result<Option<&[JsonValue]>> {
        match &self.value {
            JsonValue::Null => Ok(None),
            JsonValue::Array(items) => Ok(Some(items)),
            JsonValue::Bool(_) | JsonValue::Number(_) | JsonValue::String(_) | JsonValue::Object(_) => {
                Err(Error::NotAnArray)
            }
        }
    }
}
