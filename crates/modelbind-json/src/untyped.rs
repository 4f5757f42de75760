//! Untyped nodes: arbitrary JSON carried through a model without a schema.

use indexmap::IndexMap;

use crate::error::Result;
use crate::parsable::{FieldDeserializers, Parsable};
use crate::parse_node::JsonParseNode;
use crate::value::JsonValue;
use crate::writer::JsonSerializationWriter;

/// A JSON value held as-is.
///
/// Decoding always yields [`UntypedNode::Double`] for numbers; `Integer`,
/// `Long` and `Float` exist so model code can state a width when building
/// nodes by hand.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UntypedNode {
    #[default]
    Null,
    Boolean(bool),
    String(String),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Array(Vec<UntypedNode>),
    Object(IndexMap<String, UntypedNode>),
}

impl UntypedNode {
    pub fn create_from_discriminator_value(_node: &JsonParseNode) -> Result<Self> {
        Ok(UntypedNode::Null)
    }

    pub fn from_value(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => UntypedNode::Null,
            JsonValue::Bool(b) => UntypedNode::Boolean(*b),
            JsonValue::Number(n) => UntypedNode::Double(*n),
            JsonValue::String(s) => UntypedNode::String(s.clone()),
            JsonValue::Array(items) => UntypedNode::Array(items.iter().map(Self::from_value).collect()),
            JsonValue::Object(entries) => UntypedNode::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from_value(v)))
                    .collect(),
            ),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, UntypedNode::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            UntypedNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            UntypedNode::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Any numeric variant widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            UntypedNode::Integer(v) => Some((*v).into()),
            UntypedNode::Long(v) => Some(*v as f64),
            UntypedNode::Float(v) => Some((*v).into()),
            UntypedNode::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[UntypedNode]> {
        match self {
            UntypedNode::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, UntypedNode>> {
        match self {
            UntypedNode::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Member `key` of an object node.
    pub fn get(&self, key: &str) -> Option<&UntypedNode> {
        self.as_object().and_then(|entries| entries.get(key))
    }
}

impl Parsable for UntypedNode {
    fn field_deserializers(&mut self) -> FieldDeserializers<'_> {
        FieldDeserializers::new()
    }

    fn serialize(&self, writer: &mut JsonSerializationWriter) -> Result<()> {
        writer.write_untyped_value("", Some(self))
    }

    fn as_untyped(&self) -> Option<&UntypedNode> {
        Some(self)
    }

    fn as_untyped_mut(&mut self) -> Option<&mut UntypedNode> {
        Some(self)
    }
}
