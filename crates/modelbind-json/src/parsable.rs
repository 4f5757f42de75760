//! The contract generated models implement.
//!
//! A model hands the parse node one deserializer closure per declared
//! property and writes itself through [`JsonSerializationWriter`]. Composed
//! (union / intersection) models additionally expose their candidate set via
//! [`ComposedTypeWrapper`].

use indexmap::IndexMap;

use crate::additional_data::AdditionalData;
use crate::error::Result;
use crate::parse_node::JsonParseNode;
use crate::untyped::UntypedNode;
use crate::writer::JsonSerializationWriter;

/// Binds one property value into the model it was created from.
pub type FieldDeserializer<'a> = Box<dyn FnMut(&JsonParseNode) -> Result<()> + 'a>;

/// Declared properties, keyed by wire name.
pub type FieldDeserializers<'a> = IndexMap<&'static str, FieldDeserializer<'a>>;

/// Creates an empty model for a node, typically by inspecting a
/// discriminator property.
pub type ParsableFactory<T> = fn(&JsonParseNode) -> Result<T>;

/// A model that can be read from a parse node and written to a writer.
pub trait Parsable {
    /// Deserializers for the declared properties. Each closure borrows the
    /// field it assigns.
    fn field_deserializers(&mut self) -> FieldDeserializers<'_>;

    /// Writes the declared properties. The enclosing braces are written by
    /// the caller.
    fn serialize(&self, writer: &mut JsonSerializationWriter) -> Result<()>;

    fn additional_data(&self) -> Option<&AdditionalData> {
        None
    }

    /// Holder for undeclared properties met while binding.
    fn additional_data_mut(&mut self) -> Option<&mut AdditionalData> {
        None
    }

    fn composed_type_mut(&mut self) -> Option<&mut dyn ComposedTypeWrapper> {
        None
    }

    /// Composed models are written without braces of their own.
    fn is_composed_type(&self) -> bool {
        false
    }

    fn as_untyped(&self) -> Option<&UntypedNode> {
        None
    }

    fn as_untyped_mut(&mut self) -> Option<&mut UntypedNode> {
        None
    }
}

impl<T: Parsable + ?Sized> Parsable for Box<T> {
    fn field_deserializers(&mut self) -> FieldDeserializers<'_> {
        (**self).field_deserializers()
    }

    fn serialize(&self, writer: &mut JsonSerializationWriter) -> Result<()> {
        (**self).serialize(writer)
    }

    fn additional_data(&self) -> Option<&AdditionalData> {
        (**self).additional_data()
    }

    fn additional_data_mut(&mut self) -> Option<&mut AdditionalData> {
        (**self).additional_data_mut()
    }

    fn composed_type_mut(&mut self) -> Option<&mut dyn ComposedTypeWrapper> {
        (**self).composed_type_mut()
    }

    fn is_composed_type(&self) -> bool {
        (**self).is_composed_type()
    }

    fn as_untyped(&self) -> Option<&UntypedNode> {
        (**self).as_untyped()
    }

    fn as_untyped_mut(&mut self) -> Option<&mut UntypedNode> {
        (**self).as_untyped_mut()
    }
}

/// The candidate set of a union or intersection model.
///
/// Every hook is optional; the resolver tries them in order (string slot,
/// collection slot, discriminator, object candidates) and stops at the first
/// that applies.
pub trait ComposedTypeWrapper {
    /// Slot filled when the payload is a bare string.
    fn string_slot(&mut self) -> Option<&mut Option<String>> {
        None
    }

    /// Fills the collection slot from an array payload. Returns `false` when
    /// the wrapper has no such slot.
    fn bind_collection(&mut self, _node: &JsonParseNode) -> Result<bool> {
        Ok(false)
    }

    /// Property whose value selects a single candidate (unions).
    fn discriminator_property(&self) -> Option<&'static str> {
        None
    }

    /// The candidate matching `discriminator`, emptied and ready to bind.
    fn select_candidate(&mut self, _discriminator: &str) -> Option<&mut dyn Parsable> {
        None
    }

    /// Candidates that each receive the properties they declare, in
    /// declaration order (intersections).
    fn object_candidates(&mut self) -> Vec<&mut dyn Parsable> {
        Vec::new()
    }
}

/// An enumeration carried as its wire symbol.
pub trait ParsableEnum: Sized {
    fn from_symbol(symbol: &str) -> Option<Self>;

    fn symbol(&self) -> &'static str;
}
