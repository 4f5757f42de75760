//! JSON codec for generated API client models.
//!
//! # Overview
//!
//! A document is decoded once into a [`JsonValue`] tree and wrapped in a
//! [`JsonParseNode`]. Models implement [`Parsable`]: they hand the node one
//! deserializer per declared property and write themselves back through a
//! [`JsonSerializationWriter`]. Primitive reads go through a strict coercion
//! engine (no string-to-number or number-to-bool guessing), union and
//! intersection models are resolved through [`ComposedTypeWrapper`], and
//! schema-less content travels as [`UntypedNode`].
//!
//! # Example
//!
//! ```
//! use modelbind_json::{from_slice, to_vec, JsonParseNode, UntypedNode};
//!
//! let node = JsonParseNode::new(br#"{"ids":[1,null,3]}"#).unwrap();
//! let ids = node.child_node("ids").unwrap().unwrap();
//! assert_eq!(ids.collection_of::<i32>().unwrap(), Some(vec![Some(1), None, Some(3)]));
//!
//! let doc = from_slice(br#"{"a":[true,"x"]}"#, UntypedNode::create_from_discriminator_value)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(to_vec(Some(&doc)).unwrap(), br#"{"a":[true,"x"]}"#.to_vec());
//! ```

pub mod additional_data;
pub mod coerce;
pub mod duration;
pub mod error;
pub mod helpers;
pub mod parsable;
pub mod parse_node;
pub mod primitive;
pub mod registry;
mod resolve;
pub mod untyped;
pub mod value;
pub mod writer;

pub use additional_data::{AdditionalData, AdditionalValue, Opaque};
pub use coerce::{Number, PrimitiveType};
pub use duration::IsoDuration;
pub use error::{Error, Result};
pub use helpers::{from_slice, to_vec};
pub use parsable::{
    ComposedTypeWrapper, FieldDeserializer, FieldDeserializers, Parsable, ParsableEnum,
    ParsableFactory,
};
pub use parse_node::{AssignHook, JsonParseNode};
pub use primitive::{Primitive, PrimitiveValue};
pub use registry::{
    JsonParseNodeFactory, JsonSerializationWriterFactory, ParseNodeFactory, SerializationRegistry,
    SerializationWriterFactory,
};
pub use untyped::UntypedNode;
pub use value::JsonValue;
pub use writer::{JsonSerializationWriter, SerializationHook, StartObjectHook};
