//! One-shot decode / encode of a single model.

use crate::error::Result;
use crate::parsable::{Parsable, ParsableFactory};
use crate::parse_node::JsonParseNode;
use crate::writer::JsonSerializationWriter;

/// Decodes `content` into a model. A `null` document yields `Ok(None)`.
pub fn from_slice<T: Parsable>(content: &[u8], factory: ParsableFactory<T>) -> Result<Option<T>> {
    JsonParseNode::new(content)?.object_value(factory)
}

/// Encodes `model` as a JSON document; `None` encodes as `null`.
pub fn to_vec<T: Parsable>(model: Option<&T>) -> Result<Vec<u8>> {
    let Some(model) = model else {
        return Ok(b"null".to_vec());
    };
    let mut writer = JsonSerializationWriter::new();
    writer.write_object_value("", Some(model), &[])?;
    let content = writer.serialized_content()?;
    writer.close();
    Ok(content)
}
