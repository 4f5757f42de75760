//! Content-type keyed factories for parse nodes and writers.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::parsable::Parsable;
use crate::parse_node::{AssignHook, JsonParseNode};
use crate::writer::{JsonSerializationWriter, SerializationHook, StartObjectHook};

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Normalises a content type for lookup: parameters after `;` are dropped,
/// vendor prefixes (`vnd.github+`) are stripped, and the result is lowercase.
///
/// ```
/// use modelbind_json::registry::clean_content_type;
///
/// assert_eq!(clean_content_type("application/vnd.github+json; charset=utf-8"), "application/json");
/// ```
pub fn clean_content_type(content_type: &str) -> String {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.split_once('/') {
        Some((kind, subtype)) => match subtype.rsplit_once('+') {
            Some((_, suffix)) => format!("{kind}/{suffix}"),
            None => essence,
        },
        None => essence,
    }
}

fn check_content_type(expected: &'static str, actual: &str) -> Result<()> {
    if clean_content_type(actual) == expected {
        Ok(())
    } else {
        Err(Error::ContentType {
            expected,
            actual: actual.to_string(),
        })
    }
}

pub trait ParseNodeFactory: Send + Sync {
    fn valid_content_type(&self) -> &'static str;

    fn parse_node(&self, content_type: &str, content: &[u8]) -> Result<JsonParseNode>;
}

pub trait SerializationWriterFactory: Send + Sync {
    fn valid_content_type(&self) -> &'static str;

    fn serialization_writer(&self, content_type: &str) -> Result<JsonSerializationWriter>;
}

/// Builds [`JsonParseNode`]s, stamping the configured assignment hooks on
/// every root node.
#[derive(Clone, Default)]
pub struct JsonParseNodeFactory {
    on_before_assign: Option<AssignHook>,
    on_after_assign: Option<AssignHook>,
}

impl JsonParseNodeFactory {
    pub fn new() -> Self {
        Self::default()
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
}

impl fmt::Debug for JsonParseNodeFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonParseNodeFactory").finish_non_exhaustive()
    }
}

impl ParseNodeFactory for JsonParseNodeFactory {
    fn valid_content_type(&self) -> &'static str {
        JSON_CONTENT_TYPE
    }

    fn parse_node(&self, content_type: &str, content: &[u8]) -> Result<JsonParseNode> {
        check_content_type(JSON_CONTENT_TYPE, content_type)?;
        let node = JsonParseNode::new(content)?;
        Ok(node.with_assign_hooks(self.on_before_assign.clone(), self.on_after_assign.clone()))
    }
}

/// Builds [`JsonSerializationWriter`]s sharing one set of hooks.
#[derive(Clone, Default)]
pub struct JsonSerializationWriterFactory {
    on_before: Option<SerializationHook>,
    on_start: Option<StartObjectHook>,
    on_after: Option<SerializationHook>,
}

impl JsonSerializationWriterFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_before_serialization(
        mut self,
        hook: impl Fn(&dyn Parsable) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.on_before = Some(Arc::new(hook));
        self
    }

    pub fn with_on_start_object_serialization(
        mut self,
        hook: impl Fn(&dyn Parsable, &mut JsonSerializationWriter) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.on_start = Some(Arc::new(hook));
        self
    }

    pub fn with_on_after_object_serialization(
        mut self,
        hook: impl Fn(&dyn Parsable) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        self.on_after = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for JsonSerializationWriterFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSerializationWriterFactory").finish_non_exhaustive()
    }
}

impl SerializationWriterFactory for JsonSerializationWriterFactory {
    fn valid_content_type(&self) -> &'static str {
        JSON_CONTENT_TYPE
    }

    fn serialization_writer(&self, content_type: &str) -> Result<JsonSerializationWriter> {
        check_content_type(JSON_CONTENT_TYPE, content_type)?;
        let mut writer = JsonSerializationWriter::new();
        writer.set_hooks(self.on_before.clone(), self.on_start.clone(), self.on_after.clone());
        Ok(writer)
    }
}

/// Factories keyed by cleaned content type.
///
/// Built and owned by the caller; nothing is registered globally.
#[derive(Clone, Default)]
pub struct SerializationRegistry {
    parse_node_factories: HashMap<String, Arc<dyn ParseNodeFactory>>,
    writer_factories: HashMap<String, Arc<dyn SerializationWriterFactory>>,
}

impl fmt::Debug for SerializationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializationRegistry")
            .field("parse_node_factories", &self.parse_node_factories.keys())
            .field("writer_factories", &self.writer_factories.keys())
            .finish()
    }
}

impl SerializationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the JSON factories registered for `application/json`.
    pub fn with_json_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_parse_node_factory(Arc::new(JsonParseNodeFactory::new()));
        registry.register_serialization_writer_factory(Arc::new(JsonSerializationWriterFactory::new()));
        registry
    }

    /// Registers `factory` under its content type, replacing any previous one.
    pub fn register_parse_node_factory(&mut self, factory: Arc<dyn ParseNodeFactory>) {
        let content_type = clean_content_type(factory.valid_content_type());
        debug!(%content_type, "registered parse node factory");
        self.parse_node_factories.insert(content_type, factory);
    }

    pub fn register_serialization_writer_factory(&mut self, factory: Arc<dyn SerializationWriterFactory>) {
        let content_type = clean_content_type(factory.valid_content_type());
        debug!(%content_type, "registered serialization writer factory");
        self.writer_factories.insert(content_type, factory);
    }

    pub fn parse_node(&self, content_type: &str, content: &[u8]) -> Result<JsonParseNode> {
        let cleaned = clean_content_type(content_type);
        let factory = self
            .parse_node_factories
            .get(&cleaned)
            .ok_or_else(|| Error::UnregisteredContentType(content_type.to_string()))?;
        factory.parse_node(&cleaned, content)
    }

    pub fn serialization_writer(&self, content_type: &str) -> Result<JsonSerializationWriter> {
        let cleaned = clean_content_type(content_type);
        let factory = self
            .writer_factories
            .get(&cleaned)
            .ok_or_else(|| Error::UnregisteredContentType(content_type.to_string()))?;
        factory.serialization_writer(&cleaned)
    }
}
