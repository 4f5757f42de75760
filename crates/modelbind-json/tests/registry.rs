mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use modelbind_json::{
    Error, JsonParseNodeFactory, JsonSerializationWriterFactory, ParseNodeFactory,
    SerializationRegistry, SerializationWriterFactory,
};

use common::content;
use common::models::TestEntity;

#[test]
fn test_factories_report_json_content_type() {
    assert_eq!(JsonParseNodeFactory::new().valid_content_type(), "application/json");
    assert_eq!(
        JsonSerializationWriterFactory::new().valid_content_type(),
        "application/json"
    );
}

#[test]
fn test_parse_node_factory_accepts_json_variants() {
    let factory = JsonParseNodeFactory::new();
    for content_type in [
        "application/json",
        "application/json; charset=utf-8",
        "APPLICATION/JSON",
        "application/vnd.api+json",
    ] {
        let node = factory.parse_node(content_type, br#"{"id":"1"}"#).unwrap();
        let id = node.child_node("id").unwrap().unwrap();
        assert_eq!(id.string_value().unwrap().as_deref(), Some("1"));
    }
}

#[test]
fn test_parse_node_factory_rejects_malformed_content() {
    let err = JsonParseNodeFactory::new()
        .parse_node("application/json", b"{")
        .unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn test_parse_node_factory_hooks_reach_models() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let factory = JsonParseNodeFactory::new().with_on_after_assign_field_values(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    let node = factory
        .parse_node("application/json", br#"[{"id":"1"},{"id":"2"}]"#)
        .unwrap();
    let entities = node
        .collection_of_object_values(TestEntity::create_from_discriminator_value)
        .unwrap()
        .unwrap();
    assert_eq!(entities.len(), 2);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_writer_factory_hooks_reach_writers() {
    let factory = JsonSerializationWriterFactory::new().with_on_start_object_serialization(|_, w| {
        w.write_bool_value("@stamped", Some(true));
        Ok(())
    });
    let mut writer = factory.serialization_writer("application/json").unwrap();
    writer
        .write_object_value("", Some(&TestEntity::default()), &[])
        .unwrap();
    assert_eq!(content(&writer), r#"{"@stamped":true}"#);

    // Every writer from the factory gets the same hooks.
    let mut second = factory.serialization_writer("application/json").unwrap();
    second
        .write_object_value("", Some(&TestEntity::default()), &[])
        .unwrap();
    assert_eq!(content(&second), r#"{"@stamped":true}"#);
}

#[test]
fn test_registry_routes_by_content_type() {
    common::init_tracing();
    let registry = SerializationRegistry::with_json_defaults();
    let node = registry
        .parse_node("application/json; charset=utf-8", b"[1,2]")
        .unwrap();
    assert_eq!(
        node.collection_of::<i32>().unwrap(),
        Some(vec![Some(1), Some(2)])
    );

    let mut writer = registry.serialization_writer("application/json").unwrap();
    writer.write_int32_value("n", Some(1));
    assert_eq!(content(&writer), r#""n":1"#);
}

#[test]
fn test_registry_unknown_content_type() {
    let registry = SerializationRegistry::with_json_defaults();
    let err = registry.parse_node("application/xml", b"<a/>").unwrap_err();
    assert!(matches!(err, Error::UnregisteredContentType(ref ct) if ct == "application/xml"));
    assert!(registry.serialization_writer("text/plain").is_err());

    let empty = SerializationRegistry::new();
    assert!(matches!(
        empty.parse_node("application/json", b"{}"),
        Err(Error::UnregisteredContentType(_))
    ));
}

#[test]
fn test_registry_replaces_factories() {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let mut registry = SerializationRegistry::with_json_defaults();
    registry.register_parse_node_factory(Arc::new(
        JsonParseNodeFactory::new().with_on_before_assign_field_values(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }),
    ));
    registry
        .parse_node("application/json", br#"{"id":"1"}"#)
        .unwrap()
        .object_value(TestEntity::create_from_discriminator_value)
        .unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);
}
