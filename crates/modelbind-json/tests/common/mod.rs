#![allow(dead_code)]

pub mod fixtures;
pub mod models;

use tracing_subscriber::EnvFilter;

/// Routes library events to the test output; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Serialized writer content as text.
pub fn content(writer: &modelbind_json::JsonSerializationWriter) -> String {
    String::from_utf8(writer.serialized_content().unwrap()).unwrap()
}

/// Parses two JSON texts and compares them structurally.
pub fn assert_json_eq(actual: &[u8], expected: &str) {
    let actual: serde_json::Value = serde_json::from_slice(actual).unwrap();
    let expected: serde_json::Value = serde_json::from_str(expected).unwrap();
    assert_eq!(actual, expected);
}
