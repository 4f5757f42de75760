mod common;

use modelbind_json::{from_slice, to_vec, Error};

use common::assert_json_eq;
use common::models::{IntersectionTypeMock, TestEntity};

const SOURCE: &str = r#"{"displayName":"McGill","officeLocation":"Montreal", "id": "opaque"}"#;

#[test]
fn test_from_slice() {
    let result = from_slice(
        SOURCE.as_bytes(),
        IntersectionTypeMock::create_from_discriminator_value,
    )
    .unwrap()
    .unwrap();
    assert!(result.string_value.is_none());
    assert!(result.composed_type3.is_none());
    assert_eq!(
        result.composed_type2.unwrap().display_name.as_deref(),
        Some("McGill")
    );
    assert_eq!(result.composed_type1.unwrap().id.as_deref(), Some("opaque"));
}

#[test]
fn test_from_slice_null_document() {
    let result = from_slice(b"null", IntersectionTypeMock::create_from_discriminator_value).unwrap();
    assert!(result.is_none());
}

#[test]
fn test_from_slice_malformed_document() {
    let err = from_slice(b"}", IntersectionTypeMock::create_from_discriminator_value).unwrap_err();
    assert!(matches!(err, Error::Decode(_)));
}

#[test]
fn test_to_vec_round_trip() {
    let result = from_slice(
        SOURCE.as_bytes(),
        IntersectionTypeMock::create_from_discriminator_value,
    )
    .unwrap();
    let bytes = to_vec(result.as_ref()).unwrap();
    assert_json_eq(&bytes, SOURCE);
}

#[test]
fn test_to_vec_absent_model() {
    assert_json_eq(&to_vec::<TestEntity>(None).unwrap(), "null");
    let entity: Option<TestEntity> = None;
    assert_eq!(to_vec(entity.as_ref()).unwrap(), b"null");
}
