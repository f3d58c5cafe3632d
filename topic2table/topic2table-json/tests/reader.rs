use serde_json::json;
use topic2table_core::{DecoderError, FieldDecoder, Value};
use topic2table_json::{
    JsonContainerDecoder, JsonNode, JsonReadError, read_json_container, read_json_value,
    value_to_json,
};

#[test]
fn container_reader_accepts_objects_and_arrays() {
    assert!(matches!(
        read_json_container(br#"{"a": 1}"#).unwrap(),
        Value::Struct(_)
    ));
    assert_eq!(
        read_json_container(b"[true]").unwrap(),
        Value::Array(vec![Value::Bool(true)])
    );
}

#[test]
fn container_reader_keeps_bare_scalar() {
    let err = read_json_container(b"42").unwrap_err();
    match err {
        JsonReadError::NotContainer { node } => assert_eq!(node, JsonNode::Int(42)),
        other => panic!("expected NotContainer, got {other:?}"),
    }
}

#[test]
fn container_reader_rejects_plain_text() {
    assert!(matches!(
        read_json_container(b"hello world").unwrap_err(),
        JsonReadError::Parse(_)
    ));
}

#[test]
fn value_reader_yields_bare_scalars() {
    assert_eq!(read_json_value("42").unwrap(), Value::I32(42));
    assert_eq!(read_json_value("true").unwrap(), Value::Bool(true));
    assert_eq!(read_json_value(r#""abc""#).unwrap(), Value::string("abc"));
    assert_eq!(read_json_value("null").unwrap(), Value::Null);
    assert!(read_json_value("abc").is_err());
}

#[test]
fn container_decoder_reports_shape_mismatch() {
    let decoder = JsonContainerDecoder::new();
    assert_eq!(decoder.name(), "json");
    assert!(decoder.decode_text("[1, 2]").is_ok());
    let err = decoder.decode_bytes(b"\"text\"").unwrap_err();
    assert!(matches!(
        err,
        DecoderError::UnexpectedShape { ref found, .. } if found == "textual"
    ));
}

#[test]
fn renders_values_back_to_json() {
    let value = read_json_container(br#"{"id": 3, "tags": ["x"], "gone": null}"#).unwrap();
    assert_eq!(
        value_to_json(&value),
        json!({"id": 3, "tags": ["x"], "gone": null})
    );
}

#[test]
fn renders_bytes_in_escaped_text_form() {
    assert_eq!(
        value_to_json(&Value::bytes([0x00, 0xff])),
        json!("\\u0000\\u00ff")
    );
    assert_eq!(value_to_json(&Value::F64(f64::NAN)), json!(null));
}
