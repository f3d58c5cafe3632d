mod common;

use std::sync::Arc;

use apache_avro::{Schema as AvroSchema, Writer, types::Record};
use common::{CountingDecoder, SENSOR_SCHEMA};
use topic2table::{
    DecoderRegistry, ReadStrategy, RecordAssembler, ScalarDecoder, ScalarKind,
    core::{FieldPath, Message, Value},
};

fn assembler(registry: DecoderRegistry) -> RecordAssembler {
    RecordAssembler::new(Arc::new(registry))
}

fn empty_assembler() -> RecordAssembler {
    assembler(DecoderRegistry::default())
}

#[test]
fn json_payload_without_decoder_becomes_struct() {
    let (value, strategy) =
        empty_assembler().read_payload("sensors", br#"{"a":"A","b":[1,2,3],"c":null}"#);

    assert_eq!(strategy, ReadStrategy::Json);
    assert_eq!(value.to_string(), r#"{a: "A", b: [1, 2, 3], c: null}"#);
}

#[test]
fn unparseable_payload_is_kept_as_text() {
    let (value, strategy) = empty_assembler().read_payload("sensors", b"plain words");

    assert_eq!(strategy, ReadStrategy::RawText);
    assert_eq!(value, Value::string("plain words"));
}

#[test]
fn json_scalar_payload_is_kept_as_text() {
    let (value, strategy) = empty_assembler().read_payload("sensors", b"null");

    assert_eq!(strategy, ReadStrategy::RawText);
    assert_eq!(value, Value::string("null"));
}

#[test]
fn embedded_avro_schema_is_tried_before_json() {
    let schema = AvroSchema::parse_str(SENSOR_SCHEMA).unwrap();
    let mut record = Record::new(&schema).unwrap();
    record.put("sensor", "north");
    record.put("level", 3_i64);
    let mut writer = Writer::new(&schema, Vec::new());
    writer.append(record).unwrap();
    let payload = writer.into_inner().unwrap();

    let (value, strategy) = empty_assembler().read_payload("sensors", &payload);

    assert_eq!(strategy, ReadStrategy::EmbeddedSchema);
    let reading = value.try_struct().unwrap().unwrap();
    assert_eq!(reading.get("sensor"), Some(&Value::string("north")));
    assert_eq!(reading.get("level"), Some(&Value::I64(3)));
}

#[test]
fn failing_registered_decoder_falls_back() {
    let registry = DecoderRegistry::builder()
        .with_decoder(
            "sensors",
            FieldPath::Value,
            Arc::new(ScalarDecoder::new(ScalarKind::I32)),
        )
        .freeze();
    let assembler = assembler(registry);

    let (value, strategy) = assembler.read_payload("sensors", b"17");
    assert_eq!(strategy, ReadStrategy::Registered);
    assert_eq!(value, Value::I32(17));

    let (value, strategy) = assembler.read_payload("sensors", b"[1, 2]");
    assert_eq!(strategy, ReadStrategy::Json);
    assert_eq!(value, Value::Array(vec![Value::I32(1), Value::I32(2)]));
}

#[test]
fn key_text_falls_back_to_json_scalar_then_text() {
    let assembler = empty_assembler();

    assert_eq!(
        assembler.read_text("sensors", &FieldPath::Key, "42"),
        (Value::I32(42), ReadStrategy::Json)
    );
    assert_eq!(
        assembler.read_text("sensors", &FieldPath::Key, "not json"),
        (Value::string("not json"), ReadStrategy::RawText)
    );
}

#[test]
fn registered_key_decoder_wins_over_json() {
    let registry = DecoderRegistry::builder()
        .with_decoder(
            "sensors",
            FieldPath::Key,
            Arc::new(ScalarDecoder::new(ScalarKind::Text)),
        )
        .freeze();

    assert_eq!(
        assembler(registry).read_text("sensors", &FieldPath::Key, "42"),
        (Value::string("42"), ReadStrategy::Registered)
    );
}

#[test]
fn topics_are_matched_by_short_name() {
    let decoder = CountingDecoder::shared();
    let registry = DecoderRegistry::builder()
        .with_decoder("sensors", FieldPath::Value, decoder.clone())
        .freeze();

    let record = assembler(registry)
        .assemble(Message::new("persistent://public/default/sensors").with_payload(b"x".to_vec()))
        .unwrap();

    assert_eq!(record.value, Some(Value::string("counted")));
    assert_eq!(decoder.calls(), 1);
}

#[test]
fn null_header_skips_its_decoder() {
    let decoder = CountingDecoder::shared();
    let registry = DecoderRegistry::builder()
        .with_decoder(
            "sensors",
            FieldPath::Header("origin".to_string()),
            decoder.clone(),
        )
        .freeze();

    let record = assembler(registry)
        .assemble(Message::new("sensors").with_property("origin", None))
        .unwrap();

    assert_eq!(record.header("origin"), Some(&Value::Null));
    assert_eq!(decoder.calls(), 0);
}

#[test]
fn headers_are_decoded_like_keys() {
    let record = empty_assembler()
        .assemble(
            Message::new("sensors")
                .with_property("count", Some("3"))
                .with_property("note", Some("hello")),
        )
        .unwrap();

    assert_eq!(record.header("count"), Some(&Value::I32(3)));
    assert_eq!(record.header("note"), Some(&Value::string("hello")));
    assert_eq!(record.value, None);
    assert_eq!(record.key, None);
}

#[test]
fn message_without_data_is_suppressed() {
    let assembler = empty_assembler();

    assert!(assembler.assemble(Message::new("sensors")).is_none());
    assert!(
        assembler
            .assemble(Message::new("sensors").with_key("null"))
            .is_none()
    );
}

#[test]
fn empty_payload_goes_through_registered_decoder() {
    let registry = DecoderRegistry::builder()
        .with_decoder(
            "sensors",
            FieldPath::Value,
            Arc::new(ScalarDecoder::new(ScalarKind::Text)),
        )
        .freeze();

    let record = assembler(registry)
        .assemble(Message::new("sensors").with_payload(Vec::new()))
        .unwrap();

    assert_eq!(record.value, Some(Value::string("")));
}

#[test]
fn empty_payload_without_decoder_is_empty_text() {
    let record = empty_assembler()
        .assemble(Message::new("sensors").with_payload(Vec::new()))
        .unwrap();

    assert_eq!(record.value, Some(Value::string("")));
}

#[test]
fn big_integer_member_keeps_json_struct() {
    let (value, strategy) =
        empty_assembler().read_payload("sensors", br#"{"id": 1, "n": 9223372036854775808}"#);

    assert_eq!(strategy, ReadStrategy::Json);
    let record = value.try_struct().unwrap().unwrap();
    assert_eq!(record.get("id"), Some(&Value::I32(1)));
    assert_eq!(record.get("n"), Some(&Value::I64(i64::MAX)));
}

#[test]
fn message_with_any_data_emits_one_record() {
    let assembler = empty_assembler();

    let record = assembler
        .assemble(Message::new("sensors").with_key("k1"))
        .unwrap();
    assert_eq!(record.key, Some(Value::string("k1")));
    assert_eq!(record.value, None);
    assert_eq!(record.message.topic, "sensors");

    let record = assembler
        .assemble(Message::new("sensors").with_property("origin", None))
        .unwrap();
    assert_eq!(record.headers.len(), 1);
}
