use std::collections::HashMap;

use topic2table_avro::{AvroValue, infer_avro_schema, normalize_avro, normalize_avro_record};
use topic2table_core::{InferenceError, NormalizeError, Schema, Value};

fn record(fields: Vec<(&str, AvroValue)>) -> AvroValue {
    AvroValue::Record(
        fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    )
}

#[test]
fn normalizes_record_fields_in_order() {
    let value = record(vec![
        ("id", AvroValue::Long(7)),
        ("name", AvroValue::String("probe".into())),
        ("ok", AvroValue::Boolean(true)),
        ("ratio", AvroValue::Float(0.5)),
    ]);

    let normalized = normalize_avro_record(&value).unwrap();

    assert_eq!(
        normalized.schema().names().collect::<Vec<_>>(),
        vec!["id", "name", "ok", "ratio"]
    );
    assert_eq!(normalized.get("id"), Some(&Value::I64(7)));
    assert_eq!(normalized.get("name"), Some(&Value::string("probe")));
    assert_eq!(normalized.get("ok"), Some(&Value::Bool(true)));
    assert_eq!(normalized.get("ratio"), Some(&Value::F32(0.5)));
}

#[test]
fn unions_enums_and_fixed_collapse_to_model_types() {
    let union = AvroValue::Union(1, Box::new(AvroValue::Int(3)));
    assert_eq!(infer_avro_schema(&union).unwrap(), Schema::I32);
    assert_eq!(normalize_avro(&union).unwrap(), Value::I32(3));

    let symbol = AvroValue::Enum(0, "RED".into());
    assert_eq!(infer_avro_schema(&symbol).unwrap(), Schema::String);
    assert_eq!(normalize_avro(&symbol).unwrap(), Value::string("RED"));

    let fixed = AvroValue::Fixed(2, vec![0x0a, 0xff]);
    assert_eq!(infer_avro_schema(&fixed).unwrap(), Schema::Bytes);
    assert_eq!(normalize_avro(&fixed).unwrap(), Value::bytes([0x0a, 0xff]));
}

#[test]
fn null_and_null_text_normalize_to_null() {
    let value = record(vec![
        ("missing", AvroValue::Null),
        ("spelled", AvroValue::String("null".into())),
    ]);

    let normalized = normalize_avro_record(&value).unwrap();

    assert_eq!(normalized.get("missing"), Some(&Value::Null));
    assert_eq!(normalized.get("spelled"), Some(&Value::Null));
    assert_eq!(normalized.schema().field("missing"), Some(&Schema::String));
}

#[test]
fn maps_are_sorted_and_sample_the_smallest_key() {
    let entries = HashMap::from([
        ("b".to_string(), AvroValue::Long(2)),
        ("a".to_string(), AvroValue::Long(1)),
        ("c".to_string(), AvroValue::Long(3)),
    ]);
    let map = AvroValue::Map(entries);

    assert_eq!(infer_avro_schema(&map).unwrap(), Schema::map(Schema::I64));
    let Value::Map(normalized) = normalize_avro(&map).unwrap() else {
        panic!("expected a map");
    };
    let keys: Vec<&str> = normalized.iter().map(|(k, _)| k.as_ref()).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn empty_containers_default_to_string_elements() {
    assert_eq!(
        infer_avro_schema(&AvroValue::Array(Vec::new())).unwrap(),
        Schema::array(Schema::String)
    );
    assert_eq!(
        infer_avro_schema(&AvroValue::Map(HashMap::new())).unwrap(),
        Schema::map(Schema::String)
    );
}

#[test]
fn logical_types_are_unsupported() {
    let err = infer_avro_schema(&AvroValue::Date(19000)).unwrap_err();
    let InferenceError::Unsupported { type_name, .. } = err;
    assert_eq!(type_name, "avro date");

    let err = normalize_avro(&record(vec![("day", AvroValue::Date(1))])).unwrap_err();
    assert!(matches!(err, NormalizeError::Inference(_)));
}

#[test]
fn non_record_top_level_is_rejected() {
    let err = normalize_avro_record(&AvroValue::Int(1)).unwrap_err();
    assert!(matches!(err, NormalizeError::NotARecord { ref found } if found == "avro int"));
}
