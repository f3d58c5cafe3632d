mod common;

use common::{column, default_catalog};
use topic2table::{
    DecoderCatalog, ScalarDecoder, ScalarDecoderFactory, ScalarKind,
    core::{ColumnKind, DecoderError, FieldDecoder, Value},
};

#[test]
fn integer_decoders_parse_trimmed_text() {
    let decoder = ScalarDecoder::new(ScalarKind::I16);

    assert_eq!(decoder.decode_text(" 12 ").unwrap(), Value::I16(12));
    assert_eq!(decoder.decode_bytes(b"-7").unwrap(), Value::I16(-7));
    assert!(matches!(
        decoder.decode_text("70000").unwrap_err(),
        DecoderError::Decode { ref decoder, .. } if decoder == "int16"
    ));
}

#[test]
fn boolean_and_float_decoders() {
    assert_eq!(
        ScalarDecoder::new(ScalarKind::Bool)
            .decode_text("true")
            .unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        ScalarDecoder::new(ScalarKind::F64)
            .decode_bytes(b"2.5")
            .unwrap(),
        Value::F64(2.5)
    );
    assert!(
        ScalarDecoder::new(ScalarKind::Bool)
            .decode_text("yes")
            .is_err()
    );
}

#[test]
fn text_decoder_keeps_text_and_rejects_invalid_utf8() {
    let decoder = ScalarDecoder::new(ScalarKind::Text);

    assert_eq!(decoder.decode_text(" spaced ").unwrap(), Value::string(" spaced "));
    assert!(decoder.decode_bytes(&[0xff, 0xfe]).is_err());
}

#[test]
fn bytes_decoder_reads_payload_raw_and_text_through_codec() {
    let decoder = ScalarDecoder::new(ScalarKind::Bytes);

    assert_eq!(
        decoder.decode_bytes(&[0x00, 0xff]).unwrap(),
        Value::bytes([0x00, 0xff])
    );
    assert_eq!(
        decoder.decode_text(r"\u0000\u00ff").unwrap(),
        Value::bytes([0x00, 0xff])
    );
    assert!(matches!(
        decoder.decode_text("abc").unwrap_err(),
        DecoderError::Codec(_)
    ));
}

#[test]
fn default_catalog_covers_scalar_and_container_kinds() {
    let catalog = default_catalog();

    let cases = [
        ("varchar", "text"),
        ("blob", "bytes"),
        ("counter", "int64"),
        ("tinyint", "int8"),
        ("float", "float32"),
        ("list<int>", "json"),
        ("map<text, int>", "json"),
        ("frozen<tuple<int, text>>", "json"),
        ("address", "json"),
    ];
    for (column_type, decoder) in cases {
        let built = catalog.decoder_for(&column(column_type)).unwrap().unwrap();
        assert_eq!(built.name(), decoder, "column type {column_type}");
    }
}

#[test]
fn columns_without_decoder_are_not_an_error() {
    let catalog = default_catalog();

    for column_type in ["uuid", "timestamp", "decimal", "inet", "duration"] {
        assert!(catalog.decoder_for(&column(column_type)).unwrap().is_none());
    }
}

#[test]
fn registered_factory_replaces_default() {
    let catalog = DecoderCatalog::builder()
        .with_default_factories()
        .with_factory(Box::new(ScalarDecoderFactory::new(
            ColumnKind::Int,
            ScalarKind::Text,
        )))
        .build();

    assert!(catalog.contains(ColumnKind::Int));
    assert_eq!(
        catalog
            .decoder_for(&column("int"))
            .unwrap()
            .unwrap()
            .name(),
        "text"
    );
    assert!(!DecoderCatalog::new().contains(ColumnKind::Int));
}

#[test]
fn catalog_registration_after_build() {
    let mut catalog = DecoderCatalog::new();
    catalog.register_factory(Box::new(ScalarDecoderFactory::new(
        ColumnKind::Boolean,
        ScalarKind::Bool,
    )));
    catalog.register_factory(Box::new(ScalarDecoderFactory::new(
        ColumnKind::Boolean,
        ScalarKind::Text,
    )));

    let decoder = catalog.decoder_for(&column("boolean")).unwrap().unwrap();
    assert_eq!(decoder.name(), "text");
    assert!(!catalog.contains(ColumnKind::Int));
}
