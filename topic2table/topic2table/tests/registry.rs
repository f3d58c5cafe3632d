mod common;

use std::{sync::Arc, thread};

use common::CountingDecoder;
use topic2table::{
    DecoderRegistry, RecordAssembler, ScalarDecoder, ScalarKind, SharedRegistry,
    core::{FieldDecoder, FieldPath, Message, Value},
};

fn text_decoder() -> Arc<dyn FieldDecoder> {
    Arc::new(ScalarDecoder::new(ScalarKind::Text))
}

#[test]
fn builder_installs_per_field_path() {
    let registry = DecoderRegistry::builder()
        .with_decoder("sensors", FieldPath::Value, text_decoder())
        .with_decoder(
            "sensors",
            FieldPath::Header("origin".to_string()),
            Arc::new(ScalarDecoder::new(ScalarKind::Bytes)),
        )
        .freeze();

    let decoders = registry.topic("sensors").unwrap();
    assert_eq!(decoders.value().map(|d| d.name()), Some("text"));
    assert!(decoders.key().is_none());
    assert_eq!(decoders.header("origin").map(|d| d.name()), Some("bytes"));
    assert!(
        registry
            .decoder("sensors", &FieldPath::Header("other".to_string()))
            .is_none()
    );
    assert!(registry.topic("alerts").is_none());
}

#[test]
fn later_install_replaces_earlier_one() {
    let mut builder = DecoderRegistry::builder();
    assert!(
        builder
            .install("sensors", FieldPath::Key, text_decoder())
            .is_none()
    );
    let replaced = builder.install(
        "persistent://public/default/sensors",
        FieldPath::Key,
        Arc::new(ScalarDecoder::new(ScalarKind::I64)),
    );
    assert_eq!(replaced.map(|d| d.name().to_string()), Some("text".to_string()));

    let registry = builder.freeze();
    assert_eq!(
        registry
            .decoder("sensors", &FieldPath::Key)
            .map(|d| d.name()),
        Some("int64")
    );
    assert_eq!(registry.topic_names().collect::<Vec<_>>(), vec!["sensors"]);
}

#[test]
fn value_decoder_update_publishes_new_snapshot() {
    let shared = SharedRegistry::new(
        DecoderRegistry::builder()
            .with_decoder("sensors", FieldPath::Key, text_decoder())
            .freeze(),
    );
    let before = shared.snapshot();

    shared.set_value_decoder("sensors", Some(CountingDecoder::shared()));
    let after = shared.snapshot();

    assert!(before.decoder("sensors", &FieldPath::Value).is_none());
    assert_eq!(
        after
            .decoder("sensors", &FieldPath::Value)
            .map(|d| d.name()),
        Some("counting")
    );
    assert!(after.decoder("sensors", &FieldPath::Key).is_some());
}

#[test]
fn value_decoder_can_be_removed_and_added_to_new_topics() {
    let shared = SharedRegistry::from(
        DecoderRegistry::builder()
            .with_decoder("sensors", FieldPath::Value, text_decoder())
            .freeze(),
    );

    shared.set_value_decoder("sensors", None);
    shared.set_value_decoder("alerts", Some(text_decoder()));

    let snapshot = shared.snapshot();
    assert!(snapshot.decoder("sensors", &FieldPath::Value).is_none());
    assert!(snapshot.decoder("alerts", &FieldPath::Value).is_some());
}

#[test]
fn debug_lists_decoder_names() {
    let registry = DecoderRegistry::builder()
        .with_decoder("sensors", FieldPath::Value, text_decoder())
        .freeze();

    let rendered = format!("{registry:?}");
    assert!(rendered.contains("sensors"));
    assert!(rendered.contains("value: Some(\"text\")"));
}

#[test]
fn assembly_on_many_threads_sees_whole_snapshots_during_swaps() {
    let int_decoder: Arc<dyn FieldDecoder> = Arc::new(ScalarDecoder::new(ScalarKind::I32));
    let shared = SharedRegistry::new(
        DecoderRegistry::builder()
            .with_decoder("sensors", FieldPath::Value, int_decoder.clone())
            .freeze(),
    );

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..200 {
                    let assembler = RecordAssembler::new(shared.snapshot());
                    let record = assembler
                        .assemble(Message::new("sensors").with_payload(b"17".to_vec()))
                        .unwrap();
                    let value = record.value.unwrap();
                    assert!(
                        value == Value::I32(17) || value == Value::string("17"),
                        "unexpected value {value:?}"
                    );
                }
            });
        }
        scope.spawn(|| {
            for round in 0..200 {
                let decoder = (round % 2 == 1).then(|| int_decoder.clone());
                shared.set_value_decoder("persistent://public/default/sensors", decoder);
            }
        });
    });

    let (value, _) = RecordAssembler::new(shared.snapshot()).read_payload("sensors", b"17");
    assert_eq!(value, Value::I32(17));
}
