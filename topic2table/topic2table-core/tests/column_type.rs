use topic2table_core::{ColumnKind, ColumnType, FieldPath};

#[test]
fn parses_simple_types_case_insensitively() {
    assert_eq!(
        "text".parse::<ColumnType>().unwrap(),
        ColumnType::Simple(ColumnKind::Text)
    );
    assert_eq!(
        "BIGINT".parse::<ColumnType>().unwrap(),
        ColumnType::Simple(ColumnKind::Bigint)
    );
}

#[test]
fn parses_nested_collections_and_drops_frozen() {
    let parsed: ColumnType = "map<text, frozen<list<int>>>".parse().unwrap();
    assert_eq!(
        parsed,
        ColumnType::Map(
            Box::new(ColumnKind::Text.into()),
            Box::new(ColumnType::List(Box::new(ColumnKind::Int.into()))),
        )
    );
    assert_eq!(parsed.kind(), ColumnKind::Map);
    assert_eq!(parsed.to_string(), "map<text, list<int>>");
}

#[test]
fn parses_tuple_and_udt() {
    let parsed: ColumnType = "tuple<int, text, blob>".parse().unwrap();
    assert_eq!(parsed.kind(), ColumnKind::Tuple);
    assert_eq!(parsed.to_string(), "tuple<int, text, blob>");

    let udt: ColumnType = "frozen<address>".parse().unwrap();
    assert_eq!(udt, ColumnType::Udt("address".to_string()));
    assert_eq!(udt.kind(), ColumnKind::Udt);
}

#[test]
fn rejects_malformed_types() {
    for input in ["", "list<", "list<int", "map<int>", "list<int> extra", "set<int, int>"] {
        let err = input.parse::<ColumnType>().unwrap_err();
        assert_eq!(err.input, input, "input {input:?} should fail");
    }
}

#[test]
fn field_path_from_mapping_source() {
    assert_eq!(
        FieldPath::from_mapping_source("value.__self"),
        Some(FieldPath::Value)
    );
    assert_eq!(
        FieldPath::from_mapping_source("key.__self"),
        Some(FieldPath::Key)
    );
    assert_eq!(
        FieldPath::from_mapping_source("header.trace.id"),
        Some(FieldPath::Header("trace.id".to_string()))
    );
    assert_eq!(FieldPath::from_mapping_source("value.name"), None);
    assert_eq!(FieldPath::from_mapping_source("header."), None);
}

#[test]
fn field_path_display() {
    assert_eq!(FieldPath::Value.to_string(), "value");
    assert_eq!(FieldPath::Key.to_string(), "key");
    assert_eq!(FieldPath::Header("h".into()).to_string(), "header:h");
}
