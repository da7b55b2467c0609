use hive3stream_serde::{
    ConfigError, DecimalMode, PrimitiveType, TableProperties, TableSchema, TypeInfo,
};

#[test]
fn builds_from_raw_properties() {
    let props = TableProperties::from_properties([
        ("columns", "id,name,ts"),
        ("columns.types", "int,string,timestamp"),
        ("timestamp.formats", r"%d/%m/%Y %H:%M,millis,%Y\,%j"),
        ("decimal.mode", "EXACT"),
        ("serialization.format", "1"),
    ])
    .unwrap();

    assert_eq!(props.column_names, ["id", "name", "ts"]);
    assert_eq!(
        props.column_types,
        vec![
            TypeInfo::primitive(PrimitiveType::Int),
            TypeInfo::primitive(PrimitiveType::String),
            TypeInfo::primitive(PrimitiveType::Timestamp),
        ]
    );
    assert_eq!(props.timestamp_formats, ["%d/%m/%Y %H:%M", "millis", "%Y,%j"]);
    assert_eq!(props.decimal_mode, DecimalMode::Exact);
}

#[test]
fn defaults_apply_when_optional_keys_are_absent() {
    let props =
        TableProperties::from_properties([("columns", "a"), ("columns.types", "int")]).unwrap();
    assert!(props.timestamp_formats.is_empty());
    assert_eq!(props.decimal_mode, DecimalMode::Double);
}

#[test]
fn custom_name_delimiter_splits_names_containing_commas() {
    let props = TableProperties::from_properties([
        ("columns", "a,b|c"),
        ("columns.types", "int,int"),
        ("column.name.delimiter", "|"),
    ])
    .unwrap();
    assert_eq!(props.column_names, ["a,b", "c"]);
}

#[test]
fn missing_required_keys_are_rejected() {
    assert_eq!(
        TableProperties::from_properties([("columns.types", "int")]),
        Err(ConfigError::MissingProperty { key: "columns" })
    );
    assert_eq!(
        TableProperties::from_properties([("columns", "a")]),
        Err(ConfigError::MissingProperty {
            key: "columns.types"
        })
    );
}

#[test]
fn invalid_values_are_rejected() {
    let err = TableProperties::from_properties([
        ("columns", "a"),
        ("columns.types", "int"),
        ("decimal.mode", "fast"),
    ])
    .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidProperty { key: "decimal.mode", .. }));

    let err = TableProperties::from_properties([
        ("columns", "a"),
        ("columns.types", "int"),
        ("column.name.delimiter", ""),
    ])
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidProperty {
            key: "column.name.delimiter",
            ..
        }
    ));

    let err = TableProperties::from_properties([("columns", "a"), ("columns.types", "nope")])
        .unwrap_err();
    assert!(matches!(err, ConfigError::TypeParse { .. }));
}

#[test]
fn empty_properties_declare_an_empty_table() {
    let props = TableProperties::from_properties([("columns", ""), ("columns.types", "")]).unwrap();
    let table = TableSchema::new(&props.column_names, &props.column_types).unwrap();
    assert!(table.is_empty());
}

#[test]
fn table_schema_lowercases_names_and_checks_counts() {
    let types = vec![
        TypeInfo::primitive(PrimitiveType::Int),
        TypeInfo::primitive(PrimitiveType::String),
    ];
    let table = TableSchema::new(&["ID", "Name"], &types).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.column(1).map(|c| c.name.as_str()), Some("name"));
    assert_eq!(table.position_of("id"), Some(0));
    assert_eq!(table.position_of("ID"), None);

    assert_eq!(
        TableSchema::new(&["a", "b", "c"], &types),
        Err(ConfigError::ColumnCountMismatch { names: 3, types: 2 })
    );
}

#[test]
fn decimal_mode_round_trips_through_text() {
    for mode in [DecimalMode::Double, DecimalMode::Exact] {
        assert_eq!(mode.to_string().parse::<DecimalMode>(), Ok(mode));
    }
}

#[test]
fn trailing_name_delimiter_adds_no_column() {
    let props =
        TableProperties::from_properties([("columns", "a,b,"), ("columns.types", "int,string")])
            .unwrap();
    assert_eq!(props.column_names, ["a", "b"]);
    assert!(TableSchema::new(&props.column_names, &props.column_types).is_ok());
}
