use std::str::FromStr;

use chrono::NaiveDate;
use hive3stream_core::{MapRecord, RecordDataType, RecordField, RecordSchema, Value};
use hive3stream_serde::{
    ConfigError, ConversionError, DecimalMode, FieldError, RecordSerDe, RowValue, TableProperties,
};
use rust_decimal::Decimal;

fn properties(columns: &str, types: &str) -> TableProperties {
    TableProperties::from_properties([("columns", columns), ("columns.types", types)]).unwrap()
}

fn schema(fields: &[(&str, RecordDataType)]) -> RecordSchema {
    fields
        .iter()
        .map(|(name, data_type)| RecordField::new(*name, data_type.clone(), true))
        .collect::<Vec<_>>()
        .into()
}

fn strings(names: &[&str]) -> RecordSchema {
    schema(
        &names
            .iter()
            .map(|n| (*n, RecordDataType::String))
            .collect::<Vec<_>>(),
    )
}

#[test]
fn converts_text_fields_into_typed_columns() {
    let source = schema(&[
        ("id", RecordDataType::String),
        ("name", RecordDataType::String),
        ("ts", RecordDataType::Timestamp { format: None }),
    ]);
    let mut serde =
        RecordSerDe::initialize(&properties("id,name,ts", "int,string,timestamp"), &source).unwrap();

    let record = MapRecord::new(
        source,
        [
            ("id", Value::string("42")),
            ("name", Value::string("Ann")),
            ("ts", Value::string("2020-01-01 00:00:00")),
        ],
    );
    let row = serde.deserialize(&record).unwrap();

    let midnight = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(
        row.into_inner(),
        vec![
            Some(RowValue::Int(42)),
            Some(RowValue::String("Ann".to_string())),
            Some(RowValue::Timestamp(midnight)),
        ]
    );
    assert_eq!(serde.stats().row_count(), 1);
}

#[test]
fn zero_padded_internal_name_fails_initialization() {
    let result = RecordSerDe::initialize(&properties("a,b", "int,int"), &strings(&["_col01"]));
    assert!(matches!(
        result,
        Err(ConfigError::InternalNameMismatch { position: 1, .. })
    ));
}

#[test]
fn partition_fields_are_ignored() {
    let source = strings(&["id", "partition_date"]);
    let mut serde = RecordSerDe::initialize(&properties("id", "int"), &source).unwrap();
    let record = MapRecord::new(
        source,
        [
            ("id", Value::string("7")),
            ("partition_date", Value::string("2020-01-01")),
        ],
    );

    let row = serde.deserialize(&record).unwrap();
    assert_eq!(row.len(), 1);
    assert_eq!(row.get(0), Some(&RowValue::Int(7)));
    assert_eq!(serde.stats().row_count(), 1);
}

#[test]
fn decimal_columns_default_to_double() {
    let source = schema(&[("amount", RecordDataType::Double)]);
    let mut serde =
        RecordSerDe::initialize(&properties("amount", "decimal(10,2)"), &source).unwrap();
    let record = MapRecord::new(source, [("amount", Value::Double(3.14159))]);

    let row = serde.deserialize(&record).unwrap();
    assert_eq!(row.get(0), Some(&RowValue::Double(3.14159)));
}

#[test]
fn exact_decimal_mode_rounds_to_declared_scale() {
    let source = strings(&["amount"]);
    let props = properties("amount", "decimal(10,2)").with_decimal_mode(DecimalMode::Exact);
    let mut serde = RecordSerDe::initialize(&props, &source).unwrap();

    let record = MapRecord::new(source.clone(), [("amount", Value::string("3.14159"))]);
    let row = serde.deserialize(&record).unwrap();
    assert_eq!(
        row.get(0),
        Some(&RowValue::Decimal(Decimal::from_str("3.14").unwrap()))
    );

    let record = MapRecord::new(source, [("amount", Value::string("123456789.5"))]);
    let err = serde.deserialize(&record).unwrap_err();
    assert!(matches!(
        err.source,
        FieldError::DecimalOverflow {
            precision: 10,
            scale: 2,
            ..
        }
    ));
    assert_eq!(serde.stats().row_count(), 1);
}

#[test]
fn columns_missing_from_the_record_stay_absent() {
    let source = strings(&["b"]);
    let mut serde = RecordSerDe::initialize(&properties("a,b,c", "int,string,int"), &source).unwrap();
    let record = MapRecord::new(source, [("b", Value::string("x"))]);

    let row = serde.deserialize(&record).unwrap();
    assert_eq!(
        row.as_slice(),
        [None, Some(RowValue::String("x".to_string())), None]
    );
}

#[test]
fn null_values_stay_absent() {
    let source = strings(&["a"]);
    let mut serde = RecordSerDe::initialize(&properties("a", "bigint"), &source).unwrap();
    let record = MapRecord::new(source, [("a", Value::Null)]);

    let row = serde.deserialize(&record).unwrap();
    assert_eq!(row[0], None);
    assert_eq!(serde.stats().row_count(), 1);
}

#[test]
fn failed_record_leaves_counter_unchanged() {
    let source = strings(&["id", "name"]);
    let mut serde = RecordSerDe::initialize(&properties("id,name", "int,string"), &source).unwrap();

    let bad = MapRecord::new(
        source.clone(),
        [("id", Value::string("forty-two")), ("name", Value::string("Ann"))],
    );
    let err: ConversionError = serde.deserialize(&bad).unwrap_err();
    assert_eq!(err.field, "id");
    assert!(err.record.contains("id=forty-two"), "{}", err.record);
    assert!(matches!(err.source, FieldError::Access(_)));
    assert_eq!(serde.stats().row_count(), 0);

    let good = MapRecord::new(source, [("id", Value::Int(1))]);
    serde.deserialize(&good).unwrap();
    assert_eq!(serde.stats().row_count(), 1);
}

#[test]
fn fields_resolve_case_insensitively_and_by_internal_name() {
    let source = strings(&["ID", "_col1"]);
    let mut serde = RecordSerDe::initialize(&properties("id,Name", "int,string"), &source).unwrap();
    let record = MapRecord::new(
        source,
        [("ID", Value::Long(5)), ("_col1", Value::string("n"))],
    );

    let row = serde.deserialize(&record).unwrap();
    assert_eq!(row.get(0), Some(&RowValue::Int(5)));
    assert_eq!(row.get(1), Some(&RowValue::String("n".to_string())));
}

#[test]
fn scalar_columns_coerce_their_values() {
    let source = schema(&[
        ("t", RecordDataType::Int),
        ("s", RecordDataType::Int),
        ("b", RecordDataType::String),
        ("f", RecordDataType::Double),
        ("d", RecordDataType::Int),
        ("v", RecordDataType::Int),
        ("c", RecordDataType::String),
    ]);
    let mut serde = RecordSerDe::initialize(
        &properties(
            "t,s,b,f,d,v,c",
            "tinyint,smallint,boolean,float,double,varchar(3),char(1)",
        ),
        &source,
    )
    .unwrap();
    let record = MapRecord::new(
        source,
        [
            ("t", Value::Int(1)),
            ("s", Value::Int(2)),
            ("b", Value::string("TRUE")),
            ("f", Value::Double(1.5)),
            ("d", Value::Int(3)),
            ("v", Value::Int(12345)),
            ("c", Value::string("xyz")),
        ],
    );

    let row = serde.deserialize(&record).unwrap();
    assert_eq!(
        row.into_inner(),
        vec![
            Some(RowValue::Int(1)),
            Some(RowValue::Int(2)),
            Some(RowValue::Boolean(true)),
            Some(RowValue::Float(1.5)),
            Some(RowValue::Double(3.0)),
            Some(RowValue::String("12345".to_string())),
            Some(RowValue::String("xyz".to_string())),
        ]
    );
}

#[test]
fn binary_and_date_columns() {
    let source = schema(&[
        ("payload", RecordDataType::String),
        ("day", RecordDataType::Date {
            format: Some("%d.%m.%Y".to_string()),
        }),
    ]);
    let mut serde = RecordSerDe::initialize(&properties("payload,day", "binary,date"), &source).unwrap();
    let record = MapRecord::new(
        source,
        [
            ("payload", Value::bytes([0xde, 0xad])),
            ("day", Value::string("31.12.1999")),
        ],
    );

    let row = serde.deserialize(&record).unwrap();
    assert_eq!(row.get(0), Some(&RowValue::Binary(vec![0xde, 0xad])));
    assert_eq!(
        row.get(1),
        Some(&RowValue::Date(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap()))
    );
}

#[test]
fn timestamp_column_uses_configured_formats() {
    let source = strings(&["ts"]);
    let props = properties("ts", "timestamp").with_timestamp_formats(vec!["millis".to_string()]);
    let mut serde = RecordSerDe::initialize(&props, &source).unwrap();
    let record = MapRecord::new(source.clone(), [("ts", Value::string("86400000"))]);

    let row = serde.deserialize(&record).unwrap();
    let expected = NaiveDate::from_ymd_opt(1970, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(row.get(0), Some(&RowValue::Timestamp(expected)));

    let record = MapRecord::new(source, [("ts", Value::string("soon"))]);
    let err = serde.deserialize(&record).unwrap_err();
    assert!(matches!(err.source, FieldError::Timestamp { .. }));
}

#[test]
fn timestamp_column_accepts_numbers_and_date_only_formats() {
    let source = schema(&[
        ("at", RecordDataType::Double),
        ("day", RecordDataType::Timestamp {
            format: Some("%Y-%m-%d".to_string()),
        }),
    ]);
    let mut serde =
        RecordSerDe::initialize(&properties("at,day", "timestamp,timestamp"), &source).unwrap();
    let record = MapRecord::new(
        source,
        [
            ("at", Value::Double(1_577_836_800_000.0)),
            ("day", Value::string("2020-01-01")),
        ],
    );

    let row = serde.deserialize(&record).unwrap();
    let midnight = NaiveDate::from_ymd_opt(2020, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    assert_eq!(row.get(0), Some(&RowValue::Timestamp(midnight)));
    assert_eq!(row.get(1), Some(&RowValue::Timestamp(midnight)));
}

#[test]
fn list_columns_keep_element_order() {
    let source = schema(&[(
        "tags",
        RecordDataType::Array(Box::new(RecordDataType::String)),
    )]);
    let mut serde = RecordSerDe::initialize(&properties("tags", "array<string>"), &source).unwrap();
    let record = MapRecord::new(
        source,
        [(
            "tags",
            Value::Array(vec![Value::string("b"), Value::Null, Value::string("a")]),
        )],
    );

    let row = serde.deserialize(&record).unwrap();
    assert_eq!(
        row.get(0),
        Some(&RowValue::List(vec![
            Some(RowValue::String("b".to_string())),
            None,
            Some(RowValue::String("a".to_string())),
        ]))
    );
}

#[test]
fn map_and_struct_columns_follow_the_field_type() {
    let address = RecordSchema::new(vec![
        RecordField::new("city", RecordDataType::String, true),
        RecordField::new("zip", RecordDataType::Int, true),
    ]);
    let source = schema(&[
        ("attrs", RecordDataType::Map(Box::new(RecordDataType::Long))),
        ("address", RecordDataType::Record(address)),
    ]);
    let mut serde = RecordSerDe::initialize(
        &properties("attrs,address", "map<string,bigint>,struct<city:string,zip:int>"),
        &source,
    )
    .unwrap();
    let record = MapRecord::new(
        source,
        [
            (
                "attrs",
                Value::Map(vec![("x".to_string(), Value::Int(1))]),
            ),
            (
                "address",
                Value::Record(vec![
                    ("zip".to_string(), Value::string("12345")),
                    ("extra".to_string(), Value::Bool(true)),
                ]),
            ),
        ],
    );

    let row = serde.deserialize(&record).unwrap();
    assert_eq!(
        row.get(0),
        Some(&RowValue::Map(vec![("x".to_string(), Some(RowValue::Long(1)))]))
    );
    assert_eq!(
        row.get(1),
        Some(&RowValue::Struct(vec![
            ("city".to_string(), None),
            ("zip".to_string(), Some(RowValue::Int(12345))),
        ]))
    );
}

#[test]
fn unsupported_column_types_reject_the_record() {
    for types in [
        "void",
        "interval_day_time",
        "timestamp with local time zone",
        "uniontype<int,string>",
    ] {
        let source = strings(&["x"]);
        let mut serde = RecordSerDe::initialize(&properties("x", types), &source).unwrap();
        let record = MapRecord::new(source, [("x", Value::string("1"))]);

        let err = serde.deserialize(&record).unwrap_err();
        assert_eq!(
            err.source,
            FieldError::UnsupportedType {
                type_name: types.to_string()
            }
        );
        assert_eq!(serde.stats().row_count(), 0);
    }
}

#[test]
fn rows_are_fresh_for_every_record() {
    let source = strings(&["a", "b"]);
    let mut serde = RecordSerDe::initialize(&properties("a,b", "string,string"), &source).unwrap();

    let first = MapRecord::new(
        source.clone(),
        [("a", Value::string("1")), ("b", Value::string("2"))],
    );
    let second = MapRecord::new(source, [("a", Value::string("3"))]);

    serde.deserialize(&first).unwrap();
    let row = serde.deserialize(&second).unwrap();
    assert_eq!(row.get(1), None);
    assert_eq!(serde.stats().row_count(), 2);
}

#[test]
fn mismatched_name_and_type_counts_fail_initialization() {
    let props = TableProperties::from_properties([("columns", "a,b"), ("columns.types", "int")]).unwrap();
    assert_eq!(
        RecordSerDe::initialize(&props, &strings(&["a"])).unwrap_err(),
        ConfigError::ColumnCountMismatch { names: 2, types: 1 }
    );
}
