use sheetconf_tools::ToolError;
use sheetconf_tools::coerce::Coercion;
use sheetconf_tools::model::{
    ArrayValue, FieldType, ScalarKind, ScalarValue, SchemaField, TypedValue,
};
use sheetconf_tools::schema::{SchemaRegistry, capitalize, extract_schema};
use sheetconf_tools::sheet::{SheetRows, parse_sheet};

fn sheet(name: &str, rows: &[&[&str]]) -> SheetRows {
    SheetRows::new(
        name,
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    )
}

fn gift_sheet() -> SheetRows {
    sheet(
        "Gift",
        &[
            &["int", "IntArray", "string"],
            &["Id", "GiftNum", "Name"],
            &["comment", "comment", "comment"],
            &["1", "[10,20]", "Starter"],
            &["2", "[]", "Empty"],
        ],
    )
}

#[test]
fn data_rows_become_typed_records_in_order() {
    let records = parse_sheet(&gift_sheet(), Coercion::Lenient).expect("sheet parsed");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["Id"], TypedValue::Scalar(ScalarValue::Int(1)));
    assert_eq!(
        records[0]["GiftNum"],
        TypedValue::Array(ArrayValue::Ints(vec![10, 20]))
    );
    assert_eq!(
        records[0]["Name"],
        TypedValue::Scalar(ScalarValue::String("Starter".to_string()))
    );
    assert_eq!(records[1]["Id"], TypedValue::Scalar(ScalarValue::Int(2)));
    assert_eq!(
        records[1]["GiftNum"],
        TypedValue::Array(ArrayValue::Ints(Vec::new()))
    );
}

#[test]
fn records_serialize_as_plain_json_objects() {
    let records = parse_sheet(&gift_sheet(), Coercion::Lenient).expect("sheet parsed");
    let json = serde_json::to_value(&records).expect("records serialized");

    assert_eq!(
        json,
        serde_json::json!([
            {"Id": 1, "GiftNum": [10, 20], "Name": "Starter"},
            {"Id": 2, "GiftNum": [], "Name": "Empty"}
        ])
    );
}

#[test]
fn sheets_shorter_than_the_header_are_rejected() {
    let short = sheet("Short", &[&["int"], &["Id"]]);

    assert!(matches!(
        parse_sheet(&short, Coercion::Lenient),
        Err(ToolError::TooFewRows { rows: 2, .. })
    ));
    assert!(matches!(
        extract_schema(&short),
        Err(ToolError::TooFewRows { .. })
    ));
}

#[test]
fn header_only_sheet_has_no_records() {
    let header_only = sheet("Buff", &[&["int"], &["Id"], &["comment"]]);

    let records = parse_sheet(&header_only, Coercion::Lenient).expect("sheet parsed");
    assert!(records.is_empty());
}

#[test]
fn blank_field_names_exclude_the_column() {
    let rows = sheet(
        "Item",
        &[
            &["int", "int", "string"],
            &["Id", "", "Name"],
            &["", "", ""],
            &["1", "99", "Sword"],
        ],
    );

    let records = parse_sheet(&rows, Coercion::Lenient).expect("sheet parsed");
    assert_eq!(records[0].len(), 2);
    assert!(records[0].values().all(|value| {
        *value != TypedValue::Scalar(ScalarValue::Int(99))
    }));

    let schema = extract_schema(&rows).expect("schema extracted");
    let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Id", "Name"]);
}

#[test]
fn short_and_empty_rows_are_handled() {
    let rows = sheet(
        "Item",
        &[
            &["int", "string", "float"],
            &["Id", "Name", "Weight"],
            &["", "", ""],
            &["1"],
            &[],
            &["2", "Shield", "3.5"],
        ],
    );

    let records = parse_sheet(&rows, Coercion::Lenient).expect("sheet parsed");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].len(), 1);
    assert_eq!(
        records[1]["Weight"],
        TypedValue::Scalar(ScalarValue::Float(3.5))
    );
}

#[test]
fn strict_policy_fails_the_whole_sheet() {
    let rows = sheet(
        "Item",
        &[&["int"], &["Id"], &[""], &["1"], &["two"]],
    );

    assert!(parse_sheet(&rows, Coercion::Lenient).is_ok());
    assert!(matches!(
        parse_sheet(&rows, Coercion::Strict),
        Err(ToolError::InvalidLiteral { .. })
    ));
}

#[test]
fn schema_maps_declared_types_to_field_types() {
    let rows = sheet(
        "hero",
        &[
            &["int", "float64", "bool", "string", "intarray", "floatarray", "stringarray", "vec3"],
            &["Id", "Speed", "Boss", "Name", "Skills", "Rates", "Tags", "Pos"],
            &[],
        ],
    );

    let schema = extract_schema(&rows).expect("schema extracted");
    assert_eq!(schema.name, "HeroConfig");
    assert_eq!(schema.sheet, "hero");
    assert_eq!(schema.prefix(), "Hero");
    assert_eq!(
        schema.fields,
        vec![
            SchemaField { name: "Id".into(), ty: FieldType::Scalar(ScalarKind::Int) },
            SchemaField { name: "Speed".into(), ty: FieldType::Scalar(ScalarKind::Float) },
            SchemaField { name: "Boss".into(), ty: FieldType::Scalar(ScalarKind::Bool) },
            SchemaField { name: "Name".into(), ty: FieldType::Scalar(ScalarKind::Text) },
            SchemaField { name: "Skills".into(), ty: FieldType::Array(ScalarKind::Int) },
            SchemaField { name: "Rates".into(), ty: FieldType::Array(ScalarKind::Float) },
            SchemaField { name: "Tags".into(), ty: FieldType::Array(ScalarKind::Text) },
            SchemaField { name: "Pos".into(), ty: FieldType::Dynamic },
        ]
    );
}

#[test]
fn schema_extraction_is_repeatable() {
    let rows = gift_sheet();
    assert_eq!(
        extract_schema(&rows).expect("first"),
        extract_schema(&rows).expect("second")
    );
}

#[test]
fn repeated_field_names_appear_once() {
    let rows = sheet(
        "Gift",
        &[&["int", "int", "string"], &["Id", "Count", "Count"], &[]],
    );

    let schema = extract_schema(&rows).expect("schema extracted");
    assert_eq!(schema.fields.len(), 2);
    assert_eq!(
        schema.field("Count").map(|f| f.ty),
        Some(FieldType::Scalar(ScalarKind::Text))
    );
}

#[test]
fn schemas_need_a_numeric_id() {
    let missing = sheet("Shop", &[&["int"], &["Price"], &[]]);
    assert!(matches!(
        extract_schema(&missing),
        Err(ToolError::MissingIdField(sheet)) if sheet == "Shop"
    ));

    let textual = sheet("Shop", &[&["string"], &["Id"], &[]]);
    match extract_schema(&textual) {
        Err(ToolError::InvalidIdField { sheet, declared }) => {
            assert_eq!(sheet, "Shop");
            assert_eq!(declared, "string");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let float_id = sheet("Shop", &[&["float"], &["Id"], &[]]);
    assert!(extract_schema(&float_id).is_ok());
}

#[test]
fn registry_keeps_the_first_schema_per_entity() {
    let mut registry = SchemaRegistry::new();

    assert!(registry.collect(&gift_sheet()));
    assert!(!registry.collect(&gift_sheet()));
    assert!(!registry.collect(&sheet("Shop", &[&["int"], &["Price"], &[]])));
    assert!(registry.collect(&sheet("gift2", &[&["int"], &["Id"], &[]])));

    let names: Vec<&str> = registry.schemas().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["GiftConfig", "Gift2Config"]);
}

#[test]
fn capitalize_only_touches_the_first_letter() {
    assert_eq!(capitalize("gift"), "Gift");
    assert_eq!(capitalize("giftBox"), "GiftBox");
    assert_eq!(capitalize("Lobby_GiftDesML"), "Lobby_GiftDesML");
    assert_eq!(capitalize(""), "");
}

#[test]
fn fields_differing_only_in_first_letter_case_are_rejected() {
    let rows = sheet(
        "Gift",
        &[&["int", "int"], &["Id", "id"], &[]],
    );

    match extract_schema(&rows) {
        Err(ToolError::DuplicateField { entity, ident }) => {
            assert_eq!(entity, "GiftConfig");
            assert_eq!(ident, "Id");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    let mut registry = SchemaRegistry::new();
    assert!(!registry.collect(&rows));
    assert!(registry.is_empty());
}
