use csvforge_core::{CellValue, ColumnSchema, DataType, Dataset, IndexMode};
use csvforge_generate::{
    GenerateOptions, GenerationContext, GenerationEngine, GenerationRequest, LexiconHandle,
    escape_csv, import_csv, infer_schema, parse, serialize,
};

#[test]
fn escape_wraps_and_doubles_quotes() {
    assert_eq!(escape_csv("a,b\"c"), "\"a,b\"\"c\"");
    assert_eq!(escape_csv("plain"), "plain");
}

#[test]
fn serialized_generation_round_trips() {
    let lexicon = LexiconHandle::pending();
    let ctx = GenerationContext::new(&lexicon);
    let request = GenerationRequest::new(
        vec![
            ColumnSchema::new("when", DataType::Date, "01.01.2020-01.01.2021"),
            ColumnSchema::new("at", DataType::Time, "08:00:00-18:00:00"),
            ColumnSchema::new("label", DataType::Choice, "\"a\",b, c\"d"),
            ColumnSchema::new("mail", DataType::Email, ""),
        ],
        40,
    );
    let result = GenerationEngine::new(GenerateOptions::seeded(11))
        .run(&request, &ctx)
        .expect("run generation");

    let text = serialize(&result.dataset).expect("serialize");
    let parsed = parse(&text).expect("parse");
    assert_eq!(parsed.row_count(), 40);
    assert_eq!(serialize(&parsed).expect("serialize"), text);
}

#[test]
fn embedded_line_breaks_survive() {
    let dataset = Dataset::new(
        vec!["note".to_string(), "n".to_string()],
        vec![
            vec![CellValue::Text("two\nlines".to_string()), CellValue::Int(1)],
            vec![CellValue::Missing, CellValue::Int(2)],
        ],
    )
    .expect("dataset");

    let parsed = parse(&serialize(&dataset).expect("serialize")).expect("parse");
    assert_eq!(
        parsed.cell(0, "note"),
        Some(&CellValue::Text("two\nlines".to_string()))
    );
    assert_eq!(parsed.cell(1, "note"), Some(&CellValue::Missing));
}

#[test]
fn single_column_missing_cells_round_trip() {
    let dataset = Dataset::new(
        vec!["a".to_string()],
        vec![
            vec![CellValue::Text("x".to_string())],
            vec![CellValue::Missing],
            vec![CellValue::Text("y".to_string())],
        ],
    )
    .expect("dataset");

    let text = serialize(&dataset).expect("serialize");
    assert_eq!(text, "a\nx\n\"\"\ny");

    let parsed = parse(&text).expect("parse");
    assert_eq!(parsed.row_count(), 3);
    assert_eq!(parsed.cell(1, "a"), Some(&CellValue::Missing));
    assert_eq!(parsed.cell(2, "a"), Some(&CellValue::Text("y".to_string())));
    assert_eq!(serialize(&parsed).expect("serialize"), text);
}

#[test]
fn copied_column_with_gaps_keeps_row_alignment() {
    let lexicon = LexiconHandle::pending();
    let imported = import_csv("city,code\nMoscow,77\nKazan,\nOmsk,55")
        .expect("import")
        .dataset;
    let ctx = GenerationContext::new(&lexicon).with_imported(&imported);
    let request = GenerationRequest::new(
        vec![ColumnSchema::new("code", DataType::FromLoadCsv, "")],
        3,
    )
    .with_index(IndexMode::None);

    let result = GenerationEngine::new(GenerateOptions::seeded(5))
        .run(&request, &ctx)
        .expect("run generation");
    let text = serialize(&result.dataset).expect("serialize");
    assert_eq!(text, "code\n77\n\"\"\n55");

    let parsed = parse(&text).expect("parse");
    assert_eq!(parsed.row_count(), 3);
    assert_eq!(parsed.cell(1, "code"), Some(&CellValue::Missing));
    assert_eq!(parsed.cell(2, "code"), Some(&CellValue::Text("55".to_string())));
}

#[test]
fn import_normalizes_headers_and_rows() {
    let imported = import_csv("id,,id, name \n1,a,x,NaN\n,,,\n2,,y,z").expect("import");

    assert_eq!(imported.dataset.columns(), ["id", "Column_2", "id_2", "name"]);
    assert_eq!(imported.dataset.row_count(), 2);

    let summary = &imported.summary;
    assert_eq!(summary.rows, 2);
    assert_eq!(summary.columns, 4);
    assert_eq!(summary.dropped_empty_rows, 1);
    assert_eq!(summary.missing_cells, 1);
    assert_eq!(summary.rows_with_missing, 1);
    assert_eq!(summary.nan_cells, 1);
    assert_eq!(summary.renamed_headers, 3);
}

#[test]
fn inferred_schema_lists_distinct_values() {
    let imported = import_csv("city,code\nMoscow,77\nKazan,\nMoscow,16").expect("import");
    let schema = infer_schema(&imported.dataset);

    assert_eq!(
        schema,
        vec![
            ColumnSchema::new("city", DataType::FromLoadCsv, "Moscow, Kazan"),
            ColumnSchema::new("code", DataType::FromLoadCsv, "77, 16"),
        ]
    );
}
