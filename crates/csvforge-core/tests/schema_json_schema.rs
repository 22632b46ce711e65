use csvforge_core::SchemaFile;
use schemars::schema_for;

#[test]
fn json_schema_describes_column_fields() {
    let generated = schema_for!(SchemaFile);
    let generated_json = serde_json::to_value(&generated).expect("serialize generated schema");

    assert_eq!(generated_json["type"], "array");

    let column = &generated_json["definitions"]["ColumnSchema"];
    let properties = column["properties"]
        .as_object()
        .expect("column properties");
    let mut keys: Vec<&str> = properties.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["name", "range", "type"]);

    let required: Vec<&str> = column["required"]
        .as_array()
        .expect("required list")
        .iter()
        .filter_map(|value| value.as_str())
        .collect();
    assert!(required.contains(&"name"));
    assert!(required.contains(&"type"));
    assert!(!required.contains(&"range"));
}
