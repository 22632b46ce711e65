use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::DataType;

/// One user-declared column: a name, a data type identifier and the free
/// text range the generator should honor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSchema {
    /// Header of the generated column. Must be non-empty.
    pub name: String,
    /// Data type identifier (see [`DataType`]). Kept as entered so that an
    /// empty or unknown type is reported per column.
    #[serde(rename = "type")]
    pub data_type: String,
    /// Range text, interpreted according to the data type.
    #[serde(default)]
    pub range: String,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: DataType, range: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.as_str().to_string(),
            range: range.into(),
        }
    }

    /// Label used in error messages; falls back to the 1-based position when
    /// the name is blank.
    pub fn label(&self, position: usize) -> String {
        let name = self.name.trim();
        if name.is_empty() {
            format!("#{}", position + 1)
        } else {
            name.to_string()
        }
    }
}

/// On-disk schema file: a JSON array of columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SchemaFile {
    pub columns: Vec<ColumnSchema>,
}
