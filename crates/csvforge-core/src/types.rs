use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Closed set of column data types understood by the generator.
///
/// The serialized identifiers are stable and match the values users type
/// into schema files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Date,
    Time,
    FloatRange,
    IntegerRange,
    RangeNegative,
    Choice,
    Boolean,
    Name,
    Phone,
    Email,
    Random,
    #[serde(rename = "fromloadcsv")]
    FromLoadCsv,
}

impl DataType {
    pub const ALL: [DataType; 12] = [
        DataType::Date,
        DataType::Time,
        DataType::FloatRange,
        DataType::IntegerRange,
        DataType::RangeNegative,
        DataType::Choice,
        DataType::Boolean,
        DataType::Name,
        DataType::Phone,
        DataType::Email,
        DataType::Random,
        DataType::FromLoadCsv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Date => "date",
            DataType::Time => "time",
            DataType::FloatRange => "float_range",
            DataType::IntegerRange => "integer_range",
            DataType::RangeNegative => "range_negative",
            DataType::Choice => "choice",
            DataType::Boolean => "boolean",
            DataType::Name => "name",
            DataType::Phone => "phone",
            DataType::Email => "email",
            DataType::Random => "random",
            DataType::FromLoadCsv => "fromloadcsv",
        }
    }

    /// Whether the type reads anything from the range text.
    pub fn requires_range(&self) -> bool {
        matches!(
            self,
            DataType::Date
                | DataType::Time
                | DataType::FloatRange
                | DataType::IntegerRange
                | DataType::RangeNegative
                | DataType::Choice
        )
    }

    /// Human-readable syntax hint used in error messages and `--help`.
    pub fn range_hint(&self) -> Option<&'static str> {
        match self {
            DataType::Date => Some("DD.MM.YYYY-DD.MM.YYYY"),
            DataType::Time => Some("HH:MM:SS-HH:MM:SS"),
            DataType::FloatRange | DataType::IntegerRange => Some("NUM-NUM"),
            DataType::RangeNegative => Some("NUM, NUM"),
            DataType::Choice => Some("value, value[, ...]"),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        DataType::ALL
            .iter()
            .find(|data_type| data_type.as_str() == value)
            .copied()
            .ok_or_else(|| format!("unknown data type '{value}'"))
    }
}

/// Policy for the synthetic leading `index` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum IndexMode {
    /// Sequential integers starting at 1.
    #[default]
    Auto,
    /// Integers drawn in order from `[min, max]` with random gaps.
    Custom { min: i64, max: i64 },
    /// No index column.
    None,
}

impl IndexMode {
    /// Header used for the index column.
    pub const HEADER: &'static str = "index";

    /// Build a mode from its identifier and, for `custom`, a `MIN-MAX` range.
    pub fn parse(mode: &str, custom_range: Option<&str>) -> Result<Self, String> {
        match mode.trim() {
            "auto" => Ok(IndexMode::Auto),
            "none" => Ok(IndexMode::None),
            "custom" => {
                let range = custom_range
                    .map(str::trim)
                    .filter(|range| !range.is_empty())
                    .ok_or_else(|| "custom index mode requires a MIN-MAX range".to_string())?;
                let (min, max) = crate::range::split_interval(range, '-')
                    .ok_or_else(|| format!("invalid custom index range '{range}'"))?;
                let min = parse_index_bound(min)?;
                let max = parse_index_bound(max)?;
                if min > max {
                    return Err(format!("custom index range min must be <= max: '{range}'"));
                }
                Ok(IndexMode::Custom { min, max })
            }
            other => Err(format!("unknown index mode '{other}'")),
        }
    }
}

fn parse_index_bound(value: &str) -> Result<i64, String> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("custom index bound '{}' is not an integer", value.trim()))
}
