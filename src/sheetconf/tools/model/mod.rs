use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Declared column type taken from the first header row of a sheet.
///
/// Tokens are matched case-insensitively. Anything outside the known set is
/// kept verbatim in [`TypeToken::Unknown`] so diagnostics can name it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeToken {
    Int,
    Float,
    Bool,
    String,
    IntArray,
    FloatArray,
    StringArray,
    Unknown(String),
}

impl TypeToken {
    /// Parses a declared type cell.
    pub fn parse(declared: &str) -> Self {
        match declared.to_ascii_lowercase().as_str() {
            "int" | "int32" => TypeToken::Int,
            "float" | "float64" => TypeToken::Float,
            "bool" => TypeToken::Bool,
            "string" => TypeToken::String,
            "intarray" => TypeToken::IntArray,
            "floatarray" => TypeToken::FloatArray,
            "stringarray" => TypeToken::StringArray,
            _ => TypeToken::Unknown(declared.to_string()),
        }
    }

    /// Type of the generated field backing a column of this token.
    pub fn field_type(&self) -> FieldType {
        match self {
            TypeToken::Int => FieldType::Scalar(ScalarKind::Int),
            TypeToken::Float => FieldType::Scalar(ScalarKind::Float),
            TypeToken::Bool => FieldType::Scalar(ScalarKind::Bool),
            TypeToken::String => FieldType::Scalar(ScalarKind::Text),
            TypeToken::IntArray => FieldType::Array(ScalarKind::Int),
            TypeToken::FloatArray => FieldType::Array(ScalarKind::Float),
            TypeToken::StringArray => FieldType::Array(ScalarKind::Text),
            TypeToken::Unknown(_) => FieldType::Dynamic,
        }
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeToken::Int => write!(f, "int"),
            TypeToken::Float => write!(f, "float"),
            TypeToken::Bool => write!(f, "bool"),
            TypeToken::String => write!(f, "string"),
            TypeToken::IntArray => write!(f, "intarray"),
            TypeToken::FloatArray => write!(f, "floatarray"),
            TypeToken::StringArray => write!(f, "stringarray"),
            TypeToken::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

/// A single coerced cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

/// A homogeneous array parsed from a bracketed, comma-separated cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrayValue {
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Strings(Vec<String>),
}

impl ArrayValue {
    pub fn len(&self) -> usize {
        match self {
            ArrayValue::Ints(items) => items.len(),
            ArrayValue::Floats(items) => items.len(),
            ArrayValue::Strings(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Value stored in a [`Record`] field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    Scalar(ScalarValue),
    Array(ArrayValue),
    /// Cell text of a column whose declared type is not recognised.
    Raw(String),
}

/// One data row keyed by field name. Keys serialize in sorted order, which
/// keeps repeated runs byte-identical.
pub type Record = BTreeMap<String, TypedValue>;

/// Element kind shared by scalar and array generated types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Int,
    Float,
    Bool,
    Text,
}

/// Generated-language type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Scalar(ScalarKind),
    Array(ScalarKind),
    /// Open type for columns with an unrecognised type token.
    Dynamic,
}

impl FieldType {
    /// Whether the type can key the generated id index.
    pub fn is_numeric_scalar(&self) -> bool {
        matches!(
            self,
            FieldType::Scalar(ScalarKind::Int) | FieldType::Scalar(ScalarKind::Float)
        )
    }
}

/// Name of the field every generated entity is indexed by.
pub const ID_FIELD: &str = "Id";

/// Suffix appended to the capitalised sheet name to form the entity name.
pub const ENTITY_SUFFIX: &str = "Config";

/// Field of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    /// Exact field name from the header row, used as the JSON key.
    pub name: String,
    pub ty: FieldType,
}

/// Named schema extracted from the header rows of one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Entity name, e.g. `GiftConfig`.
    pub name: String,
    /// Sheet the schema came from. The JSON file carries this name.
    pub sheet: String,
    /// Fields in column order, each name at most once.
    pub fields: Vec<SchemaField>,
}

impl Schema {
    /// Entity name without the `Config` suffix, used to name tables, maps and
    /// accessors.
    pub fn prefix(&self) -> &str {
        self.name.strip_suffix(ENTITY_SUFFIX).unwrap_or(&self.name)
    }

    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }
}
