//! Generated data-access code.
//!
//! Schemas are first lowered into a small Go-specific representation
//! ([`GoFile`]) that fixes every identifier, type and path, and only then
//! rendered to text by [`go::render`].

pub mod go;

use crate::sheetconf::tools::config::DEFAULT_JSON_OUTPUT_DIR;
use crate::sheetconf::tools::error::{Result, ToolError};
use crate::sheetconf::tools::model::{FieldType, ID_FIELD, ScalarKind, Schema};
use crate::sheetconf::tools::schema::{capitalize, ensure_distinct_idents};

/// Name of the generated source file inside the code output directory.
pub const GENERATED_FILE: &str = "autoConfig.go";
/// Package declared by the generated file unless configured otherwise.
pub const DEFAULT_PACKAGE: &str = "config";

/// Settings shared by every entity of a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenOptions {
    pub package: String,
    /// JSON output directory as configured, used for the load paths.
    pub json_dir: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            json_dir: DEFAULT_JSON_OUTPUT_DIR.to_string(),
        }
    }
}

/// A whole generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoFile {
    pub package: String,
    pub entities: Vec<GoEntity>,
}

/// Record type plus its table, index map, loader and accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoEntity {
    /// Record type name, e.g. `GiftConfig`.
    pub type_name: String,
    /// Prefix of the table and map variables, e.g. `Gift`.
    pub prefix: String,
    /// Path of the JSON file read by the loader.
    pub json_path: String,
    /// Go type of the `Id` field and of the accessor parameter.
    pub id_type: String,
    pub fields: Vec<GoField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoField {
    pub ident: String,
    pub go_type: String,
    /// JSON key the field is tagged with.
    pub json_name: String,
}

impl GoEntity {
    pub fn table_var(&self) -> String {
        format!("{}ListTable", self.prefix)
    }

    pub fn map_var(&self) -> String {
        format!("{}ListMap", self.prefix)
    }

    pub fn init_fn(&self) -> String {
        format!("init{}", self.type_name)
    }

    pub fn getter_fn(&self) -> String {
        format!("Get{}", self.type_name)
    }
}

/// Lowers the schemas, in order, into a generated file description.
pub fn build(schemas: &[Schema], options: &CodegenOptions) -> Result<GoFile> {
    let entities = schemas
        .iter()
        .map(|schema| build_entity(schema, &options.json_dir))
        .collect::<Result<Vec<_>>>()?;

    Ok(GoFile {
        package: options.package.clone(),
        entities,
    })
}

fn build_entity(schema: &Schema, json_dir: &str) -> Result<GoEntity> {
    let id = schema
        .field(ID_FIELD)
        .ok_or_else(|| ToolError::MissingIdField(schema.sheet.clone()))?;
    ensure_distinct_idents(schema)?;

    let fields = schema
        .fields
        .iter()
        .map(|field| GoField {
            ident: capitalize(&field.name),
            go_type: go_type(field.ty),
            json_name: field.name.clone(),
        })
        .collect();

    Ok(GoEntity {
        type_name: schema.name.clone(),
        prefix: schema.prefix().to_string(),
        json_path: json_load_path(json_dir, &schema.sheet),
        id_type: go_type(id.ty),
        fields,
    })
}

/// Go spelling of a field type.
pub fn go_type(ty: FieldType) -> String {
    match ty {
        FieldType::Scalar(kind) => scalar_go_type(kind).to_string(),
        FieldType::Array(kind) => format!("[]{}", scalar_go_type(kind)),
        FieldType::Dynamic => "interface{}".to_string(),
    }
}

fn scalar_go_type(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Int => "int32",
        ScalarKind::Float => "float64",
        ScalarKind::Bool => "bool",
        ScalarKind::Text => "string",
    }
}

/// Relative path the generated loader reads a sheet's JSON from, e.g.
/// `./jsons/Gift.json`. Absolute and explicitly relative directories are kept
/// as written.
pub fn json_load_path(json_dir: &str, sheet: &str) -> String {
    let dir = json_dir.trim_end_matches(['/', '\\']);
    if dir.is_empty() {
        return format!("./{sheet}.json");
    }
    let anchored = dir == "."
        || dir == ".."
        || dir.starts_with("./")
        || dir.starts_with("../")
        || dir.starts_with('/')
        || std::path::Path::new(dir).is_absolute();
    if anchored {
        format!("{dir}/{sheet}.json")
    } else {
        format!("./{dir}/{sheet}.json")
    }
}
