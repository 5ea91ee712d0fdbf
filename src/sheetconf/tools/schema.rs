use std::collections::HashSet;

use tracing::warn;

use crate::sheetconf::tools::error::{Result, ToolError};
use crate::sheetconf::tools::model::{
    ENTITY_SUFFIX, ID_FIELD, Schema, SchemaField, TypeToken,
};
use crate::sheetconf::tools::sheet::SheetRows;

/// Builds the schema of a sheet from its type and field-name rows.
///
/// The entity is named after the sheet with its first letter capitalised and
/// `Config` appended. A repeated field name keeps its first position and the
/// type of its last occurrence. The sheet must declare a numeric `Id` column.
pub fn extract_schema(sheet: &SheetRows) -> Result<Schema> {
    let (type_row, field_row) = sheet.header()?;

    let mut fields: Vec<SchemaField> = Vec::new();
    for (col, field) in field_row.iter().enumerate() {
        if field.is_empty() {
            continue;
        }
        let token = TypeToken::parse(type_row.get(col).map(String::as_str).unwrap_or_default());
        let ty = token.field_type();
        match fields.iter_mut().find(|existing| existing.name == *field) {
            Some(existing) => existing.ty = ty,
            None => fields.push(SchemaField {
                name: field.clone(),
                ty,
            }),
        }
    }

    let schema = Schema {
        name: entity_name(&sheet.name),
        sheet: sheet.name.clone(),
        fields,
    };
    validate_id(&schema, type_row, field_row)?;
    ensure_distinct_idents(&schema)?;
    Ok(schema)
}

/// Entity name generated for a sheet, e.g. `gift` becomes `GiftConfig`.
pub fn entity_name(sheet: &str) -> String {
    format!("{}{ENTITY_SUFFIX}", capitalize(sheet))
}

/// Rejects schemas whose field names collide once capitalised, such as `id`
/// next to `Id`.
pub fn ensure_distinct_idents(schema: &Schema) -> Result<()> {
    let mut seen = HashSet::new();
    for field in &schema.fields {
        let ident = capitalize(&field.name);
        if !seen.insert(ident.clone()) {
            return Err(ToolError::DuplicateField {
                entity: schema.name.clone(),
                ident,
            });
        }
    }
    Ok(())
}

fn validate_id(schema: &Schema, type_row: &[String], field_row: &[String]) -> Result<()> {
    let Some(id) = schema.field(ID_FIELD) else {
        return Err(ToolError::MissingIdField(schema.sheet.clone()));
    };
    if id.ty.is_numeric_scalar() {
        return Ok(());
    }

    let declared = field_row
        .iter()
        .rposition(|field| field == ID_FIELD)
        .and_then(|col| type_row.get(col))
        .cloned()
        .unwrap_or_default();
    Err(ToolError::InvalidIdField {
        sheet: schema.sheet.clone(),
        declared,
    })
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Ordered collection of the schemas gathered during one run.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: Vec<Schema>,
    names: HashSet<String>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a schema unless another one already claimed its entity name.
    pub fn register(&mut self, schema: Schema) -> Result<()> {
        if !self.names.insert(schema.name.clone()) {
            return Err(ToolError::DuplicateEntity(schema.name));
        }
        self.schemas.push(schema);
        Ok(())
    }

    /// Extracts and registers the schema of `sheet`. Sheets that cannot
    /// produce a usable schema are logged and left out.
    pub fn collect(&mut self, sheet: &SheetRows) -> bool {
        match extract_schema(sheet).and_then(|schema| self.register(schema)) {
            Ok(()) => true,
            Err(error) => {
                warn!(sheet = %sheet.name, "skipping code generation: {error}");
                false
            }
        }
    }

    pub fn schemas(&self) -> &[Schema] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn into_schemas(self) -> Vec<Schema> {
        self.schemas
    }
}
