use std::fmt::Write;

use crate::sheetconf::tools::codegen::{GoEntity, GoFile};
use crate::sheetconf::tools::error::Result;
use crate::sheetconf::tools::model::ID_FIELD;

/// Renders a generated file as gofmt-formatted Go source.
pub fn render(file: &GoFile) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "// Code generated by sheetconf-tools. DO NOT EDIT.")?;
    writeln!(out)?;
    writeln!(out, "package {}", file.package)?;

    // Without entities nothing would use the imports, which Go rejects.
    if !file.entities.is_empty() {
        writeln!(out)?;
        writeln!(out, "import (")?;
        writeln!(out, "\t\"encoding/json\"")?;
        writeln!(out, "\t\"os\"")?;
        writeln!(out, "\t\"sync\"")?;
        writeln!(out, ")")?;
    }

    writeln!(out)?;
    writeln!(out, "// InitConfig loads every config table. It panics when a table cannot be read.")?;
    writeln!(out, "func InitConfig() {{")?;
    for entity in &file.entities {
        writeln!(out, "\t{}()", entity.init_fn())?;
    }
    writeln!(out, "}}")?;

    for entity in &file.entities {
        render_entity(&mut out, entity)?;
    }

    Ok(out)
}

fn render_entity(out: &mut String, entity: &GoEntity) -> Result<()> {
    let type_name = &entity.type_name;
    let table = entity.table_var();
    let map = entity.map_var();

    writeln!(out)?;
    writeln!(out, "type {type_name} struct {{")?;
    let ident_width = entity.fields.iter().map(|f| f.ident.len()).max().unwrap_or(0);
    let type_width = entity.fields.iter().map(|f| f.go_type.len()).max().unwrap_or(0);
    for field in &entity.fields {
        writeln!(
            out,
            "\t{:<ident_width$} {:<type_width$} `json:\"{}\"`",
            field.ident, field.go_type, field.json_name
        )?;
    }
    writeln!(out, "}}")?;

    writeln!(out)?;
    writeln!(out, "var {table} []*{type_name}")?;
    writeln!(out, "var {map} sync.Map")?;

    let read_failed = go_quote(&format!("{} Error reading file: ", entity.prefix));
    let decode_failed = go_quote(&format!("{} Error unmarshalling JSON: ", entity.prefix));
    writeln!(out)?;
    writeln!(out, "func {}() {{", entity.init_fn())?;
    writeln!(out, "\tfileContent, err := os.ReadFile({})", go_quote(&entity.json_path))?;
    writeln!(out, "\tif err != nil {{")?;
    writeln!(out, "\t\tpanic({read_failed} + err.Error())")?;
    writeln!(out, "\t}}")?;
    writeln!(out, "\tif err := json.Unmarshal(fileContent, &{table}); err != nil {{")?;
    writeln!(out, "\t\tpanic({decode_failed} + err.Error())")?;
    writeln!(out, "\t}}")?;
    writeln!(out, "\tfor _, v := range {table} {{")?;
    writeln!(out, "\t\t{map}.Store(v.{ID_FIELD}, v)")?;
    writeln!(out, "\t}}")?;
    writeln!(out, "}}")?;

    let getter = entity.getter_fn();
    writeln!(out)?;
    writeln!(out, "// {getter} returns the {type_name} with the given Id, or nil.")?;
    writeln!(out, "func {getter}(id {}) *{type_name} {{", entity.id_type)?;
    writeln!(out, "\tif v, ok := {map}.Load(id); ok {{")?;
    writeln!(out, "\t\treturn v.(*{type_name})")?;
    writeln!(out, "\t}}")?;
    writeln!(out, "\treturn nil")?;
    writeln!(out, "}}")?;

    Ok(())
}

/// Interpreted Go string literal for `value`.
pub fn go_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            ch if ch.is_control() => {
                let mut buf = [0u8; 4];
                for byte in ch.encode_utf8(&mut buf).bytes() {
                    quoted.push_str(&format!("\\x{byte:02x}"));
                }
            }
            ch => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
