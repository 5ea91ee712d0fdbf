use std::fs;
use std::path::{Path, PathBuf};

use crate::sheetconf::tools::codegen::{self, CodegenOptions, GENERATED_FILE};
use crate::sheetconf::tools::error::Result;
use crate::sheetconf::tools::model::Schema;

/// Renders the schemas and writes the generated file into `dir`, creating the
/// directory if needed.
pub fn write_generated(dir: &Path, schemas: &[Schema], options: &CodegenOptions) -> Result<PathBuf> {
    let file = codegen::build(schemas, options)?;
    let source = codegen::go::render(&file)?;

    fs::create_dir_all(dir)?;
    let path = dir.join(GENERATED_FILE);
    fs::write(&path, source)?;
    Ok(path)
}
