use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::sheetconf::tools::config::Settings;
use crate::sheetconf::tools::error::{Result, ToolError};
use crate::sheetconf::tools::io::{code_write, discover, excel_read, json_write};
use crate::sheetconf::tools::schema::{SchemaRegistry, entity_name};
use crate::sheetconf::tools::sheet::{SheetRows, parse_sheet};

/// Outcome of a full run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Workbooks that were opened and processed.
    pub workbooks: usize,
    /// Workbooks that could not be opened.
    pub workbooks_skipped: usize,
    /// JSON files written, in processing order.
    pub json_files: Vec<PathBuf>,
    /// Sheets that produced no JSON file.
    pub sheets_skipped: usize,
    /// Names of the generated entities, in generation order.
    pub entities: Vec<String>,
    pub generated_file: PathBuf,
}

/// Converts every spreadsheet under the configured directory into JSON files
/// and one generated source file.
///
/// The files in the JSON directory are removed first, unless that directory
/// holds the spreadsheets or the generated code, which aborts the run. When
/// several sheets map onto the same entity the first one is kept and the
/// others are skipped entirely, so each JSON file matches its generated type.
/// Failures limited to a workbook or a sheet are logged and skipped; failures
/// to prepare the output directories, walk the input directory or write the
/// generated file abort the run.
pub fn run(settings: &Settings) -> Result<RunReport> {
    let json_dir = settings.json_dir();
    json_write::ensure_disjoint(
        &json_dir,
        &[settings.excel_dir.as_path(), settings.go_output_dir.as_path()],
    )?;
    json_write::reset_output_dir(&json_dir)?;

    let workbooks = discover::find_spreadsheets(&settings.excel_dir)?;
    let mut registry = SchemaRegistry::new();
    let mut claimed: HashSet<String> = HashSet::new();
    let mut report = RunReport::default();

    for path in &workbooks {
        info!(path = %path.display(), "processing workbook");
        let sheets = match excel_read::read_sheets(path) {
            Ok(sheets) => sheets,
            Err(error) => {
                warn!(path = %path.display(), "cannot open workbook, skipping: {error}");
                report.workbooks_skipped += 1;
                continue;
            }
        };
        report.workbooks += 1;

        for sheet in &sheets {
            let entity = entity_name(&sheet.name);
            if claimed.contains(&entity) {
                let error = ToolError::DuplicateEntity(entity);
                warn!(sheet = %sheet.name, path = %path.display(), "skipping sheet: {error}");
                report.sheets_skipped += 1;
                continue;
            }
            match convert_sheet(sheet, settings, &json_dir) {
                Some(json_file) => {
                    claimed.insert(entity);
                    report.json_files.push(json_file);
                    registry.collect(sheet);
                }
                None => report.sheets_skipped += 1,
            }
        }
    }

    report.entities = registry
        .schemas()
        .iter()
        .map(|schema| schema.name.clone())
        .collect();
    report.generated_file = code_write::write_generated(
        &settings.go_output_dir,
        registry.schemas(),
        &settings.codegen_options(),
    )?;
    info!(
        path = %report.generated_file.display(),
        entities = report.entities.len(),
        "generated config code"
    );

    Ok(report)
}

/// Writes the JSON file of one sheet. Returns `None` when the sheet was
/// skipped, in which case no entity is generated for it either since its
/// loader would have nothing to read.
fn convert_sheet(sheet: &SheetRows, settings: &Settings, json_dir: &Path) -> Option<PathBuf> {
    debug!(sheet = %sheet.name, rows = sheet.rows.len(), "processing sheet");

    let records = match parse_sheet(sheet, settings.coercion) {
        Ok(records) => records,
        Err(error) => {
            warn!(sheet = %sheet.name, "skipping sheet: {error}");
            return None;
        }
    };
    if records.is_empty() {
        info!(sheet = %sheet.name, "sheet has no data rows, skipping");
        return None;
    }

    match json_write::write_records(json_dir, &sheet.name, &records) {
        Ok(path) => {
            info!(sheet = %sheet.name, records = records.len(), path = %path.display(), "wrote JSON");
            Some(path)
        }
        Err(error) => {
            warn!(sheet = %sheet.name, "failed to write JSON: {error}");
            None
        }
    }
}
