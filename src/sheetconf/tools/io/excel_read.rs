use std::path::Path;

use calamine::{DataType, Reader, open_workbook_auto};

use crate::sheetconf::tools::error::{Result, ToolError};
use crate::sheetconf::tools::sheet::SheetRows;

/// Reads every sheet of a workbook, in workbook order, as rows of text cells.
///
/// Trailing blank cells are dropped from each row, so a blank row has no
/// cells at all.
pub fn read_sheets(path: &Path) -> Result<Vec<SheetRows>> {
    let mut workbook = open_workbook_auto(path)?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names().to_vec() {
        let range = workbook
            .worksheet_range(&name)
            .ok_or_else(|| ToolError::InvalidWorkbook(format!("missing sheet '{name}'")))??;

        // Ranges start at the first used cell; pad back to A1 so header rows
        // and columns keep their absolute positions.
        let (first_row, first_col) = range.start().unwrap_or((0, 0));
        let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row as usize];
        for row in range.rows() {
            let mut cells = vec![String::new(); first_col as usize];
            cells.extend(row.iter().map(|cell| cell_to_string(Some(cell))));
            while cells.last().is_some_and(String::is_empty) {
                cells.pop();
            }
            rows.push(cells);
        }
        sheets.push(SheetRows::new(name, rows));
    }

    Ok(sheets)
}

fn cell_to_string(cell: Option<&DataType>) -> String {
    match cell {
        Some(DataType::String(value)) => value.clone(),
        Some(DataType::Float(value)) => value.to_string(),
        Some(DataType::Int(value)) => value.to_string(),
        Some(DataType::Bool(value)) => value.to_string(),
        Some(DataType::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
