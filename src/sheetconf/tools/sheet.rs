use crate::sheetconf::tools::coerce::{Coercion, coerce_with};
use crate::sheetconf::tools::error::{Result, ToolError};
use crate::sheetconf::tools::model::{Record, TypeToken};

/// Row holding the declared column types.
pub const TYPE_ROW: usize = 0;
/// Row holding the field names.
pub const FIELD_ROW: usize = 1;
/// Number of header rows preceding the data; the third one holds comments.
pub const HEADER_ROWS: usize = 3;

/// Text cells of one named sheet, as decoded from a workbook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRows {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetRows {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Returns the type and field-name rows, or an error when the sheet is
    /// shorter than the three header rows.
    pub fn header(&self) -> Result<(&[String], &[String])> {
        if self.rows.len() < HEADER_ROWS {
            return Err(ToolError::TooFewRows {
                sheet: self.name.clone(),
                rows: self.rows.len(),
            });
        }
        Ok((&self.rows[TYPE_ROW], &self.rows[FIELD_ROW]))
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(HEADER_ROWS..).unwrap_or_default()
    }
}

/// Converts the data rows of a sheet into records, in row order.
///
/// Columns with a blank field name are ignored, as are cells past the end of
/// a short row. Rows without any cells produce no record.
pub fn parse_sheet(sheet: &SheetRows, policy: Coercion) -> Result<Vec<Record>> {
    let (type_row, field_row) = sheet.header()?;
    let tokens: Vec<TypeToken> = (0..field_row.len())
        .map(|col| TypeToken::parse(type_row.get(col).map(String::as_str).unwrap_or_default()))
        .collect();

    let mut records = Vec::new();
    for row in sheet.data_rows() {
        if row.is_empty() {
            continue;
        }

        let mut record = Record::new();
        for (col, field) in field_row.iter().enumerate() {
            if field.is_empty() {
                continue;
            }
            let Some(cell) = row.get(col) else {
                continue;
            };
            let value = coerce_with(policy, &tokens[col], cell, field)?;
            record.insert(field.clone(), value);
        }
        records.push(record);
    }

    Ok(records)
}
