//! Core library for the sheetconf-tools command line application.
//!
//! Spreadsheets following the three-row header convention (declared types,
//! field names, comments) are turned into one JSON file per sheet and a
//! generated Go source file with typed records and id-indexed lookups.
//! Decoding and file IO live under [`sheetconf::tools::io`], the cell typing in
//! [`sheetconf::tools::coerce`] and [`sheetconf::tools::sheet`], schema
//! extraction in [`sheetconf::tools::schema`], code emission in
//! [`sheetconf::tools::codegen`], and the end-to-end run in
//! [`sheetconf::tools::pipeline`].

pub mod sheetconf;

pub use sheetconf::tools::{
    Result, ToolError, codegen, coerce, config, error, io, model, pipeline, schema, sheet,
};
