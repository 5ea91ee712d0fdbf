pub mod code_write;
pub mod discover;
pub mod excel_read;
pub mod json_write;
