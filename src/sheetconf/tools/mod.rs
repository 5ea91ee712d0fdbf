pub mod codegen;
pub mod coerce;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod sheet;

pub use error::{Result, ToolError};
