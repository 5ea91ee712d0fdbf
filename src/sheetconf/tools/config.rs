use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::sheetconf::tools::codegen::{CodegenOptions, DEFAULT_PACKAGE};
use crate::sheetconf::tools::coerce::Coercion;
use crate::sheetconf::tools::error::Result;

pub const DEFAULT_SETTINGS_FILE: &str = "./dirConf.json";
pub const DEFAULT_EXCEL_DIR: &str = "./excel";
pub const DEFAULT_JSON_OUTPUT_DIR: &str = "./jsons";
pub const DEFAULT_GO_OUTPUT_DIR: &str = "./autoConfig";

/// Contents of the settings file. Every key is optional and an empty string
/// counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirConf {
    pub excel_dir: Option<String>,
    pub json_output_dir: Option<String>,
    pub go_output_dir: Option<String>,
    pub go_package: Option<String>,
    pub strict_numbers: Option<bool>,
}

impl DirConf {
    pub fn parse(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub excel_dir: PathBuf,
    /// Kept as written since generated loaders embed it in their paths.
    pub json_output_dir: String,
    pub go_output_dir: PathBuf,
    pub go_package: String,
    pub coercion: Coercion,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(DirConf::default())
    }
}

impl From<DirConf> for Settings {
    fn from(conf: DirConf) -> Self {
        Self {
            excel_dir: PathBuf::from(or_default(conf.excel_dir, DEFAULT_EXCEL_DIR)),
            json_output_dir: or_default(conf.json_output_dir, DEFAULT_JSON_OUTPUT_DIR),
            go_output_dir: PathBuf::from(or_default(conf.go_output_dir, DEFAULT_GO_OUTPUT_DIR)),
            go_package: or_default(conf.go_package, DEFAULT_PACKAGE),
            coercion: if conf.strict_numbers.unwrap_or(false) {
                Coercion::Strict
            } else {
                Coercion::Lenient
            },
        }
    }
}

impl Settings {
    pub fn json_dir(&self) -> PathBuf {
        PathBuf::from(&self.json_output_dir)
    }

    pub fn codegen_options(&self) -> CodegenOptions {
        CodegenOptions {
            package: self.go_package.clone(),
            json_dir: self.json_output_dir.clone(),
        }
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Loads the settings file, falling back to the built-in defaults when it is
/// missing, unreadable or malformed.
pub fn load_settings(path: &Path) -> Settings {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no settings file, using default directories");
            return Settings::default();
        }
        Err(error) => {
            warn!(path = %path.display(), "cannot read settings file, using defaults: {error}");
            return Settings::default();
        }
    };

    match DirConf::parse(&source) {
        Ok(conf) => Settings::from(conf),
        Err(error) => {
            warn!(path = %path.display(), "malformed settings file, using defaults: {error}");
            Settings::default()
        }
    }
}
