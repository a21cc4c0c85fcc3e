use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other} (use table, csv or json)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_delimiter() -> char {
    ','
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

impl InputConfig {
    /// the csv reader and writer only take single-byte delimiters
    pub fn delimiter_byte(&self) -> crate::Result<u8> {
        delimiter_byte(self.delimiter)
    }
}

pub fn delimiter_byte(c: char) -> crate::Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(crate::CsvLensError::Config(format!(
            "delimiter must be a single ASCII character, got '{c}'"
        )))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("csv-lens")
            .join("config.toml")
    }

    pub fn load() -> crate::Result<Self> {
        let path = if let Ok(env_path) = std::env::var("CSV_LENS_CONFIG") {
            PathBuf::from(env_path) // $CSV_LENS_CONFIG overrides default config path
        } else {
            Self::config_path()
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let cfg: Self =
            toml::from_str(&content).map_err(|e| crate::CsvLensError::Config(e.to_string()))?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::CsvLensError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
