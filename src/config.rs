use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

const DEFAULT_DATA_PATH: &'static str = "adult.data.csv";

/// Where to read the dataset from and which category labels the report
/// keys on. Every field has a default, so a TOML file only needs the
/// entries it changes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub data_path: PathBuf,
    pub print_output: bool,
    pub male_label: String,
    pub bachelors_label: String,
    pub higher_education: Vec<String>,
    pub rich_label: String,
    pub focus_country: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            print_output: true,
            male_label: String::from("Male"),
            bachelors_label: String::from("Bachelors"),
            higher_education: vec![
                String::from("Bachelors"),
                String::from("Masters"),
                String::from("Doctorate"),
            ],
            rich_label: String::from(">50K"),
            focus_country: String::from("India"),
        }
    }
}

impl AnalyzerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ReportError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents).map_err(|source| ReportError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn is_higher_education(&self, education: &str) -> bool {
        self.higher_education.iter().any(|e| e == education)
    }
}
