//! TOML-based configuration for orderlens.
//!
//! Supports a config file (orderlens.toml) with environment variable
//! expansion in paths.
//!
//! Example configuration:
//! ```toml
//! [dataset]
//! dir = "${OLIST_DATA}/Cleaned"
//! reviews = "order_reviews_cleaned.csv"
//!
//! [filters]
//! top_n = 10
//! categories = ["All Categories"]
//! shipping_time = [0.0, 60.0]
//! review_score = [1, 5]
//!
//! [output]
//! format = "json"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::{DatasetSource, TableKind};
use crate::filter::{FilterParams, ALL_CATEGORIES, DEFAULT_TOP_N};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Where the base tables live.
    pub dataset: DatasetSettings,

    /// Filter values used when none are given on the command line.
    pub filters: FilterSettings,

    /// Output configuration.
    pub output: OutputSettings,
}

/// Dataset location. File names are relative to `dir` unless absolute.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatasetSettings {
    /// Directory holding the CSV files (supports ${ENV_VAR} expansion).
    pub dir: String,
    pub orders: String,
    pub order_items: String,
    pub products: String,
    pub reviews: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            dir: "Cleaned".to_string(),
            orders: TableKind::Orders.default_file_name().to_string(),
            order_items: TableKind::OrderItems.default_file_name().to_string(),
            products: TableKind::Products.default_file_name().to_string(),
            reviews: TableKind::Reviews.default_file_name().to_string(),
        }
    }
}

impl DatasetSettings {
    /// Resolve the four table paths with environment variables expanded.
    pub fn source(&self) -> Result<DatasetSource, SettingsError> {
        let dir = PathBuf::from(expand_env_vars(&self.dir)?);
        self.source_in(&dir)
    }

    /// Resolve the configured file names under `dir` instead of `self.dir`.
    pub fn source_in(&self, dir: &Path) -> Result<DatasetSource, SettingsError> {
        let resolve = |file: &str| -> Result<PathBuf, SettingsError> {
            Ok(dir.join(expand_env_vars(file)?))
        };

        Ok(DatasetSource {
            orders: resolve(&self.orders)?,
            order_items: resolve(&self.order_items)?,
            products: resolve(&self.products)?,
            reviews: resolve(&self.reviews)?,
        })
    }
}

/// Default filter selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterSettings {
    pub top_n: i64,

    /// Selected categories; "All Categories" or an empty list means all.
    pub categories: Vec<String>,

    /// Inclusive shipping-time bounds in days. Unbounded if unset.
    pub shipping_time: Option<[f64; 2]>,

    /// Inclusive review-score bounds.
    pub review_score: [i64; 2],
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N as i64,
            categories: vec![ALL_CATEGORIES.to_string()],
            shipping_time: None,
            review_score: [1, 5],
        }
    }
}

impl FilterSettings {
    /// Raw filter parameters; validation happens in `FilterContext::new`.
    pub fn to_params(&self) -> FilterParams {
        FilterParams {
            top_n: self.top_n,
            categories: self.categories.clone(),
            shipping_time: self.shipping_time.map(|[min, max]| (min, max)),
            review_score: Some((self.review_score[0], self.review_score[1])),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `ORDERLENS_CONFIG`
    /// 2. `./orderlens.toml`
    /// 3. `~/.config/orderlens/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("ORDERLENS_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("orderlens.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("orderlens").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            // $VAR ends at the first non-alphanumeric/underscore
            while let Some(&ch) = chars.peek() {
                if !(ch.is_alphanumeric() || ch == '_') {
                    break;
                }
                var_name.push(ch);
                chars.next();
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
        }

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
