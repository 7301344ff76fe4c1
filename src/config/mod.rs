//! Configuration module for orderlens.
//!
//! Handles the settings file, environment variable expansion and the
//! defaults for dataset location and filters.

mod settings;

pub use settings::{
    expand_env_vars, DatasetSettings, FilterSettings, OutputFormat, OutputSettings, Settings,
    SettingsError,
};
