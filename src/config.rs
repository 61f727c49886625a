//! Conversion settings.
//!
//! Settings are layered with the `config` crate, lowest priority first:
//! built-in defaults, an optional config file, `SAPMON_*` environment
//! variables, then command line flags.

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

/// Tag name that switches the alert tree mapper to keying records by the
/// first branch below the tree root.
pub const ROOT_TAG: &str = "ROOT";

/// Prefix of environment variables, e.g. `SAPMON_MEASUREMENT`.
pub const ENV_PREFIX: &str = "SAPMON";

/// Which alert records get the node's own timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum TimestampScope {
    /// Only records carrying a `string` field.
    String,
    /// Only records carrying a `float` field.
    Float,
    /// Every record.
    #[default]
    All,
}

impl TimestampScope {
    pub fn as_str(self) -> &'static str {
        match self {
            TimestampScope::String => "string",
            TimestampScope::Float => "float",
            TimestampScope::All => "all",
        }
    }
}

/// Anything other than `string` or `float` means all.
impl From<String> for TimestampScope {
    fn from(s: String) -> Self {
        TimestampScope::from(s.as_str())
    }
}

impl From<&str> for TimestampScope {
    fn from(s: &str) -> Self {
        match s {
            "string" => TimestampScope::String,
            "float" => TimestampScope::Float,
            _ => TimestampScope::All,
        }
    }
}

/// Immutable settings shared by both mappers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Measurement name of every record.
    pub measurement: String,
    /// Replace spaces in tag keys and values with `delimiter`.
    pub replace_spaces: bool,
    /// Joins alert path segments and replaces spaces.
    pub delimiter: String,
    /// Identity tag key, or [`ROOT_TAG`].
    pub tag_name: String,
    /// Print processing errors after the records.
    pub verbose: bool,
    /// Alert node to start leaf selection from.
    pub root_node: i64,
    /// Attach alert node timestamps.
    pub source_timestamp: bool,
    pub timestamp_scope: TimestampScope,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            measurement: "sapmon".to_string(),
            replace_spaces: false,
            delimiter: " ".to_string(),
            tag_name: "ccms".to_string(),
            verbose: false,
            root_node: 0,
            source_timestamp: false,
            timestamp_scope: TimestampScope::All,
        }
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub measurement: Option<String>,
    pub replace_spaces: Option<bool>,
    pub delimiter: Option<String>,
    pub tag_name: Option<String>,
    pub verbose: Option<bool>,
    pub root_node: Option<i64>,
    pub source_timestamp: Option<bool>,
    pub timestamp_scope: Option<String>,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("measurement name must not be empty")]
    EmptyMeasurement,

    #[error("tag name must not be empty")]
    EmptyTagName,
}

impl Settings {
    /// Load settings from defaults, `file`, the environment and `overrides`.
    pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Self, SettingsError> {
        let env = Environment::with_prefix(ENV_PREFIX).try_parsing(true);
        Self::load_with(file, env, overrides)
    }

    fn load_with(
        file: Option<&Path>,
        env: Environment,
        overrides: &Overrides,
    ) -> Result<Self, SettingsError> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("measurement", defaults.measurement)?
            .set_default("replace_spaces", defaults.replace_spaces)?
            .set_default("delimiter", defaults.delimiter)?
            .set_default("tag_name", defaults.tag_name)?
            .set_default("verbose", defaults.verbose)?
            .set_default("root_node", defaults.root_node)?
            .set_default("source_timestamp", defaults.source_timestamp)?
            .set_default("timestamp_scope", defaults.timestamp_scope.as_str())?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        let settings: Settings = builder
            .add_source(env)
            .set_override_option("measurement", overrides.measurement.clone())?
            .set_override_option("replace_spaces", overrides.replace_spaces)?
            .set_override_option("delimiter", overrides.delimiter.clone())?
            .set_override_option("tag_name", overrides.tag_name.clone())?
            .set_override_option("verbose", overrides.verbose)?
            .set_override_option("root_node", overrides.root_node)?
            .set_override_option("source_timestamp", overrides.source_timestamp)?
            .set_override_option("timestamp_scope", overrides.timestamp_scope.clone())?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.measurement.is_empty() {
            return Err(SettingsError::EmptyMeasurement);
        }
        if self.tag_name.is_empty() {
            return Err(SettingsError::EmptyTagName);
        }
        Ok(())
    }

    /// Whether alert records are keyed by the first branch of the tree.
    pub fn uses_root_tag(&self) -> bool {
        self.tag_name == ROOT_TAG
    }

    /// Apply space replacement if enabled.
    pub fn replace(&self, s: &str) -> String {
        if self.replace_spaces {
            s.replace(' ', &self.delimiter)
        } else {
            s.to_string()
        }
    }
}
