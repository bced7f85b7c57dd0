#![forbid(unsafe_code)]

//! Layout configuration.
//!
//! Configuration is an explicit value handed to constructors; nothing is
//! stored process-wide.
//!
//! Environment variables (all optional):
//! - `GRIDAREA_STRICT` (bool): reject non-rectangular areas
//! - `GRIDAREA_EXPAND_WEIGHT` (u16 > 0): weight given to occupied tracks
//! - `GRIDAREA_FALLBACK_LIMIT` (usize > 0): highest numeric suffix tried for fallback names
//! - `GRIDAREA_MIN_ROW_HEIGHT` (u16)
//! - `GRIDAREA_MIN_COL_WIDTH` (u16)
//! - `GRIDAREA_ROW_GAP` (u16)
//! - `GRIDAREA_COL_GAP` (u16)

use std::env;
use std::fmt;

use serde::{Deserialize, Serialize};

const ENV_STRICT: &str = "GRIDAREA_STRICT";
const ENV_EXPAND_WEIGHT: &str = "GRIDAREA_EXPAND_WEIGHT";
const ENV_FALLBACK_LIMIT: &str = "GRIDAREA_FALLBACK_LIMIT";
const ENV_MIN_ROW_HEIGHT: &str = "GRIDAREA_MIN_ROW_HEIGHT";
const ENV_MIN_COL_WIDTH: &str = "GRIDAREA_MIN_COL_WIDTH";
const ENV_ROW_GAP: &str = "GRIDAREA_ROW_GAP";
const ENV_COL_GAP: &str = "GRIDAREA_COL_GAP";

/// How the resolver treats a name whose cells do not form a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaPolicy {
    /// Accept and report the scan's bounding box.
    #[default]
    Permissive,
    /// Fail the configure with [`crate::LayoutError::NonRectangularArea`].
    Strict,
}

impl AreaPolicy {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "permissive" | "loose" => Some(Self::Permissive),
            "strict" => Some(Self::Strict),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Permissive => "permissive",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for AreaPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tunables shared by the resolver, the section planner and the track solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub policy: AreaPolicy,
    /// Weight assigned to every track inside the grid limits.
    pub expand_weight: u16,
    /// Fallback names try `name`, then `name1` through `name{limit}`.
    pub fallback_limit: usize,
    pub min_row_height: u16,
    pub min_col_width: u16,
    pub row_gap: u16,
    pub col_gap: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            policy: AreaPolicy::Permissive,
            expand_weight: 1,
            fallback_limit: 99,
            min_row_height: 1,
            min_col_width: 1,
            row_gap: 0,
            col_gap: 0,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct LayoutConfigParse {
    pub config: LayoutConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl LayoutConfig {
    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> LayoutConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> LayoutConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.expand_weight == 0 {
            errors.push(ConfigError::new(
                "expand_weight",
                "0",
                "occupied tracks need a positive weight",
            ));
        }
        if self.fallback_limit == 0 {
            errors.push(ConfigError::new(
                "fallback_limit",
                "0",
                "expected positive integer",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    #[must_use]
    pub fn strict(mut self) -> Self {
        self.policy = AreaPolicy::Strict;
        self
    }
}

fn from_env_with<F>(mut get: F) -> LayoutConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = LayoutConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_STRICT) {
        match parse_bool(&value) {
            Some(true) => config.policy = AreaPolicy::Strict,
            Some(false) => config.policy = AreaPolicy::Permissive,
            None => errors.push(ConfigError::new(
                "strict",
                value,
                "expected bool (1/0/true/false)",
            )),
        }
    }

    if let Some(value) = get(ENV_EXPAND_WEIGHT) {
        match parse_u16(&value).filter(|&w| w > 0) {
            Some(parsed) => config.expand_weight = parsed,
            None => errors.push(ConfigError::new(
                "expand_weight",
                value,
                "expected integer in 1..=65535",
            )),
        }
    }

    if let Some(value) = get(ENV_FALLBACK_LIMIT) {
        match value.trim().parse::<usize>().ok().filter(|&n| n > 0) {
            Some(parsed) => config.fallback_limit = parsed,
            None => errors.push(ConfigError::new(
                "fallback_limit",
                value,
                "expected positive integer",
            )),
        }
    }

    let tracks: [(&str, &'static str, &mut u16); 4] = [
        (ENV_MIN_ROW_HEIGHT, "min_row_height", &mut config.min_row_height),
        (ENV_MIN_COL_WIDTH, "min_col_width", &mut config.min_col_width),
        (ENV_ROW_GAP, "row_gap", &mut config.row_gap),
        (ENV_COL_GAP, "col_gap", &mut config.col_gap),
    ];
    for (key, field, slot) in tracks {
        if let Some(value) = get(key) {
            match parse_u16(&value) {
                Some(parsed) => *slot = parsed,
                None => errors.push(ConfigError::new(
                    field,
                    value,
                    "expected integer in 0..=65535",
                )),
            }
        }
    }

    if let Err(mut invalid) = config.validate() {
        errors.append(&mut invalid);
    }

    LayoutConfigParse { config, errors }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_u16(value: &str) -> Option<u16> {
    value.trim().parse().ok()
}
