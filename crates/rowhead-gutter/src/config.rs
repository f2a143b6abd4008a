#![forbid(unsafe_code)]

//! Gutter configuration.
//!
//! Defaults reproduce the classic look: a 28-unit wide margin, labels inset
//! by 2 units, at least 3 digit columns, black numbers and a red current
//! line, drawn bold.
//!
//! # Environment Variables
//!
//! | Variable | Field | Format |
//! |----------|-------|--------|
//! | `ROWHEAD_GUTTER_WIDTH` | `width_px` | positive integer |
//! | `ROWHEAD_GUTTER_INSET` | `left_inset_px` | integer |
//! | `ROWHEAD_GUTTER_MIN_DIGITS` | `min_digits` | 1..=9 |
//! | `ROWHEAD_GUTTER_TEXT_COLOR` | `text_color` | `#rrggbb` |
//! | `ROWHEAD_GUTTER_CURRENT_COLOR` | `current_line_color` | `#rrggbb` |
//! | `ROWHEAD_GUTTER_BOLD` | `bold` | `1/0/true/false/yes/no/on/off` |

use std::env;
use std::fmt;

use rowhead_render::cell::PackedRgba;

pub const ENV_GUTTER_WIDTH: &str = "ROWHEAD_GUTTER_WIDTH";
pub const ENV_GUTTER_INSET: &str = "ROWHEAD_GUTTER_INSET";
pub const ENV_GUTTER_MIN_DIGITS: &str = "ROWHEAD_GUTTER_MIN_DIGITS";
pub const ENV_GUTTER_TEXT_COLOR: &str = "ROWHEAD_GUTTER_TEXT_COLOR";
pub const ENV_GUTTER_CURRENT_COLOR: &str = "ROWHEAD_GUTTER_CURRENT_COLOR";
pub const ENV_GUTTER_BOLD: &str = "ROWHEAD_GUTTER_BOLD";

const MAX_DIGITS: usize = 9;

/// Appearance and geometry of a line-number gutter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GutterConfig {
    /// Fixed gutter width in device units.
    pub width_px: u32,
    /// Distance from the gutter's left edge to the label.
    pub left_inset_px: i32,
    /// Labels are right-aligned in at least this many columns.
    pub min_digits: usize,
    pub text_color: PackedRgba,
    /// Color of the label on the caret's line.
    pub current_line_color: PackedRgba,
    /// Draw labels in the bold variant of the line-number font.
    pub bold: bool,
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            width_px: 28,
            left_inset_px: 2,
            min_digits: 3,
            text_color: PackedRgba::BLACK,
            current_line_color: PackedRgba::RED,
            bold: true,
        }
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: GutterConfig,
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

impl GutterConfig {
    /// Parse config from the process environment, with diagnostics.
    #[must_use]
    pub fn from_env() -> ConfigParse {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse config using a custom lookup and return diagnostics.
    ///
    /// Invalid values keep the default and are reported in
    /// [`ConfigParse::errors`], followed by any [`GutterConfig::validate`]
    /// violations of the result.
    pub fn from_env_with<F>(mut get: F) -> ConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(value) = get(ENV_GUTTER_WIDTH) {
            match value.trim().parse::<u32>() {
                Ok(parsed) => config.width_px = parsed,
                Err(_) => errors.push(ConfigError::new(
                    "width_px",
                    value,
                    "expected positive integer",
                )),
            }
        }

        if let Some(value) = get(ENV_GUTTER_INSET) {
            match value.trim().parse::<i32>() {
                Ok(parsed) => config.left_inset_px = parsed,
                Err(_) => errors.push(ConfigError::new("left_inset_px", value, "expected integer")),
            }
        }

        if let Some(value) = get(ENV_GUTTER_MIN_DIGITS) {
            match value.trim().parse::<usize>() {
                Ok(parsed) => config.min_digits = parsed,
                Err(_) => errors.push(ConfigError::new(
                    "min_digits",
                    value,
                    "expected integer in 1..=9",
                )),
            }
        }

        if let Some(value) = get(ENV_GUTTER_TEXT_COLOR) {
            match PackedRgba::from_hex(value.trim()) {
                Some(parsed) => config.text_color = parsed,
                None => errors.push(ConfigError::new("text_color", value, "expected #rrggbb")),
            }
        }

        if let Some(value) = get(ENV_GUTTER_CURRENT_COLOR) {
            match PackedRgba::from_hex(value.trim()) {
                Some(parsed) => config.current_line_color = parsed,
                None => errors.push(ConfigError::new(
                    "current_line_color",
                    value,
                    "expected #rrggbb",
                )),
            }
        }

        if let Some(value) = get(ENV_GUTTER_BOLD) {
            match parse_bool(&value) {
                Some(parsed) => config.bold = parsed,
                None => errors.push(ConfigError::new(
                    "bold",
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }

        if let Err(mut violations) = config.validate() {
            errors.append(&mut violations);
        }

        ConfigParse { config, errors }
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.width_px == 0 {
            errors.push(ConfigError::new("width_px", "0", "must be >= 1"));
        }
        if !(1..=MAX_DIGITS).contains(&self.min_digits) {
            errors.push(ConfigError::new(
                "min_digits",
                self.min_digits.to_string(),
                "must be in 1..=9",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(vars: &[(&str, &str)]) -> ConfigParse {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        GutterConfig::from_env_with(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_are_valid() {
        let parsed = parse(&[]);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.config, GutterConfig::default());
        assert_eq!(parsed.config.width_px, 28);
        assert_eq!(parsed.config.min_digits, 3);
    }

    #[test]
    fn env_overrides_apply() {
        let parsed = parse(&[
            (ENV_GUTTER_WIDTH, "40"),
            (ENV_GUTTER_INSET, " 4 "),
            (ENV_GUTTER_MIN_DIGITS, "5"),
            (ENV_GUTTER_TEXT_COLOR, "#102030"),
            (ENV_GUTTER_CURRENT_COLOR, "#00ff00"),
            (ENV_GUTTER_BOLD, "off"),
        ]);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        let c = parsed.config;
        assert_eq!(c.width_px, 40);
        assert_eq!(c.left_inset_px, 4);
        assert_eq!(c.min_digits, 5);
        assert_eq!(c.text_color, PackedRgba::rgb(0x10, 0x20, 0x30));
        assert_eq!(c.current_line_color, PackedRgba::rgb(0, 0xff, 0));
        assert!(!c.bold);
    }

    #[test]
    fn invalid_values_keep_defaults_and_report() {
        let parsed = parse(&[
            (ENV_GUTTER_WIDTH, "wide"),
            (ENV_GUTTER_TEXT_COLOR, "red"),
            (ENV_GUTTER_BOLD, "maybe"),
        ]);
        assert_eq!(parsed.config, GutterConfig::default());
        let fields: Vec<_> = parsed.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["width_px", "text_color", "bold"]);
    }

    #[test]
    fn validation_collects_every_violation() {
        let config = GutterConfig {
            width_px: 0,
            min_digits: 12,
            ..GutterConfig::default()
        };
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[1].to_string(), "min_digits=12 (must be in 1..=9)");
    }

    #[test]
    fn parsed_but_out_of_range_is_reported() {
        let parsed = parse(&[(ENV_GUTTER_MIN_DIGITS, "0")]);
        assert_eq!(parsed.config.min_digits, 0);
        assert_eq!(parsed.errors.len(), 1);
        assert_eq!(parsed.errors[0].field, "min_digits");
    }
}
