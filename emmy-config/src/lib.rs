use std::path::Path;

use config::{Config, File, FileFormat};
use serde::de;
use serde_derive::Deserialize;
use serde_inline_default::serde_inline_default;

pub mod defaults;
pub mod error;
mod validation;

pub use error::{ConfigError, ConfigResult};

/// Defaults which the user's `keyboard.toml` is merged on top of
const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Configurations of `keyboard.toml`
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyboardTomlConfig {
    /// Compile-time limits
    #[serde(default)]
    pub emmy: EmmyConstantsConfig,
    /// Tap dance behavior
    pub behavior: Option<BehaviorConfig>,
    /// Rgb matrix
    pub light: Option<LightConfig>,
}

/// Keyboard constants configuration for compile-time limits
#[serde_inline_default]
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmmyConstantsConfig {
    /// Maximum number of tap dances the keymap can store
    #[serde_inline_default(defaults::TAP_DANCE_MAX_NUM)]
    pub tap_dance_max_num: usize,
}

/// This separate Default impl is needed when `[emmy]` section is not set in keyboard.toml
impl Default for EmmyConstantsConfig {
    fn default() -> Self {
        Self {
            tap_dance_max_num: defaults::TAP_DANCE_MAX_NUM,
        }
    }
}

/// Configurations for actions behavior
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BehaviorConfig {
    pub tap_dance: Option<TapDanceConfig>,
}

/// Configurations for tap dance
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TapDanceConfig {
    pub tapping_term: Option<DurationMillis>,
    /// Whether pressing another key finalizes the pending tap dances
    pub interrupt: Option<bool>,
}

/// Configurations for the rgb matrix
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightConfig {
    /// The led which shows the layer indicator
    pub indicator_led: Option<u8>,
}

/// A duration written as `"200ms"` or `"1s"` in `keyboard.toml`
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct DurationMillis(#[serde(deserialize_with = "parse_duration_millis")] pub u64);

fn parse_duration_millis<'de, D: de::Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let input: String = de::Deserialize::deserialize(deserializer)?;
    let num = input.trim_end_matches(|c: char| !c.is_numeric());
    let unit = &input[num.len()..];
    let num: u64 = num.parse().map_err(|_| {
        de::Error::custom(format!(
            "Invalid number \"{num}\" in duration: number part must be a u64"
        ))
    })?;

    match unit {
        "s" => num.checked_mul(1000).ok_or_else(|| {
            de::Error::custom(format!("Duration \"{input}\" is too long: it must fit in u64 milliseconds"))
        }),
        "ms" => Ok(num),
        other => Err(de::Error::custom(format!(
            "Invalid duration unit \"{other}\": unit part must be either \"s\" or \"ms\""
        ))),
    }
}

/// Resolved tap dance settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TapDanceSettings {
    pub tapping_term_ms: u64,
    pub interrupt: bool,
}

/// Every constant written to the generated `constants.rs`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmmyConstants {
    pub tap_dance_max_num: usize,
    pub tapping_term_ms: u64,
    pub tap_dance_interrupt: bool,
    pub indicator_led_index: u8,
}

impl KeyboardTomlConfig {
    /// Parse and validate a `keyboard.toml` document, missing fields fall back to defaults.
    pub fn new_from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: KeyboardTomlConfig = toml::from_str(content).map_err(|e| ConfigError::TomlParse {
            path: "<string>".to_string(),
            message: e.message().to_string(),
        })?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    /// Load a `keyboard.toml` file, merge it on top of the default config and validate it.
    pub fn new_from_toml_path<P: AsRef<Path>>(config_toml_path: P) -> ConfigResult<Self> {
        let path = config_toml_path.as_ref().display().to_string();
        let user_config_str = std::fs::read_to_string(config_toml_path.as_ref()).map_err(|e| ConfigError::FileRead {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let config: KeyboardTomlConfig = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(&user_config_str, FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::TomlParse {
                path,
                message: e.to_string(),
            })?;
        validation::validate_config(&config)?;
        Ok(config)
    }

    pub fn get_tap_dance_config(&self) -> ConfigResult<TapDanceSettings> {
        let tap_dance = self
            .behavior
            .as_ref()
            .and_then(|b| b.tap_dance.clone())
            .unwrap_or_default();
        let tapping_term_ms = tap_dance
            .tapping_term
            .map(|t| t.0)
            .unwrap_or(defaults::TAPPING_TERM_MS);
        if tapping_term_ms == 0 {
            return Err(ConfigError::Validation {
                field: "behavior.tap_dance.tapping_term".to_string(),
                message: "tapping term must be longer than 0ms".to_string(),
            });
        }

        Ok(TapDanceSettings {
            tapping_term_ms,
            interrupt: tap_dance.interrupt.unwrap_or(defaults::TAP_DANCE_INTERRUPT),
        })
    }

    pub fn get_indicator_led(&self) -> ConfigResult<u8> {
        let led = self
            .light
            .as_ref()
            .and_then(|l| l.indicator_led)
            .unwrap_or(defaults::INDICATOR_LED);
        if led >= defaults::NUM_LED {
            return Err(ConfigError::InvalidValue {
                field: "light.indicator_led".to_string(),
                value: led.to_string(),
                expected: format!("0 to {}", defaults::NUM_LED - 1),
            });
        }
        Ok(led)
    }

    pub fn get_constants(&self) -> ConfigResult<EmmyConstants> {
        let tap_dance = self.get_tap_dance_config()?;
        Ok(EmmyConstants {
            tap_dance_max_num: self.emmy.tap_dance_max_num,
            tapping_term_ms: tap_dance.tapping_term_ms,
            tap_dance_interrupt: tap_dance.interrupt,
            indicator_led_index: self.get_indicator_led()?,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = KeyboardTomlConfig::new_from_toml_str("").unwrap();
        let constants = config.get_constants().unwrap();
        assert_eq!(
            constants,
            EmmyConstants {
                tap_dance_max_num: defaults::TAP_DANCE_MAX_NUM,
                tapping_term_ms: defaults::TAPPING_TERM_MS,
                tap_dance_interrupt: defaults::TAP_DANCE_INTERRUPT,
                indicator_led_index: defaults::INDICATOR_LED,
            }
        );
    }

    #[test]
    fn test_parse_sections() {
        let config = KeyboardTomlConfig::new_from_toml_str(
            r#"
            [emmy]
            tap_dance_max_num = 4

            [behavior.tap_dance]
            tapping_term = "1s"
            interrupt = false

            [light]
            indicator_led = 15
            "#,
        )
        .unwrap();
        let constants = config.get_constants().unwrap();
        assert_eq!(constants.tap_dance_max_num, 4);
        assert_eq!(constants.tapping_term_ms, 1000);
        assert!(!constants.tap_dance_interrupt);
        assert_eq!(constants.indicator_led_index, 15);
    }

    #[test]
    fn test_invalid_duration_unit() {
        let err = KeyboardTomlConfig::new_from_toml_str(
            r#"
            [behavior.tap_dance]
            tapping_term = "200us"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
    }

    #[test]
    fn test_overflowing_duration() {
        let err = KeyboardTomlConfig::new_from_toml_str(
            r#"
            [behavior.tap_dance]
            tapping_term = "18446744073709551615s"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = KeyboardTomlConfig::new_from_toml_str("[light]\nindicator = 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse { .. }));
    }

    #[test]
    fn test_validation() {
        let err = KeyboardTomlConfig::new_from_toml_str("[emmy]\ntap_dance_max_num = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "emmy.tap_dance_max_num"));

        let err = KeyboardTomlConfig::new_from_toml_str("[light]\nindicator_led = 82\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "light.indicator_led"));

        let err = KeyboardTomlConfig::new_from_toml_str("[behavior.tap_dance]\ntapping_term = \"0ms\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
        assert_eq!(
            err.to_string(),
            "Validation error in 'behavior.tap_dance.tapping_term': tapping term must be longer than 0ms"
        );
    }

    #[test]
    fn test_missing_file() {
        let err = KeyboardTomlConfig::new_from_toml_path("/nonexistent/keyboard.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
