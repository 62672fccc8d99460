//! Validation of `keyboard.toml`

use crate::defaults;
use crate::error::{ConfigError, ConfigResult};
use crate::KeyboardTomlConfig;

/// Validates the entire keyboard configuration
pub fn validate_config(config: &KeyboardTomlConfig) -> ConfigResult<()> {
    validate_emmy_constants(config)?;
    config.get_tap_dance_config()?;
    config.get_indicator_led()?;
    Ok(())
}

/// Validates the [emmy] constants section
fn validate_emmy_constants(config: &KeyboardTomlConfig) -> ConfigResult<()> {
    let emmy = &config.emmy;

    if !(1..=defaults::TAP_DANCE_MAX_NUM_LIMIT).contains(&emmy.tap_dance_max_num) {
        return Err(ConfigError::InvalidValue {
            field: "emmy.tap_dance_max_num".to_string(),
            value: emmy.tap_dance_max_num.to_string(),
            expected: format!("1 to {}", defaults::TAP_DANCE_MAX_NUM_LIMIT),
        });
    }

    Ok(())
}
