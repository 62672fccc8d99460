use std::path::Path;
use std::{env, fs};

use const_gen::*;
use emmy_config::{EmmyConstants, KeyboardTomlConfig};

fn main() {
    // Ensure build.rs is re-run when files change
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=KEYBOARD_TOML_PATH");

    // Read keyboard.toml if it's present
    let user_toml = if let Ok(toml_path) = env::var("KEYBOARD_TOML_PATH") {
        println!("cargo:rerun-if-changed={toml_path}");
        KeyboardTomlConfig::new_from_toml_path(&toml_path)
    } else {
        KeyboardTomlConfig::new_from_toml_str("")
    }
    .unwrap_or_else(|e| panic!("❌ Parse `keyboard.toml` error: {e}"));

    let constants = user_toml
        .get_constants()
        .unwrap_or_else(|e| panic!("❌ Parse `keyboard.toml` error: {e}"));

    // Write to constants.rs file
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is not set");
    let dest_path = Path::new(&out_dir).join("constants.rs");
    fs::write(&dest_path, get_constants_str(constants)).expect("Failed to write constants.rs file");
}

fn get_constants_str(constants: EmmyConstants) -> String {
    [
        const_declaration!(pub(crate) TAP_DANCE_MAX_NUM = constants.tap_dance_max_num),
        const_declaration!(pub(crate) TAPPING_TERM_MS = constants.tapping_term_ms),
        const_declaration!(pub(crate) TAP_DANCE_INTERRUPT = constants.tap_dance_interrupt),
        const_declaration!(pub(crate) INDICATOR_LED_INDEX = constants.indicator_led_index),
    ]
    .into_iter()
    .map(|s| "#[allow(clippy::redundant_static_lifetimes)]\n".to_owned() + s.as_str())
    .collect::<Vec<_>>()
    .join("\n")
}
