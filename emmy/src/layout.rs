//! The keymap of the Keychron Q1 Pro ANSI knob board.
//!
//! The 82 keys are laid out row by row as printed on the board, rows are padded with `No`.

use crate::action::{Action, EncoderAction, KeyAction};
use crate::config::{BehaviorConfig, KeyboardConfig};
use crate::light::LightAction;
use crate::tap_dance::{TapDance, TapDancesConfig};
use crate::{a, encoder, k, layer, mo, td};

pub const ROW: usize = 6;
pub const COL: usize = 15;
pub const NUM_LAYER: usize = 4;
pub const NUM_ENCODER: usize = 1;

/// Base layer
pub const BASE: u8 = 0;
/// Media, rgb and bluetooth keys, momentary from the base layer
pub const FN_1: u8 = 1;
/// Base layer selected by the dip switch
pub const FN_2: u8 = 2;
/// Firmware keys, momentary from `FN_2`
pub const FN_3: u8 = 3;

/// Lighting tap dance: hold toggles the matrix, double tap cycles the accent color
pub const LIGHTS: u8 = 0;

#[rustfmt::skip]
pub const fn get_default_keymap() -> [[[KeyAction; COL]; ROW]; NUM_LAYER] {
    [
        layer!([
            [k!(Escape), k!(F1), k!(F2), k!(F3), k!(F4), k!(F5), k!(F6), k!(F7), k!(F8), k!(F9), k!(F10), k!(F11), k!(F12), k!(Delete), k!(AudioMute)],
            [k!(Grave), k!(Kc1), k!(Kc2), k!(Kc3), k!(Kc4), k!(Kc5), k!(Kc6), k!(Kc7), k!(Kc8), k!(Kc9), k!(Kc0), k!(Minus), k!(Equal), k!(Backspace), k!(PageUp)],
            [k!(Tab), k!(Q), k!(W), k!(E), k!(R), k!(T), k!(Y), k!(U), k!(I), k!(O), k!(P), k!(LeftBracket), k!(RightBracket), k!(Backslash), k!(PageDown)],
            [k!(CapsLock), k!(A), k!(S), k!(D), k!(F), k!(G), k!(H), k!(J), k!(K), k!(L), k!(Semicolon), k!(Quote), k!(Enter), k!(Home), a!(No)],
            [k!(LShift), k!(Z), k!(X), k!(C), k!(V), k!(B), k!(N), k!(M), k!(Comma), k!(Dot), k!(Slash), k!(RShift), k!(Up), a!(No), a!(No)],
            [k!(LCtrl), k!(LGui), k!(LAlt), k!(Space), k!(RAlt), mo!(FN_1), k!(RCtrl), k!(Left), k!(Down), k!(Right), a!(No), a!(No), a!(No), a!(No), a!(No)]
        ]),
        layer!([
            [a!(Transparent), k!(BrightnessDown), k!(BrightnessUp), k!(TaskView), k!(FileExplorer), k!(RgbVad), k!(RgbVai), k!(MediaPrevTrack), k!(MediaPlayPause), k!(MediaNextTrack), k!(AudioMute), k!(AudioVolDown), k!(AudioVolUp), a!(Transparent), k!(RgbTog)],
            [a!(Transparent), k!(BtHost1), k!(BtHost2), k!(BtHost3), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), td!(LIGHTS), a!(Transparent), a!(Transparent)],
            [k!(RgbTog), k!(RgbModeForward), k!(RgbVai), k!(RgbHui), k!(RgbSai), k!(RgbSpi), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), k!(RgbModeReverse), k!(RgbVad), k!(RgbHud), k!(RgbSad), k!(RgbSpd), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(End), a!(No)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(BatteryLevel), k!(MagicToggleNkro), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), a!(No), a!(No), a!(No)]
        ]),
        layer!([
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), mo!(FN_3), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), a!(No), a!(No), a!(No)]
        ]),
        layer!([
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(Bootloader)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(DebugToggle)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), k!(ClearEeprom), a!(No)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No)],
            [a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(Transparent), a!(No), a!(No), a!(No), a!(No), a!(No)]
        ]),
    ]
}

#[rustfmt::skip]
pub const fn get_default_encoder_map() -> [[EncoderAction; NUM_ENCODER]; NUM_LAYER] {
    [
        [encoder!(k!(AudioVolUp), k!(AudioVolDown))],
        [encoder!(k!(RgbVai), k!(RgbVad))],
        [encoder!(k!(AudioVolUp), k!(AudioVolDown))],
        [encoder!(k!(RgbVai), k!(RgbVad))],
    ]
}

pub fn get_default_tap_dances() -> TapDancesConfig {
    let mut config = TapDancesConfig::default();
    let lights = TapDance {
        hold: Some(Action::Light(LightAction::Toggle)),
        double_tap: Some(Action::Light(LightAction::CycleAccent)),
        ..Default::default()
    };
    if config.tap_dances.push(lights).is_err() {
        error!("Tap dance buffer is full, lighting tap dance {} is dropped", LIGHTS);
    }
    config
}

pub fn get_default_config() -> KeyboardConfig {
    KeyboardConfig {
        behavior: BehaviorConfig {
            tap_dance: get_default_tap_dances(),
            ..Default::default()
        },
        ..Default::default()
    }
}
