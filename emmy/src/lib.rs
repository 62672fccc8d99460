#![doc = include_str!("../../README.md")]
//! ## Feature flags
#![doc = document_features::document_features!()]
#![no_std]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod action;
pub mod config;
pub mod device;
pub mod dip_switch;
pub mod event;
pub mod indicator;
pub mod keyboard;
pub mod keycode;
pub mod keymap;
pub mod layer;
pub mod layout;
pub mod layout_macro;
pub mod light;
pub mod tap_dance;

pub use config::{BehaviorConfig, KeyboardConfig};
pub use device::{DeviceState, KeyReporter};
pub use keyboard::Keyboard;
pub use keymap::KeyMap;

include!(concat!(env!("OUT_DIR"), "/constants.rs"));
