//! RGB matrix lighting.
//!
//! The RGB driver is owned by the firmware framework, this module only describes the
//! primitives the keymap needs from it ([`RgbMatrix`]) and the lighting effects bound
//! to keys ([`LightAction`]).

use crate::keycode::KeyCode;

/// A color in HSV space, every channel is in range 0 ~ 255.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Hsv {
    pub hue: u8,
    pub sat: u8,
    pub val: u8,
}

impl Hsv {
    pub const fn new(hue: u8, sat: u8, val: u8) -> Self {
        Self { hue, sat, val }
    }
}

/// A color in RGB space, used for single cells of the matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const HSV_RED: Hsv = Hsv::new(0, 255, 255);
pub const HSV_GOLD: Hsv = Hsv::new(36, 255, 255);
pub const HSV_GREEN: Hsv = Hsv::new(85, 255, 255);
pub const HSV_BLUE: Hsv = Hsv::new(170, 255, 255);
pub const HSV_WHITE: Hsv = Hsv::new(0, 0, 255);

pub const RGB_OFF: Rgb = Rgb::new(0, 0, 0);
pub const RGB_RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);
pub const RGB_GOLD: Rgb = Rgb::new(0xFF, 0xD9, 0x00);
pub const RGB_GREEN: Rgb = Rgb::new(0x00, 0xFF, 0x00);
pub const RGB_BLUE: Rgb = Rgb::new(0x00, 0x00, 0xFF);
pub const RGB_WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);

/// Animation modes of the RGB matrix used by the keymap
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RgbMode {
    /// Every cell shows the current hsv color
    #[default]
    SolidColor,
    Breathing,
    CycleAll,
    /// Hue wave moving from left to right, the "rainbow wave"
    CycleLeftRight,
    CycleUpDown,
    RainbowMovingChevron,
}

/// Lighting effect which can be bound to a key or a tap dance result
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightAction {
    /// Enable the matrix if it's disabled, otherwise disable it
    Toggle,
    Enable,
    Disable,
    /// Switch to an animation mode
    Mode(RgbMode),
    /// Switch to solid color mode with the given color
    SolidColor(Hsv),
    /// Rotate the accent color: gold -> red -> gold, any other color goes to the rainbow wave
    CycleAccent,
}

/// Primitives of the RGB matrix driver, provided by the firmware framework.
pub trait RgbMatrix {
    /// Set the animation mode
    fn set_mode(&mut self, mode: RgbMode);

    /// Current animation mode
    fn mode(&self) -> RgbMode;

    /// Set the base color of the animation
    fn set_hsv(&mut self, hsv: Hsv);

    /// Current base color
    fn hsv(&self) -> Hsv;

    /// Override the color of a single cell in the current frame
    fn set_color(&mut self, index: u8, color: Rgb);

    /// Drop the override of a single cell, it shows the animation again
    fn clear_color(&mut self, index: u8);

    /// Override the color of every cell in the current frame
    fn set_color_all(&mut self, color: Rgb);

    fn enable(&mut self);

    fn disable(&mut self);

    fn is_enabled(&self) -> bool;

    /// Current hue of the base color
    fn hue(&self) -> u8 {
        self.hsv().hue
    }

    fn toggle(&mut self) {
        if self.is_enabled() {
            self.disable();
        } else {
            self.enable();
        }
    }

    /// Run a lighting effect
    fn apply(&mut self, action: LightAction) {
        match action {
            LightAction::Toggle => self.toggle(),
            LightAction::Enable => self.enable(),
            LightAction::Disable => self.disable(),
            LightAction::Mode(mode) => self.set_mode(mode),
            LightAction::SolidColor(hsv) => {
                self.set_mode(RgbMode::SolidColor);
                self.set_hsv(hsv);
            }
            LightAction::CycleAccent => {
                let hue = self.hue();
                if hue == HSV_GOLD.hue {
                    self.apply(LightAction::SolidColor(HSV_RED));
                } else if hue == HSV_RED.hue {
                    self.apply(LightAction::SolidColor(HSV_GOLD));
                } else {
                    self.set_mode(RgbMode::CycleLeftRight);
                }
            }
        }
    }
}

/// Lighting effect of the user lighting keycodes.
///
/// These keycodes are consumed on press and never sent to the host.
pub fn lighting_preset(key: KeyCode) -> Option<LightAction> {
    match key {
        KeyCode::LightingPreset1 => Some(LightAction::Mode(RgbMode::CycleLeftRight)),
        KeyCode::LightingPreset2 => Some(LightAction::SolidColor(HSV_GOLD)),
        KeyCode::LightingPreset3 => Some(LightAction::SolidColor(HSV_RED)),
        KeyCode::LightingToggle => Some(LightAction::Toggle),
        _ => None,
    }
}

/// In-memory RGB matrix.
///
/// Keeps the state the framework driver would hold, and a frame buffer of cell overrides.
/// `None` in the frame buffer means the cell shows the animation.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RgbMatrixState<const NUM_LED: usize> {
    enabled: bool,
    mode: RgbMode,
    hsv: Hsv,
    frame: [Option<Rgb>; NUM_LED],
}

impl<const NUM_LED: usize> Default for RgbMatrixState<NUM_LED> {
    fn default() -> Self {
        Self::new(true, RgbMode::default(), HSV_WHITE)
    }
}

impl<const NUM_LED: usize> RgbMatrixState<NUM_LED> {
    pub fn new(enabled: bool, mode: RgbMode, hsv: Hsv) -> Self {
        Self {
            enabled,
            mode,
            hsv,
            frame: [None; NUM_LED],
        }
    }

    /// Color override of a cell in the current frame
    pub fn cell(&self, index: u8) -> Option<Rgb> {
        self.frame.get(index as usize).copied().flatten()
    }

    /// Drop all overrides
    pub fn clear_frame(&mut self) {
        self.frame = [None; NUM_LED];
    }
}

impl<const NUM_LED: usize> RgbMatrix for RgbMatrixState<NUM_LED> {
    fn set_mode(&mut self, mode: RgbMode) {
        debug!("Set rgb mode: {:?}", mode);
        self.mode = mode;
    }

    fn mode(&self) -> RgbMode {
        self.mode
    }

    fn set_hsv(&mut self, hsv: Hsv) {
        debug!("Set rgb color: {:?}", hsv);
        self.hsv = hsv;
    }

    fn hsv(&self) -> Hsv {
        self.hsv
    }

    fn set_color(&mut self, index: u8, color: Rgb) {
        match self.frame.get_mut(index as usize) {
            Some(cell) => *cell = Some(color),
            None => warn!("Invalid led index {}, the matrix has {} leds", index, NUM_LED),
        }
    }

    fn clear_color(&mut self, index: u8) {
        if let Some(cell) = self.frame.get_mut(index as usize) {
            *cell = None;
        }
    }

    fn set_color_all(&mut self, color: Rgb) {
        self.frame = [Some(color); NUM_LED];
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
