//! Layer indicator: the active layer is shown by a single cell of the rgb matrix.

use crate::INDICATOR_LED_INDEX;
use crate::layer::LayerState;
use crate::light::{RGB_BLUE, RGB_GREEN, RGB_RED, Rgb, RgbMatrix};

/// Number of layers which can have an indicator color
pub const NUM_INDICATOR_LAYER: usize = 4;

/// Config for the layer indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorConfig {
    /// The cell which shows the indicator
    pub led_index: u8,
    /// Color of each layer, `None` leaves the cell to the animation
    pub layer_colors: [Option<Rgb>; NUM_INDICATOR_LAYER],
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            led_index: INDICATOR_LED_INDEX,
            layer_colors: [None, Some(RGB_BLUE), Some(RGB_GREEN), Some(RGB_RED)],
        }
    }
}

/// The cell and the color which indicate the given layer
pub fn layer_indicator(layer: u8, config: &IndicatorConfig) -> Option<(u8, Rgb)> {
    config
        .layer_colors
        .get(layer as usize)
        .copied()
        .flatten()
        .map(|color| (config.led_index, color))
}

/// Paint the indicator of the highest activated layer, runs once per frame.
///
/// A layer without indicator color hands the cell back to the animation.
/// Nothing is painted while the matrix is disabled.
pub fn render_indicators<M: RgbMatrix, const NUM_LAYER: usize>(
    layers: &LayerState<NUM_LAYER>,
    matrix: &mut M,
    config: &IndicatorConfig,
) {
    if !matrix.is_enabled() {
        return;
    }
    match layer_indicator(layers.get_activated_layer(), config) {
        Some((index, color)) => matrix.set_color(index, color),
        None => matrix.clear_color(config.led_index),
    }
}
