use crate::layer::LayerState;
use crate::layout::{BASE, FN_2};

/// Handle a dip switch change, the switch selects the base layer of the keyboard.
///
/// Returns `true` so that the framework continues its own handling of the switch.
pub fn process_dip_switch<const NUM_LAYER: usize>(index: u8, active: bool, layers: &mut LayerState<NUM_LAYER>) -> bool {
    info!("Dip switch {} changed, active: {}", index, active);
    layers.clear();
    if active {
        layers.activate_layer(FN_2);
    } else {
        layers.activate_layer(BASE);
    }
    true
}
