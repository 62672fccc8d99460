/// The layer stack.
///
/// Each layer can be activated independently, the highest activated layer wins.
/// The default layer is always treated as activated and is the bottom of the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerState<const NUM_LAYER: usize> {
    /// Current state of each layer
    layer_state: [bool; NUM_LAYER],
    /// Default layer number
    default_layer: u8,
}

impl<const NUM_LAYER: usize> Default for LayerState<NUM_LAYER> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const NUM_LAYER: usize> LayerState<NUM_LAYER> {
    pub const fn new() -> Self {
        Self {
            layer_state: [false; NUM_LAYER],
            default_layer: 0,
        }
    }

    /// Get the default layer number
    pub fn default_layer(&self) -> u8 {
        self.default_layer
    }

    /// Set the default layer number
    pub fn set_default_layer(&mut self, layer_num: u8) {
        if !self.check_layer(layer_num) {
            return;
        }
        self.default_layer = layer_num;
    }

    /// Returns `true` if the layer is activated, the default layer is always activated
    pub fn is_active(&self, layer_num: u8) -> bool {
        layer_num == self.default_layer || self.layer_state.get(layer_num as usize).copied().unwrap_or(false)
    }

    /// The highest activated layer
    pub fn get_activated_layer(&self) -> u8 {
        for layer_idx in (0..NUM_LAYER).rev() {
            if self.is_active(layer_idx as u8) {
                return layer_idx as u8;
            }
        }

        self.default_layer
    }

    /// Activate given layer
    pub fn activate_layer(&mut self, layer_num: u8) {
        if !self.check_layer(layer_num) {
            return;
        }
        self.layer_state[layer_num as usize] = true;
    }

    /// Deactivate given layer
    pub fn deactivate_layer(&mut self, layer_num: u8) {
        if !self.check_layer(layer_num) {
            return;
        }
        self.layer_state[layer_num as usize] = false;
    }

    /// Toggle given layer
    pub fn toggle_layer(&mut self, layer_num: u8) {
        if !self.check_layer(layer_num) {
            return;
        }
        self.layer_state[layer_num as usize] = !self.layer_state[layer_num as usize];
    }

    /// Deactivate all layers, only the default layer remains
    pub fn clear(&mut self) {
        self.layer_state = [false; NUM_LAYER];
    }

    fn check_layer(&self, layer_num: u8) -> bool {
        if layer_num as usize >= NUM_LAYER {
            warn!(
                "Not a valid layer {}, keyboard supports only {} layers",
                layer_num, NUM_LAYER
            );
            return false;
        }
        true
    }
}
