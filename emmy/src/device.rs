//! Shared device state, and the effects executed on it.
//!
//! Every effect of the keymap (tap dance results included) mutates the layer stack,
//! emits a key to the host or drives the RGB matrix. All of them go through
//! [`DeviceState`], so the framework primitives can be swapped by fakes in tests.

use crate::action::Action;
use crate::keycode::KeyCode;
use crate::layer::LayerState;
use crate::light::{LightAction, RgbMatrix};

/// The host transport primitive: emit a logical key event.
pub trait KeyReporter {
    fn send_key(&mut self, key: KeyCode, pressed: bool);
}

/// The state shared by all effects.
pub struct DeviceState<R: KeyReporter, M: RgbMatrix, const NUM_LAYER: usize> {
    /// The layer stack
    pub layers: LayerState<NUM_LAYER>,
    /// Key emission to the host
    pub reporter: R,
    /// RGB matrix
    pub light: M,
}

impl<R: KeyReporter, M: RgbMatrix, const NUM_LAYER: usize> DeviceState<R, M, NUM_LAYER> {
    pub fn new(reporter: R, light: M) -> Self {
        Self {
            layers: LayerState::new(),
            reporter,
            light,
        }
    }

    /// Process the press or the release of an action.
    pub fn process_action(&mut self, action: Action, pressed: bool) {
        match action {
            Action::Key(key) => self.process_action_key(key, pressed),
            Action::LayerOn(layer_num) => {
                // Change layer state only when the key's state is changed
                if pressed {
                    self.layers.activate_layer(layer_num);
                } else {
                    self.layers.deactivate_layer(layer_num);
                }
            }
            Action::LayerOff(layer_num) => {
                if pressed {
                    self.layers.deactivate_layer(layer_num);
                }
            }
            Action::LayerToggle(layer_num) => {
                // Toggle a layer when the key is release
                if !pressed {
                    self.layers.toggle_layer(layer_num);
                }
            }
            Action::LayerToggleOnly(layer_num) => {
                // Activate a layer and deactivate all other layers(except default layer)
                if pressed {
                    self.layers.clear();
                    self.layers.activate_layer(layer_num);
                }
            }
            Action::DefaultLayer(layer_num) => {
                if pressed {
                    self.layers.set_default_layer(layer_num);
                }
            }
            Action::Light(light_action) => {
                if pressed {
                    self.apply_light(light_action);
                }
            }
        }
    }

    /// Tap an action: press then release.
    pub fn tap_action(&mut self, action: Action) {
        self.process_action(action, true);
        self.process_action(action, false);
    }

    /// Run a lighting effect
    pub fn apply_light(&mut self, action: LightAction) {
        debug!("Apply lighting action: {:?}", action);
        self.light.apply(action);
    }

    fn process_action_key(&mut self, key: KeyCode, pressed: bool) {
        if key == KeyCode::No {
            return;
        }
        self.reporter.send_key(key, pressed);
    }
}
