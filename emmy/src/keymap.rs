use crate::action::{EncoderAction, KeyAction};
use crate::event::{KeyPos, RotaryEncoderPos};
use crate::layer::LayerState;

/// Keymap represents the stack of layers.
///
/// The conception of Keymap is borrowed from qmk: <https://docs.qmk.fm/#/keymap>.
///
/// The action tables are fixed at build time, the activated layers live in [`LayerState`],
/// which is shared with the effects of the keymap.
pub struct KeyMap<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize = 0> {
    /// Layers
    layers: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
    /// Rotary encoders, each rotary encoder is represented as (Clockwise, CounterClockwise)
    encoders: Option<&'a [[EncoderAction; NUM_ENCODER]; NUM_LAYER]>,
    /// Layer cache, records which layer the action of a pressed key came from
    layer_cache: [[u8; COL]; ROW],
}

impl<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize>
    KeyMap<'a, ROW, COL, NUM_LAYER, NUM_ENCODER>
{
    pub fn new(
        action_map: &'a [[[KeyAction; COL]; ROW]; NUM_LAYER],
        encoder_map: Option<&'a [[EncoderAction; NUM_ENCODER]; NUM_LAYER]>,
    ) -> Self {
        KeyMap {
            layers: action_map,
            encoders: encoder_map,
            layer_cache: [[0; COL]; ROW],
        }
    }

    pub fn get_keymap_config(&self) -> (usize, usize, usize) {
        (ROW, COL, NUM_LAYER)
    }

    /// Fetch the action in keymap
    pub fn get_action_at(&self, row: usize, col: usize, layer_num: usize) -> KeyAction {
        self.layers
            .get(layer_num)
            .and_then(|layer| layer.get(row))
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(KeyAction::No)
    }

    /// Fetch the action in keymap, with layer cache
    ///
    /// A released key uses the layer it was pressed on, so that layer changes in between
    /// don't leave the pressed action dangling.
    pub fn get_action_with_layer_cache(
        &mut self,
        pos: KeyPos,
        pressed: bool,
        layer_state: &LayerState<NUM_LAYER>,
    ) -> KeyAction {
        let row = pos.row as usize;
        let col = pos.col as usize;
        if row >= ROW || col >= COL {
            warn!("Key position {:?} is out of the keymap", pos);
            return KeyAction::No;
        }

        if !pressed {
            // Releasing a pressed key, use cached layer and restore the cache
            let layer = self.pop_layer_from_cache(row, col, layer_state.default_layer());
            return self.get_action_at(row, col, layer as usize);
        }

        // Iterate from higher layer to lower layer, the lowest checked layer is the default layer
        for (layer_idx, layer) in self.layers.iter().enumerate().rev() {
            if layer_state.is_active(layer_idx as u8) {
                // This layer is activated
                let action = layer[row][col];
                if action == KeyAction::Transparent {
                    continue;
                }

                // Found a valid action in the layer, cache it
                self.save_layer_cache(row, col, layer_idx as u8);

                return action;
            }

            if layer_idx as u8 == layer_state.default_layer() {
                // No action
                break;
            }
        }

        KeyAction::No
    }

    /// Fetch the encoder action on the highest activated layer
    pub fn get_encoder_action(
        &self,
        pos: RotaryEncoderPos,
        layer_state: &LayerState<NUM_LAYER>,
    ) -> Option<&EncoderAction> {
        let layer = layer_state.get_activated_layer();
        self.encoders
            .and_then(|encoders| encoders.get(layer as usize))
            .and_then(|layer| layer.get(pos.id as usize))
    }

    fn pop_layer_from_cache(&mut self, row: usize, col: usize, default_layer: u8) -> u8 {
        let layer = self.layer_cache[row][col];
        self.layer_cache[row][col] = default_layer;

        layer
    }

    fn save_layer_cache(&mut self, row: usize, col: usize, layer_num: u8) {
        self.layer_cache[row][col] = layer_num;
    }
}
