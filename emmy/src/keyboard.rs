use embassy_time::Instant;

use crate::action::{Action, KeyAction};
use crate::config::KeyboardConfig;
use crate::device::{DeviceState, KeyReporter};
use crate::dip_switch;
use crate::event::{Direction, KeyboardEvent, KeyboardEventPos};
use crate::indicator::{self, IndicatorConfig};
use crate::keycode::KeyCode;
use crate::keymap::KeyMap;
use crate::light::{RgbMatrix, lighting_preset};
use crate::tap_dance::TapDanceClassifier;

/// Event intake of the keyboard.
///
/// Events are resolved against the keymap, tap dance keys go to the classifier,
/// everything else is executed on the [`DeviceState`] directly.
pub struct Keyboard<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize = 0> {
    /// Keymap
    keymap: KeyMap<'a, ROW, COL, NUM_LAYER, NUM_ENCODER>,

    /// Gesture sessions of tap dance keys
    tap_dance: TapDanceClassifier,

    /// Whether pressing another key finalizes pending tap dances
    tap_dance_interrupt: bool,

    /// Layer indicator
    indicator: IndicatorConfig,
}

impl<'a, const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize>
    Keyboard<'a, ROW, COL, NUM_LAYER, NUM_ENCODER>
{
    pub fn new(keymap: KeyMap<'a, ROW, COL, NUM_LAYER, NUM_ENCODER>, config: KeyboardConfig) -> Self {
        Keyboard {
            keymap,
            tap_dance: TapDanceClassifier::new(config.behavior.tap_dance),
            tap_dance_interrupt: config.behavior.tap_dance_interrupt,
            indicator: config.indicator,
        }
    }

    pub fn tap_dance(&self) -> &TapDanceClassifier {
        &self.tap_dance
    }

    /// Process a key or encoder event
    pub fn process_event<R: KeyReporter, M: RgbMatrix>(
        &mut self,
        event: KeyboardEvent,
        device: &mut DeviceState<R, M, NUM_LAYER>,
    ) {
        let key_action = match event.pos {
            KeyboardEventPos::Key(pos) => {
                self.keymap
                    .get_action_with_layer_cache(pos, event.pressed, &device.layers)
            }
            KeyboardEventPos::RotaryEncoder(pos) => match self.keymap.get_encoder_action(pos, &device.layers) {
                Some(encoder_action) => match pos.direction {
                    Direction::Clockwise => encoder_action.clockwise(),
                    Direction::CounterClockwise => encoder_action.counter_clockwise(),
                },
                None => {
                    warn!("No encoder action for {:?}", pos);
                    return;
                }
            },
        };
        debug!("Process {:?}, action: {:?}", event, key_action);
        self.process_key_action(key_action, event.pressed, event.time, device);
    }

    /// Timer service, finalizes the tap dances whose tapping term has elapsed
    pub fn poll<R: KeyReporter, M: RgbMatrix>(&mut self, now: Instant, device: &mut DeviceState<R, M, NUM_LAYER>) {
        self.tap_dance.poll(now, device);
    }

    /// The time at which [`Keyboard::poll`] should run next
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tap_dance.next_deadline()
    }

    /// Reset hook of a tap dance
    pub fn reset_tap_dance<R: KeyReporter, M: RgbMatrix>(&mut self, id: u8, device: &mut DeviceState<R, M, NUM_LAYER>) {
        self.tap_dance.reset(id, device);
    }

    /// Paint the layer indicator, called once per rendered frame
    pub fn render_indicators<R: KeyReporter, M: RgbMatrix>(&self, device: &mut DeviceState<R, M, NUM_LAYER>) {
        indicator::render_indicators(&device.layers, &mut device.light, &self.indicator);
    }

    pub fn process_dip_switch<R: KeyReporter, M: RgbMatrix>(
        &mut self,
        index: u8,
        active: bool,
        device: &mut DeviceState<R, M, NUM_LAYER>,
    ) -> bool {
        dip_switch::process_dip_switch(index, active, &mut device.layers)
    }

    fn process_key_action<R: KeyReporter, M: RgbMatrix>(
        &mut self,
        key_action: KeyAction,
        pressed: bool,
        time: Instant,
        device: &mut DeviceState<R, M, NUM_LAYER>,
    ) {
        if pressed && self.tap_dance_interrupt {
            let except = match key_action {
                KeyAction::TapDance(id) => Some(id),
                _ => None,
            };
            self.tap_dance.interrupt(except, device);
        }

        match key_action {
            KeyAction::No | KeyAction::Transparent => (),
            KeyAction::Single(Action::Key(key)) => self.process_action_keycode(key, pressed, device),
            KeyAction::Single(action) => device.process_action(action, pressed),
            KeyAction::TapDance(id) => {
                if pressed {
                    self.tap_dance.process_press(id, time, device);
                } else {
                    self.tap_dance.process_release(id, time, device);
                }
            }
        }
    }

    fn process_action_keycode<R: KeyReporter, M: RgbMatrix>(
        &mut self,
        key: KeyCode,
        pressed: bool,
        device: &mut DeviceState<R, M, NUM_LAYER>,
    ) {
        // User lighting keys are handled here and never reach the host
        if let Some(light_action) = lighting_preset(key) {
            if pressed {
                device.apply_light(light_action);
            }
            return;
        }
        device.process_action(Action::Key(key), pressed);
    }
}
