pub mod test_macro;

use embassy_time::{Duration, Instant};
use emmy::action::{EncoderAction, KeyAction};
use emmy::config::KeyboardConfig;
use emmy::device::{DeviceState, KeyReporter};
use emmy::event::KeyboardEvent;
use emmy::keyboard::Keyboard;
use emmy::keycode::KeyCode;
use emmy::keymap::KeyMap;
use emmy::layout::{COL, NUM_ENCODER, NUM_LAYER, ROW, get_default_config, get_default_encoder_map, get_default_keymap};
use emmy::light::RgbMatrixState;
use log::debug;

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// One led per key
pub const NUM_LED: usize = 82;

pub static KEYMAP: [[[KeyAction; COL]; ROW]; NUM_LAYER] = get_default_keymap();
pub static ENCODER_MAP: [[EncoderAction; NUM_ENCODER]; NUM_LAYER] = get_default_encoder_map();

#[derive(Debug, Clone)]
pub struct TestKeyPress {
    pub row: u8,
    pub col: u8,
    pub pressed: bool,
    pub delay: u64, // Delay before this key event in milliseconds
}

/// Records every key sent to the host
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub keys: Vec<(KeyCode, bool)>,
}

impl KeyReporter for RecordingReporter {
    fn send_key(&mut self, key: KeyCode, pressed: bool) {
        debug!("Send key {:?}, pressed: {}", key, pressed);
        self.keys.push((key, pressed));
    }
}

pub type TestDevice<const NUM_LAYER: usize> = DeviceState<RecordingReporter, RgbMatrixState<NUM_LED>, NUM_LAYER>;

pub fn create_test_device<const NUM_LAYER: usize>() -> TestDevice<NUM_LAYER> {
    DeviceState::new(RecordingReporter::default(), RgbMatrixState::default())
}

/// The keyboard with the Q1 Pro layout
pub fn create_test_keyboard() -> Keyboard<'static, ROW, COL, NUM_LAYER, NUM_ENCODER> {
    create_test_keyboard_with_config(get_default_config())
}

pub fn create_test_keyboard_with_config(config: KeyboardConfig) -> Keyboard<'static, ROW, COL, NUM_LAYER, NUM_ENCODER> {
    Keyboard::new(KeyMap::new(&KEYMAP, Some(&ENCODER_MAP)), config)
}

/// Create a keyboard from a keymap which lives until the end of the test
pub fn wrap_keymap<const R: usize, const C: usize, const L: usize>(
    keymap: [[[KeyAction; C]; R]; L],
    config: KeyboardConfig,
) -> Keyboard<'static, R, C, L> {
    let leaked_keymap = Box::leak(Box::new(keymap));
    Keyboard::new(KeyMap::new(leaked_keymap, None), config)
}

/// Feed the key sequence to the keyboard.
///
/// The timer service runs at each deadline which passes before the next event, and once more
/// after the last event until no tap dance is pending. Returns the time of the last event.
pub fn run_key_sequence_test<const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize>(
    keyboard: &mut Keyboard<'_, ROW, COL, NUM_LAYER, NUM_ENCODER>,
    device: &mut TestDevice<NUM_LAYER>,
    key_sequence: &[TestKeyPress],
) -> Instant {
    let mut now = Instant::from_millis(0);
    for key in key_sequence {
        now += Duration::from_millis(key.delay);
        run_timer_until(keyboard, device, now);
        keyboard.process_event(KeyboardEvent::key(key.row, key.col, key.pressed, now), device);
    }
    run_timer_until(keyboard, device, Instant::MAX);
    now
}

/// Poll the keyboard at every pending deadline up to `until`
pub fn run_timer_until<const ROW: usize, const COL: usize, const NUM_LAYER: usize, const NUM_ENCODER: usize>(
    keyboard: &mut Keyboard<'_, ROW, COL, NUM_LAYER, NUM_ENCODER>,
    device: &mut TestDevice<NUM_LAYER>,
    until: Instant,
) {
    while let Some(deadline) = keyboard.next_deadline() {
        if deadline > until {
            break;
        }
        keyboard.poll(deadline, device);
    }
}
