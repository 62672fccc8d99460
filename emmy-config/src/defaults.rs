//! Default values and limits of `keyboard.toml`

/// Default maximum number of tap dances
pub const TAP_DANCE_MAX_NUM: usize = 8;

/// Upper limit of `tap_dance_max_num`
pub const TAP_DANCE_MAX_NUM_LIMIT: usize = 32;

/// Default tapping term in milliseconds
pub const TAPPING_TERM_MS: u64 = 200;

/// Pressing another key finalizes the pending tap dances by default
pub const TAP_DANCE_INTERRUPT: bool = true;

/// Default indicator cell, the Esc key
pub const INDICATOR_LED: u8 = 0;

/// Number of leds in the rgb matrix, one per key
pub const NUM_LED: u8 = 82;
