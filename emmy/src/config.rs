use crate::TAP_DANCE_INTERRUPT;
use crate::indicator::IndicatorConfig;
use crate::tap_dance::TapDancesConfig;

/// Runtime configurations of the keyboard.
#[derive(Clone, Debug, Default)]
pub struct KeyboardConfig {
    pub behavior: BehaviorConfig,
    pub indicator: IndicatorConfig,
}

/// Config for configurable action behavior
#[derive(Clone, Debug)]
pub struct BehaviorConfig {
    pub tap_dance: TapDancesConfig,
    /// Pressing another key finalizes the pending tap dances
    pub tap_dance_interrupt: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            tap_dance: TapDancesConfig::default(),
            tap_dance_interrupt: TAP_DANCE_INTERRUPT,
        }
    }
}
