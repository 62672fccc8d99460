//! Tap dance: multiple gestures on a single key.
//!
//! Presses and releases of a tap dance key are accumulated into a [`GestureSession`].
//! When the tapping term elapses after the last press (or another key interrupts the
//! gesture) the session is finalized: it is classified, the bound action runs once and
//! the session is reset.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::action::Action;
use crate::device::{DeviceState, KeyReporter};
use crate::light::RgbMatrix;
use crate::{TAP_DANCE_MAX_NUM, TAPPING_TERM_MS};

/// Result of a finished gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Classification {
    /// The key is still held when the gesture is finalized
    Hold,
    SingleTap,
    DoubleTap,
    TripleTap,
    /// More taps than any binding supports, carries the tap count
    Unknown(u8),
}

/// The in-progress state of one tap dance key.
///
/// A session is idle when `count` is 0. The deadline is refreshed by every press.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GestureSession {
    count: u8,
    pressed: bool,
    deadline: Option<Instant>,
}

impl GestureSession {
    pub const fn new() -> Self {
        Self {
            count: 0,
            pressed: false,
            deadline: None,
        }
    }

    /// Number of presses in this gesture
    pub fn count(&self) -> u8 {
        self.count
    }

    /// Whether the key is currently held
    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Record a press. A press while the key is already held is a duplicate and ignored.
    pub fn press(&mut self, now: Instant, tapping_term: Duration) {
        if self.pressed {
            debug!("Duplicate press in tap dance session, ignored");
            return;
        }
        self.count = self.count.saturating_add(1);
        self.pressed = true;
        self.deadline = Some(now + tapping_term);
    }

    /// Record a release. Releasing an idle session does nothing.
    pub fn release(&mut self) {
        if self.is_idle() {
            return;
        }
        self.pressed = false;
    }

    pub fn is_idle(&self) -> bool {
        self.count == 0
    }

    /// Whether the tapping term after the last press has elapsed
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) => !self.is_idle() && now >= deadline,
            None => false,
        }
    }

    /// Classify the gesture, a held key always means hold
    pub fn classify(&self) -> Classification {
        if self.pressed {
            return Classification::Hold;
        }
        match self.count {
            1 => Classification::SingleTap,
            2 => Classification::DoubleTap,
            3 => Classification::TripleTap,
            n => Classification::Unknown(n),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Actions bound to the gestures of a tap dance key
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapDance {
    pub hold: Option<Action>,
    pub single_tap: Option<Action>,
    pub double_tap: Option<Action>,
    pub triple_tap: Option<Action>,
    pub tapping_term: Duration,
}

impl Default for TapDance {
    fn default() -> Self {
        Self {
            hold: None,
            single_tap: None,
            double_tap: None,
            triple_tap: None,
            tapping_term: Duration::from_millis(TAPPING_TERM_MS),
        }
    }
}

impl TapDance {
    pub fn new(
        hold: Option<Action>,
        single_tap: Option<Action>,
        double_tap: Option<Action>,
        triple_tap: Option<Action>,
        tapping_term: Duration,
    ) -> Self {
        Self {
            hold,
            single_tap,
            double_tap,
            triple_tap,
            tapping_term,
        }
    }

    /// The action bound to a gesture. `Unknown` gestures never have one.
    pub fn action_for(&self, classification: Classification) -> Option<Action> {
        match classification {
            Classification::Hold => self.hold,
            Classification::SingleTap => self.single_tap,
            Classification::DoubleTap => self.double_tap,
            Classification::TripleTap => self.triple_tap,
            Classification::Unknown(_) => None,
        }
    }
}

/// Config for tap dance behavior, the index of a binding is its gesture identity
#[derive(Clone, Debug, Default)]
pub struct TapDancesConfig {
    pub tap_dances: Vec<TapDance, TAP_DANCE_MAX_NUM>,
}

/// Tracks one gesture session per tap dance binding and runs the bound actions.
pub struct TapDanceClassifier {
    tap_dances: Vec<TapDance, TAP_DANCE_MAX_NUM>,
    sessions: [GestureSession; TAP_DANCE_MAX_NUM],
    /// Momentary hold actions which are pressed and wait for the physical release
    engaged: [Option<Action>; TAP_DANCE_MAX_NUM],
}

impl TapDanceClassifier {
    pub fn new(config: TapDancesConfig) -> Self {
        Self {
            tap_dances: config.tap_dances,
            sessions: [GestureSession::new(); TAP_DANCE_MAX_NUM],
            engaged: [None; TAP_DANCE_MAX_NUM],
        }
    }

    /// Current session of a tap dance
    pub fn session(&self, id: u8) -> Option<&GestureSession> {
        self.sessions[..self.tap_dances.len()].get(id as usize)
    }

    /// Whether any session has pending presses
    pub fn is_active(&self) -> bool {
        self.sessions.iter().any(|s| !s.is_idle())
    }

    /// Earliest deadline of the pending sessions, the host should poll no later than this
    pub fn next_deadline(&self) -> Option<Instant> {
        self.sessions.iter().filter(|s| !s.is_idle()).filter_map(|s| s.deadline()).min()
    }

    pub fn process_press<R: KeyReporter, M: RgbMatrix, const NUM_LAYER: usize>(
        &mut self,
        id: u8,
        now: Instant,
        device: &mut DeviceState<R, M, NUM_LAYER>,
    ) {
        let Some(tapping_term) = self.tapping_term(id) else {
            return;
        };
        let idx = id as usize;
        if self.engaged[idx].is_some() {
            debug!("Tap dance {} is held, press ignored", id);
            return;
        }
        // A session which has timed out but not been polled yet is a finished gesture
        if !self.sessions[idx].pressed() && self.sessions[idx].is_expired(now) {
            self.finalize(id, device);
        }
        self.sessions[idx].press(now, tapping_term);
        debug!("Tap dance {} pressed, count: {}", id, self.sessions[idx].count());
    }

    pub fn process_release<R: KeyReporter, M: RgbMatrix, const NUM_LAYER: usize>(
        &mut self,
        id: u8,
        now: Instant,
        device: &mut DeviceState<R, M, NUM_LAYER>,
    ) {
        if self.tapping_term(id).is_none() {
            return;
        }
        let idx = id as usize;
        // The key was still held when the tapping term elapsed
        if self.sessions[idx].pressed() && self.sessions[idx].is_expired(now) {
            self.finalize(id, device);
        }
        if self.engaged[idx].is_some() {
            self.reset(id, device);
            return;
        }
        self.sessions[idx].release();
    }

    /// Finalize every session whose tapping term has elapsed
    pub fn poll<R: KeyReporter, M: RgbMatrix, const NUM_LAYER: usize>(
        &mut self,
        now: Instant,
        device: &mut DeviceState<R, M, NUM_LAYER>,
    ) {
        for idx in 0..self.tap_dances.len() {
            if self.sessions[idx].is_expired(now) {
                self.finalize(idx as u8, device);
            }
        }
    }

    /// Another key is pressed, finalize every pending session except `except`
    pub fn interrupt<R: KeyReporter, M: RgbMatrix, const NUM_LAYER: usize>(
        &mut self,
        except: Option<u8>,
        device: &mut DeviceState<R, M, NUM_LAYER>,
    ) {
        for idx in 0..self.tap_dances.len() {
            if Some(idx as u8) == except || self.sessions[idx].is_idle() {
                continue;
            }
            debug!("Tap dance {} interrupted", idx);
            self.finalize(idx as u8, device);
        }
    }

    /// Reset a tap dance: release its engaged hold action and clear the session
    pub fn reset<R: KeyReporter, M: RgbMatrix, const NUM_LAYER: usize>(
        &mut self,
        id: u8,
        device: &mut DeviceState<R, M, NUM_LAYER>,
    ) {
        let idx = id as usize;
        if idx >= self.tap_dances.len() {
            warn!("Reset of unknown tap dance {}", id);
            return;
        }
        if let Some(action) = self.engaged[idx].take() {
            device.process_action(action, false);
        }
        self.sessions[idx].reset();
    }

    pub fn reset_all<R: KeyReporter, M: RgbMatrix, const NUM_LAYER: usize>(
        &mut self,
        device: &mut DeviceState<R, M, NUM_LAYER>,
    ) {
        for idx in 0..self.tap_dances.len() {
            self.reset(idx as u8, device);
        }
    }

    fn tapping_term(&self, id: u8) -> Option<Duration> {
        match self.tap_dances.get(id as usize) {
            Some(tap_dance) => Some(tap_dance.tapping_term),
            None => {
                warn!("Unknown tap dance {}, {} tap dances are configured", id, self.tap_dances.len());
                None
            }
        }
    }

    /// Classify the session, run the bound action once, then reset the session
    fn finalize<R: KeyReporter, M: RgbMatrix, const NUM_LAYER: usize>(
        &mut self,
        id: u8,
        device: &mut DeviceState<R, M, NUM_LAYER>,
    ) {
        let idx = id as usize;
        let classification = self.sessions[idx].classify();
        self.sessions[idx].reset();
        let action = self.tap_dances[idx].action_for(classification);
        info!("Tap dance {} finished as {:?}, action: {:?}", id, classification, action);

        match action {
            Some(action) if classification == Classification::Hold && action.is_momentary() => {
                device.process_action(action, true);
                self.engaged[idx] = Some(action);
            }
            Some(action) => device.tap_action(action),
            None => (),
        }
    }
}

#[cfg(test)]
mod test {
    extern crate std;

    use std::vec::Vec as StdVec;

    use embassy_time::{Duration, Instant};
    use heapless::Vec;

    use super::*;
    use crate::keycode::KeyCode;
    use crate::light::{LightAction, RgbMatrixState};

    #[derive(Default)]
    struct Recorder(StdVec<(KeyCode, bool)>);

    impl KeyReporter for Recorder {
        fn send_key(&mut self, key: KeyCode, pressed: bool) {
            self.0.push((key, pressed));
        }
    }

    const TERM: Duration = Duration::from_millis(200);

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn device() -> DeviceState<Recorder, RgbMatrixState<4>, 4> {
        DeviceState::new(Recorder::default(), RgbMatrixState::default())
    }

    fn classifier() -> TapDanceClassifier {
        let mut tap_dances = Vec::new();
        let _ = tap_dances.push(TapDance::new(
            Some(Action::Key(KeyCode::LShift)),
            Some(Action::Key(KeyCode::A)),
            Some(Action::Key(KeyCode::B)),
            Some(Action::Key(KeyCode::C)),
            TERM,
        ));
        let _ = tap_dances.push(TapDance::new(
            Some(Action::Light(LightAction::Toggle)),
            None,
            Some(Action::Light(LightAction::CycleAccent)),
            None,
            TERM,
        ));
        TapDanceClassifier::new(TapDancesConfig { tap_dances })
    }

    #[test]
    fn test_classify() {
        let mut session = GestureSession::new();
        assert!(session.is_idle());

        session.press(at(0), TERM);
        assert_eq!(session.classify(), Classification::Hold);
        session.release();
        assert_eq!(session.classify(), Classification::SingleTap);
        session.press(at(50), TERM);
        session.release();
        assert_eq!(session.classify(), Classification::DoubleTap);
        session.press(at(100), TERM);
        session.release();
        assert_eq!(session.classify(), Classification::TripleTap);
        session.press(at(150), TERM);
        session.release();
        assert_eq!(session.classify(), Classification::Unknown(4));

        session.reset();
        assert_eq!(session, GestureSession::new());
    }

    #[test]
    fn test_session_deadline() {
        let mut session = GestureSession::new();
        session.press(at(0), TERM);
        // Duplicate press doesn't count and doesn't move the deadline
        session.press(at(100), TERM);
        assert_eq!(session.count(), 1);
        assert_eq!(session.deadline(), Some(at(200)));

        session.release();
        session.press(at(150), TERM);
        assert_eq!(session.deadline(), Some(at(350)));
        assert!(!session.is_expired(at(349)));
        assert!(session.is_expired(at(350)));
    }

    #[test]
    fn test_count_saturates() {
        let mut session = GestureSession::new();
        for i in 0..300u64 {
            session.press(at(i), TERM);
            session.release();
        }
        assert_eq!(session.count(), u8::MAX);
        assert_eq!(session.classify(), Classification::Unknown(u8::MAX));
    }

    #[test]
    fn test_release_of_idle_session() {
        let mut session = GestureSession::new();
        session.release();
        assert!(session.is_idle());
        assert!(!session.is_expired(at(1000)));
    }

    #[test]
    fn test_unknown_has_no_action() {
        let tap_dance = TapDance::new(
            Some(Action::Key(KeyCode::A)),
            Some(Action::Key(KeyCode::A)),
            Some(Action::Key(KeyCode::A)),
            Some(Action::Key(KeyCode::A)),
            TERM,
        );
        assert_eq!(tap_dance.action_for(Classification::Unknown(4)), None);
        assert_eq!(tap_dance.action_for(Classification::Unknown(0)), None);
        assert_eq!(TapDance::default().tapping_term, Duration::from_millis(TAPPING_TERM_MS));
    }

    #[test]
    fn test_double_tap_fires_once() {
        let mut classifier = classifier();
        let mut device = device();
        classifier.process_press(0, at(0), &mut device);
        classifier.process_release(0, at(50), &mut device);
        classifier.process_press(0, at(100), &mut device);
        classifier.process_release(0, at(150), &mut device);

        classifier.poll(at(250), &mut device);
        assert!(device.reporter.0.is_empty());
        assert_eq!(classifier.next_deadline(), Some(at(300)));

        classifier.poll(at(300), &mut device);
        assert_eq!(device.reporter.0, [(KeyCode::B, true), (KeyCode::B, false)]);

        // Finalized session is idle, polling again does nothing
        classifier.poll(at(1000), &mut device);
        assert_eq!(device.reporter.0.len(), 2);
        assert!(!classifier.is_active());
        assert_eq!(classifier.next_deadline(), None);
    }

    #[test]
    fn test_momentary_hold_is_engaged() {
        let mut classifier = classifier();
        let mut device = device();
        classifier.process_press(0, at(0), &mut device);
        classifier.poll(at(200), &mut device);
        assert_eq!(device.reporter.0, [(KeyCode::LShift, true)]);

        classifier.process_release(0, at(250), &mut device);
        assert_eq!(device.reporter.0, [(KeyCode::LShift, true), (KeyCode::LShift, false)]);
        assert!(classifier.session(0).is_some_and(|s| s.is_idle()));
    }

    #[test]
    fn test_release_after_deadline_is_hold() {
        let mut classifier = classifier();
        let mut device = device();
        classifier.process_press(0, at(0), &mut device);
        classifier.poll(at(199), &mut device);
        assert!(device.reporter.0.is_empty());

        // Held past the tapping term, released before the next poll
        classifier.process_release(0, at(205), &mut device);
        classifier.poll(at(205), &mut device);
        assert_eq!(device.reporter.0, [(KeyCode::LShift, true), (KeyCode::LShift, false)]);
        assert!(!classifier.is_active());
    }

    #[test]
    fn test_release_after_deadline_fires_non_momentary_hold() {
        let mut classifier = classifier();
        let mut device = device();
        classifier.process_press(1, at(0), &mut device);
        classifier.process_release(1, at(300), &mut device);
        assert!(!device.light.is_enabled());
        assert!(!classifier.is_active());
    }

    #[test]
    fn test_session_of_unconfigured_id() {
        let classifier = classifier();
        assert!(classifier.session(1).is_some());
        assert!(classifier.session(2).is_none());
        assert!(classifier.session(u8::MAX).is_none());
    }

    #[test]
    fn test_late_poll_doesnt_merge_gestures() {
        let mut classifier = classifier();
        let mut device = device();
        classifier.process_press(0, at(0), &mut device);
        classifier.process_release(0, at(50), &mut device);
        // The first gesture expired at 200 but nothing polled
        classifier.process_press(0, at(500), &mut device);
        assert_eq!(device.reporter.0, [(KeyCode::A, true), (KeyCode::A, false)]);
        assert_eq!(classifier.session(0).map(|s| s.count()), Some(1));
    }

    #[test]
    fn test_interrupt() {
        let mut classifier = classifier();
        let mut device = device();
        classifier.process_press(0, at(0), &mut device);
        classifier.process_release(0, at(5), &mut device);
        classifier.process_press(1, at(10), &mut device);

        classifier.interrupt(Some(1), &mut device);
        assert_eq!(device.reporter.0, [(KeyCode::A, true), (KeyCode::A, false)]);
        assert!(classifier.session(1).is_some_and(|s| !s.is_idle()));

        // Held key classifies as hold when interrupted
        classifier.interrupt(None, &mut device);
        assert!(!device.light.is_enabled());
        assert!(!classifier.is_active());
    }

    #[test]
    fn test_reset_mid_session() {
        let mut classifier = classifier();
        let mut device = device();
        classifier.process_press(0, at(0), &mut device);
        classifier.reset(0, &mut device);
        classifier.process_release(0, at(20), &mut device);

        classifier.process_press(0, at(50), &mut device);
        assert_eq!(classifier.session(0).map(|s| s.count()), Some(1));
        assert_eq!(classifier.next_deadline(), Some(at(250)));
        assert!(device.reporter.0.is_empty());
    }

    #[test]
    fn test_independent_sessions() {
        let mut classifier = classifier();
        let mut device = device();
        classifier.process_press(0, at(0), &mut device);
        classifier.process_release(0, at(10), &mut device);
        classifier.process_press(1, at(20), &mut device);
        classifier.process_release(1, at(30), &mut device);
        classifier.process_press(0, at(40), &mut device);
        classifier.process_release(0, at(60), &mut device);

        assert_eq!(classifier.session(0).map(|s| s.count()), Some(2));
        assert_eq!(classifier.session(1).map(|s| s.count()), Some(1));

        // Single tap of tap dance 1 has no action
        classifier.poll(at(220), &mut device);
        assert!(device.reporter.0.is_empty());
        assert_eq!(classifier.session(0).map(|s| s.count()), Some(2));
        assert_eq!(classifier.session(1).map(|s| s.count()), Some(0));

        classifier.poll(at(240), &mut device);
        assert_eq!(device.reporter.0, [(KeyCode::B, true), (KeyCode::B, false)]);
        assert!(!classifier.is_active());
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut classifier = classifier();
        let mut device = device();
        classifier.process_press(7, at(0), &mut device);
        classifier.process_release(7, at(10), &mut device);
        classifier.reset(7, &mut device);
        assert!(!classifier.is_active());
        assert!(device.reporter.0.is_empty());
    }

    #[test]
    fn test_reset_all_releases_engaged() {
        let mut classifier = classifier();
        let mut device = device();
        classifier.process_press(0, at(0), &mut device);
        classifier.poll(at(300), &mut device);
        classifier.process_press(1, at(300), &mut device);
        classifier.reset_all(&mut device);

        assert_eq!(device.reporter.0, [(KeyCode::LShift, true), (KeyCode::LShift, false)]);
        assert!(!classifier.is_active());
        // Gesture was dropped, no lighting effect fired
        assert!(device.light.is_enabled());
    }
}
