//! Slider arbitration — one outbound command per gesture, latest value wins.
//!
//! Volume and seek are continuous controls that the server also writes to.
//! While the user is dragging, server echoes must not move the slider, and
//! intermediate drag values must not be sent.  The release itself is not a
//! reliable point to read the final value either: input backends differ in
//! whether the last change event lands before or after the release.  So the
//! release only *arms* a send; the command goes out once a short quiescence
//! window has passed with no new press.
//!
//! # States
//! ```text
//!  Idle             — control untouched; server may render freely
//!  Held             — press/drag in progress; values recorded, nothing sent
//!  Armed { deadline } — released; the one send fires at the deadline
//! ```
//!
//! A new press while armed cancels the deadline, so rapid press/release
//! cycles collapse into a single send carrying the latest value.

use std::time::{Duration, Instant};

/// The two continuous controls of the remote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Volume,
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Held,
    Armed { deadline: Instant },
}

#[derive(Debug)]
pub struct SliderArbiter {
    settle: Duration,
    phase: Phase,
    /// Last value the user set.  This is what eventually gets sent.
    pending: f64,
    /// True when `pending` was written during the current gesture.  A gesture
    /// with no input change arms nothing and sends nothing.
    dirty: bool,
}

impl SliderArbiter {
    pub fn new(settle: Duration) -> Self {
        Self {
            settle,
            phase: Phase::Idle,
            pending: 0.0,
            dirty: false,
        }
    }

    /// Press/drag-start.  Cancels any armed send from a previous release.
    pub fn press(&mut self) {
        self.phase = Phase::Held;
        self.dirty = false;
    }

    /// An input-change event.  Recorded, never emitted directly.
    pub fn input(&mut self, value: f64) {
        self.pending = value;
        self.dirty = true;
    }

    /// Release.  Arms the deferred send if the gesture changed anything.
    pub fn release(&mut self, now: Instant) {
        if self.phase == Phase::Held {
            self.phase = Phase::Armed {
                deadline: now + self.settle,
            };
        }
    }

    /// Settle tick.  Returns the value to send once the quiescence window
    /// after release has passed; at most one `Some` per gesture.
    pub fn tick(&mut self, now: Instant) -> Option<f64> {
        match self.phase {
            Phase::Armed { deadline } if now >= deadline => {
                self.phase = Phase::Idle;
                if self.dirty {
                    self.dirty = false;
                    Some(self.pending)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// True from press until the pending send has completed.  The render
    /// cache uses this to keep server echoes off the slider.
    pub fn is_engaged(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTLE: Duration = Duration::from_millis(150);

    fn arbiter() -> SliderArbiter {
        SliderArbiter::new(SETTLE)
    }

    #[test]
    fn test_one_send_per_gesture() {
        let mut arb = arbiter();
        let t0 = Instant::now();

        arb.press();
        arb.input(40.0);
        arb.input(55.0);
        arb.release(t0);

        // Before the window elapses: nothing.
        assert_eq!(arb.tick(t0 + Duration::from_millis(50)), None);
        // After: exactly one send with the final value.
        assert_eq!(arb.tick(t0 + SETTLE), Some(55.0));
        assert_eq!(arb.tick(t0 + SETTLE * 2), None);
        assert!(!arb.is_engaged());
    }

    #[test]
    fn test_rapid_regrab_latest_wins() {
        let mut arb = arbiter();
        let t0 = Instant::now();

        arb.press();
        arb.input(30.0);
        arb.release(t0);

        // Second gesture starts before the first deadline fires.
        arb.press();
        arb.input(80.0);
        let t1 = t0 + Duration::from_millis(100);
        arb.release(t1);

        // The first deadline passing must not emit — it was cancelled.
        assert_eq!(arb.tick(t0 + SETTLE), None);
        assert_eq!(arb.tick(t1 + SETTLE), Some(80.0));
        assert_eq!(arb.tick(t1 + SETTLE * 2), None);
    }

    #[test]
    fn test_engaged_through_hold_and_settle() {
        let mut arb = arbiter();
        let t0 = Instant::now();

        assert!(!arb.is_engaged());
        arb.press();
        assert!(arb.is_engaged());
        arb.input(10.0);
        arb.release(t0);
        // Still engaged while armed: the server must not repaint yet.
        assert!(arb.is_engaged());
        arb.tick(t0 + SETTLE);
        assert!(!arb.is_engaged());
    }

    #[test]
    fn test_gesture_without_input_sends_nothing() {
        let mut arb = arbiter();
        let t0 = Instant::now();

        arb.press();
        arb.release(t0);
        assert_eq!(arb.tick(t0 + SETTLE), None);
        assert!(!arb.is_engaged());
    }

    #[test]
    fn test_late_change_after_release_still_carried() {
        // Some backends deliver the final change event after the release;
        // the settle window exists exactly for this.
        let mut arb = arbiter();
        let t0 = Instant::now();

        arb.press();
        arb.input(20.0);
        arb.release(t0);
        arb.input(25.0);
        assert_eq!(arb.tick(t0 + SETTLE), Some(25.0));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut arb = arbiter();
        let t0 = Instant::now();

        arb.input(70.0);
        arb.release(t0);
        assert_eq!(arb.tick(t0 + SETTLE), None);
        assert!(!arb.is_engaged());
    }
}
