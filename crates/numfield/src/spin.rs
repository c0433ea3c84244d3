//! Auto-repeat timing for the spin buttons.
//!
//! Holding a spin button (or an arrow key) steps once immediately, then
//! repeats after an initial delay. [`SpinController`] tracks only the
//! timing state; the host drives it by polling at or after the exposed
//! deadline and applying the steps it yields.

use std::time::{Duration, Instant};

use crate::edit::SpinDirection;

/// Delay before the first auto-repeat step.
pub const INITIAL_DELAY: Duration = Duration::from_millis(500);

/// Interval between auto-repeat steps once repeating.
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(40);

/// Tracks press-and-hold state for spin auto-repeat.
///
/// # Example
///
/// ```ignore
/// let mut spin = SpinController::new();
/// spin.press(SpinDirection::Up, Instant::now());
/// // caller steps once immediately, then polls:
/// if let Some(direction) = spin.poll(Instant::now()) {
///     // apply another step
/// }
/// ```
#[derive(Debug, Default)]
pub struct SpinController {
    active: Option<ActiveSpin>,
}

#[derive(Debug)]
struct ActiveSpin {
    direction: SpinDirection,
    deadline: Instant,
}

impl SpinController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin holding in `direction`. The caller applies the first step
    /// itself; the first repeat fires [`INITIAL_DELAY`] after `now`.
    pub fn press(&mut self, direction: SpinDirection, now: Instant) {
        self.active = Some(ActiveSpin {
            direction,
            deadline: now + INITIAL_DELAY,
        });
    }

    /// Stop repeating. Releasing an idle controller is a no-op.
    pub fn release(&mut self) {
        self.active = None;
    }

    /// Whether a button is currently held.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The held direction, if any.
    pub fn direction(&self) -> Option<SpinDirection> {
        self.active.as_ref().map(|a| a.direction)
    }

    /// When the next repeat step is due.
    pub fn deadline(&self) -> Option<Instant> {
        self.active.as_ref().map(|a| a.deadline)
    }

    /// Yield one repeat step if its deadline has passed, re-arming the
    /// next one at `now + REPEAT_INTERVAL`.
    ///
    /// Returns at most one step per call; a host that polled late applies
    /// steps at its own polling rate rather than bursting to catch up.
    pub fn poll(&mut self, now: Instant) -> Option<SpinDirection> {
        let active = self.active.as_mut()?;
        if now < active.deadline {
            return None;
        }
        active.deadline = now + REPEAT_INTERVAL;
        Some(active.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_controller_yields_nothing() {
        let mut spin = SpinController::new();
        assert!(!spin.is_active());
        assert_eq!(spin.deadline(), None);
        assert_eq!(spin.poll(Instant::now()), None);
    }

    #[test]
    fn test_first_repeat_waits_for_initial_delay() {
        let mut spin = SpinController::new();
        let t0 = Instant::now();
        spin.press(SpinDirection::Up, t0);
        assert!(spin.is_active());
        assert_eq!(spin.direction(), Some(SpinDirection::Up));

        assert_eq!(spin.poll(t0 + Duration::from_millis(100)), None);
        assert_eq!(
            spin.poll(t0 + INITIAL_DELAY),
            Some(SpinDirection::Up)
        );
    }

    #[test]
    fn test_repeats_at_interval_after_first() {
        let mut spin = SpinController::new();
        let t0 = Instant::now();
        spin.press(SpinDirection::Down, t0);

        let t1 = t0 + INITIAL_DELAY;
        assert_eq!(spin.poll(t1), Some(SpinDirection::Down));
        // Re-armed relative to poll time
        assert_eq!(spin.poll(t1 + Duration::from_millis(10)), None);
        assert_eq!(
            spin.poll(t1 + REPEAT_INTERVAL),
            Some(SpinDirection::Down)
        );
    }

    #[test]
    fn test_one_step_per_poll_when_late() {
        let mut spin = SpinController::new();
        let t0 = Instant::now();
        spin.press(SpinDirection::Up, t0);

        // Poll long after several intervals elapsed: still one step
        let late = t0 + INITIAL_DELAY + Duration::from_secs(1);
        assert_eq!(spin.poll(late), Some(SpinDirection::Up));
        assert_eq!(spin.poll(late), None);
    }

    #[test]
    fn test_release_stops_repeating() {
        let mut spin = SpinController::new();
        let t0 = Instant::now();
        spin.press(SpinDirection::Up, t0);
        spin.release();
        assert!(!spin.is_active());
        assert_eq!(spin.poll(t0 + INITIAL_DELAY), None);
    }

    #[test]
    fn test_new_press_replaces_direction() {
        let mut spin = SpinController::new();
        let t0 = Instant::now();
        spin.press(SpinDirection::Up, t0);
        spin.press(SpinDirection::Down, t0 + Duration::from_millis(100));
        assert_eq!(spin.direction(), Some(SpinDirection::Down));
        // Delay restarts from the second press
        assert_eq!(spin.poll(t0 + INITIAL_DELAY), None);
        assert_eq!(
            spin.poll(t0 + Duration::from_millis(100) + INITIAL_DELAY),
            Some(SpinDirection::Down)
        );
    }
}
