//! Countdown state machine for a single tracked notification.
//!
//! A [`NotificationCell`] owns the auto-dismiss clock for exactly one
//! notification. It knows nothing about other notifications or about
//! animation phases; the stack layers those on top.
//!
//! Every operation takes an explicit `now` so the machine can be driven
//! with synthetic instants in tests and by the runtime's clock in
//! production. Elapsed time is always a monotonic delta between instants,
//! never a tick count, so pause/resume cycles cannot drift the budget.

use std::time::Duration;

use tokio::time::Instant;

use crate::domain::NotificationRecord;

/// Auto-dismiss countdown state.
///
/// `Expired` is terminal: once reached, no operation revives the
/// countdown, which is what guarantees at-most-once expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Countdown {
    /// No auto-dismiss; the notification stays until dismissed.
    Persistent,
    /// Counting down toward `deadline`.
    Running { deadline: Instant },
    /// Stopped with `remaining` time still on the clock.
    Paused { remaining: Duration },
    /// The countdown completed.
    Expired,
}

/// Tracks the dismissal countdown for one notification.
#[derive(Debug, Clone)]
pub struct NotificationCell {
    record: NotificationRecord,
    countdown: Countdown,
}

impl NotificationCell {
    /// Creates a cell and starts its countdown at `now`.
    ///
    /// Records without a duration (or with a zero duration) get no
    /// countdown and stay until dismissed another way.
    pub fn new(record: NotificationRecord, now: Instant) -> Self {
        let countdown = match record.duration {
            Some(duration) if !duration.is_zero() => Countdown::Running {
                deadline: now + duration,
            },
            _ => Countdown::Persistent,
        };
        Self { record, countdown }
    }

    /// Returns the notification record this cell tracks.
    pub fn record(&self) -> &NotificationRecord {
        &self.record
    }

    /// Replaces the displayed content without touching the countdown.
    ///
    /// Used when the caller re-supplies a tracked id with new text; the
    /// clock keeps running from the original admission.
    pub fn refresh_record(&mut self, record: NotificationRecord) {
        self.record = record;
    }

    /// Pauses the countdown, preserving the remaining budget.
    ///
    /// Returns false without changing state when there is nothing to
    /// pause: persistent cells, already-paused cells, and cells whose
    /// deadline has already been reached (expiry takes precedence).
    pub fn pause(&mut self, now: Instant) -> bool {
        match self.countdown {
            Countdown::Running { deadline } if now < deadline => {
                self.countdown = Countdown::Paused {
                    remaining: deadline - now,
                };
                true
            }
            _ => false,
        }
    }

    /// Resumes a paused countdown with the preserved remaining budget.
    ///
    /// Returns false without changing state when the cell is not paused.
    pub fn resume(&mut self, now: Instant) -> bool {
        match self.countdown {
            Countdown::Paused { remaining } => {
                self.countdown = Countdown::Running {
                    deadline: now + remaining,
                };
                true
            }
            _ => false,
        }
    }

    /// Completes the cell immediately, bypassing any remaining countdown.
    ///
    /// Rejected (returns false, no state change) when the record is not
    /// dismissible or the countdown already fired.
    pub fn dismiss_now(&mut self) -> bool {
        if !self.record.dismissible {
            return false;
        }
        match self.countdown {
            Countdown::Expired => false,
            _ => {
                self.countdown = Countdown::Expired;
                true
            }
        }
    }

    /// Fires the expiry transition if the countdown is due at `now`.
    ///
    /// Returns true at most once per cell: after firing, the countdown is
    /// terminal and all later polls return false, regardless of how
    /// pause/resume/dismiss interleaved before this point.
    pub fn poll_expiry(&mut self, now: Instant) -> bool {
        match self.countdown {
            Countdown::Running { deadline } if now >= deadline => {
                self.countdown = Countdown::Expired;
                true
            }
            _ => false,
        }
    }

    /// Returns the pending countdown deadline, if one is running.
    pub fn deadline(&self) -> Option<Instant> {
        match self.countdown {
            Countdown::Running { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Returns the unexpired countdown budget, for progress indicators.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match self.countdown {
            Countdown::Running { deadline } => Some(deadline.saturating_duration_since(now)),
            Countdown::Paused { remaining } => Some(remaining),
            _ => None,
        }
    }

    /// Returns true while the countdown is paused.
    pub fn is_paused(&self) -> bool {
        matches!(self.countdown, Countdown::Paused { .. })
    }

    /// Returns true once the countdown has fired or been bypassed.
    pub fn has_expired(&self) -> bool {
        matches!(self.countdown, Countdown::Expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationRecord;

    fn timed(id: &str, millis: u64) -> NotificationRecord {
        NotificationRecord::info(id, "Test").with_duration(Some(Duration::from_millis(millis)))
    }

    #[test]
    fn countdown_fires_at_deadline() {
        let t0 = Instant::now();
        let mut cell = NotificationCell::new(timed("a", 5000), t0);

        assert!(!cell.poll_expiry(t0 + Duration::from_millis(4999)));
        assert!(cell.poll_expiry(t0 + Duration::from_millis(5000)));
        assert!(cell.has_expired());
    }

    #[test]
    fn expiry_fires_at_most_once() {
        let t0 = Instant::now();
        let mut cell = NotificationCell::new(timed("a", 100), t0);

        assert!(cell.poll_expiry(t0 + Duration::from_millis(100)));
        assert!(!cell.poll_expiry(t0 + Duration::from_millis(200)));
        assert!(!cell.poll_expiry(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn pause_resume_conserves_active_budget() {
        // 5000ms duration, paused at 2000, resumed at 10000: the remaining
        // 3000ms of active time puts expiry at 13000, not 15000.
        let t0 = Instant::now();
        let mut cell = NotificationCell::new(timed("a", 5000), t0);

        assert!(cell.pause(t0 + Duration::from_millis(2000)));
        assert!(!cell.poll_expiry(t0 + Duration::from_millis(9000)));
        assert!(cell.resume(t0 + Duration::from_millis(10_000)));

        assert!(!cell.poll_expiry(t0 + Duration::from_millis(12_999)));
        assert!(cell.poll_expiry(t0 + Duration::from_millis(13_000)));
    }

    #[test]
    fn pause_is_idempotent() {
        let t0 = Instant::now();
        let mut cell = NotificationCell::new(timed("a", 5000), t0);

        assert!(cell.pause(t0 + Duration::from_millis(1000)));
        assert!(!cell.pause(t0 + Duration::from_millis(2000)));

        // The second pause must not have overwritten the preserved budget.
        assert_eq!(
            cell.remaining(t0 + Duration::from_millis(3000)),
            Some(Duration::from_millis(4000))
        );
    }

    #[test]
    fn resume_without_pause_is_noop() {
        let t0 = Instant::now();
        let mut cell = NotificationCell::new(timed("a", 5000), t0);

        assert!(!cell.resume(t0 + Duration::from_millis(1000)));
        assert!(cell.poll_expiry(t0 + Duration::from_millis(5000)));
    }

    #[test]
    fn persistent_cell_never_expires() {
        let t0 = Instant::now();
        let mut cell = NotificationCell::new(NotificationRecord::error("a", "Failed"), t0);

        assert!(!cell.poll_expiry(t0 + Duration::from_secs(3600)));
        assert!(!cell.pause(t0));
        assert!(cell.deadline().is_none());
        assert!(cell.remaining(t0).is_none());
    }

    #[test]
    fn zero_duration_is_persistent() {
        let t0 = Instant::now();
        let mut record = NotificationRecord::info("a", "Test");
        record.duration = Some(Duration::ZERO);
        let mut cell = NotificationCell::new(record, t0);

        assert!(!cell.poll_expiry(t0 + Duration::from_secs(3600)));
        assert!(cell.deadline().is_none());
    }

    #[test]
    fn pause_after_deadline_is_noop() {
        let t0 = Instant::now();
        let mut cell = NotificationCell::new(timed("a", 100), t0);

        assert!(!cell.pause(t0 + Duration::from_millis(150)));
        assert!(cell.poll_expiry(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn dismiss_respects_dismissible_flag() {
        let t0 = Instant::now();
        let locked = NotificationRecord::info("a", "Test").not_dismissible();
        let mut cell = NotificationCell::new(locked, t0);

        assert!(!cell.dismiss_now());
        assert!(!cell.has_expired());

        let mut cell = NotificationCell::new(timed("b", 5000), t0);
        assert!(cell.dismiss_now());
        assert!(cell.has_expired());
    }

    #[test]
    fn dismiss_absorbs_later_expiry() {
        let t0 = Instant::now();
        let mut cell = NotificationCell::new(timed("a", 100), t0);

        assert!(cell.dismiss_now());
        assert!(!cell.poll_expiry(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn refresh_keeps_countdown() {
        let t0 = Instant::now();
        let mut cell = NotificationCell::new(timed("a", 5000), t0);

        cell.refresh_record(timed("a", 60_000));
        assert_eq!(cell.record().duration, Some(Duration::from_millis(60_000)));

        // The original admission-time deadline still holds.
        assert!(cell.poll_expiry(t0 + Duration::from_millis(5000)));
    }

    #[test]
    fn remaining_tracks_clock() {
        let t0 = Instant::now();
        let cell = NotificationCell::new(timed("a", 5000), t0);

        assert_eq!(
            cell.remaining(t0 + Duration::from_millis(1500)),
            Some(Duration::from_millis(3500))
        );
        assert_eq!(
            cell.remaining(t0 + Duration::from_millis(9000)),
            Some(Duration::ZERO)
        );
    }
}
