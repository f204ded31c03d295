use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::Duration;

/// Handle for a scheduled delay. Allocated by the state, executed by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Deterministic scheduler for timers on a virtual time axis.
///
/// Timers with equal deadlines fire in scheduling order.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: Duration,
    seq: u64,
    queue: BTreeMap<(Duration, u64), TimerId>,
    index: HashMap<TimerId, (Duration, u64)>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed virtual time since the clock was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedules `timer` to fire `delay` from now. Rescheduling an id replaces it.
    pub fn schedule(&mut self, timer: TimerId, delay: Duration) {
        self.cancel(timer);
        let key = (self.now + delay, self.seq);
        self.seq += 1;
        self.queue.insert(key, timer);
        self.index.insert(timer, key);
    }

    /// Returns true if the timer was still pending.
    pub fn cancel(&mut self, timer: TimerId) -> bool {
        match self.index.remove(&timer) {
            Some(key) => {
                self.queue.remove(&key);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, timer: TimerId) -> bool {
        self.index.contains_key(&timer)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Removes the earliest timer due at or before `until`, moving the clock to its deadline.
    pub fn pop_due(&mut self, until: Duration) -> Option<TimerId> {
        let (&key, &timer) = self.queue.iter().next()?;
        if key.0 > until {
            return None;
        }
        self.queue.remove(&key);
        self.index.remove(&timer);
        self.now = self.now.max(key.0);
        Some(timer)
    }

    /// Moves the clock forward without firing anything.
    pub fn advance_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn fires_in_deadline_then_schedule_order() {
        let mut clock = VirtualClock::new();
        clock.schedule(TimerId(1), ms(300));
        clock.schedule(TimerId(2), ms(100));
        clock.schedule(TimerId(3), ms(100));

        assert_eq!(clock.pop_due(ms(1000)), Some(TimerId(2)));
        assert_eq!(clock.pop_due(ms(1000)), Some(TimerId(3)));
        assert_eq!(clock.now(), ms(100));
        assert_eq!(clock.pop_due(ms(1000)), Some(TimerId(1)));
        assert_eq!(clock.pop_due(ms(1000)), None);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut clock = VirtualClock::new();
        clock.schedule(TimerId(7), ms(50));
        assert!(clock.cancel(TimerId(7)));
        assert!(!clock.cancel(TimerId(7)));
        assert_eq!(clock.pop_due(ms(100)), None);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn not_due_before_deadline() {
        let mut clock = VirtualClock::new();
        clock.schedule(TimerId(1), ms(200));
        assert_eq!(clock.pop_due(ms(199)), None);
        assert_eq!(clock.next_deadline(), Some(ms(200)));
        assert!(clock.is_pending(TimerId(1)));
    }

    #[test]
    fn delays_are_relative_to_current_time() {
        let mut clock = VirtualClock::new();
        clock.advance_to(ms(1000));
        clock.schedule(TimerId(1), ms(500));
        assert_eq!(clock.next_deadline(), Some(ms(1500)));
    }
}
