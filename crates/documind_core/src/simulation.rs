use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};
use documind_logging::{dm_trace, set_virtual_ms};

use crate::{update, AppState, Effect, IncomingFile, Msg, Settings, VirtualClock};

/// Single owner of `AppState` driven by a virtual clock.
///
/// Every message goes through `update`; timer effects land on the clock and
/// come back as `Msg::TimerFired` when `advance` passes their deadline. Wall
/// clock timestamps are `origin` plus elapsed virtual time.
#[derive(Debug, Clone)]
pub struct Simulation {
    state: AppState,
    clock: VirtualClock,
    origin: NaiveDateTime,
}

impl Simulation {
    pub fn new(settings: Settings, origin: NaiveDateTime) -> Self {
        set_virtual_ms(0);
        Self {
            state: AppState::started_at(settings, origin),
            clock: VirtualClock::new(),
            origin,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Marks the current state as rendered.
    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.now()
    }

    /// Wall-clock time corresponding to the current virtual instant.
    pub fn now(&self) -> NaiveDateTime {
        let millis = i64::try_from(self.clock.now().as_millis()).unwrap_or(i64::MAX);
        self.origin + TimeDelta::milliseconds(millis)
    }

    pub fn pending_timers(&self) -> usize {
        self.clock.pending()
    }

    /// Applies `msg` and schedules its effects. The effects are returned for inspection.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in &effects {
            match *effect {
                Effect::StartTimer { timer, delay } => {
                    dm_trace!("schedule {} in {:?}", timer, delay);
                    self.clock.schedule(timer, delay);
                }
                Effect::CancelTimer { timer } => {
                    dm_trace!("cancel {}", timer);
                    self.clock.cancel(timer);
                }
            }
        }
        effects
    }

    /// Moves virtual time forward by `by`, firing due timers in order. Returns how many fired.
    pub fn advance(&mut self, by: Duration) -> usize {
        let target = self.clock.now() + by;
        let mut fired = 0;
        while let Some(timer) = self.clock.pop_due(target) {
            self.sync_log_clock();
            let at = self.now();
            self.dispatch(Msg::TimerFired { timer, at });
            fired += 1;
        }
        self.clock.advance_to(target);
        self.sync_log_clock();
        fired
    }

    /// Fires timers until none are pending.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.clock.next_deadline() {
            let by = deadline.saturating_sub(self.clock.now());
            fired += self.advance(by);
        }
        fired
    }

    pub fn upload(&mut self, files: Vec<IncomingFile>) -> Vec<Effect> {
        let at = self.now();
        self.dispatch(Msg::FilesUploaded { files, at })
    }

    pub fn send_chat(&mut self, text: impl Into<String>) -> Vec<Effect> {
        let at = self.now();
        self.dispatch(Msg::ChatSubmitted {
            text: text.into(),
            at,
        })
    }

    fn sync_log_clock(&self) {
        let millis = u64::try_from(self.clock.now().as_millis()).unwrap_or(u64::MAX);
        set_virtual_ms(millis);
    }
}
