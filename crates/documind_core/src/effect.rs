use std::time::Duration;

use crate::TimerId;

/// Work the driver performs on behalf of `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::TimerFired { timer, .. }` once `delay` has elapsed.
    StartTimer { timer: TimerId, delay: Duration },
    /// The timer must not fire anymore.
    CancelTimer { timer: TimerId },
}
