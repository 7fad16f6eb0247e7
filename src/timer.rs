use std::time::{Duration, Instant};

/// Periodic tick source driven from the event loop.
///
/// Disarmed timers never fire; `cancel` only prevents the next tick.
#[derive(Debug, Clone)]
pub struct TickTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Arm the timer so the first tick lands one period from `now`
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Returns true at most once per call when a tick is due, then schedules
    /// the following one. A loop that fell behind resumes one period from `now`
    /// instead of firing a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = due + self.period;
                self.next_due = Some(if next <= now { now + self.period } else { next });
                true
            }
            _ => false,
        }
    }

    /// Time left until the next tick, if armed
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}
