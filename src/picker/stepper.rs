use super::time_constraints::{StepDirection, TimeUnit};
use crate::runtime::scheduler::{Scheduler, SchedulerCommand};
use std::time::{Duration, Instant};
use tracing::trace;

pub const HOLD_DELAY: Duration = Duration::from_millis(500);
pub const REPEAT_INTERVAL: Duration = Duration::from_millis(70);

const REPEAT_KEY: &str = "stepper.repeat";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Press {
    pub direction: StepDirection,
    pub unit: TimeUnit,
}

impl Press {
    pub fn new(direction: StepDirection, unit: TimeUnit) -> Self {
        Self { direction, unit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Repeat;

/// Press-and-hold repeater for one time counter.
///
/// The first step is applied by the caller on press. Holding past
/// [`HOLD_DELAY`] yields one more step every [`REPEAT_INTERVAL`] until
/// release or cancel. A late tick catches up on every interval it missed. The timer belongs to this value, so dropping the
/// picker drops any pending repeat with it.
#[derive(Debug, Default)]
pub struct Stepper {
    scheduler: Scheduler<Repeat>,
    active: Option<Press>,
    next_due: Option<Instant>,
}

impl Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<Press> {
        self.active
    }

    pub fn press(&mut self, press: Press, now: Instant) {
        self.cancel_timer(now);
        self.active = Some(press);
        self.next_due = Some(now + HOLD_DELAY);
        self.scheduler.schedule(
            SchedulerCommand::EmitAfter {
                key: REPEAT_KEY.to_string(),
                delay: HOLD_DELAY,
                event: Repeat,
            },
            now,
        );
    }

    /// Number of repeat steps due at `now`, counting every interval that
    /// elapsed since the previous repeat was due.
    pub fn tick(&mut self, now: Instant) -> usize {
        if self.active.is_none() {
            return 0;
        }
        if self.scheduler.drain_ready(now).is_empty() {
            return 0;
        }
        let due = self.next_due.unwrap_or(now);
        let late = now.saturating_duration_since(due);
        let steps = 1 + (late.as_nanos() / REPEAT_INTERVAL.as_nanos()) as u32;
        let next_due = due + REPEAT_INTERVAL * steps;
        self.next_due = Some(next_due);
        self.scheduler.schedule(
            SchedulerCommand::EmitAfter {
                key: REPEAT_KEY.to_string(),
                delay: next_due.saturating_duration_since(now),
                event: Repeat,
            },
            now,
        );
        trace!(press = ?self.active, steps, "stepper repeat");
        steps as usize
    }

    pub fn release(&mut self, now: Instant) -> Option<Press> {
        self.cancel_timer(now);
        self.active.take()
    }

    pub fn cancel(&mut self, now: Instant) {
        self.cancel_timer(now);
        self.active = None;
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        if self.active.is_none() {
            return default_timeout;
        }
        self.scheduler.poll_timeout(now, default_timeout)
    }

    pub fn is_pending(&self) -> bool {
        self.scheduler.has_pending()
    }

    fn cancel_timer(&mut self, now: Instant) {
        self.next_due = None;
        self.scheduler.schedule(
            SchedulerCommand::Cancel {
                key: REPEAT_KEY.to_string(),
            },
            now,
        );
    }
}
