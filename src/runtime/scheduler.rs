use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub enum SchedulerCommand<E> {
    EmitAfter { key: String, delay: Duration, event: E },
    Cancel { key: String },
}

#[derive(Debug, Clone)]
struct Guard {
    key: String,
    version: u64,
}

#[derive(Debug, Clone)]
struct DelayedTask<E> {
    due_at: Instant,
    guard: Guard,
    event: E,
}

/// Keyed delayed events owned by a single widget. Cancelling a key
/// invalidates every task scheduled under it before the cancel.
#[derive(Debug)]
pub struct Scheduler<E> {
    delayed: Vec<DelayedTask<E>>,
    key_versions: HashMap<String, u64>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            delayed: Vec::new(),
            key_versions: HashMap::new(),
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, command: SchedulerCommand<E>, now: Instant) {
        match command {
            SchedulerCommand::EmitAfter { key, delay, event } => {
                let version = *self.key_versions.entry(key.clone()).or_insert(0);
                self.delayed.push(DelayedTask {
                    due_at: now + delay,
                    guard: Guard { key, version },
                    event,
                });
            }
            SchedulerCommand::Cancel { key } => {
                self.bump_version(&key);
                self.delayed.retain(|task| task.guard.key != key);
            }
        }
    }

    pub fn drain_ready(&mut self, now: Instant) -> Vec<E> {
        let mut ready = Vec::new();
        let mut idx = 0usize;
        while idx < self.delayed.len() {
            if self.delayed[idx].due_at <= now {
                let task = self.delayed.swap_remove(idx);
                if self.task_is_valid(&task) {
                    ready.push(task.event);
                }
            } else {
                idx += 1;
            }
        }
        ready
    }

    pub fn poll_timeout(&self, now: Instant, default_timeout: Duration) -> Duration {
        let mut next = default_timeout;

        for task in &self.delayed {
            let due_in = task.due_at.saturating_duration_since(now);
            if due_in < next {
                next = due_in;
            }
        }

        next
    }

    pub fn has_pending(&self) -> bool {
        self.delayed.iter().any(|task| self.task_is_valid(task))
    }

    fn task_is_valid(&self, task: &DelayedTask<E>) -> bool {
        let current = *self.key_versions.get(&task.guard.key).unwrap_or(&0);
        current == task.guard.version
    }

    fn bump_version(&mut self, key: &str) -> u64 {
        let entry = self.key_versions.entry(key.to_string()).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }
}
