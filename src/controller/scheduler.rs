//! Deferred and delayed task scheduling for the controller thread
//!
//! Two kinds of tasks are supported:
//!
//! - **Deferred**: runs on the next tick of the controller loop, after the
//!   handler that scheduled it has returned
//! - **Delayed**: runs once its deadline has passed
//!
//! Every task gets a `TaskHandle`. Cancelled tasks are skipped when they come
//! due. `cancel_all` (also run on drop) cancels everything still queued, so no
//! task outlives the controller that scheduled it.

use std::cmp::Ordering as CmpOrdering;
use std::collections::{BinaryHeap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

/// Work item run on the controller thread
pub type Job = Box<dyn FnOnce() + Send>;

/// Cancellation handle for a scheduled task
#[derive(Debug, Clone)]
pub struct TaskHandle {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle {
    /// Scheduler-assigned task id
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Prevent the task from running if it has not run yet
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the task was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

struct Task {
    id: u64,
    cancelled: Arc<AtomicBool>,
    job: Job,
}

impl Task {
    fn is_live(&self) -> bool {
        !self.cancelled.load(Ordering::SeqCst)
    }

    fn run(self) -> bool {
        if !self.is_live() {
            debug!("Skipping cancelled task {}", self.id);
            return false;
        }
        (self.job)();
        true
    }
}

struct Timer {
    deadline: Instant,
    task: Task,
}

// Min-heap on (deadline, id): earliest deadline first, ties in scheduling order.
impl Ord for Timer {
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.task.id.cmp(&self.task.id))
    }
}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Timer {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == CmpOrdering::Equal
    }
}

impl Eq for Timer {}

/// Task queue owned by the controller loop
#[derive(Default)]
pub struct Scheduler {
    next_id: u64,
    deferred: VecDeque<Task>,
    timers: BinaryHeap<Timer>,
}

impl Scheduler {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self::default()
    }

    fn task(&mut self, job: Job) -> (Task, TaskHandle) {
        let id = self.next_id;
        self.next_id += 1;
        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = TaskHandle {
            id,
            cancelled: Arc::clone(&cancelled),
        };
        (Task { id, cancelled, job }, handle)
    }

    /// Run `job` on the next tick
    pub fn defer(&mut self, job: impl FnOnce() + Send + 'static) -> TaskHandle {
        let (task, handle) = self.task(Box::new(job));
        self.deferred.push_back(task);
        handle
    }

    /// Run `job` once `delay` has elapsed
    pub fn delay(&mut self, delay: Duration, job: impl FnOnce() + Send + 'static) -> TaskHandle {
        self.delay_until(Instant::now() + delay, job)
    }

    /// Run `job` at or after `deadline`
    pub fn delay_until(
        &mut self,
        deadline: Instant,
        job: impl FnOnce() + Send + 'static,
    ) -> TaskHandle {
        let (task, handle) = self.task(Box::new(job));
        self.timers.push(Timer { deadline, task });
        handle
    }

    /// Time the loop may sleep before the next task is due
    ///
    /// `Some(Duration::ZERO)` while deferred tasks are queued, `None` when idle.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        if !self.deferred.is_empty() {
            return Some(Duration::ZERO);
        }
        self.timers
            .peek()
            .map(|timer| timer.deadline.saturating_duration_since(now))
    }

    /// Run the deferred tasks queued so far, then every timer due at `now`
    ///
    /// Tasks deferred while this runs wait for the next call. Cancelled timers
    /// are dropped here even when not yet due. Returns the number of tasks that
    /// ran.
    pub fn run_due(&mut self, now: Instant) -> usize {
        let mut ran = 0;
        self.prune_cancelled();

        for task in std::mem::take(&mut self.deferred) {
            ran += usize::from(task.run());
        }

        while self.timers.peek().is_some_and(|timer| timer.deadline <= now) {
            if let Some(timer) = self.timers.pop() {
                ran += usize::from(timer.task.run());
            }
        }

        ran
    }

    /// Drop cancelled timers and their jobs before their deadlines pass
    fn prune_cancelled(&mut self) {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.task.is_live());
        let pruned = before - self.timers.len();
        if pruned > 0 {
            debug!("Dropped {} cancelled timer(s)", pruned);
        }
    }

    /// Number of queued tasks that have not been cancelled
    pub fn pending(&self) -> usize {
        self.deferred.iter().filter(|task| task.is_live()).count()
            + self.timers.iter().filter(|timer| timer.task.is_live()).count()
    }

    /// Cancel and drop every queued task, returning how many were still live
    pub fn cancel_all(&mut self) -> usize {
        let live = self.pending();
        for task in self.deferred.drain(..) {
            task.cancelled.store(true, Ordering::SeqCst);
        }
        for timer in self.timers.drain() {
            timer.task.cancelled.store(true, Ordering::SeqCst);
        }
        if live > 0 {
            debug!("Cancelled {} pending task(s)", live);
        }
        live
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
