//! Virtual-time timer queue.
//!
//! Every delayed action on the page ("type the next character in 80 ms",
//! "re-initialise the carousel once resizing stops") goes through the
//! [`Scheduler`] trait.  [`TimerQueue`] is the one implementation: it never
//! looks at a real clock.  The host decides how fast time moves by calling
//! [`TimerQueue::pop_due`] with a target instant; tests jump straight to the
//! instant they care about.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Handle returned by [`Scheduler::schedule`], used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// "Run this after N time units."
pub trait Scheduler<T> {
    /// Current virtual time since the queue was created.
    fn now(&self) -> Duration;

    /// Queue `task` to run `delay` after [`Scheduler::now`].
    fn schedule(&mut self, delay: Duration, task: T) -> TimerId;

    /// Drop a pending task.  Returns `false` if it already ran or was
    /// cancelled before.
    fn cancel(&mut self, id: TimerId) -> bool;
}

/// Min-heap of `(due, sequence)`; ties run in scheduling order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    heap: BinaryHeap<Reverse<(Duration, u64)>>,
    /// Payloads of live timers.  Cancelled timers leave a stale heap entry
    /// that is skipped when popped.
    tasks: HashMap<u64, T>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            heap: BinaryHeap::new(),
            tasks: HashMap::new(),
        }
    }

    /// Number of live (not yet run, not cancelled) timers.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Due time of the earliest live timer.
    pub fn next_due(&mut self) -> Option<Duration> {
        self.drop_stale();
        self.heap.peek().map(|Reverse((due, _))| *due)
    }

    /// Pop the earliest task due at or before `until`, moving the clock to
    /// its due time.  Tasks scheduled while handling it are visible to the
    /// next call, so zero-delay chains resolve within one advance.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        loop {
            let Reverse((due, seq)) = *self.heap.peek()?;
            if due > until {
                return None;
            }
            self.heap.pop();
            if let Some(task) = self.tasks.remove(&seq) {
                self.now = self.now.max(due);
                return Some(task);
            }
        }
    }

    /// Move the clock forward to `until` once every due task has run.
    /// Never moves it backwards.
    pub fn settle_at(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    fn drop_stale(&mut self) {
        while let Some(Reverse((_, seq))) = self.heap.peek() {
            if self.tasks.contains_key(seq) {
                break;
            }
            self.heap.pop();
        }
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse((self.now + delay, seq)));
        self.tasks.insert(seq, task);
        TimerId(seq)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.tasks.remove(&id.0).is_some()
    }
}
