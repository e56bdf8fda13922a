use crate::runtime::scheduler::{Microtask, Scheduler};

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

/// FIFO queue of microtasks.
///
/// The queue is the [`Scheduler`] owned by a [`Runtime`](crate::Runtime).
/// Scheduling only appends; tasks run when the owner drains the queue,
/// one at a time from the front, so tasks scheduled while draining run
/// after everything that was already queued.
pub struct MicrotaskQueue {
    /// Tasks waiting for their turn.
    queue: RefCell<VecDeque<Microtask>>,

    /// Total number of tasks run since creation.
    turns: Cell<u64>,
}

impl MicrotaskQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue with room for `capacity` tasks.
    pub fn with_capacity(capacity: usize) -> Self {
        MicrotaskQueue {
            queue: RefCell::new(VecDeque::with_capacity(capacity)),
            turns: Cell::new(0),
        }
    }

    /// Pushes a task to the back of the queue.
    pub fn push(&self, task: Microtask) {
        self.queue.borrow_mut().push_back(task);
    }

    /// Takes the task at the front of the queue.
    ///
    /// Returns `None` if the queue is empty.
    pub fn pop(&self) -> Option<Microtask> {
        self.queue.borrow_mut().pop_front()
    }

    /// Runs the task at the front of the queue.
    ///
    /// The queue is not borrowed while the task runs, so the task may
    /// schedule further work. Returns `false` if the queue was empty.
    pub fn run_next(&self) -> bool {
        let Some(task) = self.pop() else {
            return false;
        };

        task();
        self.turns.set(self.turns.get() + 1);
        true
    }

    /// Number of tasks currently waiting.
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// Total number of tasks this queue has run.
    pub fn turns(&self) -> u64 {
        self.turns.get()
    }

    /// Drops every waiting task and returns how many were discarded.
    pub(crate) fn clear(&self) -> usize {
        let drained: Vec<Microtask> = self.queue.borrow_mut().drain(..).collect();
        drained.len()
    }
}

impl Scheduler for MicrotaskQueue {
    fn schedule(&self, task: Microtask) {
        self.push(task);
    }
}

impl Default for MicrotaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::rc::Rc;

    #[test]
    fn runs_tasks_in_submission_order() {
        let queue = MicrotaskQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let log = log.clone();
            queue.schedule(Box::new(move || log.borrow_mut().push(i)));
        }

        assert!(log.borrow().is_empty());
        while queue.run_next() {}

        assert_eq!(*log.borrow(), vec![0, 1, 2]);
        assert_eq!(queue.turns(), 3);
    }

    #[test]
    fn tasks_scheduled_while_running_go_to_the_back() {
        let queue = Rc::new(MicrotaskQueue::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        {
            let queue2 = queue.clone();
            let log = log.clone();
            queue.schedule(Box::new(move || {
                log.borrow_mut().push("first");
                let log = log.clone();
                queue2.schedule(Box::new(move || log.borrow_mut().push("nested")));
            }));
        }
        {
            let log = log.clone();
            queue.schedule(Box::new(move || log.borrow_mut().push("second")));
        }

        while queue.run_next() {}

        assert_eq!(*log.borrow(), vec!["first", "second", "nested"]);
    }

    #[test]
    fn clear_discards_waiting_tasks() {
        let queue = MicrotaskQueue::new();
        queue.schedule(Box::new(|| panic!("discarded task must not run")));
        queue.schedule(Box::new(|| panic!("discarded task must not run")));

        assert_eq!(queue.clear(), 2);
        assert!(queue.is_empty());
        assert!(!queue.run_next());
    }
}
