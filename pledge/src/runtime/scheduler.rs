use std::rc::Rc;

/// A zero-argument callback queued to run on a later turn.
pub type Microtask = Box<dyn FnOnce()>;

/// Shared handle to a scheduler, as held by every deferred value.
pub type SchedulerHandle = Rc<dyn Scheduler>;

/// The task scheduling collaborator used to dispatch reactions.
///
/// Deferred values never run a reaction synchronously: once a value is
/// settled, each reaction is handed to the scheduler as a [`Microtask`].
/// Implementations must uphold two guarantees:
///
/// - **deferral**: `schedule` never runs `task` before returning,
/// - **ordering**: tasks run in the order they were submitted.
///
/// [`MicrotaskQueue`](crate::MicrotaskQueue) is the implementation owned by
/// a [`Runtime`](crate::Runtime). Tests and hosts with their own event loop
/// can supply any other type.
pub trait Scheduler {
    /// Queues `task` to run after the current synchronous execution unwinds.
    fn schedule(&self, task: Microtask);
}

impl<S: Scheduler + ?Sized> Scheduler for Rc<S> {
    fn schedule(&self, task: Microtask) {
        (**self).schedule(task)
    }
}
