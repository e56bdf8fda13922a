use crate::deferred::{Deferred, Settled};
use crate::error::Error;
use crate::runtime::context::enter_context;
use crate::runtime::queue::MicrotaskQueue;
use crate::runtime::scheduler::SchedulerHandle;

use std::rc::Rc;

/// Cloneable view of a runtime, installed in the thread-local context.
#[derive(Clone)]
pub(crate) struct RuntimeHandle {
    /// Queue every deferred value created in this runtime schedules onto.
    pub(crate) queue: Rc<MicrotaskQueue>,

    /// Maximum number of microtasks run by a single drain.
    pub(crate) max_turns: Option<usize>,
}

impl RuntimeHandle {
    pub(crate) fn scheduler(&self) -> SchedulerHandle {
        self.queue.clone()
    }

    /// Runs queued microtasks until the queue is empty.
    ///
    /// Tasks scheduled while draining are run in the same drain. When a
    /// turn budget is configured and exhausted with work still queued, the
    /// remaining tasks are left in place and an error is returned.
    pub(crate) fn run_until_idle(&self) -> Result<usize, Error> {
        let mut ran = 0;

        loop {
            if let Some(limit) = self.max_turns {
                if ran >= limit && !self.queue.is_empty() {
                    tracing::debug!(
                        limit,
                        queued = self.queue.len(),
                        "microtask budget exhausted"
                    );
                    return Err(Error::TurnLimitExceeded { limit });
                }
            }

            if !self.queue.run_next() {
                break;
            }
            ran += 1;
        }

        tracing::debug!(ran, "microtask queue idle");
        Ok(ran)
    }
}

/// The single-threaded runtime driving deferred values.
///
/// `Runtime` is responsible for:
/// - owning the [`MicrotaskQueue`] reactions are scheduled onto,
/// - installing itself as the current context so [`Deferred::new`] can
///   find its scheduler,
/// - draining the queue, turn by turn, until no work is left.
///
/// Dropping the runtime discards any microtasks that are still queued.
pub struct Runtime {
    handle: RuntimeHandle,
}

impl Runtime {
    /// Creates a new runtime instance.
    ///
    /// # Arguments
    ///
    /// * `max_turns` - Budget of microtasks per drain, `None` for unbounded.
    /// * `queue_capacity` - Initial capacity of the microtask queue.
    pub(crate) fn new(max_turns: Option<usize>, queue_capacity: usize) -> Self {
        let handle = RuntimeHandle {
            queue: Rc::new(MicrotaskQueue::with_capacity(queue_capacity)),
            max_turns,
        };

        Self { handle }
    }

    /// Returns the scheduler of this runtime.
    ///
    /// Pass it to [`Deferred::new_in`] to create values without entering
    /// the runtime.
    pub fn scheduler(&self) -> SchedulerHandle {
        self.handle.scheduler()
    }

    /// Runs `f` with this runtime installed as the current context.
    ///
    /// The queue is **not** drained; reactions settled inside `f` stay
    /// queued until [`run_until_idle`](Self::run_until_idle) is called.
    pub fn enter<R>(&self, f: impl FnOnce() -> R) -> R {
        enter_context(self.handle.clone(), f)
    }

    /// Runs queued microtasks in FIFO order until the queue is empty.
    ///
    /// Returns the number of microtasks that ran.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TurnLimitExceeded`] when the configured budget is
    /// spent while work is still queued.
    pub fn run_until_idle(&self) -> Result<usize, Error> {
        self.enter(|| self.handle.run_until_idle())
    }

    /// Runs `f` inside the runtime, then drains the queue.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let runtime = RuntimeBuilder::new().build();
    /// runtime.run(|| {
    ///     Deferred::<i32, String>::resolved(1).then(|v| Ok(v + 1));
    /// })?;
    /// ```
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> Result<R, Error> {
        let out = self.enter(f);
        self.run_until_idle()?;
        Ok(out)
    }

    /// Builds a deferred value inside the runtime and drives it to settlement.
    ///
    /// This is the synchronous entry point of the runtime (e.g. in `main`
    /// or tests).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsettled`] if the queue goes idle while the value is
    /// still pending, or [`Error::TurnLimitExceeded`] if the budget runs out.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let outcome = runtime.block_on(|| {
    ///     Deferred::<i32, String>::resolved(41).then(|v| Ok(v + 1))
    /// })?;
    /// assert_eq!(outcome, Settled::Fulfilled(42));
    /// ```
    pub fn block_on<T, E>(&self, f: impl FnOnce() -> Deferred<T, E>) -> Result<Settled<T, E>, Error>
    where
        T: Clone + 'static,
        E: Clone + 'static,
    {
        let deferred = self.run(f)?;
        deferred.outcome().ok_or(Error::Unsettled)
    }

    /// Number of microtasks waiting to run.
    pub fn pending_tasks(&self) -> usize {
        self.handle.queue.len()
    }
}

impl Drop for Runtime {
    /// Shuts down the runtime.
    ///
    /// Queued microtasks are dropped without running; reactions they carry
    /// never settle their children.
    fn drop(&mut self) {
        let discarded = self.handle.queue.clear();
        if discarded > 0 {
            tracing::debug!(discarded, "runtime dropped with queued microtasks");
        }
    }
}
