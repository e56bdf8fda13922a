use super::reaction::{Handler, Reaction, Waiter, forward_reason, forward_value};
use super::settle::{Reject, Resolve};
use super::state::{DeferredState, Settled, State};
use super::thenable::{IntoResolution, Thenable};
use crate::runtime::context;
use crate::runtime::scheduler::{Scheduler, SchedulerHandle};

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The record shared by a deferred value and its settlement handles.
pub(crate) struct Shared<T, E> {
    /// Lifecycle state, outcome and waiters.
    pub(crate) state: RefCell<State<T, E>>,

    /// Scheduler reactions on this value are dispatched to.
    pub(crate) scheduler: SchedulerHandle,
}

impl<T, E> Shared<T, E> {
    /// Address of the record, used as its identity.
    pub(crate) fn id(&self) -> usize {
        self as *const Self as *const () as usize
    }
}

impl<T, E> Shared<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Queues `waiter` while pending, schedules it once settled.
    ///
    /// This is the only place that looks at the state on behalf of a
    /// reaction, so registering before or after settlement behaves the
    /// same. A settled value never runs the reaction synchronously.
    pub(crate) fn dispatch_or_queue(&self, waiter: Box<dyn Waiter<T, E>>) {
        let outcome = match &mut *self.state.borrow_mut() {
            State::Pending(waiters) => {
                waiters.push(waiter);
                return;
            }
            State::Settled(outcome) => outcome.clone(),
        };

        tracing::trace!(id = self.id(), state = ?outcome.kind(), "scheduling reaction");
        self.scheduler.schedule(Box::new(move || waiter.react(outcome)));
    }
}

/// A single-assignment value that settles exactly once.
///
/// A `Deferred` starts pending and transitions once, either to fulfilled
/// with a value of type `T` or to rejected with a reason of type `E`. Any
/// number of reactions can be registered with [`then`](Self::then),
/// [`then_or_else`](Self::then_or_else) and
/// [`catch_failure`](Self::catch_failure), before or after settlement. Each
/// registration returns a new `Deferred` settled from the reaction's result.
///
/// Reactions never run synchronously. They are handed to the value's
/// [`Scheduler`](crate::Scheduler) and run in registration order on a later
/// turn.
///
/// Cloning a `Deferred` clones the handle, not the value.
///
/// # Examples
///
/// ```rust,ignore
/// let runtime = RuntimeBuilder::new().build();
///
/// let outcome = runtime.block_on(|| {
///     Deferred::<i32, String>::new(|resolve, _reject| {
///         resolve.settle(5);
///         Ok(())
///     })
///     .then(|v| Ok(v + 1))
/// })?;
///
/// assert_eq!(outcome, Settled::Fulfilled(6));
/// ```
pub struct Deferred<T, E> {
    shared: Rc<Shared<T, E>>,
}

impl<T, E> Deferred<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Creates a deferred value on the current runtime.
    ///
    /// `init` runs synchronously, before `new` returns, and receives the two
    /// settlement handles. It may settle right away or keep the handles to
    /// settle later. Returning `Err(reason)` from `init` rejects the value
    /// with `reason`, unless it has already settled.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a runtime. Use
    /// [`new_in`](Self::new_in) to supply a scheduler explicitly.
    pub fn new<F>(init: F) -> Self
    where
        F: FnOnce(Resolve<T, E>, Reject<T, E>) -> Result<(), E>,
    {
        let handle = context::current()
            .expect("Deferred::new must be called within the context of a runtime");

        Self::new_in(handle.scheduler(), init)
    }

    /// Creates a deferred value dispatching its reactions to `scheduler`.
    pub fn new_in<F>(scheduler: SchedulerHandle, init: F) -> Self
    where
        F: FnOnce(Resolve<T, E>, Reject<T, E>) -> Result<(), E>,
    {
        let shared = Rc::new(Shared {
            state: RefCell::new(State::new()),
            scheduler,
        });

        let resolve = Resolve::new(shared.clone());
        let reject = Reject::new(shared.clone());

        if let Err(reason) = init(resolve, reject.clone()) {
            tracing::trace!(id = shared.id(), "initializer failed");
            reject.settle(reason);
        }

        Self { shared }
    }

    /// Creates a value already fulfilled with `value`, on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a runtime.
    pub fn resolved(value: T) -> Self {
        Self::new(|resolve, _| {
            resolve.settle(value);
            Ok(())
        })
    }

    /// Creates a value already rejected with `reason`, on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside the context of a runtime.
    pub fn rejected(reason: E) -> Self {
        Self::new(|_, reject| {
            reject.settle(reason);
            Ok(())
        })
    }

    /// Creates a value already fulfilled with `value`, dispatching its
    /// reactions to `scheduler`.
    pub fn resolved_in(scheduler: SchedulerHandle, value: T) -> Self {
        Self::new_in(scheduler, |resolve, _| {
            resolve.settle(value);
            Ok(())
        })
    }

    /// Creates a value already rejected with `reason`, dispatching its
    /// reactions to `scheduler`.
    pub fn rejected_in(scheduler: SchedulerHandle, reason: E) -> Self {
        Self::new_in(scheduler, |_, reject| {
            reject.settle(reason);
            Ok(())
        })
    }

    /// Registers a success reaction.
    ///
    /// The returned value settles from what `on_fulfilled` returns once this
    /// value fulfils: `Ok(v)` fulfils it, `Err(e)` rejects it and a returned
    /// `Deferred` is adopted. A rejection passes through unchanged.
    pub fn then<U, F, R>(&self, on_fulfilled: F) -> Deferred<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> R + 'static,
        R: IntoResolution<U, E>,
    {
        self.register(
            Box::new(move |value| on_fulfilled(value).into_resolution()),
            Box::new(forward_reason::<U, E>),
        )
    }

    /// Registers both a success and a failure reaction.
    ///
    /// A rejection handler that returns `Ok(v)` recovers: the returned value
    /// is fulfilled with `v`. Return `Err(e)` to keep the chain rejected.
    pub fn then_or_else<U, F, G, R, S>(&self, on_fulfilled: F, on_rejected: G) -> Deferred<U, E>
    where
        U: Clone + 'static,
        F: FnOnce(T) -> R + 'static,
        G: FnOnce(E) -> S + 'static,
        R: IntoResolution<U, E>,
        S: IntoResolution<U, E>,
    {
        self.register(
            Box::new(move |value| on_fulfilled(value).into_resolution()),
            Box::new(move |reason| on_rejected(reason).into_resolution()),
        )
    }

    /// Registers a failure reaction only.
    ///
    /// A fulfilment passes through unchanged and `on_rejected` is skipped.
    pub fn catch_failure<G, S>(&self, on_rejected: G) -> Deferred<T, E>
    where
        G: FnOnce(E) -> S + 'static,
        S: IntoResolution<T, E>,
    {
        self.register(
            Box::new(forward_value::<T, E>),
            Box::new(move |reason| on_rejected(reason).into_resolution()),
        )
    }

    /// Builds the child value and hands its reaction to this value.
    fn register<U>(
        &self,
        on_fulfilled: Handler<T, U, E>,
        on_rejected: Handler<E, U, E>,
    ) -> Deferred<U, E>
    where
        U: Clone + 'static,
    {
        let parent = self.shared.clone();

        Deferred::new_in(self.shared.scheduler.clone(), move |resolve, reject| {
            let reaction = Reaction::new(on_fulfilled, on_rejected, resolve, reject);
            parent.dispatch_or_queue(Box::new(reaction));
            Ok(())
        })
    }

    /// Returns a copy of the outcome, or `None` while pending.
    pub fn outcome(&self) -> Option<Settled<T, E>> {
        match &*self.shared.state.borrow() {
            State::Pending(_) => None,
            State::Settled(outcome) => Some(outcome.clone()),
        }
    }
}

impl<T, E> Deferred<T, E> {
    pub fn state(&self) -> DeferredState {
        self.shared.state.borrow().kind()
    }

    pub fn is_pending(&self) -> bool {
        self.state() == DeferredState::Pending
    }

    /// Returns `true` if both handles refer to the same value.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Rc::ptr_eq(&this.shared, &other.shared)
    }

    /// Number of reactions queued while pending.
    pub fn waiting_reactions(&self) -> usize {
        match &*self.shared.state.borrow() {
            State::Pending(waiters) => waiters.len(),
            State::Settled(_) => 0,
        }
    }
}

impl<T, E> Thenable<T> for Deferred<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    fn subscribe(self: Box<Self>, on_fulfilled: Box<dyn FnOnce(T)>) {
        self.then(move |value| {
            on_fulfilled(value);
            Ok::<(), E>(())
        });
    }

    fn identity(&self) -> Option<usize> {
        Some(self.shared.id())
    }
}

impl<T, E> Clone for Deferred<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T, E> fmt::Debug for Deferred<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("id", &self.shared.id())
            .field("state", &self.state())
            .finish()
    }
}
