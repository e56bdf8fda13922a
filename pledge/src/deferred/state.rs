use super::reaction::Waiter;

use std::mem;

/// Observable lifecycle state of a [`Deferred`](crate::Deferred).
///
/// The state is monotonic: once a value leaves `Pending` it never changes
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeferredState {
    /// No settlement handle has been invoked yet.
    Pending,

    /// Settled with a success payload.
    Fulfilled,

    /// Settled with a failure reason.
    Rejected,
}

/// The outcome of a settled value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settled<T, E> {
    Fulfilled(T),
    Rejected(E),
}

impl<T, E> Settled<T, E> {
    /// Returns `true` for a success outcome.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settled::Fulfilled(_))
    }

    /// Converts the outcome into a `Result`, the reason becoming the error.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Settled::Fulfilled(value) => Ok(value),
            Settled::Rejected(reason) => Err(reason),
        }
    }

    pub(crate) fn kind(&self) -> DeferredState {
        match self {
            Settled::Fulfilled(_) => DeferredState::Fulfilled,
            Settled::Rejected(_) => DeferredState::Rejected,
        }
    }
}

/// Internal state record of one deferred value.
///
/// Waiters only exist while the value is pending; the transition out of
/// `Pending` moves them out and hands them to the scheduler.
pub(crate) enum State<T, E> {
    Pending(Vec<Box<dyn Waiter<T, E>>>),
    Settled(Settled<T, E>),
}

impl<T, E> State<T, E> {
    pub(crate) fn new() -> Self {
        State::Pending(Vec::new())
    }

    pub(crate) fn kind(&self) -> DeferredState {
        match self {
            State::Pending(_) => DeferredState::Pending,
            State::Settled(outcome) => outcome.kind(),
        }
    }

    /// Performs the one-time transition out of `Pending`.
    ///
    /// Returns the queued waiters when the transition happened, or `None`
    /// when the value had already settled (the new outcome is dropped).
    pub(crate) fn settle(&mut self, outcome: Settled<T, E>) -> Option<Vec<Box<dyn Waiter<T, E>>>> {
        match self {
            State::Pending(waiters) => {
                let waiters = mem::take(waiters);
                *self = State::Settled(outcome);
                Some(waiters)
            }
            State::Settled(_) => None,
        }
    }
}
