use super::core::Shared;
use super::state::Settled;
use super::thenable::{IntoResolution, Resolution, Thenable};
use crate::error::Error;

use std::fmt;
use std::rc::Rc;

/// The success settlement handle of a deferred value.
///
/// Handed to the initializer of [`Deferred::new`](crate::Deferred::new).
/// Handles are cheap to clone and may be stored and invoked later, from
/// any number of call sites: only the first settlement takes effect, every
/// later attempt is a silent no-op.
pub struct Resolve<T, E> {
    shared: Rc<Shared<T, E>>,
}

/// The failure settlement handle of a deferred value.
///
/// Same once-only semantics as [`Resolve`].
pub struct Reject<T, E> {
    shared: Rc<Shared<T, E>>,
}

impl<T, E> Resolve<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    pub(crate) fn new(shared: Rc<Shared<T, E>>) -> Self {
        Self { shared }
    }

    /// Fulfils the value with `value`.
    ///
    /// No-op if the value has already settled.
    pub fn settle(&self, value: T) {
        settle(&self.shared, Settled::Fulfilled(value));
    }

    /// Resolves the value with the eventual success of `thenable`.
    ///
    /// The value is not settled now: this handle is subscribed as the
    /// thenable's success continuation. If the thenable fails, this value
    /// stays pending. Adopting an already settled value is allowed and the
    /// continuation is then a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelfResolution`] if `thenable` is the very value this
    /// handle settles. The value is left untouched.
    pub fn adopt(&self, thenable: impl Thenable<T> + 'static) -> Result<(), Error> {
        self.adopt_boxed(Box::new(thenable))
    }

    /// Resolves the value with anything convertible into a [`Resolution`].
    ///
    /// `Reject` resolutions go through the sibling failure path.
    pub fn resolve(&self, resolution: impl IntoResolution<T, E>) -> Result<(), Error> {
        match resolution.into_resolution() {
            Resolution::Fulfill(value) => {
                self.settle(value);
                Ok(())
            }
            Resolution::Adopt(thenable) => self.adopt_boxed(thenable),
            Resolution::Reject(reason) => {
                settle(&self.shared, Settled::Rejected(reason));
                Ok(())
            }
        }
    }

    pub(crate) fn adopt_boxed(&self, thenable: Box<dyn Thenable<T>>) -> Result<(), Error> {
        if thenable.identity() == Some(self.shared.id()) {
            return Err(Error::SelfResolution);
        }

        tracing::trace!(id = self.shared.id(), "adopting thenable");

        let this = self.clone();
        thenable.subscribe(Box::new(move |value| this.settle(value)));
        Ok(())
    }
}

impl<T, E> Reject<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    pub(crate) fn new(shared: Rc<Shared<T, E>>) -> Self {
        Self { shared }
    }

    /// Rejects the value with `reason`.
    ///
    /// No-op if the value has already settled.
    pub fn settle(&self, reason: E) {
        settle(&self.shared, Settled::Rejected(reason));
    }
}

/// Performs the transition out of `Pending` and dispatches the waiters.
fn settle<T, E>(shared: &Rc<Shared<T, E>>, outcome: Settled<T, E>)
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    let kind = outcome.kind();
    let waiters = shared.state.borrow_mut().settle(outcome);

    let Some(waiters) = waiters else {
        tracing::trace!(
            id = shared.id(),
            attempted = ?kind,
            "ignoring settlement of a settled value"
        );
        return;
    };

    tracing::trace!(
        id = shared.id(),
        state = ?kind,
        waiters = waiters.len(),
        "deferred value settled"
    );

    for waiter in waiters {
        shared.dispatch_or_queue(waiter);
    }
}

impl<T, E> Clone for Resolve<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T, E> Clone for Reject<T, E> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T, E> fmt::Debug for Resolve<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolve").field("id", &self.shared.id()).finish()
    }
}

impl<T, E> fmt::Debug for Reject<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reject").field("id", &self.shared.id()).finish()
    }
}
