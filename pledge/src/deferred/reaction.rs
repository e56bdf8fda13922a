use super::settle::{Reject, Resolve};
use super::state::Settled;
use super::thenable::Resolution;

/// A boxed reaction handler mapping a payload to a [`Resolution`].
pub(crate) type Handler<P, U, E> = Box<dyn FnOnce(P) -> Resolution<U, E>>;

/// A reaction waiting on a parent value, with its child's type erased.
///
/// The parent queues waiters while pending and hands each one to the
/// scheduler once it settles.
pub(crate) trait Waiter<T, E> {
    /// Runs the reaction against the parent's outcome.
    fn react(self: Box<Self>, outcome: Settled<T, E>);
}

/// One registration on a parent value.
///
/// An absent handler is represented by a forwarding handler that passes the
/// payload through unchanged, so both handlers are always present here.
pub(crate) struct Reaction<T, E, U> {
    on_fulfilled: Handler<T, U, E>,
    on_rejected: Handler<E, U, E>,

    /// Settlement handles of the child returned by the registration.
    resolve: Resolve<U, E>,
    reject: Reject<U, E>,
}

impl<T, E, U> Reaction<T, E, U> {
    pub(crate) fn new(
        on_fulfilled: Handler<T, U, E>,
        on_rejected: Handler<E, U, E>,
        resolve: Resolve<U, E>,
        reject: Reject<U, E>,
    ) -> Self {
        Self {
            on_fulfilled,
            on_rejected,
            resolve,
            reject,
        }
    }
}

impl<T, E, U> Waiter<T, E> for Reaction<T, E, U>
where
    U: Clone + 'static,
    E: Clone + 'static,
{
    fn react(self: Box<Self>, outcome: Settled<T, E>) {
        let Reaction {
            on_fulfilled,
            on_rejected,
            resolve,
            reject,
        } = *self;

        let resolution = match outcome {
            Settled::Fulfilled(value) => on_fulfilled(value),
            Settled::Rejected(reason) => on_rejected(reason),
        };

        match resolution {
            Resolution::Fulfill(value) => resolve.settle(value),
            Resolution::Adopt(thenable) => {
                if let Err(err) = resolve.adopt_boxed(thenable) {
                    // The child stays pending; nothing downstream can observe this.
                    tracing::error!(%err, "reaction resolved its own child");
                }
            }
            Resolution::Reject(reason) => reject.settle(reason),
        }
    }
}

/// Forwards a success payload unchanged.
pub(crate) fn forward_value<T, E>(value: T) -> Resolution<T, E> {
    Resolution::Fulfill(value)
}

/// Forwards a failure reason unchanged.
pub(crate) fn forward_reason<U, E>(reason: E) -> Resolution<U, E> {
    Resolution::Reject(reason)
}
