use thiserror::Error;

/// Errors raised by the deferred value engine and its runtime.
///
/// Rejections are never reported through this type: a rejected value
/// carries its reason as the `E` payload of the [`Deferred`](crate::Deferred)
/// and travels down the reaction chain until a rejection handler observes it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A deferred value was resolved with itself.
    #[error("a deferred value cannot be resolved with itself")]
    SelfResolution,

    /// A single drain ran more microtasks than the runtime allows.
    #[error("microtask budget of {limit} turns exhausted before the queue went idle")]
    TurnLimitExceeded { limit: usize },

    /// The queue went idle but the awaited value never settled.
    #[error("the microtask queue is idle but the deferred value is still pending")]
    Unsettled,
}
