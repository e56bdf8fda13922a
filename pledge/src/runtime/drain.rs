use crate::error::Error;
use crate::runtime::context;

/// Drains the microtask queue of the current runtime.
///
/// This lets code running inside [`Runtime::enter`](crate::Runtime::enter)
/// (or a `#[pledge::test]` body) give queued reactions their turn before
/// it continues, e.g. to observe the outcome of a chain mid-test.
///
/// Returns the number of microtasks that ran.
///
/// # Errors
///
/// Returns [`Error::TurnLimitExceeded`] when the runtime's budget runs out.
///
/// # Panics
///
/// Panics if called outside the context of a runtime.
///
/// # Examples
///
/// ```rust,ignore
/// #[pledge::test]
/// fn observes_chain() {
///     let seen = Deferred::<i32, String>::resolved(1).then(|v| Ok(v * 2));
///     pledge::run_until_idle().unwrap();
///     assert_eq!(seen.outcome(), Some(Settled::Fulfilled(2)));
/// }
/// ```
pub fn run_until_idle() -> Result<usize, Error> {
    let handle =
        context::current().expect("run_until_idle must be called within the context of a runtime");

    handle.run_until_idle()
}
