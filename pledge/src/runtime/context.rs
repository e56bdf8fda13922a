use crate::runtime::core::RuntimeHandle;

use std::cell::RefCell;

thread_local! {
    /// Thread-local handle to the runtime currently entered on this thread.
    ///
    /// This is set by [`enter_context`] and allows [`Deferred::new`] and
    /// [`run_until_idle`] to find their scheduler without explicit
    /// parameter passing.
    ///
    /// [`Deferred::new`]: crate::Deferred::new
    /// [`run_until_idle`]: crate::run_until_idle
    pub(crate) static CURRENT_RUNTIME: RefCell<Option<RuntimeHandle>> =
        const { RefCell::new(None) };
}

/// Enters the runtime execution context for the current thread.
///
/// The handle is installed for the duration of the closure `f`. After the
/// closure completes, the previous context is restored, so runtimes may be
/// entered in a nested fashion.
pub(crate) fn enter_context<R>(handle: RuntimeHandle, f: impl FnOnce() -> R) -> R {
    let prev = CURRENT_RUNTIME.with(|cell| cell.replace(Some(handle)));

    let guard = Restore(prev);
    let out = f();
    drop(guard);

    out
}

/// Returns the handle of the current runtime, if any.
pub(crate) fn current() -> Option<RuntimeHandle> {
    CURRENT_RUNTIME.with(|cell| cell.borrow().clone())
}

/// Restores the previous context, also when `f` unwinds.
struct Restore(Option<RuntimeHandle>);

impl Drop for Restore {
    fn drop(&mut self) {
        let prev = self.0.take();
        CURRENT_RUNTIME.with(|cell| {
            cell.replace(prev);
        });
    }
}
