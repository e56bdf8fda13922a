//! # pledge
//!
//! **pledge** is a minimal deferred value (promise) primitive for Rust,
//! together with the small single-threaded runtime that drives it.
//!
//! A [`Deferred`] starts pending and settles exactly once, either fulfilled
//! with a value or rejected with a reason. Reactions registered with
//! [`Deferred::then`], [`Deferred::then_or_else`] and
//! [`Deferred::catch_failure`] observe that outcome asynchronously, in
//! registration order, whether they were registered before or after the
//! value settled. Each registration returns a new `Deferred`, so reactions
//! compose into chains.
//!
//! The crate offers:
//!
//! - **Once-only settlement**: later settlement attempts are silent no-ops
//! - **Deferred dispatch**: reactions always run on a later turn of the
//!   [`Scheduler`], never synchronously
//! - **Flattening**: resolving with a [`Thenable`] (such as another
//!   `Deferred`) adopts its eventual value
//! - **A microtask runtime** ([`Runtime`], configured through
//!   [`RuntimeBuilder`]) and the `#[pledge::main]` / `#[pledge::test]` macros
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pledge::Deferred;
//!
//! #[pledge::main]
//! fn main() {
//!     Deferred::<i32, String>::new(|resolve, _reject| {
//!         resolve.settle(10);
//!         Ok(())
//!     })
//!     .then(|v| Ok(v + 1))
//!     .then(|v| {
//!         println!("{v}");
//!         Ok(())
//!     });
//! }
//! ```
//!
//! ## Getting Started
//!
//! Add pledge to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pledge = { git = "https://github.com/Nebula-ecosystem/pledge", package = "pledge" }
//! ```

mod deferred;
mod error;
mod runtime;

pub use deferred::{
    Deferred, DeferredState, IntoResolution, Reject, Resolution, Resolve, Settled, Thenable,
};
pub use error::Error;
pub use runtime::builder::RuntimeBuilder;
pub use runtime::core::Runtime;
pub use runtime::drain::run_until_idle;
pub use runtime::queue::MicrotaskQueue;
pub use runtime::{Microtask, Scheduler, SchedulerHandle};

pub use pledge_macros::*;
