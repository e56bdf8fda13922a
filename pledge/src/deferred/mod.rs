//! The deferred value primitive.
//!
//! This module defines the single-assignment value at the heart of the
//! crate and everything needed to settle and observe it.
//!
//! It includes:
//! - the once-only state machine and its observable state,
//! - the success and failure settlement handles,
//! - reaction records and their dispatch through the scheduler,
//! - the [`Thenable`] capability used to flatten nested values.

pub(crate) mod core;
pub(crate) mod reaction;
pub(crate) mod settle;
pub(crate) mod state;
pub(crate) mod thenable;

pub use self::core::Deferred;
pub use settle::{Reject, Resolve};
pub use state::{DeferredState, Settled};
pub use thenable::{IntoResolution, Resolution, Thenable};
