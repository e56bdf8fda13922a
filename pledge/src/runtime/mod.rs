//! Core runtime components.
//!
//! This module contains the pieces that give deferred values their
//! asynchrony: the scheduler contract, the microtask queue implementing it,
//! and the runtime that owns and drains that queue.
//!
//! It is responsible for:
//! - defining the [`Scheduler`] collaborator reactions are dispatched to,
//! - queuing microtasks in FIFO order,
//! - providing the thread-local runtime context used by `Deferred::new`,
//! - draining queued work turn by turn.

pub(crate) mod core;

pub(crate) mod builder;
pub(crate) mod context;
pub(crate) mod drain;
pub(crate) mod queue;
pub(crate) mod scheduler;

use self::core::Runtime;

pub use scheduler::{Microtask, Scheduler, SchedulerHandle};
