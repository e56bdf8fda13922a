use super::Runtime;

/// Default initial capacity of the microtask queue.
const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// Builder for configuring and creating a runtime.
///
/// `RuntimeBuilder` allows customizing runtime parameters before
/// constructing the runtime: the per-drain microtask budget and the
/// initial queue capacity.
///
/// # Examples
///
/// ```rust,ignore
/// let runtime = RuntimeBuilder::new()
///     .max_turns(10_000)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct RuntimeBuilder {
    /// Maximum number of microtasks a single drain may run.
    max_turns: Option<usize>,

    /// Initial capacity of the microtask queue.
    queue_capacity: usize,
}

impl RuntimeBuilder {
    /// Creates a new `RuntimeBuilder` with default configuration.
    ///
    /// By default drains are unbounded and the queue starts with room for
    /// 64 microtasks.
    pub fn new() -> Self {
        Self {
            max_turns: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Caps the number of microtasks run by one drain.
    ///
    /// A reaction chain that keeps scheduling work forever then surfaces as
    /// [`Error::TurnLimitExceeded`](crate::Error::TurnLimitExceeded) instead
    /// of hanging the thread.
    ///
    /// # Panics
    ///
    /// Panics if `n == 0`.
    pub fn max_turns(mut self, n: usize) -> Self {
        assert!(n > 0, "max_turns must be > 0");

        self.max_turns = Some(n);
        self
    }

    /// Sets the initial capacity of the microtask queue.
    pub fn queue_capacity(mut self, n: usize) -> Self {
        self.queue_capacity = n;
        self
    }

    /// Builds the runtime with the configured options.
    pub fn build(self) -> Runtime {
        Runtime::new(self.max_turns, self.queue_capacity)
    }
}

impl Default for RuntimeBuilder {
    /// Creates a default `RuntimeBuilder`.
    fn default() -> Self {
        Self::new()
    }
}
