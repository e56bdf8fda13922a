use super::core::Deferred;

/// A future-like value that a deferred value can adopt.
///
/// Resolving a [`Deferred`] with a thenable does not settle it right away:
/// the deferred value subscribes to the thenable and settles with whatever
/// the thenable eventually produces. Only a success continuation is
/// subscribed, so a thenable that fails leaves the adopting value pending.
///
/// Any future-like type can implement this trait; [`Deferred`] itself does.
pub trait Thenable<T> {
    /// Registers `on_fulfilled` to receive the value once it succeeds.
    fn subscribe(self: Box<Self>, on_fulfilled: Box<dyn FnOnce(T)>);

    /// Identity of the underlying deferred record, if there is one.
    ///
    /// Used to refuse resolving a deferred value with itself.
    fn identity(&self) -> Option<usize> {
        None
    }
}

/// What a reaction hands to the child it settles.
pub enum Resolution<T, E> {
    /// Fulfil the child with a plain value.
    Fulfill(T),

    /// Let the child adopt the eventual value of a thenable.
    Adopt(Box<dyn Thenable<T>>),

    /// Reject the child.
    Reject(E),
}

impl<T, E> Resolution<T, E> {
    /// Wraps a thenable for adoption.
    pub fn adopt(thenable: impl Thenable<T> + 'static) -> Self {
        Resolution::Adopt(Box::new(thenable))
    }
}

/// Conversion from a reaction's return value into a [`Resolution`].
///
/// - `Result<T, E>`: `Ok` fulfils, `Err` rejects,
/// - `Deferred<T, E>`: adopted (flattened),
/// - `Resolution<T, E>`: used as is.
pub trait IntoResolution<T, E> {
    fn into_resolution(self) -> Resolution<T, E>;
}

impl<T, E> IntoResolution<T, E> for Resolution<T, E> {
    fn into_resolution(self) -> Resolution<T, E> {
        self
    }
}

impl<T, E> IntoResolution<T, E> for Result<T, E> {
    fn into_resolution(self) -> Resolution<T, E> {
        match self {
            Ok(value) => Resolution::Fulfill(value),
            Err(reason) => Resolution::Reject(reason),
        }
    }
}

impl<T, E> IntoResolution<T, E> for Deferred<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    fn into_resolution(self) -> Resolution<T, E> {
        Resolution::Adopt(Box::new(self))
    }
}
