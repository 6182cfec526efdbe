//! Error handling primitives for the L3GD20H driver.

/// Crate-wide result type alias.
pub type Result<T, E> = core::result::Result<T, Error<E>>;

/// Error variants produced by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// Any error reported by the underlying bus interface.
    Interface(E),
    /// The driver has not been initialized, or has been deinitialized.
    NotInitialized,
    /// A value outside the field's documented domain was supplied.
    InvalidParameter,
    /// The chip identity register did not match the expected L3GD20H id.
    DeviceNotFound,
    /// The provided configuration parameters are invalid.
    InvalidConfig,
}

impl<E> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Self::Interface(err)
    }
}
