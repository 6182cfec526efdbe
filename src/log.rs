//! Crate-internal trace macros, forwarded to `defmt` when the feature is on.

#[cfg(feature = "defmt")]
macro_rules! trace {
    ($($arg:tt)*) => {
        defmt::trace!($($arg)*)
    };
}

#[cfg(not(feature = "defmt"))]
macro_rules! trace {
    ($($arg:tt)*) => {{}};
}

pub(crate) use trace;
