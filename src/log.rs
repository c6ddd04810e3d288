#![allow(unused, reason = "logger")]
//! Logging shims, compiled out without the `log` feature.

macro_rules! trace {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::trace!(target: "h1_adapter", $($tt)*);
    };
}

macro_rules! debug {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::debug!(target: "h1_adapter", $($tt)*);
    };
}

macro_rules! warning {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::warn!(target: "h1_adapter", $($tt)*);
    };
}

pub(crate) use {trace, debug, warning};
