//! Internal consistency checks.
//!
//! A failed [`invariant!`] panics in debug and test builds and is logged as
//! an error in release builds, where the caller carries on.

macro_rules! invariant {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            if cfg!(debug_assertions) {
                panic!("invariant violated: {}", format_args!($($arg)+));
            } else {
                log::error!("invariant violated: {}", format_args!($($arg)+));
            }
        }
    };
}

pub(crate) use invariant;
