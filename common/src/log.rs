//! Logging vocabulary shared by every crate in the workspace.
//!
//! The macros forward to [`tracing`]; the terminal decides how each level is drawn.
//! `success!` is an `info` event on the [`SUCCESS_TARGET`] target.

pub const SUCCESS_TARGET: &str = "flowscan::success";
pub const PRINT_TARGET: &str = "flowscan::print";

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::tracing::info!(target: $crate::log::SUCCESS_TARGET, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::tracing::info!($($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::tracing::warn!($($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::tracing::error!($($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        $crate::tracing::debug!($($arg)+)
    };
}
