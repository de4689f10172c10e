//! Debug output gate.
//!
//! A process wide verbosity level decides whether `debugf!` and `kdebugf!`
//! emit anything. Events go through `tracing`; installing a subscriber is
//! left to the binary. When the gate is closed the macro arguments are not
//! evaluated, so formatting addresses for a suppressed message costs nothing.
use crate::constants::{DEBUG_LEVEL, KDEBUG_LEVEL};
use std::sync::atomic::{AtomicU8, Ordering};

static LEVEL: AtomicU8 = AtomicU8::new(0);

/// Sets the debug level.
pub fn set_level(level: u8) {
    LEVEL.store(level, Ordering::Relaxed);
}

/// Returns the debug level.
pub fn level() -> u8 {
    LEVEL.load(Ordering::Relaxed)
}

/// Is output at `level` enabled.
pub fn enabled(level: u8) -> bool {
    self::level() >= level
}

/// Is `debugf!` output enabled.
pub fn debug_enabled() -> bool {
    enabled(DEBUG_LEVEL)
}

/// Is `kdebugf!` output enabled.
pub fn kdebug_enabled() -> bool {
    enabled(KDEBUG_LEVEL)
}

/// Emits a debug event when the debug level is at least 2.
#[macro_export]
macro_rules! debugf {
    ($($arg:tt)*) => {
        if $crate::debug::debug_enabled() {
            $crate::__tracing::debug!($($arg)*);
        }
    };
}

/// Emits a trace event when the debug level is at least 3.
#[macro_export]
macro_rules! kdebugf {
    ($($arg:tt)*) => {
        if $crate::debug::kdebug_enabled() {
            $crate::__tracing::trace!($($arg)*);
        }
    };
}
