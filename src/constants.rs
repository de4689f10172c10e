//! Constants of the babel primitives.
//!
//! # Sequence number length
//! Route sequence numbers are 16 bits and are expected to wrap. Two values
//! are ordered by the direction of the shorter way around the circle, which
//! is only meaningful as long as a peer never observes a source's sequence
//! number advance by more than half the space between two updates.
//!
//!   d = (s2 - s1) mod 2^16
//!
//! where
//!   d < 2^15: s1 is before s2
//!   d >= 2^15: s1 is after s2
//!
//! # Timestamps
//! Timestamps are seconds and microseconds. The timestamp with zero seconds
//! is reserved to mean "no deadline" wherever deadlines are stored in raw
//! form, which is safe because the monotonic clock starts at
//! `CLOCK_BASE_SECS` and never reads zero seconds.
#![allow(missing_docs)]
pub use addr::{ADDRESS_LEN, MAX_ADDRESS_TEXT_LEN, MAX_PREFIX_LEN};

/// Size of the sequence number space.
pub const SEQNO_SPACE: u32 = 0x1_0000;
/// Distance at which the circular order flips.
pub const SEQNO_HALF: u16 = 0x8000;

pub const USECS_PER_SEC: u32 = 1_000_000;
pub const USECS_PER_MSEC: u32 = 1_000;
pub const MSECS_PER_SEC: i64 = 1_000;

/// Seconds reported by `Timestamp::now` when the process clock starts.
pub const CLOCK_BASE_SECS: i64 = 1;

/// Debug level at which `debugf!` emits.
pub const DEBUG_LEVEL: u8 = 2;
/// Debug level at which `kdebugf!` emits.
pub const KDEBUG_LEVEL: u8 = 3;
