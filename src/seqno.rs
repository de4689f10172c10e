//! Circular 16 bit sequence numbers.
use crate::constants::{SEQNO_HALF, SEQNO_SPACE};
use std::cmp::Ordering;

/// A route sequence number.
///
/// Sequence numbers wrap, so they are deliberately not `Ord`: use `compare`
/// or `distance` instead of a linear comparison.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct SeqNo(u16);

impl SeqNo {
    /// Creates a sequence number.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Forward distance from `self` to `other` around the circle.
    fn ahead(self, other: SeqNo) -> u16 {
        other.0.wrapping_sub(self.0)
    }

    /// Circular comparison.
    ///
    /// `Less` if `other` is less than half the space ahead of `self`.
    pub fn compare(self, other: SeqNo) -> Ordering {
        if self == other {
            Ordering::Equal
        } else if self.ahead(other) < SEQNO_HALF {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Signed circular distance in `-32767..=32768`.
    ///
    /// Negative by `d` when `other` is `d` steps ahead of `self`, positive
    /// when `self` is ahead of `other`. The sign agrees with `compare`.
    pub fn distance(self, other: SeqNo) -> i32 {
        let d = self.ahead(other);
        if d == 0 {
            0
        } else if d < SEQNO_HALF {
            -(d as i32)
        } else {
            (SEQNO_SPACE - d as u32) as i32
        }
    }

    /// Advances by `n` steps, which may be negative.
    pub fn plus(self, n: i32) -> SeqNo {
        Self(self.0.wrapping_add(n as u16))
    }

    /// The sequence number one step ahead.
    pub fn next(self) -> SeqNo {
        self.plus(1)
    }
}

impl std::fmt::Display for SeqNo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
