//! Time arithmetic for timer scheduling.
//!
//! A `Timestamp` is seconds and microseconds. Deadlines are `Deadline`s,
//! which carry "no deadline" as an explicit `INFINITY` instead of the zero
//! timestamp. Code that stores deadlines as raw timestamps can still use the
//! zero convention through `Deadline::from_raw`, `Deadline::into_raw` and the
//! raw `Timestamp::min_in` / `Timestamp::bound_secs` helpers.
use crate::constants::{CLOCK_BASE_SECS, MSECS_PER_SEC, USECS_PER_MSEC, USECS_PER_SEC};
use addr::ParseError;
use rand::Rng;
use std::cmp::Ordering;
use std::convert::TryFrom;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static CLOCK_START: OnceLock<Instant> = OnceLock::new();

/// A point in time with microsecond resolution.
///
/// `usecs` is always below one million. Timestamps are ordered by seconds,
/// then microseconds, so the zero timestamp sorts first.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp {
    secs: i64,
    usecs: u32,
}

impl Timestamp {
    /// The zero timestamp, which raw deadlines use for "no deadline".
    pub const ZERO: Timestamp = Timestamp { secs: 0, usecs: 0 };

    /// Creates a timestamp, carrying whole seconds out of `usecs`.
    pub fn new(secs: i64, usecs: u32) -> Self {
        Self {
            secs: secs + (usecs / USECS_PER_SEC) as i64,
            usecs: usecs % USECS_PER_SEC,
        }
    }

    /// Returns the current monotonic time.
    ///
    /// The clock starts at `CLOCK_BASE_SECS` on first use and never goes
    /// backwards, so it never reads as a raw infinite deadline.
    pub fn now() -> Self {
        let start = *CLOCK_START.get_or_init(Instant::now);
        let elapsed = Self::from(start.elapsed());
        Self {
            secs: elapsed.secs + CLOCK_BASE_SECS,
            usecs: elapsed.usecs,
        }
    }

    /// Whole seconds.
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// Microseconds past `secs`.
    pub fn usecs(&self) -> u32 {
        self.usecs
    }

    /// Returns `self - other`.
    ///
    /// Only meaningful when `self >= other`; an earlier `self` is not
    /// clamped and yields a negative seconds field.
    pub fn subtract(&self, other: &Timestamp) -> Timestamp {
        let secs = self.secs.wrapping_sub(other.secs);
        if self.usecs >= other.usecs {
            Self {
                secs,
                usecs: self.usecs - other.usecs,
            }
        } else {
            Self {
                secs: secs.wrapping_sub(1),
                usecs: self.usecs + USECS_PER_SEC - other.usecs,
            }
        }
    }

    /// Signed difference `self - other` in milliseconds, for either order.
    ///
    /// Sub-millisecond remainders truncate toward zero.
    pub fn difference_millis(&self, other: &Timestamp) -> i64 {
        (self.secs - other.secs) * MSECS_PER_SEC
            + (self.usecs as i64 - other.usecs as i64) / USECS_PER_MSEC as i64
    }

    /// Returns the timestamp `msecs` milliseconds later, or earlier when
    /// `msecs` is negative.
    pub fn add_millis(&self, msecs: i64) -> Timestamp {
        let mut secs = self.secs + msecs.div_euclid(MSECS_PER_SEC);
        let mut usecs =
            self.usecs + msecs.rem_euclid(MSECS_PER_SEC) as u32 * USECS_PER_MSEC;
        if usecs >= USECS_PER_SEC {
            usecs -= USECS_PER_SEC;
            secs += 1;
        }
        Self { secs, usecs }
    }

    /// Lexicographic comparison on seconds, then microseconds.
    ///
    /// The zero timestamp compares as the earliest time. Deadlines stored
    /// in raw form need `min_in` instead.
    pub fn compare(&self, other: &Timestamp) -> Ordering {
        self.cmp(other)
    }

    /// Lowers a raw deadline to `candidate` if it is earlier.
    ///
    /// A timestamp with zero seconds is "no deadline": a zero `candidate`
    /// leaves `self` alone and a zero `self` always takes `candidate`.
    pub fn min_in(&mut self, candidate: &Timestamp) {
        let mut deadline = Deadline::from_raw(*self);
        deadline.min_in(Deadline::from_raw(*candidate));
        if let Some(ts) = deadline.timestamp() {
            *self = ts;
        }
    }

    /// Caps a raw deadline at `secs` with random sub-second jitter.
    pub fn bound_secs(&mut self, secs: i64) {
        self.bound_secs_with(secs, &mut rand::thread_rng())
    }

    /// `bound_secs` drawing the jitter from `rng`.
    pub fn bound_secs_with<R: Rng>(&mut self, secs: i64, rng: &mut R) {
        let mut deadline = Deadline::from_raw(*self);
        deadline.bound_secs_with(secs, rng);
        if let Some(ts) = deadline.timestamp() {
            *self = ts;
        }
    }
}

impl From<Duration> for Timestamp {
    fn from(duration: Duration) -> Self {
        Self {
            secs: duration.as_secs() as i64,
            usecs: duration.subsec_micros(),
        }
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{:06}", self.secs, self.usecs)
    }
}

/// A timer deadline, possibly infinitely far away.
///
/// `INFINITY` compares later than every timestamp.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Deadline(Option<Timestamp>);

impl Deadline {
    /// No deadline.
    pub const INFINITY: Deadline = Deadline(None);

    /// A deadline at `ts`.
    pub fn at(ts: Timestamp) -> Self {
        Self(Some(ts))
    }

    /// Reads a raw deadline, where zero seconds means `INFINITY`.
    pub fn from_raw(ts: Timestamp) -> Self {
        if ts.secs == 0 {
            Self::INFINITY
        } else {
            Self::at(ts)
        }
    }

    /// Writes a raw deadline, `INFINITY` becomes the zero timestamp.
    pub fn into_raw(self) -> Timestamp {
        self.0.unwrap_or(Timestamp::ZERO)
    }

    /// Returns the timestamp unless this is `INFINITY`.
    pub fn timestamp(&self) -> Option<Timestamp> {
        self.0
    }

    /// Is this `INFINITY`.
    pub fn is_infinite(&self) -> bool {
        self.0.is_none()
    }

    /// Replaces `self` with `candidate` if it is earlier.
    pub fn min_in(&mut self, candidate: Deadline) {
        if candidate < *self {
            *self = candidate;
        }
    }

    /// Caps the deadline at `secs` seconds.
    ///
    /// An infinite deadline or one later than `secs` becomes `secs` plus a
    /// uniformly random number of microseconds, so that timers capped in
    /// the same second don't all fire together.
    ///
    /// A `secs` of zero yields a finite deadline that `into_raw` writes with
    /// zero seconds, which `from_raw` then reads back as `INFINITY`.
    pub fn bound_secs(&mut self, secs: i64) {
        self.bound_secs_with(secs, &mut rand::thread_rng())
    }

    /// `bound_secs` drawing the jitter from `rng`.
    pub fn bound_secs_with<R: Rng>(&mut self, secs: i64, rng: &mut R) {
        match self.0 {
            Some(ts) if ts.secs <= secs => {}
            _ => {
                *self = Self::at(Timestamp {
                    secs,
                    usecs: rng.gen_range(0, USECS_PER_SEC),
                })
            }
        }
    }
}

impl From<Timestamp> for Deadline {
    fn from(ts: Timestamp) -> Self {
        Self::at(ts)
    }
}

impl PartialOrd for Deadline {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Deadline {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0, other.0) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.cmp(&b),
        }
    }
}

/// Returns `value` with up to ±25% random jitter.
pub fn roughly(value: u32) -> u32 {
    roughly_with(value, &mut rand::thread_rng())
}

/// `roughly` drawing the jitter from `rng`.
pub fn roughly_with<R: Rng>(value: u32, rng: &mut R) -> u32 {
    if value < 2 {
        return value;
    }
    let jittered = value as u64 * 3 / 4 + rng.gen_range(0, value / 2) as u64;
    u32::try_from(jittered).unwrap_or(u32::max_value())
}

/// Parses decimal seconds such as `4`, `0.5` or ` 1.25 ` into milliseconds.
///
/// Digits beyond the third decimal are rounded away.
pub fn parse_msec(s: &str) -> Result<u32, ParseError> {
    let s = s.trim_matches(' ');
    let (int, frac) = match s.find('.') {
        Some(dot) => (&s[..dot], &s[dot + 1..]),
        None => (s, ""),
    };
    if int.is_empty() && frac.is_empty() {
        return Err(ParseError::Msec);
    }
    if !int.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return Err(ParseError::Msec);
    }
    let secs: u64 = if int.is_empty() {
        0
    } else {
        int.parse().map_err(|_| ParseError::Msec)?
    };
    let mut msecs: u64 = if frac.is_empty() {
        0
    } else {
        frac.parse().map_err(|_| ParseError::Msec)?
    };
    let mut digits = frac.len();
    while digits > 3 {
        msecs = (msecs + 5) / 10;
        digits -= 1;
    }
    while digits < 3 {
        msecs *= 10;
        digits += 1;
    }
    secs.checked_mul(MSECS_PER_SEC as u64)
        .and_then(|total| total.checked_add(msecs))
        .and_then(|total| u32::try_from(total).ok())
        .ok_or(ParseError::Msec)
}
