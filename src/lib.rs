//! # Babel routing primitives
//! The low level arithmetic a babel routing daemon is built on. The protocol
//! engine (neighbour and route tables, message codecs, the event loop) lives
//! elsewhere and calls into these primitives to order updates, schedule
//! timers, match prefixes and reject bogus announcements.
//!
//! ## Sequence numbers
//! Route sequence numbers are 16 bit and wrap. They are compared on a
//! circle: a value less than half the space ahead is newer. See `SeqNo`.
//!
//! ## Time
//! Timestamps are seconds and microseconds. A deadline can be infinitely
//! far away, which raw timestamps encode as zero seconds. Periodic timers
//! are capped with random sub-second jitter so that independent nodes
//! don't wake up in lock step. See `Timestamp` and `Deadline`.
//!
//! ## Addresses and prefixes
//! All addresses are 128 bit, IPv4 is stored IPv4-mapped. Prefix lengths
//! beyond 128 are clamped, never rejected. Text uses colon-hex notation,
//! `address/len` and `default`. See the `addr` crate.
//!
//! ## Martians
//! Multicast, link-local and unspecified destinations are martians and must
//! be dropped before route selection. See `is_martian`.
//!
//! ## Errors
//! Only text parsing fails, with `ParseError`. Everything else is total.
#![deny(missing_docs)]
pub mod constants;
pub mod debug;
pub mod martian;
pub mod seqno;
pub mod time;
pub mod wire;

pub use crate::martian::{is_martian, Martian};
pub use crate::seqno::SeqNo;
pub use crate::time::{parse_msec, roughly, Deadline, Timestamp};
pub use addr::{
    clamp_prefix_len, format_address, format_eui64, format_prefix, parse_address, parse_eui64,
    parse_net, Address, Eui64, ParseError, Prefix,
};

#[doc(hidden)]
pub use tracing as __tracing;

#[cfg(test)]
mod tests {
    use super::*;
    use failure::Error;
    use std::cmp::Ordering;

    fn properties() -> Result<(), Error> {
        assert_eq!(SeqNo::new(65535).compare(SeqNo::new(0)), Ordering::Less);
        assert_eq!(SeqNo::new(65535).distance(SeqNo::new(0)), -1);

        let default = parse_net("default")?;
        assert_eq!(default.len(), 0);
        assert_eq!(default.addr(), &Address::UNSPECIFIED);

        let multicast = parse_net("ff00::/8")?;
        assert!(is_martian(multicast.addr(), 8));

        assert!(parse_net("2001:db8::1/129").is_err());

        let a = parse_address("2001:db8::1")?;
        let b = parse_address("2001:db8::2")?;
        assert!(a.in_prefix(&a, 128));
        assert!(!a.in_prefix(&b, 128));
        assert_eq!(parse_address(&format_address(&a))?, a);
        assert_eq!(a.mask(64).mask(64), a.mask(64));

        let mut deadline = Deadline::INFINITY;
        let t = Timestamp::new(1_000, 250_000);
        deadline.min_in(Deadline::at(t));
        assert_eq!(deadline.timestamp(), Some(t));
        deadline.min_in(Deadline::INFINITY);
        assert_eq!(deadline.timestamp(), Some(t));
        Ok(())
    }

    #[test]
    fn test_properties() {
        properties().unwrap();
    }

    fn scheduling() -> Result<(), Error> {
        let now = Timestamp::now();
        let hello = now.add_millis(roughly(4_000) as i64);
        let update = now.add_millis(parse_msec("16")? as i64);

        let mut next = Deadline::INFINITY;
        next.min_in(hello.into());
        next.min_in(update.into());
        next.bound_secs(now.secs() + 1);

        let next = next.timestamp().unwrap();
        assert!(next >= now);
        assert_eq!(next.secs(), now.secs() + 1);
        assert!(next.difference_millis(&now) <= 2_000);
        Ok(())
    }

    #[test]
    fn test_scheduling() {
        scheduling().unwrap();
    }
}
