//! Filter for prefixes that are never valid routing destinations.
use addr::{Address, Prefix};

/// Checks whether `prefix/plen` must never be announced or installed.
///
/// Martians are multicast (`ff00::/8`), link-local unicast (`fe80::/10`)
/// and the unspecified address, each only once `plen` is long enough to
/// lie entirely inside the range. `plen` is not clamped.
pub fn is_martian(prefix: &Address, plen: u8) -> bool {
    let b = prefix.as_bytes();
    (plen >= 8 && b[0] == 0xff)
        || (plen >= 10 && b[0] == 0xfe && b[1] & 0xc0 == 0x80)
        || (plen >= 128 && prefix.is_unspecified())
}

/// Trait for values that can be checked against the martian filter.
pub trait Martian {
    /// Returns true if the value is a martian.
    fn is_martian(&self) -> bool;
}

impl Martian for Prefix {
    fn is_martian(&self) -> bool {
        is_martian(self.addr(), self.len())
    }
}

impl Martian for Address {
    fn is_martian(&self) -> bool {
        is_martian(self, addr::MAX_PREFIX_LEN)
    }
}
