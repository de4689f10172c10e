//! Addr models the 128 bit addresses and prefixes carried by babel.
//!
//! Every address is 16 bytes wide. IPv4 addresses are stored in the
//! IPv4-mapped form `::ffff:a.b.c.d` so prefixes of both families share one
//! representation and one set of operations.
//!
//! ## Prefix lengths
//! Operations taking a prefix length never fail on it: lengths above 128 are
//! treated as exactly 128, see [`clamp_prefix_len`].
//!
//! ## Text
//! Addresses format to the canonical colon-hex notation with zero-run
//! compression and parse from it. Networks use `address/len` and the keyword
//! `default` for `::/0`, see [`Prefix`].
#![deny(missing_docs)]
mod error;
mod eui64;
mod prefix;

pub use crate::error::ParseError;
pub use crate::eui64::{format_eui64, parse_eui64, Eui64};
pub use crate::prefix::{format_prefix, parse_net, Prefix};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 16;

/// Longest prefix length.
pub const MAX_PREFIX_LEN: u8 = 128;

/// Maximum length of the text form of an address, including the terminator
/// reserved by `INET6_ADDRSTRLEN`.
pub const MAX_ADDRESS_TEXT_LEN: usize = 46;

const V4_MAPPED: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];

/// Clamps a prefix length to [`MAX_PREFIX_LEN`].
///
/// This is the policy applied by `in_prefix`, `mask` and `Prefix::new`:
/// an oversized length selects the whole address.
pub fn clamp_prefix_len(plen: u8) -> u8 {
    plen.min(MAX_PREFIX_LEN)
}

/// Mask selecting the leading `plen % 8` bits of the boundary byte.
fn boundary_mask(plen: u8) -> u8 {
    debug_assert!(plen % 8 != 0);
    0xff << (8 - plen % 8)
}

/// A 128 bit address.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address.
    pub const UNSPECIFIED: Address = Address([0; ADDRESS_LEN]);

    /// Creates an address from its bytes in network order.
    pub const fn new(octets: [u8; ADDRESS_LEN]) -> Self {
        Self(octets)
    }

    /// Returns the bytes of the address.
    pub fn octets(&self) -> [u8; ADDRESS_LEN] {
        self.0
    }

    /// Returns the bytes of the address as a slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }

    /// Returns the IPv4-mapped address of `ip`.
    pub fn from_ipv4(ip: Ipv4Addr) -> Self {
        let mut octets = [0; ADDRESS_LEN];
        octets[..12].copy_from_slice(&V4_MAPPED);
        octets[12..].copy_from_slice(&ip.octets());
        Self(octets)
    }

    /// Is this an IPv4-mapped address.
    pub fn is_v4_mapped(&self) -> bool {
        self.0[..12] == V4_MAPPED
    }

    /// Returns the IPv4 address if this is an IPv4-mapped address.
    pub fn to_ipv4(&self) -> Option<Ipv4Addr> {
        if !self.is_v4_mapped() {
            return None;
        }
        Some(Ipv4Addr::new(self.0[12], self.0[13], self.0[14], self.0[15]))
    }

    /// Is this the all-zero address.
    pub fn is_unspecified(&self) -> bool {
        *self == Self::UNSPECIFIED
    }

    /// Checks that the first `plen` bits of `self` and `prefix` agree.
    ///
    /// Bits of `prefix` beyond `plen` are ignored, so `prefix` doesn't need
    /// to be masked. With `plen` of 128 this is plain equality.
    pub fn in_prefix(&self, prefix: &Address, plen: u8) -> bool {
        let plen = clamp_prefix_len(plen);
        let bytes = (plen / 8) as usize;
        if self.0[..bytes] != prefix.0[..bytes] {
            return false;
        }
        if plen % 8 == 0 {
            return true;
        }
        let m = boundary_mask(plen);
        self.0[bytes] & m == prefix.0[bytes] & m
    }

    /// Returns a copy with every bit beyond `plen` cleared.
    pub fn mask(&self, plen: u8) -> Address {
        let plen = clamp_prefix_len(plen);
        let bytes = (plen / 8) as usize;
        let mut octets = [0; ADDRESS_LEN];
        octets[..bytes].copy_from_slice(&self.0[..bytes]);
        if plen % 8 != 0 {
            octets[bytes] = self.0[bytes] & boundary_mask(plen);
        }
        Self(octets)
    }
}

impl From<Ipv6Addr> for Address {
    fn from(ip: Ipv6Addr) -> Self {
        Self(ip.octets())
    }
}

impl From<Ipv4Addr> for Address {
    fn from(ip: Ipv4Addr) -> Self {
        Self::from_ipv4(ip)
    }
}

impl From<Address> for Ipv6Addr {
    fn from(addr: Address) -> Self {
        Ipv6Addr::from(addr.0)
    }
}

/// Address text together with the family it was written in.
pub(crate) enum Family {
    V4,
    V6,
}

pub(crate) fn parse_with_family(s: &str) -> Result<(Address, Family), ParseError> {
    match Ipv6Addr::from_str(s) {
        Ok(ip) => Ok((ip.into(), Family::V6)),
        Err(err) => match Ipv4Addr::from_str(s) {
            Ok(ip) => Ok((Address::from_ipv4(ip), Family::V4)),
            Err(_) => Err(err.into()),
        },
    }
}

impl FromStr for Address {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse_with_family(s)?.0)
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(&Ipv6Addr::from(self.0), f)
    }
}

/// Parses the text form of an address.
///
/// Dotted-quad IPv4 text yields the IPv4-mapped address.
pub fn parse_address(s: &str) -> Result<Address, ParseError> {
    s.parse()
}

/// Formats an address in colon-hex notation.
pub fn format_address(addr: &Address) -> String {
    addr.to_string()
}
