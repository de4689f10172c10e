use crate::{
    clamp_prefix_len, parse_with_family, Address, Family, ParseError, MAX_ADDRESS_TEXT_LEN,
    MAX_PREFIX_LEN,
};
use std::str::FromStr;

/// IPv4 prefix lengths are offset by the length of the mapped prefix.
const V4_PREFIX_OFFSET: i64 = 96;

/// An address together with the number of leading bits that are significant.
///
/// A `Prefix` is always canonical: every bit beyond `len` is zero.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Prefix {
    addr: Address,
    len: u8,
}

impl Prefix {
    /// The default route `::/0`.
    pub const DEFAULT: Prefix = Prefix {
        addr: Address::UNSPECIFIED,
        len: 0,
    };

    /// Creates a prefix, masking `addr` to `len` bits.
    ///
    /// `len` is clamped to 128.
    pub fn new(addr: Address, len: u8) -> Self {
        let len = clamp_prefix_len(len);
        Self {
            addr: addr.mask(len),
            len,
        }
    }

    /// Creates the /128 prefix of a single address.
    pub fn host(addr: Address) -> Self {
        Self {
            addr,
            len: MAX_PREFIX_LEN,
        }
    }

    /// Returns the masked address.
    pub fn addr(&self) -> &Address {
        &self.addr
    }

    /// Returns the prefix length.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u8 {
        self.len
    }

    /// Is this the default route.
    pub fn is_default(&self) -> bool {
        self.len == 0
    }

    /// Checks that `addr` lies within the prefix.
    pub fn contains(&self, addr: &Address) -> bool {
        addr.in_prefix(&self.addr, self.len)
    }
}

/// Parses an integer the way `strtol` does with base 0.
///
/// Leading whitespace and a sign are accepted, `0x` selects hex and a
/// leading `0` octal. Unlike `strtol` the whole input must be consumed and
/// at least one digit is required.
fn parse_c_long(s: &str) -> Option<i64> {
    let s = s.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\x0b');
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = if s.len() > 2 && (s.starts_with("0x") || s.starts_with("0X")) {
        (16, &s[2..])
    } else if s.len() > 1 && s.starts_with('0') {
        (8, &s[1..])
    } else {
        (10, s)
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    let value = i64::from_str_radix(digits, radix).ok()?;
    Some(if negative { -value } else { value })
}

impl FromStr for Prefix {
    type Err = ParseError;

    fn from_str(net: &str) -> Result<Self, Self::Err> {
        if net == "default" {
            return Ok(Self::DEFAULT);
        }
        let slash = match net.find('/') {
            Some(slash) => slash,
            None => return Ok(Self::host(net.parse()?)),
        };
        if slash >= MAX_ADDRESS_TEXT_LEN {
            return Err(ParseError::AddressTooLong);
        }
        let (addr, family) = parse_with_family(&net[..slash])?;
        let plen = parse_c_long(&net[slash + 1..]).ok_or(ParseError::PrefixLen)?;
        let plen = match family {
            Family::V6 if (0..=128).contains(&plen) => plen,
            Family::V4 if (0..=32).contains(&plen) => plen + V4_PREFIX_OFFSET,
            _ => return Err(ParseError::PrefixLenRange(plen)),
        };
        Ok(Self::new(addr, plen as u8))
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}

/// Parses a network: `default`, a bare address, or `address/len`.
///
/// A bare address is a /128. The result is always masked.
pub fn parse_net(net: &str) -> Result<Prefix, ParseError> {
    net.parse()
}

/// Formats `addr/plen` without masking or clamping.
pub fn format_prefix(addr: &Address, plen: u8) -> String {
    format!("{}/{}", addr, plen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn net(s: &str) -> Prefix {
        s.parse().unwrap()
    }

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn test_default() {
        let prefix = net("default");
        assert_eq!(prefix.len(), 0);
        assert_eq!(prefix.addr(), &Address::UNSPECIFIED);
        assert!(prefix.is_default());
        assert!(!net("::/1").is_default());
        assert!(prefix.contains(&addr("2001:db8::1")));
        assert_eq!(prefix, Prefix::DEFAULT);
    }

    #[test]
    fn test_bare_address() {
        let prefix = net("2001:db8::1");
        assert_eq!(prefix.len(), 128);
        assert_eq!(prefix.addr(), &addr("2001:db8::1"));
    }

    #[test]
    fn test_masked() {
        let prefix = net("2001:db8::1/32");
        assert_eq!(prefix.len(), 32);
        assert_eq!(prefix.addr(), &addr("2001:db8::"));
        assert!(prefix.contains(&addr("2001:db8:1::")));
        assert!(!prefix.contains(&addr("2001:db9::")));
    }

    #[test]
    fn test_prefix_len_bases() {
        assert_eq!(net("2001:db8::/0x20").len(), 32);
        assert_eq!(net("2001:db8::/040").len(), 32);
        assert_eq!(net("2001:db8::/ 32").len(), 32);
        assert_eq!(net("2001:db8::/+32").len(), 32);
        assert_eq!(net("::/0").len(), 0);
        assert_eq!(net("::/-0").len(), 0);
        assert_eq!(net("2001:db8::1/128").len(), 128);
    }

    #[test]
    fn test_prefix_len_malformed() {
        for s in &[
            "2001:db8::/",
            "2001:db8::/32 ",
            "2001:db8::/32x",
            "2001:db8::/0x",
            "2001:db8::/08",
            "2001:db8::/x",
            "2001:db8::/3 2",
            "2001:db8::/32/1",
        ] {
            match s.parse::<Prefix>() {
                Err(ParseError::PrefixLen) => {}
                other => panic!("{}: {:?}", s, other),
            }
        }
    }

    #[test]
    fn test_prefix_len_range() {
        match "2001:db8::1/129".parse::<Prefix>() {
            Err(ParseError::PrefixLenRange(129)) => {}
            other => panic!("{:?}", other),
        }
        match "2001:db8::1/-1".parse::<Prefix>() {
            Err(ParseError::PrefixLenRange(-1)) => {}
            other => panic!("{:?}", other),
        }
        assert!(parse_net("2001:db8::/99999999999999999999").is_err());
    }

    #[test]
    fn test_bad_address() {
        assert!(parse_net("").is_err());
        assert!(parse_net("defaults").is_err());
        assert!(parse_net("2001:db8::g/32").is_err());
        assert!(parse_net("/32").is_err());
    }

    #[test]
    fn test_address_too_long() {
        let long = format!("{}/64", "0".repeat(MAX_ADDRESS_TEXT_LEN));
        match long.parse::<Prefix>() {
            Err(ParseError::AddressTooLong) => {}
            other => panic!("{:?}", other),
        }
        let long = format!("{}/64", "0".repeat(MAX_ADDRESS_TEXT_LEN - 1));
        match long.parse::<Prefix>() {
            Err(ParseError::Address(_)) => {}
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_v4() {
        let prefix = net("192.0.2.77/24");
        assert_eq!(prefix.len(), 120);
        assert_eq!(prefix.addr(), &addr("::ffff:192.0.2.0"));
        assert!(prefix.contains(&addr("192.0.2.1")));
        assert!(!prefix.contains(&addr("192.0.3.1")));
        assert_eq!(net("0.0.0.0/0").len(), 96);
        assert_eq!(net("192.0.2.1").len(), 128);
        match "192.0.2.0/33".parse::<Prefix>() {
            Err(ParseError::PrefixLenRange(33)) => {}
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_new_clamps_and_masks() {
        let prefix = Prefix::new(addr("2001:db8::1"), 200);
        assert_eq!(prefix.len(), 128);
        assert_eq!(prefix.addr(), &addr("2001:db8::1"));
        let prefix = Prefix::new(addr("2001:db8::1"), 16);
        assert_eq!(prefix.addr(), &addr("2001::"));
    }

    #[test]
    fn test_format() {
        assert_eq!(net("default").to_string(), "::/0");
        assert_eq!(net("2001:db8::1/32").to_string(), "2001:db8::/32");
        assert_eq!(format_prefix(&addr("fe80::1"), 64), "fe80::1/64");
        assert_eq!(net("192.0.2.0/24").to_string(), "::ffff:192.0.2.0/120");
    }

    #[test]
    fn test_round_trip() {
        for s in &["::/0", "2001:db8::/32", "fe80::/10", "ff00::/8", "::1/128"] {
            assert_eq!(net(s).to_string(), *s);
            assert_eq!(net(&net(s).to_string()), net(s));
        }
    }
}
