use crate::ParseError;
use std::str::FromStr;

/// A 64 bit extended unique identifier, used to derive interface ids.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Eui64([u8; 8]);

impl Eui64 {
    /// Creates an identifier from its bytes.
    pub const fn new(octets: [u8; 8]) -> Self {
        Self(octets)
    }

    /// Expands a 48 bit MAC address by inserting `ff:fe` in the middle.
    pub fn from_mac(mac: [u8; 6]) -> Self {
        Self([mac[0], mac[1], mac[2], 0xff, 0xfe, mac[3], mac[4], mac[5]])
    }

    /// Returns the bytes of the identifier.
    pub fn octets(&self) -> [u8; 8] {
        self.0
    }
}

/// Splits `s` on `sep` into groups of one or two hex digits.
fn hex_groups(s: &str, sep: char) -> Option<Vec<u8>> {
    s.split(sep)
        .map(|group| {
            if group.is_empty() || group.len() > 2 {
                return None;
            }
            if !group.chars().all(|c| c.is_ascii_hexdigit()) {
                return None;
            }
            u8::from_str_radix(group, 16).ok()
        })
        .collect()
}

impl FromStr for Eui64 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for sep in &[':', '-'] {
            if let Some(bytes) = hex_groups(s, *sep) {
                if bytes.len() == 8 {
                    let mut octets = [0; 8];
                    octets.copy_from_slice(&bytes);
                    return Ok(Self(octets));
                }
            }
        }
        match hex_groups(s, ':') {
            Some(ref bytes) if bytes.len() == 6 => {
                let mut mac = [0; 6];
                mac.copy_from_slice(bytes);
                Ok(Self::from_mac(mac))
            }
            _ => Err(ParseError::Eui64),
        }
    }
}

impl std::fmt::Display for Eui64 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]
        )
    }
}

/// Parses an EUI-64 or a MAC address.
pub fn parse_eui64(s: &str) -> Result<Eui64, ParseError> {
    s.parse()
}

/// Formats an EUI-64 as eight colon separated hex bytes.
pub fn format_eui64(eui: &Eui64) -> String {
    eui.to_string()
}
