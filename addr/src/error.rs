use failure::Fail;

/// Text parse error.
#[derive(Debug, Fail)]
pub enum ParseError {
    /// Address parse error.
    #[fail(display = "{}", _0)]
    Address(std::net::AddrParseError),
    /// Address portion of a network is longer than any valid address.
    #[fail(display = "address too long")]
    AddressTooLong,
    /// Prefix length is not an integer.
    #[fail(display = "invalid prefix length")]
    PrefixLen,
    /// Prefix length out of range for the address family.
    #[fail(display = "prefix length {} out of range", _0)]
    PrefixLenRange(i64),
    /// Malformed EUI-64.
    #[fail(display = "invalid EUI-64")]
    Eui64,
    /// Malformed duration in seconds.
    #[fail(display = "invalid duration")]
    Msec,
}

impl From<std::net::AddrParseError> for ParseError {
    fn from(err: std::net::AddrParseError) -> Self {
        Self::Address(err)
    }
}
