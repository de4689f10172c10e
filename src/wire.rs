//! Network byte order helpers for unaligned fields in packet buffers.
//!
//! These only move values in and out of byte slices; message layout is
//! up to the caller. Every helper panics if the slice is shorter than the
//! value, like slice indexing.
use crate::seqno::SeqNo;
use addr::{Address, ADDRESS_LEN};
use byteorder::{BigEndian, ByteOrder};

/// Reads a big endian `u16`.
pub fn read_u16(buf: &[u8]) -> u16 {
    BigEndian::read_u16(buf)
}

/// Writes a big endian `u16`.
pub fn write_u16(buf: &mut [u8], value: u16) {
    BigEndian::write_u16(buf, value)
}

/// Reads a sequence number.
pub fn read_seqno(buf: &[u8]) -> SeqNo {
    SeqNo::new(read_u16(buf))
}

/// Writes a sequence number.
pub fn write_seqno(buf: &mut [u8], seqno: SeqNo) {
    write_u16(buf, seqno.get())
}

/// Reads a full 16 byte address.
pub fn read_address(buf: &[u8]) -> Address {
    let mut octets = [0; ADDRESS_LEN];
    octets.copy_from_slice(&buf[..ADDRESS_LEN]);
    Address::new(octets)
}

/// Writes a full 16 byte address.
pub fn write_address(buf: &mut [u8], addr: &Address) {
    buf[..ADDRESS_LEN].copy_from_slice(addr.as_bytes())
}
