//! Peer identity.

use std::fmt;

/// Size of an IEEE 802 MAC address.
pub const MAC_ADDRESS_SIZE: usize = 6;

/// 48-bit MAC address identifying a peer station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MacAddress([u8; MAC_ADDRESS_SIZE]);

impl MacAddress {
    /// Broadcast address (`ff:ff:ff:ff:ff:ff`).
    pub const BROADCAST: Self = Self([0xff; MAC_ADDRESS_SIZE]);

    /// Create an address from bytes.
    pub const fn new(bytes: [u8; MAC_ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Locally administered unicast address derived from a counter.
    ///
    /// Handy for simulations that number their peers.
    pub fn from_index(index: u32) -> Self {
        let [a, b, c, d] = index.to_be_bytes();
        Self([0x02, 0x00, a, b, c, d])
    }

    /// Get the address as bytes.
    pub fn as_bytes(&self) -> &[u8; MAC_ADDRESS_SIZE] {
        &self.0
    }

    /// Check for a group (multicast or broadcast) address.
    pub fn is_group(&self) -> bool {
        self.0[0] & 0x01 != 0
    }
}

impl From<[u8; MAC_ADDRESS_SIZE]> for MacAddress {
    fn from(bytes: [u8; MAC_ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for MacAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}
