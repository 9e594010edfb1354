//! External 256-bit reference values (previous block hashes)

use core::fmt;
use core::str::FromStr;

use crate::error::Error;
use crate::params::{OUTPUT_SIZE, REFERENCE_NIBBLES};

/// 256-bit value stored little-endian, displayed big-endian
///
/// This is the usual block hash convention: byte 0 of the stored value is the
/// last byte pair of the hex string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Hash256([u8; OUTPUT_SIZE]);

impl Hash256 {
    pub const ZERO: Hash256 = Hash256([0u8; OUTPUT_SIZE]);

    /// Wrap bytes in storage (little-endian) order
    pub const fn from_bytes(bytes: [u8; OUTPUT_SIZE]) -> Self {
        Self(bytes)
    }

    /// Bytes in storage (little-endian) order
    pub const fn as_bytes(&self) -> &[u8; OUTPUT_SIZE] {
        &self.0
    }

    /// Parse a 64-digit display-order hex string
    pub fn from_hex(hex_str: &str) -> Result<Self, Error> {
        let hex_str = hex_str.trim();
        let hex_str = hex_str
            .strip_prefix("0x")
            .or_else(|| hex_str.strip_prefix("0X"))
            .unwrap_or(hex_str);
        if hex_str.len() != REFERENCE_NIBBLES {
            return Err(Error::InvalidReference(format!(
                "expected {REFERENCE_NIBBLES} hex digits, got {}",
                hex_str.len()
            )));
        }
        let mut bytes = [0u8; OUTPUT_SIZE];
        hex::decode_to_slice(hex_str, &mut bytes)
            .map_err(|e| Error::InvalidReference(e.to_string()))?;
        bytes.reverse();
        Ok(Self(bytes))
    }

    /// Display-order hex string
    pub fn to_hex(&self) -> String {
        let mut bytes = self.0;
        bytes.reverse();
        hex::encode(bytes)
    }

    /// The `index`-th hex digit of the display string (0 = most significant)
    pub fn nibble(&self, index: usize) -> u8 {
        assert!(
            index < REFERENCE_NIBBLES,
            "nibble index {index} out of range"
        );
        // Display digit k lives in stored byte 31 - k/2, high half first.
        let byte = self.0[OUTPUT_SIZE - 1 - index / 2];
        if index % 2 == 0 { byte >> 4 } else { byte & 0x0F }
    }

    /// Copy of this value with display digit `index` replaced
    pub fn with_nibble(mut self, index: usize, value: u8) -> Self {
        assert!(
            index < REFERENCE_NIBBLES,
            "nibble index {index} out of range"
        );
        let byte = &mut self.0[OUTPUT_SIZE - 1 - index / 2];
        let value = value & 0x0F;
        *byte = if index % 2 == 0 {
            (*byte & 0x0F) | (value << 4)
        } else {
            (*byte & 0xF0) | value
        };
        self
    }
}

impl FromStr for Hash256 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; OUTPUT_SIZE]> for Hash256 {
    fn from(bytes: [u8; OUTPUT_SIZE]) -> Self {
        Self(bytes)
    }
}
