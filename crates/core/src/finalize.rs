//! Reduction of the last 512-bit digest to the 256-bit output

use core::fmt;

use sha2::{Digest, Sha256};

use crate::params::OUTPUT_SIZE;
use crate::primitive::Slot;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Finalizer {
    /// First 32 bytes of the slot (the low 256 bits of its little-endian value)
    #[default]
    Truncate,
    /// SHA-256 over all 64 bytes of the slot
    Sha256,
}

impl Finalizer {
    pub fn finalize(self, slot: &Slot) -> [u8; OUTPUT_SIZE] {
        let mut output = [0u8; OUTPUT_SIZE];
        match self {
            Finalizer::Truncate => output.copy_from_slice(&slot[..OUTPUT_SIZE]),
            Finalizer::Sha256 => output.copy_from_slice(&Sha256::digest(slot)),
        }
        output
    }

    pub const fn name(self) -> &'static str {
        match self {
            Finalizer::Truncate => "truncate",
            Finalizer::Sha256 => "sha256",
        }
    }
}

impl fmt::Display for Finalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
