//! Primitive identifiers and the one-shot hashing contract
//!
//! Every chain step calls exactly one primitive through [`Primitives::compute`]:
//! bytes in, one 64-byte [`Slot`] out. Primitives with a shorter native digest
//! (HAVAL-256/5) fill the low part of the slot and leave the rest zeroed.

use core::fmt;

use digest::Digest;

use crate::params::*;

/// One 512-bit intermediate digest
pub type Slot = [u8; SLOT_SIZE];

/// One-shot hashing function stored in a [`PrimitiveTable`]
pub type PrimitiveFn = fn(&[u8]) -> Slot;

/// Hash primitive identifiers
///
/// Ids 0 to 15 are the nibble table of the rotating variant, in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Primitive {
    Blake = 0,
    Bmw = 1,
    Groestl = 2,
    Jh = 3,
    Keccak = 4,
    Skein = 5,
    Luffa = 6,
    CubeHash = 7,
    Shavite = 8,
    Simd = 9,
    Echo = 10,
    Hamsi = 11,
    Fugue = 12,
    Shabal = 13,
    Whirlpool = 14,
    Sha512 = 15,
    Haval = 16,
    Gost = 17,
}

impl Primitive {
    /// All primitives in id order
    pub const ALL: [Primitive; PRIMITIVE_COUNT] = [
        Primitive::Blake,
        Primitive::Bmw,
        Primitive::Groestl,
        Primitive::Jh,
        Primitive::Keccak,
        Primitive::Skein,
        Primitive::Luffa,
        Primitive::CubeHash,
        Primitive::Shavite,
        Primitive::Simd,
        Primitive::Echo,
        Primitive::Hamsi,
        Primitive::Fugue,
        Primitive::Shabal,
        Primitive::Whirlpool,
        Primitive::Sha512,
        Primitive::Haval,
        Primitive::Gost,
    ];

    /// Primitives addressable by a nibble (ids 0 to 15)
    pub const NIBBLE_TABLE: [Primitive; NIBBLE_TABLE_SIZE] = [
        Primitive::Blake,
        Primitive::Bmw,
        Primitive::Groestl,
        Primitive::Jh,
        Primitive::Keccak,
        Primitive::Skein,
        Primitive::Luffa,
        Primitive::CubeHash,
        Primitive::Shavite,
        Primitive::Simd,
        Primitive::Echo,
        Primitive::Hamsi,
        Primitive::Fugue,
        Primitive::Shabal,
        Primitive::Whirlpool,
        Primitive::Sha512,
    ];

    pub const fn id(self) -> u8 {
        self as u8
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Resolve a nibble (0 to 15) through the nibble table
    ///
    /// Panics on values above 15; callers extract nibbles with a 4-bit mask.
    pub fn from_nibble(nibble: u8) -> Self {
        assert!(
            (nibble as usize) < NIBBLE_TABLE_SIZE,
            "nibble {nibble} out of range"
        );
        Self::NIBBLE_TABLE[nibble as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Primitive::Blake => "blake512",
            Primitive::Bmw => "bmw512",
            Primitive::Groestl => "groestl512",
            Primitive::Jh => "jh512",
            Primitive::Keccak => "keccak512",
            Primitive::Skein => "skein512",
            Primitive::Luffa => "luffa512",
            Primitive::CubeHash => "cubehash512",
            Primitive::Shavite => "shavite512",
            Primitive::Simd => "simd512",
            Primitive::Echo => "echo512",
            Primitive::Hamsi => "hamsi512",
            Primitive::Fugue => "fugue512",
            Primitive::Shabal => "shabal512",
            Primitive::Whirlpool => "whirlpool",
            Primitive::Sha512 => "sha512",
            Primitive::Haval => "haval256_5",
            Primitive::Gost => "gost512",
        }
    }

    /// Native digest width in bytes
    pub const fn digest_len(self) -> usize {
        match self {
            Primitive::Haval => 32,
            _ => SLOT_SIZE,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Source of primitive implementations used by the chain executor
///
/// Implementations must be deterministic and side-effect free. `compute` is
/// infallible; a backend that cannot serve a primitive panics.
pub trait Primitives {
    /// Hash `input` (any length, including zero) with `primitive`
    fn compute(&self, primitive: Primitive, input: &[u8]) -> Slot;

    /// Whether `compute` can serve `primitive`
    fn provides(&self, _primitive: Primitive) -> bool {
        true
    }
}

impl<P: Primitives + ?Sized> Primitives for &P {
    fn compute(&self, primitive: Primitive, input: &[u8]) -> Slot {
        (**self).compute(primitive, input)
    }

    fn provides(&self, primitive: Primitive) -> bool {
        (**self).provides(primitive)
    }
}

/// Primitive backend built from plain function pointers
///
/// Start from [`PrimitiveTable::new`] (empty) or `PrimitiveTable::bundled`
/// (every primitive with a maintained crate) and register the rest.
#[derive(Clone, Debug)]
pub struct PrimitiveTable {
    entries: [Option<PrimitiveFn>; PRIMITIVE_COUNT],
}

impl PrimitiveTable {
    /// Create an empty table
    pub const fn new() -> Self {
        Self {
            entries: [None; PRIMITIVE_COUNT],
        }
    }

    /// Register (or replace) the implementation of `primitive`
    pub fn register(&mut self, primitive: Primitive, hash: PrimitiveFn) -> &mut Self {
        self.entries[primitive.index()] = Some(hash);
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, primitive: Primitive, hash: PrimitiveFn) -> Self {
        self.register(primitive, hash);
        self
    }

    /// Register any RustCrypto-style [`Digest`] of at most 64 bytes
    pub fn with_digest<D: Digest>(self, primitive: Primitive) -> Self {
        self.with(primitive, digest_slot::<D>)
    }

    /// Primitives with no registered implementation
    pub fn missing(&self) -> Vec<Primitive> {
        Primitive::ALL
            .into_iter()
            .filter(|p| self.entries[p.index()].is_none())
            .collect()
    }
}

impl Default for PrimitiveTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Primitives for PrimitiveTable {
    fn compute(&self, primitive: Primitive, input: &[u8]) -> Slot {
        match self.entries[primitive.index()] {
            Some(hash) => hash(input),
            None => panic!("primitive {primitive} is not registered"),
        }
    }

    fn provides(&self, primitive: Primitive) -> bool {
        self.entries[primitive.index()].is_some()
    }
}

/// One-shot [`Digest`] into a fresh slot
pub fn digest_slot<D: Digest>(input: &[u8]) -> Slot {
    widen(&D::digest(input))
}

/// Copy a digest of at most 64 bytes into the low end of a zeroed slot
pub fn widen(digest: &[u8]) -> Slot {
    assert!(
        digest.len() <= SLOT_SIZE,
        "digest of {} bytes does not fit a slot",
        digest.len()
    );
    let mut slot = [0u8; SLOT_SIZE];
    slot[..digest.len()].copy_from_slice(digest);
    slot
}
