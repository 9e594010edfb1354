//! Primitives backed by published crates
//!
//! Luffa, SHAvite, SIMD, ECHO, Hamsi, Fugue and HAVAL-256/5 have no maintained
//! Rust implementation and stay unregistered.

use cubehash::{CubeHashBest, CubeHashParams};
use skein::consts::U64;

use crate::params::SLOT_SIZE;
use crate::primitive::{Primitive, PrimitiveTable, Slot, widen};

impl PrimitiveTable {
    /// Table with every crate-backed primitive registered
    pub fn bundled() -> Self {
        Self::new()
            .with(Primitive::Blake, blake512)
            .with_digest::<bmw_hash::Bmw512>(Primitive::Bmw)
            .with_digest::<groestl::Groestl512>(Primitive::Groestl)
            .with_digest::<jh::Jh512>(Primitive::Jh)
            .with_digest::<sha3::Keccak512>(Primitive::Keccak)
            .with_digest::<skein::Skein512<U64>>(Primitive::Skein)
            .with(Primitive::CubeHash, cubehash512)
            .with_digest::<shabal::Shabal512>(Primitive::Shabal)
            .with_digest::<whirlpool::Whirlpool>(Primitive::Whirlpool)
            .with_digest::<sha2::Sha512>(Primitive::Sha512)
            .with_digest::<streebog::Streebog512>(Primitive::Gost)
    }
}

/// BLAKE-512 (SHA-3 final round version, 16 rounds)
fn blake512(input: &[u8]) -> Slot {
    let mut slot = [0u8; SLOT_SIZE];
    if let Err(err) = blake::hash(512, input, &mut slot) {
        panic!("blake512 rejected a fixed 512-bit width: {err:?}");
    }
    slot
}

/// CubeHash16/32-512, the revision 2 parameters used by the X11 family
fn cubehash512(input: &[u8]) -> Slot {
    let mut hasher = CubeHashBest::new(CubeHashParams {
        revision: 2,
        hash_len_bits: 512,
    });
    hasher.update(input);
    widen(&hasher.finalize())
}
