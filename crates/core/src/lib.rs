//! # xhash core
//!
//! Chained proof-of-work hashes: a message runs through an ordered chain of
//! 512-bit hash primitives, each step hashing the previous step's digest, and
//! the last digest is reduced to 256 bits.
//!
//! ## Selection policies
//!
//! - **Static**: X11, X13, X14, X15, X17, NIST5, SkunkHash5, Qubit, XEVAN and
//!   the GLT family (Pawel, Astral, Padi, Jeong, Global, Desert, Arctic)
//! - **Content-conditional**: Quark and HMQ1725 branch on bits of the previous digest
//! - **Nibble-keyed**: X16R reads its order from the previous block hash
//! - **Permutation-keyed**: TimeTravel orders 10 primitives by block timestamp
//!
//! ## Primitives
//!
//! Chains call primitives through the [`Primitives`] trait. With the default
//! `bundled` feature, [`PrimitiveTable::bundled`] provides BLAKE, BMW, Groestl,
//! JH, Keccak, Skein, CubeHash, Shabal, Whirlpool, SHA-512 and GOST from
//! published crates. Luffa, SHAvite, SIMD, ECHO, Hamsi, Fugue and HAVAL must
//! be registered by the caller.
//!
//! ## Example
//!
//! ```rust
//! use xhash_core::{Hasher, PrimitiveTable, Variant, SelectorContext};
//!
//! let hasher = Hasher::new(PrimitiveTable::bundled());
//!
//! // NIST5 only needs bundled primitives
//! hasher.check(Variant::Nist5).unwrap();
//! let digest = hasher.nist5(b"block header");
//! assert_eq!(digest.len(), 32);
//!
//! // Same thing through the generic entry point
//! let again = hasher.hash(Variant::Nist5, b"block header", &SelectorContext::None);
//! assert_eq!(digest, again);
//!
//! // X11 needs Luffa and friends, which are not bundled
//! assert!(hasher.check(Variant::X11).is_err());
//! ```

#[cfg(feature = "bundled")]
mod bundled;
mod catalog;
mod chain;
mod error;
mod finalize;
mod hasher;
mod params;
mod primitive;
mod reference;
mod selector;

#[cfg(feature = "bundled")]
pub mod ffi;

pub use catalog::{Variant, segments};
pub use chain::{ChainBuilder, ChainSpec, ChainTrace, LinkWidth, TraceStep};
pub use error::{Error, Result};
pub use finalize::Finalizer;
pub use hasher::Hasher;
#[cfg(feature = "bundled")]
pub use hasher::hash;
pub use params::*;
pub use primitive::{Primitive, PrimitiveFn, PrimitiveTable, Primitives, Slot, digest_slot, widen};
pub use reference::Hash256;
pub use selector::{
    NibbleSelector, PermutationSelector, Selection, SelectorContext, Step, branch_taken, factorial,
    next_permutation, nth_permutation, permutation_index,
};
