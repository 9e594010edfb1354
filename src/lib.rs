//! xhash
//!
//! Chained proof-of-work hashes as used by the X11 family of coins.
//!
//! # Overview
//!
//! A message runs through a chain of 512-bit primitives (BLAKE, BMW, Groestl,
//! JH, Keccak, Skein, ...). Each step hashes the previous step's digest and
//! the final digest is cut down to 256 bits. Which primitive runs at each step
//! is fixed for most variants, but some pick it from the data itself (Quark,
//! HMQ1725), from the previous block hash (X16R) or from the block timestamp
//! (TimeTravel).
//!
//! # Example
//!
//! ```rust
//! use xhash::algorithm::{hash, SelectorContext, Variant};
//!
//! let digest = hash(Variant::Nist5, b"block header", &SelectorContext::None).unwrap();
//! assert_eq!(digest.len(), 32);
//! ```

// Re-export the core algorithm
pub use xhash_core as algorithm;

// Convenience re-exports
pub use algorithm::{hash, Error, Hash256, Hasher, PrimitiveTable, SelectorContext, Variant};
