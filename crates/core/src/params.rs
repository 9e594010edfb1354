//! Chain parameters shared by the selectors, the executor and the catalog.

/// Width of one intermediate digest slot in bytes
pub const SLOT_SIZE: usize = 64;

/// Width of the final output in bytes
pub const OUTPUT_SIZE: usize = 32;

/// Bytes hashed per link by wide chains (slot followed by a zeroed slot)
pub const WIDE_LINK_SIZE: usize = 2 * SLOT_SIZE;

/// Number of primitive identifiers
pub const PRIMITIVE_COUNT: usize = 18;

/// Number of primitives addressable by a single nibble
pub const NIBBLE_TABLE_SIZE: usize = 16;

/// Hex digits in a 256-bit reference value
pub const REFERENCE_NIBBLES: usize = 64;

/// First nibble (display order) read by the rotating variant: the last 16 hex digits
pub const NIBBLE_WINDOW_START: usize = 48;

/// Number of steps in the rotating variant
pub const NIBBLE_WINDOW_STEPS: usize = 16;

/// Timestamp at which the timestamp-keyed ordering is the identity permutation
pub const TIMETRAVEL_BASE_TIMESTAMP: u32 = 1_492_973_331;

/// Number of primitives permuted by the timestamp-keyed variant
pub const TIMETRAVEL_FUNCTIONS: usize = 10;

/// Permutation cycle of the timestamp-keyed variant (10!)
pub const TIMETRAVEL_PERMUTATIONS: u32 = 3_628_800;

/// Largest permutation size whose factorial still fits in `u32`
pub const MAX_PERMUTATION_SIZE: usize = 12;

/// Branch mask of Quark (bit 3 of the low byte)
pub const QUARK_MASK: u64 = 8;

/// Branch mask of HMQ1725 (bits 3 and 4 of the low byte)
pub const HMQ1725_MASK: u64 = 24;

/// Longest chain in the catalog (DesertHash)
pub const MAX_CHAIN_STEPS: usize = 69;
