//! C FFI bindings over the bundled primitive set
//!
//! Variants are addressed by their index in [`Variant::ALL`].

use core::ffi::c_char;
use core::slice;

use crate::catalog::Variant;
use crate::hasher::hash;
use crate::params::OUTPUT_SIZE;
use crate::reference::Hash256;
use crate::selector::SelectorContext;
use crate::Error;

/// Success
pub const XHASH_OK: i32 = 0;
/// A required pointer was null
pub const XHASH_NULL_POINTER: i32 = -1;
/// Variant index out of range
pub const XHASH_UNKNOWN_VARIANT: i32 = -2;
/// The chain needs a primitive the bundled set does not provide
pub const XHASH_MISSING_PRIMITIVE: i32 = -3;
/// X16R without a reference hash
pub const XHASH_MISSING_REFERENCE: i32 = -4;

/// Number of variants
#[unsafe(no_mangle)]
pub extern "C" fn xhash_variant_count() -> usize {
    Variant::ALL.len()
}

/// NUL-terminated name of variant `index`, or null when out of range
#[unsafe(no_mangle)]
pub extern "C" fn xhash_variant_name(index: usize) -> *const c_char {
    match Variant::ALL.get(index) {
        Some(variant) => c_name(*variant).as_ptr(),
        None => core::ptr::null(),
    }
}

/// Compute a variant hash
/// - variant: index into the variant list
/// - input: pointer to input bytes (may be null when input_len is 0)
/// - reference: 32-byte previous block hash in storage order (X16R only, else may be null)
/// - timestamp: block timestamp (TimeTravel only)
/// - output: pointer to 32-byte buffer for result
///
/// Returns `XHASH_OK` or one of the negative status codes.
#[unsafe(no_mangle)]
pub extern "C" fn xhash_hash(
    variant: usize,
    input: *const u8,
    input_len: usize,
    reference: *const u8,
    timestamp: u32,
    output: *mut u8,
) -> i32 {
    if output.is_null() || (input.is_null() && input_len != 0) {
        return XHASH_NULL_POINTER;
    }
    let Some(&variant) = Variant::ALL.get(variant) else {
        return XHASH_UNKNOWN_VARIANT;
    };

    let context = match variant {
        Variant::X16r => {
            if reference.is_null() {
                return XHASH_MISSING_REFERENCE;
            }
            let mut bytes = [0u8; OUTPUT_SIZE];
            unsafe { bytes.copy_from_slice(slice::from_raw_parts(reference, OUTPUT_SIZE)) };
            SelectorContext::Reference(Hash256::from_bytes(bytes))
        }
        Variant::TimeTravel => SelectorContext::Timestamp(timestamp),
        _ => SelectorContext::None,
    };

    let message: &[u8] = if input_len == 0 {
        &[]
    } else {
        unsafe { slice::from_raw_parts(input, input_len) }
    };

    match hash(variant, message, &context) {
        Ok(digest) => {
            unsafe {
                let output_slice = slice::from_raw_parts_mut(output, OUTPUT_SIZE);
                output_slice.copy_from_slice(&digest);
            }
            XHASH_OK
        }
        Err(Error::MissingPrimitive { .. }) => XHASH_MISSING_PRIMITIVE,
        Err(_) => XHASH_MISSING_REFERENCE,
    }
}

/// Benchmark: compute N hashes of a bundled variant and return total microseconds
///
/// X16R runs on an all-zero reference and TimeTravel on timestamp 0.
/// Returns 0 when the variant cannot run on the bundled set.
#[unsafe(no_mangle)]
pub extern "C" fn xhash_benchmark(variant: usize, iterations: u32) -> u64 {
    use std::time::Instant;

    let Some(&variant) = Variant::ALL.get(variant) else {
        return 0;
    };
    let input = b"benchmark test input data for mobile";
    let context = match variant {
        Variant::X16r => SelectorContext::Reference(Hash256::ZERO),
        Variant::TimeTravel => SelectorContext::Timestamp(0),
        _ => SelectorContext::None,
    };
    if hash(variant, input, &context).is_err() {
        return 0;
    }

    let start = Instant::now();
    for i in 0..iterations {
        let mut data = input.to_vec();
        data.extend_from_slice(&i.to_le_bytes());
        let _ = hash(variant, &data, &context);
    }
    start.elapsed().as_micros() as u64
}

/// Get hash rate (hashes per second) from a benchmark run
#[unsafe(no_mangle)]
pub extern "C" fn xhash_hashrate(iterations: u32, microseconds: u64) -> f64 {
    if microseconds == 0 {
        return 0.0;
    }
    (iterations as f64) / (microseconds as f64 / 1_000_000.0)
}

fn c_name(variant: Variant) -> &'static core::ffi::CStr {
    match variant {
        Variant::X11 => c"X11",
        Variant::X13 => c"X13",
        Variant::X14 => c"X14",
        Variant::X15 => c"X15",
        Variant::X17 => c"X17",
        Variant::Nist5 => c"NIST5",
        Variant::Quark => c"Quark",
        Variant::SkunkHash5 => c"SkunkHash5",
        Variant::Qubit => c"Qubit",
        Variant::Groestl => c"Groestl",
        Variant::Skein => c"Skein",
        Variant::TimeTravel => c"TimeTravel",
        Variant::Hmq1725 => c"HMQ1725",
        Variant::Xevan => c"XEVAN",
        Variant::X16r => c"X16R",
        Variant::PawelHash => c"PawelHash",
        Variant::AstralHash => c"AstralHash",
        Variant::PadiHash => c"PadiHash",
        Variant::JeongHash => c"JeongHash",
        Variant::GlobalHash => c"GlobalHash",
        Variant::DesertHash => c"DesertHash",
        Variant::ArcticHash => c"ArcticHash",
    }
}
