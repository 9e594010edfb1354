//! Caller-facing errors
//!
//! Hash computation itself cannot fail. These cover the edges where callers
//! hand in names, hex strings or an incomplete primitive backend.

use thiserror::Error;

use crate::catalog::Variant;
use crate::primitive::Primitive;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{variant} needs primitive {primitive}, which is not registered")]
    MissingPrimitive {
        variant: Variant,
        primitive: Primitive,
    },

    #[error("Invalid reference hash: {0}")]
    InvalidReference(String),

    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    #[error("{variant} requires {expected}")]
    ContextMismatch {
        variant: Variant,
        expected: &'static str,
    },
}

pub type Result<T> = core::result::Result<T, Error>;
