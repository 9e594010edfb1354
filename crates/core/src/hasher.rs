//! Variant-level hashing over a primitive backend

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::catalog::Variant;
use crate::chain::ChainTrace;
use crate::error::{Error, Result};
use crate::params::OUTPUT_SIZE;
use crate::primitive::{PrimitiveTable, Primitives};
use crate::reference::Hash256;
use crate::selector::SelectorContext;

/// Hashes catalog variants with one primitive backend
///
/// Hashing panics if the chain reaches a primitive the backend cannot serve;
/// use [`check`](Self::check) or [`check_with`](Self::check_with) up front
/// when the backend is only partially populated.
#[derive(Clone, Debug, Default)]
pub struct Hasher<P = PrimitiveTable> {
    primitives: P,
}

macro_rules! variant_methods {
    ($($method:ident => $variant:ident),* $(,)?) => {
        $(
            #[doc = concat!("`", stringify!($variant), "` digest of `message`")]
            pub fn $method(&self, message: &[u8]) -> [u8; OUTPUT_SIZE] {
                self.hash(Variant::$variant, message, &SelectorContext::None)
            }
        )*
    };
}

impl<P: Primitives> Hasher<P> {
    pub fn new(primitives: P) -> Self {
        Self { primitives }
    }

    pub fn primitives(&self) -> &P {
        &self.primitives
    }

    /// Digest of `message` under `variant`
    ///
    /// Panics if `context` does not carry what the variant needs.
    pub fn hash(
        &self,
        variant: Variant,
        message: &[u8],
        context: &SelectorContext,
    ) -> [u8; OUTPUT_SIZE] {
        variant.chain().digest(&self.primitives, message, context)
    }

    /// Every intermediate digest of one hash
    pub fn trace(
        &self,
        variant: Variant,
        message: &[u8],
        context: &SelectorContext,
    ) -> ChainTrace {
        variant.chain().trace(&self.primitives, message, context)
    }

    /// Ensure the backend serves every primitive `variant` can ever reach
    pub fn check(&self, variant: Variant) -> Result<()> {
        match variant
            .chain()
            .candidates()
            .into_iter()
            .find(|p| !self.primitives.provides(*p))
        {
            Some(primitive) => Err(Error::MissingPrimitive { variant, primitive }),
            None => Ok(()),
        }
    }

    /// Ensure `context` fits `variant` and the backend serves every primitive
    /// this particular call can reach
    ///
    /// Nibble and permutation chains only need the primitives their context
    /// selects; content-conditional chains need both sides of every branch.
    pub fn check_with(&self, variant: Variant, context: &SelectorContext) -> Result<()> {
        let chain = variant.chain();
        if !chain.selection().accepts(context) {
            return Err(Error::ContextMismatch {
                variant,
                expected: chain.selection().required_context().unwrap_or("no context"),
            });
        }
        let reachable = chain
            .schedule(context)
            .unwrap_or_else(|| chain.candidates());
        match reachable.into_iter().find(|p| !self.primitives.provides(*p)) {
            Some(primitive) => Err(Error::MissingPrimitive { variant, primitive }),
            None => Ok(()),
        }
    }

    /// Variants fully served by the backend
    pub fn supported(&self) -> Vec<Variant> {
        Variant::ALL
            .into_iter()
            .filter(|variant| self.check(*variant).is_ok())
            .collect()
    }

    variant_methods! {
        x11 => X11,
        x13 => X13,
        x14 => X14,
        x15 => X15,
        x17 => X17,
        nist5 => Nist5,
        quark => Quark,
        skunkhash5 => SkunkHash5,
        qubit => Qubit,
        groestl => Groestl,
        skein => Skein,
        hmq1725 => Hmq1725,
        xevan => Xevan,
        pawel => PawelHash,
        astral => AstralHash,
        padi => PadiHash,
        jeong => JeongHash,
        global => GlobalHash,
        desert => DesertHash,
        arctic => ArcticHash,
    }

    /// X16R digest keyed by the previous block hash
    pub fn x16r(&self, message: &[u8], previous_block: &Hash256) -> [u8; OUTPUT_SIZE] {
        self.hash(
            Variant::X16r,
            message,
            &SelectorContext::Reference(*previous_block),
        )
    }

    /// TimeTravel digest keyed by the block timestamp
    pub fn timetravel(&self, message: &[u8], timestamp: u32) -> [u8; OUTPUT_SIZE] {
        self.hash(
            Variant::TimeTravel,
            message,
            &SelectorContext::Timestamp(timestamp),
        )
    }
}

#[cfg(feature = "parallel")]
impl<P: Primitives + Sync> Hasher<P> {
    /// Hash independent messages across the rayon pool, preserving order
    pub fn hash_batch<M>(
        &self,
        variant: Variant,
        messages: &[M],
        context: &SelectorContext,
    ) -> Vec<[u8; OUTPUT_SIZE]>
    where
        M: AsRef<[u8]> + Sync,
    {
        messages
            .par_iter()
            .map(|message| self.hash(variant, message.as_ref(), context))
            .collect()
    }
}

#[cfg(feature = "bundled")]
impl Hasher<PrimitiveTable> {
    /// Hasher over [`PrimitiveTable::bundled`]
    pub fn bundled() -> Self {
        Self::new(PrimitiveTable::bundled())
    }
}

/// One-shot hash with the bundled primitives
///
/// Returns an error instead of panicking when the variant or context needs
/// something the bundled set cannot provide.
#[cfg(feature = "bundled")]
pub fn hash(
    variant: Variant,
    message: &[u8],
    context: &SelectorContext,
) -> Result<[u8; OUTPUT_SIZE]> {
    use std::sync::OnceLock;

    static BUNDLED: OnceLock<Hasher> = OnceLock::new();
    let hasher = BUNDLED.get_or_init(Hasher::bundled);
    hasher.check_with(variant, context)?;
    Ok(hasher.hash(variant, message, context))
}
