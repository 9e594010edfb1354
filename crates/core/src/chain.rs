//! Chain execution
//!
//! A [`ChainSpec`] is immutable data: a selection policy, the link width and
//! a finalizer. Executing it threads one 64-byte slot through every step in
//! order. Step 0 hashes the message; step i > 0 hashes the digest of step
//! i - 1 (followed by 64 zero bytes on wide chains).

use crate::finalize::Finalizer;
use crate::params::*;
use crate::primitive::{Primitive, Primitives, Slot};
use crate::selector::{Selection, SelectorContext};

/// Bytes hashed by every step after the first
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinkWidth {
    /// The previous digest (64 bytes)
    #[default]
    Narrow,
    /// The previous digest followed by a zeroed slot (128 bytes)
    Wide,
}

impl LinkWidth {
    pub const fn bytes(self) -> usize {
        match self {
            LinkWidth::Narrow => SLOT_SIZE,
            LinkWidth::Wide => WIDE_LINK_SIZE,
        }
    }
}

/// Immutable definition of one chained hash
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainSpec {
    name: &'static str,
    selection: Selection,
    link: LinkWidth,
    finalizer: Finalizer,
}

impl ChainSpec {
    /// Build a chain definition
    ///
    /// Panics if the selection is malformed (empty chain, branch at step 0,
    /// out-of-range nibble window, repeated permutation element...).
    pub fn new(
        name: &'static str,
        selection: Selection,
        link: LinkWidth,
        finalizer: Finalizer,
    ) -> Self {
        selection.validate();
        Self {
            name,
            selection,
            link,
            finalizer,
        }
    }

    /// Start a static chain assembled from segments
    pub fn builder(name: &'static str) -> ChainBuilder {
        ChainBuilder {
            name,
            primitives: Vec::new(),
            link: LinkWidth::Narrow,
            finalizer: Finalizer::Truncate,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn link_width(&self) -> LinkWidth {
        self.link
    }

    pub fn finalizer(&self) -> Finalizer {
        self.finalizer
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Every primitive the chain may call, sorted by id
    pub fn candidates(&self) -> Vec<Primitive> {
        self.selection.candidates()
    }

    /// Primitive order under `context`; `None` for content-conditional chains
    pub fn schedule(&self, context: &SelectorContext) -> Option<Vec<Primitive>> {
        self.selection.schedule(context)
    }

    /// Final 64-byte digest
    pub fn run<P: Primitives + ?Sized>(
        &self,
        primitives: &P,
        message: &[u8],
        context: &SelectorContext,
    ) -> Slot {
        self.drive(primitives, message, context, |_, _, _| {})
    }

    /// 32-byte output
    pub fn digest<P: Primitives + ?Sized>(
        &self,
        primitives: &P,
        message: &[u8],
        context: &SelectorContext,
    ) -> [u8; OUTPUT_SIZE] {
        self.finalizer
            .finalize(&self.run(primitives, message, context))
    }

    /// Every intermediate digest plus the output
    pub fn trace<P: Primitives + ?Sized>(
        &self,
        primitives: &P,
        message: &[u8],
        context: &SelectorContext,
    ) -> ChainTrace {
        let mut steps = Vec::with_capacity(self.len());
        let last = self.drive(primitives, message, context, |_, primitive, slot| {
            steps.push(TraceStep {
                primitive,
                slot: *slot,
            });
        });
        ChainTrace {
            steps,
            output: self.finalizer.finalize(&last),
        }
    }

    /// Execute every step in order, reporting each `(index, primitive, digest)`
    ///
    /// Panics when `context` lacks what the selection needs.
    pub fn drive<P, F>(
        &self,
        primitives: &P,
        message: &[u8],
        context: &SelectorContext,
        mut visit: F,
    ) -> Slot
    where
        P: Primitives + ?Sized,
        F: FnMut(usize, Primitive, &Slot),
    {
        let plan = self.selection.plan(context);
        let _span = tracing::trace_span!("chain", variant = self.name, steps = self.len()).entered();

        let first = plan.primitive(0, None);
        let mut slot = primitives.compute(first, message);
        tracing::trace!(step = 0, primitive = %first, input_len = message.len(), "chain step");
        visit(0, first, &slot);

        // Bytes past SLOT_SIZE stay zero for the wide link.
        let mut link = [0u8; WIDE_LINK_SIZE];
        let width = self.link.bytes();
        for step in 1..self.len() {
            let primitive = plan.primitive(step, Some(&slot));
            link[..SLOT_SIZE].copy_from_slice(&slot);
            slot = primitives.compute(primitive, &link[..width]);
            tracing::trace!(step, primitive = %primitive, "chain step");
            visit(step, primitive, &slot);
        }
        slot
    }
}

/// Static chain under construction
///
/// ```rust
/// use xhash_core::{ChainSpec, Primitive};
///
/// let chain = ChainSpec::builder("sha-keccak")
///     .then(&[Primitive::Sha512, Primitive::Keccak])
///     .then_reversed(&[Primitive::Sha512, Primitive::Keccak])
///     .build();
/// assert_eq!(chain.len(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct ChainBuilder {
    name: &'static str,
    primitives: Vec<Primitive>,
    link: LinkWidth,
    finalizer: Finalizer,
}

impl ChainBuilder {
    /// Append a segment
    pub fn then(mut self, segment: &[Primitive]) -> Self {
        self.primitives.extend_from_slice(segment);
        self
    }

    /// Append a segment back to front
    pub fn then_reversed(mut self, segment: &[Primitive]) -> Self {
        self.primitives.extend(segment.iter().rev());
        self
    }

    pub fn link_width(mut self, link: LinkWidth) -> Self {
        self.link = link;
        self
    }

    pub fn finalizer(mut self, finalizer: Finalizer) -> Self {
        self.finalizer = finalizer;
        self
    }

    pub fn build(self) -> ChainSpec {
        ChainSpec::new(
            self.name,
            Selection::Static(self.primitives),
            self.link,
            self.finalizer,
        )
    }
}

/// One executed step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceStep {
    pub primitive: Primitive,
    pub slot: Slot,
}

/// Full record of one chain execution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainTrace {
    pub steps: Vec<TraceStep>,
    pub output: [u8; OUTPUT_SIZE],
}

impl ChainTrace {
    /// Primitive run at each step
    pub fn primitives(&self) -> Vec<Primitive> {
        self.steps.iter().map(|step| step.primitive).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Digest produced by step `index`
    pub fn slot(&self, index: usize) -> &Slot {
        &self.steps[index].slot
    }
}
