//! Step selection policies
//!
//! A [`Selection`] decides which primitive runs at each position of a chain:
//!
//! - `Static`: a fixed list
//! - `Conditional`: fixed steps mixed with branches on the previous digest
//! - `Nibble`: step i is the i-th nibble of an external reference hash
//! - `Permutation`: a timestamp picks one ordering of N distinct primitives
//!
//! Malformed selections are programming errors and panic when the owning
//! [`ChainSpec`](crate::ChainSpec) is built.

use std::borrow::Cow;

use crate::params::*;
use crate::primitive::{Primitive, Slot};
use crate::reference::Hash256;

/// Auxiliary input of one hash call
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectorContext {
    /// Nothing beyond the message
    #[default]
    None,
    /// External reference value, usually the previous block hash
    Reference(Hash256),
    /// Block timestamp
    Timestamp(u32),
}

/// One position of a content-conditional chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Fixed(Primitive),
    /// Reads the previous digest as a little-endian integer and runs `if_set`
    /// when `value & mask != 0`, `if_clear` otherwise
    Branch {
        mask: u64,
        if_set: Primitive,
        if_clear: Primitive,
    },
}

impl Step {
    pub const fn fixed(primitive: Primitive) -> Self {
        Step::Fixed(primitive)
    }

    pub const fn branch(mask: u64, if_set: Primitive, if_clear: Primitive) -> Self {
        Step::Branch {
            mask,
            if_set,
            if_clear,
        }
    }

    /// Pick the primitive for this step
    ///
    /// Branches need the previous digest; resolving one without it panics.
    pub fn resolve(&self, previous: Option<&Slot>) -> Primitive {
        match *self {
            Step::Fixed(primitive) => primitive,
            Step::Branch {
                mask,
                if_set,
                if_clear,
            } => {
                let Some(previous) = previous else {
                    panic!("branch step without a previous digest");
                };
                if branch_taken(previous, mask) {
                    if_set
                } else {
                    if_clear
                }
            }
        }
    }

    /// Every primitive this step can run
    pub fn candidates(&self) -> impl Iterator<Item = Primitive> {
        let (first, second) = match *self {
            Step::Fixed(primitive) => (primitive, None),
            Step::Branch {
                if_set, if_clear, ..
            } => (if_set, Some(if_clear)),
        };
        core::iter::once(first).chain(second)
    }
}

/// Whether `mask` hits any set bit of `slot` taken as a little-endian integer
///
/// Masks only cover the low 64 bits, i.e. bytes 0 to 7 of the slot.
pub fn branch_taken(slot: &Slot, mask: u64) -> bool {
    let mut low = [0u8; 8];
    low.copy_from_slice(&slot[..8]);
    u64::from_le_bytes(low) & mask != 0
}

/// Nibble-keyed selection over the 16-entry primitive table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NibbleSelector {
    /// Display-order index of the nibble read by step 0
    pub start: usize,
    /// Chain length
    pub steps: usize,
}

impl NibbleSelector {
    pub const fn new(start: usize, steps: usize) -> Self {
        Self { start, steps }
    }

    /// Primitive of step `step` under `reference`
    pub fn select(&self, reference: &Hash256, step: usize) -> Primitive {
        assert!(step < self.steps, "step {step} outside a {}-step chain", self.steps);
        Primitive::from_nibble(reference.nibble(self.start + step))
    }

    /// Primitive order for the whole chain
    pub fn schedule(&self, reference: &Hash256) -> Vec<Primitive> {
        (0..self.steps)
            .map(|step| self.select(reference, step))
            .collect()
    }

    fn validate(&self) {
        assert!(self.steps > 0, "nibble selector with no steps");
        assert!(
            self.start + self.steps <= REFERENCE_NIBBLES,
            "nibble window {}..{} exceeds the {REFERENCE_NIBBLES} digits of a reference hash",
            self.start,
            self.start + self.steps
        );
    }
}

/// Timestamp-keyed ordering of distinct primitives
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationSelector {
    /// Primitive of each permutation element, in ascending element order
    pub primitives: Vec<Primitive>,
    /// Timestamp mapped to permutation index 0
    pub base_timestamp: u32,
    /// Number of permutations cycled through
    pub cycle: u32,
}

impl PermutationSelector {
    pub fn new(primitives: Vec<Primitive>, base_timestamp: u32, cycle: u32) -> Self {
        Self {
            primitives,
            base_timestamp,
            cycle,
        }
    }

    /// Permutation index for `timestamp`
    pub fn index(&self, timestamp: u32) -> u32 {
        permutation_index(timestamp, self.base_timestamp, self.cycle)
    }

    /// Primitive order for `timestamp`
    pub fn schedule(&self, timestamp: u32) -> Vec<Primitive> {
        nth_permutation(self.primitives.len(), self.index(timestamp))
            .into_iter()
            .map(|element| self.primitives[element])
            .collect()
    }

    fn validate(&self) {
        let n = self.primitives.len();
        assert!(
            (1..=MAX_PERMUTATION_SIZE).contains(&n),
            "permutation over {n} primitives (supported: 1..={MAX_PERMUTATION_SIZE})"
        );
        for (i, primitive) in self.primitives.iter().enumerate() {
            assert!(
                !self.primitives[..i].contains(primitive),
                "primitive {primitive} repeated in a permutation"
            );
        }
        assert!(
            self.cycle > 0 && factorial(n) % self.cycle == 0,
            "permutation cycle {} does not divide {n}!",
            self.cycle
        );
    }
}

/// `(timestamp - base) mod cycle`, always in `[0, cycle)`
///
/// Timestamps before the base count backwards from the last index, so the
/// index repeats every `cycle` seconds on both sides of the base.
pub fn permutation_index(timestamp: u32, base_timestamp: u32, cycle: u32) -> u32 {
    assert!(cycle > 0, "permutation cycle must be positive");
    let offset = i64::from(timestamp) - i64::from(base_timestamp);
    // rem_euclid keeps the result below `cycle`, which fits in u32
    offset.rem_euclid(i64::from(cycle)) as u32
}

/// `n!` for `n <= 12`
pub const fn factorial(n: usize) -> u32 {
    assert!(n <= MAX_PERMUTATION_SIZE, "factorial overflows u32");
    let mut acc = 1u32;
    let mut i = 2;
    while i <= n {
        acc *= i as u32;
        i += 1;
    }
    acc
}

/// The permutation of `[0, n)` reached from ascending order after `index`
/// lexicographic successor steps
///
/// Computed directly by factorial-base unranking. `index` is taken modulo `n!`.
pub fn nth_permutation(n: usize, index: u32) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..n).collect();
    let mut rank = index % factorial(n);
    let mut order = Vec::with_capacity(n);
    for position in (0..n).rev() {
        let block = factorial(position);
        let pick = (rank / block) as usize;
        rank %= block;
        order.push(remaining.remove(pick));
    }
    order
}

/// Rearrange `items` into the lexicographically next permutation
///
/// Returns `false` and leaves `items` sorted ascending when it was already the
/// last permutation.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let mut pivot = items.len() - 1;
    while pivot > 0 && items[pivot - 1] >= items[pivot] {
        pivot -= 1;
    }
    if pivot == 0 {
        items.reverse();
        return false;
    }
    let mut successor = items.len() - 1;
    while items[successor] <= items[pivot - 1] {
        successor -= 1;
    }
    items.swap(pivot - 1, successor);
    items[pivot..].reverse();
    true
}

/// How a chain picks its primitives
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Static(Vec<Primitive>),
    Conditional(Vec<Step>),
    Nibble(NibbleSelector),
    Permutation(PermutationSelector),
}

impl Selection {
    /// Number of chain steps
    pub fn len(&self) -> usize {
        match self {
            Selection::Static(primitives) => primitives.len(),
            Selection::Conditional(steps) => steps.len(),
            Selection::Nibble(selector) => selector.steps,
            Selection::Permutation(selector) => selector.primitives.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short policy name
    pub fn kind(&self) -> &'static str {
        match self {
            Selection::Static(_) => "static",
            Selection::Conditional(_) => "conditional",
            Selection::Nibble(_) => "nibble",
            Selection::Permutation(_) => "permutation",
        }
    }

    /// Context this policy needs, if any
    pub fn required_context(&self) -> Option<&'static str> {
        match self {
            Selection::Nibble(_) => Some("a reference hash"),
            Selection::Permutation(_) => Some("a timestamp"),
            _ => None,
        }
    }

    /// Whether `context` carries what this policy needs
    pub fn accepts(&self, context: &SelectorContext) -> bool {
        match self {
            Selection::Nibble(_) => matches!(context, SelectorContext::Reference(_)),
            Selection::Permutation(_) => matches!(context, SelectorContext::Timestamp(_)),
            _ => true,
        }
    }

    /// Every primitive the chain may run, sorted by id
    pub fn candidates(&self) -> Vec<Primitive> {
        let mut all: Vec<Primitive> = match self {
            Selection::Static(primitives) => primitives.clone(),
            Selection::Conditional(steps) => steps.iter().flat_map(Step::candidates).collect(),
            Selection::Nibble(_) => Primitive::NIBBLE_TABLE.to_vec(),
            Selection::Permutation(selector) => selector.primitives.clone(),
        };
        all.sort_unstable();
        all.dedup();
        all
    }

    /// Primitive order under `context`, or `None` when it depends on content
    pub fn schedule(&self, context: &SelectorContext) -> Option<Vec<Primitive>> {
        match self.plan(context) {
            Plan::Fixed(order) => Some(order.into_owned()),
            Plan::Conditional(_) => None,
        }
    }

    /// Resolve everything that does not depend on intermediate digests
    ///
    /// Panics when `context` lacks what the policy needs.
    pub(crate) fn plan(&self, context: &SelectorContext) -> Plan<'_> {
        match (self, context) {
            (Selection::Static(primitives), _) => Plan::Fixed(Cow::Borrowed(primitives)),
            (Selection::Conditional(steps), _) => Plan::Conditional(steps),
            (Selection::Nibble(selector), SelectorContext::Reference(reference)) => {
                Plan::Fixed(Cow::Owned(selector.schedule(reference)))
            }
            (Selection::Permutation(selector), SelectorContext::Timestamp(timestamp)) => {
                Plan::Fixed(Cow::Owned(selector.schedule(*timestamp)))
            }
            (selection, context) => panic!(
                "{} selection requires {}, got {context:?}",
                selection.kind(),
                selection.required_context().unwrap_or("no context")
            ),
        }
    }

    pub(crate) fn validate(&self) {
        match self {
            Selection::Static(primitives) => {
                assert!(!primitives.is_empty(), "static selection with no steps");
            }
            Selection::Conditional(steps) => {
                assert!(!steps.is_empty(), "conditional selection with no steps");
                assert!(
                    matches!(steps[0], Step::Fixed(_)),
                    "the first step has no previous digest to branch on"
                );
                for (i, step) in steps.iter().enumerate() {
                    if let Step::Branch { mask, .. } = step {
                        assert!(*mask != 0, "step {i} branches on an empty mask");
                    }
                }
            }
            Selection::Nibble(selector) => selector.validate(),
            Selection::Permutation(selector) => selector.validate(),
        }
    }
}

/// Per-call primitive plan
pub(crate) enum Plan<'a> {
    Fixed(Cow<'a, [Primitive]>),
    Conditional(&'a [Step]),
}

impl Plan<'_> {
    pub(crate) fn primitive(&self, step: usize, previous: Option<&Slot>) -> Primitive {
        match self {
            Plan::Fixed(order) => order[step],
            Plan::Conditional(steps) => steps[step].resolve(previous),
        }
    }
}
