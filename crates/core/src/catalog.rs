//! Named chained-hash variants
//!
//! Every variant is plain data assembled into a [`ChainSpec`] on first use.
//! The X family shares one primitive order, XEVAN runs it twice over wide
//! links, and the GLT family (Pawel, Astral, Padi, Jeong, Global, Desert,
//! Arctic) is composed from the segments in [`segments`].

use core::fmt;
use core::str::FromStr;
use std::sync::OnceLock;

use crate::chain::{ChainSpec, LinkWidth};
use crate::error::Error;
use crate::finalize::Finalizer;
use crate::params::*;
use crate::selector::{NibbleSelector, PermutationSelector, Selection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    X11,
    X13,
    X14,
    X15,
    X17,
    Nist5,
    Quark,
    SkunkHash5,
    Qubit,
    Groestl,
    Skein,
    TimeTravel,
    Hmq1725,
    Xevan,
    X16r,
    PawelHash,
    AstralHash,
    PadiHash,
    JeongHash,
    GlobalHash,
    DesertHash,
    ArcticHash,
}

impl Variant {
    pub const ALL: [Variant; 22] = [
        Variant::X11,
        Variant::X13,
        Variant::X14,
        Variant::X15,
        Variant::X17,
        Variant::Nist5,
        Variant::Quark,
        Variant::SkunkHash5,
        Variant::Qubit,
        Variant::Groestl,
        Variant::Skein,
        Variant::TimeTravel,
        Variant::Hmq1725,
        Variant::Xevan,
        Variant::X16r,
        Variant::PawelHash,
        Variant::AstralHash,
        Variant::PadiHash,
        Variant::JeongHash,
        Variant::GlobalHash,
        Variant::DesertHash,
        Variant::ArcticHash,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Variant::X11 => "X11",
            Variant::X13 => "X13",
            Variant::X14 => "X14",
            Variant::X15 => "X15",
            Variant::X17 => "X17",
            Variant::Nist5 => "NIST5",
            Variant::Quark => "Quark",
            Variant::SkunkHash5 => "SkunkHash5",
            Variant::Qubit => "Qubit",
            Variant::Groestl => "Groestl",
            Variant::Skein => "Skein",
            Variant::TimeTravel => "TimeTravel",
            Variant::Hmq1725 => "HMQ1725",
            Variant::Xevan => "XEVAN",
            Variant::X16r => "X16R",
            Variant::PawelHash => "PawelHash",
            Variant::AstralHash => "AstralHash",
            Variant::PadiHash => "PadiHash",
            Variant::JeongHash => "JeongHash",
            Variant::GlobalHash => "GlobalHash",
            Variant::DesertHash => "DesertHash",
            Variant::ArcticHash => "ArcticHash",
        }
    }

    /// Shared chain definition of this variant
    pub fn chain(self) -> &'static ChainSpec {
        &catalog()[self as usize]
    }

    /// Context the variant needs beyond the message, if any
    pub fn required_context(self) -> Option<&'static str> {
        self.chain().selection().required_context()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = Error;

    /// Case-insensitive; `-`, `_` and spaces are ignored, and a trailing
    /// "hash" may be dropped (`pawel`, `skunk5`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        let found = match wanted.as_str() {
            "hmq" => Some(Variant::Hmq1725),
            "skunk" | "skunkhash" => Some(Variant::SkunkHash5),
            "hashtimetravel" => Some(Variant::TimeTravel),
            _ => Variant::ALL.into_iter().find(|variant| {
                let name = normalize(variant.name());
                name == wanted || name.replace("hash", "") == wanted
            }),
        };
        found.ok_or_else(|| Error::UnknownVariant(s.to_string()))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

fn catalog() -> &'static [ChainSpec] {
    static CATALOG: OnceLock<Vec<ChainSpec>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let chains: Vec<ChainSpec> = Variant::ALL.into_iter().map(build).collect();
        tracing::debug!(variants = chains.len(), "variant catalog initialised");
        chains
    })
}

fn build(variant: Variant) -> ChainSpec {
    use segments::*;

    let name = variant.name();
    let chain = ChainSpec::builder(name);
    match variant {
        Variant::X11 => chain.then(&X17[..11]).build(),
        Variant::X13 => chain.then(&X17[..13]).build(),
        Variant::X14 => chain.then(&X17[..14]).build(),
        Variant::X15 => chain.then(&X17[..15]).build(),
        Variant::X17 => chain.then(&X17).build(),
        Variant::Nist5 => chain.then(&NIST5).build(),
        Variant::SkunkHash5 => chain.then(&SKUNK).build(),
        Variant::Qubit => chain.then(&QUBIT).build(),
        Variant::Groestl => chain
            .then(&GROESTL_ONLY)
            .finalizer(Finalizer::Sha256)
            .build(),
        Variant::Skein => chain.then(&SKEIN_ONLY).finalizer(Finalizer::Sha256).build(),
        Variant::Xevan => chain
            .then(&X17)
            .then(&X17)
            .link_width(LinkWidth::Wide)
            .build(),
        Variant::Quark => ChainSpec::new(
            name,
            Selection::Conditional(QUARK.to_vec()),
            LinkWidth::Narrow,
            Finalizer::Truncate,
        ),
        Variant::Hmq1725 => ChainSpec::new(
            name,
            Selection::Conditional(HMQ1725.to_vec()),
            LinkWidth::Narrow,
            Finalizer::Truncate,
        ),
        Variant::X16r => ChainSpec::new(
            name,
            Selection::Nibble(NibbleSelector::new(
                NIBBLE_WINDOW_START,
                NIBBLE_WINDOW_STEPS,
            )),
            LinkWidth::Narrow,
            Finalizer::Truncate,
        ),
        Variant::TimeTravel => ChainSpec::new(
            name,
            Selection::Permutation(PermutationSelector::new(
                TIMETRAVEL.to_vec(),
                TIMETRAVEL_BASE_TIMESTAMP,
                TIMETRAVEL_PERMUTATIONS,
            )),
            LinkWidth::Narrow,
            Finalizer::Truncate,
        ),
        Variant::PawelHash => chain.then(&PAWEL_A).then(&PAWEL_B).build(),
        Variant::AstralHash => chain
            .then(&ASTRAL_A)
            .then(&ASTRAL_B)
            .then(&ASTRAL_C)
            .build(),
        Variant::PadiHash => chain
            .then(&PADI)
            .then(&PADI)
            .then_reversed(&PADI)
            .then(&[JH, BMW])
            .build(),
        Variant::JeongHash => chain
            .then(&JEONG)
            .then_reversed(&JEONG)
            .then(&JEONG)
            .then_reversed(&JEONG)
            .then(&JEONG)
            .then(&[BMW, BLAKE, GOST])
            .build(),
        Variant::GlobalHash => chain
            .then(&GLOBAL)
            .then(&ASTRAL_C)
            .then(&PADI)
            .then_reversed(&JEONG)
            .then(&[BMW, JH])
            .then(&[BMW, SHABAL, BLAKE])
            .then(&ARCTIC_A)
            .build(),
        Variant::DesertHash => chain
            .then(&DESERT_A)
            .then(&DESERT_B)
            .then(&DESERT_C)
            .then(&[BMW, JH])
            .then(&JEONG)
            .then(&JEONG)
            .then_reversed(&JEONG)
            .then_reversed(&JEONG)
            .then(&JEONG)
            .then(&[BMW, SHABAL, BLAKE])
            .build(),
        Variant::ArcticHash => chain
            .then(&ARCTIC_A)
            .then(&ARCTIC_B)
            .then(&ARCTIC_C)
            .then(&ARCTIC_D)
            .then(&ARCTIC_E)
            .build(),
    }
}

/// Primitive runs shared between variants
pub mod segments {
    use crate::params::{HMQ1725_MASK, QUARK_MASK};
    use crate::primitive::Primitive;
    use crate::selector::Step;

    pub const BLAKE: Primitive = Primitive::Blake;
    pub const BMW: Primitive = Primitive::Bmw;
    pub const GROESTL: Primitive = Primitive::Groestl;
    pub const JH: Primitive = Primitive::Jh;
    pub const KECCAK: Primitive = Primitive::Keccak;
    pub const SKEIN: Primitive = Primitive::Skein;
    pub const LUFFA: Primitive = Primitive::Luffa;
    pub const CUBEHASH: Primitive = Primitive::CubeHash;
    pub const SHAVITE: Primitive = Primitive::Shavite;
    pub const SIMD: Primitive = Primitive::Simd;
    pub const ECHO: Primitive = Primitive::Echo;
    pub const HAMSI: Primitive = Primitive::Hamsi;
    pub const FUGUE: Primitive = Primitive::Fugue;
    pub const SHABAL: Primitive = Primitive::Shabal;
    pub const WHIRLPOOL: Primitive = Primitive::Whirlpool;
    pub const SHA512: Primitive = Primitive::Sha512;
    pub const HAVAL: Primitive = Primitive::Haval;
    pub const GOST: Primitive = Primitive::Gost;

    /// X17 order; X11, X13, X14 and X15 are its prefixes
    pub const X17: [Primitive; 17] = [
        BLAKE, BMW, GROESTL, SKEIN, JH, KECCAK, LUFFA, CUBEHASH, SHAVITE, SIMD, ECHO, HAMSI,
        FUGUE, SHABAL, WHIRLPOOL, SHA512, HAVAL,
    ];

    pub const NIST5: [Primitive; 5] = [BLAKE, GROESTL, JH, KECCAK, SKEIN];

    pub const SKUNK: [Primitive; 4] = [SKEIN, CUBEHASH, FUGUE, GOST];

    pub const QUBIT: [Primitive; 5] = [LUFFA, CUBEHASH, SHAVITE, SIMD, ECHO];

    pub const GROESTL_ONLY: [Primitive; 1] = [GROESTL];

    pub const SKEIN_ONLY: [Primitive; 1] = [SKEIN];

    /// Permutation elements 0 to 9 of TimeTravel
    pub const TIMETRAVEL: [Primitive; 10] = [
        BLAKE, BMW, GROESTL, SKEIN, JH, KECCAK, LUFFA, CUBEHASH, SHAVITE, SIMD,
    ];

    pub const QUARK: [Step; 9] = [
        Step::fixed(BLAKE),
        Step::fixed(BMW),
        Step::branch(QUARK_MASK, GROESTL, SKEIN),
        Step::fixed(GROESTL),
        Step::fixed(JH),
        Step::branch(QUARK_MASK, BLAKE, BMW),
        Step::fixed(KECCAK),
        Step::fixed(SKEIN),
        Step::branch(QUARK_MASK, KECCAK, JH),
    ];

    pub const HMQ1725: [Step; 25] = [
        Step::fixed(BMW),
        Step::fixed(WHIRLPOOL),
        Step::branch(HMQ1725_MASK, GROESTL, SKEIN),
        Step::fixed(JH),
        Step::fixed(KECCAK),
        Step::branch(HMQ1725_MASK, BLAKE, BMW),
        Step::fixed(LUFFA),
        Step::fixed(CUBEHASH),
        Step::branch(HMQ1725_MASK, KECCAK, JH),
        Step::fixed(SHAVITE),
        Step::fixed(SIMD),
        Step::branch(HMQ1725_MASK, WHIRLPOOL, HAVAL),
        Step::fixed(ECHO),
        Step::fixed(BLAKE),
        Step::branch(HMQ1725_MASK, SHAVITE, LUFFA),
        Step::fixed(HAMSI),
        Step::fixed(FUGUE),
        Step::branch(HMQ1725_MASK, ECHO, SIMD),
        Step::fixed(SHABAL),
        Step::fixed(WHIRLPOOL),
        Step::branch(HMQ1725_MASK, FUGUE, SHA512),
        Step::fixed(GROESTL),
        Step::fixed(SHA512),
        Step::branch(HMQ1725_MASK, HAVAL, WHIRLPOOL),
        Step::fixed(BMW),
    ];

    pub const PAWEL_A: [Primitive; 12] = [
        FUGUE, SHA512, SKEIN, JH, KECCAK, LUFFA, WHIRLPOOL, SHABAL, ECHO, GROESTL, HAVAL, BMW,
    ];

    pub const PAWEL_B: [Primitive; 7] = [ECHO, FUGUE, BMW, GOST, SHABAL, WHIRLPOOL, GROESTL];

    pub const ASTRAL_A: [Primitive; 13] = [
        LUFFA, SKEIN, ECHO, WHIRLPOOL, BMW, BLAKE, SHAVITE, SKEIN, WHIRLPOOL, FUGUE, HAMSI,
        HAVAL, SHA512,
    ];

    pub const ASTRAL_B: [Primitive; 13] = [
        WHIRLPOOL, BMW, SKEIN, HAMSI, ECHO, BLAKE, LUFFA, FUGUE, HAVAL, SHAVITE, SKEIN, SHA512,
        LUFFA,
    ];

    /// Last third of AstralHash, reused by GlobalHash
    pub const ASTRAL_C: [Primitive; 13] = [
        HAMSI, WHIRLPOOL, BMW, SKEIN, BLAKE, LUFFA, HAMSI, FUGUE, HAVAL, SHAVITE, SKEIN, SHA512,
        ECHO,
    ];

    /// PadiHash runs this forward, forward again, then reversed
    pub const PADI: [Primitive; 8] = [SHA512, JH, LUFFA, ECHO, BMW, HAVAL, CUBEHASH, SHABAL];

    /// JeongHash alternates this forward and reversed
    pub const JEONG: [Primitive; 8] = [SIMD, HAMSI, SHABAL, BLAKE, BMW, SHA512, WHIRLPOOL, SKEIN];

    pub const GLOBAL: [Primitive; 7] = [ECHO, FUGUE, BMW, SHA512, SHABAL, WHIRLPOOL, GROESTL];

    pub const DESERT_A: [Primitive; 8] = [SHA512, ECHO, JH, LUFFA, HAVAL, BMW, SHABAL, CUBEHASH];

    pub const DESERT_B: [Primitive; 8] = [LUFFA, SHA512, JH, CUBEHASH, ECHO, HAVAL, BMW, SHABAL];

    pub const DESERT_C: [Primitive; 8] = [BMW, SHABAL, CUBEHASH, ECHO, LUFFA, JH, SHA512, HAVAL];

    /// Opening of ArcticHash, reused as the tail of GlobalHash
    pub const ARCTIC_A: [Primitive; 12] = [
        KECCAK, FUGUE, SHABAL, SKEIN, JH, LUFFA, WHIRLPOOL, GROESTL, ECHO, SHA512, HAVAL, BMW,
    ];

    pub const ARCTIC_B: [Primitive; 7] = [SHA512, ECHO, FUGUE, BMW, GROESTL, SHABAL, WHIRLPOOL];

    pub const ARCTIC_C: [Primitive; 13] = [
        LUFFA, ECHO, SKEIN, BLAKE, WHIRLPOOL, BMW, FUGUE, SHAVITE, SKEIN, WHIRLPOOL, SHA512,
        HAMSI, HAVAL,
    ];

    pub const ARCTIC_D: [Primitive; 13] = [
        HAMSI, BMW, SKEIN, LUFFA, ECHO, WHIRLPOOL, BLAKE, HAVAL, FUGUE, SHAVITE, SHA512, LUFFA,
        SKEIN,
    ];

    pub const ARCTIC_E: [Primitive; 13] = [
        HAMSI, WHIRLPOOL, BMW, SKEIN, HAVAL, LUFFA, HAMSI, FUGUE, ECHO, SHAVITE, SHA512, BLAKE,
        SKEIN,
    ];
}
