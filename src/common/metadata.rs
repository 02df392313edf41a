use crate::common::{eci::Eci, escape::EscapeMode};

// Data type
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum DataType {
    /// Plain text, with an ECI indicator when the default charset falls short
    #[default]
    Eci,
    /// Bracketed GS1 element strings
    Gs1,
    /// HIBC LIC data, wrapped with flag and check character
    Hibc,
}

// ECI policy
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum EciPolicy {
    /// First lossless candidate, none if the default charset suffices
    #[default]
    Auto,
    /// Always this mode, even if the default charset would do
    Mode(u32),
    /// Never emit an indicator; text must fit the default charset
    Off,
}

// Encode options
//------------------------------------------------------------------------------

/// Cross-cutting options shared by every symbology.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct EncodeOptions {
    pub data_type: DataType,
    pub reader_init: bool,
    /// Preferred version/size, `None` for automatic selection
    pub version: Option<usize>,
    /// Preferred error correction level, `None` for the symbology default
    pub ecc: Option<usize>,
    pub eci: EciPolicy,
    pub eci_candidates: Vec<Eci>,
    /// Escape processing, `None` to take input literally
    pub escape: Option<EscapeMode>,
    /// Structured append message id shared by every symbol of a sequence
    pub message_id: Option<u32>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            data_type: DataType::default(),
            reader_init: false,
            version: None,
            ecc: None,
            eci: EciPolicy::default(),
            eci_candidates: Eci::defaults(),
            escape: None,
            message_id: None,
        }
    }
}

// Version candidate
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct VersionCandidate {
    pub version: usize,
    pub data_capacity: usize,
    pub ecc_capacity: usize,
}

impl VersionCandidate {
    pub const fn new(version: usize, data_capacity: usize, ecc_capacity: usize) -> Self {
        Self { version, data_capacity, ecc_capacity }
    }

    pub fn total_capacity(&self) -> usize {
        self.data_capacity + self.ecc_capacity
    }
}

// ECC requirement
//------------------------------------------------------------------------------

/// Lower bound on check codewords at a candidate.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum EccRequirement {
    /// Whatever the candidate's table entry lists
    #[default]
    Nominal,
    AtLeast(usize),
    /// `ceil(used * percent / 100) + extra` for `used` data codewords
    Percent { percent: usize, extra: usize },
}

impl EccRequirement {
    pub fn required(&self, candidate: &VersionCandidate, used: usize) -> usize {
        match *self {
            Self::Nominal => candidate.ecc_capacity,
            Self::AtLeast(n) => n,
            Self::Percent { percent, extra } => (used * percent).div_ceil(100) + extra,
        }
    }
}

// Token
//------------------------------------------------------------------------------

/// Payload element after escapes, GS1 reduction and charset encoding.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Token {
    Byte(u8),
    Fnc1,
}

impl Token {
    pub fn byte(&self) -> Option<u8> {
        match self {
            Self::Byte(b) => Some(*b),
            Self::Fnc1 => None,
        }
    }
}

/// Prepared input handed to a symbology.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Payload {
    pub tokens: Vec<Token>,
    pub eci: Eci,
}

impl Payload {
    pub fn new(tokens: Vec<Token>, eci: Eci) -> Self {
        Self { tokens, eci }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self { tokens: bytes.iter().copied().map(Token::Byte).collect(), eci: Eci::NONE }
    }

    pub fn has_fnc1(&self) -> bool {
        self.tokens.contains(&Token::Fnc1)
    }
}
