use thiserror::Error;

// Error kind
//------------------------------------------------------------------------------

/// Coarse classification of every [`SymbolError`].
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorKind {
    /// Malformed input: GS1 syntax, unknown AI, bad escape, unencodable text.
    InputValidation,
    /// Payload does not fit the requested (or any) version/size.
    Capacity,
    /// Options that contradict each other or the chosen template.
    Configuration,
}

// GS1 error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Gs1Error {
    #[error("unmatched bracket at position {0}")]
    BracketMismatch(usize),
    #[error("nested bracket at position {0}")]
    NestedBracket(usize),
    #[error("data does not start with an AI")]
    MissingLeadingAi,
    #[error("AI \"{0}\" is too short (minimum 2 digits)")]
    AiTooShort(String),
    #[error("AI \"{0}\" is too long (maximum 4 digits)")]
    AiTooLong(String),
    #[error("AI \"{0}\" is not numeric")]
    NonNumericAi(String),
    #[error("unknown AI ({0})")]
    UnknownAi(String),
    #[error("invalid data length for AI ({ai}): {len} characters, expected {min} to {max}")]
    BadDataLength { ai: String, len: usize, min: usize, max: usize },
    #[error("invalid character {ch:?} in AI ({ai}) data, expected {class}")]
    BadCharacter { ai: String, ch: char, class: &'static str },
}

// Symbol error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SymbolError {
    // Input validation
    #[error("empty data")]
    EmptyData,
    #[error("invalid GS1 data: {0}")]
    Gs1(#[from] Gs1Error),
    #[error("unrecognized escape sequence \"{0}\"")]
    InvalidEscape(String),
    #[error("invalid character {ch:?} for {context}")]
    InvalidChar { ch: char, context: &'static str },
    #[error("no character set can encode {0:?}")]
    UnencodableCharacter(char),
    #[error("input too long for {context}: {len} characters, maximum {max}")]
    InputTooLong { context: &'static str, len: usize, max: usize },

    // Capacity
    #[error("data too long for the specified version/size {0}")]
    DataTooLongForVersion(usize),
    #[error("data too long: no version/size large enough")]
    DataTooLong,
    #[error("structured append needs {needed} symbols, at most {max} are allowed")]
    TooManySegments { needed: usize, max: usize },

    // Configuration
    #[error("invalid version/size {0}")]
    InvalidVersion(usize),
    #[error("invalid error correction level {0}")]
    InvalidEccLevel(usize),
    #[error("invalid ECI mode {0}")]
    InvalidEci(u32),
    #[error("invalid structured append message id {0}")]
    InvalidMessageId(u32),
    #[error("structured append requires a fixed version/size")]
    TemplateNotFixed,
    #[error("template too small to hold both data and structured-append metadata")]
    TemplateTooSmall,
    #[error("{0} cannot be combined with {1}")]
    IncompatibleOptions(&'static str, &'static str),
}

impl SymbolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyData
            | Self::Gs1(_)
            | Self::InvalidEscape(_)
            | Self::InvalidChar { .. }
            | Self::UnencodableCharacter(_)
            | Self::InputTooLong { .. } => ErrorKind::InputValidation,
            Self::DataTooLongForVersion(_) | Self::DataTooLong | Self::TooManySegments { .. } => {
                ErrorKind::Capacity
            }
            Self::InvalidVersion(_)
            | Self::InvalidEccLevel(_)
            | Self::InvalidEci(_)
            | Self::InvalidMessageId(_)
            | Self::TemplateNotFixed
            | Self::TemplateTooSmall
            | Self::IncompatibleOptions(..) => ErrorKind::Configuration,
        }
    }
}

pub type SymbolResult<T> = Result<T, SymbolError>;
