pub mod datamatrix;

pub use datamatrix::{DataMatrix, DmShape};

use crate::{
    builder::{SegmentInfo, Symbol},
    common::{
        append::AppendTemplate,
        eci::Charset,
        error::{SymbolError, SymbolResult},
        metadata::{EncodeOptions, Payload, VersionCandidate},
    },
};

// Symbol encoder
//------------------------------------------------------------------------------

/// Capability interface of a symbology family. The shared pipeline prepares
/// the payload; the encoder only assembles codewords and lays out modules.
pub trait SymbolEncoder {
    fn name(&self) -> &'static str;

    /// Version/size table in ascending capacity, filtered by any shape option.
    fn candidates(&self, opts: &EncodeOptions) -> Vec<VersionCandidate>;

    /// Charset text is encoded in when no ECI indicator is present.
    fn default_charset(&self) -> Charset {
        Charset::Latin1
    }

    fn encode(&self, payload: &Payload, opts: &EncodeOptions, segment: Option<SegmentInfo>) -> SymbolResult<Symbol>;

    /// Layout every structured-append segment reuses at `version`.
    fn append_template(&self, _version: usize, _payload: &Payload, _opts: &EncodeOptions) -> SymbolResult<AppendTemplate> {
        Err(SymbolError::IncompatibleOptions(self.name(), "structured append"))
    }
}

// Symbology
//------------------------------------------------------------------------------

/// Closed set of symbology families built into the crate.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Symbology {
    DataMatrix(DataMatrix),
}

impl From<DataMatrix> for Symbology {
    fn from(dm: DataMatrix) -> Self {
        Self::DataMatrix(dm)
    }
}

impl SymbolEncoder for Symbology {
    fn name(&self) -> &'static str {
        match self {
            Self::DataMatrix(dm) => dm.name(),
        }
    }

    fn candidates(&self, opts: &EncodeOptions) -> Vec<VersionCandidate> {
        match self {
            Self::DataMatrix(dm) => dm.candidates(opts),
        }
    }

    fn default_charset(&self) -> Charset {
        match self {
            Self::DataMatrix(dm) => dm.default_charset(),
        }
    }

    fn encode(&self, payload: &Payload, opts: &EncodeOptions, segment: Option<SegmentInfo>) -> SymbolResult<Symbol> {
        match self {
            Self::DataMatrix(dm) => dm.encode(payload, opts, segment),
        }
    }

    fn append_template(&self, version: usize, payload: &Payload, opts: &EncodeOptions) -> SymbolResult<AppendTemplate> {
        match self {
            Self::DataMatrix(dm) => dm.append_template(version, payload, opts),
        }
    }
}
