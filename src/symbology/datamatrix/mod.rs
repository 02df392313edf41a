//! Data Matrix ECC200.
//!
//! Codewords are assembled in ASCII or Base 256 encodation behind the function
//! codeword header, padded to the chosen size, protected by Reed-Solomon over
//! GF(256)/0x12D and placed with the diagonal "utah" layout. Dark modules are
//! emitted as one rectangle per horizontal run.

mod encoder;
mod placement;
mod sizes;

pub use encoder::{ascii, base256, eci_designator, encode_data, header, pad, MAX_FILE_ID, MAX_SEGMENTS};
pub use sizes::{DmShape, DmSize, SIZES};

use crate::{
    builder::{Content, SegmentInfo, Shape, Symbol},
    common::{
        append::AppendTemplate,
        ec::{interleave, stripe, GaloisField, ReedSolomon},
        error::{SymbolError, SymbolResult},
        metadata::{DataType, EncodeOptions, Payload, VersionCandidate},
        version::VersionSelector,
    },
    symbology::SymbolEncoder,
};

/// Only ECC level Data Matrix defines
pub const ECC200: usize = 200;

// Data Matrix
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub struct DataMatrix {
    shape: DmShape,
}

impl DataMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shape(mut self, shape: DmShape) -> Self {
        self.shape = shape;
        self
    }
}

impl SymbolEncoder for DataMatrix {
    fn name(&self) -> &'static str {
        "Data Matrix"
    }

    // A preferred size is honoured whatever the shape preference
    fn candidates(&self, opts: &EncodeOptions) -> Vec<VersionCandidate> {
        match opts.version {
            Some(_) => SIZES.iter().map(DmSize::candidate).collect(),
            None => sizes::candidates(self.shape),
        }
    }

    fn encode(&self, payload: &Payload, opts: &EncodeOptions, segment: Option<SegmentInfo>) -> SymbolResult<Symbol> {
        if let Some(ecc) = opts.ecc.filter(|&e| e != ECC200) {
            return Err(SymbolError::InvalidEccLevel(ecc));
        }

        let gs1 = opts.data_type == DataType::Gs1;
        let prefix = header(opts.reader_init, gs1, payload.eci, segment)?;
        let data = encode_data(&payload.tokens, prefix.len(), segment.is_some());
        let base256 = data.first() == Some(&encoder::LATCH_BASE256);

        let candidates = self.candidates(opts);
        let selection = VersionSelector::new(&candidates)
            .preferred(opts.version)
            .prefix(prefix)
            .select(|_| Ok(data.clone()))?;
        let version = selection.candidate.version;
        let size = DmSize::by_id(version).ok_or(SymbolError::InvalidVersion(version))?;

        let data_len = selection.codewords.len();
        let mut codewords = selection.codewords;
        pad(&mut codewords, size.data);

        let rs = ReedSolomon::with_first_root(GaloisField::data_matrix(), size.ecc_per_block(), 1);
        let ecc_blocks: Vec<Vec<u16>> = stripe(&codewords, size.blocks).iter().map(|b| rs.encode(&b[..])).collect();
        codewords.extend(interleave(&ecc_blocks));

        let grid = placement::modules(&codewords, size);
        let mut symbol = Symbol::new(self.name(), size.id, size.cols, size.rows, Content::Codewords(codewords))
            .with_quiet_zone(1)
            .with_segment(segment);
        for (y, row) in grid.chunks(size.cols).enumerate() {
            for (x, len) in dark_runs(row) {
                symbol.push_shape(Shape::rect(x as f64, y as f64, len as f64, 1.0));
            }
        }

        symbol.info(format!("Size: {}x{} (id {})", size.rows, size.cols, size.id));
        symbol.info(format!("Encodation: {}", if base256 { "Base 256" } else { "ASCII" }));
        symbol.info(format!("Data codewords: {data_len} of {}", size.data));
        symbol.info(format!("ECC codewords: {} in {} block(s)", size.ecc, size.blocks));
        if !payload.eci.is_none() {
            symbol.info(format!("ECI: {}", payload.eci.mode()));
        }
        if let Some(seg) = segment {
            symbol.info(format!("Structured append: {} of {}", seg.index + 1, seg.total));
        }
        Ok(symbol)
    }

    fn append_template(&self, version: usize, payload: &Payload, opts: &EncodeOptions) -> SymbolResult<AppendTemplate> {
        let size = DmSize::by_id(version).ok_or(SymbolError::InvalidVersion(version))?;
        if payload.has_fnc1() {
            return Err(SymbolError::IncompatibleOptions("FNC1", "structured append"));
        }

        let sample = SegmentInfo { index: 0, total: 2, message_id: opts.message_id };
        let gs1 = opts.data_type == DataType::Gs1;
        let header_len = header(opts.reader_init, gs1, payload.eci, Some(sample))?.len();
        let room = size.data.saturating_sub(header_len);
        let overhead = header_len + encoder::base256_overhead(room.saturating_sub(2));

        Ok(AppendTemplate {
            candidate: size.candidate(),
            overhead,
            max_segments: MAX_SEGMENTS,
            message_ids: 1..=MAX_FILE_ID,
        })
    }
}

// (start, length) of every run of dark modules
fn dark_runs(row: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (x, &dark) in row.iter().chain([&false]).enumerate() {
        match (dark, start) {
            (true, None) => start = Some(x),
            (false, Some(s)) => {
                runs.push((s, x - s));
                start = None;
            }
            _ => (),
        }
    }
    runs
}
