mod render;
mod symbol;

pub use symbol::{Content, SegmentInfo, Shape, Symbol, TextAlign};

use log::debug;

use crate::{
    common::{
        append,
        eci::{self, Charset, Eci},
        error::{SymbolError, SymbolResult},
        escape::{unescape, EscapeMode, Unit},
        gs1::Gs1Message,
        hibc,
        metadata::{DataType, EciPolicy, EncodeOptions, Payload, Token},
    },
    symbology::{SymbolEncoder, Symbology},
};

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
enum Input<'a> {
    Text(&'a str),
    Bytes(&'a [u8]),
}

impl Input<'_> {
    fn is_empty(&self) -> bool {
        match self {
            Self::Text(t) => t.is_empty(),
            Self::Bytes(b) => b.is_empty(),
        }
    }
}

// Symbol builder
//------------------------------------------------------------------------------

pub struct SymbolBuilder<'a> {
    symbology: Symbology,
    input: Input<'a>,
    options: EncodeOptions,
}

impl<'a> SymbolBuilder<'a> {
    pub fn new(symbology: impl Into<Symbology>, data: &'a str) -> Self {
        Self { symbology: symbology.into(), input: Input::Text(data), options: EncodeOptions::default() }
    }

    /// Binary input, encoded byte for byte without charset conversion.
    pub fn from_bytes(symbology: impl Into<Symbology>, data: &'a [u8]) -> Self {
        Self { symbology: symbology.into(), input: Input::Bytes(data), options: EncodeOptions::default() }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.input = Input::Text(data);
        self
    }

    pub fn bytes(&mut self, data: &'a [u8]) -> &mut Self {
        self.input = Input::Bytes(data);
        self
    }

    pub fn symbology(&mut self, symbology: impl Into<Symbology>) -> &mut Self {
        self.symbology = symbology.into();
        self
    }

    /// Preferred version/size, 0 for automatic selection.
    pub fn version(&mut self, version: usize) -> &mut Self {
        self.options.version = (version != 0).then_some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.options.version = None;
        self
    }

    /// Preferred error correction level, 0 for the symbology default.
    pub fn ecc(&mut self, ecc: usize) -> &mut Self {
        self.options.ecc = (ecc != 0).then_some(ecc);
        self
    }

    pub fn data_type(&mut self, data_type: DataType) -> &mut Self {
        self.options.data_type = data_type;
        self
    }

    pub fn reader_init(&mut self, reader_init: bool) -> &mut Self {
        self.options.reader_init = reader_init;
        self
    }

    pub fn eci(&mut self, eci: EciPolicy) -> &mut Self {
        self.options.eci = eci;
        self
    }

    pub fn eci_candidates(&mut self, candidates: Vec<Eci>) -> &mut Self {
        self.options.eci_candidates = candidates;
        self
    }

    pub fn escape(&mut self, mode: EscapeMode) -> &mut Self {
        self.options.escape = Some(mode);
        self
    }

    pub fn message_id(&mut self, id: u32) -> &mut Self {
        self.options.message_id = Some(id);
        self
    }

    pub fn options(&mut self, options: EncodeOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn metadata(&self) -> String {
        let opt = |v: Option<usize>| v.map_or("None".to_string(), |v| v.to_string());
        format!(
            "{{ Symbology: {}, Version: {}, Ecc: {}, Data type: {:?} }}",
            self.symbology.name(),
            opt(self.options.version),
            opt(self.options.ecc),
            self.options.data_type
        )
    }
}

#[cfg(test)]
mod builder_util_tests {
    use super::SymbolBuilder;
    use crate::{common::metadata::DataType, symbology::DataMatrix};

    #[test]
    fn test_metadata() {
        let mut builder = SymbolBuilder::new(DataMatrix::new(), "Hello, world!");
        builder.version(3).ecc(200).data_type(DataType::Gs1);
        assert_eq!(builder.metadata(), "{ Symbology: Data Matrix, Version: 3, Ecc: 200, Data type: Gs1 }");
        builder.version(0).ecc(0).data_type(DataType::Eci);
        assert_eq!(builder.metadata(), "{ Symbology: Data Matrix, Version: None, Ecc: None, Data type: Eci }");
    }
}

// Build
//------------------------------------------------------------------------------

impl SymbolBuilder<'_> {
    pub fn build(&self) -> SymbolResult<Symbol> {
        debug!("Generating {}...", self.metadata());
        let payload = self.prepare()?;
        self.symbology.encode(&payload, &self.options, None)
    }

    /// Splits the payload across a structured-append sequence at the fixed
    /// version. A payload that fits one symbol comes back as a single plain
    /// symbol; empty input gives an empty sequence.
    pub fn build_sequence(&self) -> SymbolResult<Vec<Symbol>> {
        debug!("Generating sequence {}...", self.metadata());
        let version = self.options.version.ok_or(SymbolError::TemplateNotFixed)?;
        if self.options.data_type == DataType::Gs1 {
            return Err(SymbolError::IncompatibleOptions("GS1", "structured append"));
        }

        let payload = if self.input.is_empty() { Payload::new(Vec::new(), Eci::NONE) } else { self.prepare()? };
        let template = self.symbology.append_template(version, &payload, &self.options)?;
        let segments = append::plan(&payload.tokens, &template, self.options.message_id)?;
        if segments.len() == 1 {
            return Ok(vec![self.symbology.encode(&payload, &self.options, None)?]);
        }

        segments
            .iter()
            .map(|seg| {
                let info = SegmentInfo { index: seg.index, total: seg.total, message_id: seg.message_id };
                let part = Payload::new(seg.payload.to_vec(), payload.eci);
                self.symbology.encode(&part, &self.options, Some(info)).map_err(|e| match e {
                    SymbolError::DataTooLongForVersion(_) => SymbolError::TemplateTooSmall,
                    e => e,
                })
            })
            .collect()
    }

    /// Escapes, GS1 reduction or HIBC wrapping, then charset encoding.
    pub fn prepare(&self) -> SymbolResult<Payload> {
        if self.input.is_empty() {
            return Err(SymbolError::EmptyData);
        }

        let text = match self.input {
            Input::Text(text) => text,
            Input::Bytes(bytes) => {
                if self.options.data_type != DataType::Eci {
                    return Err(SymbolError::IncompatibleOptions("binary input", "GS1/HIBC data type"));
                }
                return Ok(Payload::new(bytes.iter().map(|&b| Token::Byte(b)).collect(), self.fixed_eci()?));
            }
        };

        let units = match self.options.escape {
            Some(mode) => unescape(text, mode)?,
            None => text.chars().map(Unit::Char).collect(),
        };

        match self.options.data_type {
            DataType::Gs1 => {
                let text = plain_text(&units, "GS1")?;
                let msg = Gs1Message::parse(&text)?;
                let mut tokens = Vec::with_capacity(text.len());
                for (separated, el) in msg.fields() {
                    if separated {
                        tokens.push(Token::Fnc1);
                    }
                    tokens.extend(el.ai.bytes().chain(el.data.bytes()).map(Token::Byte));
                }
                Ok(Payload::new(tokens, self.fixed_eci()?))
            }
            DataType::Hibc => {
                let wrapped = hibc::wrap(&plain_text(&units, "HIBC")?)?;
                Ok(Payload::new(wrapped.bytes().map(Token::Byte).collect(), self.fixed_eci()?))
            }
            DataType::Eci => self.encode_units(&units),
        }
    }

    fn fixed_eci(&self) -> SymbolResult<Eci> {
        match self.options.eci {
            EciPolicy::Mode(m) => Eci::from_mode(m).ok_or(SymbolError::InvalidEci(m)),
            EciPolicy::Auto | EciPolicy::Off => Ok(Eci::NONE),
        }
    }

    fn encode_units(&self, units: &[Unit]) -> SymbolResult<Payload> {
        let default = self.symbology.default_charset();
        let text = chars(units);
        let eci = match self.options.eci {
            EciPolicy::Auto => eci::select(&text, default, &self.options.eci_candidates)?,
            EciPolicy::Mode(m) => Eci::from_mode(m).ok_or(SymbolError::InvalidEci(m))?,
            EciPolicy::Off => Eci::NONE,
        };
        let charset = eci.charset().unwrap_or(default);

        let mut tokens = Vec::with_capacity(units.len());
        for (i, run) in units.split(|u| *u == Unit::Fnc1).enumerate() {
            if i > 0 {
                tokens.push(Token::Fnc1);
            }
            let run = chars(run);
            let bytes = charset
                .encode(&run)
                .ok_or_else(|| SymbolError::UnencodableCharacter(first_unencodable(&run, charset)))?;
            tokens.extend(bytes.into_iter().map(Token::Byte));
        }
        Ok(Payload::new(tokens, eci))
    }
}

fn chars(units: &[Unit]) -> String {
    units.iter().filter_map(|u| if let Unit::Char(c) = u { Some(*c) } else { None }).collect()
}

// GS1 and HIBC input is plain text, an escaped FNC1 has no place in it
fn plain_text(units: &[Unit], context: &'static str) -> SymbolResult<String> {
    units
        .iter()
        .map(|u| match u {
            Unit::Char(c) => Ok(*c),
            Unit::Fnc1 => Err(SymbolError::IncompatibleOptions("FNC1 escape", context)),
        })
        .collect()
}

fn first_unencodable(text: &str, charset: Charset) -> char {
    let mut buf = [0u8; 4];
    text.chars().find(|c| !charset.can_encode(c.encode_utf8(&mut buf))).unwrap_or(char::REPLACEMENT_CHARACTER)
}
