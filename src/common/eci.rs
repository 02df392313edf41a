use std::hash::{Hash, Hasher};

use encoding_rs::{
    Encoding, BIG5, EUC_KR, GB18030, GBK, ISO_8859_10, ISO_8859_13, ISO_8859_14, ISO_8859_15,
    ISO_8859_16, ISO_8859_2, ISO_8859_3, ISO_8859_4, ISO_8859_5, ISO_8859_6, ISO_8859_7,
    ISO_8859_8, SHIFT_JIS, UTF_8, WINDOWS_1250, WINDOWS_1251, WINDOWS_1252, WINDOWS_1254,
    WINDOWS_1256, WINDOWS_874,
};

use crate::common::error::{SymbolError, SymbolResult};

// Charset
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Charset {
    Latin1,
    Ascii,
    Whatwg(&'static Encoding),
    // Windows superset standing in for an ISO-8859 part missing from the WHATWG
    // set; anything landing in 0x80-0x9F is not part of the ISO charset
    IsoSuperset(&'static Encoding),
    // GB 2312 through the GBK encoder, restricted to the EUC-CN rows
    Gb2312,
    Utf16Be,
    Utf16Le,
    Utf32Be,
    Utf32Le,
}

impl Charset {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Latin1 => "ISO-8859-1",
            Self::Ascii => "US-ASCII",
            Self::Whatwg(enc) | Self::IsoSuperset(enc) => enc.name(),
            Self::Gb2312 => "GB2312",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf32Be => "UTF-32BE",
            Self::Utf32Le => "UTF-32LE",
        }
    }

    /// Encodes `text`, or `None` if any character would be lost.
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        match self {
            Self::Latin1 => encoding_rs::mem::is_str_latin1(text)
                .then(|| encoding_rs::mem::encode_latin1_lossy(text).into_owned()),
            Self::Ascii => text.is_ascii().then(|| text.as_bytes().to_vec()),
            Self::Whatwg(enc) => {
                let (bytes, _, had_errors) = enc.encode(text);
                (!had_errors).then(|| bytes.into_owned())
            }
            Self::IsoSuperset(enc) => {
                let (bytes, _, had_errors) = enc.encode(text);
                let in_c1 = bytes.iter().any(|b| (0x80..=0x9F).contains(b));
                (!had_errors && !in_c1).then(|| bytes.into_owned())
            }
            Self::Gb2312 => {
                let (bytes, _, had_errors) = GBK.encode(text);
                (!had_errors && is_euc_cn(&bytes)).then(|| bytes.into_owned())
            }
            Self::Utf16Be => Some(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Self::Utf16Le => Some(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Utf32Be => Some(text.chars().flat_map(|c| (c as u32).to_be_bytes()).collect()),
            Self::Utf32Le => Some(text.chars().flat_map(|c| (c as u32).to_le_bytes()).collect()),
        }
    }

    pub fn can_encode(&self, text: &str) -> bool {
        match self {
            Self::Latin1 => encoding_rs::mem::is_str_latin1(text),
            Self::Ascii => text.is_ascii(),
            _ => self.encode(text).is_some(),
        }
    }
}

// Single bytes are ASCII; pairs need a lead in rows 0xA1-0xA9 or 0xB0-0xF7
// and a trail in 0xA1-0xFE
fn is_euc_cn(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] < 0x80 {
            i += 1;
            continue;
        }
        let (lead, trail) = (bytes[i], bytes.get(i + 1).copied().unwrap_or(0));
        if !matches!(lead, 0xA1..=0xA9 | 0xB0..=0xF7) || !(0xA1..=0xFE).contains(&trail) {
            return false;
        }
        i += 2;
    }
    true
}


// ECI
//------------------------------------------------------------------------------

/// ECI mode number plus the charset it designates. Two selections are equal
/// when their mode numbers are, whatever charset objects they carry.
#[derive(Debug, Copy, Clone)]
pub struct Eci {
    mode: i32,
    charset: Option<Charset>,
}

impl PartialEq for Eci {
    fn eq(&self, other: &Self) -> bool {
        self.mode == other.mode
    }
}

impl Eq for Eci {}

impl Hash for Eci {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.mode.hash(state);
    }
}

impl Eci {
    pub const NONE: Self = Self { mode: -1, charset: None };

    /// Single-byte regional charsets first, then the CJK multi-byte sets, and
    /// UTF-8 as the last resort. GB 18030 covers all of Unicode and would
    /// shadow UTF-8, so it is only used when asked for.
    pub const DEFAULT_PRIORITY: &'static [u32] =
        &[3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 15, 16, 17, 18, 20, 21, 22, 23, 24, 28, 29, 30, 31, 26];

    /// Highest mode an ECI designator can carry.
    pub const MAX_MODE: u32 = 999_999;

    pub fn new(mode: u32, charset: Charset) -> SymbolResult<Self> {
        if mode > Self::MAX_MODE {
            return Err(SymbolError::InvalidEci(mode));
        }
        Ok(Self { mode: mode as i32, charset: Some(charset) })
    }

    /// Standard AIM ECI assignment for `mode`, if it designates a charset.
    pub fn from_mode(mode: u32) -> Option<Self> {
        let charset = match mode {
            3 => Charset::Latin1,
            4 => Charset::Whatwg(ISO_8859_2),
            5 => Charset::Whatwg(ISO_8859_3),
            6 => Charset::Whatwg(ISO_8859_4),
            7 => Charset::Whatwg(ISO_8859_5),
            8 => Charset::Whatwg(ISO_8859_6),
            9 => Charset::Whatwg(ISO_8859_7),
            10 => Charset::Whatwg(ISO_8859_8),
            11 => Charset::IsoSuperset(WINDOWS_1254),
            12 => Charset::Whatwg(ISO_8859_10),
            13 => Charset::IsoSuperset(WINDOWS_874),
            15 => Charset::Whatwg(ISO_8859_13),
            16 => Charset::Whatwg(ISO_8859_14),
            17 => Charset::Whatwg(ISO_8859_15),
            18 => Charset::Whatwg(ISO_8859_16),
            20 => Charset::Whatwg(SHIFT_JIS),
            21 => Charset::Whatwg(WINDOWS_1250),
            22 => Charset::Whatwg(WINDOWS_1251),
            23 => Charset::Whatwg(WINDOWS_1252),
            24 => Charset::Whatwg(WINDOWS_1256),
            25 => Charset::Utf16Be,
            26 => Charset::Whatwg(UTF_8),
            27 => Charset::Ascii,
            28 => Charset::Whatwg(BIG5),
            29 => Charset::Gb2312,
            31 => Charset::Whatwg(GBK),
            30 => Charset::Whatwg(EUC_KR),
            32 => Charset::Whatwg(GB18030),
            33 => Charset::Utf16Le,
            34 => Charset::Utf32Be,
            35 => Charset::Utf32Le,
            _ => return None,
        };
        Some(Self { mode: mode as i32, charset: Some(charset) })
    }

    pub fn defaults() -> Vec<Self> {
        Self::DEFAULT_PRIORITY.iter().filter_map(|&m| Self::from_mode(m)).collect()
    }

    pub fn mode(&self) -> i32 {
        self.mode
    }

    pub fn charset(&self) -> Option<Charset> {
        self.charset
    }

    pub fn is_none(&self) -> bool {
        self.mode < 0
    }

    /// First candidate able to carry `text` losslessly, in the caller's order.
    pub fn choose(text: &str, candidates: &[Eci]) -> Eci {
        candidates
            .iter()
            .find(|eci| eci.charset.is_some_and(|cs| cs.can_encode(text)))
            .copied()
            .unwrap_or(Self::NONE)
    }

    /// Bytes of `text` in this ECI's charset, falling back to `default` for NONE.
    pub fn encode(&self, text: &str, default: Charset) -> Option<Vec<u8>> {
        self.charset.unwrap_or(default).encode(text)
    }
}

/// Picks the ECI for `text`: NONE when `default` already suffices, otherwise
/// the first lossless candidate.
pub fn select(text: &str, default: Charset, candidates: &[Eci]) -> SymbolResult<Eci> {
    if default.can_encode(text) {
        return Ok(Eci::NONE);
    }

    let eci = Eci::choose(text, candidates);
    if eci.is_none() {
        return Err(SymbolError::UnencodableCharacter(first_unencodable(text, default, candidates)));
    }

    log::debug!("Selected ECI {} ({})", eci.mode, eci.charset.map_or("none", |cs| cs.name()));
    Ok(eci)
}

// The first character no candidate carries on its own, or else the first the
// default charset cannot carry
fn first_unencodable(text: &str, default: Charset, candidates: &[Eci]) -> char {
    let mut buf = [0u8; 4];
    let mut fallback = None;
    for c in text.chars() {
        let s: &str = c.encode_utf8(&mut buf);
        if default.can_encode(s) {
            continue;
        }
        fallback.get_or_insert(c);
        if Eci::choose(s, candidates).is_none() {
            return c;
        }
    }
    fallback.unwrap_or(char::REPLACEMENT_CHARACTER)
}
