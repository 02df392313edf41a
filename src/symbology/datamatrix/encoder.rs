use crate::{
    builder::SegmentInfo,
    common::{
        eci::Eci,
        error::{SymbolError, SymbolResult},
        metadata::Token,
    },
};

pub const PAD: u16 = 129;
pub const LATCH_BASE256: u16 = 231;
pub const FNC1: u16 = 232;
pub const STRUCTURED_APPEND: u16 = 233;
pub const READER_PROGRAMMING: u16 = 234;
pub const UPPER_SHIFT: u16 = 235;
pub const ECI: u16 = 241;

pub const MAX_ECI: u32 = 999_999;
pub const MAX_FILE_ID: u32 = 254 * 254;
pub const MAX_SEGMENTS: usize = 16;

// Header
//------------------------------------------------------------------------------

/// Leading function codewords: structured append, reader programming or GS1
/// FNC1 first, then the ECI designator.
pub fn header(reader_init: bool, gs1: bool, eci: Eci, segment: Option<SegmentInfo>) -> SymbolResult<Vec<u16>> {
    if reader_init && segment.is_some() {
        return Err(SymbolError::IncompatibleOptions("reader initialisation", "structured append"));
    }
    if reader_init && gs1 {
        return Err(SymbolError::IncompatibleOptions("reader initialisation", "GS1"));
    }
    if gs1 && !eci.is_none() {
        return Err(SymbolError::IncompatibleOptions("ECI", "GS1"));
    }

    let mut res = Vec::with_capacity(8);
    if let Some(seg) = segment {
        res.extend(structured_append(seg)?);
    }
    if reader_init {
        res.push(READER_PROGRAMMING);
    }
    if gs1 {
        res.push(FNC1);
    }
    if !eci.is_none() {
        res.extend(eci_designator(eci.mode() as u32)?);
    }
    Ok(res)
}

fn structured_append(seg: SegmentInfo) -> SymbolResult<[u16; 4]> {
    debug_assert!(seg.index < seg.total, "Segment index {} out of {}", seg.index, seg.total);
    if !(2..=MAX_SEGMENTS).contains(&seg.total) {
        return Err(SymbolError::TooManySegments { needed: seg.total, max: MAX_SEGMENTS });
    }
    let id = seg.message_id.unwrap_or(1);
    if !(1..=MAX_FILE_ID).contains(&id) {
        return Err(SymbolError::InvalidMessageId(id));
    }

    let sequence = ((seg.index << 4) | (17 - seg.total)) as u16;
    let id = id - 1;
    Ok([STRUCTURED_APPEND, sequence, (id / 254 + 1) as u16, (id % 254 + 1) as u16])
}

pub fn eci_designator(mode: u32) -> SymbolResult<Vec<u16>> {
    let n = mode as usize;
    let res = match mode {
        0..=126 => vec![ECI, (n + 1) as u16],
        127..=16382 => vec![ECI, ((n - 127) / 254 + 128) as u16, ((n - 127) % 254 + 1) as u16],
        16383..=MAX_ECI => {
            let n = n - 16383;
            vec![ECI, (n / 64516 + 192) as u16, ((n / 254) % 254 + 1) as u16, (n % 254 + 1) as u16]
        }
        _ => return Err(SymbolError::InvalidEci(mode)),
    };
    Ok(res)
}


// Encodation
//------------------------------------------------------------------------------

/// ASCII encodation: digit pairs, upper shift for bytes above 127.
pub fn ascii(tokens: &[Token]) -> Vec<u16> {
    let mut res = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        match (tokens[i], tokens.get(i + 1)) {
            (Token::Byte(a), Some(Token::Byte(b))) if a.is_ascii_digit() && b.is_ascii_digit() => {
                res.push(130 + ((a - b'0') * 10 + (b - b'0')) as u16);
                i += 2;
                continue;
            }
            (Token::Byte(b), _) if b < 128 => res.push(b as u16 + 1),
            (Token::Byte(b), _) => res.extend([UPPER_SHIFT, (b - 127) as u16]),
            (Token::Fnc1, _) => res.push(FNC1),
        }
        i += 1;
    }
    res
}

/// Base 256 encodation with explicit length. `offset` is the number of
/// codewords ahead of the latch; the 255-state randomization depends on
/// absolute positions.
pub fn base256(bytes: &[u8], offset: usize) -> Vec<u16> {
    let n = bytes.len();
    let mut field = Vec::with_capacity(n + 2);
    if n <= 249 {
        field.push(n as u16);
    } else {
        field.extend([(n / 250 + 249) as u16, (n % 250) as u16]);
    }
    field.extend(bytes.iter().map(|&b| b as u16));

    let mut res = Vec::with_capacity(field.len() + 1);
    res.push(LATCH_BASE256);
    for cw in field {
        let pos = offset + res.len() + 1;
        res.push(randomize_255(cw, pos));
    }
    res
}

/// Codewords spent by a Base 256 field of `len` bytes besides the bytes.
pub fn base256_overhead(len: usize) -> usize {
    if len <= 249 {
        2
    } else {
        3
    }
}

fn randomize_255(cw: u16, pos: usize) -> u16 {
    let tmp = cw as usize + (149 * pos) % 255 + 1;
    (if tmp <= 255 { tmp } else { tmp - 256 }) as u16
}

/// Cheaper of ASCII and Base 256. FNC1 only exists in ASCII, so its presence
/// rules out Base 256 even when forced.
pub fn encode_data(tokens: &[Token], offset: usize, force_base256: bool) -> Vec<u16> {
    let bytes: Option<Vec<u8>> = tokens.iter().map(Token::byte).collect();
    let Some(bytes) = bytes else {
        return ascii(tokens);
    };

    let b256 = base256(&bytes, offset);
    if force_base256 {
        return b256;
    }
    let asc = ascii(tokens);
    if b256.len() < asc.len() {
        b256
    } else {
        asc
    }
}

/// Fills up to `capacity` with 129 and then 253-state randomized pads.
pub fn pad(codewords: &mut Vec<u16>, capacity: usize) {
    if codewords.len() < capacity {
        codewords.push(PAD);
    }
    while codewords.len() < capacity {
        let pos = codewords.len() + 1;
        let tmp = PAD as usize + (149 * pos) % 253 + 1;
        codewords.push((if tmp <= 254 { tmp } else { tmp - 254 }) as u16);
    }
}
