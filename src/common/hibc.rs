use crate::common::error::{SymbolError, SymbolResult};

// HIBC LIC
//------------------------------------------------------------------------------

/// Longest HIBC data accepted before the `+` flag and check character
pub const MAX_LEN: usize = 110;

const CODE39_EXTRA: &[u8; 7] = b"-. $/+%";

fn code39_value(b: u8) -> Option<usize> {
    match b {
        b'0'..=b'9' => Some((b - b'0') as usize),
        b'A'..=b'Z' => Some((b - b'A') as usize + 10),
        _ => CODE39_EXTRA.iter().position(|&x| x == b).map(|p| p + 36),
    }
}

fn code39_char(value: usize) -> u8 {
    match value {
        0..=9 => b'0' + value as u8,
        10..=35 => b'A' + (value - 10) as u8,
        _ => CODE39_EXTRA[value - 36],
    }
}

/// Uppercases `text`, prefixes the HIBC `+` flag and appends the modulo 43
/// check character computed over everything including the flag.
pub fn wrap(text: &str) -> SymbolResult<String> {
    if text.len() > MAX_LEN {
        return Err(SymbolError::InputTooLong { context: "HIBC", len: text.len(), max: MAX_LEN });
    }

    let upper = text.to_ascii_uppercase();
    let mut sum = code39_value(b'+').unwrap_or_default();
    for ch in upper.chars() {
        let value = u8::try_from(ch)
            .ok()
            .and_then(code39_value)
            .ok_or(SymbolError::InvalidChar { ch, context: "HIBC" })?;
        sum += value;
    }

    let check = code39_char(sum % 43) as char;
    Ok(format!("+{upper}{check}"))
}
