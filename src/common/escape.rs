use crate::common::error::{SymbolError, SymbolResult};

// Escape mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum EscapeMode {
    /// Unknown escapes are kept verbatim, backslash included
    #[default]
    Lenient,
    /// Unknown escapes are an input error
    Strict,
}

// Unit
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Unit {
    Char(char),
    Fnc1,
}

// Unescape
//------------------------------------------------------------------------------

/// Expands backslash escapes:
///
/// | Escape      | Meaning                    |
/// |-------------|----------------------------|
/// | `\\`        | backslash                  |
/// | `\0`        | NUL                        |
/// | `\E`        | EOT                        |
/// | `\a` `\b` `\t` `\n` `\v` `\f` `\r` | BEL BS HT LF VT FF CR |
/// | `\e`        | ESC                        |
/// | `\G` `\R`   | GS, RS                     |
/// | `\xHH`      | byte HH, read as U+00HH    |
/// | `\uHHHH`    | code point U+HHHH          |
/// | `\<FNC1>`   | FNC1 codeword              |
pub fn unescape(input: &str, mode: EscapeMode) -> SymbolResult<Vec<Unit>> {
    let mut out = Vec::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('\\') {
        out.extend(rest[..pos].chars().map(Unit::Char));
        let esc = &rest[pos..];
        match parse_escape(esc) {
            Some((unit, len)) => {
                out.push(unit);
                rest = &esc[len..];
            }
            None => {
                let len = esc.chars().nth(1).map_or(1, |c| 1 + c.len_utf8());
                if mode == EscapeMode::Strict {
                    return Err(SymbolError::InvalidEscape(esc[..len].to_string()));
                }
                out.extend(esc[..len].chars().map(Unit::Char));
                rest = &esc[len..];
            }
        }
    }
    out.extend(rest.chars().map(Unit::Char));

    Ok(out)
}

// Parses one escape at the start of `esc`, returning the unit and its byte length
fn parse_escape(esc: &str) -> Option<(Unit, usize)> {
    debug_assert!(esc.starts_with('\\'));

    let code = esc[1..].chars().next()?;
    let simple = match code {
        '\\' => Some('\\'),
        '0' => Some('\x00'),
        'E' => Some('\x04'),
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        't' => Some('\t'),
        'n' => Some('\n'),
        'v' => Some('\x0b'),
        'f' => Some('\x0c'),
        'r' => Some('\r'),
        'e' => Some('\x1b'),
        'G' => Some('\x1d'),
        'R' => Some('\x1e'),
        _ => None,
    };
    if let Some(c) = simple {
        return Some((Unit::Char(c), 2));
    }

    match code {
        'x' => hex(esc.get(2..4)?).and_then(char::from_u32).map(|c| (Unit::Char(c), 4)),
        'u' => hex(esc.get(2..6)?).and_then(char::from_u32).map(|c| (Unit::Char(c), 6)),
        '<' if esc.starts_with("\\<FNC1>") => Some((Unit::Fnc1, 7)),
        _ => None,
    }
}

fn hex(digits: &str) -> Option<u32> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
