//! GS1 Application Identifier validation and reduction.
//!
//! Input is bracketed element strings, e.g. `[01]06901236348338[10]batch666`.
//! Every element is checked against the AI table and then reduced to the
//! concatenated `AI + data` form, with an FNC1 separator ahead of every element
//! whose two-digit AI prefix does not have a predefined length.

pub mod ai;

pub use ai::{has_predefined_length, rule, AiSegment, CharClass};

use crate::common::error::Gs1Error;

// Element
//------------------------------------------------------------------------------

/// One `[AI]data` group. Offsets are byte offsets into the original input.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Element<'a> {
    pub ai: &'a str,
    pub data: &'a str,
    pub data_start: usize,
    pub data_end: usize,
}

impl Element<'_> {
    pub fn has_predefined_length(&self) -> bool {
        has_predefined_length(self.ai)
    }
}

// Message
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Gs1Message<'a> {
    elements: Vec<Element<'a>>,
}

impl<'a> Gs1Message<'a> {
    pub fn parse(input: &'a str) -> Result<Self, Gs1Error> {
        let elements = scan(input)?;
        for el in elements.iter() {
            validate(el)?;
        }
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[Element<'a>] {
        &self.elements
    }

    /// Yields each element with whether an FNC1 separator precedes it: never
    /// for the first element, otherwise only when its AI prefix is outside the
    /// predefined-length set.
    pub fn fields(&self) -> impl Iterator<Item = (bool, &Element<'a>)> + '_ {
        self.elements.iter().enumerate().map(|(i, el)| (i > 0 && !el.has_predefined_length(), el))
    }

    pub fn reduce(&self, fnc1: &str) -> String {
        let mut out = String::new();
        for (separated, el) in self.fields() {
            if separated {
                out.push_str(fnc1);
            }
            out.push_str(el.ai);
            out.push_str(el.data);
        }
        out
    }

    /// Human readable interpretation, with parentheses around every AI.
    pub fn to_hri(&self) -> String {
        self.elements.iter().map(|el| format!("({}){}", el.ai, el.data)).collect()
    }
}

pub fn reduce(input: &str, fnc1: &str) -> Result<String, Gs1Error> {
    Ok(Gs1Message::parse(input)?.reduce(fnc1))
}

// Bracket balance, AI shape and element offsets
fn scan(input: &str) -> Result<Vec<Element<'_>>, Gs1Error> {
    if !input.starts_with('[') {
        return Err(Gs1Error::MissingLeadingAi);
    }

    let mut ai_spans = Vec::new();
    let mut open: Option<usize> = None;
    for (i, b) in input.bytes().enumerate() {
        match (b, open) {
            (b'[', Some(_)) => return Err(Gs1Error::NestedBracket(i)),
            (b'[', None) => open = Some(i),
            (b']', None) => return Err(Gs1Error::BracketMismatch(i)),
            (b']', Some(start)) => {
                ai_spans.push((start + 1, i));
                open = None;
            }
            _ => (),
        }
    }
    if let Some(start) = open {
        return Err(Gs1Error::BracketMismatch(start));
    }

    let mut elements = Vec::with_capacity(ai_spans.len());
    for (k, &(ai_start, ai_end)) in ai_spans.iter().enumerate() {
        let ai = &input[ai_start..ai_end];
        if ai.len() < 2 {
            return Err(Gs1Error::AiTooShort(ai.to_string()));
        }
        if ai.len() > 4 {
            return Err(Gs1Error::AiTooLong(ai.to_string()));
        }
        if !ai.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Gs1Error::NonNumericAi(ai.to_string()));
        }

        let data_start = ai_end + 1;
        let data_end = ai_spans.get(k + 1).map_or(input.len(), |&(next, _)| next - 1);
        elements.push(Element { ai, data: &input[data_start..data_end], data_start, data_end });
    }
    Ok(elements)
}

fn validate(el: &Element) -> Result<(), Gs1Error> {
    let segments = rule(el.ai).ok_or_else(|| Gs1Error::UnknownAi(el.ai.to_string()))?;
    let (last, fixed) = segments.split_last().ok_or_else(|| Gs1Error::UnknownAi(el.ai.to_string()))?;

    let fixed_len: usize = fixed.iter().map(|s| s.max).sum();
    let min = fixed_len + last.min;
    let max = fixed_len + last.max;
    let len = el.data.chars().count();
    if len < min || len > max {
        return Err(Gs1Error::BadDataLength { ai: el.ai.to_string(), len, min, max });
    }

    // Every segment but the last consumes exactly its width, the last takes the rest
    let mut chars = el.data.chars();
    for seg in fixed {
        check_chars(el.ai, chars.by_ref().take(seg.max), seg.class)?;
    }
    check_chars(el.ai, chars, last.class)
}

fn check_chars(
    ai: &str,
    mut chars: impl Iterator<Item = char>,
    class: CharClass,
) -> Result<(), Gs1Error> {
    match chars.find(|&c| !class.contains(c)) {
        Some(ch) => Err(Gs1Error::BadCharacter { ai: ai.to_string(), ch, class: class.name() }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod gs1_tests {
    use test_case::test_case;

    use super::{reduce, Gs1Message};
    use crate::common::error::Gs1Error;

    #[test]
    fn test_reduce_gtin_batch() {
        let res = reduce("[01]06901236348338[10]batch666", "[").unwrap();
        assert_eq!(res, "0106901236348338[10batch666");
    }

    #[test]
    fn test_reduce_fixed_after_variable() {
        let res = reduce("[10]ABC123[17]250101[21]XYZ[3103]001234", "\x1d").unwrap();
        assert_eq!(res, "10ABC12317250101\x1d21XYZ3103001234");
    }

    #[test_case("[10]ABC[17]250101", "10ABC17250101")]
    #[test_case("[10]ABC[21]XYZ", "10ABC|21XYZ")]
    #[test_case("[17]250101[10]ABC", "17250101|10ABC")]
    #[test_case("[21]XYZ[01]06901236348338", "21XYZ0106901236348338")]
    fn test_separator_only_before_variable_prefix(input: &str, expected: &str) {
        assert_eq!(reduce(input, "|").unwrap(), expected);
    }

    #[test]
    fn test_fixed_run_has_no_separators() {
        let res = reduce("[01]06901236348338[17]250101[3103]001234[10]X1", "\x1d").unwrap();
        assert_eq!(res, "0106901236348338172501013103001234\x1d10X1");
    }

    #[test]
    fn test_first_element_never_separated() {
        let res = reduce("[21]12345", "|").unwrap();
        assert_eq!(res, "2112345");
    }

    #[test]
    fn test_offsets() {
        let input = "[01]06901236348338[10]batch666";
        let msg = Gs1Message::parse(input).unwrap();
        let els = msg.elements();
        assert_eq!(els.len(), 2);
        assert_eq!((els[0].ai, els[0].data_start, els[0].data_end), ("01", 4, 18));
        assert_eq!((els[1].ai, els[1].data_start, els[1].data_end), ("10", 22, 30));
        assert_eq!(&input[els[1].data_start..els[1].data_end], "batch666");
    }

    #[test]
    fn test_hri() {
        let msg = Gs1Message::parse("[01]06901236348338[10]batch666").unwrap();
        assert_eq!(msg.to_hri(), "(01)06901236348338(10)batch666");
    }

    #[test_case("01]06901236348338", Gs1Error::MissingLeadingAi)]
    #[test_case("[01]0690123634833]8", Gs1Error::BracketMismatch(17))]
    #[test_case("[01]06901236348338[10", Gs1Error::BracketMismatch(18))]
    #[test_case("[01]0690[1[0]]1236348338", Gs1Error::NestedBracket(10))]
    #[test_case("[1]1234", Gs1Error::AiTooShort("1".into()))]
    #[test_case("[]1234", Gs1Error::AiTooShort("".into()))]
    #[test_case("[12345]1234", Gs1Error::AiTooLong("12345".into()))]
    #[test_case("[0A]1234", Gs1Error::NonNumericAi("0A".into()))]
    #[test_case("[9999]1234", Gs1Error::UnknownAi("9999".into()))]
    #[test_case("[01]1234", Gs1Error::BadDataLength { ai: "01".into(), len: 4, min: 14, max: 14 })]
    #[test_case("[10]", Gs1Error::BadDataLength { ai: "10".into(), len: 0, min: 1, max: 20 })]
    #[test_case("[10]123456789012345678901", Gs1Error::BadDataLength { ai: "10".into(), len: 21, min: 1, max: 20 })]
    #[test_case("[01]0690123634833A", Gs1Error::BadCharacter { ai: "01".into(), ch: 'A', class: "numeric" })]
    #[test_case("[10]batch 666", Gs1Error::BadCharacter { ai: "10".into(), ch: ' ', class: "GS1 character set 82" })]
    #[test_case("[8010]ABC$", Gs1Error::BadCharacter { ai: "8010".into(), ch: '$', class: "GS1 character set 39" })]
    #[test_case("[4321]2", Gs1Error::BadCharacter { ai: "4321".into(), ch: '2', class: "flag digit 0 or 1" })]
    #[test_case("[4307]fr", Gs1Error::BadCharacter { ai: "4307".into(), ch: 'f', class: "uppercase letter" })]
    #[test_case("[421]0AB123", Gs1Error::BadCharacter { ai: "421".into(), ch: 'A', class: "numeric" })]
    fn test_reject(input: &str, err: Gs1Error) {
        assert_eq!(reduce(input, "[").unwrap_err(), err);
    }

    #[test]
    fn test_multi_segment_boundary() {
        // N3 country code then X..9 postal code
        assert_eq!(reduce("[421]250AB12", "[").unwrap(), "421250AB12");
        // Optional trailing segment of 7007 may be absent
        assert_eq!(reduce("[7007]250101", "[").unwrap(), "7007250101");
        assert_eq!(reduce("[7007]250101250131", "[").unwrap(), "7007250101250131");
    }
}
