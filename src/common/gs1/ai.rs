// Character classes
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum CharClass {
    Numeric,
    // GS1 AI encodable character set 82
    Cset82,
    // GS1 AI encodable character set 39
    Cset39,
    // Single digit, 0 or 1
    Flag,
    Upper,
}

impl CharClass {
    pub fn contains(self, c: char) -> bool {
        match self {
            Self::Numeric => c.is_ascii_digit(),
            Self::Cset82 => matches!(
                c,
                '!' | '"' | '%'..='/' | '0'..='9' | ':'..='?' | 'A'..='Z' | '_' | 'a'..='z'
            ),
            Self::Cset39 => matches!(c, '#' | '-' | '/' | '0'..='9' | 'A'..='Z'),
            Self::Flag => matches!(c, '0' | '1'),
            Self::Upper => c.is_ascii_uppercase(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Cset82 => "GS1 character set 82",
            Self::Cset39 => "GS1 character set 39",
            Self::Flag => "flag digit 0 or 1",
            Self::Upper => "uppercase letter",
        }
    }
}


// AI segments
//------------------------------------------------------------------------------

/// One component of an AI's data field.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct AiSegment {
    pub class: CharClass,
    pub min: usize,
    pub max: usize,
}

const fn fixed(class: CharClass, len: usize) -> AiSegment {
    AiSegment { class, min: len, max: len }
}

const fn upto(class: CharClass, max: usize) -> AiSegment {
    AiSegment { class, min: 1, max }
}

const fn optional(class: CharClass, max: usize) -> AiSegment {
    AiSegment { class, min: 0, max }
}

use CharClass::*;

const N1_X3: &[AiSegment] = &[fixed(Numeric, 1), fixed(Cset82, 1), fixed(Cset82, 1), fixed(Cset82, 1)];
const N2: &[AiSegment] = &[fixed(Numeric, 2)];
const N3: &[AiSegment] = &[fixed(Numeric, 3)];
const N4: &[AiSegment] = &[fixed(Numeric, 4)];
const N6: &[AiSegment] = &[fixed(Numeric, 6)];
const N10: &[AiSegment] = &[fixed(Numeric, 10)];
const N13: &[AiSegment] = &[fixed(Numeric, 13)];
const N14: &[AiSegment] = &[fixed(Numeric, 14)];
const N17: &[AiSegment] = &[fixed(Numeric, 17)];
const N18: &[AiSegment] = &[fixed(Numeric, 18)];
const N20: &[AiSegment] = &[fixed(Numeric, 20)];
const N_4: &[AiSegment] = &[upto(Numeric, 4)];
const N_6: &[AiSegment] = &[upto(Numeric, 6)];
const N_8: &[AiSegment] = &[upto(Numeric, 8)];
const N_10: &[AiSegment] = &[upto(Numeric, 10)];
const N_12: &[AiSegment] = &[upto(Numeric, 12)];
const N_15: &[AiSegment] = &[upto(Numeric, 15)];
const N3_N_12: &[AiSegment] = &[fixed(Numeric, 3), upto(Numeric, 12)];
const N3_N_15: &[AiSegment] = &[fixed(Numeric, 3), upto(Numeric, 15)];
const N3_X_9: &[AiSegment] = &[fixed(Numeric, 3), upto(Cset82, 9)];
const N3_X_27: &[AiSegment] = &[fixed(Numeric, 3), upto(Cset82, 27)];
const N6_N_4: &[AiSegment] = &[fixed(Numeric, 6), optional(Numeric, 4)];
const N6_N_6: &[AiSegment] = &[fixed(Numeric, 6), optional(Numeric, 6)];
const N8_N_4: &[AiSegment] = &[fixed(Numeric, 8), optional(Numeric, 4)];
const N13_N_12: &[AiSegment] = &[fixed(Numeric, 13), upto(Numeric, 12)];
const N13_X_17: &[AiSegment] = &[fixed(Numeric, 13), upto(Cset82, 17)];
const N14_N2_N2: &[AiSegment] = &[fixed(Numeric, 14), fixed(Numeric, 2), fixed(Numeric, 2)];
const N14_X_16: &[AiSegment] = &[fixed(Numeric, 14), upto(Cset82, 16)];
const X_2: &[AiSegment] = &[upto(Cset82, 2)];
const X_3: &[AiSegment] = &[upto(Cset82, 3)];
const X_10: &[AiSegment] = &[upto(Cset82, 10)];
const X_12: &[AiSegment] = &[upto(Cset82, 12)];
const X_20: &[AiSegment] = &[upto(Cset82, 20)];
const X_25: &[AiSegment] = &[upto(Cset82, 25)];
const X_28: &[AiSegment] = &[upto(Cset82, 28)];
const X_30: &[AiSegment] = &[upto(Cset82, 30)];
const X_34: &[AiSegment] = &[upto(Cset82, 34)];
const X_35: &[AiSegment] = &[upto(Cset82, 35)];
const X_50: &[AiSegment] = &[upto(Cset82, 50)];
const X_70: &[AiSegment] = &[upto(Cset82, 70)];
const X_90: &[AiSegment] = &[upto(Cset82, 90)];
const X2_X_28: &[AiSegment] = &[fixed(Cset82, 2), upto(Cset82, 28)];
const C_30: &[AiSegment] = &[upto(Cset39, 30)];
const A2: &[AiSegment] = &[fixed(Upper, 2)];
const FLAG: &[AiSegment] = &[fixed(Flag, 1)];

// AI table
//------------------------------------------------------------------------------

/// Data field rule for an AI given as its digit string, or `None` when the AI
/// is not assigned. `"01"` and `"001"` are distinct keys.
pub fn rule(ai: &str) -> Option<&'static [AiSegment]> {
    if !(2..=4).contains(&ai.len()) || !ai.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value: u16 = ai.parse().ok()?;

    let segments = match (ai.len(), value) {
        (2, 0) => N18,
        (2, 1..=3) => N14,
        (2, 10 | 21 | 22) => X_20,
        (2, 11..=13 | 15..=17) => N6,
        (2, 20) => N2,
        (2, 30 | 37) => N_8,
        (2, 90) => X_30,
        (2, 91..=99) => X_90,

        (3, 235) => X_28,
        (3, 240 | 241 | 250 | 251 | 400 | 401 | 403) => X_30,
        (3, 242) => N_6,
        (3, 243 | 254 | 420) => X_20,
        (3, 253) => N13_X_17,
        (3, 255) => N13_N_12,
        (3, 402) => N17,
        (3, 410..=417) => N13,
        (3, 421) => N3_X_9,
        (3, 422 | 424 | 426) => N3,
        (3, 423 | 425) => N3_N_12,
        (3, 427) => X_3,
        (3, 710..=716) => X_20,

        (4, v @ 3100..=3699) if is_measure(v) => N6,
        (4, 3900..=3909 | 3920..=3929) => N_15,
        (4, 3910..=3919 | 3930..=3939) => N3_N_15,
        (4, 3940..=3943) => N4,
        (4, 3950..=3955) => N6,
        (4, 4300 | 4301 | 4310 | 4311 | 4320) => X_35,
        (4, 4302..=4306 | 4312..=4316) => X_70,
        (4, 4307 | 4317) => A2,
        (4, 4308 | 4319) => X_30,
        (4, 4309) => N20,
        (4, 4318) => X_20,
        (4, 4321..=4323) => FLAG,
        (4, 4324 | 4325) => N10,
        (4, 4326) => N6,
        (4, 7001) => N13,
        (4, 7002 | 7023) => X_30,
        (4, 7003) => N10,
        (4, 7004) => N_4,
        (4, 7005) => X_12,
        (4, 7006) => N6,
        (4, 7007) => N6_N_6,
        (4, 7008) => X_3,
        (4, 7009) => X_10,
        (4, 7010) => X_2,
        (4, 7011) => N6_N_4,
        (4, 7020..=7022) => X_20,
        (4, 7030..=7039) => N3_X_27,
        (4, 7040) => N1_X3,
        (4, 7230..=7239) => X2_X_28,
        (4, 7240) => X_20,
        (4, 8001) => N14,
        (4, 8002 | 8012) => X_20,
        (4, 8003) => N14_X_16,
        (4, 8004) => X_30,
        (4, 8005) => N6,
        (4, 8006 | 8026) => N14_N2_N2,
        (4, 8007) => X_34,
        (4, 8008) => N8_N_4,
        (4, 8009) => X_50,
        (4, 8010) => C_30,
        (4, 8011) => N_12,
        (4, 8013 | 8020) => X_25,
        (4, 8017 | 8018) => N18,
        (4, 8019) => N_10,
        (4, 8110 | 8112 | 8200) => X_70,
        (4, 8111) => N4,
        _ => return None,
    };
    Some(segments)
}

// 31nn to 36nn trade measures, last digit is the implied decimal point (0-5)
fn is_measure(ai: u16) -> bool {
    let decimals = ai % 10;
    let kind = ai / 10;
    decimals <= 5
        && matches!(kind, 310..=316 | 320..=329 | 330..=337 | 340..=349 | 350..=357 | 360..=369)
}

/// Whether the AI's two-digit prefix belongs to the element strings with a
/// predefined length, which never need an FNC1 separator.
pub fn has_predefined_length(ai: &str) -> bool {
    match ai.get(..2).and_then(|p| p.parse::<u8>().ok()) {
        Some(prefix) => matches!(prefix, 0..=4 | 11..=20 | 31..=36 | 41),
        None => false,
    }
}
