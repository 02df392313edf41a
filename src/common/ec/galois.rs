use std::sync::OnceLock;

// Field parameters
//------------------------------------------------------------------------------

/// GF(2^bits) defined by a modulus polynomial and the primitive element α
/// its log/antilog tables are built from.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct FieldParams {
    pub bits: u8,
    // Includes the x^bits term
    pub poly: u32,
    pub generator: u16,
}

impl FieldParams {
    pub const QR: Self = Self::new(8, 0x11D);
    pub const DATA_MATRIX: Self = Self::new(8, 0x12D);
    pub const GF16: Self = Self::new(4, 0x13);
    pub const GF64: Self = Self::new(6, 0x43);
    pub const GF1024: Self = Self::new(10, 0x409);
    pub const GF4096: Self = Self::new(12, 0x1069);

    /// Field with `x` (2) as the primitive element.
    pub const fn new(bits: u8, poly: u32) -> Self {
        Self { bits, poly, generator: 2 }
    }

    pub const fn with_generator(mut self, generator: u16) -> Self {
        self.generator = generator;
        self
    }

    pub const fn size(self) -> usize {
        1 << self.bits
    }
}

// Galois field
//------------------------------------------------------------------------------

/// Log/antilog tables for one field. Immutable once built.
#[derive(Debug, Clone)]
pub struct GaloisField {
    params: FieldParams,
    // Doubled so that exp[log a + log b] never needs a modulo
    exp: Vec<u16>,
    log: Vec<u16>,
}

impl GaloisField {
    pub fn new(params: FieldParams) -> Self {
        let FieldParams { bits, poly, generator } = params;
        assert!((2..=16).contains(&bits), "Unsupported field size: 2^{bits}");
        assert!(poly >> bits == 1, "Modulus {poly:#x} is not of degree {bits}");
        assert!((generator as usize) < params.size(), "Generator {generator:#x} is outside GF(2^{bits})");

        let size = params.size();
        let order = size - 1;
        let mut exp = vec![0u16; order * 2];
        let mut log = vec![0u16; size];

        let mut x = 1u32;
        for i in 0..order {
            assert!(x != 0 && (i == 0 || x != 1), "{generator:#x} is not primitive modulo {poly:#x}");
            exp[i] = x as u16;
            log[x as usize] = i as u16;
            x = poly_mul(x, generator as u32, bits, poly);
        }
        assert!(x == 1, "{generator:#x} is not primitive modulo {poly:#x}");

        exp.copy_within(..order, order);
        Self { params, exp, log }
    }

    pub fn params(&self) -> FieldParams {
        self.params
    }

    pub fn size(&self) -> usize {
        self.params.size()
    }

    // Number of non-zero elements, also the maximum codeword length
    pub fn order(&self) -> usize {
        self.size() - 1
    }

    /// α^i
    #[inline]
    pub fn exp(&self, i: usize) -> u16 {
        self.exp[i % self.order()]
    }

    #[inline]
    pub fn log(&self, a: u16) -> usize {
        debug_assert!(a != 0, "Log of zero is undefined");
        self.log[a as usize] as usize
    }

    #[inline]
    pub fn mul(&self, a: u16, b: u16) -> u16 {
        if a == 0 || b == 0 {
            return 0;
        }
        self.exp[self.log[a as usize] as usize + self.log[b as usize] as usize]
    }

    #[inline]
    pub fn div(&self, a: u16, b: u16) -> u16 {
        assert!(b != 0, "Division by zero in GF(2^{})", self.params.bits);
        if a == 0 {
            return 0;
        }
        let order = self.order();
        self.exp[self.log(a) + order - self.log(b)]
    }
}

// Shift-and-add product of two field elements reduced by `poly`
fn poly_mul(mut a: u32, mut b: u32, bits: u8, poly: u32) -> u32 {
    let mut res = 0;
    while b != 0 {
        if b & 1 == 1 {
            res ^= a;
        }
        b >>= 1;
        a <<= 1;
        if a >> bits == 1 {
            a ^= poly;
        }
    }
    res
}

macro_rules! shared_field {
    ($(#[$doc:meta])* $name:ident, $params:expr) => {
        $(#[$doc])*
        pub fn $name() -> &'static GaloisField {
            static FIELD: OnceLock<GaloisField> = OnceLock::new();
            FIELD.get_or_init(|| GaloisField::new($params))
        }
    };
}

impl GaloisField {
    shared_field!(
        /// GF(256) with modulus 0x11D
        qr,
        FieldParams::QR
    );
    shared_field!(
        /// GF(256) with modulus 0x12D
        data_matrix,
        FieldParams::DATA_MATRIX
    );
    shared_field!(gf16, FieldParams::GF16);
    shared_field!(gf64, FieldParams::GF64);
    shared_field!(gf1024, FieldParams::GF1024);
    shared_field!(gf4096, FieldParams::GF4096);
}
