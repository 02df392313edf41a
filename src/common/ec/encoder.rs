use num_traits::{cast, PrimInt};

use super::GaloisField;

// Reed-Solomon encoder
//------------------------------------------------------------------------------

/// Systematic Reed-Solomon encoder for a fixed field and check codeword count.
///
/// The generator polynomial is the product of `(x - α^i)` for
/// `i in first_root..first_root + ecc_count`. Symbologies differ only in their
/// field and first root, e.g. QR uses 0x11D from α^0, Data Matrix 0x12D from α^1.
#[derive(Debug, Clone)]
pub struct ReedSolomon<'a> {
    field: &'a GaloisField,
    first_root: usize,
    // Highest degree first, leading coefficient is always 1
    generator: Vec<u16>,
}

impl<'a> ReedSolomon<'a> {
    pub fn new(field: &'a GaloisField, ecc_count: usize) -> Self {
        Self::with_first_root(field, ecc_count, 0)
    }

    pub fn with_first_root(field: &'a GaloisField, ecc_count: usize, first_root: usize) -> Self {
        assert!(ecc_count > 0, "Ecc count must be positive");
        assert!(
            ecc_count < field.order(),
            "Ecc count {ecc_count} leaves no room for data in GF({})",
            field.size()
        );

        let mut generator = Vec::with_capacity(ecc_count + 1);
        generator.push(1u16);
        for i in 0..ecc_count {
            let root = field.exp(first_root + i);
            generator.push(0);
            for j in (1..generator.len()).rev() {
                generator[j] ^= field.mul(generator[j - 1], root);
            }
        }

        Self { field, first_root, generator }
    }

    pub fn ecc_count(&self) -> usize {
        self.generator.len() - 1
    }

    pub fn generator(&self) -> &[u16] {
        &self.generator
    }

    /// Returns only the check codewords; the caller appends them to `data`.
    pub fn encode<T: PrimInt>(&self, data: &[T]) -> Vec<T> {
        let ecc_count = self.ecc_count();
        assert!(!data.is_empty(), "Empty data");
        assert!(
            data.len() + ecc_count <= self.field.order(),
            "Codeword length {} exceeds GF({}) limit",
            data.len() + ecc_count,
            self.field.size()
        );
        assert!(
            T::max_value().to_usize().map_or(true, |m| m >= self.field.order()),
            "Codeword type is narrower than GF({})",
            self.field.size()
        );

        // Remainder of data(x) * x^n / g(x), computed as an LFSR
        let mut rem = vec![0u16; ecc_count];
        for d in data {
            let d = self.element(*d);
            let feedback = d ^ rem[0];
            rem.copy_within(1.., 0);
            rem[ecc_count - 1] = 0;
            if feedback == 0 {
                continue;
            }
            for (r, &g) in rem.iter_mut().zip(&self.generator[1..]) {
                *r ^= self.field.mul(feedback, g);
            }
        }

        rem.into_iter().map(|r| cast(r).expect("Remainder fits the codeword type")).collect()
    }

    /// Evaluates a full codeword (data followed by ecc) at every generator root.
    pub fn syndromes<T: PrimInt>(&self, codeword: &[T]) -> Vec<u16> {
        (0..self.ecc_count())
            .map(|i| {
                let x = self.field.exp(self.first_root + i);
                codeword.iter().fold(0u16, |acc, c| self.field.mul(acc, x) ^ self.element(*c))
            })
            .collect()
    }

    pub fn is_valid<T: PrimInt>(&self, codeword: &[T]) -> bool {
        self.syndromes(codeword).iter().all(|&s| s == 0)
    }

    fn element<T: PrimInt>(&self, c: T) -> u16 {
        match c.to_usize() {
            Some(v) if v < self.field.size() => v as u16,
            _ => panic!("Codeword is outside GF({})", self.field.size()),
        }
    }
}

#[cfg(test)]
mod rs_tests {
    use test_case::test_case;

    use super::ReedSolomon;
    use crate::common::ec::GaloisField;

    #[test]
    fn test_qr_poly_mod_1() {
        let rs = ReedSolomon::new(GaloisField::qr(), 10);
        let res = rs.encode(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec\x11\xec\x11");
        assert_eq!(&*res, b"\xc4#'w\xeb\xd7\xe7\xe2]\x17");
    }

    #[test]
    fn test_qr_poly_mod_2() {
        let rs = ReedSolomon::new(GaloisField::qr(), 13);
        let res = rs.encode(b" [\x0bx\xd1r\xdcMC@\xec\x11\xec");
        assert_eq!(&*res, b"\xa8H\x16R\xd96\x9c\x00.\x0f\xb4z\x10");
    }

    #[test]
    fn test_qr_poly_mod_3() {
        let rs = ReedSolomon::new(GaloisField::qr(), 18);
        let res = rs.encode(b"CUF\x86W&U\xc2w2\x06\x12\x06g&");
        assert_eq!(&*res, b"\xd5\xc7\x0b-s\xf7\xf1\xdf\xe5\xf8\x9au\x9aoV\xa1o'");
    }

    #[test]
    fn test_data_matrix_generator() {
        let rs = ReedSolomon::with_first_root(GaloisField::data_matrix(), 5, 1);
        assert_eq!(rs.generator(), &[1, 62, 111, 15, 48, 228]);
    }

    #[test]
    fn test_data_matrix_123456() {
        let rs = ReedSolomon::with_first_root(GaloisField::data_matrix(), 5, 1);
        let ecc = rs.encode(&[142u16, 164, 186]);
        assert_eq!(ecc, vec![114, 25, 5, 88, 102]);
    }

    #[test_case(GaloisField::qr(), 0, 7)]
    #[test_case(GaloisField::data_matrix(), 1, 28)]
    #[test_case(GaloisField::gf16(), 1, 5)]
    #[test_case(GaloisField::gf64(), 1, 12)]
    #[test_case(GaloisField::gf1024(), 1, 40)]
    #[test_case(GaloisField::gf4096(), 1, 64)]
    fn test_codeword_vanishes_at_roots(gf: &'static GaloisField, first_root: usize, ecc: usize) {
        let rs = ReedSolomon::with_first_root(gf, ecc, first_root);
        let data_len = (gf.order() - ecc).min(30);
        let data: Vec<u16> = (0..data_len).map(|i| ((i * 37 + 11) % gf.size()) as u16).collect();
        let mut codeword = data.clone();
        codeword.extend(rs.encode(&data[..]));
        assert!(rs.is_valid(&codeword[..]));

        codeword[0] ^= 1;
        assert!(!rs.is_valid(&codeword[..]));
    }

    #[test]
    #[should_panic]
    fn test_ecc_count_too_large() {
        ReedSolomon::new(GaloisField::gf16(), 15);
    }

    #[test]
    #[should_panic]
    fn test_empty_data() {
        ReedSolomon::new(GaloisField::qr(), 4).encode::<u8>(&[]);
    }

    #[test]
    #[should_panic]
    fn test_codeword_outside_field() {
        ReedSolomon::new(GaloisField::gf16(), 4).encode(&[3u16, 16]);
    }

    #[test]
    #[should_panic]
    fn test_codeword_type_too_narrow() {
        ReedSolomon::new(GaloisField::gf1024(), 4).encode(&[3u8, 16]);
    }
}
