use crate::common::metadata::VersionCandidate;

// Shape preference
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum DmShape {
    #[default]
    Square,
    Rectangle,
    Any,
}

// Size table
//------------------------------------------------------------------------------

/// One ECC200 symbol size. Ids 1-24 are square, 25-30 rectangular.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct DmSize {
    pub id: usize,
    pub rows: usize,
    pub cols: usize,
    pub v_regions: usize,
    pub h_regions: usize,
    pub data: usize,
    pub ecc: usize,
    pub blocks: usize,
}

const fn size(
    id: usize,
    (rows, cols): (usize, usize),
    (v_regions, h_regions): (usize, usize),
    data: usize,
    ecc: usize,
    blocks: usize,
) -> DmSize {
    DmSize { id, rows, cols, v_regions, h_regions, data, ecc, blocks }
}

pub static SIZES: [DmSize; 30] = [
    size(1, (10, 10), (1, 1), 3, 5, 1),
    size(2, (12, 12), (1, 1), 5, 7, 1),
    size(3, (14, 14), (1, 1), 8, 10, 1),
    size(4, (16, 16), (1, 1), 12, 12, 1),
    size(5, (18, 18), (1, 1), 18, 14, 1),
    size(6, (20, 20), (1, 1), 22, 18, 1),
    size(7, (22, 22), (1, 1), 30, 20, 1),
    size(8, (24, 24), (1, 1), 36, 24, 1),
    size(9, (26, 26), (1, 1), 44, 28, 1),
    size(10, (32, 32), (2, 2), 62, 36, 1),
    size(11, (36, 36), (2, 2), 86, 42, 1),
    size(12, (40, 40), (2, 2), 114, 48, 1),
    size(13, (44, 44), (2, 2), 144, 56, 1),
    size(14, (48, 48), (2, 2), 174, 68, 1),
    size(15, (52, 52), (2, 2), 204, 84, 2),
    size(16, (64, 64), (4, 4), 280, 112, 2),
    size(17, (72, 72), (4, 4), 368, 144, 4),
    size(18, (80, 80), (4, 4), 456, 192, 4),
    size(19, (88, 88), (4, 4), 576, 224, 4),
    size(20, (96, 96), (4, 4), 696, 272, 4),
    size(21, (104, 104), (4, 4), 816, 336, 6),
    size(22, (120, 120), (6, 6), 1050, 408, 6),
    size(23, (132, 132), (6, 6), 1304, 496, 8),
    size(24, (144, 144), (6, 6), 1558, 620, 10),
    size(25, (8, 18), (1, 1), 5, 7, 1),
    size(26, (8, 32), (1, 2), 10, 11, 1),
    size(27, (12, 26), (1, 1), 16, 14, 1),
    size(28, (12, 36), (1, 2), 22, 18, 1),
    size(29, (16, 36), (1, 2), 32, 24, 1),
    size(30, (16, 48), (1, 2), 49, 28, 1),
];

impl DmSize {
    pub fn by_id(id: usize) -> Option<&'static DmSize> {
        SIZES.get(id.checked_sub(1)?)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Data rows of one region, finder and clock tracks excluded
    pub fn region_rows(&self) -> usize {
        self.rows / self.v_regions - 2
    }

    pub fn region_cols(&self) -> usize {
        self.cols / self.h_regions - 2
    }

    /// Rows of the codeword mapping matrix, all regions joined
    pub fn mapping_rows(&self) -> usize {
        self.region_rows() * self.v_regions
    }

    pub fn mapping_cols(&self) -> usize {
        self.region_cols() * self.h_regions
    }

    pub fn ecc_per_block(&self) -> usize {
        self.ecc / self.blocks
    }

    pub fn candidate(&self) -> VersionCandidate {
        VersionCandidate::new(self.id, self.data, self.ecc)
    }
}

/// Sizes allowed by `shape`, smallest data capacity first. Ties keep table
/// order, so squares precede rectangles of equal capacity.
pub fn candidates(shape: DmShape) -> Vec<VersionCandidate> {
    let mut res: Vec<VersionCandidate> = SIZES
        .iter()
        .filter(|s| match shape {
            DmShape::Square => s.is_square(),
            DmShape::Rectangle => !s.is_square(),
            DmShape::Any => true,
        })
        .map(DmSize::candidate)
        .collect();
    res.sort_by_key(|c| c.data_capacity);
    res
}

#[cfg(test)]
mod sizes_tests {
    use test_case::test_case;

    use super::{candidates, DmShape, DmSize, SIZES};

    #[test]
    fn test_table_consistency() {
        for (i, s) in SIZES.iter().enumerate() {
            assert_eq!(s.id, i + 1);
            assert_eq!(s.rows % s.v_regions, 0);
            assert_eq!(s.cols % s.h_regions, 0);
            assert_eq!(s.ecc % s.blocks, 0, "Uneven ecc blocks in size {}", s.id);
            // Every mapping bit holds a codeword bit, bar the 4 corner modules
            let bits = s.mapping_rows() * s.mapping_cols();
            let used = (s.data + s.ecc) * 8;
            assert!(bits == used || bits == used + 4, "Size {} maps {bits} for {used}", s.id);
        }
    }

    #[test_case(1, (8, 8))]
    #[test_case(10, (28, 28))]
    #[test_case(24, (132, 132))]
    #[test_case(26, (6, 28))]
    #[test_case(30, (14, 44))]
    fn test_mapping_size(id: usize, expected: (usize, usize)) {
        let s = DmSize::by_id(id).unwrap();
        assert_eq!((s.mapping_rows(), s.mapping_cols()), expected);
    }

    #[test]
    fn test_by_id_bounds() {
        assert!(DmSize::by_id(0).is_none());
        assert!(DmSize::by_id(31).is_none());
        assert_eq!(DmSize::by_id(30).map(|s| (s.rows, s.cols)), Some((16, 48)));
    }

    #[test]
    fn test_candidates_order() {
        let square: Vec<usize> = candidates(DmShape::Square).iter().map(|c| c.version).collect();
        assert_eq!(square, (1..=24).collect::<Vec<_>>());

        let rect: Vec<usize> = candidates(DmShape::Rectangle).iter().map(|c| c.version).collect();
        assert_eq!(rect, vec![25, 26, 27, 28, 29, 30]);

        let any = candidates(DmShape::Any);
        assert_eq!(any.len(), 30);
        assert!(any.windows(2).all(|w| w[0].data_capacity <= w[1].data_capacity));
        assert_eq!(any[1].version, 2);
        assert_eq!(any[2].version, 25);
    }
}
