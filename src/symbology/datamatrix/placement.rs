use super::sizes::DmSize;

// Mapping matrix
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
enum Cell {
    Empty,
    // Bit 1 is the most significant
    Bit { codeword: usize, bit: u8 },
    Fixed(bool),
}

/// Codeword placement over the data regions joined together, finder patterns
/// excluded.
struct Mapping {
    nrow: i32,
    ncol: i32,
    cells: Vec<Cell>,
}

impl Mapping {
    fn new(nrow: usize, ncol: usize) -> Self {
        let mut mapping = Self { nrow: nrow as i32, ncol: ncol as i32, cells: vec![Cell::Empty; nrow * ncol] };
        mapping.fill();
        mapping
    }

    fn index(&self, row: i32, col: i32) -> usize {
        debug_assert!(0 <= row && row < self.nrow, "Row {row} out of {}", self.nrow);
        debug_assert!(0 <= col && col < self.ncol, "Column {col} out of {}", self.ncol);
        (row * self.ncol + col) as usize
    }

    fn is_empty(&self, row: i32, col: i32) -> bool {
        self.cells[self.index(row, col)] == Cell::Empty
    }

    fn set(&mut self, row: i32, col: i32, cell: Cell) {
        let idx = self.index(row, col);
        self.cells[idx] = cell;
    }

    // Wraps coordinates that fall off the top or left edge
    fn module(&mut self, mut row: i32, mut col: i32, codeword: usize, bit: u8) {
        if row < 0 {
            row += self.nrow;
            col += 4 - ((self.nrow + 4) % 8);
        }
        if col < 0 {
            col += self.ncol;
            row += 4 - ((self.ncol + 4) % 8);
        }
        self.set(row, col, Cell::Bit { codeword, bit });
    }

    fn place(&mut self, modules: [(i32, i32); 8], codeword: usize) {
        for (bit, (row, col)) in (1..=8).zip(modules) {
            self.module(row, col, codeword, bit);
        }
    }

    // Standard L-shaped codeword with its corner at (row, col)
    fn utah(&mut self, row: i32, col: i32, codeword: usize) {
        let modules = [
            (row - 2, col - 2),
            (row - 2, col - 1),
            (row - 1, col - 2),
            (row - 1, col - 1),
            (row - 1, col),
            (row, col - 2),
            (row, col - 1),
            (row, col),
        ];
        self.place(modules, codeword);
    }

    fn corner1(&mut self, codeword: usize) {
        let (r, c) = (self.nrow, self.ncol);
        let modules = [(r - 1, 0), (r - 1, 1), (r - 1, 2), (0, c - 2), (0, c - 1), (1, c - 1), (2, c - 1), (3, c - 1)];
        self.place(modules, codeword);
    }

    fn corner2(&mut self, codeword: usize) {
        let (r, c) = (self.nrow, self.ncol);
        let modules = [(r - 3, 0), (r - 2, 0), (r - 1, 0), (0, c - 4), (0, c - 3), (0, c - 2), (0, c - 1), (1, c - 1)];
        self.place(modules, codeword);
    }

    fn corner3(&mut self, codeword: usize) {
        let (r, c) = (self.nrow, self.ncol);
        let modules = [(r - 3, 0), (r - 2, 0), (r - 1, 0), (0, c - 2), (0, c - 1), (1, c - 1), (2, c - 1), (3, c - 1)];
        self.place(modules, codeword);
    }

    fn corner4(&mut self, codeword: usize) {
        let (r, c) = (self.nrow, self.ncol);
        let modules = [(r - 1, 0), (r - 1, c - 1), (0, c - 3), (0, c - 2), (0, c - 1), (1, c - 3), (1, c - 2), (1, c - 1)];
        self.place(modules, codeword);
    }

    // Diagonal sweeps, alternating up-right and down-left
    fn fill(&mut self) {
        let (nrow, ncol) = (self.nrow, self.ncol);
        let mut codeword = 0;
        let (mut row, mut col) = (4, 0);

        loop {
            if row == nrow && col == 0 {
                self.corner1(codeword);
                codeword += 1;
            }
            if row == nrow - 2 && col == 0 && ncol % 4 != 0 {
                self.corner2(codeword);
                codeword += 1;
            }
            if row == nrow - 2 && col == 0 && ncol % 8 == 4 {
                self.corner3(codeword);
                codeword += 1;
            }
            if row == nrow + 4 && col == 2 && ncol % 8 == 0 {
                self.corner4(codeword);
                codeword += 1;
            }

            loop {
                if row < nrow && col >= 0 && self.is_empty(row, col) {
                    self.utah(row, col, codeword);
                    codeword += 1;
                }
                row -= 2;
                col += 2;
                if !(row >= 0 && col < ncol) {
                    break;
                }
            }
            row += 1;
            col += 3;

            loop {
                if row >= 0 && col < ncol && self.is_empty(row, col) {
                    self.utah(row, col, codeword);
                    codeword += 1;
                }
                row += 2;
                col -= 2;
                if !(row < nrow && col >= 0) {
                    break;
                }
            }
            row += 3;
            col += 1;

            if !(row < nrow || col < ncol) {
                break;
            }
        }

        // Untouched bottom right corner gets a fixed checker
        if self.is_empty(nrow - 1, ncol - 1) {
            self.set(nrow - 1, ncol - 1, Cell::Fixed(true));
            self.set(nrow - 2, ncol - 2, Cell::Fixed(true));
            self.set(nrow - 1, ncol - 2, Cell::Fixed(false));
            self.set(nrow - 2, ncol - 1, Cell::Fixed(false));
        }
    }

    fn is_dark(&self, row: usize, col: usize, codewords: &[u16]) -> bool {
        match self.cells[row * self.ncol as usize + col] {
            Cell::Bit { codeword, bit } => codewords.get(codeword).is_some_and(|&cw| (cw >> (8 - bit)) & 1 == 1),
            Cell::Fixed(dark) => dark,
            Cell::Empty => false,
        }
    }
}

// Module grid
//------------------------------------------------------------------------------

/// Full module grid of `size`, row-major, finder and clock tracks included.
pub fn modules(codewords: &[u16], size: &DmSize) -> Vec<bool> {
    let (rh, rw) = (size.region_rows(), size.region_cols());
    let mapping = Mapping::new(size.mapping_rows(), size.mapping_cols());

    let mut grid = vec![false; size.rows * size.cols];
    for y in 0..size.rows {
        for x in 0..size.cols {
            let (ly, lx) = (y % (rh + 2), x % (rw + 2));
            grid[y * size.cols + x] = if ly == rh + 1 || lx == 0 {
                true
            } else if ly == 0 {
                lx % 2 == 0
            } else if lx == rw + 1 {
                ly % 2 == 1
            } else {
                let row = (y / (rh + 2)) * rh + ly - 1;
                let col = (x / (rw + 2)) * rw + lx - 1;
                mapping.is_dark(row, col, codewords)
            };
        }
    }
    grid
}
