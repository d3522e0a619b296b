use {
    itertools::Itertools,
    nanoserde::{DeJson, SerJson},
    ndarray::{Array2, Axis},
    std::fmt,
};

pub const SIDE: usize = 3;
pub const CELLS: usize = SIDE * SIDE;

/// A 3x3 binary pattern. Stored in standard layout so that equal markers hash
/// equally.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Marker(Array2<bool>);

/// A cell whose value is pinned during generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, SerJson, DeJson)]
pub struct FixedCell {
    pub row: usize,
    pub col: usize,
    pub value: bool,
}

/// Edge cells (0, 1), (1, 0) and (1, 2) held clear: 64 candidates instead of 512.
pub const REDUCED: [FixedCell; 3] = [
    FixedCell {
        row: 0,
        col: 1,
        value: false,
    },
    FixedCell {
        row: 1,
        col: 0,
        value: false,
    },
    FixedCell {
        row: 1,
        col: 2,
        value: false,
    },
];

impl Marker {
    pub fn from_rows(rows: [[bool; SIDE]; SIDE]) -> Self {
        Self(Array2::from_shape_fn((SIDE, SIDE), |(r, c)| rows[r][c]))
    }

    /// Cell (0, 0) is the most significant of the nine bits, (2, 2) the least.
    pub fn from_code(code: u16) -> Self {
        Self(Array2::from_shape_fn((SIDE, SIDE), |(r, c)| {
            (code >> (CELLS - 1 - (r * SIDE + c))) & 1 == 1
        }))
    }

    pub fn code(&self) -> u16 {
        self.0.iter().fold(0, |acc, &b| (acc << 1) | b as u16)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.0.get((row, col)).copied()
    }

    /// Clockwise quarter turn: cell (r, c) moves to (c, 2 - r).
    pub fn rotate(&self) -> Self {
        let mut view = self.0.view().reversed_axes();
        view.invert_axis(Axis(1));
        Self(view.as_standard_layout().into_owned())
    }

    /// The marker itself followed by its 90, 180 and 270 degree turns.
    pub fn rotations(&self) -> [Self; 4] {
        let r1 = self.rotate();
        let r2 = r1.rotate();
        let r3 = r2.rotate();
        [self.clone(), r1, r2, r3]
    }

    /// The rotation with the smallest code. Grouping does not use this; it is
    /// an order-independent key for checking a partition.
    pub fn canonical(&self) -> Self {
        self.rotations()
            .into_iter()
            .min_by_key(Marker::code)
            .unwrap_or_else(|| self.clone())
    }

    /// Every marker obtained by toggling exactly `k` distinct cells, in
    /// lexicographic order of the row-major cell positions.
    pub fn flipped(&self, k: usize) -> impl Iterator<Item = Self> + '_ {
        cell_ixs().combinations(k).map(move |ixs| {
            let mut flipped = self.clone();
            for ix in ixs {
                flipped.0[ix] ^= true;
            }
            flipped
        })
    }

    pub fn one_flipped(&self) -> impl Iterator<Item = Self> + '_ {
        self.flipped(1)
    }

    pub fn two_flipped(&self) -> impl Iterator<Item = Self> + '_ {
        self.flipped(2)
    }

    /// Number of cells that differ between the two markers, ignoring rotation.
    pub fn flip_count(&self, other: &Self) -> u32 {
        (self.code() ^ other.code()).count_ones()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.0.rows().into_iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for &b in row {
                write!(f, "{}", if b { 'X' } else { '_' })?;
            }
        }
        Ok(())
    }
}

fn cell_ixs() -> impl Iterator<Item = (usize, usize)> + Clone {
    (0..SIDE).cartesian_product(0..SIDE)
}

/// Enumerates every marker agreeing with `fixed`. Cell (0, 0) varies slowest,
/// (2, 2) fastest, and each cell is tried set before clear.
pub fn generate(fixed: &[FixedCell]) -> Vec<Marker> {
    (0..1u16 << CELLS)
        .rev()
        .map(Marker::from_code)
        .filter(|m| fixed.iter().all(|f| m.get(f.row, f.col) == Some(f.value)))
        .collect()
}

#[cfg(test)]
pub fn all_markers() -> Vec<Marker> {
    generate(&[])
}

#[test]
fn test_rotate_cycle() {
    for m in all_markers() {
        let r4 = m.rotate().rotate().rotate().rotate();
        assert_eq!(m, r4);
    }
}

#[test]
fn test_rotate_moves_cells_clockwise() {
    let m = Marker::from_rows([
        [true, true, false],
        [false, false, false],
        [false, false, false],
    ]);
    let expected = Marker::from_rows([
        [false, false, true],
        [false, false, true],
        [false, false, false],
    ]);
    assert_eq!(m.rotate(), expected);

    for code in 0..1u16 << CELLS {
        let m = Marker::from_code(code);
        let r = m.rotate();
        for (row, col) in cell_ixs() {
            assert_eq!(m.get(row, col), r.get(col, SIDE - 1 - row));
        }
    }
}

#[test]
fn test_code_matches_cells() {
    for code in 0..1u16 << CELLS {
        assert_eq!(Marker::from_code(code).code(), code);
    }
    let m = Marker::from_code(0b100_000_001);
    assert_eq!(m.get(0, 0), Some(true));
    assert_eq!(m.get(2, 2), Some(true));
    assert_eq!(m.get(1, 1), Some(false));
    assert_eq!(m.get(3, 0), None);
}

#[test]
fn test_one_and_two_flipped() {
    use std::collections::HashSet;

    for m in all_markers() {
        let one: Vec<_> = m.one_flipped().collect();
        assert_eq!(one.len(), 9);
        assert_eq!(one.iter().collect::<HashSet<_>>().len(), 9);
        assert!(one.iter().all(|f| f.flip_count(&m) == 1));

        let two: Vec<_> = m.two_flipped().collect();
        assert_eq!(two.len(), 36);
        assert_eq!(two.iter().collect::<HashSet<_>>().len(), 36);
        assert!(two.iter().all(|f| f.flip_count(&m) == 2));
    }
}

#[test]
fn test_flip_order() {
    let m = Marker::from_code(0);
    let one: Vec<u16> = m.one_flipped().map(|f| f.code()).collect();
    assert_eq!(one[0], 0b100_000_000);
    assert_eq!(one[8], 0b000_000_001);

    let two: Vec<u16> = m.two_flipped().map(|f| f.code()).collect();
    assert_eq!(two[0], 0b110_000_000);
    assert_eq!(two[35], 0b000_000_011);
}

#[test]
fn test_flipped_random() {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    let binomial = |n: usize, k: usize| (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1));

    for _ in 0..100 {
        let m = Marker::from_code(rng.gen_range(0..1 << CELLS));
        let k = rng.gen_range(0..=CELLS);
        let flipped: Vec<_> = m.flipped(k).collect();
        assert_eq!(flipped.len(), binomial(CELLS, k));
        assert!(flipped.iter().all(|f| f.flip_count(&m) as usize == k));
    }
}

#[test]
fn test_generate() {
    let reduced = generate(&REDUCED);
    assert_eq!(reduced.len(), 64);
    assert_eq!(reduced[0].to_string(), "X_X\n_X_\nXXX");
    assert_eq!(reduced[63].to_string(), "___\n___\n___");

    let full = all_markers();
    assert_eq!(full.len(), 512);
    assert_eq!(full[0].code(), 0b111_111_111);
    assert_eq!(full[511].code(), 0);
}

#[test]
fn test_canonical_is_rotation_invariant() {
    for m in all_markers() {
        let canon = m.canonical();
        assert!(m.rotations().contains(&canon));
        for r in m.rotations() {
            assert_eq!(r.canonical(), canon);
        }
    }
}
