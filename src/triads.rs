//! Starter triads for the contour tracer: for each 8-neighborhood of a filled
//! pixel, the runs of filled neighbors that are separated by an open cardinal
//! cell.

use std::fmt;

pub const MAX_TRIADS: usize = 4;

/// Chain code written for padding and closed borders.
pub const CLOSED: u8 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    TopRight,
    Right,
    BottomRight,
    Down,
    BottomLeft,
    Left,
    TopLeft,
}

impl Direction {
    pub const CLOCKWISE: [Self; 8] = [
        Self::Up,
        Self::TopRight,
        Self::Right,
        Self::BottomRight,
        Self::Down,
        Self::BottomLeft,
        Self::Left,
        Self::TopLeft,
    ];

    pub fn clockwise(self) -> Self {
        match self {
            Self::Up => Self::TopRight,
            Self::TopRight => Self::Right,
            Self::Right => Self::BottomRight,
            Self::BottomRight => Self::Down,
            Self::Down => Self::BottomLeft,
            Self::BottomLeft => Self::Left,
            Self::Left => Self::TopLeft,
            Self::TopLeft => Self::Up,
        }
    }

    /// Bit of the kernel byte holding this neighbor. Bits run row by row,
    /// skipping the center.
    pub fn bit(self) -> u8 {
        match self {
            Self::TopLeft => 0,
            Self::Up => 1,
            Self::TopRight => 2,
            Self::Left => 3,
            Self::Right => 4,
            Self::BottomLeft => 5,
            Self::Down => 6,
            Self::BottomRight => 7,
        }
    }

    pub fn is_cardinal(self) -> bool {
        matches!(self, Self::Up | Self::Right | Self::Down | Self::Left)
    }

    /// Opposite directions sum to 9.
    pub fn chain_code(self) -> u8 {
        match self {
            Self::Up => 1,
            Self::TopRight => 2,
            Self::Right => 3,
            Self::BottomRight => 4,
            Self::TopLeft => 5,
            Self::Left => 6,
            Self::BottomLeft => 7,
            Self::Down => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::TopRight => "topRight",
            Self::Right => "right",
            Self::BottomRight => "bottomRight",
            Self::Down => "down",
            Self::BottomLeft => "bottomLeft",
            Self::Left => "left",
            Self::TopLeft => "topLeft",
        }
    }
}

/// Last filled neighbor before a gap, and first filled neighbor after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triad {
    pub from: Direction,
    pub to: Direction,
}

pub type Triads = heapless::Vec<Triad, MAX_TRIADS>;

/// The 8 neighbors of a filled pixel; bit set means filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Kernel(pub u8);

impl Kernel {
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=u8::MAX).map(Self)
    }

    pub fn is_filled(self, dxn: Direction) -> bool {
        (self.0 >> dxn.bit()) & 1 == 1
    }

    pub fn triads(self) -> Triads {
        let mut triads = Triads::new();

        // first filled neighbor clockwise after `Up`
        let Some(mut dxn) = std::iter::successors(Some(Direction::Up.clockwise()), |d| {
            Some(d.clockwise())
        })
        .take(8)
        .find(|&d| self.is_filled(d)) else {
            return triads;
        };

        let mut from = dxn;
        let mut crossed_cardinal = false;

        for _ in 0..8 {
            let next = dxn.clockwise();
            let (here, there) = (self.is_filled(dxn), self.is_filled(next));

            if here && !there {
                from = dxn;
                crossed_cardinal = false;
            }

            if !here && dxn.is_cardinal() {
                crossed_cardinal = true;
            }

            if !here && there && crossed_cardinal {
                // one triad per open cardinal, so this never overflows
                let _ = triads.push(Triad { from, to: next });
            }

            dxn = next;
        }

        triads
    }

    /// `(from, to)` chain codes of every triad, padded with [`CLOSED`].
    pub fn chain_codes(self) -> [u8; 2 * MAX_TRIADS] {
        let mut codes = [CLOSED; 2 * MAX_TRIADS];
        for (i, triad) in self.triads().iter().enumerate() {
            codes[2 * i] = triad.from.chain_code();
            codes[2 * i + 1] = triad.to.chain_code();
        }
        codes
    }
}

/// Draws the neighborhood as three rows of 0/1, with a blank center.
impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bit = |i: u8| (self.0 >> i) & 1;
        writeln!(f, "{}{}{}", bit(0), bit(1), bit(2))?;
        writeln!(f, "{} {}", bit(3), bit(4))?;
        write!(f, "{}{}{}", bit(5), bit(6), bit(7))
    }
}

#[cfg(test)]
fn walk(kernel: u8) -> Vec<(Direction, Direction)> {
    Kernel(kernel)
        .triads()
        .iter()
        .map(|t| (t.from, t.to))
        .collect()
}

#[test]
fn test_clockwise_cycle() {
    for (i, d) in Direction::CLOCKWISE.into_iter().enumerate() {
        assert_eq!(d.clockwise(), Direction::CLOCKWISE[(i + 1) % 8]);
        assert_eq!(d.is_cardinal(), i % 2 == 0);
    }

    let mut bits: Vec<u8> = Direction::CLOCKWISE.iter().map(|d| d.bit()).collect();
    bits.sort_unstable();
    assert_eq!(bits, (0..8).collect::<Vec<_>>());
}

#[test]
fn test_no_triads() {
    use Direction::*;

    // nothing filled, everything filled, only diagonal gaps
    assert!(walk(0).is_empty());
    assert!(walk(0b1111_1111).is_empty());
    assert!(walk(0b0101_1010).is_empty());
    assert_eq!(walk(0b0000_0111), [(TopRight, TopLeft)]);
}

#[test]
fn test_single_runs() {
    use Direction::*;

    assert_eq!(walk(0b0000_0001), [(TopLeft, TopLeft)]);
    assert_eq!(walk(0b0000_0010), [(Up, Up)]);
    assert_eq!(walk(0b0001_0000), [(Right, Right)]);
}

#[test]
fn test_split_runs() {
    use Direction::*;

    assert_eq!(walk(5), [(TopRight, TopLeft), (TopLeft, TopRight)]);
    assert_eq!(walk(24), [(Right, Left), (Left, Right)]);
    assert_eq!(
        walk(37),
        [(TopRight, BottomLeft), (BottomLeft, TopLeft), (TopLeft, TopRight)]
    );
    assert_eq!(
        walk(165),
        [
            (TopRight, BottomRight),
            (BottomRight, BottomLeft),
            (BottomLeft, TopLeft),
            (TopLeft, TopRight)
        ]
    );
}

#[test]
fn test_chain_codes() {
    assert_eq!(Kernel(0).chain_codes(), [0; 8]);
    assert_eq!(Kernel(1).chain_codes(), [5, 5, 0, 0, 0, 0, 0, 0]);
    assert_eq!(Kernel(37).chain_codes(), [2, 7, 7, 5, 5, 2, 0, 0]);
    assert_eq!(Kernel(69).chain_codes(), [2, 8, 8, 5, 5, 2, 0, 0]);

    for d in Direction::CLOCKWISE {
        let opposite = d.clockwise().clockwise().clockwise().clockwise();
        assert_eq!(d.chain_code() + opposite.chain_code(), 9);
    }
}

#[test]
fn test_triad_count_bounded() {
    for kernel in Kernel::all() {
        let open_cardinals = Direction::CLOCKWISE
            .iter()
            .filter(|d| d.is_cardinal() && !kernel.is_filled(**d))
            .count();
        assert!(kernel.triads().len() <= open_cardinals);
    }
}

#[test]
fn test_kernel_display() {
    assert_eq!(Kernel(0b1010_0101).to_string(), "101\n0 0\n101");
    assert_eq!(Kernel(0b0000_0010).to_string(), "010\n0 0\n000");
}
