//! Neighbour directions on the 4-connected grid

/// One of the four grid neighbours of a pixel.
///
/// The discriminants give the cyclic visiting order used by the flood
/// algorithms: up (+y), right (+x), down (-y), left (-x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// (0, +1)
    Up = 0,
    /// (+1, 0)
    Right = 1,
    /// (0, -1)
    Down = 2,
    /// (-1, 0)
    Left = 3,
}

const DX: [isize; 4] = [0, 1, 0, -1];
const DY: [isize; 4] = [1, 0, -1, 0];

impl Direction {
    /// All four directions in cyclic order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Get the x offset for this direction
    #[inline]
    pub fn dx(self) -> isize {
        DX[self as usize]
    }

    /// Get the y offset for this direction
    #[inline]
    pub fn dy(self) -> isize {
        DY[self as usize]
    }

    /// Slot index of this direction, in `0..4`
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction for a slot index; wraps modulo 4
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    /// The direction pointing back, as seen from the neighbour
    #[inline]
    pub fn opposite(self) -> Self {
        Self::from_index(self as usize + 2)
    }

    /// The four directions in cyclic order starting at `start`
    pub fn rotated(start: usize) -> impl Iterator<Item = Direction> {
        (0..4).map(move |k| Self::from_index(start + k))
    }
}
