//! Quadrant indexing relative to a center point.

use quadra_core::Position;
use smallvec::SmallVec;

/// Quadrants visited from the top level down to a leaf.
pub type QuadPath = SmallVec<[Quadrant; 8]>;

/// One of the four subdivisions of a square, in child-slot order.
///
/// Membership tests run in index order and the first match wins:
///
/// | index | quadrant | test |
/// |-------|----------|------|
/// | 0 | `NorthWest` | `x <= cx && y >= cy` |
/// | 1 | `NorthEast` | `x >= cx && y >= cy` |
/// | 2 | `SouthEast` | `x >= cx && y <= cy` |
/// | 3 | `SouthWest` | everything else |
///
/// So the center itself belongs to `NorthWest`, a point on the vertical
/// axis below the center belongs to `SouthEast`, and a point on the
/// horizontal axis left of the center belongs to `NorthWest`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Quadrant {
    /// Up and to the left.
    NorthWest = 0,
    /// Up and to the right.
    NorthEast = 1,
    /// Down and to the right.
    SouthEast = 2,
    /// Down and to the left.
    SouthWest = 3,
}

impl Quadrant {
    /// All quadrants in child-slot order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthEast,
        Quadrant::SouthWest,
    ];

    /// The quadrant of `center` that `position` falls into.
    ///
    /// Total over all inputs: a NaN coordinate fails every comparison and
    /// lands in `SouthWest`.
    pub fn of(position: Position, center: Position) -> Self {
        let (x, y) = (position.x, position.y);
        let (cx, cy) = (center.x, center.y);
        if x <= cx && y >= cy {
            Self::NorthWest
        } else if x >= cx && y >= cy {
            Self::NorthEast
        } else if x >= cx && y <= cy {
            Self::SouthEast
        } else {
            Self::SouthWest
        }
    }

    /// Child slot index, 0 to 3.
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Quadrant for a child slot index.
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Unit diagonal pointing into this quadrant, e.g. `(-1, 1)` for `NorthWest`.
    pub fn offset(self) -> Position {
        match self {
            Self::NorthWest => Position::new(-1.0, 1.0),
            Self::NorthEast => Position::new(1.0, 1.0),
            Self::SouthEast => Position::new(1.0, -1.0),
            Self::SouthWest => Position::new(-1.0, -1.0),
        }
    }
}
