use std::fmt::Display;

use crate::{Quad, Quadrant};

/// Square area of a grid.
///
/// x increases to the east, y increases to the south.
/// `(x, y)` is the north-western most cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub size: u32,
}
impl Region {
    pub const fn new(x: u32, y: u32, size: u32) -> Self {
        Self { x, y, size }
    }
    /// the whole grid of the given side length
    pub const fn square(side: u32) -> Self {
        Self::new(0, 0, side)
    }

    pub fn is_unit(&self) -> bool {
        self.size == 1
    }
    pub fn area(&self) -> u64 {
        u64::from(self.size) * u64::from(self.size)
    }

    /// inclusive on both ends: `x <= px <= x + size - 1`
    pub fn contains(&self, px: i64, py: i64) -> bool {
        let (x, y, size) = self.bounds();
        px >= x && px <= x + size - 1 && py >= y && py <= y + size - 1
    }
    /// half-open: `x <= px < x + size`
    pub fn contains_half_open(&self, px: i64, py: i64) -> bool {
        let (x, y, size) = self.bounds();
        px >= x && px < x + size && py >= y && py < y + size
    }
    /// true if `other` lies completely inside `self`
    pub fn covers(&self, other: &Region) -> bool {
        let (x, y, size) = self.bounds();
        let (ox, oy, osize) = other.bounds();
        ox >= x && oy >= y && ox + osize <= x + size && oy + osize <= y + size
    }
    fn bounds(&self) -> (i64, i64, i64) {
        (
            i64::from(self.x),
            i64::from(self.y),
            i64::from(self.size),
        )
    }

    /// the sub region occupying the given quadrant
    ///
    /// # Panics
    /// on a unit region, it has no quadrants
    pub fn quadrant(&self, q: Quadrant) -> Self {
        assert!(self.size > 1, "unit region {self} can't be split");
        let half = self.size / 2;
        Self {
            x: if q.is_west() { self.x } else { self.x + half },
            y: if q.is_north() { self.y } else { self.y + half },
            size: half,
        }
    }
    pub fn split(&self) -> Quad<Self> {
        debug_assert!(self.size > 1 && self.size.is_power_of_two());
        Quad::from_fn(|q| self.quadrant(q))
    }
}
impl Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.size, self.size)
    }
}
