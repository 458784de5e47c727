use itertools::iproduct;

use crate::{GridError, Region};

/// Square grid of colors whose side length is a power of two
///
/// # implementation details
/// cells are stored row-major, `(x, y)` lives at `y * side + x`
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid<C> {
    side: u32,
    cells: Vec<C>,
}
impl<C> Grid<C> {
    pub const MAX_SIDE_LOG2: u8 = 15;
    pub const MAX_SIDE: usize = 1 << Self::MAX_SIDE_LOG2;

    /// constructs a grid from `side * side` row-major cells
    pub fn new(side: usize, cells: Vec<C>) -> Result<Self, GridError> {
        let side = validate_side(side)?;
        let expected = side as usize * side as usize;
        if cells.len() != expected {
            return Err(GridError::CellCount {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { side, cells })
    }
    /// rows are north to south, each row west to east
    pub fn from_rows(rows: Vec<Vec<C>>) -> Result<Self, GridError> {
        let side = rows.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != side) {
            return Err(GridError::NotSquare {
                row,
                len: cells.len(),
                side,
            });
        }
        Self::new(side, rows.into_iter().flatten().collect())
    }
    pub fn from_fn(side: usize, mut f: impl FnMut(u32, u32) -> C) -> Result<Self, GridError> {
        let side32 = validate_side(side)?;
        let cells = iproduct!(0..side32, 0..side32).map(|(y, x)| f(x, y)).collect();
        Self::new(side, cells)
    }

    pub fn side(&self) -> u32 {
        self.side
    }
    /// depth of the quadtree built from this grid, `log2(side)`
    #[allow(clippy::cast_possible_truncation)] // side <= 2^15
    pub fn depth(&self) -> u8 {
        self.side.trailing_zeros() as u8
    }
    pub fn region(&self) -> Region {
        Region::square(self.side)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&C> {
        if x < self.side && y < self.side {
            Some(&self.cells[self.offset(x, y)])
        } else {
            None
        }
    }
    /// all cells of `region` row by row
    ///
    /// # Panics
    /// if `region` reaches outside the grid
    pub fn cells(&self, region: Region) -> impl Iterator<Item = &C> + '_ {
        assert!(
            self.region().covers(&region),
            "region {region} outside a grid of side {}",
            self.side
        );
        let Region { x, y, size } = region;
        iproduct!(y..y + size, x..x + size).map(move |(y, x)| &self.cells[self.offset(x, y)])
    }
    pub fn rows(&self) -> impl Iterator<Item = &[C]> {
        self.cells.chunks_exact(self.side as usize)
    }
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.side as usize + x as usize
    }
}

#[allow(clippy::cast_possible_truncation)] // checked against MAX_SIDE
fn validate_side(side: usize) -> Result<u32, GridError> {
    if side == 0 {
        Err(GridError::Empty)
    } else if !side.is_power_of_two() {
        Err(GridError::NotPowerOfTwo { side })
    } else if side > Grid::<()>::MAX_SIDE {
        Err(GridError::TooLarge {
            side,
            max: Grid::<()>::MAX_SIDE,
        })
    } else {
        Ok(side as u32)
    }
}
