//! Named child slots for what would otherwise be fixed length arrays

use std::ops::Index;

/// Child slot of a node, in construction and traversal order.
///
/// The discriminant is the public child index: NW = 0, NE = 1, SW = 2, SE = 3.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Quadrant {
    NW,
    NE,
    SW,
    SE,
}
impl Quadrant {
    pub const ALL: [Quadrant; 4] = [Self::NW, Self::NE, Self::SW, Self::SE];

    /// `None` for anything outside `0..=3`
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::NW),
            1 => Some(Self::NE),
            2 => Some(Self::SW),
            3 => Some(Self::SE),
            _ => None,
        }
    }
    pub fn index(self) -> usize {
        match self {
            Self::NW => 0,
            Self::NE => 1,
            Self::SW => 2,
            Self::SE => 3,
        }
    }

    pub fn is_west(self) -> bool {
        matches!(self, Self::NW | Self::SW)
    }
    pub fn is_north(self) -> bool {
        matches!(self, Self::NW | Self::NE)
    }

    pub fn iter_all() -> std::array::IntoIter<Quadrant, 4> {
        Self::ALL.into_iter()
    }
}

/// One value per [`Quadrant`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Quad<T> {
    pub nw: T,
    pub ne: T,
    pub sw: T,
    pub se: T,
}
impl<T> Quad<T> {
    pub fn from_fn(mut f: impl FnMut(Quadrant) -> T) -> Self {
        Quad {
            nw: f(Quadrant::NW),
            ne: f(Quadrant::NE),
            sw: f(Quadrant::SW),
            se: f(Quadrant::SE),
        }
    }
    pub fn iter(&self) -> std::array::IntoIter<&T, 4> {
        [&self.nw, &self.ne, &self.sw, &self.se].into_iter()
    }
    /// pairs every value with the slot it occupies
    pub fn iter_quadrants(&self) -> impl Iterator<Item = (Quadrant, &T)> {
        Quadrant::iter_all().zip(self.iter())
    }
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Quad<U> {
        let Quad { nw, ne, sw, se } = self;
        Quad {
            nw: f(nw),
            ne: f(ne),
            sw: f(sw),
            se: f(se),
        }
    }
}
impl<T> IntoIterator for Quad<T> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, 4>;
    fn into_iter(self) -> Self::IntoIter {
        [self.nw, self.ne, self.sw, self.se].into_iter()
    }
}
impl<'a, T> IntoIterator for &'a Quad<T> {
    type Item = &'a T;
    type IntoIter = std::array::IntoIter<&'a T, 4>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
impl<T> Index<Quadrant> for Quad<T> {
    type Output = T;
    fn index(&self, index: Quadrant) -> &Self::Output {
        match index {
            Quadrant::NW => &self.nw,
            Quadrant::NE => &self.ne,
            Quadrant::SW => &self.sw,
            Quadrant::SE => &self.se,
        }
    }
}
