use std::fmt::{Debug, Display};
use std::str::FromStr;

use thiserror::Error;

use crate::{Grid, Region};

/// A 24 bit color
///
/// # implementation details
/// stored as `0x00RRGGBB`, the top byte is always zero
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    bits: u32,
}
impl Rgb {
    pub const BLACK: Self = Self { bits: 0x00_00_00 };
    pub const WHITE: Self = Self { bits: 0xff_ff_ff };

    /// anything above the low 24 bits is discarded
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            bits: bits & 0xff_ff_ff,
        }
    }
    pub const fn to_bits(self) -> u32 {
        self.bits
    }
    pub fn from_channels([r, g, b]: [u8; 3]) -> Self {
        Self::from_bits(u32::from_be_bytes([0, r, g, b]))
    }
    pub fn to_channels(self) -> [u8; 3] {
        let [_, r, g, b] = self.bits.to_be_bytes();
        [r, g, b]
    }

    /// per channel mean of every cell in `region`, rounded down
    ///
    /// Usable directly as the aggregator of [`Quadtree::build`](crate::Quadtree::build).
    /// An empty region averages to black.
    ///
    /// # Panics
    /// if `region` reaches outside the grid
    #[allow(clippy::cast_possible_truncation)] // a mean of u8s always fits in a u8
    pub fn average(grid: &Grid<Rgb>, region: Region) -> Rgb {
        let area = region.area();
        if area == 0 {
            return Rgb::BLACK;
        }
        let mut sums = [0_u64; 3];
        for cell in grid.cells(region) {
            for (sum, channel) in sums.iter_mut().zip(cell.to_channels()) {
                *sum += u64::from(channel);
            }
        }
        Rgb::from_channels(sums.map(|sum| (sum / area) as u8))
    }

    /// true if no channel differs by more than `tolerance`
    pub fn similar(self, other: Rgb, tolerance: Tolerance) -> bool {
        std::iter::zip(self.to_channels(), other.to_channels())
            .all(|(a, b)| a.abs_diff(b) <= tolerance.0)
    }
}
impl Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rgb({:06x})", self.bits)
    }
}
impl Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.bits)
    }
}
/// accepts `rrggbb` or `#rrggbb`
impl FromStr for Rgb {
    type Err = ParseRgbError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseRgbError(s.to_owned()));
        }
        u32::from_str_radix(hex, 16)
            .map(Rgb::from_bits)
            .map_err(|_| ParseRgbError(s.to_owned()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid color {0:?}, expected 6 hex digits")]
pub struct ParseRgbError(pub String);

/// Largest per channel difference two colors may have and still be similar
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Tolerance(pub u8);
impl Tolerance {
    pub const EXACT: Self = Self(0);
}
impl Default for Tolerance {
    fn default() -> Self {
        Self(20)
    }
}

#[cfg(test)]
mod test {
    use crate::{Grid, Region, Rgb, Tolerance};

    #[test]
    fn channels() {
        let c = Rgb::from_channels([0x12, 0x34, 0x56]);
        assert_eq!(0x12_34_56, c.to_bits());
        assert_eq!([0x12, 0x34, 0x56], c.to_channels());
        assert_eq!(Rgb::WHITE, Rgb::from_bits(0xff_ff_ff_ff));
        assert_eq!("#123456", c.to_string());
        assert_eq!("Rgb(123456)", format!("{c:?}"));
    }

    #[test]
    fn parse() {
        assert_eq!(Ok(Rgb::from_bits(0xab_cd_ef)), "#abcdef".parse());
        assert_eq!(Ok(Rgb::from_bits(0x00_00_10)), "000010".parse());
        assert!("#abcd".parse::<Rgb>().is_err());
        assert!("+bcdef".parse::<Rgb>().is_err());
        assert!("zzzzzz".parse::<Rgb>().is_err());
        assert!("#1234567".parse::<Rgb>().is_err());
        assert_eq!(
            "invalid color \"#12\", expected 6 hex digits",
            "#12".parse::<Rgb>().unwrap_err().to_string()
        );
    }

    #[test]
    fn average() {
        let grid = Grid::from_rows(vec![
            vec![Rgb::from_bits(0x00_00_00), Rgb::from_bits(0x10_20_30)],
            vec![Rgb::from_bits(0x20_40_60), Rgb::from_bits(0x31_61_91)],
        ])
        .unwrap();
        assert_eq!(
            Rgb::from_bits(0x18_30_48),
            Rgb::average(&grid, Region::square(2))
        );
        assert_eq!(
            Rgb::from_bits(0x31_61_91),
            Rgb::average(&grid, Region::new(1, 1, 1))
        );
        assert_eq!(Rgb::BLACK, Rgb::average(&grid, Region::new(1, 1, 0)));
    }

    #[test]
    fn similar() {
        let a = Rgb::from_channels([100, 100, 100]);
        let b = Rgb::from_channels([120, 80, 100]);
        let c = Rgb::from_channels([121, 100, 100]);
        assert!(a.similar(b, Tolerance::default()));
        assert!(b.similar(a, Tolerance::default()));
        assert!(!a.similar(c, Tolerance::default()));
        assert!(!a.similar(b, Tolerance::EXACT));
        assert!(a.similar(a, Tolerance::EXACT));
    }
}
