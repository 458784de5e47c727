//! Plain text grids: one row per line, cells separated by whitespace.
//!
//! ```text
//! // comments and blank lines are skipped
//! #ff0000 #00ff00
//! #0000ff #ffffff
//! ```

use std::fmt::Display;
use std::io::{Error as IoError, Write};
use std::str::FromStr;

use itertools::Itertools;

use crate::{Grid, GridError};

/// this has very little error handling, panics unless the grid is valid
#[macro_export]
macro_rules! test_grid {
    {$s:literal} => {
        $crate::Grid::from_test_format($s)
    };
}

impl<C: FromStr> Grid<C> {
    /// parses every cell with `C::from_str`
    ///
    /// Errors carry the 1-based line and the 1-based cell within that line.
    pub fn read_from_string(s: &str) -> Result<Self, GridError> {
        let mut rows = Vec::new();
        for (line_index, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let row = line
                .split_ascii_whitespace()
                .enumerate()
                .map(|(cell_index, token)| {
                    token.parse().map_err(|_| GridError::Parse {
                        line: line_index + 1,
                        column: cell_index + 1,
                        token: token.to_owned(),
                    })
                })
                .collect::<Result<Vec<C>, _>>()?;
            rows.push(row);
        }
        Grid::from_rows(rows)
    }
    pub fn from_test_format(s: &str) -> Self {
        match Self::read_from_string(s) {
            Ok(grid) => grid,
            Err(e) => panic!("invalid test grid: {e}"),
        }
    }
}

impl<C: Display> Grid<C> {
    pub fn write_to(&self, mut write: impl Write) -> Result<(), IoError> {
        for row in self.rows() {
            writeln!(write, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
    pub fn write_to_string(&self) -> String {
        let mut out = Vec::new();
        self.write_to(&mut out).expect("writing to a Vec can't fail");
        String::from_utf8(out).expect("valid string")
    }
}
