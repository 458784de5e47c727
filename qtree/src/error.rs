use thiserror::Error;

use crate::NodeId;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QuadtreeError {
    #[error("invalid child index {index}: must be in 0..=3 on a node with children")]
    InvalidIndex { index: i64 },
    #[error("node {id:?} does not belong to this tree")]
    InvalidNode { id: NodeId },
    #[error("malformed input: {0}")]
    MalformedInput(#[from] GridError),
}

/// Reasons a grid (or a region of one) cannot be turned into a quadtree
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid is empty")]
    Empty,
    #[error("row {row} has {len} cells but the grid has {side} rows")]
    NotSquare { row: usize, len: usize, side: usize },
    #[error("side length {side} is not a power of two")]
    NotPowerOfTwo { side: usize },
    #[error("side length {side} exceeds the maximum of {max}")]
    TooLarge { side: usize, max: usize },
    #[error("expected {expected} cells but got {actual}")]
    CellCount { expected: usize, actual: usize },
    #[error("region {region} is not a power-of-two square inside a grid of side {side}")]
    RegionOutOfBounds { region: crate::Region, side: u32 },
    #[error("line {line}, column {column}: invalid color {token:?}")]
    Parse {
        line: usize,
        column: usize,
        token: String,
    },
}
