//! Quadtree decomposition of square color grids.
//!
//! A [`Quadtree`] is built once from a [`Grid`] and then queried read-only:
//! listing nodes down to a level, searching for similar colors, and locating
//! the node that covers a point.

// lints
#![warn(clippy::pedantic)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::module_name_repetitions,
    clippy::manual_range_contains,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod color;
mod error;
mod grid;
mod node;
mod quad;
mod region;
mod text_format;
mod tree;
mod ops {
    mod collect;
    mod find_matching;
    mod locate;

    pub use find_matching::*;
}

pub use color::*;
pub use error::*;
pub use grid::*;
pub use node::*;
pub use ops::*;
pub use quad::*;
pub use region::*;
pub use text_format::*;
pub use tree::*;
