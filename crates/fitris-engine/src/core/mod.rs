//! Board and shape data structures.
//!
//! - [`Board`] - the grid of [`Cell`]s with per-cell fades
//! - [`Shape`] - the single falling shape and its movement rules
//! - [`BoardPos`] - signed board coordinate, `y = 0` at the bottom

pub use self::{board::*, cell::*, position::*, shape::*};

mod board;
mod cell;
mod position;
mod shape;
