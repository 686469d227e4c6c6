//! Frame-time animation primitives.
//!
//! - [`Timer`] - one-shot countdown reporting normalized progress
//! - [`Lerp`] - value interpolated over a timer with a [`LerpCurve`]
//! - [`Rgba`] - color type used for cell tints and fades

pub use self::{color::*, lerp::*, timer::*};

mod color;
mod lerp;
mod timer;
