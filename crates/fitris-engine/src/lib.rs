pub use self::{core::*, engine::*};

pub mod anim;
pub mod core;
pub mod engine;
