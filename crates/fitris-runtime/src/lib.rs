//! Terminal event loop for frame-stepped games.
//!
//! - [`App`] - callbacks driven by the loop
//! - [`Runtime`] - owns the terminal session and dispatches events
//! - [`RenderMode`] - when to redraw

pub use self::{app::App, event_loop::RenderMode, runtime::Runtime};

mod app;
mod event;
mod event_loop;
mod runtime;
