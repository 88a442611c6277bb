//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, and wires them to the GPU layer.

mod appearance;
mod runtime;

pub use appearance::Appearance;
pub use runtime::{Runtime, RuntimeConfig};
