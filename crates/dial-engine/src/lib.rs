//! Dial engine crate.
//!
//! Owns the platform + GPU runtime pieces the clock face is drawn with:
//! window loop, frame clock, draw list and the wgpu shape renderers.

pub mod device;
pub mod window;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
