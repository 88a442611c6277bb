//! Paint model shared between the face and renderers.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - compositing mode applied to recorded shapes
//!
//! Geometry types remain in `coords`.

pub mod blend;
pub mod color;

pub use blend::BlendMode;
pub use color::Color;
