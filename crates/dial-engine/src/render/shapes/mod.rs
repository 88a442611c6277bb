//! Shape renderers.
//!
//! Each renderer uploads every instance of its kind once per frame in
//! `prepare` and draws instance ranges on demand in `draw`.

mod common;

pub mod circle;
pub mod rotated_rect;
pub mod text;
