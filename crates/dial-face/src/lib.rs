//! Analog clock face.
//!
//! Turns a wall-clock reading into hand angles ([`angles`]) and records the
//! face's fixed draw sequence into an engine draw list ([`face`]). Every
//! length is a ratio of the dial radius ([`metrics`]), so the face scales with
//! the surface it is drawn on.

pub mod angles;
pub mod canvas;
pub mod face;
pub mod metrics;
pub mod palette;

pub use angles::{Angle, HandAngles, TimeSample, NEAR_PI};
pub use canvas::Canvas;
pub use face::FaceRenderer;
pub use metrics::DialMetrics;
pub use palette::Palette;
