//! Core engine-facing contracts.
//!
//! The stable interface between the runtime (platform loop) and the
//! application drawing into it: the `App` trait and the per-frame context.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
