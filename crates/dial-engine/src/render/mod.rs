//! GPU rendering subsystem.
//!
//! Renderers consume `scene` draw streams and issue GPU commands via wgpu.
//! Each shape renderer owns its GPU resources (pipelines, buffers, atlas);
//! [`SceneRenderer`] sequences them so paint order holds across shape kinds.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod batch;
mod ctx;
mod scene;
pub mod shapes;

pub use batch::{split_batches, Batch};
pub use ctx::{RenderCtx, RenderTarget};
pub use scene::SceneRenderer;
