use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::paint::BlendMode;
use crate::render::batch::{instance_ranges, items_of_kind};
use crate::render::{Batch, RenderCtx};
use crate::scene::{DrawCmd, DrawItem, RotatedRectCmd, ShapeKind};

use super::common::{
    create_viewport_ubo, instance_color, viewport_ubo_layout_entry, BlendPipelines,
    InstanceBuffer, QuadVertex, QuadBuffers, ViewportUniform,
};

/// Renderer for `DrawCmd::RotatedRect`.
///
/// The quad is built in the command's local frame and rotated about the pivot
/// in the vertex shader; coverage comes from a rounded-box SDF, so a corner
/// radius of half the shorter side renders a capsule.
pub struct RotatedRectRenderer {
    pipelines: Option<BlendPipelines>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad: Option<QuadBuffers>,
    instances: InstanceBuffer<RotatedRectInstance>,
}

impl Default for RotatedRectRenderer {
    fn default() -> Self {
        Self {
            pipelines: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            quad: None,
            instances: InstanceBuffer::new("dial rotated rect instance vbo"),
        }
    }
}

impl RotatedRectRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads every rotated rect in `batches` and returns one instance range
    /// per rotated-rect batch, in batch order.
    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        items: &[&DrawItem],
        batches: &[Batch],
    ) -> Vec<Range<u32>> {
        let batch_count = batches.iter().filter(|b| b.kind == ShapeKind::RotatedRect).count();
        let mut counts = vec![0u32; batch_count];
        let mut instances: Vec<RotatedRectInstance> = Vec::new();

        for (n, item) in items_of_kind(items, batches, ShapeKind::RotatedRect) {
            let DrawCmd::RotatedRect(cmd) = &item.cmd else { continue };
            if let Some(inst) = RotatedRectInstance::from_cmd(cmd, item.blend) {
                instances.push(inst);
                counts[n] += 1;
            }
        }

        if !instances.is_empty() {
            self.ensure_pipelines(ctx);
            self.ensure_bindings(ctx);
            if self.quad.is_none() {
                self.quad = Some(QuadBuffers::new(ctx, "dial rotated rect"));
            }
            if let Some(ubo) = &self.viewport_ubo {
                ctx.queue
                    .write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::for_ctx(ctx)));
            }
            self.instances.upload(ctx, &instances);
        }

        instance_ranges(&counts)
    }

    /// Draws one prepared instance range into an open render pass.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, blend: BlendMode, range: Range<u32>) {
        if range.is_empty() {
            return;
        }
        let (Some(pipelines), Some(bind_group), Some(quad)) =
            (&self.pipelines, &self.bind_group, &self.quad)
        else {
            return;
        };

        rpass.set_pipeline(pipelines.get(blend));
        rpass.set_bind_group(0, bind_group, &[]);
        quad.bind(rpass);
        if self.instances.bind(rpass) {
            rpass.draw_indexed(0..6, 0, range);
        }
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipelines.as_ref().is_some_and(|p| p.matches(ctx.surface_format)) {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("dial rotated rect shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/rotated_rect.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("dial rotated rect bgl"),
                entries: &[viewport_ubo_layout_entry(0)],
            });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("dial rotated rect pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        self.pipelines = Some(BlendPipelines::new(
            ctx,
            "dial rotated rect",
            &shader,
            &pipeline_layout,
            &[QuadVertex::layout(), RotatedRectInstance::layout()],
        ));
        self.bind_group_layout = Some(bind_group_layout);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };

        let viewport_ubo = create_viewport_ubo(ctx, "dial rotated rect viewport ubo");

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dial rotated rect bind group"),
            layout: bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (72 bytes):
///
///  offset  0  pivot        [f32; 2]   loc 1
///  offset  8  rect_min     [f32; 2]   loc 2  (local frame, before rotation)
///  offset 16  rect_size    [f32; 2]   loc 3
///  offset 24  params       [f32; 4]   loc 4  (angle, corner_radius, border_width, 0)
///  offset 40  fill         [f32; 4]   loc 5
///  offset 56  border_color [f32; 4]   loc 6
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct RotatedRectInstance {
    pivot: [f32; 2],
    rect_min: [f32; 2],
    rect_size: [f32; 2],
    params: [f32; 4],
    fill: [f32; 4],
    border_color: [f32; 4],
}

impl RotatedRectInstance {
    const ATTRS: [wgpu::VertexAttribute; 6] = wgpu::vertex_attr_array![
        1 => Float32x2, // pivot
        2 => Float32x2, // rect_min
        3 => Float32x2, // rect_size
        4 => Float32x4, // params
        5 => Float32x4, // fill
        6 => Float32x4  // border_color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RotatedRectInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Returns `None` for empty or non-finite geometry.
    fn from_cmd(cmd: &RotatedRectCmd, blend: BlendMode) -> Option<Self> {
        let rect = cmd.rect.normalized();
        if rect.is_empty() || !rect.is_finite() || !cmd.pivot.is_finite() || !cmd.angle.is_finite()
        {
            return None;
        }

        let half_min = 0.5 * rect.size.x.min(rect.size.y);
        let corner_radius = cmd.corner_radius.clamp(0.0, half_min);
        let (border_width, border_color) = match &cmd.border {
            Some(b) => (b.width.clamp(0.0, half_min), instance_color(b.color, blend)),
            None => (0.0, [0.0f32; 4]),
        };

        Some(Self {
            pivot: [cmd.pivot.x, cmd.pivot.y],
            rect_min: [rect.origin.x, rect.origin.y],
            rect_size: [rect.size.x, rect.size.y],
            params: [cmd.angle, corner_radius, border_width, 0.0],
            fill: instance_color(cmd.fill, blend),
            border_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;
    use crate::scene::Border;

    fn capsule(width: f32, corner: f32) -> RotatedRectCmd {
        RotatedRectCmd::new(
            Vec2::new(50.0, 50.0),
            0.5,
            Rect::new(-width / 2.0, 0.0, width, 40.0),
            corner,
            Color::BLACK,
        )
    }

    #[test]
    fn corner_radius_is_clamped_to_half_width() {
        let inst = RotatedRectInstance::from_cmd(&capsule(6.0, 100.0), BlendMode::Normal);
        assert_eq!(inst.map(|i| i.params[1]), Some(3.0));
    }

    #[test]
    fn negative_size_is_normalized() {
        let mut cmd = capsule(6.0, 0.0);
        cmd.rect = Rect::new(3.0, 40.0, -6.0, -40.0);
        let inst = RotatedRectInstance::from_cmd(&cmd, BlendMode::Normal);
        assert_eq!(inst.map(|i| (i.rect_min, i.rect_size)), Some(([-3.0, 0.0], [6.0, 40.0])));
    }

    #[test]
    fn degenerate_rects_are_skipped() {
        let mut cmd = capsule(0.0, 0.0);
        assert!(RotatedRectInstance::from_cmd(&cmd, BlendMode::Normal).is_none());

        cmd = capsule(4.0, 0.0);
        cmd.angle = f32::NAN;
        assert!(RotatedRectInstance::from_cmd(&cmd, BlendMode::Normal).is_none());
    }

    #[test]
    fn border_is_packed_with_params() {
        let cmd = capsule(10.0, 0.0).with_border(Border::new(2.0, Color::WHITE));
        let inst = RotatedRectInstance::from_cmd(&cmd, BlendMode::Normal);
        assert_eq!(inst.map(|i| i.params), Some([0.5, 0.0, 2.0, 0.0]));
        assert_eq!(inst.map(|i| i.border_color), Some(Color::WHITE.to_array()));
    }
}
