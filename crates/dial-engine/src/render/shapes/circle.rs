use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::paint::BlendMode;
use crate::render::batch::{instance_ranges, items_of_kind};
use crate::render::{Batch, RenderCtx};
use crate::scene::{DrawCmd, DrawItem, ShapeKind};

use super::common::{
    create_viewport_ubo, instance_color, viewport_ubo_layout_entry, BlendPipelines,
    InstanceBuffer, QuadBuffers, QuadVertex, ViewportUniform,
};

/// Renderer for `DrawCmd::Circle`.
///
/// Borders are an AA band on the inside of the circle's edge, so a bordered
/// circle never grows past `radius`. A transparent fill with a border draws a
/// ring.
pub struct CircleRenderer {
    pipelines: Option<BlendPipelines>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    quad: Option<QuadBuffers>,
    instances: InstanceBuffer<CircleInstance>,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            pipelines: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            quad: None,
            instances: InstanceBuffer::new("dial circle instance vbo"),
        }
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads every circle in `batches` and returns one instance range per
    /// circle batch, in batch order.
    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        items: &[&DrawItem],
        batches: &[Batch],
    ) -> Vec<Range<u32>> {
        let batch_count = batches.iter().filter(|b| b.kind == ShapeKind::Circle).count();
        let mut counts = vec![0u32; batch_count];
        let mut instances: Vec<CircleInstance> = Vec::new();

        for (n, item) in items_of_kind(items, batches, ShapeKind::Circle) {
            let DrawCmd::Circle(cmd) = &item.cmd else { continue };

            if !(cmd.radius > 0.0) || !cmd.center.is_finite() {
                continue;
            }

            let (border_width, border_color) = match &cmd.border {
                Some(b) => (b.width.clamp(0.0, cmd.radius), instance_color(b.color, item.blend)),
                None => (0.0, [0.0f32; 4]),
            };

            instances.push(CircleInstance {
                center: [cmd.center.x, cmd.center.y],
                radius_bw: [cmd.radius, border_width],
                fill: instance_color(cmd.fill, item.blend),
                border_color,
            });
            counts[n] += 1;
        }

        if !instances.is_empty() {
            self.ensure_pipelines(ctx);
            self.ensure_bindings(ctx);
            if self.quad.is_none() {
                self.quad = Some(QuadBuffers::new(ctx, "dial circle"));
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
            label: Some("dial circle shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/circle.wgsl").into()),
        });

        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("dial circle bgl"),
                entries: &[viewport_ubo_layout_entry(0)],
            });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("dial circle pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        self.pipelines = Some(BlendPipelines::new(
            ctx,
            "dial circle",
            &shader,
            &pipeline_layout,
            &[QuadVertex::layout(), CircleInstance::layout()],
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

        let viewport_ubo = create_viewport_ubo(ctx, "dial circle viewport ubo");

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dial circle bind group"),
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

/// Instance data layout (48 bytes):
///
///  offset  0  center       [f32; 2]   loc 1
///  offset  8  radius_bw    [f32; 2]   loc 2  (.x = radius, .y = border_width)
///  offset 16  fill         [f32; 4]   loc 3
///  offset 32  border_color [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_bw: [f32; 2],
    fill: [f32; 4],
    border_color: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_bw
        3 => Float32x4, // fill
        4 => Float32x4  // border_color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}
