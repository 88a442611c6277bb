use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::coords::Vec2;
use crate::paint::BlendMode;
use crate::render::batch::{instance_ranges, items_of_kind};
use crate::render::{Batch, RenderCtx};
use crate::scene::{DrawCmd, DrawItem, ShapeKind, TextCmd};
use crate::text::FontSystem;

use super::common::{
    create_viewport_ubo, instance_color, viewport_ubo_layout_entry, BlendPipelines,
    InstanceBuffer, QuadBuffers, QuadVertex, ViewportUniform,
};

// ── atlas constants ────────────────────────────────────────────────────────

const ATLAS_SIZE: u32 = 2048;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Shelf packer state for the glyph atlas.
struct Shelf {
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl Default for Shelf {
    fn default() -> Self {
        Self { cursor_x: GLYPH_PADDING, cursor_y: GLYPH_PADDING, row_height: 0, full: false }
    }
}

impl Shelf {
    /// Reserves a `w × h` slot, returning its top-left texel.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > ATLAS_SIZE || w + 2 * GLYPH_PADDING > ATLAS_SIZE {
            self.full = true;
            return None;
        }

        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized by fontdue at `size * scale_factor` so text stays
/// crisp on high-DPI surfaces, then cached in a 2048 × 2048 R8Unorm atlas for
/// the renderer's lifetime. The cache key (`GlyphRasterConfig`) encodes font,
/// glyph index and pixel size, so the numerals of a face are rasterized once
/// per size.
pub struct TextRenderer {
    pipelines: Option<BlendPipelines>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    bind_group: Option<wgpu::BindGroup>,
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    atlas_texture: Option<wgpu::Texture>,
    atlas_view: Option<wgpu::TextureView>,
    shelf: Shelf,
    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,

    quad: Option<QuadBuffers>,
    instances: InstanceBuffer<GlyphInstance>,

    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipelines: None,
            bind_group_layout: None,
            bind_group: None,
            viewport_ubo: None,
            sampler: None,
            atlas_texture: None,
            atlas_view: None,
            shelf: Shelf::default(),
            glyph_cache: HashMap::new(),
            quad: None,
            instances: InstanceBuffer::new("dial text instance vbo"),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out every text command in `batches`, rasterizing glyphs on first
    /// use, and returns one instance range per text batch, in batch order.
    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        items: &[&DrawItem],
        batches: &[Batch],
        fonts: &FontSystem,
    ) -> Vec<Range<u32>> {
        let batch_count = batches.iter().filter(|b| b.kind == ShapeKind::Text).count();
        let mut counts = vec![0u32; batch_count];
        let mut instances: Vec<GlyphInstance> = Vec::new();

        let has_text = items_of_kind(items, batches, ShapeKind::Text).next().is_some();
        if has_text {
            self.ensure_atlas(ctx);
        }

        for (n, item) in items_of_kind(items, batches, ShapeKind::Text) {
            let DrawCmd::Text(cmd) = &item.cmd else { continue };
            let before = instances.len();
            self.layout_glyphs(ctx, cmd, item.blend, fonts, &mut instances);
            counts[n] += (instances.len() - before) as u32;
        }

        if !instances.is_empty() {
            self.ensure_pipelines(ctx);
            self.ensure_sampler(ctx);
            self.ensure_bindings(ctx);
            if self.quad.is_none() {
                self.quad = Some(QuadBuffers::new(ctx, "dial text"));
            }
            if let Some(ubo) = &self.viewport_ubo {
                ctx.queue
                    .write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::for_ctx(ctx)));
            }
            self.instances.upload(ctx, &instances);
        }

        instance_ranges(&counts)
    }

    /// Draws one prepared glyph range into an open render pass.
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

    fn layout_glyphs(
        &mut self,
        ctx: &RenderCtx<'_>,
        cmd: &TextCmd,
        blend: BlendMode,
        fonts: &FontSystem,
        out: &mut Vec<GlyphInstance>,
    ) {
        if cmd.text.is_empty() || !(cmd.size > 0.0) || !cmd.center.is_finite() {
            return;
        }
        let Some(font) = fonts.get(cmd.font) else {
            log::warn!("TextRenderer: unknown FontId {:?}, skipping", cmd.font);
            return;
        };

        let scale = ctx.scale_factor;
        let extent = fonts.measure_text_scaled(&cmd.text, cmd.font, cmd.size, scale);
        let top_left = cmd.center - extent * 0.5;

        self.layout.reset(&LayoutSettings::default());
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

        // Snapshot so the borrow on `self.layout` ends before atlas uploads.
        let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        let color = instance_color(cmd.color, blend);

        for (key, x, y, w, h) in glyphs {
            if !self.glyph_cache.contains_key(&key) {
                let (metrics, bitmap) = font.rasterize_config(key);
                if metrics.width == 0 || metrics.height == 0 {
                    continue;
                }
                if let Some(entry) =
                    self.upload_glyph(ctx, &bitmap, metrics.width as u32, metrics.height as u32)
                {
                    self.glyph_cache.insert(key, entry);
                }
            }
            let Some(cached) = self.glyph_cache.get(&key) else { continue };

            // Snap to the physical pixel grid, then back to logical px.
            let min = Vec2::new(x.round(), y.round()) / scale + top_left;
            let max = min + Vec2::new(w as f32, h as f32) / scale;

            out.push(GlyphInstance {
                dst_min: [min.x, min.y],
                dst_max: [max.x, max.y],
                uv_min: cached.uv_min,
                uv_max: cached.uv_max,
                color,
            });
        }
    }

    // ── atlas helpers ──────────────────────────────────────────────────────

    fn upload_glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<CachedGlyph> {
        let was_full = self.shelf.full;
        let Some((gx, gy)) = self.shelf.place(w, h) else {
            if !was_full {
                log::warn!(
                    "TextRenderer: glyph atlas is full ({ATLAS_SIZE}×{ATLAS_SIZE}); \
                     some glyphs will not be rendered"
                );
            }
            return None;
        };

        let atlas = self.atlas_texture.as_ref()?;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let atlas_f = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / atlas_f, gy as f32 / atlas_f],
            uv_max: [(gx + w) as f32 / atlas_f, (gy + h) as f32 / atlas_f],
        })
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipelines(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipelines.as_ref().is_some_and(|p| p.matches(ctx.surface_format)) {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("dial text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("dial text bgl"),
            entries: &[
                viewport_ubo_layout_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("dial text pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        self.pipelines = Some(BlendPipelines::new(
            ctx,
            "dial text",
            &shader,
            &pipeline_layout,
            &[QuadVertex::layout(), GlyphInstance::layout()],
        ));
        self.bind_group_layout = Some(bgl);
        self.bind_group = None;
        self.viewport_ubo = None;
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_texture.is_some() {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("dial text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.atlas_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.atlas_texture = Some(texture);
        self.shelf = Shelf::default();
        self.glyph_cache.clear();
        self.bind_group = None;
    }

    fn ensure_sampler(&mut self, ctx: &RenderCtx<'_>) {
        if self.sampler.is_some() {
            return;
        }
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("dial text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
    }

    fn ensure_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.bind_group.is_some() && self.viewport_ubo.is_some() {
            return;
        }

        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let Some(atlas_view) = self.atlas_view.as_ref() else { return };
        let Some(sampler) = self.sampler.as_ref() else { return };

        let viewport_ubo = create_viewport_ubo(ctx, "dial text viewport ubo");

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("dial text bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.viewport_ubo = Some(viewport_ubo);
        self.bind_group = Some(bind_group);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shelf_packs_left_to_right_then_wraps() {
        let mut shelf = Shelf::default();
        assert_eq!(shelf.place(10, 20), Some((1, 1)));
        assert_eq!(shelf.place(10, 5), Some((12, 1)));

        shelf.cursor_x = ATLAS_SIZE - 5;
        // Next row starts below the tallest glyph of the current one.
        assert_eq!(shelf.place(10, 5), Some((1, 22)));
    }

    #[test]
    fn shelf_reports_full_once_out_of_rows() {
        let mut shelf = Shelf::default();
        shelf.cursor_y = ATLAS_SIZE - 4;
        assert_eq!(shelf.place(8, 8), None);
        assert!(shelf.full);
        assert_eq!(shelf.place(1, 1), None);
    }
}
