use crate::scene::{DrawItem, DrawList, ShapeKind};
use crate::text::FontSystem;

use super::shapes::circle::CircleRenderer;
use super::shapes::rotated_rect::RotatedRectRenderer;
use super::shapes::text::TextRenderer;
use super::{split_batches, RenderCtx, RenderTarget};

/// Draws a whole [`DrawList`] in paint order.
///
/// Every shape renderer uploads its instances up front; the batches are then
/// replayed inside a single render pass, switching pipelines whenever shape
/// kind or blend mode changes. The frame's backdrop is bound as the blend
/// constant for `BlendMode::Clear` pipelines.
#[derive(Default)]
pub struct SceneRenderer {
    circles: CircleRenderer,
    rects: RotatedRectRenderer,
    text: TextRenderer,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        let items: Vec<&DrawItem> = draw_list.iter_in_paint_order().collect();
        if items.is_empty() {
            return;
        }
        let batches = split_batches(&items);

        let mut circle_ranges = self.circles.prepare(ctx, &items, &batches).into_iter();
        let mut rect_ranges = self.rects.prepare(ctx, &items, &batches).into_iter();
        let mut text_ranges = self.text.prepare(ctx, &items, &batches, fonts).into_iter();

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("dial scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_blend_constant(ctx.backdrop.to_wgpu());

        for batch in &batches {
            match batch.kind {
                ShapeKind::Circle => {
                    if let Some(range) = circle_ranges.next() {
                        self.circles.draw(&mut rpass, batch.blend, range);
                    }
                }
                ShapeKind::RotatedRect => {
                    if let Some(range) = rect_ranges.next() {
                        self.rects.draw(&mut rpass, batch.blend, range);
                    }
                }
                ShapeKind::Text => {
                    if let Some(range) = text_ranges.next() {
                        self.text.draw(&mut rpass, batch.blend, range);
                    }
                }
            }
        }
    }
}
