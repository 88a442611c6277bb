use crate::paint::BlendMode;

use super::{DrawCmd, SortKey, ZIndex};

/// A single draw item: sort key + command + compositing mode.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    pub blend: BlendMode,
}

/// Recorded draw stream for a frame.
///
/// Performance characteristics:
/// - `push()` is O(1)
/// - paint-order iteration reuses an internal index buffer; no per-frame allocation once warmed
///
/// # Compositing
///
/// [`set_blend_mode`] changes the mode stamped on every subsequently pushed
/// item, the same way a 2D context's blend state applies to later fills:
///
/// ```ignore
/// draw_list.set_blend_mode(BlendMode::Clear);
/// draw_list.push_solid_circle(z, center, radius, Color::WHITE); // erases
/// draw_list.set_blend_mode(BlendMode::Normal);
/// ```
///
/// [`set_blend_mode`]: DrawList::set_blend_mode
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    blend: BlendMode,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and resets the blend mode. Keeps allocated capacity for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.blend = BlendMode::Normal;
    }

    /// Returns items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command with the given z-index.
    ///
    /// The item inherits the current blend mode.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            blend: self.blend,
        });

        self.sorted_dirty = true;
    }

    /// Sets the blend mode for items pushed from now on.
    #[inline]
    pub fn set_blend_mode(&mut self, mode: BlendMode) {
        self.blend = mode;
    }

    #[inline]
    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    /// Iterates items in paint order (back-to-front) without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        // Stable ordering is ensured by SortKey including insertion order.
        self.sorted_indices
            .sort_by(|&a, &b| self.items[a].key.cmp(&self.items[b].key));

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    fn radii_in_paint_order(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Circle(c) => c.radius,
                other => panic!("unexpected command {other:?}"),
            })
            .collect()
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_solid_circle(ZIndex::new(2), Vec2::zero(), 1.0, Color::WHITE);
        list.push_solid_circle(ZIndex::new(0), Vec2::zero(), 2.0, Color::WHITE);
        list.push_solid_circle(ZIndex::new(2), Vec2::zero(), 3.0, Color::WHITE);
        list.push_solid_circle(ZIndex::new(1), Vec2::zero(), 4.0, Color::WHITE);

        assert_eq!(radii_in_paint_order(&mut list), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn paint_order_is_recomputed_after_push() {
        let mut list = DrawList::new();
        list.push_solid_circle(ZIndex::new(5), Vec2::zero(), 1.0, Color::WHITE);
        assert_eq!(radii_in_paint_order(&mut list), vec![1.0]);

        list.push_solid_circle(ZIndex::new(0), Vec2::zero(), 2.0, Color::WHITE);
        assert_eq!(radii_in_paint_order(&mut list), vec![2.0, 1.0]);
    }

    #[test]
    fn blend_mode_is_stamped_on_later_items_only() {
        let mut list = DrawList::new();
        list.push_solid_circle(ZIndex::new(0), Vec2::zero(), 1.0, Color::WHITE);
        list.set_blend_mode(BlendMode::Clear);
        list.push_solid_circle(ZIndex::new(1), Vec2::zero(), 1.0, Color::WHITE);
        list.set_blend_mode(BlendMode::Normal);
        list.push_solid_circle(ZIndex::new(2), Vec2::zero(), 1.0, Color::WHITE);

        let modes: Vec<BlendMode> = list.items().iter().map(|i| i.blend).collect();
        assert_eq!(modes, vec![BlendMode::Normal, BlendMode::Clear, BlendMode::Normal]);
    }

    #[test]
    fn clear_resets_items_and_blend_mode() {
        let mut list = DrawList::new();
        list.set_blend_mode(BlendMode::Clear);
        list.push_solid_circle(ZIndex::new(0), Vec2::zero(), 1.0, Color::WHITE);
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.blend_mode(), BlendMode::Normal);
        assert_eq!(list.iter_in_paint_order().count(), 0);
    }
}
