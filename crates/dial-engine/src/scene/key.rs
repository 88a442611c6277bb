use super::ZIndex;

/// Paint-order key of a draw item.
///
/// Back-to-front by `z`; within a layer, items keep the order they were
/// pushed in. The derived `Ord` relies on `z` being declared first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    /// Push counter of the owning `DrawList`.
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_wins_over_push_order() {
        let early_top = SortKey::new(ZIndex(2), 0);
        let late_bottom = SortKey::new(ZIndex(1), 9);
        assert!(late_bottom < early_top);
    }

    #[test]
    fn push_order_breaks_ties() {
        assert!(SortKey::new(ZIndex(0), 3) < SortKey::new(ZIndex(0), 4));
    }
}
