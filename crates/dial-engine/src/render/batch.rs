use std::ops::Range;

use crate::paint::BlendMode;
use crate::scene::{DrawItem, ShapeKind};

/// A run of consecutive paint-ordered items drawn by one pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub kind: ShapeKind,
    pub blend: BlendMode,
    /// Indices into the paint-ordered item slice.
    pub items: Range<usize>,
}

/// Splits paint-ordered items into maximal runs sharing shape kind and blend mode.
///
/// Replaying the batches in order reproduces the paint order of `items`.
pub fn split_batches(items: &[&DrawItem]) -> Vec<Batch> {
    let mut batches: Vec<Batch> = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let kind = item.cmd.kind();
        match batches.last_mut() {
            Some(last) if last.kind == kind && last.blend == item.blend => {
                last.items.end = i + 1;
            }
            _ => batches.push(Batch {
                kind,
                blend: item.blend,
                items: i..i + 1,
            }),
        }
    }

    batches
}

/// Yields the items of every batch of `kind`, in paint order, tagged with the
/// batch's position among batches of that kind.
pub(crate) fn items_of_kind<'a, 'i>(
    items: &'a [&'i DrawItem],
    batches: &'a [Batch],
    kind: ShapeKind,
) -> impl Iterator<Item = (usize, &'i DrawItem)> + 'a {
    batches
        .iter()
        .filter(move |b| b.kind == kind)
        .enumerate()
        .flat_map(move |(n, b)| items[b.items.clone()].iter().map(move |item| (n, *item)))
}

/// Groups instance counts per batch into contiguous instance ranges.
///
/// `counts[n]` is the number of instances emitted for the n-th batch of a kind.
pub(crate) fn instance_ranges(counts: &[u32]) -> Vec<Range<u32>> {
    let mut start = 0u32;
    counts
        .iter()
        .map(|&c| {
            let r = start..start + c;
            start += c;
            r
        })
        .collect()
}
