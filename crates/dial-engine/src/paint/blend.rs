/// How a shape's coverage is composited onto what is already in the target.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum BlendMode {
    /// Premultiplied source-over.
    #[default]
    Normal,
    /// Erases covered pixels back to the frame backdrop.
    ///
    /// The shape's own color is ignored; only its coverage matters. Renderers
    /// implement this as `backdrop * coverage + dst * (1 - coverage)`, with the
    /// backdrop bound as the pass blend constant.
    Clear,
}
