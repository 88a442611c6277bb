use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// Text draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Center of the single-line text box, in logical pixels.
    pub center: Vec2,
}

impl DrawList {
    /// Records a single-line text draw command centered on `center`.
    pub fn push_text_centered(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        center: Vec2,
    ) {
        self.push(z, DrawCmd::Text(TextCmd {
            text: text.into(),
            font,
            size,
            color,
            center,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_text_keeps_its_center() {
        let mut list = DrawList::new();
        let at = Vec2::new(36.0, -16.0);
        list.push_text_centered(ZIndex::new(2), "Apr 2", FontId::from_index(0), 12.5, Color::BLACK, at);

        let [item] = list.items() else { panic!("expected one item") };
        let DrawCmd::Text(t) = &item.cmd else { panic!("expected text") };
        assert_eq!(t.text, "Apr 2");
        assert_eq!(t.center, at);
        assert_eq!(t.size, 12.5);
    }
}
