use dial_engine::paint::Color;
use dial_engine::window::Appearance;

/// Color roles of the face.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    /// Bezel, numerals, ticks, date and hour/minute hands.
    pub primary: Color,
    /// Second hand and the hub's inner ring.
    pub accent: Color,
    /// Surface clear color; the hub punch-through erases back to it.
    pub backdrop: Color,
}

impl Palette {
    pub fn light() -> Self {
        Self {
            primary: Color::BLACK,
            accent: Color::from_srgb_u8(255, 149, 0, 255),
            backdrop: Color::WHITE,
        }
    }

    pub fn dark() -> Self {
        Self {
            primary: Color::WHITE,
            accent: Color::from_srgb_u8(255, 159, 10, 255),
            backdrop: Color::from_srgb_u8(28, 28, 30, 255),
        }
    }

    pub fn for_appearance(appearance: Appearance) -> Self {
        match appearance {
            Appearance::Light => Self::light(),
            Appearance::Dark => Self::dark(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_contrasts_with_backdrop() {
        for p in [Palette::light(), Palette::dark()] {
            let diff = (p.primary.r - p.backdrop.r).abs();
            assert!(diff > 0.5);
        }
    }

    #[test]
    fn appearance_selects_palette() {
        assert_eq!(Palette::for_appearance(Appearance::Dark), Palette::dark());
        assert_eq!(Palette::for_appearance(Appearance::Light), Palette::default());
    }

    #[test]
    fn colors_are_opaque() {
        let p = Palette::dark();
        assert_eq!([p.primary.a, p.accent.a, p.backdrop.a], [1.0; 3]);
    }
}
