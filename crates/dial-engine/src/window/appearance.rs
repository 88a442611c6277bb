use winit::window::Theme;

/// Light/dark preference reported by the OS for a window.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

impl From<Theme> for Appearance {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => Appearance::Light,
            Theme::Dark => Appearance::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_winit_themes() {
        assert_eq!(Appearance::from(Theme::Dark), Appearance::Dark);
        assert_eq!(Appearance::from(Theme::Light), Appearance::Light);
        assert_eq!(Appearance::default(), Appearance::Light);
    }
}
