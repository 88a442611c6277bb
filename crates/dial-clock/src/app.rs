use anyhow::Result;
use winit::dpi::LogicalSize;

use dial_engine::core::{App as EngineApp, AppControl, FrameCtx};
use dial_engine::device::GpuInit;
use dial_engine::render::SceneRenderer;
use dial_engine::scene::DrawList;
use dial_engine::text::{FontId, FontSystem};
use dial_engine::window::{Appearance, Runtime, RuntimeConfig};
use dial_face::{Canvas, FaceRenderer, Palette};

/// Builder for the clock window.
///
/// ```ignore
/// ClockApp::new()
///     .title("Clock")
///     .size(480.0, 480.0)
///     .font(font_bytes)
///     .run()?;
/// ```
pub struct ClockApp {
    title: String,
    width: f64,
    height: f64,
    font: Option<Vec<u8>>,
    appearance: Option<Appearance>,
}

impl ClockApp {
    pub fn new() -> Self {
        Self {
            title: "Clock".to_string(),
            width: 480.0,
            height: 480.0,
            font: None,
            appearance: None,
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Font for the numerals and the date (raw TTF/OTF bytes).
    pub fn font(mut self, data: Vec<u8>) -> Self {
        self.font = Some(data);
        self
    }

    /// Pin the palette instead of following the OS light/dark setting.
    pub fn appearance(mut self, appearance: Appearance) -> Self {
        self.appearance = Some(appearance);
        self
    }

    /// Opens the window and runs until it is closed.
    pub fn run(self) -> Result<()> {
        let config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
            ..RuntimeConfig::default()
        };
        Runtime::run(config, GpuInit::default(), ClockState::new(self))
    }
}

impl Default for ClockApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads `data` into `fonts`, logging instead of failing: the face still
/// renders its hands and ticks without text.
fn load_face_font(fonts: &mut FontSystem, data: Option<&[u8]>) -> Option<FontId> {
    let Some(data) = data else {
        log::warn!("no font configured; numerals and date are hidden");
        return None;
    };
    match fonts.load_font(data) {
        Ok(id) => Some(id),
        Err(e) => {
            log::warn!("{e}; numerals and date are hidden");
            None
        }
    }
}

/// Internal state that implements `dial_engine::core::App`.
struct ClockState {
    face: FaceRenderer,
    fonts: FontSystem,
    draw_list: DrawList,
    renderer: SceneRenderer,

    appearance_override: Option<Appearance>,
    appearance: Option<Appearance>,
}

impl ClockState {
    fn new(app: ClockApp) -> Self {
        let mut fonts = FontSystem::new();
        let font = load_face_font(&mut fonts, app.font.as_deref());
        let palette = Palette::for_appearance(app.appearance.unwrap_or_default());

        Self {
            face: FaceRenderer::new(palette, font),
            fonts,
            draw_list: DrawList::new(),
            renderer: SceneRenderer::new(),
            appearance_override: app.appearance,
            appearance: None,
        }
    }

    fn apply_appearance(&mut self, os: Appearance) {
        let appearance = self.appearance_override.unwrap_or(os);
        if self.appearance != Some(appearance) {
            log::debug!("using {appearance:?} palette");
            self.face.set_palette(Palette::for_appearance(appearance));
            self.appearance = Some(appearance);
        }
    }
}

impl EngineApp for ClockState {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.apply_appearance(ctx.window.appearance());

        let size = ctx.window.viewport().size();
        self.draw_list.clear();
        self.face
            .render(&mut Canvas::new(&mut self.draw_list), size, &ctx.time.wall);

        let backdrop = self.face.palette().backdrop;
        let dl = &mut self.draw_list;
        let fonts = &self.fonts;
        let renderer = &mut self.renderer;

        ctx.render(backdrop, |rctx, target| {
            renderer.render(rctx, target, dl, fonts);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let app = ClockApp::new().title("Wall").size(300.0, 200.0).appearance(Appearance::Dark);
        assert_eq!(app.title, "Wall");
        assert_eq!((app.width, app.height), (300.0, 200.0));
        assert_eq!(app.appearance, Some(Appearance::Dark));
        assert!(app.font.is_none());
    }

    #[test]
    fn unreadable_font_is_not_fatal() {
        let mut fonts = FontSystem::new();
        assert_eq!(load_face_font(&mut fonts, Some(b"not a font")), None);
        assert_eq!(load_face_font(&mut fonts, None), None);
    }

    #[test]
    fn override_pins_the_palette() {
        let mut state = ClockState::new(ClockApp::new().appearance(Appearance::Dark));
        state.apply_appearance(Appearance::Light);
        assert_eq!(*state.face.palette(), Palette::dark());
    }

    #[test]
    fn palette_follows_the_os_without_override() {
        let mut state = ClockState::new(ClockApp::new());
        state.apply_appearance(Appearance::Dark);
        assert_eq!(*state.face.palette(), Palette::dark());
        state.apply_appearance(Appearance::Light);
        assert_eq!(*state.face.palette(), Palette::light());
    }
}
