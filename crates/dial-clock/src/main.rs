mod app;

use dial_engine::logging::{init_logging, LoggingConfig};

use app::ClockApp;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let mut app = ClockApp::new().title("Clock").size(480.0, 480.0);
    match load_font() {
        Some(data) => app = app.font(data),
        None => log::warn!("no system font found in the usual locations"),
    }
    app.run()
}

/// Reads the first bold system sans font found, falling back to regular.
fn load_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/noto/NotoSans-Bold.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
        "C:\\Windows\\Fonts\\arialbd.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}
