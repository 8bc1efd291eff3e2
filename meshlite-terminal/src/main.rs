/// meshlite terminal viewer
///
/// Renders the demo scene into the terminal.
/// Controls:
///   - W/A/S/D/Q/E: Move the light
///   - Hold right mouse button (or press Tab) for camera mode: the same keys
///     move the camera and the mouse looks around
///   - ESC: Quit
use anyhow::{Context, Result};
use crossterm::terminal;
use meshlite_terminal::demo::build_demo_scene;
use meshlite_terminal::{init_logging, AppConfig, LoggingConfig, SoftwareRenderer, TerminalApp};

fn main() -> Result<()> {
    let config = AppConfig::from_args(std::env::args().skip(1))?;

    init_logging(LoggingConfig {
        log_file: config.log_file.clone(),
        ..LoggingConfig::default()
    });

    let (width, height) = terminal::size().context("querying terminal size")?;
    let mut renderer = SoftwareRenderer::new(width as usize, height as usize);
    let scene = build_demo_scene(&mut renderer, &config)?;

    let mut app = TerminalApp::new(renderer, scene, &config);
    app.run().context("running terminal viewer")?;

    Ok(())
}
