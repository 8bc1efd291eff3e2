/// Runtime settings with command-line overrides
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use meshlite_core::Projection;

/// Settings for one run of the viewer
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding `assets/` and `textures/`
    pub asset_dir: PathBuf,
    pub target_fps: u32,
    /// Camera travel in world units per second
    pub camera_speed: f32,
    /// Light travel in world units per second
    pub light_speed: f32,
    pub mouse_sensitivity: f32,
    /// Pixel size of one terminal cell, used to scale mouse motion
    pub cell_size: (f32, f32),
    pub projection: Projection,
    /// `None` logs to stderr
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("."),
            target_fps: 30,
            camera_speed: 1.0,
            light_speed: 100.0,
            mouse_sensitivity: 0.1,
            cell_size: (8.0, 16.0),
            projection: Projection::default(),
            log_file: Some(PathBuf::from("meshlite.log")),
        }
    }
}

impl AppConfig {
    /// Parse `[ASSET_DIR] [--fps N] [--log-stderr]`, program name excluded
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut asset_dir = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--fps" => {
                    let value = args.next().context("--fps needs a value")?;
                    config.target_fps = value
                        .parse()
                        .with_context(|| format!("invalid frame rate '{}'", value))?;
                    if config.target_fps == 0 {
                        bail!("frame rate must be at least 1");
                    }
                }
                "--log-stderr" => config.log_file = None,
                flag if flag.starts_with('-') => bail!("unknown option '{}'", flag),
                path => {
                    if asset_dir.is_some() {
                        bail!("unexpected argument '{}'", path);
                    }
                    asset_dir = Some(PathBuf::from(path));
                }
            }
        }

        if let Some(dir) = asset_dir {
            config.asset_dir = dir;
        }
        Ok(config)
    }

    pub fn asset(&self, relative: &str) -> PathBuf {
        self.asset_dir.join(relative)
    }
}
