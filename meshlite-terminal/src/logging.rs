/// Logger setup. The terminal owns the screen, so logs default to a file.
use std::fs::File;
use std::path::PathBuf;
use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "meshlite_core=debug"). When `log_file` is `None` records go to stderr.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            log_file: Some(PathBuf::from("meshlite.log")),
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = &config.env_filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        let mut file_error = None;
        match &config.log_file {
            Some(path) => match File::create(path) {
                Ok(file) => {
                    builder.target(env_logger::Target::Pipe(Box::new(file)));
                    builder.write_style(env_logger::WriteStyle::Never);
                }
                Err(e) => {
                    file_error = Some((path.clone(), e));
                    builder.write_style(config.write_style);
                }
            },
            None => {
                builder.write_style(config.write_style);
            }
        }

        builder.init();

        if let Some((path, e)) = file_error {
            log::warn!("cannot open log file {}: {}; logging to stderr", path.display(), e);
        }
        log::debug!("logging initialized");
    });
}
