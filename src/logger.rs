use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;
use std::fs;
use std::path::Path;

// Define where to store logs
const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "planner.log";

/// Initializes the global logger with the default log file `logs/planner.log`.
///
/// This function should be called once at the very beginning of the
/// application's `main` function.
///
/// Log level is controlled by the `RUST_LOG` environment variable.
/// Example: `RUST_LOG=debug mesh-capacity-planner --nodes 20`
///
/// If `RUST_LOG` is not set, it defaults to `info`.
pub fn init() {
    init_with_file(&format!("{}/{}", LOG_DIR, LOG_FILE));
}

/// Initializes the global logger, logging to the console and appending to `log_file_path`.
pub fn init_with_file(log_file_path: &str) {
    if let Some(log_dir) = Path::new(log_file_path).parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create log directory at '{}': {}", log_dir.display(), e);
        }
    }

    // Get the log level from RUST_LOG, defaulting to "info" (RUST_LOG=debug or RUST_LOG=warn)
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    let log_level_filter = log_level.parse::<LevelFilter>().unwrap_or(LevelFilter::Info);

    let base_config = Dispatch::new().level(log_level_filter).level_for("serde", LevelFilter::Warn);

    let console_config = Dispatch::new()
        .format(|out, message, record| {
            let colors = fern::colors::ColoredLevelConfig::new()
                .error(fern::colors::Color::Red)
                .warn(fern::colors::Color::Yellow)
                .info(fern::colors::Color::Green)
                .debug(fern::colors::Color::Blue)
                .trace(fern::colors::Color::BrightBlack);

            out.finish(format_args!(
                "[{} {} {}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut dispatch = base_config.chain(console_config);

    // The file sink only ever appends, runs are separated by the timestamps.
    match fern::log_file(log_file_path) {
        Ok(log_file) => {
            let file_config = Dispatch::new()
                .format(|out, message, record| {
                    out.finish(format_args!("[{} {} {}] {}", Local::now().format("%Y-%m-%d %H:%M:%S"), record.level(), record.target(), message))
                })
                .chain(log_file);
            dispatch = dispatch.chain(file_config);
        }
        Err(e) => eprintln!("Failed to open log file '{}': {}, logging to the console only", log_file_path, e),
    }

    dispatch.apply().unwrap_or_else(|e| {
        eprintln!("Failed to apply logger configuration: {}", e);
    });

    log::info!("Logger initialized. Logging to console and '{}'.", log_file_path);
}
