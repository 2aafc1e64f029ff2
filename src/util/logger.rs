use std::env;
use std::error::Error;
use std::path::PathBuf;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const LOG_FILE_PREFIX: &str = "villa-docs";

/// Where file logs go and how verbose they are
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub dir: PathBuf,
    pub file_level: String,
    pub error_file_level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            dir: PathBuf::from("logs"),
            file_level: "info".to_string(),
            error_file_level: "error".to_string(),
        }
    }
}

impl LogSettings {
    /// `LOG_DIR`, `FILE_LOG_LEVEL`, `ERROR_FILE_LOG_LEVEL`
    pub fn from_env() -> Self {
        let defaults = LogSettings::default();
        LogSettings {
            dir: env::var("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.dir),
            file_level: env::var("FILE_LOG_LEVEL").unwrap_or(defaults.file_level),
            error_file_level: env::var("ERROR_FILE_LOG_LEVEL").unwrap_or(defaults.error_file_level),
        }
    }

    pub fn error_dir(&self) -> PathBuf {
        self.dir.join("error")
    }
}

/// Holds the file writer guards; dropping it flushes and stops file logging.
pub struct Logger {
    pub guards: Vec<WorkerGuard>,
}

impl Logger {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        Self::init(LogSettings::from_env())
    }

    /// Pretty console output plus a daily-rolling text and JSON file for
    /// everything, and the same pair under `error/` for the error level.
    pub fn init(settings: LogSettings) -> Result<Self, Box<dyn Error>> {
        let error_dir = settings.error_dir();
        std::fs::create_dir_all(&settings.dir)?;
        std::fs::create_dir_all(&error_dir)?;

        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,villa_docs_backend=debug"));
        let mut layers: Vec<BoxedLayer> = vec![fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(true)
            .with_filter(console_filter)
            .boxed()];

        let mut guards = Vec::new();
        let targets = [
            (settings.dir.clone(), LOG_FILE_PREFIX.to_string(), settings.file_level.as_str()),
            (error_dir, format!("{}-error", LOG_FILE_PREFIX), settings.error_file_level.as_str()),
        ];
        for (dir, prefix, level) in targets {
            let (text_writer, text_guard) = non_blocking(rolling::daily(&dir, format!("{}.log", prefix)));
            let (json_writer, json_guard) = non_blocking(rolling::daily(&dir, format!("{}.json", prefix)));

            layers.push(
                fmt::layer()
                    .with_writer(text_writer)
                    .with_ansi(false)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(level))
                    .boxed(),
            );
            layers.push(
                fmt::layer()
                    .json()
                    .with_writer(json_writer)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(level))
                    .boxed(),
            );
            guards.push(text_guard);
            guards.push(json_guard);
        }

        tracing_subscriber::registry().with(layers).try_init()?;
        Ok(Logger { guards })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = LogSettings::default();
        assert_eq!(settings.file_level, "info");
        assert_eq!(settings.error_file_level, "error");
        assert_eq!(settings.error_dir(), PathBuf::from("logs").join("error"));
    }
}
