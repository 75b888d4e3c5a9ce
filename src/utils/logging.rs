use flexi_logger::{detailed_format, FlexiLoggerError, Logger, LoggerHandle};

/// Starts the process-wide logger. `RUST_LOG` wins over `level` when set.
/// The returned handle must be kept alive for as long as logging is needed.
pub fn init_logging(level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level)?
        .log_to_stdout()
        .format(detailed_format)
        .start()
}
