use thiserror::Error;
use xstrack_model::LogLevel;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Error string reported by the host for a resolve interaction
    #[error("{0}")]
    Resolution(String),

    #[error("Track URL is missing or invalid")]
    InvalidTrackUrl,

    #[error("Video URL is missing")]
    VideoUrlMissing,

    #[error("Video ID or URL is missing")]
    VideoSourceMissing,

    #[error("Video player is not initialized")]
    NotInitialized,

    #[error("Stale load ticket {ticket} (current epoch {current})")]
    StaleTicket { ticket: u64, current: u64 },
}

impl EngineError {
    /// Severity used when the error is surfaced through the host.
    pub fn level(&self) -> LogLevel {
        match self {
            EngineError::Resolution(_) | EngineError::NotInitialized => {
                LogLevel::Error
            }
            EngineError::StaleTicket { .. } => LogLevel::Debug,
            _ => LogLevel::Warn,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
