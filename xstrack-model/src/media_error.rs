use std::fmt::{self, Display};

/// Error category reported by the media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaErrorCode {
    /// Fetching was aborted at the user's request
    Aborted,
    Network,
    Decode,
    SourceNotSupported,
    Unknown(u16),
}

impl MediaErrorCode {
    pub fn code(self) -> u16 {
        match self {
            MediaErrorCode::Aborted => 1,
            MediaErrorCode::Network => 2,
            MediaErrorCode::Decode => 3,
            MediaErrorCode::SourceNotSupported => 4,
            MediaErrorCode::Unknown(code) => code,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            MediaErrorCode::Aborted => "Playback Aborted",
            MediaErrorCode::Network => "Network Error",
            MediaErrorCode::Decode => "Media Decode Error",
            MediaErrorCode::SourceNotSupported => "Source Not Supported",
            MediaErrorCode::Unknown(_) => "Unknown Error",
        }
    }
}

impl From<u16> for MediaErrorCode {
    fn from(code: u16) -> Self {
        match code {
            1 => MediaErrorCode::Aborted,
            2 => MediaErrorCode::Network,
            3 => MediaErrorCode::Decode,
            4 => MediaErrorCode::SourceNotSupported,
            other => MediaErrorCode::Unknown(other),
        }
    }
}

/// A native error as read from the media element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeMediaError {
    pub code: MediaErrorCode,
    pub message: Option<String>,
}

impl NativeMediaError {
    pub fn new(code: u16, message: Option<&str>) -> Self {
        Self {
            code: code.into(),
            message: message.map(str::to_string),
        }
    }
}

/// `<code>: <text>` followed by `: <message>` when the element supplied one.
impl Display for NativeMediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.code.text())?;
        match self.message.as_deref() {
            Some(message) if !message.is_empty() => write!(f, ": {message}"),
            _ => Ok(()),
        }
    }
}
