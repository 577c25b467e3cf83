//! Error types for the voice adapters.

use calmline_core::error::CalmlineError;

/// Errors raised by speech capture and speech synthesis platforms.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("voice capture is already active")]
    AlreadyActive,
    #[error("voice capture is not active")]
    NotActive,
    #[error("voice capability is unavailable on this platform")]
    Unavailable,
    #[error("platform error: {0}")]
    Platform(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<VoiceError> for CalmlineError {
    fn from(err: VoiceError) -> Self {
        CalmlineError::Voice(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_error_display() {
        assert_eq!(
            VoiceError::AlreadyActive.to_string(),
            "voice capture is already active"
        );
        assert_eq!(VoiceError::NotActive.to_string(), "voice capture is not active");
        assert_eq!(
            VoiceError::Unavailable.to_string(),
            "voice capability is unavailable on this platform"
        );
        assert_eq!(
            VoiceError::Platform("device busy".to_string()).to_string(),
            "platform error: device busy"
        );
    }

    #[test]
    fn test_voice_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "espeak-ng");
        let err: VoiceError = io_err.into();
        assert!(matches!(err, VoiceError::Io(_)));
        assert!(err.to_string().contains("espeak-ng"));
    }

    #[test]
    fn test_voice_error_into_calmline_error() {
        let err: CalmlineError = VoiceError::Platform("no audio".to_string()).into();
        assert!(matches!(err, CalmlineError::Voice(_)));
        assert_eq!(err.to_string(), "Voice error: platform error: no audio");
    }
}
