//! Host capability discovery for speech capture and synthesis.

use crate::capture::SpeechRecognizer;
use crate::speech::SpeechSynthesizer;

/// Result of probing the host for a capability.
#[derive(Debug)]
pub enum Capability<T> {
    Available(T),
    Unavailable,
}

impl<T> Capability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Capability::Available(value) => Some(value),
            Capability::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Capability::Available(value),
            None => Capability::Unavailable,
        }
    }
}

/// A host that may provide speech capture and speech synthesis.
///
/// Each query runs once, when an [`Assistant`](crate::Assistant) is built.
pub trait VoicePlatform {
    type Recognizer: SpeechRecognizer;
    type Synthesizer: SpeechSynthesizer;

    fn speech_recognition(&mut self) -> Capability<Self::Recognizer>;
    fn speech_synthesis(&mut self) -> Capability<Self::Synthesizer>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_into_option() {
        let cap = Capability::Available(5);
        assert!(cap.is_available());
        assert_eq!(cap.into_option(), Some(5));
    }

    #[test]
    fn test_unavailable_into_option() {
        let cap: Capability<u8> = Capability::Unavailable;
        assert!(!cap.is_available());
        assert_eq!(cap.into_option(), None);
    }

    #[test]
    fn test_from_option() {
        assert!(Capability::from(Some("x")).is_available());
        assert!(!Capability::<&str>::from(None).is_available());
    }
}
