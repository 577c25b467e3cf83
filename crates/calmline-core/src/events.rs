use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle transitions reported by the voice adapters.
///
/// Capture and synthesis emit these as they change state; consumers fold
/// them into a [`VoiceStatus`] for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusEvent {
    /// Speech capture began listening.
    ListeningStarted,
    /// Speech capture stopped, either on request or because the utterance ended.
    ListeningEnded,
    /// An utterance started playing.
    SpeakingStarted,
    /// The current utterance finished or was cancelled.
    SpeakingEnded,
    /// The current utterance failed.
    SpeakingFailed { reason: String },
    /// The voice list was evaluated and a voice choice is cached.
    VoiceReady,
}

impl StatusEvent {
    /// Returns the event type name as a static string.
    pub fn event_type(&self) -> &'static str {
        match self {
            StatusEvent::ListeningStarted => "listening_started",
            StatusEvent::ListeningEnded => "listening_ended",
            StatusEvent::SpeakingStarted => "speaking_started",
            StatusEvent::SpeakingEnded => "speaking_ended",
            StatusEvent::SpeakingFailed { .. } => "speaking_failed",
            StatusEvent::VoiceReady => "voice_ready",
        }
    }
}

/// Flags shown by the status surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceStatus {
    pub listening: bool,
    pub speaking: bool,
    /// One-shot: once set it stays set for the rest of the session.
    pub voice_ready: bool,
}

impl VoiceStatus {
    /// Fold a transition into the flags.
    pub fn apply(&mut self, event: &StatusEvent) {
        match event {
            StatusEvent::ListeningStarted => self.listening = true,
            StatusEvent::ListeningEnded => self.listening = false,
            StatusEvent::SpeakingStarted => self.speaking = true,
            StatusEvent::SpeakingEnded | StatusEvent::SpeakingFailed { .. } => {
                self.speaking = false
            }
            StatusEvent::VoiceReady => self.voice_ready = true,
        }
    }
}

impl fmt::Display for VoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_off = |flag: bool| if flag { "on" } else { "off" };
        write!(
            f,
            "listening: {} | speaking: {} | voice: {}",
            on_off(self.listening),
            on_off(self.speaking),
            if self.voice_ready { "ready" } else { "pending" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_all_off() {
        let status = VoiceStatus::default();
        assert!(!status.listening);
        assert!(!status.speaking);
        assert!(!status.voice_ready);
    }

    #[test]
    fn test_listening_transitions() {
        let mut status = VoiceStatus::default();
        status.apply(&StatusEvent::ListeningStarted);
        assert!(status.listening);
        assert!(!status.speaking);
        status.apply(&StatusEvent::ListeningEnded);
        assert!(!status.listening);
    }

    #[test]
    fn test_speaking_failure_clears_speaking() {
        let mut status = VoiceStatus::default();
        status.apply(&StatusEvent::SpeakingStarted);
        assert!(status.speaking);
        status.apply(&StatusEvent::SpeakingFailed {
            reason: "device busy".to_string(),
        });
        assert!(!status.speaking);
    }

    #[test]
    fn test_voice_ready_is_one_shot() {
        let mut status = VoiceStatus::default();
        status.apply(&StatusEvent::VoiceReady);
        for event in [
            StatusEvent::ListeningStarted,
            StatusEvent::ListeningEnded,
            StatusEvent::SpeakingStarted,
            StatusEvent::SpeakingEnded,
        ] {
            status.apply(&event);
        }
        assert!(status.voice_ready);
    }

    #[test]
    fn test_listening_and_speaking_are_independent() {
        let mut status = VoiceStatus::default();
        status.apply(&StatusEvent::SpeakingStarted);
        status.apply(&StatusEvent::ListeningStarted);
        status.apply(&StatusEvent::SpeakingEnded);
        assert!(status.listening);
        assert!(!status.speaking);
    }

    #[test]
    fn test_event_type_names() {
        assert_eq!(StatusEvent::ListeningStarted.event_type(), "listening_started");
        assert_eq!(
            StatusEvent::SpeakingFailed {
                reason: String::new()
            }
            .event_type(),
            "speaking_failed"
        );
        assert_eq!(StatusEvent::VoiceReady.event_type(), "voice_ready");
    }

    #[test]
    fn test_event_serializes_with_type_tag() {
        let json = serde_json::to_string(&StatusEvent::SpeakingFailed {
            reason: "no audio".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"speaking_failed","reason":"no audio"}"#);
    }

    #[test]
    fn test_status_display() {
        let status = VoiceStatus {
            listening: true,
            speaking: false,
            voice_ready: true,
        };
        assert_eq!(
            status.to_string(),
            "listening: on | speaking: off | voice: ready"
        );
    }
}
