//! Speech capture adapter.
//!
//! Wraps a platform recognizer in single-utterance mode: each start listens
//! for one utterance, hands back its finalized transcript once, and stops.
//! Interim transcripts are kept for live display only.

use calmline_core::events::StatusEvent;

use crate::error::VoiceError;
use crate::platform::Capability;
use crate::status::StatusSink;

/// Events a recognizer reports while listening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Partial transcript of the utterance in progress.
    Interim(String),
    /// The recognizer judged the utterance complete.
    Final(String),
    /// The recognizer stopped on its own.
    Ended,
    /// The recognizer stopped because of an error.
    Error(String),
}

/// A platform speech-to-text engine.
pub trait SpeechRecognizer {
    /// Begin listening. Fails if already listening or the device is unusable.
    fn start(&mut self) -> Result<(), VoiceError>;
    fn stop(&mut self);
    /// Next pending event, if any.
    fn poll_event(&mut self) -> Option<CaptureEvent>;
}

pub struct CaptureAdapter<R> {
    recognizer: Option<R>,
    listening: bool,
    interim: Option<String>,
    status: StatusSink,
}

impl<R: SpeechRecognizer> CaptureAdapter<R> {
    pub fn new(capability: Capability<R>, status: StatusSink) -> Self {
        let recognizer = capability.into_option();
        if recognizer.is_none() {
            tracing::info!("Speech capture unavailable; listening controls disabled");
        }
        Self {
            recognizer,
            listening: false,
            interim: None,
            status,
        }
    }

    pub fn is_available(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Live partial transcript, for display.
    pub fn interim(&self) -> Option<&str> {
        self.interim.as_deref()
    }

    /// Start listening. Start failures are discarded; the caller may retry.
    pub fn start(&mut self) {
        if self.listening {
            return;
        }
        let Some(recognizer) = self.recognizer.as_mut() else {
            tracing::debug!("Capture start ignored: no recognizer");
            return;
        };
        match recognizer.start() {
            Ok(()) => {
                self.listening = true;
                self.interim = None;
                tracing::info!("Speech capture started");
                self.status.emit(StatusEvent::ListeningStarted);
            }
            Err(e) => tracing::debug!("Speech capture start failed: {}", e),
        }
    }

    /// Stop listening, discarding any interim transcript.
    pub fn stop(&mut self) {
        if !self.listening {
            return;
        }
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.stop();
        }
        self.finish();
        tracing::info!("Speech capture stopped");
    }

    pub fn toggle(&mut self) {
        if self.listening {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Drain recognizer events and return finalized transcripts.
    ///
    /// At most one transcript is returned per listening session; capture is
    /// stopped as soon as it arrives.
    pub fn poll(&mut self) -> Vec<String> {
        let Some(recognizer) = self.recognizer.as_mut() else {
            return Vec::new();
        };
        let events: Vec<CaptureEvent> = std::iter::from_fn(|| recognizer.poll_event()).collect();

        let mut finals = Vec::new();
        for event in events {
            if !self.listening {
                tracing::trace!(?event, "Dropping capture event after stop");
                continue;
            }
            match event {
                CaptureEvent::Interim(text) => self.interim = Some(text),
                CaptureEvent::Final(text) => {
                    tracing::debug!(text_len = text.len(), "Finalized transcript");
                    finals.push(text);
                    self.stop();
                }
                CaptureEvent::Ended => self.finish(),
                CaptureEvent::Error(reason) => {
                    tracing::debug!("Speech capture error: {}", reason);
                    self.finish();
                }
            }
        }
        finals
    }

    fn finish(&mut self) {
        self.listening = false;
        self.interim = None;
        self.status.emit(StatusEvent::ListeningEnded);
    }
}

// =============================================================================
// Tests
// =============================================================================
