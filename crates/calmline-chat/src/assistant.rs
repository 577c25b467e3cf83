//! Assistant controller: central coordinator wiring session, capture and speech.
//!
//! Runs on a single event loop. The host calls [`Assistant::submit`] for typed
//! input, [`Assistant::toggle_capture`] and [`Assistant::interrupt_playback`]
//! for the voice controls, and [`Assistant::pump`] whenever platform events
//! may be pending.

use calmline_core::events::VoiceStatus;
use tokio::sync::watch;

use crate::capture::CaptureAdapter;
use crate::platform::VoicePlatform;
use crate::session::ChatSession;
use crate::speech::{SpeechOutput, VoiceSelector};
use crate::status::StatusSink;
use crate::types::{Exchange, Message};

pub struct Assistant<P: VoicePlatform> {
    session: ChatSession,
    capture: CaptureAdapter<P::Recognizer>,
    speech: SpeechOutput<P::Synthesizer>,
    status: StatusSink,
}

impl<P: VoicePlatform> Assistant<P> {
    /// Probe the platform once and build the adapters.
    pub fn new(platform: &mut P, selector: VoiceSelector) -> Self {
        let status = StatusSink::new();
        let capture = CaptureAdapter::new(platform.speech_recognition(), status.clone());
        let speech = SpeechOutput::new(platform.speech_synthesis(), selector, status.clone());
        tracing::info!(
            capture = capture.is_available(),
            synthesis = speech.is_available(),
            "Assistant ready"
        );
        Self {
            session: ChatSession::new(),
            capture,
            speech,
            status,
        }
    }

    /// Submit user text and speak the reply. Empty text is ignored.
    pub fn submit(&mut self, text: &str) -> Option<Exchange> {
        let exchange = self.session.submit(text)?;
        self.speech.speak(&exchange.reply.content);
        Some(exchange)
    }

    /// Start or stop listening. Starting first silences any reply being spoken.
    pub fn toggle_capture(&mut self) {
        if !self.capture.is_listening() {
            if !self.capture.is_available() {
                tracing::debug!("Capture toggle ignored: speech capture unavailable");
                return;
            }
            self.speech.interrupt();
        }
        self.capture.toggle();
    }

    pub fn interrupt_playback(&mut self) {
        self.speech.interrupt();
    }

    /// Process pending platform events.
    ///
    /// Each finalized transcript is submitted exactly once; the resulting
    /// exchanges are returned for display.
    pub fn pump(&mut self) -> Vec<Exchange> {
        let exchanges = self
            .capture
            .poll()
            .into_iter()
            .filter_map(|transcript| self.submit(&transcript))
            .collect();
        self.speech.poll();
        exchanges
    }

    pub fn messages(&self) -> &[Message] {
        self.session.messages()
    }

    /// Live partial transcript while listening.
    pub fn interim_transcript(&self) -> Option<&str> {
        self.capture.interim()
    }

    pub fn capture_available(&self) -> bool {
        self.capture.is_available()
    }

    pub fn speech_available(&self) -> bool {
        self.speech.is_available()
    }

    pub fn status(&self) -> VoiceStatus {
        self.status.current()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<VoiceStatus> {
        self.status.subscribe()
    }
}
