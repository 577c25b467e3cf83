//! Speech output adapter.
//!
//! Reads replies aloud through a platform synthesizer, one utterance at a
//! time. A new utterance always supersedes the one in progress.

use calmline_core::config::VoiceConfig;
use calmline_core::events::StatusEvent;

use crate::error::VoiceError;
use crate::platform::Capability;
use crate::status::StatusSink;

/// A synthesizer voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    /// Locale tag, e.g. `en-US`.
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Outcome of an utterance, reported by the synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceEvent {
    Finished,
    Failed(String),
}

/// A platform text-to-speech engine.
///
/// Implementations must not report events for an utterance that was cancelled.
pub trait SpeechSynthesizer {
    /// Available voices. May be empty until the platform has loaded them.
    fn voices(&self) -> Vec<Voice>;
    /// True when the voice list never changes after construction, so an
    /// empty list is final and need not be asked for again.
    fn voices_fixed(&self) -> bool {
        false
    }
    /// Start speaking `text`. `None` means the platform default voice.
    fn speak(&mut self, text: &str, voice: Option<&Voice>) -> Result<(), VoiceError>;
    fn cancel(&mut self);
    fn poll_event(&mut self) -> Option<UtteranceEvent>;
}

// =============================================================================
// VoiceSelector
// =============================================================================

/// Voice choice policy: preferred name token, then locale prefix, then default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelector {
    pub preferred_name: String,
    pub lang_prefix: String,
}

impl VoiceSelector {
    pub fn new(preferred_name: impl Into<String>, lang_prefix: impl Into<String>) -> Self {
        Self {
            preferred_name: preferred_name.into(),
            lang_prefix: lang_prefix.into(),
        }
    }

    pub fn from_config(config: &VoiceConfig) -> Self {
        Self::new(config.preferred_name.clone(), config.lang_prefix.clone())
    }

    /// Pick a voice. `None` means fall back to the platform default.
    ///
    /// An empty token or prefix disables that rule.
    pub fn select<'a>(&self, voices: &'a [Voice]) -> Option<&'a Voice> {
        let by_name = (!self.preferred_name.is_empty())
            .then(|| voices.iter().find(|v| v.name.contains(&self.preferred_name)))
            .flatten();
        by_name.or_else(|| {
            (!self.lang_prefix.is_empty())
                .then(|| voices.iter().find(|v| v.lang.starts_with(&self.lang_prefix)))
                .flatten()
        })
    }
}

// =============================================================================
// SpeechOutput
// =============================================================================

pub struct SpeechOutput<S> {
    synthesizer: Option<S>,
    selector: VoiceSelector,
    /// Chosen once, the first time the voice list is non-empty.
    voice: Option<Voice>,
    voices_resolved: bool,
    speaking: bool,
    status: StatusSink,
}

impl<S: SpeechSynthesizer> SpeechOutput<S> {
    pub fn new(capability: Capability<S>, selector: VoiceSelector, status: StatusSink) -> Self {
        let synthesizer = capability.into_option();
        if synthesizer.is_none() {
            tracing::info!("Speech synthesis unavailable; replies will not be spoken");
        }
        let mut output = Self {
            synthesizer,
            selector,
            voice: None,
            voices_resolved: false,
            speaking: false,
            status,
        };
        output.refresh_voices();
        output
    }

    pub fn is_available(&self) -> bool {
        self.synthesizer.is_some()
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn selected_voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }

    /// Resolve the voice choice if the platform has published its voices.
    ///
    /// Runs the selection at most once; later calls are no-ops. A fixed
    /// voice list that comes back empty settles on the platform default.
    pub fn refresh_voices(&mut self) {
        if self.voices_resolved {
            return;
        }
        let Some(synthesizer) = self.synthesizer.as_ref() else {
            return;
        };
        let voices = synthesizer.voices();
        if voices.is_empty() && !synthesizer.voices_fixed() {
            return;
        }

        self.voice = self.selector.select(&voices).cloned();
        self.voices_resolved = true;
        match &self.voice {
            Some(v) => tracing::info!(name = %v.name, lang = %v.lang, "Voice selected"),
            None => tracing::info!(
                available = voices.len(),
                "No matching voice, using platform default"
            ),
        }
        self.status.emit(StatusEvent::VoiceReady);
    }

    /// Speak `text`, cancelling whatever is playing.
    pub fn speak(&mut self, text: &str) {
        if self.synthesizer.is_none() {
            return;
        }
        self.refresh_voices();
        self.interrupt();

        let Some(synthesizer) = self.synthesizer.as_mut() else {
            return;
        };
        match synthesizer.speak(text, self.voice.as_ref()) {
            Ok(()) => {
                self.speaking = true;
                self.status.emit(StatusEvent::SpeakingStarted);
            }
            Err(e) => {
                tracing::warn!("Speech synthesis failed: {}", e);
                self.status.emit(StatusEvent::SpeakingFailed {
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Halt the utterance in progress, if any.
    pub fn interrupt(&mut self) {
        if !self.speaking {
            return;
        }
        if let Some(synthesizer) = self.synthesizer.as_mut() {
            synthesizer.cancel();
        }
        self.speaking = false;
        self.status.emit(StatusEvent::SpeakingEnded);
    }

    /// Drain synthesizer events into status transitions.
    pub fn poll(&mut self) {
        let Some(synthesizer) = self.synthesizer.as_mut() else {
            return;
        };
        while let Some(event) = synthesizer.poll_event() {
            if !self.speaking {
                continue;
            }
            self.speaking = false;
            match event {
                UtteranceEvent::Finished => self.status.emit(StatusEvent::SpeakingEnded),
                UtteranceEvent::Failed(reason) => {
                    tracing::warn!("Utterance failed: {}", reason);
                    self.status.emit(StatusEvent::SpeakingFailed { reason });
                }
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct RecordingSynth {
        voices: Vec<Voice>,
        fixed: bool,
        listings: Cell<usize>,
        spoken: Vec<(String, Option<String>)>,
        cancels: usize,
        fail_next: bool,
        events: VecDeque<UtteranceEvent>,
    }

    impl SpeechSynthesizer for RecordingSynth {
        fn voices(&self) -> Vec<Voice> {
            self.listings.set(self.listings.get() + 1);
            self.voices.clone()
        }

        fn voices_fixed(&self) -> bool {
            self.fixed
        }

        fn speak(&mut self, text: &str, voice: Option<&Voice>) -> Result<(), VoiceError> {
            if std::mem::take(&mut self.fail_next) {
                return Err(VoiceError::Platform("audio device busy".to_string()));
            }
            self.spoken
                .push((text.to_string(), voice.map(|v| v.name.clone())));
            Ok(())
        }

        fn cancel(&mut self) {
            self.cancels += 1;
        }

        fn poll_event(&mut self) -> Option<UtteranceEvent> {
            self.events.pop_front()
        }
    }

    fn voices() -> Vec<Voice> {
        vec![
            Voice::new("Thomas", "fr-FR"),
            Voice::new("Karen", "en-AU"),
            Voice::new("Samantha", "en-US"),
        ]
    }

    fn output(synth: RecordingSynth) -> (SpeechOutput<RecordingSynth>, StatusSink) {
        let status = StatusSink::new();
        let out = SpeechOutput::new(
            Capability::Available(synth),
            VoiceSelector::new("Samantha", "en"),
            status.clone(),
        );
        (out, status)
    }

    fn synth(out: &mut SpeechOutput<RecordingSynth>) -> &mut RecordingSynth {
        out.synthesizer.as_mut().unwrap()
    }

    // ---- VoiceSelector ----

    #[test]
    fn test_select_prefers_name_token() {
        let v = voices();
        let chosen = VoiceSelector::new("Samantha", "en").select(&v).unwrap();
        assert_eq!(chosen.name, "Samantha");
    }

    #[test]
    fn test_select_falls_back_to_lang_prefix() {
        let v = voices();
        let chosen = VoiceSelector::new("Alex", "en").select(&v).unwrap();
        assert_eq!(chosen.name, "Karen");
    }

    #[test]
    fn test_select_falls_back_to_default() {
        let v = voices();
        assert!(VoiceSelector::new("Alex", "de").select(&v).is_none());
        assert!(VoiceSelector::new("Samantha", "en").select(&[]).is_none());
    }

    #[test]
    fn test_select_name_token_is_substring() {
        let v = vec![Voice::new("Google US English", "en-US")];
        let chosen = VoiceSelector::new("Google", "fr").select(&v).unwrap();
        assert_eq!(chosen.lang, "en-US");
    }

    #[test]
    fn test_select_empty_rules_are_skipped() {
        let v = voices();
        assert_eq!(VoiceSelector::new("", "en").select(&v).unwrap().name, "Karen");
        assert!(VoiceSelector::new("", "").select(&v).is_none());
    }

    #[test]
    fn test_selector_from_config() {
        let selector = VoiceSelector::from_config(&VoiceConfig::default());
        assert_eq!(selector, VoiceSelector::new("Samantha", "en"));
    }

    // ---- Voice caching ----

    #[test]
    fn test_voice_selected_at_construction_when_listed() {
        let (out, status) = output(RecordingSynth {
            voices: voices(),
            ..Default::default()
        });
        assert_eq!(out.selected_voice().unwrap().name, "Samantha");
        assert!(status.current().voice_ready);
    }

    #[test]
    fn test_voice_resolved_once_voices_arrive() {
        let (mut out, status) = output(RecordingSynth::default());
        assert!(out.selected_voice().is_none());
        assert!(!status.current().voice_ready);

        synth(&mut out).voices = voices();
        out.speak("hello");
        assert_eq!(out.selected_voice().unwrap().name, "Samantha");
        assert_eq!(
            synth(&mut out).spoken,
            vec![("hello".to_string(), Some("Samantha".to_string()))]
        );
        assert!(status.current().voice_ready);
    }

    #[test]
    fn test_empty_fixed_voice_list_listed_once() {
        let (mut out, status) = output(RecordingSynth {
            fixed: true,
            ..Default::default()
        });
        assert!(status.current().voice_ready);

        out.speak("hello");
        out.speak("again");
        let synth = synth(&mut out);
        assert_eq!(synth.listings.get(), 1);
        assert_eq!(synth.spoken[1], ("again".to_string(), None));
    }

    #[test]
    fn test_empty_changing_voice_list_is_retried() {
        let (mut out, _) = output(RecordingSynth::default());
        out.speak("hello");
        assert_eq!(synth(&mut out).listings.get(), 2);
    }

    #[test]
    fn test_voice_choice_is_cached() {
        let (mut out, _) = output(RecordingSynth {
            voices: voices(),
            ..Default::default()
        });
        synth(&mut out).voices = vec![Voice::new("Samantha Enhanced", "en-US")];
        out.refresh_voices();
        assert_eq!(out.selected_voice().unwrap().name, "Samantha");
    }

    // ---- Speaking ----

    #[test]
    fn test_unavailable_speak_is_no_op() {
        let status = StatusSink::new();
        let mut out: SpeechOutput<RecordingSynth> = SpeechOutput::new(
            Capability::Unavailable,
            VoiceSelector::new("Samantha", "en"),
            status.clone(),
        );
        out.speak("hello");
        out.interrupt();
        out.poll();
        assert!(!out.is_available());
        assert!(!status.current().speaking);
    }

    #[test]
    fn test_new_utterance_cancels_previous() {
        let (mut out, status) = output(RecordingSynth::default());
        out.speak("first");
        out.speak("second");
        assert_eq!(synth(&mut out).cancels, 1);
        assert_eq!(synth(&mut out).spoken.len(), 2);
        assert!(status.current().speaking);
    }

    #[test]
    fn test_interrupt_halts_playback() {
        let (mut out, status) = output(RecordingSynth::default());
        out.speak("hello");
        out.interrupt();
        assert!(!out.is_speaking());
        assert!(!status.current().speaking);
        assert_eq!(synth(&mut out).cancels, 1);

        out.interrupt();
        assert_eq!(synth(&mut out).cancels, 1);
    }

    #[test]
    fn test_finished_event_clears_speaking() {
        let (mut out, status) = output(RecordingSynth::default());
        out.speak("hello");
        synth(&mut out).events.push_back(UtteranceEvent::Finished);
        out.poll();
        assert!(!out.is_speaking());
        assert!(!status.current().speaking);
    }

    #[test]
    fn test_failed_event_clears_speaking() {
        let (mut out, status) = output(RecordingSynth::default());
        out.speak("hello");
        synth(&mut out)
            .events
            .push_back(UtteranceEvent::Failed("interrupted".to_string()));
        out.poll();
        assert!(!status.current().speaking);
    }

    #[test]
    fn test_speak_error_reports_failure() {
        let (mut out, status) = output(RecordingSynth {
            fail_next: true,
            ..Default::default()
        });
        out.speak("hello");
        assert!(!out.is_speaking());
        assert!(!status.current().speaking);

        out.speak("again");
        assert!(out.is_speaking());
    }
}
