//! Terminal voice platform.
//!
//! A terminal has no microphone bridge, so speech capture is always
//! unavailable. Speech synthesis shells out to an external program
//! (`espeak-ng` by default) when it can be found on `PATH`.

use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use calmline_chat::{
    Capability, CaptureEvent, SpeechRecognizer, SpeechSynthesizer, UtteranceEvent, Voice,
    VoiceError, VoicePlatform,
};
use calmline_core::config::{SpeechCommandConfig, VoiceTableFormat};

pub struct TerminalPlatform {
    speech: SpeechCommandConfig,
    speak: bool,
}

impl TerminalPlatform {
    pub fn new(speech: SpeechCommandConfig, speak: bool) -> Self {
        Self { speech, speak }
    }
}

impl VoicePlatform for TerminalPlatform {
    type Recognizer = NoRecognizer;
    type Synthesizer = ProcessSynthesizer;

    fn speech_recognition(&mut self) -> Capability<NoRecognizer> {
        Capability::Unavailable
    }

    fn speech_synthesis(&mut self) -> Capability<ProcessSynthesizer> {
        if !self.speak {
            return Capability::Unavailable;
        }
        match find_on_path(&self.speech.program) {
            Some(program) => {
                tracing::debug!(program = %program.display(), "Speech program found");
                Capability::Available(ProcessSynthesizer::new(program, &self.speech))
            }
            None => {
                tracing::info!(program = %self.speech.program, "Speech program not found on PATH");
                Capability::Unavailable
            }
        }
    }
}

/// Recognizer type for hosts without speech capture. Cannot be constructed.
pub enum NoRecognizer {}

impl SpeechRecognizer for NoRecognizer {
    fn start(&mut self) -> Result<(), VoiceError> {
        match *self {}
    }

    fn stop(&mut self) {
        match *self {}
    }

    fn poll_event(&mut self) -> Option<CaptureEvent> {
        match *self {}
    }
}

// =============================================================================
// ProcessSynthesizer
// =============================================================================

/// Speaks each utterance by spawning the configured program.
pub struct ProcessSynthesizer {
    program: PathBuf,
    voice_flag: String,
    list_voices_args: Vec<String>,
    voice_table: VoiceTableFormat,
    child: Option<Child>,
}

impl ProcessSynthesizer {
    pub fn new(program: PathBuf, config: &SpeechCommandConfig) -> Self {
        Self {
            program,
            voice_flag: config.voice_flag.clone(),
            list_voices_args: config.list_voices_args.clone(),
            voice_table: config.voice_table,
            child: None,
        }
    }

    fn speak_command(&self, text: &str, voice: Option<&Voice>) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(voice) = voice.filter(|_| !self.voice_flag.is_empty()) {
            cmd.arg(&self.voice_flag).arg(&voice.name);
        }
        cmd.arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl SpeechSynthesizer for ProcessSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        if self.list_voices_args.is_empty() {
            return Vec::new();
        }
        let output = Command::new(&self.program)
            .args(&self.list_voices_args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();
        match output {
            Ok(out) if out.status.success() => {
                parse_voice_table(self.voice_table, &String::from_utf8_lossy(&out.stdout))
            }
            Ok(out) => {
                tracing::debug!(status = %out.status, "Voice listing exited unsuccessfully");
                Vec::new()
            }
            Err(e) => {
                tracing::debug!("Voice listing failed: {}", e);
                Vec::new()
            }
        }
    }

    /// The installed voices don't change while the program is running.
    fn voices_fixed(&self) -> bool {
        true
    }

    fn speak(&mut self, text: &str, voice: Option<&Voice>) -> Result<(), VoiceError> {
        self.cancel();
        let child = self.speak_command(text, voice).spawn()?;
        tracing::debug!(pid = child.id(), "Utterance started");
        self.child = Some(child);
        Ok(())
    }

    fn cancel(&mut self) {
        if let Some(mut child) = self.child.take() {
            // Kill fails if the child already exited; reaping it is all that matters then.
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn poll_event(&mut self) -> Option<UtteranceEvent> {
        let child = self.child.as_mut()?;
        match child.try_wait() {
            Ok(None) => None,
            Ok(Some(status)) => {
                self.child = None;
                if status.success() {
                    Some(UtteranceEvent::Finished)
                } else {
                    Some(UtteranceEvent::Failed(format!(
                        "{} exited with {}",
                        self.program.display(),
                        status
                    )))
                }
            }
            Err(e) => {
                self.child = None;
                Some(UtteranceEvent::Failed(e.to_string()))
            }
        }
    }
}

impl Drop for ProcessSynthesizer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Parse the voice listing printed by the configured program.
pub fn parse_voice_table(format: VoiceTableFormat, output: &str) -> Vec<Voice> {
    match format {
        VoiceTableFormat::Espeak => parse_espeak_voices(output),
        VoiceTableFormat::Say => parse_say_voices(output),
    }
}

/// ```text
/// Pty Language       Age/Gender VoiceName          File          Other Languages
///  5  en-us           --/M      English_(America)  gmw/en-US     (en 2)
/// ```
///
/// Rows must start with a numeric priority; anything else is not a voice.
fn parse_espeak_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .filter_map(|line| {
            let cols: Vec<&str> = line.split_whitespace().collect();
            match cols.as_slice() {
                [pty, lang, _age_gender, name, ..] if pty.parse::<u32>().is_ok() => {
                    Some(Voice::new(*name, *lang))
                }
                _ => None,
            }
        })
        .collect()
}

/// ```text
/// Alex                en_US    # Most people recognize me by my voice.
/// Bad News            en_US    # The light you see at the end of the tunnel...
/// ```
///
/// Names may contain spaces; the locale is the last column before `#`.
fn parse_say_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .filter_map(|line| {
            let (columns, _sample) = line.split_once('#')?;
            let (name, lang) = columns.trim().rsplit_once(char::is_whitespace)?;
            let name = name.trim_end();
            if name.is_empty() || !lang.contains(['_', '-']) {
                return None;
            }
            Some(Voice::new(name, lang))
        })
        .collect()
}

/// Locate `program` on `PATH`, or accept it as-is when it is a path.
pub fn find_on_path(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }
    let as_path = Path::new(program);
    if as_path.components().count() > 1 {
        return as_path.is_file().then(|| as_path.to_path_buf());
    }
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = candidate.with_extension("exe");
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}
