//! Conversational core for Calmline.
//!
//! Classifies user text against fixed keyword categories, composes templated
//! replies, keeps the append-only conversation, and wires the speech capture
//! and speech output adapters around it.

pub mod assistant;
pub mod capture;
pub mod classifier;
pub mod composer;
pub mod error;
pub mod keywords;
pub mod platform;
pub mod session;
pub mod speech;
pub mod status;
pub mod types;

pub use assistant::Assistant;
pub use capture::{CaptureAdapter, CaptureEvent, SpeechRecognizer};
pub use classifier::{classify, Classification};
pub use composer::ReplyComposer;
pub use error::VoiceError;
pub use keywords::Category;
pub use platform::{Capability, VoicePlatform};
pub use session::ChatSession;
pub use speech::{SpeechOutput, SpeechSynthesizer, UtteranceEvent, Voice, VoiceSelector};
pub use status::StatusSink;
pub use types::{Conversation, Exchange, Message, Role};
