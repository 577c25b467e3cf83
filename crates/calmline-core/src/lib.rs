pub mod config;
pub mod error;
pub mod events;

pub use config::CalmlineConfig;
pub use error::{CalmlineError, Result};
pub use events::{StatusEvent, VoiceStatus};
