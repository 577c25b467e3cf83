//! Slash commands accepted on the input line.

/// A parsed `/command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Toggle speech capture.
    Listen,
    /// Interrupt the reply being spoken.
    Stop,
    Status,
    History,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse an input line. Returns `None` for ordinary chat text.
    pub fn parse(line: &str) -> Option<Command> {
        let name = line.trim().strip_prefix('/')?;
        let name = name.split_whitespace().next().unwrap_or("");
        let command = match name.to_lowercase().as_str() {
            "listen" | "mic" => Command::Listen,
            "stop" => Command::Stop,
            "status" => Command::Status,
            "history" => Command::History,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        };
        Some(command)
    }
}

pub const HELP: &str = "\
Type a message and press Enter.
  /listen   start or stop listening
  /stop     stop the spoken reply
  /status   show listening and speaking state
  /history  show the conversation so far
  /quit     leave";
