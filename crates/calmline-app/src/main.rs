//! Calmline terminal front-end - composition root.
//!
//! 1. Parse CLI args and load configuration from TOML
//! 2. Initialize tracing (stderr, so stdout stays the conversation)
//! 3. Probe the terminal voice platform and build the assistant
//! 4. Run the single-threaded input loop

mod cli;
mod commands;
mod render;
mod terminal;

use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use calmline_chat::{Assistant, VoiceSelector};
use calmline_core::config::CalmlineConfig;
use calmline_core::error::CalmlineError;

use crate::cli::CliArgs;
use crate::commands::{Command, HELP};
use crate::render::Renderer;
use crate::terminal::TerminalPlatform;

/// How often pending platform events are drained.
const PUMP_INTERVAL: Duration = Duration::from_millis(150);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before tracing exists so its log level can apply.
    let config_file = args.resolve_config_path();
    let loaded = CalmlineConfig::load(&config_file);
    let config_level = loaded
        .as_ref()
        .map(|c| c.general.log_level.clone())
        .unwrap_or_else(|_| CalmlineConfig::default().general.log_level);

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(args.resolve_log_level(&config_level))
            }),
        )
        .init();

    tracing::info!("Starting Calmline v{}", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(CalmlineError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %config_file.display(), "No config file, using defaults");
            CalmlineConfig::default()
        }
        Err(e) => {
            tracing::warn!(
                "Failed to load config from {}: {}. Using defaults.",
                config_file.display(),
                e
            );
            CalmlineConfig::default()
        }
    };

    let speak = config.voice.enabled && !args.mute;
    let mut platform = TerminalPlatform::new(config.speech.clone(), speak);
    let mut assistant = Assistant::new(&mut platform, VoiceSelector::from_config(&config.voice));
    let renderer = Renderer {
        json: args.json,
        explain: args.explain,
    };

    if let Some(text) = args.once.as_deref() {
        return run_once(&mut assistant, &renderer, text).await;
    }

    run_interactive(&mut assistant, &renderer).await
}

/// Answer one message, waiting for the spoken reply to finish.
async fn run_once(
    assistant: &mut Assistant<TerminalPlatform>,
    renderer: &Renderer,
    text: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(exchange) = assistant.submit(text) else {
        tracing::debug!("Nothing to answer");
        return Ok(());
    };
    println!("{}", renderer.exchange(&exchange)?);

    while assistant.status().speaking {
        tokio::time::sleep(PUMP_INTERVAL).await;
        assistant.pump();
    }
    Ok(())
}

async fn run_interactive(
    assistant: &mut Assistant<TerminalPlatform>,
    renderer: &Renderer,
) -> Result<(), Box<dyn std::error::Error>> {
    if !renderer.json {
        println!("Calmline is here. Type a message, or /help for commands.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pump = tokio::time::interval(PUMP_INTERVAL);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match Command::parse(&line) {
                    Some(Command::Quit) => break,
                    Some(command) => run_command(assistant, renderer, command)?,
                    None => {
                        if let Some(exchange) = assistant.submit(&line) {
                            println!("{}", renderer.exchange(&exchange)?);
                        }
                    }
                }
            }
            _ = pump.tick() => {
                for exchange in assistant.pump() {
                    println!("{}", renderer.exchange(&exchange)?);
                }
            }
        }
    }

    assistant.interrupt_playback();
    tracing::info!(messages = assistant.messages().len(), "Session ended");
    Ok(())
}

fn run_command(
    assistant: &mut Assistant<TerminalPlatform>,
    renderer: &Renderer,
    command: Command,
) -> Result<(), CalmlineError> {
    match command {
        Command::Listen => {
            if !assistant.capture_available() {
                println!(
                    "{}",
                    renderer.notice("Speech capture isn't available in this terminal.")?
                );
            }
            assistant.toggle_capture();
        }
        Command::Stop => assistant.interrupt_playback(),
        Command::Status => {
            let status = assistant.status();
            println!(
                "{}",
                renderer.status(&status, assistant.interim_transcript())?
            );
        }
        Command::History => {
            let history = renderer.history(assistant.messages())?;
            if !history.is_empty() {
                println!("{}", history);
            }
        }
        Command::Help => println!("{}", renderer.notice(HELP)?),
        Command::Unknown(name) => println!(
            "{}",
            renderer.notice(&format!("Unknown command /{}. Try /help.", name))?
        ),
        Command::Quit => {}
    }
    Ok(())
}
