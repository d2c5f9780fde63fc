use clap::{Parser, Subcommand};
use ripple::events::{ControlAction, ControlCommand, SOCKET_PATH};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "ripplectl", version, about = "Drive the ripple cards of a running ripple window", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Commands {
    /// Select a card. Does nothing if it is already selected.
    Check {
        /// Zero-based card index
        card: usize,
    },
    /// Deselect a card. Does nothing if it is not selected.
    Uncheck {
        /// Zero-based card index
        card: usize,
    },
    /// Flip a card's selection state.
    Toggle {
        /// Zero-based card index
        card: usize,
    },
}

impl From<Commands> for ControlCommand {
    fn from(command: Commands) -> Self {
        let (action, card) = match command {
            Commands::Check { card } => (ControlAction::Check, card),
            Commands::Uncheck { card } => (ControlAction::Uncheck, card),
            Commands::Toggle { card } => (ControlAction::Toggle, card),
        };
        ControlCommand { action, card }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    send_command(ControlCommand::from(cli.command))
}

fn send_command(command: ControlCommand) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to ripple at {}: {}. Is ripple running?",
            SOCKET_PATH,
            e
        )
    })?;
    stream.set_read_timeout(Some(Duration::from_secs(2)))?;

    writeln!(stream, "{}", command)?;
    log::debug!("Sent '{}'", command);

    let mut reply = String::new();
    BufReader::new(&stream).read_line(&mut reply)?;
    match reply.trim() {
        "ok" => Ok(()),
        other => anyhow::bail!("ripple rejected '{}': {}", command, other),
    }
}
