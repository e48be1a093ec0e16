//! Line-oriented terminal input.
//!
//! Commands: `enter`, `open`, `close`, `section <name>`, `quit`.

use folio_sequence::domain::commands::UserCommand;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::driver::PlayerInput;

/// Why a console line was not understood.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    /// The first word is not a known command.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// `section` was given without a name.
    #[error("section requires a name, e.g. `section projects`")]
    MissingSection,
}

/// Parses one console line. Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// Returns `ConsoleError` if the line is not a known command.
pub fn parse_line(line: &str) -> Result<Option<PlayerInput>, ConsoleError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let input = match word.to_ascii_lowercase().as_str() {
        "enter" | "start" => PlayerInput::Command(UserCommand::start()),
        "open" => PlayerInput::Command(UserCommand::open()),
        "close" => PlayerInput::Command(UserCommand::close()),
        "section" | "go" => {
            if rest.is_empty() {
                return Err(ConsoleError::MissingSection);
            }
            PlayerInput::Command(UserCommand::select(rest))
        }
        "quit" | "exit" => PlayerInput::Quit,
        other => return Err(ConsoleError::UnknownCommand(other.to_owned())),
    };
    Ok(Some(input))
}

/// Reads lines from `reader` and forwards parsed inputs until end of input
/// or until the receiver is dropped. Malformed lines are logged and skipped.
///
/// # Errors
///
/// Returns an I/O error if reading fails.
pub async fn forward_lines<R>(reader: R, tx: mpsc::Sender<PlayerInput>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(Some(input)) => {
                let quit = matches!(input, PlayerInput::Quit);
                if tx.send(input).await.is_err() || quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => warn!(%err, "ignoring console input"),
        }
    }
    debug!("console input closed");
    Ok(())
}
