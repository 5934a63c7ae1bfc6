// In src/command.rs

use thiserror::Error;

use crate::client_api::{NoteId, NoteInput};

pub const HELP: &str = "Available commands:
  list                             - Show all notes
  get <id>                         - Show one note
  create <title> | <content>       - Create a note
  update <id> <title> | <content>  - Replace the title and content of a note
  delete <id>                      - Delete a note
  help                             - Show this message
  quit                             - Exit the client";

/// One line of input to the interactive client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Get(NoteId),
    Create(NoteInput),
    Update(NoteId, NoteInput),
    Delete(NoteId),
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid note id '{0}'")]
    InvalidId(String),
    #[error("Unknown command: '{0}'")]
    Unknown(String),
}

/// Parses a line such as `update 3 Groceries | milk, eggs`.
///
/// Title and content are separated by the first `|`; without one the
/// content is empty. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.find(char::is_whitespace) {
        Some(idx) => (&line[..idx], line[idx..].trim()),
        None => (line, ""),
    };
    let command = match verb {
        "list" => Command::List,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "get" => Command::Get(single_id(rest, "get <id>")?),
        "delete" => Command::Delete(single_id(rest, "delete <id>")?),
        "create" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("create <title> | <content>"));
            }
            Command::Create(note_input(rest))
        }
        "update" => {
            const USAGE: &str = "update <id> <title> | <content>";
            let (id, body) = match rest.find(char::is_whitespace) {
                Some(idx) => (&rest[..idx], rest[idx..].trim()),
                None => (rest, ""),
            };
            if id.is_empty() || body.is_empty() {
                return Err(CommandError::Usage(USAGE));
            }
            Command::Update(parse_id(id)?, note_input(body))
        }
        _ => return Err(CommandError::Unknown(line.to_string())),
    };
    Ok(Some(command))
}

fn single_id(rest: &str, usage: &'static str) -> Result<NoteId, CommandError> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(id), None) => parse_id(id),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn parse_id(raw: &str) -> Result<NoteId, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

fn note_input(text: &str) -> NoteInput {
    match text.find('|') {
        Some(idx) => NoteInput::new(text[..idx].trim(), text[idx + 1..].trim()),
        None => NoteInput::new(text.trim(), ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("list"), Ok(Some(Command::List)));
        assert_eq!(parse("  help "), Ok(Some(Command::Help)));
        assert_eq!(parse("quit"), Ok(Some(Command::Quit)));
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("get 4"), Ok(Some(Command::Get(4))));
        assert_eq!(parse("delete 10"), Ok(Some(Command::Delete(10))));
    }

    #[test]
    fn test_create() {
        assert_eq!(
            parse("create Groceries | milk, eggs | bread"),
            Ok(Some(Command::Create(NoteInput::new(
                "Groceries",
                "milk, eggs | bread"
            ))))
        );
        assert_eq!(
            parse("create Just a title"),
            Ok(Some(Command::Create(NoteInput::new("Just a title", ""))))
        );
        assert!(matches!(parse("create"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_update() {
        assert_eq!(
            parse("update 3 X | Y"),
            Ok(Some(Command::Update(3, NoteInput::new("X", "Y"))))
        );
        assert!(matches!(parse("update 3"), Err(CommandError::Usage(_))));
        assert_eq!(
            parse("update three X | Y"),
            Err(CommandError::InvalidId("three".into()))
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("get abc"), Err(CommandError::InvalidId("abc".into())));
        assert!(matches!(parse("get"), Err(CommandError::Usage(_))));
        assert!(matches!(parse("get 1 2"), Err(CommandError::Usage(_))));
        assert_eq!(
            parse("frobnicate 1"),
            Err(CommandError::Unknown("frobnicate 1".into()))
        );
    }
}
