//! Module `commands`
//!
//! Defines the chat command parsing logic and related data structures
//! used to represent commands, their status, and results.

/// Represents a command parsed from one client line.
///
/// Commands that require arguments store them as `String` variants. A line
/// that starts with no known verb is free text: either a retrieval code or
/// the content of a new note.
#[derive(Debug, PartialEq)]
pub enum Command {
    QUIT,
    HELP,
    LIST,
    PWD,
    IDENT(String),    // Bind the session to a user id
    REGISTER(String), // Create an account with a display name
    CD(String),       // Enter a folder, "..", or "/"
    MKDIR(String),    // Create a folder under the current one
    RMDIR(String),    // Delete a folder (name or absolute path)
    DEL(String),      // Delete a file by code
    RENAME(String),   // "<code> <new name>"
    SEARCH(String),   // Search own files by name
    SETPASS(String),  // Set the web login password
    ADMIN(String),    // Become admin with the shared secret
    USERS(Option<String>), // Admin: list or search users
    FILES(Option<String>), // Admin: list or search all files
    UNKNOWN,          // Known verb misused
    TEXT(String),     // Free text: code lookup or new note
}

/// Represents the outcome status of executing a command.
pub enum CommandStatus {
    Success,
    Failure(String),
    CloseConnection,
}

/// Struct encapsulating the full result of a command execution.
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

/// Parses a raw line received from a client into the `Command` enum.
///
/// Validates required arguments and returns `UNKNOWN` if a known verb is
/// misused; anything that is not a verb at all falls through to `TEXT`.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or("").to_ascii_uppercase();
    let arg = parts.next().unwrap_or("").trim();

    match verb.as_str() {
        "QUIT" | "Q" => Command::QUIT,
        "HELP" | "HOME" => Command::HELP,
        "LIST" | "LS" => Command::LIST,
        "PWD" => Command::PWD,
        "IDENT" if !arg.is_empty() => Command::IDENT(arg.to_string()),
        "REGISTER" if !arg.is_empty() => Command::REGISTER(arg.to_string()),
        "CD" if !arg.is_empty() => Command::CD(arg.to_string()),
        "MKDIR" if !arg.is_empty() => Command::MKDIR(arg.to_string()),
        "RMDIR" if !arg.is_empty() => Command::RMDIR(arg.to_string()),
        "DEL" if !arg.is_empty() => Command::DEL(arg.to_string()),
        "RENAME" if !arg.is_empty() => Command::RENAME(arg.to_string()),
        "SEARCH" if !arg.is_empty() => Command::SEARCH(arg.to_string()),
        "SETPASS" if !arg.is_empty() => Command::SETPASS(arg.to_string()),
        "ADMIN" if !arg.is_empty() => Command::ADMIN(arg.to_string()),
        "USERS" => Command::USERS(if arg.is_empty() {
            None
        } else {
            Some(arg.to_string())
        }),
        "FILES" => Command::FILES(if arg.is_empty() {
            None
        } else {
            Some(arg.to_string())
        }),
        "IDENT" | "REGISTER" | "CD" | "MKDIR" | "RMDIR" | "DEL" | "RENAME" | "SEARCH"
        | "SETPASS" | "ADMIN" => Command::UNKNOWN,
        _ => Command::TEXT(trimmed.to_string()),
    }
}
