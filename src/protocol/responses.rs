//! Response handling
//!
//! Reply formatting for the chat interface. The core modules never format
//! user-facing text; everything a client reads is assembled here or in the
//! command handlers.

/// Terminate a single reply line.
pub fn line(message: &str) -> String {
    format!("{}\r\n", message)
}

/// Join reply lines into one response.
pub fn lines(messages: &[String]) -> String {
    let mut out = String::new();
    for message in messages {
        out.push_str(message);
        out.push_str("\r\n");
    }
    out
}

/// Greeting sent when a session opens.
pub fn greeting() -> String {
    line("Welcome to cloudstash. IDENT <user-id> to begin, HELP for commands.")
}

/// Farewell sent on QUIT.
pub fn goodbye() -> String {
    line("Goodbye")
}

/// The HELP text.
pub fn help() -> String {
    lines(&[
        "Commands:".to_string(),
        "  IDENT <user-id>          bind this session to your id".to_string(),
        "  REGISTER <name>          create an account".to_string(),
        "  LIST                     list files and folders here".to_string(),
        "  PWD                      show the current path".to_string(),
        "  CD <name> | .. | /       change folder".to_string(),
        "  MKDIR <name>             create a folder".to_string(),
        "  RMDIR <name>             delete a folder and its files".to_string(),
        "  DEL <code>               delete a file".to_string(),
        "  RENAME <code> <name>     rename a file".to_string(),
        "  SEARCH <query>           search your files by name".to_string(),
        "  SETPASS <password>       set the web login password".to_string(),
        "  ADMIN <secret>           become an admin".to_string(),
        "  USERS [query]            admin: list users".to_string(),
        "  FILES [query]            admin: list all files".to_string(),
        "  QUIT                     close the session".to_string(),
        "Send any other text to save it as a note, or a code to retrieve.".to_string(),
    ])
}
