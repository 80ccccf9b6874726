//! Command handlers module for the cloudstash server.
//!
//! This module defines handler functions for chat commands, handling
//! registration, folder navigation, note ingestion, code retrieval, and
//! administrative views per client session.

use log::info;
use std::path::PathBuf;

use crate::catalog::FileCatalog;
use crate::config::ServerConfig;
use crate::directory::UserDirectory;
use crate::error::ServerError;
use crate::error::handlers::log_error;
use crate::protocol::commands::{Command, CommandResult, CommandStatus};
use crate::protocol::responses;
use crate::session::Session;
use crate::storage;
use crate::vpath;

/// Dispatches a received command to its corresponding handler.
///
/// # Arguments
///
/// * `session` - Mutable reference to the session issuing the command.
/// * `command` - Reference to the parsed command enum.
/// * `directory` - Mutable reference to the user directory.
/// * `catalog` - Mutable reference to the file catalog.
/// * `config` - Server configuration.
///
/// # Returns
///
/// * `CommandResult` - Result of the command execution, including status and message.
pub fn handle_command(
    session: &mut Session,
    command: &Command,
    directory: &mut UserDirectory,
    catalog: &mut FileCatalog,
    config: &ServerConfig,
) -> CommandResult {
    match command {
        Command::QUIT => handle_cmd_quit(session),
        Command::HELP => handle_cmd_help(),
        Command::IDENT(user_id) => handle_cmd_ident(session, user_id),
        Command::REGISTER(name) => handle_cmd_register(session, name, directory),
        Command::PWD => handle_cmd_pwd(session, directory),
        Command::CD(target) => handle_cmd_cd(session, target, directory),
        Command::LIST => handle_cmd_list(session, directory, catalog),
        Command::MKDIR(name) => handle_cmd_mkdir(session, name, directory),
        Command::RMDIR(target) => handle_cmd_rmdir(session, target, directory, catalog),
        Command::DEL(code) => handle_cmd_del(session, code, directory, catalog),
        Command::RENAME(args) => handle_cmd_rename(session, args, directory, catalog),
        Command::SEARCH(query) => handle_cmd_search(session, query, directory, catalog),
        Command::SETPASS(password) => handle_cmd_setpass(session, password, directory),
        Command::ADMIN(secret) => handle_cmd_admin(session, secret, directory, config),
        Command::USERS(query) => handle_cmd_users(session, query, directory),
        Command::FILES(query) => handle_cmd_files(session, query, directory, catalog),
        Command::TEXT(text) => handle_cmd_text(session, text, directory, catalog, config),
        Command::UNKNOWN => handle_cmd_unknown(),
    }
}

fn success(message: String) -> CommandResult {
    CommandResult {
        status: CommandStatus::Success,
        message: Some(message),
    }
}

fn failure(message: String) -> CommandResult {
    CommandResult {
        status: CommandStatus::Failure(message.trim_end().to_string()),
        message: Some(message),
    }
}

/// Renders a core error as a failure reply, logging it on the way out.
fn failure_from(err: ServerError) -> CommandResult {
    log_error(&err);
    failure(responses::line(&err.to_string()))
}

/// Resolves the acting user: the session must be identified and the id
/// registered. Returns the ready-made failure reply otherwise.
fn require_registered(
    session: &Session,
    directory: &UserDirectory,
) -> Result<String, CommandResult> {
    let Some(user_id) = session.user_id() else {
        return Err(failure(responses::line(
            "Identify first with IDENT <user-id>",
        )));
    };
    if !directory.is_registered(user_id) {
        return Err(failure(responses::line("Please REGISTER <name> first")));
    }
    Ok(user_id.to_string())
}

/// Like `require_registered`, but the user must also hold the admin flag.
fn require_admin(session: &Session, directory: &UserDirectory) -> Result<String, CommandResult> {
    let user_id = require_registered(session, directory)?;
    if !directory.is_admin(&user_id) {
        return Err(failure(responses::line("Admins only")));
    }
    Ok(user_id)
}

/// Handles the QUIT command: clears the session and signals connection close.
fn handle_cmd_quit(session: &mut Session) -> CommandResult {
    session.reset();
    CommandResult {
        status: CommandStatus::CloseConnection,
        message: Some(responses::goodbye()),
    }
}

fn handle_cmd_help() -> CommandResult {
    success(responses::help())
}

/// Handles the IDENT command: binds the session to a user id.
///
/// The id plays the role of a chat id; the transport is trusted to assert it.
fn handle_cmd_ident(session: &mut Session, user_id: &str) -> CommandResult {
    if user_id.contains(char::is_whitespace) || user_id.contains('\0') || user_id.len() > 64 {
        return failure(responses::line("Invalid user id"));
    }
    session.set_user_id(Some(user_id.to_string()));
    success(responses::line(&format!(
        "Session bound to user {}",
        user_id
    )))
}

/// Handles the REGISTER command: creates an account for the bound id.
fn handle_cmd_register(
    session: &mut Session,
    name: &str,
    directory: &mut UserDirectory,
) -> CommandResult {
    let Some(user_id) = session.user_id() else {
        return failure(responses::line("Identify first with IDENT <user-id>"));
    };
    match directory.register(user_id, name) {
        Ok(()) => success(responses::line(&format!(
            "Welcome {}! You are now registered.",
            name
        ))),
        Err(e) => failure_from(e.into()),
    }
}

fn handle_cmd_pwd(session: &mut Session, directory: &mut UserDirectory) -> CommandResult {
    let user_id = match require_registered(session, directory) {
        Ok(user_id) => user_id,
        Err(reply) => return reply,
    };
    success(responses::line(&format!(
        "Current path: {}",
        directory.current_folder(&user_id)
    )))
}

/// Handles the CD command: `..` moves up, `/` returns to root, and a name
/// enters a folder the user has created.
fn handle_cmd_cd(
    session: &mut Session,
    target: &str,
    directory: &mut UserDirectory,
) -> CommandResult {
    let user_id = match require_registered(session, directory) {
        Ok(user_id) => user_id,
        Err(reply) => return reply,
    };
    let current = directory.current_folder(&user_id);

    let destination = if target == ".." {
        if vpath::is_root(&current) {
            return success(responses::line("Already at root"));
        }
        vpath::parent_path(&current)
    } else if target == vpath::ROOT {
        vpath::ROOT.to_string()
    } else {
        let candidate = vpath::child_path(&current, target);
        if !directory.folder_exists(&user_id, &candidate) {
            return failure(responses::line(&format!("Folder {} not found", target)));
        }
        candidate
    };

    match directory.set_current_folder(&user_id, &destination) {
        Ok(()) => success(responses::line(&format!("Moved to {}", destination))),
        Err(e) => failure_from(e.into()),
    }
}

/// Handles the LIST command: sub-folders first, then the files in the
/// current folder with their codes.
fn handle_cmd_list(
    session: &mut Session,
    directory: &mut UserDirectory,
    catalog: &mut FileCatalog,
) -> CommandResult {
    let user_id = match require_registered(session, directory) {
        Ok(user_id) => user_id,
        Err(reply) => return reply,
    };
    let current = directory.current_folder(&user_id);
    let subfolders = directory.subfolders(&user_id, &current);
    let files = catalog.user_files(&user_id, &current);

    if subfolders.is_empty() && files.is_empty() {
        return success(responses::line(&format!("{} is empty", current)));
    }

    let mut out = vec![format!("Path: {}", current)];
    for folder in &subfolders {
        out.push(format!("DIR  {}", vpath::folder_name(folder)));
    }
    for file in &files {
        out.push(format!("FILE {}  {}", file.code, file.name));
    }
    success(responses::lines(&out))
}

fn handle_cmd_mkdir(
    session: &mut Session,
    name: &str,
    directory: &mut UserDirectory,
) -> CommandResult {
    let user_id = match require_registered(session, directory) {
        Ok(user_id) => user_id,
        Err(reply) => return reply,
    };
    match directory.create_folder(&user_id, name) {
        Ok(path) => success(responses::line(&format!("Folder {} created", path))),
        Err(e) => failure_from(e.into()),
    }
}

/// Handles the RMDIR command: removes the folder, then cascades to the
/// file records stored directly in it.
fn handle_cmd_rmdir(
    session: &mut Session,
    target: &str,
    directory: &mut UserDirectory,
    catalog: &mut FileCatalog,
) -> CommandResult {
    let user_id = match require_registered(session, directory) {
        Ok(user_id) => user_id,
        Err(reply) => return reply,
    };
    let folder = if target.starts_with('/') {
        target.to_string()
    } else {
        vpath::child_path(&directory.current_folder(&user_id), target)
    };

    if let Err(e) = directory.delete_folder(&user_id, &folder) {
        return failure_from(e.into());
    }
    match catalog.delete_files_in_folder(&user_id, &folder) {
        Ok(removed) => success(responses::line(&format!(
            "Folder {} removed ({} file record(s) deleted)",
            folder, removed
        ))),
        Err(e) => failure_from(e.into()),
    }
}

fn handle_cmd_del(
    session: &mut Session,
    code: &str,
    directory: &mut UserDirectory,
    catalog: &mut FileCatalog,
) -> CommandResult {
    let user_id = match require_registered(session, directory) {
        Ok(user_id) => user_id,
        Err(reply) => return reply,
    };
    match catalog.delete_file(code, &user_id) {
        Ok(()) => success(responses::line(&format!(
            "File {} deleted",
            code.to_uppercase()
        ))),
        Err(e) => failure_from(e.into()),
    }
}

/// Handles the RENAME command: the argument carries the code and the new
/// name, split here.
fn handle_cmd_rename(
    session: &mut Session,
    args: &str,
    directory: &mut UserDirectory,
    catalog: &mut FileCatalog,
) -> CommandResult {
    let user_id = match require_registered(session, directory) {
        Ok(user_id) => user_id,
        Err(reply) => return reply,
    };
    let mut parts = args.splitn(2, char::is_whitespace);
    let code = parts.next().unwrap_or("");
    let new_name = parts.next().unwrap_or("").trim();
    if code.is_empty() || new_name.is_empty() {
        return failure(responses::line("Usage: RENAME <code> <new name>"));
    }
    match catalog.rename_file(code, new_name, &user_id) {
        Ok(()) => success(responses::line(&format!("File renamed to {}", new_name))),
        Err(e) => failure_from(e.into()),
    }
}

fn handle_cmd_search(
    session: &mut Session,
    query: &str,
    directory: &mut UserDirectory,
    catalog: &mut FileCatalog,
) -> CommandResult {
    let user_id = match require_registered(session, directory) {
        Ok(user_id) => user_id,
        Err(reply) => return reply,
    };
    let results = catalog.search_files(&user_id, query);
    if results.is_empty() {
        return success(responses::line(&format!("No files found for '{}'", query)));
    }
    let mut out = vec![format!("Results for '{}':", query)];
    for file in &results {
        out.push(format!("FILE {}  {}", file.code, file.name));
    }
    success(responses::lines(&out))
}

fn handle_cmd_setpass(
    session: &mut Session,
    password: &str,
    directory: &mut UserDirectory,
) -> CommandResult {
    let user_id = match require_registered(session, directory) {
        Ok(user_id) => user_id,
        Err(reply) => return reply,
    };
    match directory.set_web_password(&user_id, password) {
        Ok(()) => success(responses::line(&format!(
            "Web password set. Log in with user id {} and this password.",
            user_id
        ))),
        Err(e) => failure_from(e.into()),
    }
}

/// Handles the ADMIN command: grants the admin flag when the shared secret
/// matches.
fn handle_cmd_admin(
    session: &mut Session,
    secret: &str,
    directory: &mut UserDirectory,
    config: &ServerConfig,
) -> CommandResult {
    let user_id = match require_registered(session, directory) {
        Ok(user_id) => user_id,
        Err(reply) => return reply,
    };
    if secret != config.admin_secret {
        return failure(responses::line("Invalid secret key"));
    }
    match directory.set_admin(&user_id, true) {
        Ok(()) => {
            info!("User {} granted admin", user_id);
            success(responses::line("You are now an admin"))
        }
        Err(e) => failure_from(e.into()),
    }
}

fn handle_cmd_users(
    session: &mut Session,
    query: &Option<String>,
    directory: &mut UserDirectory,
) -> CommandResult {
    if let Err(reply) = require_admin(session, directory) {
        return reply;
    }
    let users = match query {
        Some(query) => directory.search_users(query),
        None => directory.all_users(),
    };
    if users.is_empty() {
        return success(responses::line("No users found"));
    }
    let mut out = vec![format!("{} user(s):", users.len())];
    for user in &users {
        out.push(format!("USER {}  {}", user.user_id, user.username));
    }
    success(responses::lines(&out))
}

fn handle_cmd_files(
    session: &mut Session,
    query: &Option<String>,
    directory: &mut UserDirectory,
    catalog: &mut FileCatalog,
) -> CommandResult {
    if let Err(reply) = require_admin(session, directory) {
        return reply;
    }
    let files = match query {
        Some(query) => catalog.search_all_files(query),
        None => catalog.all_files(),
    };
    if files.is_empty() {
        return success(responses::line("No files found"));
    }
    let mut out = vec![format!("{} file(s):", files.len())];
    for file in &files {
        out.push(format!(
            "FILE {}  {}  (owner {})",
            file.code, file.name, file.owner_id
        ));
    }
    success(responses::lines(&out))
}

/// Handles free text: a line matching a stored code retrieves that record;
/// anything else is saved as a new note in the current folder.
fn handle_cmd_text(
    session: &mut Session,
    text: &str,
    directory: &mut UserDirectory,
    catalog: &mut FileCatalog,
    config: &ServerConfig,
) -> CommandResult {
    let user_id = match require_registered(session, directory) {
        Ok(user_id) => user_id,
        Err(reply) => return reply,
    };

    if let Some(record) = catalog.lookup(text) {
        let code = text.to_uppercase();
        let path = PathBuf::from(&record.path);
        if !path.exists() {
            return failure(responses::line("File not found on server"));
        }
        if storage::is_text_note(&path) {
            return match storage::read_note(&path) {
                Ok(content) => success(responses::lines(&[
                    format!("Note {} - {}:", code, record.name),
                    content,
                ])),
                Err(e) => failure_from(e.into()),
            };
        }
        let size = storage::file_size(&path).unwrap_or(0);
        return success(responses::line(&format!(
            "File {} - {} ({} bytes)",
            code, record.name, size
        )));
    }

    // Not a known code: store the line as a new note.
    let downloads = config.downloads_path();
    if let Err(e) = storage::ensure_downloads_dir(&downloads) {
        return failure_from(e.into());
    }
    let save_path = storage::note_save_path(&downloads, text);
    if let Err(e) = storage::write_note(&save_path, text) {
        return failure_from(e.into());
    }

    let folder = directory.current_folder(&user_id);
    let display_name = format!("Note: {}...", storage::note_prefix(text));
    match catalog.save_file_record(&save_path, &user_id, &display_name, &folder) {
        Ok(code) => success(responses::line(&format!(
            "Text saved to {}. Code: {}",
            folder, code
        ))),
        Err(e) => failure_from(e.into()),
    }
}

fn handle_cmd_unknown() -> CommandResult {
    failure(responses::line(
        "Unknown or incomplete command. Type HELP for the command list.",
    ))
}
