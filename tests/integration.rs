//! End-to-end tests over the directory, catalog, and command handlers,
//! each running against its own record stores in a fresh temp directory.

use std::fs;
use std::path::{Path, PathBuf};

use cloudstash::catalog::{CODE_ALPHABET, CODE_LENGTH, FileCatalog};
use cloudstash::config::ServerConfig;
use cloudstash::directory::UserDirectory;
use cloudstash::protocol::{CommandStatus, handle_command, parse_command};
use cloudstash::session::Session;

/// Fresh scratch directory for one test.
fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cloudstash-it-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn open_directory(dir: &Path) -> UserDirectory {
    UserDirectory::open(dir.join("users.json"))
}

fn open_catalog(dir: &Path) -> FileCatalog {
    FileCatalog::open(dir.join("file_db.json"))
}

#[test]
fn test_registration_is_idempotent_and_seeds_root() {
    let dir = temp_dir("register");
    let mut directory = open_directory(&dir);

    assert!(directory.register("42", "alice").is_ok());
    assert!(directory.register("42", "alice2").is_err());

    assert!(directory.is_registered("42"));
    assert_eq!(directory.current_folder("42"), "/");
    assert!(directory.folder_exists("42", "/"));
    assert!(directory.subfolders("42", "/").is_empty());
}

#[test]
fn test_create_folder_builds_child_of_current() {
    let dir = temp_dir("mkdir");
    let mut directory = open_directory(&dir);
    directory.register("42", "alice").unwrap();

    assert_eq!(directory.create_folder("42", "docs").unwrap(), "/docs");
    // Same resulting path fails
    assert!(directory.create_folder("42", "docs").is_err());

    directory.set_current_folder("42", "/docs").unwrap();
    assert_eq!(
        directory.create_folder("42", "reports").unwrap(),
        "/docs/reports"
    );
}

#[test]
fn test_create_folder_rejects_bad_names_and_unknown_users() {
    let dir = temp_dir("mkdir-bad");
    let mut directory = open_directory(&dir);
    directory.register("42", "alice").unwrap();

    assert!(directory.create_folder("42", "a/b").is_err());
    assert!(directory.create_folder("42", "..").is_err());
    assert!(directory.create_folder("42", "   ").is_err());
    assert!(directory.create_folder("99", "docs").is_err());
}

#[test]
fn test_subfolders_returns_direct_children_only() {
    let dir = temp_dir("subfolders");
    let mut directory = open_directory(&dir);
    directory.register("42", "alice").unwrap();

    directory.create_folder("42", "docs").unwrap();
    directory.set_current_folder("42", "/docs").unwrap();
    directory.create_folder("42", "reports").unwrap();
    directory.set_current_folder("42", "/").unwrap();
    directory.create_folder("42", "docs2").unwrap();

    let children = directory.subfolders("42", "/");
    assert_eq!(children, vec!["/docs".to_string(), "/docs2".to_string()]);

    // /docs has exactly one child; /docs2 is not it
    assert_eq!(
        directory.subfolders("42", "/docs"),
        vec!["/docs/reports".to_string()]
    );
}

#[test]
fn test_delete_folder_resets_current_and_spares_root() {
    let dir = temp_dir("rmdir");
    let mut directory = open_directory(&dir);
    directory.register("42", "alice").unwrap();

    assert!(directory.delete_folder("42", "/").is_err());

    directory.create_folder("42", "docs").unwrap();
    directory.set_current_folder("42", "/docs").unwrap();
    directory.delete_folder("42", "/docs").unwrap();

    assert_eq!(directory.current_folder("42"), "/");
    assert!(!directory.folder_exists("42", "/docs"));
    assert!(directory.delete_folder("42", "/docs").is_err());
}

#[test]
fn test_codes_are_unique_well_formed_and_case_insensitive() {
    let dir = temp_dir("codes");
    let mut catalog = open_catalog(&dir);

    let mut codes = Vec::new();
    for i in 0..30 {
        let code = catalog
            .save_file_record(&dir.join(format!("f{}.txt", i)), "42", "file", "/")
            .unwrap();
        assert_eq!(code.len(), CODE_LENGTH);
        assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        assert!(!codes.contains(&code));
        codes.push(code);
    }

    let code = &codes[0];
    let lower = code.to_lowercase();
    assert!(catalog.lookup(&lower).is_some());
    assert_eq!(
        catalog.file_path(&lower),
        catalog.file_path(code.as_str())
    );
}

#[test]
fn test_rename_and_delete_enforce_ownership() {
    let dir = temp_dir("ownership");
    let mut catalog = open_catalog(&dir);

    let stored = dir.join("report.pdf");
    fs::write(&stored, b"pdf bytes").unwrap();
    let code = catalog
        .save_file_record(&stored, "42", "Report.pdf", "/")
        .unwrap();

    // Non-owner attempts fail and leave the record unchanged
    assert!(catalog.rename_file(&code, "hijacked", "99").is_err());
    assert!(catalog.delete_file(&code, "99").is_err());
    assert_eq!(catalog.lookup(&code).unwrap().name, "Report.pdf");
    assert!(stored.exists());

    // Owner succeeds
    assert!(catalog.rename_file(&code, "Annual Report.pdf", "42").is_ok());
    assert_eq!(catalog.lookup(&code).unwrap().name, "Annual Report.pdf");
    assert!(catalog.delete_file(&code, "42").is_ok());
    assert!(catalog.lookup(&code).is_none());
    assert!(!stored.exists());
}

#[test]
fn test_delete_survives_missing_disk_file() {
    let dir = temp_dir("missing-disk");
    let mut catalog = open_catalog(&dir);

    let code = catalog
        .save_file_record(&dir.join("never-written.bin"), "42", "ghost", "/")
        .unwrap();
    assert!(catalog.delete_file(&code, "42").is_ok());
    assert!(catalog.lookup(&code).is_none());
}

#[test]
fn test_folder_listing_excludes_subfolder_contents() {
    let dir = temp_dir("listing");
    let mut catalog = open_catalog(&dir);

    catalog
        .save_file_record(&dir.join("a.txt"), "42", "a", "/docs")
        .unwrap();
    catalog
        .save_file_record(&dir.join("b.txt"), "42", "b", "/docs/reports")
        .unwrap();
    catalog
        .save_file_record(&dir.join("c.txt"), "99", "c", "/docs")
        .unwrap();

    let files = catalog.user_files("42", "/docs");
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "a");
}

#[test]
fn test_folder_delete_cascades_exactly() {
    let dir = temp_dir("cascade");
    let mut directory = open_directory(&dir);
    let mut catalog = open_catalog(&dir);
    directory.register("42", "alice").unwrap();
    directory.create_folder("42", "docs").unwrap();
    directory.set_current_folder("42", "/docs").unwrap();
    directory.create_folder("42", "reports").unwrap();

    let in_docs = dir.join("in_docs.txt");
    fs::write(&in_docs, b"doomed").unwrap();
    let doomed = catalog
        .save_file_record(&in_docs, "42", "doomed", "/docs")
        .unwrap();
    let nested = catalog
        .save_file_record(&dir.join("nested.txt"), "42", "nested", "/docs/reports")
        .unwrap();
    let other = catalog
        .save_file_record(&dir.join("other.txt"), "99", "other", "/docs")
        .unwrap();

    directory.delete_folder("42", "/docs").unwrap();
    let removed = catalog.delete_files_in_folder("42", "/docs").unwrap();

    assert_eq!(removed, 1);
    assert_eq!(directory.current_folder("42"), "/");
    assert!(catalog.lookup(&doomed).is_none());
    assert!(!in_docs.exists());
    // Sub-folder contents and other owners' records survive
    assert!(catalog.lookup(&nested).is_some());
    assert!(catalog.lookup(&other).is_some());
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let dir = temp_dir("search");
    let mut catalog = open_catalog(&dir);

    catalog
        .save_file_record(&dir.join("r.pdf"), "42", "Report.pdf", "/")
        .unwrap();
    catalog
        .save_file_record(&dir.join("n.txt"), "42", "notes", "/")
        .unwrap();

    for query in ["report", "REPORT", "ort"] {
        let hits = catalog.search_files("42", query);
        assert_eq!(hits.len(), 1, "query {:?}", query);
        assert_eq!(hits[0].name, "Report.pdf");
    }
    assert!(catalog.search_files("42", "missing").is_empty());
    assert!(catalog.search_files("99", "report").is_empty());

    // Administrative search spans owners
    catalog
        .save_file_record(&dir.join("r2.pdf"), "99", "Other Report", "/")
        .unwrap();
    assert_eq!(catalog.search_all_files("report").len(), 2);
}

#[test]
fn test_admin_and_user_search() {
    let dir = temp_dir("users");
    let mut directory = open_directory(&dir);
    directory.register("42", "alice").unwrap();
    directory.register("77", "bob").unwrap();

    assert!(!directory.is_admin("42"));
    directory.set_admin("42", true).unwrap();
    assert!(directory.is_admin("42"));
    assert!(!directory.is_admin("unknown"));

    assert_eq!(directory.all_users().len(), 2);
    let hits = directory.search_users("ALI");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].username, "alice");
    // Matches on id as well as name
    assert_eq!(directory.search_users("77").len(), 1);
}

#[test]
fn test_web_login_requires_exact_password() {
    let dir = temp_dir("weblogin");
    let mut directory = open_directory(&dir);
    directory.register("42", "alice").unwrap();

    // Unset password always fails
    assert!(!directory.validate_web_login("42", ""));
    directory.set_web_password("42", "hunter2").unwrap();
    assert!(directory.validate_web_login("42", "hunter2"));
    assert!(!directory.validate_web_login("42", "Hunter2"));
    assert!(!directory.validate_web_login("unknown", "hunter2"));
}

#[test]
fn test_stores_round_trip_across_reopen() {
    let dir = temp_dir("roundtrip");
    {
        let mut directory = open_directory(&dir);
        let mut catalog = open_catalog(&dir);
        directory.register("42", "alice").unwrap();
        directory.create_folder("42", "docs").unwrap();
        directory.set_current_folder("42", "/docs").unwrap();
        catalog
            .save_file_record(&dir.join("a.txt"), "42", "a", "/docs")
            .unwrap();
    }

    let directory = open_directory(&dir);
    let catalog = open_catalog(&dir);
    assert!(directory.is_registered("42"));
    assert_eq!(directory.current_folder("42"), "/docs");
    assert!(directory.folder_exists("42", "/docs"));
    assert_eq!(catalog.user_files("42", "/docs").len(), 1);
}

/// Drives a whole conversation through `handle_command`: identify,
/// register, create a folder, save a note, list it, retrieve it by code.
#[test]
fn test_command_flow_end_to_end() {
    let dir = temp_dir("flow");
    let config = ServerConfig {
        downloads_dir: dir.join("downloads").to_string_lossy().into_owned(),
        user_db_path: dir.join("users.json").to_string_lossy().into_owned(),
        file_db_path: dir.join("file_db.json").to_string_lossy().into_owned(),
        ..ServerConfig::default()
    };
    let mut directory = UserDirectory::open(&config.user_db_path);
    let mut catalog = FileCatalog::open(&config.file_db_path);
    let mut session = Session::new("127.0.0.1:4000".parse().unwrap());

    let run = |line: &str,
                   session: &mut Session,
                   directory: &mut UserDirectory,
                   catalog: &mut FileCatalog| {
        handle_command(
            session,
            &parse_command(line),
            directory,
            catalog,
            &config,
        )
    };

    // Commands before IDENT/REGISTER are refused
    let result = run("LIST", &mut session, &mut directory, &mut catalog);
    assert!(matches!(result.status, CommandStatus::Failure(_)));

    assert!(!session.is_identified());
    let result = run("IDENT 42", &mut session, &mut directory, &mut catalog);
    assert!(matches!(result.status, CommandStatus::Success));
    assert!(session.is_identified());
    assert_eq!(session.client_addr().port(), 4000);
    let result = run("REGISTER alice", &mut session, &mut directory, &mut catalog);
    assert!(matches!(result.status, CommandStatus::Success));

    let result = run("MKDIR docs", &mut session, &mut directory, &mut catalog);
    assert!(matches!(result.status, CommandStatus::Success));
    let result = run("CD docs", &mut session, &mut directory, &mut catalog);
    assert!(matches!(result.status, CommandStatus::Success));
    assert_eq!(directory.current_folder("42"), "/docs");

    // Free text becomes a note and replies with the code
    let result = run(
        "remember the milk",
        &mut session,
        &mut directory,
        &mut catalog,
    );
    assert!(matches!(result.status, CommandStatus::Success));
    let message = result.message.unwrap();
    let code = message.trim().rsplit(' ').next().unwrap().to_string();
    assert_eq!(code.len(), CODE_LENGTH);

    let result = run("LIST", &mut session, &mut directory, &mut catalog);
    let listing = result.message.unwrap();
    assert!(listing.contains(&code));
    assert!(listing.contains("Note: remembert..."));

    // Sending the code back (lower-cased) retrieves the note content
    let result = run(
        &code.to_lowercase(),
        &mut session,
        &mut directory,
        &mut catalog,
    );
    assert!(matches!(result.status, CommandStatus::Success));
    assert!(result.message.unwrap().contains("remember the milk"));

    // Admin views are gated until the secret is presented
    let result = run("USERS", &mut session, &mut directory, &mut catalog);
    assert!(matches!(result.status, CommandStatus::Failure(_)));
    let result = run("ADMIN secret123", &mut session, &mut directory, &mut catalog);
    assert!(matches!(result.status, CommandStatus::Success));
    let result = run("USERS", &mut session, &mut directory, &mut catalog);
    assert!(matches!(result.status, CommandStatus::Success));
    assert!(result.message.unwrap().contains("alice"));

    let result = run("QUIT", &mut session, &mut directory, &mut catalog);
    assert!(matches!(result.status, CommandStatus::CloseConnection));
}
