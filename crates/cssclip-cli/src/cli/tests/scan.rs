use super::*;
use std::path::PathBuf;

#[test]
fn scan_takes_a_path() {
    match parse(&["cssclip", "scan", "site.css"]) {
        CliCommand::Scan { path } => assert_eq!(path, PathBuf::from("site.css")),
        other => panic!("expected Scan, got {:?}", other),
    }
}

#[test]
fn scan_requires_a_path() {
    assert!(Cli::try_parse_from(["cssclip", "scan"]).is_err());
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["cssclip", "clip"]).is_err());
}
