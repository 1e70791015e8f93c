use clap::Parser;
use std::path::PathBuf;

use super::args::{CliArgs, Command};

#[test]
fn parses_extract_defaults() {
    let args = CliArgs::try_parse_from(["typeexpand", "extract", "snap.json", "models.ts"])
        .expect("extract args should parse");

    let Command::Extract(extract) = args.command else {
        panic!("expected extract command");
    };
    assert_eq!(extract.snapshot, PathBuf::from("snap.json"));
    assert_eq!(extract.file, "models.ts");
    assert!(!extract.keep_unresolved_generics);
    assert_eq!(extract.expand_depth, 0);
    assert!(!extract.pretty);
}

#[test]
fn parses_extract_flags() {
    let args = CliArgs::try_parse_from([
        "typeexpand",
        "extract",
        "snap.json",
        "models.ts",
        "--keep-unresolved-generics",
        "--expand-depth",
        "2",
        "--pretty",
    ])
    .expect("extract flags should parse");

    let Command::Extract(extract) = args.command else {
        panic!("expected extract command");
    };
    assert!(extract.keep_unresolved_generics);
    assert_eq!(extract.expand_depth, 2);
    assert!(extract.pretty);
}

#[test]
fn parses_at_position() {
    let args = CliArgs::try_parse_from(["typeexpand", "at", "snap.json", "a.ts", "3", "14"])
        .expect("at args should parse");

    let Command::At(at) = args.command else {
        panic!("expected at command");
    };
    assert_eq!(at.file, "a.ts");
    assert_eq!((at.line, at.character), (3, 14));
}

#[test]
fn rejects_missing_arguments() {
    assert!(CliArgs::try_parse_from(["typeexpand"]).is_err());
    assert!(CliArgs::try_parse_from(["typeexpand", "at", "snap.json", "a.ts", "3"]).is_err());
    assert!(CliArgs::try_parse_from(["typeexpand", "extract", "snap.json", "a.ts", "--expand-depth", "-1"]).is_err());
}
