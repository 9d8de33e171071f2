//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. Params extraction: correct fields are extracted from ArgMatches
//! 2. Flag overrides are shared by every command
//! 3. Positional shifting: -d shifts the first positional to input

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{compile_command, dump_command, exec_command};
use crate::commands::document::FlagOverrides;
use crate::commands::dump::Stage;

#[test]
fn dump_defaults_to_optimised_stage() {
    let m = dump_command()
        .try_get_matches_from(["dump", "pattern.json"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.document_path, Some(PathBuf::from("pattern.json")));
    assert_eq!(params.document_text, None);
    assert_eq!(params.stage, Stage::Optimised);
    assert_eq!(params.overrides, FlagOverrides::default());
}

#[test]
fn dump_stage_is_parsed() {
    let m = dump_command()
        .try_get_matches_from(["dump", "pattern.json", "--stage", "accelerated"])
        .unwrap();

    assert_eq!(DumpParams::from_matches(&m).stage, Stage::Accelerated);
}

#[test]
fn dump_rejects_unknown_stage() {
    let result = dump_command().try_get_matches_from(["dump", "pattern.json", "--stage", "raw"]);

    assert!(result.is_err());
}

#[test]
fn compile_collects_overrides() {
    let m = compile_command()
        .try_get_matches_from([
            "compile",
            "pattern.json",
            "-i",
            "-s",
            "--no-multiline",
            "--backtrack-limit",
            "500",
            "--compact",
        ])
        .unwrap();
    let params = CompileParams::from_matches(&m);

    assert_eq!(
        params.overrides,
        FlagOverrides {
            caseless: true,
            dot_all: true,
            no_multiline: true,
            ..FlagOverrides::default()
        }
    );
    assert_eq!(params.backtrack_limit, Some(500));
    assert!(params.compact);
}

#[test]
fn compile_accepts_inline_document() {
    let m = compile_command()
        .try_get_matches_from(["compile", "-d", "{}"])
        .unwrap();
    let params = CompileParams::from_matches(&m);

    assert_eq!(params.document_path, None);
    assert_eq!(params.document_text.as_deref(), Some("{}"));
    assert_eq!(params.backtrack_limit, None);
    assert!(!params.compact);
}

#[test]
fn exec_takes_document_and_input() {
    let m = exec_command()
        .try_get_matches_from(["exec", "pattern.json", "aaab", "--start", "2", "-A"])
        .unwrap();
    let params = ExecParams::from_matches(&m);

    assert_eq!(params.document_path, Some(PathBuf::from("pattern.json")));
    assert_eq!(params.input.as_deref(), Some("aaab"));
    assert_eq!(params.start, 2);
    assert!(params.overrides.anchored);
}

#[test]
fn exec_shifts_positional_to_input_with_inline_document() {
    let m = exec_command()
        .try_get_matches_from(["exec", "-d", "{}", "aaab"])
        .unwrap();
    let params = ExecParams::from_matches(&m);

    assert_eq!(params.document_path, None);
    assert_eq!(params.document_text.as_deref(), Some("{}"));
    assert_eq!(params.input.as_deref(), Some("aaab"));
    assert_eq!(params.start, 0);
}

#[test]
fn exec_without_shift_keeps_both_positionals() {
    let m = exec_command()
        .try_get_matches_from(["exec", "-d", "{}", "ignored.json", "aaab"])
        .unwrap();
    let params = ExecParams::from_matches(&m);

    assert_eq!(params.document_path, Some(PathBuf::from("ignored.json")));
    assert_eq!(params.input.as_deref(), Some("aaab"));
}

#[test]
fn stage_names() {
    assert_eq!(Stage::parse("lowered"), Some(Stage::Lowered));
    assert_eq!(Stage::parse("optimised"), Some(Stage::Optimised));
    assert_eq!(Stage::parse("optimized"), None);
}
