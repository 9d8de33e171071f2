//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` so commands compose the same
//! definitions.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Pattern document: `{source?, flags?, ast}` JSON, or `-` for stdin.
pub fn document_path_arg() -> Arg {
    Arg::new("document_path")
        .value_name("DOCUMENT")
        .value_parser(value_parser!(PathBuf))
        .help("Pattern document (JSON), or - for stdin")
}

/// Inline pattern document (-d/--document).
pub fn document_text_arg() -> Arg {
    Arg::new("document_text")
        .short('d')
        .long("document")
        .value_name("JSON")
        .help("Inline pattern document")
}

/// Subject text for exec (positional).
pub fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("INPUT")
        .help("Subject text to search")
}

/// Byte offset to search from (--start).
pub fn start_arg() -> Arg {
    Arg::new("start")
        .long("start")
        .value_name("OFFSET")
        .default_value("0")
        .value_parser(value_parser!(usize))
        .help("Byte offset to start searching at")
}

/// Pipeline stage to dump (--stage).
pub fn stage_arg() -> Arg {
    Arg::new("stage")
        .long("stage")
        .value_name("STAGE")
        .default_value("optimised")
        .value_parser(["lowered", "accelerated", "optimised"])
        .help("IR stage to print")
}

/// Backtracking limit for the native engine (--backtrack-limit).
pub fn backtrack_limit_arg() -> Arg {
    Arg::new("backtrack_limit")
        .long("backtrack-limit")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Backtracking limit for the native engine")
}

/// Case-insensitive matching (-i/--caseless).
pub fn caseless_arg() -> Arg {
    Arg::new("caseless")
        .short('i')
        .long("caseless")
        .action(ArgAction::SetTrue)
        .help("Case-insensitive matching")
}

/// Dot matches newlines (-s/--dot-all).
pub fn dot_all_arg() -> Arg {
    Arg::new("dot_all")
        .short('s')
        .long("dot-all")
        .action(ArgAction::SetTrue)
        .help("Dot also matches newlines")
}

/// Only match at the start offset (-A/--anchored).
pub fn anchored_arg() -> Arg {
    Arg::new("anchored")
        .short('A')
        .long("anchored")
        .action(ArgAction::SetTrue)
        .help("Only match at the start offset")
}

/// Anchors match at string boundaries only (--no-multiline).
pub fn no_multiline_arg() -> Arg {
    Arg::new("no_multiline")
        .long("no-multiline")
        .action(ArgAction::SetTrue)
        .help("^ and $ match only at string boundaries")
}

/// Skip the optimizer (--no-optimise).
pub fn no_optimise_arg() -> Arg {
    Arg::new("no_optimise")
        .long("no-optimise")
        .action(ArgAction::SetTrue)
        .help("Skip every optimizer pass")
}

/// Single-line JSON output (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON")
}
