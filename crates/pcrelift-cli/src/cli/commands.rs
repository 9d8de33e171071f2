//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Document input plus the flag overrides every command accepts.
fn with_pattern_args(cmd: Command) -> Command {
    cmd.arg(document_path_arg())
        .arg(document_text_arg())
        .arg(caseless_arg())
        .arg(dot_all_arg())
        .arg(anchored_arg())
        .arg(no_multiline_arg())
        .arg(no_optimise_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("pcrelift")
        .about("Compile parsed PCRE patterns to native fancy-regex patterns")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(dump_command())
        .subcommand(compile_command())
        .subcommand(exec_command())
}

/// Print the IR of a pattern at one pipeline stage.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show the IR of a pattern")
        .override_usage(
            "\
  pcrelift dump <DOCUMENT> [--stage <STAGE>]
  pcrelift dump -d <JSON>",
        )
        .after_help(
            r#"EXAMPLES:
  pcrelift dump pattern.json                    # fully optimised IR
  pcrelift dump pattern.json --stage lowered    # straight from the AST
  cat pattern.json | pcrelift dump -            # from stdin"#,
        )
        .arg(stage_arg());

    with_pattern_args(cmd)
}

/// Compile a pattern and print the native source and group tables.
pub fn compile_command() -> Command {
    let cmd = Command::new("compile")
        .about("Compile a pattern and show the native source")
        .override_usage(
            "\
  pcrelift compile <DOCUMENT>
  pcrelift compile -d <JSON>",
        )
        .arg(backtrack_limit_arg())
        .arg(compact_arg());

    with_pattern_args(cmd)
}

/// Run one search and print the match as JSON.
pub fn exec_command() -> Command {
    let cmd = Command::new("exec")
        .about("Search a subject with a compiled pattern and output JSON")
        .override_usage(
            "\
  pcrelift exec <DOCUMENT> <INPUT> [--start <OFFSET>]
  pcrelift exec -d <JSON> <INPUT>",
        )
        .after_help(
            r#"EXAMPLES:
  pcrelift exec pattern.json 'aaab'             # search from the start
  pcrelift exec pattern.json 'xaab' --start 1   # search from byte 1"#,
        );

    with_pattern_args(cmd)
        .arg(input_arg())
        .arg(start_arg())
        .arg(backtrack_limit_arg())
        .arg(compact_arg())
}
