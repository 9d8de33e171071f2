//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields
//! - `Into<*Args>` impls bridge dispatch to command handlers
//! - Positional shifting for exec (`-d` shifts the first positional to input)

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::compile::CompileArgs;
use crate::commands::document::FlagOverrides;
use crate::commands::dump::{DumpArgs, Stage};
use crate::commands::exec::ExecArgs;

pub struct DumpParams {
    pub document_path: Option<PathBuf>,
    pub document_text: Option<String>,
    pub stage: Stage,
    pub overrides: FlagOverrides,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            document_path: m.get_one::<PathBuf>("document_path").cloned(),
            document_text: m.get_one::<String>("document_text").cloned(),
            stage: m
                .get_one::<String>("stage")
                .and_then(|s| Stage::parse(s))
                .unwrap_or(Stage::Optimised),
            overrides: parse_overrides(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            document_path: p.document_path,
            document_text: p.document_text,
            stage: p.stage,
            overrides: p.overrides,
        }
    }
}

pub struct CompileParams {
    pub document_path: Option<PathBuf>,
    pub document_text: Option<String>,
    pub backtrack_limit: Option<usize>,
    pub compact: bool,
    pub overrides: FlagOverrides,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            document_path: m.get_one::<PathBuf>("document_path").cloned(),
            document_text: m.get_one::<String>("document_text").cloned(),
            backtrack_limit: m.get_one::<usize>("backtrack_limit").copied(),
            compact: m.get_flag("compact"),
            overrides: parse_overrides(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            document_path: p.document_path,
            document_text: p.document_text,
            backtrack_limit: p.backtrack_limit,
            compact: p.compact,
            overrides: p.overrides,
        }
    }
}

pub struct ExecParams {
    pub document_path: Option<PathBuf>,
    pub document_text: Option<String>,
    pub input: Option<String>,
    pub start: usize,
    pub backtrack_limit: Option<usize>,
    pub compact: bool,
    pub overrides: FlagOverrides,
}

impl ExecParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let document_path = m.get_one::<PathBuf>("document_path").cloned();
        let document_text = m.get_one::<String>("document_text").cloned();
        let input = m.get_one::<String>("input").cloned();

        // With -d, a single positional is the input, not a document path.
        let (document_path, input) =
            shift_positional_to_input(document_text.is_some(), document_path, input);

        Self {
            document_path,
            document_text,
            input,
            start: m.get_one::<usize>("start").copied().unwrap_or(0),
            backtrack_limit: m.get_one::<usize>("backtrack_limit").copied(),
            compact: m.get_flag("compact"),
            overrides: parse_overrides(m),
        }
    }
}

impl From<ExecParams> for ExecArgs {
    fn from(p: ExecParams) -> Self {
        Self {
            document_path: p.document_path,
            document_text: p.document_text,
            input: p.input.unwrap_or_else(|| {
                eprintln!("error: input is required");
                std::process::exit(1);
            }),
            start: p.start,
            backtrack_limit: p.backtrack_limit,
            compact: p.compact,
            overrides: p.overrides,
        }
    }
}

fn parse_overrides(m: &ArgMatches) -> FlagOverrides {
    FlagOverrides {
        caseless: m.get_flag("caseless"),
        dot_all: m.get_flag("dot_all"),
        anchored: m.get_flag("anchored"),
        no_multiline: m.get_flag("no_multiline"),
        no_optimise: m.get_flag("no_optimise"),
    }
}

fn shift_positional_to_input(
    has_document_text: bool,
    document_path: Option<PathBuf>,
    input: Option<String>,
) -> (Option<PathBuf>, Option<String>) {
    match (has_document_text, document_path, input) {
        (true, Some(path), None) => (None, Some(path.to_string_lossy().into_owned())),
        (_, document_path, input) => (document_path, input),
    }
}
