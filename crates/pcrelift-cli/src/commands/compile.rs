use std::path::PathBuf;

use pcrelift_compiler::Pattern;

use super::document::FlagOverrides;
use super::run_common::{compile_or_exit, group_key_json, load_ir, print_json};

pub struct CompileArgs {
    pub document_path: Option<PathBuf>,
    pub document_text: Option<String>,
    pub backtrack_limit: Option<usize>,
    pub compact: bool,
    pub overrides: FlagOverrides,
}

pub fn run(args: CompileArgs) {
    let ir = load_ir(
        args.document_path.as_deref(),
        args.document_text.as_deref(),
        args.overrides,
    );
    let pattern = compile_or_exit(ir, args.backtrack_limit);
    print_json(&pattern_json(&pattern), args.compact);
}

pub fn pattern_json(pattern: &Pattern) -> serde_json::Value {
    let groups: Vec<_> = pattern
        .capturing_group_names()
        .iter()
        .map(group_key_json)
        .collect();
    let native_to_emulated: Vec<_> = pattern
        .native_to_emulated()
        .iter()
        .map(|(native, emulated)| [native, emulated])
        .collect();

    serde_json::json!({
        "source": pattern.source(),
        "flags": pattern.flags().to_string(),
        "capturingGroupNames": groups,
        "nativeToEmulated": native_to_emulated,
    })
}
