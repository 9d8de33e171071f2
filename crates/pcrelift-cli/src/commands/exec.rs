use std::path::PathBuf;

use pcrelift_compiler::{MatchResult, Pattern};
use pcrelift_core::GroupKey;

use super::document::FlagOverrides;
use super::run_common::{compile_or_exit, load_ir, print_json};

pub struct ExecArgs {
    pub document_path: Option<PathBuf>,
    pub document_text: Option<String>,
    pub input: String,
    pub start: usize,
    pub backtrack_limit: Option<usize>,
    pub compact: bool,
    pub overrides: FlagOverrides,
}

pub fn run(args: ExecArgs) {
    let ir = load_ir(
        args.document_path.as_deref(),
        args.document_text.as_deref(),
        args.overrides,
    );
    let pattern = compile_or_exit(ir, args.backtrack_limit);

    match pattern.exec(&args.input, args.start) {
        Ok(found) => print_json(&match_json(&pattern, found.as_ref()), args.compact),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// `null` when nothing matched, else whole range, groups by number and
/// named groups by name. Unset groups are `null`.
pub fn match_json(pattern: &Pattern, found: Option<&MatchResult<'_>>) -> serde_json::Value {
    let Some(found) = found else {
        return serde_json::Value::Null;
    };
    let span = |range: Option<std::ops::Range<usize>>| {
        range.map_or(serde_json::Value::Null, |r| serde_json::json!([r.start, r.end]))
    };

    let groups: Vec<_> = (0..found.len() as u32).map(|n| span(found.get(n))).collect();
    let names: serde_json::Map<_, _> = pattern
        .capturing_group_names()
        .iter()
        .filter_map(|key| match key {
            GroupKey::Name(name) => Some((name.clone(), span(found.name(name)))),
            GroupKey::Number(_) => None,
        })
        .collect();

    serde_json::json!({
        "range": span(Some(found.range())),
        "groups": groups,
        "names": names,
    })
}
