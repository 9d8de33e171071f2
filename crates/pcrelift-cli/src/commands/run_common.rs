//! Loading and compiling shared by the commands.

use std::path::Path;

use pcrelift_compiler::{Compiler, Pattern, lower};
use pcrelift_core::{GroupKey, Ir};

use super::document::{FlagOverrides, load_document};

/// Load the document and lower it, or exit with a message.
pub fn load_ir(path: Option<&Path>, text: Option<&str>, overrides: FlagOverrides) -> Ir {
    let document = load_document(path, text).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });
    let flags = overrides.apply(document.flags);
    lower(&document.ast, &document.source, flags)
}

pub fn compile_or_exit(ir: Ir, backtrack_limit: Option<usize>) -> Pattern {
    let mut builder = Compiler::builder();
    if let Some(limit) = backtrack_limit {
        builder = builder.backtrack_limit(limit);
    }
    builder.build().compile_ir(ir).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    })
}

/// Numbers as JSON numbers, names as JSON strings.
pub fn group_key_json(key: &GroupKey) -> serde_json::Value {
    match key {
        GroupKey::Number(n) => serde_json::json!(n),
        GroupKey::Name(name) => serde_json::json!(name),
    }
}

pub fn print_json(value: &serde_json::Value, compact: bool) {
    let output = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    match output {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
