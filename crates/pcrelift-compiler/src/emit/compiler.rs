//! IR to native pattern compilation.
//!
//! Walks whatever mix of raw and structural nodes the optimizer left behind,
//! assigns pattern-wide native slots and user-facing (emulated) numbers, and
//! builds the native engine.
//!
//! Native and emulated numbering diverge as soon as a ghost capture appears:
//! ghosts take a native slot but no emulated number.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::debug;

use pcrelift_core::{GroupKey, Ir};

use crate::flatten::{CaptureContext, Flattener};
use crate::pattern::Pattern;
use crate::{Error, Result};

use super::native_flags::NativeFlags;

/// Builds [`Pattern`]s from IR envelopes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternCompiler {
    backtrack_limit: Option<usize>,
}

impl PatternCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit forwarded to the native engine's backtracking VM.
    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        self.backtrack_limit = Some(limit);
        self
    }

    pub fn compile(&self, ir: &Ir) -> Result<Pattern> {
        let mut context = PatternContext::new();
        let mut flattener = Flattener::new(&mut context);
        flattener.node(ir.tree())?;
        let source = flattener.finish()?.render();

        let flags = NativeFlags::from_flags(ir.flags());
        let mut builder = fancy_regex::RegexBuilder::new(&flags.engine_source(&source));
        if let Some(limit) = self.backtrack_limit {
            builder.backtrack_limit(limit);
        }
        let regex = builder
            .build()
            .map_err(|error| Error::Engine {
                pattern: source.clone(),
                error: Box::new(error),
            })?;

        debug!(
            pcre = ir.source(),
            native = %source,
            flags = %flags,
            native_groups = context.native_groups,
            user_groups = context.emulated_groups,
            "compiled pattern"
        );

        Ok(Pattern::new(
            regex,
            source,
            flags,
            context.capturing_group_names,
            context.native_to_emulated,
        ))
    }
}

/// Pattern-wide group accounting.
struct PatternContext {
    native_groups: u32,
    emulated_groups: u32,
    capturing_group_names: Vec<GroupKey>,
    native_to_emulated: IndexMap<u32, u32>,
    pattern_to_native: HashMap<u32, u32>,
}

impl PatternContext {
    fn new() -> Self {
        Self {
            native_groups: 0,
            emulated_groups: 0,
            capturing_group_names: vec![GroupKey::Number(0)],
            native_to_emulated: IndexMap::from([(0, 0)]),
            pattern_to_native: HashMap::new(),
        }
    }
}

impl CaptureContext for PatternContext {
    fn record_capturing_group(&mut self, index: u32, name: Option<&str>) -> u32 {
        self.native_groups += 1;
        self.emulated_groups += 1;

        if let Some(name) = name {
            self.capturing_group_names
                .push(GroupKey::Name(name.to_string()));
        }
        self.capturing_group_names
            .push(GroupKey::Number(self.emulated_groups));
        self.native_to_emulated
            .insert(self.native_groups, self.emulated_groups);
        self.pattern_to_native.insert(index, self.native_groups);
        self.native_groups
    }

    fn record_ghost_capturing_group(&mut self) -> u32 {
        self.native_groups += 1;
        self.native_groups
    }

    fn capturing_group_index(&self, index: u32) -> Option<u32> {
        self.pattern_to_native.get(&index).copied()
    }
}
