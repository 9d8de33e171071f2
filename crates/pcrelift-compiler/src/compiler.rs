//! Facade over lowering, optimisation and native compilation.

use tracing::debug;

use pcrelift_core::{Ast, Flags, Ir};

use crate::Result;
use crate::emit::PatternCompiler;
use crate::lower::lower;
use crate::optimize::Optimizer;
use crate::pattern::Pattern;

/// Compiles parsed PCRE patterns into native [`Pattern`]s.
#[derive(Debug, Default)]
pub struct Compiler {
    optimizer: Optimizer,
    patterns: PatternCompiler,
}

/// Builder for [`Compiler`].
#[derive(Debug, Default)]
pub struct CompilerBuilder {
    optimizer: Option<Optimizer>,
    backtrack_limit: Option<usize>,
}

impl CompilerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default pass pipeline.
    pub fn optimizer(mut self, optimizer: Optimizer) -> Self {
        self.optimizer = Some(optimizer);
        self
    }

    /// Backtracking limit for every pattern this compiler builds.
    pub fn backtrack_limit(mut self, limit: usize) -> Self {
        self.backtrack_limit = Some(limit);
        self
    }

    pub fn build(self) -> Compiler {
        let mut patterns = PatternCompiler::new();
        if let Some(limit) = self.backtrack_limit {
            patterns = patterns.backtrack_limit(limit);
        }
        Compiler {
            optimizer: self.optimizer.unwrap_or_default(),
            patterns,
        }
    }
}

impl Compiler {
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    pub fn optimizer(&self) -> &Optimizer {
        &self.optimizer
    }

    /// Lower, optimise and compile one parsed pattern.
    pub fn compile(&self, ast: &Ast, source: &str, flags: Flags) -> Result<Pattern> {
        self.compile_ir(lower(ast, source, flags))
    }

    /// Optimise and compile an already lowered pattern.
    pub fn compile_ir(&self, ir: Ir) -> Result<Pattern> {
        debug!(source = ir.source(), optimise = ir.flags().optimise, "compiling");
        let ir = self.optimizer.optimise(ir)?;
        self.patterns.compile(&ir)
    }
}
