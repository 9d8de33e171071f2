//! Ordered pass pipeline over IR envelopes.

use std::fmt;

use tracing::debug;

use pcrelift_core::{Ir, Node};

use crate::error::CompileResult;
use crate::rewrite::Rewrite;

use super::accelerate::Accelerate;
use super::raw_compile::CompileRaw;

/// One step of the pipeline.
pub trait Pass {
    fn name(&self) -> &'static str;
    fn apply(&self, tree: Node) -> CompileResult<Node>;
}

impl<R: Rewrite> Pass for R {
    fn name(&self) -> &'static str {
        R::NAME
    }

    fn apply(&self, tree: Node) -> CompileResult<Node> {
        self.run(tree)
    }
}

/// Runs its passes in order. Makes no assumption about which passes it
/// holds, so partial pipelines work the same way as the default one.
pub struct Optimizer {
    passes: Vec<Box<dyn Pass>>,
}

impl Optimizer {
    pub fn new(passes: Vec<Box<dyn Pass>>) -> Self {
        Self { passes }
    }

    /// Pipeline that leaves the IR untouched.
    pub fn none() -> Self {
        Self::new(Vec::new())
    }

    pub fn pass_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.passes.iter().map(|pass| pass.name())
    }

    /// Run every pass, unless the pattern was parsed with optimisation off.
    pub fn optimise(&self, ir: Ir) -> CompileResult<Ir> {
        if !ir.flags().optimise {
            debug!(source = ir.source(), "optimisation disabled by flags");
            return Ok(ir);
        }

        self.passes.iter().try_fold(ir, |ir, pass| {
            debug!(pass = pass.name(), source = ir.source(), "running optimizer pass");
            ir.try_map(|tree| pass.apply(tree))
        })
    }
}

impl Default for Optimizer {
    /// Acceleration followed by raw compilation.
    fn default() -> Self {
        Self::new(vec![Box::new(Accelerate), Box::new(CompileRaw)])
    }
}

impl fmt::Debug for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.pass_names()).finish()
    }
}
