//! IR optimizer: passes and the pipeline that runs them.
//!
//! - `accelerate`: collapse native-expressible subtrees into raw fragments
//! - `raw_compile`: flatten raw fragments with unit-local group numbering
//! - `optimizer`: ordered pass pipeline

pub mod accelerate;
mod optimizer;
pub mod raw_compile;

#[cfg(test)]
mod raw_compile_tests;

pub use accelerate::{ATOMIC_CAPTURE_ID, Accelerate};
pub use optimizer::{Optimizer, Pass};
pub use raw_compile::{CompileRaw, compile_unit};
