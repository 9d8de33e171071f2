//! pcrelift compiler: PCRE AST to native fancy-regex patterns.
//!
//! Pipeline:
//! - `lower` - AST to IR, group numbering and escaping
//! - `optimize` - rewrite passes (acceleration, raw compilation)
//! - `emit` - pattern-wide numbering and engine construction
//! - `pattern` - the compiled artifact and its matcher
//! - `compiler` - facade tying the stages together
//!
//! Supporting modules: `rewrite` (generic tree rewriting), `flatten`
//! (native text assembly), `dump` (IR printer), `error`.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod compiler;
pub mod dump;
pub mod emit;
pub mod error;
pub mod flatten;
pub mod lower;
pub mod optimize;
pub mod pattern;
pub mod rewrite;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod pattern_tests;
#[cfg(test)]
mod rewrite_tests;
#[cfg(test)]
pub mod test_utils;

pub use compiler::{Compiler, CompilerBuilder};
pub use dump::dump;
pub use emit::{NativeFlags, PatternCompiler};
pub use error::{CompileError, CompileResult};
pub use lower::lower;
pub use optimize::{Optimizer, Pass};
pub use pattern::{MatchResult, Pattern};
pub use rewrite::Rewrite;

/// Errors surfaced by [`Compiler`] and [`Pattern`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The native engine rejected the emitted pattern.
    #[error("native engine rejected `{pattern}`")]
    Engine {
        pattern: String,
        #[source]
        error: Box<fancy_regex::Error>,
    },

    /// The native engine failed while matching, e.g. backtrack limit hit.
    #[error("native engine failed while matching")]
    Runtime(#[source] Box<fancy_regex::Error>),
}

pub type Result<T> = std::result::Result<T, Error>;
