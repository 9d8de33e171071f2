//! Native pattern emission.
//!
//! - `compiler`: final pattern-wide numbering and engine construction
//! - `native_flags`: flag string handed to the engine

mod compiler;
mod native_flags;


pub use compiler::PatternCompiler;
pub use native_flags::NativeFlags;
