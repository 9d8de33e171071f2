#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for pcrelift.
//!
//! - `flags`: pattern-wide flags fixed at parse time
//! - `ast`: the shape handed over by the PCRE parser
//! - `ir`: the tagged tree the optimizer and compiler work on
//! - `raw`: already-native fragments embedded in the IR

pub mod ast;
pub mod flags;
pub mod ir;
pub mod raw;


pub use ast::{AnchorKind, Ast, GenericType};
pub use flags::Flags;
pub use ir::{Direction, GroupKey, Ir, Lookaround, Node, NodeKind, Quantifier, Root};
pub use raw::{CaptureId, Chunk, GroupSlot, NativeText, Optimised, RawRegex, Segment};
