//! Structural faults raised while optimising or compiling IR.
//!
//! Every variant means the pipeline or the IR handed to it is broken, not
//! that the user's pattern is malformed (the parser rejects those earlier).

use pcrelift_core::{CaptureId, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    /// A node kind reached a handler that cannot accept it in that position.
    #[error("unexpected {kind} node {context}")]
    UnexpectedNode {
        kind: NodeKind,
        context: &'static str,
    },

    /// A nested raw chunk wraps something other than a `RAW_REGEX`.
    #[error("nested raw chunk must wrap RAW_REGEX, found {0}")]
    MalformedNested(NodeKind),

    /// A symbolic backreference has no preceding capture in its unit.
    #[error("backreference to unknown capture id `{0}`")]
    UnresolvedBackreference(CaptureId),

    /// An optimised fragment references a native slot it never opened.
    #[error("optimised fragment references undefined native slot {0}")]
    DanglingSlot(u32),

    /// A numbered backreference names a group the pattern does not define.
    #[error("backreference to undefined group {0}")]
    UndefinedGroup(u32),
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
