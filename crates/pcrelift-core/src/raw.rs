//! Raw fragments: IR subtrees already expressed in native syntax.
//!
//! A [`RawRegex`] is a list of [`Chunk`]s. Most chunks are plain native text,
//! but captures and backreferences stay structured until a flattening unit
//! assigns them native group numbers.

use std::fmt;

use indexmap::IndexMap;

use crate::ir::{Direction, Node, lookaround_open};

/// Pass-local key correlating a capture with a later backreference.
///
/// Only meaningful inside one flattening unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CaptureId(String);

impl CaptureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaptureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A native-syntax fragment with its statically known match length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRegex {
    pub chunks: Vec<Chunk>,
    /// Exact number of characters matched, `None` if variable or unknown.
    pub fixed_length: Option<usize>,
}

impl RawRegex {
    pub fn new(chunks: Vec<Chunk>, fixed_length: Option<usize>) -> Self {
        Self {
            chunks,
            fixed_length,
        }
    }

    /// Zero-width empty fragment.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Some(0))
    }

    /// Fragment of native text that matches exactly its own characters.
    ///
    /// The text must already be escaped for the native engine.
    pub fn literal(text: &str) -> Self {
        Self::chars(text, Some(text.chars().count()))
    }

    pub fn chars(text: impl Into<String>, fixed_length: Option<usize>) -> Self {
        Self::new(vec![Chunk::Chars(text.into())], fixed_length)
    }

    /// Single chunk wrapping `inner`'s chunks, keeping its length.
    pub fn wrap(self, wrap: impl FnOnce(Vec<Chunk>) -> Chunk) -> Self {
        Self::new(vec![wrap(self.chunks)], self.fixed_length)
    }

    /// Append `other` without glue. Lengths add; any unknown length, or a
    /// sum that overflows, poisons the result.
    pub fn append(&mut self, other: RawRegex) {
        self.fixed_length = match (self.fixed_length, other.fixed_length) {
            (Some(a), Some(b)) => a.checked_add(b),
            _ => None,
        };
        for chunk in other.chunks {
            self.push(chunk);
        }
    }

    /// Push one chunk, merging adjacent `Chars`.
    pub fn push(&mut self, chunk: Chunk) {
        if let Chunk::Chars(text) = &chunk
            && let Some(Chunk::Chars(last)) = self.chunks.last_mut()
        {
            last.push_str(text);
            return;
        }
        if matches!(&chunk, Chunk::Chars(text) if text.is_empty()) {
            return;
        }
        self.chunks.push(chunk);
    }

    /// Whether a repeat operator can follow this fragment without a wrapper.
    pub fn is_atom(&self) -> bool {
        let [chunk] = self.chunks.as_slice() else {
            return false;
        };
        match chunk {
            Chunk::Chars(text) => is_single_atom(text),
            Chunk::Capture { .. }
            | Chunk::GhostCapture { .. }
            | Chunk::NamedCapture { .. }
            | Chunk::NonCapture(_) => true,
            Chunk::Nested(node) => node.as_raw().is_some_and(RawRegex::is_atom),
            _ => false,
        }
    }
}

impl fmt::Display for RawRegex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in &self.chunks {
            write!(f, "{chunk}")?;
        }
        Ok(())
    }
}

/// One piece of a raw fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    Chars(String),
    /// User-visible capture, tagged with its pattern group index.
    Capture {
        index: u32,
        id: Option<CaptureId>,
        chunks: Vec<Chunk>,
    },
    /// Emulation-only capture; never visible in user-facing numbering.
    GhostCapture {
        id: CaptureId,
        chunks: Vec<Chunk>,
    },
    NamedCapture {
        index: u32,
        name: String,
        chunks: Vec<Chunk>,
    },
    NonCapture(Vec<Chunk>),
    /// Splices another raw fragment. The payload must be a `RawRegex` node.
    Nested(Box<Node>),
    Lookaround {
        direction: Direction,
        negated: bool,
        chunks: Vec<Chunk>,
    },
    /// Reference to a capture in the same flattening unit.
    Backreference(CaptureId),
    Noop,
    /// Output of raw compilation.
    Optimised(Optimised),
}

impl Chunk {
    pub fn nested(raw: RawRegex) -> Self {
        Chunk::Nested(Box::new(Node::RawRegex(raw)))
    }
}

fn write_chunks(f: &mut fmt::Formatter<'_>, chunks: &[Chunk]) -> fmt::Result {
    for chunk in chunks {
        write!(f, "{chunk}")?;
    }
    Ok(())
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chunk::Chars(text) => f.write_str(text),
            Chunk::Capture { chunks, .. } | Chunk::GhostCapture { chunks, .. } => {
                f.write_str("(")?;
                write_chunks(f, chunks)?;
                f.write_str(")")
            }
            Chunk::NamedCapture { name, chunks, .. } => {
                write!(f, "(?<{name}>")?;
                write_chunks(f, chunks)?;
                f.write_str(")")
            }
            Chunk::NonCapture(chunks) => {
                f.write_str("(?:")?;
                write_chunks(f, chunks)?;
                f.write_str(")")
            }
            Chunk::Nested(node) => match node.as_raw() {
                Some(raw) => write!(f, "{raw}"),
                None => write!(f, "<{}>", node.kind()),
            },
            Chunk::Lookaround {
                direction,
                negated,
                chunks,
            } => {
                f.write_str(lookaround_open(*direction, *negated))?;
                write_chunks(f, chunks)?;
                f.write_str(")")
            }
            Chunk::Backreference(id) => write!(f, r"\k<{id}>"),
            Chunk::Noop => Ok(()),
            Chunk::Optimised(optimised) => write!(f, "{}", optimised.text),
        }
    }
}

/// A flattened raw fragment.
///
/// Backreferences stay symbolic (by unit-local native slot) so the fragment
/// can be replayed into an enclosing numbering without reparsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Optimised {
    pub text: NativeText,
    /// Native groups opened by this fragment, in slot order (slot 1 first).
    pub groups: Vec<GroupSlot>,
    /// Pattern group index to unit-local slot.
    pub group_map: IndexMap<u32, u32>,
}

/// What a native capturing group stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupSlot {
    Ghost,
    Numbered(u32),
    Named { index: u32, name: String },
}

impl GroupSlot {
    /// Pattern group index, `None` for ghosts.
    pub fn index(&self) -> Option<u32> {
        match self {
            GroupSlot::Ghost => None,
            GroupSlot::Numbered(index) | GroupSlot::Named { index, .. } => Some(*index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// Backreference to a native slot.
    Backref(u32),
    /// Backreference to a user group by pattern index, resolved once the
    /// whole pattern is numbered.
    GroupBackref(u32),
}

/// Native source under construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NativeText {
    segments: Vec<Segment>,
}

impl NativeText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Segment::Text(last)) = self.segments.last_mut() {
            last.push_str(text);
        } else {
            self.segments.push(Segment::Text(text.to_string()));
        }
    }

    pub fn push(&mut self, segment: Segment) {
        match segment {
            Segment::Text(text) => self.push_str(&text),
            other => self.segments.push(other),
        }
    }

    /// Append every segment of `other`, merging adjacent text.
    pub fn extend(&mut self, other: NativeText) {
        for segment in other.segments {
            self.push(segment);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render to a native pattern string.
    ///
    /// A backreference directly followed by a digit is wrapped in `(?:...)`
    /// so the digit is not read as part of the group number.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Backref(n) | Segment::GroupBackref(n) => {
                    let digit_follows = matches!(
                        self.segments.get(i + 1),
                        Some(Segment::Text(next)) if next.starts_with(|c: char| c.is_ascii_digit())
                    );
                    if digit_follows {
                        out.push_str(&format!(r"(?:\{n})"));
                    } else {
                        out.push_str(&format!(r"\{n}"));
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for NativeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Whether `text` is exactly one native atom: a single character, a single
/// escape, or a single bracket class.
fn is_single_atom(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(c), None, _) => !matches!(c, '|' | '(' | ')' | '^' | '$'),
        (Some('\\'), Some(c), None) => !c.is_ascii_digit(),
        (Some('['), _, _) => class_end(text) == Some(text.len() - 1),
        _ => false,
    }
}

/// Byte offset of the `]` closing the class opened at offset 0.
fn class_end(text: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in text.char_indices().skip(1) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '^' if i == 1 => {}
            ']' => return Some(i),
            _ => {}
        }
    }
    None
}
