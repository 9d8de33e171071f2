//! Flattening of IR and raw chunks into native source.
//!
//! Shared by raw compilation (one raw fragment, unit-local numbering) and by
//! the pattern compiler (whole tree, pattern-wide numbering). The two differ
//! only in the [`CaptureContext`] they flatten against.
//!
//! Native groups are numbered in opening order: a capture records its slot
//! before its body is flattened. Its symbolic id is bound after the body, so
//! a backreference always resolves to the nearest enclosing or preceding
//! capture with that id, never to one nested inside it.
//!
//! A positive lookaround that opens a native group is emitted inside an
//! atomic group, `(?>(?=...))`. The engine would otherwise backtrack into a
//! lookahead that already succeeded and retry it with shorter captures,
//! which PCRE never does. Possessive emulation depends on this.

use std::collections::HashMap;

use pcrelift_core::ir::lookaround_open;
use pcrelift_core::{
    CaptureId, Chunk, Direction, GroupSlot, NativeText, Node, Optimised, Quantifier, Segment,
};

use crate::error::{CompileError, CompileResult};

/// Group accounting for one flattening run.
pub trait CaptureContext {
    /// Allocate the next native slot for a user-visible group.
    fn record_capturing_group(&mut self, index: u32, name: Option<&str>) -> u32;

    /// Allocate the next native slot for an emulation-only group.
    fn record_ghost_capturing_group(&mut self) -> u32;

    /// Native slot assigned to pattern group `index`, if recorded.
    fn capturing_group_index(&self, index: u32) -> Option<u32>;
}

pub struct Flattener<'c, C> {
    context: &'c mut C,
    ids: HashMap<CaptureId, u32>,
    out: NativeText,
    /// Native groups opened so far by this flattener.
    opened: u32,
}

impl<'c, C: CaptureContext> Flattener<'c, C> {
    pub fn new(context: &'c mut C) -> Self {
        Self {
            context,
            ids: HashMap::new(),
            out: NativeText::new(),
            opened: 0,
        }
    }

    /// Resolve numbered backreferences and return the native text.
    pub fn finish(self) -> CompileResult<NativeText> {
        let mut resolved = NativeText::new();
        for segment in self.out.segments() {
            let segment = match segment {
                Segment::GroupBackref(index) => Segment::Backref(
                    self.context
                        .capturing_group_index(*index)
                        .ok_or(CompileError::UndefinedGroup(*index))?,
                ),
                other => other.clone(),
            };
            resolved.push(segment);
        }
        Ok(resolved)
    }

    pub fn node(&mut self, node: &Node) -> CompileResult<()> {
        match node {
            Node::Pattern(root) => self.nodes(&root.components),
            Node::Alternation(alternatives) => {
                for (i, alternative) in alternatives.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str("|");
                    }
                    self.node(alternative)?;
                }
                Ok(())
            }
            Node::Alternative(components) => self.nodes(components),
            Node::CapturingGroup { index, components } => {
                self.open_group(*index, None);
                self.out.push_str("(");
                self.nodes(components)?;
                self.out.push_str(")");
                Ok(())
            }
            Node::NamedCapturingGroup {
                index,
                name,
                components,
            } => {
                self.open_group(*index, Some(name));
                self.out.push_str(&format!("(?<{name}>"));
                self.nodes(components)?;
                self.out.push_str(")");
                Ok(())
            }
            Node::NonCapturingGroup(components) => {
                self.out.push_str("(?:");
                self.nodes(components)?;
                self.out.push_str(")");
                Ok(())
            }
            Node::CharacterClass {
                negated,
                components,
            } => {
                self.out.push_str(if *negated { "[^" } else { "[" });
                self.nodes(components)?;
                self.out.push_str("]");
                Ok(())
            }
            Node::CharacterRange { from, to } => {
                self.node(from)?;
                self.out.push_str("-");
                self.node(to)
            }
            Node::MaximisingQuantifier(q) => self.quantified(q),
            Node::MinimisingQuantifier(q) => {
                self.quantified(q)?;
                self.out.push_str("?");
                Ok(())
            }
            Node::PossessiveQuantifier(q) => {
                let slot = self.lookaround(Direction::Ahead, false, |f| {
                    let slot = f.open_ghost();
                    f.out.push_str("(");
                    f.quantified(q)?;
                    f.out.push_str(")");
                    Ok(slot)
                })?;
                self.out.push(Segment::Backref(slot));
                Ok(())
            }
            Node::NumberedBackreference(index) => {
                self.out.push(Segment::GroupBackref(*index));
                Ok(())
            }
            Node::Noop => Ok(()),
            Node::Lookaround(lookaround) => {
                self.lookaround(lookaround.direction, lookaround.negated, |f| {
                    f.nodes(&lookaround.components)
                })
            }
            Node::RawRegex(raw) => self.chunks(&raw.chunks),
        }
    }

    fn nodes(&mut self, nodes: &[Node]) -> CompileResult<()> {
        nodes.iter().try_for_each(|node| self.node(node))
    }

    /// Repeated component plus its greedy operator.
    fn quantified(&mut self, q: &Quantifier) -> CompileResult<()> {
        let wrap = match q.component.as_ref() {
            Node::CapturingGroup { .. }
            | Node::NamedCapturingGroup { .. }
            | Node::NonCapturingGroup(_)
            | Node::CharacterClass { .. }
            | Node::NumberedBackreference(_) => false,
            Node::RawRegex(raw) => !raw.is_atom(),
            _ => true,
        };
        if wrap {
            self.out.push_str("(?:");
            self.node(&q.component)?;
            self.out.push_str(")");
        } else {
            self.node(&q.component)?;
        }
        self.out.push_str(&q.operator());
        Ok(())
    }

    pub fn chunks(&mut self, chunks: &[Chunk]) -> CompileResult<()> {
        chunks.iter().try_for_each(|chunk| self.chunk(chunk))
    }

    fn chunk(&mut self, chunk: &Chunk) -> CompileResult<()> {
        match chunk {
            Chunk::Chars(text) => self.out.push_str(text),
            Chunk::Capture { index, id, chunks } => {
                let slot = self.open_group(*index, None);
                self.group("(", chunks)?;
                if let Some(id) = id {
                    self.ids.insert(id.clone(), slot);
                }
            }
            Chunk::GhostCapture { id, chunks } => {
                let slot = self.open_ghost();
                self.group("(", chunks)?;
                self.ids.insert(id.clone(), slot);
            }
            Chunk::NamedCapture {
                index,
                name,
                chunks,
            } => {
                self.open_group(*index, Some(name));
                self.group(&format!("(?<{name}>"), chunks)?;
            }
            Chunk::NonCapture(chunks) => self.group("(?:", chunks)?,
            Chunk::Nested(node) => match node.as_ref() {
                Node::RawRegex(raw) => self.chunks(&raw.chunks)?,
                other => return Err(CompileError::MalformedNested(other.kind())),
            },
            Chunk::Lookaround {
                direction,
                negated,
                chunks,
            } => self.lookaround(*direction, *negated, |f| f.chunks(chunks))?,
            Chunk::Backreference(id) => {
                let slot = self
                    .ids
                    .get(id)
                    .copied()
                    .ok_or_else(|| CompileError::UnresolvedBackreference(id.clone()))?;
                self.out.push(Segment::Backref(slot));
            }
            Chunk::Noop => {}
            Chunk::Optimised(optimised) => self.replay(optimised)?,
        }
        Ok(())
    }

    fn open_group(&mut self, index: u32, name: Option<&str>) -> u32 {
        self.opened += 1;
        self.context.record_capturing_group(index, name)
    }

    fn open_ghost(&mut self) -> u32 {
        self.opened += 1;
        self.context.record_ghost_capturing_group()
    }

    /// Emit a lookaround around whatever `body` writes. Positive
    /// lookarounds that open a group are made atomic.
    fn lookaround<T>(
        &mut self,
        direction: Direction,
        negated: bool,
        body: impl FnOnce(&mut Self) -> CompileResult<T>,
    ) -> CompileResult<T> {
        let outer = std::mem::take(&mut self.out);
        let opened = self.opened;
        let result = body(self);
        let inner = std::mem::replace(&mut self.out, outer);
        let value = result?;

        let atomic = !negated && self.opened > opened;
        if atomic {
            self.out.push_str("(?>");
        }
        self.out.push_str(lookaround_open(direction, negated));
        self.out.extend(inner);
        self.out.push_str(")");
        if atomic {
            self.out.push_str(")");
        }
        Ok(value)
    }

    fn group(&mut self, open: &str, chunks: &[Chunk]) -> CompileResult<()> {
        self.out.push_str(open);
        self.chunks(chunks)?;
        self.out.push_str(")");
        Ok(())
    }

    /// Re-record an already flattened fragment's groups in this context and
    /// renumber its backreferences accordingly.
    fn replay(&mut self, optimised: &Optimised) -> CompileResult<()> {
        let slots: Vec<u32> = optimised
            .groups
            .iter()
            .map(|group| match group {
                GroupSlot::Ghost => self.open_ghost(),
                GroupSlot::Numbered(index) => self.open_group(*index, None),
                GroupSlot::Named { index, name } => self.open_group(*index, Some(name)),
            })
            .collect();

        for segment in optimised.text.segments() {
            match segment {
                Segment::Backref(local) => {
                    let slot = local
                        .checked_sub(1)
                        .and_then(|i| slots.get(i as usize))
                        .copied()
                        .ok_or(CompileError::DanglingSlot(*local))?;
                    self.out.push(Segment::Backref(slot));
                }
                other => self.out.push(other.clone()),
            }
        }
        Ok(())
    }
}
