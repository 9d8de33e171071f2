//! Acceleration: collapse natively expressible subtrees into raw fragments.
//!
//! Works bottom-up. Adjacent raw fragments are concatenated, groups and
//! quantifiers whose bodies collapse become single raw fragments, and
//! possessive quantifiers are lowered to a lookahead over a ghost capture
//! followed by a backreference to it.
//!
//! Subtrees that cannot collapse are kept with their children optimised as
//! far as possible; the pattern compiler still handles them structurally.

use pcrelift_core::{
    CaptureId, Chunk, Direction, Lookaround, Node, Quantifier, RawRegex, Root,
};

use crate::error::{CompileError, CompileResult};
use crate::rewrite::Rewrite;

/// Symbolic id of the ghost capture behind possessive quantifiers.
pub const ATOMIC_CAPTURE_ID: &str = "atomic";

pub struct Accelerate;

impl Rewrite for Accelerate {
    type Context = ();

    const NAME: &'static str = "accelerate";

    fn pattern(&self, root: Root, cx: &mut ()) -> CompileResult<Node> {
        Ok(Node::Pattern(Root {
            components: concat(self.rewrite_all(root.components, cx)?),
            capturing_groups: root.capturing_groups,
        }))
    }

    fn alternation(&self, alternatives: Vec<Node>, cx: &mut ()) -> CompileResult<Node> {
        let mut kept = Vec::with_capacity(alternatives.len());
        let mut run: Option<RawRegex> = None;
        let mut all_raw = true;

        for alternative in alternatives {
            match into_fragment(self.rewrite(alternative, cx)?) {
                Ok(raw) => match run.as_mut() {
                    Some(acc) => join_alternative(acc, raw),
                    None => run = Some(raw),
                },
                Err(node) => {
                    all_raw = false;
                    kept.extend(run.take().map(Node::RawRegex));
                    kept.push(node);
                }
            }
        }

        if all_raw {
            let raw = run.unwrap_or_else(RawRegex::empty);
            let fixed_length = raw.fixed_length;
            return Ok(Node::RawRegex(RawRegex::new(
                vec![Chunk::nested(raw)],
                fixed_length,
            )));
        }

        kept.extend(run.map(Node::RawRegex));
        Ok(Node::Alternation(kept))
    }

    fn alternative(&self, components: Vec<Node>, cx: &mut ()) -> CompileResult<Node> {
        Ok(match collapse(concat(self.rewrite_all(components, cx)?)) {
            Ok(raw) => Node::RawRegex(raw),
            Err(components) => Node::Alternative(components),
        })
    }

    fn capturing_group(
        &self,
        index: u32,
        components: Vec<Node>,
        cx: &mut (),
    ) -> CompileResult<Node> {
        Ok(match collapse(concat(self.rewrite_all(components, cx)?)) {
            Ok(raw) => Node::RawRegex(raw.wrap(|chunks| Chunk::Capture {
                index,
                id: None,
                chunks,
            })),
            Err(components) => Node::CapturingGroup { index, components },
        })
    }

    fn named_capturing_group(
        &self,
        index: u32,
        name: String,
        components: Vec<Node>,
        cx: &mut (),
    ) -> CompileResult<Node> {
        Ok(match collapse(concat(self.rewrite_all(components, cx)?)) {
            Ok(raw) => Node::RawRegex(raw.wrap(|chunks| Chunk::NamedCapture {
                index,
                name,
                chunks,
            })),
            Err(components) => Node::NamedCapturingGroup {
                index,
                name,
                components,
            },
        })
    }

    fn non_capturing_group(&self, components: Vec<Node>, cx: &mut ()) -> CompileResult<Node> {
        Ok(match collapse(concat(self.rewrite_all(components, cx)?)) {
            Ok(raw) => Node::RawRegex(raw.wrap(Chunk::NonCapture)),
            Err(components) => Node::NonCapturingGroup(components),
        })
    }

    fn character_class(
        &self,
        negated: bool,
        components: Vec<Node>,
        cx: &mut (),
    ) -> CompileResult<Node> {
        let members = self.rewrite_all(components, cx)?;
        if !members.iter().all(|m| matches!(m, Node::RawRegex(_))) {
            return Ok(Node::CharacterClass {
                negated,
                components: members,
            });
        }

        let mut class = RawRegex::chars(if negated { "[^" } else { "[" }, Some(1));
        for member in members {
            if let Node::RawRegex(raw) = member {
                raw.chunks.into_iter().for_each(|chunk| class.push(chunk));
            }
        }
        class.push(Chunk::Chars("]".to_string()));
        Ok(Node::RawRegex(class))
    }

    fn character_range(&self, from: Node, to: Node, cx: &mut ()) -> CompileResult<Node> {
        let from = expect_endpoint(self.rewrite(from, cx)?)?;
        let to = expect_endpoint(self.rewrite(to, cx)?)?;

        let mut range = RawRegex::new(from.chunks, Some(1));
        range.push(Chunk::Chars("-".to_string()));
        to.chunks.into_iter().for_each(|chunk| range.push(chunk));
        Ok(Node::RawRegex(range))
    }

    fn maximising_quantifier(&self, q: Quantifier, cx: &mut ()) -> CompileResult<Node> {
        let q = self.rewrite_quantifier(q, cx)?;
        Ok(match *q.component {
            Node::RawRegex(raw) => Node::RawRegex(repeat(raw, q.min, q.max, false)),
            component => Node::MaximisingQuantifier(Quantifier::new(q.min, q.max, component)),
        })
    }

    fn minimising_quantifier(&self, q: Quantifier, cx: &mut ()) -> CompileResult<Node> {
        let q = self.rewrite_quantifier(q, cx)?;
        Ok(match *q.component {
            Node::RawRegex(raw) => Node::RawRegex(repeat(raw, q.min, q.max, true)),
            component => Node::MinimisingQuantifier(Quantifier::new(q.min, q.max, component)),
        })
    }

    /// `X*+` becomes `(?=(X*))\k<atomic>`: the lookahead matches greedily,
    /// the backreference then consumes exactly what it matched. Flattening
    /// makes the lookahead atomic so it is never retried.
    fn possessive_quantifier(&self, q: Quantifier, cx: &mut ()) -> CompileResult<Node> {
        let q = self.rewrite_quantifier(q, cx)?;
        let raw = match *q.component {
            Node::RawRegex(raw) => raw,
            component => {
                return Ok(Node::PossessiveQuantifier(Quantifier::new(
                    q.min, q.max, component,
                )));
            }
        };

        let greedy = repeat(raw, q.min, q.max, false);
        let fixed_length = greedy.fixed_length;
        let id = CaptureId::new(ATOMIC_CAPTURE_ID);
        Ok(Node::RawRegex(RawRegex::new(
            vec![
                Chunk::Lookaround {
                    direction: Direction::Ahead,
                    negated: false,
                    chunks: vec![Chunk::GhostCapture {
                        id: id.clone(),
                        chunks: vec![Chunk::nested(greedy)],
                    }],
                },
                Chunk::Backreference(id),
            ],
            fixed_length,
        )))
    }

    fn lookaround(&self, lookaround: Lookaround, cx: &mut ()) -> CompileResult<Node> {
        let Lookaround {
            direction,
            negated,
            components,
        } = lookaround;
        Ok(match collapse(concat(self.rewrite_all(components, cx)?)) {
            Ok(raw) => Node::RawRegex(RawRegex::new(
                vec![Chunk::Lookaround {
                    direction,
                    negated,
                    chunks: raw.chunks,
                }],
                Some(0),
            )),
            Err(components) => Node::Lookaround(Lookaround {
                direction,
                negated,
                components,
            }),
        })
    }
}

/// Merge runs of adjacent raw fragments, without glue.
pub fn concat(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let Node::RawRegex(raw) = node {
            if let Some(Node::RawRegex(last)) = out.last_mut() {
                last.append(raw);
                continue;
            }
            out.push(Node::RawRegex(raw));
        } else {
            out.push(node);
        }
    }
    out
}

/// The single raw fragment `nodes` reduces to, if any. No nodes at all
/// reduce to the empty fragment.
fn collapse(mut nodes: Vec<Node>) -> Result<RawRegex, Vec<Node>> {
    match nodes.len() {
        0 => Ok(RawRegex::empty()),
        1 => match nodes.pop() {
            Some(Node::RawRegex(raw)) => Ok(raw),
            other => Err(other.into_iter().collect()),
        },
        _ => Err(nodes),
    }
}

fn into_fragment(node: Node) -> Result<RawRegex, Node> {
    match node {
        Node::RawRegex(raw) => Ok(raw),
        Node::Alternative(components) if components.is_empty() => Ok(RawRegex::empty()),
        other => Err(other),
    }
}

fn join_alternative(acc: &mut RawRegex, next: RawRegex) {
    let fixed_length = match (acc.fixed_length, next.fixed_length) {
        (Some(a), Some(b)) if a == b => Some(a),
        _ => None,
    };
    acc.push(Chunk::Chars("|".to_string()));
    next.chunks.into_iter().for_each(|chunk| acc.push(chunk));
    acc.fixed_length = fixed_length;
}

fn expect_endpoint(node: Node) -> CompileResult<RawRegex> {
    match node {
        Node::RawRegex(raw) => Ok(raw),
        other => Err(CompileError::UnexpectedNode {
            kind: other.kind(),
            context: "as a character range endpoint",
        }),
    }
}

/// Append a native repeat operator, wrapping the fragment unless it is
/// already a single atom.
fn repeat(raw: RawRegex, min: u32, max: Option<u32>, lazy: bool) -> RawRegex {
    let bounds = Quantifier::new(min, max, Node::Noop);
    let fixed_length = match (bounds.exact(), raw.fixed_length) {
        (Some(count), Some(len)) => usize::try_from(count)
            .ok()
            .and_then(|count| count.checked_mul(len)),
        _ => None,
    };

    let mut out = if raw.is_atom() {
        raw
    } else {
        raw.wrap(Chunk::NonCapture)
    };
    out.push(Chunk::Chars(bounds.operator()));
    if lazy {
        out.push(Chunk::Chars("?".to_string()));
    }
    out.fixed_length = fixed_length;
    out
}
