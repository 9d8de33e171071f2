//! Generic tree rewriting over IR nodes.
//!
//! A pass implements [`Rewrite`] and overrides the handlers for the node kinds
//! it cares about. Every handler defaults to the identity transform, which
//! rebuilds the node from its rewritten children, so the trait's defaults are
//! the shared base table all passes start from.
//!
//! Handlers recurse through [`Rewrite::rewrite`] and may read or write the
//! pass context, which is created fresh for every top-level [`Rewrite::run`].

use pcrelift_core::{Lookaround, Node, Quantifier, RawRegex, Root};

use crate::error::CompileResult;

pub trait Rewrite {
    /// Pass-scoped state, created fresh per top-level call.
    type Context: Default;

    /// Pass name for logging.
    const NAME: &'static str;

    /// Rewrite a whole tree with a fresh context.
    fn run(&self, node: Node) -> CompileResult<Node> {
        let mut cx = Self::Context::default();
        self.rewrite(node, &mut cx)
    }

    /// Dispatch one node to its handler.
    fn rewrite(&self, node: Node, cx: &mut Self::Context) -> CompileResult<Node> {
        match node {
            Node::Pattern(root) => self.pattern(root, cx),
            Node::Alternation(alternatives) => self.alternation(alternatives, cx),
            Node::Alternative(components) => self.alternative(components, cx),
            Node::CapturingGroup { index, components } => {
                self.capturing_group(index, components, cx)
            }
            Node::NamedCapturingGroup {
                index,
                name,
                components,
            } => self.named_capturing_group(index, name, components, cx),
            Node::NonCapturingGroup(components) => self.non_capturing_group(components, cx),
            Node::CharacterClass {
                negated,
                components,
            } => self.character_class(negated, components, cx),
            Node::CharacterRange { from, to } => self.character_range(*from, *to, cx),
            Node::MaximisingQuantifier(q) => self.maximising_quantifier(q, cx),
            Node::MinimisingQuantifier(q) => self.minimising_quantifier(q, cx),
            Node::PossessiveQuantifier(q) => self.possessive_quantifier(q, cx),
            Node::NumberedBackreference(number) => self.numbered_backreference(number, cx),
            Node::Noop => self.noop(cx),
            Node::Lookaround(lookaround) => self.lookaround(lookaround, cx),
            Node::RawRegex(raw) => self.raw_regex(raw, cx),
        }
    }

    fn rewrite_all(&self, nodes: Vec<Node>, cx: &mut Self::Context) -> CompileResult<Vec<Node>> {
        nodes.into_iter().map(|n| self.rewrite(n, cx)).collect()
    }

    fn rewrite_quantifier(
        &self,
        q: Quantifier,
        cx: &mut Self::Context,
    ) -> CompileResult<Quantifier> {
        let Quantifier {
            min,
            max,
            component,
        } = q;
        Ok(Quantifier {
            min,
            max,
            component: Box::new(self.rewrite(*component, cx)?),
        })
    }

    fn pattern(&self, root: Root, cx: &mut Self::Context) -> CompileResult<Node> {
        Ok(Node::Pattern(Root {
            components: self.rewrite_all(root.components, cx)?,
            capturing_groups: root.capturing_groups,
        }))
    }

    fn alternation(&self, alternatives: Vec<Node>, cx: &mut Self::Context) -> CompileResult<Node> {
        Ok(Node::Alternation(self.rewrite_all(alternatives, cx)?))
    }

    fn alternative(&self, components: Vec<Node>, cx: &mut Self::Context) -> CompileResult<Node> {
        Ok(Node::Alternative(self.rewrite_all(components, cx)?))
    }

    fn capturing_group(
        &self,
        index: u32,
        components: Vec<Node>,
        cx: &mut Self::Context,
    ) -> CompileResult<Node> {
        Ok(Node::CapturingGroup {
            index,
            components: self.rewrite_all(components, cx)?,
        })
    }

    fn named_capturing_group(
        &self,
        index: u32,
        name: String,
        components: Vec<Node>,
        cx: &mut Self::Context,
    ) -> CompileResult<Node> {
        Ok(Node::NamedCapturingGroup {
            index,
            name,
            components: self.rewrite_all(components, cx)?,
        })
    }

    fn non_capturing_group(
        &self,
        components: Vec<Node>,
        cx: &mut Self::Context,
    ) -> CompileResult<Node> {
        Ok(Node::NonCapturingGroup(self.rewrite_all(components, cx)?))
    }

    fn character_class(
        &self,
        negated: bool,
        components: Vec<Node>,
        cx: &mut Self::Context,
    ) -> CompileResult<Node> {
        Ok(Node::CharacterClass {
            negated,
            components: self.rewrite_all(components, cx)?,
        })
    }

    fn character_range(
        &self,
        from: Node,
        to: Node,
        cx: &mut Self::Context,
    ) -> CompileResult<Node> {
        Ok(Node::CharacterRange {
            from: Box::new(self.rewrite(from, cx)?),
            to: Box::new(self.rewrite(to, cx)?),
        })
    }

    fn maximising_quantifier(&self, q: Quantifier, cx: &mut Self::Context) -> CompileResult<Node> {
        Ok(Node::MaximisingQuantifier(self.rewrite_quantifier(q, cx)?))
    }

    fn minimising_quantifier(&self, q: Quantifier, cx: &mut Self::Context) -> CompileResult<Node> {
        Ok(Node::MinimisingQuantifier(self.rewrite_quantifier(q, cx)?))
    }

    fn possessive_quantifier(&self, q: Quantifier, cx: &mut Self::Context) -> CompileResult<Node> {
        Ok(Node::PossessiveQuantifier(self.rewrite_quantifier(q, cx)?))
    }

    fn numbered_backreference(
        &self,
        number: u32,
        _cx: &mut Self::Context,
    ) -> CompileResult<Node> {
        Ok(Node::NumberedBackreference(number))
    }

    fn noop(&self, _cx: &mut Self::Context) -> CompileResult<Node> {
        Ok(Node::Noop)
    }

    fn lookaround(&self, lookaround: Lookaround, cx: &mut Self::Context) -> CompileResult<Node> {
        let Lookaround {
            direction,
            negated,
            components,
        } = lookaround;
        Ok(Node::Lookaround(Lookaround {
            direction,
            negated,
            components: self.rewrite_all(components, cx)?,
        }))
    }

    fn raw_regex(&self, raw: RawRegex, _cx: &mut Self::Context) -> CompileResult<Node> {
        Ok(Node::RawRegex(raw))
    }
}
