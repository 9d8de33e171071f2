//! AST to IR lowering.
//!
//! One rule per AST kind and no optimisation. Literal leaves become
//! single-chunk raw fragments, everything structural keeps its shape.
//! Capturing groups are numbered left to right by opening position.

use pcrelift_core::{Ast, Flags, GroupKey, Ir, Lookaround, Node, Quantifier, RawRegex, Root};

/// Lower a parsed pattern into a fresh IR envelope.
pub fn lower(ast: &Ast, source: &str, flags: Flags) -> Ir {
    let mut lowering = Lowering::default();
    let components = match ast {
        Ast::Pattern { components } => lowering.all(components, false),
        other => vec![lowering.node(other, false)],
    };
    let tree = Node::Pattern(Root {
        components,
        capturing_groups: lowering.capturing_groups(),
    });
    Ir::new(tree, source, flags)
}

#[derive(Default)]
struct Lowering {
    groups: Vec<Option<String>>,
}

impl Lowering {
    fn capturing_groups(self) -> Vec<GroupKey> {
        let mut keys = vec![GroupKey::Number(0)];
        for (i, name) in self.groups.into_iter().enumerate() {
            keys.extend(name.map(GroupKey::Name));
            keys.push(GroupKey::Number(i as u32 + 1));
        }
        keys
    }

    fn open_group(&mut self, name: Option<&str>) -> u32 {
        self.groups.push(name.map(str::to_string));
        self.groups.len() as u32
    }

    fn all(&mut self, asts: &[Ast], in_class: bool) -> Vec<Node> {
        asts.iter().map(|ast| self.node(ast, in_class)).collect()
    }

    fn node(&mut self, ast: &Ast, in_class: bool) -> Node {
        match ast {
            // A nested PATTERN cannot come from the parser; treat it as a group.
            Ast::Pattern { components } | Ast::NonCapturingGroup { components } => {
                Node::NonCapturingGroup(self.all(components, false))
            }
            Ast::Alternation { alternatives } => {
                Node::Alternation(self.all(alternatives, false))
            }
            Ast::Alternative { components } => Node::Alternative(self.all(components, false)),
            Ast::CapturingGroup { components } => {
                let index = self.open_group(None);
                Node::CapturingGroup {
                    index,
                    components: self.all(components, false),
                }
            }
            Ast::NamedCapturingGroup {
                group_name,
                components,
            } => {
                let index = self.open_group(Some(group_name));
                Node::NamedCapturingGroup {
                    index,
                    name: group_name.clone(),
                    components: self.all(components, false),
                }
            }
            Ast::Character { value } => char_fragment(*value, in_class),
            Ast::CharacterClass {
                negated,
                components,
            } => Node::CharacterClass {
                negated: *negated,
                components: self.all(components, true),
            },
            Ast::CharacterRange { from, to } => Node::CharacterRange {
                from: Box::new(char_fragment(*from, true)),
                to: Box::new(char_fragment(*to, true)),
            },
            Ast::GenericCharacterType { kind } => {
                Node::RawRegex(RawRegex::chars(kind.escape(), Some(1)))
            }
            Ast::Dot => Node::RawRegex(RawRegex::chars(".", Some(1))),
            Ast::Anchor { kind } => Node::RawRegex(RawRegex::chars(kind.native(), Some(0))),
            Ast::MaximisingQuantifier {
                min,
                max,
                component,
            } => Node::MaximisingQuantifier(self.quantifier(*min, *max, component)),
            Ast::MinimisingQuantifier {
                min,
                max,
                component,
            } => Node::MinimisingQuantifier(self.quantifier(*min, *max, component)),
            Ast::PossessiveQuantifier {
                min,
                max,
                component,
            } => Node::PossessiveQuantifier(self.quantifier(*min, *max, component)),
            Ast::NumberedBackreference { number } => Node::NumberedBackreference(*number),
            Ast::Lookaround {
                direction,
                negated,
                components,
            } => Node::Lookaround(Lookaround {
                direction: *direction,
                negated: *negated,
                components: self.all(components, false),
            }),
            Ast::Comment => Node::Noop,
        }
    }

    fn quantifier(&mut self, min: u32, max: Option<u32>, component: &Ast) -> Quantifier {
        Quantifier::new(min, max, self.node(component, false))
    }
}

fn char_fragment(c: char, in_class: bool) -> Node {
    Node::RawRegex(RawRegex::chars(escape_char(c, in_class), Some(1)))
}

/// Native spelling of a literal character.
pub fn escape_char(c: char, in_class: bool) -> String {
    let special = if in_class {
        matches!(c, '\\' | ']' | '[' | '^' | '-' | '&' | '~')
    } else {
        matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        )
    };
    if special { format!("\\{c}") } else { c.to_string() }
}
