//! Intermediate representation between the PCRE AST and native syntax.
//!
//! The IR is a plain owned tree: composite nodes own their children, nothing
//! is shared and nothing is mutated in place. Every pass consumes a tree and
//! returns a new one.

use std::fmt;
use std::sync::Arc;

use crate::flags::Flags;
use crate::raw::RawRegex;

/// One IR node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Pattern(Root),
    Alternation(Vec<Node>),
    Alternative(Vec<Node>),
    CapturingGroup {
        index: u32,
        components: Vec<Node>,
    },
    NamedCapturingGroup {
        index: u32,
        name: String,
        components: Vec<Node>,
    },
    NonCapturingGroup(Vec<Node>),
    CharacterClass {
        negated: bool,
        components: Vec<Node>,
    },
    /// Both endpoints are single-character raw fragments.
    CharacterRange {
        from: Box<Node>,
        to: Box<Node>,
    },
    MaximisingQuantifier(Quantifier),
    MinimisingQuantifier(Quantifier),
    PossessiveQuantifier(Quantifier),
    NumberedBackreference(u32),
    Noop,
    Lookaround(Lookaround),
    RawRegex(RawRegex),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Pattern(_) => NodeKind::Pattern,
            Node::Alternation(_) => NodeKind::Alternation,
            Node::Alternative(_) => NodeKind::Alternative,
            Node::CapturingGroup { .. } => NodeKind::CapturingGroup,
            Node::NamedCapturingGroup { .. } => NodeKind::NamedCapturingGroup,
            Node::NonCapturingGroup(_) => NodeKind::NonCapturingGroup,
            Node::CharacterClass { .. } => NodeKind::CharacterClass,
            Node::CharacterRange { .. } => NodeKind::CharacterRange,
            Node::MaximisingQuantifier(_) => NodeKind::MaximisingQuantifier,
            Node::MinimisingQuantifier(_) => NodeKind::MinimisingQuantifier,
            Node::PossessiveQuantifier(_) => NodeKind::PossessiveQuantifier,
            Node::NumberedBackreference(_) => NodeKind::NumberedBackreference,
            Node::Noop => NodeKind::Noop,
            Node::Lookaround(_) => NodeKind::Lookaround,
            Node::RawRegex(_) => NodeKind::RawRegex,
        }
    }

    /// Shorthand for a literal raw fragment.
    pub fn raw(text: &str) -> Node {
        Node::RawRegex(RawRegex::literal(text))
    }

    pub fn as_raw(&self) -> Option<&RawRegex> {
        match self {
            Node::RawRegex(raw) => Some(raw),
            _ => None,
        }
    }
}

/// Discriminant of [`Node`], used in diagnostics and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Pattern,
    Alternation,
    Alternative,
    CapturingGroup,
    NamedCapturingGroup,
    NonCapturingGroup,
    CharacterClass,
    CharacterRange,
    MaximisingQuantifier,
    MinimisingQuantifier,
    PossessiveQuantifier,
    NumberedBackreference,
    Noop,
    Lookaround,
    RawRegex,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Pattern => "PATTERN",
            NodeKind::Alternation => "ALTERNATION",
            NodeKind::Alternative => "ALTERNATIVE",
            NodeKind::CapturingGroup => "CAPTURING_GROUP",
            NodeKind::NamedCapturingGroup => "NAMED_CAPTURING_GROUP",
            NodeKind::NonCapturingGroup => "NON_CAPTURING_GROUP",
            NodeKind::CharacterClass => "CHARACTER_CLASS",
            NodeKind::CharacterRange => "CHARACTER_RANGE",
            NodeKind::MaximisingQuantifier => "MAXIMISING_QUANTIFIER",
            NodeKind::MinimisingQuantifier => "MINIMISING_QUANTIFIER",
            NodeKind::PossessiveQuantifier => "POSSESSIVE_QUANTIFIER",
            NodeKind::NumberedBackreference => "NUMBERED_BACKREFERENCE",
            NodeKind::Noop => "NOOP",
            NodeKind::Lookaround => "LOOKAROUND",
            NodeKind::RawRegex => "RAW_REGEX",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root of an IR tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    pub components: Vec<Node>,
    /// User-visible group catalogue: `0`, then per group its number, or its
    /// name followed by its number. Never touched by optimisation.
    pub capturing_groups: Vec<GroupKey>,
}

/// Repetition bounds plus the repeated component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantifier {
    pub min: u32,
    /// `None` means unbounded.
    pub max: Option<u32>,
    pub component: Box<Node>,
}

impl Quantifier {
    pub fn new(min: u32, max: Option<u32>, component: Node) -> Self {
        Self {
            min,
            max,
            component: Box::new(component),
        }
    }

    /// Exact repetition count, if `min == max`.
    pub fn exact(&self) -> Option<u32> {
        (self.max == Some(self.min)).then_some(self.min)
    }

    /// Native repeat operator for these bounds (without the lazy suffix).
    pub fn operator(&self) -> String {
        match (self.min, self.max) {
            (0, None) => "*".to_string(),
            (1, None) => "+".to_string(),
            (0, Some(1)) => "?".to_string(),
            (min, None) => format!("{{{min},}}"),
            (min, Some(max)) if min == max => format!("{{{min}}}"),
            (min, Some(max)) => format!("{{{min},{max}}}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Ahead,
    Behind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookaround {
    pub direction: Direction,
    pub negated: bool,
    pub components: Vec<Node>,
}

/// Native opening syntax for a lookaround, e.g. `(?=` or `(?<!`.
pub fn lookaround_open(direction: Direction, negated: bool) -> &'static str {
    match (direction, negated) {
        (Direction::Ahead, false) => "(?=",
        (Direction::Ahead, true) => "(?!",
        (Direction::Behind, false) => "(?<=",
        (Direction::Behind, true) => "(?<!",
    }
}

/// Key under which a user-visible capturing group can be looked up.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Number(u32),
    Name(String),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Number(n) => write!(f, "{n}"),
            GroupKey::Name(name) => write!(f, "'{name}'"),
        }
    }
}

impl From<u32> for GroupKey {
    fn from(n: u32) -> Self {
        GroupKey::Number(n)
    }
}

impl From<&str> for GroupKey {
    fn from(name: &str) -> Self {
        GroupKey::Name(name.to_string())
    }
}

/// An IR tree together with the pattern text and flags it came from.
///
/// Immutable: transforms build a new envelope via [`Ir::with_tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ir {
    tree: Node,
    source: Arc<str>,
    flags: Flags,
}

impl Ir {
    pub fn new(tree: Node, source: impl Into<Arc<str>>, flags: Flags) -> Self {
        Self {
            tree,
            source: source.into(),
            flags,
        }
    }

    pub fn tree(&self) -> &Node {
        &self.tree
    }

    pub fn into_tree(self) -> Node {
        self.tree
    }

    /// Original PCRE pattern text.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    /// Apply a fallible transform to the tree, keeping source and flags.
    pub fn try_map<E>(self, f: impl FnOnce(Node) -> Result<Node, E>) -> Result<Self, E> {
        Ok(Self {
            tree: f(self.tree)?,
            source: self.source,
            flags: self.flags,
        })
    }

    /// New envelope sharing this one's source and flags.
    pub fn with_tree(&self, tree: Node) -> Self {
        Self {
            tree,
            source: Arc::clone(&self.source),
            flags: self.flags,
        }
    }
}
