//! AST contract produced by the PCRE parser.
//!
//! The parser itself lives outside this workspace. This module only fixes the
//! shape of what it hands over: a tree of `{name: <KIND>, ...}` objects that
//! has already been validated against the grammar.

use crate::ir::Direction;

/// A parsed PCRE syntax node.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "name", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Ast {
    Pattern {
        #[serde(default)]
        components: Vec<Ast>,
    },
    Alternation {
        alternatives: Vec<Ast>,
    },
    Alternative {
        #[serde(default)]
        components: Vec<Ast>,
    },
    CapturingGroup {
        #[serde(default)]
        components: Vec<Ast>,
    },
    NamedCapturingGroup {
        #[serde(rename = "groupName")]
        group_name: String,
        #[serde(default)]
        components: Vec<Ast>,
    },
    NonCapturingGroup {
        #[serde(default)]
        components: Vec<Ast>,
    },
    Character {
        value: char,
    },
    CharacterClass {
        #[serde(default)]
        negated: bool,
        components: Vec<Ast>,
    },
    CharacterRange {
        from: char,
        to: char,
    },
    GenericCharacterType {
        kind: GenericType,
    },
    Dot,
    Anchor {
        kind: AnchorKind,
    },
    MaximisingQuantifier {
        min: u32,
        max: Option<u32>,
        component: Box<Ast>,
    },
    MinimisingQuantifier {
        min: u32,
        max: Option<u32>,
        component: Box<Ast>,
    },
    PossessiveQuantifier {
        min: u32,
        max: Option<u32>,
        component: Box<Ast>,
    },
    NumberedBackreference {
        number: u32,
    },
    Lookaround {
        direction: Direction,
        #[serde(default)]
        negated: bool,
        components: Vec<Ast>,
    },
    Comment,
}

/// Shorthand character types (`\d`, `\w`, `\s`, `\h` and their negations).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericType {
    Digit,
    NonDigit,
    Word,
    NonWord,
    Whitespace,
    NonWhitespace,
    HorizontalWhitespace,
    NonHorizontalWhitespace,
}

impl GenericType {
    /// Native spelling for this type.
    ///
    /// The engine reads `\h` as a hex digit, so horizontal whitespace is
    /// spelled out as a class.
    pub fn escape(self) -> &'static str {
        match self {
            GenericType::Digit => r"\d",
            GenericType::NonDigit => r"\D",
            GenericType::Word => r"\w",
            GenericType::NonWord => r"\W",
            GenericType::Whitespace => r"\s",
            GenericType::NonWhitespace => r"\S",
            GenericType::HorizontalWhitespace => HORIZONTAL_SPACE,
            GenericType::NonHorizontalWhitespace => NON_HORIZONTAL_SPACE,
        }
    }
}

const HORIZONTAL_SPACE: &str =
    r"[\t\x{20}\x{A0}\x{1680}\x{180E}\x{2000}-\x{200A}\x{202F}\x{205F}\x{3000}]";
const NON_HORIZONTAL_SPACE: &str =
    r"[^\t\x{20}\x{A0}\x{1680}\x{180E}\x{2000}-\x{200A}\x{202F}\x{205F}\x{3000}]";

/// Zero-width assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    Start,
    End,
    WordBoundary,
    NonWordBoundary,
}

impl AnchorKind {
    pub fn native(self) -> &'static str {
        match self {
            AnchorKind::Start => "^",
            AnchorKind::End => "$",
            AnchorKind::WordBoundary => r"\b",
            AnchorKind::NonWordBoundary => r"\B",
        }
    }
}
