//! AST builders and pipeline shortcuts shared by the unit tests.

use pcrelift_core::{Ast, Direction, Flags, Ir, Node};

use crate::dump::dump;
use crate::lower::lower;
use crate::optimize::Optimizer;
use crate::pattern::Pattern;
use crate::{Compiler, Rewrite};

pub fn chars(text: &str) -> Vec<Ast> {
    text.chars().map(|value| Ast::Character { value }).collect()
}

pub fn pattern(components: Vec<Ast>) -> Ast {
    Ast::Pattern { components }
}

pub fn group(components: Vec<Ast>) -> Ast {
    Ast::CapturingGroup { components }
}

pub fn named(name: &str, components: Vec<Ast>) -> Ast {
    Ast::NamedCapturingGroup {
        group_name: name.to_string(),
        components,
    }
}

pub fn non_capturing(components: Vec<Ast>) -> Ast {
    Ast::NonCapturingGroup { components }
}

/// `ALTERNATION` over one `ALTERNATIVE` per entry.
pub fn alternation(alternatives: Vec<Vec<Ast>>) -> Ast {
    Ast::Alternation {
        alternatives: alternatives
            .into_iter()
            .map(|components| Ast::Alternative { components })
            .collect(),
    }
}

pub fn greedy(min: u32, max: Option<u32>, component: Ast) -> Ast {
    Ast::MaximisingQuantifier {
        min,
        max,
        component: Box::new(component),
    }
}

pub fn lazy(min: u32, max: Option<u32>, component: Ast) -> Ast {
    Ast::MinimisingQuantifier {
        min,
        max,
        component: Box::new(component),
    }
}

pub fn possessive(min: u32, max: Option<u32>, component: Ast) -> Ast {
    Ast::PossessiveQuantifier {
        min,
        max,
        component: Box::new(component),
    }
}

pub fn lookahead(negated: bool, components: Vec<Ast>) -> Ast {
    Ast::Lookaround {
        direction: Direction::Ahead,
        negated,
        components,
    }
}

pub fn backref(number: u32) -> Ast {
    Ast::NumberedBackreference { number }
}

pub fn chr(value: char) -> Ast {
    Ast::Character { value }
}

pub fn lowered(ast: &Ast) -> Ir {
    lower(ast, "", Flags::default())
}

/// Lowered tree after one rewrite pass.
pub fn rewritten(ast: &Ast, pass: impl Rewrite) -> Node {
    pass.run(lowered(ast).into_tree()).unwrap()
}

/// Dump of the tree after the default optimizer.
pub fn optimised_dump(ast: &Ast) -> String {
    let ir = Optimizer::default().optimise(lowered(ast)).unwrap();
    dump(ir.tree())
}

pub fn compile(ast: &Ast) -> Pattern {
    compile_with(ast, Flags::default())
}

pub fn compile_with(ast: &Ast, flags: Flags) -> Pattern {
    Compiler::default().compile(ast, "", flags).unwrap()
}

/// Whole-match and group ranges as `start..end` strings, `-` for unset.
pub fn groups(pattern: &Pattern, input: &str) -> Option<Vec<String>> {
    let found = pattern.exec(input, 0).unwrap()?;
    Some(
        (0..found.len() as u32)
            .map(|n| match found.get(n) {
                Some(range) => format!("{}..{}", range.start, range.end),
                None => "-".to_string(),
            })
            .collect(),
    )
}
