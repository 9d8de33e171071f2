//! Human-readable IR printer for debugging and snapshot tests.

use std::fmt::Write as _;

use pcrelift_core::ir::lookaround_open;
use pcrelift_core::{Node, RawRegex};

/// Render `node` one line per node, children indented by two spaces.
///
/// Raw fragments print as `RAW_REGEX[len] text`, where `len` is the fixed
/// length or `?` and `text` is the pseudo-native rendering of the chunks.
pub fn dump(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    let kind = node.kind();
    let children: &[Node] = match node {
        Node::Pattern(root) => {
            let groups: Vec<String> = root
                .capturing_groups
                .iter()
                .map(ToString::to_string)
                .collect();
            let _ = writeln!(out, "{indent}{kind} groups=[{}]", groups.join(", "));
            &root.components
        }
        Node::Alternation(alternatives) => {
            let _ = writeln!(out, "{indent}{kind}");
            alternatives
        }
        Node::Alternative(components) | Node::NonCapturingGroup(components) => {
            let _ = writeln!(out, "{indent}{kind}");
            components
        }
        Node::CapturingGroup { index, components } => {
            let _ = writeln!(out, "{indent}{kind} #{index}");
            components
        }
        Node::NamedCapturingGroup {
            index,
            name,
            components,
        } => {
            let _ = writeln!(out, "{indent}{kind} #{index} '{name}'");
            components
        }
        Node::CharacterClass {
            negated,
            components,
        } => {
            let negated = if *negated { " negated" } else { "" };
            let _ = writeln!(out, "{indent}{kind}{negated}");
            components
        }
        Node::CharacterRange { from, to } => {
            let _ = writeln!(out, "{indent}{kind}");
            write_node(out, from, depth + 1);
            write_node(out, to, depth + 1);
            return;
        }
        Node::MaximisingQuantifier(q)
        | Node::MinimisingQuantifier(q)
        | Node::PossessiveQuantifier(q) => {
            let _ = writeln!(out, "{indent}{kind} {}", q.operator());
            write_node(out, &q.component, depth + 1);
            return;
        }
        Node::NumberedBackreference(number) => {
            let _ = writeln!(out, "{indent}{kind} \\{number}");
            return;
        }
        Node::Noop => {
            let _ = writeln!(out, "{indent}{kind}");
            return;
        }
        Node::Lookaround(lookaround) => {
            let open = lookaround_open(lookaround.direction, lookaround.negated);
            let _ = writeln!(out, "{indent}{kind} {open}");
            &lookaround.components
        }
        Node::RawRegex(raw) => {
            let _ = writeln!(out, "{indent}{kind}[{}] {raw}", fixed_length(raw));
            return;
        }
    };

    for child in children {
        write_node(out, child, depth + 1);
    }
}

fn fixed_length(raw: &RawRegex) -> String {
    raw.fixed_length
        .map_or_else(|| "?".to_string(), |len| len.to_string())
}
