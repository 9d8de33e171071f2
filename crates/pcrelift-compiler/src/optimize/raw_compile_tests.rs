use indexmap::IndexMap;

use pcrelift_core::{CaptureId, Chunk, Direction, GroupSlot, Node, NodeKind, RawRegex};

use super::{Accelerate, CompileRaw, compile_unit};
use crate::dump::dump;
use crate::error::CompileError;
use crate::rewrite::Rewrite;
use crate::test_utils::*;

fn capture(index: u32, id: Option<&str>, text: &str) -> Chunk {
    Chunk::Capture {
        index,
        id: id.map(CaptureId::new),
        chunks: vec![Chunk::Chars(text.to_string())],
    }
}

#[test]
fn backreference_resolves_to_sequential_index() {
    let raw = RawRegex::new(
        vec![
            Chunk::Chars("x".into()),
            capture(1, Some("r1"), "a+"),
            Chunk::Chars("-".into()),
            Chunk::Backreference(CaptureId::new("r1")),
        ],
        None,
    );

    let unit = compile_unit(&raw).unwrap();

    assert_eq!(unit.text.render(), r"x(a+)-\1");
    assert_eq!(unit.groups, vec![GroupSlot::Numbered(1)]);
    assert_eq!(unit.group_map, IndexMap::from([(1, 1)]));
}

#[test]
fn ghost_takes_a_slot_but_no_pattern_index() {
    let raw = RawRegex::new(
        vec![
            capture(1, None, "a"),
            Chunk::Lookaround {
                direction: Direction::Ahead,
                negated: false,
                chunks: vec![Chunk::GhostCapture {
                    id: CaptureId::new("atomic"),
                    chunks: vec![Chunk::nested(RawRegex::literal("b+"))],
                }],
            },
            Chunk::Backreference(CaptureId::new("atomic")),
            capture(2, None, "c"),
        ],
        None,
    );

    let unit = compile_unit(&raw).unwrap();

    assert_eq!(unit.text.render(), r"(a)(?>(?=(b+)))\2(c)");
    assert_eq!(
        unit.groups,
        vec![
            GroupSlot::Numbered(1),
            GroupSlot::Ghost,
            GroupSlot::Numbered(2)
        ]
    );
    assert_eq!(unit.group_map, IndexMap::from([(1, 1), (2, 3)]));
}

#[test]
fn named_capture_recorded_with_name() {
    let raw = RawRegex::new(
        vec![Chunk::NamedCapture {
            index: 1,
            name: "word".into(),
            chunks: vec![Chunk::Chars(r"\w+".into())],
        }],
        None,
    );

    let unit = compile_unit(&raw).unwrap();

    assert_eq!(unit.text.render(), r"(?<word>\w+)");
    assert_eq!(
        unit.groups,
        vec![GroupSlot::Named {
            index: 1,
            name: "word".into()
        }]
    );
}

#[test]
fn backreference_before_digit_is_grouped() {
    let raw = RawRegex::new(
        vec![
            capture(1, Some("r1"), "a"),
            Chunk::Backreference(CaptureId::new("r1")),
            Chunk::Chars("2".into()),
        ],
        None,
    );

    assert_eq!(compile_unit(&raw).unwrap().text.render(), r"(a)(?:\1)2");
}

#[test]
fn nested_possessives_reference_their_own_ghosts() {
    // (?:b++)*+
    let ast = pattern(vec![possessive(
        0,
        None,
        non_capturing(vec![possessive(1, None, chr('b'))]),
    )]);
    let tree = CompileRaw.run(rewritten(&ast, Accelerate)).unwrap();

    insta::assert_snapshot!(dump(&tree), @r"
    PATTERN groups=[0]
      RAW_REGEX[?] (?>(?=((?:(?>(?=(b+)))\2)*)))\1
    ");
}

#[test]
fn every_fragment_is_its_own_unit() {
    let ast = pattern(vec![
        group(chars("a")),
        non_capturing(vec![alternation(vec![
            vec![group(chars("b"))],
            vec![chr('x'), backref(1)],
        ])]),
    ]);
    let tree = CompileRaw.run(rewritten(&ast, Accelerate)).unwrap();

    insta::assert_snapshot!(dump(&tree), @r"
    PATTERN groups=[0, 1, 2]
      RAW_REGEX[1] (a)
      NON_CAPTURING_GROUP
        ALTERNATION
          RAW_REGEX[1] (b)
          ALTERNATIVE
            RAW_REGEX[1] x
            NUMBERED_BACKREFERENCE \1
    ");

    let Node::Pattern(root) = &tree else {
        panic!("expected PATTERN root");
    };
    let Some(first) = root.components[0].as_raw() else {
        panic!("expected RAW_REGEX");
    };
    let [Chunk::Optimised(unit)] = first.chunks.as_slice() else {
        panic!("expected one OPTIMISED chunk, got {:?}", first.chunks);
    };
    assert_eq!(unit.group_map, IndexMap::from([(1, 1)]));
}

#[test]
fn nested_payload_must_be_raw() {
    let raw = RawRegex::new(vec![Chunk::Nested(Box::new(Node::Noop))], None);

    assert_eq!(
        compile_unit(&raw),
        Err(CompileError::MalformedNested(NodeKind::Noop))
    );
}

#[test]
fn backreference_must_follow_its_capture() {
    let raw = RawRegex::new(
        vec![
            Chunk::Backreference(CaptureId::new("r1")),
            capture(1, Some("r1"), "a"),
        ],
        None,
    );

    assert_eq!(
        compile_unit(&raw),
        Err(CompileError::UnresolvedBackreference(CaptureId::new("r1")))
    );
}
