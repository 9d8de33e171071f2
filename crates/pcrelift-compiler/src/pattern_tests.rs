use pcrelift_core::{Ast, Flags, GenericType, GroupKey};

use crate::test_utils::*;
use crate::{Compiler, Error};

#[test]
fn possessive_consumes_what_the_lookahead_matched() {
    let pattern = compile(&pattern(vec![possessive(1, None, chr('a')), chr('b')]));

    assert_eq!(groups(&pattern, "xaaab"), Some(vec!["1..5".into()]));
    assert_eq!(groups(&pattern, "aaa"), None);
}

#[test]
fn ghost_group_not_reported() {
    // (a)*+(b)
    let pattern = compile(&pattern(vec![
        possessive(0, None, group(chars("a"))),
        group(chars("b")),
    ]));

    let found = pattern.exec("aab", 0).unwrap().unwrap();

    assert_eq!(found.len(), 3);
    assert_eq!(found.range(), 0..3);
    assert_eq!(found.get(1), Some(1..2));
    assert_eq!(found.get(2), Some(2..3));
    assert_eq!(found.get(3), None);
}

#[test]
fn sticky_only_matches_at_start() {
    let ast = pattern(chars("b"));
    let sticky = compile_with(&ast, Flags::default().with_anchored(true));
    let floating = compile(&ast);

    assert!(sticky.exec("ab", 0).unwrap().is_none());
    assert_eq!(sticky.exec("ab", 1).unwrap().map(|m| m.range()), Some(1..2));
    assert_eq!(floating.exec("ab", 0).unwrap().map(|m| m.range()), Some(1..2));
}

#[test]
fn groups_by_name_and_number() {
    // (?<word>\w+)-(\d)
    let pattern = compile(&pattern(vec![
        named(
            "word",
            vec![greedy(
                1,
                None,
                Ast::GenericCharacterType {
                    kind: GenericType::Word,
                },
            )],
        ),
        chr('-'),
        group(vec![Ast::GenericCharacterType {
            kind: GenericType::Digit,
        }]),
    ]));

    let found = pattern.exec("ab-1", 0).unwrap().unwrap();

    assert_eq!(found.name("word"), Some(0..2));
    assert_eq!(found.get(2), Some(3..4));
    assert_eq!(found.name("missing"), None);
    assert_eq!(pattern.group_index(&GroupKey::Number(2)), Some(2));
    assert_eq!(pattern.group_index(&GroupKey::Number(3)), None);
    assert_eq!(pattern.group_index(&GroupKey::Name("word".into())), Some(1));
}

#[test]
fn non_participating_group_is_unset() {
    // (a)|(b)
    let pattern = compile(&pattern(vec![alternation(vec![
        vec![group(chars("a"))],
        vec![group(chars("b"))],
    ])]));

    assert_eq!(pattern.source(), "(a)|(b)");
    assert_eq!(
        groups(&pattern, "b"),
        Some(vec!["0..1".into(), "-".into(), "0..1".into()])
    );
}

#[test]
fn start_offset_outside_input() {
    let pattern = compile(&pattern(vec![Ast::Dot]));

    assert!(pattern.exec("ab", 5).unwrap().is_none());
    assert!(pattern.exec("é", 1).unwrap().is_none());
    assert_eq!(pattern.exec("ab", 2).unwrap().map(|m| m.range()), None);
}

#[test]
fn display_is_native_source() {
    let pattern = compile(&pattern(vec![possessive(0, None, chr('x'))]));

    assert_eq!(pattern.to_string(), r"(?>(?=(x*)))\1");
}

#[test]
fn backtrack_limit_surfaces_as_runtime_error() {
    // (a*)*\1b
    let ast = pattern(vec![
        greedy(0, None, group(vec![greedy(0, None, chr('a'))])),
        backref(1),
        chr('b'),
    ]);
    let compiler = Compiler::builder().backtrack_limit(10).build();
    let pattern = compiler.compile(&ast, r"(a*)*\1b", Flags::default()).unwrap();

    assert_eq!(pattern.source(), r"(a*)*\1b");
    assert!(matches!(
        pattern.exec(&"a".repeat(30), 0),
        Err(Error::Runtime(_))
    ));
}

#[test]
fn possessive_over_backreference_never_gives_back() {
    // (a)(?:\1)*+a
    let pattern = compile(&pattern(vec![
        group(chars("a")),
        possessive(0, None, non_capturing(vec![backref(1)])),
        chr('a'),
    ]));

    assert_eq!(pattern.source(), r"(a)(?>(?=((?:\1)*)))\2a");
    assert_eq!(groups(&pattern, "aaa"), None);
}

#[test]
fn possessive_group_with_backreference_never_gives_back() {
    // (a)(?:b\1)*+b
    let pattern = compile(&pattern(vec![
        group(chars("a")),
        possessive(0, None, non_capturing(vec![chr('b'), backref(1)])),
        chr('b'),
    ]));

    assert_eq!(groups(&pattern, "ababa"), None);
    assert_eq!(
        groups(&pattern, "abab"),
        Some(vec!["0..4".into(), "0..1".into()])
    );
}

#[test]
fn capturing_lookahead_is_not_retried() {
    // (?=(a+))a*b\1
    let pattern = compile(&pattern(vec![
        lookahead(false, vec![group(vec![greedy(1, None, chr('a'))])]),
        greedy(0, None, chr('a')),
        chr('b'),
        backref(1),
    ]));

    assert_eq!(pattern.source(), r"(?>(?=(a+)))a*b\1");
    assert_eq!(
        groups(&pattern, "aaaba"),
        Some(vec!["2..5".into(), "2..3".into()])
    );
}

#[test]
fn lone_possessive_adds_no_user_group() {
    let pattern = compile(&pattern(vec![possessive(1, None, chr('a'))]));

    assert_eq!(pattern.capturing_group_names(), [GroupKey::Number(0)]);
    assert_eq!(pattern.native_to_emulated().len(), 1);
    assert_eq!(pattern.group_count(), 1);

    let found = pattern.exec("aa", 0).unwrap().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found.range(), 0..2);
}
