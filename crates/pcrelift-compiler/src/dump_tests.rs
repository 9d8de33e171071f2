use pcrelift_core::{Ast, Direction};

use crate::dump::dump;
use crate::test_utils::*;

#[test]
fn quantifier_operators_and_lookbehind() {
    let ast = pattern(vec![
        greedy(3, None, chr('a')),
        greedy(2, Some(4), chr('b')),
        greedy(0, Some(1), chr('c')),
        lazy(1, None, chr('d')),
        Ast::Lookaround {
            direction: Direction::Behind,
            negated: true,
            components: chars("q"),
        },
    ]);

    insta::assert_snapshot!(dump(lowered(&ast).tree()), @r"
    PATTERN groups=[0]
      MAXIMISING_QUANTIFIER {3,}
        RAW_REGEX[1] a
      MAXIMISING_QUANTIFIER {2,4}
        RAW_REGEX[1] b
      MAXIMISING_QUANTIFIER ?
        RAW_REGEX[1] c
      MINIMISING_QUANTIFIER +
        RAW_REGEX[1] d
      LOOKAROUND (?<!
        RAW_REGEX[1] q
    ");
}

#[test]
fn optimised_tree_mixes_raw_and_structure() {
    let ast = pattern(vec![
        possessive(0, None, group(vec![chr('a'), backref(1)])),
        named("w", chars("xy")),
    ]);

    insta::assert_snapshot!(optimised_dump(&ast), @r"
    PATTERN groups=[0, 1, 'w', 2]
      POSSESSIVE_QUANTIFIER *
        CAPTURING_GROUP #1
          RAW_REGEX[1] a
          NUMBERED_BACKREFERENCE \1
      RAW_REGEX[2] (?<w>xy)
    ");
}

#[test]
fn fully_optimised_lookbehind() {
    let ast = pattern(vec![
        Ast::Lookaround {
            direction: Direction::Behind,
            negated: false,
            components: chars("ab"),
        },
        chr('c'),
    ]);

    insta::assert_snapshot!(optimised_dump(&ast), @r"
    PATTERN groups=[0]
      RAW_REGEX[1] (?<=ab)c
    ");
}
