use pcrelift_core::{Ast, Chunk, Node, RawRegex};

use crate::dump::dump;
use crate::error::CompileResult;
use crate::rewrite::Rewrite;
use crate::test_utils::*;

struct Identity;

impl Rewrite for Identity {
    type Context = ();
    const NAME: &'static str = "identity";
}

/// Replaces every `NOOP` with the count of `NOOP`s seen so far.
struct NumberNoops;

impl Rewrite for NumberNoops {
    type Context = u32;
    const NAME: &'static str = "number-noops";

    fn noop(&self, seen: &mut u32) -> CompileResult<Node> {
        *seen += 1;
        Ok(Node::raw(&seen.to_string()))
    }
}

/// Uppercases literal chunks of raw fragments, leaves the rest alone.
struct Shout;

impl Rewrite for Shout {
    type Context = ();
    const NAME: &'static str = "shout";

    fn raw_regex(&self, raw: RawRegex, _cx: &mut ()) -> CompileResult<Node> {
        let chunks = raw
            .chunks
            .into_iter()
            .map(|chunk| match chunk {
                Chunk::Chars(text) => Chunk::Chars(text.to_uppercase()),
                other => other,
            })
            .collect();
        Ok(Node::RawRegex(RawRegex::new(chunks, raw.fixed_length)))
    }
}

fn sample() -> Ast {
    pattern(vec![
        named("n", vec![chr('a'), Ast::Comment]),
        non_capturing(vec![alternation(vec![chars("b"), vec![Ast::Comment]])]),
        lazy(0, None, group(chars("c"))),
        lookahead(false, vec![backref(1)]),
        Ast::CharacterClass {
            negated: false,
            components: vec![Ast::CharacterRange { from: 'd', to: 'e' }],
        },
    ])
}

#[test]
fn default_handlers_rebuild_the_same_tree() {
    let tree = lowered(&sample()).into_tree();

    assert_eq!(Identity.run(tree.clone()).unwrap(), tree);
}

#[test]
fn context_is_fresh_per_run() {
    let tree = lowered(&sample()).into_tree();

    let first = NumberNoops.run(tree.clone()).unwrap();
    let second = NumberNoops.run(tree).unwrap();

    assert_eq!(first, second);
    insta::assert_snapshot!(dump(&first), @r"
    PATTERN groups=[0, 'n', 1, 2]
      NAMED_CAPTURING_GROUP #1 'n'
        RAW_REGEX[1] a
        RAW_REGEX[1] 1
      NON_CAPTURING_GROUP
        ALTERNATION
          ALTERNATIVE
            RAW_REGEX[1] b
          ALTERNATIVE
            RAW_REGEX[1] 2
      MINIMISING_QUANTIFIER *
        CAPTURING_GROUP #2
          RAW_REGEX[1] c
      LOOKAROUND (?=
        NUMBERED_BACKREFERENCE \1
      CHARACTER_CLASS
        CHARACTER_RANGE
          RAW_REGEX[1] d
          RAW_REGEX[1] e
    ");
}

#[test]
fn override_reaches_every_depth() {
    let tree = Shout.run(lowered(&sample()).into_tree()).unwrap();

    insta::assert_snapshot!(dump(&tree), @r"
    PATTERN groups=[0, 'n', 1, 2]
      NAMED_CAPTURING_GROUP #1 'n'
        RAW_REGEX[1] A
        NOOP
      NON_CAPTURING_GROUP
        ALTERNATION
          ALTERNATIVE
            RAW_REGEX[1] B
          ALTERNATIVE
            NOOP
      MINIMISING_QUANTIFIER *
        CAPTURING_GROUP #2
          RAW_REGEX[1] C
      LOOKAROUND (?=
        NUMBERED_BACKREFERENCE \1
      CHARACTER_CLASS
        CHARACTER_RANGE
          RAW_REGEX[1] D
          RAW_REGEX[1] E
    ");
}
