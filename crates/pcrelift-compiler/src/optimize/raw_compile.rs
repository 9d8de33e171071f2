//! Raw compilation: flatten each raw fragment into one `OPTIMISED` chunk.
//!
//! Every `RAW_REGEX` is its own unit. Captures found in a unit are numbered
//! from 1 within it and symbolic backreferences are resolved against them.
//! The unit-local numbering is a partial view; the pattern compiler replays
//! the recorded group slots to produce the pattern-wide one.

use indexmap::IndexMap;
use tracing::trace;

use pcrelift_core::{Chunk, GroupSlot, Node, Optimised, RawRegex};

use crate::error::CompileResult;
use crate::flatten::{CaptureContext, Flattener};
use crate::rewrite::Rewrite;

pub struct CompileRaw;

impl Rewrite for CompileRaw {
    type Context = ();

    const NAME: &'static str = "compile-raw";

    fn raw_regex(&self, raw: RawRegex, _cx: &mut ()) -> CompileResult<Node> {
        let optimised = compile_unit(&raw)?;
        Ok(Node::RawRegex(RawRegex::new(
            vec![Chunk::Optimised(optimised)],
            raw.fixed_length,
        )))
    }
}

/// Flatten one raw fragment with fresh unit-local numbering.
pub fn compile_unit(raw: &RawRegex) -> CompileResult<Optimised> {
    let mut unit = UnitContext::default();
    let mut flattener = Flattener::new(&mut unit);
    flattener.chunks(&raw.chunks)?;
    let text = flattener.finish()?;

    trace!(
        native = %text,
        groups = unit.groups.len(),
        "compiled raw unit"
    );

    Ok(Optimised {
        text,
        groups: unit.groups,
        group_map: unit.group_map,
    })
}

#[derive(Default)]
struct UnitContext {
    groups: Vec<GroupSlot>,
    /// Pattern group index to unit-local slot.
    group_map: IndexMap<u32, u32>,
}

impl UnitContext {
    fn next_slot(&mut self, group: GroupSlot) -> u32 {
        self.groups.push(group);
        self.groups.len() as u32
    }
}

impl CaptureContext for UnitContext {
    fn record_capturing_group(&mut self, index: u32, name: Option<&str>) -> u32 {
        let slot = self.next_slot(match name {
            Some(name) => GroupSlot::Named {
                index,
                name: name.to_string(),
            },
            None => GroupSlot::Numbered(index),
        });
        self.group_map.insert(index, slot);
        slot
    }

    fn record_ghost_capturing_group(&mut self) -> u32 {
        self.next_slot(GroupSlot::Ghost)
    }

    fn capturing_group_index(&self, index: u32) -> Option<u32> {
        self.group_map.get(&index).copied()
    }
}
