//! Compiled pattern: native engine plus the group tables that hide emulation.

use std::fmt;
use std::ops::Range;

use indexmap::IndexMap;

use pcrelift_core::GroupKey;

use crate::emit::NativeFlags;
use crate::{Error, Result};

/// A PCRE pattern compiled for the native engine.
///
/// Besides the engine itself it carries the user-facing group catalogue and
/// the map from native group slots to user-facing (emulated) group numbers.
/// Ghost slots introduced for emulation are absent from that map.
#[derive(Debug)]
pub struct Pattern {
    regex: fancy_regex::Regex,
    source: String,
    flags: NativeFlags,
    capturing_group_names: Vec<GroupKey>,
    native_to_emulated: IndexMap<u32, u32>,
    names: IndexMap<String, u32>,
}

impl Pattern {
    pub(crate) fn new(
        regex: fancy_regex::Regex,
        source: String,
        flags: NativeFlags,
        capturing_group_names: Vec<GroupKey>,
        native_to_emulated: IndexMap<u32, u32>,
    ) -> Self {
        let names = capturing_group_names
            .windows(2)
            .filter_map(|pair| match pair {
                [GroupKey::Name(name), GroupKey::Number(n)] => Some((name.clone(), *n)),
                _ => None,
            })
            .collect();

        Self {
            regex,
            source,
            flags,
            capturing_group_names,
            native_to_emulated,
            names,
        }
    }

    pub fn regex(&self) -> &fancy_regex::Regex {
        &self.regex
    }

    /// Native source, without the inline flag group. For diagnostics only.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> NativeFlags {
        self.flags
    }

    /// `0`, then per user group its number, or its name followed by its
    /// number.
    pub fn capturing_group_names(&self) -> &[GroupKey] {
        &self.capturing_group_names
    }

    /// Native group slot to user-facing group number. Ghost slots are absent.
    pub fn native_to_emulated(&self) -> &IndexMap<u32, u32> {
        &self.native_to_emulated
    }

    /// Number of user-visible groups, including group 0.
    pub fn group_count(&self) -> usize {
        self.native_to_emulated.len()
    }

    /// User-facing number of a group, by number or name.
    pub fn group_index(&self, key: &GroupKey) -> Option<u32> {
        match key {
            GroupKey::Number(n) => ((*n as usize) < self.group_count()).then_some(*n),
            GroupKey::Name(name) => self.names.get(name).copied(),
        }
    }

    /// Search `input` from byte offset `start`.
    ///
    /// Sticky patterns are anchored at `start` with `\G`, so the engine
    /// fails fast at later offsets. A match beginning elsewhere is still
    /// rejected here.
    /// An offset past the end or inside a character never matches.
    pub fn exec<'p>(&'p self, input: &str, start: usize) -> Result<Option<MatchResult<'p>>> {
        if start > input.len() || !input.is_char_boundary(start) {
            return Ok(None);
        }

        let Some(captures) = self
            .regex
            .captures_from_pos(input, start)
            .map_err(|error| Error::Runtime(Box::new(error)))?
        else {
            return Ok(None);
        };

        let Some(whole) = captures.get(0) else {
            return Ok(None);
        };
        if self.flags.sticky && whole.start() != start {
            return Ok(None);
        }

        let mut groups = vec![None; self.group_count()];
        for (&native, &emulated) in &self.native_to_emulated {
            groups[emulated as usize] = captures
                .get(native as usize)
                .map(|m| m.start()..m.end());
        }

        Ok(Some(MatchResult {
            groups,
            names: &self.names,
        }))
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Offsets of one match, indexed by user-facing group number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'p> {
    groups: Vec<Option<Range<usize>>>,
    names: &'p IndexMap<String, u32>,
}

impl MatchResult<'_> {
    /// Byte range of the whole match.
    pub fn range(&self) -> Range<usize> {
        self.groups
            .first()
            .cloned()
            .flatten()
            .unwrap_or(0..0)
    }

    /// Byte range of group `n`, `None` if it did not participate.
    pub fn get(&self, n: u32) -> Option<Range<usize>> {
        self.groups.get(n as usize).cloned().flatten()
    }

    pub fn name(&self, name: &str) -> Option<Range<usize>> {
        self.names.get(name).and_then(|&n| self.get(n))
    }

    /// Number of groups, including group 0.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
