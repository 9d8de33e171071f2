//! Flags handed to the native engine.

use std::fmt;

use pcrelift_core::Flags;

/// Native engine flags derived from the pattern's [`Flags`].
///
/// Offset capture and repeat-from-offset are always on: the matcher needs
/// group offsets and resumes searches at an explicit position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeFlags {
    pub offset_capture: bool,
    pub repeat_from_offset: bool,
    /// Matches must start exactly at the search offset.
    pub sticky: bool,
    pub caseless: bool,
    pub dot_all: bool,
    pub multiline: bool,
}

impl NativeFlags {
    pub fn from_flags(flags: Flags) -> Self {
        Self {
            offset_capture: true,
            repeat_from_offset: true,
            sticky: flags.anchored,
            caseless: flags.caseless,
            dot_all: flags.dot_all,
            multiline: flags.multiline,
        }
    }

    /// Pattern string handed to the engine: inline flags, then `source`,
    /// anchored with `\G` to the search offset when sticky.
    pub fn engine_source(&self, source: &str) -> String {
        if self.sticky {
            format!(r"{}\G(?:{source})", self.inline_prefix())
        } else {
            format!("{}{source}", self.inline_prefix())
        }
    }

    /// Inline group enabling the flags the engine takes inside the pattern,
    /// e.g. `(?im)`. Empty when none apply.
    fn inline_prefix(&self) -> String {
        let letters: String = [
            (self.caseless, 'i'),
            (self.dot_all, 's'),
            (self.multiline, 'm'),
        ]
        .into_iter()
        .filter_map(|(on, letter)| on.then_some(letter))
        .collect();

        if letters.is_empty() {
            letters
        } else {
            format!("(?{letters})")
        }
    }
}

impl fmt::Display for NativeFlags {
    /// Flag string: `d` offsets, `g` repeat from offset, `y` sticky,
    /// `i` caseless, `s` dot-all, `m` multiline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters = [
            (self.offset_capture, 'd'),
            (self.repeat_from_offset, 'g'),
            (self.sticky, 'y'),
            (self.caseless, 'i'),
            (self.dot_all, 's'),
            (self.multiline, 'm'),
        ];
        for (on, letter) in letters {
            if on {
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}
