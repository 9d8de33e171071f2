//! Pattern-wide flags, fixed at parse time.

/// Flags a PCRE pattern was parsed with.
///
/// Set once when the pattern is parsed and read-only afterwards. Every field
/// is optional in the collaborator shape `{optimise?, anchored?, ...}`;
/// missing fields take the [`Default`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Flags {
    /// Run the optimizer pipeline before native compilation.
    pub optimise: bool,
    /// Only match at the requested start offset (PCRE `A`).
    pub anchored: bool,
    /// Case-insensitive matching (PCRE `i`).
    pub caseless: bool,
    /// `.` also matches newlines (PCRE `s`).
    pub dot_all: bool,
    /// `^`/`$` match at line boundaries (PCRE `m`).
    pub multiline: bool,
    /// Whitespace and comments in the pattern are ignored (PCRE `x`).
    ///
    /// Consumed by the parser; it never reaches the native engine.
    pub extended: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            optimise: true,
            anchored: false,
            caseless: false,
            dot_all: false,
            multiline: true,
            extended: false,
        }
    }
}

impl Flags {
    pub fn with_optimise(mut self, value: bool) -> Self {
        self.optimise = value;
        self
    }

    pub fn with_anchored(mut self, value: bool) -> Self {
        self.anchored = value;
        self
    }

    pub fn with_caseless(mut self, value: bool) -> Self {
        self.caseless = value;
        self
    }

    pub fn with_dot_all(mut self, value: bool) -> Self {
        self.dot_all = value;
        self
    }

    pub fn with_multiline(mut self, value: bool) -> Self {
        self.multiline = value;
        self
    }

    pub fn with_extended(mut self, value: bool) -> Self {
        self.extended = value;
        self
    }
}
