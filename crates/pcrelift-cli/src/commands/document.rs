//! Pattern documents: the parser's output plus the text and flags it came
//! from, as JSON.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use pcrelift_core::{Ast, Flags};

/// `{source?, flags?, ast}` as handed over by the PCRE parser.
#[derive(Debug, serde::Deserialize)]
pub struct PatternDocument {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub flags: Flags,
    pub ast: Ast,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("pattern document is required: use a positional argument or -d/--document")]
    Missing,

    #[error("failed to read '{path}': {error}")]
    Read {
        path: String,
        #[source]
        error: io::Error,
    },

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("invalid pattern document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flag switches given on the command line, applied over the document's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagOverrides {
    pub caseless: bool,
    pub dot_all: bool,
    pub anchored: bool,
    pub no_multiline: bool,
    pub no_optimise: bool,
}

impl FlagOverrides {
    /// Switches only ever turn a flag on (or multiline/optimise off).
    pub fn apply(self, flags: Flags) -> Flags {
        flags
            .with_caseless(flags.caseless || self.caseless)
            .with_dot_all(flags.dot_all || self.dot_all)
            .with_anchored(flags.anchored || self.anchored)
            .with_multiline(flags.multiline && !self.no_multiline)
            .with_optimise(flags.optimise && !self.no_optimise)
    }
}

pub fn load_document(
    path: Option<&Path>,
    text: Option<&str>,
) -> Result<PatternDocument, DocumentError> {
    if let Some(text) = text {
        return parse_document(text);
    }

    let Some(path) = path else {
        return Err(DocumentError::Missing);
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(DocumentError::Stdin)?;
        return parse_document(&buf);
    }

    let content = fs::read_to_string(path).map_err(|error| DocumentError::Read {
        path: path.display().to_string(),
        error,
    })?;
    parse_document(&content)
}

pub fn parse_document(text: &str) -> Result<PatternDocument, DocumentError> {
    Ok(serde_json::from_str(text)?)
}
