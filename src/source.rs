//! Source locations attached to cells and nets, and their resolution to a
//! file and line for the editor.
//!
//! Accepted forms:
//!
//! - `file:line` and `file:line.column` (the column is ignored)
//! - `primary|fallback`, where `fallback` is used when the primary line is `0`
//!   or the primary part does not parse
//!
//! The line is split off at the last `:` so paths containing colons (drive
//! letters) survive.

use camino::Utf8PathBuf;

use crate::error::SourceLocationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Utf8PathBuf,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<Utf8PathBuf>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    pub fn parse(s: &str) -> Result<Self, SourceLocationError> {
        let s = s.trim();
        let (primary, fallback) = match s.split_once('|') {
            Some((a, b)) => (a, Some(b)),
            None => (s, None),
        };
        match (parse_single(primary), fallback) {
            (Ok(loc), Some(fb)) if loc.line == 0 => Ok(parse_single(fb).unwrap_or(loc)),
            (Err(err), Some(fb)) => parse_single(fb).map_err(|_| err),
            (res, _) => res,
        }
    }
}

fn parse_single(s: &str) -> Result<SourceLocation, SourceLocationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(SourceLocationError::Empty);
    }
    let (file, rest) = s
        .rsplit_once(':')
        .ok_or_else(|| SourceLocationError::MissingLine(s.to_string()))?;
    if file.is_empty() {
        return Err(SourceLocationError::MissingLine(s.to_string()));
    }
    let digits: String = rest.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    let line = digits
        .parse::<u32>()
        .map_err(|_| SourceLocationError::InvalidLine(s.to_string()))?;
    Ok(SourceLocation::new(file, line))
}

/// Maps a line in generated code back to the original source file.
pub trait LineRemapper {
    /// `Some` when the location could be remapped.
    fn remap(&self, location: &SourceLocation) -> Option<SourceLocation>;
}

/// Parse `s` and let `remapper` override the result when it succeeds.
pub fn resolve_source(
    s: &str,
    remapper: Option<&dyn LineRemapper>,
) -> Result<SourceLocation, SourceLocationError> {
    let naive = SourceLocation::parse(s)?;
    Ok(remapper.and_then(|r| r.remap(&naive)).unwrap_or(naive))
}
