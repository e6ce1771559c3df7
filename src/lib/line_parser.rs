//! Parser for `shortcuts` CLI output lines.
//!
//! With `--show-identifiers` every record line ends in a parenthesized
//! uppercase UUID, e.g. `Toggle Office Lights (24BC2356-43D8-4679-B9C3-948AC2C40E79)`.

use once_cell::sync::Lazy;
use regex::Regex;

/// A named record listed by the CLI: a shortcut or a folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Canonical uppercase UUID, treated as an opaque stable identifier.
    pub id: String,
    /// Human label; not guaranteed unique.
    pub name: String,
}

static LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+?) \(([0-9A-F]{8}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{12})\)$")
        .expect("line pattern compiles")
});

/// Parse one line of `shortcuts` output into an [`Entity`].
///
/// Returns `None` for lines that don't match the `Name (UUID)` shape; the
/// CLI prints headers and other decoration between records, so a mismatch is
/// expected and silently skipped by callers.
///
/// The lazy name capture means the *last* well-formed `(UUID)` group on the
/// line is taken as the id. A name that itself ends in such a group is
/// ambiguous and parses with the trailing id; known limitation.
pub fn parse_output_line(line: &str) -> Option<Entity> {
    let caps = LINE_REGEX.captures(line)?;
    Some(Entity {
        name: caps[1].to_string(),
        id: caps[2].to_string(),
    })
}
