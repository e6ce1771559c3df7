//! In-memory index of the shortcut library.
//!
//! Every function re-enumerates through the [`CommandRunner`]; nothing is
//! cached between calls, so each result is an independent snapshot.

use std::collections::{HashMap, HashSet};

use crate::command_runner::CommandRunner;
use crate::error::Result;
use crate::line_parser::{parse_output_line, Entity};

/// A shortcut is just a named, identified record.
pub type Shortcut = Entity;

/// Flag that makes `shortcuts list` include identifiers in its output.
pub const SHOW_IDENTIFIERS: &str = "--show-identifiers";

/// Reserved id of the synthetic folder that collects ungrouped shortcuts.
pub const NONE_FOLDER_ID: &str = "none";

/// Display name of the synthetic folder.
pub const NONE_FOLDER_NAME: &str = "All shortcuts";

/// A named group of shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub id: String,
    pub name: String,
    pub shortcuts: Vec<Shortcut>,
}

impl Folder {
    fn empty(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            shortcuts: Vec::new(),
        }
    }
}

/// Run a shortcut by its identifier, blocking until it finishes.
pub fn run_shortcut<R>(runner: &R, shortcut_id: &str) -> Result<()>
where
    R: CommandRunner + ?Sized,
{
    runner.execute(&["run", shortcut_id])
}

/// Fetch every shortcut, keyed by id.
///
/// Non-record lines in the CLI output are skipped. Should the CLI ever list
/// the same id twice, the later line wins.
pub fn fetch_all_shortcuts<R>(runner: &R) -> Result<HashMap<String, Shortcut>>
where
    R: CommandRunner + ?Sized,
{
    let mut shortcuts = HashMap::new();

    for line in runner.enumerate(&["list", SHOW_IDENTIFIERS])? {
        if let Some(shortcut) = parse_output_line(&line?) {
            shortcuts.insert(shortcut.id.clone(), shortcut);
        }
    }

    tracing::trace!("enumerated {} shortcuts", shortcuts.len());
    Ok(shortcuts)
}

/// Check whether a shortcut with the given id currently exists.
pub fn has_shortcut<R>(runner: &R, shortcut_id: &str) -> Result<bool>
where
    R: CommandRunner + ?Sized,
{
    Ok(fetch_all_shortcuts(runner)?.contains_key(shortcut_id))
}

/// Fetch all shortcuts partitioned by folder.
///
/// The synthetic [`NONE_FOLDER_ID`] folder comes first and holds every
/// shortcut no real folder claims; real folders follow in enumeration order,
/// each listing its shortcuts in enumeration order. Every shortcut the CLI
/// reports lands in exactly one folder.
pub fn fetch_all_shortcuts_by_folder<R>(runner: &R) -> Result<Vec<Folder>>
where
    R: CommandRunner + ?Sized,
{
    let mut folders = vec![Folder::empty(NONE_FOLDER_ID, NONE_FOLDER_NAME)];

    for line in runner.enumerate(&["list", "--folders", SHOW_IDENTIFIERS])? {
        let Some(entity) = parse_output_line(&line?) else {
            continue;
        };
        // The reserved bucket id must never be shadowed by a real folder,
        // and a repeated folder id keeps its first record.
        if entity.id == NONE_FOLDER_ID || folders.iter().any(|f| f.id == entity.id) {
            continue;
        }
        folders.push(Folder::empty(&entity.id, &entity.name));
    }

    // Fill the real folders, remembering which shortcut ids they claim.
    let mut claimed: HashSet<String> = HashSet::new();
    for folder in folders.iter_mut().skip(1) {
        let stream =
            runner.enumerate(&["list", "--folder-name", folder.name.as_str(), SHOW_IDENTIFIERS])?;
        for line in stream {
            if let Some(shortcut) = parse_output_line(&line?) {
                claimed.insert(shortcut.id.clone());
                folder.shortcuts.push(shortcut);
            }
        }
    }

    // Everything the full enumeration reports that no folder claimed belongs
    // to the synthetic folder, in enumeration order.
    for line in runner.enumerate(&["list", SHOW_IDENTIFIERS])? {
        if let Some(shortcut) = parse_output_line(&line?) {
            if claimed.insert(shortcut.id.clone()) {
                folders[0].shortcuts.push(shortcut);
            }
        }
    }

    tracing::trace!("partitioned shortcuts into {} folders", folders.len());
    Ok(folders)
}
