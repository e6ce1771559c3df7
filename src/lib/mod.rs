//! deck-shortcuts library
//!
//! Runs macOS Shortcuts from a hardware macro deck and feeds the
//! configuration UI a folder-grouped picker of every available shortcut.

pub mod command_runner;
pub mod error;
pub mod host_protocol;
pub mod launcher_action;
pub mod line_parser;
pub mod shortcut_catalog;

// Re-export commonly used items
pub use command_runner::{CommandRunner, LineStream, ShortcutsCli, SHORTCUTS_BINARY};
pub use error::{Result, ShortcutError};
pub use host_protocol::{
    decode_inspector_request, DataSourceGroup, DataSourceItem, DataSourcePayload, Feedback,
    HostEvent, HostSurface, Indicator, InspectorRequest, LauncherSettings, FETCH_SHORTCUTS_EVENT,
};
pub use launcher_action::Launcher;
pub use line_parser::{parse_output_line, Entity};
pub use shortcut_catalog::{
    fetch_all_shortcuts, fetch_all_shortcuts_by_folder, has_shortcut, run_shortcut, Folder,
    Shortcut, NONE_FOLDER_ID, NONE_FOLDER_NAME, SHOW_IDENTIFIERS,
};
