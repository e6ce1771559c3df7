//! The launcher key: appear-time validation, key-press execution, and
//! picker data requests.

use serde_json::Value;

use crate::command_runner::CommandRunner;
use crate::host_protocol::{
    decode_inspector_request, DataSourceGroup, DataSourceItem, DataSourcePayload, HostSurface,
    Indicator, InspectorRequest, LauncherSettings, FETCH_SHORTCUTS_EVENT,
};
use crate::shortcut_catalog::{fetch_all_shortcuts_by_folder, has_shortcut, run_shortcut};

/// Reacts to host events for one launcher key.
///
/// This is the error boundary: every failure from the catalog or the runner
/// resolves to an [`Indicator`] plus a log line, and never reaches the host.
pub struct Launcher<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> Launcher<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// The key appeared on the deck. A configured id that no longer exists
    /// (or can't be checked) flags the key; nothing is executed, and an
    /// unconfigured key stays quiet.
    pub fn on_will_appear(&self, settings: &LauncherSettings, host: &mut dyn HostSurface) {
        let Some(shortcut_id) = configured_id(settings) else {
            return;
        };

        if !self.validate_shortcut(shortcut_id) {
            host.show_indicator(Indicator::Alert);
        }
    }

    /// The key was pressed: run the configured shortcut.
    pub fn on_key_down(&self, settings: &LauncherSettings, host: &mut dyn HostSurface) {
        let Some(shortcut_id) = configured_id(settings) else {
            tracing::trace!("key pressed with no shortcut configured");
            host.show_indicator(Indicator::Alert);
            return;
        };

        // A stale id flags the key but never blocks the attempt; the run
        // has its own failure path.
        if !self.validate_shortcut(shortcut_id) {
            host.show_indicator(Indicator::Alert);
        }

        match run_shortcut(&self.runner, shortcut_id) {
            Ok(()) => {
                tracing::trace!("shortcut {} finished", shortcut_id);
                host.show_indicator(Indicator::Ok);
            }
            Err(err) => {
                tracing::error!("shortcut {} failed: {}", shortcut_id, err);
                host.show_indicator(Indicator::Alert);
            }
        }
    }

    /// The property inspector sent a payload. Only the fetch-by-folder
    /// request is acted on; anything else is ignored without complaint.
    pub fn on_send_to_plugin(&self, payload: &Value, host: &mut dyn HostSurface) {
        match decode_inspector_request(payload) {
            Some(InspectorRequest::FetchAllShortcutsByFolder) => {}
            None => return,
        }

        match fetch_all_shortcuts_by_folder(&self.runner) {
            Ok(folders) => {
                let items = folders
                    .into_iter()
                    .map(|folder| DataSourceGroup {
                        label: folder.name,
                        children: folder
                            .shortcuts
                            .into_iter()
                            .map(|shortcut| DataSourceItem {
                                label: shortcut.name,
                                value: shortcut.id,
                            })
                            .collect(),
                    })
                    .collect();

                host.send_to_property_inspector(&DataSourcePayload {
                    event: FETCH_SHORTCUTS_EVENT.to_string(),
                    items,
                });
            }
            Err(err) => {
                tracing::error!("enumerating shortcuts for the picker failed: {}", err);
                host.show_indicator(Indicator::Alert);
            }
        }
    }

    /// Best-effort existence check; a check that itself fails counts as
    /// missing.
    fn validate_shortcut(&self, shortcut_id: &str) -> bool {
        tracing::trace!("checking if shortcut {} exists", shortcut_id);
        match has_shortcut(&self.runner, shortcut_id) {
            Ok(true) => {
                tracing::trace!("shortcut {} ok", shortcut_id);
                true
            }
            Ok(false) => {
                tracing::trace!("shortcut {} missing", shortcut_id);
                false
            }
            Err(err) => {
                tracing::error!("existence check for {} failed: {}", shortcut_id, err);
                false
            }
        }
    }
}

fn configured_id(settings: &LauncherSettings) -> Option<&str> {
    settings.shortcut_id.as_deref().filter(|id| !id.is_empty())
}
