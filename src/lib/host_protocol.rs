//! Typed edge between the launcher and its plugin host.
//!
//! The host transport itself (how events arrive and feedback leaves) is not
//! this crate's business; the binary wires a line-oriented JSON adapter over
//! stdio. This module only defines the shapes both sides agree on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event tag the property inspector uses to request the shortcut list.
pub const FETCH_SHORTCUTS_EVENT: &str = "fetchAllShortcutsByFolder";

/// Settings the host persists for one launcher key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherSettings {
    /// Unset until the user picks a shortcut in the property inspector.
    #[serde(
        rename = "shortcutID",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub shortcut_id: Option<String>,
}

/// One event delivered by the host.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum HostEvent {
    /// The key became visible on the deck.
    WillAppear {
        #[serde(default)]
        settings: LauncherSettings,
    },
    /// The key was pressed.
    KeyDown {
        #[serde(default)]
        settings: LauncherSettings,
    },
    /// The property inspector sent an arbitrary payload.
    SendToPlugin {
        #[serde(default)]
        payload: Value,
    },
}

/// Property-inspector requests this plugin understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "event")]
pub enum InspectorRequest {
    #[serde(rename = "fetchAllShortcutsByFolder")]
    FetchAllShortcutsByFolder,
}

/// Decode an inspector payload into a recognized request.
///
/// Payloads with a different or missing `event` tag yield `None` and are
/// ignored by the caller; an unknown request is not an error.
pub fn decode_inspector_request(payload: &Value) -> Option<InspectorRequest> {
    InspectorRequest::deserialize(payload).ok()
}

/// Two-level data source for the picker UI: folder groups with shortcut
/// leaves. `value` is always the shortcut id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourcePayload {
    pub event: String,
    pub items: Vec<DataSourceGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceGroup {
    pub label: String,
    pub children: Vec<DataSourceItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataSourceItem {
    pub label: String,
    pub value: String,
}

/// Host-visible feedback on the physical key. The only two signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Ok,
    Alert,
}

/// Feedback channel back to the host.
///
/// The real transport lives in the binary; tests substitute a recorder to
/// observe what the host would have seen.
pub trait HostSurface {
    /// Flash a success or failure indicator on the key.
    fn show_indicator(&mut self, indicator: Indicator);

    /// Deliver a payload to the property inspector that asked for it.
    fn send_to_property_inspector(&mut self, payload: &DataSourcePayload);
}

/// Wire envelope for everything the plugin writes back to the host.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum Feedback<'a> {
    ShowOk,
    ShowAlert,
    SendToPropertyInspector { payload: &'a DataSourcePayload },
}
