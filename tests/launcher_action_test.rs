//! Integration tests for the launcher action: indicator behavior, execution,
//! and picker data requests, observed through a recording host surface.

use std::cell::RefCell;
use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use serde_json::json;

use deck_shortcuts::{
    CommandRunner, DataSourceGroup, DataSourceItem, DataSourcePayload, HostSurface, Indicator,
    Launcher, LauncherSettings, LineStream, Result, ShortcutError, FETCH_SHORTCUTS_EVENT,
    NONE_FOLDER_NAME, SHORTCUTS_BINARY,
};

const LIGHTS_ID: &str = "24BC2356-43D8-4679-B9C3-948AC2C40E79";
const MUSIC_ID: &str = "CCCCCCCC-1111-4111-8111-111111111111";
const HOME_FOLDER_ID: &str = "AAAAAAAA-2222-4222-8222-222222222222";

fn to_strings(strs: &[&str]) -> Vec<String> {
    strs.iter().map(|s| s.to_string()).collect()
}

fn settings(id: &str) -> LauncherSettings {
    LauncherSettings {
        shortcut_id: Some(id.to_string()),
    }
}

/// Records what the host would have seen.
#[derive(Default)]
struct RecordingSurface {
    indicators: Vec<Indicator>,
    payloads: Vec<DataSourcePayload>,
}

impl HostSurface for RecordingSurface {
    fn show_indicator(&mut self, indicator: Indicator) {
        self.indicators.push(indicator);
    }

    fn send_to_property_inspector(&mut self, payload: &DataSourcePayload) {
        self.payloads.push(payload.clone());
    }
}

/// Scripted library with switchable failure modes.
#[derive(Default)]
struct ScriptedCli {
    all_shortcuts: Vec<String>,
    folders: Vec<String>,
    folder_contents: Vec<(String, Vec<String>)>,
    enumerate_fails: bool,
    execute_fails: bool,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedCli {
    fn with_lights_and_music() -> Self {
        Self {
            all_shortcuts: vec![
                format!("Lights ({})", LIGHTS_ID),
                format!("Music ({})", MUSIC_ID),
            ],
            folders: vec![format!("Home ({})", HOME_FOLDER_ID)],
            folder_contents: vec![("Home".to_string(), vec![format!("Lights ({})", LIGHTS_ID)])],
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedCli {
    fn enumerate(&self, args: &[&str]) -> Result<LineStream> {
        self.calls.borrow_mut().push(to_strings(args));
        if self.enumerate_fails {
            return Err(ShortcutError::Spawn {
                program: SHORTCUTS_BINARY.to_string(),
                source: io::Error::other("no such file"),
            });
        }

        let lines = match args {
            &["list", "--show-identifiers"] => self.all_shortcuts.clone(),
            &["list", "--folders", "--show-identifiers"] => self.folders.clone(),
            &["list", "--folder-name", name, "--show-identifiers"] => self
                .folder_contents
                .iter()
                .find(|(folder, _)| folder == name)
                .map(|(_, lines)| lines.clone())
                .unwrap_or_default(),
            other => panic!("unexpected enumeration arguments: {:?}", other),
        };
        Ok(LineStream::from_lines(lines))
    }

    fn execute(&self, args: &[&str]) -> Result<()> {
        self.calls.borrow_mut().push(to_strings(args));
        if self.execute_fails {
            Err(ShortcutError::Execution {
                status: ExitStatus::from_raw(1 << 8),
            })
        } else {
            Ok(())
        }
    }
}

mod will_appear_tests {
    use super::*;

    #[test]
    fn test_unconfigured_key_stays_quiet() {
        let cli = ScriptedCli::with_lights_and_music();
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_will_appear(&LauncherSettings::default(), &mut host);

        assert!(host.indicators.is_empty());
        assert!(cli.calls().is_empty());
    }

    #[test]
    fn test_live_shortcut_shows_nothing() {
        let cli = ScriptedCli::with_lights_and_music();
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_will_appear(&settings(LIGHTS_ID), &mut host);

        assert!(host.indicators.is_empty());
    }

    #[test]
    fn test_stale_shortcut_alerts() {
        let cli = ScriptedCli::with_lights_and_music();
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_will_appear(&settings("00000000-0000-4000-8000-000000000000"), &mut host);

        assert_eq!(host.indicators, vec![Indicator::Alert]);
        // the check never runs anything
        assert!(cli.calls().iter().all(|call| call[0] != "run"));
    }

    #[test]
    fn test_failed_check_alerts_without_panicking() {
        let cli = ScriptedCli {
            enumerate_fails: true,
            ..ScriptedCli::default()
        };
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_will_appear(&settings(LIGHTS_ID), &mut host);

        assert_eq!(host.indicators, vec![Indicator::Alert]);
    }
}

mod key_down_tests {
    use super::*;

    #[test]
    fn test_unconfigured_key_alerts_and_spawns_nothing() {
        let cli = ScriptedCli::with_lights_and_music();
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_key_down(&LauncherSettings::default(), &mut host);

        assert_eq!(host.indicators, vec![Indicator::Alert]);
        assert!(cli.calls().is_empty());
    }

    #[test]
    fn test_empty_id_counts_as_unconfigured() {
        let cli = ScriptedCli::with_lights_and_music();
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_key_down(&settings(""), &mut host);

        assert_eq!(host.indicators, vec![Indicator::Alert]);
        assert!(cli.calls().is_empty());
    }

    #[test]
    fn test_successful_run_shows_ok() {
        let cli = ScriptedCli::with_lights_and_music();
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_key_down(&settings(LIGHTS_ID), &mut host);

        assert_eq!(host.indicators, vec![Indicator::Ok]);
        assert!(cli.calls().contains(&to_strings(&["run", LIGHTS_ID])));
    }

    #[test]
    fn test_failing_run_alerts_and_returns_normally() {
        let cli = ScriptedCli {
            execute_fails: true,
            ..ScriptedCli::with_lights_and_music()
        };
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_key_down(&settings(LIGHTS_ID), &mut host);

        assert_eq!(host.indicators, vec![Indicator::Alert]);
    }

    #[test]
    fn test_stale_shortcut_alerts_but_still_runs() {
        let cli = ScriptedCli::with_lights_and_music();
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();
        let stale = "00000000-0000-4000-8000-000000000000";

        launcher.on_key_down(&settings(stale), &mut host);

        assert_eq!(host.indicators, vec![Indicator::Alert, Indicator::Ok]);
        assert!(cli.calls().contains(&to_strings(&["run", stale])));
    }

    #[test]
    fn test_failed_check_alerts_but_still_runs() {
        let cli = ScriptedCli {
            enumerate_fails: true,
            ..ScriptedCli::with_lights_and_music()
        };
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_key_down(&settings(LIGHTS_ID), &mut host);

        assert_eq!(host.indicators, vec![Indicator::Alert, Indicator::Ok]);
        assert!(cli.calls().contains(&to_strings(&["run", LIGHTS_ID])));
    }
}

mod data_request_tests {
    use super::*;

    #[test]
    fn test_fetch_request_returns_grouped_payload() {
        let cli = ScriptedCli::with_lights_and_music();
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_send_to_plugin(&json!({ "event": FETCH_SHORTCUTS_EVENT }), &mut host);

        assert!(host.indicators.is_empty());
        assert_eq!(
            host.payloads,
            vec![DataSourcePayload {
                event: FETCH_SHORTCUTS_EVENT.to_string(),
                items: vec![
                    DataSourceGroup {
                        label: NONE_FOLDER_NAME.to_string(),
                        children: vec![DataSourceItem {
                            label: "Music".to_string(),
                            value: MUSIC_ID.to_string(),
                        }],
                    },
                    DataSourceGroup {
                        label: "Home".to_string(),
                        children: vec![DataSourceItem {
                            label: "Lights".to_string(),
                            value: LIGHTS_ID.to_string(),
                        }],
                    },
                ],
            }]
        );
    }

    #[test]
    fn test_unrecognized_payloads_are_ignored() {
        let cli = ScriptedCli::with_lights_and_music();
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_send_to_plugin(&json!({ "event": "somethingElse" }), &mut host);
        launcher.on_send_to_plugin(&json!({ "settings": {} }), &mut host);
        launcher.on_send_to_plugin(&json!(42), &mut host);

        assert!(host.indicators.is_empty());
        assert!(host.payloads.is_empty());
        assert!(cli.calls().is_empty());
    }

    #[test]
    fn test_enumeration_failure_degrades_to_alert() {
        let cli = ScriptedCli {
            enumerate_fails: true,
            ..ScriptedCli::default()
        };
        let launcher = Launcher::new(&cli);
        let mut host = RecordingSurface::default();

        launcher.on_send_to_plugin(&json!({ "event": FETCH_SHORTCUTS_EVENT }), &mut host);

        assert_eq!(host.indicators, vec![Indicator::Alert]);
        assert!(host.payloads.is_empty());
    }
}
