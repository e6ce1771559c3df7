//! deck-shortcuts plugin binary
//!
//! Bridges the plugin host to the launcher over line-oriented JSON stdio:
//! every stdin line is one host event, every stdout line is one feedback
//! message. Diagnostics go to stderr so they never mix with the feedback
//! channel.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use deck_shortcuts::{
    DataSourcePayload, Feedback, HostEvent, HostSurface, Indicator, Launcher, ShortcutsCli,
};

/// Writes feedback as JSON lines on stdout.
struct StdioSurface<W: Write> {
    out: W,
}

impl<W: Write> StdioSurface<W> {
    fn new(out: W) -> Self {
        Self { out }
    }

    fn emit(&mut self, feedback: &Feedback) {
        match serde_json::to_string(feedback) {
            Ok(line) => {
                if let Err(err) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
                    tracing::error!("writing feedback to the host failed: {}", err);
                }
            }
            Err(err) => tracing::error!("encoding feedback failed: {}", err),
        }
    }
}

impl<W: Write> HostSurface for StdioSurface<W> {
    fn show_indicator(&mut self, indicator: Indicator) {
        match indicator {
            Indicator::Ok => self.emit(&Feedback::ShowOk),
            Indicator::Alert => self.emit(&Feedback::ShowAlert),
        }
    }

    fn send_to_property_inspector(&mut self, payload: &DataSourcePayload) {
        self.emit(&Feedback::SendToPropertyInspector { payload });
    }
}

fn main() -> anyhow::Result<()> {
    // Record everything between the host and the plugin by default; the
    // filter can be tightened via RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("deck_shortcuts=trace")),
        )
        .with_writer(io::stderr)
        .init();

    tracing::trace!("booting");

    let launcher = Launcher::new(ShortcutsCli);
    let mut surface = StdioSurface::new(io::stdout().lock());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading host event")?;
        if line.trim().is_empty() {
            continue;
        }

        let event: HostEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(err) => {
                // The host may speak events this plugin doesn't know about.
                tracing::trace!("ignoring undecodable host event: {}", err);
                continue;
            }
        };

        tracing::trace!("host event: {:?}", event);
        match event {
            HostEvent::WillAppear { settings } => launcher.on_will_appear(&settings, &mut surface),
            HostEvent::KeyDown { settings } => launcher.on_key_down(&settings, &mut surface),
            HostEvent::SendToPlugin { payload } => {
                launcher.on_send_to_plugin(&payload, &mut surface)
            }
        }
    }

    tracing::trace!("host closed the event stream, shutting down");
    Ok(())
}
