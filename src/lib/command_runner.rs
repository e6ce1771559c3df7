//! Process boundary around the external `shortcuts` CLI.
//!
//! Every query spawns a fresh process; nothing is cached or shared between
//! calls. The [`CommandRunner`] trait is the seam that lets the catalog and
//! the launcher action run against canned output in tests.

use std::io::{BufRead, BufReader, Lines};
use std::process::{Child, ChildStdout, Command, Stdio};

use crate::error::{Result, ShortcutError};

/// Name of the external automation CLI.
pub const SHORTCUTS_BINARY: &str = "shortcuts";

/// Spawns enumeration and execution commands.
///
/// Implementations must hand each argument to the OS as a single argv
/// element — never interpolated into a shell string — so folder names with
/// shell-special characters cannot inject arguments.
pub trait CommandRunner {
    /// Spawn an enumeration command and stream its stdout one line at a
    /// time. The stream is finite and not restartable; a new call spawns a
    /// new process.
    fn enumerate(&self, args: &[&str]) -> Result<LineStream>;

    /// Run an execution command and block until it exits. A non-zero exit
    /// status or spawn failure is an error.
    fn execute(&self, args: &[&str]) -> Result<()>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn enumerate(&self, args: &[&str]) -> Result<LineStream> {
        (**self).enumerate(args)
    }

    fn execute(&self, args: &[&str]) -> Result<()> {
        (**self).execute(args)
    }
}

/// Lazy, finite sequence of output lines from one enumeration command.
///
/// Lines become available as the child produces them; callers never wait for
/// the process to exit before seeing the first record. Once stdout is
/// exhausted the child is reaped, and an abnormal exit surfaces as a final
/// `Err` item.
pub struct LineStream {
    inner: Box<dyn Iterator<Item = Result<String>> + Send>,
}

impl LineStream {
    /// Wrap an already-materialized sequence of lines. Used by fake runners.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: Send + 'static,
    {
        Self {
            inner: Box::new(lines.into_iter().map(Ok)),
        }
    }

    /// Wrap a fallible line source, e.g. to fake a mid-stream failure.
    pub fn from_results<I>(results: I) -> Self
    where
        I: IntoIterator<Item = Result<String>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            inner: Box::new(results.into_iter()),
        }
    }
}

impl Iterator for LineStream {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

/// Streams a spawned child's stdout, then checks its exit status.
struct ChildLines {
    child: Option<Child>,
    lines: Option<Lines<BufReader<ChildStdout>>>,
}

impl Iterator for ChildLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(lines) = self.lines.as_mut() {
            match lines.next() {
                Some(Ok(line)) => {
                    tracing::trace!("{} output: {}", SHORTCUTS_BINARY, line);
                    return Some(Ok(line));
                }
                Some(Err(err)) => return Some(Err(err.into())),
                None => self.lines = None,
            }
        }

        // Stdout is drained; reap the child exactly once. Subsequent calls
        // keep returning None.
        let mut child = self.child.take()?;
        match child.wait() {
            Ok(status) if status.success() => None,
            Ok(status) => {
                tracing::error!("enumeration command exited with {}", status);
                Some(Err(ShortcutError::Enumeration { status }))
            }
            Err(err) => Some(Err(err.into())),
        }
    }
}

/// Live runner backed by the `shortcuts` binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutsCli;

impl CommandRunner for ShortcutsCli {
    fn enumerate(&self, args: &[&str]) -> Result<LineStream> {
        tracing::trace!("spawning {} {:?}", SHORTCUTS_BINARY, args);
        let mut child = Command::new(SHORTCUTS_BINARY)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ShortcutError::Spawn {
                program: SHORTCUTS_BINARY.to_string(),
                source,
            })?;

        let lines = child.stdout.take().map(|out| BufReader::new(out).lines());
        Ok(LineStream {
            inner: Box::new(ChildLines {
                child: Some(child),
                lines,
            }),
        })
    }

    fn execute(&self, args: &[&str]) -> Result<()> {
        tracing::trace!("spawning {} {:?}", SHORTCUTS_BINARY, args);
        let status = Command::new(SHORTCUTS_BINARY)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| ShortcutError::Spawn {
                program: SHORTCUTS_BINARY.to_string(),
                source,
            })?;

        if status.success() {
            tracing::trace!("{} {:?} finished", SHORTCUTS_BINARY, args);
            Ok(())
        } else {
            tracing::error!("{} {:?} exited with {}", SHORTCUTS_BINARY, args, status);
            Err(ShortcutError::Execution { status })
        }
    }
}
