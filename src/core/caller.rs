//! Caller resolution
//!
//! Every emission API is `#[track_caller]`, so the call site is known
//! without walking the stack. A logger with a non-zero caller skip blames a
//! frame further up instead: the stack is walked with `backtrace`, the frame
//! of the tracked call site is located, and the frame `skip` levels above it
//! is reported. Frames without file and line information are not counted.

use std::panic::Location;

/// Source position attributed to a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Caller {
    /// The call site itself
    Tracked(&'static Location<'static>),
    /// A frame found by walking the stack
    Frame { file: String, line: u32 },
}

impl Caller {
    /// Caller for `location` after skipping `skip` frames
    ///
    /// `None` when the stack carries no line information for the call site or
    /// is shallower than `skip`.
    pub fn resolve(location: &'static Location<'static>, skip: usize) -> Option<Caller> {
        if skip == 0 {
            return Some(Caller::Tracked(location));
        }

        let mut found = false;
        let mut remaining = skip;
        let mut resolved = None;

        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if resolved.is_some() {
                    return;
                }
                let (Some(file), Some(line)) = (symbol.filename(), symbol.lineno()) else {
                    return;
                };

                if !found {
                    found = line == location.line() && file.ends_with(location.file());
                    return;
                }

                remaining -= 1;
                if remaining == 0 {
                    resolved = Some(Caller::Frame {
                        file: file.to_string_lossy().into_owned(),
                        line,
                    });
                }
            });
            resolved.is_none()
        });

        resolved
    }

    pub fn file(&self) -> &str {
        match self {
            Caller::Tracked(location) => location.file(),
            Caller::Frame { file, .. } => file,
        }
    }

    pub fn line(&self) -> u32 {
        match self {
            Caller::Tracked(location) => location.line(),
            Caller::Frame { line, .. } => *line,
        }
    }
}
