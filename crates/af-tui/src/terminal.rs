// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Terminal mode switching for the finder
//!
//! [`TerminalGuard`] switches the requested modes on and restores exactly the
//! ones that took effect when dropped. The same restore runs from the signal
//! handler and the panic hook, and only the first caller does any work.

use std::io;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use tracing::warn;

/// Modes currently switched on, `None` once restored
static ACTIVE: Mutex<Option<TerminalModes>> = Mutex::new(None);

/// Terminal modes the finder can switch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalModes {
    pub raw: bool,
    pub alternate_screen: bool,
    /// Clicks on candidates and click-away detection
    pub mouse: bool,
    pub bracketed_paste: bool,
}

impl Default for TerminalModes {
    fn default() -> Self {
        Self {
            raw: true,
            alternate_screen: true,
            mouse: true,
            bracketed_paste: true,
        }
    }
}

impl TerminalModes {
    const NONE: Self = Self {
        raw: false,
        alternate_screen: false,
        mouse: false,
        bracketed_paste: false,
    };
}

/// Restores the terminal when dropped
#[derive(Debug)]
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Switch on `modes` and arrange for `running` to be cleared on SIGINT
    /// or SIGTERM.
    pub fn enter(modes: TerminalModes, running: Arc<AtomicBool>) -> io::Result<Self> {
        let guard = Self { _private: () };
        let mut stdout = io::stdout();
        let mut enabled = TerminalModes::NONE;
        record(enabled);

        if modes.raw {
            enable_raw_mode()?;
            enabled.raw = true;
            record(enabled);
        }
        if modes.alternate_screen {
            stdout.execute(EnterAlternateScreen)?;
            enabled.alternate_screen = true;
            record(enabled);
        }
        if modes.mouse {
            stdout.execute(EnableMouseCapture)?;
            enabled.mouse = true;
            record(enabled);
        }
        if modes.bracketed_paste {
            stdout.execute(EnableBracketedPaste)?;
            enabled.bracketed_paste = true;
            record(enabled);
        }

        if let Err(err) = ctrlc::set_handler(move || {
            restore();
            running.store(false, Ordering::SeqCst);
        }) {
            // Only one handler per process; a second finder run keeps the first.
            warn!(error = %err, "signal handler not installed");
        }

        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            restore();
            previous(info);
        }));

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

fn record(modes: TerminalModes) {
    if let Ok(mut active) = ACTIVE.lock() {
        *active = Some(modes);
    }
}

/// Undo whatever [`TerminalGuard::enter`] switched on. Later calls are no-ops.
pub fn restore() {
    let Some(modes) = ACTIVE.lock().ok().and_then(|mut active| active.take()) else {
        return;
    };
    let mut stdout = io::stdout();

    if modes.bracketed_paste {
        let _ = stdout.execute(DisableBracketedPaste);
    }
    if modes.mouse {
        let _ = stdout.execute(DisableMouseCapture);
    }
    if modes.raw {
        let _ = disable_raw_mode();
    }
    if modes.alternate_screen {
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}
