// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Query text, caret and the debounce deadline

use std::time::Duration;

use tokio::time::Instant;

/// Effect of a text edit on the pending search trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputChange {
    /// Text is non-empty and a trigger is scheduled
    Scheduled,
    /// Text became empty; any pending trigger was cancelled
    Cleared,
}

/// Single-line query input with a quiet-interval trigger
///
/// The caret is a char index. Only edits reschedule the trigger; caret
/// movement does not.
#[derive(Debug, Clone)]
pub struct DebouncedInput {
    text: String,
    cursor: usize,
    interval: Duration,
    deadline: Option<Instant>,
}

impl DebouncedInput {
    pub fn new(interval: Duration) -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            interval,
            deadline: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Replace the whole text, placing the caret at the end.
    pub fn on_change(&mut self, text: impl Into<String>, now: Instant) -> InputChange {
        self.text = text.into();
        self.cursor = self.char_len();
        self.reschedule(now)
    }

    pub fn insert_char(&mut self, ch: char, now: Instant) -> InputChange {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
        self.reschedule(now)
    }

    pub fn insert_str(&mut self, s: &str, now: Instant) -> InputChange {
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, s);
        self.cursor += s.chars().count();
        self.reschedule(now)
    }

    /// Delete the char before the caret. `None` when there was nothing to delete.
    pub fn backspace(&mut self, now: Instant) -> Option<InputChange> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
        Some(self.reschedule(now))
    }

    /// Delete the char under the caret. `None` at the end of the text.
    pub fn delete(&mut self, now: Instant) -> Option<InputChange> {
        if self.cursor >= self.char_len() {
            return None;
        }
        let at = self.byte_offset(self.cursor);
        self.text.remove(at);
        Some(self.reschedule(now))
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Returns true once when the deadline has passed, consuming it.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Empty the text and drop any pending trigger.
    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
        self.deadline = None;
    }

    fn reschedule(&mut self, now: Instant) -> InputChange {
        if self.text.is_empty() {
            self.deadline = None;
            InputChange::Cleared
        } else {
            self.deadline = Some(now + self.interval);
            InputChange::Scheduled
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.text.len())
    }
}
