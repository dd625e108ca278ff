// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Catches errors returned by the controller and paints a fallback notice

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::error;

use super::elements::{ElementRegistry, ERROR_NOTIFICATION_ID};
use crate::error::LookupError;
use crate::theme::Theme;
use crate::view_model::ResultStatus;

#[derive(Debug, Default)]
pub struct ErrorBoundary {
    caught: Option<LookupError>,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of an update. The notice stays up while the
    /// controller remains in its error state.
    pub fn observe(&mut self, result: Result<(), LookupError>, status: ResultStatus) {
        if let Err(err) = result {
            error!(error = %err, "address finder error");
            self.caught = Some(err);
        } else if status != ResultStatus::Error {
            self.caught = None;
        }
    }

    pub fn caught(&self) -> Option<&LookupError> {
        self.caught.as_ref()
    }

    pub fn reset(&mut self) {
        self.caught = None;
    }

    /// Paint the notice on the row under `anchor`, or on the last row of
    /// `area` when there is no room below.
    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        anchor: Rect,
        theme: &Theme,
        elements: &mut ElementRegistry,
    ) {
        let Some(err) = &self.caught else {
            return;
        };
        if area.is_empty() {
            return;
        }
        let y = if anchor.bottom() < area.bottom() {
            anchor.bottom()
        } else {
            area.bottom() - 1
        };
        let rect = Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        };

        let line = Line::from(vec![
            Span::styled("✗ ", theme.error_style()),
            Span::styled(err.user_message(), theme.error_style()),
        ]);
        frame.render_widget(Paragraph::new(line), rect);
        elements.register(ERROR_NOTIFICATION_ID, rect);
    }
}
