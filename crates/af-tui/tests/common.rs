// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shared test utilities for finder tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use af_client_api::AddressService;
use af_domain_types::AddressRecord;
use af_tui::view::{DefaultComponents, ErrorBoundary, FinderView, HitTestRegistry};
use af_tui::{Components, LookupConfig, LookupError, LookupViewModel, MouseAction, Msg, RenderedLayout, Theme};
use crossbeam_channel::Receiver;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::{backend::TestBackend, Terminal};

/// A view model wired to a service, with its completion channel and a
/// record of everything the host callback and error boundary saw
pub struct Harness {
    pub vm: LookupViewModel,
    pub rx: Receiver<Msg>,
    pub selections: Arc<Mutex<Vec<AddressRecord>>>,
    pub errors: Vec<LookupError>,
    pub boundary: ErrorBoundary,
}

impl Harness {
    pub fn new(service: Arc<dyn AddressService>, config: LookupConfig) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        let selections = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&selections);
        let vm = LookupViewModel::new(config, service, tx).with_on_select(move |record| {
            sink.lock().unwrap().push(record.clone());
        });
        Self {
            vm,
            rx,
            selections,
            errors: Vec::new(),
            boundary: ErrorBoundary::new(),
        }
    }

    pub fn send(&mut self, msg: Msg) {
        let result = self.vm.update(msg);
        if let Err(err) = &result {
            self.errors.push(err.clone());
        }
        self.boundary.observe(result, self.vm.status());
    }

    pub fn press(&mut self, code: KeyCode) {
        self.send(Msg::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.press(KeyCode::Char(ch));
        }
    }

    pub fn click(&mut self, index: usize) {
        self.send(Msg::MouseClick(MouseAction::SelectCandidate(index)));
    }

    /// Move paused time forward and deliver a tick.
    pub async fn advance(&mut self, by: Duration) {
        tokio::time::advance(by).await;
        self.send(Msg::Tick);
    }

    /// Let spawned requests run for `wait`, then apply whatever completed.
    pub async fn settle(&mut self, wait: Duration) {
        tokio::time::sleep(wait).await;
        self.drain();
    }

    pub fn drain(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            self.send(msg);
        }
    }

    pub fn selection_ids(&self) -> Vec<String> {
        self.selections.lock().unwrap().iter().map(|r| r.id.clone()).collect()
    }

    pub fn result_ids(&self) -> Vec<String> {
        self.vm.results().items().iter().map(|c| c.id.clone()).collect()
    }

    pub fn render(&self, width: u16, height: u16) -> (RenderedLayout, Buffer) {
        self.render_in(width, height, None, &DefaultComponents)
    }

    /// Render into `area` (defaults to the whole screen) with `components`,
    /// painting the error boundary like the event loop does.
    pub fn render_in(
        &self,
        width: u16,
        height: u16,
        area: Option<Rect>,
        components: &dyn Components,
    ) -> (RenderedLayout, Buffer) {
        let theme = Theme::default();
        let view = FinderView {
            theme: &theme,
            components,
        };
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        let mut hits: HitTestRegistry<MouseAction> = HitTestRegistry::new();
        let mut rendered = None;
        terminal
            .draw(|frame| {
                let area = area.unwrap_or(frame.area());
                let mut layout = view.render(frame, area, &self.vm, &mut hits);
                self.boundary
                    .render(frame, area, layout.wrapper, &theme, &mut layout.elements);
                rendered = Some(layout);
            })
            .expect("draw");
        let buffer = terminal.backend().buffer().clone();
        (rendered.expect("layout"), buffer)
    }
}

pub const QUIET: Duration = Duration::from_millis(250);
pub const SHORT: Duration = Duration::from_millis(5);

pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    (area.y..area.bottom())
        .map(|y| {
            (area.x..area.right())
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

pub fn buffer_text(buffer: &Buffer) -> String {
    buffer_lines(buffer).join("\n")
}

pub fn contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x >= outer.x && inner.y >= outer.y && inner.right() <= outer.right() && inner.bottom() <= outer.bottom()
}
