// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! The incremental-search controller
//!
//! Keystrokes edit the query and push a debounce deadline back. When the
//! deadline passes on a tick, a lookup is issued through the search session
//! and run on the Tokio runtime; its completion comes back as
//! [`Msg::LookupCompleted`] and is applied only if the sequence gate admits
//! it. Activating a candidate either refines into a container or retrieves the
//! record and hands it to the host callback.

use std::sync::Arc;

use af_client_api::{AddressService, ClientApiResult, LookupParams};
use af_domain_types::{AddressRecord, Candidate, ContainerContext, SearchRequest, SequenceNumber};
use crossbeam_channel::Sender as UiSender;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::runtime::Handle;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::debounced_input::{DebouncedInput, InputChange};
use super::result_set::{ResultSet, ResultStatus};
use super::search_session::{LookupSettlement, SearchSession};
use super::selection::{Dispatch, ResolveSettlement, SelectionDispatcher};
use super::{MouseAction, Msg};
use crate::error::LookupError;
use crate::lookup_config::{ClickAwayPolicy, LookupConfig};

pub struct LookupViewModel {
    config: LookupConfig,
    service: Arc<dyn AddressService>,
    ui_tx: UiSender<Msg>,

    input: DebouncedInput,
    session: SearchSession,
    results: ResultSet,
    dispatcher: SelectionDispatcher,
    /// Scope of refinement searches; kept across keystrokes until the search
    /// is cleared, dismissed or completed
    container: Option<ContainerContext>,

    pub needs_redraw: bool,
    exit_requested: bool,
}

impl LookupViewModel {
    pub fn new(config: LookupConfig, service: Arc<dyn AddressService>, ui_tx: UiSender<Msg>) -> Self {
        Self {
            input: DebouncedInput::new(config.debounce()),
            session: SearchSession::new(&config),
            results: ResultSet::new(),
            dispatcher: SelectionDispatcher::new(),
            container: None,
            needs_redraw: true,
            exit_requested: false,
            config,
            service,
            ui_tx,
        }
    }

    /// Register the host callback run once per completed selection
    pub fn with_on_select(mut self, on_select: impl FnMut(&AddressRecord) + Send + 'static) -> Self {
        self.set_on_select(on_select);
        self
    }

    pub fn set_on_select(&mut self, on_select: impl FnMut(&AddressRecord) + Send + 'static) {
        self.dispatcher.set_on_select(Box::new(on_select));
    }

    /// Apply one message. `Err` is returned exactly once for each failure of
    /// the current request; the controller stays usable afterwards.
    pub fn update(&mut self, msg: Msg) -> Result<(), LookupError> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::Paste(text) => {
                let line = text.replace(['\r', '\n'], " ");
                if !line.is_empty() {
                    let change = self.input.insert_str(&line, Instant::now());
                    self.after_edit(change);
                }
                Ok(())
            }
            Msg::MouseClick(action) => match action {
                MouseAction::SelectCandidate(index) => self.select_index(index),
                MouseAction::FocusInput => {
                    self.input.move_end();
                    self.needs_redraw = true;
                    Ok(())
                }
            },
            Msg::MouseHover(MouseAction::SelectCandidate(index)) => {
                if self.results.highlighted() != Some(index) && self.results.highlight_index(index) {
                    self.needs_redraw = true;
                }
                Ok(())
            }
            Msg::MouseHover(MouseAction::FocusInput) => Ok(()),
            Msg::MouseScrollUp => {
                self.results.highlight_previous();
                self.needs_redraw = true;
                Ok(())
            }
            Msg::MouseScrollDown => {
                self.results.highlight_next();
                self.needs_redraw = true;
                Ok(())
            }
            Msg::PointerOutside => {
                if self.config.click_away == ClickAwayPolicy::Dismiss && self.is_list_open() {
                    self.dismiss();
                }
                Ok(())
            }
            Msg::Tick => self.on_tick(),
            Msg::LookupCompleted {
                sequence,
                query,
                result,
            } => self.apply_lookup(sequence, query, result),
            Msg::ResolveCompleted {
                sequence,
                candidate_id,
                result,
            } => self.apply_resolve(sequence, candidate_id, result),
        }
    }

    /// Replace the query text as a host would, scheduling a search.
    pub fn on_change(&mut self, text: impl Into<String>) {
        let change = self.input.on_change(text, Instant::now());
        self.after_edit(change);
    }

    /// Fire the debounced search once its quiet interval has passed.
    pub fn on_tick(&mut self) -> Result<(), LookupError> {
        if self.input.poll(Instant::now()) {
            self.trigger_search()?;
        }
        Ok(())
    }

    /// Activate the candidate at `index` as if it was clicked.
    pub fn select_index(&mut self, index: usize) -> Result<(), LookupError> {
        let Some(candidate) = self.results.get(index).cloned() else {
            return Ok(());
        };
        self.results.highlight_index(index);
        self.select(&candidate)
    }

    /// Activate the highlighted candidate; nothing happens without one.
    pub fn select_highlighted(&mut self) -> Result<(), LookupError> {
        match self.results.active_candidate().cloned() {
            Some(candidate) => self.select(&candidate),
            None => Ok(()),
        }
    }

    /// Close the list and leave the query as typed.
    pub fn dismiss(&mut self) {
        self.reset_search();
        self.needs_redraw = true;
    }

    // Accessors

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn query(&self) -> &str {
        self.input.text()
    }

    pub fn cursor(&self) -> usize {
        self.input.cursor()
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn status(&self) -> ResultStatus {
        self.results.status()
    }

    pub fn container(&self) -> Option<&ContainerContext> {
        self.container.as_ref()
    }

    pub fn is_resolving(&self) -> bool {
        self.dispatcher.is_resolving()
    }

    pub fn is_search_pending(&self) -> bool {
        self.input.is_pending()
    }

    /// The list is shown while it has rows to show.
    pub fn is_list_open(&self) -> bool {
        !self.results.is_empty() && matches!(self.results.status(), ResultStatus::Ready | ResultStatus::Loading)
    }

    pub fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }

    // Private helper methods

    fn handle_key(&mut self, key: KeyEvent) -> Result<(), LookupError> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }
        let now = Instant::now();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.exit_requested = true,
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
                self.after_edit(InputChange::Cleared);
            }
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                let change = self.input.insert_char(ch, now);
                self.after_edit(change);
            }
            KeyCode::Backspace => {
                if let Some(change) = self.input.backspace(now) {
                    self.after_edit(change);
                }
            }
            KeyCode::Delete => {
                if let Some(change) = self.input.delete(now) {
                    self.after_edit(change);
                }
            }
            KeyCode::Left => self.move_caret(DebouncedInput::move_left),
            KeyCode::Right => self.move_caret(DebouncedInput::move_right),
            KeyCode::Home => self.move_caret(DebouncedInput::move_home),
            KeyCode::End => self.move_caret(DebouncedInput::move_end),
            KeyCode::Down | KeyCode::Tab => {
                self.results.highlight_next();
                self.needs_redraw = true;
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.results.highlight_previous();
                self.needs_redraw = true;
            }
            KeyCode::Enter => return self.select_highlighted(),
            KeyCode::Esc => {
                if self.results.status() == ResultStatus::Idle && self.container.is_none() {
                    self.exit_requested = true;
                } else {
                    self.dismiss();
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn move_caret(&mut self, movement: fn(&mut DebouncedInput)) {
        movement(&mut self.input);
        self.needs_redraw = true;
    }

    fn after_edit(&mut self, change: InputChange) {
        // A pending retrieve belongs to the text the user just changed.
        self.dispatcher.cancel();
        if change == InputChange::Cleared {
            self.reset_search();
        }
        self.needs_redraw = true;
    }

    fn reset_search(&mut self) {
        self.input.cancel();
        self.session.invalidate();
        self.dispatcher.cancel();
        self.results.clear();
        self.container = None;
    }

    fn trigger_search(&mut self) -> Result<(), LookupError> {
        let query = self.input.text().to_string();
        self.needs_redraw = true;
        match self.session.search(&query, self.container.as_ref()) {
            Some(request) => self.spawn_lookup(request),
            None => {
                self.results.clear();
                Ok(())
            }
        }
    }

    fn select(&mut self, candidate: &Candidate) -> Result<(), LookupError> {
        self.needs_redraw = true;
        match self.dispatcher.select(candidate) {
            Dispatch::Refine(container) => {
                self.input.cancel();
                let request = self.session.refine(self.input.text(), &container);
                self.container = Some(container);
                self.spawn_lookup(request)
            }
            Dispatch::Resolve {
                sequence,
                candidate_id,
            } => self.spawn_resolve(sequence, candidate_id),
        }
    }

    fn runtime(&mut self) -> Result<Handle, LookupError> {
        Handle::try_current().map_err(|_| {
            self.session.invalidate();
            self.dispatcher.cancel();
            self.results.fail();
            LookupError::NoRuntime
        })
    }

    fn spawn_lookup(&mut self, request: SearchRequest) -> Result<(), LookupError> {
        let handle = self.runtime()?;
        self.results.begin_loading();

        let tx = self.ui_tx.clone();
        let service = Arc::clone(&self.service);
        let params = LookupParams::from(&request);
        handle.spawn(async move {
            let result = service.lookup(&params).await;
            let _ = tx.send(Msg::LookupCompleted {
                sequence: request.sequence,
                query: request.query,
                result,
            });
        });
        Ok(())
    }

    fn spawn_resolve(&mut self, sequence: SequenceNumber, candidate_id: String) -> Result<(), LookupError> {
        let handle = self.runtime()?;
        debug!(sequence, candidate_id = %candidate_id, "retrieving address");

        let tx = self.ui_tx.clone();
        let service = Arc::clone(&self.service);
        handle.spawn(async move {
            let result = service.resolve(&candidate_id).await;
            let _ = tx.send(Msg::ResolveCompleted {
                sequence,
                candidate_id,
                result,
            });
        });
        Ok(())
    }

    fn apply_lookup(
        &mut self,
        sequence: SequenceNumber,
        query: String,
        result: ClientApiResult<Vec<Candidate>>,
    ) -> Result<(), LookupError> {
        match self.session.settle(sequence, result) {
            LookupSettlement::Apply(candidates) => {
                debug!(sequence, count = candidates.len(), "applying lookup response");
                self.results.replace(candidates);
                self.needs_redraw = true;
                Ok(())
            }
            LookupSettlement::Fail(source) => {
                warn!(sequence, error = %source, "address lookup failed");
                self.results.fail();
                self.needs_redraw = true;
                Err(LookupError::Lookup { query, source })
            }
            LookupSettlement::Stale => Ok(()),
        }
    }

    fn apply_resolve(
        &mut self,
        sequence: SequenceNumber,
        candidate_id: String,
        result: ClientApiResult<AddressRecord>,
    ) -> Result<(), LookupError> {
        match self.dispatcher.settle(sequence, result) {
            ResolveSettlement::Delivered(_) => {
                self.input.clear();
                self.reset_search();
                self.needs_redraw = true;
                Ok(())
            }
            ResolveSettlement::Failed(source) => {
                warn!(candidate_id = %candidate_id, error = %source, "address retrieve failed");
                self.session.invalidate();
                self.results.fail();
                self.needs_redraw = true;
                Err(LookupError::Resolve { candidate_id, source })
            }
            ResolveSettlement::Stale => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use af_rest_mock_client::MockAddressService;
    use crossterm::event::KeyEvent;

    fn model() -> LookupViewModel {
        let (tx, _rx) = crossbeam_channel::unbounded();
        LookupViewModel::new(
            LookupConfig::default(),
            Arc::new(MockAddressService::with_mock_data()),
            tx,
        )
    }

    fn key(code: KeyCode) -> Msg {
        Msg::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn typing_schedules_without_requesting() {
        let mut vm = model();
        vm.update(key(KeyCode::Char('a'))).expect("key");
        assert_eq!(vm.query(), "a");
        assert!(vm.is_search_pending());
        assert_eq!(vm.status(), ResultStatus::Idle);
    }

    #[test]
    fn escape_with_nothing_open_requests_exit() {
        let mut vm = model();
        vm.update(key(KeyCode::Esc)).expect("esc");
        assert!(vm.take_exit_request());
        assert!(!vm.take_exit_request());
    }

    #[test]
    fn enter_without_highlight_is_a_no_op() {
        let mut vm = model();
        vm.on_change("abbey");
        vm.update(key(KeyCode::Enter)).expect("enter");
        assert_eq!(vm.query(), "abbey");
        assert!(!vm.is_resolving());
    }

    #[test]
    fn ctrl_u_clears_query_and_pending_search() {
        let mut vm = model();
        vm.on_change("abbey");
        vm.update(Msg::Key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)))
            .expect("ctrl-u");
        assert_eq!(vm.query(), "");
        assert!(!vm.is_search_pending());
    }

    #[test]
    fn paste_is_flattened_to_one_line() {
        let mut vm = model();
        vm.update(Msg::Paste("1 Abbey\nRoad".into())).expect("paste");
        assert_eq!(vm.query(), "1 Abbey Road");
    }

    #[test]
    fn firing_without_runtime_surfaces_an_error() {
        let mut vm = model();
        vm.on_change("a");
        assert_eq!(vm.trigger_search(), Err(LookupError::NoRuntime));
        assert_eq!(vm.status(), ResultStatus::Error);
    }
}
