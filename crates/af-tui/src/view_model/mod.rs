// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! ViewModel layer for the address finder
//!
//! All controller state lives here and is driven through
//! [`LookupViewModel::update`]. Network calls run as Tokio tasks that post
//! their completion back as a [`Msg`], so the model can be exercised headless
//! with paused time.

pub mod debounced_input;
pub mod lookup_model;
pub mod result_set;
pub mod search_session;
pub mod selection;

pub use debounced_input::{DebouncedInput, InputChange};
pub use lookup_model::LookupViewModel;
pub use result_set::{ResultSet, ResultStatus};
pub use search_session::{LookupSettlement, SearchSession, SequenceGate};
pub use selection::{Dispatch, OnSelect, ResolveSettlement, SelectionDispatcher};

use af_client_api::ClientApiResult;
use af_domain_types::{AddressRecord, Candidate, SequenceNumber};
use crossterm::event::KeyEvent;

/// Semantic targets registered by the view for pointer hit testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    FocusInput,
    SelectCandidate(usize),
}

/// Messages handled by [`LookupViewModel::update`]
#[derive(Debug, Clone)]
pub enum Msg {
    Key(KeyEvent),
    Paste(String),
    MouseClick(MouseAction),
    MouseHover(MouseAction),
    MouseScrollUp,
    MouseScrollDown,
    /// A pointer press that hit no finder element
    PointerOutside,
    Tick,
    LookupCompleted {
        sequence: SequenceNumber,
        query: String,
        result: ClientApiResult<Vec<Candidate>>,
    },
    ResolveCompleted {
        sequence: SequenceNumber,
        candidate_id: String,
        result: ClientApiResult<AddressRecord>,
    },
}
