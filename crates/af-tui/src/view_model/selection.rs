// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Turns an activated candidate into a refinement or a resolved record

use af_client_api::{ClientApiError, ClientApiResult};
use af_domain_types::{AddressRecord, Candidate, ContainerContext, SelectionOutcome, SequenceNumber};
use tracing::{debug, info};

use super::search_session::SequenceGate;

/// Host callback receiving each completed selection
pub type OnSelect = Box<dyn FnMut(&AddressRecord) + Send>;

/// Next step after a candidate was activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Search again scoped to this container
    Refine(ContainerContext),
    /// Retrieve the record for `candidate_id` under `sequence`
    Resolve {
        sequence: SequenceNumber,
        candidate_id: String,
    },
}

/// Outcome of a settled retrieve
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveSettlement {
    Delivered(AddressRecord),
    Failed(ClientApiError),
    Stale,
}

/// Selection dispatcher with its own sequence gate for retrieve calls
#[derive(Default)]
pub struct SelectionDispatcher {
    gate: SequenceGate,
    on_select: Option<OnSelect>,
}

impl std::fmt::Debug for SelectionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionDispatcher")
            .field("gate", &self.gate)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl SelectionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_on_select(&mut self, on_select: OnSelect) {
        self.on_select = Some(on_select);
    }

    pub fn select(&mut self, candidate: &Candidate) -> Dispatch {
        match candidate.selection_outcome() {
            SelectionOutcome::Refine(container) => {
                debug!(container = %container.id, "refining into container");
                Dispatch::Refine(container)
            }
            SelectionOutcome::Resolve { candidate_id } => Dispatch::Resolve {
                sequence: self.gate.issue(),
                candidate_id,
            },
        }
    }

    /// Apply a retrieve response; the host callback runs at most once per
    /// issued retrieve.
    pub fn settle(
        &mut self,
        sequence: SequenceNumber,
        result: ClientApiResult<AddressRecord>,
    ) -> ResolveSettlement {
        if !self.gate.admit(sequence) {
            debug!(sequence, "discarding stale retrieve response");
            return ResolveSettlement::Stale;
        }
        match result {
            Ok(record) => {
                info!(id = %record.id, "address selected");
                if let Some(on_select) = self.on_select.as_mut() {
                    on_select(&record);
                }
                ResolveSettlement::Delivered(record)
            }
            Err(err) => ResolveSettlement::Failed(err),
        }
    }

    /// Drop any outstanding retrieve so it cannot deliver.
    pub fn cancel(&mut self) {
        self.gate.invalidate();
    }

    pub fn is_resolving(&self) -> bool {
        self.gate.is_outstanding()
    }
}
