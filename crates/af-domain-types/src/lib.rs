// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Domain types for the address-finder suite
//!
//! These types describe what the address-search service hands back and what
//! the widget hands to its host. They are UI-agnostic so the REST client, the
//! mock service and the terminal widget can all share them.

pub mod address;
pub mod candidate;
pub mod request;

pub use address::*;
pub use candidate::*;
pub use request::*;
