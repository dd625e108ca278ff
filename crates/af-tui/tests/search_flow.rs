// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Controller behaviour against the mock address service with paused time

mod common;

use std::sync::Arc;
use std::time::Duration;

use af_domain_types::Candidate;
use af_rest_mock_client::{fixtures, MockAddressService};
use af_tui::{ClickAwayPolicy, LookupConfig, LookupError, MouseAction, Msg, ResultStatus};
use common::{Harness, QUIET, SHORT};
use crossterm::event::KeyCode;

fn harness(service: MockAddressService) -> (Harness, MockAddressService) {
    let h = Harness::new(Arc::new(service.clone()), LookupConfig::default());
    (h, service)
}

#[tokio::test(start_paused = true)]
async fn rapid_keystrokes_issue_one_request_with_final_text() {
    let (mut h, service) = harness(MockAddressService::with_mock_data());

    h.type_text("a");
    h.advance(Duration::from_millis(100)).await;
    h.type_text("bb");
    h.advance(Duration::from_millis(200)).await;
    h.type_text("ey");
    h.advance(Duration::from_millis(249)).await;
    assert!(service.lookups().await.is_empty(), "still inside the quiet interval");

    h.advance(Duration::from_millis(1)).await;
    h.settle(SHORT).await;

    let lookups = service.lookups().await;
    assert_eq!(lookups.len(), 1);
    assert_eq!(lookups[0].text, "abbey");
    assert_eq!(lookups[0].locale, "en-GB");
    assert_eq!(lookups[0].limit, 10);
    assert_eq!(h.vm.status(), ResultStatus::Ready);
}

#[tokio::test(start_paused = true)]
async fn older_response_arriving_last_is_ignored() {
    let first = vec![Candidate::new("r1", "Old result", "", "Address")];
    let second = vec![
        Candidate::new("r2-a", "New result", "", "Address"),
        Candidate::new("r2-b", "Another new result", "", "Address"),
    ];
    let (mut h, _service) = harness(
        MockAddressService::new()
            .respond_to("ab", first)
            .respond_to("abc", second)
            .delay_query("ab", 500),
    );

    h.type_text("ab");
    h.advance(QUIET).await;
    assert_eq!(h.vm.status(), ResultStatus::Loading);

    h.type_text("c");
    h.advance(QUIET).await;
    h.settle(SHORT).await;
    assert_eq!(h.result_ids(), vec!["r2-a", "r2-b"]);

    h.settle(Duration::from_millis(600)).await;
    assert_eq!(h.result_ids(), vec!["r2-a", "r2-b"]);
    assert_eq!(h.vm.status(), ResultStatus::Ready);
    assert!(h.errors.is_empty());
}

#[tokio::test(start_paused = true)]
async fn clearing_the_input_empties_results_without_a_request() {
    let (mut h, service) = harness(MockAddressService::with_mock_data());

    h.type_text("ab");
    h.advance(QUIET).await;
    h.settle(SHORT).await;
    assert_eq!(h.vm.results().len(), 10);

    h.press(KeyCode::Backspace);
    h.press(KeyCode::Backspace);
    assert_eq!(h.vm.query(), "");
    assert_eq!(h.vm.status(), ResultStatus::Idle);
    assert!(h.vm.results().is_empty());

    h.advance(Duration::from_secs(1)).await;
    h.settle(SHORT).await;
    assert_eq!(service.lookups().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn escape_discards_the_outstanding_response_and_keeps_the_query() {
    let (mut h, _service) = harness(MockAddressService::with_mock_data().delay_ms(300));

    h.type_text("abbey");
    h.advance(QUIET).await;
    assert_eq!(h.vm.status(), ResultStatus::Loading);

    h.press(KeyCode::Esc);
    h.settle(Duration::from_millis(400)).await;

    assert_eq!(h.vm.query(), "abbey");
    assert_eq!(h.vm.status(), ResultStatus::Idle);
    assert!(h.vm.results().is_empty());
}

#[tokio::test(start_paused = true)]
async fn typing_a_against_ten_results_then_clicking_the_first_selects_it_once() {
    let (mut h, service) = harness(MockAddressService::with_mock_data());

    h.type_text("a");
    h.advance(QUIET).await;
    h.settle(SHORT).await;
    assert_eq!(h.vm.status(), ResultStatus::Ready);
    assert_eq!(h.vm.results().len(), 10);
    assert_eq!(h.result_ids()[0], fixtures::FIRST_ADDRESS_ID);

    h.click(0);
    h.settle(SHORT).await;

    assert_eq!(h.selection_ids(), vec![fixtures::FIRST_ADDRESS_ID.to_string()]);
    let selections = h.selections.lock().unwrap().clone();
    assert_eq!(selections[0].line1.as_deref(), Some("1 Abbey Road"));
    assert_eq!(service.resolves().await, vec![fixtures::FIRST_ADDRESS_ID.to_string()]);
    assert_eq!(h.vm.query(), "");
    assert_eq!(h.vm.status(), ResultStatus::Idle);

    h.settle(Duration::from_millis(100)).await;
    assert_eq!(h.selection_ids().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn container_selection_refines_without_selecting() {
    let (mut h, service) = harness(MockAddressService::with_mock_data());

    h.type_text("a");
    h.advance(QUIET).await;
    h.settle(SHORT).await;

    for _ in 0..12 {
        h.press(KeyCode::Down);
    }
    assert_eq!(h.vm.results().highlighted(), Some(9));
    h.press(KeyCode::Enter);
    assert_eq!(h.vm.status(), ResultStatus::Loading, "refinement is not debounced");
    h.settle(SHORT).await;

    assert!(h.selections.lock().unwrap().is_empty());
    assert_eq!(h.vm.query(), "a");
    assert_eq!(
        h.vm.container().map(|c| c.id.as_str()),
        Some(fixtures::ABBEY_ROAD_STREET_ID)
    );
    assert_eq!(h.vm.results().len(), 3);
    assert_eq!(h.vm.results().highlighted(), None);

    let lookups = service.lookups().await;
    assert_eq!(lookups.len(), 2);
    assert_eq!(lookups[1].container.as_deref(), Some(fixtures::ABBEY_ROAD_STREET_ID));
    assert_eq!(lookups[1].text, "a");

    h.press(KeyCode::Down);
    h.press(KeyCode::Enter);
    h.settle(SHORT).await;
    assert_eq!(h.selection_ids(), vec!["GB|RM|A|21415590".to_string()]);
    assert!(h.vm.container().is_none());
    assert_eq!(h.vm.query(), "");
}

#[tokio::test(start_paused = true)]
async fn container_click_refines_even_when_the_text_fell_below_the_minimum() {
    let (mut h, service) = harness(MockAddressService::with_mock_data());

    h.type_text(" a");
    h.advance(QUIET).await;
    h.settle(SHORT).await;
    assert_eq!(h.vm.results().len(), 10);

    h.press(KeyCode::Backspace);
    assert_eq!(h.vm.query(), " ");
    h.click(9);
    assert_eq!(h.vm.status(), ResultStatus::Loading);
    h.settle(SHORT).await;

    assert_eq!(h.vm.status(), ResultStatus::Ready);
    assert_eq!(h.vm.results().len(), 3);
    assert_eq!(
        h.vm.container().map(|c| c.id.as_str()),
        Some(fixtures::ABBEY_ROAD_STREET_ID)
    );

    let lookups = service.lookups().await;
    assert_eq!(lookups.len(), 2);
    assert_eq!(lookups[1].container.as_deref(), Some(fixtures::ABBEY_ROAD_STREET_ID));
    assert_eq!(lookups[1].text, " ");

    h.advance(QUIET).await;
    h.settle(SHORT).await;
    assert_eq!(service.lookups().await.len(), 2, "the pending debounce was cancelled");
    assert_eq!(h.vm.results().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn container_scope_survives_further_typing_until_escape() {
    let (mut h, service) = harness(MockAddressService::with_mock_data());

    h.type_text("a");
    h.advance(QUIET).await;
    h.settle(SHORT).await;
    h.click(9);
    h.settle(SHORT).await;

    h.type_text("b");
    h.advance(QUIET).await;
    h.settle(SHORT).await;
    let lookups = service.lookups().await;
    assert_eq!(lookups.last().map(|l| l.text.as_str()), Some("ab"));
    assert_eq!(
        lookups.last().and_then(|l| l.container.as_deref()),
        Some(fixtures::ABBEY_ROAD_STREET_ID)
    );

    h.press(KeyCode::Esc);
    assert!(h.vm.container().is_none());
    assert_eq!(h.vm.query(), "ab");
}

#[tokio::test(start_paused = true)]
async fn short_queries_never_reach_the_service() {
    let config = LookupConfig {
        min_query_length: 3,
        ..LookupConfig::default()
    };
    let service = MockAddressService::with_mock_data();
    let mut h = Harness::new(Arc::new(service.clone()), config);

    h.type_text("ab");
    h.advance(QUIET).await;
    h.settle(SHORT).await;
    assert!(service.lookups().await.is_empty());
    assert_eq!(h.vm.status(), ResultStatus::Idle);

    h.type_text("b");
    h.advance(QUIET).await;
    h.settle(SHORT).await;
    assert_eq!(service.lookups().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn transport_failure_is_surfaced_once_and_typing_stays_live() {
    let (mut h, _service) = harness(MockAddressService::with_failures(true));

    h.type_text("a");
    h.advance(QUIET).await;
    h.settle(SHORT).await;

    assert_eq!(h.errors.len(), 1);
    assert!(matches!(&h.errors[0], LookupError::Lookup { query, .. } if query == "a"));
    assert_eq!(h.vm.status(), ResultStatus::Error);
    assert!(h.vm.results().is_empty());
    assert!(!h.vm.is_list_open());

    h.type_text("b");
    assert_eq!(h.vm.query(), "ab");
    assert_eq!(h.errors.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn stale_failure_is_discarded() {
    let (mut h, _service) = harness(
        MockAddressService::with_mock_data()
            .fail_query("ab")
            .delay_query("ab", 500),
    );

    h.type_text("ab");
    h.advance(QUIET).await;
    h.type_text("b");
    h.advance(QUIET).await;
    h.settle(Duration::from_millis(600)).await;

    assert!(h.errors.is_empty());
    assert_eq!(h.vm.status(), ResultStatus::Ready);
}

#[tokio::test(start_paused = true)]
async fn empty_response_is_a_terminal_state_not_an_error() {
    let (mut h, _service) = harness(MockAddressService::with_mock_data());

    h.type_text("zzz");
    h.advance(QUIET).await;
    h.settle(SHORT).await;

    assert_eq!(h.vm.status(), ResultStatus::Empty);
    assert!(h.errors.is_empty());
}

#[tokio::test(start_paused = true)]
async fn retrieve_failure_surfaces_a_resolve_error() {
    let service = MockAddressService::new().respond_to(
        "a",
        vec![Candidate::new("GB|RM|A|404", "Missing", "", "Address")],
    );
    let (mut h, _service) = harness(service);

    h.type_text("a");
    h.advance(QUIET).await;
    h.settle(SHORT).await;
    h.click(0);
    h.settle(SHORT).await;

    assert_eq!(h.errors.len(), 1);
    assert!(matches!(&h.errors[0], LookupError::Resolve { candidate_id, .. } if candidate_id == "GB|RM|A|404"));
    assert!(h.selections.lock().unwrap().is_empty());
    assert_eq!(h.vm.status(), ResultStatus::Error);
}

#[tokio::test(start_paused = true)]
async fn typing_during_retrieve_cancels_the_selection() {
    let (mut h, _service) = harness(MockAddressService::with_mock_data());

    h.type_text("a");
    h.advance(QUIET).await;
    h.settle(SHORT).await;

    h.click(0);
    h.type_text("b");
    h.settle(SHORT).await;

    assert!(h.selections.lock().unwrap().is_empty());
    assert_eq!(h.vm.query(), "ab");
}

#[tokio::test(start_paused = true)]
async fn click_away_follows_the_configured_policy() {
    let service = Arc::new(MockAddressService::with_mock_data());

    let mut keep = Harness::new(service.clone(), LookupConfig::default());
    keep.type_text("a");
    keep.advance(QUIET).await;
    keep.settle(SHORT).await;
    keep.send(Msg::PointerOutside);
    assert!(keep.vm.is_list_open());

    let config = LookupConfig {
        click_away: ClickAwayPolicy::Dismiss,
        ..LookupConfig::default()
    };
    let mut dismiss = Harness::new(service, config);
    dismiss.type_text("a");
    dismiss.advance(QUIET).await;
    dismiss.settle(SHORT).await;
    dismiss.send(Msg::PointerOutside);
    assert!(!dismiss.vm.is_list_open());
    assert_eq!(dismiss.vm.query(), "a");
}

#[tokio::test(start_paused = true)]
async fn hover_and_scroll_move_the_highlight() {
    let (mut h, _service) = harness(MockAddressService::with_mock_data());

    h.type_text("a");
    h.advance(QUIET).await;
    h.settle(SHORT).await;

    h.send(Msg::MouseHover(MouseAction::SelectCandidate(4)));
    assert_eq!(h.vm.results().highlighted(), Some(4));
    h.send(Msg::MouseScrollDown);
    assert_eq!(h.vm.results().highlighted(), Some(5));
    h.send(Msg::MouseScrollUp);
    h.press(KeyCode::Up);
    assert_eq!(h.vm.results().highlighted(), Some(3));
}
