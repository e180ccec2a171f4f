//! Tests for pagination module

use super::*;
use crate::error::{AbortReason, Error};
use crate::fetch::testing::{review, Scripted, ScriptedFetcher};
use crate::retry::RetryPolicy;
use pretty_assertions::assert_eq;

fn authors(state: &AggregateState) -> Vec<String> {
    state.records().iter().map(|r| r.author.clone()).collect()
}

fn expected_authors(pages: &[(u32, usize)]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|&(page, count)| (0..count).map(move |i| review(page, i).user_name.unwrap()))
        .collect()
}

// ============================================================================
// AggregateState Tests
// ============================================================================

#[test]
fn test_aggregate_state_default() {
    let state = AggregateState::new();
    assert!(state.records().is_empty());
    assert_eq!(state.total_pages_known(), None);
    assert_eq!(state.last_page_attempted(), 0);
    assert_eq!(state.pages_fetched(), 0);
}

#[test]
fn test_first_declared_total_wins() {
    let mut state = AggregateState::new();
    state.record_declared_total(Some(3));
    state.record_declared_total(Some(8));
    state.record_declared_total(None);
    assert_eq!(state.total_pages_known(), Some(3));
}

#[test]
fn test_last_page_attempted_only_increases() {
    let mut state = AggregateState::new();
    state.mark_attempted(4);
    state.mark_attempted(2);
    assert_eq!(state.last_page_attempted(), 4);
}

#[test]
fn test_stop_reason_is_early() {
    assert!(!StopReason::LastPage.is_early());
    assert!(!StopReason::PageBound.is_early());
    assert!(!StopReason::NoPagination.is_early());
    assert!(StopReason::EmptyPage { page: 2 }.is_early());
    assert!(StopReason::MalformedPage { page: 2 }.is_early());
    assert!(StopReason::TransportFailure { page: 2 }.is_early());
    assert_eq!(
        StopReason::TransportFailure { page: 7 }.to_string(),
        "page 7 could not be fetched"
    );
}

// ============================================================================
// Controller: complete runs
// ============================================================================

#[tokio::test]
async fn test_all_declared_pages_fetched() {
    let fetcher = ScriptedFetcher::new()
        .page(1, [Scripted::Records(3, Some(3))])
        .page(2, [Scripted::Records(3, Some(3))])
        .page(3, [Scripted::Records(2, Some(3))]);
    let controller = PaginationController::new(fetcher);

    let state = controller.run().await.unwrap();

    assert_eq!(authors(&state), expected_authors(&[(1, 3), (2, 3), (3, 2)]));
    assert_eq!(state.total_pages_known(), Some(3));
    assert_eq!(state.last_page_attempted(), 3);
    assert_eq!(state.pages_fetched(), 3);
    assert_eq!(state.stop_reason(), StopReason::LastPage);
    assert!(!state.is_partial());
    // Nothing beyond the declared total is requested
    assert_eq!(controller.fetcher().attempts(4), 0);
}

#[tokio::test]
async fn test_empty_third_page_stops_without_error() {
    let fetcher = ScriptedFetcher::new()
        .page(1, [Scripted::Records(20, Some(3))])
        .page(2, [Scripted::Records(20, None)])
        .page(3, [Scripted::Empty]);
    let controller = PaginationController::new(fetcher);

    let state = controller.run().await.unwrap();

    assert_eq!(state.records().len(), 40);
    assert_eq!(state.last_page_attempted(), 3);
    assert_eq!(state.stop_reason(), StopReason::EmptyPage { page: 3 });
}

#[tokio::test]
async fn test_empty_page_keeps_concatenation_of_earlier_pages() {
    for k in 1..=5u32 {
        let mut fetcher = ScriptedFetcher::new();
        for page in 1..=k {
            fetcher = fetcher.page(page, [Scripted::Records(page as usize + 1, Some(50))]);
        }
        fetcher = fetcher.page(k + 1, [Scripted::Empty]);
        let controller = PaginationController::new(fetcher);

        let state = controller.run().await.unwrap();

        let pages: Vec<(u32, usize)> = (1..=k).map(|p| (p, p as usize + 1)).collect();
        assert_eq!(authors(&state), expected_authors(&pages));
        assert_eq!(state.stop_reason(), StopReason::EmptyPage { page: k + 1 });
        assert_eq!(controller.fetcher().total_attempts(), k + 1);
    }
}

#[tokio::test]
async fn test_missing_total_stops_after_first_page() {
    let fetcher = ScriptedFetcher::new()
        .page(1, [Scripted::Records(4, None)])
        .page(2, [Scripted::Records(4, Some(2))]);
    let controller = PaginationController::new(fetcher);

    let state = controller.run().await.unwrap();

    assert_eq!(state.records().len(), 4);
    assert_eq!(state.total_pages_known(), None);
    assert_eq!(state.stop_reason(), StopReason::NoPagination);
    assert_eq!(controller.fetcher().attempts(2), 0);
}

#[tokio::test]
async fn test_single_declared_page() {
    let fetcher = ScriptedFetcher::new().page(1, [Scripted::Records(1, Some(1))]);
    let controller = PaginationController::new(fetcher);

    let state = controller.run().await.unwrap();

    assert_eq!(state.stop_reason(), StopReason::LastPage);
    assert_eq!(controller.fetcher().total_attempts(), 1);
}

// ============================================================================
// Controller: page bound
// ============================================================================

#[tokio::test]
async fn test_page_bound_caps_large_declared_total() {
    let mut fetcher = ScriptedFetcher::new();
    for page in 1..=500 {
        fetcher = fetcher.page(page, [Scripted::Records(1, Some(500))]);
    }
    let controller = PaginationController::new(fetcher);
    assert_eq!(controller.max_pages(), 101);

    let state = controller.run().await.unwrap();

    assert_eq!(controller.fetcher().total_attempts(), 101);
    assert_eq!(controller.fetcher().attempts(102), 0);
    assert_eq!(state.records().len(), 101);
    assert_eq!(state.last_page_attempted(), 101);
    assert_eq!(state.total_pages_known(), Some(500));
    assert_eq!(state.stop_reason(), StopReason::PageBound);
}

#[tokio::test]
async fn test_custom_page_bound() {
    let fetcher = ScriptedFetcher::new()
        .page(1, [Scripted::Records(2, Some(10))])
        .page(2, [Scripted::Records(2, Some(10))])
        .page(3, [Scripted::Records(2, Some(10))]);
    let controller = PaginationController::new(fetcher).with_max_pages(2);

    let state = controller.run().await.unwrap();

    assert_eq!(state.records().len(), 4);
    assert_eq!(controller.fetcher().attempts(3), 0);
    assert_eq!(state.stop_reason(), StopReason::PageBound);
}

#[tokio::test]
async fn test_zero_page_bound_is_config_error_before_network() {
    let fetcher = ScriptedFetcher::new().page(1, [Scripted::Records(2, Some(1))]);
    let controller = PaginationController::new(fetcher).with_max_pages(0);

    let err = controller.run().await.unwrap_err();

    assert!(err.is_config());
    assert_eq!(controller.fetcher().total_attempts(), 0);
}

// ============================================================================
// Controller: declared total
// ============================================================================

#[tokio::test]
async fn test_later_declared_totals_are_ignored() {
    let fetcher = ScriptedFetcher::new()
        .page(1, [Scripted::Records(1, Some(2))])
        .page(2, [Scripted::Records(1, Some(6))])
        .page(3, [Scripted::Records(1, Some(6))]);
    let controller = PaginationController::new(fetcher);

    let state = controller.run().await.unwrap();

    assert_eq!(state.total_pages_known(), Some(2));
    assert_eq!(state.records().len(), 2);
    assert_eq!(controller.fetcher().attempts(3), 0);
}

// ============================================================================
// Controller: aborts on page 1
// ============================================================================

#[tokio::test]
async fn test_first_page_transport_failure_aborts_after_budget() {
    let fetcher = ScriptedFetcher::new().page(1, [Scripted::Fail]);
    let controller = PaginationController::new(fetcher).with_retry(RetryPolicy::new(3));

    let err = controller.run().await.unwrap_err();

    match err {
        Error::Aborted {
            page: 1,
            reason: AbortReason::Transport { attempts, .. },
        } => assert_eq!(attempts, 4),
        other => panic!("Expected transport abort, got {other:?}"),
    }
    assert_eq!(controller.fetcher().attempts(1), 4);
    assert_eq!(controller.fetcher().attempts(2), 0);
}

#[tokio::test]
async fn test_first_page_recovers_within_budget() {
    let fetcher = ScriptedFetcher::new()
        .page(1, [Scripted::Fail, Scripted::Fail, Scripted::Fail, Scripted::Records(2, Some(1))]);
    let controller = PaginationController::new(fetcher);

    let state = controller.run().await.unwrap();

    assert_eq!(state.records().len(), 2);
    assert_eq!(controller.fetcher().attempts(1), 4);
}

#[tokio::test]
async fn test_first_page_empty_aborts() {
    let fetcher = ScriptedFetcher::new().page(1, [Scripted::Empty]);
    let controller = PaginationController::new(fetcher);

    let err = controller.run().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Aborted {
            page: 1,
            reason: AbortReason::EmptyPage
        }
    ));
    assert_eq!(controller.fetcher().attempts(1), 1);
}

#[tokio::test]
async fn test_first_page_malformed_aborts() {
    let fetcher = ScriptedFetcher::new().page(1, [Scripted::Malformed]);
    let controller = PaginationController::new(fetcher);

    let err = controller.run().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Aborted {
            reason: AbortReason::MalformedPage { .. },
            ..
        }
    ));
    assert_eq!(controller.fetcher().attempts(1), 1);
}

// ============================================================================
// Controller: partial success on later pages
// ============================================================================

#[tokio::test]
async fn test_later_transport_failure_keeps_earlier_pages() {
    let fetcher = ScriptedFetcher::new()
        .page(1, [Scripted::Records(5, Some(4))])
        .page(2, [Scripted::Records(5, None)])
        .page(3, [Scripted::Fail])
        .page(4, [Scripted::Records(5, None)]);
    let controller = PaginationController::new(fetcher).with_retry(RetryPolicy::new(2));

    let state = controller.run().await.unwrap();

    assert_eq!(authors(&state), expected_authors(&[(1, 5), (2, 5)]));
    assert_eq!(state.stop_reason(), StopReason::TransportFailure { page: 3 });
    assert!(state.is_partial());
    assert_eq!(controller.fetcher().attempts(3), 3);
    assert_eq!(controller.fetcher().attempts(4), 0);
}

#[tokio::test]
async fn test_later_malformed_page_stops_early() {
    let fetcher = ScriptedFetcher::new()
        .page(1, [Scripted::Records(1, Some(3))])
        .page(2, [Scripted::Malformed])
        .page(3, [Scripted::Records(1, None)]);
    let controller = PaginationController::new(fetcher);

    let state = controller.run().await.unwrap();

    assert_eq!(state.records().len(), 1);
    assert_eq!(state.stop_reason(), StopReason::MalformedPage { page: 2 });
    assert_eq!(state.last_page_attempted(), 2);
    assert_eq!(controller.fetcher().attempts(2), 1);
}

// ============================================================================
// Ordering and determinism
// ============================================================================

#[tokio::test]
async fn test_pages_requested_strictly_in_sequence() {
    let fetcher = ScriptedFetcher::new()
        .page(1, [Scripted::Records(1, Some(3))])
        .page(2, [Scripted::Fail, Scripted::Records(1, None)])
        .page(3, [Scripted::Records(1, None)]);
    let controller = PaginationController::new(fetcher);

    controller.run().await.unwrap();

    let order: Vec<(u32, u32)> = controller
        .fetcher()
        .requests()
        .iter()
        .map(|r| (r.page_index, r.retry_count))
        .collect();
    assert_eq!(order, vec![(1, 0), (2, 0), (2, 1), (3, 0)]);
}

fn scripted_run() -> ScriptedFetcher {
    ScriptedFetcher::new()
        .page(1, [Scripted::Records(7, Some(4))])
        .page(2, [Scripted::Fail, Scripted::Records(6, None)])
        .page(3, [Scripted::Records(5, None)])
        .page(4, [Scripted::Empty])
}

#[test]
fn test_rerun_yields_identical_aggregate() {
    let first = tokio_test::block_on(PaginationController::new(scripted_run()).run()).unwrap();
    let second = tokio_test::block_on(PaginationController::new(scripted_run()).run()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.into_records(), second.into_records());
}
