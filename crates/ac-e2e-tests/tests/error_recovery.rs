//! E2E tests for fetch failures and their recovery inside a turn.

mod helpers;

use ac_argo_data::MockFetcher;
use ac_chat::replies;
use ac_chat::{DialogueState, Session};
use ac_protocol::FloatId;

use helpers::TestHarness;

/// An unknown float fails the turn but leaves the session as it was.
#[tokio::test]
async fn e2e_unknown_float_leaves_session_unchanged() {
    let h = TestHarness::with_sample_floats();
    let mut s = Session::new();
    h.say(&mut s, "temperature 2903893").await;

    let out = h.say(&mut s, "salinity 1234567").await;
    assert_eq!(out.reply, "Failed to load float 1234567. Please try another ID.");
    assert!(out.charts.is_empty());
    assert_eq!(s.loaded_ids(), vec![FloatId(2903893)]);
    assert_eq!(s.state(), DialogueState::Idle);

    // The session is still usable.
    let out = h.say(&mut s, "salinity").await;
    assert_eq!(out.reply, "Salinity profile for float 2903893 displayed.");
}

/// One broken id in a comparison aborts the whole load.
#[tokio::test]
async fn e2e_partial_compare_failure_is_atomic() {
    let mut mock = MockFetcher::with_sample_floats();
    mock.break_float(FloatId(6902746));
    let h = TestHarness::with_mock(mock);
    let mut s = Session::new();

    let out = h.say(&mut s, "compare 2903893 2903892 6902746").await;
    assert_eq!(out.reply, replies::fetch_failed(FloatId(6902746)));
    assert!(s.floats().is_empty());
}

/// Fetch failure while awaiting a number keeps waiting for another.
#[tokio::test]
async fn e2e_pending_float_retry() {
    let h = TestHarness::with_sample_floats();
    let mut s = Session::new();

    h.say(&mut s, "add another float").await;
    let out = h.say(&mut s, "7777777").await;
    assert_eq!(out.reply, replies::fetch_failed(FloatId(7777777)));
    assert!(s.is_awaiting_identifier());

    let out = h.say(&mut s, "2903892").await;
    assert_eq!(out.reply, replies::float_loaded(FloatId(2903892)));
    assert!(!s.is_awaiting_identifier());
}

/// Failed fetches are not cached; a retry reaches the archive again.
#[tokio::test]
async fn e2e_failures_are_not_memoized() {
    let h = TestHarness::with_sample_floats();
    let mut s = Session::new();

    h.say(&mut s, "trajectory 1111111").await;
    h.say(&mut s, "trajectory 1111111").await;
    assert_eq!(h.archive_calls(), vec![FloatId(1111111), FloatId(1111111)]);
    assert_eq!(h.cache.cached_count(), 0);
}
