use std::sync::Arc;
use std::time::Duration;

use shelfmark::{CancellationToken, Query, ResolverSettings, ShelfmarkError, SourceResolver};
use shelfmark_middleware::SlidingWindow;
use shelfmark_mock::{MockBehavior, RecordedCall};

use crate::helpers::{DUNE_ISBN, dunes_and_arrakis, dynamic_google, resolver};

#[tokio::test(start_paused = true)]
async fn cancel_during_provider_call_propagates_and_caches_nothing() {
    let (provider, ctl) = dynamic_google();
    ctl.set_identifier_behavior(DUNE_ISBN, MockBehavior::Hang)
        .await;
    let r = resolver(provider, ResolverSettings::default());
    let q = Query::title("Dune").with_isbn(DUNE_ISBN).with_year(1965);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        trigger.cancel();
    });

    let err = r.search(&q, &cancel).await.unwrap_err();
    assert_eq!(err, ShelfmarkError::Cancelled);
    // cancellation does not fall back to text search
    assert_eq!(
        ctl.calls().await,
        vec![RecordedCall::Identifier(DUNE_ISBN.to_string())]
    );

    ctl.set_identifier_behavior(DUNE_ISBN, MockBehavior::Return(dunes_and_arrakis()))
        .await;
    let out = r.search(&q, &CancellationToken::new()).await.unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(ctl.calls().await.len(), 2);
}

#[tokio::test]
async fn pre_cancelled_token_fails_before_any_call() {
    let (provider, ctl) = dynamic_google();
    let r = resolver(provider, ResolverSettings::default());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = r
        .search(&Query::title("Dune"), &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(ctl.calls().await.is_empty());
    assert_eq!(r.window().admitted_in_window(), 0);
}

#[tokio::test(start_paused = true)]
async fn cancel_while_waiting_for_admission() {
    let (provider, ctl) = dynamic_google();
    let window = Arc::new(SlidingWindow::new(1));
    let cache = Arc::new(shelfmark::SearchCache::new(8, Duration::from_secs(60)));
    let r = SourceResolver::with_shared(provider, ResolverSettings::default(), window, cache);

    // exhausts the single admission
    r.search(&Query::title("Dune"), &CancellationToken::new())
        .await
        .unwrap();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(10)).await;
        trigger.cancel();
    });

    let started = tokio::time::Instant::now();
    let err = r
        .search(&Query::title("The Hobbit"), &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(started.elapsed() < Duration::from_secs(60));
    assert_eq!(ctl.calls().await.len(), 1);
    assert_eq!(r.window().admitted_in_window(), 1);
}
