use std::sync::Arc;
use std::time::Duration;

use shelfmark::{CancellationToken, IdKind, Query, Shelfmark, ShelfmarkError, Source};
use shelfmark_mock::{MockBehavior, MockProvider};

use crate::helpers::{dynamic_google, volume, volumes};

fn dune_by_herbert() -> Query {
    Query::title("Dune").with_author("Frank Herbert")
}

#[tokio::test]
async fn same_book_from_two_sources_is_reported_once() {
    let google = Arc::new(MockProvider::google_books());
    let open_library = Arc::new(MockProvider::open_library());
    let sm = Shelfmark::builder()
        .with_provider(google.clone())
        .with_provider(open_library.clone())
        .build()
        .unwrap();

    let out = sm
        .search(&dune_by_herbert(), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].candidate.source, Source::GoogleBooks);
    assert_eq!(out[0].candidate.ids.get(IdKind::Isbn), Some("9780441013593"));
    assert_eq!(google.calls().text, 1);
    assert_eq!(open_library.calls().text, 1);
}

#[tokio::test]
async fn priority_decides_which_duplicate_survives() {
    let sm = Shelfmark::builder()
        .with_provider(Arc::new(MockProvider::google_books()))
        .with_provider(Arc::new(MockProvider::open_library()))
        .priority(Source::OpenLibrary, 0)
        .build()
        .unwrap();

    let out = sm
        .search(&dune_by_herbert(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].candidate.source, Source::OpenLibrary);
    assert_eq!(out[0].candidate.year, Some(1965));
}

#[tokio::test]
async fn higher_score_outranks_higher_priority() {
    let (google, ctl) = dynamic_google();
    ctl.set_text_behavior(
        "Dune",
        MockBehavior::Return(volumes(vec![volume("m", "June", None, None)])),
    )
    .await;
    let sm = Shelfmark::builder()
        .with_provider(google)
        .with_provider(Arc::new(MockProvider::open_library()))
        .fuzzy_match_threshold(40)
        .build()
        .unwrap();

    let out = sm
        .search(&Query::title("Dune"), &CancellationToken::new())
        .await
        .unwrap();
    let ranked: Vec<(Source, &str, u8)> = out
        .iter()
        .map(|s| (s.candidate.source, s.candidate.name.as_str(), s.score))
        .collect();
    assert_eq!(
        ranked,
        [
            (Source::OpenLibrary, "Dune", 100),
            (Source::GoogleBooks, "June", 75),
        ]
    );
}

#[tokio::test]
async fn failing_source_does_not_hide_the_others() {
    let (google, ctl) = dynamic_google();
    ctl.set_text_behavior(
        "Dune",
        MockBehavior::Fail(ShelfmarkError::unavailable(Source::GoogleBooks, "503")),
    )
    .await;
    let sm = Shelfmark::builder()
        .with_provider(google)
        .with_provider(Arc::new(MockProvider::open_library()))
        .build()
        .unwrap();

    let out = sm
        .search(&dune_by_herbert(), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].candidate.source, Source::OpenLibrary);
}

#[tokio::test(start_paused = true)]
async fn sources_are_queried_concurrently() {
    let sm = Shelfmark::builder()
        .with_provider(Arc::new(MockProvider::google_books()))
        .with_provider(Arc::new(MockProvider::open_library()))
        .provider_timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    // both mocks stall for 30s on this title and get cut off at the timeout
    let started = tokio::time::Instant::now();
    let out = sm
        .search(&Query::title("TIMEOUT"), &CancellationToken::new())
        .await
        .unwrap();

    assert!(out.is_empty());
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_secs(10));
    assert!(elapsed < Duration::from_secs(20));
}

#[tokio::test]
async fn cancellation_from_any_source_propagates() {
    let sm = Shelfmark::builder()
        .with_provider(Arc::new(MockProvider::google_books()))
        .with_provider(Arc::new(MockProvider::open_library()))
        .build()
        .unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = sm.search(&dune_by_herbert(), &cancel).await.unwrap_err();
    assert_eq!(err, ShelfmarkError::Cancelled);
}

#[tokio::test]
async fn merged_list_respects_max_results() {
    let (google, ctl) = dynamic_google();
    ctl.set_text_behavior(
        "Dune",
        MockBehavior::Return(volumes(vec![
            volume("a", "Dune Messiah", None, None),
            volume("b", "Children of Dune", None, None),
        ])),
    )
    .await;
    let sm = Shelfmark::builder()
        .with_provider(google)
        .with_provider(Arc::new(MockProvider::open_library()))
        .enable_fuzzy_matching(false)
        .max_results(2)
        .build()
        .unwrap();

    let out = sm
        .search(&Query::title("Dune"), &CancellationToken::new())
        .await
        .unwrap();
    let names: Vec<_> = out.iter().map(|s| s.candidate.name.as_str()).collect();
    assert_eq!(names, ["Dune Messiah", "Children of Dune"]);
}

#[tokio::test]
async fn invalidate_and_clear_force_fresh_lookups() {
    let google = Arc::new(MockProvider::google_books());
    let open_library = Arc::new(MockProvider::open_library());
    let sm = Shelfmark::builder()
        .with_provider(google.clone())
        .with_provider(open_library.clone())
        .build()
        .unwrap();
    let cancel = CancellationToken::new();
    let q = dune_by_herbert();

    sm.search(&q, &cancel).await.unwrap();
    sm.search(&q, &cancel).await.unwrap();
    assert_eq!((google.calls().text, open_library.calls().text), (1, 1));

    assert!(sm.invalidate(Source::GoogleBooks, "Dune"));
    sm.search(&q, &cancel).await.unwrap();
    assert_eq!((google.calls().text, open_library.calls().text), (2, 1));

    sm.clear_cache();
    sm.search(&q, &cancel).await.unwrap();
    assert_eq!((google.calls().text, open_library.calls().text), (3, 2));
}

#[tokio::test]
async fn huge_cache_ttl_still_caches() {
    let google = Arc::new(MockProvider::google_books());
    let sm = Shelfmark::builder()
        .with_provider(google.clone())
        .cache_ttl_hours(u64::MAX)
        .build()
        .unwrap();
    let cancel = CancellationToken::new();

    let first = sm.search(&dune_by_herbert(), &cancel).await.unwrap();
    let second = sm.search(&dune_by_herbert(), &cancel).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(google.calls().text, 1);
}
