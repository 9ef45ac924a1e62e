use std::time::Duration;

use shelfmark::{CancellationToken, Query, ResolverSettings, ShelfmarkError, Source};
use shelfmark_mock::{MockBehavior, RecordedCall};

use crate::helpers::{DUNE_ISBN, dunes_and_arrakis, dynamic_google, resolver, volume, volumes};

fn dune_volume() -> Option<shelfmark::RawResult> {
    volumes(vec![volume("B1hSG45JCX4C", "Dune", Some("1965"), Some(DUNE_ISBN))])
}

#[tokio::test]
async fn empty_identifier_search_falls_back_to_text() {
    let (provider, ctl) = dynamic_google();
    ctl.set_identifier_behavior(DUNE_ISBN, MockBehavior::Return(None))
        .await;
    ctl.set_text_behavior("Dune", MockBehavior::Return(dune_volume()))
        .await;
    let r = resolver(provider, ResolverSettings::default());

    let q = Query::title("Dune").with_isbn(DUNE_ISBN).with_year(1965);
    let out = r.search(&q, &CancellationToken::new()).await.unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(
        ctl.calls().await,
        vec![
            RecordedCall::Identifier(DUNE_ISBN.to_string()),
            RecordedCall::Text("Dune".to_string(), None),
        ]
    );
    // one admission covers both calls
    assert_eq!(r.window().admitted_in_window(), 1);
}

#[tokio::test]
async fn failing_identifier_search_falls_back_to_text() {
    let (provider, ctl) = dynamic_google();
    ctl.set_identifier_behavior(
        DUNE_ISBN,
        MockBehavior::Fail(ShelfmarkError::unavailable(Source::GoogleBooks, "503")),
    )
    .await;
    ctl.set_text_behavior("Dune", MockBehavior::Return(dune_volume()))
        .await;
    let r = resolver(provider, ResolverSettings::default());

    let q = Query::title("Dune").with_isbn(DUNE_ISBN).with_year(1965);
    let out = r.search(&q, &CancellationToken::new()).await.unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].score, 100);
}

#[tokio::test]
async fn invalid_isbn_skips_identifier_search() {
    let (provider, ctl) = dynamic_google();
    ctl.set_text_behavior("Dune", MockBehavior::Return(dune_volume()))
        .await;
    let r = resolver(provider, ResolverSettings::default());

    let q = Query::title("Dune").with_isbn("9780441013590");
    r.search(&q, &CancellationToken::new()).await.unwrap();
    assert_eq!(
        ctl.calls().await,
        vec![RecordedCall::Text("Dune".to_string(), None)]
    );
}

#[tokio::test]
async fn disabled_identifier_search_goes_straight_to_text() {
    let (provider, ctl) = dynamic_google();
    ctl.set_identifier_behavior(DUNE_ISBN, MockBehavior::Return(dunes_and_arrakis()))
        .await;
    ctl.set_text_behavior("Dune", MockBehavior::Return(dune_volume()))
        .await;
    let settings = ResolverSettings {
        enable_identifier_search: false,
        ..ResolverSettings::default()
    };
    let r = resolver(provider, settings);

    let q = Query::title("Dune").with_isbn(DUNE_ISBN).with_year(1965);
    let out = r.search(&q, &CancellationToken::new()).await.unwrap();
    assert_eq!(out[0].candidate.name, "Dune");
    assert!(
        ctl.calls()
            .await
            .iter()
            .all(|c| matches!(c, RecordedCall::Text(..)))
    );
}

#[tokio::test]
async fn malformed_text_response_degrades_to_empty() {
    let (provider, ctl) = dynamic_google();
    ctl.set_text_behavior(
        "Dune",
        MockBehavior::Fail(ShelfmarkError::malformed(
            Source::GoogleBooks,
            "expected value at line 1 column 1",
        )),
    )
    .await;
    let r = resolver(provider, ResolverSettings::default());

    let out = r
        .search(&Query::title("Dune"), &CancellationToken::new())
        .await
        .unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn author_is_derived_from_by_suffix_for_text_search() {
    let (provider, ctl) = dynamic_google();
    ctl.set_text_behavior("Dune by Frank Herbert", MockBehavior::Return(dune_volume()))
        .await;
    let r = resolver(provider, ResolverSettings::default());

    let out = r
        .search(
            &Query::title("Dune by Frank Herbert"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(
        ctl.calls().await,
        vec![RecordedCall::Text(
            "Dune by Frank Herbert".to_string(),
            Some("Frank Herbert".to_string())
        )]
    );
    // the derived author only steers the search; scoring sees the title alone
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].score, 100);
}

#[tokio::test]
async fn explicit_author_wins_over_by_suffix() {
    let (provider, ctl) = dynamic_google();
    let r = resolver(provider, ResolverSettings::default());

    let q = Query::title("Stand by Me").with_author("Stephen King");
    r.search(&q, &CancellationToken::new()).await.unwrap();
    assert_eq!(
        ctl.calls().await,
        vec![RecordedCall::Text(
            "Stand by Me".to_string(),
            Some("Stephen King".to_string())
        )]
    );
}

#[tokio::test(start_paused = true)]
async fn hung_provider_times_out_and_falls_back() {
    let (provider, ctl) = dynamic_google();
    ctl.set_identifier_behavior(DUNE_ISBN, MockBehavior::Hang)
        .await;
    ctl.set_text_behavior("Dune", MockBehavior::Return(dune_volume()))
        .await;
    let settings = ResolverSettings {
        provider_timeout: Duration::from_secs(5),
        ..ResolverSettings::default()
    };
    let r = resolver(provider, settings);

    let started = tokio::time::Instant::now();
    let q = Query::title("Dune").with_isbn(DUNE_ISBN).with_year(1965);
    let out = r.search(&q, &CancellationToken::new()).await.unwrap();

    assert_eq!(out.len(), 1);
    assert!(started.elapsed() >= Duration::from_secs(5));
}
