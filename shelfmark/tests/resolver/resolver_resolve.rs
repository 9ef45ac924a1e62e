use std::sync::Arc;

use chrono::NaiveDate;
use shelfmark::{CancellationToken, IdKind, Query, ResolverSettings, ShelfmarkError, Source};
use shelfmark_mock::{MockBehavior, MockProvider, RecordedCall};

use crate::helpers::{dynamic_google, resolver};

#[tokio::test]
async fn native_id_fetches_directly() {
    let provider = Arc::new(MockProvider::google_books());
    let r = resolver(provider.clone(), ResolverSettings::default());

    let q = Query::title("whatever").with_id(IdKind::GoogleBooks, "B1hSG45JCX4C");
    let record = r
        .resolve(&q, &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.name, "Dune");
    assert_eq!(record.authors, vec!["Frank Herbert"]);
    assert_eq!(record.premiere_date, NaiveDate::from_ymd_opt(2005, 8, 2));
    assert_eq!(record.community_rating, Some(9.0));
    assert_eq!(record.language.as_deref(), Some("EN"));
    assert_eq!(record.ids.get(IdKind::Isbn), Some("9780441013593"));

    let calls = provider.calls();
    assert_eq!((calls.identifier, calls.text, calls.fetch), (0, 0, 1));
}

#[tokio::test]
async fn missing_native_id_searches_then_fetches_best_candidate() {
    let provider = Arc::new(MockProvider::open_library());
    let r = resolver(provider.clone(), ResolverSettings::default());

    let q = Query::title("The Hobbit").with_author("J.R.R. Tolkien");
    let record = r
        .resolve(&q, &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.name, "The Hobbit: There and Back Again");
    assert_eq!(
        record.ids.get(IdKind::OpenLibrary),
        Some("https://openlibrary.org/books/OL7983427M/The_Hobbit")
    );
    assert_eq!(record.year, Some(2002));
    assert_eq!(record.publishers, vec!["Houghton Mifflin"]);

    let calls = provider.calls();
    assert_eq!((calls.text, calls.fetch), (1, 1));
    // search plus fetch
    assert_eq!(r.window().admitted_in_window(), 2);
}

#[tokio::test]
async fn stale_native_id_falls_back_to_search() {
    let provider = Arc::new(MockProvider::google_books());
    let r = resolver(provider.clone(), ResolverSettings::default());

    let q = Query::title("Good Omens")
        .with_author("Terry Pratchett, Neil Gaiman")
        .with_id(IdKind::GoogleBooks, "gone");
    let record = r
        .resolve(&q, &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        record.name,
        "Good Omens: The Nice and Accurate Prophecies of Agnes Nutter, Witch"
    );
    assert_eq!(provider.calls().fetch, 2);
}

#[tokio::test]
async fn nothing_found_resolves_to_none() {
    let provider = Arc::new(MockProvider::google_books());
    let r = resolver(provider.clone(), ResolverSettings::default());

    let out = r
        .resolve(&Query::title("Nonexistent Novel"), &CancellationToken::new())
        .await
        .unwrap();
    assert!(out.is_none());
    assert_eq!(provider.calls().fetch, 0);
}

#[tokio::test]
async fn failing_fetch_degrades_to_none() {
    let (provider, ctl) = dynamic_google();
    ctl.set_fetch_behavior(
        "abc",
        MockBehavior::Fail(ShelfmarkError::unavailable(Source::GoogleBooks, "boom")),
    )
    .await;
    let r = resolver(provider, ResolverSettings::default());

    let q = Query::default().with_id(IdKind::GoogleBooks, "abc");
    let out = r.resolve(&q, &CancellationToken::new()).await.unwrap();
    assert!(out.is_none());
    assert_eq!(
        ctl.calls().await,
        vec![RecordedCall::Fetch("abc".to_string())]
    );
}

#[tokio::test]
async fn foreign_native_id_is_ignored() {
    let provider = Arc::new(MockProvider::google_books());
    let r = resolver(provider.clone(), ResolverSettings::default());

    let q = Query::title("Dune")
        .with_author("Frank Herbert")
        .with_id(IdKind::OpenLibrary, "/works/OL893415W");
    let record = r
        .resolve(&q, &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.name, "Dune");
    assert_eq!(provider.calls().text, 1);
}
