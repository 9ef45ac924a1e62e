use std::sync::Arc;

use shelfmark::{CancellationToken, IdKind, Query, Shelfmark};
use shelfmark_mock::{MockProvider, RecordedCall};

use crate::helpers::dynamic_google;

#[tokio::test]
async fn first_source_with_a_record_wins() {
    let google = Arc::new(MockProvider::google_books());
    let open_library = Arc::new(MockProvider::open_library());
    let sm = Shelfmark::builder()
        .with_provider(open_library.clone())
        .with_provider(google.clone())
        .build()
        .unwrap();

    let record = sm
        .resolve(
            &Query::title("Dune").with_author("Frank Herbert"),
            &CancellationToken::new(),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.ids.get(IdKind::GoogleBooks), Some("B1hSG45JCX4C"));
    assert_eq!(open_library.calls().total(), 0);
}

#[tokio::test]
async fn falls_through_to_next_source() {
    let (google, ctl) = dynamic_google();
    let open_library = Arc::new(MockProvider::open_library());
    let sm = Shelfmark::builder()
        .with_provider(google)
        .with_provider(open_library.clone())
        .build()
        .unwrap();

    let record = sm
        .resolve(
            &Query::title("The Hobbit").with_author("J.R.R. Tolkien"),
            &CancellationToken::new(),
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(record.name, "The Hobbit: There and Back Again");
    assert_eq!(
        record.overview.as_deref(),
        Some("In a hole in the ground there lived a hobbit.")
    );
    assert_eq!(
        ctl.calls().await,
        vec![RecordedCall::Text(
            "The Hobbit".to_string(),
            Some("J.R.R. Tolkien".to_string())
        )]
    );
    assert_eq!(open_library.calls().fetch, 1);
}

#[tokio::test]
async fn unknown_book_resolves_to_none_everywhere() {
    let google = Arc::new(MockProvider::google_books());
    let open_library = Arc::new(MockProvider::open_library());
    let sm = Shelfmark::builder()
        .with_provider(google.clone())
        .with_provider(open_library.clone())
        .build()
        .unwrap();

    let out = sm
        .resolve(&Query::title("Nonexistent Novel"), &CancellationToken::new())
        .await
        .unwrap();
    assert!(out.is_none());
    assert_eq!(google.calls().text, 1);
    assert_eq!(open_library.calls().text, 1);
}

#[tokio::test]
async fn cancelled_resolve_stops_before_any_source() {
    let google = Arc::new(MockProvider::google_books());
    let sm = Shelfmark::builder()
        .with_provider(google.clone())
        .build()
        .unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = sm
        .resolve(&Query::title("Dune"), &cancel)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(google.calls().total(), 0);
}
