use std::sync::Arc;

use shelfmark::{CancellationToken, IdKind, Query, Shelfmark, Source};
use shelfmark_core::isbn::fill_query_isbn;
use shelfmark_mock::MockProvider;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,shelfmark=debug,shelfmark_middleware=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    let shelfmark = Shelfmark::builder()
        .with_provider(Arc::new(MockProvider::google_books()))
        .with_provider(Arc::new(MockProvider::open_library()))
        .rate_limit(Source::GoogleBooks, 5)
        .fuzzy_match_threshold(80)
        .build()?;
    let cancel = CancellationToken::new();

    // Title with a trailing author, plus an ISBN pulled out of a file name
    let mut query = Query::title("Dune by Frank Herbert");
    fill_query_isbn(&mut query, "Frank Herbert - Dune [978-0-441-01359-3].epub");
    println!("query: {query:?}");

    for hit in shelfmark.search(&query, &cancel).await? {
        println!(
            "{:>3}  {:<14} {} ({})",
            hit.score,
            hit.candidate.source.name(),
            hit.candidate.name,
            hit.candidate.year.map_or_else(|| "?".to_string(), |y| y.to_string()),
        );
    }

    // Served from cache; no rate admission consumed
    let again = shelfmark.search(&query, &cancel).await?;
    println!("cached hits: {}", again.len());

    let hobbit = Query::title("The Hobbit").with_author("J.R.R. Tolkien");
    if let Some(record) = shelfmark.resolve(&hobbit, &cancel).await? {
        println!(
            "resolved: {} by {} [{}]",
            record.name,
            record.authors.join(", "),
            record.ids.get(IdKind::Isbn).unwrap_or("-"),
        );
    }

    Ok(())
}
