#![allow(dead_code)]

use std::sync::Arc;

use shelfmark::{ProviderClient, RawResult, ResolverSettings, Source, SourceResolver};
use shelfmark_core::google_books::{IndustryIdentifier, Volume, VolumeInfo, VolumesResponse};
use shelfmark_mock::{DynamicMockController, DynamicMockProvider};

pub const DUNE_ISBN: &str = "9780441013593";

/// A Google Books volume with the fields scoring looks at.
pub fn volume(id: &str, title: &str, published: Option<&str>, isbn: Option<&str>) -> Volume {
    Volume {
        id: Some(id.to_string()),
        volume_info: Some(VolumeInfo {
            title: Some(title.to_string()),
            published_date: published.map(str::to_string),
            industry_identifiers: isbn
                .map(|i| {
                    vec![IndustryIdentifier {
                        kind: Some("ISBN_13".into()),
                        identifier: Some(i.to_string()),
                    }]
                })
                .unwrap_or_default(),
            ..VolumeInfo::default()
        }),
    }
}

/// Wrap volumes into a search payload.
pub fn volumes(items: Vec<Volume>) -> Option<RawResult> {
    Some(RawResult::GoogleBooks(VolumesResponse {
        total_items: u32::try_from(items.len()).unwrap(),
        items,
    }))
}

/// "Dunes" (1965) and "Arrakis" (1970), in that order.
pub fn dunes_and_arrakis() -> Option<RawResult> {
    volumes(vec![
        volume("dunes-1", "Dunes", Some("1965"), None),
        volume("arrakis-1", "Arrakis", Some("1970-03-01"), None),
    ])
}

/// A dynamic Google Books provider plus its controller.
pub fn dynamic_google() -> (Arc<dyn ProviderClient>, DynamicMockController) {
    DynamicMockProvider::new_with_controller("dynamic-google", Source::GoogleBooks)
}

/// A resolver over `provider` with its own window and cache.
pub fn resolver(provider: Arc<dyn ProviderClient>, settings: ResolverSettings) -> SourceResolver {
    SourceResolver::new(provider, settings)
}
