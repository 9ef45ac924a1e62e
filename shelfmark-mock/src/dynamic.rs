use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use shelfmark_core::{ProviderClient, RawRecord, RawResult, ShelfmarkError, Source};

/// Instruction for how a method should behave for a given input.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(ShelfmarkError),
    /// Hang indefinitely (simulate a stalled request).
    Hang,
}

/// One call observed by a [`DynamicMockProvider`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedCall {
    /// `search_by_identifier(isbn)`.
    Identifier(String),
    /// `search_by_title_author(title, author)`.
    Text(String, Option<String>),
    /// `fetch_by_native_id(id)`.
    Fetch(String),
}

#[derive(Default)]
struct InternalState {
    identifier_rules: HashMap<String, MockBehavior<Option<RawResult>>>,
    text_rules: HashMap<String, MockBehavior<Option<RawResult>>>,
    fetch_rules: HashMap<String, MockBehavior<Option<RawRecord>>>,
    calls: Vec<RecordedCall>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
#[derive(Clone)]
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `search_by_identifier` calls for a specific ISBN.
    pub async fn set_identifier_behavior(
        &self,
        isbn: impl Into<String>,
        behavior: MockBehavior<Option<RawResult>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.identifier_rules.insert(isbn.into(), behavior);
    }

    /// Set the behavior for `search_by_title_author` calls for a specific title.
    pub async fn set_text_behavior(
        &self,
        title: impl Into<String>,
        behavior: MockBehavior<Option<RawResult>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.text_rules.insert(title.into(), behavior);
    }

    /// Set the behavior for `fetch_by_native_id` calls for a specific id.
    pub async fn set_fetch_behavior(
        &self,
        id: impl Into<String>,
        behavior: MockBehavior<Option<RawRecord>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.fetch_rules.insert(id.into(), behavior);
    }

    /// Return a copy of the call log.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().await.calls.clone()
    }

    /// Clear all configured behaviors and the call log.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.identifier_rules.clear();
        guard.text_rules.clear();
        guard.fetch_rules.clear();
        guard.calls.clear();
    }
}

/// A provider that defers all behavior to an external controller.
///
/// Inputs without a configured behavior answer `Ok(None)`.
pub struct DynamicMockProvider {
    name: &'static str,
    source: Source,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockProvider {
    /// Create a new dynamic mock provider and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
        source: Source,
    ) -> (Arc<dyn ProviderClient>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self {
            name,
            source,
            state,
        });
        (me as Arc<dyn ProviderClient>, controller)
    }
}

async fn play<T>(behavior: Option<MockBehavior<Option<T>>>) -> Result<Option<T>, ShelfmarkError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => std::future::pending().await,
        None => Ok(None),
    }
}

#[async_trait]
impl ProviderClient for DynamicMockProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn source(&self) -> Source {
        self.source
    }

    async fn search_by_identifier(&self, isbn: &str) -> Result<Option<RawResult>, ShelfmarkError> {
        // Snapshot the behavior without holding the lock across the await below
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(RecordedCall::Identifier(isbn.to_string()));
            guard.identifier_rules.get(isbn).cloned()
        };
        play(behavior).await
    }

    async fn search_by_title_author(
        &self,
        title: &str,
        author: Option<&str>,
    ) -> Result<Option<RawResult>, ShelfmarkError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(RecordedCall::Text(
                title.to_string(),
                author.map(str::to_string),
            ));
            guard.text_rules.get(title).cloned()
        };
        play(behavior).await
    }

    async fn fetch_by_native_id(&self, id: &str) -> Result<Option<RawRecord>, ShelfmarkError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.calls.push(RecordedCall::Fetch(id.to_string()));
            guard.fetch_rules.get(id).cloned()
        };
        play(behavior).await
    }
}
