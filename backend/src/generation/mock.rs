//! In-memory provider for tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::provider::{ChatCompletion, ChatCompletionProvider, ChatCompletionRequest, ProviderError};

type Reply = Box<dyn Fn() -> Result<ChatCompletion, ProviderError> + Send + Sync>;

/// Provider stand-in that returns a canned reply and counts calls
pub struct StubProvider {
    reply: Reply,
    calls: AtomicUsize,
    last_request: Mutex<Option<(String, ChatCompletionRequest)>>,
}

impl StubProvider {
    /// Stub that always answers with `completion`
    #[must_use]
    pub fn replying(completion: ChatCompletion) -> Self {
        Self::with_reply(Box::new(move || Ok(completion.clone())))
    }

    /// Stub that always fails with the error built by `make_error`
    #[must_use]
    pub fn failing<F>(make_error: F) -> Self
    where
        F: Fn() -> ProviderError + Send + Sync + 'static,
    {
        Self::with_reply(Box::new(move || Err(make_error())))
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of times `complete` was called
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Credential and request of the most recent call
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn last_request(&self) -> Option<(String, ChatCompletionRequest)> {
        self.last_request.lock().expect("stub lock poisoned").clone()
    }
}

#[async_trait::async_trait]
impl ChatCompletionProvider for StubProvider {
    async fn complete(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletion, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().expect("stub lock poisoned") =
            Some((api_key.to_string(), request.clone()));
        (self.reply)()
    }
}
