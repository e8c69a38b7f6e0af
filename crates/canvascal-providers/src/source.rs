//! EventSource trait definition.
//!
//! An [`EventSource`] is the fetch collaborator: it delivers the student's
//! course events once per request. Sources do not cache, retry or reconcile
//! between fetches; every call yields a complete, independent list.

use std::future::Future;
use std::pin::Pin;

use canvascal_core::CanvasEvent;

use crate::error::{ProviderError, ProviderResult};

/// A boxed future for async trait methods.
///
/// Boxed futures keep the trait object-safe so the client can hold a
/// `Box<dyn EventSource>` chosen from configuration.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The core abstraction for event backends.
///
/// # Example Implementation
///
/// ```ignore
/// struct StaticSource(Vec<CanvasEvent>);
///
/// impl EventSource for StaticSource {
///     fn name(&self) -> &str { "static" }
///
///     fn fetch_events(&self) -> BoxFuture<'_, ProviderResult<Vec<CanvasEvent>>> {
///         let events = self.0.clone();
///         Box::pin(async move { Ok(events) })
///     }
/// }
/// ```
pub trait EventSource: Send + Sync {
    /// Returns the name of this source (e.g. "mock", "file").
    fn name(&self) -> &str;

    /// Fetches all events.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the source cannot be read or its data is
    /// malformed. No partial list is returned on failure.
    fn fetch_events(&self) -> BoxFuture<'_, ProviderResult<Vec<CanvasEvent>>>;
}

/// A source that always fails.
///
/// Used in tests and as a placeholder when a source fails to initialize.
#[derive(Debug)]
pub struct ErrorSource {
    name: String,
    error: ProviderError,
}

impl ErrorSource {
    /// Creates a new error source.
    pub fn new(name: impl Into<String>, error: ProviderError) -> Self {
        Self {
            name: name.into(),
            error,
        }
    }
}

impl EventSource for ErrorSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_events(&self) -> BoxFuture<'_, ProviderResult<Vec<CanvasEvent>>> {
        // ProviderError is not Clone; rebuild it from its parts
        let error =
            ProviderError::new(self.error.code(), self.error.message()).with_provider(&self.name);
        Box::pin(async move { Err(error) })
    }
}
