//! Pluggable dataset sources.
//!
//! External crates implement this to provide dataset bytes from wherever
//! they live (bundled asset, HTTP fetch, local file).

use std::future::Future;
use std::pin::Pin;

use crate::models::types::Result;

/// Fetch the raw stop dataset as bytes.
///
/// A fetch is single-shot: exactly one completion, success or failure.
/// Failures surface as [`LoadError::SourceUnavailable`](crate::LoadError).
pub trait StopSource: Send + Sync {
    fn fetch<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;
}

/// A source backed by bytes already in memory.
///
/// Useful for bundled datasets and tests.
pub struct InMemorySource {
    bytes: Vec<u8>,
}

impl InMemorySource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl StopSource for InMemorySource {
    fn fetch<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(std::future::ready(Ok(self.bytes.clone())))
    }
}
