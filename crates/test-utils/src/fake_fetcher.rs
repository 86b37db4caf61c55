use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use hookwatch::errors::{HookwatchError, Result};
use hookwatch::fetch::Fetcher;
use hookwatch::types::BoxFuture;

/// A fake fetcher that:
/// - serves canned bodies per URL (unknown URLs fail like a DNS error)
/// - records every requested URL
///
/// Clones share state, so a test can keep a handle and change bodies
/// between cycles after moving a clone into the evaluator.
#[derive(Debug, Clone, Default)]
pub struct FakeFetcher {
    bodies: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.set_body(url, body);
        self
    }

    pub fn set_body(&self, url: &str, body: impl Into<Vec<u8>>) {
        self.bodies
            .lock()
            .unwrap()
            .insert(url.to_string(), body.into());
    }

    pub fn remove(&self, url: &str) {
        self.bodies.lock().unwrap().remove(url);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Fetcher for FakeFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>>> {
        Box::pin(async move {
            self.requests.lock().unwrap().push(url.to_string());
            self.bodies
                .lock()
                .unwrap()
                .get(url)
                .cloned()
                .ok_or_else(|| HookwatchError::fetch(url, "could not resolve host"))
        })
    }
}
