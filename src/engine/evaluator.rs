// src/engine/evaluator.rs

//! Per-resource evaluation pipeline.
//!
//! fetch -> extract -> digest -> cache lookup -> decide -> dispatch -> cache
//! update, one resource at a time. Each capability sits behind a trait so
//! tests can substitute deterministic fakes.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::cache::DigestStore;
use crate::digest::Digester;
use crate::errors::{HookwatchError, Result};
use crate::extract::{BlockRange, Extractor, LineBlockExtractor};
use crate::fetch::Fetcher;
use crate::resource::{load_descriptor, Resource};
use crate::trigger::{should_trigger, DispatchOutcome, TriggerBackend, TriggerDispatcher};

/// What happened to one resource.
#[derive(Debug)]
pub enum Evaluation {
    /// Descriptor unreadable, URL missing or markers invalid.
    Skipped(HookwatchError),
    /// Fetch failed; nothing was triggered or stored.
    FetchFailed(HookwatchError),
    /// Digest matches the stored one.
    Unchanged { digest: String },
    /// Change detected (or forced) and the trigger was dispatched.
    Triggered {
        digest: String,
        outcome: DispatchOutcome,
    },
}

/// Sequential evaluator owning every pipeline capability.
pub struct Evaluator {
    fetcher: Box<dyn Fetcher>,
    extractor: Box<dyn Extractor>,
    digester: Box<dyn Digester>,
    store: Box<dyn DigestStore>,
    dispatcher: TriggerDispatcher,
    force: bool,
    digest_label: String,
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator")
            .field("dispatcher", &self.dispatcher)
            .field("force", &self.force)
            .field("digest_label", &self.digest_label)
            .finish_non_exhaustive()
    }
}

impl Evaluator {
    /// Build an evaluator with the default line extractor.
    pub fn new(
        fetcher: impl Fetcher + 'static,
        digester: impl Digester + 'static,
        store: impl DigestStore + 'static,
        backend: impl TriggerBackend + 'static,
        dry_run: bool,
    ) -> Self {
        Self {
            fetcher: Box::new(fetcher),
            extractor: Box::new(LineBlockExtractor),
            digester: Box::new(digester),
            store: Box::new(store),
            dispatcher: TriggerDispatcher::new(backend, dry_run),
            force: false,
            digest_label: "digest".to_string(),
        }
    }

    /// Trigger every resource regardless of its stored digest.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Replace the block extractor.
    pub fn with_extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Box::new(extractor);
        self
    }

    /// Label used when logging digests (e.g. `sha256`).
    pub fn with_digest_label(mut self, label: impl Into<String>) -> Self {
        self.digest_label = label.into();
        self
    }

    pub fn store(&self) -> &dyn DigestStore {
        self.store.as_ref()
    }

    /// Load a descriptor and evaluate the resource it describes.
    ///
    /// Only cache IO errors are returned as `Err`; everything else is
    /// reported through [`Evaluation`].
    pub async fn evaluate_descriptor(
        &mut self,
        path: &Path,
        pattern: &str,
        substitute: bool,
    ) -> Result<Evaluation> {
        match load_descriptor(path, pattern, substitute) {
            Ok(resource) => self.evaluate(&resource).await,
            Err(err) => {
                warn!(descriptor = ?path, error = %err, "invalid descriptor; skipping");
                Ok(Evaluation::Skipped(err))
            }
        }
    }

    /// Evaluate a single resource.
    pub async fn evaluate(&mut self, resource: &Resource) -> Result<Evaluation> {
        let name = resource.name.as_str();

        if resource.url.is_empty() {
            let err = HookwatchError::MissingUrl(name.to_string());
            warn!(resource = %name, "{err}; skipping");
            return Ok(Evaluation::Skipped(err));
        }

        let range = match BlockRange::for_resource(resource) {
            Ok(range) => range,
            Err(err) => {
                warn!(resource = %name, error = %err, "skipping resource");
                return Ok(Evaluation::Skipped(err));
            }
        };

        debug!(resource = %name, url = %resource.url, "fetching");
        let content = match self.fetcher.fetch(&resource.url).await {
            Ok(content) => content,
            Err(err) => {
                warn!(resource = %name, error = %err, "fetch failed; skipping this cycle");
                return Ok(Evaluation::FetchFailed(err));
            }
        };

        let digest = {
            let block = self.extractor.extract(&content, &range);
            debug!(resource = %name, bytes = block.len(), "extracted block");
            self.digester.digest(&block)
        };
        drop(content);

        let stored = self.store.lookup(name)?;
        info!(
            resource = %name,
            algorithm = %self.digest_label,
            digest = %digest,
            previous = stored.as_deref().unwrap_or("-"),
            "computed digest"
        );

        if !should_trigger(self.force, stored.as_deref(), &digest) {
            debug!(resource = %name, "content unchanged");
            return Ok(Evaluation::Unchanged { digest });
        }

        if stored.is_none() {
            info!(resource = %name, "no previous digest; treating as changed");
        } else if self.force && stored.as_deref() == Some(digest.as_str()) {
            info!(resource = %name, "content unchanged but trigger forced");
        } else {
            info!(resource = %name, "content changed");
        }

        let outcome = self.dispatcher.dispatch(resource).await;

        // Recorded even when the trigger failed: "content seen" and "trigger
        // succeeded" are tracked independently.
        self.store.upsert(name, &digest)?;

        Ok(Evaluation::Triggered { digest, outcome })
    }
}
