#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use hookwatch::config::model::{DEFAULT_CACHE_FILE, DEFAULT_CHECKSUM, DEFAULT_PATTERN};
use hookwatch::config::{RawSettings, Settings};
use hookwatch::resource::Resource;
use tempfile::TempDir;

/// Temporary resources directory populated with descriptor files.
///
/// The directory (and the cache file inside it) is removed on drop.
pub struct DescriptorDir {
    dir: TempDir,
}

impl DescriptorDir {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("creating temp resources dir"),
        }
    }

    /// Write a descriptor file named `file_name` with `contents`.
    pub fn with_descriptor(self, file_name: &str, contents: &str) -> Self {
        self.write(file_name, contents);
        self
    }

    pub fn write(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(file_name);
        fs::write(&path, contents).expect("writing descriptor");
        path
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Default cache location for this directory.
    pub fn cache_path(&self) -> PathBuf {
        self.dir.path().join(DEFAULT_CACHE_FILE)
    }

    /// Cache file contents, or `None` if it was never written.
    pub fn cache_contents(&self) -> Option<String> {
        fs::read_to_string(self.cache_path()).ok()
    }

    /// Raw settings pointing at this directory with one-shot defaults.
    pub fn raw_settings(&self) -> RawSettings {
        RawSettings {
            resources_dir: self.path().to_path_buf(),
            cache_path: self.cache_path(),
            pattern: DEFAULT_PATTERN.to_string(),
            checksum: DEFAULT_CHECKSUM.to_string(),
            interval: None,
            dry_run: false,
            substitute: true,
            force: false,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings::try_from(self.raw_settings()).expect("valid settings for temp dir")
    }
}

impl Default for DescriptorDir {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `Resource` to simplify test setup.
pub struct ResourceBuilder {
    resource: Resource,
}

impl ResourceBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            resource: Resource::new(name),
        }
    }

    pub fn url(mut self, url: &str) -> Self {
        self.resource.url = url.to_string();
        self
    }

    pub fn start(mut self, pattern: &str) -> Self {
        self.resource.start = pattern.to_string();
        self
    }

    pub fn end(mut self, pattern: &str) -> Self {
        self.resource.end = pattern.to_string();
        self
    }

    pub fn hook(mut self, url: &str) -> Self {
        self.resource.hook = url.to_string();
        self
    }

    pub fn request(mut self, method: &str) -> Self {
        self.resource.request = method.to_string();
        self
    }

    pub fn freeform(mut self, command: &str) -> Self {
        self.resource.freeform = command.to_string();
        self
    }

    pub fn build(self) -> Resource {
        self.resource
    }
}
