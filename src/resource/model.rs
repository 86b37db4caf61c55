// src/resource/model.rs

use std::path::PathBuf;
use std::str::FromStr;

/// HTTP method used for hooks when REQUEST is unset.
pub const DEFAULT_REQUEST_METHOD: &str = "GET";

/// One monitored resource, built fresh from a single descriptor file.
///
/// Unset fields are empty strings; nothing carries over between
/// descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    /// Descriptor file name minus the pattern suffix.
    pub name: String,
    /// Descriptor the resource was loaded from.
    pub descriptor: PathBuf,
    pub url: String,
    pub start: String,
    pub end: String,
    pub hook: String,
    pub request: String,
    pub freeform: String,
}

impl Resource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Effective hook method.
    pub fn request_method(&self) -> &str {
        if self.request.is_empty() {
            DEFAULT_REQUEST_METHOD
        } else {
            &self.request
        }
    }

    pub(crate) fn assign(&mut self, key: DescriptorKey, value: String) {
        let slot = match key {
            DescriptorKey::Url => &mut self.url,
            DescriptorKey::Start => &mut self.start,
            DescriptorKey::End => &mut self.end,
            DescriptorKey::Hook => &mut self.hook,
            DescriptorKey::Request => &mut self.request,
            DescriptorKey::Freeform => &mut self.freeform,
        };
        *slot = value;
    }
}

/// Keys recognised in descriptor files (case-sensitive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKey {
    Url,
    Start,
    End,
    Hook,
    Request,
    Freeform,
}

impl FromStr for DescriptorKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "URL" => Ok(DescriptorKey::Url),
            "START" => Ok(DescriptorKey::Start),
            "END" => Ok(DescriptorKey::End),
            "HOOK" => Ok(DescriptorKey::Hook),
            "REQUEST" => Ok(DescriptorKey::Request),
            "FREEFORM" => Ok(DescriptorKey::Freeform),
            other => Err(format!(
                "unknown key '{other}' (expected URL, START, END, HOOK, REQUEST or FREEFORM)"
            )),
        }
    }
}
