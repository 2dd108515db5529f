use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Raw response of a single GET, plus the metadata we log and report.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub status_code: u16,
    pub content_type: Option<String>,
    pub response_time: Duration,
    pub body: Vec<u8>,
}

impl FetchedPage {
    pub fn new(url: String) -> Self {
        Self {
            url,
            status_code: 0,
            content_type: None,
            response_time: Duration::from_secs(0),
            body: Vec::new(),
        }
    }

    pub fn is_html(&self) -> bool {
        self.content_type
            .as_ref()
            .map(|ct| ct.contains("text/html"))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Web,
}

/// One element that loads content from an absolute http(s) address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalResource {
    pub uri: String,
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(rename = "tag")]
    pub source_tag: String,
}

impl ExternalResource {
    pub fn web(uri: impl Into<String>, source_tag: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            kind: ResourceKind::Web,
            source_tag: source_tag.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResources {
    pub url: String,
    pub web_resources: Vec<ExternalResource>,
}

impl PageResources {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            web_resources: Vec::new(),
        }
    }

    pub fn add_web_resource(&mut self, resource: ExternalResource) {
        self.web_resources.push(resource);
    }
}

/// Upper-cased token → occurrence count. Sorted so artifacts are stable.
pub type WordFrequency = BTreeMap<String, usize>;
