use crate::dom::Page;
use crate::error::{Result, ScanError};
use crate::fetch::Fetcher;
use crate::result::FetchedPage;
use regex::RegexBuilder;
use std::collections::BTreeSet;
use tracing::{debug, info};

pub const DEFAULT_BASE_URL: &str = "https://www.cfcunderwriting.com/en-gb/";
pub const DEFAULT_LINK_PATTERN: &str = "privacy.+policy";

#[derive(Debug, Clone)]
pub struct LinkOptions {
    /// Prefix for hrefs that are not already absolute.
    pub base_url: String,
    /// Case-insensitive regex searched for in each anchor's text.
    pub pattern: String,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pattern: DEFAULT_LINK_PATTERN.to_string(),
        }
    }
}

/// Distinct hrefs of anchors whose text matches `pattern`.
pub fn privacy_link_candidates(page: &Page, pattern: &str) -> Result<BTreeSet<String>> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ScanError::InvalidArgument(format!("link pattern '{}': {}", pattern, e)))?;

    let mut candidates = BTreeSet::new();
    for link in page.links() {
        let text = link.text();
        if !regex.is_match(&text) {
            continue;
        }
        match link.attr("href") {
            Some(href) => {
                debug!("Candidate link '{}' -> {}", text.trim(), href);
                candidates.insert(href.to_string());
            }
            None => debug!("Anchor '{}' matches but has no href, skipping", text.trim()),
        }
    }

    Ok(candidates)
}

/// The single privacy-policy href on `page`. No disambiguation is attempted.
pub fn select_privacy_link(page: &Page, pattern: &str) -> Result<String> {
    let candidates = privacy_link_candidates(page, pattern)?;

    if candidates.len() > 1 {
        return Err(ScanError::AmbiguousResult(candidates.into_iter().collect()));
    }

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| ScanError::NotFound(pattern.to_string()))
}

/// Absolute hrefs pass through. Anything else is appended to `base_url` as-is.
pub fn resolve_link(href: &str, base_url: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", base_url, href)
    }
}

pub fn locate_privacy_policy(page: &Page, options: &LinkOptions) -> Result<String> {
    let href = select_privacy_link(page, &options.pattern)?;
    let url = resolve_link(&href, &options.base_url);
    info!("Privacy policy link resolved to {}", url);
    Ok(url)
}

/// Locate the privacy-policy link on `page` and fetch the page it points to.
pub async fn fetch_privacy_policy(
    fetcher: &Fetcher,
    page: &Page,
    options: &LinkOptions,
) -> Result<FetchedPage> {
    let url = locate_privacy_policy(page, options)?;
    fetcher.fetch(&url).await
}
