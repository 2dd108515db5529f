use crate::dom::{Page, PageNode};
use crate::error::{Result, ScanError};
use crate::result::ExternalResource;
use tracing::debug;
use url::Url;

pub const DEFAULT_DOMAIN: &str = "cfcunderwriting.com";

/// Stands in for the URI when a flagged element carries neither attribute.
pub const MISSING_URI: &str = "error";

/// Same-origin exclusion is off by default. When on, an http(s) URI whose
/// host is `domain` itself or ends in `.domain` is treated as local.
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    pub exclude_same_origin: bool,
    pub domain: String,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            exclude_same_origin: false,
            domain: DEFAULT_DOMAIN.to_string(),
        }
    }
}

pub struct Classifier {
    same_origin: Option<String>,
}

impl Classifier {
    pub fn new(options: &ClassifierOptions) -> Result<Self> {
        let same_origin = if options.exclude_same_origin {
            let domain = options.domain.trim().trim_matches('.').to_ascii_lowercase();
            if domain.is_empty() {
                return Err(ScanError::InvalidArgument(
                    "same-origin exclusion needs a domain".to_string(),
                ));
            }
            Some(domain)
        } else {
            None
        };

        Ok(Self { same_origin })
    }

    fn is_same_origin(&self, uri: &str) -> bool {
        let Some(ref domain) = self.same_origin else {
            return false;
        };
        if let Ok(parsed) = Url::parse(uri)
            && let Some(host) = parsed.host_str()
        {
            return host == domain.as_str() || host.ends_with(&format!(".{}", domain));
        }
        false
    }

    /// Whether a single descendant loads an external resource.
    ///
    /// Text, comment and declaration nodes are never external. Passing the
    /// document root is a usage error: the classifier does not recurse, so
    /// callers must hand it the flattened descendant traversal.
    pub fn loads_external_resource(&self, node: &PageNode<'_>) -> Result<bool> {
        match node {
            PageNode::Tag(_) => {
                if node.tag_name() == Some("a") {
                    return Ok(false);
                }

                let Some(uri) = node.attr("src").or_else(|| node.attr("href")) else {
                    return Ok(false);
                };
                if !uri.starts_with("http") {
                    return Ok(false);
                }

                if self.is_same_origin(uri) {
                    debug!("Skipping same-origin resource {}", uri);
                    return Ok(false);
                }

                Ok(true)
            }
            PageNode::Document => Err(ScanError::InvalidArgument(
                "classifier invoked on the document root; pass its descendants instead".to_string(),
            )),
            PageNode::Text(_) | PageNode::Comment(_) | PageNode::Declaration => Ok(false),
        }
    }

    pub fn classify(&self, node: &PageNode<'_>) -> Result<Option<ExternalResource>> {
        if !self.loads_external_resource(node)? {
            return Ok(None);
        }

        let uri = node
            .attr("src")
            .or_else(|| node.attr("href"))
            .unwrap_or(MISSING_URI);
        let tag = node.tag_name().unwrap_or_default();

        Ok(Some(ExternalResource::web(uri, tag)))
    }

    /// External resources of `page`, in document order.
    pub fn enumerate(&self, page: &Page) -> Result<Vec<ExternalResource>> {
        let mut resources = Vec::new();
        for node in page.descendants() {
            if let Some(resource) = self.classify(&node)? {
                debug!("External resource <{}> {}", resource.source_tag, resource.uri);
                resources.push(resource);
            }
        }
        Ok(resources)
    }
}

pub fn enumerate_external_resources(
    page: &Page,
    options: &ClassifierOptions,
) -> Result<Vec<ExternalResource>> {
    Classifier::new(options)?.enumerate(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeKind;
    use crate::error::ErrorKind;

    fn classify_all(html: &str, options: &ClassifierOptions) -> Vec<ExternalResource> {
        let page = Page::parse_str(html);
        enumerate_external_resources(&page, options).unwrap()
    }

    #[test]
    fn test_anchor_never_flagged() {
        let html = r#"<a href="http://other.com">x</a>
            <a src="https://cdn.example.com/a.js" href="http://other.com">y</a>
            <A HREF="https://shout.example.com">z</A>"#;

        assert!(classify_all(html, &ClassifierOptions::default()).is_empty());
    }

    #[test]
    fn test_http_src_or_href_flagged() {
        let html = r#"<html><head>
            <link rel="stylesheet" href="http://cdn.example.com/s.css">
            <script src="https://cdn.example.com/app.js"></script>
            </head><body>
            <img src="https://img.example.com/logo.png">
            <iframe src="http://video.example.com/embed"></iframe>
            </body></html>"#;

        let resources = classify_all(html, &ClassifierOptions::default());
        let found: Vec<(&str, &str)> = resources
            .iter()
            .map(|r| (r.source_tag.as_str(), r.uri.as_str()))
            .collect();

        assert_eq!(
            found,
            vec![
                ("link", "http://cdn.example.com/s.css"),
                ("script", "https://cdn.example.com/app.js"),
                ("img", "https://img.example.com/logo.png"),
                ("iframe", "http://video.example.com/embed"),
            ]
        );
    }

    #[test]
    fn test_stylesheet_anchor_and_local_image() {
        let html = r#"<link rel="stylesheet" href="http://cdn.example.com/s.css">
            <a href="http://other.com">privacy Policy</a>
            <img src="/local.png">"#;

        let resources = classify_all(html, &ClassifierOptions::default());
        assert_eq!(
            resources,
            vec![ExternalResource::web("http://cdn.example.com/s.css", "link")]
        );
    }

    #[test]
    fn test_relative_uris_not_flagged() {
        let html = r#"<img src="/local.png"><link href="style.css"><script src="//cdn.example.com/x.js"></script>"#;
        assert!(classify_all(html, &ClassifierOptions::default()).is_empty());
    }

    #[test]
    fn test_src_preferred_over_href() {
        let html = r#"<video src="https://media.example.com/v.mp4" href="https://other.example.com/"></video>
            <embed src="/relative.swf" href="https://other.example.com/">"#;

        let resources = classify_all(html, &ClassifierOptions::default());
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].uri, "https://media.example.com/v.mp4");
        assert_eq!(resources[0].source_tag, "video");
    }

    #[test]
    fn test_text_and_comment_nodes_are_false() {
        let page = Page::parse_str("<p>http://looks.like/a/link</p><!-- https://also.not -->");
        let classifier = Classifier::new(&ClassifierOptions::default()).unwrap();

        let mut checked = 0;
        for node in page.descendants() {
            if matches!(node.kind(), NodeKind::Text | NodeKind::Comment) {
                assert!(!classifier.loads_external_resource(&node).unwrap());
                checked += 1;
            }
        }
        assert_eq!(checked, 2);
    }

    #[test]
    fn test_document_root_is_invalid_argument() {
        let page = Page::parse_str("<img src='http://a.example.com/x.png'>");
        let classifier = Classifier::new(&ClassifierOptions::default()).unwrap();

        let err = classifier.loads_external_resource(&page.root()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_same_origin_exclusion_toggle() {
        let html = r#"<img src="https://www.cfcunderwriting.com/logo.png">
            <img src="https://assets.cfcunderwriting.com/a.png">
            <img src="https://cdn.other.com/b.png">"#;

        let all = classify_all(html, &ClassifierOptions::default());
        assert_eq!(all.len(), 3);

        let options = ClassifierOptions {
            exclude_same_origin: true,
            ..Default::default()
        };
        let external = classify_all(html, &options);
        assert_eq!(external.len(), 1);
        assert_eq!(external[0].uri, "https://cdn.other.com/b.png");
    }

    #[test]
    fn test_same_origin_matches_host_suffix_only() {
        let options = ClassifierOptions {
            exclude_same_origin: true,
            ..Default::default()
        };
        let html = r#"<img src="https://cfcunderwriting.com/apex.png">
            <img src="https://my-cdn.cfcunderwriting.com/dash.png">
            <img src="http://a.b.CFCUnderwriting.com/deep.png">
            <img src="https://www.cfcunderwriting.com.evil.net/spoof.png">
            <img src="https://notcfcunderwriting.com/lookalike.png">
            <img src="https://www.cfcunderwritingXcom.net/dot.png">"#;

        let uris: Vec<String> = classify_all(html, &options)
            .into_iter()
            .map(|r| r.uri)
            .collect();
        assert_eq!(
            uris,
            vec![
                "https://www.cfcunderwriting.com.evil.net/spoof.png",
                "https://notcfcunderwriting.com/lookalike.png",
                "https://www.cfcunderwritingXcom.net/dot.png",
            ]
        );
    }

    #[test]
    fn test_same_origin_needs_domain() {
        let options = ClassifierOptions {
            exclude_same_origin: true,
            domain: " . ".to_string(),
        };
        let err = Classifier::new(&options).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_template_and_svg_resources_flagged() {
        let html = r#"<template><img src="http://x.example.com/a.png"></template>
            <img src="http://y.example.com/b.png">
            <svg><image href="https://z.example.com/c.svg"/><a href="https://w.example.com/">w</a></svg>"#;

        let resources = classify_all(html, &ClassifierOptions::default());
        assert_eq!(
            resources,
            vec![
                ExternalResource::web("http://x.example.com/a.png", "img"),
                ExternalResource::web("http://y.example.com/b.png", "img"),
                ExternalResource::web("https://z.example.com/c.svg", "image"),
            ]
        );
    }
}
