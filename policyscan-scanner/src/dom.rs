use scraper::{ElementRef, Html, Node};

/// Elements whose text never renders.
const INVISIBLE_TAGS: [&str; 4] = ["script", "style", "template", "noscript"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Tag,
    Text,
    Comment,
    Document,
    /// Doctype and processing instructions.
    Declaration,
}

/// A node of a parsed page, borrowed from the owning [`Page`].
#[derive(Debug, Clone, Copy)]
pub enum PageNode<'a> {
    Tag(ElementRef<'a>),
    Text(&'a str),
    Comment(&'a str),
    Document,
    Declaration,
}

impl<'a> PageNode<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            PageNode::Tag(_) => NodeKind::Tag,
            PageNode::Text(_) => NodeKind::Text,
            PageNode::Comment(_) => NodeKind::Comment,
            PageNode::Document => NodeKind::Document,
            PageNode::Declaration => NodeKind::Declaration,
        }
    }

    pub fn tag_name(&self) -> Option<&'a str> {
        match self {
            PageNode::Tag(element) => Some(element.value().name()),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        match self {
            PageNode::Tag(element) => element.value().attr(name),
            _ => None,
        }
    }

    /// Concatenated text of this node and everything beneath it.
    pub fn text(&self) -> String {
        match self {
            PageNode::Tag(element) => element.text().collect(),
            PageNode::Text(text) => text.to_string(),
            _ => String::new(),
        }
    }
}

/// A parsed HTML document. Parsing is best-effort and never fails.
pub struct Page {
    html: Html,
}

impl Page {
    pub fn parse(bytes: &[u8]) -> Self {
        let source = String::from_utf8_lossy(bytes);
        Self::parse_str(&source)
    }

    pub fn parse_str(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    pub fn root(&self) -> PageNode<'_> {
        PageNode::Document
    }

    /// Every node under the document root, depth-first pre-order, root excluded.
    ///
    /// `<template>` contents live under a fragment node. The fragment itself
    /// is skipped and its children are visited in place, so
    /// [`PageNode::Document`] only ever comes from [`Page::root`].
    pub fn descendants(&self) -> impl Iterator<Item = PageNode<'_>> + '_ {
        self.html
            .tree
            .root()
            .descendants()
            .skip(1)
            .filter_map(|node| match node.value() {
                Node::Element(_) => {
                    Some(ElementRef::wrap(node).map_or(PageNode::Declaration, PageNode::Tag))
                }
                Node::Text(text) => Some(PageNode::Text(text)),
                Node::Comment(comment) => Some(PageNode::Comment(comment)),
                Node::Document | Node::Fragment => None,
                _ => Some(PageNode::Declaration),
            })
    }

    /// Anchor elements in document order.
    pub fn links(&self) -> impl Iterator<Item = PageNode<'_>> + '_ {
        self.descendants()
            .filter(|node| node.tag_name() == Some("a"))
    }

    /// Rendered text: each text node trimmed, empties skipped, joined by one space.
    pub fn visible_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();

        for node in self.html.tree.root().descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };

            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|el| INVISIBLE_TAGS.contains(&el.name()))
                    .unwrap_or(false)
            });
            if hidden {
                continue;
            }

            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }

        parts.join(" ")
    }
}
