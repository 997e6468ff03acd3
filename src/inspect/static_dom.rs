//! In-memory [`DomSource`] used by the integration tests and examples.
//!
//! Supports the small selector subset the tests need (`#id`, `.class`,
//! bare tag names) and lets staleness and detachment be injected so the
//! failure paths can be exercised without a browser.

use crate::error::{BrowserError, Result};
use crate::inspect::source::{BoundingBox, DomSource, NodeId, PageMeta, Viewport};
use indexmap::IndexMap;

#[derive(Debug)]
struct StaticNode {
    tag: String,
    attrs: IndexMap<String, String>,
    text: String,
    bounding_box: Option<BoundingBox>,
    hidden: bool,
    children: Vec<NodeId>,
}

/// A fixed document tree behind the [`DomSource`] boundary.
#[derive(Debug)]
pub struct StaticDom {
    nodes: Vec<StaticNode>,
    meta: PageMeta,
    viewport: Viewport,
    /// When set, `children` of this node fails with `StaleDocument`,
    /// simulating the page navigating away mid-traversal.
    stale_children_of: Option<NodeId>,
}

impl StaticDom {
    pub fn new(url: &str, title: &str, viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            nodes: Vec::new(),
            meta: PageMeta {
                url: url.to_string(),
                title: title.to_string(),
            },
            viewport: Viewport {
                width: viewport_width,
                height: viewport_height,
            },
            stale_children_of: None,
        }
    }

    /// Add a node; pass `None` for the document root. Nodes get a default
    /// on-screen layout box stacked top to bottom.
    pub fn add_node(
        &mut self,
        parent: Option<NodeId>,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let y = 24.0 * self.nodes.len() as f64;
        self.nodes.push(StaticNode {
            tag: tag.to_ascii_lowercase(),
            attrs: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            text: String::new(),
            bounding_box: Some(BoundingBox {
                x: 0.0,
                y,
                width: 100.0,
                height: 20.0,
            }),
            hidden: false,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        self.nodes[node.0].text = text.to_string();
    }

    pub fn set_box(&mut self, node: NodeId, x: f64, y: f64, width: f64, height: f64) {
        self.nodes[node.0].bounding_box = Some(BoundingBox {
            x,
            y,
            width,
            height,
        });
    }

    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        self.nodes[node.0].hidden = hidden;
    }

    /// Simulate a node handle going stale: its layout box disappears, so
    /// descriptor building for it fails and the node is skipped.
    pub fn detach(&mut self, node: NodeId) {
        self.nodes[node.0].bounding_box = None;
    }

    /// Make `children` of the given node fail with `StaleDocument`.
    pub fn poison_children(&mut self, node: NodeId) {
        self.stale_children_of = Some(node);
    }

    fn get(&self, node: NodeId) -> Result<&StaticNode> {
        self.nodes.get(node.0).ok_or(BrowserError::DetachedNode)
    }

    fn matches_selector(&self, node: &StaticNode, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            return node.attrs.get("id").map(String::as_str) == Some(id);
        }
        if let Some(class) = selector.strip_prefix('.') {
            return node
                .attrs
                .get("class")
                .is_some_and(|classes| classes.split_whitespace().any(|token| token == class));
        }
        node.tag == selector.to_ascii_lowercase()
    }
}

impl DomSource for StaticDom {
    fn resolve(&self, selector: &str) -> Result<Option<NodeId>> {
        // Nodes are stored in insertion order, which the tests keep equal
        // to document order, so the first hit is the first match.
        for (index, node) in self.nodes.iter().enumerate() {
            if self.matches_selector(node, selector) {
                return Ok(Some(NodeId(index)));
            }
        }
        Ok(None)
    }

    fn children(&self, node: NodeId) -> Result<Vec<NodeId>> {
        if self.stale_children_of == Some(node) {
            return Err(BrowserError::StaleDocument(
                "page navigated during traversal".to_string(),
            ));
        }
        Ok(self.get(node)?.children.clone())
    }

    fn tag(&self, node: NodeId) -> Result<String> {
        Ok(self.get(node)?.tag.clone())
    }

    fn attributes(&self, node: NodeId) -> Result<IndexMap<String, String>> {
        Ok(self.get(node)?.attrs.clone())
    }

    fn text(&self, node: NodeId) -> Result<String> {
        Ok(self.get(node)?.text.clone())
    }

    fn bounding_box(&self, node: NodeId) -> Result<Option<BoundingBox>> {
        Ok(self.get(node)?.bounding_box)
    }

    fn is_hidden_by_style(&self, node: NodeId) -> Result<bool> {
        Ok(self.get(node)?.hidden)
    }

    fn viewport_size(&self) -> Result<Viewport> {
        Ok(self.viewport)
    }

    fn page_meta(&self) -> Result<PageMeta> {
        Ok(self.meta.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_first_match_in_document_order() {
        let mut dom = StaticDom::new("about:blank", "", 800, 600);
        let body = dom.add_node(None, "body", &[]);
        let first = dom.add_node(Some(body), "div", &[("class", "card")]);
        let _second = dom.add_node(Some(body), "div", &[("class", "card")]);

        assert_eq!(dom.resolve(".card").unwrap(), Some(first));
        assert_eq!(dom.resolve("body").unwrap(), Some(body));
        assert_eq!(dom.resolve("#missing").unwrap(), None);
    }

    #[test]
    fn test_poisoned_children_fail() {
        let mut dom = StaticDom::new("about:blank", "", 800, 600);
        let body = dom.add_node(None, "body", &[]);
        dom.poison_children(body);

        assert!(matches!(
            dom.children(body),
            Err(BrowserError::StaleDocument(_))
        ));
    }
}
