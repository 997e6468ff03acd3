//! Collaborator boundary between the inspection core and a live document.
//!
//! The DOM is a host-owned, mutable graph. The core only ever sees it
//! through the narrow [`DomSource`] trait and opaque [`NodeId`] handles;
//! no handle is stored past one inspection call.

use crate::error::{BrowserError, Result};
use headless_chrome::Tab;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::sync::Arc;

/// Opaque handle to one element node. Only meaningful to the source that
/// issued it, and only for the duration of one inspection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(pub(crate) usize);

/// Layout box of an element in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Current viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Snapshot-time page identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub url: String,
    pub title: String,
}

/// Read-only view of a live document.
///
/// Every method may fail with [`BrowserError::StaleDocument`] when the page
/// navigated away or closed underneath the caller; the traversal engine
/// propagates that as a whole-call failure.
pub trait DomSource {
    /// Resolve a selector to at most one node: the first match in document
    /// order, or `None` when nothing matches.
    fn resolve(&self, selector: &str) -> Result<Option<NodeId>>;

    /// Child element nodes in document order.
    fn children(&self, node: NodeId) -> Result<Vec<NodeId>>;

    /// Lowercase tag name.
    fn tag(&self, node: NodeId) -> Result<String>;

    /// Attribute map in attribute order. Boolean HTML attributes carry an
    /// empty string value.
    fn attributes(&self, node: NodeId) -> Result<IndexMap<String, String>>;

    /// The node's own rendered text (its direct text children, not text
    /// inherited from descendant elements).
    fn text(&self, node: NodeId) -> Result<String>;

    /// Bounding client rectangle, or `None` when the node is detached.
    fn bounding_box(&self, node: NodeId) -> Result<Option<BoundingBox>>;

    /// Whether display/visibility/opacity styling hides the node.
    fn is_hidden_by_style(&self, node: NodeId) -> Result<bool>;

    /// Current viewport dimensions.
    fn viewport_size(&self) -> Result<Viewport>;

    /// Snapshot-time url and title.
    fn page_meta(&self) -> Result<PageMeta>;
}

/// Raw node shape produced by the capture script.
#[derive(Debug, Deserialize)]
struct RawNode {
    tag: String,
    /// Name/value pairs in attribute order.
    attrs: Vec<(String, String)>,
    text: String,
    #[serde(rename = "box")]
    bounding_box: Option<BoundingBox>,
    hidden: bool,
    #[serde(default)]
    children: Vec<RawNode>,
}

/// Raw envelope produced by the capture script.
#[derive(Debug, Deserialize)]
struct RawCapture {
    url: String,
    title: String,
    viewport: Viewport,
    root: Option<RawNode>,
}

/// One flattened snapshot node.
#[derive(Debug)]
struct SnapNode {
    tag: String,
    attrs: IndexMap<String, String>,
    text: String,
    bounding_box: Option<BoundingBox>,
    hidden: bool,
    children: Vec<NodeId>,
}

#[derive(Debug)]
struct Snapshot {
    meta: PageMeta,
    viewport: Viewport,
    nodes: Vec<SnapNode>,
    root: Option<NodeId>,
}

/// Live [`DomSource`] over a browser tab.
///
/// `resolve` captures the selected subtree in a single read-only CDP
/// evaluate (tag, attributes, own text, layout box, hidden flag per node)
/// and serves all further queries from that point-in-time capture, so one
/// inspection observes one atomic view of the page.
pub struct TabDomSource {
    tab: Arc<Tab>,
    snapshot: RefCell<Option<Snapshot>>,
}

impl TabDomSource {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self {
            tab,
            snapshot: RefCell::new(None),
        }
    }

    fn capture(&self, selector: &str) -> Result<Snapshot> {
        let selector_json = serde_json::to_string(selector)
            .map_err(|e| BrowserError::InvalidParams(format!("unencodable selector: {}", e)))?;
        let expression = format!("({})({})", include_str!("capture_dom.js"), selector_json);

        // An evaluate failure here means the document went away under us.
        let result = self
            .tab
            .evaluate(&expression, false)
            .map_err(|e| BrowserError::StaleDocument(e.to_string()))?;

        let value = result
            .value
            .ok_or_else(|| BrowserError::StaleDocument("no value from capture script".to_string()))?;

        let json: String = serde_json::from_value(value)
            .map_err(|e| BrowserError::SnapshotParse(format!("capture returned non-string: {}", e)))?;

        let raw: RawCapture = serde_json::from_str(&json)
            .map_err(|e| BrowserError::SnapshotParse(e.to_string()))?;

        let mut nodes = Vec::new();
        let root = raw.root.map(|node| flatten(node, &mut nodes));

        Ok(Snapshot {
            meta: PageMeta {
                url: raw.url,
                title: raw.title,
            },
            viewport: raw.viewport,
            nodes,
            root,
        })
    }

    fn with_node<T>(&self, node: NodeId, f: impl FnOnce(&SnapNode) -> T) -> Result<T> {
        let snapshot = self.snapshot.borrow();
        let snapshot = snapshot
            .as_ref()
            .ok_or_else(|| BrowserError::StaleDocument("no snapshot captured".to_string()))?;
        let snap_node = snapshot
            .nodes
            .get(node.0)
            .ok_or(BrowserError::DetachedNode)?;
        Ok(f(snap_node))
    }
}

/// Flatten a raw subtree into the arena, returning the subtree's root id.
fn flatten(raw: RawNode, nodes: &mut Vec<SnapNode>) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(SnapNode {
        tag: raw.tag.to_ascii_lowercase(),
        attrs: raw.attrs.into_iter().collect(),
        text: raw.text,
        bounding_box: raw.bounding_box,
        hidden: raw.hidden,
        children: Vec::new(),
    });

    let children: Vec<NodeId> = raw
        .children
        .into_iter()
        .map(|child| flatten(child, nodes))
        .collect();
    nodes[id.0].children = children;
    id
}

impl DomSource for TabDomSource {
    fn resolve(&self, selector: &str) -> Result<Option<NodeId>> {
        let snapshot = self.capture(selector)?;
        let root = snapshot.root;
        *self.snapshot.borrow_mut() = Some(snapshot);
        Ok(root)
    }

    fn children(&self, node: NodeId) -> Result<Vec<NodeId>> {
        self.with_node(node, |n| n.children.clone())
    }

    fn tag(&self, node: NodeId) -> Result<String> {
        self.with_node(node, |n| n.tag.clone())
    }

    fn attributes(&self, node: NodeId) -> Result<IndexMap<String, String>> {
        self.with_node(node, |n| n.attrs.clone())
    }

    fn text(&self, node: NodeId) -> Result<String> {
        self.with_node(node, |n| n.text.clone())
    }

    fn bounding_box(&self, node: NodeId) -> Result<Option<BoundingBox>> {
        self.with_node(node, |n| n.bounding_box)
    }

    fn is_hidden_by_style(&self, node: NodeId) -> Result<bool> {
        self.with_node(node, |n| n.hidden)
    }

    fn viewport_size(&self) -> Result<Viewport> {
        if let Some(snapshot) = self.snapshot.borrow().as_ref() {
            return Ok(snapshot.viewport);
        }
        let meta = self.evaluate_meta()?;
        Ok(meta.1)
    }

    fn page_meta(&self) -> Result<PageMeta> {
        if let Some(snapshot) = self.snapshot.borrow().as_ref() {
            return Ok(snapshot.meta.clone());
        }
        let meta = self.evaluate_meta()?;
        Ok(meta.0)
    }
}

impl TabDomSource {
    /// Page identity and viewport without a subtree capture, for callers
    /// that query metadata before resolving a root.
    fn evaluate_meta(&self) -> Result<(PageMeta, Viewport)> {
        let expression = "JSON.stringify({url: window.location.href, title: document.title, \
                          width: window.innerWidth, height: window.innerHeight})";
        let result = self
            .tab
            .evaluate(expression, false)
            .map_err(|e| BrowserError::StaleDocument(e.to_string()))?;

        let value = result
            .value
            .ok_or_else(|| BrowserError::StaleDocument("no value from meta script".to_string()))?;
        let json: String = serde_json::from_value(value)
            .map_err(|e| BrowserError::SnapshotParse(e.to_string()))?;

        #[derive(Deserialize)]
        struct Meta {
            url: String,
            title: String,
            width: u32,
            height: u32,
        }
        let meta: Meta =
            serde_json::from_str(&json).map_err(|e| BrowserError::SnapshotParse(e.to_string()))?;

        Ok((
            PageMeta {
                url: meta.url,
                title: meta.title,
            },
            Viewport {
                width: meta.width,
                height: meta.height,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_preserves_preorder() {
        let raw = RawNode {
            tag: "BODY".to_string(),
            attrs: vec![],
            text: String::new(),
            bounding_box: None,
            hidden: false,
            children: vec![
                RawNode {
                    tag: "DIV".to_string(),
                    attrs: vec![("id".to_string(), "a".to_string())],
                    text: String::new(),
                    bounding_box: None,
                    hidden: false,
                    children: vec![RawNode {
                        tag: "SPAN".to_string(),
                        attrs: vec![],
                        text: "hi".to_string(),
                        bounding_box: None,
                        hidden: false,
                        children: vec![],
                    }],
                },
                RawNode {
                    tag: "P".to_string(),
                    attrs: vec![],
                    text: String::new(),
                    bounding_box: None,
                    hidden: false,
                    children: vec![],
                },
            ],
        };

        let mut nodes = Vec::new();
        let root = flatten(raw, &mut nodes);

        assert_eq!(root, NodeId(0));
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0].tag, "body");
        assert_eq!(nodes[0].children, vec![NodeId(1), NodeId(3)]);
        assert_eq!(nodes[1].tag, "div");
        assert_eq!(nodes[1].children, vec![NodeId(2)]);
        assert_eq!(nodes[2].text, "hi");
        assert_eq!(nodes[3].tag, "p");
    }

    #[test]
    fn test_raw_capture_deserialization() {
        let json = r#"{
            "url": "https://example.com",
            "title": "Example",
            "viewport": {"width": 1280, "height": 720},
            "root": {
                "tag": "body",
                "attrs": [["class", "page"]],
                "text": "",
                "box": {"x": 0, "y": 0, "width": 1280, "height": 720},
                "hidden": false,
                "children": []
            }
        }"#;

        let capture: RawCapture = serde_json::from_str(json).unwrap();
        assert_eq!(capture.url, "https://example.com");
        assert_eq!(capture.viewport.width, 1280);
        let root = capture.root.unwrap();
        assert_eq!(root.attrs[0].0, "class");
        assert_eq!(root.bounding_box.unwrap().width, 1280.0);
    }

    #[test]
    fn test_missing_root_deserializes_to_none() {
        let json = r#"{
            "url": "https://example.com",
            "title": "Example",
            "viewport": {"width": 800, "height": 600},
            "root": null
        }"#;

        let capture: RawCapture = serde_json::from_str(json).unwrap();
        assert!(capture.root.is_none());
    }
}
