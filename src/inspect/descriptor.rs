//! Conversion of one eligible node into a serializable descriptor, and the
//! response envelope those descriptors are assembled into.

use crate::error::{BrowserError, Result};
use crate::inspect::request::InspectionRequest;
use crate::inspect::source::{BoundingBox, DomSource, NodeId, Viewport};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Descriptor text is capped to bound payload size. Longer text is
/// truncated at a char boundary and marked with an ellipsis.
pub const MAX_TEXT_LEN: usize = 500;

/// One emitted element, a point-in-time snapshot with no live handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementDescriptor {
    /// Lowercase tag name.
    pub tag: String,

    /// The element's id attribute, or empty — never absent, so downstream
    /// consumers need no null handling.
    pub id: String,

    /// Own rendered text: trimmed, internal whitespace runs collapsed to
    /// single spaces, capped at [`MAX_TEXT_LEN`].
    pub text: String,

    /// Attribute map in attribute order, filtered per request.
    pub attributes: IndexMap<String, String>,

    /// True iff the element has non-zero rendered size and is not hidden
    /// via display/visibility/opacity. No occlusion hit-testing.
    pub is_visible: bool,

    /// Layout box in viewport coordinates.
    pub position: Position,
}

/// Bounding rectangle plus viewport-overlap flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// True iff the rectangle overlaps the visible viewport at all;
    /// partial overlap counts.
    pub in_viewport: bool,
}

/// Response envelope for one inspection call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResult {
    pub url: String,
    pub title: String,
    /// Wall clock at call entry, ISO-8601 on the wire.
    pub timestamp: DateTime<Utc>,
    pub viewport: Viewport,
    /// Pre-order descriptor sequence, length `<= maxElements`.
    pub elements: Vec<ElementDescriptor>,
    /// Count of elements that matched the filters before truncation; may
    /// exceed `elements.len()` so callers can detect truncation.
    pub total_elements: usize,
}

/// Build a descriptor for one eligible node.
///
/// Returns `Ok(None)` when the node went stale mid-build: a single bad
/// node is skipped (and logged) rather than failing the batch. Document
/// staleness is the one exception and propagates.
pub(crate) fn build(
    source: &dyn DomSource,
    node: NodeId,
    tag: &str,
    attrs: IndexMap<String, String>,
    request: &InspectionRequest,
    viewport: Viewport,
) -> Result<Option<ElementDescriptor>> {
    match try_build(source, node, tag, attrs, request, viewport) {
        Ok(descriptor) => Ok(Some(descriptor)),
        Err(err @ BrowserError::StaleDocument(_)) => Err(err),
        Err(err) => {
            log::warn!("skipping <{}> node: {}", tag, err);
            Ok(None)
        }
    }
}

fn try_build(
    source: &dyn DomSource,
    node: NodeId,
    tag: &str,
    attrs: IndexMap<String, String>,
    request: &InspectionRequest,
    viewport: Viewport,
) -> Result<ElementDescriptor> {
    let rect = source
        .bounding_box(node)?
        .ok_or(BrowserError::DetachedNode)?;
    let hidden = source.is_hidden_by_style(node)?;
    let text = normalize_text(&source.text(node)?);

    let id = attrs.get("id").cloned().unwrap_or_default();
    let attributes = filter_attributes(attrs, request.attributes.as_deref());

    let is_visible = rect.width > 0.0 && rect.height > 0.0 && !hidden;
    let position = Position {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        in_viewport: intersects_viewport(rect, viewport),
    };

    Ok(ElementDescriptor {
        tag: tag.to_string(),
        id,
        text,
        attributes,
        is_visible,
        position,
    })
}

/// Trim, collapse internal whitespace runs, and cap to [`MAX_TEXT_LEN`].
fn normalize_text(raw: &str) -> String {
    let mut collapsed = String::new();
    for word in raw.split_whitespace() {
        if !collapsed.is_empty() {
            collapsed.push(' ');
        }
        collapsed.push_str(word);
    }

    if collapsed.chars().count() <= MAX_TEXT_LEN {
        return collapsed;
    }

    let mut truncated: String = collapsed.chars().take(MAX_TEXT_LEN).collect();
    truncated.push_str("...");
    truncated
}

/// Restrict the attribute map to the requested names (case-sensitive).
/// With no filter set, all attributes are kept.
fn filter_attributes(
    attrs: IndexMap<String, String>,
    filter: Option<&[String]>,
) -> IndexMap<String, String> {
    match filter {
        Some(names) => attrs
            .into_iter()
            .filter(|(name, _)| names.iter().any(|wanted| wanted == name))
            .collect(),
        None => attrs,
    }
}

/// Partial overlap with `[0, width] x [0, height]` counts as in-viewport.
fn intersects_viewport(rect: BoundingBox, viewport: Viewport) -> bool {
    rect.x < viewport.width as f64
        && rect.x + rect.width > 0.0
        && rect.y < viewport.height as f64
        && rect.y + rect.height > 0.0
}
