//! Orchestration of one inspection call: validation, root resolution,
//! envelope metadata, traversal.

use crate::error::Result;
use crate::inspect::descriptor::InspectionResult;
use crate::inspect::request::InspectionRequest;
use crate::inspect::source::DomSource;
use crate::inspect::traversal::Traversal;
use chrono::Utc;
use std::time::Duration;

/// Run one inspection against a document.
///
/// Validation happens before any DOM access. The root selector resolves to
/// its first match in document order; a selector matching nothing is a
/// success with an empty element list, not an error. Envelope metadata
/// (url, title, viewport) is captured once, independent of traversal, so
/// even a zero-element result identifies the page it came from.
pub fn inspect(
    source: &dyn DomSource,
    request: &InspectionRequest,
    timeout: Option<Duration>,
) -> Result<InspectionResult> {
    request.validate()?;

    let timestamp = Utc::now();
    let root = source.resolve(&request.root_selector)?;
    let meta = source.page_meta()?;
    let viewport = source.viewport_size()?;

    let (elements, total_elements) = match root {
        Some(root) => {
            let output = Traversal::run(source, request, viewport, root, timeout)?;
            (output.elements, output.matched)
        }
        None => {
            log::debug!("root selector '{}' matched nothing", request.root_selector);
            (Vec::new(), 0)
        }
    };

    Ok(InspectionResult {
        url: meta.url,
        title: meta.title,
        timestamp,
        viewport,
        elements,
        total_elements,
    })
}
