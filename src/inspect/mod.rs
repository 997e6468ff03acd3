//! Page inspection core: mode-driven, depth- and count-bounded DOM
//! traversal producing a flat, size-capped element list.
//!
//! - [`InspectionRequest`] / [`InspectMode`]: traversal policy
//! - [`DomSource`]: narrow read-only boundary to the live document
//! - [`ElementDescriptor`] / [`InspectionResult`]: the serializable output
//! - [`inspect`]: one atomic inspection call
//!
//! The output is a pre-order sequence, not a reconstructed tree: callers
//! needing hierarchy re-derive it from document order.

pub mod descriptor;
pub mod inspector;
pub mod request;
pub mod source;
pub mod static_dom;
mod traversal;

pub use descriptor::{ElementDescriptor, InspectionResult, Position, MAX_TEXT_LEN};
pub use inspector::inspect;
pub use request::{InspectMode, InspectionRequest, DEFAULT_MAX_DEPTH, DEFAULT_MAX_ELEMENTS};
pub use source::{BoundingBox, DomSource, NodeId, PageMeta, TabDomSource, Viewport};
pub use static_dom::StaticDom;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_empty_document() {
        let dom = StaticDom::new("https://example.com", "Empty", 800, 600);
        let result = inspect(&dom, &InspectionRequest::default(), None).unwrap();

        assert!(result.elements.is_empty());
        assert_eq!(result.total_elements, 0);
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.title, "Empty");
        assert_eq!(result.viewport.width, 800);
    }

    #[test]
    fn test_inspect_single_element() {
        let mut dom = StaticDom::new("https://example.com", "One", 800, 600);
        let body = dom.add_node(None, "body", &[]);
        let button = dom.add_node(Some(body), "button", &[("id", "go")]);
        dom.set_text(button, "  Go   now ");

        let result = inspect(&dom, &InspectionRequest::default(), None).unwrap();

        assert_eq!(result.total_elements, 2);
        assert_eq!(result.elements.len(), 2);
        assert_eq!(result.elements[1].tag, "button");
        assert_eq!(result.elements[1].id, "go");
        assert_eq!(result.elements[1].text, "Go now");
        assert!(result.elements[1].is_visible);
    }
}
