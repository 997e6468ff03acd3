use crate::error::{BrowserError, Result};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default cap on emitted descriptors.
pub const DEFAULT_MAX_ELEMENTS: usize = 100;

/// Default traversal depth from the root (root = depth 0).
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Which elements are eligible for emission.
///
/// A closed set: eligibility for each mode is decided in exactly one place
/// ([`InspectMode::eligible`]) so adding a mode forces the mapping to be
/// extended there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum InspectMode {
    /// Every element node is eligible.
    #[default]
    All,
    /// Interactive elements: the fixed tag set plus role/handler heuristics.
    Clickable,
    /// Form controls: input, select, textarea, and form itself.
    Form,
}

/// Tags always treated as clickable, independent of attributes.
const CLICKABLE_TAGS: [&str; 4] = ["a", "button", "input", "select"];

/// ARIA roles conventionally marking an element as actionable.
const CLICKABLE_ROLES: [&str; 4] = ["button", "link", "tab", "menuitem"];

impl InspectMode {
    /// Decide whether an element with the given tag and attributes is
    /// eligible for emission under this mode. Tag must already be lowercase.
    pub fn eligible(&self, tag: &str, attributes: &IndexMap<String, String>) -> bool {
        match self {
            InspectMode::All => true,
            InspectMode::Clickable => {
                CLICKABLE_TAGS.contains(&tag) || has_clickable_hint(attributes)
            }
            InspectMode::Form => matches!(tag, "input" | "select" | "textarea" | "form"),
        }
    }
}

/// Best-effort handler detection beyond the fixed tag set: an actionable
/// ARIA role, an inline `on*` handler attribute, or a class token that
/// looks like a button.
fn has_clickable_hint(attributes: &IndexMap<String, String>) -> bool {
    if let Some(role) = attributes.get("role") {
        if CLICKABLE_ROLES.contains(&role.as_str()) {
            return true;
        }
    }

    if attributes.keys().any(|name| name.starts_with("on")) {
        return true;
    }

    attributes.get("class").is_some_and(|classes| {
        classes
            .split_whitespace()
            .any(|token| token.contains("btn") || token.contains("button"))
    })
}

/// Parameters for one page inspection.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionRequest {
    /// Selector identifying the subtree root. If it matches several nodes
    /// the first match in document order is used.
    pub root_selector: String,

    /// Cap on emitted descriptors. Must be at least 1.
    pub max_elements: usize,

    /// Traversal depth bound from the root (root = depth 0). A node at the
    /// bound is still tested for eligibility; its children are not.
    pub max_depth: usize,

    /// When set, only these (lowercase) tags are emitted. Children of
    /// non-matching elements are still traversed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_types: Option<Vec<String>>,

    /// When set, descriptor attribute maps are restricted to these names
    /// (case-sensitive exact match). When absent all attributes are kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<String>>,

    /// Eligibility mode.
    pub mode: InspectMode,
}

impl Default for InspectionRequest {
    fn default() -> Self {
        Self {
            root_selector: "body".to_string(),
            max_elements: DEFAULT_MAX_ELEMENTS,
            max_depth: DEFAULT_MAX_DEPTH,
            element_types: None,
            attributes: None,
            mode: InspectMode::All,
        }
    }
}

impl InspectionRequest {
    /// Validate request bounds. Runs before any DOM access so a rejected
    /// request has no side effects.
    pub fn validate(&self) -> Result<()> {
        if self.max_elements < 1 {
            return Err(BrowserError::InvalidParams(
                "maxElements must be at least 1".to_string(),
            ));
        }
        if self.root_selector.trim().is_empty() {
            return Err(BrowserError::InvalidParams(
                "rootSelector must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Combined eligibility test: mode filter AND type filter, both must
    /// pass. Tag must already be lowercase.
    pub fn matches(&self, tag: &str, attributes: &IndexMap<String, String>) -> bool {
        if !self.mode.eligible(tag, attributes) {
            return false;
        }

        match &self.element_types {
            Some(types) => types.iter().any(|t| t.eq_ignore_ascii_case(tag)),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let request = InspectionRequest::default();
        assert_eq!(request.root_selector, "body");
        assert_eq!(request.max_elements, 100);
        assert_eq!(request.max_depth, 3);
        assert_eq!(request.mode, InspectMode::All);
        assert!(request.element_types.is_none());
        assert!(request.attributes.is_none());
    }

    #[test]
    fn test_deserialize_partial_request() {
        let request: InspectionRequest = serde_json::from_value(serde_json::json!({
            "mode": "clickable",
            "maxDepth": 5
        }))
        .unwrap();

        assert_eq!(request.mode, InspectMode::Clickable);
        assert_eq!(request.max_depth, 5);
        assert_eq!(request.max_elements, 100);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let result = serde_json::from_value::<InspectionRequest>(serde_json::json!({
            "mode": "hidden"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_cap() {
        let request = InspectionRequest {
            max_elements: 0,
            ..Default::default()
        };
        assert!(matches!(
            request.validate(),
            Err(BrowserError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_validate_rejects_blank_selector() {
        let request = InspectionRequest {
            root_selector: "  ".to_string(),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_clickable_fixed_tags() {
        let empty = attrs(&[]);
        for tag in ["a", "button", "input", "select"] {
            assert!(InspectMode::Clickable.eligible(tag, &empty), "{tag}");
        }
        assert!(!InspectMode::Clickable.eligible("div", &empty));
        assert!(!InspectMode::Clickable.eligible("span", &empty));
    }

    #[test]
    fn test_clickable_role_and_handler() {
        assert!(InspectMode::Clickable.eligible("div", &attrs(&[("role", "button")])));
        assert!(InspectMode::Clickable.eligible("div", &attrs(&[("onclick", "go()")])));
        assert!(InspectMode::Clickable.eligible("div", &attrs(&[("class", "nav btn-primary")])));
        assert!(!InspectMode::Clickable.eligible("div", &attrs(&[("role", "main")])));
        assert!(!InspectMode::Clickable.eligible("div", &attrs(&[("class", "content")])));
    }

    #[test]
    fn test_form_mode_tags() {
        let empty = attrs(&[]);
        for tag in ["input", "select", "textarea", "form"] {
            assert!(InspectMode::Form.eligible(tag, &empty), "{tag}");
        }
        assert!(!InspectMode::Form.eligible("button", &empty));
        assert!(!InspectMode::Form.eligible("label", &empty));
    }

    #[test]
    fn test_type_filter_combines_with_mode() {
        let request = InspectionRequest {
            mode: InspectMode::Clickable,
            element_types: Some(vec!["a".to_string()]),
            ..Default::default()
        };

        let empty = attrs(&[]);
        assert!(request.matches("a", &empty));
        // Clickable, but filtered out by type.
        assert!(!request.matches("button", &empty));
        // Matching type, but not clickable.
        let request = InspectionRequest {
            mode: InspectMode::Clickable,
            element_types: Some(vec!["div".to_string()]),
            ..Default::default()
        };
        assert!(!request.matches("div", &empty));
    }

    #[test]
    fn test_mode_serde_lowercase() {
        assert_eq!(
            serde_json::to_value(InspectMode::Clickable).unwrap(),
            serde_json::json!("clickable")
        );
        let mode: InspectMode = serde_json::from_value(serde_json::json!("form")).unwrap();
        assert_eq!(mode, InspectMode::Form);
    }
}
