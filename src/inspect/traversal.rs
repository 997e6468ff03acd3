//! Depth-first, pre-order walk over the document under request policy.

use crate::error::{BrowserError, Result};
use crate::inspect::descriptor::{self, ElementDescriptor};
use crate::inspect::request::InspectionRequest;
use crate::inspect::source::{DomSource, NodeId, Viewport};
use std::time::{Duration, Instant};

/// Everything one walk produced.
#[derive(Debug)]
pub(crate) struct TraversalOutput {
    /// Descriptors in visit order, length `<= max_elements`.
    pub elements: Vec<ElementDescriptor>,
    /// All nodes that passed the filters, counted past the cap so
    /// truncation stays observable.
    pub matched: usize,
    /// Eligible nodes dropped because their descriptor could not be built.
    pub skipped: usize,
}

pub(crate) struct Traversal<'a> {
    source: &'a dyn DomSource,
    request: &'a InspectionRequest,
    viewport: Viewport,
    /// Absolute deadline plus the caller's original budget, kept for the
    /// timeout error.
    deadline: Option<(Instant, Duration)>,
    elements: Vec<ElementDescriptor>,
    matched: usize,
    skipped: usize,
}

impl<'a> Traversal<'a> {
    /// Walk the subtree rooted at `root` and collect eligible descriptors.
    ///
    /// Any collaborator failure aborts the walk; partial output is
    /// discarded by the caller, never returned.
    pub fn run(
        source: &'a dyn DomSource,
        request: &'a InspectionRequest,
        viewport: Viewport,
        root: NodeId,
        timeout: Option<Duration>,
    ) -> Result<TraversalOutput> {
        let mut traversal = Traversal {
            source,
            request,
            viewport,
            deadline: timeout.map(|budget| (Instant::now() + budget, budget)),
            elements: Vec::new(),
            matched: 0,
            skipped: 0,
        };

        traversal.visit(root, 0)?;

        if traversal.skipped > 0 {
            log::debug!(
                "traversal matched {} nodes, emitted {}, skipped {}",
                traversal.matched,
                traversal.elements.len(),
                traversal.skipped
            );
        }

        Ok(TraversalOutput {
            elements: traversal.elements,
            matched: traversal.matched,
            skipped: traversal.skipped,
        })
    }

    /// Pre-order visit: the node is tested before its children, children in
    /// document order. A node at the depth bound is still tested; its
    /// children are not descended into.
    fn visit(&mut self, node: NodeId, depth: usize) -> Result<()> {
        self.check_deadline()?;

        let tag = self.source.tag(node)?;
        let attributes = self.source.attributes(node)?;

        if self.request.matches(&tag, &attributes) {
            self.matched += 1;
            // Past the cap the list stops growing but matching continues.
            if self.elements.len() < self.request.max_elements {
                match descriptor::build(
                    self.source,
                    node,
                    &tag,
                    attributes,
                    self.request,
                    self.viewport,
                )? {
                    Some(built) => self.elements.push(built),
                    None => self.skipped += 1,
                }
            }
        }

        if depth < self.request.max_depth {
            for child in self.source.children(node)? {
                self.visit(child, depth + 1)?;
            }
        }

        Ok(())
    }

    fn check_deadline(&self) -> Result<()> {
        if let Some((deadline, budget)) = self.deadline {
            if Instant::now() >= deadline {
                return Err(BrowserError::Timeout(budget));
            }
        }
        Ok(())
    }
}
