//! Structural index: element addresses and tag spans without a DOM.
//!
//! ## Learning: A Stack Instead of a Tree
//!
//! To answer "which element is the caret in?" we never need the tree
//! itself, only each element's position among its siblings and the text
//! range it covers. A stack of open scopes gives both in one pass:
//!
//! - open tag: push a scope addressed `parent + [parent.child_count]`
//! - self-closing tag: record it at once, bump the parent's counter
//! - closing tag: pop whatever is on top, *whatever its name*
//! - end of input: everything still open ends at end of text
//!
//! Matching closing tags purely by nesting order keeps the index usable
//! while the user is halfway through typing `</g>` or has a typo in it.

use serde::{Deserialize, Serialize};

use super::scanner::{TagKind, TagScanner};

/// Sibling indices from the root down to an element.
///
/// `[0, 2]` is the third child element of the first top-level element.
/// Each index counts preceding sibling *elements* only (text, comments
/// and processing instructions are not counted), matching how a live
/// tree numbers its element children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementAddress(Vec<usize>);

impl ElementAddress {
    /// The address of the document itself.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Address of this element's `index`-th child element.
    pub fn child(&self, index: usize) -> Self {
        let mut path = Vec::with_capacity(self.0.len() + 1);
        path.extend_from_slice(&self.0);
        path.push(index);
        Self(path)
    }

    /// Nesting depth (number of indices).
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for ElementAddress {
    fn from(path: Vec<usize>) -> Self {
        Self(path)
    }
}

impl std::fmt::Display for ElementAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Text extent of one element.
///
/// Invariant: `open_tag_start <= open_tag_end <= range_end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSpan {
    pub tag_name: String,
    /// Offset of the opening `<`
    pub open_tag_start: usize,
    /// Offset just past the opening tag's `>`
    pub open_tag_end: usize,
    /// Offset just past the closing tag, or end of text if never closed
    pub range_end: usize,
}

impl TagSpan {
    /// Returns true if a caret at `offset` lies within the element.
    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        self.open_tag_start <= offset && offset <= self.range_end
    }
}

/// A finalized element: where it is, and what text it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRange {
    pub address: ElementAddress,
    pub span: TagSpan,
}

/// A still-open element on the scope stack.
#[derive(Debug)]
struct OpenScope<'a> {
    tag_name: &'a str,
    start: usize,
    tag_end: usize,
    address: ElementAddress,
    child_count: usize,
}

/// All elements of one text, in the order they were finalized.
#[derive(Debug, Clone, Default)]
pub struct StructuralIndex {
    elements: Vec<ElementRange>,
}

impl StructuralIndex {
    /// Scans `text` once and records every element it can find.
    ///
    /// Never fails: mismatched, stray and unclosed tags are absorbed.
    pub fn build(text: &str) -> Self {
        let mut elements = Vec::new();
        let mut stack: Vec<OpenScope<'_>> = Vec::new();
        let mut root_count = 0usize;

        for tag in TagScanner::new(text) {
            match tag.kind {
                TagKind::Open => {
                    let address = Self::next_address(&mut stack, &mut root_count);
                    stack.push(OpenScope {
                        tag_name: tag.name,
                        start: tag.span.start,
                        tag_end: tag.span.end,
                        address,
                        child_count: 0,
                    });
                }
                TagKind::SelfClosing => {
                    let address = Self::next_address(&mut stack, &mut root_count);
                    elements.push(ElementRange {
                        address,
                        span: TagSpan {
                            tag_name: tag.name.to_string(),
                            open_tag_start: tag.span.start,
                            open_tag_end: tag.span.end,
                            range_end: tag.span.end,
                        },
                    });
                }
                TagKind::Close => match stack.pop() {
                    Some(scope) => {
                        if scope.tag_name != tag.name {
                            tracing::debug!(
                                open = scope.tag_name,
                                close = tag.name,
                                at = tag.span.start,
                                "closing tag name mismatch, matching by nesting order"
                            );
                        }
                        elements.push(Self::finalize(scope, tag.span.end));
                    }
                    None => {
                        tracing::debug!(close = tag.name, at = tag.span.start, "ignoring stray closing tag");
                    }
                },
            }
        }

        // Unclosed elements run to end of text, innermost first
        while let Some(scope) = stack.pop() {
            tracing::debug!(tag = scope.tag_name, at = scope.start, "element left open at end of input");
            elements.push(Self::finalize(scope, text.len()));
        }

        Self { elements }
    }

    /// Address for the next child of the innermost open scope.
    fn next_address(stack: &mut [OpenScope<'_>], root_count: &mut usize) -> ElementAddress {
        match stack.last_mut() {
            Some(parent) => {
                let address = parent.address.child(parent.child_count);
                parent.child_count += 1;
                address
            }
            None => {
                let address = ElementAddress::root().child(*root_count);
                *root_count += 1;
                address
            }
        }
    }

    fn finalize(scope: OpenScope<'_>, range_end: usize) -> ElementRange {
        ElementRange {
            address: scope.address,
            span: TagSpan {
                tag_name: scope.tag_name.to_string(),
                open_tag_start: scope.start,
                open_tag_end: scope.tag_end,
                range_end,
            },
        }
    }

    /// The deepest element containing `offset`.
    ///
    /// Ties between equally deep candidates go to the one finalized last.
    pub fn locate(&self, offset: usize) -> Option<&ElementRange> {
        let mut best: Option<&ElementRange> = None;
        for element in &self.elements {
            if !element.span.contains(offset) {
                continue;
            }
            if best.is_none_or(|b| element.address.depth() >= b.address.depth()) {
                best = Some(element);
            }
        }
        best
    }

    /// Elements in finalization order.
    pub fn elements(&self) -> &[ElementRange] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Convenience: index `text` and locate the element at `offset`.
pub fn element_at(text: &str, offset: usize) -> Option<ElementRange> {
    StructuralIndex::build(text).locate(offset).cloned()
}
