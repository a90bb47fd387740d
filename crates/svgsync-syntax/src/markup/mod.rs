//! Tolerant structural scanning of XML-like markup.
//!
//! Nothing here builds a tree or rejects input. The scanner finds tags,
//! the index turns them into addressed element ranges, and the attribute
//! walker locates raw attribute values by byte span.

mod attributes;
mod index;
mod scanner;

pub use attributes::{find_attribute, AttributeSpan, Attributes};
pub use index::{element_at, ElementAddress, ElementRange, StructuralIndex, TagSpan};
pub use scanner::{TagKind, TagScanner, TagToken};
