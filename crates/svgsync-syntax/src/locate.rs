//! Caret-to-token resolution shared by path segments and point lists.

use crate::span::TextSpan;

/// Default proximity threshold, in bytes, for the nearest-span fallback.
pub const DEFAULT_PROXIMITY: usize = 5;

/// Picks the item a caret at `offset` refers to.
///
/// 1. the *last* item whose span the caret touches, so a caret on the
///    boundary between two adjacent items selects the later one;
/// 2. otherwise the item whose span edge is nearest, provided that
///    distance is strictly below `proximity` (earlier item on ties);
/// 3. otherwise nothing.
///
/// The fallback lets a caret resting on separator whitespace, or just past
/// the final token, still resolve.
pub fn locate_by_span<T>(items: &[T], offset: usize, proximity: usize, span_of: impl Fn(&T) -> TextSpan) -> Option<usize> {
    if let Some(idx) = items.iter().rposition(|item| span_of(item).touches(offset)) {
        return Some(idx);
    }

    let mut best: Option<(usize, usize)> = None;
    for (idx, item) in items.iter().enumerate() {
        let distance = span_of(item).distance_to(offset);
        if distance < proximity && best.is_none_or(|(_, d)| distance < d) {
            best = Some((idx, distance));
        }
    }
    best.map(|(idx, _)| idx)
}
