//! Segment transport (relocation).
//!
//! Cuts the half-open slice `[start, end)` out of the tour and splices it,
//! in its original order, back in at position `splice` of the shortened
//! tour. This generalizes Or-opt to segments of any length.

/// Returns a copy of `order` with `order[start..end]` moved to `splice`.
///
/// `splice` indexes the tour *after* the segment has been removed, so it
/// must lie in `0..=order.len() - (end - start)`. The segment's internal
/// order is preserved.
///
/// # Panics
///
/// Panics if `start > end`, `end > order.len()`, or `splice` is past the end
/// of the shortened tour.
///
/// # Examples
///
/// ```
/// use tsp_anneal::moves::transport_segment;
///
/// // Move [1, 2] to the front of [0, 3, 4].
/// assert_eq!(transport_segment(&[0, 1, 2, 3, 4], 1, 3, 0), vec![1, 2, 0, 3, 4]);
/// // Move [1, 2] after 3.
/// assert_eq!(transport_segment(&[0, 1, 2, 3, 4], 1, 3, 2), vec![0, 3, 1, 2, 4]);
/// ```
pub fn transport_segment(order: &[usize], start: usize, end: usize, splice: usize) -> Vec<usize> {
    let segment = &order[start..end];
    let mut rest: Vec<usize> = Vec::with_capacity(order.len());
    rest.extend_from_slice(&order[..start]);
    rest.extend_from_slice(&order[end..]);

    let mut candidate = Vec::with_capacity(order.len());
    candidate.extend_from_slice(&rest[..splice]);
    candidate.extend_from_slice(segment);
    candidate.extend_from_slice(&rest[splice..]);
    candidate
}
