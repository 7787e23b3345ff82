//! Segment reversal.
//!
//! Reversing the half-open slice `[start, end)` of a closed tour replaces the
//! two edges entering and leaving the slice, which is the classic 2-opt move
//! (Croes, 1958). An empty slice leaves the tour unchanged.

/// Returns a copy of `order` with `order[start..end]` reversed.
///
/// # Panics
///
/// Panics if `start > end` or `end > order.len()`.
///
/// # Examples
///
/// ```
/// use tsp_anneal::moves::reverse_segment;
///
/// assert_eq!(reverse_segment(&[0, 1, 2, 3, 4], 1, 4), vec![0, 3, 2, 1, 4]);
/// assert_eq!(reverse_segment(&[0, 1, 2], 2, 2), vec![0, 1, 2]);
/// ```
pub fn reverse_segment(order: &[usize], start: usize, end: usize) -> Vec<usize> {
    let mut candidate = order.to_vec();
    candidate[start..end].reverse();
    candidate
}
