//! Neighborhood moves over closed tours.
//!
//! - [`reverse_segment`] — reverse a slice of the tour (2-opt)
//! - [`transport_segment`] — cut a slice and splice it elsewhere
//! - [`Move`] / [`random_move`] — a sampled move and the generator that
//!   picks one of the two operators with equal probability
//!
//! Every move works on a copy of a full permutation, so candidates never
//! contain duplicated or missing cities.

mod reversal;
mod transport;

pub use reversal::reverse_segment;
pub use transport::transport_segment;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Tour;

/// A concrete neighborhood move on a tour of known length.
///
/// Segment bounds are half-open: `start..end` with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Reverse `tour[start..end]`.
    Reversal {
        /// First index of the segment.
        start: usize,
        /// One past the last index of the segment.
        end: usize,
    },
    /// Move `tour[start..end]` to position `splice` of the remaining tour.
    Transport {
        /// First index of the segment.
        start: usize,
        /// One past the last index of the segment.
        end: usize,
        /// Insertion point in the tour with the segment removed.
        splice: usize,
    },
}

impl Move {
    /// Returns `true` if applying this move cannot change any tour.
    pub fn is_noop(&self) -> bool {
        match *self {
            Move::Reversal { start, end } => end - start < 2,
            Move::Transport { start, end, splice } => start == end || splice == start,
        }
    }

    /// Applies the move to a copy of `tour`.
    ///
    /// # Panics
    ///
    /// Panics if the move's indices do not fit `tour`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsp_anneal::models::Tour;
    /// use tsp_anneal::moves::Move;
    ///
    /// let tour = Tour::identity(5);
    /// let mv = Move::Reversal { start: 1, end: 4 };
    /// assert_eq!(mv.apply(&tour).cities(), &[0, 3, 2, 1, 4]);
    /// assert_eq!(tour.cities(), &[0, 1, 2, 3, 4]);
    /// ```
    pub fn apply(&self, tour: &Tour) -> Tour {
        let order = match *self {
            Move::Reversal { start, end } => reverse_segment(tour.cities(), start, end),
            Move::Transport { start, end, splice } => {
                transport_segment(tour.cities(), start, end, splice)
            }
        };
        Tour::from_permutation(order)
    }
}

/// Samples a move for a tour of `n` cities.
///
/// Two indices are drawn independently from `0..n` and sorted into
/// `start <= end`; a fair coin then picks reversal or transport. For
/// transport the splice point is drawn from `0..n - (end - start)`. Tours
/// with fewer than two cities always get the empty reversal.
///
/// Segments are half-open and `end` never exceeds `n - 1`, so the city at the
/// last position is never part of a sampled segment. A reversal therefore
/// leaves it in place; a transport may only shift it by splicing a segment
/// after it, which is also the only way a different city becomes last.
pub fn random_move<R: Rng>(n: usize, rng: &mut R) -> Move {
    if n < 2 {
        return Move::Reversal { start: 0, end: 0 };
    }
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    let (start, end) = if a <= b { (a, b) } else { (b, a) };

    if rng.random_bool(0.5) {
        Move::Reversal { start, end }
    } else {
        let remaining = n - (end - start);
        let splice = rng.random_range(0..remaining);
        Move::Transport { start, end, splice }
    }
}

/// Produces a random neighbor of `tour`, returning the candidate and the
/// move that produced it. `tour` itself is left untouched.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use tsp_anneal::models::{is_permutation, Tour};
/// use tsp_anneal::moves::neighbor;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let tour = Tour::identity(10);
/// let (candidate, _mv) = neighbor(&tour, &mut rng);
/// assert!(is_permutation(candidate.cities()));
/// ```
pub fn neighbor<R: Rng>(tour: &Tour, rng: &mut R) -> (Tour, Move) {
    let mv = random_move(tour.len(), rng);
    (mv.apply(tour), mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::is_permutation;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sampled_segments_exclude_last_position() {
        let mut rng = StdRng::seed_from_u64(5);
        let tour = Tour::identity(6);
        for _ in 0..2_000 {
            let (candidate, mv) = neighbor(&tour, &mut rng);
            if let Move::Reversal { end, .. } = mv {
                assert!(end <= 5);
                assert_eq!(candidate.cities()[5], 5);
            }
        }
    }

    #[test]
    fn test_random_move_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let n = 9;
        for _ in 0..2_000 {
            match random_move(n, &mut rng) {
                Move::Reversal { start, end } => {
                    assert!(start <= end && end < n);
                }
                Move::Transport { start, end, splice } => {
                    assert!(start <= end && end < n);
                    assert!(splice < n - (end - start));
                }
            }
        }
    }

    #[test]
    fn test_both_operators_sampled() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut reversals = 0;
        let mut transports = 0;
        for _ in 0..1_000 {
            match random_move(20, &mut rng) {
                Move::Reversal { .. } => reversals += 1,
                Move::Transport { .. } => transports += 1,
            }
        }
        assert!(reversals > 400 && transports > 400, "{reversals}/{transports}");
    }

    #[test]
    fn test_repeated_neighbors_stay_permutations() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut tour = Tour::random(25, &mut rng);
        for _ in 0..500 {
            let (next, _) = neighbor(&tour, &mut rng);
            assert!(is_permutation(next.cities()));
            assert_eq!(next.len(), 25);
            tour = next;
        }
    }

    #[test]
    fn test_singleton_and_empty_unchanged() {
        let mut rng = StdRng::seed_from_u64(4);
        for n in [0, 1] {
            let tour = Tour::identity(n);
            for _ in 0..10 {
                let (next, mv) = neighbor(&tour, &mut rng);
                assert_eq!(next, tour);
                assert!(mv.is_noop());
            }
        }
    }

    #[test]
    fn test_is_noop() {
        assert!(Move::Reversal { start: 3, end: 3 }.is_noop());
        assert!(Move::Reversal { start: 3, end: 4 }.is_noop());
        assert!(!Move::Reversal { start: 1, end: 3 }.is_noop());
        assert!(Move::Transport { start: 2, end: 2, splice: 0 }.is_noop());
        assert!(Move::Transport { start: 2, end: 4, splice: 2 }.is_noop());
        assert!(!Move::Transport { start: 2, end: 4, splice: 0 }.is_noop());
    }

    #[test]
    fn test_noop_moves_leave_tour_unchanged() {
        let tour = Tour::new(vec![4, 2, 0, 1, 3]).expect("valid");
        for mv in [
            Move::Reversal { start: 2, end: 3 },
            Move::Transport { start: 1, end: 3, splice: 1 },
        ] {
            assert_eq!(mv.apply(&tour), tour);
        }
    }
}
