//! Closed tour representation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AnnealError;

/// A closed tour: a permutation of city indices `0..n`.
///
/// The last city connects back to the first. A `Tour` is never edited in
/// place by the search; move operators return a new tour and leave the
/// original untouched until the acceptance decision is made.
///
/// # Examples
///
/// ```
/// use tsp_anneal::models::Tour;
///
/// let tour = Tour::new(vec![2, 0, 1]).expect("valid permutation");
/// assert_eq!(tour.cities(), &[2, 0, 1]);
/// assert!(Tour::new(vec![0, 0, 1]).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Tour {
    cities: Vec<usize>,
}

impl Tour {
    /// Creates a tour from a city order.
    ///
    /// Returns `None` if `cities` is not a permutation of `0..cities.len()`.
    pub fn new(cities: Vec<usize>) -> Option<Self> {
        if !is_permutation(&cities) {
            return None;
        }
        Some(Self { cities })
    }

    /// Wraps an order already known to be a permutation.
    pub(crate) fn from_permutation(cities: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&cities));
        Self { cities }
    }

    /// The tour `0, 1, ..., n-1`.
    pub fn identity(n: usize) -> Self {
        Self {
            cities: (0..n).collect(),
        }
    }

    /// A uniformly random tour over `n` cities.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut cities: Vec<usize> = (0..n).collect();
        u_numflow::random::shuffle(&mut cities, rng);
        Self { cities }
    }

    /// Returns the city order.
    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Consumes the tour, returning the city order.
    pub fn into_cities(self) -> Vec<usize> {
        self.cities
    }

    /// Number of cities visited.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if the tour visits no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Iterates over the directed edges of the closed tour, including the
    /// closing edge from the last city back to the first.
    ///
    /// A single-city tour has no edges.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.cities.len();
        let count = if n < 2 { 0 } else { n };
        (0..count).map(move |i| (self.cities[i], self.cities[(i + 1) % n]))
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.cities
    }
}

impl TryFrom<Vec<usize>> for Tour {
    type Error = AnnealError;

    fn try_from(cities: Vec<usize>) -> Result<Self, Self::Error> {
        let n = cities.len();
        Tour::new(cities).ok_or(AnnealError::NotAPermutation(n))
    }
}

impl From<Tour> for Vec<usize> {
    fn from(tour: Tour) -> Self {
        tour.cities
    }
}

/// Returns `true` if `order` contains every index in `0..order.len()` exactly once.
pub fn is_permutation(order: &[usize]) -> bool {
    let mut seen = vec![false; order.len()];
    for &c in order {
        if c >= seen.len() || seen[c] {
            return false;
        }
        seen[c] = true;
    }
    true
}
