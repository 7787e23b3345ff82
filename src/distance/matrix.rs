//! Symmetric distance table stored as a packed upper triangle.

use serde::{Deserialize, Serialize};

use crate::error::AnnealError;
use crate::models::City;

/// Relative tolerance when checking a caller-supplied table for symmetry.
const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// All-pairs distances of an instance.
///
/// Only the strict upper triangle is stored (`n(n-1)/2` entries). Symmetry and
/// a zero diagonal therefore hold by construction, and the table cannot be
/// edited once built, so one matrix can back any number of concurrent runs.
///
/// Serializes as a full list of rows; deserializing goes through
/// [`from_rows`](DistanceMatrix::from_rows) and is validated the same way.
///
/// # Examples
///
/// ```
/// use tsp_anneal::models::City;
/// use tsp_anneal::distance::DistanceMatrix;
///
/// let cities = vec![
///     City::new(0.0, 0.0),
///     City::new(3.0, 4.0),
///     City::new(6.0, 8.0),
/// ];
/// let dm = DistanceMatrix::from_cities(&cities);
/// assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.get(2, 0), dm.get(0, 2));
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct DistanceMatrix {
    size: usize,
    upper: Vec<f64>,
}

impl DistanceMatrix {
    /// Euclidean distances between every pair of `cities`.
    pub fn from_cities(cities: &[City]) -> Self {
        let size = cities.len();
        let mut upper = Vec::with_capacity(packed_len(size));
        for (i, a) in cities.iter().enumerate() {
            upper.extend(cities[i + 1..].iter().map(|b| a.distance_to(b)));
        }
        Self { size, upper }
    }

    /// Builds a matrix from explicit rows, e.g. distances read from a file.
    ///
    /// Entries mirrored across the diagonal must agree to within a relative
    /// tolerance of `1e-9`; the stored distance is their mean.
    ///
    /// # Errors
    ///
    /// [`AnnealError::InvalidDistanceMatrix`] if the rows are not square, an
    /// entry is negative or not finite, a diagonal entry is non-zero, or the
    /// table is not symmetric.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AnnealError> {
        let size = rows.len();
        let invalid = |row, col, reason| AnnealError::InvalidDistanceMatrix { row, col, reason };

        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(invalid(i, row.len(), "row length differs from row count"));
            }
            if let Some(j) = row.iter().position(|d| !(d.is_finite() && *d >= 0.0)) {
                return Err(invalid(i, j, "distance must be finite and non-negative"));
            }
            if row[i] != 0.0 {
                return Err(invalid(i, i, "distance from a city to itself must be zero"));
            }
        }

        let mut upper = Vec::with_capacity(packed_len(size));
        for i in 0..size {
            for j in (i + 1)..size {
                let (there, back) = (rows[i][j], rows[j][i]);
                if (there - back).abs() > SYMMETRY_TOLERANCE * there.max(back).max(1.0) {
                    return Err(invalid(i, j, "distance differs from its mirror entry"));
                }
                upper.push((there + back) / 2.0);
            }
        }
        Ok(Self { size, upper })
    }

    /// Distance between cities `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is `>= size()`.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        assert!(
            from < self.size && to < self.size,
            "city index out of range for a {}-city matrix",
            self.size
        );
        match from.cmp(&to) {
            std::cmp::Ordering::Equal => 0.0,
            std::cmp::Ordering::Less => self.upper[self.index(from, to)],
            std::cmp::Ordering::Greater => self.upper[self.index(to, from)],
        }
    }

    /// Number of cities covered.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Full row `from`, diagonal included.
    pub fn row(&self, from: usize) -> Vec<f64> {
        (0..self.size).map(|to| self.get(from, to)).collect()
    }

    /// Position of `(i, j)`, `i < j`, in the packed triangle.
    fn index(&self, i: usize, j: usize) -> usize {
        i * self.size - i * (i + 1) / 2 + (j - i - 1)
    }
}

fn packed_len(size: usize) -> usize {
    size * size.saturating_sub(1) / 2
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = AnnealError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<DistanceMatrix> for Vec<Vec<f64>> {
    fn from(matrix: DistanceMatrix) -> Self {
        (0..matrix.size).map(|i| matrix.row(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cities() -> Vec<City> {
        vec![
            City::new(0.0, 0.0),
            City::new(3.0, 4.0),
            City::new(0.0, 8.0),
        ]
    }

    #[test]
    fn test_from_cities() {
        let dm = DistanceMatrix::from_cities(&sample_cities());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(0, 1) - 5.0).abs() < 1e-10);
        assert!((dm.get(0, 2) - 8.0).abs() < 1e-10);
        assert!((dm.get(1, 2) - 5.0).abs() < 1e-10);
        assert_eq!(dm.get(2, 1), dm.get(1, 2));
        assert_eq!(dm.get(1, 1), 0.0);
    }

    #[test]
    fn test_packed_index_covers_every_pair() {
        let cities: Vec<City> = (0..6).map(|i| City::new(i as f64, (i * i) as f64)).collect();
        let dm = DistanceMatrix::from_cities(&cities);
        for i in 0..6 {
            for j in 0..6 {
                let expected = cities[i].distance_to(&cities[j]);
                assert!((dm.get(i, j) - expected).abs() < 1e-12, "({i}, {j})");
            }
        }
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(DistanceMatrix::from_cities(&[]).size(), 0);
        let one = DistanceMatrix::from_cities(&[City::new(2.0, 2.0)]);
        assert_eq!(one.get(0, 0), 0.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range() {
        DistanceMatrix::from_cities(&sample_cities()).get(0, 3);
    }

    #[test]
    fn test_from_rows() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 5.0], vec![5.0, 0.0]]).expect("valid");
        assert_eq!(dm.get(0, 1), 5.0);
        assert_eq!(dm.get(1, 0), 5.0);
        assert_eq!(dm.row(1), vec![5.0, 0.0]);
    }

    #[test]
    fn test_from_rows_rejects_asymmetry() {
        let rows = vec![
            vec![0.0, 1.0, 1.0, 1.0],
            vec![5.0, 0.0, 1.0, 1.0],
            vec![1.0, 1.0, 0.0, 1.0],
            vec![1.0, 1.0, 1.0, 0.0],
        ];
        let err = DistanceMatrix::from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            AnnealError::InvalidDistanceMatrix { row: 0, col: 1, .. }
        ));
    }

    #[test]
    fn test_from_rows_rejects_self_distance() {
        let rows = vec![
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![1.0, 1.0, 7.0],
        ];
        let err = DistanceMatrix::from_rows(rows).unwrap_err();
        assert!(matches!(
            err,
            AnnealError::InvalidDistanceMatrix { row: 2, col: 2, .. }
        ));
    }

    #[test]
    fn test_from_rows_rejects_ragged_and_negative() {
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).is_err());
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, -1.0], vec![-1.0, 0.0]]).is_err());
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, f64::NAN], vec![f64::NAN, 0.0]]).is_err());
    }

    #[test]
    fn test_from_rows_tolerates_rounding() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 2.0], vec![2.0 + 1e-12, 0.0]])
            .expect("within tolerance");
        assert_eq!(dm.get(0, 1), dm.get(1, 0));
    }

    #[test]
    fn test_serde_rows() {
        let dm = DistanceMatrix::from_rows(vec![vec![0.0, 5.0], vec![5.0, 0.0]]).expect("valid");
        let json = serde_json::to_string(&dm).expect("serialize");
        assert_eq!(json, "[[0.0,5.0],[5.0,0.0]]");
        let back: DistanceMatrix = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, dm);
        assert!(serde_json::from_str::<DistanceMatrix>("[[0.0,1.0],[5.0,0.0]]").is_err());
    }
}
