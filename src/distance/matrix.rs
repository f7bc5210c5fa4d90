//! Dense integer distance matrix.

use crate::error::MatrixError;

/// A dense n×n matrix of non-negative travel costs stored in row-major order.
///
/// Entries may be asymmetric: `get(i, j)` need not equal `get(j, i)`.
///
/// # Examples
///
/// ```
/// use u_fleet::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(&[
///     vec![0, 10, 20],
///     vec![10, 0, 12],
///     vec![20, 12, 0],
/// ])
/// .expect("valid matrix");
/// assert_eq!(dm.get(1, 2), 12);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<u64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size * size],
            size,
        }
    }

    /// Largest entry accepted for an `size`-node matrix.
    ///
    /// Every route or solution distance sums at most `2 * size + 2` entries,
    /// so these sums cannot overflow `u64`.
    pub fn max_entry(size: usize) -> u64 {
        let arcs = (size as u64).saturating_mul(2).saturating_add(2);
        u64::MAX / arcs
    }

    /// Builds a matrix from signed rows, rejecting ragged, negative or
    /// oversized input.
    pub fn from_rows<R: AsRef<[i64]>>(rows: &[R]) -> Result<Self, MatrixError> {
        let size = rows.len();
        let limit = Self::max_entry(size);
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                data.push(checked_entry(row, col, value, limit)?);
            }
        }
        Ok(Self { data, size })
    }

    /// Creates a distance matrix from an explicit row-major n×n grid.
    pub fn from_data(size: usize, data: Vec<i64>) -> Result<Self, MatrixError> {
        if data.len() != size * size {
            return Err(MatrixError::SizeMismatch {
                len: data.len(),
                size,
            });
        }
        let limit = Self::max_entry(size);
        let data = data
            .into_iter()
            .enumerate()
            .map(|(k, value)| checked_entry(k / size, k % size, value, limit))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { data, size })
    }

    /// Returns the cost of traveling from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> u64 {
        self.data[from * self.size + to]
    }

    /// Sets the cost of traveling from `from` to `to`.
    ///
    /// Fails with `EntryTooLarge` above [`DistanceMatrix::max_entry`].
    pub fn set(&mut self, from: usize, to: usize, distance: u64) -> Result<(), MatrixError> {
        let limit = Self::max_entry(self.size);
        if distance > limit {
            return Err(MatrixError::EntryTooLarge {
                row: from,
                col: to,
                value: distance,
                limit,
            });
        }
        self.data[from * self.size + to] = distance;
        Ok(())
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `get(i, j) == get(j, i)` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| ((i + 1)..self.size).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Returns the candidate reached from `from` by the cheapest arc.
    ///
    /// Ties resolve to the lowest index. Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by_key(|&c| (self.get(from, c), c))
    }

    /// Total cost of `depot → nodes[0] → … → nodes[n-1] → depot`.
    ///
    /// An empty sequence costs zero. Sequences that revisit nodes can
    /// outgrow the entry bound, so the sum saturates.
    pub fn tour_length(&self, depot: usize, nodes: &[usize]) -> u64 {
        let (Some(&first), Some(&last)) = (nodes.first(), nodes.last()) else {
            return 0;
        };
        nodes
            .windows(2)
            .map(|w| self.get(w[0], w[1]))
            .chain([self.get(depot, first), self.get(last, depot)])
            .fold(0, u64::saturating_add)
    }
}

fn checked_entry(row: usize, col: usize, value: i64, limit: u64) -> Result<u64, MatrixError> {
    let value = u64::try_from(value).map_err(|_| MatrixError::NegativeEntry { row, col, value })?;
    if value > limit {
        return Err(MatrixError::EntryTooLarge {
            row,
            col,
            value,
            limit,
        });
    }
    Ok(value)
}
