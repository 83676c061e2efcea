//! Dense bipartite instance: the weight matrix, matching, and potentials
//! that [`crate::solver::MatchingSolver`] operates on.

use crate::error::{GraphError, InputError};

/// Which side of the bipartition a vertex id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The left side, indices `0..n`.
    S,
    /// The right side, indices `n..2n`.
    T,
}

/// A complete bipartite graph on `n + n` vertices with a dense, mutable
/// integer weight matrix, a current matching, and Johnson-style vertex
/// potentials.
///
/// Construct with [`BipartiteInstance::from_matrix`] (parsing) or
/// [`BipartiteInstance::from_weights`] (programmatic). The instance is
/// mutated in place by [`crate::solver::MatchingSolver`]; nothing about it
/// is safe to share across threads while a solve is in progress (see
/// SPEC_FULL §5).
#[derive(Debug, Clone)]
pub struct BipartiteInstance {
    n: usize,
    /// Row-major, indexed as `weights[j_local * n + i]` where `i` is the
    /// `S`-local index and `j_local = j - n` is the `T`-local index. A
    /// negative stored weight for an edge means "currently in the
    /// matching"; `raw` reports the value with its true sign restored by
    /// the caller via `search_cost`/`reduced`.
    weights: Vec<i64>,
    matching: Vec<Option<usize>>,
    potentials: Vec<i64>,
}

impl BipartiteInstance {
    /// Builds an instance directly from an `n x n` weight matrix where
    /// `weights[i][j]` is the weight of edge `(i, n + j)`.
    ///
    /// Initializes `potentials(S) = 0` and `potentials(T) = -max_w`, which
    /// guarantees every initial reduced cost on the negated (search-cost)
    /// weights is non-negative.
    pub fn from_weights(weights: Vec<Vec<i64>>) -> Self {
        let n = weights.len();
        debug_assert!(weights.iter().all(|row| row.len() == n));

        let mut flat = vec![0i64; n * n];
        let mut max_w = i64::MIN;
        for (i, row) in weights.iter().enumerate() {
            for (j, &w) in row.iter().enumerate() {
                flat[j * n + i] = w;
                if w > max_w {
                    max_w = w;
                }
            }
        }
        if n == 0 {
            max_w = 0;
        }

        let mut potentials = vec![0i64; 2 * n];
        for p in potentials.iter_mut().skip(n) {
            *p = -max_w;
        }

        BipartiteInstance {
            n,
            weights: flat,
            matching: vec![None; 2 * n],
            potentials,
        }
    }

    /// Parses an `n x n` dense weight matrix from `reader` using
    /// [`crate::io::matrix::read_matrix`] and builds an instance from it.
    pub fn from_matrix<R: std::io::Read>(reader: R) -> Result<Self, InputError> {
        let weights = crate::io::matrix::read_matrix(reader)?;
        Ok(Self::from_weights(weights))
    }

    /// The size of each side of the bipartition.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// The total number of vertices, `2n`.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        2 * self.n
    }

    /// Whether `i` names a vertex of this instance.
    #[inline]
    pub fn valid(&self, i: usize) -> bool {
        i < self.vertex_count()
    }

    /// Which side of the bipartition `i` belongs to.
    pub fn partition(&self, i: usize) -> Result<Side, GraphError> {
        if !self.valid(i) {
            return Err(GraphError::OutOfRange(i));
        }
        Ok(if i < self.n { Side::S } else { Side::T })
    }

    /// Canonicalizes `(u, v)` to `(i, j_local)` with `i` the `S`-local
    /// index and `j_local` the `T`-local index, failing if the endpoints
    /// are out of range or on the same side.
    fn canonical_indices(&self, u: usize, v: usize) -> Result<(usize, usize), GraphError> {
        if !self.valid(u) {
            return Err(GraphError::OutOfRange(u));
        }
        if !self.valid(v) {
            return Err(GraphError::OutOfRange(v));
        }
        let (i, j) = if u < self.n { (u, v) } else { (v, u) };
        if j < self.n {
            return Err(GraphError::SameSide(u, v));
        }
        Ok((i, j - self.n))
    }

    /// The current, signed stored weight of edge `(u, v)`.
    pub fn raw(&self, u: usize, v: usize) -> Result<i64, GraphError> {
        let (i, j) = self.canonical_indices(u, v)?;
        Ok(self.weights[j * self.n + i])
    }

    /// The cost used by the shortest-path sweep: `-raw(u, v)`, so that
    /// maximizing the original weight is minimizing the sum of
    /// `search_cost` along an augmenting path.
    pub fn search_cost(&self, u: usize, v: usize) -> Result<i64, GraphError> {
        Ok(-self.raw(u, v)?)
    }

    /// The reduced cost `search_cost(u, v) - (pi(v) - pi(u))`, which must
    /// be non-negative at every point in a valid Dijkstra sweep.
    pub fn reduced(&self, u: usize, v: usize) -> Result<i64, GraphError> {
        let cost = self.search_cost(u, v)?;
        Ok(cost - (self.potentials[v] - self.potentials[u]))
    }

    /// Overwrites the stored weight of edge `(u, v)`. Used to flip the sign
    /// of an edge when it enters or leaves the matching.
    pub fn set_raw(&mut self, u: usize, v: usize, w: i64) -> Result<(), GraphError> {
        let (i, j) = self.canonical_indices(u, v)?;
        self.weights[j * self.n + i] = w;
        Ok(())
    }

    /// The vertex currently matched to `v`, if any.
    #[inline]
    pub fn matched_to(&self, v: usize) -> Option<usize> {
        self.matching[v]
    }

    /// The current potential of vertex `v`.
    #[inline]
    pub fn potential(&self, v: usize) -> i64 {
        self.potentials[v]
    }

    /// Read-only view of the current matching.
    #[inline]
    pub fn matching(&self) -> &[Option<usize>] {
        &self.matching
    }

    /// Read-only view of the current potentials.
    #[inline]
    pub fn potentials(&self) -> &[i64] {
        &self.potentials
    }

    /// The current stored weights of `S`-local row `i`, one per `T`-local
    /// column. Used for debug printing; a matched edge's entry is the
    /// negation of its original weight, per the sign-flip convention.
    pub fn stored_row(&self, i: usize) -> Vec<i64> {
        (0..self.n).map(|j| self.weights[j * self.n + i]).collect()
    }

    pub(crate) fn set_matched(&mut self, v: usize, to: Option<usize>) {
        self.matching[v] = to;
    }

    pub(crate) fn add_potential(&mut self, v: usize, delta: i64) {
        self.potentials[v] += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_splits_at_n() {
        let instance = BipartiteInstance::from_weights(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(instance.partition(0).unwrap(), Side::S);
        assert_eq!(instance.partition(1).unwrap(), Side::S);
        assert_eq!(instance.partition(2).unwrap(), Side::T);
        assert_eq!(instance.partition(3).unwrap(), Side::T);
        assert_eq!(instance.partition(4), Err(GraphError::OutOfRange(4)));
    }

    #[test]
    fn weight_accessors_are_symmetric_in_endpoint_order() {
        let instance = BipartiteInstance::from_weights(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(instance.raw(0, 2).unwrap(), 1);
        assert_eq!(instance.raw(2, 0).unwrap(), 1);
        assert_eq!(instance.raw(1, 3).unwrap(), 4);
        assert_eq!(instance.search_cost(0, 2).unwrap(), -1);
    }

    #[test]
    fn same_side_access_is_rejected() {
        let instance = BipartiteInstance::from_weights(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(instance.raw(0, 1), Err(GraphError::SameSide(0, 1)));
    }

    #[test]
    fn potentials_initialize_to_nonnegative_reduced_costs() {
        // max_w = 4, so pi(T) = -4, pi(S) = 0.
        let instance = BipartiteInstance::from_weights(vec![vec![1, 2], vec![3, 4]]);
        for i in 0..2 {
            for j in 2..4 {
                assert!(instance.reduced(i, j).unwrap() >= 0);
            }
        }
    }

    #[test]
    fn set_raw_round_trips_under_double_negation() {
        let mut instance = BipartiteInstance::from_weights(vec![vec![1, 2], vec![3, 4]]);
        let original = instance.raw(0, 2).unwrap();
        instance.set_raw(0, 2, -original).unwrap();
        instance.set_raw(0, 2, -instance.raw(0, 2).unwrap()).unwrap();
        assert_eq!(instance.raw(0, 2).unwrap(), original);
    }
}
