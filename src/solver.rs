//! Successive-shortest-augmenting-path solver for maximum-weight bipartite
//! matching over a [`crate::instance::BipartiteInstance`].
//!
//! Each phase runs one Dijkstra sweep over reduced costs, seeded from every
//! currently-free `S`-vertex, and stops at the first settled free
//! `T`-vertex. The sweep's own heap is rebuilt from scratch every phase (see
//! [`crate::heap::IndexedKHeap::build`]); only the vertex potentials and the
//! matching persist across phases.

use crate::error::SolveError;
use crate::heap::{HeapEntry, IndexedKHeap};
use crate::instance::{BipartiteInstance, Side};

/// Default branching factor for the per-phase heap. Four children per node
/// keeps the sift-down comparison count low for the vertex counts this
/// solver is meant for without the cache-unfriendliness of very wide heaps.
const DEFAULT_ARITY: usize = 4;

/// When a phase should stop applying augmenting paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoppingPolicy {
    /// Apply a phase's augmenting path only while it does not decrease the
    /// total matched weight; stop (without consuming the path) otherwise.
    MaximizeWeight,
    /// Apply every phase's augmenting path unconditionally, trading total
    /// weight for matching size.
    Perfect,
}

/// Per-vertex Dijkstra scratch: tentative distance plus the heap
/// back-pointer required by [`HeapEntry`].
#[derive(Debug, Clone, Copy)]
struct VertexScratch {
    dist: i64,
    position: usize,
}

impl VertexScratch {
    fn unreached() -> Self {
        VertexScratch {
            dist: i64::MAX,
            position: 0,
        }
    }
}

impl HeapEntry for VertexScratch {
    type Key = i64;

    fn key(&self) -> i64 {
        self.dist
    }

    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }
}

/// The outcome of one Dijkstra sweep: either no free `T`-vertex was
/// reachable, or the closest one was found together with the data needed to
/// apply or discard the augmenting path that reaches it.
enum PhaseOutcome {
    Exhausted,
    Found {
        free_t: usize,
        net_score: i64,
        dist: Vec<i64>,
        pred: Vec<Option<usize>>,
        settled: Vec<bool>,
    },
}

/// Drives [`BipartiteInstance`] through successive augmenting-path phases.
///
/// Borrows the instance for the duration of a solve; the two public methods
/// ([`MatchingSolver::maximum_matching`], [`MatchingSolver::maximum_perfect_matching`])
/// consume `self` since each represents a single, one-shot solve.
pub struct MatchingSolver<'a> {
    instance: &'a mut BipartiteInstance,
    arity: usize,
}

impl<'a> MatchingSolver<'a> {
    /// Builds a solver over `instance` using the default heap arity.
    pub fn new(instance: &'a mut BipartiteInstance) -> Self {
        MatchingSolver {
            instance,
            arity: DEFAULT_ARITY,
        }
    }

    /// Builds a solver using a caller-chosen heap arity (must be `>= 2`).
    pub fn with_arity(instance: &'a mut BipartiteInstance, arity: usize) -> Self {
        assert!(arity >= 2, "heap arity must be at least 2");
        MatchingSolver { instance, arity }
    }

    /// Runs phases while each one does not decrease the total matched
    /// weight, stopping as soon as one would. Returns the resulting
    /// matching, which maximizes total weight among all matchings reachable
    /// this way (not necessarily a perfect matching).
    pub fn maximum_matching(mut self) -> Result<Vec<Option<usize>>, SolveError> {
        self.run(StoppingPolicy::MaximizeWeight)
    }

    /// Runs phases unconditionally until no augmenting path remains,
    /// maximizing matching size first and total weight second. Returns a
    /// perfect matching when `n > 0`, since a complete bipartite graph on
    /// `n + n` vertices always admits one.
    pub fn maximum_perfect_matching(mut self) -> Result<Vec<Option<usize>>, SolveError> {
        self.run(StoppingPolicy::Perfect)
    }

    fn run(&mut self, policy: StoppingPolicy) -> Result<Vec<Option<usize>>, SolveError> {
        loop {
            match self.phase()? {
                PhaseOutcome::Exhausted => {
                    log::debug!("phase found no augmenting path, stopping");
                    break;
                }
                PhaseOutcome::Found {
                    free_t,
                    net_score,
                    dist,
                    pred,
                    settled,
                } => {
                    let apply = match policy {
                        StoppingPolicy::Perfect => true,
                        StoppingPolicy::MaximizeWeight => net_score >= 0,
                    };
                    if !apply {
                        log::debug!(
                            "augmenting path to {} has net_score {} < 0, stopping",
                            free_t,
                            net_score
                        );
                        break;
                    }
                    log::trace!(
                        "applying augmenting path to {} with net_score {}",
                        free_t,
                        net_score
                    );
                    self.apply_path(free_t, &pred);
                    self.update_potentials(&dist, &settled);
                }
            }
        }
        Ok(self.instance.matching().to_vec())
    }

    /// Runs one Dijkstra sweep over reduced costs, seeded from every free
    /// `S`-vertex, settling vertices until the heap empties. Tracks the
    /// first-settled free `T`-vertex, which Dijkstra's monotone settling
    /// order guarantees is the closest one.
    fn phase(&mut self) -> Result<PhaseOutcome, SolveError> {
        let n = self.instance.n();
        let total = self.instance.vertex_count();

        let mut scratch: Vec<VertexScratch> = (0..total).map(|_| VertexScratch::unreached()).collect();
        let mut pred: Vec<Option<usize>> = vec![None; total];
        let mut settled = vec![false; total];

        let mut free_s = Vec::new();
        for i in 0..n {
            if self.instance.matched_to(i).is_none() {
                scratch[i].dist = 0;
                free_s.push(i);
            }
        }

        let mut heap = IndexedKHeap::build(self.arity, &mut scratch, free_s);
        let mut closest_free_t: Option<usize> = None;

        while !heap.is_empty() {
            let u = heap.pop_min(&mut scratch)?;
            if settled[u] {
                continue;
            }
            settled[u] = true;

            match self.instance.partition(u)? {
                Side::S => {
                    for j in n..total {
                        if self.instance.matched_to(u) == Some(j) {
                            continue;
                        }
                        self.relax(u, j, &mut scratch, &mut pred, &settled, &mut heap)?;
                    }
                }
                Side::T => {
                    if let Some(m) = self.instance.matched_to(u) {
                        self.relax(u, m, &mut scratch, &mut pred, &settled, &mut heap)?;
                    } else if closest_free_t.map_or(true, |t| scratch[u].dist < scratch[t].dist) {
                        closest_free_t = Some(u);
                    }
                }
            }
        }

        let dist: Vec<i64> = scratch.iter().map(|e| e.dist).collect();

        let free_t = match closest_free_t {
            Some(t) => t,
            None => return Ok(PhaseOutcome::Exhausted),
        };

        let net_score = self.net_score(free_t, &pred)?;

        Ok(PhaseOutcome::Found {
            free_t,
            net_score,
            dist,
            pred,
            settled,
        })
    }

    /// Relaxes edge `(u, w)`: if it strictly shortens `w`'s tentative
    /// distance, records the new distance and predecessor and updates `w`'s
    /// position in `heap` (inserting it if this is the first time it has
    /// been reached). A no-op if `w` is already settled.
    fn relax(
        &self,
        u: usize,
        w: usize,
        scratch: &mut [VertexScratch],
        pred: &mut [Option<usize>],
        settled: &[bool],
        heap: &mut IndexedKHeap,
    ) -> Result<(), SolveError> {
        if settled[w] {
            return Ok(());
        }
        let edge_cost = self.instance.reduced(u, w)?;
        let candidate = scratch[u].dist.saturating_add(edge_cost);
        if candidate >= scratch[w].dist {
            return Ok(());
        }
        let first_reach = scratch[w].dist == i64::MAX;
        scratch[w].dist = candidate;
        pred[w] = Some(u);
        if first_reach {
            heap.insert(scratch, w);
        } else {
            heap.update(scratch, w)?;
        }
        Ok(())
    }

    /// Walks the predecessor chain from `free_t` back to a free `S`-vertex
    /// (signaled by a `None` predecessor), alternating a `new_path` flag
    /// starting `true` (the edge touching `free_t` is necessarily not yet in
    /// the matching). Returns the net change in total matched weight that
    /// applying this path would produce.
    ///
    /// `raw` on a "new" edge is the original weight, but on an "old"
    /// (currently matched) edge it is already sign-flipped by a prior
    /// `apply_path` (see `set_raw`), so `old_score` accumulates the
    /// *negation* of the original weight being removed. The true delta is
    /// therefore `new_score - (-old_score) = new_score + old_score`, not
    /// `new_score - old_score`.
    fn net_score(&self, free_t: usize, pred: &[Option<usize>]) -> Result<i64, SolveError> {
        let mut new_score = 0i64;
        let mut old_score = 0i64;
        let mut new_path = true;
        let mut i = free_t;
        while let Some(p) = pred[i] {
            let w = self.instance.raw(p, i)?;
            if new_path {
                new_score += w;
            } else {
                old_score += w;
            }
            new_path = !new_path;
            i = p;
        }
        Ok(new_score + old_score)
    }

    /// Applies the augmenting path ending at `free_t`: every "new" edge
    /// becomes matched at both endpoints, and every edge along the path has
    /// its stored sign flipped (entering or leaving the matching). "Old"
    /// edges are left untouched in the matching array itself — the vertex
    /// at each end of an old edge is always reassigned by the adjacent new
    /// edge earlier or later in this same walk, so no vertex is ever
    /// legitimately freed by applying a path.
    fn apply_path(&mut self, free_t: usize, pred: &[Option<usize>]) {
        let mut new_path = true;
        let mut i = free_t;
        while let Some(p) = pred[i] {
            if new_path {
                self.instance.set_matched(i, Some(p));
                self.instance.set_matched(p, Some(i));
            }
            let w = self
                .instance
                .raw(p, i)
                .expect("path edges were validated during the Dijkstra sweep");
            self.instance
                .set_raw(p, i, -w)
                .expect("path edges were validated during the Dijkstra sweep");
            new_path = !new_path;
            i = p;
        }
    }

    /// Adds each settled vertex's final sweep distance to its potential,
    /// keeping every future reduced cost non-negative. Unsettled vertices
    /// keep their previous potential unchanged.
    fn update_potentials(&mut self, dist: &[i64], settled: &[bool]) {
        for (v, &is_settled) in settled.iter().enumerate() {
            if is_settled {
                self.instance.add_potential(v, dist[v]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve_max(weights: Vec<Vec<i64>>) -> Vec<Option<usize>> {
        let mut instance = BipartiteInstance::from_weights(weights);
        MatchingSolver::new(&mut instance).maximum_matching().unwrap()
    }

    fn solve_perfect(weights: Vec<Vec<i64>>) -> Vec<Option<usize>> {
        let mut instance = BipartiteInstance::from_weights(weights);
        MatchingSolver::new(&mut instance)
            .maximum_perfect_matching()
            .unwrap()
    }

    fn total_weight(weights: &[Vec<i64>], matching: &[Option<usize>]) -> i64 {
        let n = weights.len();
        (0..n)
            .filter_map(|i| matching[i].map(|j| weights[i][j - n]))
            .sum()
    }

    #[test]
    fn two_by_two_with_tied_optima_still_reaches_the_best_total() {
        // {0-2, 1-3} and {0-3, 1-2} both score 6; either is an acceptable
        // optimum.
        let weights = vec![vec![1, 3], vec![3, 1]];
        let matching = solve_max(weights.clone());
        assert_eq!(matching.len(), 4);
        assert!(matching[0..2].iter().all(|m| m.is_some()));
        assert_eq!(total_weight(&weights, &matching), 6);
    }

    #[test]
    fn three_by_three_with_a_negative_entry_avoids_it_when_optional() {
        let weights = vec![
            vec![5, 1, 1],
            vec![1, 5, -100],
            vec![1, 1, 5],
        ];
        let matching = solve_max(weights.clone());
        // Best achievable total without forcing the -100 edge is 15.
        assert_eq!(total_weight(&weights, &matching), 15);
    }

    #[test]
    fn identity_matrix_matches_each_vertex_to_its_mirror() {
        let weights = vec![
            vec![9, 0, 0],
            vec![0, 9, 0],
            vec![0, 0, 9],
        ];
        let matching = solve_max(weights.clone());
        assert_eq!(total_weight(&weights, &matching), 27);
        for i in 0..3 {
            assert_eq!(matching[i], Some(3 + i));
        }
    }

    #[test]
    fn all_equal_weights_still_produce_a_full_matching() {
        let weights = vec![vec![7, 7], vec![7, 7]];
        let matching = solve_max(weights.clone());
        assert_eq!(total_weight(&weights, &matching), 14);
        assert!(matching.iter().all(|m| m.is_some()));
    }

    #[test]
    fn single_vertex_pair_matches_trivially() {
        let weights = vec![vec![42]];
        let matching = solve_max(weights.clone());
        assert_eq!(matching, vec![Some(1), Some(0)]);
    }

    #[test]
    fn all_negative_weights_stop_before_any_augmentation() {
        let weights = vec![vec![-1, -2], vec![-3, -4]];
        let matching = solve_max(weights);
        assert!(matching.iter().all(|m| m.is_none()));
    }

    #[test]
    fn rejects_a_weight_decreasing_swap_through_an_existing_match() {
        // The only perfect matching swaps the 10-weight edge 0-2 out in favor
        // of 0-3 and 1-2, for a net change of (1 + 1) - 10 = -8: a decrease.
        // The optimum leaves 1 free and keeps just 0-2, for a total of 10.
        let weights = vec![vec![10, 1], vec![1, -10]];
        let matching = solve_max(weights.clone());
        assert_eq!(total_weight(&weights, &matching), 10);
        assert_eq!(matching[0], Some(2));
        assert_eq!(matching[1], None);
    }

    #[test]
    fn perfect_matching_is_always_total_even_with_negative_weights() {
        let weights = vec![vec![-1, -2], vec![-3, -4]];
        let matching = solve_perfect(weights);
        assert!(matching.iter().all(|m| m.is_some()));
    }

    #[test]
    fn maximum_matching_is_idempotent_at_the_optimum() {
        let weights = vec![
            vec![5, 1, 1],
            vec![1, 5, -100],
            vec![1, 1, 5],
        ];
        let mut instance = BipartiteInstance::from_weights(weights.clone());
        let first = MatchingSolver::new(&mut instance)
            .maximum_matching()
            .unwrap();
        let second = MatchingSolver::new(&mut instance)
            .maximum_matching()
            .unwrap();
        assert_eq!(first, second);
    }
}
