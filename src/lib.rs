#![deny(unused_imports)]
#![deny(missing_docs)]

//! A maximum-weight bipartite matching engine for Rust.
//!
//! The core algorithm is successive shortest augmenting paths over Johnson-
//! reweighted reduced costs, run on a complete bipartite graph with a dense
//! integer weight matrix (see [`instance::BipartiteInstance`] and
//! [`solver::MatchingSolver`]). The Dijkstra sweep each phase runs on is
//! backed by [`heap::IndexedKHeap`], an indexed k-ary min-heap supporting
//! true `O(log_k n)` decrease-key via caller-owned back-pointers, which this
//! crate also exposes standalone (see [`dijkstra`]) since it has no
//! intrinsic dependency on the matching problem.

/// A standalone single-source shortest-path demo sharing [`heap`].
pub mod dijkstra;
/// Typed error hierarchy shared by every layer of this crate.
pub mod error;
/// An indexed k-ary min-heap supporting `O(log_k n)` decrease-key.
pub mod heap;
/// The dense bipartite weight matrix, matching, and potentials.
pub mod instance;
/// Readers and formatters for the shapes this crate accepts and produces.
pub mod io;
/// Successive-shortest-augmenting-path maximum-weight matching solver.
pub mod solver;
