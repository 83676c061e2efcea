//! Readers and formatters for the shapes this crate's binaries accept and
//! produce. Kept separate from [`crate::instance`] and [`crate::dijkstra`]
//! so the core algorithms never depend on `std::io` directly.

/// DIMACS-like shortest-path format reader, used by [`crate::dijkstra`].
pub mod dimacs;
/// Dense weight-matrix reader, used by [`crate::instance`].
pub mod matrix;
/// Debug-printing helpers for a [`crate::instance::BipartiteInstance`].
pub mod pretty;
