//! Typed error hierarchy shared by every layer of this crate.
//!
//! Each layer gets its own enum so that callers can match on the kind of
//! failure without parsing strings; [`SolveError`] is the top-level enum
//! returned by the public solver entry points and wraps the others.

use thiserror::Error;

/// Errors produced while parsing a dense matrix or a DIMACS-like stream.
#[derive(Debug, Error)]
pub enum InputError {
    /// The stream ended, or a token was missing, before the declared shape
    /// of the input was fully read.
    #[error("malformed input at {where_}: {reason}")]
    Malformed {
        /// Human-readable location (e.g. "line 3" or "weight row 2").
        where_: String,
        /// What went wrong.
        reason: String,
    },

    /// A token could not be parsed as a signed integer.
    #[error("expected an integer at {where_}, got {token:?}")]
    NotAnInteger {
        /// Human-readable location.
        where_: String,
        /// The offending token.
        token: String,
    },

    /// The requested file could not be opened.
    #[error("could not open {path}: {source}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// `n * max|W|` (or an equivalent accumulation) would risk overflowing
    /// the crate's `i64` cost arithmetic.
    #[error("input would overflow i64 cost arithmetic: {reason}")]
    Overflow {
        /// What overflowed, in human terms.
        reason: String,
    },
}

/// Errors produced by [`crate::heap::IndexedKHeap`].
///
/// Both variants indicate a programming error at the call site: a correct
/// caller never triggers them.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `peek_min`/`pop_min` called on a heap with no elements.
    #[error("heap empty")]
    Empty,

    /// `update` called with an out-of-range back-pointer position.
    #[error("invalid position")]
    InvalidPosition,
}

/// Errors produced by [`crate::instance::BipartiteInstance`]'s graph
/// queries.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    /// A vertex id fell outside `[0, 2n)`.
    #[error("vertex {0} is out of range")]
    OutOfRange(usize),

    /// Two endpoints passed to a weight accessor are on the same side of
    /// the bipartition.
    #[error("vertices {0} and {1} are on the same side of the bipartition")]
    SameSide(usize, usize),
}

/// Top-level error returned by [`crate::solver::MatchingSolver`]'s public
/// methods.
#[derive(Debug, Error)]
pub enum SolveError {
    /// A heap invariant was violated.
    #[error(transparent)]
    Heap(#[from] HeapError),

    /// A graph invariant was violated.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Convenience alias matching the teacher's `Result<T>` idiom.
pub type Result<T, E = SolveError> = std::result::Result<T, E>;
