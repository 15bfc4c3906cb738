//! Crate-wide error type.
//!
//! Every fallible entry point returns [`Error`]. Callers are expected to
//! branch on [`Error::kind`] (or match the variant directly), never on the
//! rendered message. Wrapping variants ([`Error::Constructor`],
//! [`Error::NeighbourFetch`]) keep the original kind reachable through
//! [`Error::kind`].

use thiserror::Error;

use crate::traverse::Traversal;

/// Convenience alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// All error conditions surfaced at the crate boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A start, root, or query identifier is not present in the graph.
    #[error("unknown vertex {0:?}")]
    UnknownVertex(String),

    /// An algorithm's mode precondition was violated, e.g. Dijkstra on an
    /// unweighted graph or Prim on a directed one.
    #[error("mode incompatible: {0}")]
    ModeIncompatible(&'static str),

    /// An option carried an invalid value.
    #[error("invalid option: {0}")]
    OptionViolation(String),

    /// A cancellation token fired mid-traversal. The partial result holds
    /// everything populated up to the cancellation point.
    #[error("traversal cancelled after visiting {} vertices", .partial.visited.len())]
    Cancelled {
        /// Visited set, order prefix, depth and parent maps populated so far.
        partial: Box<Traversal>,
    },

    /// A caller-supplied visit/exit hook reported failure.
    #[error("hook failed at vertex {vertex:?}: {reason}")]
    HookFailure { vertex: String, reason: String },

    /// The underlying neighbour query failed during a traversal.
    #[error("neighbour fetch failed at vertex {vertex:?}")]
    NeighbourFetch {
        vertex: String,
        #[source]
        source: Box<Error>,
    },

    /// A spanning tree cannot reach every vertex.
    #[error("graph is disconnected: no spanning tree exists")]
    Disconnected,

    /// Topological sort encountered a back edge.
    #[error("cycle detected at vertex {0:?}")]
    CycleDetected(String),

    /// The DTW backtrack could not reach the origin cell.
    #[error("warping-path backtrack stalled at cell ({row}, {col})")]
    IncompletePath { row: usize, col: usize },

    /// LU factorisation or inversion hit a zero pivot.
    #[error("singular matrix: zero pivot at row {0}")]
    Singular(usize),

    /// A matrix operation requires a square or otherwise compatible shape.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: String, found: String },

    /// An entry point received an empty sequence.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// A builder constructor failed mid-composition. The source error keeps
    /// its original kind.
    #[error("constructor {constructor} failed")]
    Constructor {
        constructor: &'static str,
        #[source]
        source: Box<Error>,
    },
}

/// Fieldless classification of [`Error`], stable under wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    UnknownVertex,
    ModeIncompatible,
    OptionViolation,
    Cancelled,
    HookFailure,
    NeighbourFetch,
    Disconnected,
    CycleDetected,
    IncompletePath,
    Singular,
    DimensionMismatch,
    EmptyInput,
}

impl Error {
    /// Classify this error. Wrapping variants report the kind of the error
    /// they wrap, so a `Constructor`-wrapped `OptionViolation` still reads as
    /// `OptionViolation` here.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownVertex(_) => ErrorKind::UnknownVertex,
            Error::ModeIncompatible(_) => ErrorKind::ModeIncompatible,
            Error::OptionViolation(_) => ErrorKind::OptionViolation,
            Error::Cancelled { .. } => ErrorKind::Cancelled,
            Error::HookFailure { .. } => ErrorKind::HookFailure,
            Error::NeighbourFetch { .. } => ErrorKind::NeighbourFetch,
            Error::Disconnected => ErrorKind::Disconnected,
            Error::CycleDetected(_) => ErrorKind::CycleDetected,
            Error::IncompletePath { .. } => ErrorKind::IncompletePath,
            Error::Singular(_) => ErrorKind::Singular,
            Error::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
            Error::EmptyInput(_) => ErrorKind::EmptyInput,
            Error::Constructor { source, .. } => source.kind(),
        }
    }
}
