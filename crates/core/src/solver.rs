//! Solver trait.

use crate::Result;

/// Common interface for the packing engine and its collaborators.
///
/// Every call is self-contained: implementations own their scratch state for
/// the duration of one `solve` and keep nothing between calls, so a single
/// solver may serve many requests from different threads.
pub trait Solver {
    /// The request type this solver handles.
    type Request;
    /// The value produced for a valid request.
    type Output;

    /// Validates and solves a request.
    fn solve(&self, request: &Self::Request) -> Result<Self::Output>;
}
