/// Error type.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// Arithmetic overflow.
    #[error("overflow: {0}")]
    Overflow(&'static str),
    /// Nothing to rank.
    #[error("empty candidate set")]
    EmptyCandidateSet,
    /// The same trader appears more than once in a candidate set.
    #[error("duplicate candidate")]
    DuplicateCandidate,
    /// The requested number of recipients is out of range.
    #[error("invalid top n: requested {requested}, ranked {ranked}")]
    InvalidTopN {
        /// Requested recipients.
        requested: u64,
        /// Length of the ranking.
        ranked: usize,
    },
    /// Every selected recipient has a zero score.
    #[error("no valid scores")]
    NoValidScores,
}

impl Error {
    /// Create an [`Error::InvalidArgument`].
    pub fn invalid_argument(msg: &'static str) -> Self {
        Self::InvalidArgument(msg)
    }
}
