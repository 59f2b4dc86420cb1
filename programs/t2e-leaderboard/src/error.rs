use anchor_lang::prelude::*;

#[error_code]
pub enum LeaderboardError {
    #[msg("invalid input")]
    InvalidInput,
    #[msg("unauthorized")]
    Unauthorized,
    #[msg("trade rejected by the anti-abuse filter")]
    RejectedByAntiAbuse,
    #[msg("rewards are paused")]
    Paused,
    #[msg("rewards have already been distributed in this epoch")]
    AlreadyDistributedThisEpoch,
    #[msg("stale submission")]
    StaleSubmission,
    #[msg("insufficient reward pool balance")]
    InsufficientPoolBalance,
    #[msg("insufficient balance")]
    InsufficientBalance,
    #[msg("empty candidate set")]
    EmptyCandidateSet,
    #[msg("the leaderboard has not been updated yet")]
    NoLeaderboardYet,
    #[msg("invalid top n")]
    InvalidTopN,
    #[msg("arithmetic overflow")]
    ArithmeticOverflow,
    #[msg("the leaderboard was updated too recently")]
    UpdateTooSoon,
    #[msg("no valid scores")]
    NoValidScores,
    #[msg("invalid config")]
    InvalidConfig,
    #[msg("token account mismatched")]
    TokenAccountMismatched,
    #[msg("recipient account not provided")]
    RecipientAccountNotProvided,
    #[msg("model error")]
    Model,
}

/// Wraps a model error so that it can be turned into a program error.
pub(crate) struct ModelError(t2e_model::Error);

impl From<t2e_model::Error> for ModelError {
    fn from(err: t2e_model::Error) -> Self {
        Self(err)
    }
}

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        use t2e_model::Error as Model;

        match err.0 {
            Model::EmptyCandidateSet => LeaderboardError::EmptyCandidateSet.into(),
            Model::DuplicateCandidate => LeaderboardError::InvalidInput.into(),
            Model::InvalidTopN { requested, ranked } => {
                msg!("[Leaderboard] invalid top n: {} of {}", requested, ranked);
                LeaderboardError::InvalidTopN.into()
            }
            Model::NoValidScores => LeaderboardError::NoValidScores.into(),
            Model::InvalidArgument(reason) => {
                msg!("[Leaderboard] invalid argument: {}", reason);
                LeaderboardError::InvalidInput.into()
            }
            Model::Overflow(what) => {
                msg!("[Leaderboard] overflow: {}", what);
                LeaderboardError::ArithmeticOverflow.into()
            }
            model_error => {
                msg!("A model error occurred. Error Message: {}", model_error);
                LeaderboardError::Model.into()
            }
        }
    }
}
