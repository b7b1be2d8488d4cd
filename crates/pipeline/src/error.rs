//! Errors surfaced by the recommendation entry points.
//!
//! An empty recommendation list is not an error: it means the neighbour had
//! nothing that passed the filters. These variants mean nothing could be
//! computed at all.

use data_loader::UserId;
use similarity::SimilarityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    /// The target user is not in the registry
    #[error("User {id} not found")]
    UserNotFound { id: UserId },

    /// The target user is the only user in the registry
    #[error("No similar user found for user {id}")]
    NoSimilarUser { id: UserId },

    /// A filter in the pipeline failed
    #[error(transparent)]
    Filter(#[from] anyhow::Error),
}

impl From<SimilarityError> for RecommendError {
    fn from(err: SimilarityError) -> Self {
        match err {
            SimilarityError::UserNotFound { id } => RecommendError::UserNotFound { id },
            SimilarityError::NoSimilarUser { id } => RecommendError::NoSimilarUser { id },
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
