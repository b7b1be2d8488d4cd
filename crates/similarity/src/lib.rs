//! # Similarity Crate
//!
//! Nearest-neighbour search for user-based collaborative filtering:
//! "the user whose ratings look most like yours".
//!
//! ## Components
//!
//! ### Metrics
//! Scores for a pair of users, computed over the movies both rated:
//! - `MeanAbsoluteDifference` (default): `1 / (1 + mean |difference|)`
//! - `Cosine`: cosine of the two co-rated rating vectors
//!
//! ### SimilarityEngine
//! Scores every other user in the registry against a target and returns the
//! best match, breaking ties by ascending user id.
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::SimilarityEngine;
//!
//! let engine = SimilarityEngine::new(&dataset.registry);
//! let neighbour = engine.find_most_similar(user_id)?;
//! println!("User {} is closest to user {}", user_id, neighbour.id());
//! ```

pub mod engine;
pub mod metric;

pub use engine::{ScoredUser, SimilarityEngine, SimilarityError};
pub use metric::{Cosine, MeanAbsoluteDifference, SimilarityMetric};
