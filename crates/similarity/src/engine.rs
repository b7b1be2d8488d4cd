//! Similarity Engine - nearest neighbour search over the registry
//!
//! Finds the single user whose ratings are closest to a target user's.
//!
//! ## Algorithm
//! 1. Collect every user except the target, in ascending user id
//! 2. Score each candidate against the target (in parallel with Rayon)
//! 3. Reduce sequentially: a candidate replaces the current best only if its
//!    score is strictly higher
//!
//! Because the reduction runs over the registry's fixed order, ties always go
//! to the lowest user id no matter how Rayon scheduled the scoring.

use crate::metric::{co_rated_pairs, MeanAbsoluteDifference, SimilarityMetric};
use data_loader::{UserId, UserProfile, UserRegistry};
use rayon::prelude::*;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    /// The target user never appeared in the ratings
    #[error("User {id} not found")]
    UserNotFound { id: UserId },

    /// The registry holds nobody but the target
    #[error("No other user to compare user {id} against")]
    NoSimilarUser { id: UserId },
}

pub type Result<T> = std::result::Result<T, SimilarityError>;

/// A candidate user with its score against the target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredUser {
    pub user_id: UserId,
    /// `None` when the two users share no rated movie
    pub score: Option<f64>,
    /// Number of movies both users rated
    pub co_rated: usize,
}

/// Finds the users most similar to a target user
pub struct SimilarityEngine<'a> {
    /// Borrowed read-only: the registry is frozen once loading is done
    registry: &'a UserRegistry,
    metric: Box<dyn SimilarityMetric>,
}

impl<'a> SimilarityEngine<'a> {
    /// Create an engine using the default metric (`MeanAbsoluteDifference`)
    pub fn new(registry: &'a UserRegistry) -> Self {
        Self {
            registry,
            metric: Box::new(MeanAbsoluteDifference),
        }
    }

    /// Swap in a different similarity metric
    pub fn with_metric(mut self, metric: impl SimilarityMetric + 'static) -> Self {
        self.metric = Box::new(metric);
        self
    }

    pub fn metric_name(&self) -> &str {
        self.metric.name()
    }

    pub fn registry(&self) -> &'a UserRegistry {
        self.registry
    }

    /// Return the user most similar to `target_id`, never the target itself.
    ///
    /// With exactly one other user, that user is returned whatever its score.
    #[instrument(skip(self), fields(metric = self.metric.name()))]
    pub fn find_most_similar(&self, target_id: UserId) -> Result<&'a UserProfile> {
        let target = self.target(target_id)?;
        let scored = self.score_candidates(target);
        debug!("Scored {} candidate users", scored.len());

        let (best, score) = select_best(scored).ok_or(SimilarityError::NoSimilarUser {
            id: target_id,
        })?;

        debug!(similar_user = best.id(), ?score, "Selected most similar user");
        Ok(best)
    }

    /// The `k` most similar users, best first; equal scores keep ascending id order
    #[instrument(skip(self), fields(metric = self.metric.name()))]
    pub fn rank_similar(&self, target_id: UserId, k: usize) -> Result<Vec<ScoredUser>> {
        let target = self.target(target_id)?;

        let mut ranked: Vec<ScoredUser> = self
            .score_candidates(target)
            .into_iter()
            .map(|(profile, score)| ScoredUser {
                user_id: profile.id(),
                score,
                co_rated: co_rated_pairs(target, profile).len(),
            })
            .collect();

        // sort_by is stable, so ties stay in registry order
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked.truncate(k);

        debug!("Ranked {} similar users", ranked.len());
        Ok(ranked)
    }

    fn target(&self, target_id: UserId) -> Result<&'a UserProfile> {
        self.registry
            .find(target_id)
            .ok_or(SimilarityError::UserNotFound { id: target_id })
    }

    /// Score every user except the target, preserving registry order
    fn score_candidates(&self, target: &UserProfile) -> Vec<(&'a UserProfile, Option<f64>)> {
        let candidates: Vec<&'a UserProfile> = self
            .registry
            .all_users()
            .filter(|user| user.id() != target.id())
            .collect();

        // Indexed parallel iterators keep input order on collect
        candidates
            .par_iter()
            .map(|&candidate| (candidate, self.metric.score(target, candidate)))
            .collect()
    }
}

/// First item with the strictly highest score, or `None` for an empty input
fn select_best<T>(scored: impl IntoIterator<Item = (T, Option<f64>)>) -> Option<(T, Option<f64>)> {
    scored.into_iter().fold(None, |best, (item, score)| match best {
        Some((_, best_score)) if score <= best_score => best,
        _ => Some((item, score)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Cosine;

    /// Users A=1, B=2, C=3 from the worked example
    fn create_test_registry() -> UserRegistry {
        let mut registry = UserRegistry::new();

        registry.insert(1, 10, 5.0);
        registry.insert(1, 11, 3.0);

        registry.insert(2, 10, 5.0);
        registry.insert(2, 12, 5.0);
        registry.insert(2, 13, 1.0);

        registry.insert(3, 10, 1.0);
        registry.insert(3, 14, 5.0);

        registry
    }

    #[test]
    fn test_select_best_prefers_first_on_ties() {
        let best = select_best(vec![("a", Some(0.5)), ("b", Some(0.9)), ("c", Some(0.9))]);
        assert_eq!(best, Some(("b", Some(0.9))));

        let best = select_best(vec![("a", None), ("b", None)]);
        assert_eq!(best, Some(("a", None)));

        let best = select_best(vec![("a", None), ("b", Some(0.1))]);
        assert_eq!(best, Some(("b", Some(0.1))));

        assert_eq!(select_best(Vec::<(&str, Option<f64>)>::new()), None);
    }

    #[test]
    fn test_find_most_similar_picks_closest_user() {
        let registry = create_test_registry();
        let engine = SimilarityEngine::new(&registry);

        let similar = engine.find_most_similar(1).unwrap();
        assert_eq!(similar.id(), 2);
    }

    #[test]
    fn test_never_returns_target() {
        let registry = create_test_registry();
        let engine = SimilarityEngine::new(&registry);

        for user_id in registry.user_ids() {
            let similar = engine.find_most_similar(user_id).unwrap();
            assert_ne!(similar.id(), user_id);
        }
    }

    #[test]
    fn test_two_users_always_match() {
        let mut registry = UserRegistry::new();
        registry.insert(1, 10, 5.0);
        registry.insert(2, 20, 1.0);

        let engine = SimilarityEngine::new(&registry);
        assert_eq!(engine.find_most_similar(1).unwrap().id(), 2);
        assert_eq!(engine.find_most_similar(2).unwrap().id(), 1);
    }

    #[test]
    fn test_no_overlap_loses_to_any_overlap() {
        let mut registry = UserRegistry::new();
        registry.insert(1, 10, 5.0);
        registry.insert(2, 99, 5.0);
        registry.insert(3, 10, 1.0);

        let engine = SimilarityEngine::new(&registry);
        assert_eq!(engine.find_most_similar(1).unwrap().id(), 3);
    }

    #[test]
    fn test_ties_go_to_lowest_user_id() {
        let mut registry = UserRegistry::new();
        registry.insert(5, 10, 4.0);
        registry.insert(9, 10, 4.0);
        registry.insert(7, 10, 4.0);
        registry.insert(1, 10, 4.0);

        let engine = SimilarityEngine::new(&registry);
        assert_eq!(engine.find_most_similar(5).unwrap().id(), 1);
        assert_eq!(engine.find_most_similar(1).unwrap().id(), 5);
    }

    #[test]
    fn test_single_user_has_no_similar_user() {
        let mut registry = UserRegistry::new();
        registry.insert(1, 10, 5.0);

        let engine = SimilarityEngine::new(&registry);
        assert_eq!(
            engine.find_most_similar(1).unwrap_err(),
            SimilarityError::NoSimilarUser { id: 1 }
        );
    }

    #[test]
    fn test_unknown_target() {
        let registry = create_test_registry();
        let engine = SimilarityEngine::new(&registry);

        assert_eq!(
            engine.find_most_similar(42).unwrap_err(),
            SimilarityError::UserNotFound { id: 42 }
        );
    }

    #[test]
    fn test_rank_similar() {
        let registry = create_test_registry();
        let engine = SimilarityEngine::new(&registry);

        let ranked = engine.rank_similar(1, 5).unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].user_id, 2);
        assert_eq!(ranked[0].score, Some(1.0));
        assert_eq!(ranked[0].co_rated, 1);
        assert_eq!(ranked[1].user_id, 3);
        assert_eq!(ranked[1].score, Some(0.2));

        assert_eq!(engine.rank_similar(1, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_cosine_cannot_separate_single_shared_movie() {
        let registry = create_test_registry();
        let engine = SimilarityEngine::new(&registry).with_metric(Cosine);

        // Both B and C score 1.0 on movie 10 alone; B wins the tie by id
        assert_eq!(engine.metric_name(), "Cosine");
        assert_eq!(engine.find_most_similar(1).unwrap().id(), 2);
    }
}
