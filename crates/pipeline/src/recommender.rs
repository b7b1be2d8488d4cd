//! # Recommendation Engine
//!
//! Coordinates a recommendation request:
//! 1. Find the most similar user (SimilarityEngine)
//! 2. Take that user's top (or bottom) N movies as candidates
//! 3. Filter: target hasn't rated it, and the neighbour gave it exactly 5 (or 1)
//! 4. Return the surviving movie ids in the neighbour's ranking order
//!
//! The result holds between 0 and N ids. Zero is a valid answer; failure to
//! find the target or any neighbour is an error instead.

use crate::error::{RecommendError, Result};
use crate::filter_pipeline::FilterPipeline;
use crate::filters::{ExactRatingFilter, UnseenFilter};
use crate::traits::{Candidate, FilterContext};
use data_loader::{MovieId, UserId, UserRegistry, RATING_MAX, RATING_MIN};
use similarity::SimilarityEngine;
use tracing::{info, instrument};

/// Which end of the neighbour's ratings to draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Movies to watch: the neighbour's 5-star favourites
    Recommend,
    /// Movies to avoid: the neighbour's 1-star least favourites
    Avoid,
}

/// Movie ids plus the neighbour they came from
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub polarity: Polarity,
    pub target_user: UserId,
    pub similar_user: UserId,
    pub movie_ids: Vec<MovieId>,
}

/// Produces recommendations and anti-recommendations for users in a registry
pub struct Recommender<'a> {
    engine: SimilarityEngine<'a>,
    recommend_filters: FilterPipeline,
    avoid_filters: FilterPipeline,
}

impl<'a> Recommender<'a> {
    /// Create a recommender over `registry` with the default similarity metric
    pub fn new(registry: &'a UserRegistry) -> Self {
        Self::with_engine(SimilarityEngine::new(registry))
    }

    /// Create a recommender around a preconfigured engine
    pub fn with_engine(engine: SimilarityEngine<'a>) -> Self {
        Self {
            engine,
            recommend_filters: FilterPipeline::new()
                .add_filter(UnseenFilter)
                .add_filter(ExactRatingFilter::new(RATING_MAX)),
            avoid_filters: FilterPipeline::new()
                .add_filter(UnseenFilter)
                .add_filter(ExactRatingFilter::new(RATING_MIN)),
        }
    }

    pub fn engine(&self) -> &SimilarityEngine<'a> {
        &self.engine
    }

    /// Up to `n` unseen movies the most similar user rated 5
    pub fn recommend(&self, target_id: UserId, n: usize) -> Result<Vec<MovieId>> {
        Ok(self.recommend_explained(target_id, n)?.movie_ids)
    }

    /// Up to `n` unseen movies the most similar user rated 1
    pub fn anti_recommend(&self, target_id: UserId, n: usize) -> Result<Vec<MovieId>> {
        Ok(self.anti_recommend_explained(target_id, n)?.movie_ids)
    }

    pub fn recommend_explained(&self, target_id: UserId, n: usize) -> Result<Recommendation> {
        self.compute(target_id, n, Polarity::Recommend)
    }

    pub fn anti_recommend_explained(&self, target_id: UserId, n: usize) -> Result<Recommendation> {
        self.compute(target_id, n, Polarity::Avoid)
    }

    #[instrument(skip(self))]
    pub fn compute(
        &self,
        target_id: UserId,
        n: usize,
        polarity: Polarity,
    ) -> Result<Recommendation> {
        let similar = self.engine.find_most_similar(target_id)?;
        let target = self
            .engine
            .registry()
            .find(target_id)
            .ok_or(RecommendError::UserNotFound { id: target_id })?;

        let (movie_ids, pipeline) = match polarity {
            Polarity::Recommend => (similar.top_favorites(n), &self.recommend_filters),
            Polarity::Avoid => (similar.bottom_favorites(n), &self.avoid_filters),
        };

        let candidates: Vec<Candidate> = movie_ids
            .into_iter()
            .map(|movie_id| Candidate::new(movie_id, similar.get_rating(movie_id)))
            .collect();

        let context = FilterContext { target };
        let kept = pipeline.apply(candidates, &context)?;

        info!(
            similar_user = similar.id(),
            "Kept {} of at most {} candidates",
            kept.len(),
            n
        );

        Ok(Recommendation {
            polarity,
            target_user: target_id,
            similar_user: similar.id(),
            movie_ids: kept.into_iter().map(|c| c.movie_id).collect(),
        })
    }
}
