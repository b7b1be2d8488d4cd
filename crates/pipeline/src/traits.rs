//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate movies.

use anyhow::Result;
use data_loader::{MovieId, UserProfile};

/// A movie taken from the similar user's favourite (or least favourite) list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub movie_id: MovieId,
    /// The similar user's rating for this movie
    pub similar_rating: f32,
}

impl Candidate {
    pub fn new(movie_id: MovieId, similar_rating: f32) -> Self {
        Self {
            movie_id,
            similar_rating,
        }
    }
}

/// What filters know about the request besides the candidates themselves
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    /// The user receiving recommendations
    pub target: &'a UserProfile,
}

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Filters take ownership of the Vec<Candidate> and return a filtered Vec
/// - Filters must keep the relative order of the candidates they keep
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `context` - The target user's profile
    ///
    /// # Returns
    /// * `Ok(Vec<Candidate>)` - The filtered candidates
    /// * `Err` - If filtering fails
    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &FilterContext<'_>,
    ) -> Result<Vec<Candidate>>;
}
