//! A single user's ratings, kept sorted from most to least liked.

use crate::types::{is_valid_rating, MovieId, RatingRecord, UserId, RATING_UNSEEN};
use std::collections::HashMap;
use tracing::warn;

/// One user's identifier plus every rating they made.
///
/// `ratings` is always sorted by value, highest first. Equal values keep the
/// order in which they were inserted, so top/bottom queries follow the source
/// file for ties. A side map gives O(1) lookups by movie id.
#[derive(Debug, Clone)]
pub struct UserProfile {
    id: UserId,
    ratings: Vec<RatingRecord>,
    by_movie: HashMap<MovieId, f32>,
}

impl UserProfile {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            ratings: Vec::new(),
            by_movie: HashMap::new(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    /// Insert or replace the rating for `movie_id`.
    ///
    /// Values outside (0, 5] are dropped. Re-inserting the value a movie
    /// already has leaves the ordering untouched; a changed value moves the
    /// record behind every existing record with the same value.
    pub fn insert(&mut self, movie_id: MovieId, value: f32) {
        if !is_valid_rating(value) {
            warn!(user_id = self.id, movie_id, value, "Ignoring out-of-range rating");
            return;
        }

        if let Some(&old) = self.by_movie.get(&movie_id) {
            if old == value {
                return;
            }
            if let Some(pos) = self.ratings.iter().position(|r| r.movie_id == movie_id) {
                self.ratings.remove(pos);
            }
        }

        // First slot whose value is strictly lower keeps the sort stable
        let at = self.ratings.partition_point(|r| r.value >= value);
        self.ratings.insert(at, RatingRecord::new(movie_id, value));
        self.by_movie.insert(movie_id, value);
    }

    /// The user's rating for a movie, or `RATING_UNSEEN` (0.0) if they never rated it
    pub fn get_rating(&self, movie_id: MovieId) -> f32 {
        self.by_movie.get(&movie_id).copied().unwrap_or(RATING_UNSEEN)
    }

    pub fn has_rated(&self, movie_id: MovieId) -> bool {
        self.by_movie.contains_key(&movie_id)
    }

    /// Up to `n` movie ids, highest rated first
    pub fn top_favorites(&self, n: usize) -> Vec<MovieId> {
        self.ratings.iter().take(n).map(|r| r.movie_id).collect()
    }

    /// Up to `n` movie ids, lowest rated first
    pub fn bottom_favorites(&self, n: usize) -> Vec<MovieId> {
        self.ratings.iter().rev().take(n).map(|r| r.movie_id).collect()
    }

    /// All ratings in descending order
    pub fn ratings(&self) -> &[RatingRecord] {
        &self.ratings
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Mean of all ratings, 0.0 for a user with none
    pub fn average_rating(&self) -> f32 {
        if self.ratings.is_empty() {
            return 0.0;
        }
        let total: f32 = self.ratings.iter().map(|r| r.value).sum();
        total / self.ratings.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(profile: &UserProfile) -> Vec<f32> {
        profile.ratings().iter().map(|r| r.value).collect()
    }

    fn assert_sorted(profile: &UserProfile) {
        assert!(
            profile.ratings().windows(2).all(|w| w[0].value >= w[1].value),
            "ratings must be non-increasing: {:?}",
            values(profile)
        );
    }

    #[test]
    fn test_insert_keeps_descending_order() {
        let mut profile = UserProfile::new(1);
        for (movie_id, value) in [(1, 3.0), (2, 5.0), (3, 1.0), (4, 4.5), (5, 2.0), (6, 5.0)] {
            profile.insert(movie_id, value);
            assert_sorted(&profile);
        }

        assert_eq!(values(&profile), vec![5.0, 5.0, 4.5, 3.0, 2.0, 1.0]);
        // Movie 2 was inserted before movie 6
        assert_eq!(profile.top_favorites(2), vec![2, 6]);
    }

    #[test]
    fn test_get_rating_returns_sentinel_for_unseen() {
        let mut profile = UserProfile::new(1);
        profile.insert(10, 4.0);

        assert_eq!(profile.get_rating(10), 4.0);
        assert_eq!(profile.get_rating(11), 0.0);
        assert!(profile.has_rated(10));
        assert!(!profile.has_rated(11));
    }

    #[test]
    fn test_reinsert_replaces_value() {
        let mut profile = UserProfile::new(1);
        profile.insert(1, 5.0);
        profile.insert(2, 3.0);
        profile.insert(1, 2.0);

        assert_eq!(profile.len(), 2);
        assert_eq!(profile.get_rating(1), 2.0);
        assert_eq!(profile.top_favorites(2), vec![2, 1]);
        assert_sorted(&profile);
    }

    #[test]
    fn test_reinsert_same_value_keeps_position() {
        let mut profile = UserProfile::new(1);
        profile.insert(1, 4.0);
        profile.insert(2, 4.0);
        profile.insert(3, 4.0);
        profile.insert(1, 4.0);

        assert_eq!(profile.top_favorites(3), vec![1, 2, 3]);
    }

    #[test]
    fn test_changed_value_goes_behind_equal_values() {
        let mut profile = UserProfile::new(1);
        profile.insert(1, 4.0);
        profile.insert(2, 3.0);
        profile.insert(2, 4.0);

        assert_eq!(profile.top_favorites(2), vec![1, 2]);
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let mut profile = UserProfile::new(1);
        profile.insert(1, 0.0);
        profile.insert(2, 7.0);
        profile.insert(3, f32::NAN);

        assert!(profile.is_empty());
        assert_eq!(profile.get_rating(1), 0.0);
    }

    #[test]
    fn test_top_and_bottom_favorites() {
        let mut profile = UserProfile::new(1);
        profile.insert(1, 3.0);
        profile.insert(2, 5.0);
        profile.insert(3, 1.0);

        assert_eq!(profile.top_favorites(2), vec![2, 1]);
        assert_eq!(profile.bottom_favorites(2), vec![3, 1]);

        // Short results when asking for more than exists
        assert_eq!(profile.top_favorites(10).len(), 3);
        assert_eq!(profile.bottom_favorites(10).len(), 3);
        assert!(profile.top_favorites(0).is_empty());

        let mut bottom = profile.bottom_favorites(3);
        bottom.reverse();
        assert_eq!(bottom, profile.top_favorites(3));
    }

    #[test]
    fn test_average_rating() {
        let mut profile = UserProfile::new(1);
        assert_eq!(profile.average_rating(), 0.0);

        profile.insert(1, 4.0);
        profile.insert(2, 2.0);
        assert_eq!(profile.average_rating(), 3.0);
    }
}
