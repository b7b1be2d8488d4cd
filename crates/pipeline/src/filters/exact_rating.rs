//! Filter to keep only unambiguous opinions.
//!
//! A similar user's favourite movie is only worth recommending if they gave
//! it the top mark, not merely a high mark relative to their other ratings.
//! The same holds in reverse for anti-recommendations and the bottom mark.

use crate::traits::{Candidate, Filter, FilterContext};
use anyhow::Result;

/// Keeps candidates the similar user rated at exactly `value`.
///
/// ## Algorithm
/// Compares each candidate's `similar_rating` for equality. No rounding:
/// a 4.5 never counts as a 5.
pub struct ExactRatingFilter {
    value: f32,
}

impl ExactRatingFilter {
    /// Create a new ExactRatingFilter.
    ///
    /// # Arguments
    /// * `value` - The rating a candidate must have (5.0 to recommend, 1.0 to warn)
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Filter for ExactRatingFilter {
    fn name(&self) -> &str {
        "ExactRatingFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &FilterContext<'_>,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| candidate.similar_rating == self.value)
            .collect();

        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::UserProfile;

    fn create_candidates() -> Vec<Candidate> {
        vec![
            Candidate::new(1, 5.0),
            Candidate::new(3, 5.0),
            Candidate::new(2, 4.5),
            Candidate::new(5, 1.5),
            Candidate::new(4, 1.0),
        ]
    }

    #[test]
    fn test_keeps_only_top_mark() {
        let target = UserProfile::new(1);
        let context = FilterContext { target: &target };

        let filter = ExactRatingFilter::new(5.0);
        let filtered = filter.apply(create_candidates(), &context).unwrap();

        let ids: Vec<u32> = filtered.iter().map(|c| c.movie_id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_keeps_only_bottom_mark() {
        let target = UserProfile::new(1);
        let context = FilterContext { target: &target };

        let filter = ExactRatingFilter::new(1.0);
        let filtered = filter.apply(create_candidates(), &context).unwrap();

        assert_eq!(filtered, vec![Candidate::new(4, 1.0)]);
    }

    #[test]
    fn test_reads_rating_carried_by_candidate() {
        // The target's own ratings play no part in this filter
        let mut target = UserProfile::new(1);
        target.insert(7, 5.0);
        let context = FilterContext { target: &target };

        let filtered = ExactRatingFilter::new(5.0)
            .apply(vec![Candidate::new(7, 3.0), Candidate::new(8, 5.0)], &context)
            .unwrap();

        assert_eq!(filtered, vec![Candidate::new(8, 5.0)]);
    }
}
