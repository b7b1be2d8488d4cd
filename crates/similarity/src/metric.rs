//! Similarity metrics between two users' ratings.
//!
//! Every metric only looks at the co-rated set: movies both users rated.
//! Users with nothing in common get `None`, which `Option`'s ordering places
//! below every real score.

use data_loader::UserProfile;

/// Scores how alike two users' tastes are; higher means more similar.
///
/// `Send + Sync` so a metric can be shared by the parallel scoring pass.
pub trait SimilarityMetric: Send + Sync {
    /// Returns the name of this metric (for logging/debugging)
    fn name(&self) -> &str;

    /// Score `candidate` against `target`, or `None` if they share no movies
    fn score(&self, target: &UserProfile, candidate: &UserProfile) -> Option<f64>;
}

/// (target rating, candidate rating) for every movie both users rated.
///
/// Walks the shorter of the two profiles and probes the other.
pub fn co_rated_pairs(target: &UserProfile, candidate: &UserProfile) -> Vec<(f64, f64)> {
    if target.len() <= candidate.len() {
        target
            .ratings()
            .iter()
            .filter(|r| candidate.has_rated(r.movie_id))
            .map(|r| (r.value as f64, candidate.get_rating(r.movie_id) as f64))
            .collect()
    } else {
        candidate
            .ratings()
            .iter()
            .filter(|r| target.has_rated(r.movie_id))
            .map(|r| (target.get_rating(r.movie_id) as f64, r.value as f64))
            .collect()
    }
}

/// Inverted mean absolute difference: `1 / (1 + mean |t - c|)`.
///
/// Scores fall in (0, 1]. Identical ratings on every shared movie give 1.0;
/// each extra point of average disagreement pushes the score towards 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct MeanAbsoluteDifference;

impl SimilarityMetric for MeanAbsoluteDifference {
    fn name(&self) -> &str {
        "MeanAbsoluteDifference"
    }

    fn score(&self, target: &UserProfile, candidate: &UserProfile) -> Option<f64> {
        let pairs = co_rated_pairs(target, candidate);
        if pairs.is_empty() {
            return None;
        }

        let total: f64 = pairs.iter().map(|(t, c)| (t - c).abs()).sum();
        let mean = total / pairs.len() as f64;
        Some(1.0 / (1.0 + mean))
    }
}

/// Cosine of the angle between the two co-rated rating vectors.
///
/// Ratings are always positive, so scores fall in (0, 1]. Note that a single
/// shared movie always scores 1.0 whatever the two ratings are.
#[derive(Debug, Default, Clone, Copy)]
pub struct Cosine;

impl SimilarityMetric for Cosine {
    fn name(&self) -> &str {
        "Cosine"
    }

    fn score(&self, target: &UserProfile, candidate: &UserProfile) -> Option<f64> {
        let pairs = co_rated_pairs(target, candidate);
        if pairs.is_empty() {
            return None;
        }

        let (dot, norm_t, norm_c) = pairs.iter().fold((0.0, 0.0, 0.0), |(dot, nt, nc), (t, c)| {
            (dot + t * c, nt + t * t, nc + c * c)
        });

        let denominator = norm_t.sqrt() * norm_c.sqrt();
        if denominator == 0.0 {
            return None;
        }
        Some(dot / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: u32, ratings: &[(u32, f32)]) -> UserProfile {
        let mut profile = UserProfile::new(id);
        for &(movie_id, value) in ratings {
            profile.insert(movie_id, value);
        }
        profile
    }

    #[test]
    fn test_co_rated_pairs_keep_target_first() {
        let target = profile(1, &[(1, 5.0), (2, 3.0), (3, 1.0)]);
        let candidate = profile(2, &[(2, 4.0)]);

        assert_eq!(co_rated_pairs(&target, &candidate), vec![(3.0, 4.0)]);
        assert_eq!(co_rated_pairs(&candidate, &target), vec![(4.0, 3.0)]);
    }

    #[test]
    fn test_mean_absolute_difference() {
        let target = profile(1, &[(10, 5.0), (11, 3.0)]);
        let close = profile(2, &[(10, 5.0), (11, 3.0), (12, 1.0)]);
        let far = profile(3, &[(10, 1.0), (11, 5.0)]);
        let stranger = profile(4, &[(99, 5.0)]);

        let metric = MeanAbsoluteDifference;
        assert_eq!(metric.score(&target, &close), Some(1.0));
        // mean |diff| = (4 + 2) / 2 = 3
        assert_eq!(metric.score(&target, &far), Some(0.25));
        assert_eq!(metric.score(&target, &stranger), None);
    }

    #[test]
    fn test_cosine() {
        let target = profile(1, &[(1, 3.0), (2, 4.0)]);
        let same_direction = profile(2, &[(1, 1.5), (2, 2.0)]);
        let other = profile(3, &[(1, 4.0), (2, 3.0)]);

        let metric = Cosine;
        let same = metric.score(&target, &same_direction).unwrap();
        assert!((same - 1.0).abs() < 1e-9);

        // (12 + 12) / (5 * 5)
        let score = metric.score(&target, &other).unwrap();
        assert!((score - 0.96).abs() < 1e-9);

        assert_eq!(metric.score(&target, &profile(4, &[])), None);
    }

    #[test]
    fn test_no_overlap_ranks_below_any_score() {
        assert!(None < Some(0.0_f64));
    }
}
