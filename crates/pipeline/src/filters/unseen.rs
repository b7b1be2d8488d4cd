//! Filter to remove movies the target user has already rated.
//!
//! There is no point in recommending (or warning against) a movie the user
//! has already formed an opinion on.

use crate::traits::{Candidate, Filter, FilterContext};
use anyhow::Result;
use data_loader::RATING_UNSEEN;

/// Keeps candidates whose rating by the target user is the unseen sentinel (0).
pub struct UnseenFilter;

impl Filter for UnseenFilter {
    fn name(&self) -> &str {
        "UnseenFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        context: &FilterContext<'_>,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| context.target.get_rating(candidate.movie_id) == RATING_UNSEEN)
            .collect();
        Ok(filtered)
    }
}
