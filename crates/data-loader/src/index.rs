//! Dataset loading.
//!
//! Parses both input files and builds:
//! - the `UserRegistry` consumed by the similarity and recommendation crates
//! - the `MovieTitles` index the application uses to print results
//!
//! Rust concepts you'll learn:
//! - Using Rayon to run independent work in parallel
//! - Iterator adaptors (`collect` into custom collections)
//! - Keeping ownership simple: the Dataset owns everything it loaded

use crate::error::Result;
use crate::parser;
use crate::registry::UserRegistry;
use crate::types::MovieTitles;
use std::path::Path;
use tracing::info;

/// Everything one run needs: ratings grouped by user, plus movie titles
#[derive(Debug, Default)]
pub struct Dataset {
    pub registry: UserRegistry,
    pub titles: MovieTitles,
}

impl Dataset {
    /// Load the movies and ratings files
    ///
    /// Steps:
    /// 1. Parse both files (in parallel, they are independent)
    /// 2. Build the title index
    /// 3. Insert every rating into the registry in file row order
    pub fn load_from_files(movies_path: &Path, ratings_path: &Path) -> Result<Self> {
        info!(
            movies = %movies_path.display(),
            ratings = %ratings_path.display(),
            "Loading dataset"
        );

        // Rayon's `join` runs two closures in parallel
        let (movies, ratings) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_ratings(ratings_path),
        );

        // The ? operator works because both return Result<Vec<T>>
        let movies = movies?;
        let ratings = ratings?;

        info!("Parsed {} movies, {} ratings", movies.len(), ratings.len());

        let titles: MovieTitles = movies.into_iter().collect();
        let registry: UserRegistry = ratings.into_iter().collect();

        let (users, stored) = registry.counts();
        info!("Registry built: {} users, {} ratings", users, stored);

        Ok(Self { registry, titles })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_dataset() {
        // This test requires the MovieLens "latest-small" files
        // Place them in ../../data/
        let movies = Path::new("../../data/movies.csv");
        let ratings = Path::new("../../data/ratings.csv");

        if movies.exists() && ratings.exists() {
            let dataset = Dataset::load_from_files(movies, ratings).unwrap();
            assert!(!dataset.registry.is_empty());
            assert!(!dataset.titles.is_empty());
        }
    }
}
