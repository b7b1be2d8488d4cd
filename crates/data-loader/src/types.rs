//! Core domain types for the ratings dataset.
//!
//! This module defines the small value types shared by every crate:
//! - Type aliases for domain clarity (UserId, MovieId)
//! - Rating records and the raw (user, movie, rating) triples the loader produces
//! - Movie metadata and the title index owned by the application

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user IDs with movie IDs

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Rating values
// =============================================================================

/// Returned by rating lookups for a movie the user never rated.
///
/// Never stored as an explicit record.
pub const RATING_UNSEEN: f32 = 0.0;

/// The strongest positive opinion a user can express.
pub const RATING_MAX: f32 = 5.0;

/// The strongest negative opinion a user can express.
pub const RATING_MIN: f32 = 1.0;

/// True if `value` can be stored as an explicit rating.
pub fn is_valid_rating(value: f32) -> bool {
    value.is_finite() && value > RATING_UNSEEN && value <= RATING_MAX
}

// =============================================================================
// Rating Types
// =============================================================================

/// One rating held inside a user's profile
///
/// Rust concepts:
/// - Small, copyable struct (all fields are Copy)
/// - Immutable once created: profiles replace records instead of mutating them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub movie_id: MovieId,
    /// Rating value in (0.0, 5.0]
    pub value: f32,
}

impl RatingRecord {
    pub fn new(movie_id: MovieId, value: f32) -> Self {
        Self { movie_id, value }
    }
}

/// A normalized row from the ratings file, as handed from the loader to the registry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingTriple {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub value: f32,
}

// =============================================================================
// Movie-related Types
// =============================================================================

/// Represents a movie in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Year extracted from title (e.g., "Toy Story (1995)")
    ///
    /// Rust concept: `Option<T>` represents a value that may or may not exist
    pub year: Option<u16>,
    /// Genre labels as they appear in the file ("Adventure", "Sci-Fi", ...)
    pub genres: Vec<String>,
}

/// Maps movie ids to their metadata.
///
/// The recommendation core never sees this: it only deals in `MovieId`s.
/// The application passes it explicitly to whatever turns ids into text.
#[derive(Debug, Default, Clone)]
pub struct MovieTitles {
    movies: HashMap<MovieId, Movie>,
}

impl MovieTitles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a movie, replacing any previous entry with the same id
    pub fn insert(&mut self, movie: Movie) {
        self.movies.insert(movie.id, movie);
    }

    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// Title for a movie, if it is known
    pub fn title(&self, id: MovieId) -> Option<&str> {
        self.movies.get(&id).map(|m| m.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Case-insensitive substring search over titles.
    ///
    /// Exact matches come first, then substring matches; ties are ordered by id
    /// so the output is stable across runs.
    pub fn search(&self, query: &str) -> Vec<&Movie> {
        let needle = query.to_lowercase();
        let mut matches: Vec<(u8, &Movie)> = self
            .movies
            .values()
            .filter_map(|movie| {
                let title = movie.title.to_lowercase();
                if title == needle {
                    Some((0, movie))
                } else if title.contains(&needle) {
                    Some((1, movie))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id.cmp(&b.1.id)));
        matches.into_iter().map(|(_, movie)| movie).collect()
    }
}

impl FromIterator<Movie> for MovieTitles {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        let mut titles = MovieTitles::new();
        for movie in iter {
            titles.insert(movie);
        }
        titles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            year: None,
            genres: vec![],
        }
    }

    #[test]
    fn test_valid_ratings() {
        assert!(is_valid_rating(0.5));
        assert!(is_valid_rating(5.0));
        assert!(!is_valid_rating(0.0));
        assert!(!is_valid_rating(5.5));
        assert!(!is_valid_rating(-1.0));
        assert!(!is_valid_rating(f32::NAN));
    }

    #[test]
    fn test_title_lookup() {
        let titles: MovieTitles = vec![movie(1, "Heat (1995)")].into_iter().collect();

        assert_eq!(titles.title(1), Some("Heat (1995)"));
        assert_eq!(titles.title(2), None);
        assert_eq!(titles.len(), 1);
    }

    #[test]
    fn test_search_orders_exact_matches_first() {
        let titles: MovieTitles = vec![
            movie(3, "Alien"),
            movie(1, "Aliens"),
            movie(2, "Alien Nation"),
            movie(4, "Heat"),
        ]
        .into_iter()
        .collect();

        let ids: Vec<MovieId> = titles.search("ALIEN").iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
