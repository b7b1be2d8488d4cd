//! # Data Loader Crate
//!
//! This crate loads a MovieLens-style ratings dataset and holds it in memory.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (ids, RatingRecord, Movie, MovieTitles)
//! - **profile**: UserProfile, one user's ratings sorted best first
//! - **registry**: UserRegistry, every profile keyed by user id
//! - **parser**: Parse the CSV files into Rust structs
//! - **index**: Build a Dataset from the two files
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_files(
//!     Path::new("data/movies.csv"),
//!     Path::new("data/ratings.csv"),
//! )?;
//!
//! let user = dataset.registry.get(1)?;
//! println!("User {} rated {} movies", user.id(), user.len());
//! println!("Favourite: {:?}", user.top_favorites(1));
//! ```

// Public modules
pub mod error;
pub mod index;
pub mod parser;
pub mod profile;
pub mod registry;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use index::Dataset;
pub use profile::UserProfile;
pub use registry::UserRegistry;
pub use types::{
    // Type aliases
    MovieId,
    UserId,
    // Core types
    Movie,
    MovieTitles,
    RatingRecord,
    RatingTriple,
    // Rating constants
    RATING_MAX,
    RATING_MIN,
    RATING_UNSEEN,
};
