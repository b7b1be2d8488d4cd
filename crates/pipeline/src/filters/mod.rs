//! Filter implementations for the recommendation pipeline.
//!
//! Each filter removes candidates based on a single criterion:
//! - `UnseenFilter`: drop movies the target user already rated
//! - `ExactRatingFilter`: keep only movies the similar user rated at one exact value

pub mod exact_rating;
pub mod unseen;

pub use exact_rating::ExactRatingFilter;
pub use unseen::UnseenFilter;
