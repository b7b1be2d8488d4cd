//! Recommendation pipeline: turn a neighbour's ratings into movie ids.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Recommender, the recommend / anti-recommend entry points
//!
//! ## Architecture
//! A request is processed in stages:
//! 1. SimilarityEngine picks the most similar user
//! 2. That user's top (or bottom) N movies become candidates
//! 3. Filters remove movies the target has seen and non-extreme ratings
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::Recommender;
//!
//! let recommender = Recommender::new(&dataset.registry);
//! let to_watch = recommender.recommend(user_id, 10)?;
//! let to_avoid = recommender.anti_recommend(user_id, 10)?;
//! ```

pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod recommender;
pub mod traits;

// Re-export main types
pub use error::RecommendError;
pub use filter_pipeline::FilterPipeline;
pub use recommender::{Polarity, Recommendation, Recommender};
pub use traits::{Candidate, Filter, FilterContext};
