//! The in-memory registry of every user profile.

use crate::error::{DataLoadError, Result};
use crate::profile::UserProfile;
use crate::types::{MovieId, RatingTriple, UserId};
use std::collections::BTreeMap;

/// All user profiles, keyed by user id.
///
/// Backed by a `BTreeMap` so iteration is always in ascending user id. The
/// similarity scan relies on that order to break ties deterministically.
///
/// Built once while loading; the query phase only borrows it.
#[derive(Debug, Default, Clone)]
pub struct UserRegistry {
    users: BTreeMap<UserId, UserProfile>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a rating, creating the user's profile on first sight
    pub fn insert(&mut self, user_id: UserId, movie_id: MovieId, value: f32) {
        self.users
            .entry(user_id)
            .or_insert_with(|| UserProfile::new(user_id))
            .insert(movie_id, value);
    }

    pub fn insert_triple(&mut self, triple: RatingTriple) {
        self.insert(triple.user_id, triple.movie_id, triple.value);
    }

    /// Look up a profile, failing with `UserNotFound` if the id is unknown
    pub fn get(&self, user_id: UserId) -> Result<&UserProfile> {
        self.users
            .get(&user_id)
            .ok_or(DataLoadError::UserNotFound { id: user_id })
    }

    pub fn find(&self, user_id: UserId) -> Option<&UserProfile> {
        self.users.get(&user_id)
    }

    /// Every profile, ascending by user id
    pub fn all_users(&self) -> impl Iterator<Item = &UserProfile> {
        self.users.values()
    }

    pub fn user_ids(&self) -> Vec<UserId> {
        self.users.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// (users, ratings) for logging
    pub fn counts(&self) -> (usize, usize) {
        let ratings = self.users.values().map(UserProfile::len).sum();
        (self.users.len(), ratings)
    }
}

impl Extend<RatingTriple> for UserRegistry {
    fn extend<I: IntoIterator<Item = RatingTriple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert_triple(triple);
        }
    }
}

impl FromIterator<RatingTriple> for UserRegistry {
    fn from_iter<I: IntoIterator<Item = RatingTriple>>(iter: I) -> Self {
        let mut registry = UserRegistry::new();
        registry.extend(iter);
        registry
    }
}
