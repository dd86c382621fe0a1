use crate::domain::AuthorId;
use crate::ports::author_existence::{AuthorExistence as AuthorExistenceTrait, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// Mock implementation of AuthorExistence
///
/// Supports stateful testing by storing author IDs.
/// Counts how many times the probe was consulted.
pub struct AuthorExistence {
    existing_authors: Mutex<HashSet<AuthorId>>,
    calls: AtomicUsize,
}

impl AuthorExistence {
    pub fn new() -> Self {
        Self {
            existing_authors: Mutex::new(HashSet::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Register an author for testing purposes
    pub fn add_author(&self, author_id: AuthorId) {
        self.existing_authors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(author_id);
    }

    /// Number of `exists` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for AuthorExistence {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorExistenceTrait for AuthorExistence {
    /// Check if author exists in the registered authors
    async fn exists(&self, author_id: AuthorId) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .existing_authors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&author_id))
    }
}
