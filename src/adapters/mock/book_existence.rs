use crate::domain::AuthorId;
use crate::ports::book_existence::{BookExistenceForAuthor as BookExistenceTrait, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Mock implementation of BookExistenceForAuthor
///
/// Authors registered with `add_reference` are reported as referenced by a book.
pub struct BookExistenceForAuthor {
    referenced_authors: Mutex<HashSet<AuthorId>>,
}

impl BookExistenceForAuthor {
    pub fn new() -> Self {
        Self {
            referenced_authors: Mutex::new(HashSet::new()),
        }
    }

    /// Mark an author as referenced by at least one book
    pub fn add_reference(&self, author_id: AuthorId) {
        self.referenced_authors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(author_id);
    }

    /// Drop all references to an author
    pub fn clear_references(&self, author_id: AuthorId) {
        self.referenced_authors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&author_id);
    }
}

impl Default for BookExistenceForAuthor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookExistenceTrait for BookExistenceForAuthor {
    async fn exists_for_author(&self, author_id: AuthorId) -> Result<bool> {
        Ok(self
            .referenced_authors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&author_id))
    }
}
