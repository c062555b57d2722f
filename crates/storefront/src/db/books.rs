//! Book repository for catalog reads.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::Book;

/// Repository for book catalog database operations.
///
/// Writes to `books` happen only inside the order transaction
/// (see `services::orders`); this repository is read-only.
pub struct BookRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> BookRepository<'a> {
    /// Create a new book repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every book in the catalog, ordered by title.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Book>, RepositoryError> {
        let books = sqlx::query_as::<_, Book>(
            r"
            SELECT book_id AS id, title, author, genre, price, stock_quantity, description
            FROM books
            ORDER BY title
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(books)
    }

}
