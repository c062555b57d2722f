//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::db::books::BookRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::Book;
use crate::state::AppState;

/// Query parameters for error/success display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub books: Vec<Book>,
    pub users_name: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Display the catalog.
///
/// # Errors
///
/// Returns `AppError::Database` if the catalog cannot be loaded.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let books = BookRepository::new(state.pool()).list_all().await?;

    if books.is_empty() {
        tracing::warn!("no books available in the catalog");
    }

    Ok(IndexTemplate {
        books,
        users_name: customer.display_name,
        error: query.error,
        success: query.success,
    })
}
