//! Category route handlers.

use axum::{Json, extract::State};
use serde::Serialize;

use stech_core::{Category, PLACEHOLDER_IMAGE};

use crate::state::AppState;

/// Category display data.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: String,
    pub nome: String,
    pub foto: String,
}

impl From<Category> for CategoryView {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.into_inner(),
            nome: category.name.unwrap_or_default(),
            foto: category.photo.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        }
    }
}

/// List all categories.
///
/// A catalog failure is logged and surfaced as an empty list; it is not
/// retried.
pub async fn index(State(state): State<AppState>) -> Json<Vec<CategoryView>> {
    let categories = match state.catalog().get_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::warn!("Failed to fetch categories: {e}");
            Vec::new()
        }
    };

    Json(categories.into_iter().map(CategoryView::from).collect())
}
