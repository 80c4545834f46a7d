//! Theme route handlers.

use axum::Json;
use serde::Serialize;
use tower_sessions::Session;

use crate::error::Result;
use crate::theme::Theme;

/// Theme display data.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeView {
    pub tema: Theme,
    pub modo_escuro: bool,
}

impl From<Theme> for ThemeView {
    fn from(theme: Theme) -> Self {
        Self {
            tema: theme,
            modo_escuro: theme.is_dark(),
        }
    }
}

/// Current theme for this session.
pub async fn show(session: Session) -> Result<Json<ThemeView>> {
    let theme = crate::theme::current(&session).await?;
    Ok(Json(ThemeView::from(theme)))
}

/// Flip the session's theme.
pub async fn toggle(session: Session) -> Result<Json<ThemeView>> {
    let theme = crate::theme::toggle(&session).await?;
    Ok(Json(ThemeView::from(theme)))
}
