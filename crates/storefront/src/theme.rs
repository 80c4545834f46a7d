//! Light/dark theme flag, held in the session.
//!
//! The theme is a plain boolean toggle: it does not affect any cart or
//! catalog behavior, it only travels back to the client so views can style
//! themselves.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::AppError;

/// Session key for the theme flag.
pub const THEME_KEY: &str = "theme";

/// Storefront color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The opposite theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Whether dark mode is active.
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Read the session's theme, defaulting to light.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn current(session: &Session) -> Result<Theme, AppError> {
    let theme = session
        .get::<Theme>(THEME_KEY)
        .await
        .map_err(|e| AppError::Internal(format!("session read failed: {e}")))?
        .unwrap_or_default();
    Ok(theme)
}

/// Flip the session's theme and return the new value.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn toggle(session: &Session) -> Result<Theme, AppError> {
    let next = current(session).await?.toggled();
    session
        .insert(THEME_KEY, next)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled_flips_both_ways() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert!(!Theme::Light.is_dark());
        assert!(Theme::Dark.is_dark());
    }

    #[test]
    fn test_theme_serializes_lowercase() {
        #[allow(clippy::unwrap_used)]
        let json = serde_json::to_string(&Theme::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
    }
}
