//! Host context handed over by the embedding application.
//!
//! The core only cares about the shape: a theme name and an optional user.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use megamenu_shared::constants::UNKNOWN_USER_DISPLAY_NAME;

/// Theme variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Contrast,
}

impl Theme {
    /// Maps a host theme name. Anything unrecognized, `"default"` included,
    /// falls back to `Light`.
    pub fn from_host(name: &str) -> Self {
        match name {
            "dark" => Theme::Dark,
            "contrast" => Theme::Contrast,
            _ => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Contrast => "contrast",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Theme::from_host(s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: String,
    pub email: Option<String>,
}

/// User record as the host SDK reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostUserPayload {
    pub id: String,
    pub display_name: Option<String>,
    pub user_principal_name: Option<String>,
}

/// Raw context record as the host SDK reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostContextPayload {
    pub theme: Option<String>,
    pub user: Option<HostUserPayload>,
}

/// Context after mapping into application terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostContext {
    pub theme: Theme,
    pub user: Option<User>,
}

impl From<HostUserPayload> for User {
    fn from(payload: HostUserPayload) -> Self {
        User {
            id: payload.id,
            display_name: payload
                .display_name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_USER_DISPLAY_NAME.to_string()),
            email: payload.user_principal_name,
        }
    }
}

impl From<HostContextPayload> for HostContext {
    fn from(payload: HostContextPayload) -> Self {
        HostContext {
            theme: Theme::from_host(payload.theme.as_deref().unwrap_or("default")),
            user: payload.user.map(User::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mapping() {
        let cases = [
            ("light", Theme::Light),
            ("dark", Theme::Dark),
            ("contrast", Theme::Contrast),
            ("default", Theme::Light),
            ("unknown", Theme::Light),
        ];
        for (name, expected) in cases {
            assert_eq!(Theme::from_host(name), expected, "theme {name}");
        }
    }

    #[test]
    fn test_context_without_user() {
        let ctx = HostContext::from(HostContextPayload {
            theme: Some("dark".to_string()),
            user: None,
        });
        assert_eq!(ctx.theme, Theme::Dark);
        assert!(ctx.user.is_none());
    }

    #[test]
    fn test_missing_display_name_uses_placeholder() {
        let ctx = HostContext::from(HostContextPayload {
            theme: None,
            user: Some(HostUserPayload {
                id: "user-1".to_string(),
                display_name: None,
                user_principal_name: Some("user@example.com".to_string()),
            }),
        });
        assert_eq!(ctx.theme, Theme::Light);
        let user = ctx.user.unwrap();
        assert_eq!(user.display_name, "Unknown User");
        assert_eq!(user.email.as_deref(), Some("user@example.com"));
    }
}
