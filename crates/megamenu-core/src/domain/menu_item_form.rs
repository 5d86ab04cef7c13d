// ============================================================================
// Mega Menu Core - Menu Item Form
// File: crates/megamenu-core/src/domain/menu_item_form.rs
// Description: Editor input with field-level validation
// ============================================================================

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::menu_item::{MenuItem, MenuItemPatch};
use crate::validation::sanitize;

/// Field-level problem reported back to the settings editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

pub(crate) const LABEL_REQUIRED: &str = "Label is required";
pub(crate) const INVALID_URL: &str = "Please enter a valid URL";

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// What the settings editor submits when adding or editing an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenuItemForm {
    #[validate(custom(function = "validate_label"))]
    pub label: String,

    #[validate(url(message = "Please enter a valid URL"))]
    pub url: Option<String>,

    pub icon: Option<String>,

    #[serde(default)]
    pub open_in_teams: bool,
}

fn validate_label(label: &str) -> Result<(), ValidationError> {
    if label.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(LABEL_REQUIRED)));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl MenuItemForm {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn open_in_teams(mut self, open_in_teams: bool) -> Self {
        self.open_in_teams = open_in_teams;
        self
    }

    /// Prefills the editor from an existing item.
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            label: item.label.clone(),
            url: item.url.clone(),
            icon: item.icon.clone(),
            open_in_teams: item.open_in_teams,
        }
    }

    /// Trims every field; blank url/icon become absent.
    pub fn normalized(self) -> Self {
        Self {
            label: self.label.trim().to_string(),
            url: non_blank(self.url),
            icon: non_blank(self.icon),
            open_in_teams: self.open_in_teams,
        }
    }

    /// Validates the normalized form, returning errors sorted by field name.
    pub fn check(&self) -> Result<(), Vec<FieldError>> {
        let normalized = self.clone().normalized();
        match normalized.validate() {
            Ok(()) => Ok(()),
            Err(errors) => {
                let mut fields: Vec<FieldError> = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| FieldError {
                            field: field.to_string(),
                            message: e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string()),
                        })
                    })
                    .collect();
                fields.sort_by(|a, b| a.field.cmp(&b.field));
                Err(fields)
            }
        }
    }

    /// Builds a sanitized item under the given id.
    pub fn into_item(self, id: impl Into<String>) -> Result<MenuItem, Vec<FieldError>> {
        self.check()?;
        let form = self.normalized();
        Ok(sanitize(MenuItem {
            id: id.into(),
            label: form.label,
            url: form.url,
            icon: form.icon,
            open_in_teams: form.open_in_teams,
            children: None,
        }))
    }

    /// Builds a patch that rewrites every editable field of an existing item.
    pub fn into_patch(self) -> Result<MenuItemPatch, Vec<FieldError>> {
        self.check()?;
        let form = self.normalized();
        Ok(MenuItemPatch::new()
            .label(form.label)
            .url(form.url)
            .icon(form.icon)
            .open_in_teams(form.open_in_teams))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_label_is_required() {
        let form = MenuItemForm::new("   ");
        let errors = form.check().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError {
                field: "label".to_string(),
                message: "Label is required".to_string(),
            }]
        );
    }

    #[test]
    fn test_invalid_url_is_reported() {
        let form = MenuItemForm {
            label: "Docs".to_string(),
            url: Some("not a url".to_string()),
            ..MenuItemForm::default()
        };
        let errors = form.check().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "url");
        assert_eq!(errors[0].message, "Please enter a valid URL");
    }

    #[test]
    fn test_both_fields_reported_in_field_order() {
        let form = MenuItemForm {
            label: String::new(),
            url: Some("nope".to_string()),
            ..MenuItemForm::default()
        };
        let fields: Vec<String> = form.check().unwrap_err().into_iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["label".to_string(), "url".to_string()]);
    }

    #[test]
    fn test_blank_url_is_allowed_and_dropped() {
        let form = MenuItemForm {
            label: "  Docs ".to_string(),
            url: Some("   ".to_string()),
            icon: Some(" Book ".to_string()),
            open_in_teams: true,
        };
        let item = form.into_item("42").unwrap();
        assert_eq!(item.id, "42");
        assert_eq!(item.label, "Docs");
        assert!(item.url.is_none());
        assert_eq!(item.icon.as_deref(), Some("Book"));
        assert!(item.open_in_teams);
        assert!(item.children.is_none());
    }

    #[test]
    fn test_into_patch_sets_editable_fields() {
        let form = MenuItemForm {
            label: "Updated".to_string(),
            url: Some(" https://example.com/updated ".to_string()),
            ..MenuItemForm::default()
        };
        let patch = form.into_patch().unwrap();
        assert_eq!(patch.label.as_deref(), Some("Updated"));
        assert_eq!(patch.url, Some(Some("https://example.com/updated".to_string())));
        assert_eq!(patch.icon, Some(None));
        assert!(patch.id.is_none());
        assert!(patch.children.is_none());
    }
}
