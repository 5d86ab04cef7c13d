// ============================================================================
// Mega Menu Core - Validation
// File: crates/megamenu-core/src/validation/mod.rs
// Description: Structural checks for untrusted menu data
// ============================================================================
//! Anything that did not come out of this crate (storage, imports) is a
//! `serde_json::Value` until it passes `validate`. Only structure is checked
//! here: URL shape and depth are business rules handled elsewhere.

mod sanitize;

pub use sanitize::{sanitize, sanitize_tree};

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::{MenuItem, MenuTree};

/// Menu item field named in a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    Label,
    Url,
    Icon,
    OpenInTeams,
    Children,
}

impl Field {
    pub fn key(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Label => "label",
            Field::Url => "url",
            Field::Icon => "icon",
            Field::OpenInTeams => "openInTeams",
            Field::Children => "children",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{path}: expected a menu item object")]
    NotAnObject { path: String },

    #[error("{path}: expected an array of menu items")]
    NotAnArray { path: String },

    #[error("{path}.{field}: required field is missing")]
    Missing { path: String, field: Field },

    #[error("{path}.{field}: expected {expected}")]
    WrongType {
        path: String,
        field: Field,
        expected: &'static str,
    },

    #[error("malformed menu data: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Field that failed, when the failure is about a single field.
    pub fn field(&self) -> Option<Field> {
        match self {
            ValidationError::Missing { field, .. } | ValidationError::WrongType { field, .. } => {
                Some(*field)
            }
            _ => None,
        }
    }
}

/// Structural check of a single node. Children must be an array but are not
/// themselves inspected; use `validate_tree` or `parse_item` for that.
pub fn validate(candidate: &Value) -> Result<(), ValidationError> {
    check_node(candidate, "$").map(|_| ())
}

/// Boolean form of `validate`.
pub fn is_valid(candidate: &Value) -> bool {
    validate(candidate).is_ok()
}

/// Validates an array of nodes and every descendant.
pub fn validate_tree(candidate: &Value) -> Result<(), ValidationError> {
    let items = candidate.as_array().ok_or_else(|| ValidationError::NotAnArray {
        path: "$".to_string(),
    })?;
    for (index, item) in items.iter().enumerate() {
        check_recursive(item, &format!("$[{}]", index))?;
    }
    Ok(())
}

/// Validates one node with all descendants, then deserializes and sanitizes it.
pub fn parse_item(candidate: &Value) -> Result<MenuItem, ValidationError> {
    check_recursive(candidate, "$")?;
    let item: MenuItem = serde_json::from_value(candidate.clone())
        .map_err(|e| ValidationError::Malformed(e.to_string()))?;
    Ok(sanitize(item))
}

/// Validates a whole tree, then deserializes and sanitizes it.
pub fn parse_tree(candidate: &Value) -> Result<MenuTree, ValidationError> {
    validate_tree(candidate)?;
    let tree: MenuTree = serde_json::from_value(candidate.clone())
        .map_err(|e| ValidationError::Malformed(e.to_string()))?;
    Ok(sanitize_tree(tree))
}

/// `parse_tree` over serialized JSON text.
pub fn parse_tree_str(raw: &str) -> Result<MenuTree, ValidationError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ValidationError::Malformed(e.to_string()))?;
    parse_tree(&value)
}

fn check_recursive(candidate: &Value, path: &str) -> Result<(), ValidationError> {
    let object = check_node(candidate, path)?;
    if let Some(Value::Array(children)) = object.get(Field::Children.key()) {
        for (index, child) in children.iter().enumerate() {
            check_recursive(child, &format!("{}.children[{}]", path, index))?;
        }
    }
    Ok(())
}

fn check_node<'a>(candidate: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    let object = candidate.as_object().ok_or_else(|| ValidationError::NotAnObject {
        path: path.to_string(),
    })?;

    require_string(object, Field::Id, path)?;
    require_string(object, Field::Label, path)?;
    optional(object, Field::Url, path, "a string", Value::is_string)?;
    optional(object, Field::Icon, path, "a string", Value::is_string)?;
    optional(object, Field::OpenInTeams, path, "a boolean", Value::is_boolean)?;
    optional(object, Field::Children, path, "an array", Value::is_array)?;

    Ok(object)
}

fn require_string(object: &Map<String, Value>, field: Field, path: &str) -> Result<(), ValidationError> {
    match object.get(field.key()) {
        None => Err(ValidationError::Missing {
            path: path.to_string(),
            field,
        }),
        Some(value) if value.is_string() => Ok(()),
        Some(_) => Err(ValidationError::WrongType {
            path: path.to_string(),
            field,
            expected: "a string",
        }),
    }
}

// A present `null` is a type mismatch; only absence counts as "not set".
fn optional(
    object: &Map<String, Value>,
    field: Field,
    path: &str,
    expected: &'static str,
    accepts: fn(&Value) -> bool,
) -> Result<(), ValidationError> {
    match object.get(field.key()) {
        Some(value) if !accepts(value) => Err(ValidationError::WrongType {
            path: path.to_string(),
            field,
            expected,
        }),
        _ => Ok(()),
    }
}
