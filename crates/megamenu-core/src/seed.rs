//! Built-in menu used until the user saves their own.

use crate::domain::{MenuItem, MenuTree};

pub fn default_menu() -> MenuTree {
    vec![
        MenuItem::new("1", "Get Menu Item 1")
            .with_url("https://example.com/item1")
            .with_icon("Home")
            .with_children(vec![
                MenuItem::new("1-1", "My Career and Benefits")
                    .with_url("https://example.com/career")
                    .with_icon("User")
                    .with_children(vec![
                        MenuItem::new("1-1-1", "Career Development")
                            .with_url("https://example.com/career-dev")
                            .with_icon("Education"),
                        MenuItem::new("1-1-2", "Benefits Overview")
                            .with_url("https://example.com/benefits")
                            .with_icon("Heart"),
                    ]),
                MenuItem::new("1-2", "Travel and Expense")
                    .with_url("https://example.com/travel")
                    .with_icon("Airplane")
                    .with_children(vec![
                        MenuItem::new("1-2-1", "Book Travel")
                            .with_url("https://example.com/book-travel")
                            .with_icon("Airplane"),
                        MenuItem::new("1-2-2", "Submit Expense")
                            .with_url("https://example.com/expense")
                            .with_icon("Money"),
                    ]),
            ]),
        MenuItem::new("2", "Get Menu Item 2")
            .with_url("https://example.com/item2")
            .with_icon("Settings")
            .with_children(vec![
                MenuItem::new("2-1", "IT Services")
                    .with_url("https://example.com/it-services")
                    .with_icon("Laptop"),
                MenuItem::new("2-2", "HR Services")
                    .with_url("https://example.com/hr-services")
                    .with_icon("People"),
            ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MAX_DEPTH;
    use crate::tree;

    #[test]
    fn test_seed_respects_invariants() {
        let menu = default_menu();
        assert!(tree::duplicate_ids(&menu).is_empty());
        assert!(tree::max_depth(&menu).unwrap() <= MAX_DEPTH);
        assert_eq!(tree::count(&menu), 10);
    }
}
