//! Plain-text views of the menu and host state.

use std::fmt::Write;

use megamenu_core::state::AppState;
use megamenu_core::MenuItem;

/// One line per item, children indented under their parent.
pub fn render_tree(items: &[MenuItem]) -> String {
    let mut out = String::new();
    write_level(&mut out, items, 0);
    if out.is_empty() {
        out.push_str("(empty menu)\n");
    }
    out
}

fn write_level(out: &mut String, items: &[MenuItem], depth: usize) {
    for item in items {
        let _ = write!(out, "{}- {} [{}]", "  ".repeat(depth), item.label, item.id);
        if let Some(url) = &item.url {
            let _ = write!(out, " -> {}", url);
        }
        if item.open_in_teams {
            out.push_str(" (in host)");
        }
        out.push('\n');
        write_level(out, item.child_items(), depth + 1);
    }
}

pub fn render_context(state: &AppState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "theme: {}", state.theme.current);
    let _ = writeln!(out, "host theme: {}", state.theme.is_host_theme);
    match &state.user.current_user {
        Some(user) => {
            let _ = writeln!(out, "user: {} ({})", user.display_name, user.id);
            if let Some(email) = &user.email {
                let _ = writeln!(out, "email: {}", email);
            }
        }
        None => out.push_str("user: none\n"),
    }
    let _ = writeln!(out, "initialized: {}", state.user.is_initialized);
    out
}
