//! DOM focus helpers for shell menus.

use wasm_bindgen::JsCast;

fn html_element_by_id(id: &str) -> Option<web_sys::HtmlElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into::<web_sys::HtmlElement>()
        .ok()
}

/// Focuses an element by id and reports whether one was found.
pub(super) fn focus_element_by_id(id: &str) -> bool {
    let Some(element) = html_element_by_id(id) else {
        return false;
    };
    let _ = element.focus();
    true
}

/// Moves focus among `[role="menuitem"]` children of `menu_id` for arrow/Home/End keys.
///
/// Returns whether the key was handled; handled keys have their default prevented.
pub(super) fn handle_menu_keydown(ev: &web_sys::KeyboardEvent, menu_id: &str) -> bool {
    let key = ev.key();
    if !matches!(key.as_str(), "ArrowDown" | "ArrowUp" | "Home" | "End") {
        return false;
    }
    let Some(menu) = html_element_by_id(menu_id) else {
        return false;
    };
    let Ok(nodes) = menu.query_selector_all(r#"[role="menuitem"]"#) else {
        return false;
    };
    let items: Vec<web_sys::HtmlElement> = (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .collect();
    if items.is_empty() {
        return false;
    }

    let focused_id = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.active_element())
        .map(|element| element.id())
        .unwrap_or_default();
    let current = items
        .iter()
        .position(|item| !focused_id.is_empty() && item.id() == focused_id);
    let last = items.len() - 1;
    let next = match (key.as_str(), current) {
        ("Home", _) | ("ArrowDown", None) => 0,
        ("End", _) | ("ArrowUp", None) | (_, None) => last,
        ("ArrowDown", Some(index)) => (index + 1) % items.len(),
        (_, Some(index)) => index.checked_sub(1).unwrap_or(last),
    };

    let _ = items[next].focus();
    ev.prevent_default();
    ev.stop_propagation();
    true
}
