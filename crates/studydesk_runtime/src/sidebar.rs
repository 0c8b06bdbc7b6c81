//! Navigation-rail visibility policy.
//!
//! The rail hides when a window claims the screen and reappears only once the desktop is clear.
//! Between those two conditions it keeps its previous value.

use crate::model::{DesktopState, WindowId, WindowRecord};

/// Window fields the policy reads; geometry and stacking are excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityProjection {
    windows: Vec<(WindowId, bool, bool, bool)>,
    active: Option<WindowId>,
}

impl VisibilityProjection {
    pub fn of(state: &DesktopState) -> Self {
        Self {
            windows: state
                .windows
                .iter()
                .map(|w| (w.id.clone(), w.is_open, w.minimized, w.maximized))
                .collect(),
            active: state.active_window.clone(),
        }
    }
}

/// Computes the next hidden flag from the registry and the previous value.
///
/// Hide when any open window is maximized, or when some window other than `exempt` is active
/// while at least one window is open. Show when nothing is open or every open window is
/// minimized. Otherwise the previous value stands.
pub fn next_sidebar_hidden(
    windows: &[WindowRecord],
    active: Option<&WindowId>,
    previously_hidden: bool,
    exempt: &str,
) -> bool {
    let open: Vec<&WindowRecord> = windows.iter().filter(|w| w.is_open).collect();

    let any_maximized = open.iter().any(|w| w.maximized);
    let focused_non_exempt = active.is_some_and(|id| id.as_str() != exempt) && !open.is_empty();
    let should_hide = any_maximized || focused_non_exempt;
    let desktop_clear = open.is_empty() || open.iter().all(|w| w.minimized);

    if should_hide && !previously_hidden {
        true
    } else if desktop_clear && previously_hidden {
        false
    } else {
        previously_hidden
    }
}
