//! Taskbar projection over the window registry and the pointer intents it routes back.

use crate::model::{DesktopState, WindowId};

/// One running-window button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub title: String,
    pub icon_id: String,
    pub is_active: bool,
    pub minimized: bool,
}

impl TaskbarEntry {
    /// Tooltip describing what a primary click will do.
    pub fn hint(&self) -> String {
        if self.minimized {
            format!("Restore {}", self.title)
        } else if self.is_active {
            format!("Minimize {}", self.title)
        } else {
            format!("Focus {}", self.title)
        }
    }
}

/// Pointer gestures a taskbar button forwards to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarIntent {
    /// Single click: launch-or-toggle through the router.
    Primary,
    /// Double click: minimize.
    DoubleClick,
    /// Close affordance.
    Close,
}

/// Open windows in insertion order, independent of stacking.
pub fn taskbar_entries(state: &DesktopState) -> Vec<TaskbarEntry> {
    state
        .open_windows()
        .map(|window| TaskbarEntry {
            id: window.id.clone(),
            title: window.title.clone(),
            icon_id: window.icon_id.clone(),
            is_active: state.is_active(&window.id),
            minimized: window.minimized,
        })
        .collect()
}
