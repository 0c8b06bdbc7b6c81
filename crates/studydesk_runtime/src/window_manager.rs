//! Shared window-manager helpers used by the desktop reducer: stacking, gesture geometry, and
//! the per-window frame handed to the renderer.

use serde::{Deserialize, Serialize};

use crate::{
    config::ShellConfig,
    model::{GestureKind, ResizeEdge, ViewportSize, WindowId, WindowRecord, WindowRect},
};

/// Minimum allowed managed window width.
pub const MIN_WINDOW_WIDTH: i32 = 320;
/// Minimum allowed managed window height.
pub const MIN_WINDOW_HEIGHT: i32 = 200;

/// Monotonic source of stacking values. Never reuses or compacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZOrderAllocator {
    last_issued: u64,
}

impl ZOrderAllocator {
    pub fn new(floor: u64) -> Self {
        Self { last_issued: floor }
    }

    /// Returns a value strictly greater than every value returned before.
    pub fn next(&mut self) -> u64 {
        self.last_issued += 1;
        self.last_issued
    }

    pub fn current(&self) -> u64 {
        self.last_issued
    }
}

/// Stacking value the renderer should use; the active window is lifted by a fixed offset.
pub fn effective_z_index(window: &WindowRecord, active: Option<&WindowId>, offset: u64) -> u64 {
    if active == Some(&window.id) {
        window.z_index + offset
    } else {
        window.z_index
    }
}

/// Initial rect for a window created with stacking value `z_index`.
///
/// Positions cascade by `z_index % cascade_slots` so consecutive windows do not overlap exactly.
pub fn cascade_rect(z_index: u64, config: &ShellConfig) -> WindowRect {
    let slot = (z_index % config.cascade_slots.max(1)) as i32;
    WindowRect {
        x: config.cascade_origin_x + slot * config.cascade_step_px,
        y: config.cascade_origin_y + slot * config.cascade_step_px,
        w: config.default_window_width,
        h: config.default_window_height,
    }
    .clamped_min(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)
}

/// Moves the window by the cumulative pointer delta; size is untouched.
pub fn drag_rect(start: WindowRect, dx: i32, dy: i32) -> WindowRect {
    start.offset(dx, dy)
}

/// Applies resize deltas for a given edge/corner drag.
///
/// Far edges (east/south) grow or shrink the size and clamp at the minimum. Near edges
/// (west/north) keep the opposite edge pinned: the delta is capped so the size never drops below
/// the minimum, and the position follows by the same capped amount.
pub fn resize_rect(start: WindowRect, edge: ResizeEdge, dx: i32, dy: i32) -> WindowRect {
    let mut rect = start;

    if edge.pulls_east() {
        rect.w = (start.w + dx).max(MIN_WINDOW_WIDTH);
    }
    if edge.pulls_south() {
        rect.h = (start.h + dy).max(MIN_WINDOW_HEIGHT);
    }
    if edge.pulls_west() {
        let delta = dx.min(start.w - MIN_WINDOW_WIDTH);
        rect.w = start.w - delta;
        rect.x = start.x + delta;
    }
    if edge.pulls_north() {
        let delta = dy.min(start.h - MIN_WINDOW_HEIGHT);
        rect.h = start.h - delta;
        rect.y = start.y + delta;
    }

    rect
}

/// Dispatches to [`drag_rect`] or [`resize_rect`] for an armed gesture.
pub fn gesture_rect(kind: GestureKind, start: WindowRect, dx: i32, dy: i32) -> WindowRect {
    match kind {
        GestureKind::Drag => drag_rect(start, dx, dy),
        GestureKind::Resize(edge) => resize_rect(start, edge, dx, dy),
    }
}

/// Whether drag/resize handles may be attached to `window`.
pub fn gestures_enabled(window: &WindowRecord, narrow_layout: bool) -> bool {
    window.is_open && !window.maximized && !narrow_layout
}

/// Render contract for one open window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowFrame {
    pub rect: WindowRect,
    pub z_index: u64,
    pub is_active: bool,
    pub minimized: bool,
    pub maximized: bool,
    pub handles_enabled: bool,
    pub subtitle: &'static str,
}

/// Computes where and how the host should draw `window`.
///
/// Maximized windows and every window in the narrow layout fill the viewport above the taskbar;
/// their stored rect is left untouched so it comes back on restore.
pub fn window_frame(
    window: &WindowRecord,
    active: Option<&WindowId>,
    viewport: ViewportSize,
    config: &ShellConfig,
) -> WindowFrame {
    let narrow = config.is_narrow(viewport.width);
    let fills_viewport = window.maximized || narrow;
    let rect = if fills_viewport {
        WindowRect {
            x: 0,
            y: 0,
            w: viewport.width,
            h: (viewport.height - config.taskbar_height_px).max(0),
        }
    } else {
        window.rect
    };
    let subtitle = if narrow {
        "Mobile Interface"
    } else if window.maximized {
        "Primary Node"
    } else {
        "Sub-Node"
    };

    WindowFrame {
        rect,
        z_index: effective_z_index(window, active, config.active_z_offset),
        is_active: active == Some(&window.id),
        minimized: window.minimized,
        maximized: window.maximized,
        handles_enabled: gestures_enabled(window, narrow),
        subtitle,
    }
}
