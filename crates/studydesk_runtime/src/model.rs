use lesson_contract::{LessonContent, LessonTier};
use serde::{Deserialize, Serialize};

use crate::window_manager::ZOrderAllocator;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(pub String);

impl WindowId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl std::fmt::Display for WindowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl WindowRect {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    pub fn right(self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: i32,
    pub height: i32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowRecord {
    pub id: WindowId,
    pub title: String,
    pub icon_id: String,
    pub is_open: bool,
    pub minimized: bool,
    pub maximized: bool,
    pub z_index: u64,
    pub rect: WindowRect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LessonStep {
    #[default]
    Lesson,
    Loading,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentSource {
    Remote,
    LocalArchive,
}

/// Lesson sub-state reset by the launch router on every fresh open of a lesson module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonSession {
    pub module_id: Option<WindowId>,
    pub step: LessonStep,
    pub quiz_index: usize,
    pub score: u32,
    /// Complexity band of the lesson being loaded or shown.
    pub tier: Option<LessonTier>,
    pub content: Option<LessonContent>,
    pub source: Option<ContentSource>,
    pub error: Option<String>,
    pub remote_enabled: bool,
    pub pending_ticket: Option<u64>,
    pub next_ticket: u64,
}

impl Default for LessonSession {
    fn default() -> Self {
        Self {
            module_id: None,
            step: LessonStep::default(),
            quiz_index: 0,
            score: 0,
            tier: None,
            content: None,
            source: None,
            error: None,
            remote_enabled: true,
            pending_ticket: None,
            next_ticket: 1,
        }
    }
}

/// Authoritative window registry plus the shell scalars derived from it.
///
/// `windows` keeps insertion order; stacking is carried by `z_index`, never by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopState {
    pub windows: Vec<WindowRecord>,
    pub active_window: Option<WindowId>,
    pub z_order: ZOrderAllocator,
    pub start_menu_open: bool,
    pub sidebar_hidden: bool,
    pub viewport: ViewportSize,
    pub lesson: LessonSession,
}

impl DesktopState {
    pub fn new(z_floor: u64) -> Self {
        Self {
            windows: Vec::new(),
            active_window: None,
            z_order: ZOrderAllocator::new(z_floor),
            start_menu_open: false,
            sidebar_hidden: false,
            viewport: ViewportSize::default(),
            lesson: LessonSession::default(),
        }
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| &w.id == window_id)
    }

    pub fn open_windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter().filter(|w| w.is_open)
    }

    pub fn is_active(&self, window_id: &WindowId) -> bool {
        self.active_window.as_ref() == Some(window_id)
    }
}

impl Default for DesktopState {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_Z_FLOOR)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [ResizeEdge; 8] = [
        ResizeEdge::North,
        ResizeEdge::South,
        ResizeEdge::East,
        ResizeEdge::West,
        ResizeEdge::NorthEast,
        ResizeEdge::NorthWest,
        ResizeEdge::SouthEast,
        ResizeEdge::SouthWest,
    ];

    pub fn pulls_north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn pulls_south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub fn pulls_east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn pulls_west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Drag,
    Resize(ResizeEdge),
}

/// Pointer-down to pointer-up capture of the window being manipulated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureSession {
    pub window_id: WindowId,
    pub kind: GestureKind,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub gesture: Option<GestureSession>,
}

impl InteractionState {
    pub fn is_dragging(&self) -> bool {
        matches!(
            self.gesture,
            Some(GestureSession {
                kind: GestureKind::Drag,
                ..
            })
        )
    }

    pub fn is_resizing(&self) -> bool {
        matches!(
            self.gesture,
            Some(GestureSession {
                kind: GestureKind::Resize(_),
                ..
            })
        )
    }
}
