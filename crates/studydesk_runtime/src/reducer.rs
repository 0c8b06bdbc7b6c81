//! Reducer actions, side-effect intents, and transition logic for the window registry.

use thiserror::Error;

use crate::{
    config::ShellConfig,
    lesson::{self, LessonLaunch, LessonLoadRequest, LessonOutcome},
    model::{
        DesktopState, GestureKind, GestureSession, InteractionState, PointerPosition, ResizeEdge,
        ViewportSize, WindowId, WindowRecord,
    },
    window_manager::{cascade_rect, gesture_rect, gestures_enabled},
};

/// Fully resolved launch: the router has already picked title/icon and lesson details.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRequest {
    pub window_id: WindowId,
    pub title: String,
    pub icon_id: String,
    /// Taskbar launches minimize the window instead when it is already active and visible.
    pub from_taskbar: bool,
    pub lesson: Option<LessonLaunch>,
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_desktop`] to mutate [`DesktopState`].
pub enum DesktopAction {
    /// Create, reopen, restore, or (from the taskbar) minimize a window.
    Launch(LaunchRequest),
    /// Close a window. Unknown or already-closed ids are a no-op.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Raise, unminimize, and activate a window.
    FocusWindow {
        /// Window to focus.
        window_id: WindowId,
    },
    /// Minimize a window, leaving the active id untouched.
    MinimizeWindow {
        /// Window to minimize.
        window_id: WindowId,
    },
    /// Flip the maximized flag.
    ToggleMaximize {
        /// Window to maximize or restore.
        window_id: WindowId,
    },
    /// Toggle the start menu open/closed.
    ToggleStartMenu,
    /// Close the start menu if open.
    CloseStartMenu,
    /// Record the current viewport size; narrow viewports lock gestures.
    SetViewport {
        /// New viewport size.
        viewport: ViewportSize,
    },
    /// Focus a window and arm a drag from its title bar.
    BeginMove {
        /// Window being dragged.
        window_id: WindowId,
        /// Pointer position at drag start.
        pointer: PointerPosition,
    },
    /// Focus a window and arm a resize from one of its handles.
    BeginResize {
        /// Window being resized.
        window_id: WindowId,
        /// Edge or corner being dragged.
        edge: ResizeEdge,
        /// Pointer position at resize start.
        pointer: PointerPosition,
    },
    /// Apply the current pointer position to the armed gesture.
    UpdateGesture {
        /// Current pointer position.
        pointer: PointerPosition,
    },
    /// Disarm the current gesture.
    EndGesture,
    /// Allow or forbid remote lesson generation.
    SetRemoteContent {
        /// Whether the generator may be called.
        enabled: bool,
    },
    /// Deliver the result of a lesson load started by [`RuntimeEffect::LoadLessonContent`].
    LessonContentResolved {
        /// Ticket from the originating request.
        ticket: u64,
        /// Loaded content or the reason none is available.
        outcome: LessonOutcome,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_desktop`] and the store for the host to execute.
pub enum RuntimeEffect {
    /// Move input focus into the newly activated window.
    FocusWindowInput(WindowId),
    /// Start an asynchronous lesson content load.
    LoadLessonContent(LessonLoadRequest),
    /// The sidebar policy flipped visibility.
    SidebarVisibilityChanged {
        /// Whether the navigation rail is now hidden.
        hidden: bool,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors. The store logs and drops them; the state is left untouched.
pub enum ReducerError {
    /// The target window id has no registry entry.
    #[error("window not found: {0}")]
    WindowNotFound(WindowId),
    /// The target window exists but is closed.
    #[error("window is closed: {0}")]
    WindowClosed(WindowId),
    /// A lesson result arrived for a load that is no longer pending.
    #[error("stale lesson result for ticket {ticket}")]
    StaleLessonResult {
        /// Ticket carried by the discarded result.
        ticket: u64,
    },
}

/// Applies a [`DesktopAction`] to the registry and collects resulting side effects.
///
/// # Errors
///
/// Returns [`ReducerError`] when an action targets a missing or closed window, or delivers a
/// stale lesson result. Errors are raised before any mutation of `state`.
pub fn reduce_desktop(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    config: &ShellConfig,
    action: DesktopAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        DesktopAction::Launch(req) => launch_window(state, config, req, &mut effects),
        DesktopAction::CloseWindow { window_id } => {
            if let Some(window) = state.windows.iter_mut().find(|w| w.id == window_id) {
                window.is_open = false;
            }
            if state.is_active(&window_id) {
                state.active_window = None;
            }
            if state.lesson.module_id.as_ref() == Some(&window_id) {
                state.lesson.pending_ticket = None;
            }
            end_gesture_for(interaction, &window_id);
        }
        DesktopAction::FocusWindow { window_id } => {
            focus_window_internal(state, &window_id)?;
            effects.push(RuntimeEffect::FocusWindowInput(window_id));
        }
        DesktopAction::MinimizeWindow { window_id } => {
            find_open_window_mut(state, &window_id)?.minimized = true;
            end_gesture_for(interaction, &window_id);
        }
        DesktopAction::ToggleMaximize { window_id } => {
            let window = find_open_window_mut(state, &window_id)?;
            window.maximized = !window.maximized;
            end_gesture_for(interaction, &window_id);
        }
        DesktopAction::ToggleStartMenu => {
            state.start_menu_open = !state.start_menu_open;
        }
        DesktopAction::CloseStartMenu => {
            state.start_menu_open = false;
        }
        DesktopAction::SetViewport { viewport } => {
            state.viewport = viewport;
            if config.is_narrow(viewport.width) {
                interaction.gesture = None;
            }
        }
        DesktopAction::BeginMove { window_id, pointer } => {
            begin_gesture(state, interaction, config, window_id, GestureKind::Drag, pointer)?;
        }
        DesktopAction::BeginResize {
            window_id,
            edge,
            pointer,
        } => {
            begin_gesture(
                state,
                interaction,
                config,
                window_id,
                GestureKind::Resize(edge),
                pointer,
            )?;
        }
        DesktopAction::UpdateGesture { pointer } => {
            let Some(session) = interaction.gesture.clone() else {
                return Ok(effects);
            };
            let narrow = config.is_narrow(state.viewport.width);
            let Some(window) = state.windows.iter_mut().find(|w| w.id == session.window_id)
            else {
                interaction.gesture = None;
                return Ok(effects);
            };
            if !window.is_open {
                interaction.gesture = None;
            } else if gestures_enabled(window, narrow) && !window.minimized {
                let dx = pointer.x - session.pointer_start.x;
                let dy = pointer.y - session.pointer_start.y;
                window.rect = gesture_rect(session.kind, session.rect_start, dx, dy);
            }
        }
        DesktopAction::EndGesture => {
            interaction.gesture = None;
        }
        DesktopAction::SetRemoteContent { enabled } => {
            state.lesson.remote_enabled = enabled;
        }
        DesktopAction::LessonContentResolved { ticket, outcome } => {
            let module_open = state
                .lesson
                .module_id
                .as_ref()
                .and_then(|id| state.window(id))
                .is_some_and(|w| w.is_open);
            if state.lesson.pending_ticket != Some(ticket) || !module_open {
                return Err(ReducerError::StaleLessonResult { ticket });
            }
            lesson::apply_outcome(&mut state.lesson, outcome);
        }
    }

    Ok(effects)
}

fn launch_window(
    state: &mut DesktopState,
    config: &ShellConfig,
    req: LaunchRequest,
    effects: &mut Vec<RuntimeEffect>,
) {
    let existing = state.windows.iter().position(|w| w.id == req.window_id);

    if req.from_taskbar && state.is_active(&req.window_id) {
        if let Some(window) = existing.and_then(|index| state.windows.get_mut(index)) {
            if window.is_open && !window.minimized {
                window.minimized = true;
                state.active_window = None;
                return;
            }
        }
    }

    let z_index = state.z_order.next();
    let fresh_open = match existing.and_then(|index| state.windows.get_mut(index)) {
        Some(window) if window.is_open => {
            window.minimized = false;
            window.z_index = z_index;
            false
        }
        Some(window) => {
            window.is_open = true;
            window.minimized = false;
            window.maximized = false;
            window.z_index = z_index;
            window.title = req.title;
            window.icon_id = req.icon_id;
            true
        }
        None => {
            state.windows.push(WindowRecord {
                id: req.window_id.clone(),
                title: req.title,
                icon_id: req.icon_id,
                is_open: true,
                minimized: false,
                maximized: false,
                z_index,
                rect: cascade_rect(z_index, config),
            });
            true
        }
    };

    state.active_window = Some(req.window_id.clone());
    state.start_menu_open = false;
    effects.push(RuntimeEffect::FocusWindowInput(req.window_id.clone()));

    if fresh_open {
        if let Some(launch) = req.lesson {
            let request = lesson::begin_session(&mut state.lesson, req.window_id, launch);
            effects.push(RuntimeEffect::LoadLessonContent(request));
        }
    }
}

fn begin_gesture(
    state: &mut DesktopState,
    interaction: &mut InteractionState,
    config: &ShellConfig,
    window_id: WindowId,
    kind: GestureKind,
    pointer: PointerPosition,
) -> Result<(), ReducerError> {
    focus_window_internal(state, &window_id)?;
    let narrow = config.is_narrow(state.viewport.width);
    let window = find_open_window_mut(state, &window_id)?;
    if !gestures_enabled(window, narrow) {
        return Ok(());
    }
    interaction.gesture = Some(GestureSession {
        window_id,
        kind,
        pointer_start: pointer,
        rect_start: window.rect,
    });
    Ok(())
}

fn end_gesture_for(interaction: &mut InteractionState, window_id: &WindowId) {
    if interaction
        .gesture
        .as_ref()
        .is_some_and(|session| &session.window_id == window_id)
    {
        interaction.gesture = None;
    }
}

fn find_open_window_mut<'a>(
    state: &'a mut DesktopState,
    window_id: &WindowId,
) -> Result<&'a mut WindowRecord, ReducerError> {
    let window = state
        .windows
        .iter_mut()
        .find(|w| &w.id == window_id)
        .ok_or_else(|| ReducerError::WindowNotFound(window_id.clone()))?;
    if !window.is_open {
        return Err(ReducerError::WindowClosed(window_id.clone()));
    }
    Ok(window)
}

fn focus_window_internal(
    state: &mut DesktopState,
    window_id: &WindowId,
) -> Result<(), ReducerError> {
    find_open_window_mut(state, window_id)?;
    let z_index = state.z_order.next();
    let window = find_open_window_mut(state, window_id)?;
    window.z_index = z_index;
    window.minimized = false;
    state.active_window = Some(window_id.clone());
    Ok(())
}

#[cfg(test)]
mod tests {
    use lesson_contract::LessonContent;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{ContentSource, LessonStep, WindowRect};

    fn request(id: &str) -> LaunchRequest {
        LaunchRequest {
            window_id: WindowId::from(id),
            title: id.to_uppercase(),
            icon_id: "cube".to_string(),
            from_taskbar: false,
            lesson: None,
        }
    }

    fn lesson_request(id: &str) -> LaunchRequest {
        LaunchRequest {
            lesson: Some(LessonLaunch {
                module_title: "Optics".to_string(),
                lesson_number: 1,
                learner_level: 2,
                archived: None,
            }),
            ..request(id)
        }
    }

    fn reduce(
        state: &mut DesktopState,
        interaction: &mut InteractionState,
        action: DesktopAction,
    ) -> Result<Vec<RuntimeEffect>, ReducerError> {
        reduce_desktop(state, interaction, &ShellConfig::default(), action)
    }

    fn open(state: &mut DesktopState, interaction: &mut InteractionState, id: &str) -> WindowId {
        reduce(state, interaction, DesktopAction::Launch(request(id))).expect("launch");
        WindowId::from(id)
    }

    fn window<'a>(state: &'a DesktopState, id: &WindowId) -> &'a WindowRecord {
        state.window(id).expect("window")
    }

    #[test]
    fn launch_creates_entry_with_cascaded_rect_and_activates_it() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        state.start_menu_open = true;

        let effects = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::Launch(request("profile")),
        )
        .unwrap();

        let id = WindowId::from("profile");
        let record = window(&state, &id);
        assert_eq!(record.z_index, 101);
        assert_eq!(
            record.rect,
            WindowRect {
                x: 320,
                y: 280,
                w: 800,
                h: 550,
            }
        );
        assert_eq!(state.active_window, Some(id.clone()));
        assert!(!state.start_menu_open);
        assert_eq!(effects, vec![RuntimeEffect::FocusWindowInput(id)]);
    }

    #[test]
    fn relaunching_open_window_restores_and_raises_without_duplicating() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let a = open(&mut state, &mut interaction, "a");
        let b = open(&mut state, &mut interaction, "b");
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow {
                window_id: a.clone(),
            },
        )
        .unwrap();

        open(&mut state, &mut interaction, "a");

        assert_eq!(state.windows.len(), 2);
        assert!(!window(&state, &a).minimized);
        assert!(window(&state, &a).z_index > window(&state, &b).z_index);
        assert_eq!(state.active_window, Some(a));
    }

    #[test]
    fn reopening_closed_entry_keeps_geometry_and_clears_flags() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let id = open(&mut state, &mut interaction, "calc");
        let moved = WindowRect {
            x: 5,
            y: 6,
            w: 400,
            h: 300,
        };
        state.windows[0].rect = moved;
        state.windows[0].maximized = true;

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: id.clone(),
            },
        )
        .unwrap();
        open(&mut state, &mut interaction, "calc");

        let record = window(&state, &id);
        assert!(record.is_open);
        assert!(!record.maximized);
        assert_eq!(record.rect, moved);
    }

    #[test]
    fn taskbar_reclick_on_active_window_minimizes_without_allocating_z() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let id = open(&mut state, &mut interaction, "calendar");
        let z_before = state.z_order.current();

        let effects = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::Launch(LaunchRequest {
                from_taskbar: true,
                ..request("calendar")
            }),
        )
        .unwrap();

        assert!(effects.is_empty());
        assert!(window(&state, &id).minimized);
        assert_eq!(state.active_window, None);
        assert_eq!(state.z_order.current(), z_before);
    }

    #[test]
    fn close_is_idempotent_and_clears_active() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let id = open(&mut state, &mut interaction, "settings");
        let close = DesktopAction::CloseWindow { window_id: id };

        reduce(&mut state, &mut interaction, close.clone()).unwrap();
        let once = state.clone();
        reduce(&mut state, &mut interaction, close).unwrap();

        assert_eq!(state, once);
        assert_eq!(state.active_window, None);
        assert!(state.open_windows().next().is_none());
    }

    #[test]
    fn unknown_ids_are_reported_without_mutation() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let ghost = WindowId::from("ghost");

        for action in [
            DesktopAction::FocusWindow {
                window_id: ghost.clone(),
            },
            DesktopAction::MinimizeWindow {
                window_id: ghost.clone(),
            },
            DesktopAction::ToggleMaximize {
                window_id: ghost.clone(),
            },
        ] {
            let before = state.clone();
            let err = reduce(&mut state, &mut interaction, action).unwrap_err();
            assert_eq!(err, ReducerError::WindowNotFound(ghost.clone()));
            assert_eq!(state, before);
        }
    }

    #[test]
    fn focusing_closed_window_is_rejected() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let id = open(&mut state, &mut interaction, "a");
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: id.clone(),
            },
        )
        .unwrap();
        let z_before = state.z_order.current();

        let err = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::FocusWindow {
                window_id: id.clone(),
            },
        )
        .unwrap_err();

        assert_eq!(err, ReducerError::WindowClosed(id));
        assert_eq!(state.z_order.current(), z_before);
        assert_eq!(state.active_window, None);
    }

    #[test]
    fn minimize_keeps_active_id() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let id = open(&mut state, &mut interaction, "a");

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::MinimizeWindow {
                window_id: id.clone(),
            },
        )
        .unwrap();

        assert!(window(&state, &id).minimized);
        assert_eq!(state.active_window, Some(id));
    }

    #[test]
    fn drag_moves_window_and_end_disarms() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let id = open(&mut state, &mut interaction, "mindmap");
        let original = window(&state, &id).rect;

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id.clone(),
                pointer: PointerPosition { x: 10, y: 10 },
            },
        )
        .unwrap();
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::UpdateGesture {
                pointer: PointerPosition { x: 35, y: 50 },
            },
        )
        .unwrap();

        let moved = window(&state, &id).rect;
        assert_eq!(moved, original.offset(25, 40));
        assert!(interaction.is_dragging());

        reduce(&mut state, &mut interaction, DesktopAction::EndGesture).unwrap();
        assert_eq!(interaction, InteractionState::default());
    }

    #[test]
    fn resize_uses_cumulative_delta_from_gesture_start() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let id = open(&mut state, &mut interaction, "a");
        let start = window(&state, &id).rect;

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: id.clone(),
                edge: ResizeEdge::West,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .unwrap();
        for x in [10, 20, 30] {
            reduce(
                &mut state,
                &mut interaction,
                DesktopAction::UpdateGesture {
                    pointer: PointerPosition { x, y: 99 },
                },
            )
            .unwrap();
        }

        let rect = window(&state, &id).rect;
        assert_eq!(rect.x, start.x + 30);
        assert_eq!(rect.w, start.w - 30);
        assert_eq!(rect.right(), start.right());
        assert_eq!(rect.y, start.y);
    }

    #[test]
    fn gestures_do_not_arm_on_maximized_window_but_still_focus() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let a = open(&mut state, &mut interaction, "a");
        open(&mut state, &mut interaction, "b");
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::ToggleMaximize {
                window_id: a.clone(),
            },
        )
        .unwrap();

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: a.clone(),
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .unwrap();

        assert_eq!(interaction.gesture, None);
        assert_eq!(state.active_window, Some(a));
    }

    #[test]
    fn narrow_viewport_disarms_and_blocks_gestures() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let id = open(&mut state, &mut interaction, "a");
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginMove {
                window_id: id.clone(),
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .unwrap();
        assert!(interaction.is_dragging());

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::SetViewport {
                viewport: ViewportSize {
                    width: 500,
                    height: 900,
                },
            },
        )
        .unwrap();
        assert_eq!(interaction.gesture, None);

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::BeginResize {
                window_id: id,
                edge: ResizeEdge::SouthEast,
                pointer: PointerPosition { x: 0, y: 0 },
            },
        )
        .unwrap();
        assert_eq!(interaction.gesture, None);
    }

    #[test]
    fn fresh_lesson_open_emits_load_and_restore_does_not() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();

        let effects = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::Launch(lesson_request("optics")),
        )
        .unwrap();
        let loads = effects
            .iter()
            .filter(|effect| matches!(effect, RuntimeEffect::LoadLessonContent(_)))
            .count();
        assert_eq!(loads, 1);
        assert_eq!(state.lesson.step, LessonStep::Loading);

        let effects = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::Launch(lesson_request("optics")),
        )
        .unwrap();
        assert!(effects
            .iter()
            .all(|effect| !matches!(effect, RuntimeEffect::LoadLessonContent(_))));
    }

    #[test]
    fn lesson_result_after_close_is_stale() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        let effects = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::Launch(lesson_request("optics")),
        )
        .unwrap();
        let Some(RuntimeEffect::LoadLessonContent(load)) = effects.into_iter().last() else {
            panic!("expected lesson load effect");
        };
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::CloseWindow {
                window_id: WindowId::from("optics"),
            },
        )
        .unwrap();
        let before = state.clone();

        let err = reduce(
            &mut state,
            &mut interaction,
            DesktopAction::LessonContentResolved {
                ticket: load.ticket,
                outcome: LessonOutcome::Unavailable {
                    reason: "late".to_string(),
                },
            },
        )
        .unwrap_err();

        assert_eq!(err, ReducerError::StaleLessonResult { ticket: load.ticket });
        assert_eq!(state, before);
    }

    #[test]
    fn current_lesson_result_is_applied() {
        let mut state = DesktopState::default();
        let mut interaction = InteractionState::default();
        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::Launch(lesson_request("optics")),
        )
        .unwrap();
        let ticket = state.lesson.pending_ticket.expect("pending ticket");
        let content = LessonContent {
            title: "Light".to_string(),
            objectives: Vec::new(),
            body: "Light bends.".to_string(),
            detailed_notes: None,
            quizzes: Vec::new(),
        };

        reduce(
            &mut state,
            &mut interaction,
            DesktopAction::LessonContentResolved {
                ticket,
                outcome: LessonOutcome::Loaded {
                    content: content.clone(),
                    source: ContentSource::Remote,
                },
            },
        )
        .unwrap();

        assert_eq!(state.lesson.step, LessonStep::Lesson);
        assert_eq!(state.lesson.content, Some(content));
        assert_eq!(state.lesson.pending_ticket, None);
    }
}
