//! Owned window-manager store.
//!
//! [`DesktopStore`] is the single writer of the registry. Every operation funnels through
//! [`DesktopStore::dispatch`], which reduces against a scratch copy, commits only on success, and
//! then re-evaluates the sidebar policy when a visibility-relevant field changed. Errors are
//! logged and swallowed so callers never observe a failure.

use leptos::logging;
use lesson_contract::LessonModule;

use crate::{
    catalog::{LaunchCatalogs, ModuleCatalog},
    config::ShellConfig,
    lesson::LessonOutcome,
    model::{
        ContentSource, DesktopState, InteractionState, PointerPosition, ResizeEdge, ViewportSize,
        WindowId, WindowRecord,
    },
    reducer::{reduce_desktop, DesktopAction, ReducerError, RuntimeEffect},
    router::{route_launch, LaunchTarget},
    sidebar::{next_sidebar_hidden, VisibilityProjection},
    taskbar::{taskbar_entries, TaskbarEntry, TaskbarIntent},
    window_manager::{window_frame, WindowFrame},
};

#[derive(Debug, Clone)]
pub struct DesktopStore {
    state: DesktopState,
    interaction: InteractionState,
    config: ShellConfig,
    catalogs: LaunchCatalogs,
    learner_level: u32,
}

impl Default for DesktopStore {
    fn default() -> Self {
        Self::new(ShellConfig::default(), LaunchCatalogs::default())
    }
}

impl DesktopStore {
    pub fn new(config: ShellConfig, catalogs: LaunchCatalogs) -> Self {
        Self {
            state: DesktopState::new(config.z_floor),
            interaction: InteractionState::default(),
            config,
            catalogs,
            learner_level: 1,
        }
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn catalogs(&self) -> &LaunchCatalogs {
        &self.catalogs
    }

    pub fn learner_level(&self) -> u32 {
        self.learner_level
    }

    pub fn sidebar_hidden(&self) -> bool {
        self.state.sidebar_hidden
    }

    pub fn is_narrow(&self) -> bool {
        self.config.is_narrow(self.state.viewport.width)
    }

    /// Applies one action atomically and returns the side effects the host must run.
    pub fn dispatch(&mut self, action: DesktopAction) -> Vec<RuntimeEffect> {
        let before = VisibilityProjection::of(&self.state);
        let mut next = self.state.clone();
        let mut interaction = self.interaction.clone();

        match reduce_desktop(&mut next, &mut interaction, &self.config, action) {
            Ok(mut effects) => {
                let visibility_changed = VisibilityProjection::of(&next) != before;
                self.state = next;
                self.interaction = interaction;
                if visibility_changed {
                    effects.extend(self.refresh_sidebar());
                }
                effects
            }
            Err(err @ ReducerError::StaleLessonResult { .. }) => {
                logging::log!("discarding {err}");
                Vec::new()
            }
            Err(err) => {
                logging::warn!("desktop reducer error: {err}");
                Vec::new()
            }
        }
    }

    fn refresh_sidebar(&mut self) -> Option<RuntimeEffect> {
        let hidden = next_sidebar_hidden(
            &self.state.windows,
            self.state.active_window.as_ref(),
            self.state.sidebar_hidden,
            &self.config.sidebar_exempt_window,
        );
        if hidden == self.state.sidebar_hidden {
            return None;
        }
        logging::log!("sidebar {}", if hidden { "hidden" } else { "shown" });
        self.state.sidebar_hidden = hidden;
        Some(RuntimeEffect::SidebarVisibilityChanged { hidden })
    }

    /// Routes `target` through the catalogs and applies the resulting launch.
    pub fn launch(&mut self, target: LaunchTarget) -> Vec<RuntimeEffect> {
        let request = route_launch(target, &self.catalogs, &self.config, self.learner_level);
        self.dispatch(DesktopAction::Launch(request))
    }

    /// Opens or restores `id`, preferring the explicit title/icon over catalog defaults.
    pub fn open(
        &mut self,
        id: &str,
        title: Option<&str>,
        icon_id: Option<&str>,
    ) -> Vec<RuntimeEffect> {
        let mut target = LaunchTarget::new(id);
        target.title = title.map(str::to_string);
        target.icon_id = icon_id.map(str::to_string);
        self.launch(target)
    }

    /// Taskbar primary click: minimizes the active visible window, otherwise behaves like `open`.
    pub fn launch_from_taskbar(&mut self, id: &str) -> Vec<RuntimeEffect> {
        self.launch(LaunchTarget::new(id).from_taskbar())
    }

    pub fn close(&mut self, id: &str) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::CloseWindow {
            window_id: WindowId::from(id),
        })
    }

    pub fn focus(&mut self, id: &str) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::FocusWindow {
            window_id: WindowId::from(id),
        })
    }

    pub fn minimize(&mut self, id: &str) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::MinimizeWindow {
            window_id: WindowId::from(id),
        })
    }

    pub fn toggle_maximize(&mut self, id: &str) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::ToggleMaximize {
            window_id: WindowId::from(id),
        })
    }

    pub fn apply_taskbar_intent(&mut self, id: &str, intent: TaskbarIntent) -> Vec<RuntimeEffect> {
        match intent {
            TaskbarIntent::Primary => self.launch_from_taskbar(id),
            TaskbarIntent::DoubleClick => self.minimize(id),
            TaskbarIntent::Close => self.close(id),
        }
    }

    pub fn taskbar(&self) -> Vec<TaskbarEntry> {
        taskbar_entries(&self.state)
    }

    /// Open windows paired with their render frames, in insertion order.
    pub fn frames(&self) -> Vec<(WindowRecord, WindowFrame)> {
        self.state
            .open_windows()
            .map(|window| {
                let frame = window_frame(
                    window,
                    self.state.active_window.as_ref(),
                    self.state.viewport,
                    &self.config,
                );
                (window.clone(), frame)
            })
            .collect()
    }

    pub fn frame(&self, window_id: &WindowId) -> Option<WindowFrame> {
        self.state
            .window(window_id)
            .filter(|window| window.is_open)
            .map(|window| {
                window_frame(
                    window,
                    self.state.active_window.as_ref(),
                    self.state.viewport,
                    &self.config,
                )
            })
    }

    pub fn toggle_start_menu(&mut self) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::ToggleStartMenu)
    }

    pub fn close_start_menu(&mut self) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::CloseStartMenu)
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::SetViewport {
            viewport: ViewportSize { width, height },
        })
    }

    pub fn begin_drag(&mut self, id: &str, pointer: PointerPosition) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::BeginMove {
            window_id: WindowId::from(id),
            pointer,
        })
    }

    pub fn begin_resize(
        &mut self,
        id: &str,
        edge: ResizeEdge,
        pointer: PointerPosition,
    ) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::BeginResize {
            window_id: WindowId::from(id),
            edge,
            pointer,
        })
    }

    pub fn update_gesture(&mut self, pointer: PointerPosition) -> Vec<RuntimeEffect> {
        if self.interaction.gesture.is_none() {
            return Vec::new();
        }
        self.dispatch(DesktopAction::UpdateGesture { pointer })
    }

    pub fn end_gesture(&mut self) -> Vec<RuntimeEffect> {
        if self.interaction.gesture.is_none() {
            return Vec::new();
        }
        self.dispatch(DesktopAction::EndGesture)
    }

    pub fn set_learner_level(&mut self, level: u32) {
        self.learner_level = level;
    }

    pub fn set_modules(&mut self, modules: Vec<LessonModule>) {
        self.catalogs.modules = ModuleCatalog::new(modules);
    }

    pub fn set_remote_content(&mut self, enabled: bool) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::SetRemoteContent { enabled })
    }

    /// Delivers a lesson load result; stale tickets are dropped.
    pub fn resolve_lesson(&mut self, ticket: u64, outcome: LessonOutcome) -> Vec<RuntimeEffect> {
        self.dispatch(DesktopAction::LessonContentResolved { ticket, outcome })
    }

    /// Stops using the generator and settles any pending load from the local archive.
    pub fn force_local_archive(&mut self) -> Vec<RuntimeEffect> {
        let mut effects = self.set_remote_content(false);

        let lesson = &self.state.lesson;
        let (Some(ticket), Some(module_id)) = (lesson.pending_ticket, lesson.module_id.clone())
        else {
            return effects;
        };
        let outcome = match self
            .catalogs
            .modules
            .module(module_id.as_str())
            .and_then(LessonModule::archived_lesson)
        {
            Some(content) => LessonOutcome::Loaded {
                content: content.clone(),
                source: ContentSource::LocalArchive,
            },
            None => LessonOutcome::Unavailable {
                reason: format!("no archived lesson for `{module_id}`"),
            },
        };
        effects.extend(self.resolve_lesson(ticket, outcome));
        effects
    }
}
