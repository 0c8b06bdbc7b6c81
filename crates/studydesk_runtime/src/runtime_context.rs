//! Runtime provider and context wiring for the desktop shell.
//!
//! This module owns the long-lived [`DesktopStore`] signal, the runtime effect queue, and the
//! host bundle. UI composition stays in [`crate::components`].

use std::rc::Rc;

use leptos::*;
use lesson_contract::{LessonContentLoader, LessonModule};

use crate::{
    catalog::{AppCatalog, LaunchCatalogs, ModuleCatalog},
    config::ShellConfig,
    effect_executor,
    host::DesktopHostContext,
    model::WindowId,
    reducer::{DesktopAction, RuntimeEffect},
    store::DesktopStore,
};

#[derive(Clone, Copy)]
/// Leptos context for reading the desktop store and routing operations through it.
pub struct DesktopRuntimeContext {
    /// Host service bundle for executing runtime side effects and environment queries.
    pub host: StoredValue<DesktopHostContext>,
    /// Reactive owned store: registry, gesture, config, and catalogs.
    pub store: RwSignal<DesktopStore>,
    /// Queue of runtime effects emitted by the store and processed by the shell.
    pub effects: RwSignal<Vec<RuntimeEffect>>,
    /// Renders the body of a window by id. The shell never looks inside.
    pub window_content: Callback<WindowId, View>,
}

impl DesktopRuntimeContext {
    /// Runs one store operation and queues whatever effects it produced.
    pub fn with_store(&self, op: impl FnOnce(&mut DesktopStore) -> Vec<RuntimeEffect>) {
        let mut produced = Vec::new();
        self.store.update(|store| produced = op(store));
        if !produced.is_empty() {
            self.effects.update(|queue| queue.extend(produced));
        }
    }

    /// Dispatches a raw reducer action.
    pub fn dispatch_action(&self, action: DesktopAction) {
        self.with_store(|store| store.dispatch(action));
    }

    /// Whether a drag or resize is currently armed; read without subscribing.
    pub fn gesture_armed(&self) -> bool {
        self.store
            .with_untracked(|store| store.interaction().gesture.is_some())
    }
}

#[component]
/// Provides [`DesktopRuntimeContext`] to descendant components.
pub fn DesktopProvider(
    /// Asynchronous lesson generator; rejections fall back to each module's archive.
    lesson_loader: Rc<dyn LessonContentLoader>,
    /// Renders window bodies by id.
    #[prop(into)]
    window_content: Callback<WindowId, View>,
    /// Layout tunables; defaults when omitted or invalid.
    #[prop(optional)]
    config: Option<ShellConfig>,
    /// Initial lesson modules available to the launch router.
    #[prop(optional)]
    modules: Vec<LessonModule>,
    children: Children,
) -> impl IntoView {
    let host = DesktopHostContext::new(lesson_loader);
    let viewport = host.viewport_size();
    let catalogs = LaunchCatalogs::new(Rc::new(AppCatalog::default()), ModuleCatalog::new(modules));
    let config = config
        .map(ShellConfig::validated_or_default)
        .unwrap_or_default();
    let mut initial = DesktopStore::new(config, catalogs);
    // Boot-time viewport cannot change sidebar state; its effects are empty.
    let _ = initial.set_viewport(viewport.width, viewport.height);

    let runtime = DesktopRuntimeContext {
        host: store_value(host),
        store: create_rw_signal(initial),
        effects: create_rw_signal(Vec::<RuntimeEffect>::new()),
        window_content,
    };

    provide_context(runtime);
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`DesktopRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`DesktopProvider`].
pub fn use_desktop_runtime() -> DesktopRuntimeContext {
    use_context::<DesktopRuntimeContext>().expect("DesktopRuntimeContext not provided")
}
